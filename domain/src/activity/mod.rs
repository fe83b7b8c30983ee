//! Agent activity domain.
//!
//! - [`event::ActivityEvent`]: one step record emitted during a turn
//! - [`icon::ActivityIcon`]: icon category chosen from the step title

pub mod event;
pub mod icon;
