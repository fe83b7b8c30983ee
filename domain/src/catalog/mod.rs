//! Run parameters chosen in the input form.
//!
//! - [`effort::Effort`]: research effort level (low / medium / high)
//! - [`model::ModelInfo`]: a model offered by the backend

pub mod effort;
pub mod model;
