//! Use cases (application services)

pub mod copy_response;
pub mod load_models;
pub mod submit_turn;
