//! Core engine modules for pipeline views.

pub mod errors;
pub mod load;
pub mod resolver;
pub mod state;
pub mod steps;
pub mod types;
