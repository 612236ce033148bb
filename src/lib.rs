//! Status and step views for Tekton-style pipeline resources.

pub mod engine;
