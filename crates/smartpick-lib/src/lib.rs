//! Phone recommendation engine.
//!
//! A free-text query is parsed into numeric constraints, the in-memory
//! catalog is filtered by them, and the survivors are ranked by a linear
//! model's predicted rating.

pub mod catalog;
pub mod config;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod runtime;
