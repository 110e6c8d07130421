//! One reporting cycle: integrity check, aggregation, join and validation.

pub mod service;

pub use service::{MartEvaluation, MartPipeline, PublishedMart};
