//! Core business logic for the finance mart.
//!
//! This crate contains pure business logic with ZERO database or dashboard
//! dependencies. It turns loaded dimension and fact data into a validated
//! monthly actuals-vs-budget mart.
//!
//! # Modules
//!
//! - `dimension` - Cost centers, GL accounts and the cost center hierarchy
//! - `fiscal` - Fiscal periods and the fiscal calendar
//! - `facts` - Actual postings, budget lines and the loaded dataset
//! - `integrity` - Schema checks run before the transform
//! - `mart` - Monthly aggregation, outer join and variance
//! - `validation` - Grain and conservation checks gating publication
//! - `pipeline` - One reporting cycle end to end
//! - `export` - CSV output
//! - `generator` - Seeded synthetic datasets

pub mod dimension;
pub mod export;
pub mod facts;
pub mod fiscal;
pub mod generator;
pub mod integrity;
pub mod mart;
pub mod pipeline;
pub mod validation;

pub use facts::Dataset;
pub use mart::{Mart, MartError, MartRow};
pub use pipeline::{MartPipeline, PublishedMart};
