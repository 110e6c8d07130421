//! Monthly actuals vs. budget mart.
//!
//! - `aggregate` - collapse fact rows to the reporting grain
//! - `join` - full outer union of aggregated actuals and budget
//! - `variance` - variance amount and percentage per key
//! - `service` - the two steps composed

pub mod aggregate;
pub mod error;
pub mod join;
pub mod key;
pub mod service;
pub mod types;
pub mod variance;


pub use aggregate::{AmountByKey, MonthlyAggregator};
pub use error::MartError;
pub use join::MartJoiner;
pub use key::{GrainRow, MartKey};
pub use service::MartService;
pub use types::{Mart, MartRow, MartTotals, Measure};
pub use variance::Variance;
