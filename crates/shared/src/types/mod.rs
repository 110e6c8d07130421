//! Common types used across the workspace.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{
    AMOUNT_SCALE, MAX_ABS_AMOUNT, PERCENT_SCALE, exceeds_amount_limit, format_amount, has_excess_precision,
    round_amount,
};
