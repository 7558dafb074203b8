//! Wire types shared between the vitals client and the receiving backend.
//!
//! The only payload is [`DailyAggregate`], POSTed as JSON to [`RECEIVE_PATH`].

mod endpoint;
mod types;

pub use endpoint::{join_url, RECEIVE_PATH};
pub use types::{DailyAggregate, HeartRatePoint, MISSING_SAMPLE_TIME};
