mod aggregator;

pub use aggregator::{aggregate, Aggregation, DailyRecords};
