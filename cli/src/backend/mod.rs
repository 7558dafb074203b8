mod client;

pub use client::{AggregateSink, BackendClient, TransportError};
