// Library for tests to access modules

pub mod adapters;
pub mod aggregator;
pub mod config;
pub mod detect;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod models;
pub mod probe;
pub mod source;
pub mod units;

pub use dispatcher::Sysinfo;
pub use error::SysinfoError;
pub use metrics::{Category, MetricName};
