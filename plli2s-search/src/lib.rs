#![no_std]

extern crate alloc;

pub mod candidate;
pub mod config;
pub mod frequency;
pub mod metric;
pub mod presets;
pub mod search;

pub use candidate::Candidate;
pub use config::{Band, DataFormat, SearchConfig};
pub use metric::MetricError;
pub use search::{search, Report};
