pub mod server;

pub mod config;
pub mod error;
pub mod telemetry;

pub mod analysis;
pub mod filter;
pub mod query;
pub mod record;
pub mod service;
pub mod storage;

pub use crate::error::{CoreError, CoreResult};
pub use crate::filter::{execute, FilterSet};
pub use crate::query::interpret;
pub use crate::record::{AnalyzedRecord, StringProperties};
pub use crate::service::StringService;
