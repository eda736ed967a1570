//! `pitlane` - A read-only API over a race team's operations database
//!
//! This library provides the data access layer, the part lifecycle
//! derivation, and the HTTP API served by the `pitlane` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use lifecycle::{Lifecycle, PartLifecycle, WearStatus};
pub use logging::init_logging;
pub use storage::{Storage, StorageStats};
