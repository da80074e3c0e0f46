//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use dllscan_core::prelude::*;
//! ```

pub use crate::builder::{ScanOutcome, Scanner};
pub use crate::clock::{Clock, FixedClock, LocalClock};
pub use crate::config::{load_config, ScanConfig};
pub use crate::error::{ScanError, ScanResult};
pub use crate::extract::FunctionSignature;
pub use crate::manifest::{parse_schema_version, Manifest};
