//! Lexiscope Core: shared record types, configuration, error taxonomy.

pub mod capabilities;
pub mod config;
pub mod error;
pub mod outcome;
pub mod types;

pub use capabilities::{CapabilityReport, Connectivity};
pub use config::{DataPaths, LexicalConfig, LexiscopeConfig, NlpMode, StoreMode};
pub use error::{Error, Result};
pub use outcome::Outcome;
pub use types::*;
