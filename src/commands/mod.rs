//! CLI command implementations for churnscope operations.
//!
//! Each submodule handles a specific command with its configuration and
//! execution logic:
//! - **analyze**: run churn and lint analysis over a repository
//! - **init**: initialize a new churnscope configuration file

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
