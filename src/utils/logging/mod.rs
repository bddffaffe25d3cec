//! Logging utilities for output
//!
//! This module provides utilities for logging and console output.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use console::print_flag_report;
pub use log::{log_operation_complete, log_operation_start};
