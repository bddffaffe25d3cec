//! Utility functions for logging and console output

pub mod logging;

pub use logging::{log_operation_complete, log_operation_start, print_flag_report};
