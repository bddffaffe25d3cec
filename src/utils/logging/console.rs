//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use crate::models::flags::InequityFlags;

/// Render the raised inequity flags of a cohort, one per line
#[must_use]
pub fn format_flag_report(id: &str, flags: &InequityFlags) -> String {
    let raised = flags.raised();
    let mut output = format!("Inequity flags for {id}: {} raised\n", raised.len());
    for name in &raised {
        output.push_str(&format!("  - {name}\n"));
    }
    output
}

/// Print the raised inequity flags of a cohort
pub fn print_flag_report(id: &str, flags: &InequityFlags) {
    print!("{}", format_flag_report(id, flags));
}
