//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying derived keys
//! and configuration as JSON or plain text.

mod json;
mod text;

// Re-export public API
pub use json::{config_json, derived_keys_json};
pub use text::print_derived_keys;
