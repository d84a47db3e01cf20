//! CLI command handlers

pub mod generate;
pub mod image;
pub mod manga;
pub mod reflect;

pub use generate::run_generate;
pub use manga::run_manga;
pub use reflect::run_reflect;

use crate::error::CliError;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn require_entry(entry: &str) -> Result<&str, CliError> {
    match entry.trim() {
        "" => Err(CliError::InvalidInput("entry is required".to_string())),
        entry => Ok(entry),
    }
}
