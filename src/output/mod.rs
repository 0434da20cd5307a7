//! Output formatting for rudoro.

mod pretty;

use serde::Serialize;

use crate::error::RudoroError;

pub use pretty::*;

/// Serialize any value to pretty JSON.
///
/// # Errors
///
/// Returns `RudoroError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, RudoroError> {
    Ok(serde_json::to_string_pretty(value)?)
}
