/*! Error types for element operations.

Only the façade raises these. Native call failures are reported through
`platform::diagnostics` and surface as null/empty values instead.
*/

use crate::element::Inspection;

/// Errors raised by [`Element`](crate::Element) operations.
#[derive(Debug, thiserror::Error)]
pub enum AxError {
  /// The attribute, action or parameterized attribute does not exist on the element.
  #[error("{name} was not found")]
  LookupFailure { name: String },

  #[error("{name} is a read only attribute")]
  AttributeReadOnly { name: String },

  /// A search that was required to produce a result came back blank.
  #[error("Could not find `{target}`{} as a child of {searcher}", format_filters(.filters))]
  SearchFailure {
    searcher: Box<Inspection>,
    target: String,
    filters: Vec<String>,
  },

  /// Neither an attribute nor a searchable child matches the name.
  #[error("undefined method `{name}` for {receiver}")]
  Unsupported { name: String, receiver: String },

  #[error("No element at position ({x}, {y})")]
  NoElementAtPosition { x: f64, y: f64 },

  #[error("Accessibility permissions not granted")]
  PermissionDenied,
}

impl AxError {
  pub(crate) fn lookup(name: impl Into<String>) -> Self {
    Self::LookupFailure { name: name.into() }
  }

  pub(crate) fn read_only(name: impl Into<String>) -> Self {
    Self::AttributeReadOnly { name: name.into() }
  }
}

fn format_filters(filters: &[String]) -> String {
  if filters.is_empty() {
    String::new()
  } else {
    format!(" with {}", filters.join(", "))
  }
}

/// Result type for element operations.
pub type AxResult<T> = Result<T, AxError>;
