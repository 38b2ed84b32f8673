/*! Branded name type for element classes. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Name of an element class, e.g. `Button` or `StandardWindow`.
///
/// Derived from a platform role/subrole with the platform prefix stripped.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From, Into,
)]
pub struct TypeName(pub String);

impl TypeName {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for TypeName {
  fn from(s: &str) -> Self {
    Self(s.to_owned())
  }
}

impl Borrow<str> for TypeName {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for TypeName {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl PartialEq<str> for TypeName {
  fn eq(&self, other: &str) -> bool {
    self.0 == other
  }
}

impl PartialEq<&str> for TypeName {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}
