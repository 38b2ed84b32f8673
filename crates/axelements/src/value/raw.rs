/*!
Raw values as returned by the native accessibility layer.

A raw value is untyped from the caller's point of view: it still carries
native element handles and undecoded boxed structs. The massager turns it into
an [`AttributeValue`](super::AttributeValue).
*/

use std::fmt;

use crate::types::{Geometry, GeometryKind};

/// A boxed fixed-shape struct: a type code plus its primitive components.
///
/// The type code selects the geometry kind through a fixed table (see
/// [`GeometryKind::from_code`]); unknown codes do not decode.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxedValue {
  pub type_code: u32,
  pub data: Vec<f64>,
}

impl BoxedValue {
  pub fn new(type_code: u32, data: Vec<f64>) -> Self {
    Self { type_code, data }
  }

  /// Secondary discriminant of the box, if it is one of the known geometry kinds.
  pub fn kind(&self) -> Option<GeometryKind> {
    GeometryKind::from_code(self.type_code)
  }

  pub fn decode(&self) -> Option<Geometry> {
    Geometry::decode(self.kind()?, &self.data)
  }
}

impl From<Geometry> for BoxedValue {
  fn from(geometry: Geometry) -> Self {
    Self::new(geometry.kind().code(), geometry.components())
  }
}

/// A value as produced by the native layer, before massaging.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<H> {
  /// No value (missing attribute, failed call, or an explicit null).
  Null,
  Boolean(bool),
  Number(f64),
  String(String),
  Url(String),
  /// Reference to another element in the tree.
  Element(H),
  /// Ordered collection; assumed homogeneous.
  Array(Vec<RawValue<H>>),
  /// Boxed geometric struct.
  Boxed(BoxedValue),
  /// A native value class with no special handling. Passed through untouched.
  Opaque { type_name: String, description: String },
}

/// Native type tag of a raw value. Drives massager dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
  Null,
  Boolean,
  Number,
  String,
  Url,
  Element,
  Array,
  Boxed,
  Opaque,
}

impl<H> RawValue<H> {
  pub const fn type_tag(&self) -> TypeTag {
    match self {
      Self::Null => TypeTag::Null,
      Self::Boolean(_) => TypeTag::Boolean,
      Self::Number(_) => TypeTag::Number,
      Self::String(_) => TypeTag::String,
      Self::Url(_) => TypeTag::Url,
      Self::Element(_) => TypeTag::Element,
      Self::Array(_) => TypeTag::Array,
      Self::Boxed(_) => TypeTag::Boxed,
      Self::Opaque { .. } => TypeTag::Opaque,
    }
  }

  pub const fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) | Self::Url(s) => Some(s),
      Self::Null
      | Self::Boolean(_)
      | Self::Number(_)
      | Self::Element(_)
      | Self::Array(_)
      | Self::Boxed(_)
      | Self::Opaque { .. } => None,
    }
  }

  pub const fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Boolean(b) => Some(*b),
      Self::Null
      | Self::Number(_)
      | Self::String(_)
      | Self::Url(_)
      | Self::Element(_)
      | Self::Array(_)
      | Self::Boxed(_)
      | Self::Opaque { .. } => None,
    }
  }

  pub const fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Number(n) => Some(*n),
      Self::Null
      | Self::Boolean(_)
      | Self::String(_)
      | Self::Url(_)
      | Self::Element(_)
      | Self::Array(_)
      | Self::Boxed(_)
      | Self::Opaque { .. } => None,
    }
  }

  pub fn as_array(&self) -> Option<&[RawValue<H>]> {
    match self {
      Self::Array(items) => Some(items),
      Self::Null
      | Self::Boolean(_)
      | Self::Number(_)
      | Self::String(_)
      | Self::Url(_)
      | Self::Element(_)
      | Self::Boxed(_)
      | Self::Opaque { .. } => None,
    }
  }

  /// String value if present and non-empty. Subroles are sometimes reported
  /// but empty.
  pub fn non_empty_str(&self) -> Option<&str> {
    self.as_str().filter(|s| !s.is_empty())
  }
}

impl<H: fmt::Debug> fmt::Display for RawValue<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => f.write_str("nil"),
      Self::Boolean(b) => write!(f, "{b}"),
      Self::Number(n) => write!(f, "{n}"),
      Self::String(s) | Self::Url(s) => write!(f, "{s:?}"),
      Self::Element(h) => write!(f, "{h:?}"),
      Self::Array(items) => {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{item}")?;
        }
        f.write_str("]")
      }
      Self::Boxed(boxed) => match boxed.decode() {
        Some(geometry) => write!(f, "{geometry}"),
        None => write!(f, "<boxed type {}>", boxed.type_code),
      },
      Self::Opaque { description, .. } => f.write_str(description),
    }
  }
}

impl<H> From<bool> for RawValue<H> {
  fn from(b: bool) -> Self {
    Self::Boolean(b)
  }
}

impl<H> From<f64> for RawValue<H> {
  fn from(n: f64) -> Self {
    Self::Number(n)
  }
}

impl<H> From<i32> for RawValue<H> {
  fn from(n: i32) -> Self {
    Self::Number(f64::from(n))
  }
}

impl<H> From<&str> for RawValue<H> {
  fn from(s: &str) -> Self {
    Self::String(s.to_owned())
  }
}

impl<H> From<String> for RawValue<H> {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl<H> From<Geometry> for RawValue<H> {
  fn from(geometry: Geometry) -> Self {
    Self::Boxed(geometry.into())
  }
}
