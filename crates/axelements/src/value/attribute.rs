/*!
Caller-facing attribute values.
*/

use std::fmt;

use super::{BoxedValue, RawValue};
use crate::element::Element;
use crate::platform::NativeHandle;
use crate::types::{Geometry, Point, Range, Rect, Size};

/// A massaged attribute value: element references are wrapped, boxed structs
/// are decoded, everything else passes through as a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<H> {
  /// Passed through unchanged, including null and arrays of plain values.
  Scalar(RawValue<H>),
  Element(Element<H>),
  /// Collection whose members were converted individually.
  Collection(Vec<AttributeValue<H>>),
  Geometry(Geometry),
}

impl<H> AttributeValue<H> {
  pub const fn null() -> Self {
    Self::Scalar(RawValue::Null)
  }

  pub const fn is_null(&self) -> bool {
    matches!(self, Self::Scalar(RawValue::Null))
  }

  /// Null, an empty collection or an empty string.
  pub fn is_blank(&self) -> bool {
    match self {
      Self::Scalar(RawValue::Null) => true,
      Self::Scalar(RawValue::String(s)) => s.is_empty(),
      Self::Scalar(RawValue::Array(items)) => items.is_empty(),
      Self::Collection(items) => items.is_empty(),
      Self::Scalar(_) | Self::Element(_) | Self::Geometry(_) => false,
    }
  }

  pub fn as_scalar(&self) -> Option<&RawValue<H>> {
    match self {
      Self::Scalar(raw) => Some(raw),
      Self::Element(_) | Self::Collection(_) | Self::Geometry(_) => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    self.as_scalar().and_then(RawValue::as_str)
  }

  pub fn as_bool(&self) -> Option<bool> {
    self.as_scalar().and_then(RawValue::as_bool)
  }

  pub fn as_f64(&self) -> Option<f64> {
    self.as_scalar().and_then(RawValue::as_f64)
  }

  pub const fn as_element(&self) -> Option<&Element<H>> {
    match self {
      Self::Element(element) => Some(element),
      Self::Scalar(_) | Self::Collection(_) | Self::Geometry(_) => None,
    }
  }

  pub fn into_element(self) -> Option<Element<H>> {
    match self {
      Self::Element(element) => Some(element),
      Self::Scalar(_) | Self::Collection(_) | Self::Geometry(_) => None,
    }
  }

  pub fn as_collection(&self) -> Option<&[AttributeValue<H>]> {
    match self {
      Self::Collection(items) => Some(items),
      Self::Scalar(_) | Self::Element(_) | Self::Geometry(_) => None,
    }
  }

  /// Element members of a collection. Anything else yields nothing.
  pub fn into_elements(self) -> Vec<Element<H>> {
    match self {
      Self::Collection(items) => items.into_iter().filter_map(Self::into_element).collect(),
      Self::Element(element) => vec![element],
      Self::Scalar(_) | Self::Geometry(_) => Vec::new(),
    }
  }

  pub const fn as_geometry(&self) -> Option<Geometry> {
    match self {
      Self::Geometry(geometry) => Some(*geometry),
      Self::Scalar(_) | Self::Element(_) | Self::Collection(_) => None,
    }
  }

  pub fn as_point(&self) -> Option<Point> {
    self.as_geometry().and_then(|g| g.as_point())
  }

  pub fn as_size(&self) -> Option<Size> {
    self.as_geometry().and_then(|g| g.as_size())
  }

  pub fn as_rect(&self) -> Option<Rect> {
    self.as_geometry().and_then(|g| g.as_rect())
  }

  pub fn as_range(&self) -> Option<Range> {
    self.as_geometry().and_then(|g| g.as_range())
  }
}

impl<H: NativeHandle> AttributeValue<H> {
  /// Back to the native representation, for writes and parameters.
  pub fn into_raw(self) -> RawValue<H> {
    match self {
      Self::Scalar(raw) => raw,
      Self::Element(element) => RawValue::Element(element.handle().clone()),
      Self::Collection(items) => RawValue::Array(items.into_iter().map(Self::into_raw).collect()),
      Self::Geometry(geometry) => RawValue::Boxed(BoxedValue::from(geometry)),
    }
  }
}

impl<H: NativeHandle> fmt::Display for AttributeValue<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Scalar(raw) => write!(f, "{raw}"),
      Self::Element(element) => write!(f, "#<{}>", element.type_name()),
      Self::Collection(items) => {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{item}")?;
        }
        f.write_str("]")
      }
      Self::Geometry(geometry) => write!(f, "{geometry}"),
    }
  }
}

impl<H> From<RawValue<H>> for AttributeValue<H> {
  fn from(raw: RawValue<H>) -> Self {
    Self::Scalar(raw)
  }
}

impl<H> From<bool> for AttributeValue<H> {
  fn from(b: bool) -> Self {
    Self::Scalar(RawValue::Boolean(b))
  }
}

impl<H> From<f64> for AttributeValue<H> {
  fn from(n: f64) -> Self {
    Self::Scalar(RawValue::Number(n))
  }
}

impl<H> From<i32> for AttributeValue<H> {
  fn from(n: i32) -> Self {
    Self::Scalar(RawValue::from(n))
  }
}

impl<H> From<&str> for AttributeValue<H> {
  fn from(s: &str) -> Self {
    Self::Scalar(RawValue::from(s))
  }
}

impl<H> From<String> for AttributeValue<H> {
  fn from(s: String) -> Self {
    Self::Scalar(RawValue::String(s))
  }
}

impl<H> From<Geometry> for AttributeValue<H> {
  fn from(geometry: Geometry) -> Self {
    Self::Geometry(geometry)
  }
}

impl<H> From<Point> for AttributeValue<H> {
  fn from(point: Point) -> Self {
    Self::Geometry(Geometry::Point(point))
  }
}

impl<H> From<Size> for AttributeValue<H> {
  fn from(size: Size) -> Self {
    Self::Geometry(Geometry::Size(size))
  }
}

impl<H> From<Rect> for AttributeValue<H> {
  fn from(rect: Rect) -> Self {
    Self::Geometry(Geometry::Rect(rect))
  }
}

impl<H> From<Range> for AttributeValue<H> {
  fn from(range: Range) -> Self {
    Self::Geometry(Geometry::Range(range))
  }
}

impl<H> From<Element<H>> for AttributeValue<H> {
  fn from(element: Element<H>) -> Self {
    Self::Element(element)
  }
}

impl<H> From<Vec<Element<H>>> for AttributeValue<H> {
  fn from(elements: Vec<Element<H>>) -> Self {
    Self::Collection(elements.into_iter().map(Self::Element).collect())
  }
}
