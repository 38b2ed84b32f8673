/*! Geometry types carried by boxed accessibility values. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A 2D point in screen coordinates (origin at the top-left of the main screen).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Center of the rectangle that has `self` as its origin and `size` as its size.
  pub fn center(&self, size: Size) -> Point {
    Point::new(self.x + size.width / 2.0, self.y + size.height / 2.0)
  }

  /// Flip between top-left and bottom-left origin conventions for a screen of the given height.
  pub fn flipped(&self, screen_height: f64) -> Point {
    Point::new(self.x, screen_height - self.y)
  }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Size {
  pub width: f64,
  pub height: f64,
}

impl Size {
  pub const fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }
}

/// Rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Rect {
  pub origin: Point,
  pub size: Size,
}

impl Rect {
  pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Check if a point is contained within this rectangle (edges inclusive).
  pub fn contains(&self, point: Point) -> bool {
    point.x >= self.origin.x
      && point.x <= self.origin.x + self.size.width
      && point.y >= self.origin.y
      && point.y <= self.origin.y + self.size.height
  }

  pub fn center(&self) -> Point {
    self.origin.center(self.size)
  }

  /// Flip the rectangle's origin between top-left and bottom-left conventions.
  pub fn flipped(&self, screen_height: f64) -> Rect {
    Rect {
      origin: Point::new(
        self.origin.x,
        screen_height - (self.origin.y + self.size.height),
      ),
      size: self.size,
    }
  }
}

/// A location/length span, used for text ranges.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export)]
pub struct Range {
  pub location: i64,
  pub length: i64,
}

impl Range {
  pub const fn new(location: i64, length: i64) -> Self {
    Self { location, length }
  }
}

/// Which fixed-shape struct a boxed value holds.
///
/// Discriminants follow the platform's boxed-value type codes; `0` is the
/// illegal type and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GeometryKind {
  Point = 1,
  Size = 2,
  Rect = 3,
  Range = 4,
}

/// Order-sensitive lookup from boxed type code to geometry kind. Index 0 is the
/// illegal type.
const BOX_TYPES: [Option<GeometryKind>; 5] = [
  None,
  Some(GeometryKind::Point),
  Some(GeometryKind::Size),
  Some(GeometryKind::Rect),
  Some(GeometryKind::Range),
];

impl GeometryKind {
  /// Look up a boxed-value type code. Unknown codes (including the platform's
  /// boxed error type) yield `None`.
  pub fn from_code(code: u32) -> Option<Self> {
    BOX_TYPES.get(code as usize).copied().flatten()
  }

  pub const fn code(self) -> u32 {
    self as u32
  }

  /// Number of primitive components the kind decodes from.
  pub const fn arity(self) -> usize {
    match self {
      Self::Point | Self::Size | Self::Range => 2,
      Self::Rect => 4,
    }
  }
}

/// A decoded boxed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value")]
#[ts(export)]
pub enum Geometry {
  Point(Point),
  Size(Size),
  Rect(Rect),
  Range(Range),
}

impl Geometry {
  pub const fn kind(&self) -> GeometryKind {
    match self {
      Self::Point(_) => GeometryKind::Point,
      Self::Size(_) => GeometryKind::Size,
      Self::Rect(_) => GeometryKind::Rect,
      Self::Range(_) => GeometryKind::Range,
    }
  }

  /// Decode from primitive components: point and size take the first two
  /// numbers, rect the first four, range the first two (truncated to integers).
  ///
  /// Returns `None` when there are not enough components.
  #[allow(clippy::cast_possible_truncation)] // Range components are integral on every platform
  pub fn decode(kind: GeometryKind, data: &[f64]) -> Option<Geometry> {
    match (kind, data) {
      (GeometryKind::Point, [x, y, ..]) => Some(Self::Point(Point::new(*x, *y))),
      (GeometryKind::Size, [w, h, ..]) => Some(Self::Size(Size::new(*w, *h))),
      (GeometryKind::Rect, [x, y, w, h, ..]) => Some(Self::Rect(Rect::new(*x, *y, *w, *h))),
      (GeometryKind::Range, [location, length, ..]) => Some(Self::Range(Range::new(
        *location as i64,
        *length as i64,
      ))),
      _ => None,
    }
  }

  /// Primitive components in the same order [`Geometry::decode`] reads them.
  #[allow(clippy::cast_precision_loss)] // Ranges never approach 2^53
  pub fn components(&self) -> Vec<f64> {
    match self {
      Self::Point(p) => vec![p.x, p.y],
      Self::Size(s) => vec![s.width, s.height],
      Self::Rect(r) => vec![r.origin.x, r.origin.y, r.size.width, r.size.height],
      Self::Range(r) => vec![r.location as f64, r.length as f64],
    }
  }

  pub const fn as_point(&self) -> Option<Point> {
    match self {
      Self::Point(p) => Some(*p),
      Self::Size(_) | Self::Rect(_) | Self::Range(_) => None,
    }
  }

  pub const fn as_size(&self) -> Option<Size> {
    match self {
      Self::Size(s) => Some(*s),
      Self::Point(_) | Self::Rect(_) | Self::Range(_) => None,
    }
  }

  pub const fn as_rect(&self) -> Option<Rect> {
    match self {
      Self::Rect(r) => Some(*r),
      Self::Point(_) | Self::Size(_) | Self::Range(_) => None,
    }
  }

  pub const fn as_range(&self) -> Option<Range> {
    match self {
      Self::Range(r) => Some(*r),
      Self::Point(_) | Self::Size(_) | Self::Rect(_) => None,
    }
  }
}

impl std::fmt::Display for Geometry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Point(p) => write!(f, "Point({}, {})", p.x, p.y),
      Self::Size(s) => write!(f, "Size({}, {})", s.width, s.height),
      Self::Rect(r) => write!(
        f,
        "Rect({}, {}, {}, {})",
        r.origin.x, r.origin.y, r.size.width, r.size.height
      ),
      Self::Range(r) => write!(f, "Range({}, {})", r.location, r.length),
    }
  }
}

impl From<Point> for Geometry {
  fn from(p: Point) -> Self {
    Self::Point(p)
  }
}

impl From<Size> for Geometry {
  fn from(s: Size) -> Self {
    Self::Size(s)
  }
}

impl From<Rect> for Geometry {
  fn from(r: Rect) -> Self {
    Self::Rect(r)
  }
}

impl From<Range> for Geometry {
  fn from(r: Range) -> Self {
    Self::Range(r)
  }
}
