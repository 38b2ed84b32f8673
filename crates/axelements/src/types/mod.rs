/*! Core value types shared across the crate. */

#![allow(missing_docs)]

mod error;
mod geometry;
mod name;

pub use error::{AxError, AxResult};
pub use geometry::{Geometry, GeometryKind, Point, Range, Rect, Size};
pub use name::TypeName;
