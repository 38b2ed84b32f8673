/*! `CFType` ↔ `RawValue` conversion. */

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::ref_as_ptr)]

use objc2_application_services::{AXUIElement, AXValue as AXValueRef, AXValueType};
use objc2_core_foundation::{
  kCFBooleanFalse, kCFBooleanTrue, kCFNull, CFArray, CFBoolean, CFIndex, CFNull, CFNumber,
  CFRange, CFRetained, CFString, CFType, CFURL, CGPoint, CGRect, CGSize, Type,
};
use std::ffi::c_void;
use std::ptr::NonNull;

use super::AXHandle;
use crate::types::{Geometry, Point, Range, Rect, Size};
use crate::value::{BoxedValue, RawValue};

/// Convert a native value. Unrecognized classes pass through as opaque.
pub(super) fn raw_from_cf(value: &CFType) -> RawValue<AXHandle> {
  if value.downcast_ref::<CFNull>().is_some() {
    return RawValue::Null;
  }
  if let Some(s) = value.downcast_ref::<CFString>() {
    return RawValue::String(s.to_string());
  }
  if let Some(b) = value.downcast_ref::<CFBoolean>() {
    return RawValue::Boolean(b.as_bool());
  }
  if let Some(n) = value.downcast_ref::<CFNumber>() {
    return n.as_f64().map_or(RawValue::Null, RawValue::Number);
  }
  if let Some(url) = value.downcast_ref::<CFURL>() {
    return url
      .string()
      .map_or(RawValue::Null, |s| RawValue::Url(s.to_string()));
  }
  if let Some(element) = value.downcast_ref::<AXUIElement>() {
    return RawValue::Element(AXHandle::new(element.retain()));
  }
  if let Some(boxed) = value.downcast_ref::<AXValueRef>() {
    return boxed_from_ax(boxed).map_or_else(
      || opaque(value, "AXValue"),
      |geometry| RawValue::Boxed(BoxedValue::from(geometry)),
    );
  }
  if let Some(array) = value.downcast_ref::<CFArray>() {
    // SAFETY: every CFArray holds CF objects
    let array: &CFArray<CFType> = unsafe { &*(array as *const CFArray).cast() };
    return RawValue::Array(
      (0..array.len())
        .filter_map(|i| array.get(i))
        .map(|item| raw_from_cf(&item))
        .collect(),
    );
  }
  opaque(value, "CFType")
}

fn opaque(value: &CFType, type_name: &str) -> RawValue<AXHandle> {
  RawValue::Opaque {
    type_name: type_name.to_owned(),
    description: format!("{value:?}"),
  }
}

/// Read the struct out of an `AXValue` into `target`.
fn read_ax<T>(boxed: &AXValueRef, kind: AXValueType, target: &mut T) -> bool {
  let Some(ptr) = NonNull::new(std::ptr::from_mut(target).cast::<c_void>()) else {
    return false;
  };
  unsafe { boxed.value(kind, ptr) }
}

fn boxed_from_ax(boxed: &AXValueRef) -> Option<Geometry> {
  let kind = unsafe { boxed.r#type() };
  if kind == AXValueType::CGPoint {
    let mut point = CGPoint { x: 0.0, y: 0.0 };
    read_ax(boxed, kind, &mut point).then(|| Geometry::Point(Point::new(point.x, point.y)))
  } else if kind == AXValueType::CGSize {
    let mut size = CGSize {
      width: 0.0,
      height: 0.0,
    };
    read_ax(boxed, kind, &mut size).then(|| Geometry::Size(Size::new(size.width, size.height)))
  } else if kind == AXValueType::CGRect {
    let mut rect = CGRect {
      origin: CGPoint { x: 0.0, y: 0.0 },
      size: CGSize {
        width: 0.0,
        height: 0.0,
      },
    };
    read_ax(boxed, kind, &mut rect).then(|| {
      Geometry::Rect(Rect::new(
        rect.origin.x,
        rect.origin.y,
        rect.size.width,
        rect.size.height,
      ))
    })
  } else if kind == AXValueType::CFRange {
    let mut range = CFRange {
      location: 0,
      length: 0,
    };
    read_ax(boxed, kind, &mut range)
      .then(|| Geometry::Range(Range::new(range.location as i64, range.length as i64)))
  } else {
    None
  }
}

fn ax_from_geometry(geometry: Geometry) -> Option<CFRetained<AXValueRef>> {
  fn create<T>(kind: AXValueType, mut value: T) -> Option<CFRetained<AXValueRef>> {
    let ptr = NonNull::new(std::ptr::from_mut(&mut value).cast::<c_void>())?;
    unsafe { AXValueRef::new(kind, ptr) }
  }

  match geometry {
    Geometry::Point(p) => create(AXValueType::CGPoint, CGPoint { x: p.x, y: p.y }),
    Geometry::Size(s) => create(
      AXValueType::CGSize,
      CGSize {
        width: s.width,
        height: s.height,
      },
    ),
    Geometry::Rect(r) => create(
      AXValueType::CGRect,
      CGRect {
        origin: CGPoint {
          x: r.origin.x,
          y: r.origin.y,
        },
        size: CGSize {
          width: r.size.width,
          height: r.size.height,
        },
      },
    ),
    Geometry::Range(r) => create(
      AXValueType::CFRange,
      CFRange {
        location: r.location as CFIndex,
        length: r.length as CFIndex,
      },
    ),
  }
}

/// Convert to a retained native value. Opaque values cannot be sent back.
fn cf_from_raw(raw: &RawValue<AXHandle>) -> Option<CFRetained<CFType>> {
  let retained = match raw {
    RawValue::Null => {
      let null: &CFType = unsafe { kCFNull }?;
      null.retain()
    }
    RawValue::Boolean(b) => {
      let boolean: &CFType = if *b {
        unsafe { kCFBooleanTrue }?
      } else {
        unsafe { kCFBooleanFalse }?
      };
      boolean.retain()
    }
    RawValue::Number(n) => {
      let number = CFNumber::new_f64(*n);
      let number: &CFType = &number;
      number.retain()
    }
    RawValue::String(s) | RawValue::Url(s) => {
      let string = CFString::from_str(s);
      let string: &CFType = &string;
      string.retain()
    }
    RawValue::Element(handle) => {
      let element: &CFType = handle.inner();
      element.retain()
    }
    RawValue::Array(items) => {
      let items = items.iter().map(cf_from_raw).collect::<Option<Vec<_>>>()?;
      let refs: Vec<&CFType> = items.iter().map(|item| &**item).collect();
      let array = CFArray::from_objects(&refs);
      let array: &CFType = &array;
      array.retain()
    }
    RawValue::Boxed(boxed) => {
      let geometry = boxed.decode()?;
      let value = ax_from_geometry(geometry)?;
      let value: &CFType = &value;
      value.retain()
    }
    RawValue::Opaque { .. } => return None,
  };
  Some(retained)
}

/// Run `f` with the native form of `raw`, or `None` when it has none.
pub(super) fn with_cf<T>(raw: &RawValue<AXHandle>, f: impl FnOnce(&CFType) -> T) -> Option<T> {
  cf_from_raw(raw).map(|cf| f(&cf))
}
