/*! `AXUIElement` handle.

All unsafe FFI for element access lives here and in `value.rs`.
*/

#![allow(unsafe_code)]
#![allow(
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss,
  clippy::ref_as_ptr
)]

use objc2_application_services::{AXError, AXUIElement};
use objc2_core_foundation::{CFArray, CFHash, CFIndex, CFRetained, CFString, CFType};
use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

use super::value::{raw_from_cf, with_cf};
use crate::platform::{NativeError, NativeHandle, NativeResult};
use crate::types::Point;
use crate::value::RawValue;

// FFI binding for CFEqual (not exposed by objc2-core-foundation)
extern "C" {
  fn CFEqual(cf1: *const c_void, cf2: *const c_void) -> u8;
}

/// Native handle to one UI element. Clone is cheap (reference counted).
#[derive(Clone)]
pub struct AXHandle {
  inner: CFRetained<AXUIElement>,
  /// `CFHash`, computed once at construction.
  cached_hash: u64,
}

fn check(code: AXError) -> NativeResult<()> {
  NativeError::check(code.0)
}

impl AXHandle {
  pub(crate) fn new(element: CFRetained<AXUIElement>) -> Self {
    let cached_hash = CFHash(Some(&*element)) as u64;
    Self {
      inner: element,
      cached_hash,
    }
  }

  /// The system-wide element.
  pub fn system_wide() -> Self {
    #[allow(unused_unsafe)]
    let element = unsafe { AXUIElement::new_system_wide() };
    Self::new(element)
  }

  /// The application element of a process.
  pub fn application(pid: i32) -> Self {
    #[allow(unused_unsafe)]
    let element = unsafe { AXUIElement::new_application(pid) };
    Self::new(element)
  }

  pub(super) fn inner(&self) -> &AXUIElement {
    &self.inner
  }

  fn cf_equal(&self, other: &Self) -> bool {
    let self_ptr = CFRetained::as_ptr(&self.inner).as_ptr().cast::<c_void>();
    let other_ptr = CFRetained::as_ptr(&other.inner).as_ptr().cast::<c_void>();
    unsafe { CFEqual(self_ptr, other_ptr) != 0 }
  }

  /// Copy an array out through an out-pointer and convert it to strings.
  fn copy_names(
    &self,
    copy: impl FnOnce(NonNull<*const CFArray>) -> AXError,
  ) -> NativeResult<Vec<String>> {
    let mut names_ref: *const CFArray<CFString> = std::ptr::null();
    let out = NonNull::new((&raw mut names_ref).cast::<*const CFArray>()).ok_or(NativeError::Failure)?;
    check(copy(out))?;
    let Some(names_ptr) = NonNull::new(names_ref.cast_mut()) else {
      return Ok(Vec::new());
    };
    let names = unsafe { CFRetained::<CFArray<CFString>>::from_raw(names_ptr) };
    Ok((0..names.len()).filter_map(|i| names.get(i)).map(|s| s.to_string()).collect())
  }

  /// Copy a value out through an out-pointer.
  fn copy_value(
    &self,
    copy: impl FnOnce(NonNull<*const CFType>) -> AXError,
  ) -> NativeResult<RawValue<Self>> {
    let mut value: *const CFType = std::ptr::null();
    let out = NonNull::new(&raw mut value).ok_or(NativeError::Failure)?;
    check(copy(out))?;
    let Some(value_ptr) = NonNull::new(value.cast_mut()) else {
      return Ok(RawValue::Null);
    };
    let value = unsafe { CFRetained::<CFType>::from_raw(value_ptr) };
    Ok(raw_from_cf(&value))
  }
}

impl NativeHandle for AXHandle {
  fn attribute_names(&self) -> NativeResult<Vec<String>> {
    self.copy_names(|out| unsafe { self.inner.copy_attribute_names(out) })
  }

  fn attribute_value(&self, attribute: &str) -> NativeResult<RawValue<Self>> {
    let attribute = CFString::from_str(attribute);
    self.copy_value(|out| unsafe { self.inner.copy_attribute_value(&attribute, out) })
  }

  fn attribute_value_count(&self, attribute: &str) -> NativeResult<usize> {
    let attribute = CFString::from_str(attribute);
    let mut count: CFIndex = 0;
    let out = NonNull::new(&raw mut count).ok_or(NativeError::Failure)?;
    check(unsafe { self.inner.attribute_value_count(&attribute, out) })?;
    Ok(count.max(0) as usize)
  }

  fn is_attribute_writable(&self, attribute: &str) -> NativeResult<bool> {
    let attribute = CFString::from_str(attribute);
    let mut settable: u8 = 0;
    let out = NonNull::new(&raw mut settable).ok_or(NativeError::Failure)?;
    check(unsafe { self.inner.is_attribute_settable(&attribute, out) })?;
    Ok(settable != 0)
  }

  fn set_attribute_value(&self, attribute: &str, value: &RawValue<Self>) -> NativeResult<()> {
    let attribute = CFString::from_str(attribute);
    let code = with_cf(value, |cf| unsafe { self.inner.set_attribute_value(&attribute, cf) })
      .ok_or(NativeError::IllegalArgument)?;
    check(code)
  }

  fn action_names(&self) -> NativeResult<Vec<String>> {
    self.copy_names(|out| unsafe { self.inner.copy_action_names(out) })
  }

  fn perform_action(&self, action: &str) -> NativeResult<()> {
    let action = CFString::from_str(action);
    check(unsafe { self.inner.perform_action(&action) })
  }

  fn parameterized_attribute_names(&self) -> NativeResult<Vec<String>> {
    self.copy_names(|out| unsafe { self.inner.copy_parameterized_attribute_names(out) })
  }

  fn parameterized_attribute_value(
    &self,
    attribute: &str,
    parameter: &RawValue<Self>,
  ) -> NativeResult<RawValue<Self>> {
    let attribute = CFString::from_str(attribute);
    with_cf(parameter, |cf| {
      self.copy_value(|out| unsafe {
        self
          .inner
          .copy_parameterized_attribute_value(&attribute, cf, out)
      })
    })
    .ok_or(NativeError::IllegalArgument)?
  }

  fn element_at_position(&self, point: Point) -> NativeResult<Option<Self>> {
    let mut element: *const AXUIElement = std::ptr::null();
    let out = NonNull::new(&raw mut element).ok_or(NativeError::Failure)?;
    let code = unsafe {
      self
        .inner
        .copy_element_at_position(point.x as f32, point.y as f32, out)
    };
    match NativeError::from_code(code.0) {
      None => {}
      Some(NativeError::NoValue) => return Ok(None),
      Some(err) => return Err(err),
    }
    Ok(
      NonNull::new(element.cast_mut())
        .map(|ptr| Self::new(unsafe { CFRetained::from_raw(ptr) })),
    )
  }

  fn pid(&self) -> NativeResult<u32> {
    let mut pid: i32 = 0;
    let out = NonNull::new(&raw mut pid).ok_or(NativeError::Failure)?;
    check(unsafe { self.inner.pid(out) })?;
    u32::try_from(pid).map_err(|_| NativeError::Failure)
  }
}

impl Hash for AXHandle {
  fn hash<S: Hasher>(&self, state: &mut S) {
    self.cached_hash.hash(state);
  }
}

impl PartialEq for AXHandle {
  fn eq(&self, other: &Self) -> bool {
    self.cached_hash == other.cached_hash && self.cf_equal(other)
  }
}

impl Eq for AXHandle {}

impl fmt::Debug for AXHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "AXHandle({:#x})", self.cached_hash)
  }
}

unsafe impl Send for AXHandle {}
unsafe impl Sync for AXHandle {}
