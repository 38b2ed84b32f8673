/*!
Platform abstraction traits.

These traits define the contract between core code and the native
accessibility layer. Core code only uses this trait - never platform-specific
types directly.
*/

use std::fmt::Debug;
use std::hash::Hash;

use super::{NativeError, NativeResult};
use crate::types::Point;
use crate::value::RawValue;

/// Per-element native operations. Clone is expected to be cheap (reference-counted).
///
/// Equality and hashing define element identity: two handles are equal iff
/// they refer to the same native UI element.
pub trait NativeHandle: Clone + Send + Sync + Hash + Eq + Debug + 'static {
  /// Names of the attributes this element currently exposes.
  fn attribute_names(&self) -> NativeResult<Vec<String>>;

  /// Fetch the raw value of an attribute.
  fn attribute_value(&self, attribute: &str) -> NativeResult<RawValue<Self>>;

  /// Number of values in a collection-typed attribute.
  ///
  /// The default fetches the whole value; backends with a cheaper count
  /// should override it.
  fn attribute_value_count(&self, attribute: &str) -> NativeResult<usize> {
    let value = self.attribute_value(attribute)?;
    if value.is_null() {
      return Ok(0);
    }
    value
      .as_array()
      .map(<[_]>::len)
      .ok_or(NativeError::IllegalArgument)
  }

  fn is_attribute_writable(&self, attribute: &str) -> NativeResult<bool>;

  fn set_attribute_value(&self, attribute: &str, value: &RawValue<Self>) -> NativeResult<()>;

  /// Names of the actions this element currently supports.
  fn action_names(&self) -> NativeResult<Vec<String>>;

  fn perform_action(&self, action: &str) -> NativeResult<()>;

  fn parameterized_attribute_names(&self) -> NativeResult<Vec<String>>;

  fn parameterized_attribute_value(
    &self,
    attribute: &str,
    parameter: &RawValue<Self>,
  ) -> NativeResult<RawValue<Self>>;

  /// Hit-test for the topmost element at a screen position, relative to this element.
  fn element_at_position(&self, _point: Point) -> NativeResult<Option<Self>> {
    Err(NativeError::NotImplemented)
  }

  /// Process identifier of the application owning this element.
  fn pid(&self) -> NativeResult<u32> {
    Err(NativeError::NotImplemented)
  }
}
