/*! Native accessibility error codes.

The core never raises these. They are mapped to human-readable categories for
diagnostic logging, then the call site degrades to a null/empty result.
*/

/// A failed native accessibility call.
///
/// Codes follow the macOS `AXError` numbering; other backends map their own
/// failures onto the closest category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NativeError {
  #[error("Generic Failure")]
  Failure,
  #[error("Illegal Argument")]
  IllegalArgument,
  #[error("Invalid UI Element")]
  InvalidElement,
  #[error("Invalid UI Element Observer")]
  InvalidObserver,
  #[error("Cannot Complete")]
  CannotComplete,
  #[error("Attribute Unsupported")]
  AttributeUnsupported,
  #[error("Action Unsupported")]
  ActionUnsupported,
  #[error("Notification Unsupported")]
  NotificationUnsupported,
  #[error("Not Implemented")]
  NotImplemented,
  #[error("Notification Already Registered")]
  NotificationAlreadyRegistered,
  #[error("Notification Not Registered")]
  NotificationNotRegistered,
  #[error("API Disabled")]
  ApiDisabled,
  #[error("No Value")]
  NoValue,
  #[error("Parameterized Attribute Unsupported")]
  ParameterizedAttributeUnsupported,
  #[error("Not Enough Precision")]
  NotEnoughPrecision,
  #[error("UNKNOWN ERROR CODE")]
  Unknown(i32),
}

/// Result of a native call.
pub type NativeResult<T> = Result<T, NativeError>;

const CODES: [(i32, NativeError); 15] = [
  (-25200, NativeError::Failure),
  (-25201, NativeError::IllegalArgument),
  (-25202, NativeError::InvalidElement),
  (-25203, NativeError::InvalidObserver),
  (-25204, NativeError::CannotComplete),
  (-25205, NativeError::AttributeUnsupported),
  (-25206, NativeError::ActionUnsupported),
  (-25207, NativeError::NotificationUnsupported),
  (-25208, NativeError::NotImplemented),
  (-25209, NativeError::NotificationAlreadyRegistered),
  (-25210, NativeError::NotificationNotRegistered),
  (-25211, NativeError::ApiDisabled),
  (-25212, NativeError::NoValue),
  (-25213, NativeError::ParameterizedAttributeUnsupported),
  (-25214, NativeError::NotEnoughPrecision),
];

impl NativeError {
  /// Map a raw status code. Zero is success and maps to `None`.
  pub fn from_code(code: i32) -> Option<Self> {
    if code == 0 {
      return None;
    }
    let known = CODES
      .iter()
      .find(|(c, _)| *c == code)
      .map(|(_, err)| *err);
    Some(known.unwrap_or(Self::Unknown(code)))
  }

  /// The raw status code for this error.
  pub fn code(self) -> i32 {
    if let Self::Unknown(code) = self {
      return code;
    }
    CODES
      .iter()
      .find(|(_, err)| *err == self)
      .map_or(0, |(c, _)| *c)
  }

  /// Convert a raw status code into a result.
  pub fn check(code: i32) -> NativeResult<()> {
    Self::from_code(code).map_or(Ok(()), Err)
  }
}
