/*!
Native call failure reporting.

Every native round-trip made by the core goes through [`checked`]. Success
passes the value on; a failure is logged according to the configured
[`Diagnostics`] level and becomes `None`, leaving the caller to degrade to a
null or empty result.
*/

use super::{NativeError, NativeHandle, NativeResult};
use crate::core::Diagnostics;

/// Unwrap a native result, reporting the failure if there was one.
pub(crate) fn checked<H: NativeHandle, T>(
  handle: &H,
  diagnostics: Diagnostics,
  operation: &str,
  result: NativeResult<T>,
) -> Option<T> {
  match result {
    Ok(value) => Some(value),
    Err(err) => {
      report(handle, diagnostics, operation, err);
      None
    }
  }
}

/// Log a failed native call.
pub(crate) fn report<H: NativeHandle>(
  handle: &H,
  diagnostics: Diagnostics,
  operation: &str,
  err: NativeError,
) {
  if diagnostics == Diagnostics::Quiet {
    return;
  }

  log::warn!("[{err} ({})] while trying {operation}", err.code());

  if diagnostics == Diagnostics::Verbose {
    // Straight to the handle: these lookups must not report their own failures.
    let attributes = handle.attribute_names().unwrap_or_default();
    let actions = handle.action_names().unwrap_or_default();
    log::info!("Available attrs/actions were: {attributes:?} {actions:?}");
  }
}
