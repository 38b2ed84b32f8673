/*!
macOS backend over `AXUIElement`.

- `handle.rs` - `AXHandle`, the `NativeHandle` implementation
- `value.rs` - `CFType` ↔ `RawValue` conversion
*/

#![allow(unsafe_code)]

mod handle;
mod value;

pub use handle::AXHandle;

/// Whether this process is trusted for accessibility.
pub fn has_permissions() -> bool {
  #[allow(unused_unsafe)]
  unsafe {
    objc2_application_services::AXIsProcessTrusted()
  }
}
