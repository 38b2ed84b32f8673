/*!
Native accessibility layer.

Core code talks to the platform only through [`NativeHandle`]. The macOS
backend lives in `macos/`; tests drive the core through the in-memory tree in
`mock.rs`.
*/

pub(crate) mod diagnostics;
mod error;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(test)]
pub(crate) mod mock;
mod traits;

pub use error::{NativeError, NativeResult};
#[cfg(target_os = "macos")]
pub use macos::{has_permissions, AXHandle};
pub use traits::NativeHandle;

/// Platform identifiers the core reads directly.
pub(crate) mod attr {
  pub(crate) const ROLE: &str = "AXRole";
  pub(crate) const SUBROLE: &str = "AXSubrole";
  pub(crate) const CHILDREN: &str = "AXChildren";
  pub(crate) const PARENT: &str = "AXParent";
  pub(crate) const POSITION: &str = "AXPosition";
  pub(crate) const VALUE: &str = "AXValue";
  pub(crate) const TITLE: &str = "AXTitle";
  pub(crate) const ENABLED: &str = "AXEnabled";
  pub(crate) const FOCUSED: &str = "AXFocused";
}
