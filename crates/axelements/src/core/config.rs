/*!
Configuration for an [`Accessibility`](super::Accessibility) instance.

All values have sensible defaults. Use the builder to override:

```
use axelements::{Accessibility, Diagnostics};

let ax = Accessibility::builder()
  .diagnostics(Diagnostics::Warn)
  .register_class("ApplicationDockItem")
  .build();
assert!(ax.registry().contains("ApplicationDockItem"));
```
*/

/// How much to report when a native accessibility call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
  /// Report nothing.
  Quiet,
  /// One warning naming the error category, code and operation.
  Warn,
  /// The warning plus the attributes and actions the failing element offers.
  #[default]
  Verbose,
}

/// Immutable configuration shared by every element of an instance.
#[derive(Debug, Clone)]
pub struct Config {
  /// Pre-register one class per known element kind.
  /// Default: true.
  pub builtin_classes: bool,

  /// Additional class names to register at startup.
  pub extra_classes: Vec<String>,

  /// Native call failure reporting.
  /// Default: [`Diagnostics::Verbose`].
  pub diagnostics: Diagnostics,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      builtin_classes: true,
      extra_classes: Vec::new(),
      diagnostics: Diagnostics::default(),
    }
  }
}
