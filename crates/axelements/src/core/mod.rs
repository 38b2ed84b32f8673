/*!
Core instance - owns the class registry and configuration every element
shares.

# Module Structure

- `mod.rs` - `Accessibility` struct, builder, shared context
- `config.rs` - `Config` and `Diagnostics`

# Example

```
use axelements::{Accessibility, Diagnostics};

let ax = Accessibility::builder()
  .diagnostics(Diagnostics::Quiet)
  .build();
assert!(ax.registry().contains("Button"));
```
*/

mod config;

pub use config::{Config, Diagnostics};

use std::sync::Arc;

use crate::element::Element;
#[cfg(target_os = "macos")]
use crate::platform::AXHandle;
use crate::platform::NativeHandle;
use crate::registry::ClassRegistry;
#[cfg(target_os = "macos")]
use crate::types::{AxError, AxResult, Point};
use crate::value::{massage, AttributeValue, RawValue};

/// State shared by every element created through one instance.
pub(crate) struct Context {
  pub(crate) registry: ClassRegistry,
  pub(crate) config: Config,
}

impl Context {
  pub(crate) fn new(config: Config) -> Self {
    let registry = if config.builtin_classes {
      ClassRegistry::with_builtins()
    } else {
      ClassRegistry::new()
    };
    for name in &config.extra_classes {
      registry.get_or_create(name);
    }
    Self { registry, config }
  }

  pub(crate) const fn diagnostics(&self) -> Diagnostics {
    self.config.diagnostics
  }
}

/// Entry point: wraps native handles into [`Element`]s.
///
/// Clone is cheap (Arc bump) - share freely across threads.
#[derive(Clone)]
pub struct Accessibility {
  ctx: Arc<Context>,
}

impl std::fmt::Debug for Accessibility {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Accessibility")
      .field("classes", &self.ctx.registry.len())
      .field("diagnostics", &self.ctx.config.diagnostics)
      .finish_non_exhaustive()
  }
}

impl Default for Accessibility {
  fn default() -> Self {
    Self::new()
  }
}

/// Builder for configuring an [`Accessibility`] instance.
#[derive(Debug, Default, Clone)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct AccessibilityBuilder {
  config: Config,
}

impl AccessibilityBuilder {
  /// Pre-register a class per known element kind. Default: true.
  pub fn builtin_classes(mut self, enabled: bool) -> Self {
    self.config.builtin_classes = enabled;
    self
  }

  /// Register an extra class name at startup.
  pub fn register_class(mut self, name: impl Into<String>) -> Self {
    self.config.extra_classes.push(name.into());
    self
  }

  /// Native call failure reporting. Default: [`Diagnostics::Verbose`].
  pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
    self.config.diagnostics = diagnostics;
    self
  }

  pub fn build(self) -> Accessibility {
    Accessibility {
      ctx: Arc::new(Context::new(self.config)),
    }
  }
}

impl Accessibility {
  /// Instance with default options.
  pub fn new() -> Self {
    Self::builder().build()
  }

  pub fn builder() -> AccessibilityBuilder {
    AccessibilityBuilder::default()
  }

  pub fn registry(&self) -> &ClassRegistry {
    &self.ctx.registry
  }

  pub fn config(&self) -> &Config {
    &self.ctx.config
  }

  /// Wrap a native handle, classifying it by role and subrole.
  pub fn wrap<H: NativeHandle>(&self, handle: H) -> Element<H> {
    Element::new(&self.ctx, handle)
  }

  /// Convert a raw native value into a caller-facing value.
  pub fn massage<H: NativeHandle>(&self, raw: RawValue<H>) -> AttributeValue<H> {
    massage(&self.ctx, raw)
  }
}

#[cfg(target_os = "macos")]
impl Accessibility {
  /// Whether this process may use the accessibility API.
  pub fn has_permissions() -> bool {
    crate::platform::has_permissions()
  }

  /// The system-wide element: the root for hit-testing and focus queries.
  pub fn system_wide(&self) -> Element<AXHandle> {
    self.wrap(AXHandle::system_wide())
  }

  /// Application element for a process.
  pub fn application(&self, pid: u32) -> AxResult<Element<AXHandle>> {
    if !Self::has_permissions() {
      return Err(AxError::PermissionDenied);
    }
    let pid = i32::try_from(pid).map_err(|_| AxError::lookup(format!("pid {pid}")))?;
    Ok(self.wrap(AXHandle::application(pid)))
  }

  /// Topmost element at a screen position.
  pub fn element_at_position(&self, point: Point) -> AxResult<Element<AXHandle>> {
    self.system_wide().element_at(point)
  }
}
