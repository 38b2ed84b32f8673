/*!
Class registry: one shared [`ElementClass`] per element type name.

Elements are classified by the subrole they report, or their role when the
subrole is missing or empty, with the platform prefix stripped. The first
element of a type creates its class; every later element of that type shares
it, including the class's memoized name map.

## Module Structure

- `mod.rs` - `ClassRegistry`, `ElementClass`, type name derivation
- `kind.rs` - `ElementKind` tagged enum of known roles and subroles
- `lookup.rs` - per-class symbol → identifier memo
- `naming.rs` - prefix stripping, case conversion, depluralization
*/

mod kind;
mod lookup;
pub mod naming;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use kind::ElementKind;
pub(crate) use lookup::NameMap;

use crate::core::Diagnostics;
use crate::platform::diagnostics::checked;
use crate::platform::{attr, NativeHandle};
use crate::types::TypeName;

/// Type name given to elements that report neither a role nor a subrole.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Shared behavior of every element of one type.
pub struct ElementClass {
  name: TypeName,
  kind: ElementKind,
  names: NameMap,
}

/// Shared reference to a registered class.
pub type ClassRef = Arc<ElementClass>;

impl ElementClass {
  fn new(name: &str) -> Self {
    Self {
      name: TypeName::from(name),
      kind: ElementKind::from_name(name),
      names: NameMap::default(),
    }
  }

  pub fn name(&self) -> &TypeName {
    &self.name
  }

  pub fn kind(&self) -> &ElementKind {
    &self.kind
  }

  pub(crate) fn names(&self) -> &NameMap {
    &self.names
  }
}

impl fmt::Debug for ElementClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ElementClass")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .finish_non_exhaustive()
  }
}

/// Concurrent map of type name → class.
///
/// Lookups take a read lock. Creation re-checks under the write lock, so
/// racing callers for the same name all receive the same class.
#[derive(Debug, Default)]
pub struct ClassRegistry {
  classes: RwLock<HashMap<TypeName, ClassRef>>,
}

impl ClassRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry pre-populated with one class per known element kind.
  pub fn with_builtins() -> Self {
    let registry = Self::new();
    for kind in ElementKind::known() {
      registry.get_or_create(kind.name());
    }
    registry
  }

  /// Class for `name`, creating and registering it on first use.
  pub fn get_or_create(&self, name: &str) -> ClassRef {
    if let Some(class) = self.classes.read().get(name) {
      return Arc::clone(class);
    }

    let mut classes = self.classes.write();
    let class = classes.entry(TypeName::from(name)).or_insert_with(|| {
      log::debug!("{name} class created");
      Arc::new(ElementClass::new(name))
    });
    Arc::clone(class)
  }

  pub fn get(&self, name: &str) -> Option<ClassRef> {
    self.classes.read().get(name).cloned()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.classes.read().contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.classes.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.classes.read().is_empty()
  }

  /// Registered type names, sorted.
  pub fn names(&self) -> Vec<TypeName> {
    let mut names: Vec<_> = self.classes.read().keys().cloned().collect();
    names.sort();
    names
  }

  /// Registered class whose name is a singular form of `name`.
  ///
  /// A name that is itself registered is singular and yields `None`.
  pub fn find_plural_capable(&self, name: &str) -> Option<ClassRef> {
    let classes = self.classes.read();
    if classes.contains_key(name) {
      return None;
    }
    naming::singular_candidates(name).find_map(|stem| classes.get(stem).cloned())
  }

  /// Type name of the element behind `handle`.
  pub fn type_name<H: NativeHandle>(&self, handle: &H, diagnostics: Diagnostics) -> TypeName {
    let attributes =
      checked(handle, diagnostics, "attribute_names", handle.attribute_names()).unwrap_or_default();
    type_name_for(handle, &attributes, diagnostics)
  }

  /// Class for an element whose attribute names are already known.
  pub(crate) fn class_for<H: NativeHandle>(
    &self,
    handle: &H,
    attributes: &[String],
    diagnostics: Diagnostics,
  ) -> ClassRef {
    let name = type_name_for(handle, attributes, diagnostics);
    self.get_or_create(name.as_str())
  }
}

/// Subrole if present and non-empty, else role, with the prefix stripped.
fn type_name_for<H: NativeHandle>(
  handle: &H,
  attributes: &[String],
  diagnostics: Diagnostics,
) -> TypeName {
  for attribute in [attr::SUBROLE, attr::ROLE] {
    if !attributes.iter().any(|a| a == attribute) {
      continue;
    }
    let operation = format!("attribute_value({attribute})");
    let value = checked(handle, diagnostics, &operation, handle.attribute_value(attribute));
    if let Some(name) = value.as_ref().and_then(|v| v.non_empty_str()) {
      return TypeName::new(naming::strip_prefix(name));
    }
  }

  log::warn!("{handle:?} reports no role; classifying as {UNKNOWN_TYPE}");
  TypeName::from(UNKNOWN_TYPE)
}
