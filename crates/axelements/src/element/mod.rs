/*!
The element façade: one native handle, its cached attribute list, and its
class.

Names passed to element operations may be symbols (`title`,
`focused_window`), predicates (`enabled?`) or raw identifiers (`AXTitle`).
They are resolved through the class's shared name map against this
element's own identifier list.

# Module Structure

- `mod.rs` - `Element`, attribute/action access, implicit lookup
- `inspect.rs` - `Inspection` snapshot and its `#<Type ...>` rendering
- `hierarchy.rs` - ancestor path, hit-testing, `to_point`
*/

mod hierarchy;
mod inspect;

pub use inspect::Inspection;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::core::{Context, Diagnostics};
use crate::platform::diagnostics::checked;
use crate::platform::{NativeHandle, NativeResult};
use crate::registry::{naming, ClassRef, ElementKind};
use crate::search::{self, Filters, SearchResult};
use crate::types::{AxError, AxResult, TypeName};
use crate::value::{massage, AttributeValue, RawValue};

/// Symbol of the attribute that lists an element's children.
pub(crate) const CHILDREN: &str = "children";
/// Symbol of the attribute that points at an element's parent.
pub(crate) const PARENT: &str = "parent";

/// A wrapped UI element.
///
/// Equality and hashing follow the native handle only. Clone is cheap.
#[derive(Clone)]
pub struct Element<H> {
  handle: H,
  attributes: Arc<[String]>,
  class: ClassRef,
  ctx: Arc<Context>,
  pid: OnceLock<u32>,
}

impl<H: NativeHandle> Element<H> {
  /// Wrap a handle. Fetches the attribute list once and classifies the element.
  pub(crate) fn new(ctx: &Arc<Context>, handle: H) -> Self {
    let diagnostics = ctx.diagnostics();
    let attributes =
      checked(&handle, diagnostics, "attribute_names", handle.attribute_names()).unwrap_or_default();
    let class = ctx.registry.class_for(&handle, &attributes, diagnostics);

    Self {
      handle,
      attributes: attributes.into(),
      class,
      ctx: Arc::clone(ctx),
      pid: OnceLock::new(),
    }
  }

  pub fn handle(&self) -> &H {
    &self.handle
  }

  pub fn type_name(&self) -> &TypeName {
    self.class.name()
  }

  pub fn kind(&self) -> &ElementKind {
    self.class.kind()
  }

  /// Attribute identifiers, as fetched when the element was wrapped.
  pub fn attributes(&self) -> &[String] {
    &self.attributes
  }

  /// Snake_case symbols of [`attributes`](Self::attributes).
  pub fn attribute_symbols(&self) -> Vec<String> {
    self
      .attributes
      .iter()
      .map(String::as_str)
      .map(naming::symbol)
      .collect()
  }

  pub fn has_attribute(&self, name: &str) -> bool {
    self.attribute_for(name).is_some()
  }

  // ==========================================================================
  // Attributes
  // ==========================================================================

  /// Massaged value of an attribute.
  ///
  /// A native failure is reported and yields null; only an unresolvable
  /// name is an error.
  pub fn attribute(&self, name: &str) -> AxResult<AttributeValue<H>> {
    let identifier = self.attribute_for(name).ok_or_else(|| AxError::lookup(name))?;
    Ok(self.fetch(identifier))
  }

  pub fn attribute_writable(&self, name: &str) -> AxResult<bool> {
    let identifier = self.attribute_for(name).ok_or_else(|| AxError::lookup(name))?;
    let operation = format!("is_attribute_writable({identifier})");
    Ok(
      self
        .native(&operation, self.handle.is_attribute_writable(identifier))
        .unwrap_or(false),
    )
  }

  /// Write an attribute and return the value that was written.
  ///
  /// The element is not re-read: a write may invalidate the element itself.
  pub fn set_attribute(
    &self,
    name: &str,
    value: impl Into<AttributeValue<H>>,
  ) -> AxResult<AttributeValue<H>> {
    let value = value.into();
    if !self.attribute_writable(name)? {
      return Err(AxError::read_only(name));
    }
    let identifier = self.attribute_for(name).ok_or_else(|| AxError::lookup(name))?;

    let raw = value.clone().into_raw();
    let operation = format!("set_attribute_value({identifier})");
    self.native(&operation, self.handle.set_attribute_value(identifier, &raw));
    Ok(value)
  }

  /// Parameterized attribute identifiers. Fetched on every call.
  pub fn param_attributes(&self) -> Vec<String> {
    self
      .native(
        "parameterized_attribute_names",
        self.handle.parameterized_attribute_names(),
      )
      .unwrap_or_default()
  }

  pub fn param_attribute(
    &self,
    name: &str,
    parameter: impl Into<AttributeValue<H>>,
  ) -> AxResult<AttributeValue<H>> {
    let available = self.param_attributes();
    let identifier = self
      .class
      .names()
      .resolve(name, &available)
      .ok_or_else(|| AxError::lookup(name))?;

    let parameter = parameter.into().into_raw();
    let operation = format!("parameterized_attribute_value({identifier})");
    let raw = self
      .native(
        &operation,
        self.handle.parameterized_attribute_value(identifier, &parameter),
      )
      .unwrap_or(RawValue::Null);
    Ok(massage(&self.ctx, raw))
  }

  // ==========================================================================
  // Actions
  // ==========================================================================

  /// Action identifiers. Fetched on every call.
  pub fn actions(&self) -> Vec<String> {
    self
      .native("action_names", self.handle.action_names())
      .unwrap_or_default()
  }

  /// Perform an action. Returns whether the native call succeeded.
  ///
  /// Does not return the element: an action may invalidate it.
  pub fn perform_action(&self, name: &str) -> AxResult<bool> {
    let available = self.actions();
    let identifier = self
      .class
      .names()
      .resolve(name, &available)
      .ok_or_else(|| AxError::lookup(name))?;

    let operation = format!("perform_action({identifier})");
    Ok(
      self
        .native(&operation, self.handle.perform_action(identifier))
        .is_some(),
    )
  }

  // ==========================================================================
  // Tree
  // ==========================================================================

  /// Wrapped children, in native order. Empty when the element has none.
  pub fn children(&self) -> Vec<Element<H>> {
    self
      .attribute_for(CHILDREN)
      .map(|identifier| self.fetch(identifier).into_elements())
      .unwrap_or_default()
  }

  pub fn parent(&self) -> Option<Element<H>> {
    self
      .attribute_for(PARENT)
      .and_then(|identifier| self.fetch(identifier).into_element())
  }

  /// Process identifier of the owning application. Memoized on success.
  pub fn pid(&self) -> Option<u32> {
    if let Some(pid) = self.pid.get() {
      return Some(*pid);
    }
    let pid = self.native("pid", self.handle.pid())?;
    Some(*self.pid.get_or_init(|| pid))
  }

  // ==========================================================================
  // Search
  // ==========================================================================

  /// Search descendants. Singular or plural by the shape of `target`.
  pub fn search(&self, target: &str, filters: &Filters<H>) -> SearchResult<H> {
    search::search(self, target, filters)
  }

  /// Attribute if `name` resolves to one, else a search of the descendants.
  ///
  /// A blank search is a [`AxError::SearchFailure`]. An element without
  /// children is not searched and yields [`AxError::Unsupported`].
  pub fn lookup(&self, name: &str, filters: &Filters<H>) -> AxResult<AttributeValue<H>> {
    if let Some(identifier) = self.attribute_for(name) {
      return Ok(self.fetch(identifier));
    }

    if self.has_attribute(CHILDREN) {
      let result = self.search(name, filters);
      if result.is_blank() {
        return Err(self.search_failure(name, filters));
      }
      return Ok(result.into_value());
    }

    Err(self.unsupported(name))
  }

  /// First `menu_item` below this menu matching `filters`.
  pub fn menu_item(&self, filters: &Filters<H>) -> AxResult<Element<H>> {
    const MENU_ITEM: &str = "menu_item";

    if *self.kind() != ElementKind::Menu {
      return Err(self.unsupported(MENU_ITEM));
    }
    search::find(self, MENU_ITEM, filters).ok_or_else(|| self.search_failure(MENU_ITEM, filters))
  }

  // ==========================================================================
  // Internals
  // ==========================================================================

  pub(crate) fn diagnostics(&self) -> Diagnostics {
    self.ctx.diagnostics()
  }

  pub(crate) fn context(&self) -> &Arc<Context> {
    &self.ctx
  }

  fn attribute_for(&self, name: &str) -> Option<&str> {
    self.class.names().resolve(name, &self.attributes)
  }

  /// Fetch and massage by identifier. Failures are reported and become null.
  fn fetch(&self, identifier: &str) -> AttributeValue<H> {
    let operation = format!("attribute_value({identifier})");
    let raw = self
      .native(&operation, self.handle.attribute_value(identifier))
      .unwrap_or(RawValue::Null);
    massage(&self.ctx, raw)
  }

  fn native<T>(&self, operation: &str, result: NativeResult<T>) -> Option<T> {
    checked(&self.handle, self.diagnostics(), operation, result)
  }

  fn search_failure(&self, target: &str, filters: &Filters<H>) -> AxError {
    AxError::SearchFailure {
      searcher: Box::new(self.inspect()),
      target: target.to_owned(),
      filters: filters.describe(),
    }
  }

  fn unsupported(&self, name: &str) -> AxError {
    AxError::Unsupported {
      name: name.to_owned(),
      receiver: self.inspect().to_string(),
    }
  }
}

impl<H: PartialEq> PartialEq for Element<H> {
  fn eq(&self, other: &Self) -> bool {
    self.handle == other.handle
  }
}

impl<H: Eq> Eq for Element<H> {}

impl<H: Hash> Hash for Element<H> {
  fn hash<S: Hasher>(&self, state: &mut S) {
    self.handle.hash(state);
  }
}

impl<H: fmt::Debug> fmt::Debug for Element<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Element")
      .field("type", self.class.name())
      .field("handle", &self.handle)
      .finish_non_exhaustive()
  }
}

impl<H: NativeHandle> fmt::Display for Element<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.inspect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::mock::{MockHandle, MockTree};
  use crate::platform::NativeError;
  use crate::types::Point;
  use crate::Accessibility;
  use std::collections::HashSet;

  fn quiet() -> Accessibility {
    Accessibility::builder().diagnostics(Diagnostics::Quiet).build()
  }

  /// Button titled "OK", enabled, no children.
  fn ok_button(tree: &MockTree) -> MockHandle {
    tree
      .node("AXButton")
      .attr("AXTitle", "OK")
      .attr("AXEnabled", true)
      .action("AXPress")
      .build()
  }

  mod attributes {
    use super::*;

    #[test]
    fn reads_by_symbol() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert_eq!(element.attribute("title").unwrap().as_str(), Some("OK"));
      assert_eq!(element.attribute("enabled").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn reads_by_identifier() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert_eq!(element.attribute("AXTitle").unwrap().as_str(), Some("OK"));
    }

    #[test]
    fn predicate_marker_falls_back_to_base_name() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert_eq!(element.attribute("enabled?").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn unknown_name_is_a_lookup_failure() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      let err = element.attribute("bogus").unwrap_err();
      assert!(matches!(err, AxError::LookupFailure { ref name } if name == "bogus"));
    }

    #[test]
    fn native_failure_yields_null() {
      let tree = MockTree::new();
      let node = tree
        .node("AXButton")
        .failing("AXValue", NativeError::NoValue)
        .build();
      let element = quiet().wrap(node);

      assert!(element.attribute("value").unwrap().is_null());
    }

    #[test]
    fn attribute_list_is_fetched_once() {
      let tree = MockTree::new();
      let node = ok_button(&tree);
      let element = quiet().wrap(node);

      element.attribute("title").unwrap();
      element.attribute("enabled").unwrap();
      let _ = element.attribute("bogus");

      assert_eq!(tree.calls_matching("attribute_names("), 1);
    }

    #[test]
    fn symbols() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert_eq!(element.attribute_symbols(), vec!["role", "title", "enabled"]);
      assert!(element.has_attribute("title"));
      assert!(!element.has_attribute(CHILDREN));
    }

    #[test]
    fn geometry_attributes_are_decoded() {
      let tree = MockTree::new();
      let node = tree
        .node("AXWindow")
        .attr("AXPosition", crate::types::Geometry::Point(Point::new(10.0, 20.0)))
        .build();
      let element = quiet().wrap(node);

      assert_eq!(
        element.attribute("position").unwrap().as_point(),
        Some(Point::new(10.0, 20.0))
      );
    }
  }

  mod writes {
    use super::*;

    #[test]
    fn read_only_attribute_is_refused() {
      let tree = MockTree::new();
      let node = ok_button(&tree);
      let element = quiet().wrap(node.clone());

      let err = element.set_attribute("title", "X").unwrap_err();

      assert!(matches!(err, AxError::AttributeReadOnly { ref name } if name == "title"));
      assert_eq!(tree.calls_matching("set_attribute_value("), 0);
      assert_eq!(tree.stored(&node, "AXTitle"), Some(RawValue::from("OK")));
    }

    #[test]
    fn writable_attribute_is_written_and_echoed() {
      let tree = MockTree::new();
      let node = tree.node("AXTextField").writable("AXValue", "").build();
      let element = quiet().wrap(node.clone());

      let echoed = element.set_attribute("value", "hello").unwrap();

      assert_eq!(echoed.as_str(), Some("hello"));
      assert_eq!(tree.stored(&node, "AXValue"), Some(RawValue::from("hello")));
    }

    #[test]
    fn geometry_is_written_boxed() {
      let tree = MockTree::new();
      let node = tree
        .node("AXWindow")
        .writable("AXPosition", crate::types::Geometry::Point(Point::new(0.0, 0.0)))
        .build();
      let element = quiet().wrap(node.clone());

      element.set_attribute("position", Point::new(5.0, 6.0)).unwrap();

      assert_eq!(
        tree.stored(&node, "AXPosition"),
        Some(RawValue::Boxed(crate::value::BoxedValue::new(1, vec![5.0, 6.0])))
      );
    }

    #[test]
    fn unknown_attribute_is_a_lookup_failure() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert!(matches!(
        element.set_attribute("bogus", 1),
        Err(AxError::LookupFailure { .. })
      ));
      assert!(matches!(
        element.attribute_writable("bogus"),
        Err(AxError::LookupFailure { .. })
      ));
    }
  }

  mod actions {
    use super::*;

    #[test]
    fn performs_by_symbol() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert!(element.perform_action("press").unwrap());
      assert_eq!(tree.calls_matching("perform_action("), 1);
    }

    #[test]
    fn unknown_action_is_a_lookup_failure() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert!(matches!(
        element.perform_action("cancel"),
        Err(AxError::LookupFailure { .. })
      ));
    }

    #[test]
    fn destroyed_elements_have_no_actions() {
      let tree = MockTree::new();
      let node = ok_button(&tree);
      let element = quiet().wrap(node.clone());
      let actions = element.actions();
      tree.destroy(&node);

      assert_eq!(actions, vec!["AXPress"]);
      assert!(element.actions().is_empty());
      assert!(element.perform_action("press").is_err());
    }

    #[test]
    fn actions_are_refetched() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      element.actions();
      element.actions();

      assert_eq!(tree.calls_matching("action_names("), 2);
    }
  }

  mod parameterized {
    use super::*;

    #[test]
    fn resolves_and_massages() {
      let tree = MockTree::new();
      let node = tree
        .node("AXTextArea")
        .param_attr("AXStringForRange", "hello")
        .build();
      let element = quiet().wrap(node);

      let value = element
        .param_attribute("string_for_range", crate::types::Range::new(0, 5))
        .unwrap();

      assert_eq!(value.as_str(), Some("hello"));
      assert_eq!(element.param_attributes(), vec!["AXStringForRange"]);
    }

    #[test]
    fn unknown_is_a_lookup_failure() {
      let tree = MockTree::new();
      let element = quiet().wrap(tree.node("AXTextArea").build());

      assert!(matches!(
        element.param_attribute("bounds_for_range", 0),
        Err(AxError::LookupFailure { .. })
      ));
    }
  }

  mod lookup {
    use super::*;

    fn window_with_buttons(tree: &MockTree) -> MockHandle {
      let window = tree.node("AXWindow").attr("AXTitle", "Main").build();
      let ok = ok_button(tree);
      let cancel = tree.node("AXButton").attr("AXTitle", "Cancel").build();
      tree.set_children(&window, &[&ok, &cancel]);
      window
    }

    #[test]
    fn attributes_win() {
      let tree = MockTree::new();
      let element = quiet().wrap(window_with_buttons(&tree));

      let value = element.lookup("title", &Filters::new()).unwrap();
      assert_eq!(value.as_str(), Some("Main"));
    }

    #[test]
    fn falls_back_to_search() {
      let tree = MockTree::new();
      let element = quiet().wrap(window_with_buttons(&tree));

      let filters = Filters::new().with("title", "Cancel");
      let button = element.lookup("button", &filters).unwrap().into_element().unwrap();
      assert_eq!(button.attribute("title").unwrap().as_str(), Some("Cancel"));
    }

    #[test]
    fn plural_names_collect() {
      let tree = MockTree::new();
      let element = quiet().wrap(window_with_buttons(&tree));

      let buttons = element.lookup("buttons", &Filters::new()).unwrap().into_elements();
      assert_eq!(buttons.len(), 2);
    }

    #[test]
    fn blank_search_is_a_search_failure() {
      let tree = MockTree::new();
      let element = quiet().wrap(window_with_buttons(&tree));

      let filters = Filters::new().with("title", "Apply");
      let err = element.lookup("button", &filters).unwrap_err();

      assert!(matches!(err, AxError::SearchFailure { ref target, .. } if target == "button"));
      assert_eq!(
        err.to_string(),
        r#"Could not find `button` with title: "Apply" as a child of #<Window "Main" 2 children>"#
      );
    }

    #[test]
    fn childless_elements_are_unsupported() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      let err = element.lookup("button", &Filters::new()).unwrap_err();
      assert!(matches!(err, AxError::Unsupported { ref name, .. } if name == "button"));
    }
  }

  mod menus {
    use super::*;

    #[test]
    fn menu_item_searches_menus() {
      let tree = MockTree::new();
      let menu = tree.node("AXMenu").build();
      let copy = tree.node("AXMenuItem").attr("AXTitle", "Copy").build();
      let paste = tree.node("AXMenuItem").attr("AXTitle", "Paste").build();
      tree.set_children(&menu, &[&copy, &paste]);
      let element = quiet().wrap(menu);

      let item = element
        .menu_item(&Filters::new().with("title", "Paste"))
        .unwrap();
      assert_eq!(item.handle(), &paste);
    }

    #[test]
    fn menu_item_on_other_kinds_is_unsupported() {
      let tree = MockTree::new();
      let element = quiet().wrap(ok_button(&tree));

      assert!(matches!(
        element.menu_item(&Filters::new()),
        Err(AxError::Unsupported { .. })
      ));
    }

    #[test]
    fn missing_menu_item_is_a_search_failure() {
      let tree = MockTree::new();
      let menu = tree.node("AXMenu").build();
      tree.set_children(&menu, &[]);
      let element = quiet().wrap(menu);

      assert!(matches!(
        element.menu_item(&Filters::new().with("title", "Quit")),
        Err(AxError::SearchFailure { .. })
      ));
    }
  }

  mod identity {
    use super::*;

    #[test]
    fn equality_follows_the_handle() {
      let tree = MockTree::new();
      let node = ok_button(&tree);
      let ax = quiet();
      let a = ax.wrap(node.clone());
      let b = ax.wrap(node);
      let c = ax.wrap(ok_button(&tree));

      assert_eq!(a, b);
      assert_ne!(a, c);
      let set: HashSet<_> = [a, b, c].into_iter().collect();
      assert_eq!(set.len(), 2);
    }

    #[test]
    fn same_type_shares_a_class() {
      let tree = MockTree::new();
      let ax = quiet();
      let a = ax.wrap(ok_button(&tree));
      let b = ax.wrap(ok_button(&tree));

      assert!(Arc::ptr_eq(&a.class, &b.class));
    }

    #[test]
    fn pid_is_memoized() {
      let tree = MockTree::new();
      let node = tree.node("AXApplication").pid(42).build();
      let element = quiet().wrap(node);

      assert_eq!(element.pid(), Some(42));
      assert_eq!(element.pid(), Some(42));
      assert_eq!(tree.calls_matching("pid("), 1);
    }
  }
}
