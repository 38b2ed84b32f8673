/*!
In-memory accessibility tree for tests.

Nodes are addressed by index; attribute values store element references as
indexes and are materialized into [`MockHandle`]s on fetch. Every native call
is counted and logged so tests can assert on round-trips.
*/

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{NativeError, NativeHandle, NativeResult};
use crate::types::Point;
use crate::value::RawValue;

#[derive(Default)]
struct MockNode {
  attributes: Vec<(String, RawValue<u32>)>,
  writable: HashSet<String>,
  failing: HashMap<String, NativeError>,
  actions: Vec<String>,
  param_attributes: Vec<(String, RawValue<u32>)>,
  hit_target: Option<u32>,
  pid: Option<u32>,
  alive: bool,
}

impl MockNode {
  fn value(&self, attribute: &str) -> Option<&RawValue<u32>> {
    self
      .attributes
      .iter()
      .find(|(name, _)| name == attribute)
      .map(|(_, value)| value)
  }

  fn set(&mut self, attribute: &str, value: RawValue<u32>) {
    if let Some(slot) = self.attributes.iter_mut().find(|(name, _)| name == attribute) {
      slot.1 = value;
    } else {
      self.attributes.push((attribute.to_owned(), value));
    }
  }
}

#[derive(Default)]
struct Inner {
  nodes: RwLock<Vec<MockNode>>,
  calls: AtomicUsize,
  log: Mutex<Vec<String>>,
}

/// A mock accessibility tree. Clone shares the tree.
#[derive(Clone, Default)]
pub(crate) struct MockTree {
  inner: Arc<Inner>,
}

impl fmt::Debug for MockTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MockTree").finish_non_exhaustive()
  }
}

/// Handle to one node of a [`MockTree`].
#[derive(Clone)]
pub(crate) struct MockHandle {
  id: u32,
  tree: Arc<Inner>,
}

impl PartialEq for MockHandle {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id && Arc::ptr_eq(&self.tree, &other.tree)
  }
}

impl Eq for MockHandle {}

impl Hash for MockHandle {
  fn hash<S: Hasher>(&self, state: &mut S) {
    self.id.hash(state);
  }
}

impl fmt::Debug for MockHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "MockHandle({})", self.id)
  }
}

/// Builder for a node. `build()` inserts it into the tree.
pub(crate) struct NodeBuilder<'a> {
  tree: &'a MockTree,
  node: MockNode,
}

impl NodeBuilder<'_> {
  pub(crate) fn subrole(mut self, subrole: &str) -> Self {
    self.node.set("AXSubrole", RawValue::from(subrole));
    self
  }

  pub(crate) fn attr(mut self, name: &str, value: impl Into<RawValue<u32>>) -> Self {
    self.node.set(name, value.into());
    self
  }

  pub(crate) fn writable(mut self, name: &str, value: impl Into<RawValue<u32>>) -> Self {
    self.node.set(name, value.into());
    self.node.writable.insert(name.to_owned());
    self
  }

  /// Attribute that is listed but whose value fetch fails.
  pub(crate) fn failing(mut self, name: &str, err: NativeError) -> Self {
    self.node.set(name, RawValue::Null);
    self.node.failing.insert(name.to_owned(), err);
    self
  }

  pub(crate) fn action(mut self, name: &str) -> Self {
    self.node.actions.push(name.to_owned());
    self
  }

  pub(crate) fn param_attr(mut self, name: &str, value: impl Into<RawValue<u32>>) -> Self {
    self.node.param_attributes.push((name.to_owned(), value.into()));
    self
  }

  pub(crate) fn pid(mut self, pid: u32) -> Self {
    self.node.pid = Some(pid);
    self
  }

  pub(crate) fn build(self) -> MockHandle {
    let mut nodes = self.tree.inner.nodes.write();
    let id = u32::try_from(nodes.len()).unwrap_or(u32::MAX);
    nodes.push(self.node);
    MockHandle {
      id,
      tree: Arc::clone(&self.tree.inner),
    }
  }
}

impl MockTree {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Start a node with the given role.
  pub(crate) fn node(&self, role: &str) -> NodeBuilder<'_> {
    let mut node = MockNode {
      alive: true,
      ..MockNode::default()
    };
    node.set("AXRole", RawValue::from(role));
    NodeBuilder { tree: self, node }
  }

  /// Set `AXChildren` on the parent and `AXParent` on each child.
  pub(crate) fn set_children(&self, parent: &MockHandle, children: &[&MockHandle]) {
    let mut nodes = self.inner.nodes.write();
    let ids: Vec<RawValue<u32>> = children.iter().map(|c| RawValue::Element(c.id)).collect();
    if let Some(node) = nodes.get_mut(parent.id as usize) {
      node.set("AXChildren", RawValue::Array(ids));
    }
    for child in children {
      if let Some(node) = nodes.get_mut(child.id as usize) {
        node.set("AXParent", RawValue::Element(parent.id));
      }
    }
  }

  pub(crate) fn set_hit_target(&self, handle: &MockHandle, target: &MockHandle) {
    if let Some(node) = self.inner.nodes.write().get_mut(handle.id as usize) {
      node.hit_target = Some(target.id);
    }
  }

  /// Make every subsequent call on the node fail with `InvalidElement`.
  pub(crate) fn destroy(&self, handle: &MockHandle) {
    if let Some(node) = self.inner.nodes.write().get_mut(handle.id as usize) {
      node.alive = false;
    }
  }

  /// Current stored value of an attribute, as element indexes.
  pub(crate) fn stored(&self, handle: &MockHandle, name: &str) -> Option<RawValue<u32>> {
    let nodes = self.inner.nodes.read();
    nodes.get(handle.id as usize)?.value(name).cloned()
  }

  pub(crate) fn call_count(&self) -> usize {
    self.inner.calls.load(Ordering::SeqCst)
  }

  /// Number of logged calls whose description starts with `prefix`.
  pub(crate) fn calls_matching(&self, prefix: &str) -> usize {
    self
      .inner
      .log
      .lock()
      .iter()
      .filter(|c| c.starts_with(prefix))
      .count()
  }
}

impl MockHandle {
  fn record(&self, call: String) {
    self.tree.calls.fetch_add(1, Ordering::SeqCst);
    self.tree.log.lock().push(call);
  }

  fn with_node<T>(&self, f: impl FnOnce(&MockNode) -> NativeResult<T>) -> NativeResult<T> {
    let nodes = self.tree.nodes.read();
    let node = nodes.get(self.id as usize).ok_or(NativeError::InvalidElement)?;
    if !node.alive {
      return Err(NativeError::InvalidElement);
    }
    f(node)
  }

  fn materialize(&self, raw: &RawValue<u32>) -> RawValue<MockHandle> {
    match raw {
      RawValue::Null => RawValue::Null,
      RawValue::Boolean(b) => RawValue::Boolean(*b),
      RawValue::Number(n) => RawValue::Number(*n),
      RawValue::String(s) => RawValue::String(s.clone()),
      RawValue::Url(s) => RawValue::Url(s.clone()),
      RawValue::Element(id) => RawValue::Element(MockHandle {
        id: *id,
        tree: Arc::clone(&self.tree),
      }),
      RawValue::Array(items) => RawValue::Array(items.iter().map(|i| self.materialize(i)).collect()),
      RawValue::Boxed(boxed) => RawValue::Boxed(boxed.clone()),
      RawValue::Opaque {
        type_name,
        description,
      } => RawValue::Opaque {
        type_name: type_name.clone(),
        description: description.clone(),
      },
    }
  }

  fn dematerialize(raw: &RawValue<MockHandle>) -> RawValue<u32> {
    match raw {
      RawValue::Null => RawValue::Null,
      RawValue::Boolean(b) => RawValue::Boolean(*b),
      RawValue::Number(n) => RawValue::Number(*n),
      RawValue::String(s) => RawValue::String(s.clone()),
      RawValue::Url(s) => RawValue::Url(s.clone()),
      RawValue::Element(h) => RawValue::Element(h.id),
      RawValue::Array(items) => RawValue::Array(items.iter().map(Self::dematerialize).collect()),
      RawValue::Boxed(boxed) => RawValue::Boxed(boxed.clone()),
      RawValue::Opaque {
        type_name,
        description,
      } => RawValue::Opaque {
        type_name: type_name.clone(),
        description: description.clone(),
      },
    }
  }
}

impl NativeHandle for MockHandle {
  fn attribute_names(&self) -> NativeResult<Vec<String>> {
    self.record(format!("attribute_names({})", self.id));
    self.with_node(|node| Ok(node.attributes.iter().map(|(n, _)| n.clone()).collect()))
  }

  fn attribute_value(&self, attribute: &str) -> NativeResult<RawValue<Self>> {
    self.record(format!("attribute_value({},{attribute})", self.id));
    let raw = self.with_node(|node| {
      if let Some(err) = node.failing.get(attribute) {
        return Err(*err);
      }
      node
        .value(attribute)
        .cloned()
        .ok_or(NativeError::AttributeUnsupported)
    })?;
    Ok(self.materialize(&raw))
  }

  fn attribute_value_count(&self, attribute: &str) -> NativeResult<usize> {
    self.record(format!("attribute_value_count({},{attribute})", self.id));
    self.with_node(|node| match node.value(attribute) {
      Some(RawValue::Array(items)) => Ok(items.len()),
      Some(_) => Err(NativeError::IllegalArgument),
      None => Err(NativeError::AttributeUnsupported),
    })
  }

  fn is_attribute_writable(&self, attribute: &str) -> NativeResult<bool> {
    self.record(format!("is_attribute_writable({},{attribute})", self.id));
    self.with_node(|node| Ok(node.writable.contains(attribute)))
  }

  fn set_attribute_value(&self, attribute: &str, value: &RawValue<Self>) -> NativeResult<()> {
    self.record(format!("set_attribute_value({},{attribute})", self.id));
    let stored = Self::dematerialize(value);
    let mut nodes = self.tree.nodes.write();
    let node = nodes
      .get_mut(self.id as usize)
      .filter(|n| n.alive)
      .ok_or(NativeError::InvalidElement)?;
    if !node.writable.contains(attribute) {
      return Err(NativeError::IllegalArgument);
    }
    node.set(attribute, stored);
    Ok(())
  }

  fn action_names(&self) -> NativeResult<Vec<String>> {
    self.record(format!("action_names({})", self.id));
    self.with_node(|node| Ok(node.actions.clone()))
  }

  fn perform_action(&self, action: &str) -> NativeResult<()> {
    self.record(format!("perform_action({},{action})", self.id));
    self.with_node(|node| {
      if node.actions.iter().any(|a| a == action) {
        Ok(())
      } else {
        Err(NativeError::ActionUnsupported)
      }
    })
  }

  fn parameterized_attribute_names(&self) -> NativeResult<Vec<String>> {
    self.record(format!("parameterized_attribute_names({})", self.id));
    self.with_node(|node| {
      Ok(
        node
          .param_attributes
          .iter()
          .map(|(n, _)| n.clone())
          .collect(),
      )
    })
  }

  fn parameterized_attribute_value(
    &self,
    attribute: &str,
    _parameter: &RawValue<Self>,
  ) -> NativeResult<RawValue<Self>> {
    self.record(format!("parameterized_attribute_value({},{attribute})", self.id));
    let raw = self.with_node(|node| {
      node
        .param_attributes
        .iter()
        .find(|(n, _)| n == attribute)
        .map(|(_, v)| v.clone())
        .ok_or(NativeError::ParameterizedAttributeUnsupported)
    })?;
    Ok(self.materialize(&raw))
  }

  fn element_at_position(&self, _point: Point) -> NativeResult<Option<Self>> {
    self.record(format!("element_at_position({})", self.id));
    let target = self.with_node(|node| Ok(node.hit_target))?;
    Ok(target.map(|id| MockHandle {
      id,
      tree: Arc::clone(&self.tree),
    }))
  }

  fn pid(&self) -> NativeResult<u32> {
    self.record(format!("pid({})", self.id));
    self.with_node(|node| node.pid.ok_or(NativeError::Failure))
  }
}
