/*!
Breadth-first search over an element's descendants.

The walk starts at the root's children; the root is never a candidate.
Children are enqueued in native order, so among several matches the
shallowest wins, then the earliest sibling.

Whether a search is singular or plural is decided up front from the target
name alone: `button` finds one, `buttons` finds all (when `Button` is a
registered class and `Buttons` is not).

# Module Structure

- `mod.rs` - `SearchMode`, `SearchFilter`, `find`, `find_all`, `SearchResult`
- `filter.rs` - `Filters` and `Expected`
*/

mod filter;

pub use filter::{Expected, Filters};

use std::collections::VecDeque;

use crate::element::Element;
use crate::platform::NativeHandle;
use crate::registry::{naming, ClassRegistry};
use crate::types::TypeName;
use crate::value::AttributeValue;

/// Singular or plural search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
  One,
  All,
}

/// Mode and normalized target type for a caller-supplied name.
///
/// The name is camelized. If it names a registered class the search is
/// singular. Otherwise, if a singular form names a registered class, the
/// search is plural for that class. Anything else is a singular search for
/// the camelized name.
///
/// Only registered classes count. With builtin classes turned off, `rulers`
/// is a singular search for `Rulers` until a `Ruler` element has been wrapped
/// or the class registered through the builder.
pub fn search_mode(registry: &ClassRegistry, target: &str) -> (SearchMode, TypeName) {
  let name = naming::camelize(target);
  if registry.contains(&name) {
    return (SearchMode::One, TypeName::from(name));
  }
  match registry.find_plural_capable(&name) {
    Some(class) => (SearchMode::All, class.name().clone()),
    None => (SearchMode::One, TypeName::from(name)),
  }
}

/// Target type plus attribute filters. Built per search.
#[derive(Debug)]
pub struct SearchFilter<'f, H> {
  pub target: TypeName,
  pub filters: &'f Filters<H>,
}

impl<'f, H: NativeHandle> SearchFilter<'f, H> {
  pub fn new(target: impl Into<TypeName>, filters: &'f Filters<H>) -> Self {
    Self {
      target: target.into(),
      filters,
    }
  }

  /// Type matches, and every filtered attribute exists and matches.
  pub fn matches(&self, node: &Element<H>) -> bool {
    if *node.type_name() != self.target {
      return false;
    }
    self.filters.iter().all(|(attribute, expected)| {
      node
        .attribute(attribute)
        .is_ok_and(|value| expected.matches(&value))
    })
  }
}

/// Outcome of a search, shaped by its mode.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<H> {
  One(Option<Element<H>>),
  All(Vec<Element<H>>),
}

impl<H> SearchResult<H> {
  /// No element found.
  pub fn is_blank(&self) -> bool {
    match self {
      Self::One(found) => found.is_none(),
      Self::All(found) => found.is_empty(),
    }
  }

  pub fn into_vec(self) -> Vec<Element<H>> {
    match self {
      Self::One(found) => found.into_iter().collect(),
      Self::All(found) => found,
    }
  }

  /// Singular results become an element (or null), plural a collection.
  pub fn into_value(self) -> AttributeValue<H> {
    match self {
      Self::One(Some(element)) => AttributeValue::Element(element),
      Self::One(None) => AttributeValue::null(),
      Self::All(found) => AttributeValue::from(found),
    }
  }
}

/// Search with the mode implied by `target`.
pub fn search<H: NativeHandle>(root: &Element<H>, target: &str, filters: &Filters<H>) -> SearchResult<H> {
  let (mode, type_name) = search_mode(&root.context().registry, target);
  let filter = SearchFilter::new(type_name, filters);
  match mode {
    SearchMode::One => SearchResult::One(walk(root, &filter, true).into_iter().next()),
    SearchMode::All => SearchResult::All(walk(root, &filter, false)),
  }
}

/// First match in breadth-first order. Never fails; absent when nothing matches.
pub fn find<H: NativeHandle>(root: &Element<H>, target: &str, filters: &Filters<H>) -> Option<Element<H>> {
  let filter = SearchFilter::new(naming::camelize(target), filters);
  walk(root, &filter, true).into_iter().next()
}

/// Every match in breadth-first order. Empty when nothing matches.
pub fn find_all<H: NativeHandle>(root: &Element<H>, target: &str, filters: &Filters<H>) -> Vec<Element<H>> {
  let filter = SearchFilter::new(naming::camelize(target), filters);
  walk(root, &filter, false)
}

fn walk<H: NativeHandle>(root: &Element<H>, filter: &SearchFilter<'_, H>, first_only: bool) -> Vec<Element<H>> {
  let mut found = Vec::new();
  let mut queue: VecDeque<Element<H>> = root.children().into();
  let mut visited = 0_usize;

  while let Some(node) = queue.pop_front() {
    visited += 1;
    if filter.matches(&node) {
      log::trace!("{:?} matches {}", node.handle(), filter.target);
      found.push(node.clone());
      if first_only {
        break;
      }
    }
    queue.extend(node.children());
  }

  log::debug!(
    "search for {} under {}: {} found, {visited} visited",
    filter.target,
    root.type_name(),
    found.len()
  );
  found
}
