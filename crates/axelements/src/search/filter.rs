/*!
Search filters: attribute name → expected value.
*/

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::element::Element;
use crate::platform::NativeHandle;
use crate::types::{Point, Rect, Size};
use crate::value::AttributeValue;

type PredicateFn<H> = dyn Fn(&AttributeValue<H>) -> bool + Send + Sync;

/// What a filtered attribute must hold.
pub enum Expected<H> {
  /// Massaged value equals this one.
  Equals(AttributeValue<H>),
  /// String value matches the pattern.
  Pattern(Regex),
  /// Value satisfies the predicate.
  Predicate(Arc<PredicateFn<H>>),
}

impl<H: NativeHandle> Expected<H> {
  pub fn matches(&self, value: &AttributeValue<H>) -> bool {
    match self {
      Self::Equals(expected) => expected == value,
      Self::Pattern(pattern) => value.as_str().is_some_and(|s| pattern.is_match(s)),
      Self::Predicate(predicate) => predicate(value),
    }
  }
}

impl<H: Clone> Clone for Expected<H> {
  fn clone(&self) -> Self {
    match self {
      Self::Equals(value) => Self::Equals(value.clone()),
      Self::Pattern(pattern) => Self::Pattern(pattern.clone()),
      Self::Predicate(predicate) => Self::Predicate(Arc::clone(predicate)),
    }
  }
}

impl<H: NativeHandle> fmt::Display for Expected<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Equals(value) => write!(f, "{value}"),
      Self::Pattern(pattern) => write!(f, "/{pattern}/"),
      Self::Predicate(_) => f.write_str("<predicate>"),
    }
  }
}

impl<H: fmt::Debug> fmt::Debug for Expected<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Equals(value) => f.debug_tuple("Equals").field(value).finish(),
      Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
      Self::Predicate(_) => f.write_str("Predicate(..)"),
    }
  }
}

impl<H> From<AttributeValue<H>> for Expected<H> {
  fn from(value: AttributeValue<H>) -> Self {
    Self::Equals(value)
  }
}

impl<H> From<Regex> for Expected<H> {
  fn from(pattern: Regex) -> Self {
    Self::Pattern(pattern)
  }
}

macro_rules! expected_equals_from {
  ($($ty:ty),* $(,)?) => {
    $(
      impl<H> From<$ty> for Expected<H> {
        fn from(value: $ty) -> Self {
          Self::Equals(AttributeValue::from(value))
        }
      }
    )*
  };
}

expected_equals_from!(&str, String, bool, f64, i32, Point, Size, Rect);

impl<H> From<Element<H>> for Expected<H> {
  fn from(element: Element<H>) -> Self {
    Self::Equals(AttributeValue::Element(element))
  }
}

/// Ordered set of filters. Every entry must match.
pub struct Filters<H> {
  entries: Vec<(String, Expected<H>)>,
}

impl<H> Default for Filters<H> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
    }
  }
}

impl<H: Clone> Clone for Filters<H> {
  fn clone(&self) -> Self {
    Self {
      entries: self.entries.clone(),
    }
  }
}

impl<H: fmt::Debug> fmt::Debug for Filters<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
      .entries(self.entries.iter().map(|(k, v)| (k, v)))
      .finish()
  }
}

impl<H> Filters<H> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Require `attribute` to equal (or match) `expected`.
  #[must_use]
  pub fn with(mut self, attribute: impl Into<String>, expected: impl Into<Expected<H>>) -> Self {
    self.entries.push((attribute.into(), expected.into()));
    self
  }

  /// Require the string value of `attribute` to match `pattern`.
  #[must_use]
  pub fn matching(self, attribute: impl Into<String>, pattern: Regex) -> Self {
    self.with(attribute, Expected::Pattern(pattern))
  }

  /// Require the value of `attribute` to satisfy `predicate`.
  #[must_use]
  pub fn satisfying(
    self,
    attribute: impl Into<String>,
    predicate: impl Fn(&AttributeValue<H>) -> bool + Send + Sync + 'static,
  ) -> Self {
    self.with(attribute, Expected::Predicate(Arc::new(predicate)))
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Expected<H>)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl<H: NativeHandle> Filters<H> {
  /// `attribute: expected` per entry, for error messages.
  pub fn describe(&self) -> Vec<String> {
    self
      .entries
      .iter()
      .map(|(attribute, expected)| format!("{attribute}: {expected}"))
      .collect()
  }
}
