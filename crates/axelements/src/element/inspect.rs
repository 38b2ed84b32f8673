/*!
Diagnostic snapshot of an element.

Renders as `#<Type "title" (x, y) N children enabled[✔] focused[✘]>`. Each
part after the type only appears when the element has the attribute behind it.
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use super::Element;
use crate::platform::{attr, NativeHandle};
use crate::types::Point;

/// What `inspect` saw when it looked at an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Inspection {
  pub type_name: String,
  /// `value=<v>` when the element has a value, else its quoted title.
  pub identifier: Option<String>,
  pub position: Option<Point>,
  pub children: Option<usize>,
  pub enabled: Option<bool>,
  pub focused: Option<bool>,
}

impl Inspection {
  /// Snapshot carrying only a type name.
  pub fn named(type_name: impl Into<String>) -> Self {
    Self {
      type_name: type_name.into(),
      identifier: None,
      position: None,
      children: None,
      enabled: None,
      focused: None,
    }
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

fn checkbox(f: &mut fmt::Formatter<'_>, name: &str, state: Option<bool>) -> fmt::Result {
  match state {
    Some(true) => write!(f, " {name}[✔]"),
    Some(false) => write!(f, " {name}[✘]"),
    None => Ok(()),
  }
}

impl fmt::Display for Inspection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#<{}", self.type_name)?;
    if let Some(identifier) = &self.identifier {
      write!(f, " {identifier}")?;
    }
    if let Some(position) = self.position {
      write!(f, " ({}, {})", position.x, position.y)?;
    }
    match self.children {
      Some(1) => f.write_str(" 1 child")?,
      Some(count) => write!(f, " {count} children")?,
      None => {}
    }
    checkbox(f, "enabled", self.enabled)?;
    checkbox(f, "focused", self.focused)?;
    f.write_str(">")
  }
}

impl<H: NativeHandle> Element<H> {
  /// Look at the element's identifying attributes.
  pub fn inspect(&self) -> Inspection {
    let has = |identifier: &str| self.attributes.iter().any(|a| a == identifier);

    let identifier = if has(attr::VALUE) {
      Some(format!("value={}", self.fetch(attr::VALUE)))
    } else if has(attr::TITLE) {
      Some(self.fetch(attr::TITLE).to_string())
    } else {
      None
    };

    let position = if has(attr::POSITION) {
      self.fetch(attr::POSITION).as_point()
    } else {
      None
    };

    let children = if has(attr::CHILDREN) {
      let operation = format!("attribute_value_count({})", attr::CHILDREN);
      self.native(&operation, self.handle.attribute_value_count(attr::CHILDREN))
    } else {
      None
    };

    let flag = |identifier: &str| {
      has(identifier).then(|| self.fetch(identifier).as_bool().unwrap_or(false))
    };

    Inspection {
      type_name: self.type_name().to_string(),
      identifier,
      position,
      children,
      enabled: flag(attr::ENABLED),
      focused: flag(attr::FOCUSED),
    }
  }
}
