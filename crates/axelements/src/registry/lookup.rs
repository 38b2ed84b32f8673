/*!
Per-class memo of caller symbols to platform identifiers.

Elements of one class expose overlapping identifier sets, so the symbol map
is shared by the class and filled lazily: a miss rebuilds it from the
identifiers of the element being asked. The result is always checked against
that element's own list, since a map entry learned from a sibling may name an
identifier this element lacks.
*/

use parking_lot::RwLock;
use std::collections::HashMap;

use super::naming;

#[derive(Debug, Default)]
pub(crate) struct NameMap {
  symbols: RwLock<HashMap<String, String>>,
}

impl NameMap {
  /// Identifier in `available` that `name` refers to.
  ///
  /// `name` may be a symbol (`title`), a predicate (`enabled?`) or a full
  /// identifier (`AXTitle`).
  pub(crate) fn resolve<'a>(&self, name: &str, available: &'a [String]) -> Option<&'a str> {
    if let Some(found) = available.iter().find(|identifier| *identifier == name) {
      return Some(found);
    }

    let key = naming::symbol_key(name);
    if let Some(found) = self.find(&key, available) {
      return Some(found);
    }

    self.learn(&key, available);
    let found = self.find(&key, available);
    log::trace!("resolved {name} to {found:?}");
    found
  }

  fn find<'a>(&self, key: &str, available: &'a [String]) -> Option<&'a str> {
    let symbols = self.symbols.read();
    let identifier = symbols.get(key)?;
    available
      .iter()
      .find(|candidate| *candidate == identifier)
      .map(String::as_str)
  }

  /// Rebuild from `available`, then alias a predicate key to its base symbol.
  fn learn(&self, key: &str, available: &[String]) {
    let mut symbols = self.symbols.write();
    for identifier in available {
      symbols.insert(naming::symbol(identifier), identifier.clone());
    }

    if let Some(base) = naming::strip_predicate(key) {
      if let Some(identifier) = symbols.get(base).cloned() {
        symbols.insert(key.to_owned(), identifier);
      }
    }
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.symbols.read().len()
  }
}
