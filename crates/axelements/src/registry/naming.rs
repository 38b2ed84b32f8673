/*!
Name transformations between platform identifiers, class names and the
snake_case symbols callers use.

- `AXTitle` → [`strip_prefix`] → `Title` → [`underscore`] → `title`
- `menu_item` → [`camelize`] → `MenuItem`
- `MenuItems` → [`singular_candidates`] → `MenuItem`, `MenuIte`

Depluralization only strips regular suffixes (`s`, then `es`). Irregular
plurals are not handled.
*/

#![allow(clippy::expect_used)] // Regex literals below are known to compile

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Prefix every platform identifier starts with.
pub const PLATFORM_PREFIX: &str = "AX";

/// A run of capitals followed by a capitalized word: the run minus its last
/// letter is the prefix.
static PREFIX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z]+([A-Z][a-z])").expect("prefix pattern"));

static ACRONYM_BOUNDARY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("acronym pattern"));

static WORD_BOUNDARY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("word pattern"));

/// Strip the platform prefix from an identifier or role string.
///
/// `AXButton` → `Button`, `AXUIElement` → `Element`. Identifiers made only of
/// capitals (`AXURL`) lose a literal `AX` prefix instead.
pub fn strip_prefix(identifier: &str) -> Cow<'_, str> {
  match PREFIX.replace(identifier, "$1") {
    Cow::Borrowed(unchanged) => Cow::Borrowed(
      unchanged
        .strip_prefix(PLATFORM_PREFIX)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(unchanged),
    ),
    stripped @ Cow::Owned(_) => stripped,
  }
}

/// `CamelCase` to `snake_case`, keeping acronyms together.
pub fn underscore(word: &str) -> String {
  let word = ACRONYM_BOUNDARY.replace_all(word, "${1}_${2}");
  let word = WORD_BOUNDARY.replace_all(&word, "${1}_${2}");
  word.replace('-', "_").to_lowercase()
}

/// `snake_case` to `CamelCase`. Already-camelized input is returned unchanged.
///
/// One-letter words do not survive a trip back through [`underscore`]:
/// `a_b` camelizes to `AB`, which underscores to `ab`.
pub fn camelize(word: &str) -> String {
  word
    .split('_')
    .filter(|part| !part.is_empty())
    .map(|part| {
      let mut chars = part.chars();
      chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect::<String>()
      })
    })
    .collect()
}

/// Symbol for a platform identifier: `AXFocusedUIElement` → `focused_ui_element`.
pub fn symbol(identifier: &str) -> String {
  underscore(&strip_prefix(identifier))
}

/// Normalize a caller-supplied name to symbol form. Lowercase names are taken
/// as already normalized.
pub fn symbol_key(name: &str) -> Cow<'_, str> {
  if name.chars().any(|c| c.is_ascii_uppercase()) {
    Cow::Owned(symbol(name))
  } else {
    Cow::Borrowed(name)
  }
}

/// Strip the predicate marker from a name (`enabled?` → `enabled`).
pub fn strip_predicate(name: &str) -> Option<&str> {
  name.strip_suffix('?').filter(|rest| !rest.is_empty())
}

/// Singular forms to try for a possibly-plural class name, in order.
pub fn singular_candidates(name: &str) -> impl Iterator<Item = &str> {
  ["s", "es"]
    .into_iter()
    .filter_map(move |suffix| name.strip_suffix(suffix))
    .filter(|stem| !stem.is_empty())
}
