/*!
`AXElements` - typed element objects over a platform accessibility tree.

Native handles are wrapped into [`Element`]s classified by role and subrole.
Attribute values are massaged from raw native values into [`AttributeValue`]s,
and an element's descendants can be searched breadth-first by type and
attribute filters.

```ignore
use axelements::{Accessibility, Filters};

let ax = Accessibility::new();
let app = ax.application(pid)?;

// Attributes by symbol
let title = app.attribute("title")?;

// Implicit lookup: attribute first, then a search of the descendants
let window = app.lookup("window", &Filters::new())?;

// Singular vs plural from the name
let ok = app.search("button", &Filters::new().with("title", "OK"));
let all = app.search("buttons", &Filters::new());

// Actions return whether they succeeded, not the element
app.perform_action("raise")?;
```
*/

mod core;
mod element;
pub mod platform;
pub mod registry;
pub mod search;
mod types;
pub mod value;

pub use types::*;

pub use crate::core::{Accessibility, AccessibilityBuilder, Config, Diagnostics};
pub use crate::element::{Element, Inspection};
pub use crate::platform::{NativeError, NativeHandle, NativeResult};
pub use crate::registry::{ClassRef, ClassRegistry, ElementClass, ElementKind};
pub use crate::search::{find, find_all, Expected, Filters, SearchMode, SearchResult};
pub use crate::value::{AttributeValue, BoxedValue, RawValue, TypeTag};
