/*!
Attribute values: what the native layer returns, and what callers see.
*/

mod attribute;
mod massage;
mod raw;

pub use attribute::AttributeValue;
pub(crate) use massage::massage;
pub use raw::{BoxedValue, RawValue, TypeTag};
