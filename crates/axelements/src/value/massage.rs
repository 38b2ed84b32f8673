/*!
Raw → caller-facing value conversion.

Dispatch is by the raw value's type tag through a fixed table: element
references become [`Element`]s, boxed structs are decoded, collections are
converted member by member, and everything else passes through unchanged.
*/

use std::sync::Arc;

use super::{AttributeValue, BoxedValue, RawValue, TypeTag};
use crate::core::Context;
use crate::element::Element;
use crate::platform::NativeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Massager {
  PassThrough,
  Element,
  Collection,
  Boxed,
}

const fn massager_for(tag: TypeTag) -> Massager {
  match tag {
    TypeTag::Element => Massager::Element,
    TypeTag::Array => Massager::Collection,
    TypeTag::Boxed => Massager::Boxed,
    TypeTag::Null
    | TypeTag::Boolean
    | TypeTag::Number
    | TypeTag::String
    | TypeTag::Url
    | TypeTag::Opaque => Massager::PassThrough,
  }
}

pub(crate) fn massage<H: NativeHandle>(ctx: &Arc<Context>, raw: RawValue<H>) -> AttributeValue<H> {
  match (massager_for(raw.type_tag()), raw) {
    (Massager::Element, RawValue::Element(handle)) => {
      AttributeValue::Element(Element::new(ctx, handle))
    }
    (Massager::Collection, RawValue::Array(items)) => collection(ctx, items),
    (Massager::Boxed, RawValue::Boxed(boxed)) => boxed_value(&boxed),
    (_, raw) => AttributeValue::Scalar(raw),
  }
}

/// Collections are assumed homogeneous: the first member decides.
///
/// Empty collections and collections led by a pass-through member are
/// returned as they came. Otherwise every member is massaged on its own.
fn collection<H: NativeHandle>(ctx: &Arc<Context>, items: Vec<RawValue<H>>) -> AttributeValue<H> {
  let pass_through = items
    .first()
    .is_none_or(|first| massager_for(first.type_tag()) == Massager::PassThrough);
  if pass_through {
    return AttributeValue::Scalar(RawValue::Array(items));
  }

  AttributeValue::Collection(
    items
      .into_iter()
      .map(|item| massage(ctx, item))
      .collect(),
  )
}

/// Undecodable boxes become null.
fn boxed_value<H>(boxed: &BoxedValue) -> AttributeValue<H> {
  boxed
    .decode()
    .map_or_else(AttributeValue::null, AttributeValue::Geometry)
}
