/*!
Ancestors, hit-testing and screen points.
*/

use std::collections::HashSet;

use super::Element;
use crate::platform::NativeHandle;
use crate::types::{AxError, AxResult, Point};

impl<H: NativeHandle> Element<H> {
  /// This element followed by each ancestor, nearest first.
  ///
  /// Built fresh on every call. Stops at the first element without a parent,
  /// or at an ancestor already on the path.
  pub fn hierarchy(&self) -> Vec<Element<H>> {
    let mut seen = HashSet::from([self.handle.clone()]);
    let mut path = vec![self.clone()];
    let mut current = self.parent();

    while let Some(element) = current {
      if !seen.insert(element.handle.clone()) {
        log::warn!("{:?} is its own ancestor; hierarchy truncated", element.handle);
        break;
      }
      current = element.parent();
      path.push(element);
    }
    path
  }

  /// Topmost element at `point`, asked relative to this element.
  pub fn element_at(&self, point: Point) -> AxResult<Element<H>> {
    let operation = format!("element_at_position({}, {})", point.x, point.y);
    self
      .native(&operation, self.handle.element_at_position(point))
      .flatten()
      .map(|handle| Element::new(&self.ctx, handle))
      .ok_or(AxError::NoElementAtPosition {
        x: point.x,
        y: point.y,
      })
  }

  /// Center of the element's frame.
  pub fn to_point(&self) -> AxResult<Point> {
    let position = self
      .attribute("position")?
      .as_point()
      .ok_or_else(|| AxError::lookup("position"))?;
    let size = self
      .attribute("size")?
      .as_size()
      .ok_or_else(|| AxError::lookup("size"))?;
    Ok(position.center(size))
  }
}
