//! Anchor sources: the things a floating panel is positioned against.
//!
//! An anchor is either a real DOM element (feature `dom`) or a
//! [`VirtualAnchor`], a caller-supplied function producing a [`Rect`] on
//! demand (for example a tracked pointer position). Both resolve through
//! [`AnchorSource::resolve`]; resolving never mutates application state.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

use std::fmt;
use std::rc::Rc;

use crate::rect::Rect;

/// A caller-supplied rect function standing in for an element.
///
/// The function is invoked on every resolve; results are never cached.
/// Clones share the same function, and [`AnchorSource::is_same`] treats them
/// as one anchor.
#[derive(Clone)]
pub struct VirtualAnchor {
    rect: Rc<dyn Fn() -> Rect>,
}

impl VirtualAnchor {
    #[must_use]
    pub fn new(rect: impl Fn() -> Rect + 'static) -> Self {
        Self { rect: Rc::new(rect) }
    }

    /// An anchor that always resolves to `rect`.
    #[must_use]
    pub fn fixed(rect: Rect) -> Self {
        Self::new(move || rect)
    }

    #[must_use]
    pub fn resolve(&self) -> Rect {
        (self.rect)()
    }
}

impl fmt::Debug for VirtualAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualAnchor").finish_non_exhaustive()
    }
}

/// What a floating panel is anchored to.
#[derive(Clone, Debug)]
pub enum AnchorSource {
    /// A rendered element, measured with its native bounding rect.
    #[cfg(feature = "dom")]
    Element(web_sys::Element),
    /// A rect-producing function.
    Virtual(VirtualAnchor),
}

impl AnchorSource {
    /// Measure the anchor in viewport coordinates.
    ///
    /// Returns [`Rect::ZERO`] for an element that is not attached to a
    /// document; callers treat that as "cannot position this frame".
    #[must_use]
    pub fn resolve(&self) -> Rect {
        match self {
            #[cfg(feature = "dom")]
            Self::Element(element) => {
                if !element.is_connected() {
                    return Rect::ZERO;
                }
                let bounds = element.get_bounding_client_rect();
                Rect::new(bounds.x(), bounds.y(), bounds.width(), bounds.height())
            }
            Self::Virtual(anchor) => anchor.resolve(),
        }
    }

    /// Whether both sources refer to the same element or the same virtual function.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            #[cfg(feature = "dom")]
            (Self::Element(a), Self::Element(b)) => a == b,
            (Self::Virtual(a), Self::Virtual(b)) => Rc::ptr_eq(&a.rect, &b.rect),
            #[cfg(feature = "dom")]
            _ => false,
        }
    }

    /// The anchor element, if this source is one.
    #[cfg(feature = "dom")]
    #[must_use]
    pub fn element(&self) -> Option<&web_sys::Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Virtual(_) => None,
        }
    }
}

impl From<VirtualAnchor> for AnchorSource {
    fn from(anchor: VirtualAnchor) -> Self {
        Self::Virtual(anchor)
    }
}

#[cfg(feature = "dom")]
impl From<web_sys::Element> for AnchorSource {
    fn from(element: web_sys::Element) -> Self {
        Self::Element(element)
    }
}
