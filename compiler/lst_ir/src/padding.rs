//! Values bound to the space on one side of them.
//!
//! Every piece of non-semantic text in a tree belongs to exactly one owner:
//! a node's prefix, the `before` of a [`LeftPadded`], or the `after` of a
//! [`RightPadded`]. In a delimited [`Container`] the last element's `after`
//! is the space the closing delimiter scan found, never a separator scan, so
//! no run of whitespace is owned twice.

use crate::{Markers, Space};

/// `before` + value, e.g. the space before `=` in an initializer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeftPadded<T> {
    pub before: Space,
    pub element: T,
}

impl<T> LeftPadded<T> {
    pub fn new(before: Space, element: T) -> Self {
        LeftPadded { before, element }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LeftPadded<U> {
        LeftPadded {
            before: self.before,
            element: f(self.element),
        }
    }
}

/// Value + `after`, e.g. an argument and the space before the following comma.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RightPadded<T> {
    pub element: T,
    pub after: Space,
    pub markers: Markers,
}

impl<T> RightPadded<T> {
    pub fn new(element: T, after: Space) -> Self {
        RightPadded {
            element,
            after,
            markers: Markers::new(),
        }
    }

    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RightPadded<U> {
        RightPadded {
            element: f(self.element),
            after: self.after,
            markers: self.markers,
        }
    }
}

/// A delimited list: space before the opening delimiter, then elements.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container<T> {
    pub before: Space,
    pub elements: Vec<RightPadded<T>>,
    pub markers: Markers,
}

impl<T> Container<T> {
    pub fn build(before: Space, elements: Vec<RightPadded<T>>, markers: Markers) -> Self {
        Container {
            before,
            elements,
            markers,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The unpadded elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().map(|e| &e.element)
    }
}

/// Bind `space` to the left of `value`.
pub fn pad_left<T>(space: Space, value: T) -> LeftPadded<T> {
    LeftPadded::new(space, value)
}

/// Bind `space` to the right of `value`.
pub fn pad_right<T>(value: T, space: Space) -> RightPadded<T> {
    RightPadded::new(value, space)
}
