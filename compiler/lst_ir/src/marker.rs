//! Facts attached to nodes that the node kind alone does not record.

use smallvec::SmallVec;

use crate::Space;

/// A tagged fact about a node or padded element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    /// Synthesized by the front end; has no source text and is never printed.
    Implicit,
    /// A delimited list written without its parentheses (`x -> x`).
    OmitParentheses,
    /// A block written without braces.
    OmitBraces,
    /// A name written as a quoted identifier.
    Quoted,
    /// A separator after the last element (`{1, 2,}`); the space is what
    /// follows that separator.
    TrailingComma(Space),
    /// The element was terminated by `;`.
    Semicolon,
    /// Tool-defined fact, keyed by name.
    Extension { name: String, value: String },
}

/// Set of markers on a node. Most nodes carry none or one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Markers(SmallVec<[Marker; 2]>);

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(marker: Marker) -> Self {
        let mut markers = Self::new();
        markers.push(marker);
        markers
    }

    /// Add a marker unless an equal one is already present.
    pub fn push(&mut self, marker: Marker) {
        if !self.0.contains(&marker) {
            self.0.push(marker);
        }
    }

    #[must_use]
    pub fn with(mut self, marker: Marker) -> Self {
        self.push(marker);
        self
    }

    pub fn contains(&self, marker: &Marker) -> bool {
        self.0.contains(marker)
    }

    pub fn is_implicit(&self) -> bool {
        self.contains(&Marker::Implicit)
    }

    pub fn has_semicolon(&self) -> bool {
        self.contains(&Marker::Semicolon)
    }

    pub fn omits_braces(&self) -> bool {
        self.contains(&Marker::OmitBraces)
    }

    pub fn omits_parentheses(&self) -> bool {
        self.contains(&Marker::OmitParentheses)
    }

    pub fn trailing_comma(&self) -> Option<&Space> {
        self.0.iter().find_map(|m| match m {
            Marker::TrailingComma(space) => Some(space),
            _ => None,
        })
    }

    /// Value of the extension marker registered under `name`.
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.0.iter().find_map(|m| match m {
            Marker::Extension { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
