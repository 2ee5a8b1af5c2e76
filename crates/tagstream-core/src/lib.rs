#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for tagstream tree events.
//!
//! An upstream markup parser turns raw input into a flat sequence of
//! [`TreeEvent`]s: an `Open` for every element start, a `Text` for every
//! leaf, and a `Close` for every element end. The engine consumes these
//! events one at a time and never sees the markup itself.
//!
//! Events are assumed to be well nested. Nothing in this crate validates
//! that, it is the producer's contract.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod colors;

pub use colors::{Colors, Role};

/// Attribute payload carried by an `Open` event.
///
/// Insertion ordered. The engine never looks inside it.
pub type Attributes = IndexMap<String, String>;

// ============================================================================
// Events
// ============================================================================

/// One unit of the input stream.
///
/// The serialized shape follows the records emitted by the markup parser:
/// `{"name": "a", "data": {..}}` opens, `{"text": ".."}` is a leaf and
/// `{"name": "a"}` closes. Variant order matters for untagged decoding,
/// since an `Open` record is a `Close` record plus `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeEvent {
    /// Element start.
    Open {
        name: String,
        #[serde(rename = "data")]
        attributes: Attributes,
    },
    /// Leaf content. Has no descendants.
    Text {
        #[serde(rename = "text")]
        content: String,
    },
    /// Closes the most recent unmatched `Open` with the same name.
    Close { name: String },
}

/// Discriminant of a [`TreeEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Open,
    Text,
    Close,
}

impl TreeEvent {
    /// Element start with no attributes.
    pub fn open(name: impl Into<String>) -> Self {
        Self::Open {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    /// Element start with attributes.
    pub fn open_with<K, W>(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, W)>,
    ) -> Self
    where
        K: Into<String>,
        W: Into<String>,
    {
        Self::Open {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        Self::Close { name: name.into() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Open { .. } => EventKind::Open,
            Self::Text { .. } => EventKind::Text,
            Self::Close { .. } => EventKind::Close,
        }
    }

    /// Tag name of an `Open` or `Close` event. `None` for text.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Open { name, .. } | Self::Close { name } => Some(name),
            Self::Text { .. } => None,
        }
    }

    /// Attributes of an `Open` event.
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Open { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Content of a `Text` event.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            _ => None,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self, Self::Close { .. })
    }

    /// True for an `Open` event with the given tag name.
    pub fn opens(&self, tag: &str) -> bool {
        matches!(self, Self::Open { name, .. } if name == tag)
    }
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { name, attributes } => {
                write!(f, "<{name}")?;
                for (key, value) in attributes {
                    write!(f, " {key}={value:?}")?;
                }
                f.write_str(">")
            }
            Self::Text { content } => write!(f, "{content:?}"),
            Self::Close { name } => write!(f, "</{name}>"),
        }
    }
}

/// Parse a recorded event sequence (a JSON array of parser records).
pub fn parse_events(json: &str) -> Result<Vec<TreeEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod lib_tests;
