//! Jobs: queries bound to an activation scope.

use std::fmt;

use super::depth::DepthTracker;
use super::query::Query;

/// Where a job is allowed to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Always eligible. Used for the queries the evaluator starts with.
    Root,
    /// Eligible while `tag` is open at least `min_depth` times.
    Within { tag: String, min_depth: u32 },
}

impl Scope {
    /// Scope for the children of an element `tag` whose depth before the
    /// open was `depth`.
    pub fn children_of(tag: impl Into<String>, depth: u32) -> Self {
        Self::Within {
            tag: tag.into(),
            min_depth: depth + 1,
        }
    }

    /// False once the bound element has closed below the required depth.
    #[inline]
    pub fn is_live(&self, depths: &DepthTracker) -> bool {
        match self {
            Self::Root => true,
            Self::Within { tag, min_depth } => depths.depth_of(tag) >= *min_depth,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Within { tag, min_depth } => write!(f, "{tag}>={min_depth}"),
        }
    }
}

/// An active query instance.
#[derive(Debug)]
pub struct Job<V> {
    pub query: Query<V>,
    pub scope: Scope,
}

impl<V> Job<V> {
    pub fn root(query: Query<V>) -> Self {
        Self {
            query,
            scope: Scope::Root,
        }
    }

    pub fn within(query: Query<V>, scope: Scope) -> Self {
        Self { query, scope }
    }
}
