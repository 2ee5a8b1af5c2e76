//! Queries, match outcomes and emitted items.
//!
//! A query is a match function plus a persistence flag. Single-shot queries
//! retire after their first terminal outcome; recursive ones keep running on
//! every later event their job is eligible for.

use std::fmt;

use tagstream_core::TreeEvent;

/// Error raised by a fallible match function.
pub type MatchError = Box<dyn std::error::Error + Send + Sync + 'static>;

type MatchFn<V> = dyn FnMut(&TreeEvent) -> Result<Outcome<V>, MatchError>;

/// Whether a query survives its own terminal outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Retired after the first `Value` or `SubQuery`.
    #[default]
    Single,
    /// Re-invoked on every eligible event regardless of prior outcomes.
    Recursive,
}

/// A match function bound to its persistence kind.
///
/// `V` is the payload type handed downstream. It is opaque to the engine.
pub struct Query<V> {
    kind: QueryKind,
    matcher: Box<MatchFn<V>>,
}

impl<V> Query<V> {
    /// Single-shot query from an infallible match function.
    pub fn single<F>(mut f: F) -> Self
    where
        F: FnMut(&TreeEvent) -> Outcome<V> + 'static,
    {
        Self::try_single(move |event| Ok(f(event)))
    }

    /// Recursive query from an infallible match function.
    pub fn recursive<F>(f: F) -> Self
    where
        F: FnMut(&TreeEvent) -> Outcome<V> + 'static,
    {
        Self::single(f).into_recursive()
    }

    /// Single-shot query whose match function may fail.
    pub fn try_single<F>(f: F) -> Self
    where
        F: FnMut(&TreeEvent) -> Result<Outcome<V>, MatchError> + 'static,
    {
        Self {
            kind: QueryKind::Single,
            matcher: Box::new(f),
        }
    }

    /// Recursive query whose match function may fail.
    pub fn try_recursive<F>(f: F) -> Self
    where
        F: FnMut(&TreeEvent) -> Result<Outcome<V>, MatchError> + 'static,
    {
        Self::try_single(f).into_recursive()
    }

    /// Re-wrap this query so it persists after terminal outcomes.
    pub fn into_recursive(self) -> Self {
        Self {
            kind: QueryKind::Recursive,
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    #[inline]
    pub fn is_recursive(&self) -> bool {
        self.kind == QueryKind::Recursive
    }

    /// Invoke the match function.
    #[inline]
    pub fn call(&mut self, event: &TreeEvent) -> Result<Outcome<V>, MatchError> {
        (self.matcher)(event)
    }
}

impl<V> fmt::Debug for Query<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// What a match function says about one event.
pub enum Outcome<V> {
    /// Not yet. The job is retried on the next eligible event.
    NoMatch,
    /// Abandon the job permanently, whatever its kind.
    Stop,
    /// Terminal payload to emit downstream.
    Value(V),
    /// Descend into the matched element's children with a nested query.
    ///
    /// Only honored on `Open` events. On `Text` the query is emitted
    /// literally, because a leaf has no children to descend into.
    SubQuery(Query<V>),
}

impl<V> Outcome<V> {
    /// Shorthand for `Outcome::SubQuery(Query::single(f))`.
    pub fn descend<F>(f: F) -> Self
    where
        F: FnMut(&TreeEvent) -> Outcome<V> + 'static,
    {
        Self::SubQuery(Query::single(f))
    }

    /// Shorthand for `Outcome::SubQuery(Query::recursive(f))`.
    pub fn descend_all<F>(f: F) -> Self
    where
        F: FnMut(&TreeEvent) -> Outcome<V> + 'static,
    {
        Self::SubQuery(Query::recursive(f))
    }

    /// Short name used by trace output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoMatch => "no-match",
            Self::Stop => "stop",
            Self::Value(_) => "value",
            Self::SubQuery(_) => "sub-query",
        }
    }
}

impl<V> From<Option<V>> for Outcome<V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::NoMatch, Self::Value)
    }
}

impl<V: fmt::Debug> fmt::Debug for Outcome<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => f.write_str("NoMatch"),
            Self::Stop => f.write_str("Stop"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::SubQuery(q) => f.debug_tuple("SubQuery").field(q).finish(),
        }
    }
}

/// One item handed to the downstream consumer.
pub enum Emit<V> {
    Value(V),
    /// A nested query produced while matching a `Text` event.
    Query(Query<V>),
}

impl<V> Emit<V> {
    /// The payload, if this is a plain value.
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Query(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Query(_) => None,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

impl<V: fmt::Debug> fmt::Debug for Emit<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Query(q) => f.debug_tuple("Query").field(q).finish(),
        }
    }
}
