//! Streaming structural query engine for tree events.
//!
//! This crate evaluates nested pattern queries against the event stream a
//! markup parser produces, emitting results as soon as they are found and
//! without holding the tree in memory.
//!
//! # Example
//!
//! ```
//! use tagstream_engine::{Evaluator, Outcome, Query, TreeEvent};
//!
//! // Text of every <li> inside the first <ul>.
//! let query = Query::single(|event: &TreeEvent| {
//!     if !event.opens("ul") {
//!         return Outcome::NoMatch;
//!     }
//!     Outcome::descend_all(|event: &TreeEvent| match event.content() {
//!         Some(text) => Outcome::Value(text.to_owned()),
//!         None => Outcome::NoMatch,
//!     })
//! });
//!
//! let events = [
//!     TreeEvent::open("ul"),
//!     TreeEvent::open("li"),
//!     TreeEvent::text("a"),
//!     TreeEvent::close("li"),
//!     TreeEvent::close("ul"),
//!     TreeEvent::text("after"),
//! ];
//!
//! let found: Vec<String> = Evaluator::new([query])
//!     .expect("at least one query")
//!     .matches(&events)
//!     .filter_map(|item| item.ok()?.into_value())
//!     .collect();
//! assert_eq!(found, ["a"]);
//! ```

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    Completion, ConfigError, DepthTracker, Emit, Evaluator, EvaluatorBuilder, Job, Limits,
    MatchError, Matches, NoopTracer, Outcome, PrintTracer, Query, QueryKind, RuntimeError, Scope,
    Status, Tracer, Verbosity,
};
pub use tagstream_core::{Attributes, Colors, EventKind, Role, TreeEvent};
