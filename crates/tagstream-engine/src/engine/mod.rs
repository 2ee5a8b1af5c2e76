//! Streaming evaluation of structural queries over tree events.
//!
//! The evaluator consumes `Open`/`Text`/`Close` events one at a time,
//! tracks how deep each tag name is nested, and runs every query that is
//! still in scope against the current event.

mod depth;
mod error;
mod evaluator;
mod job;
mod query;
mod stream;
mod trace;


pub use depth::DepthTracker;
pub use error::{ConfigError, RuntimeError};
pub use evaluator::{Completion, Evaluator, EvaluatorBuilder, Limits, Status};
pub use job::{Job, Scope};
pub use query::{Emit, MatchError, Outcome, Query, QueryKind};
pub use stream::Matches;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
