//! Tracing infrastructure for debugging evaluator sweeps.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The tracer is a zero-cost abstraction. When `NoopTracer` is used every
//! hook is an `#[inline(always)]` empty function and the compiler removes
//! the calls along with their arguments. No tracing state lives in the
//! evaluator itself.
//!
//! `PrintTracer` collects one line per interesting step, filtered by
//! [`Verbosity`].

use tagstream_core::{Colors, Role, TreeEvent};

use super::job::Scope;
use super::query::QueryKind;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Events, emissions, spawns, expiries, drain.
    #[default]
    Default,
    /// Adds one line per match function invocation.
    Verbose,
    /// Adds depth changes.
    VeryVerbose,
}

/// Tracer trait for evaluator instrumentation.
///
/// Hooks are called in sweep order:
/// - `trace_event` - before an event is processed
/// - `trace_depth` / `trace_unbalanced_close` - on depth updates
/// - `trace_scope_expired` - when a job is dropped without being invoked
/// - `trace_invoke` then `trace_outcome` - around each match function call
/// - `trace_emit` / `trace_spawn` - when an outcome is committed
/// - `trace_abort` - when the sweep fails
/// - `trace_drained` - when the last job is gone
pub trait Tracer {
    fn trace_event(&mut self, index: u64, event: &TreeEvent);

    fn trace_depth(&mut self, tag: &str, depth: u32);

    /// A close arrived for a tag that was not open.
    fn trace_unbalanced_close(&mut self, tag: &str);

    fn trace_scope_expired(&mut self, scope: &Scope);

    fn trace_invoke(&mut self, scope: &Scope, kind: QueryKind);

    fn trace_outcome(&mut self, label: &'static str);

    /// `literal_query` is set when a query was emitted as a plain item.
    fn trace_emit(&mut self, literal_query: bool);

    fn trace_spawn(&mut self, scope: &Scope);

    fn trace_abort(&mut self);

    fn trace_drained(&mut self);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_event(&mut self, _index: u64, _event: &TreeEvent) {}

    #[inline(always)]
    fn trace_depth(&mut self, _tag: &str, _depth: u32) {}

    #[inline(always)]
    fn trace_unbalanced_close(&mut self, _tag: &str) {}

    #[inline(always)]
    fn trace_scope_expired(&mut self, _scope: &Scope) {}

    #[inline(always)]
    fn trace_invoke(&mut self, _scope: &Scope, _kind: QueryKind) {}

    #[inline(always)]
    fn trace_outcome(&mut self, _label: &'static str) {}

    #[inline(always)]
    fn trace_emit(&mut self, _literal_query: bool) {}

    #[inline(always)]
    fn trace_spawn(&mut self, _scope: &Scope) {}

    #[inline(always)]
    fn trace_abort(&mut self) {}

    #[inline(always)]
    fn trace_drained(&mut self) {}
}

/// Tracer that collects trace lines for display.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    /// Invocation waiting for its outcome (consolidated into one line).
    pending_invoke: Option<String>,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            pending_invoke: None,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// All collected lines joined by newlines.
    pub fn dump(&self) -> String {
        self.lines.join("\n")
    }

    fn push_step(&mut self, label: &str, detail: &str) {
        self.push_line(Role::Step, label, detail);
    }

    fn push_warn(&mut self, label: &str, detail: &str) {
        self.push_line(Role::Warn, label, detail);
    }

    fn push_line(&mut self, role: Role, label: &str, detail: &str) {
        let label = self.colors.paint(role, label);
        let line = if detail.is_empty() {
            format!("  {label}")
        } else {
            format!("  {label} {detail}")
        };
        self.lines.push(line);
    }
}

impl Tracer for PrintTracer {
    fn trace_event(&mut self, index: u64, event: &TreeEvent) {
        let c = self.colors;
        let role = if event.is_text() { Role::Text } else { Role::Tag };
        self.lines.push(format!(
            "{} {}",
            c.paint(Role::Step, format_args!("#{index}")),
            c.paint(role, event)
        ));
    }

    fn trace_depth(&mut self, tag: &str, depth: u32) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        self.push_step("depth", &format!("{tag}={depth}"));
    }

    fn trace_unbalanced_close(&mut self, tag: &str) {
        self.push_warn("unbalanced", &format!("</{tag}>"));
    }

    fn trace_scope_expired(&mut self, scope: &Scope) {
        self.push_warn("expired", &scope.to_string());
    }

    fn trace_invoke(&mut self, scope: &Scope, kind: QueryKind) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let kind = match kind {
            QueryKind::Single => "single",
            QueryKind::Recursive => "recursive",
        };
        self.pending_invoke = Some(format!("{scope} {kind}"));
    }

    fn trace_outcome(&mut self, label: &'static str) {
        let Some(invoke) = self.pending_invoke.take() else {
            return;
        };
        self.push_step("invoke", &format!("{invoke} -> {label}"));
    }

    fn trace_emit(&mut self, literal_query: bool) {
        let what = if literal_query { "query" } else { "value" };
        let what = self.colors.paint(Role::Value, what);
        self.push_step("emit", &what);
    }

    fn trace_spawn(&mut self, scope: &Scope) {
        self.push_step("spawn", &scope.to_string());
    }

    fn trace_abort(&mut self) {
        self.pending_invoke = None;
        self.push_warn("abort", "");
    }

    fn trace_drained(&mut self) {
        self.push_step("drained", "");
    }
}
