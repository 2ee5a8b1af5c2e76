//! Streaming query evaluator.
//!
//! The evaluator owns a collection of jobs and a depth tracker and advances
//! them one event at a time. Each `Open` or `Text` event triggers a sweep:
//! every live job is offered the event, and its outcome decides whether the
//! job survives, emits, or spawns a job scoped to the element's children.
//! `Close` events only update depths.
//!
//! Once no jobs remain the evaluator is drained and asks its source to stop.

use std::borrow::Borrow;
use std::fmt;
use std::ops::ControlFlow;

use tagstream_core::TreeEvent;

use super::depth::DepthTracker;
use super::error::{ConfigError, RuntimeError};
use super::job::{Job, Scope};
use super::query::{Emit, Outcome, Query};
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total match function invocations (default: unlimited).
    pub(crate) exec_fuel: u64,
    /// Maximum live jobs after any event (default: unlimited).
    pub(crate) job_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            exec_fuel: u64::MAX,
            job_limit: usize::MAX,
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the live job limit.
    pub fn job_limit(mut self, limit: usize) -> Self {
        self.job_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u64 {
        self.exec_fuel
    }

    pub fn get_job_limit(&self) -> usize {
        self.job_limit
    }
}

/// Evaluator lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// At least one job is live.
    #[default]
    Active,
    /// No jobs remain. Terminal.
    Drained,
}

/// How an evaluation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Every job finished before the input did.
    Drained,
    /// The input ended while jobs were still live.
    EndOfInput,
}

/// Builder for [`Evaluator`] instances.
pub struct EvaluatorBuilder<V> {
    queries: Vec<Query<V>>,
    limits: Limits,
    on_drain: Option<Box<dyn FnOnce()>>,
}

impl<V> Default for EvaluatorBuilder<V> {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            limits: Limits::default(),
            on_drain: None,
        }
    }
}

impl<V> EvaluatorBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root query.
    pub fn query(mut self, query: Query<V>) -> Self {
        self.queries.push(query);
        self
    }

    /// Add several root queries, in order.
    pub fn queries(mut self, queries: impl IntoIterator<Item = Query<V>>) -> Self {
        self.queries.extend(queries);
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    pub fn job_limit(mut self, limit: usize) -> Self {
        self.limits = self.limits.job_limit(limit);
        self
    }

    /// Callback run once, the moment the evaluator drains.
    ///
    /// This is the hook for detaching from a push-driven source early.
    pub fn on_drain(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_drain = Some(Box::new(f));
        self
    }

    /// Build the evaluator. Fails if no query was given.
    pub fn build(self) -> Result<Evaluator<V>, ConfigError> {
        if self.queries.is_empty() {
            return Err(ConfigError::NoQueries);
        }

        Ok(Evaluator {
            jobs: self.queries.into_iter().map(Job::root).collect(),
            depths: DepthTracker::new(),
            status: Status::Active,
            exec_fuel: self.limits.exec_fuel,
            limits: self.limits,
            events_processed: 0,
            on_drain: self.on_drain,
        })
    }
}

/// Result of one sweep, applied only if every invocation succeeded.
struct Sweep<V> {
    keep: Vec<bool>,
    spawned: Vec<Job<V>>,
    emitted: Vec<Emit<V>>,
}

/// Query evaluator state.
pub struct Evaluator<V> {
    /// Live jobs. Swept last-added-first.
    jobs: Vec<Job<V>>,
    depths: DepthTracker,
    status: Status,
    /// Remaining match function invocations.
    exec_fuel: u64,
    limits: Limits,
    events_processed: u64,
    on_drain: Option<Box<dyn FnOnce()>>,
}

impl<V> Evaluator<V> {
    pub fn builder() -> EvaluatorBuilder<V> {
        EvaluatorBuilder::new()
    }

    /// Evaluator over `queries` with default limits.
    pub fn new(queries: impl IntoIterator<Item = Query<V>>) -> Result<Self, ConfigError> {
        Self::builder().queries(queries).build()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_drained(&self) -> bool {
        self.status == Status::Drained
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn depths(&self) -> &DepthTracker {
        &self.depths
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Events accepted so far, including ones that failed.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// How evaluation stands right now, were the input to end here.
    pub fn completion(&self) -> Completion {
        match self.status {
            Status::Drained => Completion::Drained,
            Status::Active => Completion::EndOfInput,
        }
    }

    /// Signal end of input. There is never buffered state to flush.
    pub fn finish(self) -> Completion {
        self.completion()
    }

    /// Process one event, handing emitted items to `sink`.
    ///
    /// Returns `Break` once the evaluator is drained; the caller should stop
    /// supplying events. Further calls are no-ops.
    pub fn process<S>(
        &mut self,
        event: &TreeEvent,
        sink: S,
    ) -> Result<ControlFlow<()>, RuntimeError>
    where
        S: FnMut(Emit<V>),
    {
        self.process_with(event, sink, &mut NoopTracer)
    }

    /// Process one event with a tracer for debugging.
    pub fn process_with<S, T>(
        &mut self,
        event: &TreeEvent,
        mut sink: S,
        tracer: &mut T,
    ) -> Result<ControlFlow<()>, RuntimeError>
    where
        S: FnMut(Emit<V>),
        T: Tracer,
    {
        if self.is_drained() {
            return Ok(ControlFlow::Break(()));
        }

        let index = self.events_processed;
        self.events_processed += 1;
        tracer.trace_event(index, event);

        let open_tag = match event {
            TreeEvent::Close { name } => {
                // Depth drops before any job could look at the next event.
                match self.depths.on_close(name) {
                    Some(depth) => tracer.trace_depth(name, depth),
                    None => tracer.trace_unbalanced_close(name),
                }
                return Ok(ControlFlow::Continue(()));
            }
            TreeEvent::Open { name, .. } => Some(name.as_str()),
            TreeEvent::Text { .. } => None,
        };

        let sweep = match self.sweep(event, index, open_tag, tracer) {
            Ok(sweep) => sweep,
            Err(e) => {
                tracer.trace_abort();
                return Err(e);
            }
        };

        let live = sweep.keep.iter().filter(|&&k| k).count() + sweep.spawned.len();
        if live > self.limits.job_limit {
            tracer.trace_abort();
            return Err(RuntimeError::JobLimitExceeded(live));
        }

        let mut next = Vec::with_capacity(live);
        let current = std::mem::take(&mut self.jobs);
        next.extend(
            current
                .into_iter()
                .zip(sweep.keep)
                .filter_map(|(job, keep)| keep.then_some(job)),
        );
        for job in sweep.spawned {
            tracer.trace_spawn(&job.scope);
            next.push(job);
        }
        self.jobs = next;

        for item in sweep.emitted {
            tracer.trace_emit(item.is_query());
            sink(item);
        }

        // Depth rises only after the sweep, so children spawned above are
        // scoped to the depth this element's children will see.
        if let Some(tag) = open_tag {
            let depth = self.depths.on_open(tag);
            tracer.trace_depth(tag, depth);
        }

        if self.jobs.is_empty() {
            self.drain(tracer);
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Offer `event` to every job without mutating the collection.
    fn sweep<T: Tracer>(
        &mut self,
        event: &TreeEvent,
        index: u64,
        open_tag: Option<&str>,
        tracer: &mut T,
    ) -> Result<Sweep<V>, RuntimeError> {
        let Self {
            jobs,
            depths,
            exec_fuel,
            limits,
            ..
        } = self;

        let mut sweep = Sweep {
            keep: vec![false; jobs.len()],
            spawned: Vec::new(),
            emitted: Vec::new(),
        };

        for (i, job) in jobs.iter_mut().enumerate().rev() {
            if !job.scope.is_live(depths) {
                tracer.trace_scope_expired(&job.scope);
                continue;
            }

            if *exec_fuel == 0 {
                return Err(RuntimeError::ExecFuelExhausted(limits.exec_fuel));
            }
            *exec_fuel -= 1;

            tracer.trace_invoke(&job.scope, job.query.kind());
            let outcome = job
                .query
                .call(event)
                .map_err(|source| RuntimeError::QueryFailed {
                    event_index: index,
                    source,
                })?;
            tracer.trace_outcome(outcome.label());

            match outcome {
                Outcome::NoMatch => sweep.keep[i] = true,
                Outcome::Stop => {}
                Outcome::Value(value) => {
                    sweep.keep[i] = job.query.is_recursive();
                    sweep.emitted.push(Emit::Value(value));
                }
                Outcome::SubQuery(query) => {
                    sweep.keep[i] = job.query.is_recursive();
                    match open_tag {
                        Some(tag) => {
                            let scope = Scope::children_of(tag, depths.depth_of(tag));
                            sweep.spawned.push(Job::within(query, scope));
                        }
                        None => sweep.emitted.push(Emit::Query(query)),
                    }
                }
            }
        }

        Ok(sweep)
    }

    fn drain<T: Tracer>(&mut self, tracer: &mut T) {
        self.status = Status::Drained;
        tracer.trace_drained();
        if let Some(on_drain) = self.on_drain.take() {
            on_drain();
        }
    }

    /// Drive a whole event sequence into `sink`.
    ///
    /// Stops pulling from `events` as soon as the evaluator drains.
    pub fn run<I, S>(&mut self, events: I, mut sink: S) -> Result<Completion, RuntimeError>
    where
        I: IntoIterator,
        I::Item: Borrow<TreeEvent>,
        S: FnMut(Emit<V>),
    {
        if self.is_drained() {
            return Ok(Completion::Drained);
        }
        for event in events {
            if self.process(event.borrow(), &mut sink)?.is_break() {
                return Ok(Completion::Drained);
            }
        }
        Ok(self.completion())
    }
}

impl<V> fmt::Debug for Evaluator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("status", &self.status)
            .field("jobs", &self.jobs.len())
            .field("depths", &self.depths)
            .field("limits", &self.limits)
            .field("events_processed", &self.events_processed)
            .finish_non_exhaustive()
    }
}
