//! Pull adapter: evaluate lazily over an event iterator.
//!
//! Events are pulled only when no emitted item is waiting, and pulling
//! stops for good once the evaluator drains. A query like "the first match"
//! therefore never forces the rest of a large input to be produced.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::ops::ControlFlow;

use tagstream_core::TreeEvent;

use super::error::RuntimeError;
use super::evaluator::{Completion, Evaluator};
use super::query::Emit;

/// Iterator over the items an evaluator emits for an event source.
///
/// After an error, iteration may continue with the next event.
pub struct Matches<I, V> {
    evaluator: Evaluator<V>,
    events: I,
    pending: VecDeque<Emit<V>>,
    completion: Option<Completion>,
}

impl<I, V> Matches<I, V> {
    pub(crate) fn new(evaluator: Evaluator<V>, events: I) -> Self {
        Self {
            evaluator,
            events,
            pending: VecDeque::new(),
            completion: None,
        }
    }

    /// How the source ended. `None` while events may still be pulled.
    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    pub fn evaluator(&self) -> &Evaluator<V> {
        &self.evaluator
    }

    pub fn into_evaluator(self) -> Evaluator<V> {
        self.evaluator
    }
}

impl<I, V> Iterator for Matches<I, V>
where
    I: Iterator,
    I::Item: Borrow<TreeEvent>,
{
    type Item = Result<Emit<V>, RuntimeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(Ok(item));
            }
            if self.completion.is_some() {
                return None;
            }
            if self.evaluator.is_drained() {
                self.completion = Some(Completion::Drained);
                return None;
            }

            let Some(event) = self.events.next() else {
                self.completion = Some(Completion::EndOfInput);
                return None;
            };

            let pending = &mut self.pending;
            match self
                .evaluator
                .process(event.borrow(), |item| pending.push_back(item))
            {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => self.completion = Some(Completion::Drained),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<V> Evaluator<V> {
    /// Lazily evaluate over `events`.
    pub fn matches<I>(self, events: I) -> Matches<I::IntoIter, V>
    where
        I: IntoIterator,
        I::Item: Borrow<TreeEvent>,
    {
        Matches::new(self, events.into_iter())
    }
}
