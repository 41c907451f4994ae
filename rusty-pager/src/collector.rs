//! Interaction listener: filtering, activation limit and idle timer.

use std::fmt;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};

use crate::transport::InteractionFeed;

/// Why a listener stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// A Stop control or an explicit stop.
    Stop,
    /// The maximum number of activations was collected.
    Limit,
    /// No accepted activation arrived within the idle timeout.
    Time,
    /// The transport dropped the feed.
    Disconnected,
}

impl CloseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            CloseReason::Stop => "stop",
            CloseReason::Limit => "limit",
            CloseReason::Time => "time",
            CloseReason::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of waiting on a [`Collector`].
#[derive(Debug)]
pub enum Collected<I> {
    /// Passed the filter and counts toward the limit.
    Accepted(I),
    /// Failed the filter; does not touch the timer or the count.
    Rejected(I),
    Closed(CloseReason),
}

type Filter<I> = Box<dyn Fn(&I) -> bool + Send + Sync>;

/// Wraps a raw [`InteractionFeed`] with a filter, an activation limit and an
/// idle deadline. Once closed it keeps reporting the same reason.
pub struct Collector<I> {
    feed: InteractionFeed<I>,
    filter: Filter<I>,
    max: Option<usize>,
    idle_timeout: Duration,
    deadline: Instant,
    collected: usize,
    ended: Option<CloseReason>,
}

impl<I> fmt::Debug for Collector<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("max", &self.max)
            .field("idle_timeout", &self.idle_timeout)
            .field("collected", &self.collected)
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}

impl<I> Collector<I> {
    pub fn new<F>(
        feed: InteractionFeed<I>,
        filter: F,
        max: Option<usize>,
        idle_timeout: Duration,
    ) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self {
            feed,
            filter: Box::new(filter),
            max,
            idle_timeout,
            deadline: Instant::now() + idle_timeout,
            collected: 0,
            ended: None,
        }
    }

    /// Wait for the next interaction or for the listener to close.
    ///
    /// Cancel safe: dropping the future loses no interaction.
    pub async fn next(&mut self) -> Collected<I> {
        if let Some(reason) = self.ended {
            return Collected::Closed(reason);
        }

        if self.max.is_some_and(|max| self.collected >= max) {
            return Collected::Closed(self.end(CloseReason::Limit));
        }

        match timeout_at(self.deadline, self.feed.recv()).await {
            Err(_elapsed) => Collected::Closed(self.end(CloseReason::Time)),
            Ok(None) => Collected::Closed(self.end(CloseReason::Disconnected)),
            Ok(Some(interaction)) if (self.filter)(&interaction) => {
                self.collected += 1;
                Collected::Accepted(interaction)
            }
            Ok(Some(interaction)) => Collected::Rejected(interaction),
        }
    }

    /// Push the idle deadline a full timeout into the future.
    pub fn reset_timer(&mut self) {
        self.deadline = Instant::now() + self.idle_timeout;
    }

    /// Close with [`CloseReason::Stop`] unless already closed.
    pub fn stop(&mut self) {
        self.end(CloseReason::Stop);
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn ended(&self) -> Option<CloseReason> {
        self.ended
    }

    fn end(&mut self, reason: CloseReason) -> CloseReason {
        *self.ended.get_or_insert(reason)
    }
}
