//! Matchmaking engine
//!
//! Resolves match requests either by pairing with the longest-waiting
//! player in the requested class or by enqueuing the requester. Owns the
//! waiting queues and the per-player request rate limit.

use std::time::{Duration, Instant};

use log::debug;

use crate::core::queue::{TimeBudget, WaitingQueues};
use crate::core::registry::PlayerRegistry;

/// A resolved pairing; `white` is the player that was waiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub white: String,
    pub black: String,
    pub time_budget: TimeBudget,
}

pub struct Matchmaker {
    queues: WaitingQueues,
    min_interval: Duration,
}

impl Matchmaker {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            queues: WaitingQueues::new(),
            min_interval,
        }
    }

    /// Handle a `want_to_play` request.
    ///
    /// Returns the pairing to establish when an opponent was waiting, `None`
    /// when the requester was enqueued or the request was dropped. Drops are
    /// silent by contract: throttled requests, requests from unknown ids and
    /// requests from players already in a session all resolve to `None`.
    pub fn request_match(
        &mut self,
        registry: &mut PlayerRegistry,
        id: &str,
        budget: TimeBudget,
    ) -> Option<Pairing> {
        let connection = registry.lookup_mut(id)?;

        if connection.in_session() {
            debug!("Ignoring match request from already-paired player {}", id);
            return None;
        }

        if let Some(last) = connection.last_match_request {
            if last.elapsed() < self.min_interval {
                debug!("Throttled match request from player {}", id);
                return None;
            }
        }
        connection.last_match_request = Some(Instant::now());

        if self.queues.waiting_in(id) == Some(budget) {
            // Already waiting in this class, nothing to do
            return None;
        }
        // A new request moves the player out of any other class
        self.queues.remove_everywhere(id);

        // Pair with the longest-waiting player, skipping ids whose
        // connection has vanished
        while let Some(opponent) = self.queues.dequeue_oldest(budget) {
            if registry.lookup(&opponent).is_some() {
                return Some(Pairing {
                    white: opponent,
                    black: id.to_string(),
                    time_budget: budget,
                });
            }
        }

        self.queues.enqueue(budget, id);
        debug!("Player {} waiting for a {} opponent", id, budget);
        None
    }

    /// Drop a player from every waiting queue
    pub fn cancel(&mut self, id: &str) {
        self.queues.remove_everywhere(id);
    }

    pub fn queues(&self) -> &WaitingQueues {
        &self.queues
    }
}
