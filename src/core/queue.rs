//! Waiting queues for players seeking an opponent
//!
//! One FIFO queue per time-budget class. A player id is never present in
//! more than one queue; the matchmaker moves ids between classes by removing
//! everywhere before enqueuing.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

/// The supported time-control classes, in minutes per player.
///
/// On the wire this is the bare number of minutes; anything outside the
/// fixed set is a parse error and the request is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum TimeBudget {
    OneMinute,
    FifteenMinutes,
    ThirtyMinutes,
}

impl TimeBudget {
    pub const ALL: [TimeBudget; 3] = [
        TimeBudget::OneMinute,
        TimeBudget::FifteenMinutes,
        TimeBudget::ThirtyMinutes,
    ];

    pub fn minutes(self) -> u64 {
        match self {
            TimeBudget::OneMinute => 1,
            TimeBudget::FifteenMinutes => 15,
            TimeBudget::ThirtyMinutes => 30,
        }
    }
}

impl TryFrom<u64> for TimeBudget {
    type Error = String;

    fn try_from(minutes: u64) -> std::result::Result<Self, Self::Error> {
        match minutes {
            1 => Ok(TimeBudget::OneMinute),
            15 => Ok(TimeBudget::FifteenMinutes),
            30 => Ok(TimeBudget::ThirtyMinutes),
            other => Err(format!("unsupported time budget: {} minutes", other)),
        }
    }
}

impl From<TimeBudget> for u64 {
    fn from(budget: TimeBudget) -> u64 {
        budget.minutes()
    }
}

impl std::fmt::Display for TimeBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.minutes())
    }
}

/// One ordered queue of waiting player ids per time-budget class
#[derive(Debug)]
pub struct WaitingQueues {
    queues: HashMap<TimeBudget, VecDeque<String>>,
}

impl WaitingQueues {
    pub fn new() -> Self {
        let mut queues = HashMap::new();
        for budget in TimeBudget::ALL {
            queues.insert(budget, VecDeque::new());
        }
        Self { queues }
    }

    /// Append an id to the tail of a queue unless it is already waiting there
    pub fn enqueue(&mut self, budget: TimeBudget, id: &str) -> bool {
        let queue = self.queues.entry(budget).or_default();
        if queue.iter().any(|waiting| waiting == id) {
            return false;
        }
        queue.push_back(id.to_string());
        true
    }

    /// Pop the longest-waiting id for a class
    pub fn dequeue_oldest(&mut self, budget: TimeBudget) -> Option<String> {
        self.queues.get_mut(&budget).and_then(|queue| queue.pop_front())
    }

    /// Remove an id from every queue it may be in; safe for unknown ids
    pub fn remove_everywhere(&mut self, id: &str) {
        for queue in self.queues.values_mut() {
            queue.retain(|waiting| waiting != id);
        }
    }

    /// The class an id is currently waiting in, if any
    pub fn waiting_in(&self, id: &str) -> Option<TimeBudget> {
        for budget in TimeBudget::ALL {
            if let Some(queue) = self.queues.get(&budget) {
                if queue.iter().any(|waiting| waiting == id) {
                    return Some(budget);
                }
            }
        }
        None
    }

    pub fn waiting_count(&self, budget: TimeBudget) -> usize {
        self.queues.get(&budget).map(|q| q.len()).unwrap_or(0)
    }
}

impl Default for WaitingQueues {
    fn default() -> Self {
        Self::new()
    }
}
