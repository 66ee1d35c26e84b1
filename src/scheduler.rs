use std::collections::HashMap;
use std::fmt::Display;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::{self, JoinHandle};

use crate::event::input::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Schedules one-shot timers. A fired timer is reported back to the owner
/// of the scheduler, which decides what the timer meant.
///
/// Cancelling a timer that already fired, or was never issued, does nothing.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId;
    fn cancel(&mut self, timer: TimerId);
}

/// Runs each timer as a tokio task which sends [AppEvent::TimerFired] once
/// the delay has elapsed.
pub struct TokioScheduler {
    sender: Sender<AppEvent>,
    next_id: u64,
    pending: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(sender: Sender<AppEvent>) -> Self {
        Self {
            sender,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|(_, h)| !h.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let timer = TimerId(self.next_id);
        let sender = self.sender.clone();

        // forget handles of timers which already fired
        self.pending.retain(|_, handle| !handle.is_finished());

        let handle = task::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = sender.send(AppEvent::TimerFired(timer)).await {
                log::debug!("dropping {}: {}", timer, err);
            }
        });
        self.pending.insert(timer, handle);
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(handle) = self.pending.remove(&timer) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

/// A virtual clock. Nothing fires until [ManualScheduler::advance] is
/// called.
#[derive(Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerId)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns the timers which came due,
    /// earliest deadline first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .filter(|(deadline, _)| *deadline <= now)
            .copied()
            .collect();
        self.pending.retain(|(deadline, _)| *deadline > now);
        due.sort();
        due.into_iter().map(|(_, timer)| timer).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let timer = TimerId(self.next_id);
        self.pending.push((self.now + delay, timer));
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        self.pending.retain(|(_, t)| *t != timer);
    }
}
