//! Virtual clock for the site's fire-and-forget timers.
//!
//! Nothing here sleeps. The host decides how far time moves (`pop_due` /
//! `advance_to`), which lets tests step through delays deterministically
//! while the CLI feeds it wall-clock time.

use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct TimerEntry<T> {
    deadline: Duration,
    /// Arming order, used to break deadline ties.
    seq: u64,
    period: Option<Duration>,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    entries: Vec<TimerEntry<T>>,
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-shot timer firing `delay` from now.
    pub fn after(&mut self, delay: Duration, payload: T) {
        let deadline = self.now.saturating_add(delay);
        self.arm(deadline, None, payload);
    }

    /// Repeating timer; the first firing is one `period` from now.
    pub fn every(&mut self, period: Duration, payload: T) {
        let period = period.max(MIN_PERIOD);
        let deadline = self.now.saturating_add(period);
        self.arm(deadline, Some(period), payload);
    }

    /// Payloads of every armed timer, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.payload)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Fires the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= until)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))?;

        let deadline = self.entries[idx].deadline;
        self.now = self.now.max(deadline);

        match self.entries[idx].period {
            Some(period) => {
                let seq = self.take_seq();
                let entry = &mut self.entries[idx];
                entry.deadline = deadline.saturating_add(period);
                entry.seq = seq;
                Some(entry.payload.clone())
            }
            None => Some(self.entries.remove(idx).payload),
        }
    }

    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn arm(&mut self, deadline: Duration, period: Option<Duration>, payload: T) {
        let seq = self.take_seq();
        self.entries.push(TimerEntry {
            deadline,
            seq,
            period,
            payload,
        });
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
