/// Handle to a scheduled event, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    id: u64,
    at_ms: f64,
    event: E,
}

/// Small deadline queue for delayed effects.
///
/// Events fire in deadline order, ties in scheduling order. The queue holds a handful of
/// entries at most, so it is a plain vector.
#[derive(Debug)]
pub struct TimerQueue<E> {
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at_ms: f64, event: E) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, at_ms, event });
        TimerId(id)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id.0);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.at_ms).min_by(f64::total_cmp)
    }

    /// Remove and return the earliest event due at `now_ms`, with its deadline.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, E)> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.at_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.at_ms.total_cmp(&b.at_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(pos);
        Some((entry.at_ms, entry.event))
    }

    /// Remove and return every event due at `now_ms`, in firing order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<E> {
        let mut out = Vec::new();
        while let Some((_, e)) = self.pop_due(now_ms) {
            out.push(e);
        }
        out
    }
}
