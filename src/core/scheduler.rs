// Cancellable due-time events for the lifecycle controller.
//
// Teardown-after-fade and drone disposal are modelled as explicit entries
// with monotonic ids instead of raw `setTimeout` handles, so stopping a
// session can cancel everything outstanding before any node is disposed.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    TeardownAmbient,
    DisposeBuildUp,
    DisposeNebula,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<(TimerId, f64, EngineEvent)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at_sec: f64, event: EngineEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, at_sec, event));
        id
    }

    /// Cancel a single entry. Cancelling an id that already fired (or was
    /// already cancelled) is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|(eid, _, _)| *eid != id);
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Drain every entry due at or before `now_sec`, earliest first.
    pub fn poll(&mut self, now_sec: f64, out: &mut SmallVec<[EngineEvent; 4]>) {
        let mut due: SmallVec<[(TimerId, f64, EngineEvent); 4]> = SmallVec::new();
        self.entries.retain(|entry| {
            if entry.1 <= now_sec {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        for (_, _, ev) in due {
            out.push(ev);
        }
    }
}
