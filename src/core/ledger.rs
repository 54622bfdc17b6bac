// Typed accounting of live WebAudio nodes.
//
// Every node the engine creates is acquired here and released when it is
// stopped and disconnected, so a balanced session leaves the ledger where it
// started. Host tests drive this directly; the wasm side threads it through
// every factory call and disposal.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Oscillator,
    Gain,
    Filter,
    Delay,
    Panner,
    NoiseSource,
    Merger,
}

const KIND_COUNT: usize = 7;

#[derive(Clone, Debug, Default)]
pub struct NodeLedger {
    counts: [usize; KIND_COUNT],
}

impl NodeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, kind: NodeKind) {
        self.counts[kind as usize] += 1;
    }

    /// Releasing more than was acquired saturates at zero rather than
    /// panicking; double-disposal must stay harmless.
    pub fn release(&mut self, kind: NodeKind) {
        let slot = &mut self.counts[kind as usize];
        *slot = slot.saturating_sub(1);
    }

    pub fn live(&self, kind: NodeKind) -> usize {
        self.counts[kind as usize]
    }

    pub fn live_total(&self) -> usize {
        self.counts.iter().sum()
    }
}
