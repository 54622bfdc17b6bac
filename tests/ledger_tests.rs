// Host-side tests for the node ledger.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod ledger {
    include!("../src/core/ledger.rs");
}

use ledger::*;

#[test]
fn balanced_session_returns_to_zero() {
    let mut l = NodeLedger::new();
    // Shape of a small ambient session: buses, a layer, a shimmer voice.
    let session = [
        NodeKind::Gain,
        NodeKind::Gain,
        NodeKind::Gain,
        NodeKind::Gain,
        NodeKind::Filter,
        NodeKind::Filter,
        NodeKind::Oscillator,
        NodeKind::NoiseSource,
        NodeKind::Delay,
        NodeKind::Merger,
        NodeKind::Panner,
    ];
    for k in session {
        l.acquire(k);
    }
    assert_eq!(l.live_total(), session.len());
    for k in session {
        l.release(k);
    }
    assert_eq!(l.live_total(), 0);
}

#[test]
fn repeated_sessions_do_not_drift() {
    let mut l = NodeLedger::new();
    l.acquire(NodeKind::Gain); // persistent master gain
    let baseline = l.live_total();
    for _ in 0..5 {
        for _ in 0..12 {
            l.acquire(NodeKind::Oscillator);
            l.acquire(NodeKind::Gain);
        }
        for _ in 0..12 {
            l.release(NodeKind::Oscillator);
            l.release(NodeKind::Gain);
        }
        assert_eq!(l.live_total(), baseline);
    }
}

#[test]
fn aborted_build_releases_every_partial_acquire() {
    // A builder that fails partway through walks back exactly what it
    // acquired, so the live count returns to the pre-build state.
    let mut l = NodeLedger::new();
    l.acquire(NodeKind::Gain); // persistent master gain
    let before = l.live_total();
    // Shape of a drone pad abandoned mid-way: filter, cutoff LFO
    // (oscillator + depth gain), one complete pair, one bare pair gain.
    let partial = [
        NodeKind::Filter,
        NodeKind::Oscillator,
        NodeKind::Gain,
        NodeKind::Gain,
        NodeKind::Oscillator,
        NodeKind::Oscillator,
        NodeKind::Gain,
    ];
    for k in partial {
        l.acquire(k);
    }
    assert!(l.live_total() > before);
    for k in partial {
        l.release(k);
    }
    assert_eq!(l.live_total(), before, "aborted build left nodes live");
}

#[test]
fn release_saturates_at_zero() {
    let mut l = NodeLedger::new();
    l.acquire(NodeKind::Panner);
    l.release(NodeKind::Panner);
    // Double disposal must stay harmless.
    l.release(NodeKind::Panner);
    assert_eq!(l.live(NodeKind::Panner), 0);
    assert_eq!(l.live_total(), 0);
}

#[test]
fn counts_are_tracked_per_kind() {
    let mut l = NodeLedger::new();
    l.acquire(NodeKind::Oscillator);
    l.acquire(NodeKind::Oscillator);
    l.acquire(NodeKind::Filter);
    assert_eq!(l.live(NodeKind::Oscillator), 2);
    assert_eq!(l.live(NodeKind::Filter), 1);
    assert_eq!(l.live(NodeKind::Delay), 0);
    l.release(NodeKind::Oscillator);
    assert_eq!(l.live(NodeKind::Oscillator), 1);
    assert_eq!(l.live_total(), 2);
}
