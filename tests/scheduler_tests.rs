// Host-side tests for the cancellable event scheduler.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scheduler {
    include!("../src/core/scheduler.rs");
}

use scheduler::*;
use smallvec::SmallVec;

#[test]
fn due_events_fire_in_time_order() {
    let mut s = Scheduler::new();
    s.schedule(3.0, EngineEvent::DisposeNebula);
    s.schedule(1.0, EngineEvent::TeardownAmbient);
    s.schedule(2.0, EngineEvent::DisposeBuildUp);

    let mut out: SmallVec<[EngineEvent; 4]> = SmallVec::new();
    s.poll(5.0, &mut out);
    assert_eq!(
        out.as_slice(),
        &[
            EngineEvent::TeardownAmbient,
            EngineEvent::DisposeBuildUp,
            EngineEvent::DisposeNebula
        ]
    );
    assert_eq!(s.pending(), 0);
}

#[test]
fn poll_only_drains_due_entries() {
    let mut s = Scheduler::new();
    s.schedule(1.0, EngineEvent::TeardownAmbient);
    s.schedule(10.0, EngineEvent::DisposeBuildUp);

    let mut out: SmallVec<[EngineEvent; 4]> = SmallVec::new();
    s.poll(1.0, &mut out);
    assert_eq!(out.as_slice(), &[EngineEvent::TeardownAmbient]);
    assert_eq!(s.pending(), 1);

    out.clear();
    s.poll(2.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn cancel_prevents_firing() {
    let mut s = Scheduler::new();
    let id = s.schedule(1.0, EngineEvent::TeardownAmbient);
    s.schedule(1.5, EngineEvent::DisposeNebula);
    s.cancel(id);

    let mut out: SmallVec<[EngineEvent; 4]> = SmallVec::new();
    s.poll(5.0, &mut out);
    assert_eq!(out.as_slice(), &[EngineEvent::DisposeNebula]);
}

#[test]
fn cancel_of_fired_id_is_harmless() {
    let mut s = Scheduler::new();
    let id = s.schedule(1.0, EngineEvent::DisposeBuildUp);
    let mut out: SmallVec<[EngineEvent; 4]> = SmallVec::new();
    s.poll(2.0, &mut out);
    assert_eq!(out.len(), 1);
    s.cancel(id);
    assert_eq!(s.pending(), 0);
}

#[test]
fn cancel_all_clears_everything() {
    let mut s = Scheduler::new();
    s.schedule(1.0, EngineEvent::TeardownAmbient);
    s.schedule(2.0, EngineEvent::DisposeBuildUp);
    s.cancel_all();
    assert_eq!(s.pending(), 0);

    let mut out: SmallVec<[EngineEvent; 4]> = SmallVec::new();
    s.poll(100.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn timer_ids_are_unique() {
    let mut s = Scheduler::new();
    let a = s.schedule(1.0, EngineEvent::TeardownAmbient);
    let b = s.schedule(1.0, EngineEvent::TeardownAmbient);
    assert_ne!(a, b);
}
