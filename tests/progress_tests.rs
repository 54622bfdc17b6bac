// Host-side tests for the progress -> drone-target mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod progress {
    include!("../src/core/progress.rs");
}

use constants::*;
use progress::*;

fn progress_grid() -> impl Iterator<Item = f32> {
    (0..=100).map(|i| i as f32 / 100.0)
}

#[test]
fn build_up_gains_are_monotone_in_progress() {
    let mut prev = build_up_targets(0.0);
    for p in progress_grid().skip(1) {
        let t = build_up_targets(p);
        assert!(t.low_gain >= prev.low_gain, "low gain dipped at p={p}");
        assert!(t.mid_gain >= prev.mid_gain, "mid gain dipped at p={p}");
        assert!(t.high_gain >= prev.high_gain, "high gain dipped at p={p}");
        prev = t;
    }
}

#[test]
fn build_up_frequencies_rise_with_progress() {
    let mut prev = build_up_targets(0.0);
    for p in progress_grid().skip(1) {
        let t = build_up_targets(p);
        assert!(t.low_hz >= prev.low_hz);
        assert!(t.mid_hz >= prev.mid_hz);
        assert!(t.high_hz >= prev.high_hz);
        prev = t;
    }
}

#[test]
fn build_up_is_silent_at_zero_progress() {
    let t = build_up_targets(0.0);
    assert_eq!(t.low_gain, 0.0);
    assert_eq!(t.mid_gain, 0.0);
    assert_eq!(t.high_gain, 0.0);
}

#[test]
fn nebula_gain_and_cutoff_are_monotone() {
    let mut prev = nebula_targets(0.0);
    for p in progress_grid().skip(1) {
        let t = nebula_targets(p);
        assert!(t.gain >= prev.gain, "nebula gain dipped at p={p}");
        assert!(t.cutoff_hz >= prev.cutoff_hz);
        prev = t;
    }
}

#[test]
fn nebula_fifth_tracks_base() {
    for p in progress_grid() {
        let t = nebula_targets(p);
        let ratio = t.fifth_hz / t.base_hz;
        assert!((ratio - NEBULA_FIFTH_RATIO).abs() < 1e-5);
    }
}

#[test]
fn progress_is_clamped_to_unit_interval() {
    assert_eq!(clamp_progress(-0.5), 0.0);
    assert_eq!(clamp_progress(1.5), 1.0);
    assert_eq!(clamp_progress(0.25), 0.25);
    assert_eq!(clamp_progress(f32::NAN), 0.0);
    assert_eq!(clamp_progress(f32::INFINITY), 0.0);

    // Out-of-range inputs map to the clamped targets, never beyond.
    assert_eq!(build_up_targets(2.0), build_up_targets(1.0));
    assert_eq!(nebula_targets(-1.0), nebula_targets(0.0));
}
