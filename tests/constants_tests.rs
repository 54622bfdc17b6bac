// Host-side tests for tuning constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn fades_and_levels_are_within_bounds() {
    assert!(AMBIENT_FADE_IN_SEC > 0.0);
    assert!(AMBIENT_FADE_OUT_SEC > 0.0);
    assert!(DRONE_STOP_FADE_SEC > 0.0);
    assert!(AMBIENT_TARGET_LEVEL > 0.0 && AMBIENT_TARGET_LEVEL <= 1.0);
    assert!(MASTER_LEVEL > 0.0 && MASTER_LEVEL <= 1.0);
    for level in [
        SUB_BASS_BUS_LEVEL,
        DRONE_BUS_LEVEL,
        TEXTURE_BUS_LEVEL,
        SHIMMER_BUS_LEVEL,
    ] {
        assert!(level > 0.0 && level <= 1.0);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn feedback_gains_guarantee_decay() {
    assert!((0.0..1.0).contains(&SPATIAL_FEEDBACK_LEFT));
    assert!((0.0..1.0).contains(&SPATIAL_FEEDBACK_RIGHT));
}

#[test]
fn loop_energy_decays_geometrically() {
    // After k round trips the loop carries at most A * g^k, which must fall
    // below audibility in bounded time for both channels.
    for g in [SPATIAL_FEEDBACK_LEFT, SPATIAL_FEEDBACK_RIGHT] {
        let amplitude = 1.0_f32;
        let mut energy = amplitude;
        let mut prev = f32::INFINITY;
        for k in 1..=64 {
            energy *= g;
            assert!(energy < prev, "loop energy not decreasing at trip {k}");
            assert!((energy - amplitude * g.powi(k)).abs() < 1e-5);
            prev = energy;
        }
        assert!(energy < RAMP_EPSILON, "loop still audible after 64 trips");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shimmer_ranges_are_ordered() {
    assert!(SHIMMER_HOLD_MIN_SEC < SHIMMER_HOLD_MAX_SEC);
    assert!(SHIMMER_FADE_MIN_SEC < SHIMMER_FADE_MAX_SEC);
    assert!(SHIMMER_GAIN_MIN < SHIMMER_GAIN_MAX);
    assert!(SHIMMER_PAN_SPREAD > 0.0 && SHIMMER_PAN_SPREAD <= 1.0);
    assert!(SHIMMER_MAX_CONCURRENT >= 1);
    assert!(SHIMMER_MAX_CONCURRENT < SHIMMER_FREQS.len());
}

#[test]
fn shimmer_frequencies_are_positive_and_ascending() {
    let mut prev = 0.0_f32;
    for &f in SHIMMER_FREQS {
        assert!(f > prev);
        prev = f;
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn exponential_ramp_floor_is_small_but_nonzero() {
    assert!(RAMP_EPSILON > 0.0, "exponential ramps cannot target zero");
    assert!(RAMP_EPSILON < 0.001);
}

#[test]
fn drone_tables_are_consistent() {
    assert_eq!(DRONE_PAIR_HZ.len(), DRONE_PAIR_GAINS.len());
    assert!(DRONE_DETUNE_RATIO > 1.0 && DRONE_DETUNE_RATIO < 1.01);
    assert!(DRONE_FILTER_MIN_HZ < DRONE_FILTER_MAX_HZ);
    assert!(SUB_BASS_WOBBLE_MIN_HZ < SUB_BASS_HZ && SUB_BASS_HZ < SUB_BASS_WOBBLE_MAX_HZ);
}

#[test]
fn spatial_channels_are_decorrelated() {
    assert_ne!(SPATIAL_DELAY_LEFT_SEC, SPATIAL_DELAY_RIGHT_SEC);
    assert!(SPATIAL_DELAY_LEFT_SEC < SPATIAL_MAX_DELAY_SEC);
    assert!(SPATIAL_DELAY_RIGHT_SEC < SPATIAL_MAX_DELAY_SEC);
    // The network is a subtle smear, not an audible echo.
    assert!(SPATIAL_WET_LEVEL <= 0.1);
}

#[test]
fn sparkle_voice_range_is_sane() {
    assert!(SPARKLE_MIN_VOICES >= 1);
    assert!(SPARKLE_MIN_VOICES < SPARKLE_MAX_VOICES);
}
