// Host-side tests for pitch helpers and effect scales.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod music {
    include!("../src/core/music.rs");
}

use constants::*;
use music::*;

#[test]
fn midi_to_hz_matches_a4_and_octave() {
    let a4 = midi_to_hz(69.0);
    assert!((a4 - 440.0).abs() < 1e-4);
    let a5 = midi_to_hz(81.0);
    assert!((a5 - 880.0).abs() < 1e-3);
    assert!((a5 / a4 - 2.0).abs() < 1e-4);
}

#[test]
fn midi_to_hz_is_monotonic_over_range() {
    let mut prev = midi_to_hz(20.0);
    for m in 21..=100 {
        let f = midi_to_hz(m as f32);
        assert!(f > prev, "frequency not increasing at midi {m}");
        prev = f;
    }
}

#[test]
fn five_connections_draw_five_distinct_pitches() {
    // A five-star constellation walks the six-note scale without wrapping.
    let pitches: Vec<f32> = (0..5).map(|i| connection_pitch(i, 5).0).collect();
    for i in 0..pitches.len() {
        for j in (i + 1)..pitches.len() {
            assert_ne!(pitches[i], pitches[j], "pitches {i} and {j} collide");
        }
        assert!(CONNECTION_SCALE_HZ.contains(&pitches[i]));
    }
}

#[test]
fn connection_pitch_wraps_modulo_scale_length() {
    let n = CONNECTION_SCALE_HZ.len();
    for i in 0..3 * n {
        let (freq, _) = connection_pitch(i, 3 * n);
        assert_eq!(freq, CONNECTION_SCALE_HZ[i % n]);
    }
}

#[test]
fn connection_velocity_rises_toward_completion() {
    let total = 8;
    let mut prev = 0.0_f32;
    for i in 0..total {
        let (_, vel) = connection_pitch(i, total);
        assert!(vel > prev, "velocity dipped at connection {i}");
        assert!(vel <= 1.0 + 1e-6);
        prev = vel;
    }
    let (_, last) = connection_pitch(total - 1, total);
    assert!((last - 1.0).abs() < 1e-6, "final connection should peak");
}

#[test]
fn connection_pitch_handles_degenerate_totals() {
    let (freq, vel) = connection_pitch(0, 1);
    assert_eq!(freq, CONNECTION_SCALE_HZ[0]);
    assert_eq!(vel, 1.0);
    // total == 0 should not divide by zero
    let (_, vel) = connection_pitch(2, 0);
    assert!(vel.is_finite());
}

#[test]
fn one_shot_envelope_is_anchored_to_its_start() {
    // Notes staggered into the future keep their attack and decay lengths
    // measured from their own start, not from when they were queued.
    for step in 0..4 {
        let start = 10.0 + step as f64 * CHIME_STAGGER_SEC;
        let env = OneShotEnvelope {
            start_sec: start,
            attack_sec: 0.02,
            decay_sec: CHIME_DECAY_SEC,
        };
        assert_eq!(env.anchor_sec(), start);
        assert!((env.peak_sec() - env.anchor_sec() - 0.02).abs() < 1e-12);
        assert!((env.floor_sec() - env.peak_sec() - CHIME_DECAY_SEC).abs() < 1e-9);
    }
}

#[test]
fn envelope_breakpoints_are_strictly_ordered() {
    let env = OneShotEnvelope {
        start_sec: 1.0,
        attack_sec: 0.005,
        decay_sec: 0.3,
    };
    assert!(env.anchor_sec() < env.peak_sec());
    assert!(env.peak_sec() < env.floor_sec());
    assert!(env.floor_sec() < env.stop_sec());
}

#[test]
fn sparkle_voice_count_scales_with_intensity() {
    assert_eq!(sparkle_voice_count(0.0), SPARKLE_MIN_VOICES);
    assert_eq!(sparkle_voice_count(1.0), SPARKLE_MAX_VOICES);
    let mut prev = sparkle_voice_count(0.0);
    for i in 1..=10 {
        let v = sparkle_voice_count(i as f32 / 10.0);
        assert!(v >= prev, "voice count dipped at intensity {}", i as f32 / 10.0);
        assert!(v <= SPARKLE_MAX_VOICES);
        prev = v;
    }
    // Bad inputs never explode the burst.
    assert_eq!(sparkle_voice_count(f32::NAN), SPARKLE_MIN_VOICES);
    assert_eq!(sparkle_voice_count(5.0), SPARKLE_MAX_VOICES);
    assert_eq!(sparkle_voice_count(-2.0), SPARKLE_MIN_VOICES);
}

#[test]
fn chime_notes_ascend() {
    let mut prev = 0.0_f32;
    for step in 0..chime_note_count() {
        let f = chime_note(step);
        assert!(f > prev, "chime note {step} does not ascend");
        prev = f;
    }
    // Wrapping past the end stays on the scale.
    assert_eq!(chime_note(chime_note_count()), chime_note(0));
}
