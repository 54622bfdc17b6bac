//! One-shot effect synthesizer.
//!
//! Each effect is a pure function: build an ephemeral subgraph into the
//! master output, schedule its envelope and an absolute-time stop, and keep
//! no references. Stopped sources unhook themselves; the ledger is not
//! involved because nothing here outlives its scheduled stop.
//!
//! Exponential ramps cannot target zero, so every decay lands on
//! `RAMP_EPSILON` before the source stops.

use crate::core::constants::*;
use crate::core::music::{
    chime_note, chime_note_count, connection_pitch, sparkle_voice_count, OneShotEnvelope,
};
use rand::prelude::*;
use web_sys as web;

fn one_shot_tone(
    audio_ctx: &web::AudioContext,
    out: &web::GainNode,
    kind: web::OscillatorType,
    freq_hz: f32,
    peak: f32,
    start_sec: f64,
    attack_sec: f64,
    decay_sec: f64,
) -> Option<web::OscillatorNode> {
    let points = OneShotEnvelope {
        start_sec,
        attack_sec,
        decay_sec,
    };
    let src = web::OscillatorNode::new(audio_ctx).ok()?;
    src.set_type(kind);
    src.frequency().set_value(freq_hz);
    let env = web::GainNode::new(audio_ctx).ok()?;
    env.gain().set_value(0.0);
    _ = env.gain().set_value_at_time(0.0, points.anchor_sec());
    _ = env
        .gain()
        .linear_ramp_to_value_at_time(peak, points.peak_sec());
    _ = env
        .gain()
        .exponential_ramp_to_value_at_time(RAMP_EPSILON, points.floor_sec());
    _ = src.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(out);
    _ = src.start_with_when(points.anchor_sec());
    _ = src.stop_with_when(points.stop_sec());
    Some(src)
}

fn noise_burst(
    audio_ctx: &web::AudioContext,
    out: &web::GainNode,
    seconds: f32,
    filter_hz: f32,
    peak: f32,
    start_sec: f64,
    decay_sec: f64,
) {
    let sr = audio_ctx.sample_rate();
    let len = (sr * seconds) as u32;
    let buffer = match audio_ctx.create_buffer(1, len.max(1), sr) {
        Ok(b) => b,
        Err(_) => return,
    };
    let mut seed: u32 = 0x51F1_5EED;
    let mut samples: Vec<f32> = vec![0.0; len.max(1) as usize];
    for s in samples.iter_mut() {
        let mut x = seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        seed = x;
        *s = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
    }
    _ = buffer.copy_to_channel(&mut samples, 0);

    let src = match web::AudioBufferSourceNode::new(audio_ctx) {
        Ok(s) => s,
        Err(_) => return,
    };
    src.set_buffer(Some(&buffer));
    let filter = match web::BiquadFilterNode::new(audio_ctx) {
        Ok(f) => f,
        Err(_) => return,
    };
    filter.set_type(web::BiquadFilterType::Highpass);
    filter.frequency().set_value(filter_hz);
    let env = match web::GainNode::new(audio_ctx) {
        Ok(g) => g,
        Err(_) => return,
    };
    env.gain().set_value(0.0);
    _ = env.gain().set_value_at_time(0.0, start_sec);
    _ = env.gain().linear_ramp_to_value_at_time(peak, start_sec + 0.01);
    _ = env
        .gain()
        .exponential_ramp_to_value_at_time(RAMP_EPSILON, start_sec + decay_sec);
    _ = src.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&env);
    _ = env.connect_with_audio_node(out);
    _ = src.start_with_when(start_sec);
    _ = src.stop_with_when(start_sec + decay_sec + 0.05);
}

/// Bright discovery flash: a swept sine pair over an airy noise lift.
pub fn play_cosmic_flash(audio_ctx: &web::AudioContext, out: &web::GainNode) {
    let t0 = audio_ctx.current_time() + 0.005;
    if let Some(src) = one_shot_tone(
        audio_ctx,
        out,
        web::OscillatorType::Sine,
        880.0,
        0.14,
        t0,
        0.01,
        FLASH_DECAY_SEC,
    ) {
        _ = src
            .frequency()
            .exponential_ramp_to_value_at_time(1760.0, t0 + FLASH_DECAY_SEC * 0.5);
    }
    if let Some(src) = one_shot_tone(
        audio_ctx,
        out,
        web::OscillatorType::Sine,
        1320.0,
        0.07,
        t0 + 0.02,
        0.01,
        FLASH_DECAY_SEC * 0.8,
    ) {
        _ = src
            .frequency()
            .exponential_ramp_to_value_at_time(2640.0, t0 + FLASH_DECAY_SEC * 0.5);
    }
    noise_burst(audio_ctx, out, 0.4, 3000.0, 0.05, t0, 0.5);
}

/// Four ascending notes staggered into an arpeggio.
pub fn play_completion_chime(audio_ctx: &web::AudioContext, out: &web::GainNode) {
    let t0 = audio_ctx.current_time() + 0.005;
    for step in 0..chime_note_count() {
        let start = t0 + step as f64 * CHIME_STAGGER_SEC;
        _ = one_shot_tone(
            audio_ctx,
            out,
            web::OscillatorType::Sine,
            chime_note(step),
            0.12,
            start,
            0.02,
            CHIME_DECAY_SEC,
        );
    }
}

/// Short pluck for a star-to-star connection; pitch walks the fixed scale
/// and a quiet octave harmonic lands just behind the fundamental.
pub fn play_star_connection(
    audio_ctx: &web::AudioContext,
    out: &web::GainNode,
    index: usize,
    total: usize,
) {
    let (freq, velocity) = connection_pitch(index, total);
    let t0 = audio_ctx.current_time() + 0.005;
    _ = one_shot_tone(
        audio_ctx,
        out,
        web::OscillatorType::Triangle,
        freq,
        0.12 * velocity,
        t0,
        0.005,
        PLUCK_DECAY_SEC,
    );
    _ = one_shot_tone(
        audio_ctx,
        out,
        web::OscillatorType::Sine,
        freq * 2.0,
        0.04 * velocity,
        t0 + PLUCK_HARMONIC_OFFSET_SEC,
        0.005,
        PLUCK_DECAY_SEC * 0.8,
    );
}

/// Low, downward-bent tone for a wrong guess.
pub fn play_error_tone(audio_ctx: &web::AudioContext, out: &web::GainNode) {
    let t0 = audio_ctx.current_time() + 0.005;
    if let Some(src) = one_shot_tone(
        audio_ctx,
        out,
        web::OscillatorType::Square,
        ERROR_START_HZ,
        0.06,
        t0,
        0.01,
        ERROR_DECAY_SEC,
    ) {
        _ = src
            .frequency()
            .linear_ramp_to_value_at_time(ERROR_END_HZ, t0 + ERROR_DECAY_SEC);
    }
}

/// Cluster sparkle: a burst of tiny high voices scattered over a short
/// window, denser with intensity, over a hiss of filtered noise. The engine
/// owns the RNG so the scatter pattern is reproducible for a given seed.
pub fn play_cluster_sparkle(
    audio_ctx: &web::AudioContext,
    out: &web::GainNode,
    intensity: f32,
    rng: &mut StdRng,
) {
    let voices = sparkle_voice_count(intensity);
    let intensity = intensity.clamp(0.0, 1.0);
    let t0 = audio_ctx.current_time() + 0.005;
    for _ in 0..voices {
        let freq = CONNECTION_SCALE_HZ[rng.gen_range(0..CONNECTION_SCALE_HZ.len())] * 2.0;
        let start = t0 + rng.gen_range(0.0..SPARKLE_WINDOW_SEC);
        _ = one_shot_tone(
            audio_ctx,
            out,
            web::OscillatorType::Sine,
            freq,
            0.02 + 0.03 * intensity,
            start,
            0.005,
            SPARKLE_DECAY_SEC,
        );
    }
    noise_burst(
        audio_ctx,
        out,
        0.3,
        4000.0,
        0.02 + 0.02 * intensity,
        t0,
        SPARKLE_WINDOW_SEC + 0.2,
    );
}
