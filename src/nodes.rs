//! Primitive factory for WebAudio nodes.
//!
//! Every constructor threads the [`NodeLedger`] so the engine can account for
//! live nodes across a session; failures are logged and surfaced as `Err(())`
//! for the caller to bail on.

use crate::core::{NodeKind, NodeLedger};
use web_sys as web;

pub fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            ledger.acquire(NodeKind::Gain);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn create_oscillator(
    audio_ctx: &web::AudioContext,
    kind: web::OscillatorType,
    freq_hz: f32,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::OscillatorNode, ()> {
    match web::OscillatorNode::new(audio_ctx) {
        Ok(osc) => {
            osc.set_type(kind);
            osc.frequency().set_value(freq_hz);
            ledger.acquire(NodeKind::Oscillator);
            Ok(osc)
        }
        Err(e) => {
            log::error!("{} OscillatorNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn create_filter(
    audio_ctx: &web::AudioContext,
    kind: web::BiquadFilterType,
    freq_hz: f32,
    q: f32,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::BiquadFilterNode, ()> {
    match web::BiquadFilterNode::new(audio_ctx) {
        Ok(f) => {
            f.set_type(kind);
            f.frequency().set_value(freq_hz);
            f.q().set_value(q);
            ledger.acquire(NodeKind::Filter);
            Ok(f)
        }
        Err(e) => {
            log::error!("{} BiquadFilterNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn create_stereo_panner(
    audio_ctx: &web::AudioContext,
    pan: f32,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::StereoPannerNode, ()> {
    match web::StereoPannerNode::new(audio_ctx) {
        Ok(p) => {
            p.pan().set_value(pan);
            ledger.acquire(NodeKind::Panner);
            Ok(p)
        }
        Err(e) => {
            log::error!("{} StereoPannerNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn create_delay(
    audio_ctx: &web::AudioContext,
    delay_sec: f64,
    max_delay_sec: f64,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::DelayNode, ()> {
    match audio_ctx.create_delay_with_max_delay_time(max_delay_sec) {
        Ok(d) => {
            d.delay_time().set_value(delay_sec as f32);
            ledger.acquire(NodeKind::Delay);
            Ok(d)
        }
        Err(e) => {
            log::error!("{} DelayNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn create_channel_merger(
    audio_ctx: &web::AudioContext,
    inputs: u32,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::ChannelMergerNode, ()> {
    match audio_ctx.create_channel_merger_with_number_of_inputs(inputs) {
        Ok(m) => {
            ledger.acquire(NodeKind::Merger);
            Ok(m)
        }
        Err(e) => {
            log::error!("{} ChannelMergerNode error: {:?}", label, e);
            Err(())
        }
    }
}

/// Generate a looping white-noise buffer with a deterministic xorshift32
/// stream, so the texture layer needs no sampled material.
pub fn create_noise_buffer(
    audio_ctx: &web::AudioContext,
    seconds: f32,
) -> Result<web::AudioBuffer, ()> {
    let sr = audio_ctx.sample_rate();
    let len = (sr * seconds) as u32;
    let buffer = audio_ctx.create_buffer(1, len, sr).map_err(|e| {
        log::error!("noise AudioBuffer error: {:?}", e);
    })?;
    let mut seed: u32 = 0x9D2C_5680;
    let mut samples: Vec<f32> = vec![0.0; len as usize];
    for s in samples.iter_mut() {
        let mut x = seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        seed = x;
        *s = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
    }
    _ = buffer.copy_to_channel(&mut samples, 0);
    Ok(buffer)
}

pub fn create_noise_source(
    audio_ctx: &web::AudioContext,
    buffer: &web::AudioBuffer,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<web::AudioBufferSourceNode, ()> {
    match web::AudioBufferSourceNode::new(audio_ctx) {
        Ok(src) => {
            src.set_buffer(Some(buffer));
            src.set_loop(true);
            ledger.acquire(NodeKind::NoiseSource);
            Ok(src)
        }
        Err(e) => {
            log::error!("{} AudioBufferSourceNode error: {:?}", label, e);
            Err(())
        }
    }
}

// Disposal counterparts to the constructors above. Builders call these on
// their error paths too, so stop is attempted even for sources that never
// started and every failure is swallowed.

pub fn dispose_oscillator(osc: &web::OscillatorNode, ledger: &mut NodeLedger) {
    _ = osc.stop();
    _ = osc.disconnect();
    ledger.release(NodeKind::Oscillator);
}

pub fn dispose_gain(gain: &web::GainNode, ledger: &mut NodeLedger) {
    _ = gain.disconnect();
    ledger.release(NodeKind::Gain);
}

pub fn dispose_filter(filter: &web::BiquadFilterNode, ledger: &mut NodeLedger) {
    _ = filter.disconnect();
    ledger.release(NodeKind::Filter);
}

pub fn dispose_panner(panner: &web::StereoPannerNode, ledger: &mut NodeLedger) {
    _ = panner.disconnect();
    ledger.release(NodeKind::Panner);
}

pub fn dispose_delay(delay: &web::DelayNode, ledger: &mut NodeLedger) {
    _ = delay.disconnect();
    ledger.release(NodeKind::Delay);
}

pub fn dispose_merger(merger: &web::ChannelMergerNode, ledger: &mut NodeLedger) {
    _ = merger.disconnect();
    ledger.release(NodeKind::Merger);
}

pub fn dispose_noise_source(src: &web::AudioBufferSourceNode, ledger: &mut NodeLedger) {
    _ = src.stop();
    _ = src.disconnect();
    ledger.release(NodeKind::NoiseSource);
}

/// A low-frequency oscillator wired through a depth gain into a target
/// `AudioParam`, sweeping it within [min, max] around the midpoint.
pub struct Lfo {
    pub osc: web::OscillatorNode,
    pub depth: web::GainNode,
}

impl Lfo {
    pub fn dispose(&self, ledger: &mut NodeLedger) {
        dispose_oscillator(&self.osc, ledger);
        dispose_gain(&self.depth, ledger);
    }
}

pub fn create_lfo(
    audio_ctx: &web::AudioContext,
    rate_hz: f32,
    min: f32,
    max: f32,
    target: &web::AudioParam,
    label: &str,
    ledger: &mut NodeLedger,
) -> Result<Lfo, ()> {
    let osc = create_oscillator(
        audio_ctx,
        web::OscillatorType::Sine,
        rate_hz,
        label,
        ledger,
    )?;
    let depth = match create_gain(audio_ctx, (max - min) * 0.5, label, ledger) {
        Ok(g) => g,
        Err(()) => {
            dispose_oscillator(&osc, ledger);
            return Err(());
        }
    };
    target.set_value((min + max) * 0.5);
    _ = osc.connect_with_audio_node(&depth);
    _ = depth.connect_with_audio_param(target);
    _ = osc.start();
    Ok(Lfo { osc, depth })
}
