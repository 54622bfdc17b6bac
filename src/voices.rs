//! Shimmer voice execution: turns pool commands into oscillator/gain/panner
//! subgraphs on the shimmer bus. The pool decides timing; this module only
//! builds, ramps, and disposes nodes.

use crate::core::NodeLedger;
use crate::nodes::{
    create_gain, create_oscillator, create_stereo_panner, dispose_gain, dispose_oscillator,
    dispose_panner,
};
use web_sys as web;

pub struct ShimmerVoice {
    osc: web::OscillatorNode,
    gain: web::GainNode,
    panner: web::StereoPannerNode,
}

pub fn spawn_voice(
    audio_ctx: &web::AudioContext,
    bus: &web::GainNode,
    freq_hz: f32,
    fade_sec: f64,
    target_gain: f32,
    pan: f32,
    ledger: &mut NodeLedger,
) -> Result<ShimmerVoice, ()> {
    let osc = create_oscillator(
        audio_ctx,
        web::OscillatorType::Sine,
        freq_hz,
        "shimmer",
        ledger,
    )?;
    let gain = match create_gain(audio_ctx, 0.0, "shimmer gain", ledger) {
        Ok(g) => g,
        Err(()) => {
            dispose_oscillator(&osc, ledger);
            return Err(());
        }
    };
    let panner = match create_stereo_panner(audio_ctx, pan, "shimmer pan", ledger) {
        Ok(p) => p,
        Err(()) => {
            dispose_gain(&gain, ledger);
            dispose_oscillator(&osc, ledger);
            return Err(());
        }
    };

    _ = osc.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(&panner);
    _ = panner.connect_with_audio_node(bus);

    let now = audio_ctx.current_time();
    _ = gain
        .gain()
        .linear_ramp_to_value_at_time(target_gain, now + fade_sec);
    _ = osc.start();
    Ok(ShimmerVoice { osc, gain, panner })
}

impl ShimmerVoice {
    pub fn release(&self, audio_ctx: &web::AudioContext, fade_sec: f64) {
        let now = audio_ctx.current_time();
        let current = self.gain.gain().value();
        _ = self.gain.gain().cancel_scheduled_values(now);
        self.gain.gain().set_value(current);
        _ = self.gain.gain().linear_ramp_to_value_at_time(0.0, now + fade_sec);
    }

    pub fn dispose(&self, ledger: &mut NodeLedger) {
        dispose_oscillator(&self.osc, ledger);
        dispose_gain(&self.gain, ledger);
        dispose_panner(&self.panner, ledger);
    }
}
