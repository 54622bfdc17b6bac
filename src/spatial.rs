//! Stereo feedback delay network for spatial diffusion.
//!
//! Two independent delay -> low-pass -> feedback loops with different base
//! times, tapped into a two-input channel merger and mixed back into the
//! ambient master at a low wet level. Feedback gains stay strictly below 1.0
//! so looped energy decays; the goal is smear, not echo.

use crate::core::constants::*;
use crate::core::NodeLedger;
use crate::nodes::{
    create_channel_merger, create_delay, create_filter, create_gain, dispose_delay,
    dispose_filter, dispose_gain, dispose_merger,
};
use web_sys as web;

pub struct SpatialNetwork {
    pub input: web::GainNode,
    pub delays: [web::DelayNode; 2],
    pub tones: [web::BiquadFilterNode; 2],
    pub feedbacks: [web::GainNode; 2],
    pub merger: web::ChannelMergerNode,
    pub wet: web::GainNode,
}

pub fn build_spatial_network(
    audio_ctx: &web::AudioContext,
    source: &web::AudioNode,
    ambient_master: &web::GainNode,
    ledger: &mut NodeLedger,
) -> Result<SpatialNetwork, ()> {
    debug_assert!(SPATIAL_FEEDBACK_LEFT < 1.0 && SPATIAL_FEEDBACK_RIGHT < 1.0);

    let input = create_gain(audio_ctx, 1.0, "spatial in", ledger)?;
    let merger = match create_channel_merger(audio_ctx, 2, "spatial merge", ledger) {
        Ok(m) => m,
        Err(()) => {
            dispose_gain(&input, ledger);
            return Err(());
        }
    };
    let wet = match create_gain(audio_ctx, SPATIAL_WET_LEVEL, "spatial wet", ledger) {
        Ok(g) => g,
        Err(()) => {
            dispose_merger(&merger, ledger);
            dispose_gain(&input, ledger);
            return Err(());
        }
    };

    let params = [
        (SPATIAL_DELAY_LEFT_SEC, SPATIAL_TONE_LEFT_HZ, SPATIAL_FEEDBACK_LEFT),
        (
            SPATIAL_DELAY_RIGHT_SEC,
            SPATIAL_TONE_RIGHT_HZ,
            SPATIAL_FEEDBACK_RIGHT,
        ),
    ];
    let mut delays: Vec<web::DelayNode> = Vec::with_capacity(2);
    let mut tones: Vec<web::BiquadFilterNode> = Vec::with_capacity(2);
    let mut feedbacks: Vec<web::GainNode> = Vec::with_capacity(2);

    let mut failed = false;
    'loops: for (ch, (delay_sec, tone_hz, feedback)) in params.into_iter().enumerate() {
        let delay = match create_delay(
            audio_ctx,
            delay_sec,
            SPATIAL_MAX_DELAY_SEC,
            "spatial delay",
            ledger,
        ) {
            Ok(d) => d,
            Err(()) => {
                failed = true;
                break 'loops;
            }
        };
        let tone = match create_filter(
            audio_ctx,
            web::BiquadFilterType::Lowpass,
            tone_hz,
            0.7,
            "spatial tone",
            ledger,
        ) {
            Ok(f) => f,
            Err(()) => {
                dispose_delay(&delay, ledger);
                failed = true;
                break 'loops;
            }
        };
        let fb = match create_gain(audio_ctx, feedback, "spatial feedback", ledger) {
            Ok(g) => g,
            Err(()) => {
                dispose_filter(&tone, ledger);
                dispose_delay(&delay, ledger);
                failed = true;
                break 'loops;
            }
        };

        _ = input.connect_with_audio_node(&delay);
        _ = delay.connect_with_audio_node(&tone);
        _ = tone.connect_with_audio_node(&fb);
        _ = fb.connect_with_audio_node(&delay);
        _ = tone.connect_with_audio_node_and_output_and_input(&merger, 0, ch as u32);

        delays.push(delay);
        tones.push(tone);
        feedbacks.push(fb);
    }
    if failed {
        for d in &delays {
            dispose_delay(d, ledger);
        }
        for t in &tones {
            dispose_filter(t, ledger);
        }
        for f in &feedbacks {
            dispose_gain(f, ledger);
        }
        dispose_gain(&wet, ledger);
        dispose_merger(&merger, ledger);
        dispose_gain(&input, ledger);
        return Err(());
    }

    _ = merger.connect_with_audio_node(&wet);
    _ = wet.connect_with_audio_node(ambient_master);
    _ = source.connect_with_audio_node(&input);

    Ok(SpatialNetwork {
        input,
        delays: [delays.remove(0), delays.remove(0)],
        tones: [tones.remove(0), tones.remove(0)],
        feedbacks: [feedbacks.remove(0), feedbacks.remove(0)],
        merger,
        wet,
    })
}

impl SpatialNetwork {
    pub fn dispose(&self, ledger: &mut NodeLedger) {
        dispose_gain(&self.input, ledger);
        for d in &self.delays {
            dispose_delay(d, ledger);
        }
        for t in &self.tones {
            dispose_filter(t, ledger);
        }
        for f in &self.feedbacks {
            dispose_gain(f, ledger);
        }
        dispose_merger(&self.merger, ledger);
        dispose_gain(&self.wet, ledger);
    }
}
