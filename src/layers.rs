//! Continuous ambient layers: sub-bass, drone pad, and noise texture.
//!
//! Each layer builds its full subgraph into its bus and starts its sources
//! only once every node exists; a failure partway through releases whatever
//! was already created, so a failed build never leaks into the ledger. The
//! lifecycle controller owns start/stop, so layers only expose disposal.

use crate::core::constants::*;
use crate::core::NodeLedger;
use crate::nodes::{
    create_channel_merger, create_filter, create_gain, create_lfo, create_noise_buffer,
    create_noise_source, create_oscillator, dispose_filter, dispose_gain, dispose_merger,
    dispose_noise_source, dispose_oscillator, Lfo,
};
use web_sys as web;

pub struct SubBassLayer {
    osc: web::OscillatorNode,
    wobble: Lfo,
    gain: web::GainNode,
}

pub fn build_sub_bass(
    audio_ctx: &web::AudioContext,
    bus: &web::GainNode,
    ledger: &mut NodeLedger,
) -> Result<SubBassLayer, ()> {
    let osc = create_oscillator(
        audio_ctx,
        web::OscillatorType::Sine,
        SUB_BASS_HZ,
        "sub-bass",
        ledger,
    )?;
    let wobble = match create_lfo(
        audio_ctx,
        SUB_BASS_WOBBLE_RATE_HZ,
        SUB_BASS_WOBBLE_MIN_HZ,
        SUB_BASS_WOBBLE_MAX_HZ,
        &osc.frequency(),
        "sub-bass wobble",
        ledger,
    ) {
        Ok(l) => l,
        Err(()) => {
            dispose_oscillator(&osc, ledger);
            return Err(());
        }
    };
    let gain = match create_gain(audio_ctx, SUB_BASS_GAIN, "sub-bass gain", ledger) {
        Ok(g) => g,
        Err(()) => {
            wobble.dispose(ledger);
            dispose_oscillator(&osc, ledger);
            return Err(());
        }
    };
    _ = osc.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(bus);
    _ = osc.start();
    Ok(SubBassLayer { osc, wobble, gain })
}

impl SubBassLayer {
    pub fn dispose(&self, ledger: &mut NodeLedger) {
        dispose_oscillator(&self.osc, ledger);
        self.wobble.dispose(ledger);
        dispose_gain(&self.gain, ledger);
    }
}

/// Harmonic pad: detuned oscillator pairs summed into a shared resonant
/// low-pass whose cutoff wanders between two bounds.
pub struct DroneLayer {
    oscs: Vec<web::OscillatorNode>,
    pair_gains: Vec<web::GainNode>,
    filter: web::BiquadFilterNode,
    cutoff_lfo: Lfo,
}

pub fn build_drone(
    audio_ctx: &web::AudioContext,
    bus: &web::GainNode,
    ledger: &mut NodeLedger,
) -> Result<DroneLayer, ()> {
    let filter = create_filter(
        audio_ctx,
        web::BiquadFilterType::Lowpass,
        DRONE_FILTER_MIN_HZ,
        DRONE_FILTER_Q,
        "drone filter",
        ledger,
    )?;
    let cutoff_lfo = match create_lfo(
        audio_ctx,
        DRONE_FILTER_LFO_RATE_HZ,
        DRONE_FILTER_MIN_HZ,
        DRONE_FILTER_MAX_HZ,
        &filter.frequency(),
        "drone cutoff",
        ledger,
    ) {
        Ok(l) => l,
        Err(()) => {
            dispose_filter(&filter, ledger);
            return Err(());
        }
    };

    let mut oscs: Vec<web::OscillatorNode> = Vec::new();
    let mut pair_gains: Vec<web::GainNode> = Vec::new();
    let mut failed = false;
    'pairs: for (i, &base_hz) in DRONE_PAIR_HZ.iter().enumerate() {
        let level = DRONE_PAIR_GAINS[i % DRONE_PAIR_GAINS.len()];
        let pair_gain = match create_gain(audio_ctx, level, "drone pair", ledger) {
            Ok(g) => g,
            Err(()) => {
                failed = true;
                break;
            }
        };
        _ = pair_gain.connect_with_audio_node(&filter);
        pair_gains.push(pair_gain);
        for freq in [base_hz, base_hz * DRONE_DETUNE_RATIO] {
            let osc = match create_oscillator(
                audio_ctx,
                web::OscillatorType::Triangle,
                freq,
                "drone osc",
                ledger,
            ) {
                Ok(o) => o,
                Err(()) => {
                    failed = true;
                    break 'pairs;
                }
            };
            if let Some(pair_gain) = pair_gains.last() {
                _ = osc.connect_with_audio_node(pair_gain);
            }
            oscs.push(osc);
        }
    }
    let layer = DroneLayer {
        oscs,
        pair_gains,
        filter,
        cutoff_lfo,
    };
    if failed {
        layer.dispose(ledger);
        return Err(());
    }
    _ = layer.filter.connect_with_audio_node(bus);
    // Sources start only once the whole pad exists.
    for osc in &layer.oscs {
        _ = osc.start();
    }
    Ok(layer)
}

impl DroneLayer {
    pub fn dispose(&self, ledger: &mut NodeLedger) {
        for osc in &self.oscs {
            dispose_oscillator(osc, ledger);
        }
        for g in &self.pair_gains {
            dispose_gain(g, ledger);
        }
        dispose_filter(&self.filter, ledger);
        self.cutoff_lfo.dispose(ledger);
    }
}

/// Wandering "air": looping generated noise split into two differently tuned
/// band-pass chains whose centers drift in opposite phase.
pub struct TextureLayer {
    source: web::AudioBufferSourceNode,
    highpasses: [web::BiquadFilterNode; 2],
    bandpasses: [web::BiquadFilterNode; 2],
    lfo_osc: web::OscillatorNode,
    lfo_depths: [web::GainNode; 2],
    merger: web::ChannelMergerNode,
    gain: web::GainNode,
}

pub fn build_texture(
    audio_ctx: &web::AudioContext,
    bus: &web::GainNode,
    ledger: &mut NodeLedger,
) -> Result<TextureLayer, ()> {
    let buffer = create_noise_buffer(audio_ctx, TEXTURE_NOISE_SECONDS)?;
    let source = create_noise_source(audio_ctx, &buffer, "texture noise", ledger)?;
    let merger = match create_channel_merger(audio_ctx, 2, "texture merge", ledger) {
        Ok(m) => m,
        Err(()) => {
            dispose_noise_source(&source, ledger);
            return Err(());
        }
    };
    let gain = match create_gain(audio_ctx, TEXTURE_GAIN, "texture gain", ledger) {
        Ok(g) => g,
        Err(()) => {
            dispose_merger(&merger, ledger);
            dispose_noise_source(&source, ledger);
            return Err(());
        }
    };
    let lfo_osc = match create_oscillator(
        audio_ctx,
        web::OscillatorType::Sine,
        TEXTURE_LFO_RATE_HZ,
        "texture lfo",
        ledger,
    ) {
        Ok(o) => o,
        Err(()) => {
            dispose_gain(&gain, ledger);
            dispose_merger(&merger, ledger);
            dispose_noise_source(&source, ledger);
            return Err(());
        }
    };

    let centers = [TEXTURE_BAND_LEFT_HZ, TEXTURE_BAND_RIGHT_HZ];
    let depths = [TEXTURE_LFO_DEPTH_LEFT_HZ, TEXTURE_LFO_DEPTH_RIGHT_HZ];
    let mut highpasses: Vec<web::BiquadFilterNode> = Vec::with_capacity(2);
    let mut bandpasses: Vec<web::BiquadFilterNode> = Vec::with_capacity(2);
    let mut lfo_depths: Vec<web::GainNode> = Vec::with_capacity(2);
    let mut failed = false;

    'channels: for ch in 0..2 {
        let hp = match create_filter(
            audio_ctx,
            web::BiquadFilterType::Highpass,
            TEXTURE_HIGHPASS_HZ,
            0.7,
            "texture highpass",
            ledger,
        ) {
            Ok(f) => f,
            Err(()) => {
                failed = true;
                break 'channels;
            }
        };
        let bp = match create_filter(
            audio_ctx,
            web::BiquadFilterType::Bandpass,
            centers[ch],
            TEXTURE_BAND_Q,
            "texture bandpass",
            ledger,
        ) {
            Ok(f) => f,
            Err(()) => {
                dispose_filter(&hp, ledger);
                failed = true;
                break 'channels;
            }
        };
        // A negative depth on one side keeps the two centers moving apart.
        let depth = match create_gain(audio_ctx, depths[ch], "texture lfo depth", ledger) {
            Ok(g) => g,
            Err(()) => {
                dispose_filter(&bp, ledger);
                dispose_filter(&hp, ledger);
                failed = true;
                break 'channels;
            }
        };
        _ = lfo_osc.connect_with_audio_node(&depth);
        _ = depth.connect_with_audio_param(&bp.frequency());
        _ = source.connect_with_audio_node(&hp);
        _ = hp.connect_with_audio_node(&bp);
        _ = bp.connect_with_audio_node_and_output_and_input(&merger, 0, ch as u32);

        highpasses.push(hp);
        bandpasses.push(bp);
        lfo_depths.push(depth);
    }
    if failed {
        for f in highpasses.iter().chain(bandpasses.iter()) {
            dispose_filter(f, ledger);
        }
        for d in &lfo_depths {
            dispose_gain(d, ledger);
        }
        dispose_oscillator(&lfo_osc, ledger);
        dispose_gain(&gain, ledger);
        dispose_merger(&merger, ledger);
        dispose_noise_source(&source, ledger);
        return Err(());
    }

    _ = merger.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(bus);
    _ = lfo_osc.start();
    _ = source.start();

    Ok(TextureLayer {
        source,
        highpasses: [highpasses.remove(0), highpasses.remove(0)],
        bandpasses: [bandpasses.remove(0), bandpasses.remove(0)],
        lfo_osc,
        lfo_depths: [lfo_depths.remove(0), lfo_depths.remove(0)],
        merger,
        gain,
    })
}

impl TextureLayer {
    pub fn dispose(&self, ledger: &mut NodeLedger) {
        dispose_noise_source(&self.source, ledger);
        for f in self.highpasses.iter().chain(self.bandpasses.iter()) {
            dispose_filter(f, ledger);
        }
        dispose_oscillator(&self.lfo_osc, ledger);
        for d in &self.lfo_depths {
            dispose_gain(d, ledger);
        }
        dispose_merger(&self.merger, ledger);
        dispose_gain(&self.gain, ledger);
    }
}
