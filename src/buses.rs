//! Summing buses and the master filter chain for the ambient session.
//!
//! Four category buses feed a high-pass -> low-pass pair into the ambient
//! master gain, which is the only node that fades on session start/stop.

use crate::core::constants::*;
use crate::core::NodeLedger;
use crate::nodes::{create_filter, create_gain, dispose_filter, dispose_gain};
use web_sys as web;

pub struct AmbientBuses {
    pub sub_bass: web::GainNode,
    pub drone: web::GainNode,
    pub texture: web::GainNode,
    pub shimmer: web::GainNode,
    pub highpass: web::BiquadFilterNode,
    pub lowpass: web::BiquadFilterNode,
    pub ambient_master: web::GainNode,
}

pub fn build_ambient_buses(
    audio_ctx: &web::AudioContext,
    master_gain: &web::GainNode,
    ledger: &mut NodeLedger,
) -> Result<AmbientBuses, ()> {
    let levels = [
        (SUB_BASS_BUS_LEVEL, "sub-bass bus"),
        (DRONE_BUS_LEVEL, "drone bus"),
        (TEXTURE_BUS_LEVEL, "texture bus"),
        (SHIMMER_BUS_LEVEL, "shimmer bus"),
    ];
    let mut buses: Vec<web::GainNode> = Vec::with_capacity(levels.len());
    for (level, label) in levels {
        match create_gain(audio_ctx, level, label, ledger) {
            Ok(g) => buses.push(g),
            Err(()) => {
                for g in &buses {
                    dispose_gain(g, ledger);
                }
                return Err(());
            }
        }
    }

    let highpass = match create_filter(
        audio_ctx,
        web::BiquadFilterType::Highpass,
        MASTER_HIGHPASS_HZ,
        0.7,
        "master highpass",
        ledger,
    ) {
        Ok(f) => f,
        Err(()) => {
            for g in &buses {
                dispose_gain(g, ledger);
            }
            return Err(());
        }
    };
    let lowpass = match create_filter(
        audio_ctx,
        web::BiquadFilterType::Lowpass,
        MASTER_LOWPASS_HZ,
        0.7,
        "master lowpass",
        ledger,
    ) {
        Ok(f) => f,
        Err(()) => {
            dispose_filter(&highpass, ledger);
            for g in &buses {
                dispose_gain(g, ledger);
            }
            return Err(());
        }
    };

    // Session fade-in starts from silence.
    let ambient_master = match create_gain(audio_ctx, 0.0, "ambient master", ledger) {
        Ok(g) => g,
        Err(()) => {
            dispose_filter(&lowpass, ledger);
            dispose_filter(&highpass, ledger);
            for g in &buses {
                dispose_gain(g, ledger);
            }
            return Err(());
        }
    };

    for bus in &buses {
        _ = bus.connect_with_audio_node(&highpass);
    }
    _ = highpass.connect_with_audio_node(&lowpass);
    _ = lowpass.connect_with_audio_node(&ambient_master);
    _ = ambient_master.connect_with_audio_node(master_gain);

    Ok(AmbientBuses {
        sub_bass: buses.remove(0),
        drone: buses.remove(0),
        texture: buses.remove(0),
        shimmer: buses.remove(0),
        highpass,
        lowpass,
        ambient_master,
    })
}

impl AmbientBuses {
    pub fn dispose(&self, ledger: &mut NodeLedger) {
        for g in [
            &self.sub_bass,
            &self.drone,
            &self.texture,
            &self.shimmer,
            &self.ambient_master,
        ] {
            dispose_gain(g, ledger);
        }
        dispose_filter(&self.highpass, ledger);
        dispose_filter(&self.lowpass, ledger);
    }
}
