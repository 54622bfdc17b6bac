//! Progress-coupled drones: continuous sounds whose pitch and loudness track
//! the discovery-progress scalar. Each is built lazily on its first call,
//! retargeted with smoothed transitions on every later call, and disposed
//! only after its stop fade completes (the engine schedules the disposal).

use crate::core::constants::*;
use crate::core::progress::{BuildUpTargets, NebulaTargets};
use crate::core::NodeLedger;
use crate::nodes::{
    create_filter, create_gain, create_oscillator, dispose_filter, dispose_gain,
    dispose_oscillator,
};
use web_sys as web;

fn retarget(param: &web::AudioParam, value: f32, now_sec: f64) {
    _ = param.set_target_at_time(value, now_sec, DRONE_SMOOTHING_TAU_SEC);
}

/// Three persistent voices (low/mid/high) that thicken as progress rises.
pub struct BuildUpDrone {
    oscs: [web::OscillatorNode; 3],
    voice_gains: [web::GainNode; 3],
    master: web::GainNode,
}

pub fn build_build_up(
    audio_ctx: &web::AudioContext,
    out: &web::GainNode,
    targets: &BuildUpTargets,
    ledger: &mut NodeLedger,
) -> Result<BuildUpDrone, ()> {
    let master = create_gain(audio_ctx, 1.0, "build-up master", ledger)?;
    _ = master.connect_with_audio_node(out);

    let freqs = [targets.low_hz, targets.mid_hz, targets.high_hz];
    let mut oscs: Vec<web::OscillatorNode> = Vec::with_capacity(3);
    let mut gains: Vec<web::GainNode> = Vec::with_capacity(3);
    let mut failed = false;
    for freq in freqs {
        let osc = match create_oscillator(
            audio_ctx,
            web::OscillatorType::Sine,
            freq,
            "build-up osc",
            ledger,
        ) {
            Ok(o) => o,
            Err(()) => {
                failed = true;
                break;
            }
        };
        let gain = match create_gain(audio_ctx, 0.0, "build-up gain", ledger) {
            Ok(g) => g,
            Err(()) => {
                dispose_oscillator(&osc, ledger);
                failed = true;
                break;
            }
        };
        _ = osc.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&master);
        oscs.push(osc);
        gains.push(gain);
    }
    if failed {
        for osc in &oscs {
            dispose_oscillator(osc, ledger);
        }
        for g in &gains {
            dispose_gain(g, ledger);
        }
        dispose_gain(&master, ledger);
        return Err(());
    }
    // Voices start only once all three exist.
    for osc in &oscs {
        _ = osc.start();
    }

    Ok(BuildUpDrone {
        oscs: [oscs.remove(0), oscs.remove(0), oscs.remove(0)],
        voice_gains: [gains.remove(0), gains.remove(0), gains.remove(0)],
        master,
    })
}

impl BuildUpDrone {
    pub fn update(&self, audio_ctx: &web::AudioContext, targets: &BuildUpTargets) {
        let now = audio_ctx.current_time();
        retarget(&self.oscs[0].frequency(), targets.low_hz, now);
        retarget(&self.oscs[1].frequency(), targets.mid_hz, now);
        retarget(&self.oscs[2].frequency(), targets.high_hz, now);
        retarget(&self.voice_gains[0].gain(), targets.low_gain, now);
        retarget(&self.voice_gains[1].gain(), targets.mid_gain, now);
        retarget(&self.voice_gains[2].gain(), targets.high_gain, now);
    }

    /// Begin the stop fade; the caller schedules disposal for after it.
    pub fn begin_stop(&self, audio_ctx: &web::AudioContext) {
        let now = audio_ctx.current_time();
        let current = self.master.gain().value();
        _ = self.master.gain().cancel_scheduled_values(now);
        self.master.gain().set_value(current);
        _ = self
            .master
            .gain()
            .linear_ramp_to_value_at_time(0.0, now + DRONE_STOP_FADE_SEC);
    }

    /// Revive a drone whose stop fade was pending; the next `update`
    /// retargets the voice gains from there.
    pub fn cancel_stop(&self, audio_ctx: &web::AudioContext) {
        let now = audio_ctx.current_time();
        _ = self.master.gain().cancel_scheduled_values(now);
        retarget(&self.master.gain(), 1.0, now);
    }

    pub fn dispose(&self, ledger: &mut NodeLedger) {
        for osc in &self.oscs {
            dispose_oscillator(osc, ledger);
        }
        for g in &self.voice_gains {
            dispose_gain(g, ledger);
        }
        dispose_gain(&self.master, ledger);
    }
}

/// Secondary drone for nebula-class objects: base + fifth through a
/// low-pass that opens with progress.
pub struct NebulaDrone {
    base: web::OscillatorNode,
    fifth: web::OscillatorNode,
    filter: web::BiquadFilterNode,
    master: web::GainNode,
}

pub fn build_nebula(
    audio_ctx: &web::AudioContext,
    out: &web::GainNode,
    targets: &NebulaTargets,
    ledger: &mut NodeLedger,
) -> Result<NebulaDrone, ()> {
    let filter = create_filter(
        audio_ctx,
        web::BiquadFilterType::Lowpass,
        targets.cutoff_hz,
        1.0,
        "nebula filter",
        ledger,
    )?;
    let master = match create_gain(audio_ctx, 0.0, "nebula master", ledger) {
        Ok(g) => g,
        Err(()) => {
            dispose_filter(&filter, ledger);
            return Err(());
        }
    };
    let base = match create_oscillator(
        audio_ctx,
        web::OscillatorType::Sawtooth,
        targets.base_hz,
        "nebula base",
        ledger,
    ) {
        Ok(o) => o,
        Err(()) => {
            dispose_gain(&master, ledger);
            dispose_filter(&filter, ledger);
            return Err(());
        }
    };
    let fifth = match create_oscillator(
        audio_ctx,
        web::OscillatorType::Sine,
        targets.fifth_hz,
        "nebula fifth",
        ledger,
    ) {
        Ok(o) => o,
        Err(()) => {
            dispose_oscillator(&base, ledger);
            dispose_gain(&master, ledger);
            dispose_filter(&filter, ledger);
            return Err(());
        }
    };
    _ = base.connect_with_audio_node(&filter);
    _ = fifth.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&master);
    _ = master.connect_with_audio_node(out);
    _ = base.start();
    _ = fifth.start();
    Ok(NebulaDrone {
        base,
        fifth,
        filter,
        master,
    })
}

impl NebulaDrone {
    pub fn update(&self, audio_ctx: &web::AudioContext, targets: &NebulaTargets) {
        let now = audio_ctx.current_time();
        retarget(&self.base.frequency(), targets.base_hz, now);
        retarget(&self.fifth.frequency(), targets.fifth_hz, now);
        retarget(&self.filter.frequency(), targets.cutoff_hz, now);
        retarget(&self.master.gain(), targets.gain, now);
    }

    pub fn begin_stop(&self, audio_ctx: &web::AudioContext) {
        let now = audio_ctx.current_time();
        let current = self.master.gain().value();
        _ = self.master.gain().cancel_scheduled_values(now);
        self.master.gain().set_value(current);
        _ = self
            .master
            .gain()
            .linear_ramp_to_value_at_time(0.0, now + DRONE_STOP_FADE_SEC);
    }

    /// The master gain here tracks progress directly, so reviving only needs
    /// the pending fade cancelled before the next retarget.
    pub fn cancel_stop(&self, audio_ctx: &web::AudioContext) {
        let now = audio_ctx.current_time();
        _ = self.master.gain().cancel_scheduled_values(now);
    }

    pub fn dispose(&self, ledger: &mut NodeLedger) {
        for osc in [&self.base, &self.fifth] {
            dispose_oscillator(osc, ledger);
        }
        dispose_filter(&self.filter, ledger);
        dispose_gain(&self.master, ledger);
    }
}
