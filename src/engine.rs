//! Graph context and ambient lifecycle controller.
//!
//! `AudioEngine` owns the lazily created `AudioContext`, the master output
//! gain, and every optional handle of the current ambient session. Sessions
//! are built in a fixed order (buses -> spatial network -> layers -> shimmer
//! pool), faded in, and torn down only after the fade-out completes, with all
//! pending timers cancelled before any node is disposed.

use crate::buses::{build_ambient_buses, AmbientBuses};
use crate::core::constants::*;
use crate::core::progress::{build_up_targets, clamp_progress, nebula_targets};
use crate::core::scheduler::{EngineEvent, Scheduler, TimerId};
use crate::core::shimmer::{ShimmerCommand, ShimmerPool};
use crate::core::NodeLedger;
use crate::drones::{build_build_up, build_nebula, BuildUpDrone, NebulaDrone};
use crate::effects;
use crate::layers::{
    build_drone, build_sub_bass, build_texture, DroneLayer, SubBassLayer, TextureLayer,
};
use crate::nodes::create_gain;
use crate::spatial::{build_spatial_network, SpatialNetwork};
use crate::voices::{spawn_voice, ShimmerVoice};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use web_sys as web;

fn init_context() -> anyhow::Result<web::AudioContext> {
    web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext error: {:?}", e))
}

pub struct AudioEngine {
    audio_ctx: Option<web::AudioContext>,
    master_gain: Option<web::GainNode>,
    device_unavailable: bool,
    playing: bool,

    buses: Option<AmbientBuses>,
    spatial: Option<SpatialNetwork>,
    sub_bass: Option<SubBassLayer>,
    drone: Option<DroneLayer>,
    texture: Option<TextureLayer>,

    shimmer_pool: ShimmerPool,
    shimmer_voices: Vec<Option<ShimmerVoice>>,
    effects_rng: StdRng,

    scheduler: Scheduler,
    teardown_timer: Option<TimerId>,

    build_up: Option<BuildUpDrone>,
    build_up_dispose: Option<TimerId>,
    nebula: Option<NebulaDrone>,
    nebula_dispose: Option<TimerId>,

    ledger: NodeLedger,
}

impl AudioEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            audio_ctx: None,
            master_gain: None,
            device_unavailable: false,
            playing: false,
            buses: None,
            spatial: None,
            sub_bass: None,
            drone: None,
            texture: None,
            shimmer_pool: ShimmerPool::new(SHIMMER_FREQS, SHIMMER_MAX_CONCURRENT, seed),
            shimmer_voices: Vec::new(),
            // Decorrelated from the pool's stream so the two never walk in step.
            effects_rng: StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            scheduler: Scheduler::new(),
            teardown_timer: None,
            build_up: None,
            build_up_dispose: None,
            nebula: None,
            nebula_dispose: None,
            ledger: NodeLedger::new(),
        }
    }

    /// Idempotent: creates the context on first call (must happen after a
    /// user gesture), resumes it if the browser suspended it, and returns
    /// false forever once construction has failed. The app keeps running
    /// silently in that case.
    pub fn ensure_initialized(&mut self) -> bool {
        if self.device_unavailable {
            return false;
        }
        if let Some(ctx) = &self.audio_ctx {
            if ctx.state() == web::AudioContextState::Suspended {
                _ = ctx.resume();
            }
            return true;
        }
        let ctx = match init_context() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("audio unavailable: {e}");
                self.device_unavailable = true;
                return false;
            }
        };
        _ = ctx.resume();
        let master = match create_gain(&ctx, MASTER_LEVEL, "master", &mut self.ledger) {
            Ok(g) => g,
            Err(()) => {
                self.device_unavailable = true;
                return false;
            }
        };
        _ = master.connect_with_audio_node(&ctx.destination());
        self.audio_ctx = Some(ctx);
        self.master_gain = Some(master);
        log::info!("audio context initialized");
        true
    }

    pub fn is_ambient_playing(&self) -> bool {
        self.playing
    }

    pub fn live_node_count(&self) -> usize {
        self.ledger.live_total()
    }

    pub fn start_ambient(&mut self) {
        if !self.ensure_initialized() || self.playing {
            return;
        }
        // A session stopped moments ago may still be waiting on its fade-out
        // teardown; finish that first so the rebuild starts clean.
        if self.teardown_timer.is_some() {
            self.teardown_ambient();
        }
        let (Some(ctx), Some(master)) = (self.audio_ctx.clone(), self.master_gain.clone()) else {
            return;
        };

        let buses = match build_ambient_buses(&ctx, &master, &mut self.ledger) {
            Ok(b) => b,
            Err(()) => return,
        };
        let spatial = match build_spatial_network(&ctx, &buses.lowpass, &buses.ambient_master, &mut self.ledger) {
            Ok(s) => s,
            Err(()) => {
                buses.dispose(&mut self.ledger);
                return;
            }
        };
        let sub_bass = match build_sub_bass(&ctx, &buses.sub_bass, &mut self.ledger) {
            Ok(l) => l,
            Err(()) => {
                spatial.dispose(&mut self.ledger);
                buses.dispose(&mut self.ledger);
                return;
            }
        };
        let drone = match build_drone(&ctx, &buses.drone, &mut self.ledger) {
            Ok(l) => l,
            Err(()) => {
                sub_bass.dispose(&mut self.ledger);
                spatial.dispose(&mut self.ledger);
                buses.dispose(&mut self.ledger);
                return;
            }
        };
        let texture = match build_texture(&ctx, &buses.texture, &mut self.ledger) {
            Ok(l) => l,
            Err(()) => {
                drone.dispose(&mut self.ledger);
                sub_bass.dispose(&mut self.ledger);
                spatial.dispose(&mut self.ledger);
                buses.dispose(&mut self.ledger);
                return;
            }
        };

        let now = ctx.current_time();
        let gain = buses.ambient_master.gain();
        gain.set_value(0.0);
        _ = gain.linear_ramp_to_value_at_time(AMBIENT_TARGET_LEVEL, now + AMBIENT_FADE_IN_SEC);

        self.shimmer_voices = (0..self.shimmer_pool.slot_count()).map(|_| None).collect();
        self.shimmer_pool.start(now);

        self.buses = Some(buses);
        self.spatial = Some(spatial);
        self.sub_bass = Some(sub_bass);
        self.drone = Some(drone);
        self.texture = Some(texture);
        self.playing = true;
        log::info!("ambient session started");
    }

    pub fn stop_ambient(&mut self) {
        if !self.playing {
            return;
        }
        let Some(ctx) = self.audio_ctx.clone() else {
            return;
        };
        self.playing = false;
        let now = ctx.current_time();
        if let Some(buses) = &self.buses {
            let gain = buses.ambient_master.gain();
            let current = gain.value();
            _ = gain.cancel_scheduled_values(now);
            gain.set_value(current);
            _ = gain.linear_ramp_to_value_at_time(0.0, now + AMBIENT_FADE_OUT_SEC);
        }
        // No shimmer timer may fire once the stop begins.
        self.shimmer_pool.stop();
        let id = self
            .scheduler
            .schedule(now + AMBIENT_FADE_OUT_SEC, EngineEvent::TeardownAmbient);
        self.teardown_timer = Some(id);
        log::info!("ambient session stopping");
    }

    /// Full graph teardown: cancel timers first, then stop and disconnect
    /// every node the session created. Safe against double disposal.
    fn teardown_ambient(&mut self) {
        if let Some(id) = self.teardown_timer.take() {
            self.scheduler.cancel(id);
        }
        self.shimmer_pool.stop();
        for voice in std::mem::take(&mut self.shimmer_voices).into_iter().flatten() {
            voice.dispose(&mut self.ledger);
        }
        if let Some(l) = self.sub_bass.take() {
            l.dispose(&mut self.ledger);
        }
        if let Some(l) = self.drone.take() {
            l.dispose(&mut self.ledger);
        }
        if let Some(l) = self.texture.take() {
            l.dispose(&mut self.ledger);
        }
        if let Some(s) = self.spatial.take() {
            s.dispose(&mut self.ledger);
        }
        if let Some(b) = self.buses.take() {
            b.dispose(&mut self.ledger);
        }
        log::debug!(
            "ambient session torn down, {} nodes still live",
            self.ledger.live_total()
        );
    }

    /// Frame-driven pump: executes due shimmer pool commands and scheduler
    /// events against the audio clock.
    pub fn tick(&mut self) {
        let Some(ctx) = self.audio_ctx.clone() else {
            return;
        };
        let now = ctx.current_time();

        let mut commands: SmallVec<[ShimmerCommand; 4]> = SmallVec::new();
        self.shimmer_pool.tick(now, &mut commands);
        for command in commands {
            match command {
                ShimmerCommand::Spawn {
                    slot,
                    freq_hz,
                    fade_sec,
                    gain,
                    pan,
                } => {
                    if let Some(buses) = &self.buses {
                        if let Ok(voice) = spawn_voice(
                            &ctx,
                            &buses.shimmer,
                            freq_hz,
                            fade_sec,
                            gain,
                            pan,
                            &mut self.ledger,
                        ) {
                            if let Some(slot_ref) = self.shimmer_voices.get_mut(slot) {
                                *slot_ref = Some(voice);
                            }
                        }
                    }
                }
                ShimmerCommand::Release { slot, fade_sec } => {
                    if let Some(Some(voice)) = self.shimmer_voices.get(slot) {
                        voice.release(&ctx, fade_sec);
                    }
                }
                ShimmerCommand::Dispose { slot } => {
                    if let Some(slot_ref) = self.shimmer_voices.get_mut(slot) {
                        if let Some(voice) = slot_ref.take() {
                            voice.dispose(&mut self.ledger);
                        }
                    }
                }
            }
        }

        let mut events: SmallVec<[EngineEvent; 4]> = SmallVec::new();
        self.scheduler.poll(now, &mut events);
        for event in events {
            match event {
                EngineEvent::TeardownAmbient => self.teardown_ambient(),
                EngineEvent::DisposeBuildUp => {
                    self.build_up_dispose = None;
                    if let Some(d) = self.build_up.take() {
                        d.dispose(&mut self.ledger);
                    }
                }
                EngineEvent::DisposeNebula => {
                    self.nebula_dispose = None;
                    if let Some(d) = self.nebula.take() {
                        d.dispose(&mut self.ledger);
                    }
                }
            }
        }
    }

    // ---------------- progress-coupled drones ----------------

    pub fn play_discovery_build_up(&mut self, progress: f32) {
        if !self.ensure_initialized() {
            return;
        }
        let (Some(ctx), Some(master)) = (self.audio_ctx.clone(), self.master_gain.clone()) else {
            return;
        };
        let p = clamp_progress(progress);
        let targets = build_up_targets(p);
        match &self.build_up {
            None => {
                if p <= BUILD_UP_START_THRESHOLD {
                    return;
                }
                if let Ok(d) = build_build_up(&ctx, &master, &targets, &mut self.ledger) {
                    d.update(&ctx, &targets);
                    self.build_up = Some(d);
                }
            }
            Some(d) => {
                // A retarget while the stop fade is pending revives the drone.
                if let Some(id) = self.build_up_dispose.take() {
                    self.scheduler.cancel(id);
                    d.cancel_stop(&ctx);
                }
                d.update(&ctx, &targets);
            }
        }
    }

    pub fn stop_discovery_build_up(&mut self) {
        let Some(ctx) = self.audio_ctx.clone() else {
            return;
        };
        if let Some(d) = &self.build_up {
            if self.build_up_dispose.is_some() {
                return;
            }
            d.begin_stop(&ctx);
            let at = ctx.current_time() + DRONE_STOP_FADE_SEC;
            self.build_up_dispose = Some(self.scheduler.schedule(at, EngineEvent::DisposeBuildUp));
        }
    }

    pub fn play_nebula_drone(&mut self, progress: f32) {
        if !self.ensure_initialized() {
            return;
        }
        let (Some(ctx), Some(master)) = (self.audio_ctx.clone(), self.master_gain.clone()) else {
            return;
        };
        let p = clamp_progress(progress);
        let targets = nebula_targets(p);
        match &self.nebula {
            None => {
                if p <= NEBULA_START_THRESHOLD {
                    return;
                }
                if let Ok(d) = build_nebula(&ctx, &master, &targets, &mut self.ledger) {
                    d.update(&ctx, &targets);
                    self.nebula = Some(d);
                }
            }
            Some(d) => {
                if let Some(id) = self.nebula_dispose.take() {
                    self.scheduler.cancel(id);
                    d.cancel_stop(&ctx);
                }
                d.update(&ctx, &targets);
            }
        }
    }

    pub fn stop_nebula_drone(&mut self) {
        let Some(ctx) = self.audio_ctx.clone() else {
            return;
        };
        if let Some(d) = &self.nebula {
            if self.nebula_dispose.is_some() {
                return;
            }
            d.begin_stop(&ctx);
            let at = ctx.current_time() + DRONE_STOP_FADE_SEC;
            self.nebula_dispose = Some(self.scheduler.schedule(at, EngineEvent::DisposeNebula));
        }
    }

    // ---------------- one-shot effects ----------------

    fn one_shot_target(&mut self) -> Option<(web::AudioContext, web::GainNode)> {
        if !self.ensure_initialized() {
            return None;
        }
        match (self.audio_ctx.clone(), self.master_gain.clone()) {
            (Some(ctx), Some(master)) => Some((ctx, master)),
            _ => None,
        }
    }

    pub fn play_cosmic_flash(&mut self) {
        if let Some((ctx, master)) = self.one_shot_target() {
            effects::play_cosmic_flash(&ctx, &master);
        }
    }

    pub fn play_completion_chime(&mut self) {
        if let Some((ctx, master)) = self.one_shot_target() {
            effects::play_completion_chime(&ctx, &master);
        }
    }

    pub fn play_star_connection(&mut self, index: usize, total: usize) {
        if let Some((ctx, master)) = self.one_shot_target() {
            effects::play_star_connection(&ctx, &master, index, total);
        }
    }

    pub fn play_error_tone(&mut self) {
        if let Some((ctx, master)) = self.one_shot_target() {
            effects::play_error_tone(&ctx, &master);
        }
    }

    pub fn play_cluster_sparkle(&mut self, intensity: f32) {
        if let Some((ctx, master)) = self.one_shot_target() {
            effects::play_cluster_sparkle(&ctx, &master, intensity, &mut self.effects_rng);
        }
    }
}
