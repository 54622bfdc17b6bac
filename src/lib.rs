#![cfg(target_arch = "wasm32")]
//! Procedural soundscape engine for the sky-exploration app.
//!
//! Everything is synthesized: a layered ambient bed (sub-bass, drone pad,
//! noise texture, shimmer voices) routed through summing buses and a stereo
//! feedback delay network, plus one-shot effects and progress-coupled drones
//! driven by the hover/discovery state machine. No samples, no decoding; the
//! browser's audio thread renders whatever graph we schedule.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod buses;
mod core;
mod drones;
mod effects;
mod engine;
mod frame;
mod layers;
mod nodes;
mod spatial;
mod voices;

use engine::AudioEngine;

const ENGINE_SEED: u64 = 42;

/// Exported facade consumed by the app shell. All methods are silent no-ops
/// when the audio device is unavailable.
#[wasm_bindgen]
pub struct SkyAudio {
    engine: Rc<RefCell<AudioEngine>>,
    loop_started: Cell<bool>,
}

#[wasm_bindgen]
impl SkyAudio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SkyAudio {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("skysynth starting");
        SkyAudio {
            engine: Rc::new(RefCell::new(AudioEngine::new(ENGINE_SEED))),
            loop_started: Cell::new(false),
        }
    }

    /// Must be called from a user gesture the first time (autoplay policy).
    /// Returns false if the audio device is unavailable; the app stays
    /// playable without sound.
    pub fn ensure_initialized(&self) -> bool {
        let ok = self.engine.borrow_mut().ensure_initialized();
        if ok && !self.loop_started.get() {
            self.loop_started.set(true);
            frame::start_loop(self.engine.clone());
        }
        ok
    }

    pub fn start_ambient(&self) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().start_ambient();
        }
    }

    pub fn stop_ambient(&self) {
        self.engine.borrow_mut().stop_ambient();
    }

    pub fn is_ambient_playing(&self) -> bool {
        self.engine.borrow().is_ambient_playing()
    }

    pub fn play_discovery_build_up(&self, progress: f32) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_discovery_build_up(progress);
        }
    }

    pub fn stop_discovery_build_up(&self) {
        self.engine.borrow_mut().stop_discovery_build_up();
    }

    pub fn play_nebula_drone(&self, progress: f32) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_nebula_drone(progress);
        }
    }

    pub fn stop_nebula_drone(&self) {
        self.engine.borrow_mut().stop_nebula_drone();
    }

    pub fn play_star_connection_sound(&self, index: usize, total: usize) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_star_connection(index, total);
        }
    }

    pub fn play_completion_chime(&self) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_completion_chime();
        }
    }

    pub fn play_cosmic_flash(&self) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_cosmic_flash();
        }
    }

    pub fn play_cluster_sparkle(&self, intensity: f32) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_cluster_sparkle(intensity);
        }
    }

    pub fn play_error_tone(&self) {
        if self.ensure_initialized() {
            self.engine.borrow_mut().play_error_tone();
        }
    }
}

impl Default for SkyAudio {
    fn default() -> Self {
        Self::new()
    }
}
