// Shimmer voice pool state machine.
//
// One slot per configured frequency. Each slot cycles
// Idle -> FadingIn -> Held -> FadingOut -> Idle on randomized timers, but
// the pool never lets more than `max_concurrent` voices sound at once: a
// slot whose turn arrives while the pool is saturated is rescheduled, never
// dropped. The pool only decides; actual node work is emitted as commands
// for the graph layer to execute.

use super::constants::*;
use rand::prelude::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    FadingIn,
    Held,
    FadingOut,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShimmerCommand {
    Spawn {
        slot: usize,
        freq_hz: f32,
        fade_sec: f64,
        gain: f32,
        pan: f32,
    },
    Release {
        slot: usize,
        fade_sec: f64,
    },
    Dispose {
        slot: usize,
    },
}

#[derive(Clone, Debug)]
struct Slot {
    freq_hz: f32,
    state: SlotState,
    due_sec: f64,
    fade_sec: f64,
}

pub struct ShimmerPool {
    slots: Vec<Slot>,
    rng: StdRng,
    active: usize,
    max_concurrent: usize,
    running: bool,
}

impl ShimmerPool {
    pub fn new(freqs: &[f32], max_concurrent: usize, seed: u64) -> Self {
        let slots = freqs
            .iter()
            .map(|&f| Slot {
                freq_hz: f,
                state: SlotState::Idle,
                due_sec: f64::INFINITY,
                fade_sec: 0.0,
            })
            .collect::<Vec<_>>();
        Self {
            slots,
            rng: StdRng::seed_from_u64(seed),
            active: 0,
            max_concurrent,
            running: false,
        }
    }

    /// Schedule every slot with a random initial delay drawn from the hold
    /// range. Idempotent while running.
    pub fn start(&mut self, now_sec: f64) {
        if self.running {
            return;
        }
        self.running = true;
        for i in 0..self.slots.len() {
            let delay = self.rng.gen_range(SHIMMER_HOLD_MIN_SEC..SHIMMER_HOLD_MAX_SEC);
            self.slots[i].state = SlotState::Idle;
            self.slots[i].due_sec = now_sec + delay;
        }
        self.active = 0;
    }

    /// Cancel every pending slot timer. Voices already spawned are the graph
    /// layer's to dispose during teardown; the pool just stops deciding.
    pub fn stop(&mut self) {
        self.running = false;
        self.active = 0;
        for slot in &mut self.slots {
            slot.state = SlotState::Idle;
            slot.due_sec = f64::INFINITY;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Count of voices currently audible or becoming audible.
    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_state(&self, slot: usize) -> SlotState {
        self.slots[slot].state
    }

    pub fn tick(&mut self, now_sec: f64, out: &mut SmallVec<[ShimmerCommand; 4]>) {
        if !self.running {
            return;
        }
        for i in 0..self.slots.len() {
            if self.slots[i].due_sec > now_sec {
                continue;
            }
            match self.slots[i].state {
                SlotState::Idle => {
                    if self.active >= self.max_concurrent {
                        // Saturated: push the turn back rather than dropping it.
                        let delay =
                            self.rng.gen_range(SHIMMER_HOLD_MIN_SEC..SHIMMER_HOLD_MAX_SEC);
                        self.slots[i].due_sec = now_sec + delay;
                        continue;
                    }
                    let fade = self.rng.gen_range(SHIMMER_FADE_MIN_SEC..SHIMMER_FADE_MAX_SEC);
                    let gain = self.rng.gen_range(SHIMMER_GAIN_MIN..SHIMMER_GAIN_MAX);
                    let pan = self.rng.gen_range(-SHIMMER_PAN_SPREAD..SHIMMER_PAN_SPREAD);
                    self.slots[i].state = SlotState::FadingIn;
                    self.slots[i].fade_sec = fade;
                    self.slots[i].due_sec = now_sec + fade;
                    self.active += 1;
                    out.push(ShimmerCommand::Spawn {
                        slot: i,
                        freq_hz: self.slots[i].freq_hz,
                        fade_sec: fade,
                        gain,
                        pan,
                    });
                }
                SlotState::FadingIn => {
                    let hold = self.rng.gen_range(SHIMMER_HOLD_MIN_SEC..SHIMMER_HOLD_MAX_SEC);
                    self.slots[i].state = SlotState::Held;
                    self.slots[i].due_sec = now_sec + hold;
                }
                SlotState::Held => {
                    let fade = self.slots[i].fade_sec;
                    self.slots[i].state = SlotState::FadingOut;
                    self.slots[i].due_sec = now_sec + fade;
                    out.push(ShimmerCommand::Release { slot: i, fade_sec: fade });
                }
                SlotState::FadingOut => {
                    let delay = self.rng.gen_range(SHIMMER_HOLD_MIN_SEC..SHIMMER_HOLD_MAX_SEC);
                    self.slots[i].state = SlotState::Idle;
                    self.slots[i].due_sec = now_sec + delay;
                    self.active = self.active.saturating_sub(1);
                    out.push(ShimmerCommand::Dispose { slot: i });
                }
            }
        }
    }
}
