use super::constants::{
    CHIME_NOTES_HZ, CONNECTION_SCALE_HZ, SPARKLE_MAX_VOICES, SPARKLE_MIN_VOICES,
};

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Pitch and loudness for the star-connection pluck.
///
/// Pitches walk a fixed six-note scale, wrapping via `index % scale.len()`;
/// the velocity rises as the constellation nears completion so the final
/// connection lands with the most weight.
pub fn connection_pitch(index: usize, total: usize) -> (f32, f32) {
    let freq = CONNECTION_SCALE_HZ[index % CONNECTION_SCALE_HZ.len()];
    let velocity = if total > 1 {
        0.5 + 0.5 * (index.min(total - 1) as f32 + 1.0) / total as f32
    } else {
        1.0
    };
    (freq, velocity)
}

/// Notes of the four-note completion chime, lowest first.
pub fn chime_note(step: usize) -> f32 {
    CHIME_NOTES_HZ[step % CHIME_NOTES_HZ.len()]
}

pub fn chime_note_count() -> usize {
    CHIME_NOTES_HZ.len()
}

/// Voice count for a cluster sparkle at the given intensity.
pub fn sparkle_voice_count(intensity: f32) -> usize {
    let intensity = if intensity.is_finite() {
        intensity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    SPARKLE_MIN_VOICES + ((SPARKLE_MAX_VOICES - SPARKLE_MIN_VOICES) as f32 * intensity) as usize
}

/// Breakpoints of a one-shot envelope, all in absolute context time.
///
/// The gain is pinned to zero at `anchor_sec` before the attack ramp begins;
/// without that anchor a ramp measures from the moment of scheduling, so a
/// note staggered into the future would stretch its attack across the wait.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OneShotEnvelope {
    pub start_sec: f64,
    pub attack_sec: f64,
    pub decay_sec: f64,
}

impl OneShotEnvelope {
    pub fn anchor_sec(&self) -> f64 {
        self.start_sec
    }

    pub fn peak_sec(&self) -> f64 {
        self.start_sec + self.attack_sec
    }

    pub fn floor_sec(&self) -> f64 {
        self.start_sec + self.attack_sec + self.decay_sec
    }

    /// Source stop, just past the decay floor.
    pub fn stop_sec(&self) -> f64 {
        self.floor_sec() + 0.05
    }
}
