// Audio tuning constants shared by the graph-building code and host tests.

// Master output and ambient chain
pub const MASTER_LEVEL: f32 = 0.8;
pub const AMBIENT_TARGET_LEVEL: f32 = 0.55;
pub const AMBIENT_FADE_IN_SEC: f64 = 4.0;
pub const AMBIENT_FADE_OUT_SEC: f64 = 2.5;
pub const MASTER_HIGHPASS_HZ: f32 = 30.0;
pub const MASTER_LOWPASS_HZ: f32 = 4200.0;

// Bus levels relative to the ambient master
pub const SUB_BASS_BUS_LEVEL: f32 = 0.5;
pub const DRONE_BUS_LEVEL: f32 = 0.35;
pub const TEXTURE_BUS_LEVEL: f32 = 0.2;
pub const SHIMMER_BUS_LEVEL: f32 = 0.28;

// Sub-bass layer
pub const SUB_BASS_HZ: f32 = 42.0;
pub const SUB_BASS_GAIN: f32 = 0.5;
pub const SUB_BASS_WOBBLE_RATE_HZ: f32 = 0.07;
pub const SUB_BASS_WOBBLE_MIN_HZ: f32 = 40.5;
pub const SUB_BASS_WOBBLE_MAX_HZ: f32 = 43.5;

// Drone pad layer: base frequencies (A1, E2, A2, E3), each doubled by a
// slightly detuned sibling for a chorus effect.
pub const DRONE_PAIR_HZ: &[f32] = &[55.0, 82.41, 110.0, 164.81];
pub const DRONE_DETUNE_RATIO: f32 = 1.004;
pub const DRONE_PAIR_GAINS: &[f32] = &[0.22, 0.16, 0.14, 0.1];
pub const DRONE_FILTER_Q: f32 = 2.2;
pub const DRONE_FILTER_LFO_RATE_HZ: f32 = 0.05;
pub const DRONE_FILTER_MIN_HZ: f32 = 180.0;
pub const DRONE_FILTER_MAX_HZ: f32 = 420.0;

// Texture (air) layer
pub const TEXTURE_NOISE_SECONDS: f32 = 2.0;
pub const TEXTURE_HIGHPASS_HZ: f32 = 900.0;
pub const TEXTURE_BAND_LEFT_HZ: f32 = 1400.0;
pub const TEXTURE_BAND_RIGHT_HZ: f32 = 2100.0;
pub const TEXTURE_BAND_Q: f32 = 1.8;
pub const TEXTURE_LFO_RATE_HZ: f32 = 0.06;
pub const TEXTURE_LFO_DEPTH_LEFT_HZ: f32 = 220.0;
pub const TEXTURE_LFO_DEPTH_RIGHT_HZ: f32 = -260.0; // opposite phase
pub const TEXTURE_GAIN: f32 = 0.6;

// Shimmer voice pool (C major pentatonic from C5)
pub const SHIMMER_FREQS: &[f32] = &[523.25, 587.33, 659.25, 783.99, 880.0, 1046.5];
pub const SHIMMER_MAX_CONCURRENT: usize = 3;
pub const SHIMMER_HOLD_MIN_SEC: f64 = 4.0;
pub const SHIMMER_HOLD_MAX_SEC: f64 = 11.0;
pub const SHIMMER_FADE_MIN_SEC: f64 = 1.5;
pub const SHIMMER_FADE_MAX_SEC: f64 = 3.5;
pub const SHIMMER_GAIN_MIN: f32 = 0.02;
pub const SHIMMER_GAIN_MAX: f32 = 0.06;
pub const SHIMMER_PAN_SPREAD: f32 = 0.8;

// Stereo feedback delay network. Feedback must stay below 1.0 so looped
// energy decays geometrically.
pub const SPATIAL_DELAY_LEFT_SEC: f64 = 0.23;
pub const SPATIAL_DELAY_RIGHT_SEC: f64 = 0.31;
pub const SPATIAL_MAX_DELAY_SEC: f64 = 1.0;
pub const SPATIAL_FEEDBACK_LEFT: f32 = 0.42;
pub const SPATIAL_FEEDBACK_RIGHT: f32 = 0.38;
pub const SPATIAL_TONE_LEFT_HZ: f32 = 1800.0;
pub const SPATIAL_TONE_RIGHT_HZ: f32 = 1500.0;
pub const SPATIAL_WET_LEVEL: f32 = 0.04;

// One-shot effects. Six-note scale used by star-connection plucks (C5 major
// pentatonic plus the octave), indexed modulo its length.
pub const CONNECTION_SCALE_HZ: &[f32] = &[523.25, 587.33, 659.25, 783.99, 880.0, 1046.5];
pub const CHIME_NOTES_HZ: &[f32] = &[523.25, 659.25, 783.99, 1046.5];
pub const CHIME_STAGGER_SEC: f64 = 0.12;
pub const CHIME_DECAY_SEC: f64 = 0.9;
pub const PLUCK_DECAY_SEC: f64 = 0.35;
pub const PLUCK_HARMONIC_OFFSET_SEC: f64 = 0.015;
pub const FLASH_DECAY_SEC: f64 = 1.2;
pub const ERROR_START_HZ: f32 = 196.0;
pub const ERROR_END_HZ: f32 = 174.6;
pub const ERROR_DECAY_SEC: f64 = 0.4;
pub const SPARKLE_WINDOW_SEC: f64 = 0.25;
pub const SPARKLE_DECAY_SEC: f64 = 0.5;
pub const SPARKLE_MIN_VOICES: usize = 3;
pub const SPARKLE_MAX_VOICES: usize = 8;

// Exponential ramps cannot target zero; ramp to this floor instead.
pub const RAMP_EPSILON: f32 = 0.0001;

// Progress-coupled drones
pub const BUILD_UP_START_THRESHOLD: f32 = 0.0;
pub const NEBULA_START_THRESHOLD: f32 = 0.0;
pub const DRONE_SMOOTHING_TAU_SEC: f64 = 0.08;
pub const DRONE_STOP_FADE_SEC: f64 = 0.8;

pub const BUILD_UP_LOW_BASE_HZ: f32 = 55.0;
pub const BUILD_UP_LOW_SPAN_HZ: f32 = 25.0;
pub const BUILD_UP_MID_BASE_HZ: f32 = 110.0;
pub const BUILD_UP_MID_SPAN_HZ: f32 = 110.0;
pub const BUILD_UP_HIGH_BASE_HZ: f32 = 220.0;
pub const BUILD_UP_HIGH_SPAN_HZ: f32 = 440.0;
pub const BUILD_UP_LOW_GAIN_MAX: f32 = 0.18;
pub const BUILD_UP_MID_GAIN_MAX: f32 = 0.12;
pub const BUILD_UP_HIGH_GAIN_MAX: f32 = 0.08;

pub const NEBULA_BASE_HZ: f32 = 73.42; // D2
pub const NEBULA_PITCH_SPAN_HZ: f32 = 18.0;
pub const NEBULA_FIFTH_RATIO: f32 = 1.5;
pub const NEBULA_GAIN_MAX: f32 = 0.16;
pub const NEBULA_FILTER_BASE_HZ: f32 = 240.0;
pub const NEBULA_FILTER_SPAN_HZ: f32 = 900.0;
