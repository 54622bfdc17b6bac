// Pure mapping from the externally supplied discovery-progress scalar to
// drone automation targets. All gain maps are monotone non-decreasing in
// progress so a higher progress can never sound quieter.

use super::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildUpTargets {
    pub low_hz: f32,
    pub mid_hz: f32,
    pub high_hz: f32,
    pub low_gain: f32,
    pub mid_gain: f32,
    pub high_gain: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaTargets {
    pub base_hz: f32,
    pub fifth_hz: f32,
    pub cutoff_hz: f32,
    pub gain: f32,
}

pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn build_up_targets(progress: f32) -> BuildUpTargets {
    let p = clamp_progress(progress);
    BuildUpTargets {
        low_hz: BUILD_UP_LOW_BASE_HZ + BUILD_UP_LOW_SPAN_HZ * p,
        mid_hz: BUILD_UP_MID_BASE_HZ + BUILD_UP_MID_SPAN_HZ * p,
        // The top voice sweeps on a square curve so it only blooms late.
        high_hz: BUILD_UP_HIGH_BASE_HZ + BUILD_UP_HIGH_SPAN_HZ * p * p,
        low_gain: BUILD_UP_LOW_GAIN_MAX * p,
        mid_gain: BUILD_UP_MID_GAIN_MAX * p * p,
        high_gain: BUILD_UP_HIGH_GAIN_MAX * p * p * p,
    }
}

pub fn nebula_targets(progress: f32) -> NebulaTargets {
    let p = clamp_progress(progress);
    let base = NEBULA_BASE_HZ + NEBULA_PITCH_SPAN_HZ * p;
    NebulaTargets {
        base_hz: base,
        fifth_hz: base * NEBULA_FIFTH_RATIO,
        cutoff_hz: NEBULA_FILTER_BASE_HZ + NEBULA_FILTER_SPAN_HZ * p,
        gain: NEBULA_GAIN_MAX * p,
    }
}
