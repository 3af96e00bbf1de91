//! What the page scripts need to reproduce the models in the browser.
//!
//! The handlers serialise these into a `<script type="application/json">`
//! block, so the pages run on the same numbers and text pools as the state
//! machines in this module.

use std::time::Duration;

use serde::Serialize;

use super::card;
use super::copy::{PICKUP_LINES, TAUNTS, YES_TEASE_LINES};
use super::dodge;
use super::flow;
use super::selfie;
use super::spring::{self, SpringConfig};
use super::toast;

fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DodgeSettings {
    pub half_width: f64,
    pub half_height: f64,
    pub edge_margin: f64,
    pub danger_radius: f64,
    pub jump_min: f64,
    pub jump_spread: f64,
    pub jitter: f64,
    pub inward_jump_min: f64,
    pub inward_jump_spread: f64,
    pub inward_jitter: f64,
    pub wall_epsilon: f64,
    pub tilt_degrees: f64,
    pub resting_offset_x: f64,
    pub resting_y_ratio: f64,
    pub position_spring: SpringConfig,
    pub tilt_spring: SpringConfig,
}

impl Default for DodgeSettings {
    fn default() -> Self {
        Self {
            half_width: dodge::HALF_WIDTH,
            half_height: dodge::HALF_HEIGHT,
            edge_margin: dodge::EDGE_MARGIN,
            danger_radius: dodge::DANGER_RADIUS,
            jump_min: dodge::JUMP_MIN,
            jump_spread: dodge::JUMP_SPREAD,
            jitter: dodge::JITTER,
            inward_jump_min: dodge::INWARD_JUMP_MIN,
            inward_jump_spread: dodge::INWARD_JUMP_SPREAD,
            inward_jitter: dodge::INWARD_JITTER,
            wall_epsilon: dodge::WALL_EPSILON,
            tilt_degrees: dodge::TILT_DEGREES,
            resting_offset_x: dodge::RESTING_OFFSET_X,
            resting_y_ratio: dodge::RESTING_Y_RATIO,
            position_spring: spring::ROAMING_POSITION,
            tilt_spring: spring::ROAMING_TILT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub celebration_ms: u64,
    pub celebration_tick_ms: u64,
    pub camera_nudge_ms: u64,
    pub camera_nudge_tick_ms: u64,
    pub completion_ms: u64,
    pub completion_tick_ms: u64,
    pub toast_ms: u64,
    pub max_toasts: usize,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            celebration_ms: millis(flow::CELEBRATION_DURATION),
            celebration_tick_ms: millis(flow::CELEBRATION_TICK),
            camera_nudge_ms: millis(flow::CAMERA_NUDGE_DURATION),
            camera_nudge_tick_ms: millis(flow::CAMERA_NUDGE_TICK),
            completion_ms: millis(flow::COMPLETION_DURATION),
            completion_tick_ms: millis(flow::COMPLETION_TICK),
            toast_ms: millis(toast::TOAST_LIFETIME),
            max_toasts: toast::MAX_VISIBLE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfieSettings {
    pub target_width: u32,
    pub target_height: u32,
    pub probe_width: u32,
    pub probe_height: u32,
    pub probe_interval_ms: u64,
    pub max_wait_ms: u64,
    pub stable_window_ms: u64,
    pub motion_threshold: f64,
    pub sample_stride: usize,
    /// `canvas.toDataURL` takes quality as a 0-1 fraction.
    pub jpeg_quality: f64,
}

impl Default for SelfieSettings {
    fn default() -> Self {
        Self {
            target_width: selfie::TARGET_WIDTH,
            target_height: selfie::TARGET_HEIGHT,
            probe_width: selfie::PROBE_WIDTH,
            probe_height: selfie::PROBE_HEIGHT,
            probe_interval_ms: millis(selfie::PROBE_INTERVAL),
            max_wait_ms: millis(selfie::MAX_WAIT),
            stable_window_ms: millis(selfie::STABLE_WINDOW),
            motion_threshold: selfie::MOTION_THRESHOLD,
            sample_stride: selfie::SAMPLE_STRIDE,
            jpeg_quality: f64::from(selfie::JPEG_QUALITY) / 100.0,
        }
    }
}

/// Settings for `/ask`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSettings {
    pub entry_path: &'static str,
    pub dodge: DodgeSettings,
    pub timers: TimerSettings,
    pub selfie: SelfieSettings,
    pub taunts: &'static [&'static str],
    pub yes_tease_lines: &'static [&'static str],
    pub pickup_lines: &'static [&'static str],
}

impl Default for ExperienceSettings {
    fn default() -> Self {
        Self {
            entry_path: flow::ENTRY_PATH,
            dodge: DodgeSettings::default(),
            timers: TimerSettings::default(),
            selfie: SelfieSettings::default(),
            taunts: &TAUNTS,
            yes_tease_lines: &YES_TEASE_LINES,
            pickup_lines: &PICKUP_LINES,
        }
    }
}

/// Settings for the card on `/`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettings {
    pub button_width: f64,
    pub button_height: f64,
    pub proximity: f64,
    pub spring: SpringConfig,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            button_width: card::BUTTON_WIDTH,
            button_height: card::BUTTON_HEIGHT,
            proximity: card::PROXIMITY,
            spring: spring::CARD_POSITION,
        }
    }
}

/// JSON that is safe to drop inside a `<script>` element: `<` only ever
/// shows up inside strings, where `\u003c` means the same thing.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}
