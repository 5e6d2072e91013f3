//! Scripted zoom sessions.
//!
//! A replay script is a JSON list of steps (ticks, packets, disconnects) run
//! against a [`ZoomController`]. Each tick yields a [`Frame`], which makes the
//! zoom output reproducible without a game client.

use crate::clock::TickClock;
use crate::constants::*;
use crate::controller::{ZoomController, ZoomHooks};
use crate::input::ZoomInput;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read replay script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid replay script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One scripted step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Run one tick with this input
    Tick(ZoomInput),
    /// Run `count` ticks with the same input
    Repeat { count: u32, input: ZoomInput },
    /// Deliver a control packet
    Message {
        channel: String,
        #[serde(default)]
        payload: Vec<u8>,
    },
    /// Leave the server
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,
    pub steps: Vec<Step>,
}

fn default_ticks_per_second() -> u32 {
    DEFAULT_TICKS_PER_SECOND
}

impl ReplayScript {
    pub fn from_json_str(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Zoom output after one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub active: bool,
    pub alpha: f64,
    pub previous_alpha: f64,
    pub fov_multiplier: f64,
    pub divisor: f64,
}

impl Frame {
    fn capture(controller: &ZoomController) -> Self {
        Self {
            tick: controller.ticks(),
            active: controller.overlay().is_active(),
            alpha: controller.overlay().alpha(),
            previous_alpha: controller.overlay().previous_alpha(),
            fov_multiplier: controller.zoom().fov_multiplier(),
            divisor: controller.zoom().divisor(),
        }
    }
}

/// Run a script, returning one frame per tick
pub fn run(controller: &mut ZoomController, script: &ReplayScript) -> Vec<Frame> {
    let mut frames = Vec::new();
    for step in &script.steps {
        match step {
            Step::Tick(input) => {
                controller.on_tick(input);
                frames.push(Frame::capture(controller));
            }
            Step::Repeat { count, input } => {
                for _ in 0..*count {
                    controller.on_tick(input);
                    frames.push(Frame::capture(controller));
                }
            }
            Step::Message { channel, payload } => controller.on_message(channel, payload),
            Step::Disconnect => controller.on_disconnect(),
        }
    }
    frames
}

/// What a render pass at some wall-clock time would draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSample {
    pub time: f64,
    pub partial_tick: f32,
    pub overlay_alpha: f64,
    pub fov: f64,
}

fn expand(steps: &[Step]) -> Vec<Step> {
    let mut expanded = Vec::with_capacity(steps.len());
    for step in steps {
        match step {
            Step::Repeat { count, input } => {
                expanded.extend((0..*count).map(|_| Step::Tick(*input)));
            }
            other => expanded.push(other.clone()),
        }
    }
    expanded
}

/// Apply queued packets up to and including the next tick
fn run_until_tick(
    controller: &mut ZoomController,
    pending: &mut impl Iterator<Item = Step>,
) {
    for step in pending.by_ref() {
        match step {
            Step::Tick(input) => {
                controller.on_tick(&input);
                return;
            }
            Step::Message { channel, payload } => controller.on_message(&channel, &payload),
            Step::Disconnect => controller.on_disconnect(),
            Step::Repeat { .. } => unreachable!("repeats are expanded before playback"),
        }
    }
}

/// Play a script the way a host frame loop would: ticks at the script's rate,
/// render samples at `frames_per_second` with sub-tick blending.
pub fn play(
    controller: &mut ZoomController,
    script: &ReplayScript,
    frames_per_second: u32,
    base_fov: f64,
) -> Vec<RenderSample> {
    let mut clock = TickClock::new(script.ticks_per_second);
    let dt = 1.0 / f64::from(frames_per_second.max(1));
    let mut pending = expand(&script.steps).into_iter().peekable();
    let mut samples = Vec::new();
    let mut frame = 0u64;

    while pending.peek().is_some() {
        for _ in 0..clock.advance(dt) {
            run_until_tick(controller, &mut pending);
        }
        frame += 1;
        let partial_tick = clock.partial_tick();
        samples.push(RenderSample {
            time: frame as f64 * dt,
            partial_tick,
            overlay_alpha: controller.render_blend(partial_tick),
            fov: controller.fov(base_fov, partial_tick),
        });
    }
    samples
}
