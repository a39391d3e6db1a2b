//! Mission session driver
//!
//! Runs the simulation at a fixed rate from display-refresh callbacks and
//! watches for the end of the mission. The terminal signal is delayed so the
//! final explosion can play out, and is delivered at most once.

use crate::consts::*;
use crate::sim::{MissionState, TickInput, tick};
use crate::tuning::LevelConfig;

/// Terminal result of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    Victory,
    Defeat,
}

impl MissionOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, MissionOutcome::Victory)
    }
}

/// One mission in progress
#[derive(Debug, Clone)]
pub struct Session {
    state: MissionState,
    /// Mission clock (ms), advanced by exactly `TICK_MS` per tick
    clock_ms: f64,
    accumulator: f64,
    last_frame: Option<f64>,
    /// Outcome and the frame time at which it is released
    pending: Option<(MissionOutcome, f64)>,
    running: bool,
}

impl Session {
    pub fn new(level: &LevelConfig, seed: u64) -> Self {
        Self {
            state: MissionState::start(level, seed),
            clock_ms: 0.0,
            accumulator: 0.0,
            last_frame: None,
            pending: None,
            running: true,
        }
    }

    /// Throw away the current mission and start a new one
    pub fn restart(&mut self, level: &LevelConfig, seed: u64) {
        *self = Self::new(level, seed);
        log::info!("Mission restarted with seed: {}", seed);
    }

    /// Advance by one display frame at wall time `now_ms`.
    ///
    /// Returns the outcome on the single frame where it is released.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> Option<MissionOutcome> {
        if !self.running {
            return None;
        }

        let dt = match self.last_frame {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => TICK_MS,
        };
        self.last_frame = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            self.clock_ms += TICK_MS;
            tick(&mut self.state, input, self.clock_ms);
            self.accumulator -= TICK_MS;
            substeps += 1;
            self.observe(now_ms);
        }

        match self.pending {
            Some((outcome, at)) if now_ms >= at => {
                self.running = false;
                log::info!("Mission ended: {:?}", outcome);
                Some(outcome)
            }
            _ => None,
        }
    }

    /// Schedule the terminal signal the first time an end condition is seen
    fn observe(&mut self, now_ms: f64) {
        if self.pending.is_some() || !self.state.started {
            return;
        }
        if self.state.player.destroyed {
            self.pending = Some((MissionOutcome::Defeat, now_ms + DEFEAT_SIGNAL_DELAY_MS));
        } else if self.state.enemies.is_empty() {
            self.pending = Some((MissionOutcome::Victory, now_ms + VICTORY_SIGNAL_DELAY_MS));
        }
    }

    /// Stop ticking; further frames are ignored
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Session stopped at tick {}", self.state.time_ticks);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Outcome already decided but not yet released
    pub fn pending_outcome(&self) -> Option<MissionOutcome> {
        self.pending.map(|(outcome, _)| outcome)
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    /// Direct access for scripted encounters and tests
    pub fn state_mut(&mut self) -> &mut MissionState {
        &mut self.state
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }
}
