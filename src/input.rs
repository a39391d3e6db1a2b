//! Input state tracking
//!
//! Key and pointer callbacks write into an `InputTracker`; the session samples
//! a `TickInput` snapshot from it each tick. There is no event queue, so a tap
//! that starts and ends between two ticks is never seen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::TickInput;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Thrust,
    Brake,
    StrafeLeft,
    StrafeRight,
    Fire,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Thrust,
        Control::Brake,
        Control::StrafeLeft,
        Control::StrafeRight,
        Control::Fire,
    ];

    fn index(self) -> usize {
        match self {
            Control::Thrust => 0,
            Control::Brake => 1,
            Control::StrafeLeft => 2,
            Control::StrafeRight => 3,
            Control::Fire => 4,
        }
    }
}

/// Key identifier bound to each control (as reported by `KeyboardEvent.key`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBindings {
    pub thrust: String,
    pub brake: String,
    pub strafe_left: String,
    pub strafe_right: String,
    pub fire: String,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            thrust: "w".into(),
            brake: "s".into(),
            strafe_left: "a".into(),
            strafe_right: "d".into(),
            fire: " ".into(),
        }
    }
}

impl ControlBindings {
    pub fn key_for(&self, control: Control) -> &str {
        match control {
            Control::Thrust => &self.thrust,
            Control::Brake => &self.brake,
            Control::StrafeLeft => &self.strafe_left,
            Control::StrafeRight => &self.strafe_right,
            Control::Fire => &self.fire,
        }
    }

    /// Resolve a key identifier to its control (case-insensitive)
    pub fn control_for(&self, key: &str) -> Option<Control> {
        let key = key.to_lowercase();
        Control::ALL
            .into_iter()
            .find(|&c| self.key_for(c).to_lowercase() == key)
    }
}

/// Current pressed state of every control plus the aim point
#[derive(Debug, Clone)]
pub struct InputTracker {
    bindings: ControlBindings,
    pressed: [bool; 5],
    /// Aim point in playfield coordinates
    pointer: Vec2,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(ControlBindings::default())
    }
}

impl InputTracker {
    pub fn new(bindings: ControlBindings) -> Self {
        Self {
            bindings,
            pressed: [false; 5],
            pointer: Vec2::new(GAME_WIDTH / 2.0, 0.0),
        }
    }

    /// Key pressed. Returns true if the key is bound to a control.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Key released. Returns true if the key is bound to a control.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, down: bool) -> bool {
        match self.bindings.control_for(key) {
            Some(control) => {
                self.pressed[control.index()] = down;
                true
            }
            None => false,
        }
    }

    /// Pointer moved, in display coordinates of a surface `display_w` × `display_h`
    pub fn pointer_moved(&mut self, x: f32, y: f32, display_w: f32, display_h: f32) {
        if display_w <= 0.0 || display_h <= 0.0 {
            return;
        }
        self.pointer = Vec2::new(x * GAME_WIDTH / display_w, y * GAME_HEIGHT / display_h);
    }

    /// Pointer button is an alternate fire trigger
    pub fn pointer_down(&mut self) {
        self.pressed[Control::Fire.index()] = true;
    }

    pub fn pointer_up(&mut self) {
        self.pressed[Control::Fire.index()] = false;
    }

    /// Pointer left the surface; stop firing
    pub fn pointer_left(&mut self) {
        self.pointer_up();
    }

    /// Drop every held control (focus loss, rebinding)
    pub fn release_all(&mut self) {
        self.pressed = [false; 5];
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressed[control.index()]
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Current state, without consuming anything
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            thrust: self.is_pressed(Control::Thrust),
            brake: self.is_pressed(Control::Brake),
            strafe_left: self.is_pressed(Control::StrafeLeft),
            strafe_right: self.is_pressed(Control::StrafeRight),
            fire: self.is_pressed(Control::Fire),
            target: self.pointer,
        }
    }
}
