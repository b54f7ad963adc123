//! Button input: per-button debounce and edge state machine.
//!
//! ```text
//!            stable active for debounce_ms
//!   [Idle] ------------------------------> [Pressed]   raises PressDown
//!   [Pressed] ---------------------------> [Idle]      raises PressUp (+ Click)
//!            stable inactive for debounce_ms
//! ```
//!
//! `Click` follows `PressUp` when the hold was shorter than the long-press
//! threshold. A hold that reaches the threshold raises `LongPress` once,
//! while still held, and suppresses the `Click`.

use heapless::Vec;

use crate::config::ButtonConfig;
use crate::gpio::{ActiveLevel, PinState};

/// Physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Boot button (the only one on the SuperMini).
    Boot,
    /// Volume up
    VolumeUp,
    /// Volume down
    VolumeDown,
}

/// Semantic button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Idle to pressed edge.
    PressDown,
    /// Pressed to idle edge.
    PressUp,
    /// Short press-release cycle, raised after `PressUp`.
    Click,
    /// Held past the long-press threshold.
    LongPress,
}

/// Debounced button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Released.
    Idle,
    /// Held down.
    Pressed,
}

/// Events raised by one sample; at most `PressUp` followed by `Click`.
pub type ButtonEvents = Vec<ButtonEvent, 2>;

/// One debounced button.
#[derive(Debug, Clone)]
pub struct Button {
    id: ButtonId,
    active_level: ActiveLevel,
    debounce_ms: u32,
    long_press_ms: u32,
    state: ButtonState,
    /// Raw level that differs from `state`, and when it was first seen.
    pending_since: Option<u32>,
    pressed_at: u32,
    long_press_sent: bool,
}

impl Button {
    /// New released button.
    #[must_use]
    pub fn new(id: ButtonId, config: &ButtonConfig) -> Self {
        Self {
            id,
            active_level: config.active_level,
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
            state: ButtonState::Idle,
            pending_since: None,
            pressed_at: 0,
            long_press_sent: false,
        }
    }

    /// Which button this is.
    #[must_use]
    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Debounced state.
    #[must_use]
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Feed a raw line sample taken at `now_ms`.
    ///
    /// Timestamps are a free-running millisecond counter; wrap-around is
    /// handled.
    pub fn sample(&mut self, level: PinState, now_ms: u32) -> ButtonEvents {
        let mut events = ButtonEvents::new();
        let active = self.active_level.is_active(level);
        let held = self.state == ButtonState::Pressed;

        if active == held {
            self.pending_since = None;
            if held && !self.long_press_sent && self.held_for(now_ms) >= self.long_press_ms {
                self.long_press_sent = true;
                let _ = events.push(ButtonEvent::LongPress);
            }
            return events;
        }

        let since = *self.pending_since.get_or_insert(now_ms);
        if now_ms.wrapping_sub(since) < self.debounce_ms {
            return events;
        }
        self.pending_since = None;

        if active {
            self.state = ButtonState::Pressed;
            self.pressed_at = since;
            self.long_press_sent = false;
            let _ = events.push(ButtonEvent::PressDown);
        } else {
            self.state = ButtonState::Idle;
            let _ = events.push(ButtonEvent::PressUp);
            if !self.long_press_sent && since.wrapping_sub(self.pressed_at) < self.long_press_ms {
                let _ = events.push(ButtonEvent::Click);
            }
        }
        events
    }

    fn held_for(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.pressed_at)
    }
}
