//! Button inputs.
//!
//! [`InputController`] owns the button pins and their debounce state
//! machines ([`platform::Button`]) and turns raw pin samples into
//! `(ButtonId, ButtonEvent)` pairs. What those events *do* is decided by
//! [`dispatch`].
//!
//! | Button      | SuperMini pin | Notes                               |
//! |-------------|---------------|-------------------------------------|
//! | Boot        | GPIO9         | Active-low, internal pull-up        |
//! | Volume up   | not wired     | Enabled when the config names a pin |
//! | Volume down | not wired     | Enabled when the config names a pin |

pub mod dispatch;

use embedded_hal::digital::InputPin;
use heapless::Vec;
use platform::{Button, ButtonConfig, ButtonEvent, ButtonId, InputConfig, PinState};

use crate::log;

pub use dispatch::{dispatch, Action, Actions, DispatchContext, VOLUME_STEP};

/// Buttons a controller can hold.
pub const MAX_BUTTONS: usize = 3;

/// Events from one poll: at most two per button.
pub type InputEvents = Vec<(ButtonId, ButtonEvent), 6>;

/// Polls button pins and runs their debounce state machines.
pub struct InputController<P> {
    buttons: Vec<(Button, P), MAX_BUTTONS>,
}

impl<P: InputPin> InputController<P> {
    /// Controller for the boot button plus any wired volume buttons.
    ///
    /// A volume button is registered only if both its pin object is
    /// supplied and its configured pin is connected.
    pub fn new(
        config: &InputConfig,
        boot: P,
        volume_up: Option<P>,
        volume_down: Option<P>,
    ) -> Self {
        let mut buttons = Vec::new();
        let _ = buttons.push((Button::new(ButtonId::Boot, &config.boot), boot));
        for (id, button_config, pin) in [
            (ButtonId::VolumeUp, &config.volume_up, volume_up),
            (ButtonId::VolumeDown, &config.volume_down, volume_down),
        ] {
            if let Some(pin) = wired(button_config, pin) {
                let _ = buttons.push((Button::new(id, button_config), pin));
            }
        }
        log::debug!("input: {} buttons registered", buttons.len());
        Self { buttons }
    }

    /// Returns `true` if `id` is registered.
    pub fn has_button(&self, id: ButtonId) -> bool {
        self.buttons.iter().any(|(button, _)| button.id() == id)
    }

    /// Sample every pin once at `now_ms`.
    ///
    /// Unreadable pins are skipped for this poll.
    pub fn poll(&mut self, now_ms: u32) -> InputEvents {
        let mut events = InputEvents::new();
        for (button, pin) in &mut self.buttons {
            let Ok(high) = pin.is_high() else {
                log::warn!("input: {:?} read failed", button.id());
                continue;
            };
            for event in button.sample(PinState::from(high), now_ms) {
                let _ = events.push((button.id(), event));
            }
        }
        events
    }
}

fn wired<P>(config: &ButtonConfig, pin: Option<P>) -> Option<P> {
    pin.filter(|_| config.pin.is_connected())
}
