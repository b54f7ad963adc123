//! Status LED.
//!
//! The SuperMini's LED shares GPIO8 with the panel D/C line, so on that
//! board the slot always resolves to [`NoIndicator`] and the pin is never
//! driven.

use embedded_hal::digital::OutputPin;
use platform::{BoardConfig, Indicator, IndicatorPattern, NoIndicator};

use crate::log;

/// One LED on an output pin, active high.
pub struct SingleLed<P> {
    pin: P,
    pattern: IndicatorPattern,
    lit: bool,
    phase_ms: u32,
}

impl<P: OutputPin> SingleLed<P> {
    /// LED on `pin`. The pin is left untouched until the first pattern.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            pattern: IndicatorPattern::Off,
            lit: false,
            phase_ms: 0,
        }
    }

    /// Pattern currently shown
    pub fn pattern(&self) -> IndicatorPattern {
        self.pattern
    }

    /// Returns `true` while the LED is on.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn drive(&mut self, lit: bool) {
        let result = if lit { self.pin.set_high() } else { self.pin.set_low() };
        match result {
            Ok(()) => self.lit = lit,
            Err(_) => log::warn!("indicator: pin write failed"),
        }
    }
}

impl<P: OutputPin> Indicator for SingleLed<P> {
    fn set_state(&mut self, pattern: IndicatorPattern) {
        self.pattern = pattern;
        self.phase_ms = 0;
        let lit = !matches!(pattern, IndicatorPattern::Off);
        self.drive(lit);
    }

    fn advance(&mut self, elapsed_ms: u32) {
        let IndicatorPattern::Blink { interval_ms } = self.pattern else {
            return;
        };
        let total = self.phase_ms.saturating_add(elapsed_ms);
        let (Some(phases), Some(rest)) =
            (total.checked_div(interval_ms), total.checked_rem(interval_ms))
        else {
            return;
        };
        self.phase_ms = rest;
        if phases & 1 == 1 {
            self.drive(!self.lit);
        }
    }
}

/// The board's indicator: a real LED or the no-op stand-in.
pub enum IndicatorSlot<P> {
    /// LED wired on a free pin
    Led(SingleLed<P>),
    /// No usable LED
    Absent(NoIndicator),
}

impl<P: OutputPin> IndicatorSlot<P> {
    /// Choose the indicator for `config`.
    ///
    /// Falls back to [`NoIndicator`] when no pin was supplied, or when the
    /// configured pin is `NC` or claimed by another peripheral.
    pub fn new(led: Option<P>, config: &BoardConfig) -> Self {
        match led {
            Some(pin) if config.indicator_pin_usable() => Self::Led(SingleLed::new(pin)),
            Some(_) => {
                log::warn!(
                    "indicator: pin {:?} unusable, status LED disabled",
                    config.indicator_pin
                );
                Self::Absent(NoIndicator)
            }
            None => Self::Absent(NoIndicator),
        }
    }

    /// Returns `true` if a real LED is driven.
    pub fn is_led(&self) -> bool {
        matches!(self, Self::Led(_))
    }
}

impl<P: OutputPin> Indicator for IndicatorSlot<P> {
    fn set_state(&mut self, pattern: IndicatorPattern) {
        match self {
            Self::Led(led) => led.set_state(pattern),
            Self::Absent(none) => none.set_state(pattern),
        }
    }

    fn advance(&mut self, elapsed_ms: u32) {
        match self {
            Self::Led(led) => led.advance(elapsed_ms),
            Self::Absent(none) => none.advance(elapsed_ms),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
    use platform::{GpioPin, ESP32C3_SUPERMINI};

    fn board_with_free_led() -> BoardConfig {
        BoardConfig {
            indicator_pin: GpioPin::new(21),
            ..ESP32C3_SUPERMINI
        }
    }

    #[test]
    fn supermini_led_is_never_driven() {
        let mut handle = PinMock::new(&[]);
        let mut slot = IndicatorSlot::new(Some(handle.clone()), &ESP32C3_SUPERMINI);
        assert!(!slot.is_led());
        slot.set_state(IndicatorPattern::Solid);
        slot.advance(1_000);
        drop(slot);
        handle.done();
    }

    #[test]
    fn free_pin_gets_a_real_led() {
        let mut handle = PinMock::new(&[Transaction::set(State::High)]);
        let mut slot = IndicatorSlot::new(Some(handle.clone()), &board_with_free_led());
        assert!(slot.is_led());
        slot.set_state(IndicatorPattern::Solid);
        drop(slot);
        handle.done();
    }

    #[test]
    fn blink_toggles_each_interval() {
        let mut handle = PinMock::new(&[
            Transaction::set(State::High),
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ]);
        let mut led = SingleLed::new(handle.clone());
        led.set_state(IndicatorPattern::Blink { interval_ms: 100 });
        led.advance(60);
        assert!(led.is_lit());
        led.advance(60);
        assert!(!led.is_lit());
        led.advance(100);
        assert!(led.is_lit());
        // Two whole intervals: back where it was, no write.
        led.advance(200);
        drop(led);
        handle.done();
    }

    #[test]
    fn off_pattern_drives_low() {
        let mut handle = PinMock::new(&[Transaction::set(State::Low)]);
        let mut led = SingleLed::new(handle.clone());
        led.set_state(IndicatorPattern::Off);
        assert!(!led.is_lit());
        drop(led);
        handle.done();
    }
}
