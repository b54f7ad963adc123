//! GPIO numbering and polarity helpers.
//!
//! Pin assignments in [`crate::config`] are plain numbers. The driver layer
//! owns the actual pin objects; this module only describes them.

/// Logical GPIO number, or the "not connected" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioPin(i8);

impl GpioPin {
    /// Sentinel for a signal that is not wired on this board.
    pub const NC: Self = Self(-1);

    /// Pin `number` on the GPIO matrix.
    ///
    /// Negative numbers collapse to [`GpioPin::NC`].
    #[must_use]
    pub const fn new(number: i8) -> Self {
        if number < 0 {
            Self::NC
        } else {
            Self(number)
        }
    }

    /// GPIO number, `None` for [`GpioPin::NC`].
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        if self.0 < 0 {
            None
        } else {
            Some(self.0.unsigned_abs())
        }
    }

    /// Returns `true` unless this is the [`GpioPin::NC`] sentinel.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        self.0 >= 0
    }
}

impl core::fmt::Display for GpioPin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.number() {
            Some(n) => write!(f, "GPIO{n}"),
            None => f.write_str("NC"),
        }
    }
}

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// Electrical level at which a button reads as pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed pulls the line low (pull-up wiring, the common case).
    Low,
    /// Pressed drives the line high.
    High,
}

impl ActiveLevel {
    /// Translate a raw line level into "pressed".
    #[must_use]
    pub fn is_active(self, level: PinState) -> bool {
        match self {
            Self::Low => level == PinState::Low,
            Self::High => level == PinState::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_numbers_are_not_connected() {
        assert_eq!(GpioPin::new(-5), GpioPin::NC);
        assert!(!GpioPin::NC.is_connected());
        assert_eq!(GpioPin::NC.number(), None);
    }

    #[test]
    fn connected_pin_reports_number() {
        let pin = GpioPin::new(9);
        assert!(pin.is_connected());
        assert_eq!(pin.number(), Some(9));
    }

    #[test]
    fn active_low_polarity() {
        assert!(ActiveLevel::Low.is_active(PinState::Low));
        assert!(!ActiveLevel::Low.is_active(PinState::High));
        assert!(ActiveLevel::High.is_active(PinState::High));
    }
}
