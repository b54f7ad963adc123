//! Status indicator capability.

use crate::app::DeviceState;

/// Something that can show a status pattern (LED, light ring, ...).
pub trait Indicator {
    /// Show `pattern`.
    fn set_state(&mut self, pattern: IndicatorPattern);

    /// Advance blink timing by `elapsed_ms`.
    fn advance(&mut self, elapsed_ms: u32) {
        let _ = elapsed_ms;
    }
}

/// Indicator patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorPattern {
    /// Dark.
    Off,
    /// Steady on.
    Solid,
    /// Blink with the given half-period.
    Blink {
        /// Milliseconds per on or off phase.
        interval_ms: u32,
    },
}

impl IndicatorPattern {
    /// Fast blink, used while starting and upgrading.
    pub const FAST_BLINK: Self = Self::Blink { interval_ms: 100 };

    /// Slow blink, used while waiting for the user.
    pub const SLOW_BLINK: Self = Self::Blink { interval_ms: 500 };

    /// Pattern shown for an application state.
    #[must_use]
    pub fn for_device_state(state: DeviceState) -> Self {
        match state {
            DeviceState::Starting | DeviceState::Upgrading => Self::FAST_BLINK,
            DeviceState::WifiConfiguring | DeviceState::Activating => Self::SLOW_BLINK,
            DeviceState::Connecting
            | DeviceState::Listening
            | DeviceState::Speaking
            | DeviceState::AudioTesting => Self::Solid,
            DeviceState::Unknown | DeviceState::Idle | DeviceState::FatalError => Self::Off,
        }
    }
}

/// Indicator that accepts every call and does nothing.
///
/// Stands in when the board has no usable indicator pin, so callers never
/// branch on indicator presence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicator;

impl Indicator for NoIndicator {
    fn set_state(&mut self, _pattern: IndicatorPattern) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listening_is_solid() {
        assert_eq!(
            IndicatorPattern::for_device_state(DeviceState::Listening),
            IndicatorPattern::Solid
        );
    }

    #[test]
    fn starting_blinks_fast() {
        assert_eq!(
            IndicatorPattern::for_device_state(DeviceState::Starting),
            IndicatorPattern::FAST_BLINK
        );
    }

    #[test]
    fn idle_is_off() {
        assert_eq!(
            IndicatorPattern::for_device_state(DeviceState::Idle),
            IndicatorPattern::Off
        );
    }
}
