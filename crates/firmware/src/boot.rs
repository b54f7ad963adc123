//! Board bring-up sequence.
//!
//! Initialization order (MUST be respected: each step consumes the result
//! of an earlier one):
//!   1. Bus: SPI master configured before any panel IO is attached
//!   2. Display: ST7789 panel IO, driver install, reset, init, orientation
//!   3. Buttons: boot button (plus volume buttons when wired)
//!   4. Power-save timer: its sleep listener blanks the display from step 2
//!   5. Tools: press-to-talk mode, read by the boot-button dispatch
//!
//! Steps 1 and 2 are fail-fast. Steps 4 and 5 may be compiled out or
//! disabled; they are then skipped and absent from the [`BootLog`].

use heapless::Vec;
use platform::{BusError, DisplayError};

/// One bring-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStep {
    /// Shared SPI bus
    Bus,
    /// Display controller and panel driver
    Display,
    /// Button inputs
    Buttons,
    /// Power-save timer
    PowerSaveTimer,
    /// Optional feature tools
    Tools,
}

impl BootStep {
    /// Short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Display => "display",
            Self::Buttons => "buttons",
            Self::PowerSaveTimer => "power-save timer",
            Self::Tools => "tools",
        }
    }

    /// Critical steps abort bring-up on failure.
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Bus | Self::Display)
    }
}

/// Required bring-up order.
///
/// Tests assert that [`BootLog`] is always an ordered subsequence of this.
pub const BOOT_SEQUENCE: [BootStep; 5] = [
    BootStep::Bus,
    BootStep::Display,
    BootStep::Buttons,
    BootStep::PowerSaveTimer,
    BootStep::Tools,
];

/// Steps actually completed, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootLog {
    steps: Vec<BootStep, 5>,
}

impl BootLog {
    /// Empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `step` as completed.
    pub(crate) fn record(&mut self, step: BootStep) {
        // Capacity equals the number of steps; each is recorded at most once.
        let _ = self.steps.push(step);
    }

    /// Completed steps
    #[must_use]
    pub fn steps(&self) -> &[BootStep] {
        &self.steps
    }

    /// Returns `true` if `step` completed.
    #[must_use]
    pub fn contains(&self, step: BootStep) -> bool {
        self.steps.contains(&step)
    }

    /// Returns `true` if the completed steps follow [`BOOT_SEQUENCE`].
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.steps.windows(2).all(|pair| match pair {
            [a, b] => a < b,
            _ => true,
        })
    }
}

/// Why a critical step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootFailure {
    /// Bus could not be brought up.
    #[error(transparent)]
    Bus(#[from] BusError),
    /// Display could not be brought up.
    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// Bring-up aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("bring-up failed at {}: {source}", .step.name())]
pub struct BootError {
    /// Step that failed
    pub step: BootStep,
    /// Underlying failure
    pub source: BootFailure,
}

impl BootError {
    /// Error for `step` caused by `source`.
    pub fn new(step: BootStep, source: impl Into<BootFailure>) -> Self {
        Self {
            step,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_sequence_is_sorted() {
        assert!(BOOT_SEQUENCE.windows(2).all(|w| w.first() < w.get(1)));
    }

    #[test]
    fn only_bus_and_display_are_critical() {
        let critical: std::vec::Vec<_> = BOOT_SEQUENCE
            .iter()
            .copied()
            .filter(|s| s.is_critical())
            .collect();
        assert_eq!(critical, [BootStep::Bus, BootStep::Display]);
    }

    #[test]
    fn log_detects_out_of_order_steps() {
        let mut log = BootLog::new();
        log.record(BootStep::Display);
        log.record(BootStep::Bus);
        assert!(!log.is_ordered());
    }

    #[test]
    fn skipped_steps_keep_order() {
        let mut log = BootLog::new();
        log.record(BootStep::Bus);
        log.record(BootStep::Display);
        log.record(BootStep::Buttons);
        log.record(BootStep::Tools);
        assert!(log.is_ordered());
        assert!(!log.contains(BootStep::PowerSaveTimer));
    }

    #[test]
    fn error_names_the_step() {
        let err = BootError::new(BootStep::Bus, BusError::PinNotConnected);
        assert_eq!(err.step, BootStep::Bus);
        assert_eq!(err.source, BootFailure::Bus(BusError::PinNotConnected));
    }
}
