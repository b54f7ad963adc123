//! Mock I2S channel for host-side testing
//!
//! Implements [`I2sChannel`] without any hardware dependency. Records all
//! calls for assertion in tests.

use platform::I2sPins;

use super::I2sChannel;

/// Error returned when a mock channel is told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2sError;

/// Mock I2S channel; records all calls for test assertions.
pub struct MockI2sChannel {
    /// Pins and sample rate from the last [`I2sChannel::configure`] call.
    pub configured: Option<(I2sPins, u32)>,
    /// Total number of [`I2sChannel::configure`] calls.
    pub configure_calls: usize,
    /// Make [`I2sChannel::configure`] fail.
    pub reject_configure: bool,
    /// Whether the channel is currently running.
    pub enabled: bool,
    /// Total number of [`I2sChannel::set_enabled`] calls.
    pub enable_calls: usize,
    /// Samples handed out by [`I2sChannel::read`].
    pub samples_read: usize,
    /// Samples accepted by [`I2sChannel::write`].
    pub samples_written: usize,
}

impl MockI2sChannel {
    /// Create a new stopped channel.
    pub fn new() -> Self {
        Self {
            configured: None,
            configure_calls: 0,
            reject_configure: false,
            enabled: false,
            enable_calls: 0,
            samples_read: 0,
            samples_written: 0,
        }
    }
}

impl Default for MockI2sChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl I2sChannel for MockI2sChannel {
    type Error = MockI2sError;

    #[allow(clippy::arithmetic_side_effects)]
    fn configure(&mut self, pins: &I2sPins, sample_rate_hz: u32) -> Result<(), Self::Error> {
        self.configure_calls += 1;
        if self.reject_configure {
            return Err(MockI2sError);
        }
        self.configured = Some((*pins, sample_rate_hz));
        Ok(())
    }

    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.enabled = enabled;
        self.enable_calls += 1;
        Ok(())
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn read(&mut self, samples: &mut [i16]) -> Result<usize, Self::Error> {
        samples.fill(0);
        self.samples_read += samples.len();
        Ok(samples.len())
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn write(&mut self, samples: &[i16]) -> Result<usize, Self::Error> {
        self.samples_written += samples.len();
        Ok(samples.len())
    }
}
