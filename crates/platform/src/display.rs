//! Display abstraction layer
//!
//! Two levels:
//! - [`DisplayPanel`]: the controller-chip driver (ST7789 and friends), the
//!   operations bring-up issues once.
//! - [`Display`]: the capability the application and the power-save timer
//!   use afterwards.

use crate::config::{DisplayGeometry, PanelIoConfig, RgbOrder};
use crate::peripheral::SpiBus;

/// Panel controller driver.
///
/// Mirrors the panel operations of the vendor LCD stack. All calls are
/// issued in bring-up order by the board; none of them are retried.
pub trait DisplayPanel {
    /// Bus driver the panel IO is created on
    type Bus: SpiBus;

    /// Error type for panel operations
    type Error: core::fmt::Debug;

    /// Create the panel IO on `bus`, which is already live.
    fn attach_io(&mut self, bus: &mut Self::Bus, io: &PanelIoConfig) -> Result<(), Self::Error>;

    /// Install the controller driver.
    fn install(&mut self, rgb_order: RgbOrder, bits_per_pixel: u8) -> Result<(), Self::Error>;

    /// Hardware reset.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Controller init sequence.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Invert colours.
    fn invert_color(&mut self, invert: bool) -> Result<(), Self::Error>;

    /// Swap X and Y.
    fn swap_xy(&mut self, swap: bool) -> Result<(), Self::Error>;

    /// Mirror along X and/or Y.
    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Self::Error>;

    /// Turn the panel output on or off.
    fn display_on(&mut self, on: bool) -> Result<(), Self::Error>;
}

/// Display capability.
pub trait Display {
    /// Blank (`true`) or restore (`false`) the display.
    ///
    /// Called from the power-save path; must not block.
    fn set_power_save_mode(&mut self, on: bool);

    /// Returns `true` while blanked by power save.
    fn is_power_save(&self) -> bool;

    /// Geometry and orientation.
    fn geometry(&self) -> DisplayGeometry;

    /// Visible width in pixels.
    fn width(&self) -> u16 {
        self.geometry().width
    }

    /// Visible height in pixels.
    fn height(&self) -> u16 {
        self.geometry().height
    }
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Panel IO could not be created on the bus.
    #[error("panel IO creation failed")]
    Io,
    /// Controller driver could not be installed.
    #[error("panel driver install failed")]
    Install,
    /// Reset or init sequence failed.
    #[error("panel init failed")]
    Init,
    /// Orientation or colour setup failed.
    #[error("panel configuration failed")]
    Configure,
    /// Display on/off command failed.
    #[error("panel on/off failed")]
    Power,
}
