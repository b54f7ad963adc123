//! Board configuration
//!
//! Everything the bring-up needs to know about the wiring lives in one
//! [`BoardConfig`] value. It is plain data, built as a `const`, owned by the
//! board controller and only ever read afterwards.
//!
//! Unusable pins (the [`GpioPin::NC`] sentinel, or a pin already claimed by
//! another peripheral) are not errors: they turn the dependent feature off.

use crate::audio::{AudioConfig, AudioPins};
use crate::gpio::{ActiveLevel, GpioPin};
use crate::peripheral::SpiMode;

/// Board name reported in the boot banner.
pub const BOARD_NAME: &str = "ESP32-C3 SuperMini";

/// SPI bus pins and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBusConfig {
    /// Controller-out line.
    pub mosi: GpioPin,
    /// Controller-in line (`NC` for write-only panels).
    pub miso: GpioPin,
    /// Clock line.
    pub sclk: GpioPin,
    /// Largest single DMA transfer, in bytes.
    pub max_transfer_bytes: u32,
}

/// Panel IO parameters, attached on top of the live bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelIoConfig {
    /// Chip select.
    pub cs: GpioPin,
    /// Data/command select.
    pub dc: GpioPin,
    /// Panel reset (`NC` when tied to the board reset).
    pub rst: GpioPin,
    /// SPI mode.
    pub spi_mode: SpiMode,
    /// Pixel clock in Hz.
    pub pclk_hz: u32,
    /// Queued transactions the IO layer may hold.
    pub trans_queue_depth: u8,
    /// Bits per command word.
    pub cmd_bits: u8,
    /// Bits per parameter word.
    pub param_bits: u8,
}

/// Colour element order on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbOrder {
    /// Red first.
    Rgb,
    /// Blue first.
    Bgr,
}

/// Panel geometry and orientation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayGeometry {
    /// Visible width in pixels.
    pub width: u16,
    /// Visible height in pixels.
    pub height: u16,
    /// Horizontal offset of the visible window in controller RAM.
    pub offset_x: u16,
    /// Vertical offset of the visible window in controller RAM.
    pub offset_y: u16,
    /// Swap X and Y axes.
    pub swap_xy: bool,
    /// Mirror along X.
    pub mirror_x: bool,
    /// Mirror along Y.
    pub mirror_y: bool,
    /// Invert colours (most IPS ST7789 panels need this).
    pub invert_color: bool,
}

/// Display wiring and panel parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// IO layer parameters.
    pub io: PanelIoConfig,
    /// Geometry.
    pub geometry: DisplayGeometry,
    /// Colour element order.
    pub rgb_order: RgbOrder,
    /// Bits per pixel pushed to the panel.
    pub bits_per_pixel: u8,
}

/// One physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Input pin (`NC` when the button is not fitted).
    pub pin: GpioPin,
    /// Level at which the button reads as pressed.
    pub active_level: ActiveLevel,
    /// A level change must be stable this long to count.
    pub debounce_ms: u32,
    /// Holds at least this long are long presses, not clicks.
    pub long_press_ms: u32,
}

impl ButtonConfig {
    /// Active-low button on `pin` with the default timings.
    #[must_use]
    pub const fn active_low(pin: GpioPin) -> Self {
        Self {
            pin,
            active_level: ActiveLevel::Low,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

/// Default debounce window.
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;

/// Default long-press threshold.
pub const DEFAULT_LONG_PRESS_MS: u32 = 1500;

/// Buttons fitted to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Boot button: chat toggle / press-to-talk / Wi-Fi reset.
    pub boot: ButtonConfig,
    /// Optional volume-up button.
    pub volume_up: ButtonConfig,
    /// Optional volume-down button.
    pub volume_down: ButtonConfig,
}

/// Power-save timer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerSaveConfig {
    /// Build the power-save timer at all.
    pub enabled: bool,
    /// Tick period.
    pub tick_ms: u32,
    /// Idle time after which the idle hint fires.
    pub idle_threshold_ms: u32,
    /// Idle time after which the board goes to sleep.
    pub sleep_threshold_ms: u32,
}

/// Default power-save tick period.
pub const POWER_SAVE_TICK_MS: u32 = 1_000;

/// Complete, immutable board description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Human-readable board name.
    pub name: &'static str,
    /// Shared SPI bus.
    pub bus: SpiBusConfig,
    /// Display panel.
    pub display: DisplayConfig,
    /// Buttons.
    pub input: InputConfig,
    /// Status LED pin.
    pub indicator_pin: GpioPin,
    /// Audio transport.
    pub audio: AudioConfig,
    /// Power-save timer.
    pub power_save: PowerSaveConfig,
    /// Build the press-to-talk tool.
    pub press_to_talk: bool,
}

/// ESP32-C3 SuperMini with an ST7789 240x240 panel, MAX98357A amplifier and
/// INMP441 microphone on separate I2S channels, and one boot button.
///
/// The on-board LED sits on GPIO8, which is the panel D/C line here, so the
/// indicator is reserved and the board runs without one.
pub const ESP32C3_SUPERMINI: BoardConfig = BoardConfig {
    name: BOARD_NAME,
    bus: SpiBusConfig {
        mosi: GpioPin::new(6),
        miso: GpioPin::NC,
        sclk: GpioPin::new(4),
        max_transfer_bytes: 240 * 240 * 2,
    },
    display: DisplayConfig {
        io: PanelIoConfig {
            cs: GpioPin::new(7),
            dc: GpioPin::new(8),
            rst: GpioPin::new(10),
            spi_mode: SpiMode::Mode0,
            pclk_hz: 40_000_000,
            trans_queue_depth: 10,
            cmd_bits: 8,
            param_bits: 8,
        },
        geometry: DisplayGeometry {
            width: 240,
            height: 240,
            offset_x: 0,
            offset_y: 0,
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
            invert_color: true,
        },
        rgb_order: RgbOrder::Rgb,
        bits_per_pixel: 16,
    },
    input: InputConfig {
        boot: ButtonConfig::active_low(GpioPin::new(9)),
        volume_up: ButtonConfig::active_low(GpioPin::NC),
        volume_down: ButtonConfig::active_low(GpioPin::NC),
    },
    indicator_pin: GpioPin::new(8),
    audio: AudioConfig {
        input_sample_rate: 16_000,
        output_sample_rate: 24_000,
        pins: AudioPins::Simplex {
            spk_bclk: GpioPin::new(2),
            spk_ws: GpioPin::new(3),
            spk_dout: GpioPin::new(5),
            mic_sck: GpioPin::new(0),
            mic_ws: GpioPin::new(1),
            mic_din: GpioPin::new(20),
        },
    },
    power_save: PowerSaveConfig {
        enabled: true,
        tick_ms: POWER_SAVE_TICK_MS,
        idle_threshold_ms: 60_000,
        sleep_threshold_ms: 300_000,
    },
    press_to_talk: true,
};

/// Configuration errors caught by [`BoardConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Panel width or height is zero.
    #[error("display geometry has a zero dimension")]
    EmptyDisplay,
    /// An audio sample rate is zero.
    #[error("audio sample rate must be non-zero")]
    ZeroSampleRate,
    /// The power-save tick period is zero.
    #[error("power-save tick period must be non-zero")]
    ZeroTick,
    /// The sleep threshold comes before the idle threshold.
    #[error("sleep threshold is shorter than idle threshold")]
    SleepBeforeIdle,
}

impl PowerSaveConfig {
    /// Check the timer parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.sleep_threshold_ms < self.idle_threshold_ms {
            return Err(ConfigError::SleepBeforeIdle);
        }
        Ok(())
    }
}

impl BoardConfig {
    /// Check the values that would make bring-up meaningless.
    ///
    /// Pin conflicts are deliberately not checked here; see
    /// [`BoardConfig::indicator_pin_usable`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.display.geometry;
        if geometry.width == 0 || geometry.height == 0 {
            return Err(ConfigError::EmptyDisplay);
        }
        if self.audio.input_sample_rate == 0 || self.audio.output_sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.power_save.enabled {
            self.power_save.validate()?;
        }
        Ok(())
    }

    /// Pins already claimed by the bus, the panel, the buttons or audio.
    fn claimed_pins(&self) -> [GpioPin; 15] {
        let [a0, a1, a2, a3, a4, a5] = self.audio.pins.pins();
        [
            self.bus.mosi,
            self.bus.miso,
            self.bus.sclk,
            self.display.io.cs,
            self.display.io.dc,
            self.display.io.rst,
            self.input.boot.pin,
            self.input.volume_up.pin,
            self.input.volume_down.pin,
            a0,
            a1,
            a2,
            a3,
            a4,
            a5,
        ]
    }

    /// Returns `true` if the indicator pin is wired and not reused by
    /// another peripheral.
    #[must_use]
    pub fn indicator_pin_usable(&self) -> bool {
        let pin = self.indicator_pin;
        pin.is_connected() && !self.claimed_pins().iter().any(|claimed| *claimed == pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supermini_config_is_valid() {
        assert_eq!(ESP32C3_SUPERMINI.validate(), Ok(()));
    }

    #[test]
    fn supermini_indicator_is_reserved_by_panel_dc() {
        assert_eq!(
            ESP32C3_SUPERMINI.indicator_pin,
            ESP32C3_SUPERMINI.display.io.dc
        );
        assert!(!ESP32C3_SUPERMINI.indicator_pin_usable());
    }

    #[test]
    fn free_indicator_pin_is_usable() {
        let mut config = ESP32C3_SUPERMINI;
        config.indicator_pin = GpioPin::new(21);
        assert!(config.indicator_pin_usable());
    }

    #[test]
    fn indicator_on_speaker_clock_is_unusable() {
        let mut config = ESP32C3_SUPERMINI;
        config.indicator_pin = GpioPin::new(2);
        assert!(!config.indicator_pin_usable());
    }

    #[test]
    fn indicator_on_microphone_data_is_unusable() {
        let mut config = ESP32C3_SUPERMINI;
        config.indicator_pin = GpioPin::new(20);
        assert!(!config.indicator_pin_usable());
    }

    #[test]
    fn indicator_on_duplex_data_is_unusable() {
        let mut config = ESP32C3_SUPERMINI;
        config.audio.pins = crate::audio::AudioPins::Duplex {
            mclk: GpioPin::NC,
            bclk: GpioPin::new(6),
            ws: GpioPin::new(7),
            dout: GpioPin::new(8),
            din: GpioPin::new(21),
        };
        config.indicator_pin = GpioPin::new(21);
        assert!(!config.indicator_pin_usable());
        config.indicator_pin = GpioPin::new(2);
        assert!(config.indicator_pin_usable());
    }

    #[test]
    fn nc_indicator_pin_is_unusable() {
        let mut config = ESP32C3_SUPERMINI;
        config.indicator_pin = GpioPin::NC;
        assert!(!config.indicator_pin_usable());
    }

    #[test]
    fn zero_width_is_rejected() {
        let mut config = ESP32C3_SUPERMINI;
        config.display.geometry.width = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyDisplay));
    }

    #[test]
    fn sleep_before_idle_is_rejected() {
        let mut config = ESP32C3_SUPERMINI;
        config.power_save.sleep_threshold_ms = 1_000;
        assert_eq!(config.validate(), Err(ConfigError::SleepBeforeIdle));
    }

    #[test]
    fn disabled_power_save_skips_timer_checks() {
        let mut config = ESP32C3_SUPERMINI;
        config.power_save.enabled = false;
        config.power_save.tick_ms = 0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let mut config = ESP32C3_SUPERMINI.power_save;
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));
    }
}
