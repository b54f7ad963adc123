//! Capability layer for voice-assistant boards
//!
//! Trait-based abstractions over the board's peripherals and its neighbours,
//! so the bring-up and dispatch logic in the firmware crate runs on the host
//! as well as on the ESP32-C3.
//!
//! # Architecture Layers
//!
//! ```text
//! Application / network stack (external)
//!         ↑ Application, Network
//! Firmware crate (bring-up, dispatch, power save)
//!         ↓
//! Platform (this crate - traits, config, state machines)
//!         ↓
//! Vendor drivers (SPI master, ST7789, I2S, NVS)
//! ```
//!
//! # Capabilities
//!
//! - [`Display`] / [`DisplayPanel`] - panel bring-up and power save
//! - [`AudioCodec`] / [`AudioFactory`] - microphone and speaker paths
//! - [`Indicator`] - status LED patterns
//! - [`SettingsStore`] - persisted flags
//!
//! # State machines
//!
//! - [`Button`] - debounce and press/release/click edges
//! - [`PowerSaveTimer`] - idle accounting and sleep transitions
//!
//! # Features
//!
//! - `std`: Enable standard library support and [`mocks`] (for testing)
//! - `defmt`: Enable defmt logging
//!
//! # Example
//!
//! ```
//! use platform::{PowerSaveTimer, PowerState, ESP32C3_SUPERMINI};
//!
//! let mut timer = PowerSaveTimer::new(&ESP32C3_SUPERMINI.power_save);
//! timer.tick(1_000, true, &mut ());
//! assert_eq!(timer.state(), PowerState::Awake);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this HAL crate:
#![allow(clippy::doc_markdown)] // chip and pin names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::new_without_default)]

#[cfg(feature = "std")]
extern crate std;

pub mod app;
pub mod audio;
pub mod config;
pub mod display;
pub mod gpio;
pub mod indicator;
pub mod input;
pub mod mocks;
pub mod peripheral;
pub mod power;
pub mod settings;

// Re-export main high-level traits
pub use app::{Application, DeviceState, Network};
pub use audio::{
    AudioCodec, AudioConfig, AudioError, AudioFactory, AudioPins, ChannelLayout, I2sPins,
};
pub use display::{Display, DisplayError, DisplayPanel};
pub use indicator::{Indicator, IndicatorPattern, NoIndicator};
pub use settings::{MemorySettings, SettingsError, SettingsStore};

// Re-export state machines
pub use input::{Button, ButtonEvent, ButtonEvents, ButtonId, ButtonState};
pub use power::{PowerSaveTimer, PowerState, PowerTransition, SleepListener};

// Re-export configuration
pub use config::{
    BoardConfig, ButtonConfig, ConfigError, DisplayConfig, DisplayGeometry, InputConfig,
    PanelIoConfig, PowerSaveConfig, RgbOrder, SpiBusConfig, ESP32C3_SUPERMINI,
};

// Re-export GPIO and bus types
pub use gpio::{ActiveLevel, GpioPin, PinState};
pub use peripheral::{BusError, Live, SharedBus, SpiBus, SpiMode, Uninit};
