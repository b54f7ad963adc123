//! Shared serial bus abstraction
//!
//! The display hangs off a chip-select-multiplexed SPI bus. The bus must be
//! initialised exactly once, before any panel IO is attached to it.
//! [`SharedBus`] enforces that with a typestate: only a [`SharedBus<Live>`]
//! can be handed to the display bring-up.

use core::marker::PhantomData;

use crate::config::SpiBusConfig;

/// Host-side driver of the serial bus (e.g. the SPI2 master on ESP32-C3).
pub trait SpiBus {
    /// Error type
    type Error: core::fmt::Debug;

    /// Configure pins, clock and DMA for the bus.
    ///
    /// Called at most once per board lifetime by [`SharedBus::initialize`].
    fn initialize(&mut self, config: &SpiBusConfig) -> Result<(), Self::Error>;
}

/// SPI modes (CPOL, CPHA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

/// Bus bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The driver rejected the configuration.
    #[error("bus driver rejected configuration")]
    Driver,
    /// A required bus line is not connected.
    #[error("bus line not connected")]
    PinNotConnected,
}

/// Bus not yet configured.
pub struct Uninit;

/// Bus configured and usable by panel IO.
pub struct Live;

/// Bus with its lifecycle encoded in the type.
///
/// ```text
/// [Uninit] --initialize()--> [Live]
/// ```
///
/// `initialize` consumes the uninitialised bus, so a second initialisation
/// cannot be written.
pub struct SharedBus<B, State> {
    bus: B,
    config: SpiBusConfig,
    _state: PhantomData<State>,
}

impl<B: SpiBus> SharedBus<B, Uninit> {
    /// Wrap a bus driver that has not been configured yet.
    pub fn new(bus: B, config: SpiBusConfig) -> Self {
        Self {
            bus,
            config,
            _state: PhantomData,
        }
    }

    /// Bring the bus up.
    ///
    /// Fails fast: a driver error leaves no live bus behind.
    pub fn initialize(mut self) -> Result<SharedBus<B, Live>, BusError> {
        if !self.config.mosi.is_connected() || !self.config.sclk.is_connected() {
            return Err(BusError::PinNotConnected);
        }
        self.bus
            .initialize(&self.config)
            .map_err(|_| BusError::Driver)?;
        Ok(SharedBus {
            bus: self.bus,
            config: self.config,
            _state: PhantomData,
        })
    }
}

impl<B> SharedBus<B, Live> {
    /// Configuration the bus was brought up with.
    pub fn config(&self) -> &SpiBusConfig {
        &self.config
    }

    /// Underlying driver
    pub fn driver(&self) -> &B {
        &self.bus
    }

    /// Underlying driver, for attaching panel IO.
    pub fn driver_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}
