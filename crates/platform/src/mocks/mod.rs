//! Mock implementations for testing
//!
//! Recording mocks of the platform traits. Mocks that take part in bring-up
//! or dispatch write into a shared [`CallLog`], so tests can assert the
//! relative order of calls across different peripherals.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::arithmetic_side_effects)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::app::{Application, DeviceState, Network};
use crate::audio::{AudioCodec, AudioConfig, AudioError, AudioFactory, ChannelLayout, MAX_VOLUME};
use crate::config::{PanelIoConfig, RgbOrder, SpiBusConfig};
use crate::display::DisplayPanel;
use crate::peripheral::SpiBus;
use crate::power::SleepListener;

/// Ordered journal of calls, shared between mocks.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl CallLog {
    /// Empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call
    pub fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Index of the first occurrence of `call`
    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| *c == call)
    }

    /// Number of occurrences of `call`
    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }

    /// Returns `true` if `call` was recorded
    pub fn contains(&self, call: &str) -> bool {
        self.position(call).is_some()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Failure injected into a mock driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub &'static str);

/// Mock SPI bus
pub struct MockBus {
    log: CallLog,
    fail: bool,
    live: bool,
    devices: usize,
}

impl MockBus {
    /// Bus that initialises successfully
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
            live: false,
            devices: 0,
        }
    }

    /// Bus whose driver rejects initialisation
    pub fn failing(log: &CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    /// Returns `true` once initialisation succeeded
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Panel IOs attached so far
    pub fn devices(&self) -> usize {
        self.devices
    }
}

impl SpiBus for MockBus {
    type Error = MockError;

    fn initialize(&mut self, _config: &SpiBusConfig) -> Result<(), Self::Error> {
        self.log.record("bus.initialize");
        if self.fail {
            return Err(MockError("bus.initialize"));
        }
        self.live = true;
        Ok(())
    }
}

/// Mock panel driver (ST7789-like)
///
/// Also a 240x240 `Rgb565` draw target that counts drawn pixels.
pub struct MockPanel {
    log: CallLog,
    fail_at: Option<&'static str>,
    on: bool,
    pixels_drawn: usize,
    size: Size,
}

impl MockPanel {
    /// Panel whose operations all succeed
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail_at: None,
            on: false,
            pixels_drawn: 0,
            size: Size::new(240, 240),
        }
    }

    /// Panel that fails the operation recorded as `call` (e.g. `"panel.init"`)
    pub fn failing_at(log: &CallLog, call: &'static str) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::new(log)
        }
    }

    /// Returns `true` while the panel output is on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Pixels drawn so far
    pub fn pixels_drawn(&self) -> usize {
        self.pixels_drawn
    }

    fn op(&mut self, call: &'static str) -> Result<(), MockError> {
        self.log.record(call);
        if self.fail_at == Some(call) {
            return Err(MockError(call));
        }
        Ok(())
    }
}

impl DisplayPanel for MockPanel {
    type Bus = MockBus;
    type Error = MockError;

    /// Fails like a real driver when the bus was never brought up.
    fn attach_io(&mut self, bus: &mut MockBus, _io: &PanelIoConfig) -> Result<(), Self::Error> {
        self.op("panel.attach_io")?;
        if !bus.live {
            return Err(MockError("bus not live"));
        }
        bus.devices += 1;
        Ok(())
    }

    fn install(&mut self, _rgb_order: RgbOrder, _bits_per_pixel: u8) -> Result<(), Self::Error> {
        self.op("panel.install")
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.op("panel.reset")
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        self.op("panel.init")
    }

    fn invert_color(&mut self, _invert: bool) -> Result<(), Self::Error> {
        self.op("panel.invert_color")
    }

    fn swap_xy(&mut self, _swap: bool) -> Result<(), Self::Error> {
        self.op("panel.swap_xy")
    }

    fn mirror(&mut self, _mirror_x: bool, _mirror_y: bool) -> Result<(), Self::Error> {
        self.op("panel.mirror")
    }

    fn display_on(&mut self, on: bool) -> Result<(), Self::Error> {
        self.op(if on { "panel.display_on" } else { "panel.display_off" })?;
        self.on = on;
        Ok(())
    }
}

impl DrawTarget for MockPanel {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.pixels_drawn += pixels.into_iter().count();
        Ok(())
    }
}

impl OriginDimensions for MockPanel {
    fn size(&self) -> Size {
        self.size
    }
}

/// Mock audio codec
#[derive(Debug)]
pub struct MockCodec {
    config: AudioConfig,
    input_enabled: bool,
    output_enabled: bool,
    volume: u8,
    written: usize,
}

impl MockCodec {
    /// Codec for `config`, both paths disabled, volume 70
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            config: *config,
            input_enabled: false,
            output_enabled: false,
            volume: 70,
            written: 0,
        }
    }

    /// Samples accepted by [`AudioCodec::write`]
    pub fn samples_written(&self) -> usize {
        self.written
    }
}

impl AudioCodec for MockCodec {
    fn input_sample_rate(&self) -> u32 {
        self.config.input_sample_rate
    }

    fn output_sample_rate(&self) -> u32 {
        self.config.output_sample_rate
    }

    fn channel_layout(&self) -> ChannelLayout {
        self.config.pins.layout()
    }

    fn enable_input(&mut self, enable: bool) -> Result<(), AudioError> {
        self.input_enabled = enable;
        Ok(())
    }

    fn enable_output(&mut self, enable: bool) -> Result<(), AudioError> {
        self.output_enabled = enable;
        Ok(())
    }

    fn output_volume(&self) -> u8 {
        self.volume
    }

    fn set_output_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    fn read(&mut self, samples: &mut [i16]) -> Result<usize, AudioError> {
        if !self.input_enabled {
            return Err(AudioError::NotEnabled);
        }
        samples.fill(0);
        Ok(samples.len())
    }

    fn write(&mut self, samples: &[i16]) -> Result<usize, AudioError> {
        if !self.output_enabled {
            return Err(AudioError::NotEnabled);
        }
        self.written += samples.len();
        Ok(samples.len())
    }
}

/// Mock audio factory; counts how often it builds.
#[derive(Debug, Clone, Default)]
pub struct MockAudioFactory {
    builds: Rc<Cell<usize>>,
    fail: bool,
}

impl MockAudioFactory {
    /// Factory that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose build always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Build attempts so far (shared across clones)
    pub fn builds(&self) -> usize {
        self.builds.get()
    }
}

impl AudioFactory for MockAudioFactory {
    type Codec = MockCodec;

    fn build(&mut self, config: &AudioConfig) -> Result<Self::Codec, AudioError> {
        self.builds.set(self.builds.get() + 1);
        if self.fail {
            return Err(AudioError::Transport);
        }
        Ok(MockCodec::new(config))
    }
}

/// Mock network stack
pub struct MockNetwork {
    log: CallLog,
    connected: bool,
    power_save: Option<bool>,
}

impl MockNetwork {
    /// Network with the given link state
    pub fn new(log: &CallLog, connected: bool) -> Self {
        Self {
            log: log.clone(),
            connected,
            power_save: None,
        }
    }

    /// Change the link state
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Last value passed to [`Network::set_power_save_mode`]
    pub fn power_save(&self) -> Option<bool> {
        self.power_save
    }
}

impl Network for MockNetwork {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn reset_wifi_configuration(&mut self) {
        self.log.record("network.reset_wifi_configuration");
    }

    fn set_power_save_mode(&mut self, enabled: bool) {
        self.log.record(if enabled {
            "network.power_save_on"
        } else {
            "network.power_save_off"
        });
        self.power_save = Some(enabled);
    }
}

/// Mock application
pub struct MockApplication {
    log: CallLog,
    state: DeviceState,
    can_sleep: bool,
}

impl MockApplication {
    /// Application in `state` that allows sleep
    pub fn new(log: &CallLog, state: DeviceState) -> Self {
        Self {
            log: log.clone(),
            state,
            can_sleep: true,
        }
    }

    /// Change the reported device state
    pub fn set_state(&mut self, state: DeviceState) {
        self.state = state;
    }

    /// Allow or veto sleep
    pub fn set_can_sleep(&mut self, can_sleep: bool) {
        self.can_sleep = can_sleep;
    }
}

impl Application for MockApplication {
    fn device_state(&self) -> DeviceState {
        self.state
    }

    fn toggle_chat_state(&mut self) {
        self.log.record("app.toggle_chat_state");
    }

    fn start_listening(&mut self) {
        self.log.record("app.start_listening");
    }

    fn stop_listening(&mut self) {
        self.log.record("app.stop_listening");
    }

    fn can_enter_sleep_mode(&self) -> bool {
        self.can_sleep
    }
}

/// Sleep listener that journals transitions
pub struct RecordingListener {
    log: CallLog,
}

impl RecordingListener {
    /// Listener writing into `log`
    pub fn new(log: &CallLog) -> Self {
        Self { log: log.clone() }
    }
}

impl SleepListener for RecordingListener {
    fn on_enter_sleep(&mut self) {
        self.log.record("sleep.enter");
    }

    fn on_exit_sleep(&mut self) {
        self.log.record("sleep.exit");
    }

    fn on_idle(&mut self) {
        self.log.record("sleep.idle");
    }
}

/// Button line whose level tests set from outside.
///
/// Clones share the level, so a test keeps one clone and hands the other
/// to the input controller.
#[derive(Debug, Clone)]
pub struct MockInputPin {
    high: Rc<Cell<bool>>,
}

impl MockInputPin {
    /// Line idling high (pull-up)
    pub fn new() -> Self {
        Self {
            high: Rc::new(Cell::new(true)),
        }
    }

    /// Drive the line
    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }
}

impl Default for MockInputPin {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::digital::ErrorType for MockInputPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.get())
    }
}
