//! Shared fixture for the firmware integration tests.
//!
//! Builds a [`BoardController`] over the platform mocks. Every mock that
//! journals writes into one [`CallLog`], so tests can assert cross-peripheral
//! ordering (bus before panel, display wake before radio policy, ...).

#![allow(dead_code)] // not every test binary uses every helper

use embedded_hal_mock::eh1::digital::Mock as PinMock;
use firmware::{BoardController, BoardHardware, BootError, Peripherals};
use platform::mocks::{
    CallLog, MockApplication, MockAudioFactory, MockBus, MockInputPin, MockNetwork, MockPanel,
};
use platform::{BoardConfig, DeviceState, GpioPin, MemorySettings, ESP32C3_SUPERMINI};

/// Driver types of the mock board.
pub struct MockBoard;

impl BoardHardware for MockBoard {
    type Bus = MockBus;
    type Panel = MockPanel;
    type ButtonPin = MockInputPin;
    type LedPin = PinMock;
    type Audio = MockAudioFactory;
    type Network = MockNetwork;
    type Settings = MemorySettings;
}

/// Handles a test keeps after the peripherals move into the board.
pub struct Rig {
    pub log: CallLog,
    pub boot_line: MockInputPin,
    pub audio: MockAudioFactory,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            log: CallLog::new(),
            boot_line: MockInputPin::new(),
            audio: MockAudioFactory::new(),
        }
    }

    /// Healthy peripherals, Wi-Fi connected, no LED, empty settings.
    pub fn peripherals(&self) -> Peripherals<MockBoard> {
        Peripherals {
            bus: MockBus::new(&self.log),
            panel: MockPanel::new(&self.log),
            boot_button: self.boot_line.clone(),
            volume_up: None,
            volume_down: None,
            led: None,
            audio: self.audio.clone(),
            network: MockNetwork::new(&self.log, true),
            settings: MemorySettings::new(),
        }
    }

    pub fn app(&self, state: DeviceState) -> MockApplication {
        MockApplication::new(&self.log, state)
    }

    /// Bring up a SuperMini over healthy peripherals.
    pub fn boot(&self) -> BoardController<MockBoard> {
        self.boot_with(ESP32C3_SUPERMINI, self.peripherals())
            .expect("mock bring-up must succeed")
    }

    pub fn boot_with(
        &self,
        config: BoardConfig,
        peripherals: Peripherals<MockBoard>,
    ) -> Result<BoardController<MockBoard>, BootError> {
        BoardController::new(config, peripherals)
    }
}

/// SuperMini variant with the LED moved to a free pin.
pub fn board_with_free_led() -> BoardConfig {
    BoardConfig {
        indicator_pin: GpioPin::new(21),
        ..ESP32C3_SUPERMINI
    }
}

/// SuperMini variant with short power-save thresholds (idle 2 s, sleep 4 s).
pub fn board_with_short_timeouts() -> BoardConfig {
    let mut config = ESP32C3_SUPERMINI;
    config.power_save.idle_threshold_ms = 2_000;
    config.power_save.sleep_threshold_ms = 4_000;
    config
}

/// Settings with press-to-talk already switched to hold mode.
pub fn hold_mode_settings() -> MemorySettings {
    use platform::SettingsStore;
    let mut settings = MemorySettings::new();
    settings
        .set_bool(firmware::tools::SETTINGS_NAMESPACE, firmware::tools::PRESS_TO_TALK_KEY, true)
        .unwrap();
    settings
}
