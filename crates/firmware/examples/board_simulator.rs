//! SuperMini board simulator
//!
//! Runs the real event loop over mock peripherals and replays a short
//! session: boot, a click to start a chat, a click to stop it, idle until
//! the display sleeps, a press to wake, then radio power save off.
//!
//! Run with: cargo run -p firmware --example board_simulator --features emulator
//! Log level follows `RUST_LOG` (default `info`).

use core::convert::Infallible;

use embassy_futures::join::join3;
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use embedded_hal::digital::{ErrorType, OutputPin};
use tracing::info;
use tracing_subscriber::EnvFilter;

use firmware::runtime::{button_poll_task, power_save_task, try_send_event};
use firmware::{run_board, BoardChannel, BoardController, BoardEvent, BoardHardware, Peripherals};
use platform::mocks::{CallLog, MockAudioFactory, MockBus, MockInputPin, MockNetwork, MockPanel};
use platform::{Application, DeviceState, MemorySettings, ESP32C3_SUPERMINI};

static EVENTS: BoardChannel<CriticalSectionRawMutex> = Channel::new();

struct SimBoard;

impl BoardHardware for SimBoard {
    type Bus = MockBus;
    type Panel = MockPanel;
    type ButtonPin = MockInputPin;
    type LedPin = SimLed;
    type Audio = MockAudioFactory;
    type Network = MockNetwork;
    type Settings = MemorySettings;
}

/// LED that only logs. On the SuperMini it is never driven.
struct SimLed;

impl ErrorType for SimLed {
    type Error = Infallible;
}

impl OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        info!("led: off");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        info!("led: on");
        Ok(())
    }
}

/// Chat application stand-in: toggles between idle and listening and
/// reports each change back to the board.
struct SimApp {
    state: DeviceState,
}

impl SimApp {
    fn enter(&mut self, state: DeviceState) {
        info!(?state, "app: state");
        self.state = state;
        try_send_event(&EVENTS, BoardEvent::DeviceStateChanged(state));
    }
}

impl Application for SimApp {
    fn device_state(&self) -> DeviceState {
        self.state
    }

    fn toggle_chat_state(&mut self) {
        match self.state {
            DeviceState::Idle => self.enter(DeviceState::Listening),
            DeviceState::Listening | DeviceState::Speaking => self.enter(DeviceState::Idle),
            state => info!(?state, "app: toggle ignored"),
        }
    }

    fn start_listening(&mut self) {
        self.enter(DeviceState::Listening);
    }

    fn stop_listening(&mut self) {
        self.enter(DeviceState::Idle);
    }

    fn can_enter_sleep_mode(&self) -> bool {
        self.state == DeviceState::Idle
    }
}

async fn click(line: &MockInputPin) {
    line.set_high(false);
    Timer::after_millis(80).await;
    line.set_high(true);
    Timer::after_millis(80).await;
}

async fn session(boot_line: MockInputPin) {
    Timer::after_millis(100).await;
    try_send_event(&EVENTS, BoardEvent::DeviceStateChanged(DeviceState::Idle));

    info!("script: click to talk");
    click(&boot_line).await;
    Timer::after_millis(500).await;
    info!("script: click to stop");
    click(&boot_line).await;

    info!("script: idle until sleep");
    Timer::after_secs(5).await;

    info!("script: press to wake");
    click(&boot_line).await;
    try_send_event(&EVENTS, BoardEvent::SetPowerSaveMode(false));
    Timer::after_millis(200).await;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = ESP32C3_SUPERMINI;
    config.power_save.idle_threshold_ms = 2_000;
    config.power_save.sleep_threshold_ms = 4_000;
    config.validate()?;

    let log = CallLog::new();
    let boot_line = MockInputPin::new();
    let peripherals = Peripherals::<SimBoard> {
        bus: MockBus::new(&log),
        panel: MockPanel::new(&log),
        boot_button: boot_line.clone(),
        volume_up: None,
        volume_down: None,
        led: Some(SimLed),
        audio: MockAudioFactory::new(),
        network: MockNetwork::new(&log, true),
        settings: MemorySettings::new(),
    };

    let mut board = BoardController::new(config, peripherals)?;
    info!(steps = ?board.boot_log().steps(), "{} up", config.name);

    if let Some(tool) = board.press_to_talk_tool() {
        let descriptor = tool.descriptor();
        info!(
            name = descriptor.name,
            arguments = ?descriptor.arguments,
            "tool: {}",
            descriptor.description
        );
        tool.invoke(descriptor.name, "click")?;
    }

    let mut app = SimApp {
        state: DeviceState::Starting,
    };
    let tick_ms = config.power_save.tick_ms;

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async {
        let board_loop = join3(
            run_board(&EVENTS, &mut board, &mut app),
            button_poll_task(&EVENTS),
            power_save_task(&EVENTS, tick_ms),
        );
        select(board_loop, session(boot_line)).await;
    });

    info!(power = ?board.power_state(), calls = ?log.calls(), "simulation finished");
    Ok(())
}
