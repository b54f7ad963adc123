//! Board composition root.
//!
//! [`BoardController::new`] runs the bring-up sequence of [`crate::boot`]
//! and then owns every peripheral for the rest of the board's life. The
//! application borrows capabilities from it ([`display`], [`indicator`],
//! [`audio_codec`]) and feeds it button and power-save events.
//!
//! [`display`]: BoardController::display
//! [`indicator`]: BoardController::indicator
//! [`audio_codec`]: BoardController::audio_codec

use embedded_hal::digital::{InputPin, OutputPin};
use platform::audio::MAX_VOLUME;
use platform::{
    Application, AudioCodec, AudioError, AudioFactory, BoardConfig, ButtonEvent, ButtonId,
    DeviceState, Display, DisplayPanel, Indicator, IndicatorPattern, Network, PowerSaveTimer,
    PowerState, PowerTransition, SettingsStore, SharedBus, SleepListener, SpiBus,
};

use crate::boot::{BootError, BootFailure, BootLog, BootStep};
use crate::display::LcdDisplay;
use crate::indicator::IndicatorSlot;
use crate::input::{dispatch, Action, DispatchContext, InputController, InputEvents};
use crate::log;
use crate::tools::PressToTalkTool;

/// Concrete driver types of one board.
///
/// Implemented by a marker type per target (and per test fixture).
pub trait BoardHardware {
    /// SPI master driver
    type Bus: SpiBus;
    /// Panel controller driver
    type Panel: DisplayPanel<Bus = Self::Bus>;
    /// Button input pin
    type ButtonPin: InputPin;
    /// Status LED pin
    type LedPin: OutputPin;
    /// Audio codec factory
    type Audio: AudioFactory;
    /// Network stack
    type Network: Network;
    /// Settings storage
    type Settings: SettingsStore;
}

/// Audio codec type of board `H`.
pub type CodecOf<H> = <<H as BoardHardware>::Audio as AudioFactory>::Codec;

/// Display type of board `H`.
pub type DisplayOf<H> = LcdDisplay<<H as BoardHardware>::Bus, <H as BoardHardware>::Panel>;

/// Driver objects handed to bring-up.
pub struct Peripherals<H: BoardHardware> {
    /// SPI master, not yet configured
    pub bus: H::Bus,
    /// Panel driver
    pub panel: H::Panel,
    /// Boot button pin
    pub boot_button: H::ButtonPin,
    /// Volume-up pin, if wired
    pub volume_up: Option<H::ButtonPin>,
    /// Volume-down pin, if wired
    pub volume_down: Option<H::ButtonPin>,
    /// Status LED pin, if any
    pub led: Option<H::LedPin>,
    /// Builds the audio codec on first use
    pub audio: H::Audio,
    /// Network stack
    pub network: H::Network,
    /// Settings storage
    pub settings: H::Settings,
}

enum AudioSlot<C> {
    Unbuilt,
    Ready(C),
    Failed(AudioError),
}

/// The running board.
pub struct BoardController<H: BoardHardware> {
    config: BoardConfig,
    boot_log: BootLog,
    display: DisplayOf<H>,
    inputs: InputController<H::ButtonPin>,
    power_save: Option<PowerSaveTimer>,
    press_to_talk: Option<PressToTalkTool<H::Settings>>,
    indicator: IndicatorSlot<H::LedPin>,
    audio_factory: H::Audio,
    audio: AudioSlot<CodecOf<H>>,
    network: H::Network,
    device_state: DeviceState,
    last_poll_ms: Option<u32>,
}

impl<H: BoardHardware> BoardController<H> {
    /// Bring the board up.
    ///
    /// Bus and display failures abort with the failing [`BootStep`]. The
    /// power-save timer and the press-to-talk tool are built only when
    /// their cargo features are on. The timer is also skipped when its
    /// parameters are invalid; the tool when `config` does not ask for it.
    pub fn new(config: BoardConfig, peripherals: Peripherals<H>) -> Result<Self, BootError> {
        let Peripherals {
            bus,
            panel,
            boot_button,
            volume_up,
            volume_down,
            led,
            audio,
            network,
            settings,
        } = peripherals;
        let mut boot_log = BootLog::new();
        log::info!("{}: bring-up", config.name);

        let bus = SharedBus::new(bus, config.bus)
            .initialize()
            .map_err(|e| abort(BootStep::Bus, e))?;
        boot_log.record(BootStep::Bus);

        let display = LcdDisplay::new(bus, panel, &config.display)
            .map_err(|e| abort(BootStep::Display, e))?;
        boot_log.record(BootStep::Display);

        let inputs = InputController::new(&config.input, boot_button, volume_up, volume_down);
        boot_log.record(BootStep::Buttons);

        let power_save = if !cfg!(feature = "power-save") {
            None
        } else if config.power_save.validate().is_err() {
            log::warn!(
                "{}: power-save timer skipped, invalid timing (tick {} ms)",
                config.name,
                config.power_save.tick_ms
            );
            None
        } else {
            boot_log.record(BootStep::PowerSaveTimer);
            Some(PowerSaveTimer::new(&config.power_save))
        };

        let press_to_talk = if cfg!(feature = "press-to-talk") && config.press_to_talk {
            boot_log.record(BootStep::Tools);
            Some(PressToTalkTool::initialize(settings))
        } else {
            None
        };

        let indicator = IndicatorSlot::new(led, &config);

        log::info!("{}: bring-up complete", config.name);
        Ok(Self {
            config,
            boot_log,
            display,
            inputs,
            power_save,
            press_to_talk,
            indicator,
            audio_factory: audio,
            audio: AudioSlot::Unbuilt,
            network,
            device_state: DeviceState::Unknown,
            last_poll_ms: None,
        })
    }

    /// Board configuration
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Steps completed during bring-up
    pub fn boot_log(&self) -> &BootLog {
        &self.boot_log
    }

    /// The display
    pub fn display(&mut self) -> &mut DisplayOf<H> {
        &mut self.display
    }

    /// The status indicator; a no-op when the board has no usable LED.
    pub fn indicator(&mut self) -> &mut dyn Indicator {
        &mut self.indicator
    }

    /// The audio codec, built on first call.
    ///
    /// The factory runs at most once. If that build failed, every call
    /// returns the same error.
    pub fn audio_codec(&mut self) -> Result<&mut CodecOf<H>, AudioError> {
        if let AudioSlot::Unbuilt = self.audio {
            self.audio = match self.audio_factory.build(&self.config.audio) {
                Ok(codec) => {
                    log::info!(
                        "audio: {} Hz in, {} Hz out",
                        codec.input_sample_rate(),
                        codec.output_sample_rate()
                    );
                    AudioSlot::Ready(codec)
                }
                Err(err) => {
                    log::error!("audio: codec build failed: {:?}", err);
                    AudioSlot::Failed(err)
                }
            };
        }
        match &mut self.audio {
            AudioSlot::Ready(codec) => Ok(codec),
            AudioSlot::Failed(err) => Err(*err),
            AudioSlot::Unbuilt => Err(AudioError::Unavailable),
        }
    }

    /// Network stack
    pub fn network(&self) -> &H::Network {
        &self.network
    }

    /// Power-save state, `None` without a timer.
    pub fn power_state(&self) -> Option<PowerState> {
        self.power_save.as_ref().map(PowerSaveTimer::state)
    }

    /// Returns `true` in press-to-talk mode; `false` without the tool.
    pub fn press_to_talk_enabled(&self) -> bool {
        self.press_to_talk
            .as_ref()
            .is_some_and(PressToTalkTool::is_press_to_talk_enabled)
    }

    /// The press-to-talk tool, if built.
    pub fn press_to_talk_tool(&mut self) -> Option<&mut PressToTalkTool<H::Settings>> {
        self.press_to_talk.as_mut()
    }

    /// Last state reported through [`on_device_state_changed`](Self::on_device_state_changed).
    pub fn device_state(&self) -> DeviceState {
        self.device_state
    }

    /// Radio power policy.
    ///
    /// Disabling first wakes the board (exit-sleep effects run), then the
    /// network is told.
    pub fn set_power_save_mode(&mut self, enabled: bool) {
        if !enabled {
            self.wake_up();
        }
        self.network.set_power_save_mode(enabled);
    }

    /// Start or stop idle accounting. Never wakes a sleeping board.
    pub fn set_power_save_enabled(&mut self, enabled: bool) {
        if let Some(timer) = self.power_save.as_mut() {
            timer.set_enabled(enabled);
        }
    }

    /// Input activity: restart idle accounting and leave sleep.
    pub fn wake_up(&mut self) -> Option<PowerTransition> {
        let (timer, mut effects) = self.power_parts();
        let timer = timer?;
        let was_idle = timer.is_idle();
        let transition = timer.wake_up(&mut effects);
        if was_idle && transition.is_none() {
            effects.restore_indicator();
        }
        transition
    }

    /// Forget Wi-Fi credentials and restart provisioning.
    pub fn reset_wifi_configuration(&mut self) {
        log::warn!("network: resetting Wi-Fi configuration");
        self.network.reset_wifi_configuration();
    }

    /// Show `state` on the indicator.
    ///
    /// While asleep only the state is recorded; the pattern appears on wake.
    pub fn on_device_state_changed(&mut self, state: DeviceState) {
        log::debug!("device state: {:?}", state);
        self.device_state = state;
        if self.power_state() != Some(PowerState::Asleep) {
            self.indicator
                .set_state(IndicatorPattern::for_device_state(state));
        }
    }

    /// One power-save tick of `elapsed_ms`.
    ///
    /// Sleep is vetoed (idle time restarts) while the application reports
    /// it cannot sleep.
    pub fn power_save_tick<A>(&mut self, elapsed_ms: u32, app: &A) -> Option<PowerTransition>
    where
        A: Application + ?Sized,
    {
        let can_sleep = app.can_enter_sleep_mode();
        let (timer, mut effects) = self.power_parts();
        timer?.tick(elapsed_ms, can_sleep, &mut effects)
    }

    /// Sample the buttons at `now_ms` and dispatch what they raise.
    ///
    /// Also advances indicator blinking by the time since the last poll.
    pub fn poll_buttons<A>(&mut self, now_ms: u32, app: &mut A) -> InputEvents
    where
        A: Application + ?Sized,
    {
        let elapsed = self.last_poll_ms.map_or(0, |last| now_ms.wrapping_sub(last));
        self.last_poll_ms = Some(now_ms);
        self.indicator.advance(elapsed);

        let events = self.inputs.poll(now_ms);
        for &(id, event) in &events {
            self.handle_input(id, event, app);
        }
        events
    }

    /// Dispatch one button event.
    pub fn handle_input<A>(&mut self, id: ButtonId, event: ButtonEvent, app: &mut A)
    where
        A: Application + ?Sized,
    {
        let ctx = DispatchContext {
            device_state: app.device_state(),
            network_connected: self.network.is_connected(),
            press_to_talk: self.press_to_talk_enabled(),
        };
        log::debug!("input: {:?} {:?}", id, event);
        for action in dispatch(id, event, &ctx) {
            self.execute(action, app);
        }
    }

    fn execute<A>(&mut self, action: Action, app: &mut A)
    where
        A: Application + ?Sized,
    {
        match action {
            Action::WakePowerSave => {
                self.wake_up();
            }
            Action::ResetWifiConfiguration => self.reset_wifi_configuration(),
            Action::ToggleChatState => app.toggle_chat_state(),
            Action::StartListening => app.start_listening(),
            Action::StopListening => app.stop_listening(),
            Action::AdjustVolume(delta) => self.update_volume(|v| v.saturating_add_signed(delta)),
            Action::SetVolume(volume) => self.update_volume(|_| volume),
        }
    }

    fn update_volume(&mut self, f: impl FnOnce(u8) -> u8) {
        match self.audio_codec() {
            Ok(codec) => {
                let volume = f(codec.output_volume()).min(MAX_VOLUME);
                codec.set_output_volume(volume);
                log::info!("audio: volume {}", volume);
            }
            Err(err) => log::warn!("audio: volume change ignored: {:?}", err),
        }
    }

    fn power_parts(
        &mut self,
    ) -> (
        Option<&mut PowerSaveTimer>,
        PowerSaveEffects<'_, DisplayOf<H>, IndicatorSlot<H::LedPin>>,
    ) {
        let awake_pattern = IndicatorPattern::for_device_state(self.device_state);
        (
            self.power_save.as_mut(),
            PowerSaveEffects {
                display: &mut self.display,
                indicator: &mut self.indicator,
                awake_pattern,
            },
        )
    }
}

fn abort(step: BootStep, source: impl Into<BootFailure>) -> BootError {
    let err = BootError::new(step, source);
    log::error!("bring-up failed at {}: {:?}", step.name(), err.source);
    err
}

/// What sleep transitions do to the board.
struct PowerSaveEffects<'a, D, I> {
    display: &'a mut D,
    indicator: &'a mut I,
    awake_pattern: IndicatorPattern,
}

impl<D: Display, I: Indicator> PowerSaveEffects<'_, D, I> {
    fn restore_indicator(&mut self) {
        self.indicator.set_state(self.awake_pattern);
    }
}

impl<D: Display, I: Indicator> SleepListener for PowerSaveEffects<'_, D, I> {
    fn on_enter_sleep(&mut self) {
        log::info!("power save: entering sleep");
        self.display.set_power_save_mode(true);
        self.indicator.set_state(IndicatorPattern::Off);
    }

    fn on_exit_sleep(&mut self) {
        log::info!("power save: waking up");
        self.display.set_power_save_mode(false);
        self.restore_indicator();
    }

    fn on_idle(&mut self) {
        log::debug!("power save: idle");
        self.indicator.set_state(IndicatorPattern::Off);
    }
}
