//! Board event loop.
//!
//! # Architecture
//!
//! ```text
//! button_poll_task (10 ms) ──┐
//!                            ├──> Channel<BoardEvent> ──> run_board(board, app)
//! power_save_task  (1 s)  ───┘
//! ```
//!
//! The producers only tick; all peripheral access happens in the single
//! consumer, which owns the [`BoardController`] and handles one event at a
//! time. The application (or a simulator) may inject events on the same
//! channel.
//!
//! # Overflow handling
//!
//! Producers use [`try_send_event`]: if the consumer stalls and the channel
//! is full, ticks are dropped rather than blocking the producer. A dropped
//! poll or tick only delays the next one.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker};
use platform::{Application, ButtonEvent, ButtonId, DeviceState};

use crate::board::{BoardController, BoardHardware};
use crate::log;

/// Button sampling period.
pub const BUTTON_POLL_MS: u64 = 10;

/// Depth of the board event channel.
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Events handled by [`run_board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardEvent {
    /// Sample the button pins.
    PollButtons,
    /// One power-save tick elapsed.
    PowerSaveTick,
    /// A button event from another source (simulator keys, remote).
    Button(ButtonId, ButtonEvent),
    /// The application changed state.
    DeviceStateChanged(DeviceState),
    /// Radio power policy changed.
    SetPowerSaveMode(bool),
}

/// Channel carrying [`BoardEvent`]s.
pub type BoardChannel<M> = Channel<M, BoardEvent, EVENT_QUEUE_DEPTH>;

/// Attempt to send an event without blocking.
///
/// Returns `true` if the event was enqueued, `false` if the channel was full
/// and the event was dropped.
pub fn try_send_event<M: RawMutex>(channel: &BoardChannel<M>, event: BoardEvent) -> bool {
    channel.try_send(event).is_ok()
}

/// Free-running millisecond counter; wraps after ~49 days.
#[allow(clippy::cast_possible_truncation)] // wrap-around is handled by every consumer
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Enqueue [`BoardEvent::PollButtons`] every [`BUTTON_POLL_MS`].
pub async fn button_poll_task<M: RawMutex>(channel: &BoardChannel<M>) {
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));
    loop {
        ticker.next().await;
        if !try_send_event(channel, BoardEvent::PollButtons) {
            log::debug!("runtime: button poll dropped");
        }
    }
}

/// Enqueue [`BoardEvent::PowerSaveTick`] every `tick_ms`, at least every
/// millisecond.
pub async fn power_save_task<M: RawMutex>(channel: &BoardChannel<M>, tick_ms: u32) {
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(tick_ms.max(1))));
    loop {
        ticker.next().await;
        if !try_send_event(channel, BoardEvent::PowerSaveTick) {
            log::warn!("runtime: power-save tick dropped");
        }
    }
}

/// Handle one event at `now_ms`.
pub fn handle_event<H, A>(
    board: &mut BoardController<H>,
    app: &mut A,
    event: BoardEvent,
    now_ms: u32,
) where
    H: BoardHardware,
    A: Application + ?Sized,
{
    match event {
        BoardEvent::PollButtons => {
            board.poll_buttons(now_ms, app);
        }
        BoardEvent::PowerSaveTick => {
            let tick_ms = board.config().power_save.tick_ms;
            if let Some(transition) = board.power_save_tick(tick_ms, app) {
                log::debug!("runtime: {:?}", transition);
            }
        }
        BoardEvent::Button(id, event) => board.handle_input(id, event, app),
        BoardEvent::DeviceStateChanged(state) => board.on_device_state_changed(state),
        BoardEvent::SetPowerSaveMode(enabled) => board.set_power_save_mode(enabled),
    }
}

/// Consume events forever.
pub async fn run_board<M, H, A>(
    channel: &BoardChannel<M>,
    board: &mut BoardController<H>,
    app: &mut A,
) where
    M: RawMutex,
    H: BoardHardware,
    A: Application + ?Sized,
{
    log::info!("runtime: event loop started");
    loop {
        let event = channel.receive().await;
        handle_event(board, app, event, now_ms());
    }
}
