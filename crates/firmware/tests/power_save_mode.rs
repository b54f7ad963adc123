//! Integration test: power-save timer driving the display and indicator.
//!
//! Tests that:
//!   1. Idle ticks blank the display once the sleep threshold is reached
//!   2. The idle hint darkens the LED and a button press restores it
//!   3. Disabling radio power save wakes the board before the radio is told
//!   4. An application veto keeps the board awake
//!   5. Disabling the timer stops accounting without waking the board
//!   6. State changes while asleep are deferred until wake
//!   7. A zero tick period skips the timer instead of building it
//!
//! Does NOT require physical hardware.
//!
//! Run with: cargo test -p firmware --test power_save_mode

#![cfg(feature = "power-save")]
// Integration test file -- intentional test patterns permitted.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
)]

mod common;

use common::{board_with_short_timeouts, Rig};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
use firmware::BootStep;
use platform::{
    BoardConfig, ButtonEvent, ButtonId, DeviceState, GpioPin, PowerState, PowerTransition,
};

fn short_timeouts_with_led() -> BoardConfig {
    BoardConfig {
        indicator_pin: GpioPin::new(21),
        ..board_with_short_timeouts()
    }
}

// -- Sleep ------------------------------------------------------------------

#[test]
fn test_idle_ticks_blank_display() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let app = rig.app(DeviceState::Idle);

    let transitions: Vec<_> = (0..4).map(|_| board.power_save_tick(1_000, &app)).collect();

    assert_eq!(
        transitions,
        vec![None, Some(PowerTransition::Idle), None, Some(PowerTransition::EnterSleep)]
    );
    assert_eq!(board.power_state(), Some(PowerState::Asleep));
    assert!(!board.display().panel().is_on());
    assert_eq!(rig.log.count("panel.display_off"), 1);
}

#[test]
fn test_supermini_sleeps_after_five_minutes() {
    let rig = Rig::new();
    let mut board = rig.boot();
    let app = rig.app(DeviceState::Idle);

    for _ in 0..299 {
        board.power_save_tick(1_000, &app);
    }
    assert_eq!(board.power_state(), Some(PowerState::Awake));
    assert_eq!(board.power_save_tick(1_000, &app), Some(PowerTransition::EnterSleep));
}

#[test]
fn test_ticks_while_asleep_change_nothing() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let app = rig.app(DeviceState::Idle);
    board.power_save_tick(4_000, &app);
    rig.log.clear();

    for _ in 0..10 {
        assert_eq!(board.power_save_tick(1_000, &app), None);
    }
    assert!(rig.log.calls().is_empty());
}

#[test]
fn test_button_press_wakes_display() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let mut app = rig.app(DeviceState::Idle);
    board.power_save_tick(4_000, &app);

    board.handle_input(ButtonId::Boot, ButtonEvent::PressDown, &mut app);

    assert_eq!(board.power_state(), Some(PowerState::Awake));
    assert!(board.display().panel().is_on());
    // A fresh awake period needs the full threshold again.
    assert_eq!(board.power_save_tick(3_000, &app), Some(PowerTransition::Idle));
    assert_eq!(board.power_state(), Some(PowerState::Awake));
}

// -- Indicator --------------------------------------------------------------

#[test]
fn test_idle_hint_darkens_led_until_input() {
    let rig = Rig::new();
    let mut led = PinMock::new(&[
        Transaction::set(State::High), // Listening: solid
        Transaction::set(State::Low),  // idle hint
        Transaction::set(State::High), // press restores
    ]);
    let mut peripherals = rig.peripherals();
    peripherals.led = Some(led.clone());
    let mut board = rig.boot_with(short_timeouts_with_led(), peripherals).unwrap();
    let mut app = rig.app(DeviceState::Listening);

    board.on_device_state_changed(DeviceState::Listening);
    assert_eq!(board.power_save_tick(2_000, &app), Some(PowerTransition::Idle));
    board.handle_input(ButtonId::Boot, ButtonEvent::PressDown, &mut app);

    drop(board);
    led.done();
}

#[test]
fn test_state_change_while_asleep_shows_on_wake() {
    let rig = Rig::new();
    let mut led = PinMock::new(&[
        Transaction::set(State::Low),  // enter sleep
        Transaction::set(State::High), // wake: Speaking pattern
    ]);
    let mut peripherals = rig.peripherals();
    peripherals.led = Some(led.clone());
    let mut board = rig.boot_with(short_timeouts_with_led(), peripherals).unwrap();
    let mut app = rig.app(DeviceState::Idle);

    board.power_save_tick(4_000, &app);
    board.on_device_state_changed(DeviceState::Speaking);
    assert_eq!(board.device_state(), DeviceState::Speaking);
    board.handle_input(ButtonId::Boot, ButtonEvent::PressDown, &mut app);

    drop(board);
    led.done();
}

// -- Radio policy -----------------------------------------------------------

#[test]
fn test_disabling_power_save_wakes_before_radio() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let app = rig.app(DeviceState::Idle);
    board.power_save_tick(4_000, &app);
    rig.log.clear();

    board.set_power_save_mode(false);

    assert_eq!(rig.log.calls(), vec!["panel.display_on", "network.power_save_off"]);
    assert_eq!(board.power_state(), Some(PowerState::Awake));
    assert_eq!(board.network().power_save(), Some(false));
}

#[test]
fn test_enabling_power_save_leaves_display_alone() {
    let rig = Rig::new();
    let mut board = rig.boot();
    rig.log.clear();

    board.set_power_save_mode(true);

    assert_eq!(rig.log.calls(), vec!["network.power_save_on"]);
    assert!(board.display().panel().is_on());
}

// -- Veto and enable --------------------------------------------------------

#[test]
fn test_application_veto_keeps_board_awake() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let mut app = rig.app(DeviceState::Speaking);
    app.set_can_sleep(false);

    for _ in 0..10 {
        assert_eq!(board.power_save_tick(1_000, &app), None);
    }
    assert_eq!(board.power_state(), Some(PowerState::Awake));

    app.set_can_sleep(true);
    for _ in 0..3 {
        board.power_save_tick(1_000, &app);
    }
    assert_eq!(board.power_state(), Some(PowerState::Awake));
    board.power_save_tick(1_000, &app);
    assert_eq!(board.power_state(), Some(PowerState::Asleep));
}

#[test]
fn test_disabled_timer_never_sleeps() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let app = rig.app(DeviceState::Idle);
    board.set_power_save_enabled(false);

    for _ in 0..10 {
        assert_eq!(board.power_save_tick(1_000, &app), None);
    }
    assert_eq!(board.power_state(), Some(PowerState::Awake));
}

#[test]
fn test_disabling_timer_does_not_wake() {
    let rig = Rig::new();
    let mut board = rig
        .boot_with(board_with_short_timeouts(), rig.peripherals())
        .unwrap();
    let app = rig.app(DeviceState::Idle);
    board.power_save_tick(4_000, &app);

    board.set_power_save_enabled(false);

    assert_eq!(board.power_state(), Some(PowerState::Asleep));
    assert!(!board.display().panel().is_on());
}

// -- Invalid timing ---------------------------------------------------------

#[test]
fn test_zero_tick_period_skips_timer() {
    let rig = Rig::new();
    let mut config = board_with_short_timeouts();
    config.power_save.tick_ms = 0;

    let mut board = rig.boot_with(config, rig.peripherals()).unwrap();
    let app = rig.app(DeviceState::Idle);

    assert_eq!(board.power_state(), None);
    assert!(!board.boot_log().contains(BootStep::PowerSaveTimer));
    assert_eq!(board.power_save_tick(300_000, &app), None);
    assert!(board.display().panel().is_on());
}
