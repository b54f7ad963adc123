//! Integration test: bring-up and dispatch with optional features compiled out.
//!
//! Tests that:
//!   1. Without `power-save` the board boots with no timer and no timer step
//!   2. Without `power-save` presses, ticks and radio policy still work
//!   3. Without `press-to-talk` a persisted hold mode is ignored
//!
//! Does NOT require physical hardware.
//!
//! Run with: cargo test -p firmware --no-default-features --test optional_features

#![cfg(not(all(feature = "power-save", feature = "press-to-talk")))]
// Integration test file -- intentional test patterns permitted.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
)]

mod common;

// -- Power save compiled out ------------------------------------------------

#[cfg(not(feature = "power-save"))]
mod without_power_save {
    use super::common::{board_with_short_timeouts, Rig};
    use firmware::BootStep;
    use platform::{ButtonEvent, ButtonId, DeviceState};

    #[test]
    fn test_board_has_no_power_state() {
        let rig = Rig::new();
        let board = rig.boot();

        assert_eq!(board.power_state(), None);
        assert!(!board.boot_log().contains(BootStep::PowerSaveTimer));
        assert!(board.boot_log().is_ordered());
    }

    #[test]
    fn test_ticks_never_blank_the_display() {
        let rig = Rig::new();
        let mut board = rig
            .boot_with(board_with_short_timeouts(), rig.peripherals())
            .unwrap();
        let app = rig.app(DeviceState::Idle);

        for _ in 0..10 {
            assert_eq!(board.power_save_tick(1_000, &app), None);
        }
        assert!(board.display().panel().is_on());
        assert!(!rig.log.contains("panel.display_off"));
    }

    #[test]
    fn test_press_down_without_timer_is_harmless() {
        let rig = Rig::new();
        let mut board = rig.boot();
        let mut app = rig.app(DeviceState::Idle);
        rig.log.clear();

        board.handle_input(ButtonId::Boot, ButtonEvent::PressDown, &mut app);
        board.handle_input(ButtonId::Boot, ButtonEvent::PressUp, &mut app);
        board.handle_input(ButtonId::Boot, ButtonEvent::Click, &mut app);

        assert_eq!(rig.log.calls(), vec!["app.toggle_chat_state"]);
    }

    #[test]
    fn test_radio_policy_reaches_network_without_timer() {
        let rig = Rig::new();
        let mut board = rig.boot();
        rig.log.clear();

        board.set_power_save_mode(false);
        board.set_power_save_mode(true);

        assert_eq!(
            rig.log.calls(),
            vec!["network.power_save_off", "network.power_save_on"]
        );
    }
}

// -- Press-to-talk compiled out ---------------------------------------------

#[cfg(not(feature = "press-to-talk"))]
mod without_press_to_talk {
    use super::common::{hold_mode_settings, Rig};
    use firmware::BootStep;
    use platform::{ButtonEvent, ButtonId, DeviceState, ESP32C3_SUPERMINI};

    #[test]
    fn test_persisted_hold_mode_is_ignored() {
        let rig = Rig::new();
        let mut peripherals = rig.peripherals();
        peripherals.settings = hold_mode_settings();
        let mut board = rig.boot_with(ESP32C3_SUPERMINI, peripherals).unwrap();
        let mut app = rig.app(DeviceState::Idle);
        rig.log.clear();

        board.handle_input(ButtonId::Boot, ButtonEvent::PressDown, &mut app);
        board.handle_input(ButtonId::Boot, ButtonEvent::Click, &mut app);

        assert!(!board.press_to_talk_enabled());
        assert!(board.press_to_talk_tool().is_none());
        assert!(!board.boot_log().contains(BootStep::Tools));
        assert_eq!(rig.log.calls(), vec!["app.toggle_chat_state"]);
    }
}
