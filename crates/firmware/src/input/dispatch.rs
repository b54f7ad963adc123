//! Button event policy.
//!
//! [`dispatch`] maps one button event to the ordered list of [`Action`]s the
//! board must carry out. It is a pure function of the event and a snapshot
//! of the state it depends on, so every branch is testable without
//! hardware.
//!
//! Boot button:
//!
//! | Event       | Actions                                                           |
//! |-------------|-------------------------------------------------------------------|
//! | `PressDown` | wake power save; start listening if press-to-talk                 |
//! | `PressUp`   | stop listening if press-to-talk                                   |
//! | `Click`     | reset Wi-Fi if starting and offline; toggle chat if not press-to-talk |
//! | `LongPress` | none                                                              |
//!
//! The two `Click` guards are evaluated independently: a click while
//! starting offline in click mode both resets Wi-Fi and toggles the chat.

use heapless::Vec;
use platform::{ButtonEvent, ButtonId, DeviceState};

/// Volume change per click of a volume button.
pub const VOLUME_STEP: i8 = 10;

/// Something the board does in response to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Restart idle accounting, leaving sleep if asleep.
    WakePowerSave,
    /// Forget Wi-Fi credentials and enter provisioning.
    ResetWifiConfiguration,
    /// Start or stop a conversation.
    ToggleChatState,
    /// Begin capturing speech.
    StartListening,
    /// Stop capturing speech.
    StopListening,
    /// Change output volume by this many points.
    AdjustVolume(i8),
    /// Jump to this output volume.
    SetVolume(u8),
}

/// Actions for one event, in execution order.
pub type Actions = Vec<Action, 4>;

/// State the policy depends on, sampled when the event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchContext {
    /// Application state
    pub device_state: DeviceState,
    /// Network link up
    pub network_connected: bool,
    /// Press-to-talk mode active (`false` when the tool is absent)
    pub press_to_talk: bool,
}

/// Actions for `event` on button `id`.
pub fn dispatch(id: ButtonId, event: ButtonEvent, ctx: &DispatchContext) -> Actions {
    let mut actions = Actions::new();
    let mut push = |action| {
        // At most two actions per event.
        let _ = actions.push(action);
    };

    match (id, event) {
        (ButtonId::Boot, ButtonEvent::Click) => {
            if ctx.device_state == DeviceState::Starting && !ctx.network_connected {
                push(Action::ResetWifiConfiguration);
            }
            if !ctx.press_to_talk {
                push(Action::ToggleChatState);
            }
        }
        (ButtonId::Boot, ButtonEvent::PressDown) => {
            push(Action::WakePowerSave);
            if ctx.press_to_talk {
                push(Action::StartListening);
            }
        }
        (ButtonId::Boot, ButtonEvent::PressUp) => {
            if ctx.press_to_talk {
                push(Action::StopListening);
            }
        }
        (ButtonId::VolumeUp | ButtonId::VolumeDown, ButtonEvent::PressDown) => {
            push(Action::WakePowerSave);
        }
        (ButtonId::VolumeUp, ButtonEvent::Click) => push(Action::AdjustVolume(VOLUME_STEP)),
        (ButtonId::VolumeDown, ButtonEvent::Click) => {
            push(Action::AdjustVolume(VOLUME_STEP.saturating_neg()));
        }
        (ButtonId::VolumeUp, ButtonEvent::LongPress) => {
            push(Action::SetVolume(platform::audio::MAX_VOLUME));
        }
        (ButtonId::VolumeDown, ButtonEvent::LongPress) => push(Action::SetVolume(0)),
        (ButtonId::Boot, ButtonEvent::LongPress)
        | (ButtonId::VolumeUp | ButtonId::VolumeDown, ButtonEvent::PressUp) => {}
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(
        device_state: DeviceState,
        network_connected: bool,
        press_to_talk: bool,
    ) -> DispatchContext {
        DispatchContext {
            device_state,
            network_connected,
            press_to_talk,
        }
    }

    #[test]
    fn click_while_starting_offline_resets_wifi_and_toggles() {
        let actions = dispatch(
            ButtonId::Boot,
            ButtonEvent::Click,
            &ctx(DeviceState::Starting, false, false),
        );
        assert_eq!(
            actions.as_slice(),
            &[Action::ResetWifiConfiguration, Action::ToggleChatState]
        );
    }

    #[test]
    fn click_while_starting_offline_in_ptt_only_resets_wifi() {
        let actions = dispatch(
            ButtonId::Boot,
            ButtonEvent::Click,
            &ctx(DeviceState::Starting, false, true),
        );
        assert_eq!(actions.as_slice(), &[Action::ResetWifiConfiguration]);
    }

    #[test]
    fn click_while_idle_toggles_chat() {
        let actions = dispatch(
            ButtonId::Boot,
            ButtonEvent::Click,
            &ctx(DeviceState::Idle, true, false),
        );
        assert_eq!(actions.as_slice(), &[Action::ToggleChatState]);
    }

    #[test]
    fn click_while_starting_online_does_not_reset() {
        let actions = dispatch(
            ButtonId::Boot,
            ButtonEvent::Click,
            &ctx(DeviceState::Starting, true, false),
        );
        assert_eq!(actions.as_slice(), &[Action::ToggleChatState]);
    }

    #[test]
    fn ptt_press_and_release() {
        let c = ctx(DeviceState::Idle, true, true);
        assert_eq!(
            dispatch(ButtonId::Boot, ButtonEvent::PressDown, &c).as_slice(),
            &[Action::WakePowerSave, Action::StartListening]
        );
        assert_eq!(
            dispatch(ButtonId::Boot, ButtonEvent::PressUp, &c).as_slice(),
            &[Action::StopListening]
        );
        assert!(dispatch(ButtonId::Boot, ButtonEvent::Click, &c).is_empty());
    }

    #[test]
    fn press_without_ptt_only_wakes() {
        let c = ctx(DeviceState::Idle, true, false);
        assert_eq!(
            dispatch(ButtonId::Boot, ButtonEvent::PressDown, &c).as_slice(),
            &[Action::WakePowerSave]
        );
        assert!(dispatch(ButtonId::Boot, ButtonEvent::PressUp, &c).is_empty());
    }

    #[test]
    fn volume_buttons() {
        let c = ctx(DeviceState::Idle, true, false);
        assert_eq!(
            dispatch(ButtonId::VolumeUp, ButtonEvent::Click, &c).as_slice(),
            &[Action::AdjustVolume(10)]
        );
        assert_eq!(
            dispatch(ButtonId::VolumeDown, ButtonEvent::Click, &c).as_slice(),
            &[Action::AdjustVolume(-10)]
        );
        assert_eq!(
            dispatch(ButtonId::VolumeDown, ButtonEvent::LongPress, &c).as_slice(),
            &[Action::SetVolume(0)]
        );
        assert_eq!(
            dispatch(ButtonId::VolumeUp, ButtonEvent::PressDown, &c).as_slice(),
            &[Action::WakePowerSave]
        );
    }
}
