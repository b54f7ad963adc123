//! Interfaces to the layers above and beside the board.
//!
//! The board never owns the application or the network stack; it calls into
//! them through these traits when buttons are pressed or power modes change.

/// Application (chat) state as seen by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Not reported yet.
    #[default]
    Unknown,
    /// Booting; network not up yet.
    Starting,
    /// Serving the Wi-Fi provisioning portal.
    WifiConfiguring,
    /// Connected and waiting for the user.
    Idle,
    /// Opening the audio channel to the server.
    Connecting,
    /// Capturing the user's speech.
    Listening,
    /// Playing the assistant's reply.
    Speaking,
    /// Firmware upgrade in progress.
    Upgrading,
    /// Waiting for device activation.
    Activating,
    /// Local audio loopback test.
    AudioTesting,
    /// Unrecoverable application error.
    FatalError,
}

/// Application entry points driven by the board.
pub trait Application {
    /// Current device state.
    fn device_state(&self) -> DeviceState;

    /// Start or stop a conversation, depending on the current state.
    fn toggle_chat_state(&mut self);

    /// Begin capturing speech (press-to-talk pressed).
    fn start_listening(&mut self);

    /// Stop capturing speech (press-to-talk released).
    fn stop_listening(&mut self);

    /// Returns `false` while the application must stay awake, e.g. mid-reply.
    fn can_enter_sleep_mode(&self) -> bool {
        true
    }
}

/// Network stack entry points driven by the board.
pub trait Network {
    /// Returns `true` once the station has an IP.
    fn is_connected(&self) -> bool;

    /// Drop stored credentials and restart into the provisioning portal.
    fn reset_wifi_configuration(&mut self);

    /// Enable or disable radio power saving.
    fn set_power_save_mode(&mut self, enabled: bool);
}
