//! Device tools exposed to the assistant.
//!
//! Only one so far: switching the boot button between press-to-talk
//! ("hold") and click-to-toggle ("click"). The mode survives reboots through
//! the settings store.

use core::str::FromStr;

use platform::{SettingsError, SettingsStore};

use crate::log;

/// Settings namespace of the application.
pub const SETTINGS_NAMESPACE: &str = "application";

/// Settings key holding the press-to-talk flag.
pub const PRESS_TO_TALK_KEY: &str = "press_to_talk";

/// Tool name the assistant calls.
pub const PRESS_TO_TALK_TOOL: &str = "self.set_press_to_talk";

/// Tool description shown to the assistant.
pub const PRESS_TO_TALK_DESCRIPTION: &str = "Switch the talk button mode. \
    \"hold\": talk while the button is held. \"click\": click to start or stop a conversation.";

/// Name, help text and accepted arguments of a tool, as advertised to the
/// assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Name the assistant calls the tool by.
    pub name: &'static str,
    /// Help text.
    pub description: &'static str,
    /// Accepted values of the single string argument.
    pub arguments: &'static [&'static str],
}

/// Descriptor of [`PressToTalkTool`].
pub const PRESS_TO_TALK_DESCRIPTOR: ToolDescriptor = ToolDescriptor {
    name: PRESS_TO_TALK_TOOL,
    description: PRESS_TO_TALK_DESCRIPTION,
    arguments: &["hold", "click"],
};

/// Boot-button talk mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressToTalkMode {
    /// Hold to talk
    Hold,
    /// Click to toggle the conversation
    Click,
}

impl PressToTalkMode {
    /// Argument spelling
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Click => "click",
        }
    }
}

impl FromStr for PressToTalkMode {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hold" => Ok(Self::Hold),
            "click" => Ok(Self::Click),
            _ => Err(ToolError::InvalidMode),
        }
    }
}

/// Tool call errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToolError {
    /// The call names a different tool.
    #[error("unknown tool")]
    UnknownTool,
    /// Argument is neither "hold" nor "click".
    #[error("mode must be \"hold\" or \"click\"")]
    InvalidMode,
    /// The mode could not be persisted.
    #[error("could not store mode: {0}")]
    Settings(#[from] SettingsError),
}

/// Press-to-talk mode, persisted in `S`.
pub struct PressToTalkTool<S> {
    store: S,
    enabled: bool,
}

impl<S: SettingsStore> PressToTalkTool<S> {
    /// Load the persisted mode; unset means click mode.
    pub fn initialize(store: S) -> Self {
        let enabled = store
            .get_bool(SETTINGS_NAMESPACE, PRESS_TO_TALK_KEY)
            .unwrap_or(false);
        log::info!("press-to-talk: {}", if enabled { "hold" } else { "click" });
        Self { store, enabled }
    }

    /// Returns `true` in hold mode.
    pub fn is_press_to_talk_enabled(&self) -> bool {
        self.enabled
    }

    /// Current mode
    pub fn mode(&self) -> PressToTalkMode {
        if self.enabled {
            PressToTalkMode::Hold
        } else {
            PressToTalkMode::Click
        }
    }

    /// Persist and apply `mode`.
    ///
    /// On a storage failure the previous mode stays in effect.
    pub fn set_mode(&mut self, mode: PressToTalkMode) -> Result<(), ToolError> {
        let enabled = mode == PressToTalkMode::Hold;
        self.store
            .set_bool(SETTINGS_NAMESPACE, PRESS_TO_TALK_KEY, enabled)?;
        self.enabled = enabled;
        log::info!("press-to-talk: {}", mode.as_str());
        Ok(())
    }

    /// Tool entry point: parse `mode` and apply it.
    pub fn call(&mut self, mode: &str) -> Result<(), ToolError> {
        self.set_mode(mode.parse()?)
    }

    /// How this tool is advertised.
    pub fn descriptor(&self) -> &'static ToolDescriptor {
        &PRESS_TO_TALK_DESCRIPTOR
    }

    /// Handle an assistant call to tool `name` with argument `mode`.
    pub fn invoke(&mut self, name: &str, mode: &str) -> Result<(), ToolError> {
        if name != PRESS_TO_TALK_DESCRIPTOR.name {
            log::warn!("tools: no tool named {}", name);
            return Err(ToolError::UnknownTool);
        }
        self.call(mode)
    }

    /// Give the settings store back.
    pub fn into_store(self) -> S {
        self.store
    }
}
