//! Audio codec abstraction
//!
//! The board exposes one audio capability. Whether the microphone and the
//! speaker share a single bidirectional I2S channel (duplex) or use two
//! independent ones (simplex) is fixed by the wiring and chosen when the
//! codec is built, never switched at runtime.

use crate::gpio::GpioPin;

/// Audio capability handed to the application layer.
pub trait AudioCodec {
    /// Sample rate of the capture path in Hz.
    fn input_sample_rate(&self) -> u32;

    /// Sample rate of the playback path in Hz.
    fn output_sample_rate(&self) -> u32;

    /// How the transport is wired.
    fn channel_layout(&self) -> ChannelLayout;

    /// Start or stop the capture path.
    fn enable_input(&mut self, enable: bool) -> Result<(), AudioError>;

    /// Start or stop the playback path.
    fn enable_output(&mut self, enable: bool) -> Result<(), AudioError>;

    /// Current output volume (0-100).
    fn output_volume(&self) -> u8;

    /// Set output volume; values above 100 clamp to 100.
    fn set_output_volume(&mut self, volume: u8);

    /// Read captured samples, returning how many were filled.
    fn read(&mut self, samples: &mut [i16]) -> Result<usize, AudioError>;

    /// Queue samples for playback, returning how many were accepted.
    fn write(&mut self, samples: &[i16]) -> Result<usize, AudioError>;
}

/// Builds the board's audio codec on first use.
///
/// Construction is deferred until the application first asks for audio, so
/// the factory holds whatever transport handles it needs until then.
pub trait AudioFactory {
    /// Codec produced by this factory.
    type Codec: AudioCodec;

    /// Build the codec for `config`.
    fn build(&mut self, config: &AudioConfig) -> Result<Self::Codec, AudioError>;
}

/// Transport wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelLayout {
    /// One shared bidirectional channel.
    Duplex,
    /// Separate input and output channels.
    Simplex,
}

/// I2S pin sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioPins {
    /// Shared bit clock and word select; `mclk` is optional.
    Duplex {
        /// Master clock (`NC` when the codec derives its own).
        mclk: GpioPin,
        /// Bit clock.
        bclk: GpioPin,
        /// Word select.
        ws: GpioPin,
        /// Data towards the amplifier.
        dout: GpioPin,
        /// Data from the microphone.
        din: GpioPin,
    },
    /// Independent speaker and microphone channels.
    Simplex {
        /// Speaker bit clock.
        spk_bclk: GpioPin,
        /// Speaker word select.
        spk_ws: GpioPin,
        /// Speaker data.
        spk_dout: GpioPin,
        /// Microphone serial clock.
        mic_sck: GpioPin,
        /// Microphone word select.
        mic_ws: GpioPin,
        /// Microphone data.
        mic_din: GpioPin,
    },
}

/// Pins of one I2S channel. Lines the channel does not drive are `NC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sPins {
    /// Master clock.
    pub mclk: GpioPin,
    /// Bit clock.
    pub bclk: GpioPin,
    /// Word select.
    pub ws: GpioPin,
    /// Data out.
    pub dout: GpioPin,
    /// Data in.
    pub din: GpioPin,
}

impl AudioPins {
    /// Layout implied by the pin set.
    #[must_use]
    pub fn layout(&self) -> ChannelLayout {
        match self {
            Self::Duplex { .. } => ChannelLayout::Duplex,
            Self::Simplex { .. } => ChannelLayout::Simplex,
        }
    }

    /// Every pin of the set; unused slots are `NC`.
    #[must_use]
    pub fn pins(&self) -> [GpioPin; 6] {
        match *self {
            Self::Duplex {
                mclk,
                bclk,
                ws,
                dout,
                din,
            } => [mclk, bclk, ws, dout, din, GpioPin::NC],
            Self::Simplex {
                spk_bclk,
                spk_ws,
                spk_dout,
                mic_sck,
                mic_ws,
                mic_din,
            } => [spk_bclk, spk_ws, spk_dout, mic_sck, mic_ws, mic_din],
        }
    }

    /// Returns `true` when every required line is wired.
    ///
    /// Only the duplex master clock may be left unconnected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match *self {
            Self::Duplex {
                bclk, ws, dout, din, ..
            } => [bclk, ws, dout, din].iter().all(|pin| pin.is_connected()),
            Self::Simplex { .. } => self.pins().iter().all(|pin| pin.is_connected()),
        }
    }

    /// Pins of the channel that carries playback.
    #[must_use]
    pub fn output_channel(&self) -> I2sPins {
        match *self {
            Self::Duplex {
                mclk,
                bclk,
                ws,
                dout,
                din,
            } => I2sPins {
                mclk,
                bclk,
                ws,
                dout,
                din,
            },
            Self::Simplex {
                spk_bclk,
                spk_ws,
                spk_dout,
                ..
            } => I2sPins {
                mclk: GpioPin::NC,
                bclk: spk_bclk,
                ws: spk_ws,
                dout: spk_dout,
                din: GpioPin::NC,
            },
        }
    }

    /// Pins of the channel that carries capture.
    #[must_use]
    pub fn input_channel(&self) -> I2sPins {
        match *self {
            Self::Duplex { .. } => self.output_channel(),
            Self::Simplex {
                mic_sck,
                mic_ws,
                mic_din,
                ..
            } => I2sPins {
                mclk: GpioPin::NC,
                bclk: mic_sck,
                ws: mic_ws,
                dout: GpioPin::NC,
                din: mic_din,
            },
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioConfig {
    /// Capture sample rate in Hz.
    pub input_sample_rate: u32,
    /// Playback sample rate in Hz.
    pub output_sample_rate: u32,
    /// Pin set; also selects duplex or simplex.
    pub pins: AudioPins,
}

/// Audio errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// The transport driver failed.
    #[error("audio transport error")]
    Transport,
    /// The path is not enabled.
    #[error("audio path not enabled")]
    NotEnabled,
    /// The factory has no transport left to build from.
    #[error("audio transport unavailable")]
    Unavailable,
    /// A required I2S line is not wired.
    #[error("audio pin not connected")]
    PinNotConnected,
}

/// Highest output volume.
pub const MAX_VOLUME: u8 = 100;
