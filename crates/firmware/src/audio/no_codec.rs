//! Codec-less I2S audio.

use platform::{AudioCodec, AudioConfig, AudioError, AudioFactory, ChannelLayout, I2sPins};

use crate::log;

/// Output volume before the application sets one.
pub const DEFAULT_OUTPUT_VOLUME: u8 = 70;

/// One I2S channel (a peripheral instance with its pins).
pub trait I2sChannel {
    /// Error type returned by channel operations.
    type Error: core::fmt::Debug;

    /// Route `pins` to the peripheral and set the frame clock to
    /// `sample_rate_hz`. Runs once, before the channel is first enabled.
    fn configure(&mut self, pins: &I2sPins, sample_rate_hz: u32) -> Result<(), Self::Error>;

    /// Start or stop the channel's clocks and DMA.
    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Read received samples; returns how many were filled.
    fn read(&mut self, samples: &mut [i16]) -> Result<usize, Self::Error>;

    /// Queue samples for transmission; returns how many were accepted.
    fn write(&mut self, samples: &[i16]) -> Result<usize, Self::Error>;
}

/// How the channels are wired.
pub enum I2sTransport<C> {
    /// One bidirectional channel shared by speaker and microphone.
    Duplex(C),
    /// Independent channels.
    Simplex {
        /// Towards the amplifier.
        speaker: C,
        /// From the microphone.
        microphone: C,
    },
}

impl<C> I2sTransport<C> {
    /// Layout of this transport.
    pub fn layout(&self) -> ChannelLayout {
        match self {
            Self::Duplex(_) => ChannelLayout::Duplex,
            Self::Simplex { .. } => ChannelLayout::Simplex,
        }
    }
}

/// [`AudioCodec`] straight on I2S.
///
/// In duplex mode the shared channel runs while either path is enabled.
/// Volume is recorded for the application; the amplifier has no gain
/// control, so samples pass through unscaled.
pub struct NoAudioCodec<C> {
    input_sample_rate: u32,
    output_sample_rate: u32,
    transport: I2sTransport<C>,
    input_enabled: bool,
    output_enabled: bool,
    volume: u8,
}

impl<C: I2sChannel> NoAudioCodec<C> {
    /// Codec over `transport`, both paths disabled.
    ///
    /// Each channel is configured with its pins and sample rate from
    /// `config`. In duplex mode the shared channel runs at the output rate.
    ///
    /// # Errors
    ///
    /// - [`AudioError::Unavailable`] if the transport wiring does not match
    ///   the pin set in `config`
    /// - [`AudioError::PinNotConnected`] if a required I2S line is `NC`
    /// - [`AudioError::Transport`] if a channel rejects its configuration
    pub fn new(config: &AudioConfig, mut transport: I2sTransport<C>) -> Result<Self, AudioError> {
        let pins = &config.pins;
        if transport.layout() != pins.layout() {
            log::error!("audio: transport does not match configured pins");
            return Err(AudioError::Unavailable);
        }
        if !pins.is_complete() {
            log::error!("audio: required I2S pin not connected");
            return Err(AudioError::PinNotConnected);
        }

        let configured = match &mut transport {
            I2sTransport::Duplex(channel) => {
                channel.configure(&pins.output_channel(), config.output_sample_rate)
            }
            I2sTransport::Simplex {
                speaker,
                microphone,
            } => speaker
                .configure(&pins.output_channel(), config.output_sample_rate)
                .and_then(|()| {
                    microphone.configure(&pins.input_channel(), config.input_sample_rate)
                }),
        };
        configured.map_err(|_| {
            log::error!("audio: I2S channel configuration failed");
            AudioError::Transport
        })?;

        Ok(Self {
            input_sample_rate: config.input_sample_rate,
            output_sample_rate: config.output_sample_rate,
            transport,
            input_enabled: false,
            output_enabled: false,
            volume: DEFAULT_OUTPUT_VOLUME,
        })
    }

    /// Underlying transport
    pub fn transport(&self) -> &I2sTransport<C> {
        &self.transport
    }

    fn switch(&mut self, input: bool, enable: bool) -> Result<(), AudioError> {
        let result = match &mut self.transport {
            I2sTransport::Duplex(channel) => {
                let other = if input { self.output_enabled } else { self.input_enabled };
                channel.set_enabled(enable || other)
            }
            I2sTransport::Simplex { microphone, .. } if input => microphone.set_enabled(enable),
            I2sTransport::Simplex { speaker, .. } => speaker.set_enabled(enable),
        };
        result.map_err(|_| AudioError::Transport)?;
        if input {
            self.input_enabled = enable;
        } else {
            self.output_enabled = enable;
        }
        Ok(())
    }
}

impl<C: I2sChannel> AudioCodec for NoAudioCodec<C> {
    fn input_sample_rate(&self) -> u32 {
        self.input_sample_rate
    }

    fn output_sample_rate(&self) -> u32 {
        self.output_sample_rate
    }

    fn channel_layout(&self) -> ChannelLayout {
        self.transport.layout()
    }

    fn enable_input(&mut self, enable: bool) -> Result<(), AudioError> {
        self.switch(true, enable)
    }

    fn enable_output(&mut self, enable: bool) -> Result<(), AudioError> {
        self.switch(false, enable)
    }

    fn output_volume(&self) -> u8 {
        self.volume
    }

    fn set_output_volume(&mut self, volume: u8) {
        self.volume = volume.min(platform::audio::MAX_VOLUME);
    }

    fn read(&mut self, samples: &mut [i16]) -> Result<usize, AudioError> {
        if !self.input_enabled {
            return Err(AudioError::NotEnabled);
        }
        let channel = match &mut self.transport {
            I2sTransport::Duplex(channel) => channel,
            I2sTransport::Simplex { microphone, .. } => microphone,
        };
        channel.read(samples).map_err(|_| AudioError::Transport)
    }

    fn write(&mut self, samples: &[i16]) -> Result<usize, AudioError> {
        if !self.output_enabled {
            return Err(AudioError::NotEnabled);
        }
        let channel = match &mut self.transport {
            I2sTransport::Duplex(channel) => channel,
            I2sTransport::Simplex { speaker, .. } => speaker,
        };
        channel.write(samples).map_err(|_| AudioError::Transport)
    }
}

/// Holds the I2S channels until the board first asks for audio.
pub struct I2sAudioFactory<C> {
    transport: Option<I2sTransport<C>>,
}

impl<C> I2sAudioFactory<C> {
    /// Factory that will build over `transport`.
    pub fn new(transport: I2sTransport<C>) -> Self {
        Self {
            transport: Some(transport),
        }
    }
}

impl<C: I2sChannel> AudioFactory for I2sAudioFactory<C> {
    type Codec = NoAudioCodec<C>;

    fn build(&mut self, config: &AudioConfig) -> Result<Self::Codec, AudioError> {
        let transport = self.transport.take().ok_or(AudioError::Unavailable)?;
        NoAudioCodec::new(config, transport)
    }
}
