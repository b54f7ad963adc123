//! Audio subsystem: I2S codec without a control interface
//!
//! The SuperMini drives a MAX98357A amplifier and an INMP441 microphone.
//! Neither has a control bus, so the "codec" is just the I2S transport.
//!
//! # Structure
//!
//! - `no_codec`: [`NoAudioCodec`] over one (duplex) or two (simplex)
//!   [`I2sChannel`]s, plus the lazy [`I2sAudioFactory`]
//! - `mock`: [`MockI2sChannel`] for host tests
//!
//! # Dependency Injection
//!
//! Application code targets the [`platform::AudioCodec`] trait. The board
//! builds the codec through [`platform::AudioFactory`] on first use:
//!
//! ```rust,ignore
//! let factory = I2sAudioFactory::new(I2sTransport::Simplex { speaker, microphone });
//! // handed to BoardController via Peripherals { audio: factory, .. }
//! ```

pub mod mock;
pub mod no_codec;

pub use mock::{MockI2sChannel, MockI2sError};
pub use no_codec::{
    I2sAudioFactory, I2sChannel, I2sTransport, NoAudioCodec, DEFAULT_OUTPUT_VOLUME,
};
