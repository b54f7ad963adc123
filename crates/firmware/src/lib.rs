//! ESP32-C3 SuperMini voice-assistant board
//!
//! Brings up the board's peripherals in dependency order, exposes them to
//! the application as capabilities, dispatches button events and runs the
//! power-save timer.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application / network stack (external, via platform::Application + Network)
//!         ↓
//! Runtime (runtime: event channel, tick tasks)
//!         ↓
//! BoardController (board: bring-up, dispatch, power save)
//!         ↓
//! Adapters (display, audio, indicator, input, tools)
//!         ↓
//! Platform traits (bus, panel, I2S, pins, settings)
//! ```
//!
//! # Features
//!
//! - `power-save` (default) - idle timer that blanks the display
//! - `press-to-talk` (default) - persisted hold-to-talk mode for the boot button
//! - `defmt` - target logging
//! - `tracing` - host logging
//! - `emulator` - desktop simulator (tokio, tracing-subscriber)
//! - `std` - standard library and platform mocks
//!
//! # Examples
//!
//! ## Simulator
//!
//! ```bash
//! cargo run -p firmware --example board_simulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::new_without_default)]

pub(crate) mod log;

pub mod audio;
pub mod board;
pub mod boot;
pub mod display;
pub mod indicator;
pub mod input;
pub mod runtime;
pub mod tools;

// Re-export key types
pub use board::{BoardController, BoardHardware, CodecOf, DisplayOf, Peripherals};
pub use boot::{BootError, BootFailure, BootLog, BootStep, BOOT_SEQUENCE};
pub use display::LcdDisplay;
pub use indicator::{IndicatorSlot, SingleLed};
pub use input::{Action, InputController};
pub use runtime::{run_board, BoardChannel, BoardEvent};
pub use tools::{PressToTalkMode, PressToTalkTool, ToolDescriptor, ToolError};

pub use audio::{I2sAudioFactory, I2sChannel, I2sTransport, NoAudioCodec};
pub use audio::MockI2sChannel;
