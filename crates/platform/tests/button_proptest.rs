//! Property-based tests for the button state machine.
//! Random raw sample streams, including bounce, must still produce a
//! well-formed event sequence.

#![allow(clippy::arithmetic_side_effects)]

use platform::{Button, ButtonConfig, ButtonEvent, ButtonId, GpioPin, PinState};
use proptest::prelude::*;

proptest! {
    /// PressDown and PressUp alternate starting with PressDown; Click and
    /// LongPress only appear inside or right after a press.
    #[test]
    fn edges_alternate(samples in proptest::collection::vec((any::<bool>(), 1u32..400), 0..300)) {
        let mut button = Button::new(ButtonId::Boot, &ButtonConfig::active_low(GpioPin::new(9)));
        let mut now = 0u32;
        let mut pressed = false;
        let mut long_in_press = false;
        let mut last = None;
        for (high, step) in samples {
            now = now.wrapping_add(step);
            for event in button.sample(PinState::from(high), now) {
                match event {
                    ButtonEvent::PressDown => {
                        prop_assert!(!pressed);
                        pressed = true;
                        long_in_press = false;
                    }
                    ButtonEvent::PressUp => {
                        prop_assert!(pressed);
                        pressed = false;
                    }
                    ButtonEvent::LongPress => {
                        prop_assert!(pressed);
                        prop_assert!(!long_in_press);
                        long_in_press = true;
                    }
                    ButtonEvent::Click => {
                        prop_assert_eq!(last, Some(ButtonEvent::PressUp));
                        prop_assert!(!long_in_press);
                    }
                }
                last = Some(event);
            }
        }
    }

    /// A level that never stays put for the debounce window never
    /// produces an event.
    #[test]
    fn bounce_below_window_is_silent(toggles in 1usize..100, gap in 1u32..20) {
        let mut button = Button::new(ButtonId::Boot, &ButtonConfig::active_low(GpioPin::new(9)));
        let mut now = 0u32;
        let mut high = true;
        for _ in 0..toggles {
            high = !high;
            now += gap;
            prop_assert!(button.sample(PinState::from(high), now).is_empty());
        }
    }
}
