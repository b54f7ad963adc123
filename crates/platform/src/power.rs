//! Power-save timer
//!
//! Counts idle time in ticks and moves the board between [`PowerState::Awake`]
//! and [`PowerState::Asleep`]:
//!
//! ```text
//!            elapsed >= sleep threshold (enabled)
//!   [Awake] -------------------------------------> [Asleep]   on_enter_sleep
//!   [Asleep] ------------------------------------> [Awake]    on_exit_sleep
//!            wake_up()
//! ```
//!
//! The timer owns no peripherals. Whoever drives it passes a
//! [`SleepListener`] to each call; listeners run synchronously inside the
//! call and must not block.

use crate::config::PowerSaveConfig;

/// Power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Normal operation
    #[default]
    Awake,
    /// Display blanked; waiting for input.
    Asleep,
}

/// Transition reported by [`PowerSaveTimer::tick`] and
/// [`PowerSaveTimer::wake_up`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerTransition {
    /// Idle threshold reached; still awake.
    Idle,
    /// Awake to asleep.
    EnterSleep,
    /// Asleep to awake.
    ExitSleep,
}

/// Receives power-save transitions.
pub trait SleepListener {
    /// The board just went to sleep.
    fn on_enter_sleep(&mut self);

    /// The board just woke up.
    fn on_exit_sleep(&mut self);

    /// Idle threshold reached in the current awake period.
    fn on_idle(&mut self) {}
}

impl SleepListener for () {
    fn on_enter_sleep(&mut self) {}
    fn on_exit_sleep(&mut self) {}
}

impl<T: SleepListener + ?Sized> SleepListener for &mut T {
    fn on_enter_sleep(&mut self) {
        (**self).on_enter_sleep();
    }

    fn on_exit_sleep(&mut self) {
        (**self).on_exit_sleep();
    }

    fn on_idle(&mut self) {
        (**self).on_idle();
    }
}

impl<A: SleepListener, B: SleepListener> SleepListener for (A, B) {
    fn on_enter_sleep(&mut self) {
        self.0.on_enter_sleep();
        self.1.on_enter_sleep();
    }

    fn on_exit_sleep(&mut self) {
        self.0.on_exit_sleep();
        self.1.on_exit_sleep();
    }

    fn on_idle(&mut self) {
        self.0.on_idle();
        self.1.on_idle();
    }
}

/// Fan-out in slice order.
impl SleepListener for [&mut dyn SleepListener] {
    fn on_enter_sleep(&mut self) {
        for listener in self.iter_mut() {
            listener.on_enter_sleep();
        }
    }

    fn on_exit_sleep(&mut self) {
        for listener in self.iter_mut() {
            listener.on_exit_sleep();
        }
    }

    fn on_idle(&mut self) {
        for listener in self.iter_mut() {
            listener.on_idle();
        }
    }
}

/// Idle-time state machine.
#[derive(Debug, Clone)]
pub struct PowerSaveTimer {
    state: PowerState,
    enabled: bool,
    elapsed_ms: u32,
    idle_threshold_ms: u32,
    sleep_threshold_ms: u32,
    idle_reported: bool,
}

impl PowerSaveTimer {
    /// New awake timer with zero idle time.
    #[must_use]
    pub const fn new(config: &PowerSaveConfig) -> Self {
        Self {
            state: PowerState::Awake,
            enabled: config.enabled,
            elapsed_ms: 0,
            idle_threshold_ms: config.idle_threshold_ms,
            sleep_threshold_ms: config.sleep_threshold_ms,
            idle_reported: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Returns `true` while idle time accumulates.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if the idle threshold was reported in the current
    /// awake period.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == PowerState::Awake && self.idle_reported
    }

    /// Idle time accumulated since the last reset.
    #[must_use]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Gate idle accounting.
    ///
    /// Enabling a disabled timer restarts the idle count. Disabling never
    /// wakes a sleeping board; use [`wake_up`](Self::wake_up) for that.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.reset_idle();
        }
        self.enabled = enabled;
    }

    /// Account for `elapsed_ms` of idle time.
    ///
    /// `can_sleep == false` is a veto from the application: the idle count
    /// restarts. Ticks while asleep or disabled do nothing.
    pub fn tick<L>(
        &mut self,
        elapsed_ms: u32,
        can_sleep: bool,
        listener: &mut L,
    ) -> Option<PowerTransition>
    where
        L: SleepListener + ?Sized,
    {
        if self.state == PowerState::Asleep || !self.enabled {
            return None;
        }
        if !can_sleep {
            self.reset_idle();
            return None;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);

        if self.elapsed_ms >= self.sleep_threshold_ms {
            self.state = PowerState::Asleep;
            listener.on_enter_sleep();
            return Some(PowerTransition::EnterSleep);
        }
        if !self.idle_reported && self.elapsed_ms >= self.idle_threshold_ms {
            self.idle_reported = true;
            listener.on_idle();
            return Some(PowerTransition::Idle);
        }
        None
    }

    /// Input activity: restart the idle count and leave sleep if asleep.
    pub fn wake_up<L>(&mut self, listener: &mut L) -> Option<PowerTransition>
    where
        L: SleepListener + ?Sized,
    {
        self.reset_idle();
        if self.state == PowerState::Awake {
            return None;
        }
        self.state = PowerState::Awake;
        listener.on_exit_sleep();
        Some(PowerTransition::ExitSleep)
    }

    fn reset_idle(&mut self) {
        self.elapsed_ms = 0;
        self.idle_reported = false;
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        enter: u32,
        exit: u32,
        idle: u32,
    }

    impl SleepListener for Counter {
        fn on_enter_sleep(&mut self) {
            self.enter += 1;
        }
        fn on_exit_sleep(&mut self) {
            self.exit += 1;
        }
        fn on_idle(&mut self) {
            self.idle += 1;
        }
    }

    fn timer() -> PowerSaveTimer {
        PowerSaveTimer::new(&PowerSaveConfig {
            enabled: true,
            tick_ms: 1000,
            idle_threshold_ms: 2000,
            sleep_threshold_ms: 4000,
        })
    }

    #[test]
    fn sleeps_after_threshold() {
        let mut timer = timer();
        let mut counter = Counter::default();
        for _ in 0..3 {
            timer.tick(1000, true, &mut counter);
        }
        assert_eq!(timer.state(), PowerState::Awake);
        assert_eq!(
            timer.tick(1000, true, &mut counter),
            Some(PowerTransition::EnterSleep)
        );
        assert_eq!(timer.state(), PowerState::Asleep);
        assert_eq!(counter.enter, 1);
        assert_eq!(counter.idle, 1);
    }

    #[test]
    fn idle_is_reported_once_and_cleared_by_wake() {
        let mut timer = timer();
        let mut counter = Counter::default();
        assert_eq!(timer.tick(2000, true, &mut counter), Some(PowerTransition::Idle));
        assert!(timer.is_idle());
        assert_eq!(timer.tick(1000, true, &mut counter), None);
        assert_eq!(counter.idle, 1);
        timer.wake_up(&mut counter);
        assert!(!timer.is_idle());
    }

    #[test]
    fn ticks_while_asleep_fire_nothing() {
        let mut timer = timer();
        let mut counter = Counter::default();
        timer.tick(5000, true, &mut counter);
        assert_eq!(timer.tick(1000, true, &mut counter), None);
        assert_eq!(counter.enter, 1);
    }

    #[test]
    fn wake_while_awake_fires_nothing() {
        let mut timer = timer();
        let mut counter = Counter::default();
        timer.tick(1000, true, &mut counter);
        assert_eq!(timer.wake_up(&mut counter), None);
        assert_eq!(counter.exit, 0);
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn wake_from_sleep_fires_exit_once() {
        let mut timer = timer();
        let mut counter = Counter::default();
        timer.tick(4000, true, &mut counter);
        assert_eq!(timer.wake_up(&mut counter), Some(PowerTransition::ExitSleep));
        assert_eq!(timer.wake_up(&mut counter), None);
        assert_eq!(counter.exit, 1);
        assert_eq!(timer.state(), PowerState::Awake);
    }

    #[test]
    fn disabled_timer_does_not_accumulate() {
        let mut timer = timer();
        timer.set_enabled(false);
        timer.tick(10_000, true, &mut ());
        assert_eq!(timer.elapsed_ms(), 0);
        assert_eq!(timer.state(), PowerState::Awake);
    }

    #[test]
    fn enabling_resets_idle_count() {
        let mut timer = timer();
        timer.tick(3000, true, &mut ());
        timer.set_enabled(false);
        timer.set_enabled(true);
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn disabling_does_not_wake() {
        let mut timer = timer();
        timer.tick(4000, true, &mut ());
        timer.set_enabled(false);
        assert_eq!(timer.state(), PowerState::Asleep);
    }

    #[test]
    fn veto_restarts_idle_count() {
        let mut timer = timer();
        let mut counter = Counter::default();
        timer.tick(3000, true, &mut counter);
        timer.tick(1000, false, &mut counter);
        assert_eq!(timer.elapsed_ms(), 0);
        timer.tick(1000, true, &mut counter);
        assert_eq!(timer.state(), PowerState::Awake);
    }

    #[test]
    fn slice_fans_out_in_order() {
        let mut a = Counter::default();
        let mut b = Counter::default();
        {
            let mut listeners: [&mut dyn SleepListener; 2] = [&mut a, &mut b];
            let mut timer = timer();
            timer.tick(4000, true, &mut listeners[..]);
        }
        assert_eq!(a.enter, 1);
        assert_eq!(b.enter, 1);
    }
}
