//! Press-and-hold auto-repeat.
//!
//! A repeat is tagged with the [`Generation`] value current when its button
//! went down. Every press, release and resolution bumps the generation, and a
//! running repeat compares its tag against the live value before each step:
//! once they differ it returns on its own. Nothing ever cancels a repeat from
//! the outside.
//!
//! [`RepeatTimer::drive`] is the long-running half. The dialog runs it next
//! to its input loop, and handlers hand it work through [`RepeatTimer::start`].

use core::cell::Cell;
use core::convert::Infallible;

use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;

use super::alphabet::Step;
use crate::config::RepeatTiming;
use crate::log_debug;

/// Monotonic counter invalidating in-flight repeats.
#[derive(Debug, Default)]
pub struct Generation(Cell<u32>);

impl Generation {
    pub const fn new() -> Self { Self(Cell::new(0)) }

    #[inline]
    pub fn current(&self) -> u32 { self.0.get() }

    /// Advance the counter and return the new value.
    pub fn bump(&self) -> u32 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    #[inline]
    pub fn is_current(
        &self,
        seq: u32,
    ) -> bool {
        self.0.get() == seq
    }
}

/// Work handed from a button handler to the repeat driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatRequest {
    /// Generation the repeat belongs to.
    pub seq: u32,
    pub step: Step,
}

/// Sequence-numbered auto-repeat scheduler for one dialog.
pub struct RepeatTimer {
    generation: Generation,
    requests: Signal<NoopRawMutex, RepeatRequest>,
    timing: RepeatTiming,
}

impl RepeatTimer {
    pub const fn new(timing: RepeatTiming) -> Self {
        Self {
            generation: Generation::new(),
            requests: Signal::new(),
            timing,
        }
    }

    #[inline]
    pub const fn timing(&self) -> RepeatTiming { self.timing }

    /// Current generation value.
    #[inline]
    pub fn generation(&self) -> u32 { self.generation.current() }

    /// Invalidate every repeat started so far and return the new generation.
    #[inline]
    pub fn bump(&self) -> u32 { self.generation.bump() }

    /// Ask the driver to repeat `step` for as long as `seq` stays current.
    ///
    /// Returns immediately; a newer request replaces one the driver has not
    /// picked up yet.
    pub fn start(
        &self,
        seq: u32,
        step: Step,
    ) {
        self.requests.signal(RepeatRequest { seq, step });
    }

    /// Stop any repeat for good, including one not yet picked up.
    pub fn cancel(&self) {
        self.generation.bump();
        self.requests.reset();
    }

    /// Run requested repeats forever, calling `action` for each step.
    ///
    /// A request arriving while a repeat is running replaces it. The replaced
    /// repeat is already stale, since every request comes with a bump.
    pub async fn drive<D, F>(
        &self,
        delay: &mut D,
        mut action: F,
    ) -> Infallible
    where
        D: DelayNs,
        F: FnMut(Step),
    {
        let mut next = None;
        loop {
            let request = match next.take() {
                Some(request) => request,
                None => self.requests.wait().await,
            };

            if let Either::First(newer) = select(self.requests.wait(), self.repeat(request, delay, &mut action)).await {
                next = Some(newer);
            }
        }
    }

    /// The repeat protocol: check, long pause, then check-act-pause until stale.
    async fn repeat<D, F>(
        &self,
        request: RepeatRequest,
        delay: &mut D,
        action: &mut F,
    ) where
        D: DelayNs,
        F: FnMut(Step),
    {
        if !self.generation.is_current(request.seq) {
            return;
        }
        delay.delay_ms(self.timing.initial_delay_ms).await;

        loop {
            if !self.generation.is_current(request.seq) {
                log_debug!("Repeat {} stopped", request.seq);
                return;
            }
            action(request.step);
            delay.delay_ms(self.timing.interval_ms).await;
        }
    }
}

impl Default for RepeatTimer {
    fn default() -> Self { Self::new(RepeatTiming::DEFAULT) }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_futures::select::select3;

    use super::*;
    use crate::testing::VirtualClock;

    /// Press at t=0, release at `release_ms`, count repeated steps.
    fn hold_for(
        timer: &RepeatTimer,
        release_ms: u32,
    ) -> (u32, Vec<u64>) {
        let clock = VirtualClock::new();
        let steps = Cell::new(0);
        let times = core::cell::RefCell::new(Vec::new());

        block_on(async {
            let script = async {
                timer.start(timer.bump(), Step::Next);
                clock.delay().delay_ms(release_ms).await;
                timer.bump();
                clock.delay().delay_ms(2000).await;
            };
            let mut delay = clock.delay();
            let driver = timer.drive(&mut delay, |_| {
                steps.set(steps.get() + 1);
                times.borrow_mut().push(clock.now_ms());
            });
            select3(script, driver, clock.ticker()).await;
        });

        (steps.get(), times.into_inner())
    }

    #[test]
    fn test_generation_bump_invalidates() {
        let generation = Generation::new();
        let seq = generation.bump();
        assert!(generation.is_current(seq));
        generation.bump();
        assert!(!generation.is_current(seq));
    }

    #[test]
    fn test_release_before_initial_delay_never_repeats() {
        let timer = RepeatTimer::default();
        assert_eq!(hold_for(&timer, 900).0, 0);
    }

    #[test]
    fn test_hold_repeats_at_steady_interval() {
        let timer = RepeatTimer::default();
        let (steps, times) = hold_for(&timer, 1400);
        assert_eq!(steps, 2);
        assert!((1000..1010).contains(&times[0]), "first repeat at {}", times[0]);
        assert!((1250..1260).contains(&times[1]), "second repeat at {}", times[1]);
    }

    #[test]
    fn test_longer_hold_adds_steps() {
        let timer = RepeatTimer::default();
        assert_eq!(hold_for(&timer, 1600).0, 3);
    }

    #[test]
    fn test_custom_timing() {
        let timer = RepeatTimer::new(RepeatTiming::new(200, 100));
        // Steps at ~200, 300, 400
        assert_eq!(hold_for(&timer, 450).0, 3);
    }

    #[test]
    fn test_stale_request_is_ignored() {
        let timer = RepeatTimer::default();
        let clock = VirtualClock::new();
        let steps = Cell::new(0);

        block_on(async {
            let script = async {
                let seq = timer.bump();
                timer.bump();
                timer.start(seq, Step::Previous);
                clock.delay().delay_ms(3000).await;
            };
            let mut delay = clock.delay();
            let driver = timer.drive(&mut delay, |_| steps.set(steps.get() + 1));
            select3(script, driver, clock.ticker()).await;
        });

        assert_eq!(steps.get(), 0);
    }

    #[test]
    fn test_newer_press_replaces_running_repeat() {
        let timer = RepeatTimer::default();
        let clock = VirtualClock::new();
        let seen = core::cell::RefCell::new(Vec::new());

        block_on(async {
            let script = async {
                timer.start(timer.bump(), Step::Next);
                clock.delay().delay_ms(500).await;
                timer.start(timer.bump(), Step::Previous);
                clock.delay().delay_ms(1300).await;
                timer.cancel();
                clock.delay().delay_ms(1000).await;
            };
            let mut delay = clock.delay();
            let driver = timer.drive(&mut delay, |step| seen.borrow_mut().push(step));
            select3(script, driver, clock.ticker()).await;
        });

        // Second press at 500 repeats at ~1500 and ~1750; cancelled at 1800
        assert_eq!(*seen.borrow(), vec![Step::Previous, Step::Previous]);
    }
}
