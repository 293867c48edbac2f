//! Push-buttons A and B, debounced by a press lockout and reported through an event queue.
//!
//! Each button runs in its own [`button_task`]. The task waits for a falling edge, drops
//! edges that land inside [`PRESS_LOCKOUT`] of the last accepted press, and pushes a
//! [`ButtonId`] into [`BUTTON_EVENTS`]. The main loop is the queue's only consumer; the
//! tasks never touch the display, the indicator LEDs, or the matrix.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant};

// ============================================================================
// Constants
// ============================================================================

/// Minimum time between two accepted presses of the same button.
pub const PRESS_LOCKOUT: Duration = Duration::from_millis(300);

/// Presses the queue holds before new ones are dropped.
pub const BUTTON_QUEUE_DEPTH: usize = 4;

// ============================================================================
// ButtonId - Which button was pressed
// ============================================================================

/// One of the board's two push-buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum ButtonId {
    /// Button A, which toggles the green indicator LED.
    A,
    /// Button B, which toggles the blue indicator LED.
    B,
}

/// Queue of accepted presses, fed by the button tasks and drained by the main loop.
pub type ButtonEvents = Channel<CriticalSectionRawMutex, ButtonId, BUTTON_QUEUE_DEPTH>;

/// The board's button event queue.
pub static BUTTON_EVENTS: ButtonEvents = Channel::new();

// ============================================================================
// PressLockout - Time-based debounce
// ============================================================================

/// Accepts a press only if the previous accepted press is more than [`PRESS_LOCKOUT`] old.
///
/// Contact bounce shows up as a burst of edges within a few milliseconds; everything in
/// the burst after the first edge falls inside the lockout and is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressLockout {
    last_accepted: Option<Instant>,
}

impl PressLockout {
    /// A lockout that accepts the first press unconditionally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_accepted: None,
        }
    }

    /// Decides whether an edge seen at `now` is a new press, and records it if so.
    pub fn accept(&mut self, now: Instant) -> bool {
        let accepted = self
            .last_accepted
            .is_none_or(|last| now.saturating_duration_since(last) > PRESS_LOCKOUT);
        if accepted {
            self.last_accepted = Some(now);
        }
        accepted
    }
}

// ============================================================================
// Button Device
// ============================================================================

#[cfg(not(feature = "host"))]
pub use device::{Button, button_task};

#[cfg(not(feature = "host"))]
mod device {
    use embassy_rp::Peri;
    use embassy_rp::gpio::{Input, Pin, Pull};
    use embassy_time::Instant;

    use super::{ButtonEvents, ButtonId, PressLockout};

    /// A push-button wired from its pin to ground, read through the internal pull-up.
    pub struct Button<'a> {
        input: Input<'a>,
        id: ButtonId,
        lockout: PressLockout,
    }

    impl<'a> Button<'a> {
        /// Configures `pin` as a pulled-up input for button `id`.
        #[must_use]
        pub fn new<P: Pin>(pin: Peri<'a, P>, id: ButtonId) -> Self {
            Self {
                input: Input::new(pin, Pull::Up),
                id,
                lockout: PressLockout::new(),
            }
        }

        /// Which button this is.
        #[must_use]
        pub const fn id(&self) -> ButtonId {
            self.id
        }

        /// Waits for the next press that clears the lockout. Returns on the falling edge
        /// and does not wait for release.
        pub async fn wait_for_press(&mut self) {
            loop {
                self.input.wait_for_falling_edge().await;
                if self.lockout.accept(Instant::now()) {
                    return;
                }
            }
        }
    }

    /// Reports every accepted press of `button` on `events`.
    ///
    /// A full queue drops the press; the main loop is already behind and the next press
    /// toggles the same LED anyway.
    #[embassy_executor::task(pool_size = 2)]
    pub async fn button_task(mut button: Button<'static>, events: &'static ButtonEvents) -> ! {
        loop {
            button.wait_for_press().await;
            if events.try_send(button.id()).is_err() {
                defmt::warn!("button {}: event queue full, press dropped", button.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Instant;

    use super::PressLockout;

    #[test]
    fn bounces_inside_the_lockout_are_dropped() {
        let mut lockout = PressLockout::new();
        assert!(lockout.accept(Instant::from_millis(1_000)));
        assert!(!lockout.accept(Instant::from_millis(1_002)));
        assert!(!lockout.accept(Instant::from_millis(1_300)));
        assert!(lockout.accept(Instant::from_millis(1_301)));
    }

    #[test]
    fn lockout_restarts_from_the_last_accepted_press() {
        let mut lockout = PressLockout::new();
        assert!(lockout.accept(Instant::from_millis(0)));
        assert!(!lockout.accept(Instant::from_millis(250)));
        // Rejected edges do not extend the window.
        assert!(lockout.accept(Instant::from_millis(301)));
    }
}
