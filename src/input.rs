//! Button Input
//!
//! Produces one debounced up/down observation per call from the two
//! power-adjust buttons.
//!
//! # Sampling sequence
//!
//! 1. Wait until either button is pressed.
//! 2. Wait out the debounce delay.
//! 3. Poll until both buttons are released, latching every button seen
//!    pressed and lighting its LED.
//!
//! The call only returns once both buttons are up, so one press can never
//! trigger twice.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::config::{BUTTON_DEBOUNCE_MS, BUTTON_POLL_US};
use crate::types::ButtonEvent;

/// Source of power-adjust events
#[allow(async_fn_in_trait)]
pub trait ControlInput {
    /// Block until a press-then-release cycle completes
    async fn sample(&mut self) -> ButtonEvent;

    /// Forget the latched press (called once the adjustment is applied)
    fn clear_latch(&mut self) {}
}

/// Polled two-button sampler over active-low inputs
pub struct ButtonSampler<L, R, DL, UL, D> {
    left: L,
    right: R,
    down_led: DL,
    up_led: UL,
    delay: D,
    debounce_ms: u32,
    poll_us: u32,
}

impl<L, R, DL, UL, D> ButtonSampler<L, R, DL, UL, D>
where
    L: InputPin,
    R: InputPin,
    DL: OutputPin,
    UL: OutputPin,
    D: DelayNs,
{
    /// Create a sampler with the default debounce and poll periods
    pub fn new(left: L, right: R, down_led: DL, up_led: UL, delay: D) -> Self {
        Self {
            left,
            right,
            down_led,
            up_led,
            delay,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            poll_us: BUTTON_POLL_US,
        }
    }

    /// Override debounce and poll timing
    #[must_use]
    pub fn with_timing(self, debounce_ms: u32, poll_us: u32) -> Self {
        Self {
            debounce_ms,
            poll_us,
            ..self
        }
    }

    /// Debounce delay in milliseconds
    #[must_use]
    pub const fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    fn read(&mut self) -> (bool, bool) {
        // Read errors count as released
        let down = self.left.is_low().unwrap_or(false);
        let up = self.right.is_low().unwrap_or(false);
        (down, up)
    }
}

impl<L, R, DL, UL, D> ControlInput for ButtonSampler<L, R, DL, UL, D>
where
    L: InputPin,
    R: InputPin,
    DL: OutputPin,
    UL: OutputPin,
    D: DelayNs,
{
    async fn sample(&mut self) -> ButtonEvent {
        loop {
            let (down, up) = self.read();
            if down || up {
                break;
            }
            self.delay.delay_us(self.poll_us).await;
        }

        self.delay.delay_ms(self.debounce_ms).await;

        let mut event = ButtonEvent::NONE;
        loop {
            let (down, up) = self.read();
            if !down && !up {
                break;
            }
            if down {
                event.down = true;
                let _ = self.down_led.set_high();
            }
            if up {
                event.up = true;
                let _ = self.up_led.set_high();
            }
            self.delay.delay_us(self.poll_us).await;
        }

        debug!("buttons released: {:?}", event);
        event
    }

    fn clear_latch(&mut self) {
        let _ = self.down_led.set_low();
        let _ = self.up_led.set_low();
    }
}
