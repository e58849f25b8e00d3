//! Status LED
//!
//! Fire-and-forget: pin errors are ignored and nothing here feeds back into
//! scheduling or delivery.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub struct StatusLed<P> {
    pin: P,
    half_period_ms: u32,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P, half_period_ms: u32) -> Self {
        Self {
            pin,
            half_period_ms,
        }
    }

    /// Blink `count` times, leaving the LED off
    pub fn flash<D: DelayNs>(&mut self, delay: &mut D, count: u8) {
        for _ in 0..count {
            let _ = self.pin.set_high();
            delay.delay_ms(self.half_period_ms);
            let _ = self.pin.set_low();
            delay.delay_ms(self.half_period_ms);
        }
    }

    /// Light the LED solid (fatal startup state)
    pub fn hold_on(&mut self) {
        let _ = self.pin.set_high();
    }

    pub fn off(&mut self) {
        let _ = self.pin.set_low();
    }

    pub fn release(self) -> P {
        self.pin
    }
}
