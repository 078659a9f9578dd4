use core::time::Duration;
use std::thread;

use log::debug;

/// One digital output line.
pub trait OutputLine {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

/// Stand-in for a GPIO pin driver; the real lines belong to the board
/// support layer. Level changes are logged so a bench run can be
/// watched.
pub struct SimulatedPin {
    label: &'static str,
    high: bool,
}

impl SimulatedPin {
    /// A pin resting at the inactive (high) level.
    pub fn resting_high(label: &'static str) -> SimulatedPin {
        SimulatedPin { label, high: true }
    }

    #[cfg(test)]
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl OutputLine for SimulatedPin {
    fn set_high(&mut self) {
        if !self.high {
            self.high = true;
            debug!("{} line high", self.label);
        }
    }

    fn set_low(&mut self) {
        if self.high {
            self.high = false;
            debug!("{} line low", self.label);
        }
    }
}

/// Momentary active-low pulse: drop the line, hold, restore. The
/// latching relay input triggers on the edge, not the level.
pub fn pulse(line: &mut impl OutputLine, width: Duration) {
    line.set_low();
    thread::sleep(width);
    line.set_high();
}
