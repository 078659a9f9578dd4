use log::trace;
use rgb::RGB8;

use crate::status::ReceiverStatus;

/// Stand-in for the front-panel status LED. Remembers the base colour
/// and dims it on alternate heartbeats, so liveness stays visible even
/// with no traffic on the channel.
pub struct StatusLamp {
    colour: RGB8,
}

impl StatusLamp {
    pub fn new() -> StatusLamp {
        StatusLamp {
            colour: RGB8::new(0, 0, 0),
        }
    }

    pub fn show(&mut self, status: ReceiverStatus) {
        self.colour = RGB8::from(status);
        trace!("lamp {:?}", self.colour);
    }

    pub fn heartbeat(&mut self, bright: bool) {
        let shown = if bright {
            self.colour
        } else {
            RGB8::new(self.colour.r / 2, self.colour.g / 2, self.colour.b / 2)
        };
        trace!("lamp {:?}", shown);
    }
}

impl Default for StatusLamp {
    fn default() -> Self {
        Self::new()
    }
}
