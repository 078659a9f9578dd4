use rgb::RGB8;

use control::PulseLine;

#[derive(Debug, Clone, Copy)]
pub enum ReceiverStatus {
    Listening,
    LoadOn,
    LoadOff,
}

impl From<ReceiverStatus> for RGB8 {
    fn from(status: ReceiverStatus) -> RGB8 {
        match status {
            ReceiverStatus::Listening => RGB8::new(0, 10, 0),
            ReceiverStatus::LoadOn => RGB8::new(10, 0, 0),
            ReceiverStatus::LoadOff => RGB8::new(0, 0, 10),
        }
    }
}

impl From<PulseLine> for ReceiverStatus {
    fn from(line: PulseLine) -> ReceiverStatus {
        match line {
            PulseLine::Set => ReceiverStatus::LoadOn,
            PulseLine::Reset => ReceiverStatus::LoadOff,
        }
    }
}
