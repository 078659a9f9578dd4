use core::time::Duration;
use std::thread;

use anyhow::Result;
use log::{info, trace};

mod lamp;
mod pins;
mod radio;
mod status;

use control::{PulseLine, RadioLink, ReceiverState};
use lamp::StatusLamp;
use pins::{pulse, SimulatedPin};
use radio::UdpListener;
use status::ReceiverStatus;

#[toml_cfg::toml_config]
pub struct TomlConfig {
    #[default("0.0.0.0:47360")]
    listen_addr: &'static str,
    #[default(10)]
    pulse_width_ms: u64,
    #[default(1000)]
    poll_interval_ms: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TOML_CONFIG;
    let mut radio = UdpListener::bind(config.listen_addr)?;
    info!("listening for symbols on {}", config.listen_addr);

    // Latching relay inputs rest high; a short low edge triggers them.
    let mut set_line = SimulatedPin::resting_high("set");
    let mut reset_line = SimulatedPin::resting_high("reset");
    let mut lamp = StatusLamp::new();
    lamp.show(ReceiverStatus::Listening);

    let pulse_width = Duration::from_millis(config.pulse_width_ms);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let mut state = ReceiverState::new();

    loop {
        let message = radio.receive();
        if let Some(line) = state.on_poll(message) {
            match line {
                PulseLine::Set => pulse(&mut set_line, pulse_width),
                PulseLine::Reset => pulse(&mut reset_line, pulse_width),
            }
            info!("acted on {line:?}");
            lamp.show(ReceiverStatus::from(line));
        }

        thread::sleep(poll_interval);
        lamp.heartbeat(state.heartbeat());
        trace!("{}", if state.heartbeat() { "o" } else { "." });
    }
}
