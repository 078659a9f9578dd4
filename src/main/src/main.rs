use anyhow::Result;
use log::{info, warn};

mod clock;
mod config;
mod forecast;
mod radio;
mod records;
mod scheduler;

use clock::SystemClock;
use config::{Config, ForecastMode};
use forecast::{ForecastProvider, LinkTestForecast, ReplayForecast};
use radio::UdpRadio;
use records::LogSink;
use scheduler::ControlLoop;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::read();
    info!("hot water controller starting");

    let mut provider: Box<dyn ForecastProvider> = match &config.forecast_mode {
        ForecastMode::Replay(path) => {
            info!("replaying recorded day curve from {path}");
            Box::new(ReplayForecast::from_file(path)?)
        }
        ForecastMode::LinkTest => {
            if config.has_live_credentials() {
                warn!("live market credentials are set but no market client is linked; using the link-test pattern");
            } else {
                info!("market credentials are placeholders; running the link-test pattern");
            }
            Box::new(LinkTestForecast::new())
        }
    };

    let mut radio = UdpRadio::connect(config.radio_target)?;
    info!("radio link aimed at {}", config.radio_target);

    let mut sink = LogSink::new();
    let mut control_loop = ControlLoop::new(
        SystemClock,
        provider.as_mut(),
        &mut radio,
        &mut sink,
        config.loop_config,
    );
    control_loop.run()
}
