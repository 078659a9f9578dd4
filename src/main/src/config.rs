use core::time::Duration;

use control::LoopConfig;

#[toml_cfg::toml_config]
pub struct TomlConfig {
    #[default(1800)]
    period_interval: u64,
    #[default(300)]
    sub_interval: u64,
    #[default(60)]
    comms_delay: u64,
    #[default(5)]
    default_threshold_index: u16,
    #[default("psk_xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx")]
    api_token: &'static str,
    #[default("XXXXXXXXXXXXXXXXXXXXXXXXXX")]
    site_id: &'static str,
    #[default("127.0.0.1:47360")]
    radio_target: &'static str,
    #[default("")]
    replay_file: &'static str,
}

/// Which forecast source the controller runs against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForecastMode {
    /// Canned day curve with an alternating now price, for exercising
    /// the radio link without market credentials.
    LinkTest,
    /// Day curve replayed from a recorded JSON file.
    Replay(&'static str),
}

pub struct Config {
    pub loop_config: LoopConfig,
    pub api_token: &'static str,
    pub site_id: &'static str,
    pub radio_target: &'static str,
    pub forecast_mode: ForecastMode,
}

impl Config {
    pub fn read() -> Self {
        Config::from(TOML_CONFIG)
    }

    /// Credentials count as live only once they stop looking like the
    /// placeholders shipped in the default configuration.
    pub fn has_live_credentials(&self) -> bool {
        !(self.api_token.is_empty()
            || self.api_token.starts_with("psk_x")
            || self.site_id.is_empty()
            || self.site_id.starts_with('X'))
    }
}

impl From<TomlConfig> for Config {
    fn from(config: TomlConfig) -> Self {
        let forecast_mode = if config.replay_file.is_empty() {
            ForecastMode::LinkTest
        } else {
            ForecastMode::Replay(config.replay_file)
        };
        Config {
            loop_config: LoopConfig {
                period_interval: Duration::from_secs(config.period_interval),
                sub_interval: Duration::from_secs(config.sub_interval),
                comms_delay: Duration::from_secs(config.comms_delay),
                default_threshold_index: config.default_threshold_index,
            },
            api_token: config.api_token,
            site_id: config.site_id,
            radio_target: config.radio_target,
            forecast_mode,
        }
    }
}
