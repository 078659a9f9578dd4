use core::time::Duration;

#[derive(Copy, Clone, Debug)]
pub struct LoopConfig {
    // Half-hour market settlement period
    pub period_interval: Duration,

    // Five-minute control sub period
    pub sub_interval: Duration,

    // Settle time after a boundary before coordinates are read
    pub comms_delay: Duration,

    // Threshold rank restored at each day rollover before adaptation
    pub default_threshold_index: u16,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            period_interval: Duration::from_secs(1800),
            sub_interval: Duration::from_secs(300),
            comms_delay: Duration::from_secs(60),
            default_threshold_index: 5,
        }
    }
}
