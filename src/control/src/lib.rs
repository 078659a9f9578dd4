#![no_std]

mod config;
mod market_time;
mod protocol;
mod receiver;
mod state;
mod threshold;

pub use config::LoopConfig;
pub use market_time::{
    aest_seconds, delay_to_next, period_no, sub_count, sub_period_no, PriceWindow,
    AEST_OFFSET_SECS, PERIODS_PER_DAY, SUBS_PER_PERIOD,
};
pub use protocol::{RadioLink, Symbol};
pub use receiver::{PulseLine, ReceiverState};
pub use state::{Price, INFEASIBLE_PRICE};
pub use threshold::{adapt_threshold_index, sort_forecast, threshold_price};

/// Decide whether to energize the element for this sub period. The
/// comparison is inclusive: a price exactly on the cutoff operates.
pub fn should_operate(price_now: Price, threshold: Price) -> bool {
    price_now <= threshold
}

/// Mutable bookkeeping carried across control-loop iterations.
///
/// One value owns everything the loop accumulates over a day: the
/// adaptive threshold rank and the cutoff derived from it, the
/// operation counters at sub-period and day granularity, the per-period
/// history, and the period number seen on the previous iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    pub thres_index: u16,
    pub thres_price: Price,
    pub per_count: u8,
    pub op_count: u16,
    pub operations: [u8; PERIODS_PER_DAY],
    pub prev_period: u8,
}

impl LoopState {
    pub fn new(default_threshold_index: u16) -> LoopState {
        LoopState {
            thres_index: default_threshold_index,
            thres_price: Price::ZERO,
            per_count: 0,
            op_count: 0,
            operations: [0; PERIODS_PER_DAY],
            prev_period: 0,
        }
    }

    /// First sub period of a new day: fold yesterday's operation count
    /// into the threshold rank, then clear the day's counters.
    pub fn roll_day(&mut self, default_threshold_index: u16) {
        self.thres_index = adapt_threshold_index(self.op_count, default_threshold_index);
        self.op_count = 0;
        self.operations = [0; PERIODS_PER_DAY];
    }

    /// First sub period of a new period: bank the finished period's
    /// count into its slot and start the new period at zero.
    ///
    /// The slot is the period remembered from the previous iteration;
    /// the freshly read period number already names the new one. There
    /// is nothing to bank on the first boundary after startup, nor on a
    /// rollover, where the finished period belongs to the day the
    /// adaptation just consumed.
    pub fn close_period(&mut self, rolled_over: bool) {
        if !rolled_over {
            if let Some(slot) = (self.prev_period as usize).checked_sub(1) {
                if let Some(entry) = self.operations.get_mut(slot) {
                    *entry = self.per_count;
                }
            }
        }
        self.per_count = 0;
    }

    /// Recompute the cutoff for the new period from an ascending
    /// forecast.
    pub fn set_threshold(&mut self, sorted_forecast: &[Price]) {
        self.thres_price = threshold_price(self.thres_index, sorted_forecast);
    }

    /// Account one sub-period decision.
    pub fn record_decision(&mut self, operate: bool) {
        if operate {
            self.per_count = self.per_count.saturating_add(1);
            self.op_count = self.op_count.saturating_add(1);
        }
    }

    /// Remember which period this iteration ran in.
    pub fn finish_iteration(&mut self, period: u8) {
        self.prev_period = period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operates_below_and_on_the_cutoff() {
        let cutoff = Price::new(5.51701);
        assert!(should_operate(Price::new(5.0), cutoff));
        assert!(should_operate(Price::new(5.51701), cutoff));
        assert!(should_operate(Price::new(-1.16805), cutoff));
        assert!(!should_operate(Price::new(5.52), cutoff));
        assert!(!should_operate(Price::new(36.42412), cutoff));
    }

    #[test]
    fn test_new_state_starts_at_the_default_rank() {
        let state = LoopState::new(5);
        assert_eq!(state.thres_index, 5);
        assert_eq!(state.thres_price, Price::ZERO);
        assert_eq!(state.per_count, 0);
        assert_eq!(state.op_count, 0);
        assert_eq!(state.operations, [0; PERIODS_PER_DAY]);
        assert_eq!(state.prev_period, 0);
    }

    #[test]
    fn test_decisions_count_at_both_granularities() {
        let mut state = LoopState::new(5);
        state.record_decision(true);
        state.record_decision(false);
        state.record_decision(true);
        assert_eq!(state.per_count, 2);
        assert_eq!(state.op_count, 2);
    }

    #[test]
    fn test_close_period_banks_into_the_finished_slot() {
        let mut state = LoopState::new(5);
        state.record_decision(true);
        state.record_decision(true);
        state.finish_iteration(10);

        state.close_period(false);
        assert_eq!(state.operations[9], 2);
        assert_eq!(state.per_count, 0);
        // Day total is untouched by the period close.
        assert_eq!(state.op_count, 2);
    }

    #[test]
    fn test_first_boundary_after_startup_banks_nothing() {
        let mut state = LoopState::new(5);
        state.record_decision(true);

        state.close_period(false);
        assert_eq!(state.operations, [0; PERIODS_PER_DAY]);
        assert_eq!(state.per_count, 0);
    }

    #[test]
    fn test_rollover_boundary_does_not_bank_into_the_fresh_day() {
        let mut state = LoopState::new(5);
        state.record_decision(true);
        state.finish_iteration(48);

        state.roll_day(5);
        state.close_period(true);
        assert_eq!(state.operations, [0; PERIODS_PER_DAY]);
        assert_eq!(state.per_count, 0);
    }

    #[test]
    fn test_roll_day_adapts_and_clears() {
        let mut state = LoopState::new(5);
        for _ in 0..20 {
            state.record_decision(true);
        }
        state.operations[3] = 6;

        state.roll_day(5);
        assert_eq!(state.thres_index, 7);
        assert_eq!(state.op_count, 0);
        assert_eq!(state.operations, [0; PERIODS_PER_DAY]);
    }

    #[test]
    fn test_cutoff_follows_the_rank_into_the_forecast() {
        let mut forecast = [
            Price::new(18.57187),
            Price::new(5.55384),
            Price::new(4.75150),
            Price::new(5.03894),
            Price::new(4.79856),
            Price::new(5.51701),
            Price::new(5.46239),
            Price::new(17.53958),
            Price::new(17.01019),
        ];
        sort_forecast(&mut forecast);

        let mut state = LoopState::new(5);
        state.set_threshold(&forecast);
        assert_eq!(state.thres_price, Price::new(5.51701));

        state.thres_index = 12;
        state.set_threshold(&forecast);
        assert_eq!(state.thres_price, INFEASIBLE_PRICE);
    }

    #[test]
    fn test_day_cycle_shortfall_then_recovery() {
        let mut state = LoopState::new(5);

        // Day one delivers 12 of the 30 target sub periods.
        for _ in 0..12 {
            state.record_decision(true);
        }
        state.roll_day(5);
        assert_eq!(state.thres_index, 8);

        // Day two hits the raised duty, so day three is back at default.
        for _ in 0..48 {
            state.record_decision(true);
        }
        state.roll_day(5);
        assert_eq!(state.thres_index, 5);
    }
}
