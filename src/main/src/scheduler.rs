//! The master control loop: align to the market, wait out the comms
//! window, decide, transmit, sleep to the next boundary.

use core::time::Duration;

use log::{debug, info};
use time::OffsetDateTime;

use control::{
    aest_seconds, delay_to_next, period_no, should_operate, sort_forecast, sub_count,
    sub_period_no, LoopConfig, LoopState, Price, PriceWindow, RadioLink, Symbol, INFEASIBLE_PRICE,
};

use crate::clock::Clock;
use crate::forecast::{fetch_or_fallback, ForecastProvider};
use crate::records::{OperationRecord, RecordSink};

/// Pause between the startup self-test transmissions.
const LINK_CHECK_PAUSE: Duration = Duration::from_secs(5);

pub struct ControlLoop<'a, C: Clock> {
    clock: C,
    provider: &'a mut dyn ForecastProvider,
    radio: &'a mut dyn RadioLink,
    sink: &'a mut dyn RecordSink,
    config: LoopConfig,
    state: LoopState,
}

impl<'a, C: Clock> ControlLoop<'a, C> {
    pub fn new(
        clock: C,
        provider: &'a mut dyn ForecastProvider,
        radio: &'a mut dyn RadioLink,
        sink: &'a mut dyn RecordSink,
        config: LoopConfig,
    ) -> ControlLoop<'a, C> {
        let state = LoopState::new(config.default_threshold_index);
        ControlLoop {
            clock,
            provider,
            radio,
            sink,
            config,
            state,
        }
    }

    /// Run forever. Every failure mode inside an iteration degrades to
    /// a defined decision, so the loop has no error exit.
    pub fn run(&mut self) -> ! {
        self.link_check();
        self.align_to_period();
        loop {
            self.step();
        }
    }

    /// Startup blink pattern, watchable on the receiving end during
    /// bring-up: Reset, Set, Reset.
    fn link_check(&mut self) {
        info!("link check: pulsing Reset / Set / Reset");
        self.radio.transmit(Symbol::Reset);
        self.clock.sleep(LINK_CHECK_PAUSE);
        self.radio.transmit(Symbol::Set);
        self.clock.sleep(LINK_CHECK_PAUSE);
        self.radio.transmit(Symbol::Reset);
    }

    /// Block until the next half-hour market boundary. Runs exactly
    /// once, at startup; afterwards the sub-period sleeps keep the loop
    /// on the grid.
    fn align_to_period(&mut self) {
        let aest = aest_seconds(self.clock.epoch_seconds());
        let wait = delay_to_next(aest, self.config.period_interval.as_secs() as u32);
        info!("waiting {wait} s for the next market period");
        self.clock.sleep(Duration::from_secs(u64::from(wait)));
    }

    /// One sub-period iteration.
    fn step(&mut self) {
        // Nominal timestamp for everything this iteration records.
        let started = self.clock.now();

        // Reading the coordinates only after the comms settle time
        // keeps them inside the interval that is already under way.
        self.clock.sleep(self.config.comms_delay);

        let aest = aest_seconds(self.clock.epoch_seconds());
        let period = period_no(aest);
        let sub_period = sub_period_no(aest);

        let rolled_over = sub_count(aest) < 1;
        if rolled_over {
            let prior = self.state.op_count;
            self.state.roll_day(self.config.default_threshold_index);
            info!(
                "day rollover: {prior} operations yesterday, threshold index now {}",
                self.state.thres_index
            );
        }

        if sub_period <= 1 {
            self.begin_period(period, rolled_over, started);
        }

        let price_now = self.read_price_now(started);
        let operate = should_operate(price_now, self.state.thres_price);
        self.radio.transmit(Symbol::for_decision(operate));
        self.state.record_decision(operate);

        self.sink.operation(&OperationRecord {
            timestamp: started,
            period,
            thres_index: self.state.thres_index,
            thres_price: self.state.thres_price,
            price_now,
            operate,
            per_count: self.state.per_count,
            op_count: self.state.op_count,
        });
        info!(
            "period {period} sub {sub_period}: price {price_now} against cutoff {} -> {}",
            self.state.thres_price,
            if operate { "operate" } else { "stand down" }
        );

        self.state.finish_iteration(period);

        let aest = aest_seconds(self.clock.epoch_seconds());
        let wait = delay_to_next(aest, self.config.sub_interval.as_secs() as u32);
        debug!("sleeping {wait} s to the next sub period");
        self.clock.sleep(Duration::from_secs(u64::from(wait)));
    }

    /// Period-boundary housekeeping: bank the finished period, refresh
    /// the day forecast, recompute the cutoff.
    fn begin_period(&mut self, period: u8, rolled_over: bool, started: OffsetDateTime) {
        self.state.close_period(rolled_over);

        let window = PriceWindow::full_day(period);
        let mut forecast = fetch_or_fallback(self.provider, window, started, self.sink);
        sort_forecast(&mut forecast);
        self.state.set_threshold(&forecast);

        debug!("day curve sorted: {forecast:?}");
        info!("operations so far today: {:?}", self.state.operations);
        info!(
            "threshold index {} -> cutoff {}",
            self.state.thres_index, self.state.thres_price
        );
    }

    /// The middle entry of the three-period now window.
    fn read_price_now(&mut self, started: OffsetDateTime) -> Price {
        let prices = fetch_or_fallback(self.provider, PriceWindow::NOW, started, self.sink);
        prices.get(1).copied().unwrap_or(INFEASIBLE_PRICE)
    }
}
