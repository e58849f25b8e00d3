//! Station main loop
//!
//! Polls the clock on a fixed cadence, asks the scheduler whether a sample is
//! due and, when it is, reads the sensor and drives the echo-verified sender.
//! Everything runs on one thread; all waiting is a blocking delay.
//!
//! ## Startup
//! 1. Flash the status LED
//! 2. Bring the link up (fatal on failure: LED held on, exit code 2)
//! 3. Synchronize time (a failure is logged, not fatal)
//! 4. Let the sensor warm up
//!
//! ## Loop
//! Poll, then sample-and-send when due, then idle. The idle interval is kept
//! under a minute so no ten-minute boundary slips by unobserved.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use weather_hal::{Clock, Connector, EnvironmentSensor, Link, TimeSource};

use crate::config::StationConfig;
use crate::connection::ConnectionManager;
use crate::indicator::StatusLed;
use crate::link::{bring_up, StartupError};
use crate::record::{Sample, Stamp};
use crate::sampler::read_environment;
use crate::schedule::Scheduler;
use crate::sender::{DeliveryReport, EchoSender};

pub struct WeatherStation<K, S, C, P, D> {
    clock: K,
    sensor: S,
    sender: EchoSender<C>,
    led: StatusLed<P>,
    delay: D,
    scheduler: Scheduler,
    config: StationConfig,
    last_delivery: Option<DeliveryReport>,
}

impl<K, S, C, P, D> WeatherStation<K, S, C, P, D>
where
    K: Clock,
    S: EnvironmentSensor,
    C: Connector,
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(config: StationConfig, clock: K, sensor: S, connector: C, led: P, delay: D) -> Self {
        let connections =
            ConnectionManager::new(connector, config.endpoint.clone(), config.connect);
        Self {
            clock,
            sensor,
            sender: EchoSender::new(connections, config.delivery),
            led: StatusLed::new(led, config.indicator.half_period_ms),
            delay,
            scheduler: Scheduler::new(),
            config,
            last_delivery: None,
        }
    }

    /// Run the startup sequence
    ///
    /// On `Err` the caller must not enter [`WeatherStation::run`]; it should
    /// terminate with [`StartupError::exit_code`].
    pub fn start<L: Link, T: TimeSource>(
        &mut self,
        link: &mut L,
        time: &mut T,
    ) -> Result<(), StartupError> {
        info!("Weather station starting, collector at {}", self.config.endpoint);
        self.led
            .flash(&mut self.delay, self.config.indicator.startup_flashes);

        if let Err(e) = bring_up(link, &mut self.delay, &self.config.link) {
            error!("Failed to bring up the link: {}", e);
            self.led.hold_on();
            return Err(e);
        }

        match time.synchronize() {
            Ok(()) => info!("Time synchronized"),
            Err(_) => warn!("Time synchronization failed, using the clock as is"),
        }

        self.delay.delay_ms(self.config.sensor_warmup_ms);
        Ok(())
    }

    /// One poll of the main loop, without the idle sleep
    ///
    /// Returns the delivery report when this poll fired, `None` otherwise.
    pub fn poll_once(&mut self) -> Option<DeliveryReport> {
        let now = self.clock.now();
        if !self.scheduler.poll(now.minute) {
            return None;
        }

        let stamp = Stamp::from_calendar(&now);
        info!("Sample due at {}", stamp);
        self.led
            .flash(&mut self.delay, self.config.indicator.firing_flashes);

        let reading = read_environment(&mut self.sensor);
        let report = match Sample::new(stamp, reading).encode() {
            Ok(record) => {
                debug!("Sending record {}", record);
                self.sender.deliver(&record, &mut self.delay)
            }
            Err(e) => {
                error!("Could not encode sample: {}", e);
                DeliveryReport::skipped()
            }
        };
        if !report.delivered {
            warn!("Sample dropped");
        }
        self.last_delivery = Some(report);

        self.delay.delay_ms(self.config.post_delivery_pause_ms);
        Some(report)
    }

    /// Poll forever
    pub fn run(&mut self) -> ! {
        info!(
            "Entering main loop (poll every {} ms)",
            self.config.poll_interval_ms
        );
        loop {
            self.poll_once();
            self.delay.delay_ms(self.config.poll_interval_ms);
        }
    }

    /// Report of the most recent firing, for diagnostics only
    pub fn last_delivery(&self) -> Option<DeliveryReport> {
        self.last_delivery
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }
}
