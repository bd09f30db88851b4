//! The efficiency monitor service: an ingest activity feeding the sample
//! window from the telemetry feed, and a transmit activity broadcasting the
//! windowed efficiency at a fixed cadence.
//!
//! The two activities share only the [`Aggregator`]. Shutdown is cooperative:
//! both check a [`ShutdownFlag`] at each suspension point.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinError;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::aggregator::Aggregator;
use crate::config::MonitorConfig;
use crate::core::WindowAverage;
use crate::feed::{subscription_request, FeedConnector, FeedStream, SensorState};
use crate::infra::codec::traits::PgnPayload;
use crate::performance::polar::{BoatPerformance, Efficiency};
use crate::protocol::messages::EngineParametersDynamic;
use crate::protocol::transport::fast_packet::SequenceCounter;
use crate::protocol::transport::traits::{
    can_bus::CanBus, korri_timer::TokioTimer, pgn_sender::PgnSender,
};

/// Pause before reconnecting to the feed.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Longest wait for one feed message before re-checking the shutdown flag.
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

//==================================================================================SHUTDOWN
/// Cooperative stop signal shared by every activity.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

//==================================================================================TICK
/// Values computed on one transmit tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub average: WindowAverage,
    pub efficiency: Efficiency,
}

/// What a transmit tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing in the averaging window, or no usable average.
    NoData,
    /// Computed and logged; no gateway attached.
    MonitorOnly(TickReport),
    /// Record broadcast in `frames` frames.
    Sent { report: TickReport, frames: usize },
    /// The bus refused a frame; the record is dropped until the next tick.
    SendFailed(TickReport),
}

//==================================================================================MONITOR
/// Shared state of the service. Cloning is cheap and every clone drives the
/// same window, sequence counter, and shutdown flag.
#[derive(Debug, Clone)]
pub struct EfficiencyMonitor {
    config: Arc<MonitorConfig>,
    performance: Arc<BoatPerformance>,
    aggregator: Arc<Aggregator>,
    sequence: Arc<SequenceCounter>,
    shutdown: ShutdownFlag,
}

impl EfficiencyMonitor {
    pub fn new(config: MonitorConfig, performance: BoatPerformance) -> Self {
        let aggregator = Arc::new(Aggregator::new(config.buffer_capacity));
        Self {
            config: Arc::new(config),
            performance: Arc::new(performance),
            aggregator,
            sequence: Arc::new(SequenceCounter::new()),
            shutdown: ShutdownFlag::new(),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.aggregator
    }

    pub fn sequence(&self) -> &Arc<SequenceCounter> {
        &self.sequence
    }

    pub fn shutdown_flag(&self) -> ShutdownFlag {
        self.shutdown.clone()
    }

    /// Average the window ending at `now` and rate it against the polar.
    pub fn evaluate(&self, now: Instant) -> Option<TickReport> {
        let average = self
            .aggregator
            .snapshot(now, self.config.averaging_window())?;
        let efficiency = self
            .performance
            .efficiency(average.tws, average.twa, average.stw)?;
        Some(TickReport {
            average,
            efficiency,
        })
    }

    /// Run both activities as separate tasks until shutdown.
    pub async fn run<F, B>(&self, connector: F, bus: Option<B>) -> Result<(), JoinError>
    where
        F: FeedConnector + 'static,
        B: CanBus + Send + 'static,
        B::Error: Send,
    {
        let ingest = tokio::spawn(self.clone().run_ingest(connector));
        let transmit = tokio::spawn(self.clone().run_transmit(bus));
        let (ingest, transmit) = tokio::join!(ingest, transmit);
        ingest?;
        transmit?;
        info!("efficiency monitor stopped");
        Ok(())
    }

    /// Ingest activity: keep a feed connection open and push every complete
    /// sample into the window. Never gives up while running.
    pub async fn run_ingest<F: FeedConnector>(self, connector: F) {
        while !self.shutdown.is_requested() {
            let mut stream = match connector.connect().await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(endpoint = connector.endpoint(), error = %e, "feed connection failed");
                    time::sleep(RECONNECT_DELAY).await;
                    continue;
                }
            };
            info!(endpoint = connector.endpoint(), "connected to feed");

            if let Err(e) = stream.subscribe(&subscription_request()).await {
                warn!(error = %e, "feed subscription failed");
                time::sleep(RECONNECT_DELAY).await;
                continue;
            }

            self.pump(&mut stream).await;
        }
        debug!("ingest activity stopped");
    }

    async fn pump<S: FeedStream>(&self, stream: &mut S) {
        let mut state = SensorState::new();
        while !self.shutdown.is_requested() {
            match time::timeout(RECEIVE_TIMEOUT, stream.next_message()).await {
                Err(_) => continue,
                Ok(Ok(message)) => {
                    if let Some(sample) = state.apply(&message, Instant::now()) {
                        self.aggregator.ingest(sample);
                    }
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "feed receive error, reconnecting");
                    return;
                }
            }
        }
    }

    /// Transmit activity: one tick every `transmit_interval`, first tick
    /// immediately. Without a bus the monitor only computes and logs.
    pub async fn run_transmit<B>(self, mut bus: Option<B>)
    where
        B: CanBus + Send,
        B::Error: Send,
    {
        if bus.is_none() {
            warn!("no gateway attached, running in monitor-only mode");
        }
        let mut ticker = time::interval(self.config.transmit_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if self.shutdown.is_requested() {
                break;
            }
            self.transmit_tick(bus.as_mut()).await;
        }
        debug!("transmit activity stopped");
    }

    /// One transmit tick: snapshot, rate, encode, send.
    pub async fn transmit_tick<B>(&self, bus: Option<&mut B>) -> TickOutcome
    where
        B: CanBus + Send,
        B::Error: Send,
    {
        let Some(report) = self.evaluate(Instant::now()) else {
            info!("no data in averaging window");
            return TickOutcome::NoData;
        };

        let TickReport {
            average,
            efficiency,
        } = report;
        info!(
            "TWS {:5.1} kt | TWA {:6.1}° | STW {:5.1} kt | target {:5.2} kt | efficiency {:5.1} % ({} samples)",
            average.tws,
            average.twa,
            average.stw,
            efficiency.target,
            efficiency.percent,
            average.samples,
        );

        let Some(bus) = bus else {
            return TickOutcome::MonitorOnly(report);
        };

        let record = EngineParametersDynamic::with_load(self.config.engine_instance, efficiency.percent);
        let sent = bus
            .send_pgn(
                &record,
                self.config.source_address,
                self.config.priority,
                &self.sequence,
                &mut TokioTimer,
            )
            .await;
        match sent {
            Ok(frames) => {
                debug!(pgn = EngineParametersDynamic::PGN, frames, "engine load sent");
                TickOutcome::Sent { report, frames }
            }
            Err(e) => {
                warn!(error = %e, "engine load transmission failed");
                TickOutcome::SendFailed(report)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
