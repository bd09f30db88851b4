//! Time-windowed sample buffer shared by the ingest and transmit activities.
//!
//! Capacity eviction happens on insert (oldest sample first); age filtering
//! happens lazily when a snapshot is taken. One blocking mutex guards the
//! window, so the lock is held for O(window size) at most.
use core::cell::RefCell;
use std::collections::VecDeque;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use tokio::time::{Duration, Instant};

use crate::core::{PerformanceSample, WindowAverage};

/// Default number of retained samples.
pub const DEFAULT_CAPACITY: usize = 1000;

struct SampleWindow {
    samples: VecDeque<PerformanceSample>,
    capacity: usize,
}

/// Bounded ring of samples with windowed averaging.
pub struct Aggregator {
    window: Mutex<CriticalSectionRawMutex, RefCell<SampleWindow>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl core::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Aggregator")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Aggregator {
    /// Window holding at most `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: Mutex::new(RefCell::new(SampleWindow {
                samples: VecDeque::with_capacity(capacity),
                capacity,
            })),
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn ingest(&self, sample: PerformanceSample) {
        self.window.lock(|cell| {
            let mut window = cell.borrow_mut();
            if window.samples.len() >= window.capacity {
                window.samples.pop_front();
            }
            window.samples.push_back(sample);
        });
    }

    /// Mean of the samples with `timestamp >= now - window`.
    ///
    /// `None` means nothing to report, never zero-valued telemetry. When
    /// `now - window` predates the clock origin every sample qualifies.
    pub fn snapshot(&self, now: Instant, window: Duration) -> Option<WindowAverage> {
        let cutoff = now.checked_sub(window);
        self.window.lock(|cell| {
            let ring = cell.borrow();
            let (mut stw, mut twa, mut tws, mut samples) = (0.0, 0.0, 0.0, 0usize);
            for sample in ring
                .samples
                .iter()
                .filter(|s| cutoff.map_or(true, |cutoff| s.timestamp >= cutoff))
            {
                stw += sample.stw;
                twa += sample.twa;
                tws += sample.tws;
                samples += 1;
            }

            if samples == 0 {
                return None;
            }
            let n = samples as f64;
            Some(WindowAverage {
                stw: stw / n,
                twa: twa / n,
                tws: tws / n,
                samples,
            })
        })
    }

    /// Number of retained samples, regardless of age.
    pub fn len(&self) -> usize {
        self.window.lock(|cell| cell.borrow().samples.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.window.lock(|cell| cell.borrow().capacity)
    }

    /// Drop every sample.
    pub fn clear(&self) {
        self.window.lock(|cell| cell.borrow_mut().samples.clear());
    }
}
