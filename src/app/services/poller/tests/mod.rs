//! Tests for the poller module

pub mod poller_tests;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::app::adapters::bulletin_source::BulletinSource;
use crate::app::adapters::influx_sink::PointSink;
use crate::app::models::SinkRecord;
use crate::{Error, Result};

/// Cycle instant for poller tests: 2024-10-18 12:05Z
pub fn cycle_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 18, 12, 5, 0).unwrap()
}

/// In-memory bulletin source keyed by hour
#[derive(Default)]
pub struct FakeSource {
    bulletins: Mutex<HashMap<String, Vec<String>>>,
    requested: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bulletin(self, hour: &str, lines: &[&str]) -> Self {
        self.set_bulletin(hour, lines);
        self
    }

    pub fn set_bulletin(&self, hour: &str, lines: &[&str]) {
        self.bulletins.lock().unwrap().insert(
            hour.to_string(),
            lines.iter().map(|s| s.to_string()).collect(),
        );
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl BulletinSource for FakeSource {
    async fn fetch(&self, hour: &str) -> Result<Vec<String>> {
        self.requested.lock().unwrap().push(hour.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::fetch(format!("fake://{}Z", hour), "unreachable", None));
        }
        Ok(self
            .bulletins
            .lock()
            .unwrap()
            .get(hour)
            .cloned()
            .unwrap_or_default())
    }
}

/// Sink recording every batch it is given
#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<SinkRecord>>>,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<Vec<SinkRecord>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PointSink for RecordingSink {
    async fn write(&self, points: &[SinkRecord]) -> Result<()> {
        self.batches.lock().unwrap().push(points.to_vec());
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::write("sink unavailable", None));
        }
        Ok(())
    }
}
