//! RecordingSink - 配送された結果をメモリに記録する Sink
//!
//! Used by tests and by the CLI dry run. Deliveries are kept in order.

use std::sync::{Mutex, PoisonError};

use crate::domain::ResultRecord;
use crate::ports::{Delivery, ResultSink};

#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(Delivery, ResultRecord)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn deliveries(&self) -> Vec<(Delivery, ResultRecord)> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns everything delivered so far.
    pub fn take(&self) -> Vec<(Delivery, ResultRecord)> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Delivery, ResultRecord)>> {
        self.delivered.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultSink for RecordingSink {
    fn deliver_ok(&self, payload: ResultRecord) {
        self.lock().push((Delivery::Ok, payload));
    }

    fn deliver_error(&self, payload: ResultRecord) {
        self.lock().push((Delivery::Error, payload));
    }
}
