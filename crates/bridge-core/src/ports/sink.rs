//! ResultSink port - 結果の配送先の抽象化
//!
//! The host runtime owns the actual callback channel (a plugin callback
//! context, a message port, ...). This module only needs something that
//! accepts a finished record on one of two channels.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::ResultRecord;

/// Channel a record is delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Delivery {
    Ok,
    Error,
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Ok => f.write_str("OK"),
            Delivery::Error => f.write_str("ERROR"),
        }
    }
}

/// ResultSink は完成した ResultRecord をホストへ届ける
///
/// Delivery failures are the sink's own business; nothing is reported back.
/// Each record is handed over by value and consumed exactly once.
pub trait ResultSink: Send + Sync {
    fn deliver_ok(&self, payload: ResultRecord);

    fn deliver_error(&self, payload: ResultRecord);

    fn deliver(&self, channel: Delivery, payload: ResultRecord) {
        match channel {
            Delivery::Ok => self.deliver_ok(payload),
            Delivery::Error => self.deliver_error(payload),
        }
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &S {
    fn deliver_ok(&self, payload: ResultRecord) {
        (**self).deliver_ok(payload)
    }

    fn deliver_error(&self, payload: ResultRecord) {
        (**self).deliver_error(payload)
    }
}

impl<S: ResultSink + ?Sized> ResultSink for Arc<S> {
    fn deliver_ok(&self, payload: ResultRecord) {
        (**self).deliver_ok(payload)
    }

    fn deliver_error(&self, payload: ResultRecord) {
        (**self).deliver_error(payload)
    }
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn deliver_ok(&self, payload: ResultRecord) {
        (**self).deliver_ok(payload)
    }

    fn deliver_error(&self, payload: ResultRecord) {
        (**self).deliver_error(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_serializes_as_upper_case() {
        assert_eq!(serde_json::to_string(&Delivery::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&Delivery::Error).unwrap(), "\"ERROR\"");
        assert_eq!(Delivery::Error.to_string(), "ERROR");
    }
}
