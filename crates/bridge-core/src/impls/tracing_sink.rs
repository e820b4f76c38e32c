//! TracingSink - 結果をログに出すだけの Sink
//!
//! Stand-in for the platform log when no host callback is attached.

use crate::domain::ResultRecord;
use crate::ports::{Delivery, ResultSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }

    fn render(record: &ResultRecord) -> String {
        record
            .to_json()
            .unwrap_or_else(|e| format!("<unrenderable record: {e}>"))
    }
}

impl ResultSink for TracingSink {
    fn deliver_ok(&self, payload: ResultRecord) {
        tracing::info!(
            channel = %Delivery::Ok,
            code = payload.code(),
            "{}",
            Self::render(&payload)
        );
    }

    fn deliver_error(&self, payload: ResultRecord) {
        tracing::warn!(
            channel = %Delivery::Error,
            code = payload.code(),
            "{}",
            Self::render(&payload)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordDraft;

    #[test]
    fn render_is_the_wire_json() {
        let record = ResultRecord::new(
            2,
            "[t] ",
            Some("stopped".into()),
            Some("T3".into()),
            Vec::new(),
        );
        let rendered = TracingSink::render(&record);
        assert_eq!(rendered, record.to_json().unwrap());
        assert!(rendered.contains("\"taskId\":\"T3\""));
    }

    #[test]
    fn both_channels_are_accepted() {
        let sink = TracingSink::new();
        let record = RecordDraft::default().stamp(0, "[t] ");

        sink.deliver(Delivery::Ok, record.clone());
        sink.deliver(Delivery::Error, record.clone());
        sink.deliver_ok(record.clone());
        sink.deliver_error(record);
    }
}
