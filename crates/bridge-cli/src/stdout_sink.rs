use std::io::Write;

use bridge_core::{Delivery, ResultRecord, ResultSink};
use serde::Serialize;

/// Prints each delivery as one JSON line:
/// `{"status":"OK","payload":{...}}`.
#[derive(Debug, Default)]
pub struct StdoutSink;

#[derive(Serialize)]
struct Envelope<'a> {
    status: Delivery,
    payload: &'a ResultRecord,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }

    /// Renders one delivery, without the trailing newline.
    pub fn render(status: Delivery, payload: &ResultRecord) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Envelope { status, payload })
    }

    fn emit(&self, status: Delivery, payload: &ResultRecord) {
        match Self::render(status, payload) {
            Ok(line) => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = writeln!(out, "{line}") {
                    tracing::error!(error = %e, "write to stdout failed");
                }
            }
            Err(e) => tracing::error!(error = %e, %status, "render delivery failed"),
        }
    }
}

impl ResultSink for StdoutSink {
    fn deliver_ok(&self, payload: ResultRecord) {
        self.emit(Delivery::Ok, &payload);
    }

    fn deliver_error(&self, payload: ResultRecord) {
        self.emit(Delivery::Error, &payload);
    }
}
