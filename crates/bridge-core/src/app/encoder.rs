//! ResultEncoder - 結果レコードの生成と配送
//!
//! # 使用例
//! ```
//! use bridge_core::app::{ResultEncoder, ResultSpec};
//! use bridge_core::domain::StatusCode;
//! use bridge_core::impls::RecordingSink;
//!
//! let encoder = ResultEncoder::default();
//! let sink = RecordingSink::new();
//!
//! let record = encoder
//!     .make_result(
//!         ResultSpec::new(StatusCode::ErrorFail)
//!             .message("boom")
//!             .task_id("T2")
//!             .arg(&1)
//!             .arg("x"),
//!     )
//!     .unwrap();
//! assert!(record.name().ends_with("ERROR_FAIL"));
//!
//! encoder.send_success(&sink, "T1").unwrap();
//! encoder.send_error(&sink, Some("T3"), StatusCode::ErrorCancel, Some("stopped")).unwrap();
//! assert_eq!(sink.len(), 2);
//! ```

use serde::Serialize;

use super::config::EncoderConfig;
use crate::domain::{EncodeError, RecordDraft, ResultRecord, StatusCode};
use crate::ports::{Delivery, ResultSink};

/// Inputs of one record, with named optional fields.
///
/// `code` left unset means SUCCESS_OK for [`ResultEncoder::make_result`],
/// and the channel default (SUCCESS_OK / ERROR_FAIL) when sent.
///
/// Arguments are converted to JSON as they are added; the first failure is
/// kept and reported by `make_result`.
#[derive(Debug, Default)]
pub struct ResultSpec {
    code: Option<i32>,
    message: Option<String>,
    task_id: Option<String>,
    args: Vec<serde_json::Value>,
    arg_error: Option<(usize, serde_json::Error)>,
}

impl ResultSpec {
    pub fn new(code: impl Into<i32>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Success record for a task, no message.
    pub fn for_task(task_id: impl Into<String>) -> Self {
        Self::default().task_id(task_id)
    }

    /// Success record with a message. Without a task id, use
    /// `ResultSpec::default().message(..)`.
    pub fn with_message(message: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self::default().message(message).task_id(task_id)
    }

    pub fn code(mut self, code: impl Into<i32>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Appends one argument; call order is kept.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        let index = self.args.len();
        match serde_json::to_value(value) {
            Ok(v) => self.args.push(v),
            Err(e) => {
                if self.arg_error.is_none() {
                    self.arg_error = Some((index, e));
                }
                // Keep positions stable for later arguments.
                self.args.push(serde_json::Value::Null);
            }
        }
        self
    }

    /// Appends already-encoded JSON values.
    pub fn args(mut self, values: impl IntoIterator<Item = serde_json::Value>) -> Self {
        self.args.extend(values);
        self
    }

    fn build(self, default_code: i32, tag: &str) -> Result<ResultRecord, EncodeError> {
        if let Some((index, source)) = self.arg_error {
            tracing::error!(index, error = %source, "create result record failed");
            return Err(EncodeError::Argument { index, source });
        }
        Ok(ResultRecord::new(
            self.code.unwrap_or(default_code),
            tag,
            self.message,
            self.task_id,
            self.args,
        ))
    }
}

/// What a send operation was given.
#[derive(Debug)]
pub enum Outgoing {
    /// Nothing: a default record for the channel is sent.
    Empty,
    TaskId(String),
    Spec(ResultSpec),
    Record(ResultRecord),
    Draft(RecordDraft),
}

impl From<&str> for Outgoing {
    fn from(task_id: &str) -> Self {
        Outgoing::TaskId(task_id.to_string())
    }
}

impl From<String> for Outgoing {
    fn from(task_id: String) -> Self {
        Outgoing::TaskId(task_id)
    }
}

impl From<Option<String>> for Outgoing {
    fn from(task_id: Option<String>) -> Self {
        task_id.map_or(Outgoing::Empty, Outgoing::TaskId)
    }
}

impl From<ResultSpec> for Outgoing {
    fn from(spec: ResultSpec) -> Self {
        Outgoing::Spec(spec)
    }
}

impl From<ResultRecord> for Outgoing {
    fn from(record: ResultRecord) -> Self {
        Outgoing::Record(record)
    }
}

impl From<RecordDraft> for Outgoing {
    fn from(draft: RecordDraft) -> Self {
        Outgoing::Draft(draft)
    }
}

impl From<()> for Outgoing {
    fn from(_: ()) -> Self {
        Outgoing::Empty
    }
}

/// Builds result records and routes them to a sink.
///
/// Stateless apart from its configuration; one encoder can be shared by
/// every handler of a plugin.
#[derive(Debug, Clone, Default)]
pub struct ResultEncoder {
    config: EncoderConfig,
}

impl ResultEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn tag(&self) -> &str {
        &self.config.tag
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Builds a record. Unset code means SUCCESS_OK.
    ///
    /// Fails only when an argument could not be encoded; the failure is
    /// logged and returned.
    pub fn make_result(&self, spec: ResultSpec) -> Result<ResultRecord, EncodeError> {
        spec.build(StatusCode::SuccessOk.code(), self.tag())
    }

    /// Turns any outgoing value into a record, using `default_code` where
    /// no code was given.
    pub fn resolve(
        &self,
        outgoing: Outgoing,
        default_code: StatusCode,
    ) -> Result<ResultRecord, EncodeError> {
        let default_code = default_code.code();
        match outgoing {
            Outgoing::Empty => ResultSpec::default().build(default_code, self.tag()),
            Outgoing::TaskId(task_id) => {
                ResultSpec::for_task(task_id).build(default_code, self.tag())
            }
            Outgoing::Spec(spec) => spec.build(default_code, self.tag()),
            Outgoing::Record(record) => Ok(record),
            Outgoing::Draft(draft) => Ok(draft.stamp(default_code, self.tag())),
        }
    }

    /// Delivers a success result. Missing code is stamped SUCCESS_OK.
    pub fn send_success<S: ResultSink + ?Sized>(
        &self,
        sink: &S,
        outgoing: impl Into<Outgoing>,
    ) -> Result<(), EncodeError> {
        let record = self.resolve(outgoing.into(), StatusCode::SuccessOk)?;
        dispatch(sink, Delivery::Ok, record);
        Ok(())
    }

    /// Delivers `make_result(code, message, task_id)` on the error channel.
    pub fn send_error<S: ResultSink + ?Sized>(
        &self,
        sink: &S,
        task_id: Option<&str>,
        code: impl Into<i32>,
        message: Option<&str>,
    ) -> Result<(), EncodeError> {
        let mut spec = ResultSpec::new(code);
        if let Some(message) = message {
            spec = spec.message(message);
        }
        if let Some(task_id) = task_id {
            spec = spec.task_id(task_id);
        }
        self.send_error_result(sink, spec)
    }

    /// Delivers an error result. Missing code is stamped ERROR_FAIL.
    pub fn send_error_result<S: ResultSink + ?Sized>(
        &self,
        sink: &S,
        outgoing: impl Into<Outgoing>,
    ) -> Result<(), EncodeError> {
        let record = self.resolve(outgoing.into(), StatusCode::ErrorFail)?;
        dispatch(sink, Delivery::Error, record);
        Ok(())
    }
}

pub(crate) fn dispatch<S: ResultSink + ?Sized>(sink: &S, channel: Delivery, record: ResultRecord) {
    tracing::debug!(%channel, code = record.code(), name = record.name(), "deliver result");
    sink.deliver(channel, record);
}
