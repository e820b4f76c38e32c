//! GateContext - ネイティブ呼び出し 1 回分のコンテキスト
//!
//! A bridge call arrives with a callback id and an `execInfo` object naming
//! the target class/method and, optionally, the task it belongs to. The
//! context remembers that, stamps the task id on outgoing records, and
//! makes sure at most one result is delivered per call.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::encoder::{Outgoing, ResultEncoder, ResultSpec, dispatch};
use crate::domain::{EncodeError, StatusCode};
use crate::ports::{Delivery, ResultSink};

/// `execInfo` as sent by the JS side of the bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecInfo {
    #[serde(default, alias = "feature")]
    pub class_name: Option<String>,

    #[serde(default, alias = "method")]
    pub method_name: Option<String>,

    #[serde(default)]
    pub object_id: Option<String>,

    #[serde(default)]
    pub task_id: Option<String>,

    /// Legacy calling convention (positional arguments, no task id).
    #[serde(default)]
    pub compatible: bool,

    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug)]
pub struct GateContext {
    callback_id: String,
    class_name: String,
    method_name: String,
    object_id: Option<String>,
    task_id: Option<String>,
    compatible: bool,
    thread_id: Option<String>,
    need_send_result: AtomicBool,
}

impl GateContext {
    pub fn from_exec_info(
        callback_id: impl Into<String>,
        info: ExecInfo,
    ) -> Result<Self, EncodeError> {
        let class_name = info
            .class_name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EncodeError::InvalidExecInfo("missing className".to_string()))?;
        let method_name = info
            .method_name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EncodeError::InvalidExecInfo("missing methodName".to_string()))?;

        Ok(Self {
            callback_id: callback_id.into(),
            class_name,
            method_name,
            object_id: info.object_id,
            task_id: info.task_id,
            compatible: info.compatible,
            thread_id: info.thread_id,
            need_send_result: AtomicBool::new(true),
        })
    }

    /// Parses `execInfo` from its JSON form.
    pub fn from_exec_info_json(
        callback_id: impl Into<String>,
        exec_info: &str,
    ) -> Result<Self, EncodeError> {
        let info: ExecInfo = serde_json::from_str(exec_info)
            .map_err(|e| EncodeError::InvalidExecInfo(e.to_string()))?;
        Self::from_exec_info(callback_id, info)
    }

    pub fn callback_id(&self) -> &str {
        &self.callback_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn compatible(&self) -> bool {
        self.compatible
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Whether no result has been delivered through this context yet.
    pub fn need_send_result(&self) -> bool {
        self.need_send_result.load(Ordering::Acquire)
    }

    /// Handlers that answer later (from another thread, say) clear this so
    /// [`finish`](Self::finish) does not send the default result.
    pub fn set_need_send_result(&self, need: bool) {
        self.need_send_result.store(need, Ordering::Release);
    }

    pub fn send_success<S: ResultSink + ?Sized>(
        &self,
        encoder: &ResultEncoder,
        sink: &S,
        outgoing: impl Into<Outgoing>,
    ) -> Result<bool, EncodeError> {
        self.send(encoder, sink, Delivery::Ok, outgoing.into())
    }

    pub fn send_error<S: ResultSink + ?Sized>(
        &self,
        encoder: &ResultEncoder,
        sink: &S,
        code: impl Into<i32>,
        message: Option<&str>,
    ) -> Result<bool, EncodeError> {
        let mut spec = ResultSpec::new(code);
        if let Some(message) = message {
            spec = spec.message(message);
        }
        self.send(encoder, sink, Delivery::Error, spec.into())
    }

    /// Sends the default success result unless something was sent already.
    pub fn finish<S: ResultSink + ?Sized>(
        &self,
        encoder: &ResultEncoder,
        sink: &S,
    ) -> Result<bool, EncodeError> {
        if !self.need_send_result() {
            return Ok(false);
        }
        self.send(encoder, sink, Delivery::Ok, Outgoing::Empty)
    }

    /// Returns `Ok(false)` when the result was already delivered.
    fn send<S: ResultSink + ?Sized>(
        &self,
        encoder: &ResultEncoder,
        sink: &S,
        channel: Delivery,
        outgoing: Outgoing,
    ) -> Result<bool, EncodeError> {
        let default_code = match channel {
            Delivery::Ok => StatusCode::SuccessOk,
            Delivery::Error => StatusCode::ErrorFail,
        };
        // Build before claiming, so a failed build leaves the slot open.
        let record = encoder
            .resolve(outgoing, default_code)?
            .or_task_id(self.task_id());

        if !self.need_send_result.swap(false, Ordering::AcqRel) {
            tracing::warn!(
                callback_id = %self.callback_id,
                class = %self.class_name,
                method = %self.method_name,
                %channel,
                "result already sent, dropping"
            );
            return Ok(false);
        }
        dispatch(sink, channel, record);
        Ok(true)
    }
}
