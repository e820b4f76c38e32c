//! Result record: the payload handed to the host for one outcome.
//!
//! Wire shape:
//! ```json
//! {"code":3,"name":"<tag>ERROR_INVALID_ARG","message":"...","taskId":"...","args":[1,"x"]}
//! ```
//! `message`, `taskId` and `args` are omitted when absent.

use serde::{Deserialize, Serialize};

use super::status::code_name;

/// Immutable outcome record.
///
/// `name` is always `tag + code_name(code)`; it cannot be set directly.
/// `args` is `None` (omitted on the wire) rather than empty when no
/// argument was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    code: i32,
    name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    task_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<Vec<serde_json::Value>>,
}

impl ResultRecord {
    pub(crate) fn new(
        code: i32,
        tag: &str,
        message: Option<String>,
        task_id: Option<String>,
        args: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            code,
            name: format!("{tag}{}", code_name(code)),
            message,
            task_id,
            args: if args.is_empty() { None } else { Some(args) },
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn args(&self) -> Option<&[serde_json::Value]> {
        self.args.as_deref()
    }

    pub fn is_success(&self) -> bool {
        super::status::is_success(self.code)
    }

    /// Fills in `task_id` when the record has none.
    pub(crate) fn or_task_id(mut self, task_id: Option<&str>) -> Self {
        if self.task_id.is_none() {
            self.task_id = task_id.map(str::to_owned);
        }
        self
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A record whose `code` (and possibly `name`) has not been decided yet.
///
/// This is what other native code hands over when it assembled the payload
/// itself, or what comes back from parsing a wire payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<serde_json::Value>>,
}

impl RecordDraft {
    /// Finalizes the draft.
    ///
    /// A missing `code` becomes `default_code`. A missing `name` is derived
    /// from the final code; a supplied one is kept as is, like every other
    /// field. An empty `args` list is dropped.
    pub fn stamp(self, default_code: i32, tag: &str) -> ResultRecord {
        let code = self.code.unwrap_or(default_code);
        let name = self
            .name
            .unwrap_or_else(|| format!("{tag}{}", code_name(code)));
        ResultRecord {
            code,
            name,
            message: self.message,
            task_id: self.task_id,
            args: self.args.filter(|a| !a.is_empty()),
        }
    }
}

impl From<ResultRecord> for RecordDraft {
    fn from(record: ResultRecord) -> Self {
        Self {
            code: Some(record.code),
            name: Some(record.name),
            message: record.message,
            task_id: record.task_id,
            args: record.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TAG: &str = "[test] ";

    #[test]
    fn optional_fields_are_omitted() {
        let r = ResultRecord::new(0, TAG, None, None, Vec::new());
        let v = r.to_value().unwrap();
        assert_eq!(v, json!({"code": 0, "name": "[test] SUCCESS_OK"}));
    }

    #[test]
    fn wire_keys_use_camel_case_task_id() {
        let r = ResultRecord::new(
            1,
            TAG,
            Some("boom".into()),
            Some("T2".into()),
            vec![json!(1), json!("x")],
        );
        let v = r.to_value().unwrap();
        assert_eq!(v["taskId"], "T2");
        assert_eq!(v["message"], "boom");
        assert_eq!(v["args"], json!([1, "x"]));
        assert!(v.get("task_id").is_none());
    }

    #[test]
    fn stamp_fills_missing_code_and_keeps_the_rest() {
        let draft: RecordDraft =
            serde_json::from_value(json!({"message": "done", "taskId": "T9", "args": [true]}))
                .unwrap();

        let r = draft.stamp(0, TAG);
        assert_eq!(r.code(), 0);
        assert_eq!(r.name(), "[test] SUCCESS_OK");
        assert_eq!(r.message(), Some("done"));
        assert_eq!(r.task_id(), Some("T9"));
        assert_eq!(r.args(), Some(&[json!(true)][..]));
    }

    #[test]
    fn stamp_keeps_supplied_code_and_name() {
        let draft = RecordDraft {
            code: Some(6),
            name: Some("custom-name".into()),
            ..Default::default()
        };
        let r = draft.stamp(1, TAG);
        assert_eq!(r.code(), 6);
        assert_eq!(r.name(), "custom-name");
    }

    #[test]
    fn stamp_drops_empty_args() {
        let draft = RecordDraft {
            args: Some(Vec::new()),
            ..Default::default()
        };
        let v = draft.stamp(1, TAG).to_value().unwrap();
        assert!(v.get("args").is_none());
    }

    #[test]
    fn or_task_id_does_not_overwrite() {
        let r = ResultRecord::new(0, TAG, None, Some("mine".into()), Vec::new());
        assert_eq!(r.or_task_id(Some("ctx")).task_id(), Some("mine"));

        let r = ResultRecord::new(0, TAG, None, None, Vec::new());
        assert_eq!(r.or_task_id(Some("ctx")).task_id(), Some("ctx"));
    }

    #[test]
    fn record_converts_back_into_a_complete_draft() {
        let r = ResultRecord::new(2, TAG, Some("stop".into()), None, Vec::new());
        let draft = RecordDraft::from(r.clone());
        assert_eq!(draft.code, Some(2));
        assert_eq!(draft.clone().stamp(0, "other").name(), r.name());
        assert_eq!(draft.stamp(0, "other"), r);
    }
}
