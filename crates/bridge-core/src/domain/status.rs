//! Status codes: outcome categories reported back to the host.
//!
//! Zero is success, any nonzero value is an error category. Codes outside
//! the fixed table are "custom" and get a synthesized hex name.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of every synthesized custom-code name.
pub const CUSTOM_CODE_PREFIX: &str = "ERROR_CUSTOM:0x";

/// Known status codes.
///
/// The wire value is the raw integer; the enum only exists to give the
/// fixed members a name.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum StatusCode {
    SuccessOk = 0x0000,
    ErrorFail = 0x0001,
    ErrorCancel = 0x0002,
    ErrorInvalidArg = 0x0003,
    ErrorNotImplement = 0x0004,
    ErrorNotSupport = 0x0005,
    ErrorInvalidOperation = 0x0006,
    ErrorClassNotFound = 0x0007,
    ErrorMethodNotFound = 0x0008,
}

impl StatusCode {
    /// Every member, in code order.
    pub const ALL: [StatusCode; 9] = [
        StatusCode::SuccessOk,
        StatusCode::ErrorFail,
        StatusCode::ErrorCancel,
        StatusCode::ErrorInvalidArg,
        StatusCode::ErrorNotImplement,
        StatusCode::ErrorNotSupport,
        StatusCode::ErrorInvalidOperation,
        StatusCode::ErrorClassNotFound,
        StatusCode::ErrorMethodNotFound,
    ];

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0x0000 => Some(StatusCode::SuccessOk),
            0x0001 => Some(StatusCode::ErrorFail),
            0x0002 => Some(StatusCode::ErrorCancel),
            0x0003 => Some(StatusCode::ErrorInvalidArg),
            0x0004 => Some(StatusCode::ErrorNotImplement),
            0x0005 => Some(StatusCode::ErrorNotSupport),
            0x0006 => Some(StatusCode::ErrorInvalidOperation),
            0x0007 => Some(StatusCode::ErrorClassNotFound),
            0x0008 => Some(StatusCode::ErrorMethodNotFound),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Name used on the wire (SCREAMING_SNAKE_CASE, e.g. `ERROR_CANCEL`).
    pub fn name(self) -> &'static str {
        match self {
            StatusCode::SuccessOk => "SUCCESS_OK",
            StatusCode::ErrorFail => "ERROR_FAIL",
            StatusCode::ErrorCancel => "ERROR_CANCEL",
            StatusCode::ErrorInvalidArg => "ERROR_INVALID_ARG",
            StatusCode::ErrorNotImplement => "ERROR_NOT_IMPLEMENT",
            StatusCode::ErrorNotSupport => "ERROR_NOT_SUPPORT",
            StatusCode::ErrorInvalidOperation => "ERROR_INVALID_OPERATION",
            StatusCode::ErrorClassNotFound => "ERROR_CLASS_NOT_FOUND",
            StatusCode::ErrorMethodNotFound => "ERROR_METHOD_NOT_FOUND",
        }
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::SuccessOk
    }
}

impl From<StatusCode> for i32 {
    fn from(code: StatusCode) -> Self {
        code.code()
    }
}

/// Returned when an integer is not one of the fixed members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code {0:#06x}")]
pub struct UnknownStatusCode(pub i32);

impl TryFrom<i32> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        StatusCode::from_code(code).ok_or(UnknownStatusCode(code))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name of any code: the member name, or `ERROR_CUSTOM:0x<hex>`.
///
/// Negative codes are rendered as their 32-bit two's complement
/// (`-1` → `ERROR_CUSTOM:0xffffffff`).
pub fn code_name(code: i32) -> Cow<'static, str> {
    match StatusCode::from_code(code) {
        Some(known) => Cow::Borrowed(known.name()),
        None => Cow::Owned(format!("{CUSTOM_CODE_PREFIX}{code:x}")),
    }
}

pub fn is_success(code: i32) -> bool {
    code == StatusCode::SuccessOk.code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::SuccessOk, 0x0000, "SUCCESS_OK")]
    #[case(StatusCode::ErrorFail, 0x0001, "ERROR_FAIL")]
    #[case(StatusCode::ErrorCancel, 0x0002, "ERROR_CANCEL")]
    #[case(StatusCode::ErrorInvalidArg, 0x0003, "ERROR_INVALID_ARG")]
    #[case(StatusCode::ErrorNotImplement, 0x0004, "ERROR_NOT_IMPLEMENT")]
    #[case(StatusCode::ErrorNotSupport, 0x0005, "ERROR_NOT_SUPPORT")]
    #[case(StatusCode::ErrorInvalidOperation, 0x0006, "ERROR_INVALID_OPERATION")]
    #[case(StatusCode::ErrorClassNotFound, 0x0007, "ERROR_CLASS_NOT_FOUND")]
    #[case(StatusCode::ErrorMethodNotFound, 0x0008, "ERROR_METHOD_NOT_FOUND")]
    fn known_codes_map_to_names(#[case] status: StatusCode, #[case] raw: i32, #[case] name: &str) {
        assert_eq!(status.code(), raw);
        assert_eq!(StatusCode::from_code(raw), Some(status));
        assert_eq!(status.name(), name);
        assert_eq!(code_name(raw), name);
    }

    #[rstest]
    #[case(9, "ERROR_CUSTOM:0x9")]
    #[case(0x1234, "ERROR_CUSTOM:0x1234")]
    #[case(0xabc, "ERROR_CUSTOM:0xabc")]
    #[case(-1, "ERROR_CUSTOM:0xffffffff")]
    fn custom_codes_get_hex_names(#[case] raw: i32, #[case] expected: &str) {
        assert_eq!(StatusCode::from_code(raw), None);
        assert_eq!(code_name(raw), expected);
    }

    #[test]
    fn all_is_in_code_order() {
        let codes: Vec<i32> = StatusCode::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, (0..=8).collect::<Vec<_>>());
    }

    #[test]
    fn only_zero_is_success() {
        assert!(is_success(0));
        assert!(StatusCode::SuccessOk.is_success());
        assert!(!is_success(1));
        assert!(!is_success(-1));
        assert!(!StatusCode::ErrorCancel.is_success());
    }

    #[test]
    fn serializes_as_raw_integer() {
        let s = serde_json::to_string(&StatusCode::ErrorCancel).unwrap();
        assert_eq!(s, "2");

        let back: StatusCode = serde_json::from_str("8").unwrap();
        assert_eq!(back, StatusCode::ErrorMethodNotFound);

        assert!(serde_json::from_str::<StatusCode>("42").is_err());
    }

    #[test]
    fn try_from_reports_unknown_code() {
        let err = StatusCode::try_from(0x42).unwrap_err();
        assert_eq!(err, UnknownStatusCode(0x42));
        assert_eq!(err.to_string(), "unknown status code 0x0042");
    }
}
