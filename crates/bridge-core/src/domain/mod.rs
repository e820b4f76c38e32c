//! Domain model (status codes, result records, errors).

pub mod errors;
pub mod record;
pub mod status;

pub use self::errors::EncodeError;
pub use self::record::{RecordDraft, ResultRecord};
pub use self::status::{CUSTOM_CODE_PREFIX, StatusCode, UnknownStatusCode, code_name, is_success};
