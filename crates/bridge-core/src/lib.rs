//! bridge-core
//!
//! Result records for a native plugin bridge: status code naming, record
//! construction and delivery to a host-supplied sink.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（StatusCode, ResultRecord, RecordDraft, EncodeError）
//! - **ports**: 抽象化レイヤー（ResultSink）
//! - **app**: アプリケーションロジック（ResultEncoder, GateContext, EncoderConfig）
//! - **impls**: Sink の実装（RecordingSink, TracingSink, FnSink）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{EncoderConfig, GateContext, Outgoing, ResultEncoder, ResultSpec};
pub use domain::{EncodeError, RecordDraft, ResultRecord, StatusCode};
pub use ports::{Delivery, ResultSink};
