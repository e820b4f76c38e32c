//! Impls - ResultSink の実装
//!
//! # 含まれる実装
//! - **RecordingSink**: 配送結果をメモリに保持（テスト・dry run 用）
//! - **TracingSink**: 配送結果を tracing でログ出力
//! - **FnSink**: クロージャをそのまま Sink として使う
//!
//! Host-specific sinks (a plugin callback context, ...) live with the host
//! integration, not here.

pub mod fn_sink;
pub mod recording;
pub mod tracing_sink;

pub use self::fn_sink::FnSink;
pub use self::recording::RecordingSink;
pub use self::tracing_sink::TracingSink;
