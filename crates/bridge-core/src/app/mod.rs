//! App - アプリケーション層
//!
//! domain と ports を組み合わせて、結果の生成から配送までを行います。
//!
//! # 主要コンポーネント
//! - **ResultEncoder**: ResultRecord の生成と success / error チャネルへの配送
//! - **GateContext**: ブリッジ呼び出し 1 回分のコンテキスト（結果は 1 回だけ送る）
//! - **EncoderConfig**: name に付けるタグなどの設定

pub mod config;
pub mod context;
pub mod encoder;

pub use self::config::{DEFAULT_TAG, EncoderConfig};
pub use self::context::{ExecInfo, GateContext};
pub use self::encoder::{Outgoing, ResultEncoder, ResultSpec};
