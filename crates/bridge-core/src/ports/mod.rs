//! Ports - 抽象化レイヤー
//!
//! The encoder talks to the host only through these traits, so a plugin
//! runtime, a test harness or a CLI can each supply their own delivery.

pub mod sink;

pub use self::sink::{Delivery, ResultSink};
