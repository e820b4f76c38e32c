//! FnSink - クロージャを ResultSink として使うためのアダプタ

use std::fmt;

use crate::domain::ResultRecord;
use crate::ports::{Delivery, ResultSink};

/// Wraps `Fn(Delivery, ResultRecord)` so a host callback can be plugged in
/// without a dedicated type.
///
/// # 使用例
/// ```
/// use bridge_core::impls::FnSink;
///
/// let sink = FnSink::new(|channel, record| {
///     println!("{channel}: {}", record.name());
/// });
/// # let _ = sink;
/// ```
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F>
where
    F: Fn(Delivery, ResultRecord) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ResultSink for FnSink<F>
where
    F: Fn(Delivery, ResultRecord) + Send + Sync,
{
    fn deliver_ok(&self, payload: ResultRecord) {
        (self.f)(Delivery::Ok, payload)
    }

    fn deliver_error(&self, payload: ResultRecord) {
        (self.f)(Delivery::Error, payload)
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}
