//! Asynchronous timer abstraction providing the pacing delays of the
//! transport layer.
use core::time::Duration;

/// Timer trait abstraction; must remain thread-safe when applicable.
pub trait KorriTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + Send + 'a;
}

/// [`KorriTimer`] backed by the tokio clock (pausable in tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

impl KorriTimer for TokioTimer {
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + Send + 'a {
        tokio::time::sleep(Duration::from_millis(millis as u64))
    }
}
