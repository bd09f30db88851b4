//! Minimal abstraction for an asynchronous CAN transmitter. Allows the library
//! to plug into various outputs (serial gateway, SocketCAN driver, test double).
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Contract to send CAN frames asynchronously. The crate only broadcasts, it
/// never reads back from the bus.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Emit a frame on the bus. Asynchronous to accommodate non-blocking drivers.
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
