//! Serial gateway in RAW pass-through mode (Yacht Devices YDNU-02 and
//! compatibles).
//!
//! Each CAN frame becomes one ASCII line:
//!
//! ```text
//! TIMESTAMP,PRIO,PGN,SRC,DST,LEN,HEX\r\n
//! 41135021,6,127489,42,255,8,A0,1A,00,FF,FF,FF,FF,FF
//! ```
//!
//! `TIMESTAMP` is milliseconds since local midnight, `HEX` uppercase byte
//! pairs separated by commas. Before any frame the gateway is switched to
//! RAW mode with [`RAW_MODE_COMMAND`].
use core::fmt::Write as _;
use core::time::Duration;

use chrono::{Local, Timelike};
use futures_util::Future;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

use crate::error::GatewayError;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::GLOBAL_ADDRESS;
use crate::protocol::transport::traits::can_bus::CanBus;

/// Switches the gateway into RAW pass-through mode.
pub const RAW_MODE_COMMAND: &str = "YDNU MODE RAW\r\n";

/// Serial line speed of the gateway.
pub const GATEWAY_BAUD_RATE: u32 = 115_200;

/// Pause before and after the mode command (ms).
pub const HANDSHAKE_SETTLE_MS: u64 = 500;

/// Read timeout while discarding the gateway's reply (ms).
const DRAIN_TIMEOUT_MS: u64 = 50;

/// Upper bound on discarded reply bytes. In RAW mode the gateway starts
/// echoing bus traffic, so the drain must stop on its own.
const DRAIN_LIMIT: usize = 4096;

//==================================================================================CLOCK
/// Source of the RAW line timestamp.
pub trait RawClock {
    /// Milliseconds elapsed since local midnight.
    fn ms_since_midnight(&self) -> u32;
}

/// Wall clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl RawClock for LocalClock {
    fn ms_since_midnight(&self) -> u32 {
        ms_since_midnight(&Local::now())
    }
}

/// Milliseconds since midnight of `time`'s own day. A leap second is folded
/// into the last millisecond of its second.
pub fn ms_since_midnight<T: Timelike>(time: &T) -> u32 {
    let millis = (time.nanosecond() / 1_000_000).min(999);
    time.num_seconds_from_midnight() * 1000 + millis
}

//==================================================================================LINE
/// Render one frame as a RAW line, terminator included.
pub fn format_raw_line(timestamp_ms: u32, frame: &CanFrame) -> String {
    let payload = frame.payload();
    let mut line = String::with_capacity(32 + payload.len() * 3);
    // Writing into a String cannot fail.
    let _ = write!(
        line,
        "{},{},{},{},{},{}",
        timestamp_ms,
        frame.id.priority(),
        frame.id.pgn(),
        frame.id.source_address(),
        frame.id.destination().unwrap_or(GLOBAL_ADDRESS),
        payload.len(),
    );
    for byte in payload {
        let _ = write!(line, ",{byte:02X}");
    }
    line.push_str("\r\n");
    line
}

//==================================================================================GATEWAY
/// [`CanBus`] writing RAW lines to a byte stream (serial port, socket, pipe).
pub struct RawGateway<W, C = LocalClock> {
    stream: W,
    clock: C,
}

impl<W> RawGateway<W, LocalClock> {
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            clock: LocalClock,
        }
    }
}

impl<W, C> RawGateway<W, C> {
    /// Replace the timestamp source.
    pub fn with_clock<C2: RawClock>(self, clock: C2) -> RawGateway<W, C2> {
        RawGateway {
            stream: self.stream,
            clock,
        }
    }
}

impl<W, C> RawGateway<W, C>
where
    W: AsyncRead + AsyncWrite + Unpin,
{
    /// Put the gateway in RAW mode: settle, send the mode command, settle
    /// again, then discard whatever the gateway answered.
    pub async fn handshake(&mut self) -> Result<(), GatewayError> {
        tokio::time::sleep(Duration::from_millis(HANDSHAKE_SETTLE_MS)).await;
        self.stream.write_all(RAW_MODE_COMMAND.as_bytes()).await?;
        self.stream.flush().await?;
        tokio::time::sleep(Duration::from_millis(HANDSHAKE_SETTLE_MS)).await;

        let drained = self.drain().await?;
        debug!(bytes = drained, "gateway reply discarded");
        Ok(())
    }

    async fn drain(&mut self) -> Result<usize, GatewayError> {
        let mut scratch = [0u8; 256];
        let mut drained = 0;
        while drained < DRAIN_LIMIT {
            let read = tokio::time::timeout(
                Duration::from_millis(DRAIN_TIMEOUT_MS),
                self.stream.read(&mut scratch),
            )
            .await;
            match read {
                Ok(Ok(0)) | Err(_) => break,
                Ok(Ok(n)) => drained += n,
                Ok(Err(e)) => return Err(e.into()),
            }
        }
        Ok(drained)
    }
}

impl<W, C> CanBus for RawGateway<W, C>
where
    W: AsyncWrite + Unpin + Send,
    C: RawClock + Send,
{
    type Error = GatewayError;

    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
        let line = format_raw_line(self.clock.ms_since_midnight(), frame);
        async move {
            self.stream.write_all(line.as_bytes()).await?;
            self.stream.flush().await?;
            Ok(())
        }
    }
}

/// Open the gateway's serial device and switch it to RAW mode.
pub async fn open_serial(path: &str) -> Result<RawGateway<SerialStream>, GatewayError> {
    let stream = tokio_serial::new(path, GATEWAY_BAUD_RATE).open_native_async()?;
    let mut gateway = RawGateway::new(stream);
    gateway.handshake().await?;
    info!(port = path, baud = GATEWAY_BAUD_RATE, "gateway in RAW mode");
    Ok(gateway)
}
