//! Newline-delimited JSON feed over TCP (Signal K "TCP stream" interface,
//! port 8375 by default).
use futures_util::Future;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::error::FeedError;
use crate::feed::{FeedConnector, FeedStream};

#[derive(Debug, Clone)]
pub struct TcpFeedConnector {
    address: String,
}

impl TcpFeedConnector {
    /// `address` is `host:port`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl FeedConnector for TcpFeedConnector {
    type Stream = TcpFeedStream;

    fn connect<'a>(&'a self) -> impl Future<Output = Result<Self::Stream, FeedError>> + Send + 'a {
        async move {
            let stream = TcpStream::connect(self.address.as_str())
                .await
                .map_err(FeedError::Connect)?;
            let (reader, writer) = stream.into_split();
            Ok(TcpFeedStream {
                lines: BufReader::new(reader).lines(),
                writer,
            })
        }
    }

    fn endpoint(&self) -> &str {
        &self.address
    }
}

/// Connected TCP feed.
#[derive(Debug)]
pub struct TcpFeedStream {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl FeedStream for TcpFeedStream {
    fn subscribe<'a>(
        &'a mut self,
        request: &'a str,
    ) -> impl Future<Output = Result<(), FeedError>> + Send + 'a {
        async move {
            self.writer
                .write_all(request.as_bytes())
                .await
                .map_err(FeedError::Subscribe)?;
            self.writer.write_all(b"\n").await.map_err(FeedError::Subscribe)?;
            self.writer.flush().await.map_err(FeedError::Subscribe)
        }
    }

    fn next_message<'a>(&'a mut self) -> impl Future<Output = Result<String, FeedError>> + Send + 'a {
        async move {
            match self.lines.next_line().await {
                Ok(Some(line)) => Ok(line),
                Ok(None) => Err(FeedError::Closed),
                Err(e) => Err(FeedError::Receive(e)),
            }
        }
    }
}
