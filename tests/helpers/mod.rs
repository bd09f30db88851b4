/// Test doubles for the CAN bus and the telemetry feed used by the
/// integration tests.
use korri_efficiency::{
    error::FeedError,
    feed::{FeedConnector, FeedStream},
    protocol::transport::{can_frame::CanFrame, traits::can_bus::CanBus},
};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

//==================================================================================BUS
#[derive(Clone, Default)]
#[allow(dead_code)]
/// In-memory CAN bus recording every frame it is asked to send.
pub struct MockCanBus {
    frames: Arc<Mutex<Vec<CanFrame>>>,
    fail: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockCanBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `send` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn frames(&self) -> Vec<CanFrame> {
        self.frames.lock().unwrap().clone()
    }
}

impl CanBus for MockCanBus {
    type Error = &'static str;

    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
        async move {
            if self.fail.load(Ordering::SeqCst) {
                return Err("bus off");
            }
            self.frames.lock().unwrap().push(frame.clone());
            Ok(())
        }
    }
}

//==================================================================================FEED
#[derive(Clone, Debug)]
#[allow(dead_code)]
/// Behavior of one connection attempt.
pub enum Script {
    /// The connection is refused.
    Refuse,
    /// Deliver the messages, then stay silent.
    Serve(Vec<String>),
    /// Deliver the messages, then report the peer closed the stream.
    ServeThenClose(Vec<String>),
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Feed connector playing one [`Script`] per connection attempt. Once the
/// scripts run out, connections are refused.
pub struct MockConnector {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    attempts: Arc<AtomicUsize>,
    subscriptions: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockConnector {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Arc::new(Mutex::new(scripts.into())),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn subscriptions(&self) -> Vec<String> {
        self.subscriptions.lock().unwrap().clone()
    }
}

pub struct MockFeedStream {
    messages: VecDeque<String>,
    close_when_done: bool,
    subscriptions: Arc<Mutex<Vec<String>>>,
}

impl FeedConnector for MockConnector {
    type Stream = MockFeedStream;

    fn connect<'a>(
        &'a self,
    ) -> impl Future<Output = Result<Self::Stream, FeedError>> + Send + 'a {
        async move {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let script = self.scripts.lock().unwrap().pop_front();
            let (messages, close_when_done) = match script {
                Some(Script::Serve(messages)) => (messages, false),
                Some(Script::ServeThenClose(messages)) => (messages, true),
                Some(Script::Refuse) | None => {
                    return Err(FeedError::Connect(std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        "refused",
                    )))
                }
            };
            Ok(MockFeedStream {
                messages: messages.into(),
                close_when_done,
                subscriptions: Arc::clone(&self.subscriptions),
            })
        }
    }

    fn endpoint(&self) -> &str {
        "mock"
    }
}

impl FeedStream for MockFeedStream {
    fn subscribe<'a>(
        &'a mut self,
        request: &'a str,
    ) -> impl Future<Output = Result<(), FeedError>> + Send + 'a {
        async move {
            self.subscriptions.lock().unwrap().push(request.to_string());
            Ok(())
        }
    }

    fn next_message<'a>(
        &'a mut self,
    ) -> impl Future<Output = Result<String, FeedError>> + Send + 'a {
        async move {
            if let Some(message) = self.messages.pop_front() {
                return Ok(message);
            }
            if self.close_when_done {
                return Err(FeedError::Closed);
            }
            std::future::pending().await
        }
    }
}

//==================================================================================DATA
#[allow(dead_code)]
/// Signal K delta carrying the three tracked paths, from knots and degrees.
pub fn delta(stw_knots: f64, twa_degrees: f64, tws_knots: f64) -> String {
    serde_json::json!({
        "updates": [{
            "values": [
                { "path": "navigation.speedThroughWater", "value": stw_knots / 1.94384 },
                { "path": "environment.wind.angleTrueWater", "value": twa_degrees.to_radians() },
                { "path": "environment.wind.speedTrue", "value": tws_knots / 1.94384 }
            ]
        }]
    })
    .to_string()
}

#[allow(dead_code)]
/// Rebuild Fast Packet payloads from consecutive frames of one message.
pub fn reassemble(frames: &[CanFrame]) -> Vec<u8> {
    let total = frames[0].data[1] as usize;
    let mut payload = Vec::with_capacity(total);
    for (index, frame) in frames.iter().enumerate() {
        if index == 0 {
            payload.extend_from_slice(&frame.data[2..]);
        } else {
            payload.extend_from_slice(&frame.data[1..]);
        }
    }
    payload.truncate(total);
    payload
}
