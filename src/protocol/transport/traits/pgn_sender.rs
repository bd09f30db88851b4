//! One-call broadcast of a PGN record on any [`CanBus`]: encode into a stack
//! buffer, draw one Fast Packet sequence identifier, then write the frames in
//! order.
//!
//! # Pacing
//!
//! Consecutive frames of one record are spaced by
//! [`FAST_PACKET_INTER_FRAME_DELAY_MS`] so USB gateways with shallow queues keep
//! up. The first frame leaves immediately.
use crate::{
    error::SendPgnError,
    infra::codec::traits::PgnPayload,
    protocol::transport::fast_packet::{segment_to_frames, SequenceCounter, MAX_FAST_PACKET_PAYLOAD},
    protocol::transport::traits::{can_bus::CanBus, korri_timer::KorriTimer},
    protocol::transport::FAST_PACKET_INTER_FRAME_DELAY_MS,
};

/// Record-level transmit on top of frame-level [`CanBus::send`].
pub trait PgnSender: CanBus
where
    <Self as CanBus>::Error: core::fmt::Debug,
{
    /// Serialize, segment, and broadcast a PGN over the CAN bus.
    ///
    /// Transparently handles:
    /// - **Single-frame PGNs** (≤ 8 bytes): sent as a single CAN frame.
    /// - **Fast Packet PGNs** (> 8 bytes): segmented into multiple frames that
    ///   share one identifier drawn from `sequence`.
    ///
    /// Returns the number of frames written.
    ///
    /// # Errors
    ///
    /// - [`SendPgnError::Serialization`] when serialization fails
    /// - [`SendPgnError::Build`] when frame construction fails
    /// - [`SendPgnError::Send`] when bus transmission fails; frames already
    ///   written are not recalled.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let record = EngineParametersDynamic::with_load(0, 104.2);
    /// let sequence = SequenceCounter::new();
    /// gateway
    ///     .send_pgn(&record, 42, EngineParametersDynamic::PRIORITY, &sequence, &mut TokioTimer)
    ///     .await?;
    /// ```
    fn send_pgn<'a, P, T>(
        &'a mut self,
        pgn_data: &'a P,
        source_address: u8,
        priority: u8,
        sequence: &'a SequenceCounter,
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<usize, SendPgnError<Self::Error>>> + Send + 'a
    where
        P: PgnPayload + Sync,
        T: KorriTimer + Send;
}

impl<C> PgnSender for C
where
    C: CanBus + Send,
    C::Error: core::fmt::Debug + Send,
{
    fn send_pgn<'a, P, T>(
        &'a mut self,
        pgn_data: &'a P,
        source_address: u8,
        priority: u8,
        sequence: &'a SequenceCounter,
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<usize, SendPgnError<Self::Error>>> + Send + 'a
    where
        P: PgnPayload + Sync,
        T: KorriTimer + Send,
    {
        async move {
            let mut payload_buffer = [0u8; MAX_FAST_PACKET_PAYLOAD];
            let len = pgn_data
                .to_payload(&mut payload_buffer)
                .map_err(SendPgnError::Serialization)?;

            let frames = segment_to_frames(
                sequence,
                P::PGN,
                source_address,
                priority,
                &payload_buffer[..len],
            )
            .map_err(SendPgnError::Build)?;

            for (index, frame) in frames.iter().enumerate() {
                // No delay before the first frame.
                if index > 0 {
                    timer.delay_ms(FAST_PACKET_INTER_FRAME_DELAY_MS).await;
                }
                self.send(frame).await.map_err(SendPgnError::Send)?;
            }

            Ok(frames.len())
        }
    }
}
