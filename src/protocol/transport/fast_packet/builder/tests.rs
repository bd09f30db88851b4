//! Tests for the Fast Packet frame generator (`FrameIterator`).
use super::*;
use crate::{error::CanIdBuildError, protocol::transport::fast_packet::MAX_FAST_PACKET_PAYLOAD};

#[test]
/// Short payload: remains a single classic CAN frame (no Fast Packet).
fn test_builder_single_frame() {
    let payload = [1, 2, 3, 4, 5];
    let builder = FastPacketBuilder::new(129025, 42, &payload);
    let mut iter = builder.build();

    let frame = iter.next().unwrap().unwrap();
    assert_eq!(frame.len, 8);
    assert_eq!(&frame.data[..5], &payload);
    assert_eq!(&frame.data[5..], &[0xFF, 0xFF, 0xFF]);

    // Should be the only frame
    assert!(iter.next().is_none());
}

#[test]
/// Ten-byte payload split across two Fast Packet frames.
fn test_builder_two_frames() {
    // 10 bytes → 2 frames (6+4)
    let payload = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let builder = FastPacketBuilder::new(129040, 50, &payload).with_sequence_id(0);
    let mut iter = builder.build();

    let frame0 = iter.next().unwrap().unwrap();
    assert_eq!(frame0.data[0], 0); // seq_id
    assert_eq!(frame0.data[1], 10); // length
    assert_eq!(&frame0.data[2..8], &[1, 2, 3, 4, 5, 6]);
    assert_eq!(frame0.len, 8);

    let frame1 = iter.next().unwrap().unwrap();
    assert_eq!(frame1.data[0], 1); // seq_id
    assert_eq!(&frame1.data[1..5], &[7, 8, 9, 10]);
    assert_eq!(&frame1.data[5..], &[0xFF, 0xFF, 0xFF]);
    assert_eq!(frame1.len, 8);

    assert!(iter.next().is_none());
}

#[test]
/// A 26-byte record: 6 + 7 + 7 + 6 bytes over four frames.
fn test_builder_engine_record_layout() {
    let payload: Vec<u8> = (0..26).collect();
    let frames: Vec<_> = FastPacketBuilder::new(127489, 42, &payload)
        .with_sequence_id(5)
        .build()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(frames.len(), 4);
    for (index, frame) in frames.iter().enumerate() {
        assert_eq!(frame.data[0], (5 << 5) | index as u8);
        assert_eq!(frame.len, 8);
        assert_eq!(frame.id.pgn(), 127489);
    }
    assert_eq!(frames[0].data[1], 26);
    assert_eq!(frames[3].data[1..7], [20, 21, 22, 23, 24, 25]);
    assert_eq!(frames[3].data[7], 0xFF);
}

#[test]
/// Maximum payload: ensures 32 frames are produced.
fn test_builder_max_payload() {
    let payload = [0xAA; 223]; // Max Fast Packet
    let builder = FastPacketBuilder::new(129540, 25, &payload);
    let mut iter = builder.build();

    let frame0 = iter.next().unwrap().unwrap();
    assert_eq!(frame0.data[1], 223); // total length

    let mut count = 1;
    while iter.next().is_some() {
        count += 1;
    }

    // 6 + 31*7 = 223 → 32 frames
    assert_eq!(count, 32);
}

#[test]
/// Priority is applied to every frame identifier.
fn test_builder_priority() {
    let payload = [0u8; 20];
    let frames: Vec<_> = FastPacketBuilder::new(127489, 42, &payload)
        .with_priority(3)
        .build()
        .map(Result::unwrap)
        .collect();
    assert!(frames.iter().all(|f| f.id.priority() == 3));
    assert!(frames.iter().all(|f| f.id.source_address() == 42));
}

#[test]
/// Destination-aware PGNs keep their target in the generated frames.
fn test_builder_with_destination() {
    let payload = [1, 2, 3];
    let builder = FastPacketBuilder::new(59904, 42, &payload).to_destination(50);
    let mut iter = builder.build();

    let frame = iter.next().unwrap().unwrap();
    assert_eq!(frame.id.destination(), Some(50));
}

#[test]
/// Oversized payload: returns an error and stops the iteration.
fn test_builder_payload_too_large() {
    let payload = [0x11; MAX_FAST_PACKET_PAYLOAD + 1];
    let builder = FastPacketBuilder::new(129540, 42, &payload);
    let mut iter = builder.build();

    let err = iter.next().unwrap().unwrap_err();
    assert!(matches!(err, CanIdBuildError::InvalidData));
    assert!(iter.next().is_none());
}

#[test]
/// Nothing to send is a caller bug.
fn test_builder_empty_payload() {
    let mut iter = FastPacketBuilder::new(127489, 42, &[]).build();
    assert_eq!(iter.next(), Some(Err(CanIdBuildError::EmptyPayload)));
    assert!(iter.next().is_none());
}

#[test]
/// Identifier errors stop the iteration.
fn test_builder_invalid_identifier() {
    let payload = [0u8; 12];
    let mut iter = FastPacketBuilder::new(127489, 42, &payload)
        .to_destination(7)
        .build();
    assert_eq!(
        iter.next(),
        Some(Err(CanIdBuildError::InvalidForFocusedMessage { pf: 0xF2 }))
    );
    assert!(iter.next().is_none());
}

#[test]
/// Eight consecutive messages then one more: sequence ids 0..=7 then 0.
fn test_segment_to_frames_sequence_wraps() {
    let counter = SequenceCounter::new();
    let payload = [0x55; 26];

    let sequences: Vec<u8> = (0..9)
        .map(|_| {
            let frames = segment_to_frames(&counter, 127489, 42, 6, &payload).unwrap();
            let seq = frames[0].data[0] >> 5;
            // One value per record, shared by all of its frames.
            assert!(frames.iter().all(|f| f.data[0] >> 5 == seq));
            seq
        })
        .collect();

    assert_eq!(sequences, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
}

#[test]
/// A failed encode still consumes its sequence identifier.
fn test_segment_to_frames_error_advances_counter() {
    let counter = SequenceCounter::starting_at(6);
    assert!(segment_to_frames(&counter, 127489, 42, 6, &[]).is_err());
    assert_eq!(counter.peek(), 7);
    assert_eq!(counter.next(), 7);
    assert_eq!(counter.next(), 0);
}
