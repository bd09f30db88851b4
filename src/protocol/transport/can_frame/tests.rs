//! `CanFrame` accessors and its `embedded_can::Frame` implementation.
use super::*;
use embedded_can::StandardId;

#[test]
/// Short data is padded with 0xFF; the DLC keeps the real length.
fn test_new_pads_short_data() {
    let id = ExtendedId::new(0x19F2_012A).unwrap();
    let frame = CanFrame::new(id, &[0x01, 0x02, 0x03]).unwrap();

    assert_eq!(frame.id, CanId(0x19F2_012A));
    assert_eq!(frame.data, [0x01, 0x02, 0x03, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(frame.dlc(), 3);
    assert_eq!(Frame::data(&frame), &[0x01, 0x02, 0x03]);
    assert_eq!(frame.payload(), &[0x01, 0x02, 0x03]);
}

#[test]
/// Eight bytes fill the frame; nine do not fit.
fn test_new_data_length_limit() {
    let id = ExtendedId::new(0x19F2_012A).unwrap();
    let full = CanFrame::new(id, &[0xAA; 8]).unwrap();
    assert_eq!(full.dlc(), 8);
    assert_eq!(full.data, [0xAA; 8]);

    assert!(CanFrame::new(id, &[0xAA; 9]).is_none());
}

#[test]
/// NMEA 2000 only uses 29-bit identifiers and data frames.
fn test_standard_and_remote_rejected() {
    let standard = StandardId::new(0x123).unwrap();
    assert!(CanFrame::new(standard, &[0x00]).is_none());

    let extended = ExtendedId::new(0x0CF0_0400).unwrap();
    assert!(CanFrame::new_remote(extended, 8).is_none());
}

#[test]
/// Frames built by the crate report their identifier as extended.
fn test_id_and_flags() {
    let frame = CanFrame {
        id: CanId::builder(127489, 42).with_priority(6).build().unwrap(),
        data: [0x00; 8],
        len: FRAME_LEN,
    };

    assert!(frame.is_extended());
    assert!(!frame.is_standard());
    assert!(frame.is_data_frame());
    assert!(!frame.is_remote_frame());
    assert_eq!(frame.id(), Id::Extended(ExtendedId::new(0x19F2_012A).unwrap()));
    assert_eq!(frame.dlc(), 8);
}
