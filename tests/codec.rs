use peer_sampling::{message_size, wire_capacity, Descriptor, Message};

#[test]
fn padding_round_trip() {
    let view_size = 4;
    let message = Message::new(2, vec![Descriptor::with_age(9, 3)]);
    let bytes = message.as_bytes(view_size);

    // sender plus three descriptor slots of two integers each
    assert_eq!(3, wire_capacity(view_size));
    assert_eq!(4 + 3 * 8, message_size(view_size));
    assert_eq!(message_size(view_size), bytes.len());

    // the two unused tail slots are null records
    for offset in &[12, 16, 20, 24] {
        assert_eq!((-1i32).to_le_bytes(), bytes[*offset..*offset + 4]);
    }

    let decoded = Message::from_bytes(&bytes, view_size).unwrap();
    assert_eq!(2, decoded.sender());
    assert_eq!(&[Descriptor::with_age(9, 3)], decoded.buffer());
}

#[test]
fn full_buffer_round_trip() {
    let view_size = 6;
    let buffer = vec![
        Descriptor::with_age(0, 0),
        Descriptor::with_age(7, 12),
        Descriptor::with_age(3, 1),
        Descriptor::with_age(11, 5),
    ];
    assert_eq!(wire_capacity(view_size), buffer.len());

    let message = Message::new(4, buffer);
    let decoded = Message::from_bytes(&message.as_bytes(view_size), view_size).unwrap();
    assert_eq!(message, decoded);
}

#[test]
fn empty_buffer_round_trip() {
    let view_size = 6;
    let message = Message::new(1, Vec::new());
    let bytes = message.as_bytes(view_size);
    assert_eq!(message_size(view_size), bytes.len());

    let decoded = Message::from_bytes(&bytes, view_size).unwrap();
    assert_eq!(message, decoded);
}

#[test]
fn wrong_length_is_rejected() {
    let view_size = 4;
    let bytes = Message::new(0, Vec::new()).as_bytes(view_size);

    assert!(Message::from_bytes(&bytes[..bytes.len() - 1], view_size).is_err());
    assert!(Message::from_bytes(&[], view_size).is_err());
    // a message packed for another view size has the wrong length too
    assert!(Message::from_bytes(&bytes, 6).is_err());
}

#[test]
fn padding_is_recognized_on_both_fields() {
    let view_size = 4;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0i32.to_le_bytes());
    // a negative rank with a non-null age is data, not padding
    bytes.extend_from_slice(&(-1i32).to_le_bytes());
    bytes.extend_from_slice(&5i32.to_le_bytes());
    for _ in 0..2 {
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
    }

    let decoded = Message::from_bytes(&bytes, view_size).unwrap();
    assert_eq!(&[Descriptor::with_age(-1, 5)], decoded.buffer());
}
