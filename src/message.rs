use std::error::Error;
use crate::descriptor::{Descriptor, NULL_DESCRIPTOR};

const INT_SIZE: usize = 4;
const DESCRIPTOR_SIZE: usize = 2 * INT_SIZE;

/// Transport-level tags separating the two receive paths
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTag {
    Push,
    Pull,
}

/// Number of descriptor slots in a message, for view size `c`.
/// A buffer holds at most the own descriptor plus half a view.
pub fn wire_capacity(c: usize) -> usize {
    c / 2 + 1
}

/// Exact size in bytes of every message on the wire, for view size `c`.
/// Messages have a fixed size so receivers can post a bounded receive.
pub fn message_size(c: usize) -> usize {
    INT_SIZE + wire_capacity(c) * DESCRIPTOR_SIZE
}

/// A peer sampling exchange message: the sender rank and a buffer of
/// descriptors from the sender's view
#[derive(Debug, PartialEq)]
pub struct Message {
    /// Rank of the sender
    sender: i32,
    /// The descriptors exchanged
    buffer: Vec<Descriptor>,
}

impl Message {
    /// Creates a new message
    ///
    /// # Arguments
    ///
    /// * `sender` - Rank of the sending process
    /// * `buffer` - At most [wire_capacity] descriptors, none of them null
    pub fn new(sender: i32, buffer: Vec<Descriptor>) -> Message {
        Message { sender, buffer }
    }

    /// Returns the rank of the sender
    pub fn sender(&self) -> i32 {
        self.sender
    }

    /// Returns the descriptors carried by the message
    pub fn buffer(&self) -> &[Descriptor] {
        &self.buffer
    }

    /// Serializes the message into the fixed-size wire layout: the sender
    /// rank, then exactly `c/2 + 1` descriptor records with unused tail
    /// slots filled with [NULL_DESCRIPTOR]. Integers are little-endian.
    pub fn as_bytes(&self, view_size: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(message_size(view_size));
        bytes.extend_from_slice(&self.sender.to_le_bytes());
        for slot in 0..wire_capacity(view_size) {
            let descriptor = self.buffer.get(slot).copied().unwrap_or(NULL_DESCRIPTOR);
            bytes.extend_from_slice(&descriptor.rank().to_le_bytes());
            bytes.extend_from_slice(&descriptor.age().to_le_bytes());
        }
        bytes
    }

    /// Deserializes a message from the fixed-size wire layout, stripping
    /// the null padding. Padding is recognized on both fields of a record.
    ///
    /// # Arguments
    ///
    /// * `bytes` - A serialized message of exactly [message_size] bytes
    /// * `view_size` - The view size parameter the message was packed with
    pub fn from_bytes(bytes: &[u8], view_size: usize) -> Result<Message, Box<dyn Error>> {
        if bytes.len() != message_size(view_size) {
            Err("invalid message length")?
        }
        let sender = read_i32(bytes, 0);
        let mut buffer = Vec::with_capacity(wire_capacity(view_size));
        for slot in 0..wire_capacity(view_size) {
            let offset = INT_SIZE + slot * DESCRIPTOR_SIZE;
            let descriptor = Descriptor::with_age(
                read_i32(bytes, offset),
                read_i32(bytes, offset + INT_SIZE),
            );
            if !descriptor.is_null() {
                buffer.push(descriptor);
            }
        }
        Ok(Message { sender, buffer })
    }
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut raw = [0u8; INT_SIZE];
    raw.copy_from_slice(&bytes[offset..offset + INT_SIZE]);
    i32::from_le_bytes(raw)
}
