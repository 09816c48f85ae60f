//! Minimal protobuf wire writer
//!
//! Protobuf wire format:
//! - field key: varint `(field_number << 3) | wire_type`
//! - wire type 0: varint scalar
//! - wire type 2: length-delimited (varint length + payload)
//!
//! Scalar fields follow proto3 rules and are skipped at their default value.
//! Bytes and embedded-message fields are always emitted, even when empty, so
//! signed payloads survive byte-for-byte.

const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;

/// Append-only protobuf message writer
#[derive(Debug, Default)]
pub struct ProtoWriter {
    buf: Vec<u8>,
}

impl ProtoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw varint (no field key)
    pub fn varint(&mut self, mut value: u64) {
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80; // continuation bit
            }
            self.buf.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    fn key(&mut self, field: u32, wire_type: u64) {
        self.varint(((field as u64) << 3) | wire_type);
    }

    /// Varint scalar field; skipped when zero
    pub fn uint64(&mut self, field: u32, value: u64) {
        if value != 0 {
            self.key(field, WIRE_VARINT);
            self.varint(value);
        }
    }

    /// String field; skipped when empty
    pub fn string(&mut self, field: u32, value: &str) {
        if !value.is_empty() {
            self.key(field, WIRE_LEN);
            self.varint(value.len() as u64);
            self.buf.extend_from_slice(value.as_bytes());
        }
    }

    /// Bytes or embedded-message field; always emitted
    pub fn bytes(&mut self, field: u32, value: &[u8]) {
        self.key(field, WIRE_LEN);
        self.varint(value.len() as u64);
        self.buf.extend_from_slice(value);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint_bytes(value: u64) -> Vec<u8> {
        let mut w = ProtoWriter::new();
        w.varint(value);
        w.into_bytes()
    }

    #[test]
    fn test_varint_single_byte() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7f]);
    }

    #[test]
    fn test_varint_multi_byte() {
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(varint_bytes(200_000), vec![0xc0, 0x9a, 0x0c]);
    }

    #[test]
    fn test_varint_u64_max() {
        assert_eq!(
            varint_bytes(u64::MAX),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn test_uint64_field() {
        let mut w = ProtoWriter::new();
        w.uint64(3, 7);
        assert_eq!(w.into_bytes(), vec![0x18, 0x07]);

        // Zero is a proto3 default and is skipped
        let mut w = ProtoWriter::new();
        w.uint64(3, 0);
        assert!(w.into_bytes().is_empty());
    }

    #[test]
    fn test_high_field_number_key() {
        // Field 16 needs a two-byte key: (16 << 3) = 128
        let mut w = ProtoWriter::new();
        w.uint64(16, 1);
        assert_eq!(w.into_bytes(), vec![0x80, 0x01, 0x01]);
    }

    #[test]
    fn test_string_field() {
        let mut w = ProtoWriter::new();
        w.string(1, "atom");
        assert_eq!(hex::encode(w.into_bytes()), "0a0461746f6d");

        let mut w = ProtoWriter::new();
        w.string(1, "");
        assert!(w.into_bytes().is_empty());
    }

    #[test]
    fn test_bytes_field_always_emitted() {
        let mut w = ProtoWriter::new();
        w.bytes(2, &[0xde, 0xad]);
        assert_eq!(hex::encode(w.into_bytes()), "1202dead");

        // Empty bytes still produce a zero-length field
        let mut w = ProtoWriter::new();
        w.bytes(2, &[]);
        assert_eq!(hex::encode(w.into_bytes()), "1200");
    }
}
