//! Test-only protobuf writer and gzip helper.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::io::Write as _;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Minimal encoder for building frames by hand.
#[derive(Default)]
pub struct ProtoWriter {
    buf: Vec<u8>,
}

impl ProtoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn tag(self, field: u32, wire_type: u32) -> Self {
        self.varint(u64::from((field << 3) | wire_type))
    }

    pub fn varint(mut self, mut v: u64) -> Self {
        loop {
            let b = (v & 0x7F) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.push(b);
                return self;
            }
            self.buf.push(b | 0x80);
        }
    }

    pub fn uint(self, field: u32, v: u64) -> Self {
        self.tag(field, 0).varint(v)
    }

    pub fn int(self, field: u32, v: i64) -> Self {
        self.uint(field, v as u64)
    }

    pub fn bytes(self, field: u32, data: &[u8]) -> Self {
        self.tag(field, 2).varint(data.len() as u64).raw(data)
    }

    pub fn string(self, field: u32, s: &str) -> Self {
        self.bytes(field, s.as_bytes())
    }

    pub fn message(self, field: u32, inner: ProtoWriter) -> Self {
        let data = inner.finish();
        self.bytes(field, &data)
    }

    pub fn fixed32(self, field: u32, v: u32) -> Self {
        self.tag(field, 5).raw(&v.to_le_bytes())
    }

    pub fn fixed64(self, field: u32, v: u64) -> Self {
        self.tag(field, 1).raw(&v.to_le_bytes())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn user(id: u64, nickname: &str) -> ProtoWriter {
    ProtoWriter::new().uint(1, id).string(3, nickname)
}

/// One batch entry: method, payload, message id.
pub fn inner(method: &str, payload: &[u8]) -> ProtoWriter {
    ProtoWriter::new().string(1, method).bytes(2, payload).uint(3, 1)
}

/// Envelope around `payload`, optionally declaring gzip.
pub fn push_frame(payload: &[u8], gzip_header: bool) -> Vec<u8> {
    let mut w = ProtoWriter::new().uint(1, 1).uint(2, 2);
    if gzip_header {
        w = w.message(5, ProtoWriter::new().string(1, "compress_type").string(2, "gzip"));
    }
    w.bytes(8, payload).finish()
}
