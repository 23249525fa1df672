//! Properties of the wire layer and of whole-frame decoding under damage.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use castwire_core::batch::decode_response;
use castwire_core::wire::Cursor;
use castwire_core::{decode_bytes, DecodeOptions};

mod common;
use common::{gzip, inner, push_frame, user, ProtoWriter};

#[test]
fn varint64_samples_round_trip() {
    let samples: [u64; 10] = [
        0,
        1,
        127,
        128,
        300,
        u64::from(u32::MAX),
        u64::from(u32::MAX) + 1,
        1_700_000_000_000,
        i64::MAX as u64,
        u64::MAX,
    ];
    for v in samples {
        let bytes = ProtoWriter::new().varint(v).finish();
        let mut cur = Cursor::new(&bytes);
        assert_eq!(cur.read_varint64(true).unwrap(), v.to_string());
        assert!(cur.at_end());

        let mut cur = Cursor::new(&bytes);
        assert_eq!(cur.read_varint64(false).unwrap(), (v as i64).to_string());
    }
}

#[test]
fn varint32_samples_round_trip() {
    let mut n: u32 = 1;
    let mut samples = vec![0u32, u32::MAX, 1 << 31];
    while let Some(next) = n.checked_mul(3) {
        samples.push(n);
        n = next;
    }
    for v in samples {
        let bytes = ProtoWriter::new().varint(u64::from(v)).finish();
        let groups = (32 - v.leading_zeros()).max(1).div_ceil(7) as usize;
        assert_eq!(bytes.len(), groups, "value {v}");

        let mut cur = Cursor::new(&bytes);
        assert_eq!(cur.read_varint32().unwrap() as u32, v);
        assert!(cur.at_end());
    }
}

#[test]
fn varint32_drops_high_bits() {
    let bytes = ProtoWriter::new().varint(u64::MAX).finish();
    let mut cur = Cursor::new(&bytes);
    assert_eq!(cur.read_varint32().unwrap(), -1);
    assert!(cur.at_end());
}

#[test]
fn skipping_every_wire_type_lands_on_the_next_tag() {
    let fields = ProtoWriter::new()
        .uint(1, 1 << 40)
        .fixed64(2, 7)
        .string(3, "skip me")
        .fixed32(4, 9)
        .tag(5, 3)
        .uint(1, 5)
        .tag(6, 3)
        .string(2, "deep")
        .tag(6, 4)
        .tag(5, 4)
        .string(15, "marker")
        .finish();

    let mut cur = Cursor::new(&fields);
    loop {
        let tag = cur.read_tag().unwrap().unwrap();
        if tag.field == 15 {
            assert_eq!(cur.read_len_string().unwrap(), "marker");
            break;
        }
        cur.skip_unknown_field(tag.wire_type).unwrap();
    }
    assert!(cur.at_end());
}

#[test]
fn nested_user_cannot_read_into_siblings() {
    // The user sub-message ends right after its id; the nickname that
    // follows belongs to the chat (field 3 = content).
    let chat = ProtoWriter::new()
        .message(2, ProtoWriter::new().uint(1, 5))
        .string(3, "outside")
        .finish();
    let msg = castwire_core::message::chat::decode_chat(&chat);
    assert!(!msg.truncated);
    let u = msg.value.user.unwrap();
    assert_eq!(u.id, "5");
    assert_eq!(u.nickname, "");
    assert_eq!(msg.value.content, "outside");
}

fn sample_frame() -> Vec<u8> {
    let chat = ProtoWriter::new()
        .message(1, ProtoWriter::new().uint(1, 1))
        .message(2, user(42, "A"))
        .string(3, "hello there")
        .finish();
    let seq = ProtoWriter::new().uint(2, 10).uint(3, 20).finish();
    let batch = ProtoWriter::new()
        .message(1, inner("WebcastChatMessage", &chat))
        .message(1, inner("WebcastRoomUserSeqMessage", &seq))
        .uint(4, 1_700_000_000_000)
        .finish();
    push_frame(&batch, false)
}

#[test]
fn every_truncated_prefix_decodes_without_panicking() {
    let frame = sample_frame();
    let opts = DecodeOptions::default();
    for end in 0..=frame.len() {
        let prefix = &frame[..end];
        let a = decode_bytes(prefix, &opts);
        let b = decode_bytes(prefix, &opts);
        assert_eq!(a, b, "prefix len {end}");
    }
    let full = decode_bytes(&frame, &opts).unwrap();
    assert_eq!(full.records.len(), 2);
    assert!(!full.truncated);
}

#[test]
fn every_truncated_batch_keeps_a_prefix_of_messages() {
    let chat = ProtoWriter::new().message(2, user(1, "x")).string(3, "a").finish();
    let batch = ProtoWriter::new()
        .message(1, inner("WebcastChatMessage", &chat))
        .message(1, inner("WebcastChatMessage", &chat))
        .finish();
    let full = decode_response(&batch);
    assert_eq!(full.messages.len(), 2);

    for end in 0..batch.len() {
        let resp = decode_response(&batch[..end]);
        assert!(resp.messages.len() < 2, "prefix len {end}");
        for (got, want) in resp.messages.iter().zip(&full.messages) {
            assert_eq!(got, want, "prefix len {end}");
        }
    }
}

#[test]
fn inner_gzip_payload_is_sniffed() {
    let chat = ProtoWriter::new().message(2, user(3, "Z")).string(3, "zipped").finish();
    let batch = ProtoWriter::new()
        .message(1, inner("WebcastChatMessage", &gzip(&chat)))
        .finish();
    let frame = push_frame(&batch, false);

    let out = decode_bytes(&frame, &DecodeOptions::default()).unwrap();
    assert_eq!(out.records[0].get_str("content"), Some("zipped"));

    let off = DecodeOptions {
        sniff_inner_gzip: false,
        ..DecodeOptions::default()
    };
    let out = decode_bytes(&frame, &off).unwrap();
    assert_ne!(out.records[0].get_str("content"), Some("zipped"));
}

#[test]
fn oversized_inflation_is_undecompressable() {
    let big = vec![0u8; 8 * 1024];
    let frame = push_frame(&gzip(&big), true);
    let opts = DecodeOptions {
        max_decompressed_bytes: 1024,
        ..DecodeOptions::default()
    };
    let out = decode_bytes(&frame, &opts).unwrap();
    assert!(matches!(
        out.payload_state,
        castwire_core::PayloadState::Undecompressable(_)
    ));
    assert_eq!(out.stats.inflate_failures, 1);
}
