#[macro_use]
extern crate proptest;

mod utils;

use proptest::collection::vec;
use proptest::prelude::*;

use utils::*;
use xtrace_proto::profiler::*;
use xtrace_wire::internal::*;

#[test]
fn default_messages_encode_to_nothing() {
    assert!(XSpace::default().encode_to_vec().is_empty());
    assert!(XPlane::default().encode_to_vec().is_empty());
    assert!(XLine::default().encode_to_vec().is_empty());
    assert!(XEvent::default().encode_to_vec().is_empty());
    assert!(XStat::default().encode_to_vec().is_empty());
    assert!(XEventMetadata::default().encode_to_vec().is_empty());
    assert!(XStatMetadata::default().encode_to_vec().is_empty());
}

#[test]
fn repeated_field_order_survives() {
    let space = space().error("e0").error("e1").warning("w0").error("e2");
    let decoded = XSpace::decode(&*space.encode_to_vec()).unwrap();
    assert_eq!(decoded.errors, ["e0", "e1", "e2"]);
    assert_eq!(decoded.warnings, ["w0"]);
}

#[test]
fn retired_line_fields_are_skipped() {
    // a line serialized by an older producer, using fields 5 to 8
    let mut buf = vec![];
    emit_int64(1, 42, &mut buf);
    emit_int64(5, 1111, &mut buf);
    emit_string(6, "retired", &mut buf);
    emit_fixed64(7, 2222, &mut buf);
    emit_fixed32(8, 3333, &mut buf);
    emit_string(2, "thread", &mut buf);

    let line = XLine::decode(&*buf).unwrap();
    assert_eq!(line.id, 42);
    assert_eq!(line.name, "thread");
}

#[test]
fn unknown_group_fields_are_skipped() {
    let mut buf = vec![];
    emit_string(2, "before", &mut buf);
    encode_key(50, WireType::StartGroup, &mut buf);
    emit_int64(1, 5, &mut buf);
    encode_key(51, WireType::StartGroup, &mut buf);
    encode_key(51, WireType::EndGroup, &mut buf);
    encode_key(50, WireType::EndGroup, &mut buf);
    emit_string(3, "after", &mut buf);

    let space = XSpace::decode(&*buf).unwrap();
    assert_eq!(space.errors, ["before"]);
    assert_eq!(space.warnings, ["after"]);
}

#[test]
fn concatenated_encodings_merge() {
    // repeated fields append
    let a = space().error("a").plane(plane().name("p0"));
    let b = space().error("b").plane(plane().name("p1"));
    let mut buf = a.encode_to_vec();
    buf.extend(b.encode_to_vec());
    let merged = XSpace::decode(&*buf).unwrap();
    assert_eq!(merged.errors, ["a", "b"]);
    assert_eq!(merged.planes.len(), 2);

    // singular scalars are last-one-wins, absent ones keep the earlier value
    let mut buf = plane().id(1).name("keep").encode_to_vec();
    buf.extend(plane().id(2).encode_to_vec());
    let merged = XPlane::decode(&*buf).unwrap();
    assert_eq!(merged.id, 2);
    assert_eq!(merged.name, "keep");
}

#[test]
fn oneof_replaces_on_variant_change() {
    let mut buf = stat().str("text").encode_to_vec();
    buf.extend(stat().int64(-5).encode_to_vec());
    let merged = XStat::decode(&*buf).unwrap();
    assert_eq!(merged.value, Some(x_stat::Value::Int64Value(-5)));

    let mut buf = event().at(100).encode_to_vec();
    buf.extend(event().aggregated(3).encode_to_vec());
    let merged = XEvent::decode(&*buf).unwrap();
    assert_eq!(merged.data, Some(x_event::Data::NumOccurrences(3)));
}

#[test]
fn child_ids_decode_packed_and_unpacked() {
    let packed = event_metadata().child(3).child(-1).child(70000);

    // one key per element, the pre-packing layout
    let mut buf = vec![];
    for &id in &packed.child_id {
        emit_int64(6, id, &mut buf);
    }
    let unpacked = XEventMetadata::decode(&*buf).unwrap();
    assert_eq!(unpacked.child_id, packed.child_id);

    let roundtrip = XEventMetadata::decode(&*packed.encode_to_vec()).unwrap();
    assert_eq!(roundtrip, packed);
}

#[test]
fn strings_must_be_utf8() {
    let mut buf = vec![];
    emit_bytes(2, &[0xc3, 0x28], &mut buf);
    let err = XSpace::decode(&*buf).unwrap_err();
    assert!(format!("{err:?}").contains("UTF-8"), "{err:?}");
}

#[test]
fn malformed_inputs_error_out() {
    // field number 0
    assert!(XSpace::decode(&[0x00u8][..]).is_err());
    // wire types 6 and 7
    assert!(XSpace::decode(&[0x0eu8][..]).is_err());
    assert!(XSpace::decode(&[0x0fu8][..]).is_err());
    // truncated varint
    assert!(XLine::decode(&[0x08u8, 0x80][..]).is_err());
    // length prefix overrunning the buffer
    assert!(XSpace::decode(&[0x12u8, 0x7f, 0x61][..]).is_err());
    // wrong wire type for a known scalar field
    let mut buf = vec![];
    emit_string(1, "not an int", &mut buf);
    assert!(XLine::decode(&*buf).is_err());
}

#[test]
fn wire_type_mismatch_errors_name_the_field() {
    // XLine.id is a varint, feed it a length-delimited payload
    let mut buf = vec![];
    emit_string(1, "not an int", &mut buf);
    let err = format!("{:?}", XLine::decode(&*buf).unwrap_err());
    assert!(err.contains("decoding field 1"), "{err}");
    assert!(err.contains("expected a varint"), "{err}");

    // a nested failure reports the outer field and the bad inner one
    let mut inner = vec![];
    emit_fixed32(2, 7, &mut inner); // XPlane.name wants a string
    let mut buf = vec![];
    emit_bytes(1, &inner, &mut buf);
    let err = format!("{:?}", XSpace::decode(&*buf).unwrap_err());
    assert!(err.contains("decoding field 1"), "{err}");
    assert!(err.contains("decoding field 2"), "{err}");
}

#[test]
fn unknown_nesting_stops_at_the_recursion_limit() {
    let mut buf = vec![];
    for _ in 0..RECURSION_LIMIT + 1 {
        encode_key(50, WireType::StartGroup, &mut buf);
    }
    let err = XSpace::decode(&*buf).unwrap_err();
    assert!(format!("{err:?}").contains("nesting"), "{err:?}");
}

#[test]
fn save_and_reload_through_the_mmap_path() {
    setup_test_logger();
    let space = space()
        .plane(plane().name("/host:CPU").line(line().event(event().at(5).duration_ps(10))))
        .warning("short trace");
    let path = std::env::temp_dir().join(format!("xtrace-space-{}.pb", std::process::id()));
    space.save_to(&path).unwrap();
    let reloaded = space_for_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(reloaded, space);
}

#[test]
fn embedded_message_must_fill_its_length_prefix() {
    // a plane field whose payload ends mid-varint
    let bytes = [0x0au8, 0x01, 0x08];
    assert!(XSpace::decode(&bytes[..]).is_err());
}

proptest! {
    #[test]
    fn roundtrip_space(space in space_strat()) {
        let bytes = space.write_to_bytes().unwrap();
        prop_assert_eq!(XSpace::decode(&*bytes).unwrap(), space);
    }

    #[test]
    fn roundtrip_event_metadata(meta in event_metadata_strat()) {
        prop_assert_eq!(XEventMetadata::decode(&*meta.encode_to_vec()).unwrap(), meta);
    }

    #[test]
    fn reencoding_map_free_spaces_is_stable(space in map_free_space_strat()) {
        let bytes = space.encode_to_vec();
        prop_assert_eq!(bytes.len(), space.encoded_len());
        let decoded = XSpace::decode(&*bytes).unwrap();
        prop_assert_eq!(decoded.encode_to_vec(), bytes);
    }

    #[test]
    fn decoding_arbitrary_bytes_never_panics(bytes in vec(any::<u8>(), 0..128)) {
        let _ = XSpace::decode(&*bytes);
    }

    #[test]
    fn split_encodings_merge_to_the_same_space(
        a in map_free_space_strat(),
        b in map_free_space_strat(),
    ) {
        let mut buf = a.encode_to_vec();
        buf.extend(b.encode_to_vec());
        let merged = XSpace::decode(&*buf).unwrap();
        prop_assert_eq!(merged.planes.len(), a.planes.len() + b.planes.len());
        prop_assert_eq!(&merged.errors[..a.errors.len()], &a.errors[..]);
        prop_assert_eq!(&merged.errors[a.errors.len()..], &b.errors[..]);
    }
}
