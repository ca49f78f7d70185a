#![allow(dead_code)]

use proptest::collection::{hash_map, vec};
use proptest::prelude::*;

use xtrace_proto::graph::attr_value::{ListValue, Value};
use xtrace_proto::graph::tensor_shape_proto::Dim;
use xtrace_proto::graph::{AttrValue, GraphDef, NodeDef, TensorShapeProto, VersionDef};
use xtrace_proto::profiler::{
    XEvent, XEventMetadata, XLine, XPlane, XSpace, XStat, XStatMetadata, x_event, x_stat,
};

pub fn setup_test_logger() {
    let _ = env_logger::Builder::from_env("XTRACE_LOG").try_init();
}

// Printable-ascii names keep failure dumps readable; the utf8 corner cases
// live in the wire crate tests.
pub fn name_strat() -> BoxedStrategy<String> {
    "[a-zA-Z0-9_/:. -]{0,12}".boxed()
}

pub fn stat_value_strat() -> BoxedStrategy<Option<x_stat::Value>> {
    prop_oneof![
        Just(None),
        (-1e9f64..1e9).prop_map(|v| Some(x_stat::Value::DoubleValue(v))),
        any::<u64>().prop_map(|v| Some(x_stat::Value::Uint64Value(v))),
        any::<i64>().prop_map(|v| Some(x_stat::Value::Int64Value(v))),
        "[ -~]{0,16}".prop_map(|v| Some(x_stat::Value::StrValue(v))),
        vec(any::<u8>(), 0..16).prop_map(|v| Some(x_stat::Value::BytesValue(v))),
        any::<u64>().prop_map(|v| Some(x_stat::Value::RefValue(v))),
    ]
    .boxed()
}

pub fn stat_strat() -> BoxedStrategy<XStat> {
    (any::<i64>(), stat_value_strat())
        .prop_map(|(metadata_id, value)| XStat { metadata_id, value })
        .boxed()
}

pub fn event_strat() -> BoxedStrategy<XEvent> {
    let data = prop_oneof![
        Just(None),
        any::<i64>().prop_map(|v| Some(x_event::Data::OffsetPs(v))),
        any::<i64>().prop_map(|v| Some(x_event::Data::NumOccurrences(v))),
    ];
    (any::<i64>(), data, any::<i64>(), vec(stat_strat(), 0..3))
        .prop_map(|(metadata_id, data, duration_ps, stats)| XEvent {
            metadata_id,
            data,
            duration_ps,
            stats,
        })
        .boxed()
}

pub fn line_strat() -> BoxedStrategy<XLine> {
    (
        any::<i64>(),
        any::<i64>(),
        name_strat(),
        name_strat(),
        any::<i64>(),
        any::<i64>(),
        vec(event_strat(), 0..4),
    )
        .prop_map(|(id, display_id, name, display_name, timestamp_ns, duration_ps, events)| {
            XLine { id, display_id, name, display_name, timestamp_ns, duration_ps, events }
        })
        .boxed()
}

pub fn event_metadata_strat() -> BoxedStrategy<XEventMetadata> {
    (
        any::<i64>(),
        name_strat(),
        name_strat(),
        vec(any::<u8>(), 0..8),
        vec(stat_strat(), 0..2),
        vec(any::<i64>(), 0..4),
    )
        .prop_map(|(id, name, display_name, metadata, stats, child_id)| XEventMetadata {
            id,
            name,
            display_name,
            metadata,
            stats,
            child_id,
        })
        .boxed()
}

pub fn stat_metadata_strat() -> BoxedStrategy<XStatMetadata> {
    (any::<i64>(), name_strat(), name_strat())
        .prop_map(|(id, name, description)| XStatMetadata { id, name, description })
        .boxed()
}

pub fn plane_strat() -> BoxedStrategy<XPlane> {
    (
        any::<i64>(),
        name_strat(),
        vec(line_strat(), 0..3),
        hash_map(any::<i64>(), event_metadata_strat(), 0..3),
        hash_map(any::<i64>(), stat_metadata_strat(), 0..3),
        vec(stat_strat(), 0..3),
    )
        .prop_map(|(id, name, lines, event_metadata, stat_metadata, stats)| XPlane {
            id,
            name,
            lines,
            event_metadata,
            stat_metadata,
            stats,
        })
        .boxed()
}

/// A plane without map entries, for checks needing a canonical byte form.
pub fn map_free_plane_strat() -> BoxedStrategy<XPlane> {
    (any::<i64>(), name_strat(), vec(line_strat(), 0..3), vec(stat_strat(), 0..3))
        .prop_map(|(id, name, lines, stats)| XPlane {
            id,
            name,
            lines,
            event_metadata: Default::default(),
            stat_metadata: Default::default(),
            stats,
        })
        .boxed()
}

pub fn space_strat() -> BoxedStrategy<XSpace> {
    (vec(plane_strat(), 0..3), vec(name_strat(), 0..3), vec(name_strat(), 0..3))
        .prop_map(|(planes, errors, warnings)| XSpace { planes, errors, warnings })
        .boxed()
}

pub fn map_free_space_strat() -> BoxedStrategy<XSpace> {
    (vec(map_free_plane_strat(), 0..3), vec(name_strat(), 0..3), vec(name_strat(), 0..3))
        .prop_map(|(planes, errors, warnings)| XSpace { planes, errors, warnings })
        .boxed()
}

pub fn shape_strat() -> BoxedStrategy<TensorShapeProto> {
    let dim = (any::<i64>(), name_strat()).prop_map(|(size, name)| Dim { size, name });
    (vec(dim, 0..4), any::<bool>())
        .prop_map(|(dim, unknown_rank)| TensorShapeProto { dim, unknown_rank })
        .boxed()
}

pub fn attr_value_strat() -> BoxedStrategy<AttrValue> {
    let list = (
        vec(vec(any::<u8>(), 0..6), 0..3),
        vec(any::<i64>(), 0..4),
        vec(-1e6f32..1e6, 0..4),
        vec(any::<bool>(), 0..4),
        vec(any::<i32>(), 0..4),
        vec(shape_strat(), 0..2),
    )
        .prop_map(|(s, i, f, b, r#type, shape)| ListValue { s, i, f, b, r#type, shape });
    prop_oneof![
        Just(None),
        list.prop_map(|v| Some(Value::List(v))),
        vec(any::<u8>(), 0..8).prop_map(|v| Some(Value::S(v))),
        any::<i64>().prop_map(|v| Some(Value::I(v))),
        (-1e6f32..1e6).prop_map(|v| Some(Value::F(v))),
        any::<bool>().prop_map(|v| Some(Value::B(v))),
        (0i32..24).prop_map(|v| Some(Value::Type(v))),
        shape_strat().prop_map(|v| Some(Value::Shape(v))),
    ]
    .prop_map(|value| AttrValue { value })
    .boxed()
}

pub fn node_strat() -> BoxedStrategy<NodeDef> {
    (
        name_strat(),
        name_strat(),
        vec(name_strat(), 0..3),
        name_strat(),
        hash_map("[a-z_]{0,8}", attr_value_strat(), 0..3),
    )
        .prop_map(|(name, op, input, device, attr)| NodeDef { name, op, input, device, attr })
        .boxed()
}

pub fn version_strat() -> BoxedStrategy<VersionDef> {
    (any::<i32>(), any::<i32>(), vec(any::<i32>(), 0..4))
        .prop_map(|(producer, min_consumer, bad_consumers)| VersionDef {
            producer,
            min_consumer,
            bad_consumers,
        })
        .boxed()
}

pub fn graph_strat() -> BoxedStrategy<GraphDef> {
    (vec(node_strat(), 0..3), proptest::option::of(version_strat()))
        .prop_map(|(node, versions)| GraphDef { node, versions })
        .boxed()
}

/// A graph whose nodes carry at most one attribute, for checks needing a
/// canonical byte form.
pub fn map_free_graph_strat() -> BoxedStrategy<GraphDef> {
    let node = (name_strat(), name_strat(), vec(name_strat(), 0..3), name_strat())
        .prop_map(|(name, op, input, device)| NodeDef {
            name,
            op,
            input,
            device,
            attr: Default::default(),
        });
    (vec(node, 0..3), proptest::option::of(version_strat()))
        .prop_map(|(node, versions)| GraphDef { node, versions })
        .boxed()
}
