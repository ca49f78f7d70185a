//! Cross-implementation checks: `prost` twins of both schema families, with
//! conversions from the hand-written types, so the test suite can compare
//! encodings byte for byte and decode each implementation's output with the
//! other.

pub mod pb;

use crate::graph;
use crate::profiler;

impl From<profiler::XSpace> for pb::XSpace {
    fn from(s: profiler::XSpace) -> pb::XSpace {
        pb::XSpace {
            planes: s.planes.into_iter().map(pb::XPlane::from).collect(),
            errors: s.errors,
            warnings: s.warnings,
        }
    }
}

impl From<profiler::XPlane> for pb::XPlane {
    fn from(p: profiler::XPlane) -> pb::XPlane {
        pb::XPlane {
            id: p.id,
            name: p.name,
            lines: p.lines.into_iter().map(pb::XLine::from).collect(),
            event_metadata: p.event_metadata.into_iter().map(|(k, v)| (k, v.into())).collect(),
            stat_metadata: p.stat_metadata.into_iter().map(|(k, v)| (k, v.into())).collect(),
            stats: p.stats.into_iter().map(pb::XStat::from).collect(),
        }
    }
}

impl From<profiler::XLine> for pb::XLine {
    fn from(l: profiler::XLine) -> pb::XLine {
        pb::XLine {
            id: l.id,
            display_id: l.display_id,
            name: l.name,
            display_name: l.display_name,
            timestamp_ns: l.timestamp_ns,
            duration_ps: l.duration_ps,
            events: l.events.into_iter().map(pb::XEvent::from).collect(),
        }
    }
}

impl From<profiler::XEvent> for pb::XEvent {
    fn from(e: profiler::XEvent) -> pb::XEvent {
        pb::XEvent {
            metadata_id: e.metadata_id,
            duration_ps: e.duration_ps,
            stats: e.stats.into_iter().map(pb::XStat::from).collect(),
            data: e.data.map(|d| match d {
                profiler::x_event::Data::OffsetPs(v) => pb::x_event::Data::OffsetPs(v),
                profiler::x_event::Data::NumOccurrences(v) => {
                    pb::x_event::Data::NumOccurrences(v)
                }
            }),
        }
    }
}

impl From<profiler::XStat> for pb::XStat {
    fn from(s: profiler::XStat) -> pb::XStat {
        use profiler::x_stat::Value;
        pb::XStat {
            metadata_id: s.metadata_id,
            value: s.value.map(|v| match v {
                Value::DoubleValue(v) => pb::x_stat::Value::DoubleValue(v),
                Value::Uint64Value(v) => pb::x_stat::Value::Uint64Value(v),
                Value::Int64Value(v) => pb::x_stat::Value::Int64Value(v),
                Value::StrValue(v) => pb::x_stat::Value::StrValue(v),
                Value::BytesValue(v) => pb::x_stat::Value::BytesValue(v),
                Value::RefValue(v) => pb::x_stat::Value::RefValue(v),
            }),
        }
    }
}

impl From<profiler::XEventMetadata> for pb::XEventMetadata {
    fn from(m: profiler::XEventMetadata) -> pb::XEventMetadata {
        pb::XEventMetadata {
            id: m.id,
            name: m.name,
            display_name: m.display_name,
            metadata: m.metadata,
            stats: m.stats.into_iter().map(pb::XStat::from).collect(),
            child_id: m.child_id,
        }
    }
}

impl From<profiler::XStatMetadata> for pb::XStatMetadata {
    fn from(m: profiler::XStatMetadata) -> pb::XStatMetadata {
        pb::XStatMetadata { id: m.id, name: m.name, description: m.description }
    }
}

impl From<graph::TensorShapeProto> for pb::TensorShapeProto {
    fn from(s: graph::TensorShapeProto) -> pb::TensorShapeProto {
        pb::TensorShapeProto {
            dim: s
                .dim
                .into_iter()
                .map(|d| pb::tensor_shape_proto::Dim { size: d.size, name: d.name })
                .collect(),
            unknown_rank: s.unknown_rank,
        }
    }
}

impl From<graph::attr_value::ListValue> for pb::attr_value::ListValue {
    fn from(l: graph::attr_value::ListValue) -> pb::attr_value::ListValue {
        pb::attr_value::ListValue {
            s: l.s,
            i: l.i,
            f: l.f,
            b: l.b,
            r#type: l.r#type,
            shape: l.shape.into_iter().map(pb::TensorShapeProto::from).collect(),
        }
    }
}

impl From<graph::AttrValue> for pb::AttrValue {
    fn from(a: graph::AttrValue) -> pb::AttrValue {
        use graph::attr_value::Value;
        pb::AttrValue {
            value: a.value.map(|v| match v {
                Value::List(v) => pb::attr_value::Value::List(v.into()),
                Value::S(v) => pb::attr_value::Value::S(v),
                Value::I(v) => pb::attr_value::Value::I(v),
                Value::F(v) => pb::attr_value::Value::F(v),
                Value::B(v) => pb::attr_value::Value::B(v),
                Value::Type(v) => pb::attr_value::Value::Type(v),
                Value::Shape(v) => pb::attr_value::Value::Shape(v.into()),
            }),
        }
    }
}

impl From<graph::NodeDef> for pb::NodeDef {
    fn from(n: graph::NodeDef) -> pb::NodeDef {
        pb::NodeDef {
            name: n.name,
            op: n.op,
            input: n.input,
            device: n.device,
            attr: n.attr.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl From<graph::VersionDef> for pb::VersionDef {
    fn from(v: graph::VersionDef) -> pb::VersionDef {
        pb::VersionDef {
            producer: v.producer,
            min_consumer: v.min_consumer,
            bad_consumers: v.bad_consumers,
        }
    }
}

impl From<graph::GraphDef> for pb::GraphDef {
    fn from(g: graph::GraphDef) -> pb::GraphDef {
        pb::GraphDef {
            node: g.node.into_iter().map(pb::NodeDef::from).collect(),
            versions: g.versions.map(pb::VersionDef::from),
        }
    }
}
