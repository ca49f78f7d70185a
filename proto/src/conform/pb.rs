/// A container of traces from one profiling session.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XSpace {
    #[prost(message, repeated, tag="1")]
    pub planes: ::prost::alloc::vec::Vec<XPlane>,
    /// Errors (and warnings) from collecting the trace.
    #[prost(string, repeated, tag="2")]
    pub errors: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag="3")]
    pub warnings: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
/// Traces from one component.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XPlane {
    #[prost(int64, tag="1")]
    pub id: i64,
    /// Name of this line of traces.
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    /// Parallel timelines grouped in this plane.
    #[prost(message, repeated, tag="3")]
    pub lines: ::prost::alloc::vec::Vec<XLine>,
    /// Map from metadata id to metadata.
    #[prost(map="int64, message", tag="4")]
    pub event_metadata: ::std::collections::HashMap<i64, XEventMetadata>,
    #[prost(map="int64, message", tag="5")]
    pub stat_metadata: ::std::collections::HashMap<i64, XStatMetadata>,
    /// Stats associated with the whole plane.
    #[prost(message, repeated, tag="6")]
    pub stats: ::prost::alloc::vec::Vec<XStat>,
}
/// A timeline of events.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XLine {
    #[prost(int64, tag="1")]
    pub id: i64,
    #[prost(int64, tag="10")]
    pub display_id: i64,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag="11")]
    pub display_name: ::prost::alloc::string::String,
    /// Start time of this line, in nanoseconds.
    #[prost(int64, tag="3")]
    pub timestamp_ns: i64,
    #[prost(int64, tag="9")]
    pub duration_ps: i64,
    #[prost(message, repeated, tag="4")]
    pub events: ::prost::alloc::vec::Vec<XEvent>,
}
/// One activity on a timeline.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XEvent {
    #[prost(int64, tag="1")]
    pub metadata_id: i64,
    #[prost(int64, tag="3")]
    pub duration_ps: i64,
    #[prost(message, repeated, tag="4")]
    pub stats: ::prost::alloc::vec::Vec<XStat>,
    #[prost(oneof="x_event::Data", tags="2, 5")]
    pub data: ::core::option::Option<x_event::Data>,
}
/// Nested message and enum types in `XEvent`.
pub mod x_event {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(int64, tag="2")]
        OffsetPs(i64),
        #[prost(int64, tag="5")]
        NumOccurrences(i64),
    }
}
/// A name/value measurement.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XStat {
    #[prost(int64, tag="1")]
    pub metadata_id: i64,
    #[prost(oneof="x_stat::Value", tags="2, 3, 4, 5, 6, 7")]
    pub value: ::core::option::Option<x_stat::Value>,
}
/// Nested message and enum types in `XStat`.
pub mod x_stat {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(double, tag="2")]
        DoubleValue(f64),
        #[prost(uint64, tag="3")]
        Uint64Value(u64),
        #[prost(int64, tag="4")]
        Int64Value(i64),
        #[prost(string, tag="5")]
        StrValue(::prost::alloc::string::String),
        #[prost(bytes, tag="6")]
        BytesValue(::prost::alloc::vec::Vec<u8>),
        #[prost(uint64, tag="7")]
        RefValue(u64),
    }
}
/// Metadata shared by all events with the same id.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XEventMetadata {
    #[prost(int64, tag="1")]
    pub id: i64,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag="4")]
    pub display_name: ::prost::alloc::string::String,
    #[prost(bytes="vec", tag="3")]
    pub metadata: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, repeated, tag="5")]
    pub stats: ::prost::alloc::vec::Vec<XStat>,
    #[prost(int64, repeated, tag="6")]
    pub child_id: ::prost::alloc::vec::Vec<i64>,
}
/// Metadata shared by all stats with the same id.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct XStatMetadata {
    #[prost(int64, tag="1")]
    pub id: i64,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag="3")]
    pub description: ::prost::alloc::string::String,
}
/// Shape of a tensor.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorShapeProto {
    #[prost(message, repeated, tag="2")]
    pub dim: ::prost::alloc::vec::Vec<tensor_shape_proto::Dim>,
    #[prost(bool, tag="3")]
    pub unknown_rank: bool,
}
/// Nested message and enum types in `TensorShapeProto`.
pub mod tensor_shape_proto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Dim {
        #[prost(int64, tag="1")]
        pub size: i64,
        #[prost(string, tag="2")]
        pub name: ::prost::alloc::string::String,
    }
}
/// A single attribute value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttrValue {
    #[prost(oneof="attr_value::Value", tags="1, 2, 3, 4, 5, 6, 7")]
    pub value: ::core::option::Option<attr_value::Value>,
}
/// Nested message and enum types in `AttrValue`.
pub mod attr_value {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListValue {
        #[prost(bytes="vec", repeated, tag="2")]
        pub s: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
        #[prost(int64, repeated, tag="3")]
        pub i: ::prost::alloc::vec::Vec<i64>,
        #[prost(float, repeated, tag="4")]
        pub f: ::prost::alloc::vec::Vec<f32>,
        #[prost(bool, repeated, tag="5")]
        pub b: ::prost::alloc::vec::Vec<bool>,
        #[prost(enumeration="super::DataType", repeated, tag="6")]
        pub r#type: ::prost::alloc::vec::Vec<i32>,
        #[prost(message, repeated, tag="7")]
        pub shape: ::prost::alloc::vec::Vec<super::TensorShapeProto>,
    }
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag="1")]
        List(ListValue),
        #[prost(bytes, tag="2")]
        S(::prost::alloc::vec::Vec<u8>),
        #[prost(int64, tag="3")]
        I(i64),
        #[prost(float, tag="4")]
        F(f32),
        #[prost(bool, tag="5")]
        B(bool),
        #[prost(enumeration="super::DataType", tag="6")]
        Type(i32),
        #[prost(message, tag="7")]
        Shape(super::TensorShapeProto),
    }
}
/// One node of the graph.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeDef {
    #[prost(string, tag="1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub op: ::prost::alloc::string::String,
    #[prost(string, repeated, tag="3")]
    pub input: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag="4")]
    pub device: ::prost::alloc::string::String,
    #[prost(map="string, message", tag="5")]
    pub attr: ::std::collections::HashMap<::prost::alloc::string::String, AttrValue>,
}
/// Version marks.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VersionDef {
    #[prost(int32, tag="1")]
    pub producer: i32,
    #[prost(int32, tag="2")]
    pub min_consumer: i32,
    #[prost(int32, repeated, tag="3")]
    pub bad_consumers: ::prost::alloc::vec::Vec<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GraphDef {
    #[prost(message, repeated, tag="1")]
    pub node: ::prost::alloc::vec::Vec<NodeDef>,
    #[prost(message, optional, tag="4")]
    pub versions: ::core::option::Option<VersionDef>,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    DtInvalid = 0,
    DtFloat = 1,
    DtDouble = 2,
    DtInt32 = 3,
    DtUint8 = 4,
    DtInt16 = 5,
    DtInt8 = 6,
    DtString = 7,
    DtComplex64 = 8,
    DtInt64 = 9,
    DtBool = 10,
    DtQint8 = 11,
    DtQuint8 = 12,
    DtQint32 = 13,
    DtBfloat16 = 14,
    DtQint16 = 15,
    DtQuint16 = 16,
    DtUint16 = 17,
    DtComplex128 = 18,
    DtHalf = 19,
    DtResource = 20,
    DtVariant = 21,
    DtUint32 = 22,
    DtUint64 = 23,
}
