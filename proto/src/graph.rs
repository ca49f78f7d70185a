//! Graph scaffolding messages: the subset of the framework graph schema the
//! ops layer builds, `GraphDef` down to `AttrValue`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use xtrace_wire::internal::*;

use self::attr_value::{ListValue, Value};
use self::tensor_shape_proto::Dim;

/// Element types for tensors flowing through the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
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
    /// Quantized types.
    DtQint8 = 11,
    DtQuint8 = 12,
    DtQint32 = 13,
    DtBfloat16 = 14,
    DtQint16 = 15,
    DtQuint16 = 16,
    DtUint16 = 17,
    DtComplex128 = 18,
    DtHalf = 19,
    /// Handle to a mutable resource.
    DtResource = 20,
    /// Arbitrary C++ data types, dataset handles among them.
    DtVariant = 21,
    DtUint32 = 22,
    DtUint64 = 23,
}

impl DataType {
    pub fn from_i32(value: i32) -> Option<DataType> {
        match value {
            0 => Some(DataType::DtInvalid),
            1 => Some(DataType::DtFloat),
            2 => Some(DataType::DtDouble),
            3 => Some(DataType::DtInt32),
            4 => Some(DataType::DtUint8),
            5 => Some(DataType::DtInt16),
            6 => Some(DataType::DtInt8),
            7 => Some(DataType::DtString),
            8 => Some(DataType::DtComplex64),
            9 => Some(DataType::DtInt64),
            10 => Some(DataType::DtBool),
            11 => Some(DataType::DtQint8),
            12 => Some(DataType::DtQuint8),
            13 => Some(DataType::DtQint32),
            14 => Some(DataType::DtBfloat16),
            15 => Some(DataType::DtQint16),
            16 => Some(DataType::DtQuint16),
            17 => Some(DataType::DtUint16),
            18 => Some(DataType::DtComplex128),
            19 => Some(DataType::DtHalf),
            20 => Some(DataType::DtResource),
            21 => Some(DataType::DtVariant),
            22 => Some(DataType::DtUint32),
            23 => Some(DataType::DtUint64),
            _ => None,
        }
    }
}

impl Default for DataType {
    fn default() -> DataType {
        DataType::DtInvalid
    }
}

impl From<DataType> for i32 {
    fn from(t: DataType) -> i32 {
        t as i32
    }
}

/// Shape of a tensor; an empty `dim` with `unknown_rank` unset is a scalar.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TensorShapeProto {
    pub dim: Vec<Dim>,
    pub unknown_rank: bool,
}

pub mod tensor_shape_proto {
    use xtrace_wire::internal::*;

    /// One dimension: -1 means unknown size.
    #[derive(Clone, Debug, PartialEq, Default)]
    pub struct Dim {
        pub size: i64,
        pub name: String,
    }

    impl Message for Dim {
        fn encode_raw<B: BufMut>(&self, buf: &mut B) {
            if self.size != 0 {
                emit_int64(1, self.size, buf);
            }
            if !self.name.is_empty() {
                emit_string(2, &self.name, buf);
            }
        }

        fn encoded_len(&self) -> usize {
            let mut len = 0;
            if self.size != 0 {
                len += len_int64(1, self.size);
            }
            if !self.name.is_empty() {
                len += len_string(2, &self.name);
            }
            len
        }

        fn merge_field<B: Buf>(
            &mut self,
            field: u32,
            wire_type: WireType,
            buf: &mut B,
            ctx: DecodeContext,
        ) -> XtraceResult<()> {
            match field {
                1 => self.size = read_int64(wire_type, buf)?,
                2 => self.name = read_string(wire_type, buf)?,
                _ => skip_field(field, wire_type, buf, ctx)?,
            }
            Ok(())
        }
    }
}

impl Message for TensorShapeProto {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        for dim in &self.dim {
            emit_message(2, dim, buf);
        }
        if self.unknown_rank {
            emit_bool(3, self.unknown_rank, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        self.dim.iter().map(|d| len_message(2, d)).sum::<usize>()
            + if self.unknown_rank { len_bool(3, self.unknown_rank) } else { 0 }
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            2 => self.dim.push(read_message(wire_type, buf, ctx)?),
            3 => self.unknown_rank = read_bool(wire_type, buf)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

/// A single attribute value, a union over the forms an op attribute takes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AttrValue {
    pub value: Option<Value>,
}

pub mod attr_value {
    use xtrace_wire::internal::*;

    use super::TensorShapeProto;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Value {
        List(ListValue),
        S(Vec<u8>),
        I(i64),
        F(f32),
        B(bool),
        /// A `DataType`, carried open so unknown producers still decode.
        Type(i32),
        Shape(TensorShapeProto),
    }

    impl Value {
        pub(crate) fn emit(&self, buf: &mut impl BufMut) {
            match self {
                Value::List(v) => emit_message(1, v, buf),
                Value::S(v) => emit_bytes(2, v, buf),
                Value::I(v) => emit_int64(3, *v, buf),
                Value::F(v) => emit_float(4, *v, buf),
                Value::B(v) => emit_bool(5, *v, buf),
                Value::Type(v) => emit_enum(6, *v, buf),
                Value::Shape(v) => emit_message(7, v, buf),
            }
        }

        pub(crate) fn emitted_len(&self) -> usize {
            match self {
                Value::List(v) => len_message(1, v),
                Value::S(v) => len_bytes(2, v),
                Value::I(v) => len_int64(3, *v),
                Value::F(v) => len_float(4, *v),
                Value::B(v) => len_bool(5, *v),
                Value::Type(v) => len_enum(6, *v),
                Value::Shape(v) => len_message(7, v),
            }
        }

        pub(crate) fn merge(
            field: u32,
            wire_type: WireType,
            value: &mut Option<Value>,
            buf: &mut impl Buf,
            ctx: DecodeContext,
        ) -> XtraceResult<()> {
            match field {
                // message variants merge in place when already selected
                1 => {
                    if let Some(Value::List(list)) = value {
                        merge_message(wire_type, list, buf, ctx)?;
                    } else {
                        *value = Some(Value::List(read_message(wire_type, buf, ctx)?));
                    }
                }
                2 => *value = Some(Value::S(read_bytes(wire_type, buf)?)),
                3 => *value = Some(Value::I(read_int64(wire_type, buf)?)),
                4 => *value = Some(Value::F(read_float(wire_type, buf)?)),
                5 => *value = Some(Value::B(read_bool(wire_type, buf)?)),
                6 => *value = Some(Value::Type(read_enum(wire_type, buf)?)),
                7 => {
                    if let Some(Value::Shape(shape)) = value {
                        merge_message(wire_type, shape, buf, ctx)?;
                    } else {
                        *value = Some(Value::Shape(read_message(wire_type, buf, ctx)?));
                    }
                }
                _ => bail!("field {} is not part of the attr value oneof", field),
            }
            Ok(())
        }
    }

    /// The repeated counterparts of the singular attr forms.
    #[derive(Clone, Debug, PartialEq, Default)]
    pub struct ListValue {
        pub s: Vec<Vec<u8>>,
        pub i: Vec<i64>,
        pub f: Vec<f32>,
        pub b: Vec<bool>,
        pub r#type: Vec<i32>,
        pub shape: Vec<TensorShapeProto>,
    }

    impl Message for ListValue {
        fn encode_raw<B: BufMut>(&self, buf: &mut B) {
            for s in &self.s {
                emit_bytes(2, s, buf);
            }
            emit_packed_int64(3, &self.i, buf);
            emit_packed_float(4, &self.f, buf);
            emit_packed_bool(5, &self.b, buf);
            emit_packed_int32(6, &self.r#type, buf);
            for shape in &self.shape {
                emit_message(7, shape, buf);
            }
        }

        fn encoded_len(&self) -> usize {
            self.s.iter().map(|s| len_bytes(2, s)).sum::<usize>()
                + len_packed_int64(3, &self.i)
                + len_packed_float(4, &self.f)
                + len_packed_bool(5, &self.b)
                + len_packed_int32(6, &self.r#type)
                + self.shape.iter().map(|s| len_message(7, s)).sum::<usize>()
        }

        fn merge_field<B: Buf>(
            &mut self,
            field: u32,
            wire_type: WireType,
            buf: &mut B,
            ctx: DecodeContext,
        ) -> XtraceResult<()> {
            match field {
                2 => self.s.push(read_bytes(wire_type, buf)?),
                3 => merge_repeated_int64(wire_type, &mut self.i, buf)?,
                4 => merge_repeated_float(wire_type, &mut self.f, buf)?,
                5 => merge_repeated_bool(wire_type, &mut self.b, buf)?,
                6 => merge_repeated_int32(wire_type, &mut self.r#type, buf)?,
                7 => self.shape.push(read_message(wire_type, buf, ctx)?),
                _ => skip_field(field, wire_type, buf, ctx)?,
            }
            Ok(())
        }
    }
}

impl Message for AttrValue {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if let Some(value) = &self.value {
            value.emit(buf);
        }
    }

    fn encoded_len(&self) -> usize {
        self.value.as_ref().map_or(0, Value::emitted_len)
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            1..=7 => Value::merge(field, wire_type, &mut self.value, buf, ctx)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

/// One node of the graph: an op instantiation wired to its inputs.
///
/// Inputs use the `node:src_output` convention, `:0` left implicit, and a
/// `^node` prefix marking a control dependency.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NodeDef {
    pub name: String,
    pub op: String,
    pub input: Vec<String>,
    pub device: String,
    pub attr: HashMap<String, AttrValue>,
}

impl Message for NodeDef {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if !self.name.is_empty() {
            emit_string(1, &self.name, buf);
        }
        if !self.op.is_empty() {
            emit_string(2, &self.op, buf);
        }
        for input in &self.input {
            emit_string(3, input, buf);
        }
        if !self.device.is_empty() {
            emit_string(4, &self.device, buf);
        }
        emit_map_string_message(5, &self.attr, buf);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.name.is_empty() {
            len += len_string(1, &self.name);
        }
        if !self.op.is_empty() {
            len += len_string(2, &self.op);
        }
        len += self.input.iter().map(|i| len_string(3, i)).sum::<usize>();
        if !self.device.is_empty() {
            len += len_string(4, &self.device);
        }
        len + len_map_string_message(5, &self.attr)
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            1 => self.name = read_string(wire_type, buf)?,
            2 => self.op = read_string(wire_type, buf)?,
            3 => self.input.push(read_string(wire_type, buf)?),
            4 => self.device = read_string(wire_type, buf)?,
            5 => merge_map_string_message(wire_type, &mut self.attr, buf, ctx)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

/// Producer/consumer version marks carried by a graph.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct VersionDef {
    pub producer: i32,
    pub min_consumer: i32,
    pub bad_consumers: Vec<i32>,
}

impl Message for VersionDef {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.producer != 0 {
            emit_int32(1, self.producer, buf);
        }
        if self.min_consumer != 0 {
            emit_int32(2, self.min_consumer, buf);
        }
        emit_packed_int32(3, &self.bad_consumers, buf);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.producer != 0 {
            len += len_int32(1, self.producer);
        }
        if self.min_consumer != 0 {
            len += len_int32(2, self.min_consumer);
        }
        len + len_packed_int32(3, &self.bad_consumers)
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            1 => self.producer = read_int32(wire_type, buf)?,
            2 => self.min_consumer = read_int32(wire_type, buf)?,
            3 => merge_repeated_int32(wire_type, &mut self.bad_consumers, buf)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GraphDef {
    pub node: Vec<NodeDef>,
    pub versions: Option<VersionDef>,
}

impl Message for GraphDef {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        for node in &self.node {
            emit_message(1, node, buf);
        }
        if let Some(versions) = &self.versions {
            emit_message(4, versions, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        self.node.iter().map(|n| len_message(1, n)).sum::<usize>()
            + self.versions.as_ref().map_or(0, |v| len_message(4, v))
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            1 => self.node.push(read_message(wire_type, buf, ctx)?),
            4 => merge_message(
                wire_type,
                self.versions.get_or_insert_with(VersionDef::default),
                buf,
                ctx,
            )?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

pub fn graph() -> GraphDef {
    GraphDef { node: vec![], versions: None }
}

pub fn node() -> NodeDef {
    NodeDef {
        name: String::new(),
        op: String::new(),
        input: vec![],
        device: String::new(),
        attr: HashMap::new(),
    }
}

pub fn shape(dims: &[i64]) -> TensorShapeProto {
    TensorShapeProto {
        dim: dims.iter().map(|&d| Dim { size: d, name: String::new() }).collect(),
        unknown_rank: false,
    }
}

impl GraphDef {
    pub fn node(mut self, n: NodeDef) -> Self {
        self.node.push(n);
        self
    }

    pub fn write_to_bytes(&self) -> XtraceResult<Vec<u8>> {
        Ok(self.encode_to_vec())
    }

    pub fn save_to<P: AsRef<Path>>(&self, p: P) -> XtraceResult<()> {
        let buf = self.write_to_bytes()?;
        fs::write(p, &buf)?;
        Ok(())
    }
}

/// Load a graph from a file, memory mapping it.
pub fn graphdef_for_path<P: AsRef<Path>>(p: P) -> XtraceResult<GraphDef> {
    let path = p.as_ref();
    let file = fs::File::open(path).with_context(|| format!("opening {path:?}"))?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    trace!("mapped {} bytes from {:?}", mmap.len(), path);
    GraphDef::decode(&*mmap).with_context(|| format!("decoding graph from {path:?}"))
}

/// Load a graph from a reader.
pub fn graphdef_for_reader<R: std::io::Read>(r: &mut R) -> XtraceResult<GraphDef> {
    let mut bytes = vec![];
    r.read_to_end(&mut bytes)?;
    GraphDef::decode(&*bytes)
}

impl NodeDef {
    pub fn name<S: ToString>(mut self, n: S) -> NodeDef {
        self.name = n.to_string();
        self
    }

    pub fn op<S: ToString>(mut self, n: S) -> NodeDef {
        self.op = n.to_string();
        self
    }

    pub fn input<S: ToString>(mut self, n: S) -> NodeDef {
        self.input.push(n.to_string());
        self
    }

    pub fn device<S: ToString>(mut self, d: S) -> NodeDef {
        self.device = d.to_string();
        self
    }

    pub fn attr<S: ToString, V: Into<AttrValue>>(mut self, n: S, v: V) -> NodeDef {
        self.attr.insert(n.to_string(), v.into());
        self
    }
}

impl NodeDef {
    pub fn get_attr_raw_str(&self, name: &str) -> XtraceResult<&[u8]> {
        self.get_attr_opt_raw_str(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected string attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_raw_str(&self, name: &str) -> XtraceResult<Option<&[u8]>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::S(bytes)) = &a.value {
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }

    pub fn get_attr_str(&self, name: &str) -> XtraceResult<String> {
        self.get_attr_opt_str(name)?.ok_or_else(|| {
            format_err!(
                "Node {} ({}) expected UTF-8 string attribute '{}'",
                self.name,
                self.op,
                name
            )
        })
    }

    pub fn get_attr_opt_str(&self, name: &str) -> XtraceResult<Option<String>> {
        if let Some(s) = self.get_attr_opt_raw_str(name)? {
            Ok(Some(String::from_utf8(s.to_vec()).map_err(|_| {
                format_err!(
                    "Node {} ({}) expected an UTF-8 string for attribute '{}'",
                    self.name,
                    self.op,
                    name
                )
            })?))
        } else {
            Ok(None)
        }
    }

    pub fn get_attr_bool(&self, name: &str) -> XtraceResult<bool> {
        self.get_attr_opt_bool(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected bool attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_bool(&self, name: &str) -> XtraceResult<Option<bool>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::B(v)) = &a.value {
                return Ok(Some(*v));
            }
        }
        Ok(None)
    }

    pub fn get_attr_data_type(&self, name: &str) -> XtraceResult<DataType> {
        self.get_attr_opt_data_type(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected type attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_data_type(&self, name: &str) -> XtraceResult<Option<DataType>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::Type(v)) = &a.value {
                return Ok(Some(DataType::from_i32(*v).ok_or_else(|| {
                    format_err!(
                        "Node {} ({}) attribute '{}' holds unknown data type {}",
                        self.name,
                        self.op,
                        name,
                        v
                    )
                })?));
            }
        }
        Ok(None)
    }

    pub fn get_attr_shape(&self, name: &str) -> XtraceResult<TensorShapeProto> {
        self.get_attr_opt_shape(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected shape attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_shape(&self, name: &str) -> XtraceResult<Option<TensorShapeProto>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::Shape(shape)) = &a.value {
                return Ok(Some(shape.clone()));
            }
        }
        Ok(None)
    }

    pub fn get_attr_int<T: num_traits::FromPrimitive>(&self, name: &str) -> XtraceResult<T> {
        self.get_attr_opt_int(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected int attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_int<T: num_traits::FromPrimitive>(
        &self,
        name: &str,
    ) -> XtraceResult<Option<T>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::I(i)) = &a.value {
                return Ok(Some(T::from_i64(*i).ok_or_else(|| {
                    format_err!(
                        "Node {} ({}) attribute '{}' does not fit the expected int: {}",
                        self.name,
                        self.op,
                        name,
                        i
                    )
                })?));
            }
        }
        Ok(None)
    }

    pub fn get_attr_float<T: num_traits::FromPrimitive>(&self, name: &str) -> XtraceResult<T> {
        self.get_attr_opt_float(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected float attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_float<T: num_traits::FromPrimitive>(
        &self,
        name: &str,
    ) -> XtraceResult<Option<T>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::F(f)) = &a.value {
                return Ok(Some(T::from_f32(*f).ok_or_else(|| {
                    format_err!(
                        "Node {} ({}) attribute '{}' does not fit the expected float: {}",
                        self.name,
                        self.op,
                        name,
                        f
                    )
                })?));
            }
        }
        Ok(None)
    }

    pub fn get_attr_list_int<T: num_traits::FromPrimitive>(
        &self,
        name: &str,
    ) -> XtraceResult<Vec<T>> {
        self.get_attr_opt_list_int(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected list<int> attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_list_int<T: num_traits::FromPrimitive>(
        &self,
        name: &str,
    ) -> XtraceResult<Option<Vec<T>>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::List(list)) = &a.value {
                return list
                    .i
                    .iter()
                    .map(|&i| {
                        T::from_i64(i).ok_or_else(|| {
                            format_err!(
                                "Node {} ({}) attribute '{}' does not fit the expected int: {}",
                                self.name,
                                self.op,
                                name,
                                i
                            )
                        })
                    })
                    .collect::<XtraceResult<Vec<T>>>()
                    .map(Some);
            }
        }
        Ok(None)
    }

    pub fn get_attr_list_data_type(&self, name: &str) -> XtraceResult<Vec<DataType>> {
        self.get_attr_opt_list_data_type(name)?.ok_or_else(|| {
            format_err!("Node {} ({}) expected list<type> attribute '{}'", self.name, self.op, name)
        })
    }

    pub fn get_attr_opt_list_data_type(&self, name: &str) -> XtraceResult<Option<Vec<DataType>>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::List(list)) = &a.value {
                return list
                    .r#type
                    .iter()
                    .map(|&t| {
                        DataType::from_i32(t).ok_or_else(|| {
                            format_err!(
                                "Node {} ({}) attribute '{}' holds unknown data type {}",
                                self.name,
                                self.op,
                                name,
                                t
                            )
                        })
                    })
                    .collect::<XtraceResult<Vec<DataType>>>()
                    .map(Some);
            }
        }
        Ok(None)
    }

    pub fn get_attr_list_shape(&self, name: &str) -> XtraceResult<Vec<TensorShapeProto>> {
        self.get_attr_opt_list_shape(name)?.ok_or_else(|| {
            format_err!(
                "Node {} ({}) expected list<shape> attribute '{}'",
                self.name,
                self.op,
                name
            )
        })
    }

    pub fn get_attr_opt_list_shape(&self, name: &str) -> XtraceResult<Option<Vec<TensorShapeProto>>> {
        if let Some(a) = self.attr.get(name) {
            if let Some(Value::List(list)) = &a.value {
                return Ok(Some(list.shape.clone()));
            }
        }
        Ok(None)
    }
}

impl From<DataType> for AttrValue {
    fn from(t: DataType) -> AttrValue {
        AttrValue { value: Some(Value::Type(t.into())) }
    }
}

impl<'a> From<&'a str> for AttrValue {
    fn from(t: &'a str) -> AttrValue {
        AttrValue { value: Some(Value::S(t.as_bytes().to_vec())) }
    }
}

impl From<bool> for AttrValue {
    fn from(t: bool) -> AttrValue {
        AttrValue { value: Some(Value::B(t)) }
    }
}

impl From<i32> for AttrValue {
    fn from(t: i32) -> AttrValue {
        AttrValue::from(t as i64)
    }
}

impl From<i64> for AttrValue {
    fn from(t: i64) -> AttrValue {
        AttrValue { value: Some(Value::I(t)) }
    }
}

impl From<f32> for AttrValue {
    fn from(t: f32) -> AttrValue {
        AttrValue { value: Some(Value::F(t)) }
    }
}

impl From<TensorShapeProto> for AttrValue {
    fn from(t: TensorShapeProto) -> AttrValue {
        AttrValue { value: Some(Value::Shape(t)) }
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(t: Vec<i64>) -> AttrValue {
        AttrValue {
            value: Some(Value::List(ListValue {
                s: vec![],
                i: t,
                f: vec![],
                b: vec![],
                r#type: vec![],
                shape: vec![],
            })),
        }
    }
}

impl From<Vec<DataType>> for AttrValue {
    fn from(t: Vec<DataType>) -> AttrValue {
        AttrValue {
            value: Some(Value::List(ListValue {
                s: vec![],
                i: vec![],
                f: vec![],
                b: vec![],
                r#type: t.into_iter().map(i32::from).collect(),
                shape: vec![],
            })),
        }
    }
}

impl From<Vec<TensorShapeProto>> for AttrValue {
    fn from(t: Vec<TensorShapeProto>) -> AttrValue {
        AttrValue {
            value: Some(Value::List(ListValue {
                s: vec![],
                i: vec![],
                f: vec![],
                b: vec![],
                r#type: vec![],
                shape: t,
            })),
        }
    }
}
