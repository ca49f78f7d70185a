//! Profiler trace container: the `XSpace` message family.
//!
//! An `XSpace` holds one `XPlane` per traced component (a device, the host,
//! runtime threads). Planes hold timelines (`XLine`, stamped in nanoseconds)
//! of events whose offsets and durations count picoseconds, with event and
//! stat names interned in per-plane metadata tables.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use xtrace_wire::internal::*;

/// A container of traces from one profiling session.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XSpace {
    pub planes: Vec<XPlane>,
    /// Errors (fatal) and warnings (not) met while collecting the trace.
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Traces from one component, a timeline container.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XPlane {
    pub id: i64,
    /// Name of this line of traces, e.g. a device name like `/device:GPU:0`.
    pub name: String,
    pub lines: Vec<XLine>,
    /// Event metadata, keyed by metadata id.
    pub event_metadata: HashMap<i64, XEventMetadata>,
    /// Stat metadata, keyed by metadata id.
    pub stat_metadata: HashMap<i64, XStatMetadata>,
    /// Stats associated with the whole plane, e.g. device capabilities.
    pub stats: Vec<XStat>,
}

/// A timeline of events, typically one per thread or stream.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XLine {
    pub id: i64,
    /// Display id, when several lines should render as one timeline.
    pub display_id: i64,
    pub name: String,
    pub display_name: String,
    /// Start time of the line, in nanoseconds since the epoch.
    pub timestamp_ns: i64,
    pub duration_ps: i64,
    pub events: Vec<XEvent>,
}

/// One activity on a timeline. Offsets count picoseconds from the line
/// timestamp.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XEvent {
    pub metadata_id: i64,
    pub data: Option<x_event::Data>,
    /// For an aggregated event, the sum of all its occurrences.
    pub duration_ps: i64,
    pub stats: Vec<XStat>,
}

pub mod x_event {
    use xtrace_wire::internal::*;

    /// Timing payload: an exact start offset for a timed event, or an
    /// occurrence count for an aggregated one.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum Data {
        OffsetPs(i64),
        NumOccurrences(i64),
    }

    impl Data {
        pub(crate) fn emit(&self, buf: &mut impl BufMut) {
            match self {
                Data::OffsetPs(v) => emit_int64(2, *v, buf),
                Data::NumOccurrences(v) => emit_int64(5, *v, buf),
            }
        }

        pub(crate) fn emitted_len(&self) -> usize {
            match self {
                Data::OffsetPs(v) => len_int64(2, *v),
                Data::NumOccurrences(v) => len_int64(5, *v),
            }
        }

        pub(crate) fn merge(
            field: u32,
            wire_type: WireType,
            value: &mut Option<Data>,
            buf: &mut impl Buf,
        ) -> XtraceResult<()> {
            *value = Some(match field {
                2 => Data::OffsetPs(read_int64(wire_type, buf)?),
                5 => Data::NumOccurrences(read_int64(wire_type, buf)?),
                _ => bail!("field {} is not part of the event data oneof", field),
            });
            Ok(())
        }
    }
}

/// A name/value measurement. The name lives in the owning plane's stat
/// metadata table.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XStat {
    pub metadata_id: i64,
    pub value: Option<x_stat::Value>,
}

pub mod x_stat {
    use xtrace_wire::internal::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Value {
        DoubleValue(f64),
        Uint64Value(u64),
        Int64Value(i64),
        StrValue(String),
        BytesValue(Vec<u8>),
        /// An indirection into the plane's stat metadata table, for values
        /// repeated across many stats.
        RefValue(u64),
    }

    impl Value {
        pub(crate) fn emit(&self, buf: &mut impl BufMut) {
            match self {
                Value::DoubleValue(v) => emit_double(2, *v, buf),
                Value::Uint64Value(v) => emit_uint64(3, *v, buf),
                Value::Int64Value(v) => emit_int64(4, *v, buf),
                Value::StrValue(v) => emit_string(5, v, buf),
                Value::BytesValue(v) => emit_bytes(6, v, buf),
                Value::RefValue(v) => emit_uint64(7, *v, buf),
            }
        }

        pub(crate) fn emitted_len(&self) -> usize {
            match self {
                Value::DoubleValue(v) => len_double(2, *v),
                Value::Uint64Value(v) => len_uint64(3, *v),
                Value::Int64Value(v) => len_int64(4, *v),
                Value::StrValue(v) => len_string(5, v),
                Value::BytesValue(v) => len_bytes(6, v),
                Value::RefValue(v) => len_uint64(7, *v),
            }
        }

        pub(crate) fn merge(
            field: u32,
            wire_type: WireType,
            value: &mut Option<Value>,
            buf: &mut impl Buf,
        ) -> XtraceResult<()> {
            *value = Some(match field {
                2 => Value::DoubleValue(read_double(wire_type, buf)?),
                3 => Value::Uint64Value(read_uint64(wire_type, buf)?),
                4 => Value::Int64Value(read_int64(wire_type, buf)?),
                5 => Value::StrValue(read_string(wire_type, buf)?),
                6 => Value::BytesValue(read_bytes(wire_type, buf)?),
                7 => Value::RefValue(read_uint64(wire_type, buf)?),
                _ => bail!("field {} is not part of the stat value oneof", field),
            });
            Ok(())
        }
    }
}

/// Metadata shared by all events with the same id.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XEventMetadata {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    /// Additional opaque payload, e.g. a serialized description of the op.
    pub metadata: Vec<u8>,
    pub stats: Vec<XStat>,
    /// Ids of events nested under this one, for grouped rendering.
    pub child_id: Vec<i64>,
}

/// Metadata shared by all stats with the same id.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct XStatMetadata {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Message for XSpace {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        for plane in &self.planes {
            emit_message(1, plane, buf);
        }
        for error in &self.errors {
            emit_string(2, error, buf);
        }
        for warning in &self.warnings {
            emit_string(3, warning, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        self.planes.iter().map(|p| len_message(1, p)).sum::<usize>()
            + self.errors.iter().map(|e| len_string(2, e)).sum::<usize>()
            + self.warnings.iter().map(|w| len_string(3, w)).sum::<usize>()
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            1 => self.planes.push(read_message(wire_type, buf, ctx)?),
            2 => self.errors.push(read_string(wire_type, buf)?),
            3 => self.warnings.push(read_string(wire_type, buf)?),
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

impl Message for XPlane {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.id != 0 {
            emit_int64(1, self.id, buf);
        }
        if !self.name.is_empty() {
            emit_string(2, &self.name, buf);
        }
        for line in &self.lines {
            emit_message(3, line, buf);
        }
        emit_map_i64_message(4, &self.event_metadata, buf);
        emit_map_i64_message(5, &self.stat_metadata, buf);
        for stat in &self.stats {
            emit_message(6, stat, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += len_int64(1, self.id);
        }
        if !self.name.is_empty() {
            len += len_string(2, &self.name);
        }
        len += self.lines.iter().map(|l| len_message(3, l)).sum::<usize>();
        len += len_map_i64_message(4, &self.event_metadata);
        len += len_map_i64_message(5, &self.stat_metadata);
        len += self.stats.iter().map(|s| len_message(6, s)).sum::<usize>();
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
            1 => self.id = read_int64(wire_type, buf)?,
            2 => self.name = read_string(wire_type, buf)?,
            3 => self.lines.push(read_message(wire_type, buf, ctx)?),
            4 => merge_map_i64_message(wire_type, &mut self.event_metadata, buf, ctx)?,
            5 => merge_map_i64_message(wire_type, &mut self.stat_metadata, buf, ctx)?,
            6 => self.stats.push(read_message(wire_type, buf, ctx)?),
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

impl Message for XLine {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.id != 0 {
            emit_int64(1, self.id, buf);
        }
        if !self.name.is_empty() {
            emit_string(2, &self.name, buf);
        }
        if self.timestamp_ns != 0 {
            emit_int64(3, self.timestamp_ns, buf);
        }
        for event in &self.events {
            emit_message(4, event, buf);
        }
        if self.duration_ps != 0 {
            emit_int64(9, self.duration_ps, buf);
        }
        if self.display_id != 0 {
            emit_int64(10, self.display_id, buf);
        }
        if !self.display_name.is_empty() {
            emit_string(11, &self.display_name, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += len_int64(1, self.id);
        }
        if !self.name.is_empty() {
            len += len_string(2, &self.name);
        }
        if self.timestamp_ns != 0 {
            len += len_int64(3, self.timestamp_ns);
        }
        len += self.events.iter().map(|e| len_message(4, e)).sum::<usize>();
        if self.duration_ps != 0 {
            len += len_int64(9, self.duration_ps);
        }
        if self.display_id != 0 {
            len += len_int64(10, self.display_id);
        }
        if !self.display_name.is_empty() {
            len += len_string(11, &self.display_name);
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
            1 => self.id = read_int64(wire_type, buf)?,
            2 => self.name = read_string(wire_type, buf)?,
            3 => self.timestamp_ns = read_int64(wire_type, buf)?,
            4 => self.events.push(read_message(wire_type, buf, ctx)?),
            9 => self.duration_ps = read_int64(wire_type, buf)?,
            10 => self.display_id = read_int64(wire_type, buf)?,
            11 => self.display_name = read_string(wire_type, buf)?,
            // 5 to 8 held retired fields and fall through with the unknowns
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

impl Message for XEvent {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.metadata_id != 0 {
            emit_int64(1, self.metadata_id, buf);
        }
        if let Some(data) = &self.data {
            data.emit(buf);
        }
        if self.duration_ps != 0 {
            emit_int64(3, self.duration_ps, buf);
        }
        for stat in &self.stats {
            emit_message(4, stat, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.metadata_id != 0 {
            len += len_int64(1, self.metadata_id);
        }
        if let Some(data) = &self.data {
            len += data.emitted_len();
        }
        if self.duration_ps != 0 {
            len += len_int64(3, self.duration_ps);
        }
        len += self.stats.iter().map(|s| len_message(4, s)).sum::<usize>();
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
            1 => self.metadata_id = read_int64(wire_type, buf)?,
            2 | 5 => x_event::Data::merge(field, wire_type, &mut self.data, buf)?,
            3 => self.duration_ps = read_int64(wire_type, buf)?,
            4 => self.stats.push(read_message(wire_type, buf, ctx)?),
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

impl Message for XStat {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.metadata_id != 0 {
            emit_int64(1, self.metadata_id, buf);
        }
        if let Some(value) = &self.value {
            value.emit(buf);
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.metadata_id != 0 {
            len += len_int64(1, self.metadata_id);
        }
        if let Some(value) = &self.value {
            len += value.emitted_len();
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
            1 => self.metadata_id = read_int64(wire_type, buf)?,
            2..=7 => x_stat::Value::merge(field, wire_type, &mut self.value, buf)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

impl Message for XEventMetadata {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.id != 0 {
            emit_int64(1, self.id, buf);
        }
        if !self.name.is_empty() {
            emit_string(2, &self.name, buf);
        }
        if !self.metadata.is_empty() {
            emit_bytes(3, &self.metadata, buf);
        }
        if !self.display_name.is_empty() {
            emit_string(4, &self.display_name, buf);
        }
        for stat in &self.stats {
            emit_message(5, stat, buf);
        }
        emit_packed_int64(6, &self.child_id, buf);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += len_int64(1, self.id);
        }
        if !self.name.is_empty() {
            len += len_string(2, &self.name);
        }
        if !self.metadata.is_empty() {
            len += len_bytes(3, &self.metadata);
        }
        if !self.display_name.is_empty() {
            len += len_string(4, &self.display_name);
        }
        len += self.stats.iter().map(|s| len_message(5, s)).sum::<usize>();
        len + len_packed_int64(6, &self.child_id)
    }

    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()> {
        match field {
            1 => self.id = read_int64(wire_type, buf)?,
            2 => self.name = read_string(wire_type, buf)?,
            3 => self.metadata = read_bytes(wire_type, buf)?,
            4 => self.display_name = read_string(wire_type, buf)?,
            5 => self.stats.push(read_message(wire_type, buf, ctx)?),
            6 => merge_repeated_int64(wire_type, &mut self.child_id, buf)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

impl Message for XStatMetadata {
    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        if self.id != 0 {
            emit_int64(1, self.id, buf);
        }
        if !self.name.is_empty() {
            emit_string(2, &self.name, buf);
        }
        if !self.description.is_empty() {
            emit_string(3, &self.description, buf);
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.id != 0 {
            len += len_int64(1, self.id);
        }
        if !self.name.is_empty() {
            len += len_string(2, &self.name);
        }
        if !self.description.is_empty() {
            len += len_string(3, &self.description);
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
            1 => self.id = read_int64(wire_type, buf)?,
            2 => self.name = read_string(wire_type, buf)?,
            3 => self.description = read_string(wire_type, buf)?,
            _ => skip_field(field, wire_type, buf, ctx)?,
        }
        Ok(())
    }
}

pub fn space() -> XSpace {
    XSpace { planes: vec![], errors: vec![], warnings: vec![] }
}

pub fn plane() -> XPlane {
    XPlane {
        id: 0,
        name: String::new(),
        lines: vec![],
        event_metadata: HashMap::new(),
        stat_metadata: HashMap::new(),
        stats: vec![],
    }
}

pub fn line() -> XLine {
    XLine {
        id: 0,
        display_id: 0,
        name: String::new(),
        display_name: String::new(),
        timestamp_ns: 0,
        duration_ps: 0,
        events: vec![],
    }
}

pub fn event() -> XEvent {
    XEvent { metadata_id: 0, data: None, duration_ps: 0, stats: vec![] }
}

pub fn stat() -> XStat {
    XStat { metadata_id: 0, value: None }
}

pub fn event_metadata() -> XEventMetadata {
    XEventMetadata {
        id: 0,
        name: String::new(),
        display_name: String::new(),
        metadata: vec![],
        stats: vec![],
        child_id: vec![],
    }
}

pub fn stat_metadata() -> XStatMetadata {
    XStatMetadata { id: 0, name: String::new(), description: String::new() }
}

impl XSpace {
    pub fn plane(mut self, p: XPlane) -> XSpace {
        self.planes.push(p);
        self
    }

    pub fn error<S: ToString>(mut self, e: S) -> XSpace {
        self.errors.push(e.to_string());
        self
    }

    pub fn warning<S: ToString>(mut self, w: S) -> XSpace {
        self.warnings.push(w.to_string());
        self
    }

    pub fn find_plane(&self, name: &str) -> Option<&XPlane> {
        self.planes.iter().find(|p| p.name == name)
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

impl XPlane {
    pub fn id(mut self, id: i64) -> XPlane {
        self.id = id;
        self
    }

    pub fn name<S: ToString>(mut self, n: S) -> XPlane {
        self.name = n.to_string();
        self
    }

    pub fn line(mut self, l: XLine) -> XPlane {
        self.lines.push(l);
        self
    }

    pub fn stat(mut self, s: XStat) -> XPlane {
        self.stats.push(s);
        self
    }

    /// Register event metadata under its own id.
    pub fn event_meta(mut self, m: XEventMetadata) -> XPlane {
        self.event_metadata.insert(m.id, m);
        self
    }

    /// Register stat metadata under its own id.
    pub fn stat_meta(mut self, m: XStatMetadata) -> XPlane {
        self.stat_metadata.insert(m.id, m);
        self
    }

    pub fn event_metadata(&self, id: i64) -> Option<&XEventMetadata> {
        self.event_metadata.get(&id)
    }

    pub fn stat_metadata(&self, id: i64) -> Option<&XStatMetadata> {
        self.stat_metadata.get(&id)
    }

    pub fn stat_name(&self, id: i64) -> Option<&str> {
        self.stat_metadata.get(&id).map(|m| &*m.name)
    }

    pub fn event_name(&self, id: i64) -> Option<&str> {
        self.event_metadata.get(&id).map(|m| &*m.name)
    }
}

impl XLine {
    pub fn id(mut self, id: i64) -> XLine {
        self.id = id;
        self
    }

    pub fn display_id(mut self, id: i64) -> XLine {
        self.display_id = id;
        self
    }

    pub fn name<S: ToString>(mut self, n: S) -> XLine {
        self.name = n.to_string();
        self
    }

    pub fn display_name<S: ToString>(mut self, n: S) -> XLine {
        self.display_name = n.to_string();
        self
    }

    pub fn timestamp_ns(mut self, t: i64) -> XLine {
        self.timestamp_ns = t;
        self
    }

    pub fn duration_ps(mut self, d: i64) -> XLine {
        self.duration_ps = d;
        self
    }

    pub fn event(mut self, e: XEvent) -> XLine {
        self.events.push(e);
        self
    }

    /// End offset of the last-finishing event, in ps from the line timestamp.
    pub fn span_ps(&self) -> i64 {
        self.events.iter().map(XEvent::end_ps).max().unwrap_or(0)
    }
}

impl XEvent {
    pub fn metadata_id(mut self, id: i64) -> XEvent {
        self.metadata_id = id;
        self
    }

    pub fn duration_ps(mut self, d: i64) -> XEvent {
        self.duration_ps = d;
        self
    }

    /// Make this a timed event starting at `offset_ps`.
    pub fn at(mut self, offset_ps: i64) -> XEvent {
        self.data = Some(x_event::Data::OffsetPs(offset_ps));
        self
    }

    /// Make this an aggregated event folding `n` occurrences.
    pub fn aggregated(mut self, n: i64) -> XEvent {
        self.data = Some(x_event::Data::NumOccurrences(n));
        self
    }

    pub fn stat(mut self, s: XStat) -> XEvent {
        self.stats.push(s);
        self
    }

    pub fn offset_ps(&self) -> i64 {
        match self.data {
            Some(x_event::Data::OffsetPs(o)) => o,
            _ => 0,
        }
    }

    /// Saturates: a decoded trace may carry offsets near the i64 edge.
    pub fn end_ps(&self) -> i64 {
        self.offset_ps().saturating_add(self.duration_ps)
    }

    pub fn occurrences(&self) -> i64 {
        match self.data {
            Some(x_event::Data::NumOccurrences(n)) => n,
            _ => 1,
        }
    }
}

impl XStat {
    pub fn metadata_id(mut self, id: i64) -> XStat {
        self.metadata_id = id;
        self
    }

    pub fn double(mut self, v: f64) -> XStat {
        self.value = Some(x_stat::Value::DoubleValue(v));
        self
    }

    pub fn uint64(mut self, v: u64) -> XStat {
        self.value = Some(x_stat::Value::Uint64Value(v));
        self
    }

    pub fn int64(mut self, v: i64) -> XStat {
        self.value = Some(x_stat::Value::Int64Value(v));
        self
    }

    pub fn str<S: ToString>(mut self, v: S) -> XStat {
        self.value = Some(x_stat::Value::StrValue(v.to_string()));
        self
    }

    pub fn bytes(mut self, v: Vec<u8>) -> XStat {
        self.value = Some(x_stat::Value::BytesValue(v));
        self
    }

    pub fn reference(mut self, id: u64) -> XStat {
        self.value = Some(x_stat::Value::RefValue(id));
        self
    }

    /// Render the value, resolving references through the plane metadata.
    pub fn value_display(&self, plane: &XPlane) -> String {
        match &self.value {
            None => String::new(),
            Some(x_stat::Value::DoubleValue(v)) => v.to_string(),
            Some(x_stat::Value::Uint64Value(v)) => v.to_string(),
            Some(x_stat::Value::Int64Value(v)) => v.to_string(),
            Some(x_stat::Value::StrValue(v)) => v.clone(),
            Some(x_stat::Value::BytesValue(v)) => format!("<{} bytes>", v.len()),
            Some(x_stat::Value::RefValue(r)) => plane
                .stat_name(*r as i64)
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("ref:{r}")),
        }
    }
}

impl XEventMetadata {
    pub fn id(mut self, id: i64) -> XEventMetadata {
        self.id = id;
        self
    }

    pub fn name<S: ToString>(mut self, n: S) -> XEventMetadata {
        self.name = n.to_string();
        self
    }

    pub fn display_name<S: ToString>(mut self, n: S) -> XEventMetadata {
        self.display_name = n.to_string();
        self
    }

    pub fn metadata(mut self, m: Vec<u8>) -> XEventMetadata {
        self.metadata = m;
        self
    }

    pub fn stat(mut self, s: XStat) -> XEventMetadata {
        self.stats.push(s);
        self
    }

    pub fn child(mut self, id: i64) -> XEventMetadata {
        self.child_id.push(id);
        self
    }
}

impl XStatMetadata {
    pub fn id(mut self, id: i64) -> XStatMetadata {
        self.id = id;
        self
    }

    pub fn name<S: ToString>(mut self, n: S) -> XStatMetadata {
        self.name = n.to_string();
        self
    }

    pub fn description<S: ToString>(mut self, d: S) -> XStatMetadata {
        self.description = d.to_string();
        self
    }
}

/// Load a profiler trace from a file, memory mapping it.
pub fn space_for_path<P: AsRef<Path>>(p: P) -> XtraceResult<XSpace> {
    let path = p.as_ref();
    let file = fs::File::open(path).with_context(|| format!("opening {path:?}"))?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    trace!("mapped {} bytes from {:?}", mmap.len(), path);
    XSpace::decode(&*mmap).with_context(|| format!("decoding trace from {path:?}"))
}

/// Load a profiler trace from a reader.
pub fn space_for_reader<R: std::io::Read>(r: &mut R) -> XtraceResult<XSpace> {
    let mut bytes = vec![];
    r.read_to_end(&mut bytes)?;
    XSpace::decode(&*bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_plane() -> XPlane {
        plane()
            .id(1)
            .name("/host:CPU")
            .stat_meta(stat_metadata().id(1).name("flops"))
            .stat_meta(stat_metadata().id(2).name("device"))
            .event_meta(event_metadata().id(7).name("MatMul").child(8).child(9))
            .line(
                line()
                    .id(12)
                    .name("thread/12")
                    .timestamp_ns(1_000)
                    .event(event().metadata_id(7).at(100).duration_ps(400))
                    .event(event().metadata_id(7).at(600).duration_ps(350))
                    .event(event().metadata_id(7).aggregated(12).duration_ps(900)),
            )
    }

    #[test]
    fn span_covers_the_last_event_end() {
        let plane = host_plane();
        assert_eq!(plane.lines[0].span_ps(), 950);
    }

    #[test]
    fn empty_line_has_no_span() {
        assert_eq!(line().span_ps(), 0);
    }

    #[test]
    fn span_saturates_on_extreme_offsets() {
        let line = line()
            .event(event().at(i64::MAX).duration_ps(1))
            .event(event().at(-1).duration_ps(i64::MIN));
        let line = XLine::decode(&*line.encode_to_vec()).unwrap();
        assert_eq!(line.events[0].end_ps(), i64::MAX);
        assert_eq!(line.events[1].end_ps(), i64::MIN);
        assert_eq!(line.span_ps(), i64::MAX);
    }

    #[test]
    fn occurrences_default_to_one() {
        let plane = host_plane();
        let events = &plane.lines[0].events;
        assert_eq!(events[0].occurrences(), 1);
        assert_eq!(events[2].occurrences(), 12);
        assert_eq!(events[2].offset_ps(), 0);
    }

    #[test]
    fn metadata_lookups() {
        let plane = host_plane();
        assert_eq!(plane.event_name(7), Some("MatMul"));
        assert_eq!(plane.stat_name(2), Some("device"));
        assert!(plane.event_metadata(8).is_none());
        assert_eq!(plane.event_metadata(7).map(|m| &*m.child_id), Some(&[8, 9][..]));
    }

    #[test]
    fn stat_display_resolves_references() {
        let plane = host_plane();
        let s = stat().metadata_id(1).reference(2);
        assert_eq!(s.value_display(&plane), "device");
        let s = s.reference(55);
        assert_eq!(s.value_display(&plane), "ref:55");
        assert_eq!(stat().int64(-3).value_display(&plane), "-3");
        assert_eq!(stat().str("gpu:0").value_display(&plane), "gpu:0");
        assert_eq!(stat().bytes(vec![1, 2, 3]).value_display(&plane), "<3 bytes>");
    }

    #[test]
    fn find_plane_by_name() {
        let space = space().plane(host_plane());
        assert!(space.find_plane("/host:CPU").is_some());
        assert!(space.find_plane("/device:GPU:0").is_none());
    }
}
