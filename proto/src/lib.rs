//! # xtrace proto module
//!
//! Tiny, no-nonsense, self contained, TensorFlow profiler trace toolkit.
//!
//! ## Example
//!
//! ```
//! # extern crate xtrace_proto;
//! # fn main() {
//! use xtrace_proto::prelude::*;
//! use xtrace_proto::profiler;
//!
//! // build a trace with one line of two events on the host plane
//! let space = profiler::space().plane(
//!     profiler::plane().name("/host:CPU").line(
//!         profiler::line()
//!             .timestamp_ns(1_000)
//!             .event(profiler::event().metadata_id(1).at(0).duration_ps(500))
//!             .event(profiler::event().metadata_id(2).at(700).duration_ps(300)),
//!     ),
//! );
//!
//! // wire round trip
//! let bytes = space.write_to_bytes().unwrap();
//! let decoded = XSpace::decode(&*bytes).unwrap();
//!
//! assert_eq!(decoded, space);
//! assert_eq!(decoded.planes[0].lines[0].span_ps(), 1_000);
//! # }
//! ```

#[macro_use]
extern crate derive_new;
#[allow(unused_imports)]
#[macro_use]
extern crate log;
#[cfg(feature = "conform")]
extern crate prost;

#[cfg(feature = "conform")]
pub mod conform;

pub mod graph;
pub mod ops;
pub mod profiler;

pub use xtrace_wire::{XtraceError, XtraceResult};

pub mod prelude {
    pub use crate::graph::{GraphDef, NodeDef, graph, graphdef_for_path, node};
    pub use crate::ops::Scope;
    pub use crate::profiler::{XSpace, space, space_for_path};
    pub use xtrace_wire::prelude::*;
}
