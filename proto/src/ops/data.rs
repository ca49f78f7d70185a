//! Dataset ops.

use xtrace_wire::internal::*;

use crate::graph::{DataType, TensorShapeProto};
use crate::ops::{Operation, Output, Scope};

/// Registers a dataset that caches the elements of its input dataset.
///
/// The cache lives under the directory path held by the `filename` input. An
/// existing cache is replayed instead of recomputing the input; a cache that
/// cannot be opened or holds elements of the wrong shape surfaces as a
/// runtime error on the consumer side, not here.
#[derive(Clone, Debug)]
pub struct CacheDataset {
    op: Operation,
    handle: Output,
}

impl CacheDataset {
    pub const OP_NAME: &'static str = "CacheDataset";

    /// Build the node: inputs `[input_dataset, filename]`, one output type
    /// and shape per component of the element tuple.
    pub fn build(
        scope: &mut Scope,
        input_dataset: &Output,
        filename: &Output,
        output_types: Vec<DataType>,
        output_shapes: Vec<TensorShapeProto>,
    ) -> XtraceResult<CacheDataset> {
        ensure!(!output_types.is_empty(), "CacheDataset needs at least one output type");
        ensure!(
            output_types.len() == output_shapes.len(),
            "CacheDataset got {} output types for {} output shapes",
            output_types.len(),
            output_shapes.len()
        );
        let op = scope
            .op_builder(Self::OP_NAME)
            .add_input(input_dataset)
            .add_input(filename)
            .set_attr("output_types", output_types)
            .set_attr("output_shapes", output_shapes)
            .build()?;
        let handle = op.output(0);
        Ok(CacheDataset { op, handle })
    }

    /// The variant-typed handle on the cached dataset.
    pub fn handle(&self) -> &Output {
        &self.handle
    }

    pub fn op(&self) -> &Operation {
        &self.op
    }
}
