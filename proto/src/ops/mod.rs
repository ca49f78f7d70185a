//! Graph construction: scopes, op builders, typed outputs.

use std::fmt;

use xtrace_wire::internal::*;

use crate::graph::{AttrValue, DataType, GraphDef, NodeDef, TensorShapeProto, graph, node};

pub mod data;

/// A typed handle on one output of an operation, rendered `op` for output 0
/// and `op:index` past it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, new)]
pub struct Output {
    pub op: String,
    pub index: usize,
}

impl fmt::Display for Output {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.index == 0 {
            write!(fmt, "{}", self.op)
        } else {
            write!(fmt, "{}:{}", self.op, self.index)
        }
    }
}

/// A node committed to a graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    name: String,
}

impl Operation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self, index: usize) -> Output {
        Output { op: self.name.clone(), index }
    }
}

/// Owns a graph under construction and hands out op builders over it.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    graph: GraphDef,
    control_deps: Vec<String>,
}

impl Scope {
    pub fn new() -> Scope {
        Scope { graph: graph(), control_deps: vec![] }
    }

    pub fn graph(&self) -> &GraphDef {
        &self.graph
    }

    /// Hand over the finished graph.
    pub fn into_graph(self) -> GraphDef {
        self.graph
    }

    /// Every op built from now on picks up a control dependency on `op`.
    pub fn add_control_dependency(&mut self, op: &Operation) {
        self.control_deps.push(op.name.clone());
    }

    pub fn clear_control_dependencies(&mut self) {
        self.control_deps.clear();
    }

    /// Derive an unused node name from `base`.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.has_node(base) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.has_node(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn has_node(&self, name: &str) -> bool {
        self.graph.node.iter().any(|n| n.name == name)
    }

    /// Stage a new op of type `op_type`, named uniquely after it.
    pub fn op_builder(&mut self, op_type: &str) -> OpBuilder<'_> {
        let name = self.unique_name(op_type);
        OpBuilder { node: node().name(name).op(op_type), scope: self }
    }
}

/// Accumulates inputs and attributes for one node, then commits it to the
/// scope's graph.
pub struct OpBuilder<'s> {
    scope: &'s mut Scope,
    node: NodeDef,
}

impl OpBuilder<'_> {
    pub fn add_input(mut self, input: &Output) -> Self {
        self.node.input.push(input.to_string());
        self
    }

    pub fn set_attr<S: ToString, V: Into<AttrValue>>(mut self, name: S, v: V) -> Self {
        self.node.attr.insert(name.to_string(), v.into());
        self
    }

    pub fn set_device<S: ToString>(mut self, d: S) -> Self {
        self.node.device = d.to_string();
        self
    }

    /// Append the node to the graph, scope control dependencies last.
    pub fn build(mut self) -> XtraceResult<Operation> {
        for dep in &self.scope.control_deps {
            self.node.input.push(format!("^{dep}"));
        }
        let name = self.node.name.clone();
        debug!("adding node {} ({}) to the graph", name, self.node.op);
        self.scope.graph.node.push(self.node);
        Ok(Operation { name })
    }
}

/// Feedable source node.
pub fn placeholder<S: Into<Option<TensorShapeProto>>>(
    scope: &mut Scope,
    dtype: DataType,
    shape: S,
) -> XtraceResult<Operation> {
    let mut builder = scope.op_builder("Placeholder").set_attr("dtype", dtype);
    if let Some(shape) = shape.into() {
        builder = builder.set_attr("shape", shape);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_display_elides_index_zero() {
        assert_eq!(Output::new("x".to_string(), 0).to_string(), "x");
        assert_eq!(Output::new("x".to_string(), 2).to_string(), "x:2");
    }

    #[test]
    fn op_names_are_uniquified() {
        let mut scope = Scope::new();
        let a = scope.op_builder("Placeholder").build().unwrap();
        let b = scope.op_builder("Placeholder").build().unwrap();
        let c = scope.op_builder("Placeholder").build().unwrap();
        assert_eq!(a.name(), "Placeholder");
        assert_eq!(b.name(), "Placeholder_1");
        assert_eq!(c.name(), "Placeholder_2");
        assert_eq!(scope.graph().node.len(), 3);
    }

    #[test]
    fn control_dependencies_append_last() {
        let mut scope = Scope::new();
        let dep = scope.op_builder("NoOp").build().unwrap();
        scope.add_control_dependency(&dep);
        let op = scope
            .op_builder("Identity")
            .add_input(&Output::new("x".to_string(), 0))
            .build()
            .unwrap();
        let node = &scope.graph().node[1];
        assert_eq!(node.name, op.name());
        assert_eq!(node.input, ["x", "^NoOp"]);

        scope.clear_control_dependencies();
        let op = scope.op_builder("Identity").build().unwrap();
        assert_eq!(op.name(), "Identity_1");
        assert!(scope.graph().node[2].input.is_empty());
    }

    #[test]
    fn placeholder_carries_dtype_and_shape() {
        use crate::graph::shape;
        let mut scope = Scope::new();
        placeholder(&mut scope, DataType::DtFloat, shape(&[1, 3])).unwrap();
        placeholder(&mut scope, DataType::DtString, None).unwrap();
        let node = &scope.graph().node[0];
        assert_eq!(node.get_attr_data_type("dtype").unwrap(), DataType::DtFloat);
        assert_eq!(node.get_attr_shape("shape").unwrap(), shape(&[1, 3]));
        let node = &scope.graph().node[1];
        assert_eq!(node.get_attr_data_type("dtype").unwrap(), DataType::DtString);
        assert!(node.get_attr_opt_shape("shape").unwrap().is_none());
    }
}
