use itertools::Itertools;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use thiserror::Error;

/// Edge capacities and flow amounts.
pub type Capacity = usize;

/// Reasons a [`FlowNetwork`] cannot be solved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum NetworkError {
    /// [`FlowNetwork::set_source_sink`] was never called.
    #[error("source and sink have not been designated")]
    TerminalsUnset,
}

/// Per-vertex flags; the vertex identity is its [`NodeIndex`] in the owning network.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Vertex {
    pub(crate) source: bool,
    pub(crate) sink: bool,
}

impl Vertex {
    pub fn is_source(&self) -> bool {
        self.source
    }

    pub fn is_sink(&self) -> bool {
        self.sink
    }
}

/// A capacitated edge. `flow` never exceeds `capacity`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FlowEdge {
    capacity: Capacity,
    flow: Capacity,
}

impl FlowEdge {
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// Capacity still available in the direction of the edge.
    pub fn slack(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// A directed capacitated graph with a designated source and sink.
///
/// Vertices are created up front by [`Self::with_vertices`] and live as long as the network.
/// Parallel edges are allowed and stay distinct here; they are only folded together by the
/// [`ResidualNetwork`](crate::residual::ResidualNetwork).
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    graph: DiGraph<Vertex, FlowEdge>,
    terminals: Option<(NodeIndex, NodeIndex)>,
}

impl FlowNetwork {
    /// Allocate `vertex_count` vertices, indexed `0..vertex_count`, and no edges.
    pub fn with_vertices(vertex_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(vertex_count, 0);
        for _ in 0..vertex_count {
            graph.add_node(Vertex::default());
        }

        Self {
            graph,
            terminals: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Append an edge from `start` to `end` carrying no flow.
    ///
    /// Panics if either endpoint is not a vertex of this network.
    pub fn add_edge(&mut self, start: NodeIndex, end: NodeIndex, capacity: Capacity) -> EdgeIndex {
        self.graph.add_edge(start, end, FlowEdge { capacity, flow: 0 })
    }

    /// Mark exactly one vertex as source and one as sink, clearing any earlier designation.
    pub fn set_source_sink(&mut self, source: NodeIndex, sink: NodeIndex) {
        for vertex in self.graph.node_weights_mut() {
            *vertex = Vertex::default();
        }
        self.graph[source].source = true;
        self.graph[sink].sink = true;
        self.terminals = Some((source, sink));
    }

    /// The `(source, sink)` pair, if designated.
    pub fn terminals(&self) -> Result<(NodeIndex, NodeIndex), NetworkError> {
        self.terminals.ok_or(NetworkError::TerminalsUnset)
    }

    pub fn vertex(&self, index: NodeIndex) -> &Vertex {
        &self.graph[index]
    }

    pub fn edge(&self, index: EdgeIndex) -> &FlowEdge {
        &self.graph[index]
    }

    /// `(start, end)` of an edge of this network.
    pub fn endpoints(&self, index: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(index)
    }

    /// Outgoing edges of `vertex` as `(edge, end, data)`, in insertion order.
    pub fn outgoing(&self, vertex: NodeIndex) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &FlowEdge)> {
        // petgraph walks adjacency newest first
        self.graph.edges_directed(vertex, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), e.weight()))
            .sorted_by_key(|(id, _, _)| *id)
    }

    /// Every edge as `(edge, start, end, data)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &FlowEdge)> {
        self.graph.edge_references()
            .map(|e| (e.id(), e.source(), e.target(), e.weight()))
    }

    pub(crate) fn push(&mut self, index: EdgeIndex, amount: Capacity) {
        let edge = &mut self.graph[index];
        debug_assert!(amount <= edge.slack());
        edge.flow += amount;
    }

    pub(crate) fn cancel(&mut self, index: EdgeIndex, amount: Capacity) {
        let edge = &mut self.graph[index];
        debug_assert!(amount <= edge.flow);
        edge.flow -= amount;
    }

    pub fn inflow(&self, vertex: NodeIndex) -> Capacity {
        self.graph.edges_directed(vertex, Direction::Incoming)
            .map(|e| e.weight().flow)
            .sum()
    }

    pub fn outflow(&self, vertex: NodeIndex) -> Capacity {
        self.graph.edges_directed(vertex, Direction::Outgoing)
            .map(|e| e.weight().flow)
            .sum()
    }

    /// Value of the current flow, i.e. the net flow leaving the source.
    pub fn value(&self) -> Result<Capacity, NetworkError> {
        let (source, _) = self.terminals()?;
        Ok(self.outflow(source).saturating_sub(self.inflow(source)))
    }

    /// `0 <= flow <= capacity` on every edge.
    pub fn respects_capacity(&self) -> bool {
        self.graph.edge_weights().all(|e| e.flow <= e.capacity)
    }

    /// Inflow equals outflow at every vertex other than the source and sink.
    pub fn is_conserved(&self) -> bool {
        self.graph.node_indices()
            .filter(|v| {
                let vertex = &self.graph[*v];
                !vertex.source && !vertex.sink
            })
            .all(|v| self.inflow(v) == self.outflow(v))
    }
}
