use std::collections::{HashMap, VecDeque};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::network::{Capacity, FlowNetwork, NetworkError};

/// Position of an arc within its [`ResidualNetwork`].
pub type ArcId = usize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Orientation {
    /// Same direction as the flow edge; residual is `capacity - flow`.
    Forward,
    /// Reverse direction; residual is `flow`, i.e. what can be cancelled.
    Backward,
}

/// One flow edge's share of a residual arc.
#[derive(Copy, Clone, Debug)]
struct Piece {
    edge: EdgeIndex,
    orientation: Orientation,
}

/// Residual capacity between an ordered vertex pair.
///
/// Every flow edge touching the pair contributes a piece, so parallel and antiparallel edges
/// share a single arc whose residual is the sum of their contributions.
#[derive(Clone, Debug)]
pub struct ResidualArc {
    start: NodeIndex,
    end: NodeIndex,
    residual: Capacity,
    reverse: ArcId,
    pieces: Vec<Piece>,
}

impl ResidualArc {
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn end(&self) -> NodeIndex {
        self.end
    }

    pub fn residual(&self) -> Capacity {
        self.residual
    }

    /// The arc between the same vertices in the opposite direction.
    pub fn reverse(&self) -> ArcId {
        self.reverse
    }
}

/// The two arcs a flow edge contributes to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResidualLink {
    pub forward: ArcId,
    pub backward: ArcId,
}

/// A shortest source-to-sink path of strictly positive residual arcs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AugmentingPath {
    arcs: Vec<ArcId>,
    bottleneck: Capacity,
}

impl AugmentingPath {
    /// Arcs from source to sink.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// Smallest residual along the path; the amount one augmentation pushes.
    pub fn bottleneck(&self) -> Capacity {
        self.bottleneck
    }
}

/// Residual view over a [`FlowNetwork`].
///
/// Holds the network mutably so that [`Self::augment`] advances the residual arcs and the
/// flow on the underlying edges together. Nothing else writes to the network while this lives.
pub struct ResidualNetwork<'a> {
    network: &'a mut FlowNetwork,
    arcs: Vec<ResidualArc>,
    // arcs leaving each vertex, in creation order
    adjacency: Vec<Vec<ArcId>>,
    // indexed by flow edge
    links: Vec<ResidualLink>,
    source: NodeIndex,
    sink: NodeIndex,
}

impl<'a> ResidualNetwork<'a> {
    /// Derive the residual network of `network` from its current flow.
    pub fn new(network: &'a mut FlowNetwork) -> Result<Self, NetworkError> {
        let (source, sink) = network.terminals()?;

        let mut arcs: Vec<ResidualArc> = Vec::with_capacity(2 * network.edge_count());
        let mut adjacency = vec![Vec::new(); network.vertex_count()];
        let mut by_pair: HashMap<(NodeIndex, NodeIndex), ArcId> = HashMap::with_capacity(2 * network.edge_count());
        let mut links = Vec::with_capacity(network.edge_count());

        let mut arc_for = |arcs: &mut Vec<ResidualArc>, start: NodeIndex, end: NodeIndex| -> ArcId {
            *by_pair.entry((start, end)).or_insert_with(|| {
                arcs.push(ResidualArc {
                    start,
                    end,
                    residual: 0,
                    // patched once every pair is known
                    reverse: ArcId::MAX,
                    pieces: Vec::new(),
                });
                adjacency[start.index()].push(arcs.len() - 1);
                arcs.len() - 1
            })
        };

        for (id, start, end, edge) in network.edges() {
            let forward = arc_for(&mut arcs, start, end);
            arcs[forward].residual += edge.slack();
            arcs[forward].pieces.push(Piece { edge: id, orientation: Orientation::Forward });

            let backward = arc_for(&mut arcs, end, start);
            arcs[backward].residual += edge.flow();
            arcs[backward].pieces.push(Piece { edge: id, orientation: Orientation::Backward });

            debug_assert_eq!(links.len(), id.index());
            links.push(ResidualLink { forward, backward });
        }

        for arc in 0..arcs.len() {
            let (start, end) = (arcs[arc].start, arcs[arc].end);
            // every edge registers both directions, so the reverse pair exists
            if let Some(reverse) = by_pair.get(&(end, start)) {
                arcs[arc].reverse = *reverse;
            }
        }

        Ok(Self {
            network,
            arcs,
            adjacency,
            links,
            source,
            sink,
        })
    }

    pub fn network(&self) -> &FlowNetwork {
        &*self.network
    }

    pub fn arc(&self, id: ArcId) -> &ResidualArc {
        &self.arcs[id]
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// The arcs a given flow edge contributes to.
    pub fn link(&self, edge: EdgeIndex) -> ResidualLink {
        self.links[edge.index()]
    }

    /// Arcs leaving `vertex`, in creation order.
    pub fn arcs_from(&self, vertex: NodeIndex) -> &[ArcId] {
        &self.adjacency[vertex.index()]
    }

    /// Breadth-first search for a shortest path from source to sink over arcs with positive residual.
    ///
    /// Ties between equally short paths go to the arc created first. Returns `None` once the sink
    /// is unreachable.
    pub fn find_augmenting_path(&self) -> Option<AugmentingPath> {
        if self.source == self.sink {
            return None;
        }

        let mut previous: Vec<Option<ArcId>> = vec![None; self.adjacency.len()];
        let mut visited = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::from([self.source]);
        visited[self.source.index()] = true;

        'search: while let Some(current) = queue.pop_front() {
            for &id in &self.adjacency[current.index()] {
                let arc = &self.arcs[id];
                if arc.residual == 0 || visited[arc.end.index()] {
                    continue;
                }

                visited[arc.end.index()] = true;
                previous[arc.end.index()] = Some(id);
                if arc.end == self.sink {
                    break 'search;
                }
                queue.push_back(arc.end);
            }
        }

        self.backtrack(&previous)
    }

    fn backtrack(&self, previous: &[Option<ArcId>]) -> Option<AugmentingPath> {
        let mut arcs = Vec::new();
        let mut bottleneck = Capacity::MAX;
        let mut at = self.sink;

        while at != self.source {
            let id = previous[at.index()]?;
            bottleneck = bottleneck.min(self.arcs[id].residual);
            arcs.push(id);
            at = self.arcs[id].start;
        }

        arcs.reverse();
        Some(AugmentingPath { arcs, bottleneck })
    }

    /// Push `path.bottleneck()` units along `path`.
    ///
    /// Each arc loses the amount and its reverse gains it. The flow edges behind the arc are
    /// updated to match: flow on antiparallel edges is cancelled first, then parallel edges fill up.
    pub fn augment(&mut self, path: &AugmentingPath) {
        let amount = path.bottleneck;

        for &id in &path.arcs {
            let reverse = self.arcs[id].reverse;
            self.arcs[id].residual -= amount;
            self.arcs[reverse].residual += amount;

            let Self { network, arcs, .. } = &mut *self;
            let pieces = &arcs[id].pieces;
            let mut remaining = amount;

            for piece in pieces.iter().filter(|p| p.orientation == Orientation::Backward) {
                let take = remaining.min(network.edge(piece.edge).flow());
                network.cancel(piece.edge, take);
                remaining -= take;
            }
            for piece in pieces.iter().filter(|p| p.orientation == Orientation::Forward) {
                let take = remaining.min(network.edge(piece.edge).slack());
                network.push(piece.edge, take);
                remaining -= take;
            }

            debug_assert_eq!(remaining, 0, "arc residual out of step with its flow edges");
        }
    }

    /// Whether every arc's residual equals what its flow edges currently allow.
    pub fn agrees_with_network(&self) -> bool {
        self.arcs.iter().all(|arc| {
            let expected: Capacity = arc.pieces.iter()
                .map(|piece| {
                    let edge = self.network.edge(piece.edge);
                    match piece.orientation {
                        Orientation::Forward => edge.slack(),
                        Orientation::Backward => edge.flow(),
                    }
                })
                .sum();
            expected == arc.residual
        })
    }
}
