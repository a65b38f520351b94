use std::collections::HashMap;
use std::ops::Index;

use petgraph::graph::NodeIndex;
use strum::{EnumCount, VariantArray};

use crate::shift::{Day, Shift, DAYS};

pub type OfficerId = usize;
pub type OrganizationId = usize;

/// What a vertex of the allocation network stands for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Node {
    /// Feeds every officer their guaranteed minimum and the circulation source the remainder.
    SuperSource,
    /// Hands out shifts beyond the minimum, up to each officer's maximum.
    CirculationSource,
    Officer { officer: OfficerId },
    /// One officer on one day; admits at most one shift.
    OfficerDay { officer: OfficerId, day: Day },
    /// One shift of one organization on one day.
    PostShift { organization: OrganizationId, shift: Shift, day: Day },
    Sink,
}

/// Dense numbering of every [`Node`] for a given officer and organization count.
///
/// Layers are laid out in order: super-source, circulation source, officers, officer-days
/// (grouped by day), post-shifts (grouped by day, then organization), sink.
#[derive(Clone, Debug)]
pub struct NodeTable {
    nodes: Vec<Node>,
    indices: HashMap<Node, NodeIndex>,
}

impl NodeTable {
    pub fn new(officers: usize, organizations: usize) -> Self {
        let mut nodes = Vec::with_capacity(3 + officers + DAYS * officers + Shift::COUNT * DAYS * organizations);

        nodes.push(Node::SuperSource);
        nodes.push(Node::CirculationSource);
        nodes.extend((0..officers).map(|officer| Node::Officer { officer }));
        for day in 0..DAYS {
            nodes.extend((0..officers).map(|officer| Node::OfficerDay { officer, day }));
        }
        for day in 0..DAYS {
            for organization in 0..organizations {
                nodes.extend(Shift::VARIANTS.iter().map(|shift| Node::PostShift { organization, shift: *shift, day }));
            }
        }
        nodes.push(Node::Sink);

        let indices = nodes.iter()
            .enumerate()
            .map(|(i, node)| (*node, NodeIndex::new(i)))
            .collect();

        Self { nodes, indices }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, node: Node) -> Option<NodeIndex> {
        self.indices.get(&node).copied()
    }

    /// The node numbered `index`, if any.
    pub fn node(&self, index: NodeIndex) -> Option<Node> {
        self.nodes.get(index.index()).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeIndex::new(i), *node))
    }
}

impl Index<Node> for NodeTable {
    type Output = NodeIndex;

    /// Panics if `node` lies outside the table, e.g. an officer beyond the officer count.
    fn index(&self, node: Node) -> &Self::Output {
        &self.indices[&node]
    }
}
