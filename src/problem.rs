use log::debug;
use strum::VariantArray;

use crate::layout::{Node, NodeTable};
use crate::maxflow::max_flow;
use crate::network::{Capacity, FlowNetwork, NetworkError};
use crate::shift::{Shift, ShiftQuota, DAYS};

/// A monthly allocation problem: who may work which shift types, what each organization needs daily,
/// and how many shifts every officer must and may work over the period.
///
/// [`ShiftProblem`]s should be built using a [`ProblemBuilder`](crate::ProblemBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShiftProblem {
    preferences: Vec<ShiftQuota>,
    demand: Vec<ShiftQuota>,
    min_shifts: usize,
    // never below min_shifts
    max_shifts: usize,
}

impl ShiftProblem {
    pub(crate) fn new(preferences: Vec<ShiftQuota>, demand: Vec<ShiftQuota>, min_shifts: usize, max_shifts: usize) -> Self {
        debug_assert!(min_shifts <= max_shifts);
        Self { preferences, demand, min_shifts, max_shifts }
    }

    pub fn officers(&self) -> usize {
        self.preferences.len()
    }

    pub fn organizations(&self) -> usize {
        self.demand.len()
    }

    /// Eligibility per officer.
    pub fn preferences(&self) -> &[ShiftQuota] {
        &self.preferences
    }

    /// Daily requirement per organization.
    pub fn demand(&self) -> &[ShiftQuota] {
        &self.demand
    }

    pub fn min_shifts(&self) -> usize {
        self.min_shifts
    }

    pub fn max_shifts(&self) -> usize {
        self.max_shifts
    }

    /// Officers needed on one day, over every organization and shift type.
    pub fn daily_demand(&self) -> usize {
        self.demand.iter().map(ShiftQuota::total).sum()
    }

    /// Shifts to be filled over the whole period.
    pub fn total_demand(&self) -> usize {
        self.daily_demand() * DAYS
    }

    /// Shifts the officers are obliged to work between them.
    pub fn guaranteed_supply(&self) -> usize {
        self.officers() * self.min_shifts
    }

    /// The aggregate necessary condition: obligatory work must not exceed the work available.
    ///
    /// Passing says nothing about the per-shift picture; only the flow decides feasibility.
    pub fn passes_precheck(&self) -> bool {
        self.guaranteed_supply() <= self.total_demand()
    }

    /// Lay the problem out as a flow network, or `None` when the pre-check already rules it out.
    ///
    /// # Layers
    /// 1. The super-source gives each officer `min_shifts` and the circulation source the rest of the demand.
    /// 2. The circulation source gives each officer up to `max_shifts - min_shifts` more.
    /// 3. Each officer passes at most 1 to each of their officer-day nodes.
    /// 4. An officer-day feeds every post-shift of that day the officer's eligibility for that shift type.
    /// 5. Each post-shift drains into the sink exactly what its organization needs for that shift type.
    ///
    /// The super-source edges add up to the total demand, so a flow equal to it saturates them all and
    /// every officer works at least the minimum.
    pub fn network(&self) -> Option<ShiftNetwork> {
        if !self.passes_precheck() {
            debug!(
                "pre-check failed: {} guaranteed shifts against a demand of {}",
                self.guaranteed_supply(),
                self.total_demand(),
            );
            return None;
        }

        let table = NodeTable::new(self.officers(), self.organizations());
        let mut network = FlowNetwork::with_vertices(table.len());
        let super_source = table[Node::SuperSource];
        let circulation = table[Node::CirculationSource];
        let sink = table[Node::Sink];

        network.add_edge(super_source, circulation, self.total_demand() - self.guaranteed_supply());

        for officer in 0..self.officers() {
            let node = table[Node::Officer { officer }];
            network.add_edge(super_source, node, self.min_shifts);
            network.add_edge(circulation, node, self.max_shifts - self.min_shifts);
        }

        for officer in 0..self.officers() {
            for day in 0..DAYS {
                network.add_edge(table[Node::Officer { officer }], table[Node::OfficerDay { officer, day }], 1);
            }
        }

        for (officer, eligibility) in self.preferences.iter().enumerate() {
            for day in 0..DAYS {
                let officer_day = table[Node::OfficerDay { officer, day }];
                for organization in 0..self.organizations() {
                    for shift in Shift::VARIANTS {
                        network.add_edge(
                            officer_day,
                            table[Node::PostShift { organization, shift: *shift, day }],
                            eligibility[*shift],
                        );
                    }
                }
            }
        }

        for (organization, needed) in self.demand.iter().enumerate() {
            for day in 0..DAYS {
                for (shift, count) in needed.iter() {
                    network.add_edge(table[Node::PostShift { organization, shift, day }], sink, count);
                }
            }
        }

        network.set_source_sink(super_source, sink);
        debug!(
            "built allocation network with {} vertices and {} edges for {} officers and {} organizations",
            network.vertex_count(),
            network.edge_count(),
            self.officers(),
            self.organizations(),
        );

        Some(ShiftNetwork {
            network,
            table,
            officers: self.officers(),
            organizations: self.organizations(),
            required: self.total_demand(),
        })
    }
}

/// The flow network of a [`ShiftProblem`], together with what each vertex stands for.
#[derive(Clone, Debug)]
pub struct ShiftNetwork {
    network: FlowNetwork,
    table: NodeTable,
    officers: usize,
    organizations: usize,
    required: Capacity,
}

impl ShiftNetwork {
    pub fn flow_network(&self) -> &FlowNetwork {
        &self.network
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    pub fn officers(&self) -> usize {
        self.officers
    }

    pub fn organizations(&self) -> usize {
        self.organizations
    }

    /// The flow value that certifies a complete allocation.
    pub fn required(&self) -> Capacity {
        self.required
    }

    /// Run the max-flow engine, returning the flow value reached.
    pub fn solve(&mut self) -> Result<Capacity, NetworkError> {
        max_flow(&mut self.network)
    }

    /// Whether the current flow meets every unit of demand.
    pub fn is_certified(&self) -> bool {
        self.network.value() == Ok(self.required)
    }
}
