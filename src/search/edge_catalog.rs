use crate::kmst::{Edge, Instance, Weight};

/**
all the edges of an instance, sorted by non-decreasing weight.
Every working edge list used by the greedy and the branch and bound is a
copy (possibly compacted) of this order.
*/
#[derive(Debug, Clone)]
pub struct EdgeCatalog {
    /// sorted edges
    edges: Vec<Edge>,
}

impl EdgeCatalog {
    /** sorts the instance edges. The sort is stable: edges of equal weight keep
    their input order. */
    pub fn new(inst:&Instance) -> Self {
        let mut edges = inst.edges().to_vec();
        edges.sort_by_key(|e| e.weight);
        Self { edges }
    }

    /// sorted edges
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// fresh working copy of the sorted edges
    pub fn working_copy(&self) -> Vec<Edge> { self.edges.clone() }

    /**
    sum of the nb_edges cheapest edges of the graph (None if the graph has
    fewer edges). With nb_edges = k-1, no k-node tree can weigh less.
    */
    pub fn global_lower_bound(&self, nb_edges:usize) -> Option<Weight> {
        if self.edges.len() < nb_edges { return None; }
        Some(self.edges[..nb_edges].iter().map(|e| e.weight).sum())
    }
}
