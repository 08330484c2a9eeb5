use bit_set::BitSet;
use serde::{Serialize, Deserialize};

use crate::error::KmstError;

/** Node Id (in [0, n)) */
pub type NodeId = usize;

/** edge weights and sums of edge weights */
pub type Weight = u64;

/** undirected weighted edge */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// first endpoint
    pub node1: NodeId,
    /// second endpoint
    pub node2: NodeId,
    /// weight of the edge
    pub weight: Weight,
}

impl Edge {
    /// creates an edge
    pub fn new(node1:NodeId, node2:NodeId, weight:Weight) -> Self {
        Self { node1, node2, weight }
    }

    /// returns the endpoint opposite to v
    pub fn other(&self, v:NodeId) -> NodeId {
        if self.node1 == v { self.node2 } else { self.node1 }
    }
}

/** models a k-MST instance: find a tree with exactly k nodes of minimum weight */
#[derive(Debug, Clone)]
pub struct Instance {
    /// nb nodes
    n: usize,
    /// number of nodes of the tree to find
    k: usize,
    /// edges of the graph
    edges: Vec<Edge>,
}

impl Instance {

    /** builds an instance, checking that it is well formed:
     - 2 <= k <= n
     - every endpoint is in [0,n)
     - no self-loop
     - the total weight of the edges fits in a Weight (every sum computed by the search does)
    */
    pub fn new(n:usize, k:usize, edges:Vec<Edge>) -> Result<Self, KmstError> {
        if n == 0 {
            return Err(KmstError::InvalidInput("the graph has no node".to_string()));
        }
        if k < 2 || k > n {
            return Err(KmstError::InvalidInput(
                format!("k={} must satisfy 2 <= k <= n (n={})", k, n)
            ));
        }
        for (i,e) in edges.iter().enumerate() {
            if e.node1 >= n || e.node2 >= n {
                return Err(KmstError::InvalidInput(
                    format!("edge {} ({},{}) has an endpoint outside [0,{})", i, e.node1, e.node2, n)
                ));
            }
            if e.node1 == e.node2 {
                return Err(KmstError::InvalidInput(
                    format!("edge {} is a self-loop on node {}", i, e.node1)
                ));
            }
        }
        if edges.iter().try_fold(0, |acc:Weight, e| acc.checked_add(e.weight)).is_none() {
            return Err(KmstError::InvalidInput(
                format!("the total edge weight exceeds {}", Weight::MAX)
            ));
        }
        Ok(Self { n, k, edges })
    }

    /// number of nodes
    pub fn n(&self) -> usize { self.n }

    /// number of edges
    pub fn m(&self) -> usize { self.edges.len() }

    /// size of the tree to find (in nodes)
    pub fn k(&self) -> usize { self.k }

    /// edge list (in input order)
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// same graph, different tree size
    pub fn with_k(&self, k:usize) -> Result<Self, KmstError> {
        Self::new(self.n, k, self.edges.clone())
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{:>25}{:>10}", "nb nodes:", self.n());
        println!("\t{:>25}{:>10}", "nb edges:", self.m());
        println!("\t{:>25}{:>10}", "k:", self.k());
        if let (Some(min), Some(max)) = (
            self.edges.iter().map(|e| e.weight).min(),
            self.edges.iter().map(|e| e.weight).max(),
        ) {
            println!("\t{:>25}{:>10}", "min weight:", min);
            println!("\t{:>25}{:>10}", "max weight:", max);
        }
    }
}

/** tree with k nodes (k-1 edges) and its weight */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// total weight of the tree
    pub weight: Weight,
    /// edges of the tree
    pub edges: Vec<Edge>,
}

impl Solution {
    /** writes a string encoding the solution: the weight, then one edge per line */
    pub fn to_text(&self) -> String {
        let mut res = format!("{}\n", self.weight);
        for e in &self.edges {
            res += format!("{} {} {}\n", e.node1, e.node2, e.weight).as_str();
        }
        res
    }

    /** writes the solution into a file */
    pub fn write_to_file(&self, filename:&str) -> Result<(), KmstError> {
        std::fs::write(filename, self.to_text())
            .map_err(|source| KmstError::Io { filename: filename.to_string(), source })
    }
}

/**
checks that a solution is a tree with exactly k nodes made of instance edges.
returns the weight of the solution if it is valid, the reason otherwise.
*/
pub fn checker(inst:&Instance, sol:&Solution) -> Result<Weight, String> {
    if sol.edges.len() != inst.k() - 1 {
        return Err(format!("{} edges instead of {}", sol.edges.len(), inst.k() - 1));
    }
    for e in &sol.edges {
        if !inst.edges().contains(e) {
            return Err(format!("edge {:?} is not in the instance", e));
        }
    }
    // count distinct nodes
    let mut nodes = BitSet::with_capacity(inst.n());
    for e in &sol.edges {
        nodes.insert(e.node1);
        nodes.insert(e.node2);
    }
    if nodes.len() != inst.k() {
        return Err(format!("the edges span {} nodes instead of {}", nodes.len(), inst.k()));
    }
    // k nodes & k-1 edges: a tree iff connected. grow from any node
    let mut reached = BitSet::with_capacity(inst.n());
    reached.insert(sol.edges[0].node1);
    let mut changed = true;
    while changed {
        changed = false;
        for e in &sol.edges {
            if reached.contains(e.node1) != reached.contains(e.node2) {
                reached.insert(e.node1);
                reached.insert(e.node2);
                changed = true;
            }
        }
    }
    if reached.len() != inst.k() {
        return Err("the edges are not connected".to_string());
    }
    let weight:Weight = sol.edges.iter().map(|e| e.weight).sum();
    if weight != sol.weight {
        return Err(format!("reported weight {} but edges sum to {}", sol.weight, weight));
    }
    Ok(weight)
}
