use bit_set::BitSet;
use tracing::{debug, trace};

use crate::error::KmstError;
use crate::kmst::{Instance, NodeId, Solution, Weight};
use crate::search::edge_catalog::EdgeCatalog;
use crate::search::root_ranking::RootRanking;
use crate::search::solution_sink::SolutionSink;

/** implements a greedy Prim-like algorithm that grows a tree of k-1 edges from a root.
    1. mark the root
    2. scan the relevant edges by non-decreasing weight
    3. the first edge with exactly one marked endpoint is added to the tree (its other
       endpoint is marked). It is removed from the relevant edges and the scan restarts
    4. if the first edge touching a marked node has both endpoints marked, it would
       close a cycle. It is removed from the relevant edges and the scan restarts
    5. edges without a marked endpoint are skipped (they may be used later)
    6. repeat until k-1 edges are added

Since the relevant edges stay sorted, each added edge is a minimum edge leaving the
current tree (cut property).

parameters:
 - inst: instance (gives n and k)
 - catalog: sorted edges of the instance
 - root: starting node

returns None if the connected component of the root has less than k nodes.
*/
pub fn greedy_prim(inst:&Instance, catalog:&EdgeCatalog, root:NodeId) -> Option<Solution> {
    let nb_edges = inst.k() - 1;
    let mut marked = BitSet::with_capacity(inst.n());
    marked.insert(root);
    let mut relevant_edges = catalog.working_copy();
    let mut tree = Vec::with_capacity(nb_edges);
    let mut weight:Weight = 0;
    while tree.len() < nb_edges {
        // first edge touching the tree. None: the component of the root is exhausted
        let i = relevant_edges.iter()
            .position(|e| marked.contains(e.node1) || marked.contains(e.node2))?;
        let e = relevant_edges.remove(i);
        if marked.contains(e.node1) && marked.contains(e.node2) {
            continue; // would close a cycle
        }
        let new_node = e.other(if marked.contains(e.node1) { e.node1 } else { e.node2 });
        marked.insert(new_node);
        weight += e.weight;
        tree.push(e);
    }
    trace!(root, weight, "greedy tree");
    Some(Solution { weight, edges: tree })
}

/**
builds the greedy tree of every root. Each tree is registered in the sink and its
root is ranked by the tree weight.

returns NoFeasibleSolution if no root leads to a tree (no component has k nodes).
*/
pub fn greedy_all_roots<Sink:SolutionSink>(
    inst:&Instance,
    catalog:&EdgeCatalog,
    sink:&mut Sink,
) -> Result<RootRanking, KmstError> {
    let mut ranking = RootRanking::new();
    for root in 0..inst.n() {
        match greedy_prim(inst, catalog, root) {
            None => debug!(root, "component of the root is too small"),
            Some(sol) => {
                sink.set_solution(sol.weight, &sol.edges);
                ranking.register(sol.weight, root);
            }
        }
    }
    if ranking.is_empty() {
        return Err(KmstError::NoFeasibleSolution { k: inst.k() });
    }
    Ok(ranking)
}
