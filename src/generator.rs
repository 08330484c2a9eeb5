use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::KmstError;
use crate::kmst::{Edge, NodeId, Weight};

/** generates a random connected graph with n nodes and m edges (no parallel edges).
    1. builds a random spanning tree (each node is attached to a random previous node
       of a shuffled order)
    2. adds random node pairs until m edges exist
weights are drawn uniformly in [1, max_weight].
*/
pub fn random_connected_graph(n:usize, m:usize, max_weight:Weight, seed:u64) -> Result<Vec<Edge>, KmstError> {
    check_sizes(n, m, max_weight)?;
    if m + 1 < n {
        return Err(KmstError::InvalidInput(
            format!("a connected graph with {} nodes needs at least {} edges (m={})", n, n-1, m)
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order:Vec<NodeId> = (0..n).collect();
    order.shuffle(&mut rng);
    let mut pairs:HashSet<(NodeId,NodeId)> = HashSet::with_capacity(m);
    let mut res = Vec::with_capacity(m);
    for i in 1..n {
        let u = order[rng.gen_range(0..i)];
        let v = order[i];
        pairs.insert((u.min(v), u.max(v)));
        res.push(Edge::new(u, v, rng.gen_range(1..=max_weight)));
    }
    add_random_edges(&mut rng, n, m, max_weight, &mut pairs, &mut res);
    Ok(res)
}

/** generates a random graph with n nodes and m edges (possibly disconnected, no parallel edges) */
pub fn random_graph(n:usize, m:usize, max_weight:Weight, seed:u64) -> Result<Vec<Edge>, KmstError> {
    check_sizes(n, m, max_weight)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = HashSet::with_capacity(m);
    let mut res = Vec::with_capacity(m);
    add_random_edges(&mut rng, n, m, max_weight, &mut pairs, &mut res);
    Ok(res)
}

fn check_sizes(n:usize, m:usize, max_weight:Weight) -> Result<(), KmstError> {
    if n < 2 {
        return Err(KmstError::InvalidInput(format!("at least 2 nodes are needed (n={})", n)));
    }
    if m > n*(n-1)/2 {
        return Err(KmstError::InvalidInput(
            format!("at most {} edges fit in a simple graph with {} nodes (m={})", n*(n-1)/2, n, m)
        ));
    }
    if max_weight == 0 {
        return Err(KmstError::InvalidInput("max_weight must be positive".to_string()));
    }
    Ok(())
}

/// adds random new node pairs until res contains m edges
fn add_random_edges(
    rng:&mut StdRng,
    n:usize,
    m:usize,
    max_weight:Weight,
    pairs:&mut HashSet<(NodeId,NodeId)>,
    res:&mut Vec<Edge>,
) {
    while res.len() < m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v || !pairs.insert((u.min(v), u.max(v))) { continue; }
        res.push(Edge::new(u, v, rng.gen_range(1..=max_weight)));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::kmst::Instance;
    use crate::search::edge_catalog::EdgeCatalog;
    use crate::search::greedy_prim::greedy_prim;

    #[test]
    fn test_connected() {
        let edges = random_connected_graph(20, 40, 100, 1).unwrap();
        assert_eq!(edges.len(), 40);
        let inst = Instance::new(20, 20, edges).unwrap();
        // a spanning tree exists from any root
        assert!(greedy_prim(&inst, &EdgeCatalog::new(&inst), 0).is_some());
        assert!(inst.edges().iter().all(|e| e.weight >= 1 && e.weight <= 100));
    }

    #[test]
    fn test_same_seed_same_graph() {
        assert_eq!(random_graph(10, 15, 9, 5).unwrap(), random_graph(10, 15, 9, 5).unwrap());
    }

    #[test]
    fn test_complete() {
        let edges = random_connected_graph(6, 15, 3, 2).unwrap();
        let pairs:HashSet<(NodeId,NodeId)> = edges.iter()
            .map(|e| (e.node1.min(e.node2), e.node1.max(e.node2)))
            .collect();
        assert_eq!(pairs.len(), 15);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(matches!(random_connected_graph(5, 3, 10, 0), Err(KmstError::InvalidInput(_))));
        assert!(matches!(random_graph(4, 7, 10, 0), Err(KmstError::InvalidInput(_))));
        assert!(matches!(random_graph(4, 2, 0, 0), Err(KmstError::InvalidInput(_))));
    }
}
