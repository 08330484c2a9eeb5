use std::cmp::max;
use std::time::Instant;

use bit_set::BitSet;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::KmstError;
use crate::kmst::{Edge, Instance, NodeId, Weight};
use crate::search::edge_catalog::EdgeCatalog;
use crate::search::greedy_prim::greedy_all_roots;
use crate::search::solution_sink::SolutionSink;
use crate::search::stopping::StoppingCriterion;


/**
Implements a depth-first branch and bound that enumerates the trees of k-1 edges
containing a given root.

At each level, the working edges are scanned by non-decreasing weight:
 - an edge leaving the partial tree is added (branch), then excluded for the siblings
 - an edge closing a cycle is dropped
 - an edge not touching the partial tree is kept for deeper levels

Pruning relies on the upper bound exposed by the solution sink.
*/
#[derive(Debug)]
pub struct BranchAndBound<'a, Sink:SolutionSink> {
    /// receives the complete trees, provides the upper bound
    sink: &'a mut Sink,
    /// nodes of the partial tree
    marked: BitSet,
    /// partial tree (result[d]: edge chosen at depth d)
    result: Vec<Edge>,
    /// number of edges of a complete tree (k-1)
    nb_edges: usize,
    /// number of search nodes (recursive calls)
    nb_nodes: usize,
    /// number of times a complete tree improved the upper bound
    nb_improvements: usize,
}

impl<'a, Sink:SolutionSink> BranchAndBound<'a, Sink> {
    /** creates a branch and bound for the instance */
    pub fn new(inst:&Instance, sink:&'a mut Sink) -> Self {
        let nb_edges = inst.k() - 1;
        Self {
            sink,
            marked: BitSet::with_capacity(inst.n()),
            result: Vec::with_capacity(nb_edges),
            nb_edges,
            nb_nodes: 0,
            nb_improvements: 0,
        }
    }

    /// number of search nodes explored so far
    pub fn nb_nodes(&self) -> usize { self.nb_nodes }

    /// number of improving trees found so far
    pub fn nb_improvements(&self) -> usize { self.nb_improvements }

    /**
    explores every tree of k-1 edges containing root that may improve the sink.
    lower_bound: lower bound on the weight of any tree (global lower bound)
    */
    pub fn explore_root(&mut self, catalog:&EdgeCatalog, root:NodeId, lower_bound:Weight) {
        self.marked.clear();
        self.marked.insert(root);
        self.result.clear();
        self.explore(catalog.working_copy(), self.nb_edges, 0, lower_bound);
    }

    /**
    one level of the search.
     - edges: working edges (sorted), already without the edges used or dropped by ancestors
     - left: number of edges still needed
     - weight: weight of the partial tree
     - bound: lower bound on the weight of any completion of the partial tree

    the bound is refreshed at every scan position (slot edge + left-1 cheapest other
    edges), so the same formula covers branched, dropped and inert edges.
    */
    fn explore(&mut self, mut edges:Vec<Edge>, left:usize, weight:Weight, mut bound:Weight) {
        self.nb_nodes += 1;
        if left == 0 {
            let upper_bound = self.sink.upper_bound();
            self.sink.set_solution(weight, &self.result);
            if self.sink.upper_bound() < upper_bound {
                self.nb_improvements += 1;
            }
            return;
        }
        let mut i = 0;
        while i < edges.len() {
            // the remaining edges cannot complete the tree
            if edges.len() < left { return; }
            let upper_bound = self.sink.upper_bound();
            let e = edges[i];
            // any completion from here uses an edge at least as heavy as e
            if weight.saturating_add(e.weight) > upper_bound { return; }
            // e stands for the edge filling the current slot
            bound = max(bound, weight.saturating_add(e.weight).saturating_add(cheapest_others(&edges, i, left-1)));
            if bound >= upper_bound { return; }
            let in1 = self.marked.contains(e.node1);
            let in2 = self.marked.contains(e.node2);
            if in1 != in2 { // leaves the partial tree: branch
                let new_node = e.other(if in1 { e.node1 } else { e.node2 });
                edges.remove(i);
                self.marked.insert(new_node);
                self.result.push(e);
                self.explore(edges.clone(), left-1, weight + e.weight, bound);
                self.result.pop();
                self.marked.remove(new_node);
                trace!(left, weight, bound, "backtrack");
            } else if in1 { // closes a cycle
                edges.remove(i);
            } else { // not yet reachable
                i += 1;
            }
        }
    }
}

/// sum of the `count` cheapest edges, ignoring the edge at position `skip` (edges are sorted)
fn cheapest_others(edges:&[Edge], skip:usize, count:usize) -> Weight {
    edges.iter().enumerate()
        .filter(|(j,_)| *j != skip)
        .take(count)
        .map(|(_,e)| e.weight)
        .sum()
}


/** statistics of a k-MST search (exported as json) */
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    /// number of roots whose greedy tree exists
    pub nb_roots_ranked: usize,
    /// number of roots explored by the branch and bound
    pub nb_roots_explored: usize,
    /// number of branch and bound nodes
    pub nb_search_nodes: usize,
    /// number of improving trees found by the branch and bound
    pub nb_improvements: usize,
    /// sum of the k-1 cheapest edges
    pub lower_bound: Weight,
    /// best greedy tree weight
    pub greedy_weight: Weight,
    /// best weight found
    pub best_weight: Weight,
    /// true if every root was explored (the best tree is optimal)
    pub completed: bool,
    /// seconds spent
    pub time_searched: f32,
}

/**
solves the k-MST problem:
    1. sort the edges and compute the global lower bound
    2. build the greedy tree of every root, register it in the sink, rank the roots
    3. run the branch and bound from each root, lightest greedy tree first

The stopping criterion is checked between two roots. The best tree is stored in the sink.

returns NoFeasibleSolution if no connected component has k nodes.
*/
pub fn kmst_bnb<Sink:SolutionSink, Stop:StoppingCriterion>(
    inst:&Instance,
    sink:&mut Sink,
    stopping_criterion:Stop,
) -> Result<SearchStats, KmstError> {
    let t_start = Instant::now();
    let catalog = EdgeCatalog::new(inst);
    let lower_bound = catalog.global_lower_bound(inst.k() - 1)
        .ok_or(KmstError::NoFeasibleSolution { k: inst.k() })?;
    info!(lower_bound, "global lower bound");
    let ranking = greedy_all_roots(inst, &catalog, sink)?;
    let greedy_weight = sink.upper_bound();
    info!(
        greedy_weight,
        best_root_weight = ranking.best_weight(),
        nb_roots = ranking.len(),
        "greedy trees built"
    );
    let mut bnb = BranchAndBound::new(inst, sink);
    let mut nb_roots_explored = 0;
    let mut completed = true;
    for root in ranking.ordered_roots() {
        if stopping_criterion.is_finished() {
            completed = false;
            break;
        }
        bnb.explore_root(&catalog, root, lower_bound);
        nb_roots_explored += 1;
        debug!(root, upper_bound = bnb.sink.upper_bound(), nb_nodes = bnb.nb_nodes(), "root explored");
    }
    let stats = SearchStats {
        nb_roots_ranked: ranking.len(),
        nb_roots_explored,
        nb_search_nodes: bnb.nb_nodes(),
        nb_improvements: bnb.nb_improvements(),
        lower_bound,
        greedy_weight,
        best_weight: bnb.sink.upper_bound(),
        completed,
        time_searched: t_start.elapsed().as_secs_f32(),
    };
    info!(
        best_weight = stats.best_weight,
        nb_search_nodes = stats.nb_search_nodes,
        completed,
        "branch and bound finished"
    );
    Ok(stats)
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    use crate::generator::{random_connected_graph, random_graph};
    use crate::kmst::{checker, Solution};
    use crate::search::greedy_prim::greedy_prim;
    use crate::search::solution_sink::BestSolution;
    use crate::search::stopping::{NeverStoppingCriterion, TimeStoppingCriterion};
    use crate::text_format::read_from_file;

    fn read_instance(filename:&str, k:usize) -> Instance {
        let (n, edges) = read_from_file(filename).unwrap();
        Instance::new(n, k, edges).unwrap()
    }

    fn solve(inst:&Instance) -> Result<(Solution, SearchStats), KmstError> {
        let mut sink = BestSolution::new();
        let stats = kmst_bnb(inst, &mut sink, NeverStoppingCriterion::default())?;
        let sol = sink.into_solution().unwrap();
        assert_eq!(checker(inst, &sol), Ok(sol.weight));
        assert_eq!(stats.best_weight, sol.weight);
        Ok((sol, stats))
    }

    /// enumerates every set of k-1 edges, returns the lightest tree weight
    fn brute_force(inst:&Instance) -> Option<Weight> {
        fn rec(inst:&Instance, start:usize, chosen:&mut Vec<Edge>, best:&mut Option<Weight>) {
            if chosen.len() == inst.k() - 1 {
                let weight = chosen.iter().map(|e| e.weight).sum();
                let sol = Solution { weight, edges: chosen.clone() };
                if checker(inst, &sol).is_ok() && best.map_or(true, |b| weight < b) {
                    *best = Some(weight);
                }
                return;
            }
            for i in start..inst.m() {
                chosen.push(inst.edges()[i]);
                rec(inst, i+1, chosen, best);
                chosen.pop();
            }
        }
        let mut best = None;
        rec(inst, 0, &mut Vec::new(), &mut best);
        best
    }

    #[test]
    fn test_path() {
        let inst = read_instance("insts/path4.txt", 3);
        let (sol, stats) = solve(&inst).unwrap();
        assert_eq!(sol.weight, 3);
        assert_eq!(sol.edges, vec![Edge::new(0,1,1), Edge::new(1,2,2)]);
        assert_eq!(stats.lower_bound, 3);
        assert!(stats.completed);
    }

    #[test]
    fn test_k2_is_cheapest_edge() {
        let inst = read_instance("insts/complete5.txt", 2);
        let (sol, _) = solve(&inst).unwrap();
        assert_eq!(sol.weight, 2);
        assert_eq!(sol.edges, vec![Edge::new(1,3,2)]);
    }

    #[test]
    fn test_spanning_tree_is_mst() {
        let inst = read_instance("insts/complete5.txt", 5);
        let (sol, stats) = solve(&inst).unwrap();
        assert_eq!(sol.weight, 14);
        assert_eq!(stats.greedy_weight, 14);
        assert_eq!(stats.nb_roots_ranked, 5);
    }

    #[test]
    fn test_complete5_every_k() {
        let inst = read_instance("insts/complete5.txt", 5);
        for k in 2..=5 {
            let inst_k = inst.with_k(k).unwrap();
            let (sol, _) = solve(&inst_k).unwrap();
            assert_eq!(Some(sol.weight), brute_force(&inst_k), "k={}", k);
        }
    }

    #[test]
    fn test_two_components() {
        let inst = read_instance("insts/two_components.txt", 3);
        assert_eq!(solve(&inst).unwrap().0.weight, 11);
        let inst = inst.with_k(4).unwrap();
        let (sol, stats) = solve(&inst).unwrap();
        assert_eq!(sol.weight, 63);
        assert_eq!(stats.nb_roots_ranked, 4); // only the roots of the 4-cycle
    }

    #[test]
    fn test_infeasible() {
        let inst = read_instance("insts/two_components.txt", 5);
        let mut sink = BestSolution::new();
        let res = kmst_bnb(&inst, &mut sink, NeverStoppingCriterion::default());
        assert!(matches!(res, Err(KmstError::NoFeasibleSolution { k: 5 })));
        assert!(sink.best().is_none());
        // not even k-1 edges
        let inst = Instance::new(4, 4, vec![Edge::new(0,1,1), Edge::new(2,3,1)]).unwrap();
        assert!(matches!(solve(&inst), Err(KmstError::NoFeasibleSolution { k: 4 })));
    }

    #[test]
    fn test_time_limit_reached() {
        let inst = read_instance("insts/complete5.txt", 3);
        let mut sink = BestSolution::new();
        let stats = kmst_bnb(&inst, &mut sink, TimeStoppingCriterion::new(0.)).unwrap();
        assert!(!stats.completed);
        assert_eq!(stats.nb_roots_explored, 0);
        // the greedy trees are still available
        let sol = sink.into_solution().unwrap();
        assert_eq!(sol.weight, stats.greedy_weight);
    }

    #[test]
    fn test_random_graphs_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..60 {
            let n = rng.gen_range(3..=7);
            let max_m = n*(n-1)/2;
            let m = rng.gen_range(n-1..=max_m.min(12));
            let max_weight = if rng.gen_bool(0.5) { 5 } else { 100 };
            let edges = random_connected_graph(n, m, max_weight, rng.gen()).unwrap();
            let k = rng.gen_range(2..=n);
            let inst = Instance::new(n, k, edges).unwrap();
            let (sol, stats) = solve(&inst).unwrap();
            assert_eq!(Some(sol.weight), brute_force(&inst), "{:?}", inst);
            assert!(sol.weight >= stats.lower_bound);
            assert!(sol.weight <= stats.greedy_weight);
        }
    }

    #[test]
    fn test_random_disconnected_graphs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..40 {
            let n = rng.gen_range(4..=8);
            let m = rng.gen_range(1..=n);
            let edges = random_graph(n, m, 20, rng.gen()).unwrap();
            let k = rng.gen_range(2..=n);
            let inst = Instance::new(n, k, edges).unwrap();
            match (solve(&inst), brute_force(&inst)) {
                (Ok((sol, _)), Some(expected)) => assert_eq!(sol.weight, expected),
                (Err(KmstError::NoFeasibleSolution { .. }), None) => {},
                (res, expected) => panic!("{:?} vs {:?} on {:?}", res.map(|r| r.0), expected, inst),
            }
        }
    }

    #[test]
    fn test_result_below_every_greedy_tree() {
        let edges = random_connected_graph(10, 25, 50, 3).unwrap();
        let inst = Instance::new(10, 6, edges).unwrap();
        let (sol, _) = solve(&inst).unwrap();
        let catalog = EdgeCatalog::new(&inst);
        for root in 0..inst.n() {
            let greedy = greedy_prim(&inst, &catalog, root).unwrap();
            assert!(sol.weight <= greedy.weight);
        }
    }

    #[test]
    fn test_huge_weights() {
        // the total weight of the graph is exactly Weight::MAX
        let w = Weight::MAX / 4;
        let edges = vec![
            Edge::new(0,1,w), Edge::new(1,2,w+1), Edge::new(2,3,w+1), Edge::new(0,3,Weight::MAX - 3*w - 2)
        ];
        let inst = Instance::new(4, 4, edges.clone()).unwrap();
        let (sol, _) = solve(&inst).unwrap();
        assert_eq!(Some(sol.weight), brute_force(&inst));
        // one more unit does not fit
        let mut too_heavy = edges;
        too_heavy[0].weight += 1;
        assert!(matches!(Instance::new(4, 4, too_heavy), Err(KmstError::InvalidInput(_))));
    }

    #[test]
    fn test_idempotent() {
        let edges = random_connected_graph(12, 30, 9, 11).unwrap();
        let inst = Instance::new(12, 5, edges).unwrap();
        let (sol1, _) = solve(&inst).unwrap();
        let (sol2, _) = solve(&inst).unwrap();
        assert_eq!(sol1.weight, sol2.weight);
    }

    #[test]
    fn test_explore_single_root() {
        // the tree must contain node 3: (2,3) + (1,2)
        let inst = read_instance("insts/path4.txt", 3);
        let catalog = EdgeCatalog::new(&inst);
        let mut sink = BestSolution::new();
        let mut bnb = BranchAndBound::new(&inst, &mut sink);
        bnb.explore_root(&catalog, 3, catalog.global_lower_bound(2).unwrap());
        assert_eq!(bnb.nb_improvements(), 1);
        assert_eq!(sink.best().unwrap().weight, 5);
    }
}
