//! Search algorithms for the k-MST problem.

/// sorted edges and global lower bound
pub mod edge_catalog;

/// greedy Prim-like tree from a root
pub mod greedy_prim;

/// roots ordered by greedy tree weight
pub mod root_ranking;

/// best solution storage
pub mod solution_sink;

/// stopping criteria
pub mod stopping;

/// depth-first branch and bound
pub mod branch_and_bound;
