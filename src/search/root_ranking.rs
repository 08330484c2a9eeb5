use std::collections::BTreeSet;

use crate::kmst::{NodeId, Weight};

/**
ranks the roots by the weight of their greedy tree (lightest first), so the
exhaustive search starts from the most promising roots.
Roots with equal greedy weights are all kept (ordered by node id).
*/
#[derive(Debug, Default, Clone)]
pub struct RootRanking {
    /// (greedy weight, root)
    entries: BTreeSet<(Weight, NodeId)>,
}

impl RootRanking {
    /// creates an empty ranking
    pub fn new() -> Self { Self::default() }

    /// registers the greedy weight obtained from a root
    pub fn register(&mut self, weight:Weight, root:NodeId) {
        self.entries.insert((weight, root));
    }

    /// number of ranked roots
    pub fn len(&self) -> usize { self.entries.len() }

    /// true if no root was registered
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// lightest greedy weight
    pub fn best_weight(&self) -> Option<Weight> {
        self.entries.iter().next().map(|(w,_)| *w)
    }

    /// roots by non-decreasing greedy weight
    pub fn ordered_roots(&self) -> impl Iterator<Item=NodeId> + '_ {
        self.entries.iter().map(|(_,root)| *root)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_and_ties() {
        let mut ranking = RootRanking::new();
        ranking.register(12, 0);
        ranking.register(5, 3);
        ranking.register(12, 1);
        ranking.register(7, 2);
        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking.best_weight(), Some(5));
        let roots:Vec<NodeId> = ranking.ordered_roots().collect();
        assert_eq!(roots, vec![3, 2, 0, 1]);
    }
}
