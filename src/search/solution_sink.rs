use tracing::info;

use crate::kmst::{Edge, Solution, Weight};

/**
receives the candidate trees found by the search and exposes the best weight
known so far (used for pruning).
*/
pub trait SolutionSink {
    /// registers a candidate tree of the given weight
    fn set_solution(&mut self, weight:Weight, edges:&[Edge]);

    /// weight of the best tree known so far (Weight::MAX if none)
    fn upper_bound(&self) -> Weight;
}

/** stores the best solution found so far (keeps strict improvements only) */
#[derive(Debug, Default)]
pub struct BestSolution {
    /// best tree found so far
    best: Option<Solution>,
    /// number of candidates registered
    nb_candidates: usize,
    /// number of strict improvements
    nb_improvements: usize,
}

impl BestSolution {
    /// creates an empty sink
    pub fn new() -> Self { Self::default() }

    /// best solution found so far
    pub fn best(&self) -> Option<&Solution> { self.best.as_ref() }

    /// number of candidates registered so far
    pub fn nb_candidates(&self) -> usize { self.nb_candidates }

    /// number of times the best solution was improved
    pub fn nb_improvements(&self) -> usize { self.nb_improvements }

    /// consumes the sink, returns the best solution
    pub fn into_solution(self) -> Option<Solution> { self.best }
}

impl SolutionSink for BestSolution {
    fn set_solution(&mut self, weight:Weight, edges:&[Edge]) {
        self.nb_candidates += 1;
        if weight < self.upper_bound() {
            info!(weight, nb_edges = edges.len(), "new best tree");
            self.nb_improvements += 1;
            self.best = Some(Solution { weight, edges: edges.to_vec() });
        }
    }

    fn upper_bound(&self) -> Weight {
        match &self.best {
            None => Weight::MAX,
            Some(sol) => sol.weight,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_strict_improvements() {
        let mut sink = BestSolution::new();
        assert_eq!(sink.upper_bound(), Weight::MAX);
        assert!(sink.best().is_none());
        sink.set_solution(10, &[Edge::new(0,1,10)]);
        assert_eq!(sink.upper_bound(), 10);
        // same weight: not an improvement, the first tree is kept
        sink.set_solution(10, &[Edge::new(1,2,10)]);
        assert_eq!(sink.best().unwrap().edges, vec![Edge::new(0,1,10)]);
        sink.set_solution(12, &[Edge::new(2,3,12)]);
        assert_eq!(sink.upper_bound(), 10);
        sink.set_solution(4, &[Edge::new(3,4,4)]);
        assert_eq!(sink.upper_bound(), 4);
        assert_eq!(sink.nb_candidates(), 4);
        assert_eq!(sink.nb_improvements(), 2);
        assert_eq!(sink.into_solution().unwrap().weight, 4);
    }
}
