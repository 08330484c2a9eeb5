use std::time::Instant;

/** decides when the outer search loop should stop (checked between root attempts) */
pub trait StoppingCriterion {
    /// true if the search should stop
    fn is_finished(&self) -> bool;
}

/** never stops: the search runs to completion */
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverStoppingCriterion {}

impl StoppingCriterion for NeverStoppingCriterion {
    fn is_finished(&self) -> bool { false }
}

/** stops once a time limit (in seconds) is reached */
#[derive(Debug, Clone, Copy)]
pub struct TimeStoppingCriterion {
    /// start time
    t_start: Instant,
    /// time limit (seconds)
    time_limit: f32,
}

impl TimeStoppingCriterion {
    /// starts the clock
    pub fn new(time_limit:f32) -> Self {
        Self { t_start: Instant::now(), time_limit }
    }

    /// seconds since the criterion was created
    pub fn elapsed(&self) -> f32 { self.t_start.elapsed().as_secs_f32() }
}

impl StoppingCriterion for TimeStoppingCriterion {
    fn is_finished(&self) -> bool {
        self.elapsed() >= self.time_limit
    }
}
