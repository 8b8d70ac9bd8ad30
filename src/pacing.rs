//! Politeness delay between page requests.

use std::ops::RangeInclusive;
use std::thread;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Called by the fetcher between two page requests.
pub trait Pacer {
    fn pause(&mut self);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self) {
        (**self).pause()
    }
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
    fn pause(&mut self) {
        (**self).pause()
    }
}

/// Sleeps for a duration drawn uniformly from a range.
pub struct RandomDelay {
    min_secs: f64,
    max_secs: f64,
    rng: StdRng,
}

impl RandomDelay {
    pub fn new(range: RangeInclusive<Duration>) -> Self {
        Self::with_rng(range, StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(range: RangeInclusive<Duration>, seed: u64) -> Self {
        Self::with_rng(range, StdRng::seed_from_u64(seed))
    }

    fn with_rng(range: RangeInclusive<Duration>, rng: StdRng) -> Self {
        let (min, max) = range.into_inner();
        Self {
            min_secs: min.as_secs_f64(),
            // An inverted range collapses to its lower bound.
            max_secs: max.as_secs_f64().max(min.as_secs_f64()),
            rng,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        Duration::from_secs_f64(self.rng.gen_range(self.min_secs..=self.max_secs))
    }
}

impl Pacer for RandomDelay {
    fn pause(&mut self) {
        let delay = self.next_delay();
        debug!("Sleeping {:.2}s before next request", delay.as_secs_f64());
        thread::sleep(delay);
    }
}

/// Never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self) {}
}
