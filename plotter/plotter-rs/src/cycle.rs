use shared::plotter_hal::PlotterError;

/// Wrapping position within one period of the input signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleState {
    count: u32,
    period: u32,
}

impl CycleState {
    pub fn new(period: u32) -> Result<Self, PlotterError> {
        if period == 0 {
            return Err(PlotterError::InvalidCyclePeriod);
        }

        Ok(Self { count: 0, period })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Fraction of the period already covered, in `[0, 1)`.
    pub fn position(&self) -> f64 {
        self.count as f64 / self.period as f64
    }

    /// Returns the sample for the current count, then advances the count.
    pub fn next_sample(&mut self, domain_range: f64) -> f64 {
        let x = self.position() * domain_range;

        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
        }

        x
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Endless iterator over the samples, starting from the current count.
    pub fn samples(self, domain_range: f64) -> CycleSamples {
        CycleSamples {
            state: self,
            domain_range,
        }
    }
}

pub fn next_sample(state: &mut CycleState, domain_range: f64) -> f64 {
    state.next_sample(domain_range)
}

pub struct CycleSamples {
    state: CycleState,
    domain_range: f64,
}

impl Iterator for CycleSamples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.state.next_sample(self.domain_range))
    }
}
