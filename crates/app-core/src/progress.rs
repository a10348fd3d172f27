//! Simulated upload progress increments

/// Source of progress increments
pub trait ProgressSource: Send {
    /// Next increment, in `[0, max)`
    fn next_increment(&mut self, max: f64) -> f64;
}

/// Uniformly distributed increments
///
/// Draws 48 bits from a v4 UUID, all of which are random.
#[derive(Debug, Clone, Default)]
pub struct RandomProgress;

impl ProgressSource for RandomProgress {
    fn next_increment(&mut self, max: f64) -> f64 {
        let bytes = uuid::Uuid::new_v4().into_bytes();
        let mut raw = [0u8; 8];
        raw[2..].copy_from_slice(&bytes[10..16]);
        let unit = u64::from_be_bytes(raw) as f64 / (1u64 << 48) as f64;
        unit * max
    }
}

/// Replays a fixed sequence of increments, cycling when exhausted
///
/// Values are clamped into `[0, max)` so a test can never produce an
/// increment the random source could not.
#[derive(Debug, Clone)]
pub struct FixedProgress {
    steps: Vec<f64>,
    next: usize,
}

impl FixedProgress {
    /// Create from a non-empty list of increments
    pub fn new(steps: impl Into<Vec<f64>>) -> Self {
        let mut steps = steps.into();
        if steps.is_empty() {
            steps.push(0.0);
        }
        Self { steps, next: 0 }
    }

    /// The same increment every tick
    pub fn constant(step: f64) -> Self {
        Self::new(vec![step])
    }
}

impl ProgressSource for FixedProgress {
    fn next_increment(&mut self, max: f64) -> f64 {
        let step = self.steps[self.next % self.steps.len()];
        self.next += 1;
        let below_max = max - max * f64::EPSILON;
        step.clamp(0.0, below_max.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_stays_in_range() {
        let mut source = RandomProgress;
        for _ in 0..1000 {
            let step = source.next_increment(10.0);
            assert!((0.0..10.0).contains(&step), "{step}");
        }
    }

    #[test]
    fn test_fixed_cycles() {
        let mut source = FixedProgress::new(vec![1.0, 2.0]);
        assert_eq!(source.next_increment(10.0), 1.0);
        assert_eq!(source.next_increment(10.0), 2.0);
        assert_eq!(source.next_increment(10.0), 1.0);
    }

    #[test]
    fn test_fixed_clamps_to_range() {
        let mut source = FixedProgress::new(vec![-3.0, 50.0]);
        assert_eq!(source.next_increment(10.0), 0.0);
        let big = source.next_increment(10.0);
        assert!(big < 10.0 && big > 9.99);
    }
}
