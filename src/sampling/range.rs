use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

/// Value returned for ranges marked unset (`min` or `max` equal to -1).
pub const UNSET_SENTINEL: f64 = -1.0;

/// On-disk form of a range: a scalar, `[value]` or `[min, max, step]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeRepr<T> {
    Scalar(T),
    List(Vec<T>),
}

/// Closed real range sampled on a step grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr<f64>", into = "RangeRepr<f64>")]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}
impl RangeSpec {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        RangeSpec{min, max, step}
    }

    /// A range that always yields `value`.
    pub fn fixed(value: f64) -> Self {
        RangeSpec{min: value, max: value, step: 0.0}
    }
}
impl TryFrom<RangeRepr<f64>> for RangeSpec {
    type Error = String;

    fn try_from(repr: RangeRepr<f64>) -> Result<Self, Self::Error> {
        match repr {
            RangeRepr::Scalar(value) => Ok(RangeSpec::fixed(value)),
            RangeRepr::List(values) => match values[..] {
                [value] => Ok(RangeSpec::fixed(value)),
                [min, max, step] => Ok(RangeSpec::new(min, max, step)),
                _ => Err(format!("expected a value, [value] or [min, max, step], got {} elements", values.len())),
            },
        }
    }
}
impl From<RangeSpec> for RangeRepr<f64> {
    fn from(range: RangeSpec) -> Self {
        RangeRepr::List(vec![range.min, range.max, range.step])
    }
}

/// Closed integer range sampled on a step grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr<i64>", into = "RangeRepr<i64>")]
pub struct IntRangeSpec {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}
impl IntRangeSpec {
    pub fn new(min: i64, max: i64, step: i64) -> Self {
        IntRangeSpec{min, max, step}
    }

    /// A range that always yields `value`.
    pub fn fixed(value: i64) -> Self {
        IntRangeSpec{min: value, max: value, step: 0}
    }
}
impl TryFrom<RangeRepr<i64>> for IntRangeSpec {
    type Error = String;

    fn try_from(repr: RangeRepr<i64>) -> Result<Self, Self::Error> {
        match repr {
            RangeRepr::Scalar(value) => Ok(IntRangeSpec::fixed(value)),
            RangeRepr::List(values) => match values[..] {
                [value] => Ok(IntRangeSpec::fixed(value)),
                [min, max, step] => Ok(IntRangeSpec::new(min, max, step)),
                _ => Err(format!("expected a value, [value] or [min, max, step], got {} elements", values.len())),
            },
        }
    }
}
impl From<IntRangeSpec> for RangeRepr<i64> {
    fn from(range: IntRangeSpec) -> Self {
        RangeRepr::List(vec![range.min, range.max, range.step])
    }
}

/// Seeded cursor over the random stream.
/// Every sampled value goes through here, so the order of calls fixes the output for a seed.
#[derive(Debug, Clone)]
pub struct RangeSampler {
    rng: StdRng,
    draws: usize,
}
impl RangeSampler {
    pub fn new(seed: u64) -> Self {
        RangeSampler{rng: StdRng::seed_from_u64(seed), draws: 0}
    }

    /// Number of values taken from the stream so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn draw_index(&mut self, steps: i64) -> i64 {
        self.draws += 1;
        self.rng.gen_range(0..=steps)
    }

    /// Draw `min + k * step` with `k` uniform over the grid.
    /// Unset ranges return the sentinel, fixed and empty ranges return `min`, neither consumes a draw.
    pub fn sample(&mut self, range: &RangeSpec) -> f64 {
        if range.min == UNSET_SENTINEL || range.max == UNSET_SENTINEL {
            return UNSET_SENTINEL;
        }
        if range.step == 0.0 || range.max == range.min {
            return range.min;
        }
        let steps = ((range.max - range.min) / range.step).round_ties_even();
        if !(steps > 0.0) {
            return range.min;
        }
        range.min + self.draw_index(steps as i64) as f64 * range.step
    }

    /// Integer counterpart of `sample`, with a floored step count.
    pub fn sample_int(&mut self, range: &IntRangeSpec) -> i64 {
        if range.step == 0 || range.max == range.min {
            return range.min;
        }
        let steps = floor_div(range.max - range.min, range.step);
        if steps <= 0 {
            return range.min;
        }
        range.min + self.draw_index(steps) * range.step
    }

    /// Draw an integer and read any non-zero value as `true`.
    pub fn sample_bool(&mut self, range: &IntRangeSpec) -> bool {
        self.sample_int(range) != 0
    }

    /// Draw each range in order.
    pub fn sample_each(&mut self, ranges: &[RangeSpec]) -> Vec<f64> {
        ranges.iter().map(|r| self.sample(r)).collect()
    }

    /// Draw each integer range in order.
    pub fn sample_int_each(&mut self, ranges: &[IntRangeSpec]) -> Vec<i64> {
        ranges.iter().map(|r| self.sample_int(r)).collect()
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_and_fixed_do_not_draw() {
        let mut sampler = RangeSampler::new(1);
        assert_eq!(sampler.sample(&RangeSpec::new(-1.0, 5.0, 1.0)), UNSET_SENTINEL);
        assert_eq!(sampler.sample(&RangeSpec::new(0.0, -1.0, 1.0)), UNSET_SENTINEL);
        assert_eq!(sampler.sample(&RangeSpec::fixed(3.5)), 3.5);
        assert_eq!(sampler.sample(&RangeSpec::new(1.0, 4.0, 0.0)), 1.0);
        assert_eq!(sampler.sample(&RangeSpec::new(1.0, 1.2, 1.0)), 1.0);
        assert_eq!(sampler.sample_int(&IntRangeSpec::fixed(7)), 7);
        assert_eq!(sampler.sample_int(&IntRangeSpec::new(0, 1, 2)), 0);
        assert_eq!(sampler.draws(), 0);
    }

    #[test]
    fn draws_stay_on_the_grid() {
        let mut sampler = RangeSampler::new(42);
        let range = RangeSpec::new(0.5, 1.5, 0.25);
        for _ in 0..200 {
            let value = sampler.sample(&range);
            assert!((0.5..=1.5).contains(&value));
            let k = (value - 0.5) / 0.25;
            assert!((k - k.round()).abs() < 1e-9);
        }
        assert_eq!(sampler.draws(), 200);
    }

    #[test]
    fn step_count_rounds_half_to_even() {
        // 2.5 steps round down to 2
        let mut sampler = RangeSampler::new(3);
        let range = RangeSpec::new(0.0, 2.5, 1.0);
        let values: Vec<_> = (0..300).map(|_| sampler.sample(&range)).collect();
        assert!(values.iter().all(|v| [0.0, 1.0, 2.0].contains(v)));
        assert!(values.contains(&2.0));
    }

    #[test]
    fn integer_steps_floor() {
        let mut sampler = RangeSampler::new(5);
        let range = IntRangeSpec::new(0, 5, 2);
        let values: Vec<_> = (0..300).map(|_| sampler.sample_int(&range)).collect();
        assert!(values.iter().all(|v| [0, 2, 4].contains(v)));
        assert!(values.contains(&4));
        assert_eq!(floor_div(-3, 2), -2);
        assert_eq!(floor_div(3, 2), 1);
    }

    #[test]
    fn same_seed_same_stream() {
        let range = RangeSpec::new(0.0, 100.0, 1.0);
        let int_range = IntRangeSpec::new(0, 9, 1);
        let mut a = RangeSampler::new(599);
        let mut b = RangeSampler::new(599);
        for _ in 0..50 {
            assert_eq!(a.sample(&range), b.sample(&range));
            assert_eq!(a.sample_int(&int_range), b.sample_int(&int_range));
        }
    }

    #[test]
    fn bool_draws() {
        let mut sampler = RangeSampler::new(0);
        assert!(sampler.sample_bool(&IntRangeSpec::fixed(1)));
        assert!(!sampler.sample_bool(&IntRangeSpec::fixed(0)));
    }

    #[test]
    fn ranges_parse_from_scalars_and_lists() {
        #[derive(Deserialize)]
        struct Holder {
            a: RangeSpec,
            b: RangeSpec,
            c: RangeSpec,
            n: IntRangeSpec,
        }
        let holder: Holder = toml::from_str("a = 2\nb = [1.5]\nc = [0.0, 1.0, 0.5]\nn = [1, 3, 1]").unwrap();
        assert_eq!(holder.a, RangeSpec::fixed(2.0));
        assert_eq!(holder.b, RangeSpec::fixed(1.5));
        assert_eq!(holder.c, RangeSpec::new(0.0, 1.0, 0.5));
        assert_eq!(holder.n, IntRangeSpec::new(1, 3, 1));

        let bad: Result<RangeSpec, _> = serde_json::from_str("[1.0, 2.0]");
        assert!(bad.is_err());
    }
}
