//! The statistics functions and their result formatting.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;

use average::{self, concatenate, Estimate, Mean, Variance};
use itertools::Itertools;

concatenate!(AggStats, [Mean, mean], [Variance, sample_variance]);

/// `f64` key with a total order, so frequency counts have unique keys and
/// iterate in ascending value order.
#[derive(Debug, Clone, Copy)]
pub struct ValueKey(f64);

impl ValueKey {
    /// Negative zero folds into positive zero, so both count as the same
    /// reading.
    pub fn new(value: f64) -> ValueKey {
        ValueKey(if value == 0.0 { 0.0 } else { value })
    }
}

impl PartialEq for ValueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ValueKey {}

impl PartialOrd for ValueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ValueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Display for ValueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Whole numbers keep one fractional digit (40.0, not 40), matching
        // the rendering existing report consumers expect.
        if self.0.fract() == 0.0 && self.0.is_finite() {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Outcome of one statistics function: a scalar for the numeric reductions,
/// a value-to-occurrence-count mapping for the frequency distribution.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsResult {
    Scalar(f64),
    Frequency(BTreeMap<ValueKey, u64>),
}

pub trait VecAggregation {
    fn median(&mut self) -> Option<f64>;
}

impl VecAggregation for Vec<f64> {
    fn median(&mut self) -> Option<f64> {
        self.sort_by(f64::total_cmp);
        match self.len() {
            0 => None,
            even if even % 2 == 0 => {
                let left = self[even / 2 - 1];
                let right = self[even / 2];
                Some((left + right) / 2.0)
            }
            odd => Some(self[odd / 2]),
        }
    }
}

/// The closed set of statistics functions. Empty input yields 0 for the
/// scalar functions and an empty mapping for Frequency; StandardDeviation
/// needs at least two values (a population of one has no sample variance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFunc {
    Average,
    Maximum,
    Minimum,
    StandardDeviation,
    Frequency,
    Median,
}

impl StatsFunc {
    /// Resolve a free-text operation name. Unknown names yield `None` and
    /// are skipped by the orchestrator.
    pub fn from_name(name: &str) -> Option<StatsFunc> {
        match name.to_lowercase().as_str() {
            "average" => Some(StatsFunc::Average),
            "maximum" => Some(StatsFunc::Maximum),
            "minimum" => Some(StatsFunc::Minimum),
            "standard_deviation" => Some(StatsFunc::StandardDeviation),
            "frequency" => Some(StatsFunc::Frequency),
            "median" => Some(StatsFunc::Median),
            _ => None,
        }
    }

    /// Token used to build report filenames.
    pub fn file_stem(&self) -> &'static str {
        match self {
            StatsFunc::Average => "average",
            StatsFunc::Maximum => "maximum",
            StatsFunc::Minimum => "minimum",
            StatsFunc::StandardDeviation => "standarddeviation",
            StatsFunc::Frequency => "frequency",
            StatsFunc::Median => "median",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StatsFunc::Average => "avg",
            StatsFunc::Maximum => "max",
            StatsFunc::Minimum => "min",
            StatsFunc::StandardDeviation => "std",
            StatsFunc::Frequency => "frequency",
            StatsFunc::Median => "median",
        }
    }

    pub fn calculate(&self, values: &[f64]) -> StatsResult {
        match self {
            StatsFunc::Average => {
                if values.is_empty() {
                    return StatsResult::Scalar(0.0);
                }
                let stats: AggStats = values.iter().copied().collect();
                StatsResult::Scalar(stats.mean())
            }
            StatsFunc::Maximum => {
                StatsResult::Scalar(values.iter().copied().reduce(f64::max).unwrap_or(0.0))
            }
            StatsFunc::Minimum => {
                StatsResult::Scalar(values.iter().copied().reduce(f64::min).unwrap_or(0.0))
            }
            StatsFunc::StandardDeviation => {
                if values.len() < 2 {
                    return StatsResult::Scalar(0.0);
                }
                let stats: AggStats = values.iter().copied().collect();
                StatsResult::Scalar(stats.sample_variance().sqrt())
            }
            StatsFunc::Median => {
                StatsResult::Scalar(values.to_vec().median().unwrap_or(0.0))
            }
            StatsFunc::Frequency => {
                let mut counts = BTreeMap::new();
                for &value in values {
                    *counts.entry(ValueKey::new(value)).or_insert(0) += 1;
                }
                StatsResult::Frequency(counts)
            }
        }
    }

    /// Render a result for display. Scalars print with two decimal digits.
    /// The frequency rendering here carries no unit label; the report writer
    /// inserts the measurement-kind unit when one is known.
    pub fn format_result(&self, result: &StatsResult) -> String {
        match result {
            StatsResult::Scalar(value) => format!("{}: {value:.2}", self.label()),
            StatsResult::Frequency(counts) => counts
                .iter()
                .map(|(value, count)| format!("{value} {count} defa ölçüldü"))
                .join("\n"),
        }
    }
}

/// Holds the currently bound statistics function and delegates computation
/// to it. Callers swap functions without branching on the concrete variant.
#[derive(Debug, Default)]
pub struct CalcContext {
    func: Option<StatsFunc>,
}

impl CalcContext {
    pub fn new() -> CalcContext {
        CalcContext::default()
    }

    pub fn bind(&mut self, func: StatsFunc) {
        self.func = Some(func);
    }

    pub fn calculate(&self, values: &[f64]) -> Option<StatsResult> {
        self.func.map(|func| func.calculate(values))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scalar(result: StatsResult) -> f64 {
        match result {
            StatsResult::Scalar(value) => value,
            StatsResult::Frequency(_) => panic!("expected scalar result"),
        }
    }

    #[test]
    fn average_is_sum_over_count() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(scalar(StatsFunc::Average.calculate(&values)), 2.5);
    }

    #[test]
    fn average_of_constant_sequence() {
        let values = [7.0; 5];
        assert_eq!(scalar(StatsFunc::Average.calculate(&values)), 7.0);
    }

    #[test]
    fn maximum_and_minimum() {
        let values = [2.0, 6.0, 1.0];
        assert_eq!(scalar(StatsFunc::Maximum.calculate(&values)), 6.0);
        assert_eq!(scalar(StatsFunc::Minimum.calculate(&values)), 1.0);
        assert_eq!(scalar(StatsFunc::Maximum.calculate(&[3.0])), 3.0);
        assert_eq!(scalar(StatsFunc::Minimum.calculate(&[3.0])), 3.0);
    }

    #[test]
    fn empty_input_yields_zero() {
        for func in [
            StatsFunc::Average,
            StatsFunc::Maximum,
            StatsFunc::Minimum,
            StatsFunc::StandardDeviation,
            StatsFunc::Median,
        ] {
            assert_eq!(scalar(func.calculate(&[])), 0.0);
        }
        assert_eq!(
            StatsFunc::Frequency.calculate(&[]),
            StatsResult::Frequency(BTreeMap::new())
        );
    }

    #[test]
    fn sample_standard_deviation() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0f64 / 7.0).sqrt();
        let got = scalar(StatsFunc::StandardDeviation.calculate(&values));
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn standard_deviation_needs_two_values() {
        assert_eq!(scalar(StatsFunc::StandardDeviation.calculate(&[5.0])), 0.0);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(scalar(StatsFunc::Median.calculate(&[1.0, 2.0, 3.0])), 2.0);
        assert_eq!(
            scalar(StatsFunc::Median.calculate(&[1.0, 2.0, 3.0, 4.0])),
            2.5
        );
        assert_eq!(scalar(StatsFunc::Median.calculate(&[3.0, 1.0, 2.0])), 2.0);
    }

    #[test]
    fn frequency_counts_distinct_values() {
        let result = StatsFunc::Frequency.calculate(&[1.0, 1.0, 2.0]);
        let expected: BTreeMap<_, _> = [(ValueKey::new(1.0), 2), (ValueKey::new(2.0), 1)].into();
        assert_eq!(result, StatsResult::Frequency(expected));
    }

    #[test]
    fn frequency_merges_signed_zero() {
        let result = StatsFunc::Frequency.calculate(&[0.0, -0.0]);
        let expected: BTreeMap<_, _> = [(ValueKey::new(0.0), 2)].into();
        assert_eq!(result, StatsResult::Frequency(expected));
    }

    #[test]
    fn value_key_equality_agrees_with_ordering() {
        assert_eq!(ValueKey::new(-0.0), ValueKey::new(0.0));
        assert_eq!(
            ValueKey::new(-0.0).cmp(&ValueKey::new(0.0)),
            std::cmp::Ordering::Equal
        );
        assert_ne!(ValueKey::new(1.0), ValueKey::new(2.0));
    }

    #[test]
    fn value_key_display_keeps_fractional_digit_for_whole_numbers() {
        assert_eq!(ValueKey::new(40.0).to_string(), "40.0");
        assert_eq!(ValueKey::new(55.5).to_string(), "55.5");
        assert_eq!(ValueKey::new(0.0).to_string(), "0.0");
    }

    #[test]
    fn scalar_formatting_uses_two_decimals() {
        assert_eq!(
            StatsFunc::Average.format_result(&StatsResult::Scalar(15.0)),
            "avg: 15.00"
        );
        assert_eq!(
            StatsFunc::Median.format_result(&StatsResult::Scalar(2.5)),
            "median: 2.50"
        );
        assert_eq!(
            StatsFunc::StandardDeviation.format_result(&StatsResult::Scalar(2.1381)),
            "std: 2.14"
        );
    }

    #[test]
    fn frequency_formatting_sorts_ascending() {
        let result = StatsFunc::Frequency.calculate(&[2.5, 1.0, 2.5]);
        assert_eq!(
            StatsFunc::Frequency.format_result(&result),
            "1.0 1 defa ölçüldü\n2.5 2 defa ölçüldü"
        );
    }

    #[test]
    fn from_name_resolves_recognized_identifiers() {
        assert_eq!(StatsFunc::from_name("average"), Some(StatsFunc::Average));
        assert_eq!(
            StatsFunc::from_name("standard_deviation"),
            Some(StatsFunc::StandardDeviation)
        );
        assert_eq!(StatsFunc::from_name("MEDIAN"), Some(StatsFunc::Median));
        assert_eq!(StatsFunc::from_name("variance"), None);
    }

    #[test]
    fn file_stems() {
        assert_eq!(StatsFunc::StandardDeviation.file_stem(), "standarddeviation");
        assert_eq!(StatsFunc::Average.file_stem(), "average");
    }

    #[test]
    fn unbound_context_yields_no_result() {
        let context = CalcContext::new();
        assert_eq!(context.calculate(&[1.0, 2.0]), None);
    }

    #[test]
    fn bound_context_delegates() {
        let mut context = CalcContext::new();
        context.bind(StatsFunc::Maximum);
        assert_eq!(
            context.calculate(&[1.0, 2.0]),
            Some(StatsResult::Scalar(2.0))
        );
        context.bind(StatsFunc::Minimum);
        assert_eq!(
            context.calculate(&[1.0, 2.0]),
            Some(StatsResult::Scalar(1.0))
        );
    }
}
