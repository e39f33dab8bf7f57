use std::collections::BTreeMap;
use std::mem;

use rand::{SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Pareto};
use serde::Serialize;

use super::{Bin, DDSketch, SketchConfig};
use crate::domain::errors::{VizError, VizResult};
use crate::domain::stats::{InputStats, OutputStats};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

// Samples look like web service latencies in microseconds: a big hump just
// above 15ms and a long tail that is cut off at one second.
const PARETO_SCALE: f64 = 1.0;
const PARETO_SHAPE: f64 = 1.0;
const SAMPLE_MULTIPLIER: f64 = 10_000.0;
const SAMPLE_FLOOR_MICROS: f64 = 15_000.0;
const SAMPLE_CEILING_MICROS: f64 = 1_000_000.0;

/// One histogram column, in seconds along x and observations along y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBar {
    pub start: f64,
    pub end: f64,
    pub count: f64,
}

/// Raw samples side by side with the sketch summarizing them.
#[derive(Debug, Clone)]
pub struct SketchModel {
    sketch: DDSketch,
    rng: SmallRng,
    samples: Vec<f64>,
}

impl SketchModel {
    pub fn new(seed: u64) -> Self {
        Self {
            sketch: DDSketch::default(),
            rng: SmallRng::seed_from_u64(seed),
            samples: Vec::new(),
        }
    }

    pub fn sketch(&self) -> &DDSketch {
        &self.sketch
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Draws exactly `count` latency samples and feeds them to the sketch.
    pub fn sample(&mut self, count: usize) -> VizResult<()> {
        let distribution = Pareto::new(PARETO_SCALE, PARETO_SHAPE)
            .map_err(|e| VizError::Engine(format!("invalid sample distribution: {e}")))?;

        let mut points = distribution
            .sample_iter(&mut self.rng)
            .map(|n| n * SAMPLE_MULTIPLIER)
            .filter(|n| *n > SAMPLE_FLOOR_MICROS && *n < SAMPLE_CEILING_MICROS)
            .take(count)
            .collect::<Vec<_>>();

        self.sketch.insert_many(&points);
        self.samples.append(&mut points);
        Ok(())
    }

    /// Rebuilds the sketch under a new bin limit from every sample seen so far.
    pub fn set_bin_limit(&mut self, bin_limit: u16) {
        let mut sketch = DDSketch::with_config(SketchConfig::with_bin_limit(bin_limit));
        sketch.insert_many(&self.samples);
        self.sketch = sketch;
    }

    pub fn input_stats(&self) -> InputStats {
        InputStats {
            value_count: self.samples.len(),
            in_memory_size: self.samples.len() * mem::size_of::<f64>(),
        }
    }

    pub fn output_stats(&self) -> OutputStats {
        let quantile = |q| self.sketch.quantile(q).unwrap_or_default() / MICROS_PER_SECOND;
        OutputStats {
            bin_count: self.sketch.bin_count(),
            in_memory_size: self.sketch.bin_count() * mem::size_of::<Bin>()
                + mem::size_of::<DDSketch>(),
            p50: quantile(0.50),
            p90: quantile(0.90),
            p99: quantile(0.99),
        }
    }

    /// Groups the raw samples into `bin_count` equal-width buckets.
    pub fn input_histogram(&self, bin_count: u32) -> Vec<HistogramBar> {
        let (Some(min), Some(max)) = (self.sketch.min(), self.sketch.max()) else {
            return Vec::new();
        };
        if bin_count == 0 {
            return Vec::new();
        }

        let span = max - min;
        let bin_width = if span > 0.0 { span / f64::from(bin_count) } else { 1.0 };

        let mut grouped = BTreeMap::<i64, u32>::new();
        for v in &self.samples {
            let key = (v / bin_width).floor() as i64;
            *grouped.entry(key).or_insert(0) += 1;
        }

        grouped
            .into_iter()
            .map(|(key, count)| HistogramBar {
                start: key as f64 * bin_width / MICROS_PER_SECOND,
                end: (key + 1) as f64 * bin_width / MICROS_PER_SECOND,
                count: f64::from(count),
            })
            .collect()
    }

    /// One bar per sketch key; split overflow bins with the same key are merged back.
    pub fn output_histogram(&self) -> Vec<HistogramBar> {
        let config = self.sketch.config();
        let grouped = self.sketch.bins().iter().fold(BTreeMap::<i16, u64>::new(), |mut map, bin| {
            *map.entry(bin.key()).or_insert(0) += u64::from(bin.count());
            map
        });

        grouped
            .into_iter()
            .map(|(key, count)| HistogramBar {
                start: config.bin_lower_bound(key) / MICROS_PER_SECOND,
                end: config.bin_upper_bound(key) / MICROS_PER_SECOND,
                count: count as f64,
            })
            .collect()
    }
}
