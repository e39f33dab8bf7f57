//! Agent-specific DDSketch with a configurable bin limit.

use std::{cmp::Ordering, mem};

use smallvec::SmallVec;

use super::bin::{Bin, MAX_BIN_WIDTH};
use super::config::SketchConfig;

/// [DDSketch][ddsketch] in the layout used by the Datadog Agent.
///
/// Bins are kept sorted by key. Once the number of bins reaches the configured limit, the lowest bins are folded
/// into their neighbour, trading accuracy at the low end of the distribution for a fixed memory budget.
///
/// [ddsketch]: https://www.vldb.org/pvldb/vol12/p2195-masson.pdf
#[derive(Clone, Debug)]
pub struct DDSketch {
    config: SketchConfig,

    /// The bins within the sketch.
    bins: SmallVec<[Bin; 4]>,

    /// The number of observations within the sketch.
    count: u64,

    min: f64,
    max: f64,
}

impl DDSketch {
    pub fn with_config(config: SketchConfig) -> Self {
        Self {
            config,
            bins: SmallVec::new(),
            count: 0,
            min: f64::MAX,
            max: f64::MIN,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Returns the number of bins in the sketch.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of samples currently represented by this sketch.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Minimum value seen by this sketch, `None` if empty.
    pub fn min(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Maximum value seen by this sketch, `None` if empty.
    pub fn max(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.max)
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    fn adjust_basic_stats(&mut self, v: f64) {
        if v < self.min {
            self.min = v;
        }

        if v > self.max {
            self.max = v;
        }

        self.count += 1;
    }

    /// Inserts a single value.
    pub fn insert(&mut self, v: f64) {
        self.adjust_basic_stats(v);

        let key = self.config.key(v);
        let mut insert_at = None;

        for (idx, bin) in self.bins.iter_mut().enumerate() {
            if bin.k == key {
                if bin.n < MAX_BIN_WIDTH {
                    bin.n += 1;
                    return;
                }
                insert_at = Some(idx);
                break;
            }
            if bin.k > key {
                insert_at = Some(idx);
                break;
            }
        }

        match insert_at {
            Some(idx) => self.bins.insert(idx, Bin { k: key, n: 1 }),
            None => self.bins.push(Bin { k: key, n: 1 }),
        }
        trim_left(&mut self.bins, self.config.bin_limit());
    }

    /// Inserts many values with a single merge pass over the bins.
    pub fn insert_many(&mut self, vs: &[f64]) {
        let mut keys = Vec::with_capacity(vs.len());
        for v in vs {
            self.adjust_basic_stats(*v);
            keys.push(self.config.key(*v));
        }
        self.insert_keys(keys);
    }

    fn insert_keys(&mut self, mut keys: Vec<i16>) {
        keys.sort_unstable();

        let mut merged = SmallVec::<[Bin; 4]>::new();
        let mut bins_idx = 0;
        let mut key_idx = 0;

        while bins_idx < self.bins.len() && key_idx < keys.len() {
            let bin = self.bins[bins_idx];
            let vk = keys[key_idx];

            match bin.k.cmp(&vk) {
                Ordering::Greater => {
                    let kn = count_leading_equal(&keys, key_idx);
                    generate_bins(&mut merged, vk, kn);
                    key_idx += kn as usize;
                }
                Ordering::Less => {
                    merged.push(bin);
                    bins_idx += 1;
                }
                Ordering::Equal => {
                    let kn = count_leading_equal(&keys, key_idx);
                    generate_bins(&mut merged, bin.k, u64::from(bin.n) + kn);
                    bins_idx += 1;
                    key_idx += kn as usize;
                }
            }
        }

        merged.extend_from_slice(&self.bins[bins_idx..]);

        while key_idx < keys.len() {
            let vk = keys[key_idx];
            let kn = count_leading_equal(&keys, key_idx);
            generate_bins(&mut merged, vk, kn);
            key_idx += kn as usize;
        }

        trim_left(&mut merged, self.config.bin_limit());
        self.bins = merged;
    }

    /// Estimates the value at quantile `q`, `None` if the sketch is empty.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        if self.count == 0 {
            return None;
        }

        if q <= 0.0 {
            return Some(self.min);
        }

        if q >= 1.0 {
            return Some(self.max);
        }

        let mut n = 0.0;
        let mut estimated = None;
        let wanted_rank = rank(self.count, q);
        let last = self.bins.len() - 1;

        for (i, bin) in self.bins.iter().enumerate() {
            n += f64::from(bin.n);
            if n <= wanted_rank {
                continue;
            }

            let weight = (n - wanted_rank) / f64::from(bin.n);
            let mut v_low = self.config.bin_lower_bound(bin.k);
            let mut v_high = v_low * self.config.gamma();

            if i == last {
                v_high = self.max;
            }
            if i == 0 {
                v_low = self.min;
            }

            estimated = Some(v_low * weight + v_high * (1.0 - weight));
            break;
        }

        estimated.map(|v| v.clamp(self.min, self.max)).or(Some(f64::NAN))
    }
}

impl Default for DDSketch {
    fn default() -> Self {
        Self::with_config(SketchConfig::default())
    }
}

fn rank(count: u64, q: f64) -> f64 {
    let rank = q * (count - 1) as f64;
    rank.round_ties_even()
}

fn count_leading_equal(keys: &[i16], start_idx: usize) -> u64 {
    let first = keys[start_idx];
    keys[start_idx..].iter().take_while(|k| **k == first).count() as u64
}

/// Folds the lowest bins into their successor until at most `bin_limit` regular bins remain.
fn trim_left(bins: &mut SmallVec<[Bin; 4]>, bin_limit: u16) {
    let bin_limit = usize::from(bin_limit);
    if bin_limit == 0 || bins.len() <= bin_limit {
        return;
    }

    let num_to_remove = bins.len() - bin_limit;
    let mut missing = 0;
    let mut overflow = SmallVec::<[Bin; 4]>::new();

    for bin in bins.iter().take(num_to_remove) {
        missing += u64::from(bin.n);

        if missing > u64::from(MAX_BIN_WIDTH) {
            overflow.push(Bin { k: bin.k, n: MAX_BIN_WIDTH });
            missing -= u64::from(MAX_BIN_WIDTH);
        }
    }

    let receiver = &mut bins[num_to_remove];
    missing = receiver.increment(missing);
    if missing > 0 {
        generate_bins(&mut overflow, receiver.k, missing);
    }

    let overflow_len = overflow.len();
    overflow.extend_from_slice(&bins[num_to_remove..]);
    overflow.truncate(bin_limit + overflow_len);

    mem::swap(bins, &mut overflow);
}

fn generate_bins(bins: &mut SmallVec<[Bin; 4]>, k: i16, n: u64) {
    if n < u64::from(MAX_BIN_WIDTH) {
        bins.push(Bin { k, n: n as u16 });
        return;
    }

    let remainder = n % u64::from(MAX_BIN_WIDTH);
    if remainder != 0 {
        bins.push(Bin { k, n: remainder as u16 });
    }

    for _ in 0..(n / u64::from(MAX_BIN_WIDTH)) {
        bins.push(Bin { k, n: MAX_BIN_WIDTH });
    }
}
