//! Runtime-configurable agent sketch parameters.

/// Bin limit used by the Datadog Agent.
pub const DEFAULT_BIN_LIMIT: u16 = 4096;

const RELATIVE_ACCURACY: f64 = 1.0 / 128.0;
const MIN_INDEXABLE_VALUE: f64 = 1.0e-9;
const MAX_KEY: i16 = i16::MAX;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SketchConfig {
    // Maximum number of bins per sketch.
    bin_limit: u16,

    // gamma_ln is the natural log of gamma_v, used to speed up calculating log base gamma.
    gamma_v: f64,
    gamma_ln: f64,

    // Smallest magnitude that maps to a non-zero key.
    norm_min: f64,

    // Bias of the exponent, used to ensure key(x) >= 1.
    norm_bias: i32,
}

impl SketchConfig {
    pub fn with_bin_limit(bin_limit: u16) -> Self {
        let two_rel_accuracy = RELATIVE_ACCURACY * 2.0;
        let gamma_v = 1.0 + two_rel_accuracy;
        let gamma_ln = two_rel_accuracy.ln_1p();

        // ln(1e-9) / ln(1 + 1/64) is about -1337, well within i32.
        let norm_eff_min = (MIN_INDEXABLE_VALUE.ln() / gamma_ln).floor() as i32;
        let norm_bias = -norm_eff_min + 1;
        let norm_min = gamma_v.powf(f64::from(1 - norm_bias));

        Self { bin_limit, gamma_v, gamma_ln, norm_min, norm_bias }
    }

    pub fn bin_limit(&self) -> u16 {
        self.bin_limit
    }

    pub fn gamma(&self) -> f64 {
        self.gamma_v
    }

    /// Lower value bound of the bin at key `k`.
    pub fn bin_lower_bound(&self, k: i16) -> f64 {
        if k < 0 {
            return -self.bin_lower_bound(-k);
        }

        if k == MAX_KEY {
            return f64::INFINITY;
        }

        if k == 0 {
            return 0.0;
        }

        self.gamma_v.powf(f64::from(i32::from(k) - self.norm_bias))
    }

    /// Upper value bound of the bin at key `k`, which is the lower bound of the next key.
    pub fn bin_upper_bound(&self, k: i16) -> f64 {
        if k == MAX_KEY {
            return f64::INFINITY;
        }
        self.bin_lower_bound(k + 1)
    }

    /// Key of the bin that represents `v`: γ^k <= v < γ^(k+1), offset by the bias.
    pub fn key(&self, v: f64) -> i16 {
        if v < 0.0 {
            return -self.key(-v);
        }

        if v == 0.0 || v < self.norm_min {
            return 0;
        }

        let rounded = self.log_gamma(v).round_ties_even() as i32;
        let key = rounded.wrapping_add(self.norm_bias);

        key.clamp(1, i32::from(MAX_KEY)) as i16
    }

    fn log_gamma(&self, v: f64) -> f64 {
        v.ln() / self.gamma_ln
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::with_bin_limit(DEFAULT_BIN_LIMIT)
    }
}
