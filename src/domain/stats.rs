use serde::Serialize;

/// What storing every raw sample costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputStats {
    pub value_count: usize,
    pub in_memory_size: usize,
}

/// What the sketch costs, and what it estimates. Percentiles are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputStats {
    pub bin_count: usize,
    pub in_memory_size: usize,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

impl InputStats {
    pub fn summary(&self) -> String {
        format!("Value count: {}, in-memory size: {}", self.value_count, self.in_memory_size)
    }
}

impl OutputStats {
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Bin count: {}, in-memory size: {}", self.bin_count, self.in_memory_size),
            format!("P50: {:.4}, P90: {:.4}, P99: {:.4}", self.p50, self.p90, self.p99),
        ]
    }

    /// Panel markup, one line per summary entry.
    pub fn to_markup(&self) -> String {
        self.summary_lines().join("<br>")
    }
}
