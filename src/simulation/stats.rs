/// Summary statistics of one candidate's vote-share samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub percentile5: f64,
    pub percentile95: f64,
    pub std_dev: f64,
}

impl Summary {
    /// Sorts the samples first so every figure, including the mean, is
    /// independent of the order the samples were gathered in.
    pub fn from_samples(mut samples: Vec<f64>) -> Summary {
        samples.sort_by(|a, b| a.total_cmp(b));
        let mean = mean(&samples);

        Summary {
            mean,
            median: percentile(&samples, 50.0),
            percentile5: percentile(&samples, 5.0),
            percentile95: percentile(&samples, 95.0),
            std_dev: population_std_dev(&samples, mean),
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile `p` (0-100) of sorted values, interpolating linearly between the
/// two closest ranks at `(n - 1) * p / 100`. Same convention as NumPy's default.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (n - 1) as f64 * p.clamp(0.0, 100.0) / 100.0;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;
            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}

/// `count` as a percentage of `total`.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
