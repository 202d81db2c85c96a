use std::fmt::Display;

/// Running summary of unsigned error samples (ULP distances).
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
}

impl Stats {
    pub fn new_single(value: u64) -> Self {
        Stats {
            count: 1,
            min: value,
            max: value,
            mean: value as f64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn add_sample(&mut self, value: u64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.mean += (value as f64 - self.mean) / (self.count as f64);
    }

    pub fn merge(&self, other: &Self) -> Self {
        let count = self.count + other.count;
        Stats {
            count,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            mean: if count > 0 {
                (self.mean * self.count as f64 + other.mean * other.count as f64) / count as f64
            } else {
                0.0
            },
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            count: 0,
            min: u64::MAX,
            max: 0,
            mean: 0.0,
        }
    }
}

impl FromIterator<u64> for Stats {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut stats = Stats::default();
        for value in iter {
            stats.add_sample(value);
        }
        stats
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no samples");
        }
        write!(
            f,
            "{} - {} ulp; mean {:.2}; {} samples",
            self.min, self.max, self.mean, self.count
        )
    }
}
