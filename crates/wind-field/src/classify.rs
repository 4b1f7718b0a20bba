//! Wind speed classification into knot buckets.
//!
//! Buckets are labelled by their lower bound in knots. With the default
//! thresholds the ladder is `[0,2) -> "0"`, `[2,5) -> "2"`, `[5,10) -> "5"`,
//! then 5-knot steps up to `[185,190) -> "185"` and `[190,inf) -> "190"`.
//! Labels double as keys into the pre-rendered glyph set.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use wind_common::{WindError, WindResult};

/// Meters per second to knots.
pub const KNOTS_PER_MPS: f64 = 1.94384;

/// A knot bucket, identified by its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeedBucket {
    lower_knots: u32,
}

impl SpeedBucket {
    pub fn lower_knots(&self) -> u32 {
        self.lower_knots
    }

    /// Glyph lookup key, e.g. `"15"`.
    pub fn label(&self) -> String {
        self.lower_knots.to_string()
    }
}

impl fmt::Display for SpeedBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lower_knots)
    }
}

impl Serialize for SpeedBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Bucket boundaries in knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketThresholds {
    /// Upper bound of the calm bucket
    pub lowest: u32,
    /// Width of every regular bucket
    pub step: u32,
    /// Lower bound of the open-ended top bucket
    pub ceiling: u32,
}

impl Default for BucketThresholds {
    fn default() -> Self {
        Self {
            lowest: 2,
            step: 5,
            ceiling: 190,
        }
    }
}

impl BucketThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.step == 0 {
            return Err("bucket step must be > 0".to_string());
        }
        if self.lowest == 0 || self.lowest >= self.step {
            return Err(format!(
                "lowest bucket bound must be in (0, {}), got {}",
                self.step, self.lowest
            ));
        }
        if self.ceiling < self.step || self.ceiling % self.step != 0 {
            return Err(format!(
                "bucket ceiling must be a positive multiple of {}, got {}",
                self.step, self.ceiling
            ));
        }
        Ok(())
    }
}

/// Maps speeds onto knot buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedClassifier {
    knots_per_mps: f64,
    thresholds: BucketThresholds,
}

impl Default for SpeedClassifier {
    fn default() -> Self {
        Self::new(KNOTS_PER_MPS, BucketThresholds::default())
    }
}

impl SpeedClassifier {
    pub fn new(knots_per_mps: f64, thresholds: BucketThresholds) -> Self {
        Self {
            knots_per_mps,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> BucketThresholds {
        self.thresholds
    }

    /// Classify a speed in m/s.
    pub fn classify(&self, speed_mps: f64) -> WindResult<SpeedBucket> {
        check_magnitude(speed_mps)?;
        self.classify_knots(speed_mps * self.knots_per_mps)
    }

    /// Classify a speed already expressed in knots.
    pub fn classify_knots(&self, knots: f64) -> WindResult<SpeedBucket> {
        check_magnitude(knots)?;
        let t = &self.thresholds;

        let lower_knots = if knots < t.lowest as f64 {
            0
        } else if knots >= t.ceiling as f64 {
            t.ceiling
        } else {
            // The [lowest, step) bucket floors to 0 and is lifted to `lowest`
            let stepped = (knots / t.step as f64).floor() as u32 * t.step;
            stepped.max(t.lowest)
        };

        Ok(SpeedBucket { lower_knots })
    }

    /// Every bucket in ascending order.
    pub fn buckets(&self) -> Vec<SpeedBucket> {
        let t = &self.thresholds;
        let mut buckets = vec![
            SpeedBucket { lower_knots: 0 },
            SpeedBucket {
                lower_knots: t.lowest,
            },
        ];
        buckets.extend(
            (t.step..=t.ceiling)
                .step_by(t.step as usize)
                .map(|lower_knots| SpeedBucket { lower_knots }),
        );
        buckets
    }
}

fn check_magnitude(value: f64) -> WindResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(WindError::InvalidSpeed(value));
    }
    Ok(())
}
