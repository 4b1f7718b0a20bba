//! Glyph styling for individual wind samples.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::Serialize;
use wind_common::WindResult;

use crate::classify::{SpeedBucket, SpeedClassifier};

/// What the renderer needs to draw one wind glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleDescriptor {
    /// Knot bucket selecting the glyph
    pub bucket: SpeedBucket,
    /// Glyph rotation in radians, unbounded
    pub rotation: f64,
}

/// Screen rotation of a glyph for a wind vector.
///
/// 0 is the glyph's intrinsic "up". The view rotation is added so glyphs
/// stay earth-relative when the map is rotated. The angle is not wrapped;
/// consumers treat it as periodic.
pub fn glyph_rotation(u: f64, v: f64, view_rotation: f64) -> f64 {
    PI - v.atan2(u) + FRAC_PI_2 + view_rotation
}

/// Computes style descriptors from wind components.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureStylist {
    classifier: SpeedClassifier,
}

impl FeatureStylist {
    pub fn new(classifier: SpeedClassifier) -> Self {
        Self { classifier }
    }

    pub fn style(&self, u: f64, v: f64, view_rotation: f64) -> WindResult<StyleDescriptor> {
        let speed = (u * u + v * v).sqrt();
        Ok(StyleDescriptor {
            bucket: self.classifier.classify(speed)?,
            rotation: glyph_rotation(u, v, view_rotation),
        })
    }
}
