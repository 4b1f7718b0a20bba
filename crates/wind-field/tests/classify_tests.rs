//! Tests for knot bucket classification.

use wind_common::WindError;
use wind_field::{BucketThresholds, SpeedClassifier};

/// The bucket ladder written out as explicit half-open ranges.
fn literal_ladder(knots: f64) -> &'static str {
    const LADDER: &[(f64, f64, &str)] = &[
        (0.0, 2.0, "0"),
        (2.0, 5.0, "2"),
        (5.0, 10.0, "5"),
        (10.0, 15.0, "10"),
        (15.0, 20.0, "15"),
        (20.0, 25.0, "20"),
        (25.0, 30.0, "25"),
        (30.0, 35.0, "30"),
        (35.0, 40.0, "35"),
        (40.0, 45.0, "40"),
        (45.0, 50.0, "45"),
        (50.0, 55.0, "50"),
        (55.0, 60.0, "55"),
        (60.0, 65.0, "60"),
        (65.0, 70.0, "65"),
        (70.0, 75.0, "70"),
        (75.0, 80.0, "75"),
        (80.0, 85.0, "80"),
        (85.0, 90.0, "85"),
        (90.0, 95.0, "90"),
        (95.0, 100.0, "95"),
        (100.0, 105.0, "100"),
        (105.0, 110.0, "105"),
        (110.0, 115.0, "110"),
        (115.0, 120.0, "115"),
        (120.0, 125.0, "120"),
        (125.0, 130.0, "125"),
        (130.0, 135.0, "130"),
        (135.0, 140.0, "135"),
        (140.0, 145.0, "140"),
        (145.0, 150.0, "145"),
        (150.0, 155.0, "150"),
        (155.0, 160.0, "155"),
        (160.0, 165.0, "160"),
        (165.0, 170.0, "165"),
        (170.0, 175.0, "170"),
        (175.0, 180.0, "175"),
        (180.0, 185.0, "180"),
        (185.0, 190.0, "185"),
    ];

    for (min, max, label) in LADDER {
        if knots >= *min && knots < *max {
            return label;
        }
    }
    "190"
}

fn label(classifier: &SpeedClassifier, knots: f64) -> String {
    classifier.classify_knots(knots).unwrap().label()
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_documented_boundaries() {
    let c = SpeedClassifier::default();
    assert_eq!(label(&c, 0.0), "0");
    assert_eq!(label(&c, 1.9999), "0");
    assert_eq!(label(&c, 2.0), "2");
    assert_eq!(label(&c, 4.9999), "2");
    assert_eq!(label(&c, 5.0), "5");
    assert_eq!(label(&c, 9.9999), "5");
    assert_eq!(label(&c, 10.0), "10");
    assert_eq!(label(&c, 189.999), "185");
    assert_eq!(label(&c, 190.0), "190");
    assert_eq!(label(&c, 1000.0), "190");
    assert_eq!(label(&c, f64::INFINITY), "190");
}

#[test]
fn test_matches_literal_ladder_at_every_boundary() {
    let c = SpeedClassifier::default();
    let mut boundaries = vec![2.0];
    boundaries.extend((1..=38).map(|i| i as f64 * 5.0));

    for b in boundaries {
        for knots in [b - 1e-9, b, b + 1e-9, b + 2.5] {
            assert_eq!(
                label(&c, knots),
                literal_ladder(knots),
                "mismatch at {} knots",
                knots
            );
        }
    }
}

#[test]
fn test_matches_literal_ladder_on_sweep() {
    let c = SpeedClassifier::default();
    for i in 0..=25_000 {
        let knots = i as f64 * 0.01;
        assert_eq!(label(&c, knots), literal_ladder(knots), "at {} knots", knots);
    }
}

// ============================================================================
// Meters per second input
// ============================================================================

#[test]
fn test_classify_meters_per_second() {
    let c = SpeedClassifier::default();
    // 1 m/s = 1.94 kn
    assert_eq!(c.classify(1.0).unwrap().label(), "0");
    // 2 m/s = 3.89 kn
    assert_eq!(c.classify(2.0).unwrap().label(), "2");
    // 10 m/s = 19.44 kn
    assert_eq!(c.classify(10.0).unwrap().label(), "15");
    // 50 m/s = 97.19 kn
    assert_eq!(c.classify(50.0).unwrap().label(), "95");
    // 100 m/s = 194.38 kn
    assert_eq!(c.classify(100.0).unwrap().label(), "190");
}

#[test]
fn test_negative_and_nan_are_range_errors() {
    let c = SpeedClassifier::default();
    assert_eq!(c.classify(-0.1), Err(WindError::InvalidSpeed(-0.1)));
    assert!(c.classify(f64::NAN).unwrap_err().is_range_error());
    assert!(c.classify_knots(-5.0).is_err());
}

// ============================================================================
// Bucket set
// ============================================================================

#[test]
fn test_bucket_labels() {
    let c = SpeedClassifier::default();
    let labels: Vec<String> = c.buckets().iter().map(|b| b.label()).collect();
    assert_eq!(labels.len(), 40);
    assert_eq!(&labels[..4], &["0", "2", "5", "10"]);
    assert_eq!(labels.last().map(String::as_str), Some("190"));

    let buckets = c.buckets();
    assert!(buckets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_every_speed_lands_in_a_listed_bucket() {
    let c = SpeedClassifier::default();
    let buckets = c.buckets();
    for i in 0..=1000 {
        let bucket = c.classify(i as f64 * 0.1).unwrap();
        assert_eq!(buckets.iter().filter(|b| **b == bucket).count(), 1);
    }
}

#[test]
fn test_custom_thresholds() {
    let thresholds = BucketThresholds {
        lowest: 1,
        step: 10,
        ceiling: 50,
    };
    assert!(thresholds.validate().is_ok());

    let c = SpeedClassifier::new(1.0, thresholds);
    assert_eq!(label(&c, 0.5), "0");
    assert_eq!(label(&c, 1.0), "1");
    assert_eq!(label(&c, 9.9), "1");
    assert_eq!(label(&c, 10.0), "10");
    assert_eq!(label(&c, 49.0), "40");
    assert_eq!(label(&c, 50.0), "50");
    assert_eq!(c.buckets().len(), 7);
}

#[test]
fn test_threshold_validation() {
    assert!(BucketThresholds::default().validate().is_ok());

    let bad_step = BucketThresholds {
        step: 0,
        ..Default::default()
    };
    assert!(bad_step.validate().is_err());

    let bad_lowest = BucketThresholds {
        lowest: 5,
        ..Default::default()
    };
    assert!(bad_lowest.validate().is_err());

    let bad_ceiling = BucketThresholds {
        ceiling: 192,
        ..Default::default()
    };
    assert!(bad_ceiling.validate().is_err());
}

#[test]
fn test_bucket_serializes_as_label() {
    let bucket = SpeedClassifier::default().classify_knots(17.0).unwrap();
    assert_eq!(serde_json::to_string(&bucket).unwrap(), "\"15\"");
    assert_eq!(bucket.to_string(), "15");
    assert_eq!(bucket.lower_knots(), 15);
}
