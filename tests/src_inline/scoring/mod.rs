use super::*;

fn bundle(ratings: &[f64], texts: &[&str], hours: u32, jobs: u32) -> SignalBundle {
    SignalBundle::new(
        ratings.to_vec(),
        texts.iter().map(|t| t.to_string()).collect(),
        hours,
        jobs,
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn in_range(r: &ScoreResult) -> bool {
    [r.lbh, r.sentiment_score, r.consistency_score, r.stability_score]
        .iter()
        .all(|v| v.is_finite() && (0.0..=100.0).contains(v))
}

#[test]
fn test_empty_bundle_is_neutral() {
    let out = score(&SignalBundle::default());
    assert_close(out.sentiment_score, 50.0);
    assert_close(out.consistency_score, 100.0);
    assert_close(out.stability_score, 100.0);
    assert_close(out.lbh, 75.0);
}

#[test]
fn test_golden_all_five_stars() {
    let out = score(&bundle(&[5.0, 5.0, 5.0, 5.0, 5.0], &[], 0, 0));
    assert_close(out.sentiment_score, 85.0);
    assert_close(out.consistency_score, 100.0);
    assert_close(out.stability_score, 100.0);
    assert_close(out.lbh, 92.5);
}

#[test]
fn test_all_one_star_floor() {
    let out = score(&bundle(&[1.0, 1.0, 1.0], &[], 0, 0));
    assert_close(out.sentiment_score, 15.0);
}

#[test]
fn test_golden_mixed_sample() {
    let out = score(&bundle(
        &[5.0, 4.0, 4.0, 3.0, 5.0],
        &["Great food", "Slow service"],
        1,
        2,
    ));
    assert_close(out.sentiment_score, 71.0);
    assert_close(out.consistency_score, 90.0);
    assert_close(out.stability_score, 90.0);
    assert_close(out.lbh, 80.5);
}

#[test]
fn test_golden_high_churn_is_low() {
    let out = score(&bundle(&[], &[], 10, 20));
    assert_close(out.sentiment_score, 50.0);
    assert_close(out.consistency_score, 0.0);
    assert_close(out.stability_score, 0.0);
    assert_close(out.lbh, 25.0);
    assert!(out.lbh < 60.0);
}

#[test]
fn test_consistency_linear_floor() {
    let profile = ScoringProfile::default_v1();
    assert_close(operational_consistency(0, &profile), 100.0);
    assert_close(operational_consistency(5, &profile), 50.0);
    assert_close(operational_consistency(10, &profile), 0.0);
    assert_close(operational_consistency(250, &profile), 0.0);
}

#[test]
fn test_stability_linear_floor() {
    let profile = ScoringProfile::default_v1();
    assert_close(talent_stability(0, &profile), 100.0);
    assert_close(talent_stability(10, &profile), 50.0);
    assert_close(talent_stability(20, &profile), 0.0);
    assert_close(talent_stability(u32::MAX, &profile), 0.0);
}

#[test]
fn test_rating_normalization() {
    let profile = ScoringProfile::default_v1();
    assert_close(normalize_rating_avg(&[], &profile), 50.0);
    assert_close(normalize_rating_avg(&[3.0], &profile), 50.0);
    assert_close(normalize_rating_avg(&[1.0, 5.0, 5.0, 1.0], &profile), 50.0);
}

#[test]
fn test_text_only_still_defined() {
    let out = score(&bundle(&[], &["great and friendly and fast"], 0, 0));
    // rating 50, text (3 + 3) / 6 * 100 = 100
    assert_close(out.sentiment_score, 65.0);
}

#[test]
fn test_lbh_matches_weighted_components() {
    let cases = [
        bundle(&[4.0, 2.0, 5.0], &["cold and stale", "good"], 3, 7),
        bundle(&[2.5], &["amazing"], 9, 1),
        bundle(&[3.0, 3.0, 4.0], &["meh"], 0, 19),
    ];
    for case in &cases {
        let out = score(case);
        let weighted =
            out.sentiment_score * 0.5 + out.consistency_score * 0.25 + out.stability_score * 0.25;
        assert!((out.lbh - round2(weighted)).abs() <= 0.01 + 1e-9);
        assert!(in_range(&out));
    }
}

#[test]
fn test_outputs_have_two_decimals() {
    let out = score(&bundle(&[4.0, 4.0, 5.0], &["good", "bad", "ok"], 3, 7));
    for v in [
        out.lbh,
        out.sentiment_score,
        out.consistency_score,
        out.stability_score,
    ] {
        assert_close(round2(v), v);
    }
}

#[test]
fn test_malformed_ratings_are_clamped() {
    let clamped = score(&bundle(&[7.0, -2.0], &[], 0, 0));
    let reference = score(&bundle(&[5.0, 1.0], &[], 0, 0));
    assert_eq!(clamped, reference);

    let with_nan = score(&bundle(&[f64::NAN, 5.0, f64::INFINITY], &[], 0, 0));
    let only_valid = score(&bundle(&[5.0], &[], 0, 0));
    assert_eq!(with_nan, only_valid);
    assert!(in_range(&with_nan));
}

#[test]
fn test_round2_ties_away_from_zero() {
    assert_close(round2(12.5), 12.5);
    assert_close(round2(0.125), 0.13);
    assert_close(round2(99.994), 99.99);
    assert_close(round2(80.00000000000001), 80.0);
}

#[test]
fn test_determinism_bits() {
    let input = bundle(&[4.0, 3.0, 5.0], &["rude staff", "delicious"], 2, 3);
    let a = score(&input);
    let b = score(&input);
    assert_eq!(a.lbh.to_bits(), b.lbh.to_bits());
    assert_eq!(a.sentiment_score.to_bits(), b.sentiment_score.to_bits());
    assert_eq!(a.consistency_score.to_bits(), b.consistency_score.to_bits());
    assert_eq!(a.stability_score.to_bits(), b.stability_score.to_bits());
}

#[test]
fn test_degenerate_profile_stays_finite() {
    let input = bundle(&[4.0, 2.0, 5.0], &["great", "rude"], 3, 0);
    let profiles = [
        ScoringProfile {
            text_clamp: 0,
            ..ScoringProfile::default_v1()
        },
        ScoringProfile {
            rating_min: 3.0,
            rating_max: 3.0,
            ..ScoringProfile::default_v1()
        },
        ScoringProfile {
            rating_min: 5.0,
            rating_max: 1.0,
            ..ScoringProfile::default_v1()
        },
        ScoringProfile {
            hours_divisor: 0.0,
            jobs_divisor: f64::NAN,
            ..ScoringProfile::default_v1()
        },
    ];
    for profile in &profiles {
        let out = score_with(&input, profile);
        assert!(in_range(&out), "{profile:?} -> {out:?}");
    }
}

#[test]
fn test_empty_rating_scale_is_neutral() {
    let profile = ScoringProfile {
        rating_min: 3.0,
        rating_max: 3.0,
        ..ScoringProfile::default_v1()
    };
    assert_close(normalize_rating_avg(&[3.0, 3.0], &profile), 50.0);
}

#[test]
fn test_zero_divisor_penalizes_any_event() {
    let profile = ScoringProfile {
        hours_divisor: 0.0,
        ..ScoringProfile::default_v1()
    };
    assert_close(operational_consistency(0, &profile), 100.0);
    assert_close(operational_consistency(1, &profile), 0.0);
}
