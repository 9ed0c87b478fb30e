use super::*;

#[test]
fn endpoints_are_fixed() {
    for f in [RateFunc::Linear, RateFunc::Smooth, RateFunc::RushFrom] {
        assert_eq!(f.apply(0.0), 0.0);
        assert!((f.apply(1.0) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn there_and_back_peaks_in_the_middle() {
    let f = RateFunc::ThereAndBack;
    assert!((f.apply(0.5) - 1.0).abs() < 1e-12);
    assert!(f.end_value().abs() < 1e-12);
    assert!(f.apply(0.25) > 0.0 && f.apply(0.25) < 1.0);
}

#[test]
fn input_is_clamped() {
    assert_eq!(RateFunc::Linear.apply(-1.0), 0.0);
    assert_eq!(RateFunc::Linear.apply(2.0), 1.0);
}

#[test]
fn smooth_is_monotonic() {
    let mut last = 0.0;
    for i in 0..=100 {
        let v = RateFunc::Smooth.apply(f64::from(i) / 100.0);
        assert!(v >= last);
        last = v;
    }
}
