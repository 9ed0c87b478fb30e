use super::*;
use crate::foundation::core::Point;
use std::f64::consts::PI;

fn policy() -> JitterPolicy {
    JitterPolicy {
        max_shift: 0.75,
        scale_range: (0.9, 1.3),
        max_rotation: PI / 12.0,
    }
}

#[test]
fn samples_stay_within_policy() {
    let p = policy();
    let mut rng = Rng64::new(42);
    for _ in 0..500 {
        let j = p.sample(&mut rng);
        assert!((0.0..0.75).contains(&j.shift.x));
        assert!((0.0..0.75).contains(&j.shift.y));
        assert!((0.9..1.3).contains(&j.scale));
        assert!(j.rotation.abs() <= PI / 12.0);
    }
}

#[test]
fn same_seed_reproduces_bit_for_bit() {
    let p = policy();
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    for _ in 0..12 {
        let (ja, jb) = (p.sample(&mut a), p.sample(&mut b));
        assert_eq!(ja.shift.x.to_bits(), jb.shift.x.to_bits());
        assert_eq!(ja.shift.y.to_bits(), jb.shift.y.to_bits());
        assert_eq!(ja.scale.to_bits(), jb.scale.to_bits());
        assert_eq!(ja.rotation.to_bits(), jb.rotation.to_bits());
    }
}

#[test]
fn apply_composes_with_existing_pose() {
    let mut pose = Pose::at(Point::new(1.0, 1.0));
    pose.scale = 2.0;
    Jitter {
        shift: Vec2::new(0.5, 0.25),
        scale: 1.1,
        rotation: 0.1,
    }
    .apply(&mut pose);
    assert_eq!(pose.position, Point::new(1.5, 1.25));
    assert!((pose.scale - 2.2).abs() < 1e-12);
    assert!((pose.rotation - 0.1).abs() < 1e-12);
}

#[test]
fn invalid_policies_are_rejected() {
    let mut p = policy();
    p.scale_range = (1.3, 0.9);
    assert!(p.validate().is_err());
    let mut p = policy();
    p.max_shift = -1.0;
    assert!(p.validate().is_err());
    assert!(policy().validate().is_ok());
}
