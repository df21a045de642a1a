use splash_core::Easing;

#[test]
fn every_easing_hits_exact_endpoints() {
    for e in Easing::ALL {
        assert_eq!(e.apply(0.0), 0.0, "{e:?} at 0");
        assert_eq!(e.apply(1.0), 1.0, "{e:?} at 1");
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for e in Easing::ALL {
        assert_eq!(e.apply(-0.5), 0.0, "{e:?} below 0");
        assert_eq!(e.apply(1.5), 1.0, "{e:?} above 1");
        assert_eq!(e.apply(f32::NAN), 0.0, "{e:?} on NaN");
    }
}

#[test]
fn linear_is_identity_inside_the_range() {
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!((Easing::Linear.apply(t) - t).abs() < 1e-6);
    }
}

#[test]
fn monotonic_curves_do_not_decrease() {
    let monotonic = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::OutExpo,
        Easing::InOutExpo,
    ];
    for e in monotonic {
        let mut prev = e.apply(0.0);
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v + 1e-6 >= prev, "{e:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn out_back_overshoots_before_settling() {
    let peak = (1..100)
        .map(|i| Easing::OutBack.apply(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0, "expected overshoot, peak {peak}");
}
