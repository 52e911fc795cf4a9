use super::*;

#[test]
fn thresholds_are_inclusive_for_extremes() {
    assert_eq!(classify(3.0), AspectClass::Wide);
    assert_eq!(classify(10.0), AspectClass::Wide);
    assert_eq!(classify(1.0 / 3.0), AspectClass::Tall);
    assert_eq!(classify(0.2), AspectClass::Tall);
}

#[test]
fn mid_range_ratios_split_at_one() {
    assert_eq!(classify(2.99), AspectClass::Landscape);
    assert_eq!(classify(1.5), AspectClass::Landscape);
    assert_eq!(classify(1.0), AspectClass::Square);
    assert_eq!(classify(0.75), AspectClass::Portrait);
    assert_eq!(classify(0.34), AspectClass::Portrait);
}

#[test]
fn invalid_ratio_classifies_as_landscape() {
    assert_eq!(classify(0.0), AspectClass::Landscape);
    assert_eq!(classify(f64::NAN), AspectClass::Landscape);
    assert_eq!(classify(-2.0), AspectClass::Landscape);
}

#[test]
fn invalid_photo_dimensions_fall_back_to_square() {
    let m = PhotoMetrics::from_photo(&Photo::new(0, "x.jpg", 0, 300));
    assert_eq!(m.aspect_ratio, 1.0);
    assert_eq!(m.class, AspectClass::Square);

    let m = PhotoMetrics::from_photo(&Photo::new(0, "y.jpg", 1000, 500));
    assert_eq!(m.aspect_ratio, 2.0);
    assert_eq!(m.class, AspectClass::Landscape);
}

#[test]
fn extremes_ignore_group_size() {
    let p = MinHeightPolicy::default();
    for n in [1, 5, 9] {
        assert_eq!(p.min_height(AspectClass::Wide, n), p.wide);
        assert_eq!(p.min_height(AspectClass::Tall, n), p.tall);
    }
}

#[test]
fn landscape_and_portrait_use_group_tiers() {
    let p = MinHeightPolicy::default();
    assert_eq!(p.min_height(AspectClass::Landscape, 4), p.landscape.small);
    assert_eq!(p.min_height(AspectClass::Landscape, 5), p.landscape.medium);
    assert_eq!(p.min_height(AspectClass::Landscape, 7), p.landscape.medium);
    assert_eq!(p.min_height(AspectClass::Landscape, 8), p.landscape.large);
    assert_eq!(p.min_height(AspectClass::Portrait, 2), p.portrait.small);
    assert_eq!(p.min_height(AspectClass::Portrait, 6), p.portrait.medium);
    assert_eq!(p.min_height(AspectClass::Portrait, 9), p.portrait.large);
    assert!(p.landscape.medium > p.landscape.small);
    assert!(p.landscape.large < p.landscape.small);
}

#[test]
fn square_uses_landscape_tiers() {
    let p = MinHeightPolicy::default();
    assert_eq!(
        p.min_height(AspectClass::Square, 6),
        p.min_height(AspectClass::Landscape, 6)
    );
}
