use super::*;
use proptest::prelude::*;

fn m(ratios: &[f64]) -> Vec<PhotoMetrics> {
    ratios.iter().map(|&r| PhotoMetrics::new(r)).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn single_fills_available_width() {
    let l = solve(TemplateKind::Single, &m(&[2.0]), 1080.0, 10.0).unwrap();
    assert_eq!(l.positions, vec![Point::new(0.0, 0.0)]);
    assert_eq!(l.sizes, vec![Size::new(1080.0, 540.0)]);
    assert_eq!((l.width, l.height), (1080.0, 540.0));
}

#[test]
fn side_by_side_pair_shares_row_height() {
    let l = solve(TemplateKind::PairSideBySide, &m(&[1.5, 1.5]), 1080.0, 10.0).unwrap();
    assert!(close(l.sizes[0].height, 1070.0 / 3.0));
    assert!(close(l.sizes[0].width, 535.0));
    assert!(close(l.positions[1].x, 545.0));
    assert!(close(l.sizes[0].width + l.sizes[1].width + 10.0, 1080.0));
}

#[test]
fn stacked_pair_puts_each_photo_at_full_width() {
    let l = solve(TemplateKind::PairStacked, &m(&[4.0, 0.2]), 1000.0, 10.0).unwrap();
    assert_eq!(l.sizes[0], Size::new(1000.0, 250.0));
    assert_eq!(l.sizes[1], Size::new(1000.0, 5000.0));
    assert_eq!(l.positions[1], Point::new(0.0, 260.0));
    assert_eq!(l.height, 5260.0);
}

#[test]
fn one_top_two_bottom_stacks_rows() {
    let l = solve(TemplateKind::Rows(&[1, 2]), &m(&[1.5, 1.5, 1.5]), 1080.0, 10.0).unwrap();
    assert!(close(l.sizes[0].height, 720.0));
    assert!(close(l.positions[1].y, 730.0));
    assert!(close(l.positions[2].y, 730.0));
    assert!(close(l.height, 730.0 + 1070.0 / 3.0));
}

#[test]
fn large_left_matches_stacked_column_height() {
    let kind = TemplateKind::LargeSide {
        side: Side::Left,
        stacked: 2,
    };
    let l = solve(kind, &m(&[1.0, 1.0, 1.0]), 1080.0, 10.0).unwrap();
    let column_w = 1060.0 / 3.0;
    assert!(close(l.sizes[1].width, column_w));
    assert!(close(l.sizes[2].width, column_w));
    assert!(close(l.sizes[0].height, 2.0 * column_w + 10.0));
    assert!(close(
        l.sizes[1].height + 10.0 + l.sizes[2].height,
        l.sizes[0].height
    ));
    assert!(close(l.width, 1080.0));
    assert!(close(l.positions[1].x, l.sizes[0].width + 10.0));
    assert!(close(l.positions[2].y, column_w + 10.0));
}

#[test]
fn large_right_mirrors_the_column() {
    let left = solve(
        TemplateKind::LargeSide {
            side: Side::Left,
            stacked: 3,
        },
        &m(&[0.8, 1.5, 1.2, 1.0]),
        1080.0,
        10.0,
    )
    .unwrap();
    let right = solve(
        TemplateKind::LargeSide {
            side: Side::Right,
            stacked: 3,
        },
        &m(&[0.8, 1.5, 1.2, 1.0]),
        1080.0,
        10.0,
    )
    .unwrap();
    assert_eq!(left.sizes, right.sizes);
    assert!(close(right.positions[0].x, right.sizes[1].width + 10.0));
    assert_eq!(right.positions[1].x, 0.0);
    assert!(close(left.height, right.height));
}

#[test]
fn count_mismatch_is_reported() {
    let err = solve(TemplateKind::Rows(&[2, 2]), &m(&[1.0, 1.0, 1.0]), 500.0, 5.0).unwrap_err();
    assert_eq!(
        err,
        GeometryError::CountMismatch {
            template: TemplateKind::Rows(&[2, 2]),
            expected: 4,
            actual: 3,
        }
    );
}

#[test]
fn non_positive_aspect_is_rejected() {
    let metrics = vec![
        PhotoMetrics::new(1.0),
        PhotoMetrics {
            aspect_ratio: 0.0,
            class: AspectClass::Landscape,
        },
    ];
    let err = solve(TemplateKind::PairSideBySide, &metrics, 500.0, 5.0).unwrap_err();
    assert_eq!(err, GeometryError::NonPositiveAspect(0.0));
}

#[test]
fn spacing_wider_than_row_is_degenerate() {
    let err = solve(TemplateKind::Rows(&[3]), &m(&[1.0, 1.0, 1.0]), 15.0, 10.0).unwrap_err();
    assert!(matches!(err, GeometryError::Degenerate(_)));

    let kind = TemplateKind::LargeSide {
        side: Side::Left,
        stacked: 3,
    };
    let err = solve(kind, &m(&[5.0, 1.0, 1.0, 1.0]), 40.0, 10.0).unwrap_err();
    assert!(matches!(err, GeometryError::Degenerate(_)));
}

#[test]
fn pair_table_stacks_extremes_with_partners() {
    use AspectClass::*;
    assert_eq!(pair_template(Wide, Tall), TemplateKind::PairStacked);
    assert_eq!(pair_template(Tall, Wide), TemplateKind::PairStacked);
    assert_eq!(pair_template(Wide, Landscape), TemplateKind::PairStacked);
    assert_eq!(pair_template(Portrait, Tall), TemplateKind::PairStacked);
    assert_eq!(pair_template(Wide, Wide), TemplateKind::PairSideBySide);
    assert_eq!(pair_template(Tall, Square), TemplateKind::PairSideBySide);
    assert_eq!(pair_template(Landscape, Portrait), TemplateKind::PairSideBySide);
    assert_eq!(pair_template(Square, Square), TemplateKind::PairSideBySide);
}

#[test]
fn catalogue_sizes_per_count() {
    let sizes: Vec<usize> = (1..=9)
        .map(|n| catalogue(&m(&vec![1.2; n])).len())
        .collect();
    assert_eq!(sizes, vec![1, 1, 6, 5, 5, 4, 6, 5, 4]);
    assert!(catalogue(&m(&[1.0; 10])).is_empty());
    for n in 1..=MAX_GROUP {
        for kind in catalogue(&m(&vec![1.2; n])) {
            assert_eq!(kind.photo_count(), n, "{kind}");
        }
    }
}

#[test]
fn template_names_are_readable() {
    assert_eq!(TemplateKind::Rows(&[3, 2, 2]).to_string(), "rows-3-2-2");
    assert_eq!(TemplateKind::Column(3).to_string(), "column-3");
    assert_eq!(
        TemplateKind::LargeSide {
            side: Side::Right,
            stacked: 2
        }
        .to_string(),
        "large-right-2"
    );
    assert!(TemplateKind::Column(3).is_degenerate());
    assert!(!TemplateKind::Rows(&[3]).is_degenerate());
}

#[test]
fn scaled_layout_scales_everything() {
    let l = solve(TemplateKind::Rows(&[2, 2]), &m(&[1.0; 4]), 410.0, 10.0).unwrap();
    let s = l.scaled(0.5);
    assert!(close(s.height, l.height * 0.5));
    assert!(close(s.positions[3].x, l.positions[3].x * 0.5));
    assert!(close(s.area(), l.area() * 0.25));
}

proptest! {
    #[test]
    fn rows_span_the_available_width(
        ratios in proptest::collection::vec(0.2f64..5.0, 3..=9),
        width in 300.0f64..2000.0,
        spacing in 0.0f64..20.0,
    ) {
        let metrics = m(&ratios);
        for kind in catalogue(&metrics) {
            let TemplateKind::Rows(rows) = kind else { continue };
            let layout = solve(kind, &metrics, width, spacing).unwrap();
            let mut start = 0;
            for &count in rows {
                let row_width: f64 = layout.sizes[start..start + count].iter().map(|s| s.width).sum();
                prop_assert!((row_width + spacing * (count - 1) as f64 - width).abs() < 1e-6);
                start += count;
            }
        }
    }

    #[test]
    fn every_template_stays_inside_the_block(
        ratios in proptest::collection::vec(0.2f64..5.0, 1..=9),
        width in 300.0f64..2000.0,
        spacing in 0.0f64..20.0,
    ) {
        let metrics = m(&ratios);
        for kind in catalogue(&metrics) {
            let Ok(layout) = solve(kind, &metrics, width, spacing) else { continue };
            prop_assert_eq!(layout.positions.len(), ratios.len());
            prop_assert_eq!(layout.sizes.len(), ratios.len());
            prop_assert!(layout.width <= width + 1e-6);
            for (p, s) in layout.positions.iter().zip(&layout.sizes) {
                prop_assert!(p.x >= 0.0 && p.y >= 0.0);
                prop_assert!(p.x + s.width <= layout.width + 1e-6);
                prop_assert!(p.y + s.height <= layout.height + 1e-6);
            }
        }
    }
}
