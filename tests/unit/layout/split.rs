use super::*;
use crate::config::LayoutConfig;
use crate::layout::classify::{HeightTiers, MinHeightPolicy};

fn photos(dims: &[(i64, i64)]) -> Vec<Photo> {
    dims.iter()
        .enumerate()
        .map(|(i, &(w, h))| Photo::new(i, format!("{i}.jpg"), w, h))
        .collect()
}

fn place(session: &mut LayoutSession<'_>, photos: &[Photo]) {
    let metrics: Vec<PhotoMetrics> = photos.iter().map(PhotoMetrics::from_photo).collect();
    session.place_group(Group::new(photos, &metrics));
}

fn indices(page: &crate::model::page::Page) -> Vec<usize> {
    page.entries
        .iter()
        .flat_map(|e| e.photos.iter().map(|p| p.photo.index))
        .collect()
}

/// Leave `available` pixels for the next block on a page that already has content.
fn fill_until(session: &mut LayoutSession<'_>, available: f64) {
    let gap = session.config.spacing.element;
    session.advance(session.remaining() - available - gap);
}

#[test]
fn partition_puts_the_remainder_last() {
    let p = photos(&[(1, 1); 9]);
    let m: Vec<PhotoMetrics> = p.iter().map(PhotoMetrics::from_photo).collect();
    let g = Group::new(&p, &m);
    let lens: Vec<usize> = g.partition(&[3, 6]).iter().map(Group::len).collect();
    assert_eq!(lens, vec![3, 6]);
    let lens: Vec<usize> = g.range(0..3).partition(&[2, 2]).iter().map(Group::len).collect();
    assert_eq!(lens, vec![2, 1]);
}

#[test]
fn four_photos_split_two_and_two_across_pages() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 280.0);
    let group = photos(&[(800, 600); 4]);
    place(&mut session, &group);
    let out = session.finish();

    assert_eq!(out.pages.len(), 2);
    assert_eq!(indices(&out.pages[0]), vec![0, 1]);
    assert_eq!(indices(&out.pages[1]), vec![2, 3]);

    let first = &out.pages[0].entries[0].photos;
    assert_eq!(first[0].rect.y0, 1374.0);
    assert!(first[0].rect.y1 <= 1654.0 + 1e-9);
    let second = &out.pages[1].entries[0].photos;
    assert_eq!(second[0].rect.y0, 100.0);
    assert!(out.dropped.is_empty());
}

#[test]
fn extreme_group_moves_whole_to_a_new_page() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 50.0);
    let group = photos(&[(4000, 1000), (1500, 1000), (1500, 1000)]);
    place(&mut session, &group);
    let out = session.finish();

    assert_eq!(out.pages[0].photo_count(), 0);
    assert_eq!(indices(&out.pages[1]), vec![0, 1, 2]);
}

#[test]
fn nine_photos_go_three_then_six() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 200.0);
    let group = photos(&[(1500, 1000); 9]);
    place(&mut session, &group);
    let out = session.finish();

    assert_eq!(out.pages.len(), 2);
    assert_eq!(indices(&out.pages[0]), vec![0, 1, 2]);
    assert_eq!(indices(&out.pages[1]), (3..9).collect::<Vec<_>>());
}

#[test]
fn nine_photos_on_an_empty_page_stay_together() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    place(&mut session, &photos(&[(1500, 1000); 9]));
    let out = session.finish();
    assert_eq!(out.pages.len(), 1);
    assert_eq!(out.pages[0].photo_count(), 9);
}

#[test]
fn oversized_group_is_chunked_in_order() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    place(&mut session, &photos(&[(1500, 1000); 10]));
    let out = session.finish();

    let all: Vec<usize> = out.pages.iter().flat_map(indices).collect();
    assert_eq!(all, (0..10).collect::<Vec<_>>());
    assert!(out.dropped.is_empty());
}

#[test]
fn ultra_wide_single_is_placed_degraded() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    place(&mut session, &photos(&[(20000, 100)]));
    let out = session.finish();

    let placed = &out.pages[0].entries[0].photos[0];
    assert_eq!(placed.rendered.width, 1080.0);
    assert!((placed.rendered.height - 5.4).abs() < 1e-9);
    assert!(out.dropped.is_empty());
}

#[test]
fn pair_that_cannot_fit_an_empty_page_is_dropped() {
    let cfg = LayoutConfig {
        min_height: MinHeightPolicy {
            landscape: HeightTiers {
                small: 5000.0,
                medium: 5000.0,
                large: 5000.0,
            },
            ..MinHeightPolicy::default()
        },
        ..LayoutConfig::default()
    };
    let mut session = LayoutSession::new(&cfg).unwrap();
    place(&mut session, &photos(&[(1500, 1000); 3]));
    let out = session.finish();

    let dropped: Vec<usize> = out.dropped.iter().map(|d| d.photo_index).collect();
    assert_eq!(dropped, vec![0, 1]);
    assert_eq!(out.dropped[0].url, "0.jpg");
    assert_eq!(indices(&out.pages[0]), vec![2]);
}

#[test]
fn placements_never_cross_the_bottom_margin() {
    let cfg = LayoutConfig::default();
    for available in [60.0, 150.0, 280.0, 420.0, 900.0] {
        for n in 1..=9 {
            let mut session = LayoutSession::new(&cfg).unwrap();
            fill_until(&mut session, available);
            place(&mut session, &photos(&vec![(1200, 900); n]));
            let out = session.finish();
            for page in &out.pages {
                for e in &page.entries {
                    for p in &e.photos {
                        assert!(p.rect.y1 <= 1654.0 + 1e-6, "n={n} available={available}");
                        assert!(p.rect.x0 >= 80.0 - 1e-6 && p.rect.x1 <= 1160.0 + 1e-6);
                    }
                }
            }
            let placed: usize = out.pages.iter().map(|p| p.photo_count()).sum();
            assert_eq!(placed + out.dropped.len(), n);
        }
    }
}

fn page_indices(out: &crate::model::page::LayoutOutput) -> Vec<Vec<usize>> {
    out.pages.iter().map(indices).collect()
}

fn config_with_portrait_minimum(min: f64) -> LayoutConfig {
    LayoutConfig {
        min_height: MinHeightPolicy {
            portrait: HeightTiers {
                small: min,
                medium: min,
                large: min,
            },
            ..MinHeightPolicy::default()
        },
        ..LayoutConfig::default()
    }
}

#[test]
fn small_groups_move_whole_to_a_new_page() {
    let cfg = LayoutConfig::default();
    for n in [2, 3] {
        let mut session = LayoutSession::new(&cfg).unwrap();
        fill_until(&mut session, 100.0);
        place(&mut session, &photos(&vec![(1200, 900); n]));
        let out = session.finish();
        assert_eq!(page_indices(&out), vec![vec![], (0..n).collect::<Vec<_>>()]);
    }
}

#[test]
fn five_photos_lead_with_three_when_they_fit() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 420.0);
    place(&mut session, &photos(&[(1200, 900); 5]));
    let out = session.finish();
    assert_eq!(page_indices(&out), vec![vec![0, 1, 2], vec![3, 4]]);
}

#[test]
fn five_photos_lead_with_two_when_three_do_not_fit() {
    // The leading three need a tall portrait row; the two wide landscapes share a short one.
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 300.0);
    let group = photos(&[(2900, 1000), (2900, 1000), (500, 1000), (1500, 1000), (1500, 1000)]);
    place(&mut session, &group);
    let out = session.finish();
    assert_eq!(page_indices(&out), vec![vec![0, 1], vec![2, 3, 4]]);
    assert!(out.dropped.is_empty());
}

#[test]
fn six_photos_fall_back_to_pairs_when_three_do_not_fit() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 300.0);
    let group = photos(&[
        (2900, 1000),
        (2900, 1000),
        (500, 1000),
        (1500, 1000),
        (1500, 1000),
        (1500, 1000),
    ]);
    place(&mut session, &group);
    let out = session.finish();
    assert_eq!(page_indices(&out), vec![vec![0, 1], vec![2, 3, 4, 5]]);

    // (2, 2, 2): the second pair starts its own row below the first on the new page.
    let second = &out.pages[1].entries[0].photos;
    assert_eq!(second[0].rect.y0, 100.0);
    assert!(second[2].rect.y0 > second[0].rect.y1);
}

#[test]
fn seven_photos_split_three_and_four() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 300.0);
    place(&mut session, &photos(&[(1200, 900); 7]));
    let out = session.finish();
    assert_eq!(page_indices(&out), vec![vec![0, 1, 2], vec![3, 4, 5, 6]]);
}

#[test]
fn eight_photos_split_four_and_four() {
    let cfg = LayoutConfig::default();
    let mut session = LayoutSession::new(&cfg).unwrap();
    fill_until(&mut session, 200.0);
    place(&mut session, &photos(&[(900, 1200); 8]));
    let out = session.finish();
    assert_eq!(
        page_indices(&out),
        vec![vec![], vec![0, 1, 2, 3], vec![4, 5, 6, 7]]
    );
}

#[test]
fn four_that_fail_on_an_empty_page_split_in_pairs() {
    // Narrow portraits: a pair side by side is 1070px tall, no four-up reaches 800px.
    let cfg = config_with_portrait_minimum(1600.0);
    let mut session = LayoutSession::new(&cfg).unwrap();
    place(&mut session, &photos(&[(500, 1000); 8]));
    let out = session.finish();
    assert_eq!(
        page_indices(&out),
        vec![vec![0, 1], vec![2, 3], vec![4, 5], vec![6, 7]]
    );
    assert!(out.dropped.is_empty());
}
