//! Box Picking Helpers
//!
//! Pure selection logic used while an operator picks physical boxes for a
//! production record: locate a box by scale reading, pack a target weight,
//! and match scanned labels against the loaded pallets.

use std::collections::HashSet;

use gs1_scan::ScannedBox;

use crate::models::{BoxRecord, Pallet};

/// Band for "exact" weight search, wide enough for scale rounding.
pub const EXACT_TOLERANCE_KG: f64 = 0.01;

/// A candidate box with its distance from the searched weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatch {
    pub record: BoxRecord,
    pub difference_kg: f64,
}

fn candidates<'a>(
    pallets: &'a [Pallet],
    exclude: &'a HashSet<(u32, u32)>,
) -> impl Iterator<Item = &'a BoxRecord> + 'a {
    pallets
        .iter()
        .flat_map(|p| p.boxes.iter())
        .filter(move |b| b.available && !exclude.contains(&b.key()))
}

/// Boxes whose weight sits within `tolerance_kg` of `target_kg`, closest
/// first. Already-selected boxes are excluded by `(box_id, pallet_id)` key.
pub fn match_by_weight(
    pallets: &[Pallet],
    target_kg: f64,
    tolerance_kg: f64,
    exclude: &HashSet<(u32, u32)>,
) -> Vec<WeightMatch> {
    let mut matches: Vec<WeightMatch> = candidates(pallets, exclude)
        .filter_map(|b| {
            let difference_kg = (b.weight_kg - target_kg).abs();
            (difference_kg <= tolerance_kg).then(|| WeightMatch {
                record: b.clone(),
                difference_kg,
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        a.difference_kg
            .partial_cmp(&b.difference_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

/// Result of packing boxes toward a target weight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedSelection {
    pub boxes: Vec<BoxRecord>,
    pub total_kg: f64,
    /// Headroom left under the target, so callers can show the gap
    pub remaining_kg: f64,
}

/// Greedily pick available boxes toward `target_kg`: heaviest first, accept
/// while the running total stays at or under the target.
///
/// This is a heuristic, not an optimal subset-sum: it mirrors the floor
/// workflow of grabbing the biggest boxes first and is not guaranteed to
/// find the closest possible combination.
pub fn pack_to_target(
    pallets: &[Pallet],
    target_kg: f64,
    exclude: &HashSet<(u32, u32)>,
) -> PackedSelection {
    let mut pool: Vec<&BoxRecord> = candidates(pallets, exclude).collect();
    pool.sort_by(|a, b| {
        b.weight_kg
            .partial_cmp(&a.weight_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.key().cmp(&b.key()))
    });

    let mut selection = PackedSelection {
        remaining_kg: target_kg,
        ..Default::default()
    };
    for candidate in &pool {
        if selection.total_kg + candidate.weight_kg <= target_kg {
            selection.total_kg += candidate.weight_kg;
            selection.boxes.push((*candidate).clone());
        }
    }
    if selection.boxes.is_empty() {
        if let Some(largest_fitting) = pool.iter().find(|b| b.weight_kg <= target_kg) {
            selection.total_kg = largest_fitting.weight_kg;
            selection.boxes.push((*largest_fitting).clone());
        }
    }
    selection.remaining_kg = target_kg - selection.total_kg;
    selection
}

/// Find the loaded box a scanned label refers to: same GTIN when the box
/// carries one, same lot, and a weight within the exact band.
pub fn find_scanned_box(
    pallets: &[Pallet],
    scanned: &ScannedBox,
    exclude: &HashSet<(u32, u32)>,
) -> Option<BoxRecord> {
    candidates(pallets, exclude)
        .find(|b| {
            let gtin_matches = match &b.gtin {
                Some(gtin) => *gtin == scanned.gtin,
                None => true,
            };
            let lot_matches = b.lot.as_deref() == Some(scanned.lot.as_str());
            gtin_matches
                && lot_matches
                && (b.weight_kg - scanned.weight).abs() <= EXACT_TOLERANCE_KG
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs1_scan::WeightUnit;

    fn make_box(id: u32, pallet_id: u32, weight_kg: f64, lot: &str, available: bool) -> BoxRecord {
        BoxRecord {
            id,
            pallet_id,
            product_id: 1,
            product_name: "Pulpo".to_string(),
            weight_kg,
            gtin: Some("08412345678905".to_string()),
            lot: Some(lot.to_string()),
            available,
        }
    }

    fn make_pallet(id: u32, boxes: Vec<BoxRecord>) -> Pallet {
        Pallet {
            id,
            code: format!("PAL-{}", id),
            boxes,
        }
    }

    #[test]
    fn test_match_by_weight_respects_band_and_order() {
        let pallets = vec![make_pallet(
            1,
            vec![
                make_box(1, 1, 9.4, "A", true),
                make_box(2, 1, 10.1, "A", true),
                make_box(3, 1, 10.6, "A", true),
                make_box(4, 1, 12.0, "A", true),
            ],
        )];
        let matches = match_by_weight(&pallets, 10.0, 0.7, &HashSet::new());
        let ids: Vec<u32> = matches.iter().map(|m| m.record.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        for m in &matches {
            assert!(m.difference_kg <= 0.7);
        }
    }

    #[test]
    fn test_match_by_weight_skips_consumed_and_selected() {
        let pallets = vec![make_pallet(
            1,
            vec![
                make_box(1, 1, 10.0, "A", false),
                make_box(2, 1, 10.0, "A", true),
            ],
        )];
        let mut exclude = HashSet::new();
        exclude.insert((2, 1));
        assert!(match_by_weight(&pallets, 10.0, 0.5, &exclude).is_empty());
    }

    #[test]
    fn test_pack_to_target_stays_under_target() {
        let pallets = vec![make_pallet(
            1,
            vec![
                make_box(1, 1, 12.0, "A", true),
                make_box(2, 1, 8.0, "A", true),
                make_box(3, 1, 5.0, "A", true),
                make_box(4, 1, 3.0, "A", true),
            ],
        )];
        let packed = pack_to_target(&pallets, 21.0, &HashSet::new());
        assert!(packed.total_kg <= 21.0);
        // greedy: 12 and 8 accepted, then neither 5 nor 3 fits the headroom
        let ids: Vec<u32> = packed.boxes.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!((packed.total_kg - 20.0).abs() < 1e-9);
        assert!((packed.remaining_kg - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pack_to_target_no_candidate_fits() {
        let pallets = vec![make_pallet(1, vec![make_box(1, 1, 30.0, "A", true)])];
        let packed = pack_to_target(&pallets, 20.0, &HashSet::new());
        assert!(packed.boxes.is_empty());
        assert!((packed.remaining_kg - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_pack_to_target_local_greedy_optimality() {
        let pallets = vec![make_pallet(
            1,
            vec![
                make_box(1, 1, 9.0, "A", true),
                make_box(2, 1, 7.0, "A", true),
                make_box(3, 1, 2.0, "A", true),
            ],
        )];
        let packed = pack_to_target(&pallets, 18.0, &HashSet::new());
        assert_eq!(packed.boxes.len(), 3);
        assert!((packed.total_kg - 18.0).abs() < 1e-9);
        assert!(packed.remaining_kg.abs() < 1e-9);
        // no unselected candidate fits in the remaining headroom
    }

    #[test]
    fn test_find_scanned_box_matches_lot_and_weight() {
        let pallets = vec![make_pallet(
            2,
            vec![
                make_box(1, 2, 12.5, "L2409A", true),
                make_box(2, 2, 12.5, "L2409B", true),
            ],
        )];
        let scanned = ScannedBox {
            gtin: "08412345678905".to_string(),
            weight: 12.5,
            unit: WeightUnit::Kilograms,
            lot: "L2409B".to_string(),
        };
        let found = find_scanned_box(&pallets, &scanned, &HashSet::new()).expect("should match");
        assert_eq!(found.key(), (2, 2));
    }

    #[test]
    fn test_find_scanned_box_rejects_wrong_gtin() {
        let pallets = vec![make_pallet(1, vec![make_box(1, 1, 12.5, "L1", true)])];
        let scanned = ScannedBox {
            gtin: "00000000000000".to_string(),
            weight: 12.5,
            unit: WeightUnit::Kilograms,
            lot: "L1".to_string(),
        };
        assert!(find_scanned_box(&pallets, &scanned, &HashSet::new()).is_none());
    }
}
