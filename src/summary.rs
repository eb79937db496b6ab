//! Derived-View Calculators
//!
//! Pure folds over line item lists producing display aggregates. No I/O and
//! no mutation of the input; empty input yields empty output.

use std::collections::HashMap;

use crate::models::{MergedDetail, MergedStatus, PlannedDetail, ProductionDetail, ProductionInput};

/// Planned vs produced deviations within this band count as `difference`
/// rather than `pending`.
pub const MERGE_TOLERANCE_KG: f64 = 30.0;

const WEIGHT_EPSILON: f64 = 1e-6;

/// Per-product accumulation inside a group
#[derive(Debug, Clone, PartialEq)]
pub struct ProductBreakdown {
    pub product_id: u32,
    pub product_name: String,
    pub boxes: usize,
    pub weight_kg: f64,
    /// Distinct lots, sorted
    pub lots: Vec<String>,
}

/// One pallet's share of a production's inputs
#[derive(Debug, Clone, PartialEq)]
pub struct PalletGroup {
    pub pallet_id: u32,
    pub boxes: usize,
    pub weight_kg: f64,
    /// Per-product breakdown, heaviest first
    pub products: Vec<ProductBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    pub boxes: usize,
    pub weight_kg: f64,
    pub distinct_products: usize,
    pub distinct_pallets: usize,
}

fn fold_products(inputs: &[&ProductionInput]) -> Vec<ProductBreakdown> {
    let mut by_product: HashMap<u32, ProductBreakdown> = HashMap::new();
    for input in inputs {
        let entry = by_product
            .entry(input.product_id)
            .or_insert_with(|| ProductBreakdown {
                product_id: input.product_id,
                product_name: input.product_name.clone(),
                boxes: 0,
                weight_kg: 0.0,
                lots: Vec::new(),
            });
        entry.boxes += 1;
        entry.weight_kg += input.weight_kg;
        if let Some(lot) = &input.lot {
            if !entry.lots.contains(lot) {
                entry.lots.push(lot.clone());
            }
        }
    }
    let mut products: Vec<ProductBreakdown> = by_product.into_values().collect();
    for product in &mut products {
        product.lots.sort();
    }
    products.sort_by(|a, b| {
        b.weight_kg
            .partial_cmp(&a.weight_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.product_id.cmp(&b.product_id))
    });
    products
}

/// Partition inputs by pallet, accumulating count, weight, and a per-product
/// breakdown within each group. Groups come out sorted by pallet id.
pub fn group_by_pallet(inputs: &[ProductionInput]) -> Vec<PalletGroup> {
    let mut by_pallet: HashMap<u32, Vec<&ProductionInput>> = HashMap::new();
    for input in inputs {
        by_pallet.entry(input.pallet_id).or_default().push(input);
    }
    let mut groups: Vec<PalletGroup> = by_pallet
        .into_iter()
        .map(|(pallet_id, members)| PalletGroup {
            pallet_id,
            boxes: members.len(),
            weight_kg: members.iter().map(|i| i.weight_kg).sum(),
            products: fold_products(&members),
        })
        .collect();
    groups.sort_by_key(|g| g.pallet_id);
    groups
}

/// Flatten across pallets into one product-centric breakdown, heaviest first.
pub fn group_by_product(inputs: &[ProductionInput]) -> Vec<ProductBreakdown> {
    let refs: Vec<&ProductionInput> = inputs.iter().collect();
    fold_products(&refs)
}

pub fn totals(inputs: &[ProductionInput]) -> Totals {
    let mut products: Vec<u32> = inputs.iter().map(|i| i.product_id).collect();
    products.sort_unstable();
    products.dedup();
    let mut pallets: Vec<u32> = inputs.iter().map(|i| i.pallet_id).collect();
    pallets.sort_unstable();
    pallets.dedup();
    Totals {
        boxes: inputs.len(),
        weight_kg: inputs.iter().map(|i| i.weight_kg).sum(),
        distinct_products: products.len(),
        distinct_pallets: pallets.len(),
    }
}

/// Reconcile an order's forecast against its produced lines per product.
///
/// A planned product with no production stays `pending`; an exact match is
/// `success`; a deviation within [`MERGE_TOLERANCE_KG`] is `difference`; a
/// larger one is `pending`; production without any forecast is `noPlanned`.
pub fn merge_order_details(
    planned: &[PlannedDetail],
    produced: &[ProductionDetail],
) -> Vec<MergedDetail> {
    let mut produced_by_product: HashMap<u32, (String, f64)> = HashMap::new();
    for line in produced {
        let entry = produced_by_product
            .entry(line.product_id)
            .or_insert_with(|| (line.product_name.clone(), 0.0));
        entry.1 += line.quantity_kg;
    }

    let mut planned_by_product: HashMap<u32, (String, f64)> = HashMap::new();
    for line in planned {
        let entry = planned_by_product
            .entry(line.product_id)
            .or_insert_with(|| (line.product_name.clone(), 0.0));
        entry.1 += line.quantity_kg;
    }

    let mut merged: Vec<MergedDetail> = Vec::new();
    for (product_id, (product_name, planned_kg)) in &planned_by_product {
        let produced_kg = produced_by_product
            .get(product_id)
            .map(|(_, kg)| *kg)
            .unwrap_or(0.0);
        let difference_kg = planned_kg - produced_kg;
        let status = if difference_kg.abs() < WEIGHT_EPSILON {
            MergedStatus::Success
        } else if difference_kg.abs() <= MERGE_TOLERANCE_KG {
            MergedStatus::Difference
        } else {
            MergedStatus::Pending
        };
        merged.push(MergedDetail {
            product_id: *product_id,
            product_name: product_name.clone(),
            planned_kg: Some(*planned_kg),
            produced_kg,
            difference_kg,
            status,
        });
    }
    for (product_id, (product_name, produced_kg)) in &produced_by_product {
        if planned_by_product.contains_key(product_id) {
            continue;
        }
        merged.push(MergedDetail {
            product_id: *product_id,
            product_name: product_name.clone(),
            planned_kg: None,
            produced_kg: *produced_kg,
            difference_kg: -produced_kg,
            status: MergedStatus::NoPlanned,
        });
    }
    merged.sort_by(|a, b| a.product_name.cmp(&b.product_name).then(a.product_id.cmp(&b.product_id)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input(id: u32, pallet_id: u32, product_id: u32, weight_kg: f64, lot: &str) -> ProductionInput {
        ProductionInput {
            id,
            production_id: 1,
            pallet_id,
            box_id: id,
            product_id,
            product_name: format!("Producto {}", product_id),
            weight_kg,
            lot: Some(lot.to_string()),
            notes: None,
        }
    }

    fn make_planned(product_id: u32, quantity_kg: f64) -> PlannedDetail {
        PlannedDetail {
            id: product_id,
            order_id: 1,
            product_id,
            product_name: format!("Producto {}", product_id),
            quantity_kg,
        }
    }

    fn make_produced(id: u32, product_id: u32, quantity_kg: f64) -> ProductionDetail {
        ProductionDetail {
            id,
            order_id: 1,
            product_id,
            product_name: format!("Producto {}", product_id),
            quantity_kg,
            pallet_id: None,
        }
    }

    #[test]
    fn test_group_by_pallet_accumulates_and_sorts() {
        let inputs = vec![
            make_input(1, 2, 10, 5.0, "A"),
            make_input(2, 1, 10, 8.0, "A"),
            make_input(3, 1, 11, 20.0, "B"),
            make_input(4, 1, 10, 7.0, "C"),
        ];
        let groups = group_by_pallet(&inputs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].pallet_id, 1);
        assert_eq!(groups[0].boxes, 3);
        assert!((groups[0].weight_kg - 35.0).abs() < 1e-9);
        // heaviest product first within the group
        assert_eq!(groups[0].products[0].product_id, 11);
        assert_eq!(groups[0].products[1].product_id, 10);
        assert_eq!(groups[0].products[1].lots, vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_group_by_product_flattens_across_pallets() {
        let inputs = vec![
            make_input(1, 1, 10, 5.0, "A"),
            make_input(2, 2, 10, 6.0, "B"),
            make_input(3, 2, 11, 4.0, "C"),
        ];
        let products = group_by_product(&inputs);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_id, 10);
        assert_eq!(products[0].boxes, 2);
        assert!((products[0].weight_kg - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_counts_distincts() {
        let inputs = vec![
            make_input(1, 1, 10, 5.0, "A"),
            make_input(2, 2, 10, 6.0, "A"),
            make_input(3, 2, 11, 4.0, "B"),
        ];
        let t = totals(&inputs);
        assert_eq!(t.boxes, 3);
        assert!((t.weight_kg - 15.0).abs() < 1e-9);
        assert_eq!(t.distinct_products, 2);
        assert_eq!(t.distinct_pallets, 2);
    }

    #[test]
    fn test_empty_inputs_yield_empty_aggregates() {
        assert!(group_by_pallet(&[]).is_empty());
        assert!(group_by_product(&[]).is_empty());
        assert_eq!(totals(&[]), Totals::default());
        assert!(merge_order_details(&[], &[]).is_empty());
    }

    #[test]
    fn test_merge_status_bands() {
        let planned = vec![
            make_planned(1, 100.0), // exact
            make_planned(2, 100.0), // within band
            make_planned(3, 100.0), // beyond band
            make_planned(4, 50.0),  // nothing produced
        ];
        let produced = vec![
            make_produced(1, 1, 100.0),
            make_produced(2, 2, 80.0),
            make_produced(3, 3, 50.0),
            make_produced(4, 9, 40.0), // no forecast
        ];
        let merged = merge_order_details(&planned, &produced);
        let by_product: std::collections::HashMap<u32, &MergedDetail> =
            merged.iter().map(|m| (m.product_id, m)).collect();

        assert_eq!(by_product[&1].status, MergedStatus::Success);
        assert_eq!(by_product[&2].status, MergedStatus::Difference);
        assert!((by_product[&2].difference_kg - 20.0).abs() < 1e-9);
        assert_eq!(by_product[&3].status, MergedStatus::Pending);
        assert_eq!(by_product[&4].status, MergedStatus::Pending);
        assert_eq!(by_product[&9].status, MergedStatus::NoPlanned);
        assert_eq!(by_product[&9].planned_kg, None);
    }

    #[test]
    fn test_merge_sums_repeated_lines_per_product() {
        let planned = vec![make_planned(1, 60.0), make_planned(1, 40.0)];
        let produced = vec![make_produced(1, 1, 70.0), make_produced(2, 1, 30.0)];
        let merged = merge_order_details(&planned, &produced);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, MergedStatus::Success);
    }
}
