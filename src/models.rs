//! Frontend Models
//!
//! Transport records mirrored from the backend. The client never owns
//! canonical state: every list below is a cache invalidated by reload.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Product in the plant catalog (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub gtin: Option<String>,
}

/// Production record header (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub id: u32,
    pub code: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,
    /// Upstream production this one consumes output from, when any
    #[serde(rename = "upstreamProductionId", default)]
    pub upstream_production_id: Option<u32>,
}

/// A box consumed into a production record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionInput {
    pub id: u32,
    #[serde(rename = "productionId")]
    pub production_id: u32,
    #[serde(rename = "palletId")]
    pub pallet_id: u32,
    #[serde(rename = "boxId")]
    pub box_id: u32,
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Output of an upstream production consumed by this one (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConsumption {
    pub id: u32,
    #[serde(rename = "productionId")]
    pub production_id: u32,
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    /// Box count, zero when the consumption is weight-only
    #[serde(default)]
    pub boxes: u32,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Pallet with its loaded boxes (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pallet {
    pub id: u32,
    pub code: String,
    #[serde(default)]
    pub boxes: Vec<BoxRecord>,
}

/// A physical box on a pallet. Box ids are only unique within a pallet's
/// loaded set, so boxes are always addressed by `(box_id, pallet_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub id: u32,
    #[serde(rename = "palletId")]
    pub pallet_id: u32,
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    #[serde(default)]
    pub gtin: Option<String>,
    #[serde(default)]
    pub lot: Option<String>,
    /// False once the box is consumed elsewhere
    pub available: bool,
}

impl BoxRecord {
    pub fn key(&self) -> (u32, u32) {
        (self.id, self.pallet_id)
    }
}

/// Customer order header (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub code: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Forecast line of an order (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDetail {
    pub id: u32,
    #[serde(rename = "orderId")]
    pub order_id: u32,
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "quantityKg")]
    pub quantity_kg: f64,
}

/// Actual produced line of an order, derived from linked pallets (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionDetail {
    pub id: u32,
    #[serde(rename = "orderId")]
    pub order_id: u32,
    #[serde(rename = "productId")]
    pub product_id: u32,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "quantityKg")]
    pub quantity_kg: f64,
    #[serde(rename = "palletId", default)]
    pub pallet_id: Option<u32>,
}

/// Reconciliation status of one product across planned vs produced lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergedStatus {
    Pending,
    Success,
    Difference,
    NoPlanned,
}

/// One reconciled planned-vs-produced line, computed client side
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDetail {
    pub product_id: u32,
    pub product_name: String,
    pub planned_kg: Option<f64>,
    pub produced_kg: f64,
    pub difference_kg: f64,
    pub status: MergedStatus,
}

/// Employee time punch (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    pub id: u32,
    #[serde(rename = "employeeId")]
    pub employee_id: u32,
    #[serde(rename = "employeeName")]
    pub employee_name: String,
    pub kind: PunchKind,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    In,
    Out,
}

impl PunchKind {
    pub fn label(&self) -> &'static str {
        match self {
            PunchKind::In => "Entrada",
            PunchKind::Out => "Salida",
        }
    }
}

/// Punch row to upload, as extracted from a time sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRow {
    #[serde(rename = "employeeCode")]
    pub employee_code: String,
    pub kind: PunchKind,
    pub at: NaiveDateTime,
}

/// Per-worker punch statistics (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStats {
    #[serde(rename = "employeeId")]
    pub employee_id: u32,
    #[serde(rename = "employeeName")]
    pub employee_name: String,
    #[serde(rename = "totalHours")]
    pub total_hours: f64,
    pub punches: u32,
}

/// Identity of a row in an editable table: confirmed on the server or a
/// client-only draft that disappears on cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowId {
    Saved(u32),
    Draft(u32),
}

impl RowId {
    pub fn saved_id(&self) -> Option<u32> {
        match self {
            RowId::Saved(id) => Some(*id),
            RowId::Draft(_) => None,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, RowId::Draft(_))
    }
}

/// One editable line of the consumption table
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRow {
    pub row_id: RowId,
    pub product_id: Option<u32>,
    pub product_name: String,
    pub weight_kg: f64,
    pub boxes: u32,
    pub lot: Option<String>,
    pub notes: Option<String>,
}

impl ConsumptionRow {
    pub fn from_saved(saved: &OutputConsumption) -> Self {
        Self {
            row_id: RowId::Saved(saved.id),
            product_id: Some(saved.product_id),
            product_name: saved.product_name.clone(),
            weight_kg: saved.weight_kg,
            boxes: saved.boxes,
            lot: saved.lot.clone(),
            notes: saved.notes.clone(),
        }
    }

    pub fn draft(draft_id: u32) -> Self {
        Self {
            row_id: RowId::Draft(draft_id),
            product_id: None,
            product_name: String::new(),
            weight_kg: 0.0,
            boxes: 0,
            lot: None,
            notes: None,
        }
    }

    /// A row is uploadable once it names a product and carries weight.
    pub fn is_valid(&self) -> bool {
        self.product_id.is_some() && self.weight_kg > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_saved_lookup() {
        assert_eq!(RowId::Saved(7).saved_id(), Some(7));
        assert_eq!(RowId::Draft(7).saved_id(), None);
        assert!(RowId::Draft(1).is_draft());
        assert!(!RowId::Saved(1).is_draft());
    }

    #[test]
    fn test_consumption_row_validity() {
        let mut row = ConsumptionRow::draft(1);
        assert!(!row.is_valid());
        row.product_id = Some(3);
        assert!(!row.is_valid());
        row.weight_kg = 12.0;
        assert!(row.is_valid());
    }

    #[test]
    fn test_merged_status_wire_names() {
        assert_eq!(serde_json::to_string(&MergedStatus::NoPlanned).unwrap(), "\"noPlanned\"");
        assert_eq!(serde_json::to_string(&MergedStatus::Pending).unwrap(), "\"pending\"");
    }
}
