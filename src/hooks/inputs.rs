//! Production Inputs Hook
//!
//! Owns the inputs list of one production record plus the transient "picked
//! but not saved" box selection. Picking (weight search, target packing,
//! label scans) is purely local; the network is only touched on confirm.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, inputs::NewInput, inputs::UpdateInput};
use crate::context::{use_app_context, ApiConfig, AppContext};
use crate::models::{BoxRecord, Pallet, ProductionInput};
use crate::notify::{use_notifier, Notifier};
use crate::picking;
use crate::summary;

use super::resource::{CacheHandle, OptimisticList};

fn input_id(item: &ProductionInput) -> u32 {
    item.id
}

#[derive(Clone)]
pub struct ProductionInputsHook {
    pub list: OptimisticList<ProductionInput>,
    /// Boxes picked in the dialog, not yet saved
    pub selected: RwSignal<Vec<BoxRecord>>,
    pub saving: RwSignal<bool>,
    ctx: AppContext,
    notifier: Notifier,
    production_id: u32,
}

pub fn use_production_inputs(
    production_id: u32,
    cache: Option<CacheHandle<ProductionInput>>,
    on_refresh: Option<Callback<()>>,
) -> ProductionInputsHook {
    let ctx = use_app_context();
    let notifier = use_notifier();
    let hook = ProductionInputsHook {
        list: OptimisticList::new(cache, on_refresh, input_id),
        selected: RwSignal::new(Vec::new()),
        saving: RwSignal::new(false),
        ctx,
        notifier,
        production_id,
    };

    // First mount: adopt a warm cache without a fetch, else load once.
    {
        let hook = hook.clone();
        Effect::new(move |_| {
            let Some(cfg) = hook.ctx.config.get() else {
                return;
            };
            if !hook.list.begin_init() {
                return;
            }
            if hook.list.try_adopt_cache() {
                return;
            }
            let hook = hook.clone();
            spawn_local(async move {
                match api::inputs::list(&cfg, hook.production_id).await {
                    Ok(page) => {
                        if !hook.list.cancelled() {
                            hook.list.finish_init(page.items);
                        }
                    }
                    Err(err) => {
                        if !hook.list.cancelled() {
                            hook.list.init_failed(err.user_message());
                        }
                    }
                }
            });
        });
    }

    hook
}

impl ProductionInputsHook {
    fn cfg(&self) -> Option<ApiConfig> {
        self.ctx.config.get_untracked()
    }

    pub fn items(&self) -> Signal<Vec<ProductionInput>> {
        self.list.items()
    }

    /// Display aggregates over the current list
    pub fn pallet_groups(&self) -> Signal<Vec<summary::PalletGroup>> {
        let items = self.list.items();
        Signal::derive(move || summary::group_by_pallet(&items.get()))
    }

    pub fn totals(&self) -> Signal<summary::Totals> {
        let items = self.list.items();
        Signal::derive(move || summary::totals(&items.get()))
    }

    /// Keys of everything that is already taken: saved inputs plus the
    /// pending selection.
    fn taken_keys(&self) -> HashSet<(u32, u32)> {
        let mut keys: HashSet<(u32, u32)> = self
            .list
            .snapshot()
            .iter()
            .map(|i| (i.box_id, i.pallet_id))
            .collect();
        keys.extend(self.selected.get_untracked().iter().map(|b| b.key()));
        keys
    }

    async fn refetch(&self, cfg: &ApiConfig) {
        match api::inputs::list(cfg, self.production_id).await {
            Ok(page) => {
                if !self.list.cancelled() {
                    self.list.replace(page.items);
                }
            }
            Err(err) => {
                if !self.list.cancelled() {
                    self.notifier.error(err.user_message());
                }
            }
        }
    }

    // ========================
    // Mutations
    // ========================

    pub fn add_box(&self, chosen: BoxRecord, notes: Option<String>) {
        let Some(cfg) = self.cfg() else { return };
        if chosen.weight_kg <= 0.0 {
            self.notifier.error("El peso debe ser mayor que cero");
            return;
        }
        let hook = self.clone();
        spawn_local(async move {
            let payload = NewInput::from_box(&chosen, notes);
            match api::inputs::create(&cfg, hook.production_id, &payload).await {
                Ok(_) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.notifier.success("Entrada registrada");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
        });
    }

    pub fn update_input(&self, input_id: u32, weight_kg: f64, notes: Option<String>) {
        let Some(cfg) = self.cfg() else { return };
        if weight_kg <= 0.0 {
            self.notifier.error("El peso debe ser mayor que cero");
            return;
        }
        let hook = self.clone();
        spawn_local(async move {
            let payload = UpdateInput {
                weight_kg: Some(weight_kg),
                notes,
                ..Default::default()
            };
            match api::inputs::update(&cfg, hook.production_id, input_id, &payload).await {
                Ok(_) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.notifier.success("Entrada actualizada");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
        });
    }

    pub fn delete_input(&self, input_id: u32) {
        let Some(cfg) = self.cfg() else { return };
        let hook = self.clone();
        spawn_local(async move {
            match api::inputs::remove(&cfg, hook.production_id, input_id).await {
                Ok(()) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.notifier.success("Entrada eliminada");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
        });
    }

    /// Delete every input of the record. Callers gate this behind an
    /// explicit confirmation.
    pub fn delete_all(&self) {
        let Some(cfg) = self.cfg() else { return };
        let hook = self.clone();
        spawn_local(async move {
            match api::inputs::bulk_delete(&cfg, hook.production_id).await {
                Ok(()) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.notifier.success("Entradas eliminadas");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
        });
    }

    // ========================
    // Selection (local only)
    // ========================

    pub fn toggle_selected(&self, candidate: &BoxRecord) {
        let key = candidate.key();
        let candidate = candidate.clone();
        self.selected.update(|sel| {
            if sel.iter().any(|b| b.key() == key) {
                sel.retain(|b| b.key() != key);
            } else {
                sel.push(candidate);
            }
        });
    }

    pub fn clear_selection(&self) {
        self.selected.set(Vec::new());
    }

    /// Boxes within `tolerance_kg` of a scale reading, closest first.
    pub fn search_by_weight(
        &self,
        pallets: &[Pallet],
        target_kg: f64,
        tolerance_kg: f64,
    ) -> Vec<picking::WeightMatch> {
        picking::match_by_weight(pallets, target_kg, tolerance_kg, &self.taken_keys())
    }

    /// Greedily extend the selection toward a target total weight.
    pub fn select_to_target(&self, pallets: &[Pallet], target_kg: f64) {
        if target_kg <= 0.0 {
            self.notifier.error("El peso objetivo debe ser mayor que cero");
            return;
        }
        let packed = picking::pack_to_target(pallets, target_kg, &self.taken_keys());
        if packed.boxes.is_empty() {
            self.notifier.error("No hay cajas disponibles para ese peso");
            return;
        }
        let count = packed.boxes.len();
        self.selected.update(|sel| sel.extend(packed.boxes.clone()));
        self.notifier.success(format!(
            "{} cajas seleccionadas ({:.2} kg, quedan {:.2} kg)",
            count, packed.total_kg, packed.remaining_kg
        ));
    }

    /// Resolve pasted GS1-128 labels against the loaded pallets and add the
    /// matching boxes to the selection. Per-line failures are aggregated,
    /// never aborting sibling lines.
    pub fn select_scanned(&self, pallets: &[Pallet], pasted: &str) {
        let outcome = gs1_scan::parse_lines(pasted);
        let mut taken = self.taken_keys();
        let mut added = 0usize;
        let mut unmatched = 0usize;
        for scanned in &outcome.boxes {
            match picking::find_scanned_box(pallets, scanned, &taken) {
                Some(found) => {
                    taken.insert(found.key());
                    self.selected.update(|sel| sel.push(found));
                    added += 1;
                }
                None => unmatched += 1,
            }
        }
        if added > 0 {
            self.notifier.success(format!("{} cajas añadidas por escaneo", added));
        }
        if unmatched > 0 {
            self.notifier
                .error(format!("{} cajas escaneadas no están disponibles", unmatched));
        }
        if let Some(summary) = outcome.failure_summary() {
            self.notifier.error(summary);
        }
    }

    /// Save the pending selection as new inputs.
    pub fn confirm_selection(&self) {
        let Some(cfg) = self.cfg() else { return };
        let selection = self.selected.get_untracked();
        if selection.is_empty() {
            self.notifier.error("No hay cajas seleccionadas");
            return;
        }
        let hook = self.clone();
        self.saving.set(true);
        spawn_local(async move {
            let payload: Vec<NewInput> = selection
                .iter()
                .map(|b| NewInput::from_box(b, None))
                .collect();
            match api::inputs::bulk_create(&cfg, hook.production_id, &payload).await {
                Ok(report) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.selected.set(Vec::new());
                        match report.failure_summary() {
                            Some(detail) => hook.notifier.error(detail),
                            None => hook.notifier.success("Cajas registradas"),
                        }
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
            hook.saving.set(false);
        });
    }

    /// Replace every input of the record with the pending selection:
    /// delete-all, create-new-set, re-fetch. If the create phase fails the
    /// previously confirmed inputs are restored best-effort before
    /// surfacing the error.
    pub fn replace_with_selection(&self) {
        let Some(cfg) = self.cfg() else { return };
        let selection = self.selected.get_untracked();
        if selection.is_empty() {
            self.notifier.error("No hay cajas seleccionadas");
            return;
        }
        let hook = self.clone();
        self.saving.set(true);
        spawn_local(async move {
            let previous = hook.list.snapshot();
            if let Err(err) = api::inputs::bulk_delete(&cfg, hook.production_id).await {
                hook.notifier.error(err.user_message());
                hook.saving.set(false);
                return;
            }
            let payload: Vec<NewInput> = selection
                .iter()
                .map(|b| NewInput::from_box(b, None))
                .collect();
            match api::inputs::bulk_create(&cfg, hook.production_id, &payload).await {
                Ok(report) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.selected.set(Vec::new());
                        match report.failure_summary() {
                            Some(detail) => hook.notifier.error(detail),
                            None => hook.notifier.success("Entradas reemplazadas"),
                        }
                    }
                }
                Err(err) => {
                    // the record is empty at this point; put the previous
                    // inputs back before reporting
                    let restore: Vec<NewInput> =
                        previous.iter().map(NewInput::from_saved).collect();
                    if !restore.is_empty() {
                        if let Err(restore_err) =
                            api::inputs::bulk_create(&cfg, hook.production_id, &restore).await
                        {
                            hook.notifier.error(restore_err.user_message());
                        }
                    }
                    hook.refetch(&cfg).await;
                    hook.notifier.error(err.user_message());
                }
            }
            hook.saving.set(false);
        });
    }
}
