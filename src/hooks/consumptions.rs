//! Output Consumptions Hook
//!
//! Editable table of what this production consumed from its upstream
//! record's output. Edits stay local as draft/saved rows until save, which
//! first tries the backend's bulk sync endpoint and falls back to row-level
//! calls when it does not exist.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, consumptions::ConsumptionPayload, consumptions::SyncRow, ApiError};
use crate::context::{use_app_context, ApiConfig, AppContext};
use crate::models::{ConsumptionRow, OutputConsumption, RowId};
use crate::notify::{use_notifier, Notifier};

use super::resource::{CacheHandle, OptimisticList};

fn consumption_id(item: &OutputConsumption) -> u32 {
    item.id
}

/// Row-level calls needed to move the server from `previous` to `desired`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan {
    pub creates: Vec<ConsumptionRow>,
    pub updates: Vec<(u32, ConsumptionRow)>,
    pub deletes: Vec<u32>,
}

/// Set difference by row identity: drafts are created, saved rows that
/// changed are updated, previously known ids now absent are deleted.
pub fn plan_sync(previous: &[OutputConsumption], desired: &[ConsumptionRow]) -> SyncPlan {
    let mut plan = SyncPlan::default();
    for row in desired {
        match row.row_id {
            RowId::Draft(_) => plan.creates.push(row.clone()),
            RowId::Saved(id) => {
                let unchanged = previous.iter().any(|prev| {
                    prev.id == id
                        && Some(prev.product_id) == row.product_id
                        && prev.weight_kg == row.weight_kg
                        && prev.boxes == row.boxes
                        && prev.lot == row.lot
                        && prev.notes == row.notes
                });
                if !unchanged {
                    plan.updates.push((id, row.clone()));
                }
            }
        }
    }
    for prev in previous {
        let kept = desired
            .iter()
            .any(|row| row.row_id.saved_id() == Some(prev.id));
        if !kept {
            plan.deletes.push(prev.id);
        }
    }
    plan
}

#[derive(Clone)]
pub struct ConsumptionsHook {
    pub list: OptimisticList<OutputConsumption>,
    /// Editable rows mirrored from the confirmed list
    pub rows: RwSignal<Vec<ConsumptionRow>>,
    pub saving: RwSignal<bool>,
    next_draft: RwSignal<u32>,
    ctx: AppContext,
    notifier: Notifier,
    production_id: u32,
    upstream_production_id: Option<u32>,
}

pub fn use_output_consumptions(
    production_id: u32,
    upstream_production_id: Option<u32>,
    cache: Option<CacheHandle<OutputConsumption>>,
    on_refresh: Option<Callback<()>>,
) -> ConsumptionsHook {
    let ctx = use_app_context();
    let notifier = use_notifier();
    let hook = ConsumptionsHook {
        list: OptimisticList::new(cache, on_refresh, consumption_id),
        rows: RwSignal::new(Vec::new()),
        saving: RwSignal::new(false),
        next_draft: RwSignal::new(0),
        ctx,
        notifier,
        production_id,
        upstream_production_id,
    };

    // Rebuild the editable rows whenever the confirmed list changes. The
    // confirmed list only moves on init, save, or external cache writes, so
    // in-progress edits are not clobbered mid-typing.
    {
        let hook = hook.clone();
        let items = hook.list.items();
        Effect::new(move |_| {
            let rows = items.get().iter().map(ConsumptionRow::from_saved).collect();
            hook.rows.set(rows);
        });
    }

    {
        let hook = hook.clone();
        Effect::new(move |_| {
            let Some(cfg) = hook.ctx.config.get() else {
                return;
            };
            if hook.upstream_production_id.is_none() {
                // nothing upstream to consume from
                if hook.list.begin_init() {
                    hook.list.ready_empty();
                }
                return;
            }
            if !hook.list.begin_init() {
                return;
            }
            if hook.list.try_adopt_cache() {
                return;
            }
            let hook = hook.clone();
            spawn_local(async move {
                match api::consumptions::list(&cfg, hook.production_id).await {
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

impl ConsumptionsHook {
    fn cfg(&self) -> Option<ApiConfig> {
        self.ctx.config.get_untracked()
    }

    pub fn has_upstream(&self) -> bool {
        self.upstream_production_id.is_some()
    }

    pub fn add_row(&self) {
        let draft_id = self.next_draft.get_untracked();
        self.next_draft.set(draft_id + 1);
        self.rows.update(|rows| rows.push(ConsumptionRow::draft(draft_id)));
    }

    pub fn update_row(&self, row_id: RowId, apply: impl FnOnce(&mut ConsumptionRow)) {
        self.rows.update(|rows| {
            if let Some(row) = rows.iter_mut().find(|r| r.row_id == row_id) {
                apply(row);
            }
        });
    }

    pub fn remove_row(&self, row_id: RowId) {
        self.rows.update(|rows| rows.retain(|r| r.row_id != row_id));
    }

    /// Discard local edits and mirror the confirmed list again.
    pub fn reset_rows(&self) {
        let rows = self
            .list
            .snapshot()
            .iter()
            .map(ConsumptionRow::from_saved)
            .collect();
        self.rows.set(rows);
    }

    async fn refetch(&self, cfg: &ApiConfig) {
        match api::consumptions::list(cfg, self.production_id).await {
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

    async fn fallback_row_calls(&self, cfg: &ApiConfig, plan: SyncPlan) -> Result<(), ApiError> {
        for row in &plan.creates {
            api::consumptions::create(cfg, self.production_id, &ConsumptionPayload::from_row(row))
                .await?;
        }
        for (id, row) in &plan.updates {
            api::consumptions::update(
                cfg,
                self.production_id,
                *id,
                &ConsumptionPayload::from_row(row),
            )
            .await?;
        }
        for id in &plan.deletes {
            api::consumptions::remove(cfg, self.production_id, *id).await?;
        }
        Ok(())
    }

    /// Reconcile the edited rows against the server: one bulk sync call when
    /// the backend supports it, row-level set-difference calls otherwise.
    /// Both paths end in a re-fetch of the authoritative list.
    pub fn save(&self) {
        let Some(cfg) = self.cfg() else { return };
        let desired = self.rows.get_untracked();
        if desired.iter().any(|row| !row.is_valid()) {
            self.notifier
                .error("Cada línea necesita producto y peso mayor que cero");
            return;
        }
        let hook = self.clone();
        self.saving.set(true);
        spawn_local(async move {
            let previous = hook.list.snapshot();
            let sync_rows: Vec<SyncRow> = desired.iter().map(SyncRow::from_row).collect();
            let result = match api::consumptions::sync(&cfg, hook.production_id, &sync_rows).await {
                Ok(()) => Ok(()),
                Err(err) if err.is_not_found() => {
                    let plan = plan_sync(&previous, &desired);
                    hook.fallback_row_calls(&cfg, plan).await
                }
                Err(err) => Err(err),
            };
            match result {
                Ok(()) => {
                    hook.refetch(&cfg).await;
                    if !hook.list.cancelled() {
                        hook.notifier.success("Consumos guardados");
                    }
                }
                Err(err) => {
                    // some row calls may have landed; show server truth
                    hook.refetch(&cfg).await;
                    hook.notifier.error(err.user_message());
                }
            }
            hook.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_saved(id: u32, product_id: u32, weight_kg: f64) -> OutputConsumption {
        OutputConsumption {
            id,
            production_id: 1,
            product_id,
            product_name: format!("Producto {}", product_id),
            weight_kg,
            boxes: 2,
            lot: Some("L1".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_plan_creates_drafts_only() {
        let previous = vec![make_saved(1, 10, 5.0)];
        let desired = vec![
            ConsumptionRow::from_saved(&previous[0]),
            ConsumptionRow {
                product_id: Some(11),
                weight_kg: 3.0,
                ..ConsumptionRow::draft(0)
            },
        ];
        let plan = plan_sync(&previous, &desired);
        assert_eq!(plan.creates.len(), 1);
        assert!(plan.updates.is_empty());
        assert!(plan.deletes.is_empty());
    }

    #[test]
    fn test_plan_updates_changed_saved_rows() {
        let previous = vec![make_saved(1, 10, 5.0), make_saved(2, 11, 7.0)];
        let mut kept = ConsumptionRow::from_saved(&previous[0]);
        kept.weight_kg = 6.5;
        let unchanged = ConsumptionRow::from_saved(&previous[1]);
        let plan = plan_sync(&previous, &[kept, unchanged]);
        assert!(plan.creates.is_empty());
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].0, 1);
        assert!(plan.deletes.is_empty());
    }

    #[test]
    fn test_plan_deletes_rows_no_longer_present() {
        let previous = vec![make_saved(1, 10, 5.0), make_saved(2, 11, 7.0)];
        let desired = vec![ConsumptionRow::from_saved(&previous[1])];
        let plan = plan_sync(&previous, &desired);
        assert!(plan.creates.is_empty());
        assert!(plan.updates.is_empty());
        assert_eq!(plan.deletes, vec![1]);
    }

    #[test]
    fn test_plan_empty_desired_deletes_everything() {
        let previous = vec![make_saved(1, 10, 5.0), make_saved(2, 11, 7.0)];
        let plan = plan_sync(&previous, &[]);
        assert_eq!(plan.deletes, vec![1, 2]);
    }
}
