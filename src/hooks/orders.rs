//! Order Details Hook
//!
//! Planned (forecast) and production (actual) lines of one order, plus the
//! reconciled merged view computed client side.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, orders::PlannedPayload};
use crate::context::{use_app_context, ApiConfig, AppContext};
use crate::models::{MergedDetail, PlannedDetail, ProductionDetail};
use crate::notify::{use_notifier, Notifier};
use crate::summary;

use super::resource::{CacheHandle, OptimisticList};

fn planned_id(item: &PlannedDetail) -> u32 {
    item.id
}

fn produced_id(item: &ProductionDetail) -> u32 {
    item.id
}

#[derive(Clone)]
pub struct OrderDetailsHook {
    pub planned: OptimisticList<PlannedDetail>,
    pub produced: OptimisticList<ProductionDetail>,
    pub saving: RwSignal<bool>,
    ctx: AppContext,
    notifier: Notifier,
    order_id: u32,
}

pub fn use_order_details(
    order_id: u32,
    planned_cache: Option<CacheHandle<PlannedDetail>>,
) -> OrderDetailsHook {
    let ctx = use_app_context();
    let notifier = use_notifier();
    let hook = OrderDetailsHook {
        planned: OptimisticList::new(planned_cache, None, planned_id),
        produced: OptimisticList::new(None, None, produced_id),
        saving: RwSignal::new(false),
        ctx,
        notifier,
        order_id,
    };

    {
        let hook = hook.clone();
        Effect::new(move |_| {
            let Some(cfg) = hook.ctx.config.get() else {
                return;
            };
            if hook.planned.begin_init() {
                if !hook.planned.try_adopt_cache() {
                    let hook = hook.clone();
                    let cfg = cfg.clone();
                    spawn_local(async move {
                        match api::orders::planned_details(&cfg, hook.order_id).await {
                            Ok(page) => {
                                if !hook.planned.cancelled() {
                                    hook.planned.finish_init(page.items);
                                }
                            }
                            Err(err) => {
                                if !hook.planned.cancelled() {
                                    hook.planned.init_failed(err.user_message());
                                }
                            }
                        }
                    });
                }
            }
            if hook.produced.begin_init() {
                let hook = hook.clone();
                spawn_local(async move {
                    match api::orders::production_details(&cfg, hook.order_id).await {
                        Ok(page) => {
                            if !hook.produced.cancelled() {
                                hook.produced.finish_init(page.items);
                            }
                        }
                        Err(err) => {
                            if !hook.produced.cancelled() {
                                hook.produced.init_failed(err.user_message());
                            }
                        }
                    }
                });
            }
        });
    }

    hook
}

impl OrderDetailsHook {
    fn cfg(&self) -> Option<ApiConfig> {
        self.ctx.config.get_untracked()
    }

    /// Planned vs produced per product, with the tri-state match status.
    pub fn merged(&self) -> Signal<Vec<MergedDetail>> {
        let planned = self.planned.items();
        let produced = self.produced.items();
        Signal::derive(move || summary::merge_order_details(&planned.get(), &produced.get()))
    }

    async fn refetch_planned(&self, cfg: &ApiConfig) {
        match api::orders::planned_details(cfg, self.order_id).await {
            Ok(page) => {
                if !self.planned.cancelled() {
                    self.planned.replace(page.items);
                }
            }
            Err(err) => {
                if !self.planned.cancelled() {
                    self.notifier.error(err.user_message());
                }
            }
        }
    }

    pub fn add_planned(&self, product_id: u32, quantity_kg: f64) {
        let Some(cfg) = self.cfg() else { return };
        if quantity_kg <= 0.0 {
            self.notifier.error("La cantidad prevista debe ser mayor que cero");
            return;
        }
        let hook = self.clone();
        self.saving.set(true);
        spawn_local(async move {
            let payload = PlannedPayload {
                product_id,
                quantity_kg,
            };
            match api::orders::create_planned(&cfg, hook.order_id, &payload).await {
                Ok(_) => {
                    hook.refetch_planned(&cfg).await;
                    if !hook.planned.cancelled() {
                        hook.notifier.success("Línea prevista añadida");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
            hook.saving.set(false);
        });
    }

    pub fn update_planned(&self, detail_id: u32, product_id: u32, quantity_kg: f64) {
        let Some(cfg) = self.cfg() else { return };
        if quantity_kg <= 0.0 {
            self.notifier.error("La cantidad prevista debe ser mayor que cero");
            return;
        }
        let hook = self.clone();
        spawn_local(async move {
            let payload = PlannedPayload {
                product_id,
                quantity_kg,
            };
            match api::orders::update_planned(&cfg, hook.order_id, detail_id, &payload).await {
                Ok(_) => {
                    hook.refetch_planned(&cfg).await;
                    if !hook.planned.cancelled() {
                        hook.notifier.success("Línea prevista actualizada");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
        });
    }

    pub fn delete_planned(&self, detail_id: u32) {
        let Some(cfg) = self.cfg() else { return };
        let hook = self.clone();
        spawn_local(async move {
            match api::orders::delete_planned(&cfg, hook.order_id, detail_id).await {
                Ok(()) => {
                    hook.refetch_planned(&cfg).await;
                    if !hook.planned.cancelled() {
                        hook.notifier.success("Línea prevista eliminada");
                    }
                }
                Err(err) => hook.notifier.error(err.user_message()),
            }
        });
    }
}
