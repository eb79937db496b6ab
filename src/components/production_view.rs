//! Production View Component
//!
//! Production record selector plus the inputs panel and consumption editor
//! for the open record. Both hooks mirror the shared store caches, so the
//! two panels stay in sync without duplicate fetches.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ConsumptionEditor, InputsPanel};
use crate::context::use_app_context;
use crate::hooks::{use_output_consumptions, use_production_inputs};
use crate::models::Production;
use crate::notify::use_notifier;
use crate::store::{consumptions_cache, inputs_cache, store_open_production, use_app_store};

#[component]
fn OpenProduction(production: Production) -> impl IntoView {
    let store = use_app_store();
    store_open_production(&store, production.id);

    let inputs = use_production_inputs(production.id, Some(inputs_cache(&store)), None);
    let consumptions = use_output_consumptions(
        production.id,
        production.upstream_production_id,
        Some(consumptions_cache(&store)),
        None,
    );

    view! {
        <div class="open-production">
            <h2>
                {format!("Producción {}", production.code)}
                {production
                    .product_name
                    .as_ref()
                    .map(|name| format!(" · {}", name))
                    .unwrap_or_default()}
            </h2>
            <InputsPanel hook=inputs />
            <ConsumptionEditor hook=consumptions />
        </div>
    }
}

#[component]
pub fn ProductionView() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let (productions, set_productions) = signal(Vec::<Production>::new());
    let (selected, set_selected) = signal::<Option<Production>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(cfg) = ctx.config.get() else {
            return;
        };
        spawn_local(async move {
            match api::productions::list(&cfg, 1).await {
                Ok(page) => set_productions.set(page.items),
                Err(err) => notifier.error(err.user_message()),
            }
        });
    });

    view! {
        <div class="production-view">
            <aside class="production-list">
                <h2>"Producciones"</h2>
                <For
                    each=move || productions.get()
                    key=|p| p.id
                    children=move |p| {
                        let id = p.id;
                        let row = p.clone();
                        let is_open = move || selected.get().map(|s| s.id) == Some(id);
                        view! {
                            <button
                                class=move || if is_open() { "production-row open" } else { "production-row" }
                                on:click=move |_| set_selected.set(Some(row.clone()))
                            >
                                <span class="code">{p.code.clone()}</span>
                                <span class="date">
                                    {p.date.map(|d| d.to_string()).unwrap_or_default()}
                                </span>
                            </button>
                        }
                    }
                />
            </aside>

            <div class="production-detail">
                {move || match selected.get() {
                    Some(production) => view! {
                        <OpenProduction production=production />
                    }
                    .into_any(),
                    None => view! {
                        <p class="empty-state">"Elige una producción"</p>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
