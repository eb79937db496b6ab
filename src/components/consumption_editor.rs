//! Consumption Editor Component
//!
//! Editable table of what the open production consumed from its upstream
//! record's output. Rows are local drafts until saved.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::hooks::ConsumptionsHook;
use crate::models::Product;
use crate::notify::use_notifier;

#[component]
pub fn ConsumptionEditor(hook: ConsumptionsHook) -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    if !hook.has_upstream() {
        return view! {
            <section class="consumption-editor">
                <h2>"Consumos"</h2>
                <p class="empty-state">"Esta producción no consume de ninguna producción anterior"</p>
            </section>
        }
        .into_any();
    }

    let (products, set_products) = signal(Vec::<Product>::new());

    Effect::new(move |_| {
        let Some(cfg) = ctx.config.get() else {
            return;
        };
        spawn_local(async move {
            match api::products::list(&cfg).await {
                Ok(page) => set_products.set(page.items),
                Err(err) => notifier.error(err.user_message()),
            }
        });
    });

    let row_hook = hook.clone();
    let add_hook = hook.clone();
    let save_hook = hook.clone();
    let reset_hook = hook.clone();
    let rows = hook.rows;
    let saving = hook.saving;
    let error = hook.list.error();

    view! {
        <section class="consumption-editor">
            <h2>"Consumos"</h2>

            {move || error.get().map(|msg| view! {
                <div class="panel-error">{msg}</div>
            })}

            <table class="consumption-table">
                <thead>
                    <tr>
                        <th>"Producto"</th>
                        <th>"Peso (kg)"</th>
                        <th>"Cajas"</th>
                        <th>"Lote"</th>
                        <th>"Notas"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|row| row.row_id
                        children=move |row| {
                            let hook = row_hook.clone();
                            let row_id = row.row_id;
                            let product_value = row.product_id.map(|id| id.to_string()).unwrap_or_default();
                            view! {
                                <tr class=if row.row_id.is_draft() { "row draft" } else { "row" }>
                                    <td>
                                        <select
                                            prop:value=product_value
                                            on:change={
                                                let hook = hook.clone();
                                                let products = products;
                                                move |ev| {
                                                    let chosen: Option<u32> = event_target_value(&ev).parse().ok();
                                                    let name = chosen.and_then(|id| {
                                                        products.get_untracked().iter().find(|p| p.id == id).map(|p| p.name.clone())
                                                    });
                                                    hook.update_row(row_id, |r| {
                                                        r.product_id = chosen;
                                                        r.product_name = name.unwrap_or_default();
                                                    });
                                                }
                                            }
                                        >
                                            <option value="">"—"</option>
                                            <For
                                                each=move || products.get()
                                                key=|p| p.id
                                                children=move |p| view! {
                                                    <option value=p.id.to_string()>{p.name.clone()}</option>
                                                }
                                            />
                                        </select>
                                    </td>
                                    <td>
                                        <input
                                            type="number"
                                            step="0.01"
                                            prop:value=format!("{}", row.weight_kg)
                                            on:input={
                                                let hook = hook.clone();
                                                move |ev| {
                                                    let weight: f64 = event_target_value(&ev).parse().unwrap_or(0.0);
                                                    hook.update_row(row_id, |r| r.weight_kg = weight);
                                                }
                                            }
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="number"
                                            prop:value=row.boxes.to_string()
                                            on:input={
                                                let hook = hook.clone();
                                                move |ev| {
                                                    let boxes: u32 = event_target_value(&ev).parse().unwrap_or(0);
                                                    hook.update_row(row_id, |r| r.boxes = boxes);
                                                }
                                            }
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            prop:value=row.lot.clone().unwrap_or_default()
                                            on:input={
                                                let hook = hook.clone();
                                                move |ev| {
                                                    let lot = event_target_value(&ev);
                                                    hook.update_row(row_id, |r| {
                                                        r.lot = (!lot.is_empty()).then_some(lot.clone());
                                                    });
                                                }
                                            }
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            prop:value=row.notes.clone().unwrap_or_default()
                                            on:input={
                                                let hook = hook.clone();
                                                move |ev| {
                                                    let notes = event_target_value(&ev);
                                                    hook.update_row(row_id, |r| {
                                                        r.notes = (!notes.is_empty()).then_some(notes.clone());
                                                    });
                                                }
                                            }
                                        />
                                    </td>
                                    <td>
                                        <button
                                            class="remove-btn"
                                            on:click={
                                                let hook = hook.clone();
                                                move |_| hook.remove_row(row_id)
                                            }
                                        >
                                            "×"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="editor-actions">
                <button on:click=move |_| add_hook.add_row()>"Añadir línea"</button>
                <button on:click=move |_| reset_hook.reset_rows()>"Descartar cambios"</button>
                <button
                    class="primary"
                    prop:disabled=move || saving.get()
                    on:click=move |_| save_hook.save()
                >
                    {move || if saving.get() { "Guardando..." } else { "Guardar consumos" }}
                </button>
            </div>
        </section>
    }
    .into_any()
}
