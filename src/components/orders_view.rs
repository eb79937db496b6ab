//! Orders View Component
//!
//! Searchable order list plus the reconciled planned-vs-produced detail of
//! the selected order.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::hooks::use_order_details;
use crate::models::{MergedStatus, Order, Product};
use crate::notify::use_notifier;

fn status_badge(status: MergedStatus) -> (&'static str, &'static str) {
    match status {
        MergedStatus::Success => ("badge badge-success", "Completo"),
        MergedStatus::Difference => ("badge badge-difference", "Desviación"),
        MergedStatus::Pending => ("badge badge-pending", "Pendiente"),
        MergedStatus::NoPlanned => ("badge badge-noplanned", "Sin previsión"),
    }
}

#[component]
fn OrderDetail(order: Order) -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();
    let hook = use_order_details(order.id, None);

    let (products, set_products) = signal(Vec::<Product>::new());
    let (new_product, set_new_product) = signal(String::new());
    let (new_quantity, set_new_quantity) = signal(String::new());

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

    let merged = hook.merged();
    let planned = hook.planned.items();
    let delete_hook = hook.clone();
    let add_hook = hook.clone();

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(product_id) = new_product.get().parse::<u32>().ok() else {
            return;
        };
        let quantity: f64 = new_quantity.get().parse().unwrap_or(0.0);
        add_hook.add_planned(product_id, quantity);
        set_new_quantity.set(String::new());
    };

    view! {
        <div class="order-detail">
            <h2>{format!("Pedido {} · {}", order.code, order.customer_name)}</h2>

            <table class="merged-table">
                <thead>
                    <tr>
                        <th>"Producto"</th>
                        <th>"Previsto (kg)"</th>
                        <th>"Producido (kg)"</th>
                        <th>"Diferencia"</th>
                        <th>"Estado"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || merged.get()
                        key=|m| m.product_id
                        children=move |m| {
                            let (badge_class, badge_text) = status_badge(m.status);
                            let delete_hook = delete_hook.clone();
                            let planned = planned;
                            let product_id = m.product_id;
                            view! {
                                <tr>
                                    <td>{m.product_name.clone()}</td>
                                    <td>
                                        {m.planned_kg
                                            .map(|kg| format!("{:.2}", kg))
                                            .unwrap_or_else(|| "—".to_string())}
                                    </td>
                                    <td>{format!("{:.2}", m.produced_kg)}</td>
                                    <td>{format!("{:+.2}", -m.difference_kg)}</td>
                                    <td><span class=badge_class>{badge_text}</span></td>
                                    <td>
                                        {move || {
                                            let detail = planned
                                                .get()
                                                .into_iter()
                                                .find(|d| d.product_id == product_id);
                                            let hook = delete_hook.clone();
                                            detail.map(|detail| {
                                                let detail_id = detail.id;
                                                view! {
                                                    <DeleteConfirmButton
                                                        button_class="delete-btn"
                                                        on_confirm=Callback::new(move |_| {
                                                            hook.delete_planned(detail_id)
                                                        })
                                                    />
                                                }
                                            })
                                        }}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <form class="add-planned-form" on:submit=on_add>
                <select
                    prop:value=move || new_product.get()
                    on:change=move |ev| set_new_product.set(event_target_value(&ev))
                >
                    <option value="">"Producto..."</option>
                    <For
                        each=move || products.get()
                        key=|p| p.id
                        children=move |p| view! {
                            <option value=p.id.to_string()>{p.name.clone()}</option>
                        }
                    />
                </select>
                <input
                    type="number"
                    step="0.01"
                    placeholder="Cantidad prevista (kg)"
                    prop:value=move || new_quantity.get()
                    on:input=move |ev| set_new_quantity.set(event_target_value(&ev))
                />
                <button type="submit">"Añadir previsión"</button>
            </form>
        </div>
    }
}

#[component]
pub fn OrdersView() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (search, set_search) = signal(String::new());
    let (page, set_page) = signal(1u32);
    let (has_next, set_has_next) = signal(false);
    let (selected, set_selected) = signal::<Option<Order>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(cfg) = ctx.config.get() else {
            return;
        };
        let term = search.get();
        let current = page.get();
        spawn_local(async move {
            match api::orders::list(&cfg, current, Some(term.as_str())).await {
                Ok(result) => {
                    set_has_next.set(result.meta.has_next());
                    set_orders.set(result.items);
                }
                Err(err) => notifier.error(err.user_message()),
            }
        });
    });

    view! {
        <div class="orders-view">
            <aside class="order-list">
                <h2>"Pedidos"</h2>
                <input
                    type="search"
                    placeholder="Buscar pedido..."
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        set_page.set(1);
                        set_search.set(event_target_value(&ev));
                    }
                />
                <For
                    each=move || orders.get()
                    key=|o| o.id
                    children=move |o| {
                        let id = o.id;
                        let row = o.clone();
                        let is_open = move || selected.get().map(|s| s.id) == Some(id);
                        view! {
                            <button
                                class=move || if is_open() { "order-row open" } else { "order-row" }
                                on:click=move |_| set_selected.set(Some(row.clone()))
                            >
                                <span class="code">{o.code.clone()}</span>
                                <span class="customer">{o.customer_name.clone()}</span>
                            </button>
                        }
                    }
                />
                <div class="pagination">
                    <button
                        prop:disabled=move || page.get() <= 1
                        on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "←"
                    </button>
                    <span>{move || format!("Página {}", page.get())}</span>
                    <button
                        prop:disabled=move || !has_next.get()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        "→"
                    </button>
                </div>
            </aside>

            <div class="order-pane">
                {move || match selected.get() {
                    Some(order) => view! { <OrderDetail order=order /> }.into_any(),
                    None => view! { <p class="empty-state">"Elige un pedido"</p> }.into_any(),
                }}
            </div>
        </div>
    }
}
