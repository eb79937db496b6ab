//! Production Inputs Panel Component
//!
//! Inputs of the open production grouped by pallet, with totals and
//! per-input delete. The box picker dialog feeds this panel's hook.

use leptos::prelude::*;

use crate::components::{BoxPicker, DeleteConfirmButton};
use crate::hooks::{Phase, ProductionInputsHook};

#[component]
pub fn InputsPanel(hook: ProductionInputsHook) -> impl IntoView {
    let (picker_open, set_picker_open) = signal(false);

    let groups = hook.pallet_groups();
    let totals = hook.totals();
    let error = hook.list.error();
    let phase = hook.list.phase();

    let delete_hook = hook.clone();
    let delete_all_hook = hook.clone();
    let picker_hook = hook.clone();

    view! {
        <section class="inputs-panel">
            <div class="panel-header">
                <h2>"Entradas"</h2>
                <button on:click=move |_| set_picker_open.set(true)>"Añadir cajas"</button>
                <DeleteConfirmButton
                    button_class="delete-all-btn"
                    on_confirm=Callback::new(move |_| delete_all_hook.delete_all())
                />
            </div>

            {move || error.get().map(|msg| view! {
                <div class="panel-error">{msg}</div>
            })}
            {move || (phase.get() == Phase::Loading).then(|| view! {
                <p class="loading">"Cargando entradas..."</p>
            })}

            <For
                each=move || groups.get()
                key=|group| group.pallet_id
                children=move |group| {
                    let delete_hook = delete_hook.clone();
                    view! {
                        <div class="pallet-group">
                            <div class="pallet-group-header">
                                <span class="pallet-code">{format!("Palet #{}", group.pallet_id)}</span>
                                <span>{format!("{} cajas · {:.2} kg", group.boxes, group.weight_kg)}</span>
                            </div>
                            <table class="pallet-products">
                                <tbody>
                                    <For
                                        each={
                                            let products = group.products.clone();
                                            move || products.clone()
                                        }
                                        key=|p| p.product_id
                                        children=move |p| view! {
                                            <tr>
                                                <td>{p.product_name.clone()}</td>
                                                <td>{format!("{} cajas", p.boxes)}</td>
                                                <td>{format!("{:.2} kg", p.weight_kg)}</td>
                                                <td class="lots">{p.lots.join(", ")}</td>
                                            </tr>
                                        }
                                    />
                                </tbody>
                            </table>
                            <ul class="pallet-inputs">
                                <For
                                    each={
                                        let hook = delete_hook.clone();
                                        let pallet_id = group.pallet_id;
                                        move || {
                                            hook.items()
                                                .get()
                                                .into_iter()
                                                .filter(|i| i.pallet_id == pallet_id)
                                                .collect::<Vec<_>>()
                                        }
                                    }
                                    key=|input| input.id
                                    children=move |input| {
                                        let hook = delete_hook.clone();
                                        let id = input.id;
                                        view! {
                                            <li class="input-row">
                                                <span>{input.product_name.clone()}</span>
                                                <span>{format!("{:.2} kg", input.weight_kg)}</span>
                                                <span class="lot">{input.lot.clone().unwrap_or_default()}</span>
                                                <DeleteConfirmButton
                                                    button_class="delete-btn"
                                                    on_confirm=Callback::new(move |_| hook.delete_input(id))
                                                />
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </div>
                    }
                }
            />

            <p class="panel-totals">
                {move || {
                    let t = totals.get();
                    format!(
                        "{} cajas · {:.2} kg · {} productos · {} palets",
                        t.boxes, t.weight_kg, t.distinct_products, t.distinct_pallets
                    )
                }}
            </p>

            {move || picker_open.get().then(|| {
                let hook = picker_hook.clone();
                view! {
                    <BoxPicker hook=hook on_close=Callback::new(move |_| set_picker_open.set(false)) />
                }
            })}
        </section>
    }
}
