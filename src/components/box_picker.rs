//! Box Picker Dialog Component
//!
//! Lets an operator pick physical boxes for the open production: weight
//! search against a scale reading, greedy packing toward a target weight,
//! or pasted GS1-128 scans. Selection stays local until confirmed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::hooks::ProductionInputsHook;
use crate::models::Pallet;
use crate::notify::use_notifier;
use crate::picking::EXACT_TOLERANCE_KG;

#[derive(Clone, Copy, PartialEq)]
enum PickerTab {
    Search,
    Target,
    Scan,
}

#[component]
pub fn BoxPicker(
    hook: ProductionInputsHook,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let (pallets, set_pallets) = signal(Vec::<Pallet>::new());
    let (loading, set_loading) = signal(true);
    let (tab, set_tab) = signal(PickerTab::Search);

    let (search_weight, set_search_weight) = signal(String::new());
    let (tolerance, set_tolerance) = signal(String::new());
    let (fuzzy, set_fuzzy) = signal(false);
    let (target_weight, set_target_weight) = signal(String::new());
    let (scan_text, set_scan_text) = signal(String::new());

    // Load available pallets when the dialog opens
    Effect::new(move |_| {
        let Some(cfg) = ctx.config.get() else {
            return;
        };
        spawn_local(async move {
            match api::pallets::list(&cfg, true).await {
                Ok(page) => set_pallets.set(page.items),
                Err(err) => notifier.error(err.user_message()),
            }
            set_loading.set(false);
        });
    });

    let search_hook = hook.clone();
    let matches = move || {
        let target: f64 = search_weight.get().parse().unwrap_or(0.0);
        if target <= 0.0 {
            return Vec::new();
        }
        let band = if fuzzy.get() {
            tolerance.get().parse().unwrap_or(EXACT_TOLERANCE_KG)
        } else {
            EXACT_TOLERANCE_KG
        };
        search_hook.search_by_weight(&pallets.get(), target, band)
    };

    let target_hook = hook.clone();
    let on_pack = move |_| {
        let target: f64 = target_weight.get().parse().unwrap_or(0.0);
        target_hook.select_to_target(&pallets.get_untracked(), target);
    };

    let scan_hook = hook.clone();
    let on_scan = move |_| {
        let pasted = scan_text.get();
        scan_hook.select_scanned(&pallets.get_untracked(), &pasted);
        set_scan_text.set(String::new());
    };

    let toggle_hook = hook.clone();
    let confirm_hook = hook.clone();
    let replace_hook = hook.clone();
    let clear_hook = hook.clone();
    let selected = hook.selected;
    let saving = hook.saving;

    view! {
        <div class="dialog-backdrop">
            <div class="dialog box-picker">
                <div class="dialog-header">
                    <h3>"Seleccionar cajas"</h3>
                    <button class="close-btn" on:click=move |_| on_close.run(())>"✕"</button>
                </div>

                <div class="picker-tabs">
                    <button
                        class=move || if tab.get() == PickerTab::Search { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(PickerTab::Search)
                    >
                        "Por peso"
                    </button>
                    <button
                        class=move || if tab.get() == PickerTab::Target { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(PickerTab::Target)
                    >
                        "Peso objetivo"
                    </button>
                    <button
                        class=move || if tab.get() == PickerTab::Scan { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(PickerTab::Scan)
                    >
                        "Escanear"
                    </button>
                </div>

                {move || loading.get().then(|| view! { <p class="loading">"Cargando palets..."</p> })}

                {move || (tab.get() == PickerTab::Search).then(|| {
                    let toggle_hook = toggle_hook.clone();
                    let matches = matches.clone();
                    view! {
                        <div class="picker-search">
                            <div class="search-controls">
                                <input
                                    type="number"
                                    step="0.01"
                                    placeholder="Peso en báscula (kg)"
                                    prop:value=move || search_weight.get()
                                    on:input=move |ev| set_search_weight.set(event_target_value(&ev))
                                />
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || fuzzy.get()
                                        on:change=move |_| set_fuzzy.update(|v| *v = !*v)
                                    />
                                    "Búsqueda aproximada"
                                </label>
                                {move || fuzzy.get().then(|| view! {
                                    <input
                                        type="number"
                                        step="0.01"
                                        placeholder="Tolerancia (kg)"
                                        prop:value=move || tolerance.get()
                                        on:input=move |ev| set_tolerance.set(event_target_value(&ev))
                                    />
                                })}
                            </div>
                            <ul class="search-results">
                                <For
                                    each=matches.clone()
                                    key=|m| m.record.key()
                                    children=move |m| {
                                        let hook = toggle_hook.clone();
                                        let record = m.record.clone();
                                        view! {
                                            <li class="search-result" on:click=move |_| hook.toggle_selected(&record)>
                                                <span>{m.record.product_name.clone()}</span>
                                                <span>{format!("{:.2} kg", m.record.weight_kg)}</span>
                                                <span class="lot">{m.record.lot.clone().unwrap_or_default()}</span>
                                                <span class="difference">{format!("±{:.3}", m.difference_kg)}</span>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </div>
                    }
                })}

                {move || (tab.get() == PickerTab::Target).then(|| {
                    let on_pack = on_pack.clone();
                    view! {
                        <div class="picker-target">
                            <input
                                type="number"
                                step="0.01"
                                placeholder="Peso total deseado (kg)"
                                prop:value=move || target_weight.get()
                                on:input=move |ev| set_target_weight.set(event_target_value(&ev))
                            />
                            <button on:click=on_pack>"Completar selección"</button>
                            <p class="hint">
                                "Se eligen primero las cajas más pesadas sin pasarse del objetivo; \
                                 la combinación puede no ser la más ajustada posible."
                            </p>
                        </div>
                    }
                })}

                {move || (tab.get() == PickerTab::Scan).then(|| {
                    let on_scan = on_scan.clone();
                    view! {
                        <div class="picker-scan">
                            <textarea
                                placeholder="Pega aquí los códigos, uno por línea"
                                prop:value=move || scan_text.get()
                                on:input=move |ev| set_scan_text.set(event_target_value(&ev))
                            ></textarea>
                            <button on:click=on_scan>"Añadir escaneadas"</button>
                        </div>
                    }
                })}

                <div class="picker-selection">
                    <h4>
                        {move || {
                            let sel = selected.get();
                            let total: f64 = sel.iter().map(|b| b.weight_kg).sum();
                            format!("Seleccionadas: {} cajas · {:.2} kg", sel.len(), total)
                        }}
                    </h4>
                    <ul>
                        <For
                            each=move || selected.get()
                            key=|b| b.key()
                            children=move |b| {
                                let hook = clear_hook.clone();
                                let record = b.clone();
                                view! {
                                    <li>
                                        <span>{b.product_name.clone()}</span>
                                        <span>{format!("{:.2} kg", b.weight_kg)}</span>
                                        <button class="remove-btn" on:click=move |_| hook.toggle_selected(&record)>
                                            "×"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>

                <div class="dialog-actions">
                    <button
                        prop:disabled=move || saving.get()
                        on:click=move |_| confirm_hook.confirm_selection()
                    >
                        {move || if saving.get() { "Guardando..." } else { "Añadir a la producción" }}
                    </button>
                    <DeleteConfirmButton
                        button_class="replace-all-btn"
                        on_confirm=Callback::new(move |_| replace_hook.replace_with_selection())
                    />
                    <span class="hint">"× reemplaza todas las entradas por la selección"</span>
                </div>
            </div>
        </div>
    }
}
