//! Admin UI App
//!
//! Main application component with section tabs.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{NoticeArea, OrdersView, ProductionView, PunchSheet, SettingsForm};
use crate::context::{load_config, ApiConfig, AppContext};
use crate::notify::Notifier;
use crate::store::AppState;

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Production,
    Orders,
    Punches,
    Settings,
}

const SECTIONS: &[(Section, &str)] = &[
    (Section::Production, "Producción"),
    (Section::Orders, "Pedidos"),
    (Section::Punches, "Fichajes"),
    (Section::Settings, "Ajustes"),
];

#[component]
pub fn App() -> impl IntoView {
    // State
    let (config, set_config) = signal::<Option<ApiConfig>>(load_config());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let has_config = move || config.get().is_some();
    let (section, set_section) = signal(Section::Production);

    // Provide context to all children
    let ctx = AppContext::new((config, set_config), (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    provide_context(Notifier::new());
    provide_context(Store::new(AppState::default()));

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Pesquera"</h1>
                <nav class="section-tabs">
                    {SECTIONS
                        .iter()
                        .map(|(value, label)| {
                            let value = *value;
                            view! {
                                <button
                                    class=move || {
                                        if section.get() == value { "tab active" } else { "tab" }
                                    }
                                    on:click=move |_| set_section.set(value)
                                >
                                    {*label}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <button class="reload-btn" title="Recargar listas" on:click=move |_| ctx.reload()>
                    "↻"
                </button>
            </header>

            <main class="main-content">
                {move || {
                    if !has_config() && section.get() != Section::Settings {
                        return view! {
                            <div class="connect-first">
                                <p>"Configura la conexión con el servidor para empezar"</p>
                                <SettingsForm />
                            </div>
                        }
                        .into_any();
                    }
                    match section.get() {
                        Section::Production => view! { <ProductionView /> }.into_any(),
                        Section::Orders => view! { <OrdersView /> }.into_any(),
                        Section::Punches => view! { <PunchSheet /> }.into_any(),
                        Section::Settings => view! { <SettingsForm /> }.into_any(),
                    }
                }}
            </main>

            <NoticeArea />
        </div>
    }
}
