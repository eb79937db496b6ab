//! Settings Form Component
//!
//! Backend URL and token, persisted in localStorage.

use leptos::prelude::*;

use crate::context::{use_app_context, ApiConfig};
use crate::notify::use_notifier;

#[component]
pub fn SettingsForm() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let current = ctx.config.get_untracked();
    let (base_url, set_base_url) = signal(current.as_ref().map(|c| c.base_url.clone()).unwrap_or_default());
    let (token, set_token) = signal(current.as_ref().map(|c| c.token.clone()).unwrap_or_default());

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let cfg = ApiConfig {
            base_url: base_url.get().trim().to_string(),
            token: token.get().trim().to_string(),
        };
        if !cfg.is_complete() {
            notifier.error("Hacen falta la URL del servidor y el token");
            return;
        }
        ctx.set_config(cfg);
        notifier.success("Conexión guardada");
    };

    view! {
        <form class="settings-form" on:submit=on_save>
            <h2>"Conexión"</h2>
            <label>
                "Servidor"
                <input
                    type="url"
                    placeholder="https://erp.example.com/api"
                    prop:value=move || base_url.get()
                    on:input=move |ev| set_base_url.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Token"
                <input
                    type="password"
                    prop:value=move || token.get()
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                />
            </label>
            <button type="submit">"Guardar"</button>
        </form>
    }
}
