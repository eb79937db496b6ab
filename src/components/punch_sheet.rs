//! Punch Sheet Component
//!
//! Imports a scanned time-sheet PDF (analyzed server side with a bounded,
//! cancellable poll), previews the extracted punches, uploads them as one
//! batch, and shows per-worker statistics.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, ApiError, BulkReport};
use crate::cancel::CancelToken;
use crate::context::use_app_context;
use crate::models::{PunchRow, WorkerStats};
use crate::notify::use_notifier;

#[component]
pub fn PunchSheet() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let (rows, set_rows) = signal(Vec::<PunchRow>::new());
    let (analyzing, set_analyzing) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let (report, set_report) = signal::<Option<BulkReport>>(None);
    let cancel = StoredValue::new(CancelToken::new());

    let (stats_from, set_stats_from) = signal(String::new());
    let (stats_to, set_stats_to) = signal(String::new());
    let (stats, set_stats) = signal(Vec::<WorkerStats>::new());

    // A poll still running when the section unmounts must die with it
    on_cleanup(move || cancel.get_value().cancel());

    let on_file = move |ev: web_sys::Event| {
        let Some(cfg) = ctx.config.get_untracked() else {
            return;
        };
        let Some(target) = ev.target() else { return };
        let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>().cloned() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let token = CancelToken::new();
        cancel.set_value(token.clone());
        set_analyzing.set(true);
        set_report.set(None);
        spawn_local(async move {
            let outcome = async {
                let location = api::analysis::submit(&cfg, &file).await?;
                api::analysis::poll(&cfg, &location, &token).await
            }
            .await;
            match outcome {
                Ok(extracted) => {
                    if extracted.is_empty() {
                        notifier.error("El parte no contiene fichajes");
                    } else {
                        notifier.success(format!("{} fichajes extraídos", extracted.len()));
                        set_rows.set(extracted);
                    }
                }
                Err(ApiError::Cancelled) => {}
                Err(err) => notifier.error(err.user_message()),
            }
            set_analyzing.set(false);
            input.set_value("");
        });
    };

    let on_cancel_analysis = move |_| {
        cancel.get_value().cancel();
        set_analyzing.set(false);
    };

    let on_upload = move |_| {
        let Some(cfg) = ctx.config.get_untracked() else {
            return;
        };
        let batch = rows.get_untracked();
        if batch.is_empty() {
            notifier.error("No hay fichajes que subir");
            return;
        }
        set_uploading.set(true);
        spawn_local(async move {
            match api::punches::bulk_create(&cfg, &batch).await {
                Ok(result) => {
                    match result.failure_summary() {
                        Some(detail) => notifier.error(detail),
                        None => {
                            notifier.success(format!("{} fichajes registrados", result.created));
                            set_rows.set(Vec::new());
                        }
                    }
                    set_report.set(Some(result));
                }
                Err(err) => notifier.error(err.user_message()),
            }
            set_uploading.set(false);
        });
    };

    let on_load_stats = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(cfg) = ctx.config.get_untracked() else {
            return;
        };
        let (Ok(from), Ok(to)) = (
            stats_from.get().parse::<NaiveDate>(),
            stats_to.get().parse::<NaiveDate>(),
        ) else {
            notifier.error("Elige las dos fechas");
            return;
        };
        spawn_local(async move {
            match api::punches::worker_stats(&cfg, from, to).await {
                Ok(loaded) => set_stats.set(loaded),
                Err(err) => notifier.error(err.user_message()),
            }
        });
    };

    view! {
        <div class="punch-sheet">
            <section class="punch-import">
                <h2>"Importar parte de horas"</h2>
                <input type="file" accept="application/pdf" on:change=on_file />
                {move || analyzing.get().then(|| view! {
                    <div class="analysis-progress">
                        <span class="spinner"></span>
                        "Analizando el PDF..."
                        <button on:click=on_cancel_analysis>"Cancelar"</button>
                    </div>
                })}

                <Show when=move || !rows.get().is_empty()>
                    <table class="punch-preview">
                        <thead>
                            <tr>
                                <th>"Empleado"</th>
                                <th>"Tipo"</th>
                                <th>"Fecha y hora"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each={move || rows.get().into_iter().enumerate().collect::<Vec<_>>()}
                                key=|(i, _)| *i
                                children=move |(_, row)| view! {
                                    <tr>
                                        <td>{row.employee_code.clone()}</td>
                                        <td>{row.kind.label()}</td>
                                        <td>{row.at.format("%d/%m/%Y %H:%M").to_string()}</td>
                                    </tr>
                                }
                            />
                        </tbody>
                    </table>
                    <button
                        class="primary"
                        prop:disabled=move || uploading.get()
                        on:click=on_upload
                    >
                        {move || if uploading.get() { "Subiendo..." } else { "Registrar fichajes" }}
                    </button>
                </Show>

                {move || report.get().map(|r| view! {
                    <div class="bulk-report">
                        <p>{format!("{} registrados, {} rechazados", r.created, r.failed)}</p>
                        <ul>
                            {r.errors
                                .iter()
                                .map(|e| view! { <li class="bulk-error">{e.clone()}</li> })
                                .collect_view()}
                        </ul>
                    </div>
                })}
            </section>

            <section class="punch-stats">
                <h2>"Horas por trabajador"</h2>
                <form class="stats-range" on:submit=on_load_stats>
                    <input
                        type="date"
                        prop:value=move || stats_from.get()
                        on:input=move |ev| set_stats_from.set(event_target_value(&ev))
                    />
                    <input
                        type="date"
                        prop:value=move || stats_to.get()
                        on:input=move |ev| set_stats_to.set(event_target_value(&ev))
                    />
                    <button type="submit">"Consultar"</button>
                </form>
                <table class="stats-table">
                    <tbody>
                        <For
                            each=move || stats.get()
                            key=|s| s.employee_id
                            children=move |s| view! {
                                <tr>
                                    <td>{s.employee_name.clone()}</td>
                                    <td>{format!("{:.2} h", s.total_hours)}</td>
                                    <td>{format!("{} fichajes", s.punches)}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </section>
        </div>
    }
}
