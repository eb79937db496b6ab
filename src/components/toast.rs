//! Notice Area Component
//!
//! Renders the notifier's queue as dismissible toasts.

use leptos::prelude::*;

use crate::notify::{use_notifier, NoticeLevel};

#[component]
pub fn NoticeArea() -> impl IntoView {
    let notifier = use_notifier();
    let notices = notifier.notices();

    view! {
        <div class="notice-area">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.level {
                        NoticeLevel::Success => "notice notice-success",
                        NoticeLevel::Error => "notice notice-error",
                    };
                    view! {
                        <div class=class>
                            <span class="notice-text">{notice.text.clone()}</span>
                            <button class="notice-dismiss" on:click=move |_| notifier.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
