//! Notification Channel
//!
//! All mutation outcomes funnel through one notifier rendered as toasts.
//! Success notices fade on their own; errors stay until dismissed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use gloo_timers::future::TimeoutFuture;

const SUCCESS_DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u32>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn notices(&self) -> Signal<Vec<Notice>> {
        self.notices.into()
    }

    fn push(&self, level: NoticeLevel, text: String) -> u32 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.notices.update(|all| all.push(Notice { id, level, text }));
        id
    }

    pub fn success(&self, text: impl Into<String>) {
        let id = self.push(NoticeLevel::Success, text.into());
        let notifier = *self;
        spawn_local(async move {
            TimeoutFuture::new(SUCCESS_DISMISS_MS).await;
            notifier.dismiss(id);
        });
    }

    pub fn error(&self, text: impl Into<String>) {
        let text = text.into();
        leptos::logging::warn!("{}", text);
        self.push(NoticeLevel::Error, text);
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|all| all.retain(|n| n.id != id));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}
