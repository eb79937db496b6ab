#![allow(warnings)]
//! Admin UI Entry Point

mod api;
mod app;
mod cancel;
mod components;
mod context;
mod hooks;
mod models;
mod notify;
mod picking;
mod store;
mod summary;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
