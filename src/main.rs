#![allow(warnings)]
//! Todo Widget Frontend Entry Point

mod models;
mod persist;
mod store;
mod render;
mod events;
mod context;
mod components;
mod logging;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
