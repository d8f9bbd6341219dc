//! CareLink+ - sign-in screen and API gateway
//!
//! The login view for the referral-tracking application, built with Leptos
//! and WebAssembly, and the axum gateway that fronts its API.

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
