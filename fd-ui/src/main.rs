//! FD Manager Web
//!
//! Browser front end for the Fixed Deposit management system, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Login with a session persisted in `localStorage`
//! - Dashboard totals and recent FDs
//! - FD creation with a live maturity preview
//! - Register with filters, FD details, premature closure and receipts
//! - System configuration and user management for supervisors
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Business rules live in the `fd-manager` core; this crate
//! supplies the `fetch`-based gateway and the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
