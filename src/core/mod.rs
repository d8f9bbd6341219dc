//! Core models and the server-side request pipeline

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod gateway;
#[cfg(feature = "ssr")]
pub mod routes;
pub mod session;

pub use session::*;
