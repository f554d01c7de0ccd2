//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to services,
//! and hosts the playback coordinator that decides which clips actually play.

mod app;
mod config;
mod playback;
mod policy;
mod preferences;
mod runtime;
mod services;
mod state;

pub(crate) use crate::app::AppContext;
pub use crate::runtime::run;
