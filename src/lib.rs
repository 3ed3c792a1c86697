//! Locale-aware routing and navigation resolution for a multi-locale web
//! front end.
//!
//! Every incoming request is assigned exactly one active locale, every
//! internal navigation carries that locale, and the protected area redirects
//! anonymous visitors without losing it. Page content, identity, profile
//! storage, and theming are external collaborators behind the narrow
//! interfaces in [`session`].

pub mod auth_gate;
pub mod config;
pub mod i18n;
pub mod navigation;
pub mod path;
pub mod resolver;
pub mod server;
pub mod session;
pub mod static_params;

pub use i18n::{Locale, LocaleRegistry};
pub use resolver::RedirectDecision;
