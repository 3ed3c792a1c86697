//! Internationalization (i18n) module for multi-locale routing.
//!
//! This module owns everything locale-shaped: the registry of supported
//! locales, the validated `Locale` handle the rest of the crate passes
//! around, Accept-Language negotiation, and the small UI string bundles the
//! shell pages load.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and the default
//! - `locale`: Validated, copyable locale handle
//! - `detect`: Best-effort Accept-Language negotiation
//! - `strings`: Per-locale UI string bundles (bundle selection only)

mod detect;
mod locale;
mod registry;
mod strings;

pub use detect::negotiate;
pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::{for_locale, UiStrings};
