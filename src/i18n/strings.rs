//! Per-locale UI string bundles.
//!
//! The routing layer only *selects* which bundle a page loads; actual copy
//! lives with the rendering collaborator. The handful of strings kept here
//! cover the shell pages this crate renders itself (login, placeholder,
//! not-found).

use crate::i18n::Locale;

/// The user-facing strings for one locale.
#[derive(Debug, Clone)]
pub struct UiStrings {
    /// Home page title
    pub home_title: &'static str,

    /// Login page title
    pub login_title: &'static str,

    /// Prompt shown on the login page
    pub login_prompt: &'static str,

    /// Protected-area page title
    pub app_title: &'static str,

    /// Neutral placeholder shown while the session state is undetermined
    pub session_loading: &'static str,

    /// Not-found page body
    pub not_found: &'static str,

    /// Label of the "return home" affordance on the not-found page
    pub return_home: &'static str,
}

// ==================== English Strings ====================

pub const EN_STRINGS: UiStrings = UiStrings {
    home_title: "Welcome",
    login_title: "Sign in",
    login_prompt: "Sign in to continue",
    app_title: "Dashboard",
    session_loading: "Checking your session…",
    not_found: "This page does not exist.",
    return_home: "Return home",
};

// ==================== Spanish Strings ====================

pub const ES_STRINGS: UiStrings = UiStrings {
    home_title: "Bienvenido",
    login_title: "Iniciar sesión",
    login_prompt: "Inicia sesión para continuar",
    app_title: "Panel",
    session_loading: "Comprobando tu sesión…",
    not_found: "Esta página no existe.",
    return_home: "Volver al inicio",
};

// ==================== French Strings ====================

pub const FR_STRINGS: UiStrings = UiStrings {
    home_title: "Bienvenue",
    login_title: "Connexion",
    login_prompt: "Connectez-vous pour continuer",
    app_title: "Tableau de bord",
    session_loading: "Vérification de votre session…",
    not_found: "Cette page n'existe pas.",
    return_home: "Retour à l'accueil",
};

// ==================== German Strings ====================

pub const DE_STRINGS: UiStrings = UiStrings {
    home_title: "Willkommen",
    login_title: "Anmelden",
    login_prompt: "Melden Sie sich an, um fortzufahren",
    app_title: "Übersicht",
    session_loading: "Sitzung wird geprüft…",
    not_found: "Diese Seite existiert nicht.",
    return_home: "Zur Startseite",
};

// ==================== Italian Strings ====================

pub const IT_STRINGS: UiStrings = UiStrings {
    home_title: "Benvenuto",
    login_title: "Accedi",
    login_prompt: "Accedi per continuare",
    app_title: "Pannello",
    session_loading: "Verifica della sessione…",
    not_found: "Questa pagina non esiste.",
    return_home: "Torna alla home",
};

/// Select the string bundle for a locale.
///
/// Unrecognized codes (e.g., locales added through configuration without a
/// bundle of their own) fall back to the English bundle.
pub fn for_locale(locale: Locale) -> &'static UiStrings {
    match locale.code() {
        "es" => &ES_STRINGS,
        "fr" => &FR_STRINGS,
        "de" => &DE_STRINGS,
        "it" => &IT_STRINGS,
        _ => &EN_STRINGS,
    }
}
