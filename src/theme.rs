//! Light/dark theme preference, stored under its own key

use serde::Serialize;

use crate::consts::THEME_KEY;
use crate::error::StorageError;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Exact stored spelling only; anything else is not a theme
    pub(crate) fn from_stored(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Stored theme, or light when absent or unrecognised
pub(crate) fn load_theme(storage: &dyn Storage) -> Result<Theme, StorageError> {
    Ok(storage
        .get(THEME_KEY)?
        .as_deref()
        .and_then(Theme::from_stored)
        .unwrap_or_default())
}

pub(crate) fn save_theme(storage: &mut dyn Storage, theme: Theme) -> Result<(), StorageError> {
    storage.set(THEME_KEY, theme.as_str())
}

/// Forget the stored preference so the default applies again
pub(crate) fn reset_theme(storage: &mut dyn Storage) -> Result<Theme, StorageError> {
    storage.remove(THEME_KEY)?;
    load_theme(storage)
}

/// Switch to the other theme and persist it
pub(crate) fn toggle_theme(storage: &mut dyn Storage) -> Result<Theme, StorageError> {
    let next = load_theme(storage)?.next();
    save_theme(storage, next)?;
    Ok(next)
}
