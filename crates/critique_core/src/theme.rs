use serde::{Deserialize, Serialize};

use critique_logging::critique_warn;

use crate::{StateKey, StateStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` is light.
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim() == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reads the persisted theme flag; failures fall back to light.
pub fn load_theme(store: &impl StateStore) -> Theme {
    match store.get(StateKey::Theme) {
        Ok(flag) => flag.as_deref().map(Theme::from_flag).unwrap_or_default(),
        Err(err) => {
            critique_warn!("Failed to read theme flag: {}", err);
            Theme::default()
        }
    }
}

pub fn save_theme(store: &impl StateStore, theme: Theme) -> Result<(), StoreError> {
    store.set(StateKey::Theme, theme.as_str())
}
