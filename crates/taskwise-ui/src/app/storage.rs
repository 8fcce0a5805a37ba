use std::collections::BTreeSet;

use taskwise_shared::timer::TimerSettings;

pub const THEME_STORAGE_KEY: &str = "taskwise.theme";
pub const FOCUS_SETTINGS_STORAGE_KEY: &str = "taskwise.focus.settings";
pub const REMINDERS_SENT_STORAGE_KEY: &str = "taskwise.reminders.sent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub fn load_theme_mode() -> ThemeMode {
    let stored = local_storage().and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten());

    match stored.as_deref() {
        Some("dark") => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

pub fn save_theme_mode(theme: ThemeMode) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.storage_value());
    }
}

pub fn load_timer_settings() -> TimerSettings {
    let stored =
        local_storage().and_then(|storage| storage.get_item(FOCUS_SETTINGS_STORAGE_KEY).ok().flatten());

    if let Some(raw) = stored {
        match serde_json::from_str::<TimerSettings>(&raw) {
            Ok(settings) => return settings,
            Err(error) => {
                tracing::error!(%error, "failed parsing timer settings from local storage");
            }
        }
    }

    TimerSettings::default()
}

pub fn save_timer_settings(settings: &TimerSettings) {
    if let Some(storage) = local_storage()
        && let Ok(json) = serde_json::to_string(settings)
    {
        let _ = storage.set_item(FOCUS_SETTINGS_STORAGE_KEY, &json);
    }
}

pub fn load_sent_reminders() -> BTreeSet<String> {
    let stored =
        local_storage().and_then(|storage| storage.get_item(REMINDERS_SENT_STORAGE_KEY).ok().flatten());

    if let Some(raw) = stored {
        match serde_json::from_str::<BTreeSet<String>>(&raw) {
            Ok(values) => return values,
            Err(error) => {
                tracing::error!(%error, "failed parsing reminder registry from local storage");
            }
        }
    }

    BTreeSet::new()
}

pub fn save_sent_reminders(sent: &BTreeSet<String>) {
    if let Some(storage) = local_storage()
        && let Ok(json) = serde_json::to_string(sent)
    {
        let _ = storage.set_item(REMINDERS_SENT_STORAGE_KEY, &json);
    }
}
