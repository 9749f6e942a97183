//! Theme Tools

use serde::Serialize;

use crate::history::{SettingsStore, ThemePreference};
use crate::session::ConverterSession;

/// Response for the theme tools
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: ThemePreference,
    pub toggle_label: &'static str,
}

impl From<ThemePreference> for ThemeResponse {
    fn from(theme: ThemePreference) -> Self {
        Self {
            theme,
            toggle_label: theme.toggle_label(),
        }
    }
}

pub fn get_theme<S: SettingsStore>(session: &ConverterSession<S>) -> ThemeResponse {
    session.theme().into()
}

pub fn set_theme<S: SettingsStore>(
    session: &mut ConverterSession<S>,
    theme: &str,
) -> Result<ThemeResponse, String> {
    let theme = ThemePreference::from_str(theme)
        .ok_or_else(|| format!("Unknown theme '{}': expected 'light' or 'dark'", theme))?;
    session
        .set_theme(theme)
        .map(ThemeResponse::from)
        .map_err(|e| format!("Failed to save theme: {}", e))
}

pub fn toggle_theme<S: SettingsStore>(
    session: &mut ConverterSession<S>,
) -> Result<ThemeResponse, String> {
    session
        .toggle_theme()
        .map(ThemeResponse::from)
        .map_err(|e| format!("Failed to save theme: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{UnitCatalog, UnitConverter};
    use crate::history::MemoryStore;

    fn session() -> ConverterSession<MemoryStore> {
        let converter = UnitConverter::new(UnitCatalog::builtin().unwrap());
        ConverterSession::new(converter, MemoryStore::new())
    }

    #[test]
    fn test_set_and_toggle_theme() {
        let mut s = session();
        assert_eq!(get_theme(&s).theme, ThemePreference::Light);

        let response = set_theme(&mut s, "dark").unwrap();
        assert_eq!(response.theme, ThemePreference::Dark);
        assert_eq!(response.toggle_label, "☀️");

        let response = toggle_theme(&mut s).unwrap();
        assert_eq!(response.theme, ThemePreference::Light);
    }

    #[test]
    fn test_set_unknown_theme() {
        let mut s = session();
        assert!(set_theme(&mut s, "sepia").is_err());
        assert_eq!(s.theme(), ThemePreference::Light);
    }
}
