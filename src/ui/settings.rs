use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct AppSettings {
    pub ui_scale: f32,

    /// Credential for the summary service. The environment variable
    /// takes precedence; see [`AppSettings::resolve_api_key`].
    pub gemini_api_key: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            gemini_api_key: None,
        }
    }
}

impl AppSettings {
    /// Resolve the credential once, at startup: GEMINI_API_KEY first,
    /// then the settings file. Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.gemini_api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}
