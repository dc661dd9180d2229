use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

use super::aws::non_empty;

pub const DEFAULT_VENDOR_MARKER: &str = "anthropic";
pub const DEFAULT_FAST_FAMILY: &str = "haiku";
pub const DEFAULT_FAST_FALLBACK_ID: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";

/// Inference profile lookup settings.
#[derive(Debug, Clone)]
pub struct ModelsSection {
    /// Substring every matching inference profile id must contain.
    pub vendor_marker: String,
    pub fast_family: String,
    pub fast_fallback_id: String,
}

impl Default for ModelsSection {
    fn default() -> Self {
        Self {
            vendor_marker: DEFAULT_VENDOR_MARKER.to_string(),
            fast_family: DEFAULT_FAST_FAMILY.to_string(),
            fast_fallback_id: DEFAULT_FAST_FALLBACK_ID.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawModelsSection {
    pub vendor_marker: Option<String>,
    pub fast_family: Option<String>,
    pub fast_fallback_id: Option<String>,
}

pub fn parse_models_section(
    raw: Option<RawModelsSection>,
    path: &Path,
) -> Result<ModelsSection, ConfigError> {
    let models_raw = raw.unwrap_or_default();
    let defaults = ModelsSection::default();

    Ok(ModelsSection {
        vendor_marker: non_empty(models_raw.vendor_marker, path, "models.vendor_marker")?
            .map(|marker| marker.to_lowercase())
            .unwrap_or(defaults.vendor_marker),
        fast_family: non_empty(models_raw.fast_family, path, "models.fast_family")?
            .map(|family| family.to_lowercase())
            .unwrap_or(defaults.fast_family),
        fast_fallback_id: non_empty(models_raw.fast_fallback_id, path, "models.fast_fallback_id")?
            .unwrap_or(defaults.fast_fallback_id),
    })
}
