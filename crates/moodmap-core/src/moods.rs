use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::place_types::is_primary_type;
use crate::types::SearchSpec;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodConfig {
    pub key: String,
    pub place_type: String,
    pub label: String,
}

impl MoodConfig {
    fn new(key: &str, place_type: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            place_type: place_type.to_string(),
            label: label.to_string(),
        }
    }

    #[must_use]
    pub fn search_spec(&self) -> SearchSpec {
        SearchSpec {
            place_type: self.place_type.clone(),
            label: self.label.clone(),
            keyword: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoodsFile {
    pub moods: Vec<MoodConfig>,
}

/// Static mapping from mood key to `(place_type, label)`.
///
/// Iteration follows declaration order so mood buttons render stably.
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    moods: Vec<MoodConfig>,
}

impl MoodCatalog {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            moods: vec![
                MoodConfig::new("cafe", "cafe", "☕ Cafe"),
                MoodConfig::new("work", "cafe", "💻 Work"),
                MoodConfig::new("park", "park", "🌳 Park"),
                MoodConfig::new("food", "restaurant", "🍽️ Food"),
                MoodConfig::new("drinks", "bar", "🍸 Drinks"),
                MoodConfig::new("books", "library", "📚 Books"),
                MoodConfig::new("sweet", "bakery", "🧁 Sweet"),
                MoodConfig::new("culture", "museum", "🏛️ Culture"),
            ],
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MoodConfig> {
        self.moods.iter().find(|m| m.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoodConfig> {
        self.moods.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl From<MoodsFile> for MoodCatalog {
    fn from(file: MoodsFile) -> Self {
        Self { moods: file.moods }
    }
}

/// Load and validate a mood catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_moods(path: &Path) -> Result<MoodsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MoodsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let moods_file: MoodsFile = serde_yaml::from_str(&content)?;

    validate_moods(&moods_file)?;

    Ok(moods_file)
}

fn validate_moods(moods_file: &MoodsFile) -> Result<(), ConfigError> {
    if moods_file.moods.is_empty() {
        return Err(ConfigError::Validation(
            "moods file must define at least one mood".to_string(),
        ));
    }

    let mut seen_keys = HashSet::new();

    for mood in &moods_file.moods {
        if mood.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "mood key must be non-empty".to_string(),
            ));
        }

        if mood.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "mood '{}' has an empty label",
                mood.key
            )));
        }

        if !is_primary_type(&mood.place_type) {
            return Err(ConfigError::Validation(format!(
                "mood '{}' has unknown place type '{}'",
                mood.key, mood.place_type
            )));
        }

        if !seen_keys.insert(mood.key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate mood key: '{}'",
                mood.key
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(moods: Vec<MoodConfig>) -> MoodsFile {
        MoodsFile { moods }
    }

    #[test]
    fn builtin_types_are_all_primary_types() {
        for mood in MoodCatalog::builtin().iter() {
            assert!(
                is_primary_type(&mood.place_type),
                "mood {} maps to unknown type {}",
                mood.key,
                mood.place_type
            );
        }
    }

    #[test]
    fn builtin_passes_validation() {
        let catalog = MoodCatalog::builtin();
        let moods_file = file(catalog.iter().cloned().collect());
        assert!(validate_moods(&moods_file).is_ok());
    }

    #[test]
    fn get_returns_configured_mood() {
        let catalog = MoodCatalog::builtin();
        let mood = catalog.get("park").expect("park is built in");
        assert_eq!(mood.place_type, "park");
        assert_eq!(mood.label, "🌳 Park");
        assert!(catalog.get("spaceport").is_none());
    }

    #[test]
    fn validate_rejects_unknown_type() {
        let result = validate_moods(&file(vec![MoodConfig::new("x", "spaceport", "🚀")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_duplicate_key() {
        let result = validate_moods(&file(vec![
            MoodConfig::new("cafe", "cafe", "☕"),
            MoodConfig::new("cafe", "bakery", "🧁"),
        ]));
        assert!(
            matches!(result, Err(ConfigError::Validation(ref m)) if m.contains("duplicate")),
            "got: {result:?}"
        );
    }

    #[test]
    fn validate_rejects_empty_label() {
        let result = validate_moods(&file(vec![MoodConfig::new("cafe", "cafe", "  ")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_file() {
        assert!(validate_moods(&file(vec![])).is_err());
    }

    #[test]
    fn load_moods_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("moods.yaml");
        assert!(
            path.exists(),
            "moods.yaml missing at {path:?}; required by this test"
        );
        let result = load_moods(&path);
        assert!(result.is_ok(), "failed to load moods.yaml: {result:?}");
        let catalog = MoodCatalog::from(result.unwrap());
        assert!(catalog.get("cafe").is_some());
    }

    #[test]
    fn load_moods_missing_file_is_io_error() {
        let result = load_moods(Path::new("/definitely/not/here/moods.yaml"));
        assert!(matches!(result, Err(ConfigError::MoodsFileIo { .. })));
    }
}
