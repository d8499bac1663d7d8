// Language registry: which languages are enabled and how the judge identifies them
use anyhow::{bail, Context, Result};
use arbiter_common::types::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_LANGUAGES_PATH: &str = "config/languages.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub name: String,
    pub version: String,
    pub judge_language_id: u32,
    pub file_extension: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct LanguagesJson {
    languages: Vec<LanguageConfig>,
}

/// Registry of enabled languages.
/// A language missing here is treated as unrecognized by the orchestrators.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    configs: BTreeMap<Language, LanguageConfig>,
}

impl LanguageRegistry {
    /// Load language configurations from a languages.json file
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            bail!("Language config file not found: {}", config_path.display());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid language config in {}", config_path.display()))
    }

    /// Load config/languages.json, falling back to the built-in table when it is absent
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_LANGUAGES_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::builtin())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let languages_json: LanguagesJson =
            serde_json::from_str(content).context("Failed to parse languages.json")?;

        let mut configs = BTreeMap::new();
        for config in languages_json.languages {
            let Some(language) = Language::parse(&config.name) else {
                bail!("Unknown language '{}' in languages.json", config.name);
            };
            configs.insert(language, config);
        }

        if configs.is_empty() {
            bail!("No languages configured in languages.json");
        }

        Ok(Self { configs })
    }

    /// Every supported language with the judge's stock ids
    pub fn builtin() -> Self {
        let configs = Language::ALL
            .into_iter()
            .map(|language| {
                let config = LanguageConfig {
                    name: language.as_str().to_string(),
                    version: String::new(),
                    judge_language_id: language.default_judge_id(),
                    file_extension: language.file_extension().to_string(),
                };
                (language, config)
            })
            .collect();
        Self { configs }
    }

    pub fn is_enabled(&self, language: Language) -> bool {
        self.configs.contains_key(&language)
    }

    pub fn get_config(&self, language: Language) -> Option<&LanguageConfig> {
        self.configs.get(&language)
    }

    /// Id the judge uses for `language`, if the language is enabled
    pub fn judge_language_id(&self, language: Language) -> Option<u32> {
        self.get_config(language).map(|c| c.judge_language_id)
    }

    /// Reverse lookup from a judge language id
    pub fn language_for_judge_id(&self, judge_language_id: u32) -> Option<Language> {
        self.configs
            .iter()
            .find(|(_, config)| config.judge_language_id == judge_language_id)
            .map(|(language, _)| *language)
    }

    pub fn list_languages(&self) -> Vec<&LanguageConfig> {
        self.configs.values().collect()
    }
}
