//! # Configuration
//!
//! Optional TOML file overriding the built-in defaults. Every key may be
//! omitted. Keys of `[synonyms]` are role names (`product`, `price`, `weight`
//! or an alias such as `name` or `mass`); each list replaces the default set of
//! its role, and synonyms may move freely between the listed roles.
//!
//! ```toml
//! directory = "prices"
//! marker = "price"
//! delimiter = ","
//! encoding = "utf-8"
//! exit_keyword = "exit"
//!
//! [synonyms]
//! price = ["розница", "цена", "стоимость"]
//!
//! [output]
//! html = "output.html"
//! search_html_dir = "search_results_html"
//! search_xlsx_dir = "search_results_xlsx"
//! ```

use crate::error::PriceMachineError;
use crate::error::ResultMessage;
use crate::ingest::criteria::Criteria;
use crate::ingest::header::ColumnRole;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration values.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Delimiter '{0}' must be a single ASCII character")]
    InvalidDelimiter(char),

    #[error("File name marker must not be empty")]
    EmptyMarker,

    #[error("Synonym list for '{0}' must not be empty")]
    EmptySynonyms(ColumnRole),

    #[error("Synonyms for '{0}' are configured more than once")]
    DuplicateRole(ColumnRole),

    #[error("Exit keyword must not be empty")]
    EmptyExitKeyword,
}

/// Raw configuration file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub directory: Option<PathBuf>,
    pub marker: Option<String>,
    pub delimiter: Option<char>,
    pub encoding: Option<String>,
    pub exit_keyword: Option<String>,
    /// Synonym lists keyed by role name
    pub synonyms: BTreeMap<String, Vec<String>>,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub html: Option<PathBuf>,
    pub search_html_dir: Option<PathBuf>,
    pub search_xlsx_dir: Option<PathBuf>,
}

/// Where report files are written.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputPaths {
    /// Full catalog listing
    pub html: PathBuf,
    /// Directory of per-query HTML listings
    pub search_html_dir: PathBuf,
    /// Directory of per-query spreadsheets
    pub search_xlsx_dir: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            html: PathBuf::from("output.html"),
            search_html_dir: PathBuf::from("search_results_html"),
            search_xlsx_dir: PathBuf::from("search_results_xlsx"),
        }
    }
}

/// Fully resolved run settings.
#[derive(Clone, Debug)]
pub struct Settings {
    pub directory: PathBuf,
    pub criteria: Criteria,
    pub exit_keyword: String,
    pub output: OutputPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("prices"),
            criteria: Criteria::default(),
            exit_keyword: String::from("exit"),
            output: OutputPaths::default(),
        }
    }
}

impl Config {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, PriceMachineError> {
        let prefix = path.display().to_string();
        let content = fs::read_to_string(path).map_err(PriceMachineError::from).with_prefix(&prefix)?;
        Self::parse(&content).with_prefix(&prefix)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, PriceMachineError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies the configured values on top of the defaults.
    pub fn into_settings(self) -> Result<Settings, PriceMachineError> {
        let mut settings = Settings::default();
        if let Some(directory) = self.directory {
            settings.directory = directory;
        }
        if let Some(marker) = self.marker {
            if marker.is_empty() {
                Err(ConfigError::EmptyMarker)?;
            }
            settings.criteria.marker = marker;
        }
        if let Some(delimiter) = self.delimiter {
            settings.criteria.delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(encoding) = self.encoding {
            settings.criteria.encoding = encoding;
        }
        if let Some(exit_keyword) = self.exit_keyword {
            if exit_keyword.trim().is_empty() {
                Err(ConfigError::EmptyExitKeyword)?;
            }
            settings.exit_keyword = exit_keyword.trim().to_owned();
        }

        let mut overrides: Vec<(ColumnRole, Vec<String>)> = Vec::new();
        for (name, list) in self.synonyms {
            let role = ColumnRole::parse(&name)?;
            if list.is_empty() {
                Err(ConfigError::EmptySynonyms(role))?;
            }
            if overrides.iter().any(|(existing, _)| *existing == role) {
                Err(ConfigError::DuplicateRole(role))?;
            }
            overrides.push((role, list));
        }
        settings.criteria.synonyms.replace(&overrides)?;

        if let Some(html) = self.output.html {
            settings.output.html = html;
        }
        if let Some(directory) = self.output.search_html_dir {
            settings.output.search_html_dir = directory;
        }
        if let Some(directory) = self.output.search_xlsx_dir {
            settings.output.search_xlsx_dir = directory;
        }
        Ok(settings)
    }
}

fn parse_delimiter(delimiter: char) -> Result<u8, ConfigError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ConfigError::InvalidDelimiter(delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::header::HeaderError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Config::parse("").unwrap().into_settings().unwrap();
        assert_eq!(settings.directory, PathBuf::from("prices"));
        assert_eq!(settings.criteria.marker, "price");
        assert_eq!(settings.criteria.delimiter, b',');
        assert_eq!(settings.criteria.encoding, "utf-8");
        assert_eq!(settings.exit_keyword, "exit");
        assert_eq!(settings.output, OutputPaths::default());
        assert_eq!(settings.criteria.synonyms.role_of("Вес"), Some(ColumnRole::Weight));
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            directory = "lists"
            marker = "прайс"
            delimiter = ";"
            encoding = "windows-1251"
            exit_keyword = " выход "

            [synonyms]
            price = ["Стоимость"]

            [output]
            html = "all.html"
            search_xlsx_dir = "xlsx"
            "#,
        )
        .unwrap();
        let settings = config.into_settings().unwrap();
        assert_eq!(settings.directory, PathBuf::from("lists"));
        assert_eq!(settings.criteria.marker, "прайс");
        assert_eq!(settings.criteria.delimiter, b';');
        assert_eq!(settings.criteria.encoding, "windows-1251");
        assert_eq!(settings.exit_keyword, "выход");
        assert_eq!(settings.criteria.synonyms.role_of("стоимость"), Some(ColumnRole::Price));
        assert_eq!(settings.criteria.synonyms.role_of("цена"), None);
        assert_eq!(settings.criteria.synonyms.role_of("товар"), Some(ColumnRole::Product));
        assert_eq!(settings.output.html, PathBuf::from("all.html"));
        assert_eq!(settings.output.search_html_dir, PathBuf::from("search_results_html"));
        assert_eq!(settings.output.search_xlsx_dir, PathBuf::from("xlsx"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(Config::parse("colour = \"red\""), Err(PriceMachineError::TomlError(_))));
    }

    #[test]
    fn test_invalid_values() {
        let error = Config::parse("delimiter = \"¦\"").unwrap().into_settings().unwrap_err();
        assert!(matches!(error, PriceMachineError::ConfigError(ConfigError::InvalidDelimiter('¦'))));

        let error = Config::parse("marker = \"\"").unwrap().into_settings().unwrap_err();
        assert!(matches!(error, PriceMachineError::ConfigError(ConfigError::EmptyMarker)));

        let error = Config::parse("[synonyms]\nweight = []").unwrap().into_settings().unwrap_err();
        assert!(matches!(
            error,
            PriceMachineError::ConfigError(ConfigError::EmptySynonyms(ColumnRole::Weight))
        ));
    }

    #[test]
    fn test_conflicting_synonyms_rejected() {
        let error = Config::parse("[synonyms]\nweight = [\"цена\"]").unwrap().into_settings().unwrap_err();
        assert!(matches!(
            error,
            PriceMachineError::HeaderError(HeaderError::SynonymConflict { .. })
        ));

        let error = Config::parse("[synonyms]\nproduct = [\"сорт\"]\nprice = [\"Сорт\"]")
            .unwrap()
            .into_settings()
            .unwrap_err();
        assert!(matches!(
            error,
            PriceMachineError::HeaderError(HeaderError::SynonymConflict { .. })
        ));
    }

    #[test]
    fn test_synonyms_swapped_between_roles() {
        let config = Config::parse("[synonyms]\nproduct = [\"цена\"]\nprice = [\"товар\"]\n").unwrap();
        let settings = config.into_settings().unwrap();
        let synonyms = &settings.criteria.synonyms;
        assert_eq!(synonyms.role_of("цена"), Some(ColumnRole::Product));
        assert_eq!(synonyms.role_of("товар"), Some(ColumnRole::Price));
        assert_eq!(synonyms.role_of("вес"), Some(ColumnRole::Weight));
    }

    #[test]
    fn test_synonym_role_aliases() {
        let config = Config::parse("[synonyms]\nName = [\"item\"]\nmass = [\"pack\"]\n").unwrap();
        let settings = config.into_settings().unwrap();
        assert_eq!(settings.criteria.synonyms.role_of("Item"), Some(ColumnRole::Product));
        assert_eq!(settings.criteria.synonyms.role_of("pack"), Some(ColumnRole::Weight));
        assert_eq!(settings.criteria.synonyms.role_of("вес"), None);

        let error = Config::parse("[synonyms]\ncolour = [\"цвет\"]").unwrap().into_settings().unwrap_err();
        assert!(matches!(
            error,
            PriceMachineError::HeaderError(HeaderError::UnknownRole(name)) if name == "colour"
        ));

        let error = Config::parse("[synonyms]\nprice = [\"цена\"]\nretail = [\"розница\"]")
            .unwrap()
            .into_settings()
            .unwrap_err();
        assert!(matches!(
            error,
            PriceMachineError::ConfigError(ConfigError::DuplicateRole(ColumnRole::Price))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("price-machine.toml");
        fs::write(&path, "directory = \"data\"\n").unwrap();
        let settings = Config::load(&path).unwrap().into_settings().unwrap();
        assert_eq!(settings.directory, PathBuf::from("data"));

        let error = Config::load(&directory.path().join("missing.toml")).unwrap_err();
        assert!(error.to_string().contains("missing.toml"));
    }
}
