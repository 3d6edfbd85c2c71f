//! crates/logging/src/config.rs
//! Logger configuration and its environment-variable loader.

use std::env;
use std::path::{Path, PathBuf};

use logging_sink::{DEFAULT_PATTERN, Destination, Layout};

use crate::category::Category;
use crate::levels::LevelFilter;

/// Environment variable holding the minimum severity.
pub const DEFAULT_LEVEL_VAR: &str = "CATLOG_LEVEL";

/// Environment variable holding the category allow-list.
pub const DEFAULT_TYPES_VAR: &str = "CATLOG_TYPES";

/// Environment variable naming the log file; unset logs to stdout.
pub const DEFAULT_FILE_VAR: &str = "CATLOG_FILE";

/// Allow-list token that enables every category.
pub const ALL_TOKEN: &str = "All";

/// Which categories a logger accepts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategorySelection {
    /// Every category, including raw values outside the declared set.
    #[default]
    All,
    /// Categories whose display name occurs as a substring of the list.
    ///
    /// `Always` is included regardless of the list.
    Matching(String),
}

impl CategorySelection {
    /// Builds a selection from a raw allow-list.
    ///
    /// An absent or blank list, or one containing [`ALL_TOKEN`], selects every
    /// category. Any other text is matched by substring, so separators are
    /// free-form: `"Device,Op"`, `"Device Op"` and `"DeviceOp"` are equivalent.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Category, CategorySelection};
    ///
    /// assert_eq!(CategorySelection::from_allow_list(None), CategorySelection::All);
    /// assert_eq!(CategorySelection::from_allow_list(Some("Op,All")), CategorySelection::All);
    ///
    /// let selection = CategorySelection::from_allow_list(Some("Device"));
    /// assert!(selection.includes(Category::Device));
    /// assert!(selection.includes(Category::Always));
    /// assert!(!selection.includes(Category::Op));
    /// ```
    #[must_use]
    pub fn from_allow_list(list: Option<&str>) -> Self {
        match list.map(str::trim) {
            None | Some("") => Self::All,
            Some(list) if list.contains(ALL_TOKEN) => Self::All,
            Some(list) => Self::Matching(list.to_owned()),
        }
    }

    /// Returns the filter mask for this selection.
    ///
    /// [`All`](Self::All) sets every bit, including the ones past the declared
    /// categories, so raw out-of-range values pass in that mode only. A
    /// [`Matching`](Self::Matching) list containing [`ALL_TOKEN`] is treated
    /// the same way.
    #[must_use]
    pub fn mask(&self) -> u64 {
        match self {
            Self::All => u64::MAX,
            Self::Matching(list) if list.contains(ALL_TOKEN) => u64::MAX,
            Self::Matching(list) => Category::ALL
                .iter()
                .filter(|category| list.contains(category.name()))
                .fold(Category::Always.bit(), |mask, category| {
                    mask | category.bit()
                }),
        }
    }

    /// Reports whether `category` is selected.
    #[must_use]
    pub fn includes(&self, category: Category) -> bool {
        self.mask() & category.bit() != 0
    }
}

/// Names of the environment variables consulted by [`LoggerConfig::from_env`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnvKeys {
    /// Variable holding the minimum severity.
    pub level: String,
    /// Variable holding the category allow-list.
    pub categories: String,
    /// Variable holding the log file path.
    pub destination: String,
}

impl EnvKeys {
    /// Uses `<prefix>_LEVEL`, `<prefix>_TYPES` and `<prefix>_FILE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::EnvKeys;
    ///
    /// let keys = EnvKeys::with_prefix("TT_LOGGER");
    /// assert_eq!(keys.level, "TT_LOGGER_LEVEL");
    /// assert_eq!(keys.categories, "TT_LOGGER_TYPES");
    /// assert_eq!(keys.destination, "TT_LOGGER_FILE");
    /// ```
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            level: format!("{prefix}_LEVEL"),
            categories: format!("{prefix}_TYPES"),
            destination: format!("{prefix}_FILE"),
        }
    }
}

impl Default for EnvKeys {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL_VAR.to_owned(),
            categories: DEFAULT_TYPES_VAR.to_owned(),
            destination: DEFAULT_FILE_VAR.to_owned(),
        }
    }
}

/// Settings a [`Logger`](crate::Logger) is built from.
///
/// The level is kept as the raw selector so that an unrecognised value can be
/// reported when the logger is built rather than rejected while loading.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    level: Option<String>,
    categories: Option<String>,
    destination: Option<PathBuf>,
    pattern: Option<String>,
}

impl LoggerConfig {
    /// Sets the minimum severity selector.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Sets the category allow-list.
    #[must_use]
    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    /// Sends output to a file instead of stdout.
    #[must_use]
    pub fn with_destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    /// Overrides the line layout pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Returns the raw level selector, if one was supplied.
    #[must_use]
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Returns the raw category allow-list, if one was supplied.
    #[must_use]
    pub fn categories(&self) -> Option<&str> {
        self.categories.as_deref()
    }

    /// Returns the configured log file, if any.
    #[must_use]
    pub fn destination_path(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Resolves the minimum severity.
    ///
    /// A missing selector means `info`. An unrecognised one also falls back to
    /// `info` and emits a warning through `tracing`.
    #[must_use]
    pub fn min_severity(&self) -> LevelFilter {
        let Some(selector) = self.level.as_deref() else {
            return LevelFilter::default();
        };
        LevelFilter::parse(selector).unwrap_or_else(|| {
            tracing::warn!(
                level = selector,
                "unrecognised log level; falling back to info"
            );
            LevelFilter::default()
        })
    }

    /// Resolves the category selection.
    #[must_use]
    pub fn category_selection(&self) -> CategorySelection {
        CategorySelection::from_allow_list(self.categories.as_deref())
    }

    /// Resolves where output goes.
    #[must_use]
    pub fn destination(&self) -> Destination {
        Destination::from_path(self.destination.clone())
    }

    /// Builds the line layout, defaulting to [`DEFAULT_PATTERN`].
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.pattern.as_deref().unwrap_or(DEFAULT_PATTERN))
    }

    /// Reads `CATLOG_LEVEL`, `CATLOG_TYPES` and `CATLOG_FILE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_keys(&EnvKeys::default())
    }

    /// Reads the process environment using custom variable names.
    #[must_use]
    pub fn from_env_keys(keys: &EnvKeys) -> Self {
        Self::from_lookup(keys, |name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values are treated as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{EnvKeys, LevelFilter, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_lookup(&EnvKeys::default(), |name| match name {
    ///     "CATLOG_LEVEL" => Some("debug".to_owned()),
    ///     "CATLOG_FILE" => Some("  ".to_owned()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.min_severity(), LevelFilter::Debug);
    /// assert_eq!(config.destination_path(), None);
    /// ```
    pub fn from_lookup<F>(keys: &EnvKeys, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            level: read(&keys.level),
            categories: read(&keys.categories),
            destination: read(&keys.destination).map(PathBuf::from),
            pattern: None,
        }
    }
}
