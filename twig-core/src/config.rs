use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fmt, fs, path::Path};

pub const APP_NAME: &str = "twig";

/// Settings read from a TOML file passed with `--config`. Nothing is read implicitly.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Enables the file logger at this level, e.g. `log_level = "debug"`.
    pub log_level: Option<String>,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Force-delete confirmation prompt.
    #[serde(default)]
    pub confirm: ConfirmConfig,
}

impl Config {
    /// The configured log level, if any. Unknown level names are an error.
    pub fn log_level_filter(&self) -> Result<Option<log::LevelFilter>> {
        self.log_level
            .as_deref()
            .map(|level| {
                level
                    .parse::<log::LevelFilter>()
                    .map_err(|_| anyhow::anyhow!("invalid log_level '{level}'"))
            })
            .transpose()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Branch highlight and prompt color (default: "magenta").
    pub accent: ThemeColor,
    /// Header color (default: "cyan").
    pub secondary: ThemeColor,
    pub success: ThemeColor,
    pub error: ThemeColor,
    /// Pending action status line (default: "yellow").
    pub warning: ThemeColor,
    pub muted: ThemeColor,
    pub border: ThemeColor,
    /// Filter placeholder and key hints (default: "blue").
    pub hint: ThemeColor,
    /// Foreground of the highlighted row (default: "white").
    pub highlight_fg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        use NamedColor::{Blue, Cyan, Gray, Green, Magenta, Red, White, Yellow};
        Self {
            accent: ThemeColor::Named(Magenta),
            secondary: ThemeColor::Named(Cyan),
            success: ThemeColor::Named(Green),
            error: ThemeColor::Named(Red),
            warning: ThemeColor::Named(Yellow),
            muted: ThemeColor::Named(Gray),
            border: ThemeColor::Named(Gray),
            hint: ThemeColor::Named(Blue),
            highlight_fg: ThemeColor::Named(White),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl NamedColor {
    const ALL: [NamedColor; 9] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::Gray,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        let name = if name == "grey" { "gray" } else { name.as_str() };
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl ThemeColor {
    /// Parse a named color (`grey` accepted) or `#rrggbb`
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        NamedColor::from_name(s).map(Self::Named)
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| {
            format!(
                "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey) or hex (#rrggbb)"
            )
        })
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfirmConfig {
    /// Answers that confirm a force delete, compared case-insensitively.
    /// ```toml
    /// [confirm]
    /// accepted_answers = ["yes", "y", "ja"]
    /// ```
    #[serde(default = "ConfirmConfig::default_answers")]
    pub accepted_answers: Vec<String>,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            accepted_answers: Self::default_answers(),
        }
    }
}

impl ConfirmConfig {
    fn default_answers() -> Vec<String> {
        vec!["yes".to_string(), "y".to_string()]
    }

    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        self.accepted_answers
            .iter()
            .any(|accepted| accepted.trim().to_lowercase() == answer)
    }
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    config.log_level_filter()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found at {}", path.display());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("invalid config file {}", path.display()))
}
