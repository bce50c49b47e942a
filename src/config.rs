//! Persistent render defaults.
//!
//! Config files hold CLI flags, one or more per line, with `#` comments.
//! A global file is read first, then a `.memodownrc` in the working
//! directory, then the command line; boolean flags accumulate and the
//! last theme given wins.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::RenderOptions;
use crate::highlight::HighlightBackground;

const APP_DIR: &str = "memodown";
const LOCAL_FILE: &str = ".memodownrc";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl From<ThemeMode> for HighlightBackground {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::Light,
            ThemeMode::Dark => Self::Dark,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_breaks: bool,
    pub no_gfm: bool,
    pub raw_html: bool,
    pub no_highlight: bool,
    pub theme: Option<ThemeMode>,
}

impl ConfigFlags {
    /// Combine with `other` taking precedence for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_breaks: self.no_breaks || other.no_breaks,
            no_gfm: self.no_gfm || other.no_gfm,
            raw_html: self.raw_html || other.raw_html,
            no_highlight: self.no_highlight || other.no_highlight,
            theme: other.theme.or(self.theme),
        }
    }

    /// Renderer settings these flags select.
    pub fn to_render_options(&self) -> RenderOptions {
        RenderOptions {
            hard_breaks: !self.no_breaks,
            gfm: !self.no_gfm,
            raw_html: self.raw_html,
            highlight: !self.no_highlight,
            theme: self.theme.map(Into::into).unwrap_or_default(),
        }
    }

    fn switch_mut(&mut self, flag: &str) -> Option<&mut bool> {
        match flag {
            "--no-breaks" => Some(&mut self.no_breaks),
            "--no-gfm" => Some(&mut self.no_gfm),
            "--raw-html" => Some(&mut self.raw_html),
            "--no-highlight" => Some(&mut self.no_highlight),
            _ => None,
        }
    }

    /// The flags as command-line tokens, in a stable order.
    pub fn to_tokens(&self) -> Vec<String> {
        let switches = [
            ("--no-breaks", self.no_breaks),
            ("--no-gfm", self.no_gfm),
            ("--raw-html", self.raw_html),
            ("--no-highlight", self.no_highlight),
        ];
        let mut tokens: Vec<String> = switches
            .iter()
            .filter(|(_, on)| *on)
            .map(|(flag, _)| (*flag).to_string())
            .collect();
        if let Some(theme) = self.theme {
            tokens.push(format!("--theme={}", theme.as_str()));
        }
        tokens
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read flags from `path`; a missing file means no flags.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(ToOwned::to_owned)
        .collect();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut content = String::from("# memodown defaults (saved with --save)\n");
    for token in flags.to_tokens() {
        content.push_str(&token);
        content.push('\n');
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of `tokens`, ignoring anything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        if let Some(switch) = flags.switch_mut(token) {
            *switch = true;
        } else if token == "--theme" {
            if let Some(value) = tokens.next() {
                flags.theme = ThemeMode::parse(value);
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = ThemeMode::parse(value);
        }
    }
    flags
}
