use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::format::SpecialVars;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub special_vars: SpecialVarsConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
    /// Extra log destination; tilde-expanded. Empty disables it.
    #[serde(default)]
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            export_prefix: default_export_prefix(),
            log_file: String::new(),
        }
    }
}

fn default_export_prefix() -> String {
    "export ".into()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SpecialVarsConfig {
    #[serde(default)]
    pub names: Vec<String>,
}

impl SpecialVarsConfig {
    pub fn to_special_vars(&self) -> SpecialVars {
        SpecialVars::new(self.names.iter().cloned())
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    special_vars: SpecialVarsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    verbose: Option<bool>,
    export_prefix: Option<String>,
    log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct SpecialVarsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    remove_names: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults, with ~/.config/envtidy/config.toml merged on top
    /// when it exists. A malformed overlay is an error rather than ignored.
    pub fn load() -> Result<Self, Error> {
        let mut config = Self::default_config();
        if let Some(content) = Self::read_overlay() {
            config.apply_overlay_str(&content)?;
        }
        Ok(config)
    }

    fn read_overlay() -> Option<String> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/envtidy/config.toml");
        std::fs::read_to_string(path).ok()
    }

    /// Merge an overlay given as TOML text.
    pub fn apply_overlay_str(&mut self, toml_str: &str) -> Result<(), Error> {
        let overlay: ConfigOverlay = toml::from_str(toml_str)?;
        self.apply_overlay(overlay);
        Ok(())
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.verbose {
            self.settings.verbose = v;
        }
        if let Some(v) = s.export_prefix {
            self.settings.export_prefix = v;
        }
        if let Some(v) = s.log_file {
            self.settings.log_file = v;
        }

        let sv = overlay.special_vars;
        merge_list(
            &mut self.special_vars.names,
            sv.names,
            &sv.remove_names,
            sv.replace,
        );
    }

    /// The merged configuration as TOML, for `--dump-config`.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
