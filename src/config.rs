//! Behavior configuration.
//!
//! Every identifier, threshold and label the controllers use comes from a
//! [`BehaviorConfig`]. Stock defaults match the portfolio page markup, so a
//! page built to the default contract needs no configuration at all.
//!
//! ## Where configuration comes from
//!
//! - **CLI**: `behavior.toml`, sparse, merged on top of the stock defaults
//!   (see [`load_config`]).
//! - **Browser**: the resolved config as JSON inside
//!   `<script type="application/json" id="behavior-config">`, produced by
//!   `portfolio-behavior export` (see [`from_json`]). Absent → defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! greeting = []                     # Lines logged to the console at startup
//!
//! [language]
//! default = "ar"                    # Used when nothing (valid) is stored
//! storage_key = "lang"              # localStorage key
//!
//! [language.labels]                 # Toggle text naming the *other* language
//! ar = "العربية"
//! en = "EN"
//!
//! [scroll]
//! shadow_threshold = 50             # px before the navbar shadow deepens
//! shrink_threshold = 10             # px before the navbar shrinks
//! scroll_top_threshold = 300        # px before the scroll-to-top button shows
//! active_link_offset = 100          # px lead when matching sections
//! header_offset = 70                # px left above an anchor target
//! debounce_ms = 10                  # active-link debounce window
//!
//! [[reveal.groups]]
//! class = "timeline-item"
//! transform = "translateY(30px)"
//! duration_ms = 600
//! stagger_ms = 100
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Page behavior configuration.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Console greeting, one `info` log line per entry.
    pub greeting: Vec<String>,
    pub language: LanguageConfig,
    pub elements: ElementsConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub fade_in: FadeInConfig,
    pub pdf: PdfConfig,
    pub footer: FooterConfig,
    pub accessibility: AccessibilityConfig,
    pub easter_egg: EasterEggConfig,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "language.storage_key must not be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if let Some(group) = self.reveal.groups.iter().find(|g| g.class.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "reveal group with transform {:?} has an empty class",
                group.transform
            )));
        }
        if self.easter_egg.sequence.is_empty() {
            return Err(ConfigError::Validation(
                "easter_egg.sequence must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Language defaults, persistence key and toggle labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageConfig {
    pub default: Language,
    pub storage_key: String,
    pub labels: LanguageLabels,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: Language::Ar,
            storage_key: "lang".to_string(),
            labels: LanguageLabels::default(),
        }
    }
}

/// Display name of each language, as shown on the toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageLabels {
    pub ar: String,
    pub en: String,
}

impl LanguageLabels {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Ar => &self.ar,
            Language::En => &self.en,
        }
    }
}

impl Default for LanguageLabels {
    fn default() -> Self {
        Self {
            ar: "العربية".to_string(),
            en: "EN".to_string(),
        }
    }
}

/// Element ids and class names of the page markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementsConfig {
    /// Id of the element receiving `lang`/`dir` (falls back to `<html>`).
    pub root: String,
    pub language_toggle: String,
    pub navbar: String,
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_link_class: String,
    /// Class on the open menu and on the current nav link.
    pub active_class: String,
    pub shrink_class: String,
    pub scroll_top: String,
    pub visible_class: String,
    pub modal: String,
    pub modal_image: String,
    pub modal_caption: String,
    pub view_pdf: String,
    pub download_pdf: String,
    pub footer_class: String,
    /// Elements kept on one printed page.
    pub print_keep_together_class: String,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            root: "html".to_string(),
            language_toggle: "langToggle".to_string(),
            navbar: "navbar".to_string(),
            nav_toggle: "navToggle".to_string(),
            nav_menu: "navMenu".to_string(),
            nav_link_class: "nav-link".to_string(),
            active_class: "active".to_string(),
            shrink_class: "nav-shrink".to_string(),
            scroll_top: "scrollTop".to_string(),
            visible_class: "visible".to_string(),
            modal: "imageModal".to_string(),
            modal_image: "modalImage".to_string(),
            modal_caption: "modalCaption".to_string(),
            view_pdf: "viewPdfBtn".to_string(),
            download_pdf: "downloadPdfBtn".to_string(),
            footer_class: "footer-bottom".to_string(),
            print_keep_together_class: "timeline-content".to_string(),
        }
    }
}

/// Scroll thresholds and offsets, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    pub shadow_threshold: u32,
    pub shrink_threshold: u32,
    pub scroll_top_threshold: u32,
    pub active_link_offset: u32,
    pub header_offset: u32,
    pub debounce_ms: u32,
    pub shadow_base: String,
    pub shadow_raised: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            shadow_threshold: 50,
            shrink_threshold: 10,
            scroll_top_threshold: 300,
            active_link_offset: 100,
            header_offset: 70,
            debounce_ms: 10,
            shadow_base: "0 4px 6px -1px rgba(0, 0, 0, 0.1)".to_string(),
            shadow_raised: "0 4px 12px rgba(0, 0, 0, 0.1)".to_string(),
        }
    }
}

/// Reveal-on-scroll groups and observer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
    pub root_margin: String,
    pub groups: Vec<RevealGroup>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            groups: vec![
                RevealGroup::new("timeline-item", "translateY(30px)", 600, 100),
                RevealGroup::new("education-card", "translateY(30px)", 600, 150),
                RevealGroup::new("skill-tag", "translateX(30px)", 500, 50),
                RevealGroup::new("achievement-card", "scale(0.9)", 600, 150),
                RevealGroup::new("info-card", "translateY(30px)", 600, 200),
                RevealGroup::new("contact-card", "translateY(30px)", 600, 150),
            ],
        }
    }
}

/// One class of elements revealed with a staggered transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealGroup {
    pub class: String,
    /// Transform applied while hidden.
    pub transform: String,
    pub duration_ms: u32,
    /// Extra delay per position within the group.
    pub stagger_ms: u32,
}

impl RevealGroup {
    pub fn new(class: &str, transform: &str, duration_ms: u32, stagger_ms: u32) -> Self {
        Self {
            class: class.to_string(),
            transform: transform.to_string(),
            duration_ms,
            stagger_ms,
        }
    }
}

/// Page fade-in after the first language render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FadeInConfig {
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            duration_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfConfig {
    /// File name offered by the download button when the markup sets none.
    pub download_name: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            download_name: "CV.pdf".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    /// Copyright line; `{year}` is replaced with the current year. Empty
    /// leaves the footer alone.
    pub template: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            template: "© {year}. جميع الحقوق محفوظة.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessibilityConfig {
    /// `aria-label` for nav links; `{label}` is the link text. Empty skips.
    pub nav_label_template: String,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            nav_label_template: "انتقل إلى قسم {label}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EasterEggConfig {
    /// `KeyboardEvent.key` values, in order.
    pub sequence: Vec<String>,
    /// Body `animation` while the egg runs.
    pub animation: String,
    pub duration_ms: u32,
    /// Style sheet injected at startup providing the animation.
    pub keyframes: String,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        Self {
            sequence: [
                "ArrowUp",
                "ArrowUp",
                "ArrowDown",
                "ArrowDown",
                "ArrowLeft",
                "ArrowRight",
                "ArrowLeft",
                "ArrowRight",
                "b",
                "a",
            ]
            .map(String::from)
            .to_vec(),
            animation: "rainbow 2s linear infinite".to_string(),
            duration_ms: 5000,
            keyframes: "@keyframes rainbow {\n    0% { filter: hue-rotate(0deg); }\n    100% { filter: hue-rotate(360deg); }\n}".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BehaviorConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BehaviorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, merged over stock defaults.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<BehaviorConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Parse the JSON form embedded in the page.
///
/// Missing keys take their defaults, so a partial object is accepted.
pub fn from_json(text: &str) -> Result<BehaviorConfig, ConfigError> {
    let config: BehaviorConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Serialize the resolved config for embedding in the page.
pub fn to_json(config: &BehaviorConfig) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Returns a fully-commented stock `behavior.toml` with all keys.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio Behavior Configuration
# ================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Lines logged to the browser console at startup.
greeting = []

# ---------------------------------------------------------------------------
# Language
# ---------------------------------------------------------------------------
[language]
# Language used when nothing valid is stored ("ar" or "en").
default = "ar"

# localStorage key holding the visitor's choice.
storage_key = "lang"

# Toggle text. The toggle always names the language it switches TO.
[language.labels]
ar = "العربية"
en = "EN"

# ---------------------------------------------------------------------------
# Page markup contract (element ids and class names)
# ---------------------------------------------------------------------------
[elements]
root = "html"                   # receives lang/dir
language_toggle = "langToggle"
navbar = "navbar"
nav_toggle = "navToggle"
nav_menu = "navMenu"
nav_link_class = "nav-link"
active_class = "active"         # open menu, current nav link
shrink_class = "nav-shrink"
scroll_top = "scrollTop"
visible_class = "visible"
modal = "imageModal"
modal_image = "modalImage"
modal_caption = "modalCaption"
view_pdf = "viewPdfBtn"
download_pdf = "downloadPdfBtn"
footer_class = "footer-bottom"  # its <p> gets the copyright line
print_keep_together_class = "timeline-content"

# ---------------------------------------------------------------------------
# Scrolling (CSS pixels)
# ---------------------------------------------------------------------------
[scroll]
shadow_threshold = 50
shrink_threshold = 10
scroll_top_threshold = 300
active_link_offset = 100
header_offset = 70
debounce_ms = 10
shadow_base = "0 4px 6px -1px rgba(0, 0, 0, 0.1)"
shadow_raised = "0 4px 12px rgba(0, 0, 0, 0.1)"

# ---------------------------------------------------------------------------
# Reveal on scroll
# ---------------------------------------------------------------------------
[reveal]
threshold = 0.1
root_margin = "0px 0px -50px 0px"

# Replacing the list replaces all groups.
[[reveal.groups]]
class = "timeline-item"
transform = "translateY(30px)"
duration_ms = 600
stagger_ms = 100

[[reveal.groups]]
class = "education-card"
transform = "translateY(30px)"
duration_ms = 600
stagger_ms = 150

[[reveal.groups]]
class = "skill-tag"
transform = "translateX(30px)"
duration_ms = 500
stagger_ms = 50

[[reveal.groups]]
class = "achievement-card"
transform = "scale(0.9)"
duration_ms = 600
stagger_ms = 150

[[reveal.groups]]
class = "info-card"
transform = "translateY(30px)"
duration_ms = 600
stagger_ms = 200

[[reveal.groups]]
class = "contact-card"
transform = "translateY(30px)"
duration_ms = 600
stagger_ms = 150

# ---------------------------------------------------------------------------
# Page fade-in after the first render
# ---------------------------------------------------------------------------
[fade_in]
delay_ms = 100
duration_ms = 500

# ---------------------------------------------------------------------------
# CV document
# ---------------------------------------------------------------------------
[pdf]
download_name = "CV.pdf"

[footer]
# {year} is replaced with the current year. Empty leaves the footer alone.
template = "© {year}. جميع الحقوق محفوظة."

[accessibility]
# aria-label for nav links; {label} is the link text. Empty skips.
nav_label_template = "انتقل إلى قسم {label}"

# ---------------------------------------------------------------------------
# Easter egg
# ---------------------------------------------------------------------------
[easter_egg]
sequence = ["ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight", "b", "a"]
animation = "rainbow 2s linear infinite"
duration_ms = 5000
keyframes = """
@keyframes rainbow {
    0% { filter: hue-rotate(0deg); }
    100% { filter: hue-rotate(360deg); }
}"""
"##
}
