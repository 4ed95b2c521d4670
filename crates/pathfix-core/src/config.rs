//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `PATHFIX_POLICY`, `PATHFIX_SEGMENT_MARKER`,
//!    `PATHFIX_DROP_FIRST_POINT`
//! 2. Project-local: `.pathfix/config.toml`
//! 3. Global: `~/.pathfix/config.toml`
//!
//! Command-line flags are applied on top by the CLI.

use crate::error::{PathfixError, Result};
use crate::point::DEFAULT_SEGMENT_MARKER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which orientation policy a correction pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Tangent,
    PerpendicularBisector,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Tangent => "tangent",
            PolicyKind::PerpendicularBisector => "perpendicular_bisector",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = PathfixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "tangent" => Ok(PolicyKind::Tangent),
            "perpendicular_bisector" | "bisector" | "normal" => {
                Ok(PolicyKind::PerpendicularBisector)
            }
            _ => Err(PathfixError::InvalidConfig {
                field: "policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Orientation correction settings
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub policy: PolicyKind,
    /// Rotate tangents by -90 degrees about X before storing
    pub realign: bool,
    /// Token that introduces a segment id in a point's tags
    pub marker: String,
    /// Rewrite segment ids to consecutive integers after correcting
    pub renumber: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Tangent,
            realign: false,
            marker: DEFAULT_SEGMENT_MARKER.to_string(),
            renumber: false,
        }
    }
}

/// Point source settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadConfig {
    /// Discard the first parsed point after loading
    pub drop_first_point: bool,
}

/// Scene styling
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub line_thickness: f64,
    pub indicator_thickness: f64,
    pub axis_length: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            line_thickness: 2.0,
            indicator_thickness: 8.0,
            axis_length: 50.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SolverSection {
    #[serde(default)]
    policy: Option<PolicyKind>,
    #[serde(default)]
    realign: Option<bool>,
    #[serde(default)]
    marker: Option<String>,
    #[serde(default)]
    renumber: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoadSection {
    #[serde(default)]
    drop_first_point: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SceneSection {
    #[serde(default)]
    line_thickness: Option<f64>,
    #[serde(default)]
    indicator_thickness: Option<f64>,
    #[serde(default)]
    axis_length: Option<f64>,
}

/// Top-level config file structure; every field is optional so files layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PathfixConfigFile {
    #[serde(default)]
    solver: SolverSection,
    #[serde(default)]
    load: LoadSection,
    #[serde(default)]
    scene: SceneSection,
}

/// Resolved configuration with all layers applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathfixConfig {
    pub solver: SolverConfig,
    pub load: LoadConfig,
    pub scene: SceneConfig,
}

impl PathfixConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = PathfixConfig::default();

        // Layer 1: Global config (~/.pathfix/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?)?;
            }
        }

        // Layer 2: Project-local config (.pathfix/config.toml)
        let local_path = PathBuf::from(".pathfix/config.toml");
        if local_path.exists() {
            config.merge(Self::load_file(&local_path)?)?;
        }

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Load config from a specific file path on top of the defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = PathfixConfig::default();
        config.merge(Self::load_file(path)?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults (no environment)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PathfixConfigFile = toml::from_str(content)?;
        let mut config = PathfixConfig::default();
        config.merge(file)?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = lookup("PATHFIX_POLICY") {
            self.solver.policy = policy.parse()?;
        }
        if let Some(marker) = lookup("PATHFIX_SEGMENT_MARKER") {
            self.solver.marker = marker;
            self.validate()?;
        }
        if let Some(drop) = lookup("PATHFIX_DROP_FIRST_POINT") {
            self.load.drop_first_point = parse_bool("PATHFIX_DROP_FIRST_POINT", &drop)?;
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pathfix").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<PathfixConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            PathfixError::ConfigParseError(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn merge(&mut self, overlay: PathfixConfigFile) -> Result<()> {
        let PathfixConfigFile {
            solver,
            load,
            scene,
        } = overlay;

        if let Some(policy) = solver.policy {
            self.solver.policy = policy;
        }
        if let Some(realign) = solver.realign {
            self.solver.realign = realign;
        }
        if let Some(marker) = solver.marker {
            self.solver.marker = marker;
        }
        if let Some(renumber) = solver.renumber {
            self.solver.renumber = renumber;
        }
        if let Some(drop) = load.drop_first_point {
            self.load.drop_first_point = drop;
        }
        if let Some(t) = scene.line_thickness {
            self.scene.line_thickness = t;
        }
        if let Some(t) = scene.indicator_thickness {
            self.scene.indicator_thickness = t;
        }
        if let Some(len) = scene.axis_length {
            self.scene.axis_length = len;
        }

        self.validate()
    }

    /// Check values set after loading, such as command-line overrides
    pub fn validate(&self) -> Result<()> {
        if self.solver.marker.is_empty() || self.solver.marker.contains(',') {
            return Err(PathfixError::InvalidConfig {
                field: "solver.marker".to_string(),
                value: self.solver.marker.clone(),
            });
        }
        for (field, value) in [
            ("scene.line_thickness", self.scene.line_thickness),
            ("scene.indicator_thickness", self.scene.indicator_thickness),
            ("scene.axis_length", self.scene.axis_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PathfixError::InvalidConfig {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PathfixError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}
