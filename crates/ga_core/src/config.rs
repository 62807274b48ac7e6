//! # Analysis Configuration
//!
//! All tuning constants of the pipelines in one place, with YAML loading.
//!
//! ```rust
//! use ga_core::config::{AnalysisConfig, SubstitutionScope};
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.network.substitution_scope, SubstitutionScope::MatchWide);
//!
//! let scoped = AnalysisConfig::team_scoped();
//! assert_eq!(scoped.network.substitution_scope, SubstitutionScope::Team);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::positional::ZoneLayout;

/// Possession-value heuristic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Exponential decay per unit of distance
    pub decay: f64,
    /// Opponent goal centre, length axis
    pub goal_x: f64,
    /// Opponent goal centre, width axis
    pub goal_y: f64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            decay: 0.1,
            goal_x: 100.0,
            goal_y: 50.0,
        }
    }
}

/// Which substitutions end the first-eleven period of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionScope {
    /// First substitution by either team (historical behaviour)
    #[default]
    MatchWide,
    /// First substitution by the team itself
    Team,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub substitution_scope: SubstitutionScope,
    /// Decimal places kept on summed pass values
    pub value_decimals: u32,
    /// Completed passes needed for a pair to count as a link
    pub min_link_passes: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            substitution_scope: SubstitutionScope::MatchWide,
            value_decimals: 3,
            min_link_passes: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionalConfig {
    pub layout: ZoneLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerReportConfig {
    /// Start of the attacking third on the length axis
    pub last_third_x: f64,
}

impl Default for PlayerReportConfig {
    fn default() -> Self {
        Self { last_third_x: 67.0 }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub threat: ThreatConfig,
    pub network: NetworkConfig,
    pub positional: PositionalConfig,
    pub player: PlayerReportConfig,
}

impl AnalysisConfig {
    /// Default config with team-scoped substitution cutoffs.
    pub fn team_scoped() -> Self {
        let mut cfg = Self::default();
        cfg.network.substitution_scope = SubstitutionScope::Team;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = AnalysisConfig::from_yaml_str(
            "network:\n  substitution_scope: team\npositional:\n  layout: vertical\n",
        )
        .unwrap();
        assert_eq!(cfg.network.substitution_scope, SubstitutionScope::Team);
        assert_eq!(cfg.network.value_decimals, 3);
        assert_eq!(cfg.positional.layout, ZoneLayout::Vertical);
        assert_eq!(cfg.threat, ThreatConfig::default());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let mut cfg = AnalysisConfig::team_scoped();
        cfg.threat.decay = 0.2;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(cfg.to_yaml().unwrap().as_bytes()).unwrap();

        let loaded = AnalysisConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = AnalysisConfig::from_yaml_str("network: [1, 2").unwrap_err();
        assert!(matches!(err, crate::error::AnalysisError::Config(_)));
    }
}
