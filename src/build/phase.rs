//! Build phases and planning.
//!
//! A build is a fixed, ordered list of phases. Clean always comes first so
//! nothing generated by an earlier build survives into the next one. Phases
//! turned off in `site.toml` stay in the plan and are reported as skipped.

use crate::config::SiteConfig;
use serde::Serialize;

/// One step of the build driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Remove output directories
    Clean,
    /// Fetch external dependencies
    Install,
    /// Generate the output stylesheet
    Styles,
    /// Run the primary program
    Generate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Clean => write!(f, "clean"),
            Phase::Install => write!(f, "install"),
            Phase::Styles => write!(f, "styles"),
            Phase::Generate => write!(f, "generate"),
        }
    }
}

impl Phase {
    /// Every phase, in build order.
    pub const ALL: [Phase; 4] = [Phase::Clean, Phase::Install, Phase::Styles, Phase::Generate];

    /// Whether the configuration lets this phase run. Clean and Generate
    /// cannot be turned off.
    pub fn is_enabled(self, config: &SiteConfig) -> bool {
        match self {
            Phase::Clean | Phase::Generate => true,
            Phase::Install => config.install.enabled,
            Phase::Styles => config.styles.enabled,
        }
    }
}

/// Ordered phases for a full build.
pub fn plan() -> Vec<Phase> {
    Phase::ALL.to_vec()
}

/// Phases re-run by watch mode after a source change.
pub fn rebuild_plan() -> Vec<Phase> {
    plan().into_iter().filter(|p| matches!(p, Phase::Styles | Phase::Generate)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config_named;

    #[test]
    fn test_plan_full() {
        assert_eq!(plan(), vec![Phase::Clean, Phase::Install, Phase::Styles, Phase::Generate]);
    }

    #[test]
    fn test_plan_keeps_disabled_phases() {
        let mut config = default_config_named("x");
        config.install.enabled = false;
        config.styles.enabled = false;
        assert_eq!(plan(), Phase::ALL.to_vec());
        assert!(!Phase::Install.is_enabled(&config));
        assert!(!Phase::Styles.is_enabled(&config));
        assert!(Phase::Clean.is_enabled(&config));
        assert!(Phase::Generate.is_enabled(&config));
    }

    #[test]
    fn test_rebuild_plan_skips_clean_and_install() {
        assert_eq!(rebuild_plan(), vec![Phase::Styles, Phase::Generate]);
    }

    #[test]
    fn test_phase_display_and_json() {
        assert_eq!(Phase::Styles.to_string(), "styles");
        assert_eq!(serde_json::to_string(&Phase::Generate).unwrap(), "\"generate\"");
    }
}
