/// Skill configuration — phrase sets and text templates, loadable from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::character::CharacterTemplates;
use crate::core::outline::OutlineTemplates;
use crate::core::plot_checker::{PlotError, PlotRules};
use crate::core::template::TemplateError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("plot rule error: {0}")]
    Plot(#[from] PlotError),
}

/// All tunable text for the three skills. Every section defaults to the
/// built-in phrasing, so a config file only needs the parts it changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub outline: OutlineTemplates,
    pub character: CharacterTemplates,
    pub plot: PlotRules,
}

impl SkillConfig {
    /// Load a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<SkillConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse_ron(&contents)?;
        tracing::debug!(path = %path.display(), "loaded skill config");
        Ok(config)
    }

    /// Parse a config from a RON string.
    pub fn parse_ron(input: &str) -> Result<SkillConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// Merge another config into this one. Sections of `other` that differ
    /// from the built-in defaults replace the matching sections of `self`.
    pub fn merge(&mut self, other: SkillConfig) {
        if other.outline != OutlineTemplates::default() {
            self.outline = other.outline;
        }
        if other.character != CharacterTemplates::default() {
            self.character = other.character;
        }
        if other.plot != PlotRules::default() {
            self.plot = other.plot;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_gives_defaults() {
        let config = SkillConfig::parse_ron("()").unwrap();
        assert_eq!(config, SkillConfig::default());
    }

    #[test]
    fn partial_section_override() {
        let config = SkillConfig::parse_ron(
            r#"(
                plot: (
                    ending_phrases: ["happily ever after"],
                ),
            )"#,
        )
        .unwrap();
        assert_eq!(config.plot.ending_phrases, vec!["happily ever after".to_string()]);
        // Unlisted fields keep their defaults
        assert_eq!(config.plot.intro_phrases, PlotRules::default().intro_phrases);
        assert_eq!(config.outline, OutlineTemplates::default());
    }

    #[test]
    fn character_hooks_from_ron() {
        let config = SkillConfig::parse_ron(
            r#"(
                character: (
                    trait_hooks: [
                        (trait_name: "shy", field: Personality, text: " Quiet."),
                    ],
                ),
            )"#,
        )
        .unwrap();
        assert_eq!(config.character.trait_hooks.len(), 1);
        assert_eq!(config.character.trait_hooks[0].trait_name, "shy");
        // Overriding the hook list leaves role overrides untouched
        assert_eq!(config.character.role_overrides.len(), 2);
    }

    #[test]
    fn invalid_ron_is_an_error() {
        assert!(matches!(
            SkillConfig::parse_ron("(plot: 42)"),
            Err(ConfigError::Ron(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SkillConfig::load_from_ron(Path::new("tests/fixtures/does_not_exist.ron"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn merge_precedence() {
        let mut base = SkillConfig::default();
        base.plot.climax_phrases = vec!["showdown".to_string()];

        let mut other = SkillConfig::default();
        other.outline.core_concepts = vec!["Basics of {topic}".to_string()];

        base.merge(other);

        // Override took the outline section
        assert_eq!(base.outline.core_concepts, vec!["Basics of {topic}".to_string()]);
        // Default sections in the override leave base untouched
        assert_eq!(base.plot.climax_phrases, vec!["showdown".to_string()]);
    }

    #[test]
    fn ron_round_trip() {
        let config = SkillConfig::default();
        let serialized = ron::to_string(&config).unwrap();
        let deserialized = SkillConfig::parse_ron(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn load_reference_config() {
        let path = std::path::PathBuf::from("skill_data/skills.ron");
        let config = SkillConfig::load_from_ron(&path).unwrap();
        assert_eq!(config, SkillConfig::default());
    }
}
