/// The skill host: name-based dispatch of JSON arguments to the three skills.
///
/// A host orchestrator calls a skill by name with plain arguments, either
/// as a JSON object of named parameters or as a positional JSON array in the
/// order of [`Skill::params`]. Results come back as JSON values shaped the
/// same way as the skill's schema types.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::character::{CharacterDeveloper, CharacterError};
use crate::core::config::{ConfigError, SkillConfig};
use crate::core::outline::OutlineGenerator;
use crate::core::plot_checker::PlotChecker;
use crate::schema::character::{CharacterProfile, CharacterRequest, CharacterSheet};
use crate::schema::outline::{ChapterOutline, DEFAULT_CHAPTER_COUNT, MAX_CHAPTER_COUNT};
use crate::schema::plot::{PlotAnalysis, StagePresence};

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("unknown skill: {0}")]
    UnknownSkill(String),
    #[error("invalid arguments for {skill}: {source}")]
    InvalidArguments {
        skill: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("character error: {0}")]
    Character(#[from] CharacterError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("serialization error: {0}")]
    Serialize(serde_json::Error),
}

/// The skills a host can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Skill {
    ChapterOutline,
    CharacterDevelopment,
    PlotChecker,
}

impl Skill {
    pub const ALL: [Skill; 3] = [
        Self::ChapterOutline,
        Self::CharacterDevelopment,
        Self::PlotChecker,
    ];

    /// The name a host uses to call this skill.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChapterOutline => "chapter-outline",
            Self::CharacterDevelopment => "character-development",
            Self::PlotChecker => "plot-checker",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ChapterOutline => "Generate a chapter outline for a book topic",
            Self::CharacterDevelopment => "Generate a character profile from name, role and traits",
            Self::PlotChecker => "Check a plot summary for consistency across its major elements",
        }
    }

    /// Parameter names, in positional order.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Self::ChapterOutline => &["topic", "numChapters"],
            Self::CharacterDevelopment => &["name", "role", "traits", "genre"],
            Self::PlotChecker => &["plotSummary"],
        }
    }

    pub fn from_name(name: &str) -> Option<Skill> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

fn default_chapter_count() -> u64 {
    u64::from(DEFAULT_CHAPTER_COUNT)
}

/// Accept any non-negative whole number, including `3.0` from JS hosts.
/// The upper bound is checked by the caller.
fn chapter_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {number}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutlineArgs {
    topic: String,
    #[serde(default = "default_chapter_count", deserialize_with = "chapter_count")]
    num_chapters: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlotArgs {
    plot_summary: String,
}

/// Hosts the three skills behind one configuration.
#[derive(Debug, Clone)]
pub struct SkillHost {
    outline: OutlineGenerator,
    character: CharacterDeveloper,
    plot: PlotChecker,
}

/// Builder for constructing a `SkillHost`.
#[derive(Debug, Default)]
pub struct SkillHostBuilder {
    config_files: Vec<PathBuf>,
    /// Directly provided config (for testing without files).
    config: Option<SkillConfig>,
}

impl Default for SkillHost {
    fn default() -> Self {
        Self {
            outline: OutlineGenerator::default(),
            character: CharacterDeveloper::default(),
            plot: PlotChecker::default(),
        }
    }
}

impl SkillHost {
    pub fn builder() -> SkillHostBuilder {
        SkillHostBuilder::default()
    }

    /// Compile a host from a full config.
    pub fn from_config(config: &SkillConfig) -> Result<SkillHost, SkillError> {
        Ok(SkillHost {
            outline: OutlineGenerator::new(&config.outline).map_err(ConfigError::from)?,
            character: CharacterDeveloper::new(&config.character).map_err(ConfigError::from)?,
            plot: PlotChecker::new(&config.plot).map_err(ConfigError::from)?,
        })
    }

    pub fn skills(&self) -> &'static [Skill] {
        &Skill::ALL
    }

    pub fn outline(&self, topic: &str, num_chapters: u32) -> ChapterOutline {
        self.outline.generate(topic, num_chapters)
    }

    pub fn develop_character(
        &self,
        request: &CharacterRequest,
    ) -> Result<CharacterProfile, CharacterError> {
        self.character.develop(request)
    }

    pub fn check_plot(&self, summary: &str) -> PlotAnalysis {
        self.plot.check(summary)
    }

    pub fn detect_stages(&self, summary: &str) -> StagePresence {
        self.plot.detect_stages(summary)
    }

    /// Invoke a skill by name with JSON arguments.
    pub fn invoke(&self, name: &str, args: Value) -> Result<Value, SkillError> {
        let skill =
            Skill::from_name(name).ok_or_else(|| SkillError::UnknownSkill(name.to_string()))?;
        self.invoke_skill(skill, args)
    }

    pub fn invoke_skill(&self, skill: Skill, args: Value) -> Result<Value, SkillError> {
        let _span = tracing::info_span!("skill", name = skill.name()).entered();
        let args = normalize_args(skill, args)?;

        match skill {
            Skill::ChapterOutline => {
                let args: OutlineArgs = parse_args(skill, args)?;
                let num_chapters = u32::try_from(args.num_chapters)
                    .ok()
                    .filter(|n| *n <= MAX_CHAPTER_COUNT)
                    .ok_or_else(|| {
                        SkillError::InvalidInput(format!(
                            "numChapters must be at most {}, got {}",
                            MAX_CHAPTER_COUNT, args.num_chapters
                        ))
                    })?;
                to_json(&self.outline(&args.topic, num_chapters))
            }
            Skill::CharacterDevelopment => {
                let request: CharacterRequest = parse_args(skill, args)?;
                let sheet = CharacterSheet {
                    character_profile: self.develop_character(&request)?,
                };
                to_json(&sheet)
            }
            Skill::PlotChecker => {
                let args: PlotArgs = parse_args(skill, args)?;
                to_json(&self.check_plot(&args.plot_summary))
            }
        }
    }
}

/// Turn positional or named arguments into a named-argument object.
///
/// `null` values are dropped so optional parameters fall back to their
/// defaults, the way an omitted trailing argument would.
fn normalize_args(skill: Skill, args: Value) -> Result<Map<String, Value>, SkillError> {
    match args {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Value::Array(values) => {
            let params = skill.params();
            if values.len() > params.len() {
                return Err(SkillError::InvalidInput(format!(
                    "{} takes at most {} arguments, got {}",
                    skill.name(),
                    params.len(),
                    values.len()
                )));
            }
            Ok(params
                .iter()
                .zip(values)
                .filter(|(_, v)| !v.is_null())
                .map(|(name, v)| (name.to_string(), v))
                .collect())
        }
        other => Err(SkillError::InvalidInput(format!(
            "{} expects an object or array of arguments, got {}",
            skill.name(),
            other
        ))),
    }
}

fn parse_args<T: DeserializeOwned>(skill: Skill, args: Map<String, Value>) -> Result<T, SkillError> {
    serde_json::from_value(Value::Object(args)).map_err(|source| SkillError::InvalidArguments {
        skill: skill.name(),
        source,
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, SkillError> {
    serde_json::to_value(value).map_err(SkillError::Serialize)
}

impl SkillHostBuilder {
    /// Add a RON config file. Files are merged in the order they are added,
    /// on top of any config given with [`SkillHostBuilder::with_config`].
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Provide config directly (for testing without files).
    pub fn with_config(mut self, config: SkillConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<SkillHost, SkillError> {
        let mut config = self.config.unwrap_or_default();
        for path in &self.config_files {
            config.merge(SkillConfig::load_from_ron(path)?);
        }
        SkillHost::from_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skill_names_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_name(skill.name()), Some(skill));
        }
        assert_eq!(Skill::from_name("plot_checker"), None);
    }

    #[test]
    fn skill_serde_name_matches_host_name() {
        for skill in Skill::ALL {
            assert_eq!(serde_json::to_value(skill).unwrap(), json!(skill.name()));
        }
    }

    #[test]
    fn invoke_outline_with_default_count() {
        let host = SkillHost::default();
        let result = host
            .invoke("chapter-outline", json!({ "topic": "Gravity" }))
            .unwrap();
        assert_eq!(result["outline"].as_array().unwrap().len(), 10);
        assert_eq!(result["outline"][0]["chapterNumber"], 1);
    }

    #[test]
    fn invoke_outline_positional() {
        let host = SkillHost::default();
        let result = host
            .invoke("chapter-outline", json!(["Gravity", 3]))
            .unwrap();
        assert_eq!(result["outline"].as_array().unwrap().len(), 3);
        assert_eq!(
            result["outline"][2]["title"],
            "Chapter 3: Key Theories and Principles of Gravity"
        );
    }

    #[test]
    fn null_positional_uses_default() {
        let host = SkillHost::default();
        let result = host
            .invoke("chapter-outline", json!(["Gravity", null]))
            .unwrap();
        assert_eq!(result["outline"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn invoke_character_wraps_profile() {
        let host = SkillHost::default();
        let result = host
            .invoke(
                "character-development",
                json!({ "name": "Orin", "role": "mentor", "traits": ["patient"] }),
            )
            .unwrap();
        let profile = &result["characterProfile"];
        assert_eq!(profile["name"], "Orin");
        assert_eq!(
            profile["personality"],
            "A wise and patient figure, Orin has seen much and learned many lessons."
        );
    }

    #[test]
    fn invoke_plot_checker() {
        let host = SkillHost::default();
        let result = host
            .invoke("plot-checker", json!({ "plotSummary": "" }))
            .unwrap();
        assert_eq!(result["issuesFound"], true);
        assert_eq!(result["suggestions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn unknown_skill() {
        let host = SkillHost::default();
        let err = host.invoke("poem-writer", json!({})).unwrap_err();
        assert!(matches!(err, SkillError::UnknownSkill(name) if name == "poem-writer"));
    }

    #[test]
    fn missing_required_argument() {
        let host = SkillHost::default();
        let err = host.invoke("plot-checker", json!({})).unwrap_err();
        assert!(matches!(
            err,
            SkillError::InvalidArguments { skill: "plot-checker", .. }
        ));
    }

    #[test]
    fn negative_chapter_count_rejected() {
        let host = SkillHost::default();
        let err = host
            .invoke("chapter-outline", json!({ "topic": "Gravity", "numChapters": -2 }))
            .unwrap_err();
        assert!(matches!(err, SkillError::InvalidArguments { .. }));
    }

    #[test]
    fn oversized_chapter_count_rejected() {
        let host = SkillHost::default();
        for count in [json!(4294967295u32), json!(MAX_CHAPTER_COUNT + 1), json!(1e12)] {
            let err = host
                .invoke("chapter-outline", json!({ "topic": "Gravity", "numChapters": count }))
                .unwrap_err();
            assert!(matches!(err, SkillError::InvalidInput(_)), "{count}");
        }
    }

    #[test]
    fn max_chapter_count_accepted() {
        let host = SkillHost::default();
        let result = host
            .invoke("chapter-outline", json!(["Gravity", MAX_CHAPTER_COUNT]))
            .unwrap();
        assert_eq!(
            result["outline"].as_array().unwrap().len(),
            MAX_CHAPTER_COUNT as usize
        );
    }

    #[test]
    fn whole_float_chapter_count_accepted() {
        let host = SkillHost::default();
        let result = host
            .invoke("chapter-outline", json!({ "topic": "Gravity", "numChapters": 3.0 }))
            .unwrap();
        assert_eq!(result["outline"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn fractional_chapter_count_rejected() {
        let host = SkillHost::default();
        let err = host
            .invoke("chapter-outline", json!({ "topic": "Gravity", "numChapters": 2.5 }))
            .unwrap_err();
        assert!(matches!(err, SkillError::InvalidArguments { .. }));
    }

    #[test]
    fn too_many_positional_arguments() {
        let host = SkillHost::default();
        let err = host
            .invoke("plot-checker", json!(["a", "b"]))
            .unwrap_err();
        assert!(matches!(err, SkillError::InvalidInput(_)));
    }

    #[test]
    fn scalar_arguments_rejected() {
        let host = SkillHost::default();
        let err = host.invoke("plot-checker", json!("a plot")).unwrap_err();
        assert!(matches!(err, SkillError::InvalidInput(_)));
    }

    #[test]
    fn empty_traits_surface_as_character_error() {
        let host = SkillHost::default();
        let err = host
            .invoke(
                "character-development",
                json!({ "name": "Mara", "role": "hero", "traits": [] }),
            )
            .unwrap_err();
        assert!(matches!(err, SkillError::Character(CharacterError::NoTraits(_))));
    }

    #[test]
    fn builder_with_config() {
        let mut config = SkillConfig::default();
        config.plot.intro_phrases = vec!["once upon a time".to_string()];
        let host = SkillHost::builder().with_config(config).build().unwrap();
        assert!(host
            .check_plot("Once upon a time there was a king.")
            .suggestions
            .iter()
            .all(|s| !s.contains("introduction clearly establishes")));
    }

    #[test]
    fn builder_missing_config_file() {
        let result = SkillHost::builder()
            .config_file("tests/fixtures/missing.ron")
            .build();
        assert!(matches!(result, Err(SkillError::Config(ConfigError::Io(_)))));
    }

    #[test]
    fn invalid_config_template_rejected() {
        let mut config = SkillConfig::default();
        config.outline.core_title = "Chapter {number: broken".to_string();
        assert!(matches!(
            SkillHost::from_config(&config),
            Err(SkillError::Config(ConfigError::Template(_)))
        ));
    }
}
