/// Character development assistant — templated profiles from name, role and traits.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::template::{Bindings, Template, TemplateError};
use crate::schema::character::{CharacterProfile, CharacterRequest, ProfileField};

const PROFILE_VARS: &[&str] = &[
    "name",
    "role",
    "genre",
    "traits",
    "primary_trait",
    "secondary_trait",
];

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("character '{0}' needs at least one trait")]
    NoTraits(String),
}

/// Sentence appended to one profile field when a character has a trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitHook {
    /// Matched exactly, including case.
    pub trait_name: String,
    pub field: ProfileField,
    pub text: String,
}

/// Personality and motivations that replace the generic ones for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOverride {
    /// Matched case-insensitively.
    pub role: String,
    pub personality: String,
    pub motivations: String,
}

/// Text templates for the character developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTemplates {
    pub personality: String,
    pub backstory: String,
    pub motivations: String,
    /// Applied in order, before role overrides.
    pub trait_hooks: Vec<TraitHook>,
    pub role_overrides: Vec<RoleOverride>,
}

impl Default for CharacterTemplates {
    fn default() -> Self {
        Self {
            personality: "A character known for being {traits}. Their core nature is shaped by their experiences, making them {primary_trait} in times of crisis and {secondary_trait} in their daily interactions.".to_string(),
            backstory: "{name} grew up in [a setting appropriate for {genre}], facing challenges related to [one of their traits]. A pivotal event in their past involved [a key experience that forged their current personality or goal].".to_string(),
            motivations: "{name}'s primary motivation stems from [a deep-seated desire or a past trauma related to their role]. They are driven to [achieve a goal relevant to their role and traits], often clashing with [an opposing force or internal conflict].".to_string(),
            trait_hooks: vec![
                TraitHook {
                    trait_name: "brave".to_string(),
                    field: ProfileField::Backstory,
                    text: " They once stood up against a formidable foe, earning respect but also making enemies.".to_string(),
                },
                TraitHook {
                    trait_name: "cynical".to_string(),
                    field: ProfileField::Motivations,
                    text: " Their cynicism often masks a hidden idealism, or it could be a protective mechanism against disappointment.".to_string(),
                },
            ],
            role_overrides: vec![
                RoleOverride {
                    role: "antagonist".to_string(),
                    personality: "A cunning and {traits} individual, {name}'s darker nature is a direct response to [a perceived injustice or ambition].".to_string(),
                    motivations: "Driven by a desire for [power/revenge/control] stemming from [their backstory], {name} believes their actions, however extreme, are justified.".to_string(),
                },
                RoleOverride {
                    role: "mentor".to_string(),
                    personality: "A wise and {traits} figure, {name} has seen much and learned many lessons.".to_string(),
                    motivations: "Motivated by a desire to guide and protect, {name} seeks to impart knowledge and prevent others from making similar mistakes they may have made.".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledHook {
    trait_name: String,
    field: ProfileField,
    text: Template,
}

#[derive(Debug, Clone)]
struct CompiledOverride {
    role: String,
    personality: Template,
    motivations: Template,
}

/// A character developer compiled from [`CharacterTemplates`].
#[derive(Debug, Clone)]
pub struct CharacterDeveloper {
    personality: Template,
    backstory: Template,
    motivations: Template,
    hooks: Vec<CompiledHook>,
    overrides: Vec<CompiledOverride>,
}

static DEFAULT_DEVELOPER: Lazy<CharacterDeveloper> = Lazy::new(|| {
    CharacterDeveloper::new(&CharacterTemplates::default())
        .expect("built-in character templates parse")
});

impl Default for CharacterDeveloper {
    fn default() -> Self {
        DEFAULT_DEVELOPER.clone()
    }
}

impl CharacterDeveloper {
    pub fn new(templates: &CharacterTemplates) -> Result<Self, TemplateError> {
        let hooks = templates
            .trait_hooks
            .iter()
            .map(|hook| {
                Ok(CompiledHook {
                    trait_name: hook.trait_name.clone(),
                    field: hook.field,
                    text: Template::parse_checked(&hook.text, PROFILE_VARS)?,
                })
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;

        let overrides = templates
            .role_overrides
            .iter()
            .map(|o| {
                Ok(CompiledOverride {
                    role: o.role.to_lowercase(),
                    personality: Template::parse_checked(&o.personality, PROFILE_VARS)?,
                    motivations: Template::parse_checked(&o.motivations, PROFILE_VARS)?,
                })
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;

        Ok(Self {
            personality: Template::parse_checked(&templates.personality, PROFILE_VARS)?,
            backstory: Template::parse_checked(&templates.backstory, PROFILE_VARS)?,
            motivations: Template::parse_checked(&templates.motivations, PROFILE_VARS)?,
            hooks,
            overrides,
        })
    }

    /// Build a profile for `request`.
    ///
    /// Trait hooks append to their field first; a matching role override
    /// then replaces personality and motivations wholesale.
    pub fn develop(&self, request: &CharacterRequest) -> Result<CharacterProfile, CharacterError> {
        tracing::info!(
            name = %request.name,
            role = %request.role,
            traits = %request.traits.join(", "),
            genre = %request.genre,
            "developing character profile"
        );

        let Some(primary) = request.traits.first() else {
            return Err(CharacterError::NoTraits(request.name.clone()));
        };
        let secondary = request
            .traits
            .get(1)
            .filter(|t| !t.is_empty())
            .unwrap_or(primary);

        let mut bindings = Bindings::default();
        bindings.insert("name", request.name.clone());
        bindings.insert("role", request.role.clone());
        bindings.insert("genre", request.genre.clone());
        bindings.insert("traits", request.traits.join(", "));
        bindings.insert("primary_trait", primary.clone());
        bindings.insert("secondary_trait", secondary.clone());

        let mut profile = CharacterProfile {
            name: request.name.clone(),
            role: request.role.clone(),
            personality: self.personality.render_lenient(&bindings),
            backstory: self.backstory.render_lenient(&bindings),
            motivations: self.motivations.render_lenient(&bindings),
        };

        for hook in &self.hooks {
            if request.has_trait(&hook.trait_name) {
                tracing::debug!(trait_name = %hook.trait_name, field = ?hook.field, "applying trait hook");
                profile
                    .field_mut(hook.field)
                    .push_str(&hook.text.render_lenient(&bindings));
            }
        }

        let role = request.role.to_lowercase();
        for role_override in self.overrides.iter().filter(|o| o.role == role) {
            tracing::debug!(role = %role_override.role, "applying role override");
            profile.personality = role_override.personality.render_lenient(&bindings);
            profile.motivations = role_override.motivations.render_lenient(&bindings);
        }

        Ok(profile)
    }
}

/// Develop a character with the built-in templates.
pub fn develop_character(request: &CharacterRequest) -> Result<CharacterProfile, CharacterError> {
    DEFAULT_DEVELOPER.develop(request)
}
