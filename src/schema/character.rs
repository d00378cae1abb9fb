use serde::{Deserialize, Serialize};

/// Genre used when the caller does not give one.
pub const DEFAULT_GENRE: &str = "general fiction";

fn default_genre() -> String {
    DEFAULT_GENRE.to_string()
}

/// Input to the character development skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRequest {
    pub name: String,
    pub role: String,
    pub traits: Vec<String>,
    #[serde(default = "default_genre")]
    pub genre: String,
}

impl CharacterRequest {
    pub fn new(name: impl Into<String>, role: impl Into<String>, traits: &[&str]) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            traits: traits.iter().map(|t| t.to_string()).collect(),
            genre: default_genre(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Returns true if `trait_name` is one of the traits (exact match).
    pub fn has_trait(&self, trait_name: &str) -> bool {
        self.traits.iter().any(|t| t == trait_name)
    }
}

/// Which profile text a trait hook appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    Personality,
    Backstory,
    Motivations,
}

/// A generated character profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub role: String,
    pub personality: String,
    pub backstory: String,
    pub motivations: String,
}

impl CharacterProfile {
    pub fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Personality => &mut self.personality,
            ProfileField::Backstory => &mut self.backstory,
            ProfileField::Motivations => &mut self.motivations,
        }
    }
}

/// Host-facing wrapper: `{"characterProfile": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub character_profile: CharacterProfile,
}
