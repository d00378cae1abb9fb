//! WASM bindings for writing-skills — lets a JavaScript host call the skills.

use wasm_bindgen::prelude::*;

use writing_skills::core::config::SkillConfig;
use writing_skills::core::host::{Skill, SkillHost};

// ---------------------------------------------------------------------------
// Embedded reference config — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const REFERENCE_CONFIG: &str = include_str!("../../skill_data/skills.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct SkillInfo {
    name: &'static str,
    description: &'static str,
    params: &'static [&'static str],
}

/// A skill host exposed to JavaScript. All arguments and results cross the
/// boundary as JSON strings.
#[wasm_bindgen]
pub struct SkillRuntime {
    host: SkillHost,
}

#[wasm_bindgen]
impl SkillRuntime {
    /// Create a runtime with the reference configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SkillRuntime, JsError> {
        Self::with_config(data::REFERENCE_CONFIG)
    }

    /// Create a runtime from a RON config string. Omitted sections fall back
    /// to the built-in defaults.
    pub fn with_config(config_ron: &str) -> Result<SkillRuntime, JsError> {
        let config = SkillConfig::parse_ron(config_ron)
            .map_err(|e| JsError::new(&format!("Invalid config: {e}")))?;
        let host = SkillHost::from_config(&config)
            .map_err(|e| JsError::new(&format!("Invalid config: {e}")))?;
        Ok(SkillRuntime { host })
    }

    /// Invoke a skill by name.
    ///
    /// `args_json` is either an object of named parameters or a positional
    /// array, e.g. `{"topic": "Gravity", "numChapters": 3}` or
    /// `["Gravity", 3]`. Returns the result as a JSON string.
    pub fn invoke(&self, skill: &str, args_json: &str) -> Result<String, JsError> {
        let args: serde_json::Value = serde_json::from_str(args_json)
            .map_err(|e| JsError::new(&format!("Invalid arguments JSON: {e}")))?;
        let result = self
            .host
            .invoke(skill, args)
            .map_err(|e| JsError::new(&format!("Skill error: {e}")))?;
        serde_json::to_string(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array describing the available skills.
    pub fn skills() -> String {
        let info: Vec<SkillInfo> = Skill::ALL
            .iter()
            .map(|s| SkillInfo {
                name: s.name(),
                description: s.description(),
                params: s.params(),
            })
            .collect();
        serde_json::to_string(&info).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_config_builds() {
        let runtime = SkillRuntime::new().ok().unwrap();
        let out = runtime
            .invoke("plot-checker", r#"{"plotSummary": ""}"#)
            .ok()
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["issuesFound"], true);
    }

    #[test]
    fn skills_lists_all_three() {
        let json: serde_json::Value = serde_json::from_str(&SkillRuntime::skills()).unwrap();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["chapter-outline", "character-development", "plot-checker"]
        );
    }
}
