use serde::{Deserialize, Serialize};

/// One of the four narrative stages the plot checker looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeStage {
    Introduction,
    Conflict,
    Climax,
    Ending,
}

impl NarrativeStage {
    /// All stages, in evaluation order.
    pub const ALL: [NarrativeStage; 4] = [
        Self::Introduction,
        Self::Conflict,
        Self::Climax,
        Self::Ending,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Conflict => "conflict",
            Self::Climax => "climax",
            Self::Ending => "ending",
        }
    }
}

/// Which stages were detected in a summary. Derived once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StagePresence {
    pub intro: bool,
    pub conflict: bool,
    pub climax: bool,
    pub ending: bool,
}

impl StagePresence {
    pub fn has(&self, stage: NarrativeStage) -> bool {
        match stage {
            NarrativeStage::Introduction => self.intro,
            NarrativeStage::Conflict => self.conflict,
            NarrativeStage::Climax => self.climax,
            NarrativeStage::Ending => self.ending,
        }
    }

    pub fn count(&self) -> usize {
        NarrativeStage::ALL.iter().filter(|s| self.has(**s)).count()
    }
}

/// A problem the checker found, in the order checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotIssue {
    MissingIntroduction,
    MissingConflict,
    /// Only reported when a conflict exists to culminate.
    MissingClimax,
    MissingEnding,
    /// Intro and ending present but nothing signals change in between.
    DevelopmentGap,
    /// Conflict and ending present but nothing says how it is resolved.
    ResolutionGap,
}

impl PlotIssue {
    /// Sentence appended to the analysis text.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            Self::MissingIntroduction => {
                "It's unclear how the story begins or what sets the initial scene."
            }
            Self::MissingConflict => "The core conflict or central problem is not clearly defined.",
            Self::MissingClimax => {
                "The plot seems to lack a clear climax or peak of action/tension."
            }
            Self::MissingEnding => "The resolution or ending of the story is vague or missing.",
            Self::DevelopmentGap => {
                "The ending doesn't seem to indicate significant character or plot development from the introduction."
            }
            Self::ResolutionGap => {
                "While a conflict is present, the summary doesn't explicitly state how it's resolved by the ending."
            }
        }
    }

    /// Improvement suggestion pushed for this issue.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::MissingIntroduction => {
                "Ensure the introduction clearly establishes the setting, main characters, and initial situation."
            }
            Self::MissingConflict => "Articulate the main conflict that drives the narrative forward.",
            Self::MissingClimax => {
                "Develop a clear climax where the main conflict comes to a head and the protagonist faces their greatest challenge."
            }
            Self::MissingEnding => {
                "Provide a clear and satisfying resolution that addresses the main conflict and character arcs."
            }
            Self::DevelopmentGap => {
                "Ensure the ending demonstrates how the introduction's setup has been challenged or transformed by the conflict and climax."
            }
            Self::ResolutionGap => {
                "Clearly show how the ending directly addresses and resolves the central conflict introduced earlier."
            }
        }
    }
}

/// Result of a plot consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotAnalysis {
    pub analysis: String,
    pub suggestions: Vec<String>,
    pub issues_found: bool,
    #[serde(skip)]
    pub issues: Vec<PlotIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_presence_count() {
        let flags = StagePresence {
            intro: true,
            conflict: false,
            climax: true,
            ending: true,
        };
        assert_eq!(flags.count(), 3);
        assert!(flags.has(NarrativeStage::Climax));
        assert!(!flags.has(NarrativeStage::Conflict));
        assert_eq!(StagePresence::default().count(), 0);
    }

    #[test]
    fn stage_names() {
        assert_eq!(NarrativeStage::Introduction.name(), "introduction");
        assert_eq!(NarrativeStage::Ending.name(), "ending");
    }

    #[test]
    fn issue_texts_are_distinct() {
        let issues = [
            PlotIssue::MissingIntroduction,
            PlotIssue::MissingConflict,
            PlotIssue::MissingClimax,
            PlotIssue::MissingEnding,
            PlotIssue::DevelopmentGap,
            PlotIssue::ResolutionGap,
        ];
        let suggestions: std::collections::HashSet<&str> =
            issues.iter().map(|i| i.suggestion()).collect();
        assert_eq!(suggestions.len(), issues.len());
    }

    #[test]
    fn analysis_serializes_camel_case() {
        let analysis = PlotAnalysis {
            analysis: "ok".to_string(),
            suggestions: vec![],
            issues_found: false,
            issues: vec![PlotIssue::MissingEnding],
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["issuesFound"], serde_json::Value::Bool(false));
        assert!(json.get("issues").is_none());
        assert!(json.get("issues_found").is_none());
    }
}
