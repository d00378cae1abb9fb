/// Plot consistency checker — keyword-driven narrative stage detection.
///
/// A summary is scanned for four stage phrase sets (introduction, conflict,
/// climax, ending), then two cross-stage heuristics look for signs of
/// development and resolution. The checks are a brittle proxy for structure:
/// paraphrased text produces false negatives.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::plot::{PlotAnalysis, PlotIssue, StagePresence};

/// Opening sentence of every analysis that found issues.
pub const INITIAL_ASSESSMENT: &str = "Initial assessment: The plot elements seem generally consistent, but further detail would strengthen coherence.";

/// Replaces the analysis text when no issue was found.
pub const WELL_FORMED_MESSAGE: &str = "The plot summary demonstrates good consistency across its major elements. The introduction sets the stage, the conflict is clear, and the climax leads to a logical conclusion.";

/// Pushed when issues were found but no check produced a suggestion.
pub const FALLBACK_SUGGESTION: &str = "Review the overall narrative flow to ensure a seamless progression from start to finish, paying attention to cause and effect between major plot points.";

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid stage pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Phrase sets driving the checker.
///
/// Stage phrases are matched against the lowercased summary; the
/// introduction set only matches at the very start. Development markers are
/// matched case-sensitively against the raw summary, resolution markers
/// against the lowercased one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotRules {
    pub intro_phrases: Vec<String>,
    pub conflict_phrases: Vec<String>,
    pub climax_phrases: Vec<String>,
    pub ending_phrases: Vec<String>,
    pub development_markers: Vec<String>,
    pub resolution_markers: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PlotRules {
    fn default() -> Self {
        Self {
            intro_phrases: owned(&[
                "in the beginning",
                "the story opens with",
                "our tale begins",
                "introducing",
            ]),
            conflict_phrases: owned(&[
                "conflict arises",
                "a problem emerges",
                "challenge presents itself",
                "struggle against",
            ]),
            climax_phrases: owned(&[
                "climax of the story",
                "turning point",
                "final confrontation",
                "peak of tension",
            ]),
            ending_phrases: owned(&["in the end", "finally", "the resolution", "the conclusion"]),
            development_markers: owned(&["transforms", "changes", "learns"]),
            resolution_markers: owned(&["resolves", "overcomes", "defeats"]),
        }
    }
}

/// A compiled phrase alternation. An empty phrase set never matches.
#[derive(Debug, Clone)]
struct StageMatcher {
    regex: Option<Regex>,
}

impl StageMatcher {
    fn new(phrases: &[String], anchored: bool) -> Result<Self, PlotError> {
        let alternatives: Vec<String> = phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| regex::escape(&p.to_lowercase()))
            .collect();
        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }
        let anchor = if anchored { "^" } else { "" };
        let regex = Regex::new(&format!("{anchor}(?:{})", alternatives.join("|")))?;
        Ok(Self { regex: Some(regex) })
    }

    fn is_match(&self, lowered: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(lowered))
    }
}

/// A plot checker compiled from a set of [`PlotRules`].
#[derive(Debug, Clone)]
pub struct PlotChecker {
    intro: StageMatcher,
    conflict: StageMatcher,
    climax: StageMatcher,
    ending: StageMatcher,
    development_markers: Vec<String>,
    resolution_markers: Vec<String>,
}

static DEFAULT_CHECKER: Lazy<PlotChecker> = Lazy::new(|| {
    PlotChecker::new(&PlotRules::default()).expect("built-in plot rules compile")
});

impl Default for PlotChecker {
    fn default() -> Self {
        DEFAULT_CHECKER.clone()
    }
}

impl PlotChecker {
    pub fn new(rules: &PlotRules) -> Result<Self, PlotError> {
        Ok(Self {
            intro: StageMatcher::new(&rules.intro_phrases, true)?,
            conflict: StageMatcher::new(&rules.conflict_phrases, false)?,
            climax: StageMatcher::new(&rules.climax_phrases, false)?,
            ending: StageMatcher::new(&rules.ending_phrases, false)?,
            development_markers: rules
                .development_markers
                .iter()
                .filter(|m| !m.is_empty())
                .cloned()
                .collect(),
            resolution_markers: rules
                .resolution_markers
                .iter()
                .filter(|m| !m.is_empty())
                .map(|m| m.to_lowercase())
                .collect(),
        })
    }

    /// Detect which narrative stages the summary mentions.
    pub fn detect_stages(&self, summary: &str) -> StagePresence {
        let lowered = summary.to_lowercase();
        self.detect_lowered(&lowered)
    }

    fn detect_lowered(&self, lowered: &str) -> StagePresence {
        StagePresence {
            intro: self.intro.is_match(lowered),
            conflict: self.conflict.is_match(lowered),
            climax: self.climax.is_match(lowered),
            ending: self.ending.is_match(lowered),
        }
    }

    /// Run every check against `summary`. Total over all inputs.
    pub fn check(&self, summary: &str) -> PlotAnalysis {
        tracing::info!(chars = summary.len(), "analyzing plot summary for consistency");

        let lowered = summary.to_lowercase();
        let stages = self.detect_lowered(&lowered);
        tracing::debug!(
            intro = stages.intro,
            conflict = stages.conflict,
            climax = stages.climax,
            ending = stages.ending,
            found = stages.count(),
            "detected narrative stages"
        );

        let mut issues = Vec::new();
        if !stages.intro {
            issues.push(PlotIssue::MissingIntroduction);
        }
        if !stages.conflict {
            issues.push(PlotIssue::MissingConflict);
        }
        // A missing climax only matters once there is a conflict to culminate.
        if !stages.climax && stages.conflict {
            issues.push(PlotIssue::MissingClimax);
        }
        if !stages.ending {
            issues.push(PlotIssue::MissingEnding);
        }

        if stages.intro && stages.ending && !contains_any(summary, &self.development_markers) {
            issues.push(PlotIssue::DevelopmentGap);
        }
        if stages.conflict && stages.ending && !contains_any(&lowered, &self.resolution_markers) {
            issues.push(PlotIssue::ResolutionGap);
        }

        let analysis = assemble(issues);
        tracing::info!(
            issues = analysis.issues.len(),
            issues_found = analysis.issues_found,
            "plot analysis complete"
        );
        analysis
    }
}

fn contains_any(text: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| text.contains(m.as_str()))
}

/// Build the analysis text and suggestions in check order.
fn assemble(issues: Vec<PlotIssue>) -> PlotAnalysis {
    let mut analysis = INITIAL_ASSESSMENT.to_string();
    let mut suggestions = Vec::with_capacity(issues.len());
    for issue in &issues {
        analysis.push(' ');
        analysis.push_str(issue.diagnostic());
        suggestions.push(issue.suggestion().to_string());
    }

    let issues_found = !issues.is_empty();
    if !issues_found {
        analysis = WELL_FORMED_MESSAGE.to_string();
    } else if suggestions.is_empty() {
        suggestions.push(FALLBACK_SUGGESTION.to_string());
    }

    PlotAnalysis {
        analysis,
        suggestions,
        issues_found,
        issues,
    }
}

/// Check a plot summary with the built-in phrase sets.
pub fn check_plot_consistency(summary: &str) -> PlotAnalysis {
    DEFAULT_CHECKER.check(summary)
}
