/// Chapter outline generator — fixed core-concept templates per topic.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::template::{Bindings, Template, TemplateError};
use crate::schema::outline::{Chapter, ChapterOutline};

/// Variables available to core-concept templates.
const CONCEPT_VARS: &[&str] = &["topic"];
/// Variables available to core chapter titles and summaries.
const CORE_VARS: &[&str] = &["number", "topic", "concept", "concept_lower"];
/// Variables available to chapters past the core-concept list.
const EXTRA_VARS: &[&str] = &["number", "topic", "part"];

/// Text templates for the outline generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineTemplates {
    /// One chapter theme per entry, used in order before falling back
    /// to the "further exploration" templates.
    pub core_concepts: Vec<String>,
    pub core_title: String,
    pub core_summary: String,
    pub extra_title: String,
    pub extra_summary: String,
}

impl Default for OutlineTemplates {
    fn default() -> Self {
        Self {
            core_concepts: [
                "Introduction to {topic}",
                "Historical Context of {topic}",
                "Key Theories and Principles of {topic}",
                "Methodologies and Approaches in {topic}",
                "Case Studies or Applications of {topic}",
                "Challenges and Controversies in {topic}",
                "Future Trends and Outlook for {topic}",
                "Impact and Significance of {topic}",
                "Advanced Concepts in {topic}",
                "Conclusion and Summary of {topic}",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            core_title: "Chapter {number}: {concept}".to_string(),
            core_summary: "This chapter will delve into the {concept_lower}, exploring its fundamental aspects and initial understanding within the context of the book's overall theme.".to_string(),
            extra_title: "Chapter {number}: Further Exploration of {topic} (Part {part})".to_string(),
            extra_summary: "This chapter expands on the intricate details of {topic}, providing additional insights and examples not covered in earlier sections.".to_string(),
        }
    }
}

/// An outline generator compiled from [`OutlineTemplates`].
#[derive(Debug, Clone)]
pub struct OutlineGenerator {
    core_concepts: Vec<Template>,
    core_title: Template,
    core_summary: Template,
    extra_title: Template,
    extra_summary: Template,
}

static DEFAULT_GENERATOR: Lazy<OutlineGenerator> = Lazy::new(|| {
    OutlineGenerator::new(&OutlineTemplates::default()).expect("built-in outline templates parse")
});

impl Default for OutlineGenerator {
    fn default() -> Self {
        DEFAULT_GENERATOR.clone()
    }
}

impl OutlineGenerator {
    pub fn new(templates: &OutlineTemplates) -> Result<Self, TemplateError> {
        let core_concepts = templates
            .core_concepts
            .iter()
            .map(|c| Template::parse_checked(c, CONCEPT_VARS))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            core_concepts,
            core_title: Template::parse_checked(&templates.core_title, CORE_VARS)?,
            core_summary: Template::parse_checked(&templates.core_summary, CORE_VARS)?,
            extra_title: Template::parse_checked(&templates.extra_title, EXTRA_VARS)?,
            extra_summary: Template::parse_checked(&templates.extra_summary, EXTRA_VARS)?,
        })
    }

    /// Number of chapters that get a dedicated core concept.
    pub fn core_len(&self) -> usize {
        self.core_concepts.len()
    }

    /// Generate `num_chapters` chapters for `topic`, numbered from 1.
    ///
    /// Chapters past the core-concept list use the "further exploration"
    /// templates with a part counter starting at 1.
    ///
    /// The whole outline is built in memory; hosts cap `num_chapters` at
    /// [`MAX_CHAPTER_COUNT`](crate::schema::outline::MAX_CHAPTER_COUNT).
    pub fn generate(&self, topic: &str, num_chapters: u32) -> ChapterOutline {
        tracing::info!(topic, num_chapters, "generating chapter outline");

        let core_len = self.core_len();
        let outline = (0..num_chapters as usize)
            .map(|i| {
                let number = i + 1;
                let mut bindings = Bindings::default();
                bindings.insert("number", number.to_string());
                bindings.insert("topic", topic.to_string());

                let (title, summary) = match self.core_concepts.get(i) {
                    Some(concept_template) => {
                        let concept = concept_template.render_lenient(&bindings);
                        bindings.insert("concept_lower", concept.to_lowercase());
                        bindings.insert("concept", concept);
                        (&self.core_title, &self.core_summary)
                    }
                    None => {
                        bindings.insert("part", (number - core_len).to_string());
                        (&self.extra_title, &self.extra_summary)
                    }
                };

                Chapter {
                    chapter_number: number as u32,
                    title: title.render_lenient(&bindings),
                    summary: summary.render_lenient(&bindings),
                }
            })
            .collect();

        ChapterOutline { outline }
    }
}

/// Generate an outline with the built-in templates.
pub fn generate_chapter_outline(topic: &str, num_chapters: u32) -> ChapterOutline {
    DEFAULT_GENERATOR.generate(topic, num_chapters)
}
