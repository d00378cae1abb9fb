//! Writing Skills — creative-writing assistant skills for a host orchestrator.
//!
//! Three independent skills turn plain arguments into structured, templated
//! text: a chapter-outline generator, a character-profile generator, and a
//! keyword-driven plot consistency checker.

pub mod core;
pub mod schema;

pub use crate::core::character::develop_character;
pub use crate::core::host::SkillHost;
pub use crate::core::outline::generate_chapter_outline;
pub use crate::core::plot_checker::check_plot_consistency;
