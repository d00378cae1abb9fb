/// Novel Workshop example — plans a short mystery novel with all three skills.
///
/// Outline the book → develop the cast → check two drafts of the plot.
///
/// Run with: cargo run --example novel_workshop

use writing_skills::core::host::SkillHost;
use writing_skills::schema::character::CharacterRequest;

fn main() {
    let host = SkillHost::builder()
        .config_file("skill_data/skills.ron")
        .build()
        .expect("Failed to build skill host");

    // --- Outline ---
    println!("=== Outline: The Lighthouse Keeper ===\n");
    let outline = host.outline("The Lighthouse Keeper", 12);
    for chapter in &outline.outline {
        println!("{}", chapter.title);
    }

    // --- Cast ---
    println!("\n=== Cast ===\n");
    let cast = [
        CharacterRequest::new("Elena", "protagonist", &["brave", "stubborn"]).with_genre("mystery"),
        CharacterRequest::new("Mr. Thorne", "antagonist", &["cynical", "patient"]).with_genre("mystery"),
        CharacterRequest::new("Old Tom", "mentor", &["kind"]).with_genre("mystery"),
    ];
    for request in &cast {
        let profile = host
            .develop_character(request)
            .expect("Failed to develop character");
        println!("{} ({})", profile.name, profile.role);
        println!("  Personality: {}", profile.personality);
        println!("  Backstory:   {}", profile.backstory);
        println!("  Motivations: {}\n", profile.motivations);
    }

    // --- Plot drafts ---
    let drafts = [
        "Elena arrives at the lighthouse. Strange lights appear on the rocks. Finally, the lights stop.",
        "In the beginning, Elena arrives at the lighthouse. Conflict arises when ships start to vanish. \
         At the final confrontation, she faces Mr. Thorne on the gallery. In the end, Elena overcomes \
         her fear, exposes the wreckers and learns to trust Old Tom.",
    ];
    for (n, draft) in drafts.iter().enumerate() {
        println!("=== Plot draft {} ===\n", n + 1);
        let result = host.check_plot(draft);
        println!("{}", result.analysis);
        for suggestion in &result.suggestions {
            println!("  - {}", suggestion);
        }
        println!();
    }
}
