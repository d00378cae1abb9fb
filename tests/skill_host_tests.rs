/// Skill host integration tests — JSON dispatch and config files end to end.

use serde_json::json;
use writing_skills::core::config::{ConfigError, SkillConfig};
use writing_skills::core::host::{Skill, SkillError, SkillHost};

#[test]
fn outline_matches_script_contract() {
    let host = SkillHost::default();
    let result = host
        .invoke("chapter-outline", json!({ "topic": "Gravity", "numChapters": 3 }))
        .unwrap();

    let outline = result["outline"].as_array().unwrap();
    assert_eq!(outline.len(), 3);
    for (i, chapter) in outline.iter().enumerate() {
        assert_eq!(chapter["chapterNumber"], json!(i + 1));
        assert!(chapter["title"].as_str().unwrap().contains("Gravity"));
        assert!(chapter["summary"].as_str().unwrap().starts_with("This chapter will delve into"));
    }
}

#[test]
fn long_outline_uses_further_exploration() {
    let host = SkillHost::default();
    let result = host.invoke("chapter-outline", json!(["Gravity", 13])).unwrap();
    let outline = result["outline"].as_array().unwrap();
    assert_eq!(outline.len(), 13);
    let extra_titles: Vec<&str> = outline[10..]
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        extra_titles,
        vec![
            "Chapter 11: Further Exploration of Gravity (Part 1)",
            "Chapter 12: Further Exploration of Gravity (Part 2)",
            "Chapter 13: Further Exploration of Gravity (Part 3)",
        ]
    );
}

#[test]
fn character_positional_args_with_genre() {
    let host = SkillHost::default();
    let result = host
        .invoke(
            "character-development",
            json!(["Vex", "antagonist", ["ruthless", "cynical"], "dark fantasy"]),
        )
        .unwrap();
    let profile = &result["characterProfile"];
    assert_eq!(profile["role"], "antagonist");
    assert_eq!(
        profile["personality"],
        "A cunning and ruthless, cynical individual, Vex's darker nature is a direct response to [a perceived injustice or ambition]."
    );
    assert!(profile["backstory"]
        .as_str()
        .unwrap()
        .contains("[a setting appropriate for dark fantasy]"));
}

#[test]
fn plot_checker_result_shape() {
    let host = SkillHost::default();
    let result = host
        .invoke(
            "plot-checker",
            json!({ "plotSummary": "In the beginning there was a town. Finally, the story ends." }),
        )
        .unwrap();
    let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(result["issuesFound"], true);
    assert_eq!(result["suggestions"].as_array().unwrap().len(), 2);
}

#[test]
fn every_listed_skill_is_invokable() {
    let host = SkillHost::default();
    let args = [
        json!({ "topic": "Tides" }),
        json!({ "name": "Kai", "role": "sidekick", "traits": ["loyal"] }),
        json!({ "plotSummary": "Introducing Kai." }),
    ];
    for (skill, args) in Skill::ALL.into_iter().zip(args) {
        assert!(host.invoke(skill.name(), args).is_ok(), "{}", skill.name());
    }
}

#[test]
fn fairy_tale_config_overrides_outline_and_plot() {
    let host = SkillHost::builder()
        .config_file("tests/fixtures/fairy_tale.ron")
        .build()
        .unwrap();

    let outline = host.outline("Glass Mountain", 4);
    assert_eq!(outline.outline[0].title, "Chapter 1: Once Upon a Time in Glass Mountain");
    assert_eq!(
        outline.outline[3].title,
        "Chapter 4: Another Tale of Glass Mountain (Part 1)"
    );
    // Sections not in the file keep the built-in phrasing.
    assert_eq!(
        outline.outline[3].summary,
        "This chapter expands on the intricate details of Glass Mountain, providing additional insights and examples not covered in earlier sections."
    );

    let stages = host.detect_stages("Once upon a time... and they lived happily ever after.");
    assert!(stages.intro);
    assert!(stages.ending);
    assert!(!host.detect_stages("In the beginning... in the end.").ending);
}

#[test]
fn fairy_tale_config_keeps_character_defaults() {
    let config = SkillConfig::load_from_ron(std::path::Path::new("tests/fixtures/fairy_tale.ron"))
        .unwrap();
    assert_eq!(config.character, SkillConfig::default().character);
    assert_eq!(config.outline.core_concepts.len(), 3);
}

#[test]
fn broken_template_config_fails_to_build() {
    let result = SkillHost::builder()
        .config_file("tests/fixtures/broken_template.ron")
        .build();
    assert!(matches!(
        result,
        Err(SkillError::Config(ConfigError::Template(_)))
    ));
}

#[test]
fn reference_config_behaves_like_defaults() {
    let from_file = SkillHost::builder()
        .config_file("skill_data/skills.ron")
        .build()
        .unwrap();
    let default_host = SkillHost::default();

    let args = json!({ "name": "Orin", "role": "mentor", "traits": ["brave", "cynical"] });
    assert_eq!(
        from_file.invoke("character-development", args.clone()).unwrap(),
        default_host.invoke("character-development", args).unwrap()
    );
}
