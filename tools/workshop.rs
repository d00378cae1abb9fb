/// Workshop — interactive shell for trying the writing skills.
///
/// Usage: workshop [--config <file.ron>]
///
/// Commands:
///   outline <n> <topic>                  — generate an n-chapter outline
///   character <name> <role> <t1,t2> [genre] — develop a character profile
///   plot <summary>                       — check a plot summary
///   stages <summary>                     — show detected narrative stages
///   config <file.ron>                    — reload with a config file
///   skills                               — list skills
///   help                                 — list commands
///   quit                                 — exit

use std::io::{self, BufRead, Write};

use writing_skills::core::host::{Skill, SkillHost};
use writing_skills::schema::character::CharacterRequest;
use writing_skills::schema::outline::MAX_CHAPTER_COUNT;
use writing_skills::schema::plot::NarrativeStage;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut host = match build_host(config_path.as_deref()) {
        Ok(host) => host,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Writing skills workshop. Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("workshop> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "skills" => {
                for skill in host.skills() {
                    println!("  {:<24} {}", skill.name(), skill.description());
                }
            }
            "outline" => {
                let Some((count, topic)) = rest.split_once(char::is_whitespace) else {
                    println!("Usage: outline <n> <topic>");
                    continue;
                };
                let count: u32 = match count.parse() {
                    Ok(n) if n <= MAX_CHAPTER_COUNT => n,
                    Ok(_) => {
                        println!("At most {} chapters per outline.", MAX_CHAPTER_COUNT);
                        continue;
                    }
                    Err(_) => {
                        println!("Invalid chapter count: {}", count);
                        continue;
                    }
                };
                let outline = host.outline(topic.trim(), count);
                println!();
                for chapter in &outline.outline {
                    println!("{}", chapter.title);
                    println!("    {}", chapter.summary);
                }
                println!();
            }
            "character" => {
                let parts: Vec<&str> = rest.splitn(4, char::is_whitespace).collect();
                if parts.len() < 3 {
                    println!("Usage: character <name> <role> <trait1,trait2,...> [genre]");
                    continue;
                }
                let traits: Vec<&str> = parts[2]
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect();
                let mut request = CharacterRequest::new(parts[0], parts[1], &traits);
                if let Some(genre) = parts.get(3) {
                    request = request.with_genre(genre.trim());
                }
                match host.develop_character(&request) {
                    Ok(profile) => {
                        println!("\n--- {} ({}) ---", profile.name, profile.role);
                        println!("Personality: {}", profile.personality);
                        println!("Backstory:   {}", profile.backstory);
                        println!("Motivations: {}", profile.motivations);
                        println!("--- End ---\n");
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "plot" => {
                let result = host.check_plot(rest);
                println!("\n--- Analysis ---");
                println!("{}", result.analysis);
                if !result.suggestions.is_empty() {
                    println!("\nSuggestions:");
                    for (n, suggestion) in result.suggestions.iter().enumerate() {
                        println!("  {}. {}", n + 1, suggestion);
                    }
                }
                println!("--- {} ---\n", if result.issues_found { "Issues found" } else { "No issues" });
            }
            "stages" => {
                let stages = host.detect_stages(rest);
                for stage in NarrativeStage::ALL {
                    let mark = if stages.has(stage) { "x" } else { " " };
                    println!("  [{}] {}", mark, stage.name());
                }
            }
            "config" => {
                if rest.is_empty() {
                    println!("Usage: config <file.ron>");
                    continue;
                }
                match build_host(Some(rest)) {
                    Ok(new_host) => {
                        host = new_host;
                        println!("Loaded config: {}", rest);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn build_host(config_path: Option<&str>) -> Result<SkillHost, writing_skills::core::host::SkillError> {
    let mut builder = SkillHost::builder();
    if let Some(path) = config_path {
        builder = builder.config_file(path);
    }
    builder.build()
}

fn print_usage() {
    println!("Workshop — interactive shell for trying the writing skills.");
    println!();
    println!("Usage: workshop [--config <file.ron>]");
    println!();
    println!("  --config <file.ron>  Skill config overriding the built-in text");
}

fn print_help() {
    println!("Commands:");
    println!("  outline <n> <topic>                      Generate an n-chapter outline");
    println!("  character <name> <role> <traits> [genre] Develop a character (traits comma-separated)");
    println!("  plot <summary>                           Check a plot summary");
    println!("  stages <summary>                         Show detected narrative stages");
    println!("  config <file.ron>                        Reload with a config file");
    println!("  skills                                   List skills");
    println!("  help                                     Show this help");
    println!("  quit                                     Exit");
    println!();
    println!("Skills: {}", Skill::ALL.map(|s| s.name()).join(", "));
}
