/// Skill Runner — invokes one skill the way a host orchestrator would.
///
/// Usage: skill_runner --skill <name> --args <json> [--config <file.ron>] [--pretty]
use std::env;
use std::process;

use writing_skills::core::host::{Skill, SkillHost};

const USAGE: &str =
    "Usage: skill_runner --skill <name> --args <json> [--config <file.ron>] [--pretty]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut skill = None;
    let mut skill_args = None;
    let mut configs = Vec::new();
    let mut pretty = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--skill" if i + 1 < args.len() => {
                i += 1;
                skill = Some(args[i].clone());
            }
            "--args" if i + 1 < args.len() => {
                i += 1;
                skill_args = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                configs.push(args[i].clone());
            }
            "--pretty" => pretty = true,
            "--list" => {
                for s in Skill::ALL {
                    println!("{:<24} {}", s.name(), s.description());
                    println!("{:<24} params: {}", "", s.params().join(", "));
                }
                process::exit(0);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!("       skill_runner --list");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
        i += 1;
    }

    let skill = skill.unwrap_or_else(|| {
        eprintln!("Error: --skill is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let skill_args: serde_json::Value = match skill_args {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            eprintln!("Error: --args is not valid JSON: {}", e);
            process::exit(1);
        }),
        None => serde_json::Value::Null,
    };

    let host = configs
        .iter()
        .fold(SkillHost::builder(), |builder, path| builder.config_file(path))
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    let result = host.invoke(&skill, skill_args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let rendered = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
