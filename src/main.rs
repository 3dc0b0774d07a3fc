use anyhow::{bail, Context, Result};
use log::info;
use std::env;
use std::fs;

use halsologg::nutrition_parser;
use halsologg::smart_query;
use halsologg::strengthlog;
use halsologg::workout_description;

const USAGE: &str = "Usage: halsologg <command> [args]

Commands:
  nutrition <file>            Parse pasted nutrition-label text
  strengthlog <file> <user>   Parse a strength-log CSV export
  workout <title> <file>      Parse a workout description
  query <text>                Parse a smart search query";

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("");

    match command {
        "nutrition" => {
            let path = args.get(2).context(USAGE)?;
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            info!("Parsing nutrition label from {}", path);
            let parsed = nutrition_parser::parse_nutrition_text(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        "strengthlog" => {
            let path = args.get(2).context(USAGE)?;
            let user_id = args.get(3).context(USAGE)?;
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            info!("Parsing strength-log export from {}", path);
            let import = strengthlog::parse_strength_log_csv(&content, user_id)?;
            println!("{}", serde_json::to_string_pretty(&import)?);
        }
        "workout" => {
            let title = args.get(2).context(USAGE)?;
            let path = args.get(3).context(USAGE)?;
            let description = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            info!("Parsing workout description from {}", path);
            let parsed = workout_description::parse_workout(title, &description);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        "query" => {
            let text = args.get(2).context(USAGE)?;
            let parsed = smart_query::parse_smart_query(text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
