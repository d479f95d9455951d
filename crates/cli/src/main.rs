use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use schemars::schema_for;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing_subscriber::{EnvFilter, fmt};

use board_core::loader;
use board_core::schema::{NoticeRecord, Priority};

#[derive(Parser)]
#[command(name = "board")]
#[command(about = "Notice board engine CLI", long_about = None)]
struct Cli {
    /// Config file with default paths
    #[arg(long, default_value = "board.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export canonical JSON Schemas to the ./schemas directory
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Inspect a notice feed file
    Notices {
        #[command(subcommand)]
        command: NoticeCommands,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Export JSON Schema files for canonical types
    Export {
        /// Output directory (default: ./schemas)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum NoticeCommands {
    /// Check a feed for malformed notices
    Validate {
        /// Notice feed JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print a board summary
    List {
        /// Notice feed JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct BoardConfig {
    notices: Option<PathBuf>,
    schemas_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Schema { command } => match command {
            SchemaCommands::Export { out_dir } => {
                let out_dir = out_dir
                    .or(config.schemas_dir)
                    .unwrap_or_else(|| PathBuf::from("schemas"));
                schema_export(out_dir)
            }
        },
        Commands::Notices { command } => match command {
            NoticeCommands::Validate { file } => {
                notices_validate(resolve_feed(file, &config)?)
            }
            NoticeCommands::List { file } => notices_list(resolve_feed(file, &config)?),
        },
    }
}

fn load_config(path: &Path) -> Result<BoardConfig> {
    if !path.exists() {
        return Ok(BoardConfig::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn resolve_feed(arg: Option<PathBuf>, config: &BoardConfig) -> Result<PathBuf> {
    match arg.or_else(|| config.notices.clone()) {
        Some(path) => Ok(path),
        None => bail!("no notice feed given; pass --file or set `notices` in board.toml"),
    }
}

fn schema_export(out_dir: PathBuf) -> Result<()> {
    fs::create_dir_all(&out_dir)?;

    let notice_schema = schema_for!(board_core::schema::NoticeRecord);
    let notice_json = serde_json::to_string_pretty(&notice_schema)?;
    fs::write(out_dir.join("NoticeRecord.schema.json"), notice_json)?;

    let form_schema = schema_for!(board_core::schema::FormSchema);
    let form_json = serde_json::to_string_pretty(&form_schema)?;
    fs::write(out_dir.join("FormSchema.schema.json"), form_json)?;

    let submission_schema = schema_for!(board_core::schema::Submission);
    let submission_json = serde_json::to_string_pretty(&submission_schema)?;
    fs::write(out_dir.join("Submission.schema.json"), submission_json)?;

    println!("Exported schemas to {}", out_dir.display());
    Ok(())
}

fn load_feed(path: &Path) -> Result<Vec<NoticeRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading notice feed {}", path.display()))?;
    loader::parse_feed(&raw).with_context(|| format!("parsing notice feed {}", path.display()))
}

fn notices_validate(path: PathBuf) -> Result<()> {
    let notices = load_feed(&path)?;
    let findings = loader::check_feed(&notices);
    if findings.is_empty() {
        println!("{} notices, all well-formed", notices.len());
        return Ok(());
    }
    for finding in &findings {
        println!("{}: {}", finding.notice_id, finding.error);
    }
    bail!("{} malformed notice(s) in {}", findings.len(), path.display());
}

fn notices_list(path: PathBuf) -> Result<()> {
    let notices = load_feed(&path)?;
    if notices.is_empty() {
        println!("There are currently no notices available.");
        return Ok(());
    }

    let today = OffsetDateTime::now_utc().date();
    for notice in &notices {
        let mut tags = vec![notice.notice_type.clone()];
        if notice.priority == Priority::High {
            tags.push("High Priority".to_string());
        }
        if notice.has_form {
            tags.push("sign-up form".to_string());
        }
        println!("[{}] {}", tags.join(", "), notice.title);
        println!("  {}", notice.description);
        println!(
            "  Posted by {} on {} ({})",
            notice.author,
            format_date(&notice.date),
            relative_date(&notice.date, today)
        );
        println!();
    }
    Ok(())
}

fn parse_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).ok()
}

/// "August 25, 2026"; falls back to the raw feed string when it is not a
/// plain ISO-8601 date.
fn format_date(raw: &str) -> String {
    let format = format_description!("[month repr:long] [day padding:none], [year]");
    parse_date(raw)
        .and_then(|date| date.format(&format).ok())
        .unwrap_or_else(|| raw.to_string())
}

fn relative_date(raw: &str, today: Date) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };
    let days = (today - date).whole_days();
    if days <= 0 {
        return "Today".to_string();
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < 7 {
        return format!("{days} days ago");
    }
    if days < 30 {
        return format!("{} weeks ago", days / 7);
    }
    format!("{} months ago", days / 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn relative_dates_match_the_board_buckets() {
        let today = date!(2026 - 08 - 29);
        assert_eq!(relative_date("2026-08-29", today), "Today");
        assert_eq!(relative_date("2026-08-28", today), "Yesterday");
        assert_eq!(relative_date("2026-08-25", today), "4 days ago");
        assert_eq!(relative_date("2026-08-10", today), "2 weeks ago");
        assert_eq!(relative_date("2026-05-01", today), "4 months ago");
        // Future-dated notices are clamped to "Today".
        assert_eq!(relative_date("2026-09-05", today), "Today");
        // Unparseable dates fall through untouched.
        assert_eq!(relative_date("soon", today), "soon");
    }

    #[test]
    fn long_dates_render_without_zero_padding() {
        assert_eq!(format_date("2026-08-05"), "August 5, 2026");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
