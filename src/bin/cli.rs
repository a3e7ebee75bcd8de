//! Formdeck CLI
//!
//! Command-line client for a running Formdeck server:
//! - Submit forms
//! - Find forms by key/value
//! - Check status
//! - Generate a config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formdeck-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Store and match key/value forms on a Formdeck server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub server: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a form
    Submit {
        /// Fields in key=value format; repeat a key for several values
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Find forms matching every given field
    Find {
        /// Terms in key=value or key format (key alone matches any value)
        terms: Vec<String>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Submit { fields } => {
            let pairs = parse_pairs(&fields);

            let response = client
                .post(format!("{}/api/forms", cli.server))
                .form(&pairs)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Submit failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let stored: serde_json::Value = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&stored)?),
                _ => println!("Stored as {}", stored["file"].as_str().unwrap_or("-")),
            }
        }

        Commands::Find { terms } => {
            let pairs = parse_pairs(&terms);

            let response = client
                .get(format!("{}/api/forms", cli.server))
                .query(&pairs)
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Find failed: {}", response.status());
                std::process::exit(1);
            }

            let names: Vec<String> = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&names)?),
                _ if names.is_empty() => println!("No matching forms."),
                _ => {
                    println!("{:<40} {}", "Form", "URL");
                    println!("{}", "-".repeat(70));
                    for name in names {
                        println!("{:<40} {}/forms/{}", name, cli.server, name);
                    }
                }
            }
        }

        Commands::Status => {
            match client.get(format!("{}/health", cli.server)).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!(
                        "Formdeck v{}",
                        health["version"].as_str().unwrap_or("unknown")
                    );
                    println!("Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!();
                    println!("Index:");
                    println!("  Forms:  {}", health["index"]["forms"].as_u64().unwrap_or(0));
                    println!("  Keys:   {}", health["index"]["keys"].as_u64().unwrap_or(0));
                    println!("  Values: {}", health["index"]["values"].as_u64().unwrap_or(0));
                    println!("Templates: {}", health["templates"].as_u64().unwrap_or(0));
                    println!("Users: {}", health["users"].as_u64().unwrap_or(0));

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Formdeck at {}", cli.server);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin formdeck");
                    std::process::exit(1);
                }
            }
        }

        Commands::InitConfig { output } => {
            let config = formdeck::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

/// Split `key=value` arguments; a bare `key` becomes `(key, "")`
fn parse_pairs(args: &[String]) -> Vec<(String, String)> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (arg.to_string(), String::new()),
        })
        .collect()
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let args = vec!["color=red".to_string(), "size".to_string(), "a=b=c".to_string()];
        assert_eq!(
            parse_pairs(&args),
            vec![
                ("color".to_string(), "red".to_string()),
                ("size".to_string(), String::new()),
                ("a".to_string(), "b=c".to_string()),
            ]
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }
}
