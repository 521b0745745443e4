use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use favscout_core::data::IconStore;
use favscout_resolver::{IconCache, IconResolver, MemoryCache};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const STORE_FILE_NAME: &str = "favscout.db";

// Helper functions for the resolve handler

/// Resolve the store directory argument to the store file path, expanding
/// a leading tilde.
pub fn store_path_from_arg(dir: &str) -> PathBuf {
    let expanded = shellexpand::tilde(dir);
    Path::new(expanded.as_ref()).join(STORE_FILE_NAME)
}

/// Load URLs from either the positional arguments or a file
pub fn load_urls_from_source(
    urls: &[String],
    urls_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(urls_file_path) = urls_file {
        load_urls_from_file(urls_file_path)
    } else if !urls.is_empty() {
        Ok(urls.to_vec())
    } else {
        Err("Either URL arguments or --urls-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read URLs file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_url_line(line.trim()))
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add https:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // Try to parse as-is
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    // Try adding https://
    let with_scheme = format!("https://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("⚠  Skipping invalid URL '{}'", line);
    None
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    print_divider();
    println!("{}", "  FAVSCOUT INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let store_dir = args.get_one::<String>("PATH").unwrap();
    let force = args.get_flag("force");
    let expanded_config_dir = shellexpand::tilde(store_dir);
    let config_dir = Path::new(expanded_config_dir.as_ref());
    let store_loc = config_dir.join(STORE_FILE_NAME);
    let store_path = store_loc.as_path();

    println!("{} Parsed arguments", "✓".green().bold());
    println!(
        "{} Target: {}",
        "→".blue(),
        config_dir.display().to_string().bright_white()
    );
    println!();

    if IconStore::exists(store_path) && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("An icon store already exists at:");
        println!(
            "  {} {}",
            "•".yellow(),
            store_path.display().to_string().bright_white()
        );
        println!();

        let response = print_prompt("Overwrite it and discard cached icons? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
        println!("{} Proceeding with overwrite", "→".yellow().bold());
        println!();
    }

    println!("{} Creating directory structure...", "→".blue());
    fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    println!(
        "  {} {}",
        "✓".green(),
        config_dir.display().to_string().bright_white()
    );

    if IconStore::exists(store_path) {
        IconStore::remove_file(store_path).context("Failed to remove existing icon store")?;
        println!("{} Existing icon store removed", "✓".green().bold());
    }

    println!("{} Creating icon store...", "→".blue());
    IconStore::open(store_path).context("Failed to create icon store")?;

    println!();
    print_divider();
    println!("{}", "  INITIALIZATION COMPLETE".green().bold());
    print_divider();
    println!();
    println!(
        "{} Config directory: {}",
        "✓".green().bold(),
        config_dir.display().to_string().bright_white()
    );
    println!(
        "{} Icon store: {}",
        "✓".green().bold(),
        store_path.display().to_string().bright_white()
    );
    println!();

    Ok(())
}

pub async fn handle_resolve(args: &ArgMatches, quiet: bool) -> Result<()> {
    let urls: Vec<String> = args
        .get_many::<Url>("URL")
        .map(|values| values.map(|u| u.as_str().to_string()).collect())
        .unwrap_or_default();
    let urls_file = args.get_one::<PathBuf>("urls-file");
    let fallback_size = *args.get_one::<u32>("fallback-size").unwrap();
    let timeout_secs = *args.get_one::<u64>("timeout").unwrap();
    let no_cache = args.get_flag("no-cache");
    let json = args.get_flag("json");

    let urls = load_urls_from_source(&urls, urls_file).map_err(|e| anyhow!(e))?;

    let cache: Arc<dyn IconCache> = if no_cache {
        Arc::new(MemoryCache::new())
    } else {
        let store_path = store_path_from_arg(args.get_one::<String>("store").unwrap());
        if let Some(parent) = store_path.parent() {
            fs::create_dir_all(parent).context("Failed to create store directory")?;
        }
        Arc::new(IconStore::open(&store_path).with_context(|| {
            format!("Failed to open icon store at {}", store_path.display())
        })?)
    };

    let resolver = IconResolver::new()
        .with_cache(cache)
        .with_fallback_size(fallback_size)
        .with_timeout(timeout_secs);

    let spinner = if quiet || json {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    };

    let mut entries = Vec::new();
    let mut failures = 0usize;

    for url in &urls {
        if let Some(spinner) = &spinner {
            spinner.set_message(format!("Resolving {}", url));
        }

        match resolver.resolve_icon(url).await {
            Ok(icon) => {
                if json {
                    entries.push(serde_json::json!({ "url": url, "uri": icon.uri }));
                } else if let Some(spinner) = &spinner {
                    spinner.println(format!(
                        "{} {} {} {}",
                        "✓".green().bold(),
                        url.bright_white(),
                        "→".blue(),
                        icon.uri
                    ));
                } else {
                    println!("{}", icon.uri);
                }
            }
            Err(e) => {
                failures += 1;
                if json {
                    entries.push(serde_json::json!({ "url": url, "error": e.to_string() }));
                } else {
                    eprintln!("{} {}: {}", "✗".red().bold(), url, e);
                }
            }
        }
    }

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::Value::Array(entries))?
        );
    }

    if failures == urls.len() {
        return Err(anyhow!("No URL could be resolved"));
    }

    Ok(())
}

pub fn handle_cache_stats(args: &ArgMatches) -> Result<()> {
    let store_path = store_path_from_arg(args.get_one::<String>("store").unwrap());

    if !IconStore::exists(&store_path) {
        return Err(anyhow!(
            "No icon store found at {} (run `favscout init` first)",
            store_path.display()
        ));
    }

    let store = IconStore::open(&store_path).with_context(|| {
        format!("Failed to open icon store at {}", store_path.display())
    })?;
    let stats = store.stats()?;

    let format_time = |time: Option<chrono::DateTime<chrono::Utc>>| {
        time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    print_divider();
    println!("{}", "  ICON STORE STATS".bright_white().bold());
    print_divider();
    println!();
    println!(
        "{} Store: {}",
        "→".blue(),
        store_path.display().to_string().bright_white()
    );
    println!(
        "{} Entries: {} / {}",
        "→".blue(),
        stats.entries.to_string().cyan(),
        stats.capacity.to_string().cyan()
    );
    println!(
        "{} Oldest entry: {}",
        "→".blue(),
        format_time(stats.oldest_inserted_at).bright_white()
    );
    println!(
        "{} Newest entry: {}",
        "→".blue(),
        format_time(stats.newest_inserted_at).bright_white()
    );
    println!();

    Ok(())
}

pub fn handle_cache_clear(args: &ArgMatches) -> Result<()> {
    let store_path = store_path_from_arg(args.get_one::<String>("store").unwrap());
    let force = args.get_flag("force");

    if !IconStore::exists(&store_path) {
        println!(
            "{} No icon store at {}, nothing to clear.",
            "→".blue(),
            store_path.display().to_string().bright_white()
        );
        return Ok(());
    }

    if !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("This will delete the icon store at:");
        println!(
            "  {} {}",
            "•".yellow(),
            store_path.display().to_string().bright_white()
        );
        println!();

        let response = print_prompt("Do you want to continue? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Clear cancelled.", "✗".red().bold());
            return Ok(());
        }
    }

    IconStore::remove_file(&store_path).context("Failed to remove icon store")?;

    // SQLite WAL sidecars, present when the store was opened recently.
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = store_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = PathBuf::from(sidecar);
        if sidecar.exists() {
            fs::remove_file(&sidecar)
                .with_context(|| format!("Failed to remove {}", sidecar.display()))?;
        }
    }

    println!("{} Icon store removed.", "✓".green().bold());
    Ok(())
}
