use colored::Colorize;
use commands::command_argument_builder;
use favscout::handlers;

mod commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    let outcome = match chosen_command.subcommand() {
        Some(("init", primary_command)) => handlers::handle_init(primary_command),
        Some(("resolve", primary_command)) => {
            handlers::handle_resolve(primary_command, quiet).await
        }
        Some(("cache", primary_command)) => match primary_command.subcommand() {
            Some(("stats", secondary_command)) => handlers::handle_cache_stats(secondary_command),
            Some(("clear", secondary_command)) => handlers::handle_cache_clear(secondary_command),
            _ => unreachable!("clap should ensure we don't get here"),
        },
        None => {
            command_argument_builder().print_help().ok();
            return;
        }
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
