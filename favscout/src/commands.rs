use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("favscout")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("favscout")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress decorative output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Initializes the favscout icon store on your filesystem")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Location to store the favscout icon store")
                        .default_value("~/.config/favscout/"),
                )
                .arg(
                    arg!(-f - -"force")
                        .help(
                            "Forces the overwriting of any existing icon store at the specified \
                        location.",
                        )
                        .required(false),
                ),
        )
        .subcommand(
            command!("resolve")
                .about("Resolve the best available icon for one or more websites")
                .arg(
                    arg!([URL]... "The website URL(s) to resolve")
                        .required(false)
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-U --"urls-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of URLs to resolve")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"fallback-size" <SIZE>)
                        .required(false)
                        .help("Pixel size requested from the external fallback service")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("256"),
                )
                .arg(
                    arg!(-s --"store" <PATH>)
                        .required(false)
                        .help("Directory holding the icon store")
                        .default_value("~/.config/favscout/"),
                )
                .arg(
                    arg!(--"no-cache")
                        .required(false)
                        .help("Resolve without reading or writing the persistent store")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-j --"json")
                        .required(false)
                        .help("Emit results as a JSON array")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                ),
        )
        .subcommand(
            command!("cache")
                .about("Inspect and manage the icon store")
                .subcommand_required(true)
                .subcommand(
                    command!("stats")
                        .about("Show entry count, capacity and insertion times")
                        .arg(
                            arg!(-s --"store" <PATH>)
                                .required(false)
                                .help("Directory holding the icon store")
                                .default_value("~/.config/favscout/"),
                        ),
                )
                .subcommand(
                    command!("clear")
                        .about("Delete the icon store file")
                        .arg(
                            arg!(-s --"store" <PATH>)
                                .required(false)
                                .help("Directory holding the icon store")
                                .default_value("~/.config/favscout/"),
                        )
                        .arg(
                            arg!(-f - -"force")
                                .help("Skip the confirmation prompt")
                                .required(false),
                        ),
                ),
        )
}
