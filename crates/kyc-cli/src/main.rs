use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use kyc_core::{AccentColor, OnboardingConfig, OnboardingSession};
use kyc_forms::PageId;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORAGE_DIR: &str = ".kyc-forms";

fn cli() -> Command {
    Command::new("kyc-forms")
        .version(kyc_core::VERSION)
        .about("Client onboarding forms: positions, suggestion history and page plan")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory of the durable lists (overrides the configuration)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("positions")
                .about("Manage the position dropdown")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("Built-in then custom positions"))
                .subcommand(
                    Command::new("add")
                        .about("Add a custom position")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a custom position")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Inspect or edit autocomplete history")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("Show the history of one field, or list fields")
                        .arg(Arg::new("field")),
                )
                .subcommand(
                    Command::new("commit")
                        .about("Record a value as if it was entered")
                        .arg(Arg::new("field").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(
                    Command::new("clear")
                        .about("Forget one field's history, or all of it")
                        .arg(Arg::new("field")),
                ),
        )
        .subcommand(
            Command::new("pages")
                .about("Show the document page plan")
                .arg(
                    Arg::new("duplicate")
                        .long("duplicate")
                        .action(ArgAction::Append)
                        .help("Duplicate a page by id (repeatable)"),
                )
                .arg(
                    Arg::new("remove")
                        .long("remove")
                        .action(ArgAction::Append)
                        .help("Remove a page by id (repeatable)"),
                )
                .arg(
                    Arg::new("persons")
                        .long("persons")
                        .default_value("0")
                        .value_parser(value_parser!(u32))
                        .help("Additional persons beneath the primary page"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration"))
        .subcommand(Command::new("palette").about("List accent colors"))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<OnboardingConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => OnboardingConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => OnboardingConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("storage") {
        config.storage_dir = Some(dir.clone());
    } else if config.storage_dir.is_none() {
        config.storage_dir = Some(PathBuf::from(DEFAULT_STORAGE_DIR));
    }
    Ok(config)
}

fn positions(session: &OnboardingSession, matches: &ArgMatches) -> Result<()> {
    let registry = session.positions();
    match matches.subcommand() {
        Some(("list", _)) => {
            let custom = registry.custom();
            for position in registry.all() {
                let marker = if custom.contains(&position) { " (custom)" } else { "" };
                println!("{position}{marker}");
            }
        }
        Some(("add", args)) => {
            let name = required(args, "name")?;
            let stored = session
                .add_position(name)
                .with_context(|| format!("adding position '{name}'"))?;
            println!("added {stored}");
        }
        Some(("remove", args)) => {
            let name = required(args, "name")?;
            if registry.remove(name) {
                println!("removed {name}");
            } else {
                println!("'{name}' is not a custom position");
            }
        }
        _ => {}
    }
    Ok(())
}

fn history(session: &OnboardingSession, matches: &ArgMatches) -> Result<()> {
    let store = session.suggestions();
    match matches.subcommand() {
        Some(("list", args)) => match args.get_one::<String>("field") {
            Some(field) => store.history(field).iter().for_each(|v| println!("{v}")),
            None => store.fields().iter().for_each(|f| println!("{f}")),
        },
        Some(("commit", args)) => {
            let field = required(args, "field")?;
            let value = required(args, "value")?;
            if store.commit(field, value) {
                println!("committed");
            } else {
                println!("unchanged");
            }
        }
        Some(("clear", args)) => match args.get_one::<String>("field") {
            Some(field) => store.clear(field),
            None => store.clear_all(),
        },
        _ => {}
    }
    Ok(())
}

fn pages(session: &mut OnboardingSession, matches: &ArgMatches) -> Result<()> {
    for id in matches.get_many::<String>("duplicate").unwrap_or_default() {
        session
            .duplicate_page(&PageId::from(id.as_str()))
            .with_context(|| format!("no page '{id}' to duplicate"))?;
    }
    for id in matches.get_many::<String>("remove").unwrap_or_default() {
        session
            .remove_page(&PageId::from(id.as_str()))
            .with_context(|| format!("removing page '{id}'"))?;
    }
    let persons = matches.get_one::<u32>("persons").copied().unwrap_or(0);
    for _ in 0..persons {
        session.add_person();
    }

    let rendered = session.rendered_pages();
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for page in &rendered {
            println!("{:>2}  {:<28} {}", page.index + 1, page.label, page.kind.title());
        }
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument '{name}'"))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    let config = load_config(&matches)?;
    tracing::debug!(storage = ?config.storage_dir, "configuration loaded");
    match matches.subcommand() {
        Some(("config", _)) => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        Some(("palette", _)) => {
            let current = config.accent_color;
            for color in AccentColor::palette() {
                let marker = if color == current { " *" } else { "" };
                println!("{}{marker}", color.hex());
            }
            return Ok(());
        }
        _ => {}
    }

    let mut session = OnboardingSession::open(config).context("opening session")?;
    match matches.subcommand() {
        Some(("positions", args)) => positions(&session, args),
        Some(("history", args)) => history(&session, args),
        Some(("pages", args)) => pages(&mut session, args),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn storage_flag_overrides_config() {
        let matches = cli()
            .try_get_matches_from(["kyc-forms", "--storage", "/tmp/x", "positions", "list"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn storage_defaults_to_local_dir() {
        let matches = cli().try_get_matches_from(["kyc-forms", "config"]).unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.storage_dir, Some(PathBuf::from(DEFAULT_STORAGE_DIR)));
    }
}
