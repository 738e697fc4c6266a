use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::help_text;
use crate::domain::services::SessionIdentity;
use crate::infrastructure::stores::StoreManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn session_identity() -> SessionIdentity {
    return SessionIdentity::new(StoreManager::get(&Config::get(ConfigKey::StorageFile)));
}

async fn handle_session(matches: &ArgMatches, session_matches: &ArgMatches) -> Result<()> {
    Config::load(vec![matches, session_matches]).await?;

    match session_matches.subcommand() {
        Some(("show", _)) => {
            let session_id = session_identity().get_or_create().await?;
            println!("{session_id}");
        }
        Some(("reset", _)) => {
            session_identity().reset().await?;
            println!("Removed the session id. A new one is created when the next chat starts.");
        }
        Some(("path", _)) => {
            println!("{}", Config::get(ConfigKey::StorageFile));
        }
        _ => {
            subcommand_session().print_long_help()?;
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Parley")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Parley with environment variable RUST_LOG=parley")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_session() -> Command {
    return Command::new("session")
        .about("Manage the session id sent with every message.")
        .arg_required_else_help(true)
        .subcommand(Command::new("show").about("Print the current session id, creating one if needed."))
        .subcommand(Command::new("reset").about("Remove the stored session id. The next chat starts a new conversation with a fresh id."))
        .subcommand(Command::new("path").about("Print the path of the file the session id is stored in."));
}

fn arg_backend_url() -> Arg {
    return Arg::new(ConfigKey::BackendURL.to_string())
        .short('u')
        .long(ConfigKey::BackendURL.to_string())
        .env("PARLEY_BACKEND_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the agent backend. Messages are posted to {{backend-url}}/api/messages/. [default: {}]",
            Config::default(ConfigKey::BackendURL)
        ));
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("PARLEY_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for the backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
        );
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .long(ConfigKey::Username.to_string())
        .env("PARLEY_USERNAME")
        .num_args(1)
        .help("Your user name displayed in all chat bubbles. Defaults to $USER.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start chatting. This is the default when no subcommand is given.")
        .arg(arg_backend_url())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_username());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("parley")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_session())
        .arg(arg_backend_url())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_username())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PARLEY_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::StorageFile.to_string())
                .long(ConfigKey::StorageFile.to_string())
                .env("PARLEY_STORAGE_FILE")
                .num_args(1)
                .help(format!("Path to the file the session id is kept in. Set to an empty string to keep it in memory only. [default: {}]", Config::default(ConfigKey::StorageFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SessionID.to_string())
                .long(ConfigKey::SessionID.to_string())
                .env("PARLEY_SESSION_ID")
                .num_args(1)
                .help("Use this session id instead of the stored one. The stored id is left untouched.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(std::env::temp_dir)
                        .join("parley/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("session", subcmd_matches)) => {
            handle_session(&matches, subcmd_matches).await?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
