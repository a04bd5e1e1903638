#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Shell;
use tokio::fs;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AssistantName;
use crate::domain::models::AssistantPrompt;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutorName;
use crate::domain::models::Languages;
use crate::domain::models::Runtime;
use crate::domain::services::AssistantRequester;
use crate::domain::services::ExecutionRequester;
use crate::infrastructure::clients::ClientManager;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// What the binary should do once a subcommand has been handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    StartUi,
    Exit(i32),
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("RUNPAD_CONFIG_FILE")
        .num_args(1)
        .global(true)
        .help(format!(
            "Path to the config file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ));
}

fn arg_execution_url() -> Arg {
    return Arg::new(ConfigKey::ExecutionUrl.to_string())
        .long(ConfigKey::ExecutionUrl.to_string())
        .env("RUNPAD_EXECUTION_URL")
        .num_args(1)
        .global(true)
        .help(format!(
            "Base URL of the Piston code execution API [default: {}]",
            Config::default(ConfigKey::ExecutionUrl)
        ));
}

fn arg_gemini_api_key() -> Arg {
    return Arg::new(ConfigKey::GeminiApiKey.to_string())
        .long(ConfigKey::GeminiApiKey.to_string())
        .env("GEMINI_API_KEY")
        .hide_env_values(true)
        .num_args(1)
        .global(true)
        .help("API key for Google Gemini");
}

fn arg_gemini_model() -> Arg {
    return Arg::new(ConfigKey::GeminiModel.to_string())
        .long(ConfigKey::GeminiModel.to_string())
        .env("RUNPAD_GEMINI_MODEL")
        .num_args(1)
        .global(true)
        .help(format!(
            "Gemini model used by the assistant [default: {}]",
            Config::default(ConfigKey::GeminiModel)
        ));
}

fn arg_gemini_url() -> Arg {
    return Arg::new(ConfigKey::GeminiUrl.to_string())
        .long(ConfigKey::GeminiUrl.to_string())
        .env("RUNPAD_GEMINI_URL")
        .num_args(1)
        .global(true)
        .help(format!(
            "Base URL of the Gemini API [default: {}]",
            Config::default(ConfigKey::GeminiUrl)
        ));
}

fn arg_language() -> Arg {
    return Arg::new(ConfigKey::Language.to_string())
        .short('l')
        .long(ConfigKey::Language.to_string())
        .env("RUNPAD_LANGUAGE")
        .num_args(1)
        .global(true)
        .value_parser(PossibleValuesParser::new(Languages::api_ids()))
        .help(format!(
            "Language selected at startup [default: {}]",
            Config::default(ConfigKey::Language)
        ));
}

fn arg_log_level() -> Arg {
    return Arg::new(ConfigKey::LogLevel.to_string())
        .long(ConfigKey::LogLevel.to_string())
        .env("RUNPAD_LOG_LEVEL")
        .num_args(1)
        .global(true)
        .value_parser(PossibleValuesParser::new(LOG_LEVELS))
        .help(format!(
            "Log level written to the log file [default: {}]",
            Config::default(ConfigKey::LogLevel)
        ));
}

fn subcommand_run() -> Command {
    return Command::new("run")
        .about("Run a source file once on the execution service and print its output.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .num_args(1)
                .help("Source file to run, defaults to the language boilerplate"),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .num_args(1)
                .help("File whose contents are passed as standard input"),
        );
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Send a single prompt to the assistant and print the reply.")
        .arg(
            Arg::new("prompt")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Prompt text"),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand_required(true)
        .subcommand(Command::new("default").about("Print a commented default config file."))
        .subcommand(Command::new("path").about("Print the config file path in use."));
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .required(true)
                .value_parser(value_parser!(Shell)),
        );
}

pub fn build() -> Command {
    let about = "Edit code in the terminal, run it on a remote execution service, and ask an assistant about it.";

    return Command::new("runpad")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(subcommand_run())
        .subcommand(subcommand_ask())
        .subcommand(Command::new("languages").about("List the supported languages."))
        .subcommand(
            Command::new("runtimes").about("List the runtimes offered by the execution service."),
        )
        .subcommand(subcommand_config())
        .subcommand(subcommand_completions())
        .arg(arg_config_file())
        .arg(arg_execution_url())
        .arg(arg_gemini_api_key())
        .arg(arg_gemini_model())
        .arg(arg_gemini_url())
        .arg(arg_language())
        .arg(arg_log_level());
}

/// The root matches followed by every nested subcommand's matches, in order.
pub fn matches_chain(matches: &ArgMatches) -> Vec<&ArgMatches> {
    let mut chain = vec![matches];
    let mut current = matches;
    while let Some((_, sub_matches)) = current.subcommand() {
        chain.push(sub_matches);
        current = sub_matches;
    }

    return chain;
}

/// Parses the process arguments and loads configuration from them.
pub async fn parse() -> Result<ArgMatches> {
    let matches = build().get_matches();
    Config::load(build(), matches_chain(&matches)).await?;
    return Ok(matches);
}

pub fn format_languages() -> String {
    let mut lines = vec![format!(
        "{:<12} {:<12} {:<10} {}",
        "ID", "NAME", "VERSION", "FILE"
    )];
    for language in Languages::all() {
        lines.push(format!(
            "{:<12} {:<12} {:<10} {}",
            language.api_id,
            language.display_name,
            language.runtime_version,
            language.output_filename
        ));
    }

    return lines.join("\n");
}

pub fn format_runtimes(runtimes: &[Runtime]) -> String {
    return runtimes
        .iter()
        .map(|runtime| {
            if runtime.aliases.is_empty() {
                return format!("{} {}", runtime.language, runtime.version);
            }
            return format!(
                "{} {} ({})",
                runtime.language,
                runtime.version,
                runtime.aliases.join(", ")
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

async fn run_once(matches: &ArgMatches) -> Result<Outcome> {
    let language = Languages::find_by_api_id(&Config::get(ConfigKey::Language))?;

    let source = match matches.get_one::<String>("file") {
        Some(path) => fs::read_to_string(path).await?,
        None => language.boilerplate.to_string(),
    };
    let stdin = match matches.get_one::<String>("stdin") {
        Some(path) => fs::read_to_string(path).await?,
        None => "".to_string(),
    };

    let requester = ExecutionRequester::new(ClientManager::get_executor(ExecutorName::default()));
    let response = requester
        .execute(&ExecutionRequest::new(language, &source, &stdin))
        .await;

    if response.message.is_error() {
        eprintln!("{}", Paint::red(&response.message.text));
        return Ok(Outcome::Exit(1));
    }

    print!("{}", response.message.text);
    if let Some(code) = response.exit_code {
        if code != 0 {
            eprintln!("{}", Paint::yellow(format!("Exited with code {code}")));
            return Ok(Outcome::Exit(1));
        }
    }

    return Ok(Outcome::Exit(0));
}

async fn ask_once(matches: &ArgMatches) -> Result<Outcome> {
    let prompt = matches
        .get_many::<String>("prompt")
        .map(|parts| return parts.cloned().collect::<Vec<String>>().join(" "))
        .unwrap_or_default();

    let requester =
        AssistantRequester::new(ClientManager::get_assistant(AssistantName::default()));
    let response = requester.ask(&AssistantPrompt::new(&prompt)).await;

    if response.message.is_error() {
        eprintln!("{}", Paint::red(&response.message.text));
        return Ok(Outcome::Exit(1));
    }

    println!("{}", response.message.text);
    return Ok(Outcome::Exit(0));
}

async fn list_runtimes() -> Result<Outcome> {
    let requester = ExecutionRequester::new(ClientManager::get_executor(ExecutorName::default()));
    match requester.list_runtimes().await {
        Ok(runtimes) => {
            println!("{}", format_runtimes(&runtimes));
            return Ok(Outcome::Exit(0));
        }
        Err(err) => {
            eprintln!("{}", Paint::red(format!("Error: {err}")));
            return Ok(Outcome::Exit(1));
        }
    }
}

/// Handles headless subcommands. Returns `Outcome::StartUi` when no subcommand
/// was given and the terminal interface should start.
pub async fn dispatch(matches: &ArgMatches) -> Result<Outcome> {
    match matches.subcommand() {
        Some(("run", run_matches)) => {
            return run_once(run_matches).await;
        }
        Some(("ask", ask_matches)) => {
            return ask_once(ask_matches).await;
        }
        Some(("languages", _)) => {
            println!("{}", format_languages());
            return Ok(Outcome::Exit(0));
        }
        Some(("runtimes", _)) => {
            return list_runtimes().await;
        }
        Some(("config", config_matches)) => match config_matches.subcommand() {
            Some(("path", _)) => {
                println!("{}", Config::get(ConfigKey::ConfigFile));
                return Ok(Outcome::Exit(0));
            }
            _ => {
                println!("{}", Config::serialize_default(build()));
                return Ok(Outcome::Exit(0));
            }
        },
        Some(("completions", completions_matches)) => {
            if let Some(shell) = completions_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                let name = app.get_name().to_string();
                generate(shell, &mut app, name, &mut io::stdout());
            }
            return Ok(Outcome::Exit(0));
        }
        _ => {
            return Ok(Outcome::StartUi);
        }
    }
}
