//! Slimedit CLI entry point.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use slimedit_runtime::{ReaderEditor, Repl, Session};
use slimedit_world::{World, WorldConfig};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    file: Option<PathBuf>,
    batch_mode: bool,
    info_only: bool,
    show_help: bool,
    show_version: bool,
    suffix: Option<String>,
    level: Option<i32>,
    strict: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "-i" | "--info" => config.info_only = true,
            "--strict" => config.strict = true,
            "--suffix" => {
                i += 1;
                config.suffix = Some(value_of(args, i, "--suffix")?);
            }
            "--level" => {
                i += 1;
                let value = value_of(args, i, "--level")?;
                config.level = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --level value: {value}"))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.file.is_some() {
                    return Err("only one world file can be edited at a time".into());
                }
                config.file = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn world_config(config: &CliConfig) -> WorldConfig {
    let mut world = WorldConfig::default().with_strict_sections(config.strict);
    if let Some(suffix) = &config.suffix {
        world = world.with_edited_suffix(suffix.clone());
    }
    if let Some(level) = config.level {
        world = world.with_compression_level(level);
    }
    world
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("slimedit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(file) = config.file.clone() else {
        return Err("no world file given (try --help)".into());
    };

    let mut world = World::with_config(file, world_config(&config));
    world.load()?;

    if config.info_only {
        println!("{}", world.data()?);
        return Ok(());
    }

    let session = Session::new(world);

    if config.batch_mode {
        let mut repl =
            Repl::with_editor(ReaderEditor::new(io::stdin().lock()), session).without_banner();
        repl.run()?;
        if repl.failures() > 0 {
            return Err(format!("{} command(s) failed", repl.failures()).into());
        }
        return Ok(());
    }

    Repl::new(session)?.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mslimedit\x1b[0m - Inspect and edit Slime Region Format worlds

\x1b[1mUSAGE:\x1b[0m
    slimedit [OPTIONS] FILE

\x1b[1mARGUMENTS:\x1b[0m
    FILE             The .slime world to open

\x1b[1mOPTIONS:\x1b[0m
    -h, --help       Print help information
    -V, --version    Print version information
    -i, --info       Print the world summary and exit
    -b, --batch      Read commands from stdin, no prompt
    --suffix S       Name edited copies <name>S.slime (default: _edited)
    --level N        zstd level for re-encoded sections (default: 3)
    --strict         Fail on damaged tile-entity or entity sections

\x1b[1mEXAMPLES:\x1b[0m
    slimedit lobby.slime                     Start the editor
    slimedit -i lobby.slime                  Show the summary
    printf 'rm tiles/0\\nsave\\n' | slimedit -b lobby.slime

Saving writes <name>_edited.slime next to the source; the source is never
modified. Set RUST_LOG=debug for section-level logging."
    );
}
