//! Command line front end for the chessboard scene model.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::{File, read_to_string};
use std::io::Read;
use std::path::PathBuf;
use clap::{App, Arg, SubCommand, AppSettings, ArgMatches, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config};
use chessboard3d::board::Board;
use chessboard3d::config::{SceneConfig, ConfigError};
use chessboard3d::layout::Layout;
use chessboard3d::script::{self, ScriptError};

fn main() -> Result<(), Error> {
    let matches =
        App::new("chessboard3d")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Lays out a 3D chessboard scene and the pieces standing on it.")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("chessboard3d.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("FILE")
                .takes_value(true)
                .help("Scene configuration file (defaults to ~/.chessboard3d/config.yaml)"))
            .subcommand(SubCommand::with_name("positions")
                .about("Prints the scene position of every square"))
            .subcommand(SubCommand::with_name("layout")
                .about("Prints the scene layout as YAML, with the pieces in their starting position")
                .arg(Arg::with_name("empty")
                    .long("empty")
                    .help("Leaves the board empty")))
            .subcommand(SubCommand::with_name("script")
                .about("Runs a placement script and prints what it reports")
                .arg(Arg::with_name("file")
                    .value_name("FILE")
                    .takes_value(true)
                    .help("Script to run (reads standard input if omitted)")))
            .subcommand(SubCommand::with_name("config")
                .about("Prints the default scene configuration as YAML"))
            .get_matches();

    init_logging(&matches)?;

    match matches.subcommand() {
        ("positions", Some(_matches)) => {
            let board = new_board(&load_config(&matches)?)?;
            for (square, position) in board.squares() {
                println!("{}\t{}", square, position);
            }
        },
        ("layout", Some(sub_matches)) => {
            let config = load_config(&matches)?;
            let mut board = new_board(&config)?;
            if !sub_matches.is_present("empty") {
                board.setup()?;
            }
            print!("{}", Layout::of(&board, &config).to_yaml()?);
        },
        ("script", Some(sub_matches)) => {
            let text = match sub_matches.value_of_os("file") {
                Some(file) => {
                    let path = PathBuf::from(file);
                    read_to_string(&path).map_err(|err| {
                        Error(format!("{}: {}", path.display(), err))
                    })?
                },
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text
                },
            };

            let mut board = new_board(&load_config(&matches)?)?;
            for report in script::run(&mut board, &text)? {
                println!("{}", report);
            }
        },
        ("config", Some(_matches)) => {
            print!("{}", SceneConfig::default().to_yaml()?);
        },
        _ => unreachable!(),
    }

    Ok(())
}

fn init_logging(matches: &ArgMatches) -> Result<(), Error> {
    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    Ok(())
}

/// Uses `--config` if given, then the per-user file if it exists, then the defaults.
fn load_config(matches: &ArgMatches) -> Result<SceneConfig, Error> {
    let path = match matches.value_of_os("config") {
        Some(path) => PathBuf::from(path),
        None => match SceneConfig::default_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(SceneConfig::default()),
        },
    };

    info!("using scene config {}", path.display());
    SceneConfig::load(&path).map_err(|err| Error(format!("{}: {}", path.display(), err)))
}

fn new_board(config: &SceneConfig) -> Result<Board, Error> {
    Ok(Board::with_geometry(config.geometry)?)
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error(err.to_string())
    }
}

impl From<ScriptError> for Error {
    fn from(err: ScriptError) -> Self {
        Error(err.to_string())
    }
}

impl From<chessboard3d::chess::Error> for Error {
    fn from(err: chessboard3d::chess::Error) -> Self {
        Error(err.to_string())
    }
}
