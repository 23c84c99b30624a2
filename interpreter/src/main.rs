// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod logger;

use std::{path::{Path, PathBuf}, process::exit};

use anyhow::Context;
use basalt::{resolve_references, ConfigRoot, DeclarationScanner, Lexer};
use basalt_interpreter::{load_config, load_source, ConsoleOutput, ErrorPrinter, Interpreter, RuntimeError, StdSystem};
use clap::Subcommand;
use colored::Colorize;
use log::LevelFilter;
use logger::Logger;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration to use instead of the `basalt.toml` next to the program.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a program, starting at its `MAIN` procedure.
    Run {
        file: PathBuf,
    },

    /// Prints the tokens of every line once declarations are resolved.
    Tokens {
        file: PathBuf,
    },

    /// Parses and loads a program without running it.
    Check {
        file: PathBuf,
    },
}

impl Commands {
    fn file(&self) -> &Path {
        match self {
            Self::Run { file } | Self::Tokens { file } | Self::Check { file } => file,
        }
    }
}

fn main() {
    let args = Args::parse_args();

    if let Err(e) = start(&args) {
        eprintln!("{}: {e:#}", "error".red().bold());
        exit(1);
    }
}

fn start(args: &Args) -> anyhow::Result<()> {
    let file = args.command.file();
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;

    let config = load_config(file, args.config.as_deref())?;

    let level = if args.verbose || config.log.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    Logger::initialize(level);

    match &args.command {
        Commands::Run { file } => run(file, &source, &config),
        Commands::Tokens { .. } => tokens(&source),
        Commands::Check { file } => check(file, &source, &config),
    }
}

fn run(file: &Path, source: &str, config: &ConfigRoot) -> anyhow::Result<()> {
    let system = match file.parent() {
        Some(directory) => StdSystem::with_base_directory(directory),
        None => StdSystem::new(),
    };

    let mut environment = match load_source(source, config, Box::new(system), Box::new(ConsoleOutput)) {
        Ok(environment) => environment,
        Err(e) => report(file, source, &e, 1),
    };

    let result = Interpreter::new().run(&mut environment);
    environment.unload_unit();

    if let Err(e) = result {
        report(file, source, &e, 2);
    }

    Ok(())
}

fn tokens(source: &str) -> anyhow::Result<()> {
    let mut lines = Lexer::tokenize_source(source);
    let references = DeclarationScanner::new().scan(&mut lines)?;
    resolve_references(&mut lines, &references);

    for line in &lines {
        let tokens: Vec<String> = line.tokens()
            .iter()
            .filter(|token| !token.kind.is_separator())
            .map(|token| format!("{}:{}", token.kind.name(), token.text))
            .collect();

        println!("{:>4} {} {}", line.number(), "|".blue().bold(), tokens.join("  "));
    }

    Ok(())
}

fn check(file: &Path, source: &str, config: &ConfigRoot) -> anyhow::Result<()> {
    let environment = match load_source(source, config, Box::new(StdSystem::new()), Box::new(ConsoleOutput)) {
        Ok(environment) => environment,
        Err(e) => report(file, source, &e, 1),
    };

    let entry_point = match environment.main_procedure() {
        Some(..) => "MAIN".green().bold(),
        None => "missing".red().bold(),
    };

    println!(
        "{}: {} procedure(s), {} function(s), {} global(s), entry point {entry_point}",
        file.display(),
        environment.procedures().count(),
        environment.functions().count(),
        environment.globals().len(),
    );

    Ok(())
}

fn report(file: &Path, source: &str, error: &RuntimeError, code: i32) -> ! {
    ErrorPrinter::for_error(source, file, error).print();
    exit(code);
}
