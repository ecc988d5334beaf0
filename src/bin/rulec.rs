// src/bin/rulec.rs
//! Command-line front end: compile one rule and render its tree

use clap::{Parser, ValueEnum};
use rule_compiler::{codegen, printer, Rule};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "rulec",
    version,
    about = "Compile a conditional rule and render its syntax tree."
)]
struct Args {
    /// Rule file to compile; reads standard input when omitted.
    file: Option<PathBuf>,

    /// Output rendering.
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Indented diagnostic tree
    Tree,
    /// AST as JSON
    Json,
    /// SQL predicate
    Sql,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let source = match read_source(args.file.as_deref()) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if source.trim().is_empty() {
        eprintln!("error: empty rule input");
        return ExitCode::FAILURE;
    }

    let rule = match Rule::parse(&source) {
        Ok(rule) => rule,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match args.format {
        Format::Tree => print!("{}", printer::render(&rule)),
        Format::Json => match serde_json::to_string_pretty(&rule) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
        },
        Format::Sql => println!("{}", codegen::sql::predicate(&rule)),
    }

    ExitCode::SUCCESS
}

fn read_source(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
