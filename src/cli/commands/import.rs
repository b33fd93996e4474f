//! `issue-import import` command - run an importer over an export file

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::importers::SourceKind;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Exported file to import (prompted for when omitted)
    pub file: Option<PathBuf>,

    /// Import source (prompted for when omitted)
    #[arg(long, short = 's', value_parser = parse_source)]
    pub source: Option<SourceKind>,

    /// Write the JSON result to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

fn parse_source(s: &str) -> Result<SourceKind, String> {
    s.parse()
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let source = match args.source {
        Some(source) => source,
        None => prompt_source()?,
    };

    let file_path = match args.file {
        Some(file) => file,
        None => prompt_file(source)?,
    };

    let importer = source.importer(&file_path);
    let result = importer.import()?;

    let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
    match &args.output {
        Some(path) => fs::write(path, json + "\n").into_diagnostic()?,
        None => println!("{}", json),
    }

    // Summary goes to stderr so redirected stdout stays clean JSON
    if !global.quiet {
        eprintln!(
            "{} Imported {} issues, {} users, {} labels from {}",
            style("✓").green(),
            result.issues.len(),
            result.users.len(),
            result.labels.len(),
            importer.name()
        );
        eprintln!(
            "{} Suggested team name: {}",
            style("→").blue(),
            importer.default_team_name()
        );
        if let Some(path) = &args.output {
            eprintln!("{} Result written to {}", style("→").blue(), path.display());
        }
    }

    Ok(())
}

fn prompt_source() -> Result<SourceKind> {
    let labels: Vec<&str> = SourceKind::ALL.iter().map(|s| s.label()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which service would you like to import from?")
        .items(&labels)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(SourceKind::ALL[selection])
}

fn prompt_file(source: SourceKind) -> Result<PathBuf> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Select your exported file of {} tasks", source.label()))
        .interact_text()
        .into_diagnostic()?;
    Ok(PathBuf::from(path))
}
