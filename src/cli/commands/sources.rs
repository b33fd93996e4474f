//! `issue-import sources` command - list available import sources

use console::style;
use miette::Result;

use crate::importers::SourceKind;

pub fn run() -> Result<()> {
    println!("Available import sources:");
    for source in SourceKind::ALL {
        println!("  {:<14}{}", style(source.key()).cyan(), source.label());
    }
    Ok(())
}
