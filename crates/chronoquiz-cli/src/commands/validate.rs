//! The `chronoquiz validate` command.

use anyhow::Result;

use chronoquiz_core::model::format_year;

use crate::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let (_, parsed) = super::load::load_events(&source).await?;

    print!("Loaded {} events", parsed.pool.len());
    match parsed.pool.year_span() {
        Some((min, max)) => println!(" spanning {} to {}", format_year(min), format_year(max)),
        None => println!(),
    }

    for w in &parsed.warnings {
        println!("  [row {}] WARNING: {}", w.index, w.message);
    }

    if parsed.warnings.is_empty() {
        println!("All rows valid.");
    } else {
        println!("\n{} warning(s) found.", parsed.warnings.len());
    }

    Ok(())
}
