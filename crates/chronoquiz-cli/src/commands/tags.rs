//! The `chronoquiz tags` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::SourceArgs;

pub async fn execute(source: SourceArgs) -> Result<()> {
    let (_, parsed) = super::load::load_events(&source).await?;
    let counts = parsed.pool.tag_counts();

    if counts.is_empty() {
        println!("No tags found in {} events.", parsed.pool.len());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Tag", "Events"]);
    for (tag, count) in &counts {
        table.add_row(vec![Cell::new(tag), Cell::new(count)]);
    }

    println!("{table}");
    println!("{} tags across {} events.", counts.len(), parsed.pool.len());
    Ok(())
}
