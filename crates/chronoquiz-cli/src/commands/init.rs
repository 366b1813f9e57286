//! The `chronoquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create chronoquiz.toml
    if std::path::Path::new("chronoquiz.toml").exists() {
        println!("chronoquiz.toml already exists, skipping.");
    } else {
        std::fs::write("chronoquiz.toml", SAMPLE_CONFIG)?;
        println!("Created chronoquiz.toml");
    }

    // Create sample event file
    let events_path = std::path::Path::new("events.json");
    if events_path.exists() {
        println!("events.json already exists, skipping.");
    } else {
        std::fs::write(events_path, SAMPLE_EVENTS)?;
        println!("Created events.json");
    }

    println!("\nNext steps:");
    println!("  1. Play offline right away: chronoquiz play");
    println!("  2. Publish your own sheet and put its URL in chronoquiz.toml");
    println!("  3. Run: chronoquiz validate --source sheet");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# chronoquiz configuration

default_source = "local"
max_attempts = 3
retry_delay_ms = 1000
default_length = 10

[sources.local]
type = "file"
path = "events.json"

[sources.sheet]
type = "http"
url = "https://script.google.com/macros/s/YOUR_APPS_SCRIPT_WEB_APP_URL_HERE/exec"
timeout_secs = 30
"#;

const SAMPLE_EVENTS: &str = r#"[
  ["Construction of the Great Pyramid of Giza completed", -2560, null, null, "Egypt, architecture"],
  ["Founding of Rome", -753, 4, 21, "Rome"],
  ["Battle of Marathon", -490, 9, null, "Greece, war"],
  ["Assassination of Julius Caesar", -44, 3, 15, "Rome, politics"],
  ["Sack of Rome by the Visigoths", 410, 8, 24, "Rome, war"],
  ["Battle of Hastings", 1066, 10, 14, "England, war"],
  ["Magna Carta sealed", 1215, 6, 15, "England, law"],
  ["Fall of Constantinople", 1453, 5, 29, "war"],
  ["Columbus reaches the Americas", 1492, 10, 12, "exploration"],
  ["Storming of the Bastille", 1789, 7, 14, "France, revolution"],
  ["First powered flight by the Wright brothers", 1903, 12, 17, "science, aviation"],
  ["Apollo 11 Moon landing", 1969, 7, 20, "science, space"],
  ["Fall of the Berlin Wall", 1989, 11, 9, "Germany, politics"],
  ["First iPhone released", 2007, 6, 29, "technology"]
]
"#;
