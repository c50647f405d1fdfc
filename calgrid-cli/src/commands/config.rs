use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalGridConfig) -> Result<()> {
    let config_path = CalGridConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    if let Some(events_file) = config.events_file_path() {
        println!("  Events:  {}", events_file.display());
    }

    println!();
    println!("{}", "Effective settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
