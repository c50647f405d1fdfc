use anyhow::Result;
use calgrid_core::config::{CalGridConfig, SourceKind};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{open_session, parse_day};
use crate::render::Render;

const ACTIONS: [&str; 5] = [
    "← Previous month",
    "Next month →",
    "Today",
    "Select day",
    "Quit",
];

/// Interactive month browser.
pub async fn run(config: &CalGridConfig) -> Result<()> {
    if config.source == SourceKind::Stdin {
        anyhow::bail!("browse reads answers from the terminal and cannot use the stdin source");
    }

    let (mut session, _source) = open_session(config).await?;
    let mut action = 1;

    loop {
        if let Some(grid) = session.grid() {
            println!("{}", grid?.render());
        }
        println!();

        action = Select::new()
            .with_prompt("Navigate")
            .items(&ACTIONS)
            .default(action)
            .interact()?;

        match action {
            0 => session.navigate_month(-1),
            1 => session.navigate_month(1),
            2 => session.go_to_today(),
            3 => {
                let answer: String = Input::new()
                    .with_prompt("Day (number or YYYY-MM-DD)")
                    .interact_text()?;

                match parse_day(&answer, &session) {
                    Ok(key) => {
                        session.show_month_of(key);
                        let detail = session.select_day(key);
                        println!();
                        println!("{}", detail.render());
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                }
            }
            _ => break,
        }

        println!();
    }

    Ok(())
}
