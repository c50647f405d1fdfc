use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use owo_colors::OwoColorize;

use super::open_session;
use crate::render::Render;

/// Redraw the month every time a new `loadEvents` message arrives.
pub async fn run(config: &CalGridConfig) -> Result<()> {
    let (mut session, source) = open_session(config).await?;

    let Some(channel) = source.as_channel() else {
        anyhow::bail!(
            "watch needs a source that pushes updates.\n\
            Pipe JSON lines in and use: calgrid --source stdin watch"
        );
    };

    draw(&session)?;

    while let Some(message) = channel.next_message().await {
        session.apply_message(&message);
        println!();
        draw(&session)?;
    }

    println!("{}", "Message stream closed".dimmed());
    Ok(())
}

fn draw(session: &calgrid_core::CalendarSession) -> Result<()> {
    if let Some(grid) = session.grid() {
        println!("{}", grid?.render());
    }
    Ok(())
}
