use anyhow::Result;
use calgrid_core::{DateKey, DayDetail};
use calgrid_core::config::CalGridConfig;

use super::open_session;
use crate::render::Render;

pub async fn run(
    config: &CalGridConfig,
    month: Option<(i32, u32)>,
    select: Option<DateKey>,
    json: bool,
) -> Result<()> {
    let (mut session, _source) = open_session(config).await?;

    // An explicit month wins; otherwise show the month of the selected day
    if let Some(key) = select {
        session.show_month_of(key);
        session.select_day(key);
    }
    if let Some((year, month0)) = month {
        session.show_month_of(DateKey::from_ymd(year, month0 + 1, 1)?);
    }

    let grid = match session.grid() {
        Some(grid) => grid?,
        None => anyhow::bail!("Events are not loaded"),
    };

    if json {
        let output = serde_json::json!({
            "title": grid.title(),
            "grid": grid,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", grid.render());

    if let Some(key) = select {
        println!();
        let events = session.events().map(|m| m.events_for(&key)).unwrap_or(&[]);
        println!("{}", DayDetail::new(key, events).render());
    }

    Ok(())
}
