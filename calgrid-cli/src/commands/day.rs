use anyhow::Result;
use calgrid_core::DateKey;
use calgrid_core::config::CalGridConfig;

use super::open_session;
use crate::render::Render;

pub async fn run(config: &CalGridConfig, key: DateKey, json: bool) -> Result<()> {
    let (mut session, _source) = open_session(config).await?;
    let detail = session.select_day(key);

    if json {
        let output = serde_json::json!({
            "summary": detail.summary(),
            "detail": detail,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", detail.render());
    }

    Ok(())
}
