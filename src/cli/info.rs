use super::config::DaoboardConfig;
use super::display::{format_stat, format_status};
use daoboard::api::DaoApi;
use daoboard::stats::DaoOverview;

/// Show the DAO's headline figures and the latest point of each series
pub async fn execute(config: &DaoboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = config.client()?;
    print!("{}", render(&client).await?);
    Ok(())
}

pub async fn render<A: DaoApi>(api: &A) -> Result<String, Box<dyn std::error::Error>> {
    let overview = DaoOverview::fetch(api).await?;

    let mut out = format!("📊 {}\n\n", overview.state.dao_id);
    for block in overview.blocks() {
        out.push_str(&format!("  {:<18} {}\n", block.title, format_status(&block.status)));
        match overview.latest(block.series) {
            Some(stat) => out.push_str(&format!("  {:<18} latest {}\n", "", format_stat(&stat))),
            None => out.push_str(&format!("  {:<18} no history\n", "")),
        }
    }
    Ok(out)
}
