use super::render::print_trending;
use crate::state::SharedState;

pub async fn cmd_trending(state: &SharedState) -> anyhow::Result<()> {
    let entries = state.discovery.trending().await;

    if entries.is_empty() {
        println!("No trending searches yet.");
        if !state.config.analytics.enabled {
            println!("Search analytics is disabled; set APPWRITE_DATABASE_ID and APPWRITE_COLLECTION_ID to enable it.");
        }
        return Ok(());
    }

    println!("Trending Movies");
    println!("{:-<70}", "");
    print_trending(&entries);

    Ok(())
}
