//! History command implementation

use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Ticker id as known to the feed (e.g. "bitcoin")
    pub ticker: String,

    /// Maximum observations per page
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Continuation token from a previous page
    #[arg(short, long)]
    pub next_token: Option<String>,
}

impl HistoryArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let router = super::build_router(config)?;

        let page = router
            .price_history(&self.ticker, self.limit, self.next_token.as_deref())
            .await?;
        println!("{}", serde_json::to_string_pretty(&page)?);

        Ok(())
    }
}
