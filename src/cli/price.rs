//! Price command implementation

use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Ticker id as known to the feed (e.g. "bitcoin")
    pub ticker: String,
}

impl PriceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let router = super::build_router(config)?;

        let info = router.ticker(&self.ticker).await?;
        println!("{}", serde_json::to_string_pretty(&info)?);

        Ok(())
    }
}
