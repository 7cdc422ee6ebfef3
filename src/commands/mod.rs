pub mod estimate;
pub mod price;
pub mod rates;
pub mod serve;

use std::sync::Arc;

use crate::services::{FileStore, GoldApiClient, PriceProvider, SystemClock};
use crate::utils;

/// Build the provider the CLI commands share: live GoldAPI source, file
/// cache slot (so consecutive invocations reuse a fresh quote), system
/// clock.
pub fn build_cli_provider() -> Result<PriceProvider, crate::error::AppError> {
    let source = GoldApiClient::new(utils::get_gold_api_url(), utils::get_gold_api_key())?;
    Ok(PriceProvider::new(
        Arc::new(source),
        Arc::new(FileStore::new(utils::get_cache_path())),
        Arc::new(SystemClock),
    ))
}
