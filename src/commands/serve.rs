use std::sync::Arc;
use std::time::Duration;

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::server::{self, LeadRelay};
use crate::services::{GoldApiClient, LeadNotifier, MemoryStore, PriceProvider, SystemClock};
use crate::utils;

pub async fn run(port: u16) {
    println!("🚀 Starting goldcalc server on port {}", port);

    let source = match GoldApiClient::new(utils::get_gold_api_url(), utils::get_gold_api_key()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if utils::get_gold_api_key().is_none() {
        eprintln!("⚠️  GOLD_API_KEY is not set; live fetches will likely fail and the calculator will run on fallback quotes");
    }

    let provider = Arc::new(PriceProvider::new(
        Arc::new(source),
        Arc::new(MemoryStore::new()),
        Arc::new(SystemClock),
    ));

    let webhook_url = utils::get_lead_webhook_url();
    match &webhook_url {
        Some(url) => println!("📮 Leads forwarded to {}", url),
        None => println!(
            "📋 No LEAD_WEBHOOK_URL set; leads handled locally, log at {}",
            utils::get_lead_log_path().display()
        ),
    }

    let allowed_origins = utils::get_allowed_origins();
    if allowed_origins.is_empty() {
        println!("🌐 Origin allow-list empty: accepting any origin");
    } else {
        println!("🌐 Allowed origins: {}", allowed_origins.join(", "));
    }

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let relay = Arc::new(LeadRelay {
        webhook_url,
        webhook_secret: utils::get_lead_webhook_secret(),
        allowed_origins,
        notifier: LeadNotifier::new(
            utils::get_lead_log_path(),
            utils::get_notification_email(),
            utils::get_notification_sms_number(),
        ),
        client,
    });

    if let Err(e) = server::serve(provider, relay, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
