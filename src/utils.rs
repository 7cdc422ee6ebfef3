use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::constants::DEFAULT_GOLD_API_URL;

/// Get the live price endpoint from environment variable or use default
pub fn get_gold_api_url() -> String {
    std::env::var("GOLD_API_URL").unwrap_or_else(|_| DEFAULT_GOLD_API_URL.to_string())
}

/// Get the market-feed access token, if configured
pub fn get_gold_api_key() -> Option<String> {
    std::env::var("GOLD_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Get the lead webhook URL; when unset, leads are handled by the
/// built-in reference backend instead of being forwarded
pub fn get_lead_webhook_url() -> Option<String> {
    std::env::var("LEAD_WEBHOOK_URL").ok().filter(|u| !u.is_empty())
}

/// Get the shared secret sent with forwarded leads
pub fn get_lead_webhook_secret() -> Option<String> {
    std::env::var("LEAD_WEBHOOK_SECRET").ok().filter(|s| !s.is_empty())
}

/// Get the lead-relay origin allow-list (comma-separated). Empty list
/// means any origin is accepted.
pub fn get_allowed_origins() -> Vec<String> {
    std::env::var("ALLOWED_ORIGINS")
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Get the lead log path from environment variable or use default
pub fn get_lead_log_path() -> PathBuf {
    std::env::var("LEAD_LOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("leads.csv"))
}

/// Get the operator address for lead email notifications
pub fn get_notification_email() -> String {
    std::env::var("NOTIFICATION_EMAIL")
        .unwrap_or_else(|_| "achatormontreal@gmail.com".to_string())
}

/// Get the operator number for lead SMS notifications
pub fn get_notification_sms_number() -> String {
    std::env::var("NOTIFICATION_SMS_NUMBER").unwrap_or_else(|_| "5149656130".to_string())
}

/// Get the quote cache file path used by CLI invocations
pub fn get_cache_path() -> PathBuf {
    std::env::var("GOLD_CACHE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("gold_price_cache.json"))
}

/// Format an instant as the short 24-hour clock string shown next to the
/// price ("Actualisé le HH:MM")
pub fn format_clock_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}
