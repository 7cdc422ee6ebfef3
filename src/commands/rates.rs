use crate::commands::build_cli_provider;
use crate::models::{Tier, KARATS};
use crate::services::pricing::payout_rate;

pub async fn run(refresh: bool) {
    let provider = match build_cli_provider() {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let data = provider.fetch_price(refresh).await;

    println!(
        "💰 Spot: ${:.2} CAD/oz ({}){}",
        data.spot_price_cad,
        data.last_updated,
        if data.is_fallback() { "  ⚠️ estimation" } else { "" }
    );
    println!();
    println!("   Grade   Pureté   Luxe ($/g)   Standard ($/g)");
    println!("   -----   ------   ----------   --------------");
    for karat in &KARATS {
        println!(
            "   {:<5}   {:>5.1}%   {:>10.2}   {:>14.2}",
            karat.label,
            karat.purity * 100.0,
            payout_rate(data.spot_price_cad, karat.value, Tier::Luxury),
            payout_rate(data.spot_price_cad, karat.value, Tier::Standard),
        );
    }
}
