use crate::commands::build_cli_provider;

pub async fn run(refresh: bool) {
    let provider = match build_cli_provider() {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let data = provider.fetch_price(refresh).await;

    if data.is_fallback() {
        println!("⚠️  MODE SÉCURITÉ — estimation, pas un cours en direct");
    } else {
        println!("🟢 MARCHÉ EN DIRECT");
    }
    println!("   Or (XAU/CAD): ${:.2} /oz", data.spot_price_cad);
    println!("   Actualisé:    {}", data.last_updated);
    println!("   Source:       {}", data.source);
}
