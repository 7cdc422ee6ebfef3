use crate::commands::build_cli_provider;
use crate::models::{WeightSheet, KARATS};
use crate::services::pricing::estimate;

/// Turn `KARAT=GRAMS` arguments into a weight sheet. The grams side stays
/// free text (the engine parses defensively); an unknown karat value
/// would silently price at nothing, so it is rejected up front.
fn parse_entries(entries: &[String]) -> Result<WeightSheet, String> {
    let mut sheet = WeightSheet::new();
    for entry in entries {
        let (karat_str, grams) = entry
            .split_once('=')
            .ok_or_else(|| format!("Invalid entry '{}', expected KARAT=GRAMS", entry))?;
        let karat: u32 = karat_str
            .trim()
            .trim_end_matches(['k', 'K'])
            .parse()
            .map_err(|_| format!("Invalid karat in '{}'", entry))?;
        if !KARATS.iter().any(|k| k.value == karat) {
            let known: Vec<&str> = KARATS.iter().map(|k| k.label).collect();
            return Err(format!(
                "Unknown grade '{}k'. Known grades: {}",
                karat,
                known.join(", ")
            ));
        }
        sheet.insert(karat, grams.trim().to_string());
    }
    Ok(sheet)
}

pub async fn run(luxury: Vec<String>, standard: Vec<String>, refresh: bool) {
    let (luxury_sheet, standard_sheet) = match (parse_entries(&luxury), parse_entries(&standard)) {
        (Ok(l), Ok(s)) => (l, s),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let provider = match build_cli_provider() {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let data = provider.fetch_price(refresh).await;
    let result = estimate(data.spot_price_cad, &luxury_sheet, &standard_sheet);

    println!(
        "💰 Spot: ${:.2} CAD/oz ({}){}",
        data.spot_price_cad,
        data.last_updated,
        if data.is_fallback() { "  ⚠️ estimation" } else { "" }
    );
    println!();
    for row in &result.breakdown {
        println!(
            "   {:>2}k {:<8} {:>8.2} g × {:>7.2} $/g = {:>10.2} $",
            row.karat,
            row.tier.as_str(),
            row.grams,
            row.rate_per_gram,
            row.line_total,
        );
    }
    println!();
    println!("   Estimation Totale: ${:.2} CAD", result.grand_total);
    println!("   Poids Cumulé:      {:.2} g", result.total_weight);
}
