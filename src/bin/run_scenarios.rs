//! Run the demo scenarios through the recommendation engine
//!
//! Usage: cargo run --bin run_scenarios [healthy|moderate|critical]
//!
//! Expected:
//! - healthy: low
//! - moderate: medium
//! - critical: high

use agrisight::recommendation::{classify_balance, select_rule};
use agrisight::{classify_vegetation_health, derive_recommendation, DemoScenario};

fn main() -> anyhow::Result<()> {
    let scenarios = match std::env::args().nth(1) {
        Some(name) => vec![name.parse::<DemoScenario>().map_err(anyhow::Error::msg)?],
        None => DemoScenario::ALL.to_vec(),
    };

    println!("\n{}", "=".repeat(70));
    println!("DEMO SCENARIOS");
    println!("{}", "=".repeat(70));

    for scenario in scenarios {
        let snap = scenario.snapshot();
        let rec = derive_recommendation(snap.ndvi, snap.rainfall_deficit_mm, snap.balance);
        let rule = select_rule(&snap);

        println!("\n{} ({})", scenario.title(), scenario);
        println!("{}", "-".repeat(70));
        println!(
            "  Inputs:     NDVI {:.2} ({}), deficit {:+.1}mm, balance ${:.2} ({})",
            snap.ndvi,
            classify_vegetation_health(snap.ndvi).as_str(),
            snap.rainfall_deficit_mm,
            snap.balance,
            classify_balance(snap.balance).display_text(),
        );
        println!("  Rule:       {}", rule.id.as_str());
        println!(
            "  Severity:   {} [{}]",
            rec.severity,
            rec.severity.color().hex()
        );
        println!("  Confidence: {:.0}%", rec.confidence * 100.0);
        println!("  Action:     {}", rec.action);
        println!("  Reasoning:  {}", rec.reasoning);
    }

    println!("\n{}", "=".repeat(70));

    Ok(())
}
