// demos/demo.rs
use payoff_diagram::math_utils::Timer;
use payoff_diagram::output;
use payoff_diagram::risk_free::risk_free_summary;
use payoff_diagram::strategies::PRESETS;
use payoff_diagram::{Session, Settings};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let key = args.get(1).map(String::as_str).unwrap_or("straddle");
    let auto_pricing = args.iter().any(|a| a == "--bs");

    println!("Running payoff-diagram demo\n");

    let mut session = Session::new(Settings::default());
    session.set_auto_pricing(auto_pricing);
    if let Err(e) = session.load_strategy(key) {
        eprintln!("{}", e);
        let keys: Vec<&str> = PRESETS.iter().map(|p| p.key).collect();
        eprintln!("Available strategies: {}", keys.join(", "));
        std::process::exit(1);
    }

    println!("Strategy: {}", key);
    println!(
        "Black-Scholes premiums: {}",
        if auto_pricing { "on" } else { "off" }
    );
    for position in session.positions() {
        println!(
            "  #{:<3} {:<22} strike {:>8.2}  cost {:>8.4}  x{}",
            position.id, position.kind, position.strike, position.cost, position.quantity
        );
    }

    let mut timer = Timer::new();
    timer.start();
    let valuation = session.valuation();
    let elapsed = timer.elapsed_ms();

    println!(
        "\nPrice range: [{:.2}, {:.2}]",
        valuation.range.min, valuation.range.max
    );
    println!("Kink points:");
    for kink in &valuation.kinks {
        println!("  S = {:>8.2}  P&L = {:>+9.2}", kink.x, kink.y);
    }
    println!("Break-even prices:");
    for price in &valuation.break_evens {
        println!("  S = {:>8.2}", price);
    }

    println!("\nP&L table:");
    let mut stdout = std::io::stdout();
    if let Err(e) = output::write_pnl_table(&mut stdout, &valuation.pnl_table) {
        eprintln!("Could not print table: {}", e);
    }

    let summary = risk_free_summary(session.positions(), session.settings());
    if !summary.is_empty() {
        println!("\nRisk-free legs:");
        if let Err(e) = output::write_risk_free_summary(&mut stdout, &summary) {
            eprintln!("Could not print summary: {}", e);
        }
    }

    let filename = format!("{}_payoff.csv", key);
    match output::write_series_csv(&filename, &valuation.curve) {
        Ok(()) => println!("\nCurve written to {}", filename),
        Err(e) => eprintln!("Could not write {}: {}", filename, e),
    }
    println!("Valuation time: {:.3} ms", elapsed);
}
