// demos/error_handling_demo.rs
use payoff_diagram::instruments::{InstrumentKind, PositionField, PositionId};
use payoff_diagram::settings::SettingsForm;
use payoff_diagram::{PayoffError, Session, Settings};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Error Handling Demo for payoff-diagram");
    println!("======================================\n");

    // Test 1: Invalid settings are rejected by validation
    println!("1. Validating a negative spot price...");
    let invalid_settings = Settings {
        spot_price: -100.0,
        ..Default::default()
    };
    match invalid_settings.validate() {
        Ok(()) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Boundary settings are valid and priced
    println!("\n2. Expired, zero-volatility settings...");
    let boundary = Settings {
        time_to_maturity: 0.0,
        volatility: 0.0,
        ..Default::default()
    };
    match boundary.validate() {
        Ok(()) => println!("   ✓ Accepted: intrinsic pricing applies"),
        Err(e) => println!("   Error: {}", e),
    }

    // Test 3: Unusable form input falls back to defaults
    println!("\n3. Settings form with blank and zero fields...");
    let form = SettingsForm {
        spot_price: Some(120.0),
        risk_free_rate_pct: Some(0.0),
        time_to_maturity: None,
        volatility_pct: Some(f64::NAN),
    };
    println!("   ✓ Resolved to {:?}", form.into_settings());

    // Test 4: Unknown instrument names
    println!("\n4. Parsing an unknown instrument...");
    match "long_swaption".parse::<InstrumentKind>() {
        Ok(kind) => println!("   Unexpected: parsed {:?}", kind),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Edits against a missing position
    println!("\n5. Editing a position that does not exist...");
    let mut session = Session::default();
    match session.update_position(PositionId(99), PositionField::Strike, 105.0) {
        Ok(()) => println!("   Unexpected: Should have failed!"),
        Err(PayoffError::UnknownPosition { id }) => println!("   ✓ No position with id {}", id),
        Err(e) => println!("   Error: {}", e),
    }

    // Test 6: Invalid quantities are coerced, not rejected
    println!("\n6. Setting quantity to -2...");
    let id = session.add_position(InstrumentKind::LongCall);
    if session.update_position(id, PositionField::Quantity, -2.0).is_ok() {
        let quantity = session.position(id).map(|p| p.quantity).unwrap_or_default();
        println!("   ✓ Quantity coerced to {}", quantity);
    }

    // Test 7: Malformed portfolio files
    println!("\n7. Loading a malformed portfolio...");
    match Session::from_json(r#"{"positions": [{"type": "long_call", "strike": "high"}]}"#) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 8: Unknown preset
    println!("\n8. Loading an unknown strategy...");
    match session.load_strategy("iron_condor") {
        Ok(()) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\nError handling demo completed successfully!");
}
