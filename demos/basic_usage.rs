// ============================================================================
// Basic Usage Example
// ============================================================================

use rust_decimal::Decimal;
use store_as_int::logging::init_tracing;
use store_as_int::prelude::*;
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing(Level::INFO)?;

    println!("=== Store As Int Example ===\n");

    // Built-in denominations
    let price = money("$1,234.50");
    let rate = exchange_rate(1.234567890);

    println!("Price: {} (stored as {})", price.inspect(), price.value());
    println!("Rate:  {} (stored as {})", rate.inspect(), rate.value());

    // Arithmetic against native numbers and other values
    println!("\n=== Arithmetic ===");
    // `*` and `/` act on the stored integers; go through `to_real` for
    // real-valued scaling.
    let tip = money(price.to_real() * Decimal::new(2, 1));
    let with_tip = &price + &tip;
    println!("Tip (20%):  {}", tip.inspect());
    println!("With tip:   {}", with_tip.inspect());
    println!("Converted:  {}", money(price.to_real() * rate.to_real()).inspect());
    println!("Scaled product (stored integers): {}", (&price * 2i64).inspect());

    match price.checked_div(0i64) {
        Ok(value) => println!("Unexpected: {}", value.inspect()),
        Err(e) => println!("Division by zero rejected: {}", e),
    }

    // Runtime-defined denomination
    println!("\n=== Custom Denomination ===");
    let points = register(
        DenominationBuilder::new("loyalty_points")
            .accuracy(3)
            .decimals(1)
            .symbol("pt"),
    )?;
    let balance = points.value("pt12,500.75");
    println!("Registered: {}", points.type_name());
    println!("Balance:    {}", balance.inspect());
    println!("Padded:     {}", balance.to_padded_string(true, 8));
    println!("Same via registry: {}", construct("LoyaltyPoints", 12_500_750i64)?.inspect());

    // Strict vs lenient construction
    println!("\n=== Parsing ===");
    println!("Lenient garbage: {:?}", money("twelve dollars").raw());
    match ScaledInt::try_new(&Denomination::money(), "twelve dollars") {
        Ok(value) => println!("Unexpected: {}", value.inspect()),
        Err(e) => println!("Strict garbage: {}", e),
    }

    // Lossless snapshot
    println!("\n=== JSON Round Trip ===");
    let json = balance.to_json()?;
    println!("{}", json);
    let restored = ScaledInt::from_json(&points, &json)?;
    println!("Restored: {} (equal: {})", restored.inspect(), restored == balance);

    Ok(())
}
