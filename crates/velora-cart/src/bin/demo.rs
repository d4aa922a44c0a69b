//! # Cart Demo
//!
//! Drives a full cart session against a real SQLite file: adds products,
//! triggers the bundle offer, walks the coupon flow, and checks out.
//!
//! ## Usage
//! ```bash
//! cargo run -p velora-cart --bin demo
//!
//! # Custom database location
//! VELORA_DB_PATH=/tmp/demo.db cargo run -p velora-cart --bin demo
//! ```
//!
//! Run it twice to watch the snapshot rehydrate between sessions.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use velora_cart::{CartStore, InMemoryCoupons, TracingSink};
use velora_core::{BundleOffer, Coupon, DiscountType, Money, ProductDetails};
use velora_db::{Database, DbConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,velora=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Database path: `VELORA_DB_PATH` override, platform data dir, or cwd.
fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("VELORA_DB_PATH") {
        return PathBuf::from(path);
    }

    if let Some(dirs) = ProjectDirs::from("com", "velora", "cart") {
        let data_dir = dirs.data_dir();
        if std::fs::create_dir_all(data_dir).is_ok() {
            return data_dir.join("velora.db");
        }
    }

    PathBuf::from("./velora.db")
}

fn catalog() -> Vec<ProductDetails> {
    let entry = |id: &str, name: &str, price: i64, category: &str| ProductDetails {
        id: id.to_string(),
        name: name.to_string(),
        unit_price: Money::from_cents(price),
        image_ref: Some(format!("images/{}.png", id)),
        category: Some(category.to_string()),
    };

    vec![
        entry("serum-01", "Vitamin C Serum", 49_900, "serum"),
        entry("cream-02", "Night Repair Cream", 64_900, "moisturizer"),
        entry("toner-03", "Rose Water Toner", 29_900, "toner"),
        entry("mask-04", "Clay Detox Mask", 39_900, "mask"),
    ]
}

fn welcome_coupon() -> Coupon {
    let now = Utc::now();
    Coupon {
        code: "WELCOME10".to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: 10,
        min_order_amount: Money::from_cents(50_000),
        valid_from: now - Duration::days(1),
        valid_until: now + Duration::days(30),
        max_uses: Some(1000),
        used_count: 42,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let db_path = database_path();
    println!("Velora cart demo");
    println!("================");
    println!("Database: {}", db_path.display());
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let store = CartStore::open(&db, BundleOffer::default(), Arc::new(TracingSink)).await?;

    let resumed = store.view().await;
    if !resumed.items.is_empty() {
        println!(
            "Resumed a persisted cart: {} lines, total {}",
            resumed.items.len(),
            resumed.totals.final_total
        );
        store.clear().await?;
        println!("Cleared it for a fresh run.");
        println!();
    }

    let mut directory = InMemoryCoupons::new();
    directory.insert(welcome_coupon());

    // Two items: coupon territory.
    let products = catalog();
    store.add_item(&products[0]).await?;
    store.add_item(&products[1]).await?;

    let view = store.redeem_coupon("welcome10", &directory).await?;
    println!(
        "Two items with WELCOME10: subtotal {}, coupon -{}, total {}",
        view.totals.subtotal, view.totals.coupon_discount, view.totals.final_total
    );

    // Third item: the bundle offer takes over and supersedes the coupon.
    let view = store.add_item(&products[2]).await?;
    println!(
        "Three items: bundle active = {}, bundle -{}, total {}",
        view.totals.bundle_active, view.totals.bundle_discount, view.totals.final_total
    );

    // A fourth unit is charged at full price on top of the flat bundle.
    let view = store.add_item(&products[3]).await?;
    println!(
        "Four items: total {} (flat price + overflow unit)",
        view.totals.final_total
    );

    // Coupons stay locked out while the bundle is active.
    if let Err(err) = store.redeem_coupon("WELCOME10", &directory).await {
        println!("Re-applying the coupon is rejected: {}", err);
    }

    let summary = store.complete_checkout().await?;
    println!();
    println!("Checkout summary");
    println!("  subtotal:        {}", summary.subtotal);
    println!("  bundle discount: {}", summary.bundle_discount);
    println!("  coupon discount: {}", summary.coupon_discount);
    println!("  amount due:      {}", summary.amount_due);

    db.close().await;
    Ok(())
}
