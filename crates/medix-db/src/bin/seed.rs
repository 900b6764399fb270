//! # Seed Data Generator
//!
//! Populates the database with sample staff and a pharmacy profile for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p medix-db --bin seed
//!
//! # Specify database path
//! cargo run -p medix-db --bin seed -- --db ./data/medix.db
//! ```

use std::env;

use medix_core::{NewStaffMember, PharmacyProfileInput, StaffStatus};
use medix_db::{Database, DbConfig};

/// (name, username, email, status)
const STAFF: &[(&str, &str, &str, StaffStatus)] = &[
    ("Asha Verma", "asha", "asha@citycare.in", StaffStatus::Active),
    ("Ravi Kumar", "ravi", "ravi@citycare.in", StaffStatus::Active),
    ("Meena Iyer", "meena.i", "meena@citycare.in", StaffStatus::Active),
    ("Farhan Shaikh", "farhan", "farhan@citycare.in", StaffStatus::Disabled),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/medix.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Medix Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./data/medix.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Medix Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.staff().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} staff members", existing);
        println!("  Skipping staff to avoid duplicates.");
    } else {
        for (name, username, email, status) in STAFF {
            let member = NewStaffMember {
                name: name.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password: "changeme123".to_string(),
                status: *status,
            };

            match db.staff().insert(&member).await {
                Ok(m) => println!("  + {} ({}, {})", m.name, m.username, m.status),
                Err(e) => eprintln!("Failed to insert {}: {}", username, e),
            }
        }
    }

    if db.pharmacy_profile().get().await?.is_none() {
        let profile = db
            .pharmacy_profile()
            .upsert(&PharmacyProfileInput {
                pharmacy_name: "City Care Pharmacy".into(),
                address: "12 MG Road".into(),
                city: "Pune".into(),
                state: "Maharashtra".into(),
                postal_code: "411001".into(),
                phone: "+91 20 5550 1234".into(),
                email: Some("contact@citycare.in".into()),
                license_number: "MH-PUN-20B-1234".into(),
                tax_id: Some("27ABCDE1234F1Z5".into()),
            })
            .await?;
        println!("  + Profile: {}", profile.pharmacy_name);
    } else {
        println!("⚠ Pharmacy profile already set, leaving it unchanged.");
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
