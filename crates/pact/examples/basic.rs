//! Basic PACT Example
//!
//! Demonstrates core functionality:
//! - Negotiating a capability pair
//! - Establishing an association
//! - Signing and verifying a message
//!
//! Run with: cargo run --example basic

use pact::{Association, Message, Negotiator, PROTOCOL_NS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== PACT Basic Example ===\n");

    println!("1. Negotiating capabilities...");
    let negotiator = Negotiator::default_catalog();
    let (assoc_type, session_type) = negotiator
        .first_allowed()
        .expect("default catalog is never empty");
    println!("   Selected: {assoc_type} over {session_type}");
    println!();

    println!("2. Establishing an association...");
    let assoc = Association::generate("example-handle", 3600, assoc_type);
    println!("   Handle:  {}", assoc.handle());
    println!("   Expires: {}s", assoc.expires_in());
    println!();

    println!("3. Serializing for storage...");
    let wire = assoc.serialize()?;
    print!("{}", String::from_utf8_lossy(&wire));
    let restored = Association::deserialize(&wire)?;
    assert_eq!(restored, assoc);
    println!("   Round-trip OK");
    println!();

    println!("4. Signing a message...");
    let message = Message::new()
        .with_arg(PROTOCOL_NS, "signed", "mode,handle")
        .with_arg(PROTOCOL_NS, "mode", "id_res")
        .with_arg(PROTOCOL_NS, "handle", assoc.handle());
    let signed = assoc.sign_message(&message)?;
    println!("   Verified: {}", assoc.check_message_signature(&signed)?);
    println!();

    println!("=== Done ===");

    Ok(())
}
