//! End-to-end card entry: type, validate, save, list.
//!
//! Run with: `cargo run --example add_card --features async`

use card_entry::gateway::{submit_and_save, SimulatedGateway};
use card_entry::wallet::{MemoryWallet, WalletStore};
use card_entry::CardEntryForm;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Add a Payment Method ===\n");

    // The billing screen starts with two saved cards
    let mut wallet = MemoryWallet::with_sample_data();
    println!("Saved payment methods:");
    for method in wallet.list() {
        println!("  [{}] {}", method.id, method);
    }
    println!();

    let gateway = SimulatedGateway::with_latency(Duration::from_millis(50));

    // Example 1: a card on an unsupported network
    let mut form = CardEntryForm::new();
    form.edit_holder_name("Jane Doe");
    form.edit_card_number("6011111111111117");
    form.edit_expiry("1230");
    form.edit_cvv("123");

    println!("Typing a Discover card:");
    println!("  Number field: {}", form.card_number());
    println!("  Detected network: {}", form.network());

    match submit_and_save(&mut form, &gateway).await {
        Ok(method) => println!("  Unexpectedly saved: {}", method),
        Err(err) => println!("  Rejected: {}", err),
    }
    println!();

    // Example 2: retype with a Visa number and make it the default
    println!("Retyping with a Visa number:");
    form.edit_card_number("4532 0151 1283 0366");
    form.set_as_default_flag(true);
    println!("  Number field: {}", form.card_number());
    println!("  Detected network: {}", form.network());
    println!("  Errors left after the edit: {}", form.errors().count());

    match submit_and_save(&mut form, &gateway).await {
        Ok(method) => {
            println!("  Saved: {} ending in {}", method.network, method.last4);
            let id = wallet.add(method);
            println!("  Wallet assigned id {}", id);
        }
        Err(err) => println!("  Failed: {}", err),
    }
    println!();

    // The new card took the default flag from the old Visa
    println!("Saved payment methods now:");
    for method in wallet.list() {
        println!("  [{}] {}", method.id, method);
    }
    println!();

    // Example 3: change the default and drop a card
    println!("Making the Mastercard the default:");
    match wallet.set_primary(2) {
        Ok(()) => {
            for method in wallet.list() {
                println!("  [{}] {}", method.id, method);
            }
        }
        Err(err) => println!("  Failed: {}", err),
    }
    println!();

    println!("Removing card 1:");
    match wallet.remove(1) {
        Ok(()) => {
            for method in wallet.list() {
                println!("  [{}] {}", method.id, method);
            }
        }
        Err(err) => println!("  Failed: {}", err),
    }
}
