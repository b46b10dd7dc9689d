//! Website directory: defaults, persistence, fail-soft loading.
//!
//! Run with: `cargo run --example websites`

use card_entry::sites::{
    default_websites, JsonFileStore, KeyValueStore, MemoryStore, WebsiteDirectory, WEBSITES_KEY,
};

fn main() {
    println!("=== Website Directory ===\n");

    // Example 1: a fresh store starts with the built-in defaults
    let mut directory = WebsiteDirectory::load(MemoryStore::new());
    println!("Fresh directory:");
    for site in directory.list() {
        println!("  [{}] {} - {}", site.id, site.name, site.url);
    }
    println!();

    // Example 2: add and remove entries
    println!("Adding a website:");
    match directory.add("docs.mywebsite.com", "https://docs.mywebsite.com") {
        Ok(entry) => println!("  Added with id {}", entry.id),
        Err(err) => println!("  Rejected: {}", err),
    }

    println!("Adding one with a blank URL:");
    match directory.add("broken.example", "   ") {
        Ok(entry) => println!("  Unexpectedly added {}", entry.id),
        Err(err) => println!("  Rejected: {}", err),
    }

    let first_id = directory.list()[0].id.clone();
    println!("Removing entry {}:", first_id);
    match directory.remove(&first_id) {
        Ok(()) => println!("  Removed"),
        Err(err) => println!("  Failed: {}", err),
    }
    println!();

    println!("Directory now:");
    for site in directory.list() {
        println!("  [{}] {} - {}", site.id, site.name, site.url);
    }
    println!();

    // Example 3: the persisted payload is a plain JSON array
    match directory.store().get(WEBSITES_KEY) {
        Ok(Some(payload)) => {
            println!("Raw value under \"{}\":", WEBSITES_KEY);
            println!("  {}", payload);
        }
        Ok(None) => println!("Nothing persisted yet"),
        Err(err) => println!("Store unreadable: {}", err),
    }
    println!();

    // Example 4: a file-backed store survives a reload
    let dir = std::env::temp_dir().join("card_entry_websites_demo");
    let mut on_disk = WebsiteDirectory::load(JsonFileStore::new(&dir));
    let before = on_disk.list().len();
    match on_disk.add("status.mywebsite.com", "https://status.mywebsite.com") {
        Ok(_) => {
            println!("File-backed store at {}:", dir.display());
            println!("  {} entries before, {} after", before, on_disk.list().len());
        }
        Err(err) => println!("  Could not persist: {}", err),
    }

    let reloaded = WebsiteDirectory::load(JsonFileStore::new(&dir));
    println!("  {} entries after reload", reloaded.list().len());
    println!();

    // Example 5: a malformed stored value falls back to the defaults
    let mut store = MemoryStore::new();
    let _ = store.set(WEBSITES_KEY, "not json at all");
    let recovered = WebsiteDirectory::load(store);
    println!(
        "Malformed stored value falls back to the {} defaults",
        recovered.list().len()
    );
    assert_eq!(recovered.list(), default_websites().as_slice());
}
