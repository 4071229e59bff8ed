//! Smartmarks demo binary.
//!
//! Runs two in-process "tabs" of the same user against the in-memory
//! backend and walks through the synchronization paths: optimistic add,
//! remote feed convergence, targeted cross-tab delete, and sign-out.

use std::sync::Arc;

use smartmarks::dashboard::{Dashboard, DashboardExit};
use smartmarks::managers::broadcaster::BroadcastHub;
use smartmarks::remote::identity::IdentityProvider;
use smartmarks::remote::memory::{MemoryIdentityProvider, MemoryRemoteStore};

fn print_list(label: &str, bookmarks: &[smartmarks::types::bookmark::Bookmark]) {
    println!("{} ({} bookmarks)", label, bookmarks.len());
    for b in bookmarks {
        println!("  - {} <{}>", b.title, b.url);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartmarks=debug".into()),
        )
        .init();

    let identity = Arc::new(MemoryIdentityProvider::new());
    let remote = Arc::new(MemoryRemoteStore::new());
    let hub = BroadcastHub::new();

    identity.sign_in("google", "/dashboard").await?;

    let mut tab_a = Dashboard::open(identity.clone(), remote.clone(), &hub)
        .await?
        .ok_or("no session after sign-in")?;
    let mut tab_b = Dashboard::open(identity.clone(), remote.clone(), &hub)
        .await?
        .ok_or("no session after sign-in")?;

    // Tab A adds a bookmark; note the bare host gets an https:// scheme.
    tab_a.set_title_input("Rust Book");
    tab_a.set_url_input("doc.rust-lang.org/book");
    let added = tab_a.submit_add().await?;
    println!("added: {} <{}>", added.title, added.url);

    // Tab B converges through the remote feed.
    tab_b.pump_feed();
    print_list("tab B after feed", tab_b.bookmarks());

    // Tab B deletes it; tab A converges through the cross-tab signal.
    tab_b.delete_bookmark(&added.id).await?;
    tab_a.pump_broadcasts();
    print_list("tab A after broadcast", tab_a.bookmarks());

    // Sign-out in one tab redirects the other through its session guard.
    identity.sign_out().await?;
    match tab_a.pump_auth() {
        Some(DashboardExit::ToLanding) => println!("tab A redirected to landing"),
        other => println!("tab A unexpected auth outcome: {:?}", other),
    }
    match tab_b.pump_auth() {
        Some(DashboardExit::ToLanding) => println!("tab B redirected to landing"),
        other => println!("tab B unexpected auth outcome: {:?}", other),
    }

    Ok(())
}
