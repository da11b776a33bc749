//! Walkthrough of the full ledger lifecycle.
//!
//! Registers a symbol, issues supply, fans out transfers, opens and
//! closes a balance row, and retires supply — printing the books after
//! each step so the supply/balance reconciliation is visible.
//!
//! Run with:
//!   cargo run --example demo
//!
//! Set `RUST_LOG=debug` to see the ledger's own operation events.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use xakti_core::{AccountId, Asset, Symbol, SymbolCode};
use xakti_ledger::{Ledger, StaticHost};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn step(title: &str) {
    println!("\n{BOLD}{CYAN}== {title}{RESET}");
}

fn books(ledger: &Ledger<StaticHost>, code: SymbolCode, holders: &[&AccountId]) {
    let supply = ledger.supply(code).expect("symbol registered");
    println!("{DIM}   supply: {supply}{RESET}");
    for holder in holders {
        match ledger.balance(holder, code) {
            Some(balance) => println!("{DIM}   {holder}: {balance}{RESET}"),
            None => println!("{DIM}   {holder}: (no row){RESET}"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let authority = AccountId::new("xakti")?;
    let issuer = AccountId::new("treasury")?;
    let alice = AccountId::new("alice")?;
    let bob = AccountId::new("bob")?;

    let mut host = StaticHost::with_accounts([
        authority.clone(),
        issuer.clone(),
        alice.clone(),
        bob.clone(),
    ]);
    host.authorize(authority.clone());
    let mut ledger = Ledger::new(authority, host);

    let xak: SymbolCode = "XAK".parse()?;
    let holders = [&issuer, &alice, &bob];

    step("create — register XAK with a 1M cap");
    ledger.create(issuer.clone(), "1000000.0000 XAK".parse::<Asset>()?)?;
    books(&ledger, xak, &holders);

    step("issue — mint the first 100k to the treasury");
    ledger.host_mut().authorize(issuer.clone());
    ledger.issue(&issuer, "100000.0000 XAK".parse()?, "genesis issuance")?;
    books(&ledger, xak, &holders);

    step("transfer — treasury pays alice, alice pays bob");
    ledger.transfer(&issuer, &alice, "250.0000 XAK".parse()?, "grant")?;
    ledger.host_mut().authorize(alice.clone());
    ledger.transfer(&alice, &bob, "100.0000 XAK".parse()?, "lunch")?;
    books(&ledger, xak, &holders);
    println!(
        "{DIM}   notified: {:?}{RESET}",
        ledger
            .host()
            .take_notifications()
            .iter()
            .map(AccountId::as_str)
            .collect::<Vec<_>>()
    );

    step("open/close — bob re-opens his row (idempotent no-op), alice empties and closes hers");
    let sym = Symbol::parse("XAK", 4)?;
    ledger.host_mut().authorize(bob.clone());
    ledger.open(&bob, sym, &bob)?;
    ledger.transfer(&alice, &bob, "150.0000 XAK".parse()?, "emptying out")?;
    ledger.close(&alice, sym)?;
    books(&ledger, xak, &holders);

    step("retire — treasury burns 50k");
    ledger.retire("50000.0000 XAK".parse()?, "buyback burn")?;
    books(&ledger, xak, &holders);

    step("the part that must always hold");
    let supply = ledger.supply(xak).expect("registered").amount;
    let held: i64 = holders
        .iter()
        .filter_map(|h| ledger.balance(h, xak))
        .map(|b| b.amount)
        .sum();
    println!("   supply {supply} == sum of balances {held}");
    assert_eq!(supply, held);

    Ok(())
}
