// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands, QueryArgs};
use shop_core::catalog::Catalog;
use shop_core::conversation::ConversationMessage;
use shop_core::prompt::{build_prompt, match_products, search_words};

mod cli;
mod logging;

/// Stands in for the client persona message; it is overwritten anyway.
const CLIENT_SYSTEM_PLACEHOLDER: &str = "(client system prompt)";

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Search(query) => search(query)?,
        Commands::Prompt(query) => prompt(query)?,
    }

    Ok(())
}

fn search(args: &QueryArgs) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)?;
    let words = search_words(&args.query_text());
    println!("search words: {}", words.join(", "));

    let matched = match_products(&catalog, &words);
    if matched.is_empty() {
        println!("no matching products");
        return Ok(());
    }
    for (i, product) in matched.iter().enumerate() {
        println!("{}. {} ({})", i + 1, product.name, product.price);
    }
    Ok(())
}

fn prompt(args: &QueryArgs) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)?;
    let history = vec![
        ConversationMessage::system(CLIENT_SYSTEM_PLACEHOLDER),
        ConversationMessage::user(args.query_text()),
    ];
    let messages = build_prompt(&history, &catalog)?;
    log::info!(
        "{} messages ({} injected)",
        messages.len(),
        messages.len() - history.len()
    );
    println!("{}", serde_json::to_string_pretty(&messages)?);
    Ok(())
}
