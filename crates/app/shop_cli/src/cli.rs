use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shop-cli", version, about = "Inspect storefront catalog retrieval")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the CLI version.
    Version,

    /// Show which catalog products a customer query would match.
    Search(QueryArgs),

    /// Print the augmented message list sent to the completion service.
    Prompt(QueryArgs),
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Product catalog JSON file.
    #[arg(long, env = "CATALOG_PATH", default_value = "produkty.json")]
    pub catalog: PathBuf,

    /// Customer message, as typed in the chat widget.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl QueryArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}
