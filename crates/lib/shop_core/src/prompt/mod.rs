//! Retrieval-augmented prompt building.
//!
//! [`build_prompt`] takes the client's conversation history and the product
//! catalog and returns the message list forwarded to the completion service:
//!
//! 1. a leading `system` message is overwritten with [`PERSONA_PROMPT`];
//! 2. the last message is split into search words;
//! 3. up to three catalog products containing any of the words are selected;
//! 4. when something matched, a `system` context message describing those
//!    products is inserted right before the last message.
//!
//! The input history and the catalog are never mutated.

pub mod retrieval;
pub mod templates;

use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::conversation::{ConversationMessage, Role};

pub use retrieval::{MAX_MATCHES, match_products, search_words};
pub use templates::PERSONA_PROMPT;

/// Errors from prompt building.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("conversation history is empty")]
    EmptyHistory,
}

/// Builds the augmented message list for `history`.
pub fn build_prompt(
    history: &[ConversationMessage],
    catalog: &Catalog,
) -> Result<Vec<ConversationMessage>, PromptError> {
    if history.is_empty() {
        return Err(PromptError::EmptyHistory);
    }

    let mut messages = history.to_vec();
    if let Some(first) = messages.first_mut()
        && first.role == Role::System
    {
        first.content = PERSONA_PROMPT.to_string();
    }

    // Read after the overwrite: a lone system message is its own query.
    let query = messages[messages.len() - 1].content.to_lowercase();
    let words = search_words(&query);
    let matched = match_products(catalog, &words);
    debug!(words = words.len(), matched = matched.len(), "catalog retrieval");

    if !matched.is_empty() {
        let context = templates::product_context(&query, &matched);
        messages.insert(messages.len() - 1, ConversationMessage::system(context));
    }

    Ok(messages)
}
