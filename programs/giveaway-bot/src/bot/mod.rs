//! Telegram handler tree.
//!
//! Commands, callback queries and free-text messages are routed here. Ledger
//! work happens under a single lock acquisition in `crate::instructions`;
//! everything in this module is Telegram plumbing around it.

mod broadcast;
mod callbacks;
mod commands;
mod gate;
mod keyboards;
mod messages;

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use thiserror::Error;

use crate::config::Config;
use crate::error::GiveawayError;
use crate::state::SharedState;

pub use broadcast::{relay, BroadcastReport};
pub use callbacks::MenuAction;
pub use commands::Command;
pub use gate::{is_member, status_grants_access};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error(transparent)]
    Ledger(#[from] GiveawayError),
}

pub type HandlerResult = Result<(), HandlerError>;

pub fn schema() -> UpdateHandler<HandlerError> {
    let command_handler = teloxide::filter_command::<Command, _>().endpoint(commands::handle);

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(
            dptree::filter(|msg: Message| !messages::is_command(&msg))
                .endpoint(messages::handle),
        );

    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

/// Run the dispatch loop until ctrl-c
pub async fn run(bot: Bot, state: SharedState, config: Arc<Config>) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state, config])
        .default_handler(|upd| async move {
            tracing::trace!(update = ?upd.id, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
