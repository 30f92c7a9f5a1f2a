use state::ChatState;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::Dialogue};

pub mod alerts;
pub mod chat;
pub mod commands;
pub mod errors;
pub mod exchange;
pub mod keyboard;
pub mod quiz;
pub mod schema;
pub mod state;

type UserDialogue = Dialogue<ChatState, InMemStorage<ChatState>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
