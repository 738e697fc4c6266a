mod action;
mod author;
mod backend;
mod chat_state;
mod error;
mod event;
mod loading;
mod message;
mod slash_commands;
mod step;
mod store;
mod textarea;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use chat_state::*;
pub use error::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use slash_commands::*;
pub use step::*;
pub use store::*;
pub use textarea::*;
