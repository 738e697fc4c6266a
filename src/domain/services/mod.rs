pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod chat_controller;
mod event_interpreter;
pub mod events;
mod renderer;
mod scroll;
mod session_identity;
mod stream_decoder;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat_controller::*;
pub use event_interpreter::*;
pub use renderer::*;
pub use scroll::*;
pub use session_identity::*;
pub use stream_decoder::*;
