pub mod event_handler;
pub mod interaction;
pub mod lifecycle;
pub mod voice_state;
