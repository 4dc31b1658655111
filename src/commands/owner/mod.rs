pub mod ban;
pub mod kick;
pub mod mute;
pub mod transfer;
