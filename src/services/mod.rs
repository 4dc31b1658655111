pub mod channels;
pub mod moderation;
