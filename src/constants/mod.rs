pub mod embeds;
pub mod platforms;
pub mod timeouts;
