pub mod owner_actions;

pub use owner_actions::{BanOutcome, OwnerActionHandler};
