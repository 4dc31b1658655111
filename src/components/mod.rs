pub mod creation_modal;
pub mod platform_selector;
