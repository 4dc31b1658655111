use serenity::all::{ChannelId, UserId};
use thiserror::Error;
use tracing::{debug, error};

use crate::platform::PlatformError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Platform error: {0}")]
    Platform(PlatformError),

    #[error("Configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("You do not own a temporary channel you are currently in")]
    NotOwner,

    #[error("User {0} is not in your channel")]
    TargetNotPresent(UserId),

    #[error("User {0} is already banned from this channel")]
    AlreadyBanned(UserId),

    /// The platform refused an operation; holds what the bot tried to do
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("Failed to create voice channel: {0}")]
    ProvisionFailed(#[source] PlatformError),

    #[error("Must be in a voice channel or have Manage Channels permission")]
    ProvisionNotAllowed,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }

    /// Convert a platform failure, naming the action for permission errors
    pub fn platform(err: PlatformError, action: &str) -> Self {
        match err {
            PlatformError::PermissionDenied => Error::PermissionDenied(action.to_string()),
            other => Error::Platform(other),
        }
    }

    /// Errors caused by the invoking user rather than by the bot or platform
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::NotOwner
                | Error::TargetNotPresent(_)
                | Error::AlreadyBanned(_)
                | Error::ChannelNotFound(_)
                | Error::ProvisionNotAllowed
                | Error::InvalidOperation(_)
                | Error::Custom(_)
        )
    }

    /// Log at a level matching who caused the failure
    pub fn log(&self, context: &str) {
        if self.is_user_error() {
            debug!("{}: {}", context, self);
        } else {
            error!("{}: {:?}", context, self);
        }
    }

    /// The text shown to the invoking user in an ephemeral reply
    pub fn user_message(&self) -> String {
        match self {
            Error::NotOwner => {
                "You must be in a temporary voice channel that you own to do that.".to_string()
            }
            Error::TargetNotPresent(user_id) => format!("<@{}> is not in your channel.", user_id),
            Error::AlreadyBanned(user_id) => {
                format!("<@{}> is already banned from your channel.", user_id)
            }
            Error::PermissionDenied(action) => format!(
                "I don't have permission to {}. Please contact a server administrator.",
                action
            ),
            Error::ChannelNotFound(_) => {
                "Channel not found. It may have already been deleted.".to_string()
            }
            Error::ProvisionNotAllowed => "You need to be in a voice channel or have 'Manage Channels' permission to create temporary channels.".to_string(),
            Error::ProvisionFailed(cause) => format!(
                "An error occurred while creating the voice channel: {}",
                cause
            ),
            Error::InvalidOperation(msg) | Error::Custom(msg) => msg.clone(),
            _ => "Something went wrong while handling that command. Please try again later."
                .to_string(),
        }
    }
}
