//! Commands module - host-agent command payloads and the publisher seam.

mod commands_model;
mod publisher;

pub use commands_model::{
    routing_key, AddonCommand, DownloadAddonCommand, RemoveAddonCommand, RoutedCommand,
};
pub use publisher::{
    ChannelCommandPublisher, CommandPublisherTrait, MockCommandPublisher, PublishError,
};
