//! Command publisher trait and implementations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::debug;
use thiserror::Error;
use tokio::sync::mpsc;

use super::commands_model::{AddonCommand, DownloadAddonCommand, RemoveAddonCommand, RoutedCommand};
use crate::errors::Result;

/// Failures while handing a command to the bus.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Command channel closed, dropped command for server {server_id}")]
    ChannelClosed { server_id: String },

    #[error("Failed to encode command: {0}")]
    Encode(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Sends addon commands to the host agent that owns `server_id`.
///
/// Delivery guarantees (at-least-once, ordering) belong to the bus behind the
/// implementation. Callers treat `Ok(())` as "accepted by the bus", not as
/// "executed by the host".
#[async_trait]
pub trait CommandPublisherTrait: Send + Sync {
    async fn publish_download_command(
        &self,
        server_id: &str,
        command: DownloadAddonCommand,
    ) -> Result<()>;

    async fn publish_remove_command(&self, server_id: &str, command: RemoveAddonCommand)
        -> Result<()>;
}

/// Publisher that forwards routed commands onto a tokio channel.
///
/// The receiving half is owned by whatever bridges to the real bus.
#[derive(Clone)]
pub struct ChannelCommandPublisher {
    tx: mpsc::UnboundedSender<RoutedCommand>,
}

impl ChannelCommandPublisher {
    /// Creates a publisher and the receiver its commands arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RoutedCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn from_sender(tx: mpsc::UnboundedSender<RoutedCommand>) -> Self {
        Self { tx }
    }

    fn send(&self, server_id: &str, command: AddonCommand) -> Result<()> {
        let routed = RoutedCommand::new(server_id, command);
        debug!(
            "Routing command for installation {} to {}",
            routed.command.installation_id(),
            routed.routing_key()
        );
        self.tx.send(routed).map_err(|_| PublishError::ChannelClosed {
            server_id: server_id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl CommandPublisherTrait for ChannelCommandPublisher {
    async fn publish_download_command(
        &self,
        server_id: &str,
        command: DownloadAddonCommand,
    ) -> Result<()> {
        self.send(server_id, AddonCommand::Download(command))
    }

    async fn publish_remove_command(
        &self,
        server_id: &str,
        command: RemoveAddonCommand,
    ) -> Result<()> {
        self.send(server_id, AddonCommand::Remove(command))
    }
}

/// Mock publisher for testing - records every routed command.
#[derive(Clone, Default)]
pub struct MockCommandPublisher {
    commands: Arc<Mutex<Vec<RoutedCommand>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockCommandPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent publish fail with a transport error.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    /// Returns all recorded commands.
    pub fn commands(&self) -> Vec<RoutedCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn download_commands(&self) -> Vec<(String, DownloadAddonCommand)> {
        self.commands()
            .into_iter()
            .filter_map(|r| match r.command {
                AddonCommand::Download(cmd) => Some((r.server_id, cmd)),
                AddonCommand::Remove(_) => None,
            })
            .collect()
    }

    pub fn remove_commands(&self) -> Vec<(String, RemoveAddonCommand)> {
        self.commands()
            .into_iter()
            .filter_map(|r| match r.command {
                AddonCommand::Remove(cmd) => Some((r.server_id, cmd)),
                AddonCommand::Download(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.lock().unwrap().is_empty()
    }

    fn record(&self, server_id: &str, command: AddonCommand) -> Result<()> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(PublishError::Transport(message).into());
        }
        self.commands
            .lock()
            .unwrap()
            .push(RoutedCommand::new(server_id, command));
        Ok(())
    }
}

#[async_trait]
impl CommandPublisherTrait for MockCommandPublisher {
    async fn publish_download_command(
        &self,
        server_id: &str,
        command: DownloadAddonCommand,
    ) -> Result<()> {
        self.record(server_id, AddonCommand::Download(command))
    }

    async fn publish_remove_command(
        &self,
        server_id: &str,
        command: RemoveAddonCommand,
    ) -> Result<()> {
        self.record(server_id, AddonCommand::Remove(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ErrorKind};

    fn remove_command() -> RemoveAddonCommand {
        RemoveAddonCommand {
            installation_id: "inst-1".to_string(),
            sgc_id: "1".to_string(),
            addon_id: "2".to_string(),
            installation_path: "/data/maps".to_string(),
        }
    }

    #[tokio::test]
    async fn test_channel_publisher_routes_by_server() {
        let (publisher, mut rx) = ChannelCommandPublisher::new();

        publisher
            .publish_remove_command("10", remove_command())
            .await
            .unwrap();

        let routed = rx.recv().await.expect("command should be queued");
        assert_eq!(routed.server_id, "10");
        assert_eq!(routed.routing_key(), "hosts.10.workshop");
        assert!(matches!(routed.command, AddonCommand::Remove(_)));
    }

    #[tokio::test]
    async fn test_channel_publisher_fails_when_receiver_dropped() {
        let (publisher, rx) = ChannelCommandPublisher::new();
        drop(rx);

        let err = publisher
            .publish_remove_command("10", remove_command())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Publish(PublishError::ChannelClosed { ref server_id }) if server_id == "10"
        ));
        assert_eq!(err.kind(), ErrorKind::DependentSystem);
    }

    #[tokio::test]
    async fn test_channel_publisher_over_caller_owned_sender() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let publisher = ChannelCommandPublisher::from_sender(tx.clone());

        publisher
            .publish_remove_command("7", remove_command())
            .await
            .unwrap();
        drop(publisher);

        let routed = rx.recv().await.expect("command should be queued");
        assert_eq!(routed.routing_key(), "hosts.7.workshop");
        assert_eq!(routed.command.installation_id(), "inst-1");
        assert!(!tx.is_closed());
    }

    #[tokio::test]
    async fn test_mock_publisher_records_and_fails_on_demand() {
        let publisher = MockCommandPublisher::new();
        assert!(publisher.is_empty());

        publisher
            .publish_remove_command("10", remove_command())
            .await
            .unwrap();
        assert_eq!(publisher.len(), 1);
        assert_eq!(publisher.remove_commands().len(), 1);
        assert!(publisher.download_commands().is_empty());

        publisher.fail_with("bus down");
        assert!(publisher
            .publish_remove_command("10", remove_command())
            .await
            .is_err());
        assert_eq!(publisher.len(), 1);
    }
}
