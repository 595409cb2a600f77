use std::{
    fmt::Debug,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tokio::{
    io::{AsyncWriteExt, Stdout},
    sync::mpsc,
};

use crate::{error::FetchError, model::OutboundMessage};

/// Delivery capability towards the paired device.
#[async_trait]
pub trait MessageSink: Send + Sync + Debug {
    async fn send(&self, message: &OutboundMessage) -> Result<(), FetchError>;
}

/// Writes each message as one JSON line on stdout.
#[derive(Debug)]
pub struct StdoutSink {
    out: tokio::sync::Mutex<Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: tokio::sync::Mutex::new(tokio::io::stdout()) }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSink for StdoutSink {
    async fn send(&self, message: &OutboundMessage) -> Result<(), FetchError> {
        let mut line = serde_json::to_vec(message).map_err(|e| FetchError::Delivery(e.to_string()))?;
        line.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&line).await.map_err(|e| FetchError::Delivery(e.to_string()))?;
        out.flush().await.map_err(|e| FetchError::Delivery(e.to_string()))
    }
}

/// Forwards messages to an in-process receiver, e.g. a device bridge task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<OutboundMessage>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl MessageSink for ChannelSink {
    async fn send(&self, message: &OutboundMessage) -> Result<(), FetchError> {
        self.tx
            .send(message.clone())
            .map_err(|_| FetchError::Delivery("device channel closed".to_string()))
    }
}

/// Keeps every delivered message in memory.
///
/// A panic while the store is locked cannot leave the `Vec` half-written, so
/// both sending and reading recover the data from a poisoned lock.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<OutboundMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Vec<OutboundMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.store().clone()
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn send(&self, message: &OutboundMessage) -> Result<(), FetchError> {
        self.store().push(message.clone());
        Ok(())
    }
}
