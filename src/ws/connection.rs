//! Echo session state machine.
//!
//! An [`EchoSession`] owns one upgraded connection and alternates strictly
//! between receiving a message and sending its echo. It starts `Open` and
//! ends `Closed` on peer close, on any receive or send failure, or when the
//! optional idle timeout expires. Once closed it never touches the
//! transport again.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ws::WebSocket;
use chrono::{DateTime, Utc};
use futures_util::SinkExt;

use super::messages::Message;
use super::session_id::SessionId;
use crate::error::SessionError;

/// Bidirectional message transport owned by a session.
pub trait Transport: Send {
    /// Waits for the next data message. `Ok(None)` means the peer closed.
    fn next_message(
        &mut self,
    ) -> impl Future<Output = Result<Option<Message>, SessionError>> + Send;

    /// Sends one data message.
    fn send_message(
        &mut self,
        message: Message,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;
}

impl Transport for WebSocket {
    async fn next_message(&mut self) -> Result<Option<Message>, SessionError> {
        loop {
            match self.recv().await {
                None => return Ok(None),
                Some(Err(err)) => return Err(SessionError::Receive(err)),
                Some(Ok(axum::extract::ws::Message::Close(_))) => {
                    // The close reply is queued by the protocol layer; push it
                    // out before the socket is dropped.
                    if let Err(err) = SinkExt::flush(self).await {
                        tracing::debug!(error = %err, "close reply not flushed");
                    }
                    return Ok(None);
                }
                Some(Ok(frame)) => {
                    if let Some(message) = Message::from_frame(frame) {
                        return Ok(Some(message));
                    }
                }
            }
        }
    }

    async fn send_message(&mut self, message: Message) -> Result<(), SessionError> {
        self.send(message.into()).await.map_err(SessionError::Send)
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Receiving and echoing.
    Open,
    /// Terminal.
    Closed,
}

/// Why a session ended.
#[derive(Debug)]
pub enum CloseReason {
    /// The peer closed the connection.
    PeerClosed,
    /// A receive, send or idle failure.
    Failed(SessionError),
}

/// One echo session over a transport `T`.
#[derive(Debug)]
pub struct EchoSession<T> {
    id: SessionId,
    remote: Option<SocketAddr>,
    transport: T,
    state: SessionState,
    idle_timeout: Option<Duration>,
    opened_at: DateTime<Utc>,
    echoed: u64,
    close_reason: Option<CloseReason>,
}

impl<T: Transport> EchoSession<T> {
    /// Opens a session over an already upgraded transport.
    pub fn new(transport: T, remote: Option<SocketAddr>, idle_timeout: Option<Duration>) -> Self {
        Self {
            id: SessionId::new(),
            remote,
            transport,
            state: SessionState::Open,
            idle_timeout,
            opened_at: Utc::now(),
            echoed: 0,
            close_reason: None,
        }
    }

    /// Session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Number of messages echoed so far.
    #[must_use]
    pub const fn echoed(&self) -> u64 {
        self.echoed
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one receive-then-reply round and returns the resulting state.
    ///
    /// A closed session returns immediately without using the transport.
    pub async fn step(&mut self) -> SessionState {
        if self.state == SessionState::Closed {
            return self.state;
        }

        let received = match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.next_message())
                .await
                .unwrap_or(Err(SessionError::IdleTimeout(limit))),
            None => self.transport.next_message().await,
        };

        let inbound = match received {
            Ok(Some(message)) => message,
            Ok(None) => return self.close(CloseReason::PeerClosed),
            Err(err) => return self.close(CloseReason::Failed(err)),
        };

        if let Err(err) = self.transport.send_message(inbound.echo()).await {
            return self.close(CloseReason::Failed(err));
        }
        self.echoed += 1;
        self.state
    }

    /// Drives the session until it closes, releasing the transport.
    pub async fn run(mut self) -> CloseReason {
        tracing::info!(session_id = %self.id, remote = ?self.remote, "client connected");
        while self.step().await == SessionState::Open {}

        let reason = self.close_reason.take().unwrap_or(CloseReason::PeerClosed);
        let lifetime_ms = (Utc::now() - self.opened_at).num_milliseconds();
        match &reason {
            CloseReason::PeerClosed => {
                tracing::info!(
                    session_id = %self.id,
                    echoed = self.echoed,
                    lifetime_ms,
                    "bye"
                );
            }
            CloseReason::Failed(err) => {
                tracing::info!(
                    session_id = %self.id,
                    echoed = self.echoed,
                    lifetime_ms,
                    error = %err,
                    "bye"
                );
            }
        }
        reason
    }

    fn close(&mut self, reason: CloseReason) -> SessionState {
        tracing::debug!(session_id = %self.id, ?reason, "session closing");
        self.state = SessionState::Closed;
        self.close_reason = Some(reason);
        self.state
    }
}
