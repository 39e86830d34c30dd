//! Data messages exchanged on an echo connection.

use std::borrow::Cow;

use axum::body::Bytes;
use axum::extract::ws::Message as WsFrame;

/// Prefix prepended to every echoed payload.
pub const ECHO_PREFIX: &str = "you wrote: ";

/// Kind of a data message; preserved verbatim by the echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// UTF-8 text frame.
    Text,
    /// Binary frame.
    Binary,
}

/// One inbound or outbound data message.
///
/// Control frames (ping, pong, close) are not messages; the transport
/// consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Text payload.
    Text(String),
    /// Binary payload.
    Binary(Bytes),
}

impl Message {
    /// Kind of this message.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Text(_) => MessageKind::Text,
            Self::Binary(_) => MessageKind::Binary,
        }
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Payload rendered as text. Invalid UTF-8 in binary payloads is
    /// replaced with U+FFFD.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Binary(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    /// Builds the reply: same kind, payload prefixed with [`ECHO_PREFIX`].
    ///
    /// Binary payloads are copied byte for byte after the prefix.
    #[must_use]
    pub fn echo(&self) -> Self {
        match self {
            Self::Text(text) => Self::Text(format!("{ECHO_PREFIX}{text}")),
            Self::Binary(bytes) => {
                let mut reply = Vec::with_capacity(ECHO_PREFIX.len() + bytes.len());
                reply.extend_from_slice(ECHO_PREFIX.as_bytes());
                reply.extend_from_slice(bytes);
                Self::Binary(Bytes::from(reply))
            }
        }
    }

    /// Converts a WebSocket frame; `None` for control frames.
    #[must_use]
    pub fn from_frame(frame: WsFrame) -> Option<Self> {
        match frame {
            WsFrame::Text(text) => Some(Self::Text(text.as_str().to_owned())),
            WsFrame::Binary(bytes) => Some(Self::Binary(bytes)),
            WsFrame::Ping(_) | WsFrame::Pong(_) | WsFrame::Close(_) => None,
        }
    }
}

impl From<Message> for WsFrame {
    fn from(message: Message) -> Self {
        match message {
            Message::Text(text) => Self::Text(text.into()),
            Message::Binary(bytes) => Self::Binary(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_echo_keeps_kind() {
        let reply = Message::Text("hi".to_string()).echo();
        assert_eq!(reply, Message::Text("you wrote: hi".to_string()));
        assert_eq!(reply.kind(), MessageKind::Text);
    }

    #[test]
    fn binary_echo_keeps_kind() {
        let reply = Message::Binary(Bytes::from_static(b"abc")).echo();
        assert_eq!(reply.kind(), MessageKind::Binary);
        assert_eq!(reply.payload(), b"you wrote: abc");
    }

    #[test]
    fn binary_echo_copies_non_utf8_bytes_verbatim() {
        let reply = Message::Binary(Bytes::from_static(&[0xff, 0x00, 0xfe])).echo();
        let mut expected = ECHO_PREFIX.as_bytes().to_vec();
        expected.extend_from_slice(&[0xff, 0x00, 0xfe]);
        assert_eq!(reply, Message::Binary(Bytes::from(expected)));
    }

    #[test]
    fn as_text_replaces_invalid_utf8() {
        let message = Message::Binary(Bytes::from_static(&[0x66, 0xff]));
        assert_eq!(message.as_text(), "f\u{fffd}");
    }

    #[test]
    fn empty_payload_echoes_prefix_only() {
        let reply = Message::Text(String::new()).echo();
        assert_eq!(reply.payload(), ECHO_PREFIX.as_bytes());
    }

    #[test]
    fn control_frames_are_not_messages() {
        assert!(Message::from_frame(WsFrame::Ping(Bytes::new())).is_none());
        assert!(Message::from_frame(WsFrame::Close(None)).is_none());
        assert_eq!(
            Message::from_frame(WsFrame::Text("x".into())),
            Some(Message::Text("x".to_string()))
        );
    }
}
