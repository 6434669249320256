//! Protocol error types.

use derive_more::Display;

/// A frame that could not be turned into a known message.
///
/// Always recoverable: the offending frame is dropped and processing
/// continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProtocolError {
    /// The envelope parsed but its discriminator is not part of the protocol.
    #[display("Unknown action {:?}", _0)]
    UnknownAction(String),

    /// The frame is not a valid envelope, or its payload does not match the
    /// shape its discriminator requires.
    #[display("Malformed {} message: {}", context, reason)]
    MalformedMessage {
        /// Discriminator being decoded, or `envelope` when the envelope itself is broken.
        context: String,
        /// What was wrong.
        reason: String,
    },

    /// An outbound command could not be serialized.
    #[display("Failed to encode {} command: {}", action, reason)]
    Encode {
        /// Discriminator being encoded.
        action: String,
        /// Serializer message.
        reason: String,
    },
}

impl ProtocolError {
    /// Builds a [`ProtocolError::MalformedMessage`].
    pub fn malformed(context: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::MalformedMessage {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}

impl std::error::Error for ProtocolError {}
