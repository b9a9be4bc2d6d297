//! Outbound chat messaging seam.

use async_trait::async_trait;
use common::Error;

/// Chat delivery interface the alert loop sends through.
///
/// Implementations own authentication and delivery mechanics; the loop only
/// hands over the message text and an opaque `destination` identifier,
/// passed through unchanged.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(&self, text: &str, destination: &str) -> Result<(), Error>;
}
