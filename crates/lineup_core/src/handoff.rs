//! Contracts with the collaborators that consume a finished board: the image
//! exporter and the share delivery path (share sheet, clipboard, manual copy).
//!
//! Delivery never touches board state. A failing target is logged and the
//! next one is tried.

use thiserror::Error;

use crate::models::GameMode;

/// What the exporter needs besides the rendered surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub mode: GameMode,
    pub filename: String,
}

impl ExportRequest {
    pub fn for_mode(mode: GameMode) -> Self {
        Self { mode, filename: format!("formation-{}.png", mode.code()) }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("{target} rejected the link: {reason}")]
    Rejected { target: String, reason: String },

    #[error("No share target accepted the link (tried: {})", .attempts.join(", "))]
    AllTargetsFailed { attempts: Vec<String> },
}

/// One way of handing a share URL to the user.
pub trait ShareTarget {
    fn name(&self) -> &str;

    fn deliver(&mut self, url: &str) -> Result<(), DeliveryError>;
}

/// Which target took the link, and how many were tried to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub target: String,
    pub attempts: usize,
}

impl DeliveryReceipt {
    pub fn used_fallback(&self) -> bool {
        self.attempts > 1
    }
}

/// Try each target in order until one accepts the URL.
pub fn deliver_with_fallback(
    targets: &mut [&mut dyn ShareTarget],
    url: &str,
) -> Result<DeliveryReceipt, DeliveryError> {
    let mut attempts = Vec::with_capacity(targets.len());

    for target in targets.iter_mut() {
        attempts.push(target.name().to_string());
        match target.deliver(url) {
            Ok(()) => {
                if attempts.len() > 1 {
                    log::info!("Share link delivered via fallback '{}'", target.name());
                }
                return Ok(DeliveryReceipt {
                    target: target.name().to_string(),
                    attempts: attempts.len(),
                });
            }
            Err(err) => log::warn!("Share target failed: {}", err),
        }
    }

    Err(DeliveryError::AllTargetsFailed { attempts })
}
