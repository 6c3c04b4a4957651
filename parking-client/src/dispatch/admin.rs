use std::sync::Arc;

use parking_common::{FormError, SlotForm};

use super::Confirm;
use crate::api::{ApiError, ParkingApi};
use crate::poller::StatusPoller;
use crate::surface::{AdminSurface, Notice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Rejected before sending
    Invalid(FormError),
    /// User declined the confirmation
    Cancelled,
    Completed(String),
    Failed(String),
}

/// Per-slot actions that share the confirm → request → alert → refresh shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotAction {
    Remove,
    Release,
}

impl SlotAction {
    fn prompt(&self, slot_id: &str) -> String {
        match self {
            SlotAction::Remove => format!(
                "Are you sure you want to permanently remove slot {}? This action cannot be undone.",
                slot_id
            ),
            SlotAction::Release => format!(
                "Are you sure you want to manually release slot {}? This will immediately un-book the spot.",
                slot_id
            ),
        }
    }

    fn failure(&self, server_text: &str) -> String {
        match self {
            SlotAction::Remove => format!("Failed to remove slot: {}", server_text),
            SlotAction::Release => format!("Failed to release slot: {}", server_text),
        }
    }

    fn network_failure(&self) -> &'static str {
        match self {
            SlotAction::Remove => "Network error during slot removal.",
            SlotAction::Release => "Network error during slot release.",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            SlotAction::Remove => "remove",
            SlotAction::Release => "release",
        }
    }
}

pub struct AdminDispatcher {
    api: Arc<dyn ParkingApi>,
    surface: Arc<dyn AdminSurface>,
    poller: Arc<dyn StatusPoller>,
}

impl AdminDispatcher {
    pub const CREATE_NETWORK_ERROR: &'static str = "Network error during slot creation.";

    pub fn new(api: Arc<dyn ParkingApi>, surface: Arc<dyn AdminSurface>, poller: Arc<dyn StatusPoller>) -> Self {
        Self { api, surface, poller }
    }

    /// Add a slot from the admin form.
    pub async fn create_slot(&self, form: &SlotForm) -> ActionOutcome {
        self.surface.show_form_notice(None);

        let new_slot = match form.validate() {
            Ok(slot) => slot,
            Err(e) => {
                self.surface.show_form_notice(Some(&Notice::error(e.to_string())));
                return ActionOutcome::Invalid(e);
            }
        };

        match self.api.create_slot(&new_slot).await {
            Ok(_) => {
                let message = format!("Slot {} successfully added!", new_slot.slot_id);
                tracing::info!("Created slot {} at {}", new_slot.slot_id, new_slot.current_price);
                self.surface.show_form_notice(Some(&Notice::success(message.clone())));
                self.surface.reset_slot_form();
                self.poller.refresh().await;
                ActionOutcome::Completed(message)
            }
            Err(e) => {
                tracing::warn!("Failed to create slot {}: {}", new_slot.slot_id, e);
                let message = match e.server_text() {
                    Some(text) => format!("Error adding slot: {}", text),
                    None => Self::CREATE_NETWORK_ERROR.to_string(),
                };
                self.surface.show_form_notice(Some(&Notice::error(message.clone())));
                ActionOutcome::Failed(message)
            }
        }
    }

    pub async fn remove_slot(&self, slot_id: &str, confirm: &mut dyn Confirm) -> ActionOutcome {
        self.slot_action(SlotAction::Remove, slot_id, confirm).await
    }

    pub async fn release_slot(&self, slot_id: &str, confirm: &mut dyn Confirm) -> ActionOutcome {
        self.slot_action(SlotAction::Release, slot_id, confirm).await
    }

    async fn slot_action(&self, action: SlotAction, slot_id: &str, confirm: &mut dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&action.prompt(slot_id)).await {
            tracing::debug!("{} of slot {} cancelled", action.as_str(), slot_id);
            return ActionOutcome::Cancelled;
        }

        let result: Result<String, ApiError> = match action {
            SlotAction::Remove => self.api.remove_slot(slot_id).await,
            SlotAction::Release => self.api.release_slot(slot_id).await,
        };

        match result {
            Ok(message) => {
                tracing::info!("{} slot {}: {}", action.as_str(), slot_id, message);
                self.surface.alert(&message);
                self.poller.refresh().await;
                ActionOutcome::Completed(message)
            }
            Err(e) => {
                tracing::warn!("Failed to {} slot {}: {}", action.as_str(), slot_id, e);
                let message = match e.server_text() {
                    Some(text) => action.failure(text),
                    None => action.network_failure().to_string(),
                };
                self.surface.alert(&message);
                ActionOutcome::Failed(message)
            }
        }
    }
}
