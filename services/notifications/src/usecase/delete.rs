use uuid::Uuid;

use crate::domain::repository::NotificationRepository;
use crate::error::NotificationsServiceError;

pub struct DeleteNotificationsInput {
    pub id: Option<Uuid>,
    pub clear_all: bool,
}

/// What a delete request removed.
pub enum DeleteOutcome {
    /// Single-row delete. Deleting an already-gone id still succeeds.
    Deleted,
    /// Bulk clear; carries the number of rows removed.
    Cleared(u64),
}

pub struct DeleteNotificationsUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> DeleteNotificationsUseCase<R> {
    pub async fn execute(
        &self,
        input: DeleteNotificationsInput,
    ) -> Result<DeleteOutcome, NotificationsServiceError> {
        // clearAll is an explicit, unscoped, irreversible operation; access
        // is gated above this boundary, not here.
        if input.clear_all {
            let removed = self.repo.delete_all().await?;
            tracing::warn!(removed, "cleared all notifications");
            return Ok(DeleteOutcome::Cleared(removed));
        }

        let id = input
            .id
            .ok_or(NotificationsServiceError::NotificationIdRequired)?;
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            tracing::debug!(notification_id = %id, "delete of unknown notification id");
        }
        Ok(DeleteOutcome::Deleted)
    }
}
