use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    command::PreferenceChangeCommand,
    exception::NotificationResult,
    model::vo::{ChangeSummary, NotificationKind},
};

/// Create and destroy dossier notifications as the dossiers and their instructors change.
///
/// Every operation writes a single change set, so it is applied entirely or not at all.
#[async_trait]
pub trait NotificationLifecycleService: Send + Sync {
    /// Notify `instructor_id` only, regardless of its preferences, when given.
    ///
    /// Otherwise notify the instructors of the dossier's group whose preferences ask for it,
    /// except `except_instructor_id`. Calling it twice creates nothing the second time.
    async fn create_notification(
        &self,
        dossier_id: Uuid,
        kind: NotificationKind,
        instructor_id: Option<Uuid>,
        except_instructor_id: Option<Uuid>,
    ) -> NotificationResult<ChangeSummary>;

    /// Move the group notifications of `from_group_id` to `to_group_id`.
    async fn update_group(
        &self,
        from_group_id: Uuid,
        to_group_id: Uuid,
    ) -> NotificationResult<ChangeSummary>;

    /// Catch up on the notifications an instructor gets once it follows the dossier.
    async fn refresh_for_newly_followed(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<ChangeSummary>;

    /// Drop the notifications an instructor only had because it followed the dossier.
    async fn cleanup_for_unfollowed(
        &self,
        instructor_id: Uuid,
        dossier_id: Uuid,
    ) -> NotificationResult<ChangeSummary>;

    /// Bring an instructor's notifications of one kind in line with its new preference.
    async fn reconcile_preference_change(
        &self,
        command: PreferenceChangeCommand,
    ) -> NotificationResult<ChangeSummary>;

    async fn destroy_by_dossier_and_kind(
        &self,
        dossier_id: Uuid,
        kind: NotificationKind,
    ) -> NotificationResult<ChangeSummary>;

    async fn destroy_by_dossier_kind_instructor(
        &self,
        dossier_id: Uuid,
        kind: NotificationKind,
        instructor_id: Uuid,
    ) -> NotificationResult<ChangeSummary>;

    /// Drop every notification of an instructor on the dossiers of a group it left.
    async fn destroy_for_instructor_leaving_group(
        &self,
        group_id: Uuid,
        instructor_id: Uuid,
    ) -> NotificationResult<ChangeSummary>;
}
