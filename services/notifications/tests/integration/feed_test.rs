use serde_json::json;

use domus_notifications::domain::types::NotificationStatus;
use domus_notifications::usecase::list::{ListNotificationsInput, ListNotificationsUseCase};

use crate::helpers::{MockNotificationRepo, created_times, notification, notification_at};

fn input() -> ListNotificationsInput {
    ListNotificationsInput {
        role: None,
        user_id: None,
        client_only: false,
        status: None,
        priority: None,
        limit: None,
    }
}

#[tokio::test]
async fn role_mode_returns_role_and_all_rows_but_not_null_role_rows() {
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification(Some("staff"), None, None),
            notification(Some("all"), None, None),
            notification(None, None, None),
        ]),
    };

    let feed = uc
        .execute(ListNotificationsInput {
            role: Some("staff".to_owned()),
            ..input()
        })
        .await
        .unwrap();

    assert_eq!(feed.count, 2);
    let roles: Vec<Option<String>> = feed
        .notifications
        .iter()
        .map(|n| n.recipient_role.clone())
        .collect();
    assert!(roles.contains(&Some("staff".to_owned())));
    assert!(roles.contains(&Some("all".to_owned())));
    assert!(!roles.contains(&None));
}

#[tokio::test]
async fn client_only_mode_returns_exactly_the_clients_own_rows() {
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification(Some("client"), None, Some(json!({ "user_id": 7 }))),
            notification(Some("all"), None, None),
            notification(Some("client"), None, Some(json!({ "user_id": 8 }))),
            notification(Some("admin"), Some(7), None),
        ]),
    };

    let feed = uc
        .execute(ListNotificationsInput {
            user_id: Some(7),
            client_only: true,
            ..input()
        })
        .await
        .unwrap();

    assert_eq!(feed.count, 1);
    let only = &feed.notifications[0];
    assert_eq!(only.recipient_role.as_deref(), Some("client"));
    assert_eq!(only.data_user_id(), Some(7));
}

#[tokio::test]
async fn client_only_wins_over_role_and_user_filters() {
    // The same request carries role + userId + clientOnly; the staff
    // disjunction must not be unioned in.
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification(Some("admin"), Some(7), None),
            notification(Some("all"), None, None),
            notification(Some("client"), None, Some(json!({ "user_id": 7 }))),
        ]),
    };

    let feed = uc
        .execute(ListNotificationsInput {
            role: Some("admin".to_owned()),
            user_id: Some(7),
            client_only: true,
            ..input()
        })
        .await
        .unwrap();

    assert_eq!(feed.count, 1);
    assert_eq!(
        feed.notifications[0].recipient_role.as_deref(),
        Some("client")
    );
}

#[tokio::test]
async fn staff_mode_unions_personal_role_and_broadcast_rows() {
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification(Some("admin"), Some(3), None),
            notification(Some("staff"), None, None),
            notification(Some("all"), None, None),
            notification(Some("admin"), Some(4), None),
            notification(Some("sales"), None, None),
        ]),
    };

    let feed = uc
        .execute(ListNotificationsInput {
            role: Some("staff".to_owned()),
            user_id: Some(3),
            ..input()
        })
        .await
        .unwrap();

    assert_eq!(feed.count, 3);
}

#[tokio::test]
async fn user_only_mode_has_no_role_fallback() {
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification(Some("admin"), Some(3), None),
            notification(Some("all"), None, None),
        ]),
    };

    let feed = uc
        .execute(ListNotificationsInput {
            user_id: Some(3),
            ..input()
        })
        .await
        .unwrap();

    assert_eq!(feed.count, 1);
    assert_eq!(feed.notifications[0].recipient_id, Some(3));
}

#[tokio::test]
async fn feed_is_newest_first_and_respects_limit() {
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification_at(Some("all"), 30),
            notification_at(Some("all"), 10),
            notification_at(Some("all"), 20),
        ]),
    };

    let feed = uc
        .execute(ListNotificationsInput {
            limit: Some(2),
            ..input()
        })
        .await
        .unwrap();

    assert_eq!(feed.count, 2);
    let times = created_times(&feed.notifications);
    assert!(times[0] > times[1], "feed must be newest first");
}

#[tokio::test]
async fn archived_rows_are_hidden_unless_requested_by_status() {
    let mut archived = notification(Some("all"), None, None);
    archived.status = NotificationStatus::Archived;
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![archived, notification(Some("all"), None, None)]),
    };

    let default_feed = uc.execute(input()).await.unwrap();
    assert_eq!(default_feed.count, 1);
    assert_eq!(default_feed.notifications[0].status, NotificationStatus::Unread);

    let archived_feed = uc
        .execute(ListNotificationsInput {
            status: Some("archived".to_owned()),
            ..input()
        })
        .await
        .unwrap();
    assert_eq!(archived_feed.count, 1);
    assert_eq!(
        archived_feed.notifications[0].status,
        NotificationStatus::Archived
    );
}

#[tokio::test]
async fn unread_count_is_a_subcount_of_returned_rows() {
    let mut read = notification(Some("all"), None, None);
    read.status = NotificationStatus::Read;
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::new(vec![
            notification(Some("all"), None, None),
            notification(Some("all"), None, None),
            read,
        ]),
    };

    let feed = uc.execute(input()).await.unwrap();
    assert_eq!(feed.count, 3);
    assert_eq!(feed.unread_count, 2);
}

#[tokio::test]
async fn unknown_status_or_priority_filter_is_a_validation_error() {
    let uc = ListNotificationsUseCase {
        repo: MockNotificationRepo::empty(),
    };

    let result = uc
        .execute(ListNotificationsInput {
            status: Some("seen".to_owned()),
            ..input()
        })
        .await;
    assert!(matches!(
        result,
        Err(domus_notifications::error::NotificationsServiceError::UnknownStatus)
    ));

    let result = uc
        .execute(ListNotificationsInput {
            priority: Some("mega".to_owned()),
            ..input()
        })
        .await;
    assert!(matches!(
        result,
        Err(domus_notifications::error::NotificationsServiceError::UnknownPriority)
    ));
}
