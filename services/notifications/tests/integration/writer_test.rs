use serde_json::json;

use domus_notifications::domain::types::{
    NotificationStatus, Priority, RecipientTarget,
};
use domus_notifications::error::NotificationsServiceError;
use domus_notifications::usecase::create::{CreateNotificationInput, CreateNotificationUseCase};

use crate::helpers::MockNotificationRepo;

fn minimal() -> CreateNotificationInput {
    CreateNotificationInput {
        title: Some("Test".to_owned()),
        message: Some("Hi".to_owned()),
        icon: None,
        priority: None,
        status: None,
        notification_type: None,
        source_table: None,
        source_table_display_name: None,
        source_record_id: None,
        recipient_role: None,
        recipient_id: RecipientTarget::Absent,
        data: None,
        action_url: None,
    }
}

#[tokio::test]
async fn should_create_with_documented_defaults() {
    let repo = MockNotificationRepo::empty();
    let rows = repo.rows_handle();
    let uc = CreateNotificationUseCase { repo };

    let created = uc.execute(minimal()).await.unwrap();

    assert_eq!(created.priority, Priority::Normal);
    assert_eq!(created.status, NotificationStatus::Unread);
    assert_eq!(created.recipient_role.as_deref(), Some("admin"));
    assert_eq!(created.recipient_id, None);
    assert!(created.read_at.is_none());

    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Test");
    assert_eq!(rows[0].message, "Hi");
}

#[tokio::test]
async fn should_reject_missing_or_blank_title_and_message() {
    let uc = CreateNotificationUseCase {
        repo: MockNotificationRepo::empty(),
    };
    let rows = uc.repo.rows_handle();

    for input in [
        CreateNotificationInput {
            title: None,
            ..minimal()
        },
        CreateNotificationInput {
            message: Some("   ".to_owned()),
            ..minimal()
        },
    ] {
        let result = uc.execute(input).await;
        assert!(matches!(
            result,
            Err(NotificationsServiceError::TitleAndMessageRequired)
        ));
    }

    // Validation failures never touch the store.
    assert!(rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_never_store_a_uuid_shaped_recipient_id() {
    let repo = MockNotificationRepo::empty();
    let rows = repo.rows_handle();
    let uc = CreateNotificationUseCase { repo };

    let created = uc
        .execute(CreateNotificationInput {
            recipient_role: Some("staff".to_owned()),
            recipient_id: RecipientTarget::parse(Some(&json!(
                "3f2a9c1e-5d1b-4a8e-9c3f-27d54c1a90be"
            ))),
            ..minimal()
        })
        .await
        .unwrap();

    assert_eq!(created.recipient_id, None);
    let stored = &rows.lock().unwrap()[0];
    assert_eq!(stored.recipient_id, None);
    assert_eq!(stored.recipient_role.as_deref(), Some("staff"));
}

#[tokio::test]
async fn should_strip_recipient_id_from_client_notifications() {
    let repo = MockNotificationRepo::empty();
    let rows = repo.rows_handle();
    let uc = CreateNotificationUseCase { repo };

    let created = uc
        .execute(CreateNotificationInput {
            recipient_role: Some("client".to_owned()),
            recipient_id: RecipientTarget::parse(Some(&json!(42))),
            data: Some(json!({ "user_id": 42 })),
            ..minimal()
        })
        .await
        .unwrap();

    assert_eq!(created.recipient_id, None);
    assert_eq!(created.recipient_role.as_deref(), Some("client"));

    let stored = &rows.lock().unwrap()[0];
    assert_eq!(stored.recipient_id, None);
    assert_eq!(stored.data_user_id(), Some(42));
}

#[tokio::test]
async fn should_keep_numeric_recipient_id_for_staff_targeting() {
    let uc = CreateNotificationUseCase {
        repo: MockNotificationRepo::empty(),
    };

    let created = uc
        .execute(CreateNotificationInput {
            recipient_role: Some("staff".to_owned()),
            recipient_id: RecipientTarget::parse(Some(&json!("42"))),
            ..minimal()
        })
        .await
        .unwrap();

    assert_eq!(created.recipient_id, Some(42));
}

#[tokio::test]
async fn should_reject_unknown_priority_or_status() {
    let uc = CreateNotificationUseCase {
        repo: MockNotificationRepo::empty(),
    };

    let result = uc
        .execute(CreateNotificationInput {
            priority: Some("asap".to_owned()),
            ..minimal()
        })
        .await;
    assert!(matches!(
        result,
        Err(NotificationsServiceError::UnknownPriority)
    ));

    let result = uc
        .execute(CreateNotificationInput {
            status: Some("seen".to_owned()),
            ..minimal()
        })
        .await;
    assert!(matches!(
        result,
        Err(NotificationsServiceError::UnknownStatus)
    ));
}
