mod helpers;

use helpers::setup::spawn_app;
use taskpulse_sdk::{
    APIError, CreateReminderInput, CreateTaskInput, DeliveryChannels, ReminderKind,
    ReminderStatus, ReminderTimes, TaskpulseSDK, UpdatePreferencesInput, UpdateTaskInput,
};

// 2025-06-20T10:00:00Z
const DUE: i64 = 1750413600000;
// 2025-06-20T09:00:00Z
const DUE_MINUS_HOUR: i64 = 1750410000000;
// 2025-06-21T10:00:00Z
const NEXT_DAY_DUE: i64 = 1750500000000;
// 2025-06-21T09:00:00Z
const NEXT_DAY_DUE_MINUS_HOUR: i64 = 1750496400000;

fn unexpected_status(res: Result<impl std::fmt::Debug, APIError>) -> u16 {
    match res {
        Err(APIError::UnexpectedStatusCode(status)) => status.as_u16(),
        other => panic!("Expected an unexpected status code, got: {:?}", other),
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_admin_routes_require_api_key() {
    let (app, _) = spawn_app().await;
    let sdk = TaskpulseSDK::new(app.address.clone(), "adm_wrong");
    assert_eq!(
        unexpected_status(sdk.user.create("kari@example.com".into()).await),
        401
    );
}

#[actix_web::main]
#[test]
async fn test_session_routes_require_session_token() {
    let (app, admin) = spawn_app().await;
    assert_eq!(unexpected_status(admin.reminder.list().await), 401);

    let sdk = TaskpulseSDK::with_session_token(app.address.clone(), "not-a-token");
    assert_eq!(unexpected_status(sdk.reminder.list().await), 401);
}

#[actix_web::main]
#[test]
async fn test_task_due_date_creates_reminder() {
    let (app, admin) = spawn_app().await;
    let (user, sdk) = app.create_user(&admin, "kari@example.com").await;

    let task = admin
        .task
        .create(CreateTaskInput {
            owner_id: user.id.clone(),
            title: "Ship release".into(),
            due_date: Some(DUE),
        })
        .await
        .expect("Expected to create task")
        .task;

    let reminders = sdk.reminder.list().await.unwrap().reminders;
    assert_eq!(reminders.len(), 1);
    let reminder = &reminders[0];
    assert_eq!(reminder.remind_at, DUE_MINUS_HOUR);
    assert_eq!(reminder.status, ReminderStatus::Pending);
    assert_eq!(reminder.kind, ReminderKind::TaskDue);
    assert_eq!(reminder.target_id, Some(task.id.clone()));
    assert!(!reminder.is_user_created);

    // Snoozed and then the due date moves
    sdk.reminder.snooze(reminder.id.clone(), 15).await.unwrap();
    admin
        .task
        .update(UpdateTaskInput {
            task_id: task.id.clone(),
            owner_id: user.id.clone(),
            title: task.title.clone(),
            due_date: Some(NEXT_DAY_DUE),
        })
        .await
        .unwrap();

    let reminders = sdk.reminder.list().await.unwrap().reminders;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, reminder.id);
    assert_eq!(reminders[0].remind_at, NEXT_DAY_DUE_MINUS_HOUR);
    assert_eq!(reminders[0].status, ReminderStatus::Pending);
    assert_eq!(reminders[0].snooze_until, None);

    admin.task.delete(task.id.clone()).await.unwrap();
    assert!(sdk.reminder.list().await.unwrap().reminders.is_empty());
    assert_eq!(unexpected_status(admin.task.delete(task.id).await), 404);
}

#[actix_web::main]
#[test]
async fn test_task_reassignment_moves_reminder() {
    let (app, admin) = spawn_app().await;
    let (user_a, sdk_a) = app.create_user(&admin, "a@example.com").await;
    let (user_b, sdk_b) = app.create_user(&admin, "b@example.com").await;

    let task = admin
        .task
        .create(CreateTaskInput {
            owner_id: user_a.id.clone(),
            title: "Ship release".into(),
            due_date: Some(DUE),
        })
        .await
        .unwrap()
        .task;
    admin
        .task
        .update(UpdateTaskInput {
            task_id: task.id.clone(),
            owner_id: user_b.id.clone(),
            title: task.title,
            due_date: task.due_date,
        })
        .await
        .unwrap();

    assert!(sdk_a.reminder.list().await.unwrap().reminders.is_empty());
    let reminders = sdk_b.reminder.list().await.unwrap().reminders;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].owner_id, user_b.id);
}

#[actix_web::main]
#[test]
async fn test_reminder_lifecycle() {
    let (app, admin) = spawn_app().await;
    let (user, sdk) = app.create_user(&admin, "kari@example.com").await;

    let reminder = sdk
        .reminder
        .create(CreateReminderInput {
            kind: Some(ReminderKind::Meeting),
            message: "1:1 with Ola".into(),
            remind_at: DUE,
            delivery_channels: None,
            repeat_interval: Some(60),
            email_override: Some("ola@example.com".into()),
        })
        .await
        .expect("Expected to create reminder")
        .reminder;
    assert!(reminder.is_user_created);
    assert_eq!(reminder.created_by, user.id);
    assert_eq!(reminder.delivery_channels, DeliveryChannels::default());

    let snoozed = sdk.reminder.snooze(reminder.id.clone(), 15).await.unwrap();
    assert_eq!(snoozed.reminder.status, ReminderStatus::Snoozed);
    assert!(snoozed.reminder.snooze_until.is_some());

    let dismissed = sdk.reminder.dismiss(reminder.id.clone()).await.unwrap();
    assert_eq!(dismissed.reminder.status, ReminderStatus::Dismissed);

    // Another user can not see or touch it
    let (_, other) = app.create_user(&admin, "ola@example.com").await;
    assert!(other.reminder.list().await.unwrap().reminders.is_empty());
    assert_eq!(
        unexpected_status(other.reminder.delete(reminder.id.clone()).await),
        404
    );

    sdk.reminder.delete(reminder.id).await.unwrap();
    assert!(sdk.reminder.list().await.unwrap().reminders.is_empty());
}

#[actix_web::main]
#[test]
async fn test_invalid_reminder_is_rejected() {
    let (app, admin) = spawn_app().await;
    let (_, sdk) = app.create_user(&admin, "kari@example.com").await;

    let input = CreateReminderInput {
        kind: None,
        message: "Stand up".into(),
        remind_at: DUE,
        delivery_channels: None,
        repeat_interval: Some(2),
        email_override: None,
    };
    assert_eq!(unexpected_status(sdk.reminder.create(input).await), 400);
}

#[actix_web::main]
#[test]
async fn test_preferences_apply_to_next_sync() {
    let (app, admin) = spawn_app().await;
    let (user, sdk) = app.create_user(&admin, "kari@example.com").await;

    let prefs = sdk.preferences.get().await.unwrap().preferences;
    assert_eq!(prefs.default_reminder_times, ReminderTimes::default());

    let times = ReminderTimes {
        task_due: 0,
        ..Default::default()
    };
    let channels = DeliveryChannels {
        in_app: true,
        email: false,
        push: true,
    };
    sdk.preferences
        .update(UpdatePreferencesInput {
            default_delivery_channels: Some(channels),
            default_reminder_times: Some(times),
        })
        .await
        .unwrap();

    admin
        .task
        .create(CreateTaskInput {
            owner_id: user.id,
            title: "Ship release".into(),
            due_date: Some(DUE),
        })
        .await
        .unwrap();

    let reminders = sdk.reminder.list().await.unwrap().reminders;
    assert_eq!(reminders[0].remind_at, DUE);
    assert_eq!(reminders[0].delivery_channels, channels);
}

#[actix_web::main]
#[test]
async fn test_push_token_hand_off() {
    let (app, admin) = spawn_app().await;
    let (_, sdk) = app.create_user(&admin, "kari@example.com").await;

    let user = sdk
        .user
        .set_push_token(Some("device-token".into()))
        .await
        .unwrap()
        .user;
    assert_eq!(user.push_token, Some("device-token".into()));
    let me = sdk.user.me().await.unwrap().user;
    assert_eq!(me.push_token, Some("device-token".into()));
}
