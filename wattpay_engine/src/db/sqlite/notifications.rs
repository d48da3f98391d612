use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{NewNotification, Notification},
    traits::AccountApiError,
};

pub async fn insert_notification(
    notification: NewNotification,
    conn: &mut SqliteConnection,
) -> Result<Notification, sqlx::Error> {
    let notification: Notification = sqlx::query_as(
        r#"
            INSERT INTO notifications (user_id, type, title, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(notification.user_id)
    .bind(notification.notification_type)
    .bind(notification.title)
    .bind(notification.message)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ {} notification #{} created for {}", notification.notification_type, notification.id, notification.user_id);
    Ok(notification)
}

/// Inserts all the notifications with a single multi-row `INSERT` statement.
pub async fn insert_notifications(
    notifications: Vec<NewNotification>,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, sqlx::Error> {
    if notifications.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO notifications (user_id, type, title, message) ");
    builder.push_values(notifications, |mut row, n| {
        row.push_bind(n.user_id).push_bind(n.notification_type).push_bind(n.title).push_bind(n.message);
    });
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let inserted = builder.build_query_as::<Notification>().fetch_all(conn).await?;
    debug!("🗃️ {} notifications inserted", inserted.len());
    Ok(inserted)
}

pub async fn fetch_notifications_for_user(
    user_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await
}

/// Marks the notification as read, but only if it belongs to `user_id`.
pub async fn mark_notification_read(
    user_id: &str,
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Notification, AccountApiError> {
    let result: Option<Notification> =
        sqlx::query_as("UPDATE notifications SET read = 1 WHERE id = $1 AND user_id = $2 RETURNING *")
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await?;
    result.ok_or(AccountApiError::NotificationNotFound(id))
}
