use std::sync::Arc;

use axum::extract::{Extension, Json};

use crate::entities::Notification;
use crate::surface::Notifications;

pub async fn list(Extension(notifications): Extension<Arc<Notifications>>) -> Json<Vec<Notification>> {
    notifications.pending().into()
}

pub async fn acknowledge(
    Extension(notifications): Extension<Arc<Notifications>>,
) -> Json<Vec<Notification>> {
    notifications.acknowledge().into()
}
