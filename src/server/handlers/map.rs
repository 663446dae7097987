use std::sync::Arc;

use axum::extract::{Extension, Json};

use crate::surface::{MapSnapshot, MapState};

pub async fn find(Extension(map): Extension<Arc<MapState>>) -> Json<MapSnapshot> {
    map.snapshot().into()
}
