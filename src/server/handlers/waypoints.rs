use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::engine::{Command, Engine, Outcome};
use crate::entities::{Actions, AddressPrompt, Waypoint};
use crate::error::{unexpected_error, Error};

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    text: Option<String>,
}

pub async fn prompt() -> Json<AddressPrompt> {
    AddressPrompt::default().into()
}

pub async fn create(
    Extension(engine): Extension<Engine>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Option<Waypoint>>, Error> {
    match engine
        .handle(Command::AddAddress { text: params.text })
        .await?
    {
        Outcome::Waypoint(waypoint) => Ok(waypoint.into()),
        _ => Err(unexpected_error()),
    }
}

pub async fn list(Extension(engine): Extension<Engine>) -> Json<Vec<Waypoint>> {
    engine.waypoints().await.into()
}

pub async fn actions(Extension(engine): Extension<Engine>) -> Json<Actions> {
    engine.actions().await.into()
}
