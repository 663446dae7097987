use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::engine::{Command, Engine, Outcome};
use crate::entities::Actions;
use crate::error::{unexpected_error, Error};

#[derive(Serialize, Deserialize)]
pub struct ComputeResponse {
    requests: usize,
}

/// Segments are drawn on the map as they arrive; poll `/map` for them.
pub async fn compute(Extension(engine): Extension<Engine>) -> Result<Json<ComputeResponse>, Error> {
    match engine.handle(Command::ComputeRoute).await? {
        Outcome::RouteRequested(computation) => Ok(ComputeResponse {
            requests: computation.requests(),
        }
        .into()),
        _ => Err(unexpected_error()),
    }
}

pub async fn reset(Extension(engine): Extension<Engine>) -> Result<Json<Actions>, Error> {
    match engine.handle(Command::Reset).await? {
        Outcome::Reset(actions) => Ok(actions.into()),
        _ => Err(unexpected_error()),
    }
}
