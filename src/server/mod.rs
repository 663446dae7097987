mod handlers;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{unexpected_error, Error};
use crate::external::GoogleMaps;
use crate::server::handlers::{map, notifications, route, waypoints};
use crate::surface::{MapState, Notifications};

pub fn router(engine: Engine, map: Arc<MapState>, notifications: Arc<Notifications>) -> Router {
    Router::new()
        .route("/prompt", get(waypoints::prompt))
        .route("/waypoints", get(waypoints::list).post(waypoints::create))
        .route("/actions", get(waypoints::actions))
        .route("/route", post(route::compute))
        .route("/reset", post(route::reset))
        .route("/map", get(map::find))
        .route(
            "/notifications",
            get(notifications::list).delete(notifications::acknowledge),
        )
        .layer(Extension(engine))
        .layer(Extension(map))
        .layer(Extension(notifications))
}

pub async fn serve(config: Config) -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let maps = Arc::new(GoogleMaps::new(&config));
    let map = Arc::new(MapState::new());
    let notifications = Arc::new(Notifications::new());

    let engine = Engine::new(maps.clone(), maps, map.clone(), notifications.clone());
    let app = router(engine, map, notifications);

    tracing::info!("listening on {}", config.addr);

    axum::Server::bind(&config.addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}

#[test]
fn command_surface_walkthrough() {
    use crate::engine::test_support::Harness;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        let app = router(h.engine.clone(), h.map.clone(), h.notifications.clone());

        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let base = format!("http://{}", server.local_addr());
        tokio::spawn(server);

        let client = reqwest::Client::new();
        let add = |text: &'static str| {
            client
                .post(format!("{}/waypoints", base))
                .json(&json!({ "text": text }))
                .send()
        };

        let prompt: Value = client
            .get(format!("{}/prompt", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(prompt["title"], "Route");

        add("A").await.unwrap();
        add("B").await.unwrap();

        let res = client.post(format!("{}/route", base)).send().await.unwrap();
        assert_eq!(res.status().as_u16(), 400);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["code"], 100);

        let blank: Value = add("").await.unwrap().json().await.unwrap();
        assert!(blank.is_null());

        let res = add("nowhere").await.unwrap();
        assert_eq!(res.status().as_u16(), 400);

        add("C").await.unwrap();
        let actions: Value = client
            .get(format!("{}/actions", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(actions["compute_route"], true);

        let computed: Value = client
            .post(format!("{}/route", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(computed["requests"], 2);

        let mut overlays = 0;
        for _ in 0..50 {
            overlays = h.map.snapshot().overlays.len();
            if overlays == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(overlays, 2);

        let dismissed: Value = client
            .delete(format!("{}/notifications", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(dismissed.as_array().map(Vec::len), Some(1));
        assert!(h.notifications.pending().is_empty());

        let actions: Value = client
            .post(format!("{}/reset", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(actions["reset"], false);

        let map: Value = client
            .get(format!("{}/map", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(map["overlays"].as_array().map(Vec::len), Some(0));
        assert_eq!(map["annotations"].as_array().map(Vec::len), Some(0));
    });
}
