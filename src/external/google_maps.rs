use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    api::{DirectionsProvider, Geocoder},
    config::Config,
    entities::{Coordinates, DirectionsRequest, Place, RouteCandidate},
    error::{invalid_input_error, upstream_error, Error},
    external::polyline,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsRoute {
    legs: Vec<Leg>,
    overview_polyline: EncodedPolyline,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Leg {
    distance: Distance,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Distance {
    value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EncodedPolyline {
    points: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    results: Option<T>,
    routes: Option<T>,
}

impl<T> Response<T> {
    fn is_zero_results(&self) -> bool {
        self.status == "ZERO_RESULTS"
    }
}

/// Geocoding and directions backed by the Google Maps web services.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(format!("https://{}", config.api_base), config.api_key.clone())
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response<T>, Error> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .client
            .get(url)
            .query(&[("key", &self.api_key)])
            .query(query)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response<T> = res.json().await?;

        if !(data.status == "OK" || data.is_zero_results()) {
            tracing::warn!("google maps returned status {}", data.status);
            return Err(upstream_error());
        }

        Ok(data)
    }
}

#[async_trait]
impl Geocoder for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Vec<Place>, Error> {
        let data: Response<Vec<GeocodeResult>> = self
            .get("/maps/api/geocode/json", &[("address", address.to_string())])
            .await?;

        if data.is_zero_results() {
            return Ok(vec![]);
        }

        let results = data.results.ok_or_else(|| upstream_error())?;

        Ok(results
            .into_iter()
            .map(|result| Place {
                formatted_address: result.formatted_address,
                coordinates: result.geometry.location,
            })
            .collect())
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: &DirectionsRequest) -> Result<Vec<RouteCandidate>, Error> {
        let data: Response<Vec<DirectionsRoute>> = self
            .get(
                "/maps/api/directions/json",
                &[
                    ("origin", String::from(request.origin)),
                    ("destination", String::from(request.destination)),
                    ("mode", request.mode.name()),
                    ("alternatives", request.alternatives.to_string()),
                ],
            )
            .await?;

        if data.is_zero_results() {
            return Ok(vec![]);
        }

        let routes = data.routes.ok_or_else(|| upstream_error())?;

        routes
            .into_iter()
            .map(|route| {
                let distance = route.legs.iter().map(|leg| leg.distance.value).sum();
                let polyline = polyline::decode(&route.overview_polyline.points)?;

                Ok(RouteCandidate::new(distance, polyline))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use tokio_test::block_on;

    async fn geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        match params.get("address").map(String::as_str) {
            Some("Alexanderplatz") => Json(json!({
                "status": "OK",
                "results": [{
                    "formatted_address": "Alexanderplatz, 10178 Berlin, Germany",
                    "geometry": { "location": { "lat": 52.5219, "lng": 13.4132 } }
                }]
            })),
            Some("broken") => Json(json!({ "status": "REQUEST_DENIED" })),
            _ => Json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        }
    }

    async fn directions(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(params.get("mode").map(String::as_str), Some("walking"));
        assert_eq!(params.get("alternatives").map(String::as_str), Some("true"));

        if params.get("origin") == params.get("destination") {
            return Json(json!({ "status": "ZERO_RESULTS", "routes": [] }));
        }

        Json(json!({
            "status": "OK",
            "routes": [
                {
                    "legs": [{ "distance": { "value": 500.0 } }, { "distance": { "value": 250.0 } }],
                    "overview_polyline": { "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" }
                },
                {
                    "legs": [{ "distance": { "value": 600.0 } }],
                    "overview_polyline": { "points": "_p~iF~ps|U" }
                }
            ]
        }))
    }

    async fn start_stub() -> GoogleMaps {
        let app = Router::new()
            .route("/maps/api/geocode/json", get(geocode))
            .route("/maps/api/directions/json", get(directions));

        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);

        GoogleMaps::with_base_url(format!("http://{}", addr), "test-key".into())
    }

    #[test]
    fn geocode_returns_candidates() {
        block_on(async {
            let maps = start_stub().await;

            let places = maps.geocode("Alexanderplatz").await.unwrap();
            assert_eq!(places.len(), 1);
            assert_eq!(places[0].coordinates, Coordinates::new(52.5219, 13.4132));
        });
    }

    #[test]
    fn geocode_zero_results_is_empty() {
        block_on(async {
            let maps = start_stub().await;

            assert!(maps.geocode("nowhere at all").await.unwrap().is_empty());
        });
    }

    #[test]
    fn geocode_denied_is_upstream_error() {
        block_on(async {
            let maps = start_stub().await;

            assert_eq!(maps.geocode("broken").await.unwrap_err(), upstream_error());
        });
    }

    #[test]
    fn directions_sum_legs_and_decode_geometry() {
        block_on(async {
            let maps = start_stub().await;
            let request =
                DirectionsRequest::walking(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));

            let routes = maps.directions(&request).await.unwrap();
            assert_eq!(routes.len(), 2);
            assert_eq!(routes[0].distance, 750.0);
            assert_eq!(routes[0].polyline.0.len(), 3);
            assert_eq!(routes[1].distance, 600.0);
        });
    }

    #[test]
    fn directions_zero_results_is_empty() {
        block_on(async {
            let maps = start_stub().await;
            let here = Coordinates::new(1.0, 1.0);

            let routes = maps
                .directions(&DirectionsRequest::walking(here, here))
                .await
                .unwrap();
            assert!(routes.is_empty());
        });
    }
}
