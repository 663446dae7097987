use super::{Engine, RouteComputation};

use serde::{Deserialize, Serialize};

use crate::{
    entities::{Actions, Waypoint},
    error::{invalid_state_error, Error},
};

/// User actions, as delivered by whatever front end drives the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Command {
    AddAddress { text: Option<String> },
    ComputeRoute,
    Reset,
}

#[derive(Debug)]
pub enum Outcome {
    Waypoint(Option<Waypoint>),
    RouteRequested(RouteComputation),
    Reset(Actions),
}

impl Engine {
    /// Runs `command`, refusing compute/reset while those actions are hidden.
    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, command: Command) -> Result<Outcome, Error> {
        match command {
            Command::AddAddress { text } => Ok(Outcome::Waypoint(self.submit_address(text).await?)),
            Command::ComputeRoute => {
                if !self.actions().await.compute_route {
                    return Err(invalid_state_error());
                }

                Ok(Outcome::RouteRequested(self.compute_route().await))
            }
            Command::Reset => {
                if !self.actions().await.reset {
                    return Err(invalid_state_error());
                }

                Ok(Outcome::Reset(self.reset().await))
            }
        }
    }
}

#[test]
fn scenario_three_addresses_then_route() {
    use super::test_support::Harness;
    use tokio_test::block_on;

    block_on(async {
        let h = Harness::new();
        let add = |text: &str| Command::AddAddress {
            text: Some(text.into()),
        };

        h.engine.handle(add("A")).await.unwrap();
        h.engine.handle(add("B")).await.unwrap();
        assert_eq!(
            h.engine.handle(Command::ComputeRoute).await.unwrap_err(),
            invalid_state_error()
        );

        h.engine.handle(add("C")).await.unwrap();
        let computation = match h.engine.handle(Command::ComputeRoute).await.unwrap() {
            Outcome::RouteRequested(computation) => computation,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(computation.requests(), 2);
        computation.join().await;

        let labels: Vec<(String, String)> = h
            .directions
            .requests()
            .iter()
            .map(|r| (String::from(r.origin), String::from(r.destination)))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("0,0".to_string(), "0,1".to_string()),
                ("0,1".to_string(), "1,1".to_string())
            ]
        );

        match h.engine.handle(Command::Reset).await.unwrap() {
            Outcome::Reset(actions) => assert!(!actions.compute_route && !actions.reset),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(
            h.engine.handle(Command::Reset).await.unwrap_err(),
            invalid_state_error()
        );
    });
}

#[test]
fn command_deserializes_from_tagged_json() {
    let command: Command =
        serde_json::from_str(r#"{ "name": "add_address", "text": "Main St" }"#).unwrap();
    assert!(matches!(command, Command::AddAddress { text: Some(ref t) } if t == "Main St"));

    let command: Command = serde_json::from_str(r#"{ "name": "compute_route" }"#).unwrap();
    assert!(matches!(command, Command::ComputeRoute));
}
