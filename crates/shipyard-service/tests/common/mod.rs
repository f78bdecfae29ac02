#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use shipyard_lib::{Ship, ShipId};
use shipyard_service_shared::test_utils::{prod_millis, test_state};

/// Server over a fresh copy of the fixture fleet.
pub fn server() -> TestServer {
    TestServer::new(shipyard_service::router(test_state(), "/metrics"))
        .expect("failed to build test server")
}

pub fn ids(ships: &[Ship]) -> Vec<ShipId> {
    ships.iter().map(|ship| ship.id).collect()
}

/// A create body that passes validation.
pub fn valid_create_body() -> Value {
    json!({
        "name": "Kestrel",
        "planet": "Titan",
        "shipType": "TRANSPORT",
        "prodDate": prod_millis(3019),
        "speed": 0.987,
        "crewSize": 4
    })
}
