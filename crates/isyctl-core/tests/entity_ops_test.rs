#![allow(clippy::unwrap_used)]
// Integration tests for entity operations and discovery against a mock controller.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use isyctl_core::{
    ConnectionDescriptor, Controller, CoreError, EntityKind, Level, PowerState, SeedRecord,
    TlsVerification,
};

const HALL: &str = "/rest/nodes/12%20AB%203%201";
const HALL_STATUS: &str = "/rest/status/12%20AB%203%201";

const OK_ACK: &str = r#"<RestResponse succeeded="true"><status>200</status></RestResponse>"#;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let mut descriptor = ConnectionDescriptor::new(
        Url::parse(&server.uri()).unwrap(),
        "admin",
        SecretString::from("admin".to_string()),
    );
    descriptor.tls = TlsVerification::SystemDefaults;
    descriptor.timeout = Duration::from_secs(5);

    let controller = Controller::new(
        &descriptor,
        &[
            SeedRecord::new("hall light", "12 AB 3 1", true),
            SeedRecord::new("porch fan", "22 CD 4 1", false),
            SeedRecord::new("evening scene", "20109", true),
        ],
    )
    .unwrap();
    (server, controller)
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/xml")
}

fn status(formatted: &str, uom: &str) -> ResponseTemplate {
    xml(&format!(
        r#"<properties><property id="ST" value="0" formatted="{formatted}" uom="{uom}"/></properties>"#
    ))
}

/// Fails the test on drop if any request reaches the controller.
async fn forbid_requests(server: &MockServer) {
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_on_level_scales_to_native() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{HALL}/cmd/DON/128")))
        .respond_with(xml(OK_ACK))
        .expect(1)
        .mount(&server)
        .await;

    let hall = controller.resolve("Hall Light").unwrap();
    hall.set_on_level(50).await.unwrap();
}

#[tokio::test]
async fn test_set_on_level_out_of_range_sends_nothing() {
    let (server, controller) = setup().await;
    forbid_requests(&server).await;

    let hall = controller.resolve("hall").unwrap();
    for bad in [101, -1] {
        let err = hall.set_on_level(bad).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }), "{bad}: {err:?}");
    }
}

#[tokio::test]
async fn test_on_off_fast_and_steps() {
    let (server, controller) = setup().await;

    for code in ["DON", "DOF", "DFON", "DFOF", "BRT", "DIM"] {
        Mock::given(method("GET"))
            .and(path(format!("{HALL}/cmd/{code}")))
            .respond_with(xml(OK_ACK))
            .expect(1)
            .mount(&server)
            .await;
    }

    let hall = controller.resolve("hall light").unwrap();
    hall.turn_on().await.unwrap();
    hall.turn_off().await.unwrap();
    hall.turn_fast_on().await.unwrap();
    hall.turn_fast_off().await.unwrap();
    hall.brighten().await.unwrap();
    hall.dim().await.unwrap();
}

#[tokio::test]
async fn test_empty_command_response_is_success() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/nodes/20109/cmd/DON"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let scene = controller.resolve("evening").unwrap();
    assert_eq!(scene.kind(), EntityKind::Scene);
    scene.turn_on().await.unwrap();
}

#[tokio::test]
async fn test_dimming_rejected_for_non_dimmable() {
    let (server, controller) = setup().await;
    forbid_requests(&server).await;

    let fan = controller.resolve("porch fan").unwrap();
    assert!(matches!(fan.dim().await, Err(CoreError::NotApplicable { .. })));
    assert!(matches!(fan.set_on_level(40).await, Err(CoreError::NotApplicable { .. })));

    let scene = controller.resolve("evening scene").unwrap();
    assert!(!scene.is_dimmable());
    assert!(matches!(scene.brighten().await, Err(CoreError::NotApplicable { .. })));
    assert!(matches!(scene.set_on_level(40).await, Err(CoreError::NotApplicable { .. })));
}

#[tokio::test]
async fn test_command_http_error_is_transport() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{HALL}/cmd/DON")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = controller.resolve("hall").unwrap().turn_on().await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_on_level_interprets_status() {
    let (server, controller) = setup().await;
    let hall = controller.resolve("hall").unwrap();

    Mock::given(method("GET"))
        .and(path(HALL_STATUS))
        .respond_with(status("On", "%/on/off"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert_eq!(hall.on_level().await.unwrap(), Level::FULL);

    Mock::given(method("GET"))
        .and(path(HALL_STATUS))
        .respond_with(status("37", "%/on/off"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert_eq!(hall.on_level().await.unwrap().percent(), 37);

    Mock::given(method("GET"))
        .and(path(HALL_STATUS))
        .respond_with(status("Off", "%/on/off"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    assert_eq!(hall.on_level().await.unwrap(), Level::OFF);
}

#[tokio::test]
async fn test_unparseable_status() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(HALL_STATUS))
        .respond_with(status("Unknown", ""))
        .mount(&server)
        .await;

    let hall = controller.resolve("hall").unwrap();
    assert!(matches!(
        hall.on_level().await,
        Err(CoreError::UnparseableStatus { .. })
    ));
    assert_eq!(
        hall.power_state().await.unwrap(),
        PowerState::Other("Unknown".into())
    );
}

#[tokio::test]
async fn test_power_state_from_percentage() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path(HALL_STATUS))
        .respond_with(status("42%", "%/on/off"))
        .mount(&server)
        .await;

    let hall = controller.resolve("hall").unwrap();
    assert_eq!(hall.power_state().await.unwrap(), PowerState::On);
    assert_eq!(hall.raw_status().await.unwrap(), "42%");
}

#[tokio::test]
async fn test_scene_status_is_not_applicable() {
    let (server, controller) = setup().await;
    forbid_requests(&server).await;

    let scene = controller.resolve("evening").unwrap();
    assert!(matches!(scene.raw_status().await, Err(CoreError::NotApplicable { .. })));
    assert!(matches!(scene.on_level().await, Err(CoreError::NotApplicable { .. })));
    assert!(matches!(scene.power_state().await, Err(CoreError::NotApplicable { .. })));
    assert!(matches!(scene.probe_dimmable().await, Err(CoreError::NotApplicable { .. })));
}

#[tokio::test]
async fn test_probe_dimmable_reads_uom() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/status/22%20CD%204%201"))
        .respond_with(status("Off", "%/on/off"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(HALL_STATUS))
        .respond_with(status("Off", "on/off"))
        .mount(&server)
        .await;

    // Live probe is independent of the registered flag.
    assert!(controller.resolve("porch").unwrap().probe_dimmable().await.unwrap());
    assert!(!controller.resolve("hall").unwrap().probe_dimmable().await.unwrap());
}

// ── Registry & discovery ────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_not_found() {
    let (_server, controller) = setup().await;
    let err = controller.resolve("garage door").unwrap_err();
    assert!(matches!(err, CoreError::NotFound { ref name } if name == "garage door"));
}

#[tokio::test]
async fn test_discover_registers_controllable_entities() {
    let server = MockServer::start().await;
    let descriptor = ConnectionDescriptor::new(
        Url::parse(&server.uri()).unwrap(),
        "admin",
        SecretString::from("admin".to_string()),
    );
    let controller = Controller::new(&descriptor, &[]).unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/nodes"))
        .respond_with(xml(
            r#"<nodes>
  <node flag="128"><address>12 AB</address><name>Kitchen Light</name><type>1.0</type><enabled>true</enabled></node>
  <node flag="128"><address>12 AC</address><name>Garage</name><type>2.0</type><enabled>false</enabled></node>
  <group flag="132"><address>20109</address><name>Evening Scene</name></group>
</nodes>"#,
        ))
        .expect(2)
        .mount(&server)
        .await;

    let report = controller.discover().await.unwrap();
    let added: Vec<_> = report
        .added
        .iter()
        .map(|r| (r.pattern.as_str(), r.address.as_str(), r.dimmable))
        .collect();
    assert_eq!(
        added,
        [
            ("kitchen light", "12%20AB", true),
            ("evening scene", "20109", false),
        ]
    );
    assert_eq!(report.skipped, 1);

    // A second run adds nothing and keeps addresses unique.
    let again = controller.discover().await.unwrap();
    assert!(again.added.is_empty());
    assert_eq!(controller.registry().len(), 2);

    let kitchen = controller.resolve("Kitchen").unwrap();
    assert_eq!(kitchen.kind(), EntityKind::DimmableDevice);
}
