mod support;

use std::time::{Duration, Instant};

use sonarscope::classifier::{PredictClient, SonarClass};
use sonarscope::egui_app::controller::PredictionController;
use sonarscope::egui_app::state::RequestState;
use sonarscope::features;
use support::http_stub::{StubServer, request_body};

fn sixty_values() -> String {
    (0..features::FEATURE_COUNT)
        .map(|i| format!("{:.4}", 0.1 + i as f64 * 0.001))
        .collect::<Vec<_>>()
        .join(", ")
}

fn controller_for(stub: &StubServer) -> PredictionController {
    PredictionController::new(PredictClient::new(stub.url.clone()))
}

/// Drive the controller's poll loop until the in-flight request settles.
fn wait_for_settle(controller: &mut PredictionController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.poll_background_jobs();
        if controller.ui.form.request != RequestState::Pending {
            return;
        }
        assert!(Instant::now() < deadline, "request never settled");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn valid_sample_is_classified_and_rendered() {
    let stub = StubServer::serve_once("200 OK", r#"{"prediction":"Mine","confidence":87.5}"#);
    let mut controller = controller_for(&stub);
    controller.update_input(sixty_values());

    controller.submit();
    assert_eq!(controller.ui.form.request, RequestState::Pending);
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.request, RequestState::Succeeded);
    assert!(controller.ui.form.error.is_none());
    let view = controller.ui.form.result.as_ref().expect("result stored");
    assert_eq!(view.class, SonarClass::Mine);
    assert_eq!(view.headline, "MINE");
    assert_eq!(view.confidence_text, "87.50");
}

#[test]
fn request_carries_sixty_features_in_input_order() {
    let stub = StubServer::serve_once("200 OK", r#"{"prediction":"Rock","confidence":55.0}"#);
    let mut controller = controller_for(&stub);
    controller.update_input(sixty_values());
    controller.submit();
    wait_for_settle(&mut controller);

    let raw = stub.take_request();
    assert!(raw.starts_with("POST / HTTP/1.1"), "unexpected request line: {raw}");
    assert!(
        raw.to_ascii_lowercase().contains("content-type: application/json"),
        "missing json content type"
    );

    let body: serde_json::Value = serde_json::from_str(request_body(&raw)).expect("json body");
    let sent = body["features"].as_array().expect("features array");
    assert_eq!(sent.len(), features::FEATURE_COUNT);
    assert_eq!(sent[0].as_f64().unwrap(), 0.1);
    assert_eq!(sent[59].as_f64().unwrap(), 0.159);
}

#[test]
fn fifty_nine_values_never_reach_the_network() {
    let stub = StubServer::serve_once("200 OK", r#"{"prediction":"Mine","confidence":87.5}"#);
    let mut controller = controller_for(&stub);
    let truncated = sixty_values()
        .split(", ")
        .take(59)
        .collect::<Vec<_>>()
        .join(", ");
    controller.update_input(truncated);

    controller.submit();

    assert_eq!(
        controller.ui.form.error.as_deref(),
        Some("Please provide exactly 60 valid numeric values separated by commas.")
    );
    assert_eq!(controller.ui.form.request, RequestState::Idle);
    stub.assert_no_request();
}

#[test]
fn server_error_detail_is_shown_verbatim() {
    let stub = StubServer::serve_once(
        "500 Internal Server Error",
        r#"{"detail":"model unavailable"}"#,
    );
    let mut controller = controller_for(&stub);
    controller.update_input(sixty_values());
    controller.submit();
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.request, RequestState::Failed);
    assert_eq!(
        controller.ui.form.error.as_deref(),
        Some("Error: model unavailable")
    );
    assert!(controller.ui.form.result.is_none());
}

#[test]
fn server_error_without_body_synthesizes_status_code() {
    let stub = StubServer::serve_once("500 Internal Server Error", "");
    let mut controller = controller_for(&stub);
    controller.update_input(sixty_values());
    controller.submit();
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.request, RequestState::Failed);
    assert_eq!(
        controller.ui.form.error.as_deref(),
        Some("Error: API error: 500")
    );
}

#[test]
fn transport_failure_is_prefixed_and_recoverable() {
    // Nothing listens on this port; the connection is refused outright.
    let mut controller = PredictionController::new(PredictClient::new("http://127.0.0.1:9"));
    controller.update_input(sixty_values());
    controller.submit();
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.request, RequestState::Failed);
    let error = controller.ui.form.error.as_deref().expect("error set");
    assert!(error.starts_with("Error: "), "missing prefix: {error}");

    // The form stays usable: a later valid submit re-enters Pending directly.
    let stub = StubServer::serve_once("200 OK", r#"{"prediction":"Rock","confidence":60.0}"#);
    let mut controller = controller_for(&stub);
    controller.update_input(sixty_values());
    controller.submit();
    wait_for_settle(&mut controller);
    assert_eq!(controller.ui.form.request, RequestState::Succeeded);
}

#[test]
fn malformed_success_body_is_reported_as_error() {
    let stub = StubServer::serve_once("200 OK", r#"{"confidence":87.5}"#);
    let mut controller = controller_for(&stub);
    controller.update_input(sixty_values());
    controller.submit();
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.request, RequestState::Failed);
    let error = controller.ui.form.error.as_deref().expect("error set");
    assert!(error.starts_with("Error: "), "missing prefix: {error}");
}

#[test]
fn generated_sample_submits_cleanly() {
    let stub = StubServer::serve_once("200 OK", r#"{"prediction":"Rock","confidence":72.25}"#);
    let mut controller = controller_for(&stub);
    controller.generate_random_sample();
    assert!(controller.can_submit());

    controller.submit();
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.request, RequestState::Succeeded);
    let view = controller.ui.form.result.as_ref().expect("result stored");
    assert_eq!(view.headline, "ROCK");
    assert_eq!(view.confidence_text, "72.25");
}
