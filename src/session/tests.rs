//! Tests for the session handshake and lifecycle
//!
//! Everything runs against `MockTransport` and `RecordingLogConfigurator`.

use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;

use crate::capabilities::CapabilitySpec;
use crate::connection::{ConnectionInfo, DirectConnect, Protocol};
use crate::environment::EnvironmentOverrides;
use crate::error::{InvocationFailure, TransportError};
use crate::logging::{
    JournalEntry, JournalLayer, LogConfigurator, LogJournal, LogLevel, RecordingLogConfigurator,
};
use crate::protocol::CommandRegistry;
use crate::session::{AttachOptions, NewSessionOptions, WebDriverClient};
use crate::transport::{HttpMethod, MockTransport, Transport};
use crate::Error;

/// Helper function to create a client over a mock transport
fn create_test_client(
    transport: &Arc<MockTransport>,
    logging: RecordingLogConfigurator,
) -> (WebDriverClient, Arc<RecordingLogConfigurator>) {
    let logging = Arc::new(logging);
    let client = WebDriverClient::new(
        transport.clone() as Arc<dyn Transport>,
        CommandRegistry::standard(),
        logging.clone(),
    );
    (client, logging)
}

fn firefox() -> CapabilitySpec {
    CapabilitySpec::from_value(json!({ "browserName": "firefox" })).unwrap()
}

fn chrome_w3c_response(session_id: &str) -> crate::transport::TransportResponse {
    MockTransport::w3c_session(
        session_id,
        json!({ "browserName": "chrome", "platformName": "linux", "goog:chromeOptions": {} }),
    )
}

#[tokio::test]
async fn test_new_session_request_body() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        HttpMethod::Post,
        "/session",
        MockTransport::w3c_session("ff-1", json!({ "browserName": "firefox" })),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .new_session(NewSessionOptions::new(firefox()))
        .await
        .expect("Failed to create session");

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "http://localhost:4444/session");
    assert_eq!(
        request.body,
        Some(json!({
            "desiredCapabilities": { "browserName": "firefox" },
            "capabilities": {
                "alwaysMatch": { "browserName": "firefox" },
                "firstMatch": [{}]
            }
        }))
    );

    assert_eq!(session.session_id(), "ff-1");
    assert!(session.environment().is_w3c);
    assert!(session.environment().is_firefox);
    assert!(session.supports("getMozContext"));
    assert_eq!(session.requested_capabilities(), &firefox());
}

#[tokio::test]
async fn test_legacy_handshake() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        HttpMethod::Post,
        "/session",
        MockTransport::legacy_session(
            "legacy-1",
            json!({ "browserName": "internet explorer", "platform": "WINDOWS" }),
        ),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .new_session(NewSessionOptions::new(CapabilitySpec::default()))
        .await
        .expect("Failed to create session");

    assert!(!session.environment().is_w3c);
    assert_eq!(session.capabilities()["browserName"], "internet explorer");
    assert!(session.supports("getElementSize"));
    assert!(!session.supports("getElementRect"));
}

#[tokio::test]
async fn test_negotiation_error_sends_nothing() {
    let transport = Arc::new(MockTransport::new());
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let spec = CapabilitySpec::Structured {
        always_match: Default::default(),
        first_match: vec![],
    };
    let result = client.new_session(NewSessionOptions::new(spec)).await;

    assert!(matches!(result, Err(Error::Negotiation(_))));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_handshake_transport_error() {
    let transport = Arc::new(MockTransport::new());
    transport.fail(
        HttpMethod::Post,
        "/session",
        TransportError::Connect("connection refused".to_string()),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let result = client.new_session(NewSessionOptions::new(firefox())).await;
    assert!(matches!(
        result,
        Err(Error::HandshakeTransport(TransportError::Connect(_)))
    ));
}

#[tokio::test]
async fn test_handshake_protocol_error_carries_payload() {
    let transport = Arc::new(MockTransport::new());
    let response = MockTransport::error(500, "session not created", "No matching capabilities found");
    let payload = response.body.clone();
    transport.on(HttpMethod::Post, "/session", response);
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let err = client
        .new_session(NewSessionOptions::new(firefox()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HandshakeProtocol { .. }));
    assert_eq!(err.payload(), Some(&payload));
}

#[tokio::test]
async fn test_handshake_without_session_id() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        HttpMethod::Post,
        "/session",
        MockTransport::value(json!({ "capabilities": { "browserName": "chrome" } })),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let result = client.new_session(NewSessionOptions::new(firefox())).await;
    assert!(matches!(result, Err(Error::HandshakeProtocol { .. })));
}

#[tokio::test]
async fn test_direct_connect_targets_next_command() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        HttpMethod::Post,
        "/session",
        MockTransport::w3c_session(
            "node-1",
            json!({
                "platformName": "iOS",
                "directConnectProtocol": "https",
                "directConnectHost": "node-7.example.com",
                "directConnectPort": 8443,
                "directConnectPath": "/wd/hub"
            }),
        ),
    );
    transport.on(
        HttpMethod::Get,
        "/session/node-1/title",
        MockTransport::value(json!("Home")),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .new_session(NewSessionOptions::new(CapabilitySpec::default()))
        .await
        .expect("Failed to create session");

    assert_eq!(
        session.connection(),
        ConnectionInfo::new(Protocol::Https, "node-7.example.com", 8443, "/wd/hub")
    );

    session.call("getTitle", &[]).await.expect("Failed to get title");
    assert_eq!(
        transport.last_request().unwrap().url,
        "https://node-7.example.com:8443/wd/hub/session/node-1/title"
    );
}

#[tokio::test]
async fn test_caller_direct_connect_is_initial_target() {
    let transport = Arc::new(MockTransport::new());
    transport.on(HttpMethod::Post, "/session", chrome_w3c_response("dc-1"));
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let options = NewSessionOptions::new(firefox()).with_direct_connect(DirectConnect {
        hostname: Some("direct.example.com".to_string()),
        port: Some(4723),
        ..Default::default()
    });
    let session = client.new_session(options).await.expect("Failed to create session");

    assert_eq!(
        transport.requests()[0].url,
        "http://direct.example.com:4723/session"
    );
    assert_eq!(session.connection().hostname, "direct.example.com");
}

#[tokio::test]
async fn test_output_path_configured_before_first_log() {
    let journal = LogJournal::new();
    let transport = Arc::new(MockTransport::new());
    transport.on(HttpMethod::Post, "/session", chrome_w3c_response("log-1"));
    let (client, _) = create_test_client(
        &transport,
        RecordingLogConfigurator::new().with_journal(journal.clone()),
    );

    let subscriber = tracing_subscriber::registry().with(JournalLayer::new(journal.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    client
        .new_session(
            NewSessionOptions::new(firefox())
                .with_output_dir("/tmp/wd-out")
                .with_log_level(LogLevel::Debug),
        )
        .await
        .expect("Failed to create session");

    let entries = journal.entries();
    match &entries[0] {
        JournalEntry::Configured(settings) => {
            assert_eq!(settings.output_path, Some(PathBuf::from("/tmp/wd-out")));
            assert_eq!(settings.level, Some(LogLevel::Debug));
        }
        other => panic!("expected configuration first, got {:?}", other),
    }
    assert!(!journal.messages().is_empty());
}

#[tokio::test]
async fn test_prior_output_path_wins() {
    let transport = Arc::new(MockTransport::new());
    transport.on(HttpMethod::Post, "/session", chrome_w3c_response("log-2"));
    let (client, logging) = create_test_client(
        &transport,
        RecordingLogConfigurator::with_output_path("/var/log/prior"),
    );

    client
        .new_session(NewSessionOptions::new(firefox()).with_output_dir("/tmp/ignored"))
        .await
        .expect("Failed to create session");

    let configured = logging.journal().configured();
    assert_eq!(configured.len(), 1);
    assert_eq!(configured[0].output_path, Some(PathBuf::from("/var/log/prior")));
    assert_eq!(logging.output_path(), Some(PathBuf::from("/var/log/prior")));
}

#[tokio::test]
async fn test_logger_overrides_are_forwarded() {
    let transport = Arc::new(MockTransport::new());
    transport.on(HttpMethod::Post, "/session", chrome_w3c_response("log-3"));
    let (client, logging) = create_test_client(&transport, RecordingLogConfigurator::new());

    client
        .new_session(
            NewSessionOptions::new(firefox())
                .with_log_level(LogLevel::Warn)
                .with_logger_level("webdriver_session::commands", LogLevel::Silent),
        )
        .await
        .expect("Failed to create session");

    let settings = &logging.journal().configured()[0];
    assert_eq!(
        settings.directives(),
        "warn,webdriver_session::commands=off"
    );
}

#[tokio::test]
async fn test_attach_without_session_id_makes_no_call() {
    let transport = Arc::new(MockTransport::new());
    let (client, logging) = create_test_client(&transport, RecordingLogConfigurator::new());

    let result = client.attach_to_session(AttachOptions::default());
    assert!(matches!(result, Err(Error::AttachValidation(_))));

    let result = client.attach_to_session(AttachOptions {
        session_id: Some(String::new()),
        ..Default::default()
    });
    assert!(matches!(result, Err(Error::AttachValidation(_))));

    assert_eq!(transport.request_count(), 0);
    assert!(logging.journal().entries().is_empty());
}

#[tokio::test]
async fn test_attach_legacy_sauce() {
    let transport = Arc::new(MockTransport::new());
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .attach_to_session(AttachOptions::new("sauce-1").with_environment(EnvironmentOverrides {
            is_w3c: Some(false),
            is_sauce: Some(true),
            ..Default::default()
        }))
        .expect("Failed to attach");

    assert!(session.supports("getElementSize"));
    assert!(session.supports("getPageLogs"));
    assert!(!session.supports("getElementRect"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_attach_chrome_mobile() {
    let transport = Arc::new(MockTransport::new());
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .attach_to_session(AttachOptions::new("cm-1").with_environment(EnvironmentOverrides {
            is_chrome: Some(true),
            is_mobile: Some(true),
            ..Default::default()
        }))
        .expect("Failed to attach");

    let environment = session.environment();
    assert!(environment.is_w3c);
    assert!(!environment.is_android);
    assert!(session.supports("isLoading"));
    assert!(session.supports("getContext"));
}

#[tokio::test]
async fn test_unsupported_command_is_local() {
    let transport = Arc::new(MockTransport::new());
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());
    let session = client
        .attach_to_session(AttachOptions::new("w3c-1"))
        .expect("Failed to attach");

    let err = session.call("getElementSize", &[json!("e1")]).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedCommand { ref command } if command == "getElementSize"));
    assert!(err.is_local());
    assert!(session.command("takeHeapSnapshot").is_err());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_command_error_envelope() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        HttpMethod::Post,
        "/session/w3c-2/element",
        MockTransport::error(404, "no such element", "Unable to locate element: #missing"),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());
    let session = client
        .attach_to_session(AttachOptions::new("w3c-2"))
        .expect("Failed to attach");

    let err = session
        .call("findElement", &[json!("css selector"), json!("#missing")])
        .await
        .unwrap_err();

    match &err {
        Error::CommandInvocation {
            command,
            source: InvocationFailure::Remote { error, .. },
        } => {
            assert_eq!(command, "findElement");
            assert_eq!(error, "no such element");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(err.payload().is_some());
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({ "using": "css selector", "value": "#missing" }))
    );
}

#[tokio::test]
async fn test_reload_replaces_state_in_place() {
    let transport = Arc::new(MockTransport::new());
    transport
        .on(HttpMethod::Post, "/session", chrome_w3c_response("first"))
        .on(
            HttpMethod::Post,
            "/session",
            MockTransport::legacy_session("second", json!({ "browserName": "firefox" })),
        );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .new_session(NewSessionOptions::new(firefox()))
        .await
        .expect("Failed to create session");
    let held = session.clone();
    let title = session.command("getTitle").expect("Failed to get command");
    assert!(session.supports("isLoading"));

    let reloaded = session.reload().await.expect("Failed to reload");

    assert!(reloaded.same_session(&held));
    assert_eq!(held.session_id(), "second");
    assert!(!held.environment().is_w3c);
    assert!(!held.supports("isLoading"));
    assert!(held.supports("getElementSize"));

    // the reload replayed the original request
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);

    title.call(&[]).await.expect("Failed to call getTitle");
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://localhost:4444/session/second/title"
    );
}

#[tokio::test]
async fn test_failed_reload_keeps_state() {
    let transport = Arc::new(MockTransport::new());
    transport
        .on(HttpMethod::Post, "/session", chrome_w3c_response("stable"))
        .fail(
            HttpMethod::Post,
            "/session",
            TransportError::Timeout("deadline elapsed".to_string()),
        );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .new_session(NewSessionOptions::new(firefox()))
        .await
        .expect("Failed to create session");

    let result = session.reload().await;

    assert!(matches!(result, Err(Error::HandshakeTransport(_))));
    assert_eq!(session.session_id(), "stable");
    assert!(session.environment().is_chrome);
    assert!(session.supports("isLoading"));
}

#[tokio::test]
async fn test_handle_dropped_from_table_after_reload() {
    let transport = Arc::new(MockTransport::new());
    transport
        .on(HttpMethod::Post, "/session", chrome_w3c_response("chrome-1"))
        .on(
            HttpMethod::Post,
            "/session",
            MockTransport::w3c_session("ff-2", json!({ "browserName": "firefox" })),
        );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .new_session(NewSessionOptions::new(firefox()))
        .await
        .expect("Failed to create session");
    let is_loading = session.command("isLoading").expect("Failed to get command");

    session.reload().await.expect("Failed to reload");
    let before = transport.request_count();

    let err = is_loading.call(&[]).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedCommand { .. }));
    assert_eq!(transport.request_count(), before);
}

#[tokio::test]
async fn test_reload_attached_session() {
    let transport = Arc::new(MockTransport::new());
    transport.on(HttpMethod::Post, "/session", chrome_w3c_response("fresh"));
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let session = client
        .attach_to_session(
            AttachOptions::new("stale").with_capabilities(
                json!({ "browserName": "chrome" }).as_object().cloned().unwrap(),
            ),
        )
        .expect("Failed to attach");

    session.reload().await.expect("Failed to reload");

    assert_eq!(session.session_id(), "fresh");
    assert_eq!(
        transport.last_request().unwrap().body.unwrap()["desiredCapabilities"],
        json!({ "browserName": "chrome" })
    );
}

#[tokio::test]
async fn test_concurrent_commands() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        HttpMethod::Get,
        "/title",
        MockTransport::value(json!("Example Domain")),
    );
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());
    let session = client
        .attach_to_session(AttachOptions::new("many"))
        .expect("Failed to attach");

    let calls = (0..5).map(|_| session.call("getTitle", &[]));
    let results: Vec<Value> = futures::future::try_join_all(calls)
        .await
        .expect("Concurrent calls failed");

    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|title| title == "Example Domain"));
    assert_eq!(transport.request_count(), 5);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let transport = Arc::new(MockTransport::new());
    let (client, _) = create_test_client(&transport, RecordingLogConfigurator::new());

    let first = client.attach_to_session(AttachOptions::new("a")).unwrap();
    let second = client.attach_to_session(AttachOptions::new("a")).unwrap();

    assert!(!first.same_session(&second));
    assert!(first.same_session(&first.clone()));
}
