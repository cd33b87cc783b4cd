use amigo_secreto::config::toml_config::TomlConfig;
use amigo_secreto::utils::validation::Validate;
use amigo_secreto::{build_engine, CliConfig, DeliveryStatus, DrawStrategy};
use httpmock::prelude::*;
use std::collections::HashMap;
use tempfile::TempDir;

const SHEET: &str = "Nombre,Telefono,Email\n\
                     Laura,3001112233,laura@example.com\n\
                     Andrés,3004445566,\n\
                     Camila,3007778899,camila@example.com\n\
                     Felipe,3000001122,\n";

fn cli_config(source: String, gateway_url: String) -> CliConfig {
    CliConfig {
        source,
        api_key: Some("test-secret".to_string()),
        gateway_url,
        mode: "devices".to_string(),
        sim: 1,
        country_code: "57".to_string(),
        timeout_seconds: 5,
        template: Some("{giver}|{recipient}".to_string()),
        name_column: "Nombre".to_string(),
        phone_column: "Telefono".to_string(),
        email_column: "Email".to_string(),
        strategy: DrawStrategy::Uniform,
        dry_run: false,
        verbose: false,
        log_json: false,
    }
}

#[tokio::test]
async fn test_end_to_end_sorteo_with_real_http() {
    let server = MockServer::start();

    let sheet_mock = server.mock(|when, then| {
        when.method(GET).path("/export").query_param("format", "csv");
        then.status(200).header("Content-Type", "text/csv").body(SHEET);
    });

    let sms_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/send/sms")
            .x_www_form_urlencoded_tuple("secret", "test-secret");
        then.status(200)
            .json_body(serde_json::json!({"status": 200, "message": "Message has been queued"}));
    });

    let config = cli_config(server.url("/export?format=csv"), server.base_url());
    config.validate().unwrap();

    let report = build_engine(&config).unwrap().run().await.unwrap();

    sheet_mock.assert();
    sms_mock.assert_hits(4);
    assert_eq!(report.participants, 4);
    assert_eq!(report.sent(), 4);
    assert_eq!(report.failed(), 0);

    let phones: Vec<&str> = report.deliveries.iter().map(|d| d.phone.as_str()).collect();
    assert_eq!(
        phones,
        vec!["573001112233", "573004445566", "573007778899", "573000001122"]
    );
}

#[tokio::test]
async fn test_end_to_end_gateway_failure_is_per_participant() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/sheet.csv");
        then.status(200).body(SHEET);
    });

    let rejected = server.mock(|when, then| {
        when.method(POST)
            .path("/api/send/sms")
            .x_www_form_urlencoded_tuple("phone", "573007778899");
        then.status(500)
            .json_body(serde_json::json!({"status": 500, "message": "Device offline"}));
    });

    let accepted = server.mock(|when, then| {
        when.method(POST).path("/api/send/sms");
        then.status(200).json_body(serde_json::json!({"status": 200}));
    });

    let config = cli_config(server.url("/sheet.csv"), server.base_url());
    let report = build_engine(&config).unwrap().run().await.unwrap();

    rejected.assert_hits(1);
    accepted.assert_hits(3);
    assert_eq!(report.sent(), 3);
    assert_eq!(report.failed(), 1);

    let statuses: HashMap<&str, &DeliveryStatus> = report
        .deliveries
        .iter()
        .map(|d| (d.giver.as_str(), &d.status))
        .collect();
    assert!(matches!(statuses["Camila"], DeliveryStatus::Failed(_)));
    assert_eq!(statuses["Laura"], &DeliveryStatus::Sent);
}

#[tokio::test]
async fn test_end_to_end_from_toml_file_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let sheet_path = temp_dir.path().join("participantes.csv");
    std::fs::write(&sheet_path, SHEET).unwrap();

    let server = MockServer::start();
    let sms_mock = server.mock(|when, then| {
        when.method(POST).path("/api/send/sms");
        then.status(200);
    });

    let toml_content = format!(
        r#"
[sorteo]
name = "oficina-2025"
strategy = "cycle"
dry_run = true

[source]
location = "{}"

[sms]
base_url = "{}"
"#,
        sheet_path.to_str().unwrap().replace('\\', "/"),
        server.base_url()
    );
    let config_path = temp_dir.path().join("sorteo.toml");
    std::fs::write(&config_path, toml_content).unwrap();

    let config = TomlConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();

    let report = build_engine(&config).unwrap().run().await.unwrap();

    sms_mock.assert_hits(0);
    assert_eq!(report.participants, 4);
    assert_eq!(report.skipped(), 4);
    assert_eq!(report.attempts, 1);
}

#[tokio::test]
async fn test_end_to_end_single_participant_sends_nothing() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/solo.csv");
        then.status(200).body("Nombre,Telefono\nLaura,3001112233\n");
    });
    let sms_mock = server.mock(|when, then| {
        when.method(POST).path("/api/send/sms");
        then.status(200);
    });

    let config = cli_config(server.url("/solo.csv"), server.base_url());
    let err = build_engine(&config).unwrap().run().await.unwrap_err();

    sms_mock.assert_hits(0);
    assert!(matches!(
        err,
        amigo_secreto::SorteoError::InvalidInputError { .. }
    ));
}

#[tokio::test]
async fn test_end_to_end_duplicate_names_are_rejected() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/dup.csv");
        then.status(200)
            .body("Nombre,Telefono\nLaura,3001112233\nLaura,3009998877\nAndrés,3004445566\n");
    });

    let config = cli_config(server.url("/dup.csv"), server.base_url());
    let err = build_engine(&config).unwrap().run().await.unwrap_err();

    assert!(err.to_string().contains("Laura"));
}
