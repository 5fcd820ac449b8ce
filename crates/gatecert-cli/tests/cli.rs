use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gatecert(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gatecert").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("GATECERT_ORG")
        .env_remove("GATECERT_ENV")
        .env_remove("GATECERT_USER")
        .env_remove("GATECERT_PASSWORD")
        .env_remove("GATECERT_TOKEN")
        .env_remove("GATECERT_CONFIG")
        .env_remove("GATECERT_LOG")
        .env_remove("GATECERT_MANAGEMENT_URI")
        .env_remove("GATECERT_AUTH_URI")
        .env_remove("GATECERT_BASE_URI");
    cmd
}

fn write_config(dir: &TempDir, server: &MockServer) -> String {
    let path = dir.path().join("config.yml");
    let uri = server.uri();
    std::fs::write(
        &path,
        format!(
            "management_uri: {uri}\n\
             auth_uri: \"{uri}/{{org}}-{{env}}/edgemicro-auth\"\n\
             base_uri: \"{uri}/edgemicro/{{api}}/organization/{{org}}/environment/{{env}}\"\n\
             request_timeout_secs: 5\n"
        ),
    )
    .unwrap();
    path.display().to_string()
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    gatecert(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install-private"))
        .stdout(predicate::str::contains("genkeys"));
}

#[test]
fn test_missing_org_fails() {
    let home = TempDir::new().unwrap();
    gatecert(home.path())
        .args(["install", "-e", "test", "-u", "admin", "-p", "secret"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("org is required"));
}

#[test]
fn test_missing_username_fails() {
    let home = TempDir::new().unwrap();
    gatecert(home.path())
        .args(["delete", "-o", "acme", "-e", "test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("username is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_prints_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/organizations/acme/environments/test/vaults/microgateway"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let config = write_config(&home, &server);

    gatecert(home.path())
        .args(["--config", &config, "delete", "-o", "acme", "-e", "test", "-t", "tok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault deleted!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_public_key_not_found_prints_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme-test/edgemicro-auth/publicKey"))
        .respond_with(ResponseTemplate::new(404).set_body_string("edgemicro-auth proxy is not deployed"))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let config = write_config(&home, &server);

    gatecert(home.path())
        .args(["--config", &config, "public-key", "-o", "acme", "-e", "test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("edgemicro-auth proxy is not deployed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_genkeys_prints_bootstrap() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/edgemicro/credential/organization/acme/environment/test"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/edgemicro/region/organization/acme/environment/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "region": "us", "host": "api.us.example.com" })),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let config = write_config(&home, &server);

    gatecert(home.path())
        .args([
            "--config", &config, "genkeys", "-o", "acme", "-e", "test", "-u", "admin", "-p", "secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "bootstrap: http://api.us.example.com/edgemicro/bootstrap/organization/acme/environment/test",
        ))
        .stdout(predicate::str::is_match("key: [0-9a-f]{64}").unwrap())
        .stdout(predicate::str::is_match("secret: [0-9a-f]{64}").unwrap());
}
