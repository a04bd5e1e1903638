use serial_test::serial;

use super::*;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_rejects_unknown_languages() {
    let res = build().try_get_matches_from(["runpad", "--language", "ruby"]);
    assert!(res.is_err());
}

#[test]
fn it_collects_nested_subcommand_matches() {
    let matches = build()
        .try_get_matches_from(["runpad", "config", "default", "--language", "java"])
        .unwrap();

    let chain = matches_chain(&matches);
    assert_eq!(chain.len(), 3);
    assert_eq!(
        chain[2].get_one::<String>("language").map(|e| e.as_str()),
        Some("java")
    );
}

#[test]
fn it_formats_languages_in_registry_order() {
    let table = format_languages();
    let lines = table.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].starts_with("javascript"));
    assert!(lines[1].contains("18.15.0"));
    assert!(lines[1].ends_with("index.js"));
    assert!(lines[5].starts_with("java "));
    assert!(lines[5].ends_with("Main.java"));
}

#[test]
fn it_formats_runtimes_with_aliases() {
    let runtimes = vec![
        Runtime {
            language: "python".to_string(),
            version: "3.10.0".to_string(),
            aliases: vec!["py".to_string(), "py3".to_string()],
        },
        Runtime {
            language: "c".to_string(),
            version: "10.2.0".to_string(),
            aliases: vec![],
        },
    ];

    assert_eq!(
        format_runtimes(&runtimes),
        "python 3.10.0 (py, py3)\nc 10.2.0"
    );
}

#[tokio::test]
async fn it_starts_the_ui_without_a_subcommand() {
    let matches = build().try_get_matches_from(["runpad"]).unwrap();
    assert_eq!(dispatch(&matches).await.unwrap(), Outcome::StartUi);
}

#[tokio::test]
async fn it_lists_languages_headlessly() {
    let matches = build().try_get_matches_from(["runpad", "languages"]).unwrap();
    assert_eq!(dispatch(&matches).await.unwrap(), Outcome::Exit(0));
}

#[tokio::test]
#[serial]
async fn it_runs_the_boilerplate_headlessly() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/execute")
        .with_status(200)
        .with_body(r#"{"run":{"output":"Hello, Python!\n","code":0}}"#)
        .create_async()
        .await;

    Config::set(ConfigKey::ExecutionUrl, &server.url());
    Config::set(ConfigKey::Language, "python");

    let matches = build().try_get_matches_from(["runpad", "run"]).unwrap();
    let outcome = dispatch(&matches).await.unwrap();

    mock.assert_async().await;
    assert_eq!(outcome, Outcome::Exit(0));
}

#[tokio::test]
#[serial]
async fn it_exits_non_zero_when_the_run_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/execute")
        .with_status(400)
        .with_body(r#"{"message":"Unsupported language"}"#)
        .create_async()
        .await;

    Config::set(ConfigKey::ExecutionUrl, &server.url());
    Config::set(ConfigKey::Language, "javascript");

    let matches = build().try_get_matches_from(["runpad", "run"]).unwrap();
    assert_eq!(dispatch(&matches).await.unwrap(), Outcome::Exit(1));
}

#[tokio::test]
#[serial]
async fn it_exits_non_zero_without_an_api_key() {
    Config::set(ConfigKey::GeminiApiKey, "");

    let matches = build()
        .try_get_matches_from(["runpad", "ask", "what", "is", "2+2"])
        .unwrap();
    assert_eq!(dispatch(&matches).await.unwrap(), Outcome::Exit(1));
}
