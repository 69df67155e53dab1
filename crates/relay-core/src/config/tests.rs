use super::*;
use std::io::Write;

fn write_env(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_map(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_load_env_parses_pairs_and_strips_quotes() {
    let file = write_env(
        "# bot settings\n\
         \n\
         GEMINI_BOT_TOKEN=\"123:abc\"\n\
         ALLOWED_USER_ID='42,43'\n\
         ASSISTANT_BIN=gemini\n",
    );

    let vars = load_env(file.path());
    assert_eq!(vars.len(), 3);
    assert_eq!(vars.get("GEMINI_BOT_TOKEN").map(String::as_str), Some("123:abc"));
    assert_eq!(vars.get("ALLOWED_USER_ID").map(String::as_str), Some("42,43"));
    assert_eq!(vars.get("ASSISTANT_BIN").map(String::as_str), Some("gemini"));
}

#[test]
fn test_load_env_ignores_comments_and_blank_lines() {
    let file = write_env("\n# only a comment\n\n# GEMINI_BOT_TOKEN=commented\n");
    let vars = load_env(file.path());
    assert!(vars.is_empty());
}

#[test]
fn test_load_env_keeps_spaced_id_list() {
    let file = write_env("GEMINI_BOT_TOKEN=tok\nALLOWED_USER_ID=123, 456\n");

    let vars = load_env(file.path());
    assert_eq!(vars.get("ALLOWED_USER_ID").map(String::as_str), Some("123, 456"));

    let cfg = Config::resolve_with(&vars, no_env).unwrap();
    assert_eq!(cfg.telegram.allowed_chats, vec!["123", "456"]);
}

#[test]
fn test_load_env_does_not_expand_dollar() {
    let file = write_env(
        "GEMINI_BOT_TOKEN=12:ab$cd\n\
         ASSISTANT_BIN=\"$HOME/bin/gemini\"\n\
         TELEGRAM_API_URL='http://x/$y'\n",
    );

    let vars = load_env(file.path());
    assert_eq!(vars.get("GEMINI_BOT_TOKEN").map(String::as_str), Some("12:ab$cd"));
    assert_eq!(vars.get("ASSISTANT_BIN").map(String::as_str), Some("$HOME/bin/gemini"));
    assert_eq!(vars.get("TELEGRAM_API_URL").map(String::as_str), Some("http://x/$y"));
}

#[test]
fn test_load_env_value_with_inner_equals() {
    let file = write_env("GEMINI_BOT_TOKEN=a=b=c\n");
    let vars = load_env(file.path());
    assert_eq!(vars.get("GEMINI_BOT_TOKEN").map(String::as_str), Some("a=b=c"));
}

#[test]
fn test_plain_pair_rule() {
    assert_eq!(
        plain_pair("  KEY = \"v w\"  "),
        Some(("KEY".to_string(), "v w".to_string()))
    );
    assert_eq!(
        plain_pair("export KEY=v"),
        Some(("KEY".to_string(), "v".to_string()))
    );
    assert_eq!(plain_pair("# KEY=v"), None);
    assert_eq!(plain_pair("no equals here"), None);
    assert_eq!(plain_pair("=value"), None);
}

#[test]
fn test_load_env_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let vars = load_env(&dir.path().join("does-not-exist.env"));
    assert!(vars.is_empty());
}

#[test]
fn test_default_env_path_ends_with_env_file() {
    let path = default_env_path();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(ENV_FILE_NAME));
}

#[test]
fn test_parse_id_list() {
    assert_eq!(parse_id_list("42"), vec!["42"]);
    assert_eq!(parse_id_list(" 42 , 43,,44 "), vec!["42", "43", "44"]);
    assert!(parse_id_list(" , ").is_empty());
}

#[test]
fn test_resolve_defaults() {
    let file = env_map(&[("GEMINI_BOT_TOKEN", "tok"), ("ALLOWED_USER_ID", "42")]);
    let cfg = Config::resolve_with(&file, no_env).unwrap();

    assert_eq!(cfg.telegram.bot_token, "tok");
    assert_eq!(cfg.telegram.allowed_chats, vec!["42"]);
    assert_eq!(cfg.telegram.api_url, "https://api.telegram.org");
    assert_eq!(cfg.telegram.poll_timeout_secs, 10);
    assert_eq!(cfg.telegram.poll_interval_ms, 1000);
    assert_eq!(cfg.telegram.error_backoff_secs, 3);
    assert_eq!(cfg.assistant.binary, "gemini");
    assert!(cfg.assistant.timeout_secs.is_none());
}

#[test]
fn test_resolve_file_wins_over_process_env() {
    let file = env_map(&[("GEMINI_BOT_TOKEN", "from-file"), ("ALLOWED_USER_ID", "1")]);
    let cfg = Config::resolve_with(&file, |key| match key {
        "GEMINI_BOT_TOKEN" => Some("from-env".to_string()),
        "ASSISTANT_BIN" => Some("/opt/bin/gemini".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(cfg.telegram.bot_token, "from-file");
    assert_eq!(cfg.assistant.binary, "/opt/bin/gemini");
}

#[test]
fn test_resolve_falls_back_to_process_env() {
    let cfg = Config::resolve_with(&EnvMap::new(), |key| match key {
        "GEMINI_BOT_TOKEN" => Some("env-token".to_string()),
        "ALLOWED_USER_ID" => Some("7, 8".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(cfg.telegram.bot_token, "env-token");
    assert_eq!(cfg.telegram.allowed_chats, vec!["7", "8"]);
}

#[test]
fn test_resolve_empty_file_value_falls_back() {
    let file = env_map(&[("GEMINI_BOT_TOKEN", ""), ("ALLOWED_USER_ID", "1")]);
    let cfg = Config::resolve_with(&file, |key| {
        (key == "GEMINI_BOT_TOKEN").then(|| "env-token".to_string())
    })
    .unwrap();
    assert_eq!(cfg.telegram.bot_token, "env-token");
}

#[test]
fn test_resolve_missing_token_is_config_error() {
    let file = env_map(&[("ALLOWED_USER_ID", "42")]);
    let err = Config::resolve_with(&file, no_env).unwrap_err();
    assert!(matches!(err, RelayError::Config(_)));
    assert!(err.to_string().contains("GEMINI_BOT_TOKEN"));
}

#[test]
fn test_resolve_missing_allowed_ids_is_config_error() {
    let file = env_map(&[("GEMINI_BOT_TOKEN", "tok")]);
    assert!(matches!(
        Config::resolve_with(&file, no_env),
        Err(RelayError::Config(_))
    ));

    let blank = env_map(&[("GEMINI_BOT_TOKEN", "tok"), ("ALLOWED_USER_ID", " , ")]);
    assert!(matches!(
        Config::resolve_with(&blank, no_env),
        Err(RelayError::Config(_))
    ));
}

#[test]
fn test_resolve_optional_overrides() {
    let file = env_map(&[
        ("GEMINI_BOT_TOKEN", "tok"),
        ("ALLOWED_USER_ID", "42"),
        ("TELEGRAM_API_URL", "http://127.0.0.1:8081/"),
        ("ASSISTANT_TIMEOUT_SECS", "600"),
        ("POLL_TIMEOUT_SECS", "25"),
        ("POLL_INTERVAL_MS", "250"),
        ("POLL_ERROR_BACKOFF_SECS", "5"),
    ]);
    let cfg = Config::resolve_with(&file, no_env).unwrap();

    assert_eq!(cfg.telegram.api_url, "http://127.0.0.1:8081");
    assert_eq!(cfg.assistant.timeout_secs, Some(600));
    assert_eq!(cfg.telegram.poll_timeout_secs, 25);
    assert_eq!(cfg.telegram.poll_interval_ms, 250);
    assert_eq!(cfg.telegram.error_backoff_secs, 5);
}

#[test]
fn test_resolve_zero_timeout_means_unbounded() {
    let file = env_map(&[
        ("GEMINI_BOT_TOKEN", "tok"),
        ("ALLOWED_USER_ID", "42"),
        ("ASSISTANT_TIMEOUT_SECS", "0"),
    ]);
    let cfg = Config::resolve_with(&file, no_env).unwrap();
    assert!(cfg.assistant.timeout_secs.is_none());
}

#[test]
fn test_resolve_malformed_number_is_config_error() {
    let file = env_map(&[
        ("GEMINI_BOT_TOKEN", "tok"),
        ("ALLOWED_USER_ID", "42"),
        ("POLL_TIMEOUT_SECS", "ten"),
    ]);
    let err = Config::resolve_with(&file, no_env).unwrap_err();
    assert!(err.to_string().contains("POLL_TIMEOUT_SECS"));
}
