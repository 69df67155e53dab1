use super::*;

#[test]
fn test_parse_reserved_commands() {
    assert_eq!(Command::parse("/start"), Some(Command::Start));
    assert_eq!(Command::parse("/help"), Some(Command::Help));
    assert_eq!(Command::parse("/save_context"), Some(Command::SaveContext));
}

#[test]
fn test_parse_requires_exact_match() {
    assert_eq!(Command::parse("/start now"), None);
    assert_eq!(Command::parse(" /start"), None);
    assert_eq!(Command::parse("/START"), None);
    assert_eq!(Command::parse("/save_context please"), None);
}

#[test]
fn test_parse_plain_text_and_unknown_commands() {
    assert_eq!(Command::parse("hello"), None);
    assert_eq!(Command::parse("/status"), None);
    assert_eq!(Command::parse(""), None);
}

#[test]
fn test_help_lists_every_command() {
    for cmd in ["/start", "/help", "/save_context"] {
        assert!(HELP_MESSAGE.contains(cmd), "help should mention {cmd}");
    }
}

#[test]
fn test_save_context_prompt_names_output_file() {
    assert!(SAVE_CONTEXT_PROMPT.contains("context_history.md"));
}
