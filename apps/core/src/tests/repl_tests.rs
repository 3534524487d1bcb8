//! REPL Input Tests
//!
//! How lines typed at the interactive prompt map to commands and turns.

use crate::brain::{build_request, prompt_for, Category};
use crate::{parse_repl_line, ReplInput};

#[test]
fn test_empty_line_is_skipped() {
    assert_eq!(parse_repl_line(""), ReplInput::Skip);
}

#[test]
fn test_blank_line_is_sent_as_typed() {
    assert_eq!(parse_repl_line("   "), ReplInput::Message("   "));
    assert_eq!(parse_repl_line("\t"), ReplInput::Message("\t"));

    let request = build_request("   ");
    assert_eq!(request.user_message, "   ");
    assert_eq!(request.system_prompt, prompt_for(Category::General));
}

#[test]
fn test_commands_ignore_surrounding_whitespace() {
    assert_eq!(parse_repl_line("/quit"), ReplInput::Quit);
    assert_eq!(parse_repl_line("  /exit "), ReplInput::Quit);
    assert_eq!(parse_repl_line("/history"), ReplInput::History);
}

#[test]
fn test_messages_keep_their_padding() {
    assert_eq!(
        parse_repl_line("  Is my router safe?  "),
        ReplInput::Message("  Is my router safe?  ")
    );
}
