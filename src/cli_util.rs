use std::io::{self, Write};

use crate::{ParseError, RuntimeError};

/// Print a parse diagnostic: a `parse error: ...` line plus a caret window
/// into the source. `program` is the invoking binary's name; `None` drops
/// the prefix (the REPL's style).
pub fn print_parse_error(program: Option<&str>, source: &str, err: &ParseError) {
    let index = match err {
        ParseError::UnmatchedLoopStart(i) | ParseError::UnmatchedLoopEnd(i) => *i,
    };
    let msg = prefix(program, &format!("parse error: {err}"));
    // The error carries an instruction index; the caret needs the character
    // position of that instruction in the raw source.
    print_error_with_context(&msg, source, instruction_char_index(source, index));
}

/// Print a runtime diagnostic. Runtime errors carry no source position, so
/// this is a single stderr line.
pub fn print_runtime_error(program: Option<&str>, err: &RuntimeError) {
    eprintln!("{}", prefix(program, &format!("runtime error: {err}")));
    let _ = io::stderr().flush();
}

fn prefix(program: Option<&str>, msg: &str) -> String {
    match program {
        Some(p) => format!("{p}: {msg}"),
        None => msg.to_string(),
    }
}

/// Character position of the `n`-th instruction in `source`, skipping
/// comment characters the way the parser does. Positions past the last
/// instruction map to the end of the source.
pub fn instruction_char_index(source: &str, n: usize) -> usize {
    let mut seen = 0usize;
    for (pos, ch) in source.chars().enumerate() {
        if matches!(ch, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']') {
            if seen == n {
                return pos;
            }
            seen += 1;
        }
    }
    source.chars().count()
}

/// Print `msg`, then a short window of `code` around the character position
/// `pos` with a caret underneath. Slices by char index so multi-byte comment
/// text cannot split a UTF-8 boundary.
pub fn print_error_with_context(msg: &str, code: &str, pos: usize) {
    const WINDOW_CHARS: usize = 32;

    eprintln!("{msg}");

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    eprintln!("  {}", &code[start_byte..end_byte]);

    let caret_offset = pos.saturating_sub(start_char);
    eprintln!("  {}^", " ".repeat(caret_offset));
    let _ = io::stderr().flush();
}

/// Byte index of the `char_idx`-th character, or the string's length when
/// the index is past the end.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(b, _)| b)
}
