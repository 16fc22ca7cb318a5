use std::env;
use std::io::{self, IsTerminal, Write};

use nu_ansi_term::Style;
use reedline::{
    DefaultPrompt, DefaultPromptSegment, Highlighter, HistoryItem, Signal, StyledText,
};

use crate::{Engine, Program, cli_util, config};

pub fn repl_loop() -> io::Result<()> {
    let mut editor = init_line_editor()?;

    loop {
        // Prompt and read a multi-line submission via the editor.
        let Some(submission) = read_submission_interactive(&mut editor)? else {
            // EOF or editor closed; end the session cleanly so a closed
            // stdin cannot hang the loop.
            println!();
            io::stdout().flush()?;
            return Ok(());
        };

        if submission.trim().is_empty() {
            continue;
        }

        execute_submission(&submission);

        // Test hook: if BFVM_REPL_ONCE=1, exit after one execution.
        if env::var("BFVM_REPL_ONCE").ok().as_deref() == Some("1") {
            return Ok(());
        }
    }
}

fn init_line_editor() -> io::Result<reedline::Reedline> {
    use reedline::{
        EditCommand, Emacs, FileBackedHistory, KeyCode, KeyModifiers, Reedline, ReedlineEvent,
        default_emacs_keybindings,
    };

    // Start from default emacs-like bindings and adjust:
    // - Enter -> InsertNewline (do not submit)
    // - Ctrl+D -> Submit
    // - Ctrl+Z -> Submit (for Windows)
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('z'), ReedlineEvent::Submit);

    // Up/down move within the current multiline buffer, not history.
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);

    // Alt+Up/Down or Ctrl+Up/Down navigate history items.
    keybindings.add_binding(KeyModifiers::ALT, KeyCode::Up, ReedlineEvent::PreviousHistory);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Up, ReedlineEvent::PreviousHistory);
    keybindings.add_binding(KeyModifiers::ALT, KeyCode::Down, ReedlineEvent::NextHistory);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Down, ReedlineEvent::NextHistory);

    // Persist history under the config home; fall back to an in-memory
    // history when the file cannot be used.
    let history = FileBackedHistory::with_file(1_000, config::history_file())
        .or_else(|_| FileBackedHistory::new(1_000))
        .unwrap();

    let editor = Reedline::create()
        .with_highlighter(Box::new(OperatorHighlighter::from_config()))
        .with_history(Box::new(history))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    Ok(editor)
}

/// Collect all of `input` until EOF as one submission.
pub fn read_submission<R: io::BufRead>(input: &mut R) -> Option<String> {
    let mut buffer = String::new();

    loop {
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => buffer.push_str(&line),
            Err(_) => return None,
        }
    }

    if buffer.is_empty() { None } else { Some(buffer) }
}

fn read_submission_interactive(editor: &mut reedline::Reedline) -> io::Result<Option<String>> {
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("bfvm".to_string()),
        DefaultPromptSegment::Empty,
    );

    match editor.read_line(&prompt) {
        Ok(Signal::Success(buffer)) => {
            // One history item per submitted buffer, program-level.
            if !buffer.trim().is_empty() {
                let _ = editor
                    .history_mut()
                    .save(HistoryItem::from_command_line(buffer.clone()));
            }
            Ok(Some(buffer))
        }
        Ok(Signal::CtrlC) => Ok(None),
        Ok(Signal::CtrlD) => Ok(None),
        Err(e) => {
            eprintln!("repl: editor error: {e}");
            let _ = io::stderr().flush();
            Ok(None)
        }
    }
}

/// Parse and run one submission against fresh machine state.
///
/// Program output goes to stdout and diagnostics to stderr; a trailing
/// newline keeps the next prompt at column 0. Submissions with no operator
/// characters at all are ignored without a newline, so piped comment-only
/// input leaves stdout untouched.
fn execute_submission(source: &str) {
    let program = match Program::parse(source) {
        Ok(program) => program,
        Err(err) => {
            cli_util::print_parse_error(None, source, &err);
            println!();
            let _ = io::stdout().flush();
            return;
        }
    };

    if program.is_empty() {
        return;
    }

    let mut engine = Engine::new(&program);
    let result = engine.run(&mut io::stdin().lock(), &mut io::stdout().lock());
    if let Err(err) = result {
        let _ = io::stdout().flush();
        cli_util::print_runtime_error(None, &err);
    }
    println!();
    let _ = io::stdout().flush();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Resolve the REPL mode: explicit flag, then BFVM_REPL_MODE, then TTY
/// autodetection. Editor mode requires stdin to be a terminal.
pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !io::stdin().is_terminal() {
                return Err(
                    "cannot start editor: stdin is not a TTY (use --bare or BFVM_REPL_MODE=bare)"
                        .to_string(),
                );
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    if let Ok(val) = env::var("BFVM_REPL_MODE") {
        let v = val.trim().to_ascii_lowercase();
        return match v.as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" => {
                if !io::stdin().is_terminal() {
                    return Err(
                        "cannot start editor: stdin is not a TTY (use BFVM_REPL_MODE=bare)"
                            .to_string(),
                    );
                }
                Ok(ReplMode::Editor)
            }
            _ => Err(format!(
                "invalid BFVM_REPL_MODE value: {val}, must be 'bare' or 'editor'"
            )),
        };
    }

    if io::stdin().is_terminal() {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

/// Bare mode: read stdin to EOF, run the whole buffer once, exit.
pub fn execute_bare_once() -> io::Result<()> {
    // The stdin lock must be released before executing so `,` can take it.
    let submission = {
        let mut locked = io::BufReader::new(io::stdin().lock());
        read_submission(&mut locked)
    };

    if let Some(submission) = submission {
        if !submission.trim().is_empty() {
            execute_submission(&submission);
        }
    }
    Ok(())
}

struct OperatorHighlighter {
    right: Style,
    left: Style,
    inc: Style,
    dec: Style,
    output: Style,
    input: Style,
    bracket: Style,
    comment: Style,
}

impl OperatorHighlighter {
    /// Styles from the `[colors]` config, falling back to the Mocha
    /// defaults. Operators render bold; comment text stays plain.
    fn from_config() -> Self {
        let colors = config::colors();
        Self {
            right: Style::new().fg(colors.op_right).bold(),
            left: Style::new().fg(colors.op_left).bold(),
            inc: Style::new().fg(colors.op_inc).bold(),
            dec: Style::new().fg(colors.op_dec).bold(),
            output: Style::new().fg(colors.op_output).bold(),
            input: Style::new().fg(colors.op_input).bold(),
            bracket: Style::new().fg(colors.op_bracket).bold(),
            comment: Style::new().fg(colors.comment),
        }
    }

    #[inline]
    fn style_for(&self, ch: char) -> Style {
        match ch {
            '>' => self.right,
            '<' => self.left,
            '+' => self.inc,
            '-' => self.dec,
            '.' => self.output,
            ',' => self.input,
            '[' | ']' => self.bracket,
            _ => self.comment,
        }
    }
}

impl Highlighter for OperatorHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        // Coalesce runs of identically styled characters into one span.
        let mut out = StyledText::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for ch in line.chars() {
            let style = self.style_for(ch);
            if run_style != Some(style) {
                if let Some(s) = run_style {
                    out.push((s, std::mem::take(&mut run)));
                }
                run_style = Some(style);
            }
            run.push(ch);
        }

        // `run` is non-empty whenever a style is pending.
        if let Some(s) = run_style {
            out.push((s, run));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_submission_reads_until_eof_multiple_lines() {
        let input = b"+++\n>+.\n";
        let mut cursor = Cursor::new(&input[..]);
        let got = read_submission(&mut cursor);
        assert_eq!(got.as_deref(), Some("+++\n>+.\n"));
    }

    #[test]
    fn read_submission_empty_returns_none() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        let got = read_submission(&mut cursor);
        assert!(got.is_none());
    }

    #[test]
    fn highlighter_groups_runs_of_the_same_class() {
        let styled = OperatorHighlighter::from_config().highlight("++>[", 0);
        let spans = styled.buffer;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].1, "++");
        assert_eq!(spans[1].1, ">");
        assert_eq!(spans[2].1, "[");
    }
}
