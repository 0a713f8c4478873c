//! Lisp reader and data model.
//!
//! Text is read into tagged objects held in a [`data::Storage`], and rendered
//! back into Lisp syntax by the objects' `Display` implementations.
//! There is no evaluator yet; the console loop just echoes what it reads.

use std::io::{BufRead, Write};

pub mod data;
pub mod reader;

#[cfg(feature = "render")]
mod render;
#[cfg(feature = "render")]
pub use render::render_graph;

pub use reader::{read, read_body, read_expr, ParseState, ReadErr, ReadResult};

/// Prompt printed before each line of input.
pub const PROMPT: &str = "> ";

/// Read-print loop: read one expression from each line of input and print it.
///
/// Anything after the first expression on a line is ignored.
/// Symbols stay interned for the whole session.
pub fn repl(input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<()> {
    let store = data::Storage::default();
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        // Undecodable bytes read as U+FFFD.
        let text = String::from_utf8_lossy(&line);
        let state = read(&store, text.trim_end_matches(['\n', '\r']));
        if !state.rest.trim().is_empty() {
            tracing::debug!(rest = state.rest, "ignoring remainder of line");
        }
        write!(output, "{}\n{PROMPT}", state.value)?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::repl;

    fn run(input: &str) -> String {
        let mut output = Vec::new();
        repl(&mut Cursor::new(input.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prompt_only() {
        assert_eq!(run(""), "> ");
    }

    #[test]
    fn echoes_expressions() {
        assert_eq!(
            run("(1 2 3)\n'a\nnil\n()\n"),
            "> (1 2 3)\n> (quote a)\n> nil\n> nil\n> "
        );
    }

    #[test]
    fn one_expression_per_line() {
        assert_eq!(run("a b c\n(x) y"), "> a\n> (x)\n> ");
    }

    #[test]
    fn prints_errors() {
        assert_eq!(
            run("\n)\n(1\r\n"),
            "> <error: empty input>\n> <error: invalid syntax: )>\n> <error: unfinished parenthesis>\n> "
        );
    }

    #[test]
    fn invalid_utf8_line_is_read_lossily() {
        let mut output = Vec::new();
        repl(&mut Cursor::new(&b"(a b)\n\xff\n(c)\n"[..]), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "> (a b)\n> \u{FFFD}\n> (c)\n> "
        );
    }

    #[test]
    fn lists_do_not_span_lines() {
        assert_eq!(
            run("(a\nb)\n"),
            "> <error: unfinished parenthesis>\n> b\n> "
        );
    }
}
