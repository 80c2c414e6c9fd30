use std::{
    fs::read_to_string,
    io::{BufRead, Write},
    path::Path,
};

use anyhow::Context;

use crate::{display_error, lexer::lexer::tokenize};

/// How a single scan went, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Clean,
    /// The scan finished but reported this many recoverable errors.
    HadErrors(usize),
    /// A fatal error stopped the scan and no tokens were printed.
    Aborted,
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Clean)
    }
}

pub struct Runner<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> Runner<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Runner { out, err }
    }

    /// Scans `source` and prints the diagnostics followed by the tokens.
    pub fn run(&mut self, source: &str, file: Option<String>) -> anyhow::Result<RunStatus> {
        let output = match tokenize(source.to_string(), file) {
            Ok(output) => output,
            Err(error) => {
                display_error(&error, source, &mut self.err)?;
                return Ok(RunStatus::Aborted);
            }
        };

        for diagnostic in &output.diagnostics {
            display_error(diagnostic, source, &mut self.err)?;
        }

        writeln!(self.out, "Tokens {}", output.tokens.len())?;
        for token in &output.tokens {
            writeln!(self.out, "{}", token)?;
        }
        self.out.flush()?;

        if output.had_error() {
            Ok(RunStatus::HadErrors(output.diagnostics.len()))
        } else {
            Ok(RunStatus::Clean)
        }
    }

    pub fn run_file(&mut self, path: &Path) -> anyhow::Result<RunStatus> {
        let source = read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        self.run(&source, Some(path.display().to_string()))
    }

    /// Reads lines from `input` until it runs dry, scanning each on its own.
    pub fn run_prompt(&mut self, mut input: impl BufRead) -> anyhow::Result<()> {
        let mut line = String::new();

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            let read = input.read_line(&mut line).context("failed to read input")?;
            if read == 0 {
                writeln!(self.out)?;
                break;
            }

            let source = line.trim_end_matches(['\n', '\r']);
            // Every line gets a fresh scan, so a bad line does not leak into the next.
            self.run(source, None)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{RunStatus, Runner};

    fn run(source: &str) -> (RunStatus, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = Runner::new(&mut out, &mut err)
            .run(source, Some("test.qw".to_string()))
            .unwrap();

        (status, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_run_prints_tokens() {
        let (status, out, err) = run("var x = 10;");

        assert_eq!(status, RunStatus::Clean);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "Tokens 6\nVar var\nIdentifier x\nEqual =\nNumber 10 Literal: 10\nSemicolon ;\nEOF\n"
        );
    }

    #[test]
    fn test_run_reports_recoverable_errors() {
        let (status, out, err) = run("@ #");

        assert_eq!(status, RunStatus::HadErrors(2));
        assert!(!status.is_success());
        assert_eq!(out, "Tokens 1\nEOF\n");
        assert!(err.contains("[line 1] Error: unexpected character '@'"));
        assert!(err.contains("[line 1] Error: unexpected character '#'"));
    }

    #[test]
    fn test_run_aborts_on_bad_number() {
        let (status, out, err) = run("var big = 99999999999999999999;");

        assert_eq!(status, RunStatus::Aborted);
        assert!(out.is_empty());
        assert!(err.contains("error parsing number: \"99999999999999999999\""));
    }

    #[test]
    fn test_run_prompt_scans_each_line() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input = Cursor::new("@\n\"hi\"\n");

        Runner::new(&mut out, &mut err).run_prompt(input).unwrap();

        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();

        assert_eq!(out, "> Tokens 1\nEOF\n> Tokens 2\nString \"hi\" Literal: hi\nEOF\n> \n");
        assert_eq!(err.matches("Error:").count(), 1);
        assert!(err.contains("-> shell"));
    }

    #[test]
    fn test_run_file_missing() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = Runner::new(&mut out, &mut err)
            .run_file(std::path::Path::new("does/not/exist.qw"));

        let error = result.unwrap_err();
        assert!(error.to_string().contains("failed to read does/not/exist.qw"));
    }
}
