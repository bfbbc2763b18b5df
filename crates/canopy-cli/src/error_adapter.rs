//! Error adapter for converting CanopyError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use canopy::CanopyError;

/// Adapter exposing a [`CanopyError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CanopyError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CanopyError::Io(_) => "canopy::io",
            CanopyError::Graph(_) => "canopy::graph",
            CanopyError::Config(_) => "canopy::config",
            CanopyError::Render(_) => "canopy::render",
            CanopyError::Export(_) => "canopy::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CanopyError::Export(_) => {
                "is Graphviz installed? Install it or run with `--engine native`"
            }
            CanopyError::Config(_) => "check the configuration file passed with `--config`",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// Wrap `err` for rendering with a miette report handler.
pub fn to_reportable(err: &CanopyError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_codes() {
        let cases = [
            (CanopyError::Io(io::Error::other("disk")), "canopy::io"),
            (CanopyError::Graph("dangling".into()), "canopy::graph"),
            (CanopyError::Config("bad".into()), "canopy::config"),
            (CanopyError::Render("bad".into()), "canopy::render"),
            (
                CanopyError::export(io::Error::from(io::ErrorKind::NotFound)),
                "canopy::export",
            ),
        ];

        for (err, expected) in &cases {
            let adapter = to_reportable(err);
            assert_eq!(adapter.code().unwrap().to_string(), *expected);
        }
    }

    #[test]
    fn test_export_help_mentions_native_engine() {
        let err = CanopyError::export(io::Error::from(io::ErrorKind::NotFound));
        let help = to_reportable(&err).help().unwrap().to_string();
        assert!(help.contains("--engine native"));
    }

    #[test]
    fn test_report_renders() {
        let err = CanopyError::Render("the native engine cannot produce `pdf` output".into());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &to_reportable(&err))
            .unwrap();
        assert!(out.contains("pdf"), "{out}");
        assert!(out.contains("canopy::render"), "{out}");
    }
}
