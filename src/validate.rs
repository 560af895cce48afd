//! Structural validation of response bodies.
//!
//! A body is accepted only if it is a well-formed XML document without a
//! document-type declaration. DTDs are refused outright, whatever the caller
//! configured, which closes off entity-expansion and external-entity payloads.

use crate::config::ValidatorSettings;
use crate::error::{Diagnostic, DiagnosticSeverity, ParseError, ParseErrorKind};
use roxmltree::{Document, ParsingOptions};
use tracing::debug;

/// Reusable structural parser for one worker.
///
/// Holds only the parser configuration and counters; nothing from a previous
/// document survives into the next call.
#[derive(Clone, Debug)]
pub struct XmlValidator {
    nodes_limit: u32,
    documents_validated: u64,
}

/// A body that passed structural validation, plus the recoverable
/// diagnostics collected while parsing it.
pub struct ValidDocument<'input> {
    document: Document<'input>,
    pub warnings: Vec<Diagnostic>,
}

impl<'input> ValidDocument<'input> {
    pub fn document(&self) -> &Document<'input> {
        &self.document
    }
}

impl Default for XmlValidator {
    fn default() -> Self {
        XmlValidator::new(&ValidatorSettings::default())
    }
}

impl XmlValidator {
    pub fn new(settings: &ValidatorSettings) -> Self {
        XmlValidator {
            nodes_limit: settings.nodes_limit,
            documents_validated: 0,
        }
    }

    /// Applies `settings` to an existing handle.
    pub fn configure(&mut self, settings: &ValidatorSettings) {
        self.nodes_limit = settings.nodes_limit;
    }

    /// Number of bodies this handle has been asked to validate.
    pub fn documents_validated(&self) -> u64 {
        self.documents_validated
    }

    fn parsing_options(&self) -> ParsingOptions {
        let mut options = ParsingOptions::default();
        options.allow_dtd = false;
        options.nodes_limit = self.nodes_limit;
        options
    }

    /// Confirms `text` is well-formed XML.
    ///
    /// Fatal errors abort with a [`ParseError`] carrying the parser diagnostic.
    /// Recoverable findings do not abort and are returned as warnings.
    pub fn validate<'input>(
        &mut self,
        text: &'input str,
    ) -> Result<ValidDocument<'input>, ParseError> {
        self.documents_validated += 1;

        let document =
            Document::parse_with_options(text, self.parsing_options()).map_err(parse_error)?;

        let mut warnings = Vec::new();
        if let Some(encoding) = declared_encoding(text)
            && !is_utf8_label(encoding)
        {
            warnings.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                code: "W-001".to_string(),
                line: Some(1),
                message: format!(
                    "declared encoding '{}' ignored; body was decoded as UTF-8",
                    encoding
                ),
            });
        }

        for node in document.descendants().filter(|n| n.is_pi()) {
            let target = node.pi().map(|pi| pi.target).unwrap_or_default();
            warnings.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                code: "W-002".to_string(),
                line: Some(document.text_pos_at(node.range().start).row),
                message: format!("processing instruction '{}' ignored", target),
            });
        }

        debug!(warnings = warnings.len(), "response body is well-formed");

        Ok(ValidDocument { document, warnings })
    }
}

fn parse_error(error: roxmltree::Error) -> ParseError {
    let kind = match &error {
        roxmltree::Error::DtdDetected => ParseErrorKind::DoctypeForbidden,
        roxmltree::Error::NodesLimitReached => ParseErrorKind::NodesLimit,
        _ => ParseErrorKind::Syntax,
    };
    let pos = error.pos();
    ParseError {
        kind,
        message: error.to_string(),
        line: Some(pos.row),
        column: Some(pos.col),
    }
}

/// Reads the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(text: &str) -> Option<&str> {
    let rest = text.trim_start_matches('\u{feff}').strip_prefix("<?xml")?;
    // `<?xml-stylesheet ...?>` and friends are processing instructions.
    if !rest.starts_with([' ', '\t', '\r', '\n']) {
        return None;
    }
    let decl = &rest[..rest.find("?>")?];
    let after = &decl[decl.find("encoding")? + "encoding".len()..];
    let after = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after[1..];
    Some(&value[..value.find(quote)?])
}

fn is_utf8_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8")
}
