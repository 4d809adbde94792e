use std::path::Path;

use tracing::debug;

use super::{check, Finding, LintConfig};
use crate::{AnalysisConfig, Condition, Error, Location};

/// Collect every non-empty `<Condition>` element of a proxy, policy or
/// target XML document, in document order.
///
/// Entities and CDATA are decoded; the location is the element's start tag.
///
/// # Errors
///
/// Returns [`Error::Xml`] if `source` is not well-formed XML.
pub fn conditions_from_xml(source: &str, config: &AnalysisConfig) -> Result<Vec<Condition>, Error> {
    let doc = roxmltree::Document::parse(source)?;
    let conditions = doc
        .descendants()
        .filter(|node| node.has_tag_name("Condition"))
        .filter_map(|node| {
            let text: String = node
                .children()
                .filter(roxmltree::Node::is_text)
                .filter_map(|child| child.text())
                .collect();
            if text.trim().is_empty() {
                return None;
            }
            let pos = doc.text_pos_at(node.range().start);
            let location = Location::new(pos.row as usize, pos.col as usize);
            Some(Condition::with_config(text, location, *config))
        })
        .collect();
    Ok(conditions)
}

/// Check every condition in an XML document.
///
/// # Errors
///
/// Returns [`Error::Xml`] if `source` is not well-formed XML. Conditions
/// that fail to parse are reported as findings, not errors.
///
/// ```
/// use condlint::lint::{lint_xml, Check, LintConfig};
///
/// let xml = r#"<Flow name="get">
///     <Condition>request.verb = "GET" and request.verb = "POST"</Condition>
/// </Flow>"#;
/// let findings = lint_xml(xml, &LintConfig::default()).unwrap();
/// assert_eq!(findings[0].check(), Check::Contradiction);
/// assert_eq!(findings[0].location().line, 2);
/// ```
pub fn lint_xml(source: &str, config: &LintConfig) -> Result<Vec<Finding>, Error> {
    let conditions = conditions_from_xml(source, config.analysis())?;
    Ok(conditions
        .iter()
        .flat_map(|condition| check(condition, config))
        .collect())
}

/// Read an XML file and check every condition in it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Xml`] if
/// it is not well-formed XML.
pub fn lint_file(path: impl AsRef<Path>, config: &LintConfig) -> Result<Vec<Finding>, Error> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let findings = lint_xml(&source, config)?;
    debug!(path = %path.display(), findings = findings.len(), "linted proxy file");
    Ok(findings)
}
