//! Markup parsing.
//!
//! Two phases: [`scan`] tokenizes a document into a line-numbered
//! [`RawNode`] tree, then [`ParseCx::build`] looks each tag up in the
//! registry and lets its constructor turn raw nodes into elements. All
//! validation errors out of either phase carry the offending line.

use super::content::{ContentProvider, DocumentSource};
use super::element::{Common, ElementBox};
use super::registry::Registry;
use super::surface::parse_color;
use crate::core::geometry::parse_px;
use crate::{error, Error};
use std::str::from_utf8;
use std::str::FromStr;
use xmlparser::{ElementEnd, Token, Tokenizer};

/// Embedded documents may import further documents; pathological
/// self-imports are cut off here.
const MAX_IMPORT_DEPTH: usize = 32;

/// A tag scanned from markup, before inflation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    pub tag: String,
    pub line: usize,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<RawNode>,
}

fn line_of(xml: &str, offset: usize) -> usize {
    xml[..offset].bytes().filter(|byte| *byte == b'\n').count() + 1
}

/// Tokenizes one markup document into its single root node.
pub fn scan(bytes: &[u8]) -> Result<RawNode, Error> {
    let xml = from_utf8(bytes).map_err(|e| error!("markup is not valid UTF-8: {}", e))?;
    let mut stack: Vec<RawNode> = Vec::new();
    let mut roots: Vec<RawNode> = Vec::new();

    for token in Tokenizer::from(xml) {
        let token = token.map_err(|e| error!("markup error: {}", e))?;
        match token {
            Token::ElementStart { prefix, local, span } => {
                if !prefix.as_str().is_empty() {
                    return Err(error!(
                        "unexpected tag prefix '{}' (line {})",
                        prefix.as_str(),
                        line_of(xml, span.start())
                    ));
                }
                stack.push(RawNode {
                    tag: local.as_str().to_string(),
                    line: line_of(xml, span.start()),
                    attrs: Vec::new(),
                    children: Vec::new(),
                });
            }
            Token::Attribute { prefix, local, value, span } => {
                if !prefix.as_str().is_empty() {
                    return Err(error!(
                        "unexpected attribute prefix '{}' (line {})",
                        prefix.as_str(),
                        line_of(xml, span.start())
                    ));
                }
                match stack.last_mut() {
                    Some(node) => node
                        .attrs
                        .push((local.as_str().to_string(), value.as_str().to_string())),
                    None => {
                        return Err(error!(
                            "stray attribute '{}' (line {})",
                            local.as_str(),
                            line_of(xml, span.start())
                        ))
                    }
                }
            }
            Token::ElementEnd { end, span } => {
                let line = line_of(xml, span.start());
                let pop = match end {
                    ElementEnd::Open => false,
                    ElementEnd::Empty => true,
                    ElementEnd::Close(prefix, local) => {
                        if !prefix.as_str().is_empty() {
                            return Err(error!(
                                "unexpected tag prefix '{}' (line {})",
                                prefix.as_str(),
                                line
                            ));
                        }
                        match stack.last() {
                            Some(node) if node.tag == local.as_str() => true,
                            Some(node) => {
                                return Err(error!(
                                    "close tag '{}' does not match '{}' (line {})",
                                    local.as_str(),
                                    node.tag,
                                    line
                                ))
                            }
                            None => {
                                return Err(error!(
                                    "stray close tag '{}' (line {})",
                                    local.as_str(),
                                    line
                                ))
                            }
                        }
                    }
                };
                if pop {
                    let node = stack
                        .pop()
                        .ok_or_else(|| error!("malformed markup (line {})", line))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => roots.push(node),
                    }
                }
            }
            Token::Text { text } => {
                let trimmed = text.as_str().trim();
                if !trimmed.is_empty() {
                    return Err(error!(
                        "unexpected text {:?} (line {})",
                        trimmed,
                        line_of(xml, text.start())
                    ));
                }
            }
            Token::Comment { .. } | Token::Declaration { .. } => {}
            other => return Err(error!("unexpected markup token: {:?}", other)),
        }
    }

    if let Some(node) = stack.last() {
        return Err(error!("unclosed element '{}' (line {})", node.tag, node.line));
    }
    match roots.len() {
        0 => Err(error!("empty document; one root element is required")),
        1 => Ok(roots.remove(0)),
        _ => Err(error!("multiple root elements; exactly one is required")),
    }
}

/// The attributes of one raw node, tracked so that leftovers can be
/// rejected once a constructor took everything it understands.
pub struct Attrs {
    tag: &'static str,
    line: usize,
    entries: Vec<(String, String)>,
}

impl Attrs {
    pub fn new(tag: &'static str, line: usize, entries: Vec<(String, String)>) -> Self {
        Self { tag, line, entries }
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Removes and returns an attribute's raw value.
    pub fn take(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Removes and parses an optional attribute.
    pub fn parse<T: FromStr>(&mut self, name: &str) -> Result<Option<T>, Error>
    where
        T::Err: std::fmt::Display,
    {
        match self.take(name) {
            Some(raw) => raw.parse().map(Some).map_err(|e| {
                error!(
                    "invalid '{}' attribute on <{}>: {} (line {})",
                    name, self.tag, e, self.line
                )
            }),
            None => Ok(None),
        }
    }

    /// Removes and parses a mandatory attribute.
    pub fn require<T: FromStr>(&mut self, name: &str) -> Result<T, Error>
    where
        T::Err: std::fmt::Display,
    {
        self.parse(name)?.ok_or_else(|| self.missing(name))
    }

    /// Removes a mandatory attribute's raw value.
    pub fn require_raw(&mut self, name: &str) -> Result<String, Error> {
        self.take(name).ok_or_else(|| self.missing(name))
    }

    fn missing(&self, name: &str) -> Error {
        error!(
            "missing '{}' attribute on <{}> (line {})",
            name, self.tag, self.line
        )
    }

    /// Rejects whatever no constructor claimed.
    pub fn finish(self) -> Result<(), Error> {
        match self.entries.first() {
            Some((name, _)) => Err(error!(
                "unknown attribute '{}' on <{}> (line {})",
                name, self.tag, self.line
            )),
            None => Ok(()),
        }
    }
}

/// Parses the attributes every element understands: `width`, `height`
/// (mandatory), `id`, `gravity`, `padding`, `background`.
pub fn common_from_attrs(attrs: &mut Attrs) -> Result<Common, Error> {
    let width_spec = attrs.require("width")?;
    let height_spec = attrs.require("height")?;
    let mut common = Common::new(attrs.tag, width_spec, height_spec);
    common.id = attrs.take("id");
    if let Some(gravity) = attrs.parse("gravity")? {
        common.gravity = gravity;
    }
    if let Some(raw) = attrs.take("padding") {
        common.padding = parse_px(&raw)
            .map_err(|e| error!("invalid 'padding' attribute: {} (line {})", e, attrs.line()))?;
    }
    if let Some(raw) = attrs.take("background") {
        let color = parse_color(&raw)
            .map_err(|e| error!("invalid 'background' attribute: {} (line {})", e, attrs.line()))?;
        common.background = Some(color);
    }
    Ok(common)
}

/// Everything tag constructors need while inflating a document: the
/// registry of tags, and the collaborators that load documents and size
/// content.
pub struct ParseCx<'a> {
    pub registry: &'a Registry,
    pub documents: &'a dyn DocumentSource,
    pub content: &'a dyn ContentProvider,
    depth: usize,
}

impl<'a> ParseCx<'a> {
    pub fn new(
        registry: &'a Registry,
        documents: &'a dyn DocumentSource,
        content: &'a dyn ContentProvider,
    ) -> Self {
        Self {
            registry,
            documents,
            content,
            depth: 0,
        }
    }

    /// Inflates one raw node through its registered constructor.
    pub fn build(&mut self, raw: RawNode) -> Result<ElementBox, Error> {
        match self.registry.constructor(&raw.tag) {
            Some(constructor) => constructor(self, raw),
            None => Err(error!(
                "unknown element tag '{}' (line {})",
                raw.tag, raw.line
            )),
        }
    }

    pub fn build_children(&mut self, raws: Vec<RawNode>) -> Result<Vec<ElementBox>, Error> {
        raws.into_iter().map(|raw| self.build(raw)).collect()
    }

    /// Loads and inflates another document, as `<import>` does.
    pub fn import(&mut self, path: &str) -> Result<ElementBox, Error> {
        if self.depth >= MAX_IMPORT_DEPTH {
            return Err(error!(
                "import depth limit ({}) exceeded at '{}'",
                MAX_IMPORT_DEPTH, path
            ));
        }
        let bytes = self.documents.load(path)?;
        self.depth += 1;
        let result = scan(&bytes).and_then(|raw| self.build(raw));
        self.depth -= 1;
        result
    }
}

/// Parses a whole document into its root element.
pub fn parse_document(cx: &mut ParseCx<'_>, bytes: &[u8]) -> Result<ElementBox, Error> {
    let raw = scan(bytes)?;
    cx.build(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_nested_tags_with_lines() {
        let doc = b"<stack width=\"match_parent\" height=\"match_parent\">\n  <text width=\"10\" height=\"10\" text=\"hi\"/>\n</stack>";
        let root = scan(doc).unwrap();
        assert_eq!(root.tag, "stack");
        assert_eq!(root.line, 1);
        assert_eq!(root.attrs.len(), 2);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "text");
        assert_eq!(root.children[0].line, 2);
    }

    #[test]
    fn rejects_broken_documents() {
        assert!(scan(b"").is_err());
        assert!(scan(b"<a width=\"1\" height=\"1\"></b>").is_err());
        assert!(scan(b"<a/><b/>").is_err());
        assert!(scan(b"<a>text</a>").is_err());
        assert!(scan(b"<ns:a/>").is_err());
    }
}
