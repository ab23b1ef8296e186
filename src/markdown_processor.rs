use once_cell::sync::Lazy;
use regex::Regex;

// @module: Markdown segmentation and reassembly

// @const: Heading line pattern, anchored per line
static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+ .*$").unwrap());

// @const: Protected content alternation. Order matters: on a tie at the same
// start position the regex engine prefers the earlier alternative, giving
// code block > table > image precedence.
static SPECIAL_SPAN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(?P<code>```.*?```)|(?P<table>\|[^\n]*\|(?:\n\|[^\n]*\|)+)|(?P<image>!\[[^\]]*?\]\([^)]+?\))",
    )
    .unwrap()
});

/// A heading-delimited slice of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The heading line without its trailing newline, or an empty string for
    /// content that precedes the first heading.
    pub heading: String,

    /// Everything after the heading line up to the next heading line or the
    /// end of the document. Stored untrimmed so that `heading + body`
    /// concatenated across sections reproduces the input.
    pub body: String,
}

impl Section {
    /// Create a new section
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Section {
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// Human-readable label for progress output and error context
    pub fn label(&self) -> &str {
        let trimmed = self.heading.trim();
        if trimmed.is_empty() { "preamble" } else { trimmed }
    }
}

/// Classification of a span within a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Fenced code block, passed through untranslated
    CodeBlock,
    /// Pipe-delimited table of at least two lines, passed through untranslated
    Table,
    /// Inline image reference, passed through untranslated
    Image,
    /// Ordinary prose, translatable
    Plain,
}

impl SpanKind {
    /// Whether this span is protected from translation
    pub fn is_protected(&self) -> bool {
        !matches!(self, SpanKind::Plain)
    }
}

/// A classified, contiguous slice of a section's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// What the span contains
    pub kind: SpanKind,
    /// The exact text of the span
    pub text: String,
}

impl Span {
    /// Create a new span
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Span {
            kind,
            text: text.into(),
        }
    }
}

/// Split a document into heading-delimited sections.
///
/// Every line matching `^#+ ` starts a new section regardless of nesting
/// level. Text before the first heading becomes a section with an empty
/// heading, but only when it is not blank. A blank or empty document yields
/// no sections.
///
/// Concatenating `heading` then `body` of the returned sections, in order,
/// reproduces the document byte for byte (minus a dropped all-whitespace
/// preamble).
///
/// Detection runs on the raw document text: a line starting with `#` inside
/// a fenced code block is also treated as a section boundary. This mirrors
/// the behavior of splitting before span classification.
pub fn split_into_sections(document: &str) -> Vec<Section> {
    if document.trim().is_empty() {
        return Vec::new();
    }

    let headings: Vec<_> = HEADING_PATTERN.find_iter(document).collect();
    if headings.is_empty() {
        return vec![Section::new("", document)];
    }

    let mut sections = Vec::with_capacity(headings.len() + 1);

    let preamble = &document[..headings[0].start()];
    if !preamble.trim().is_empty() {
        sections.push(Section::new("", preamble));
    }

    for (i, heading) in headings.iter().enumerate() {
        let body_end = headings
            .get(i + 1)
            .map_or(document.len(), |next| next.start());
        sections.push(Section::new(
            heading.as_str(),
            &document[heading.end()..body_end],
        ));
    }

    sections
}

/// Split a section's text into protected and translatable spans.
///
/// Protected content is found with a single alternation scan, so the
/// earliest-starting match always wins; text between matches becomes
/// [`SpanKind::Plain`]. Empty gaps are dropped, nothing else is; the
/// concatenation of the returned span texts equals the input exactly.
pub fn classify_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for caps in SPECIAL_SPAN_PATTERN.captures_iter(text) {
        let matched = caps.get(0).unwrap();

        if matched.start() > last_end {
            spans.push(Span::new(SpanKind::Plain, &text[last_end..matched.start()]));
        }

        let kind = if caps.name("code").is_some() {
            SpanKind::CodeBlock
        } else if caps.name("table").is_some() {
            SpanKind::Table
        } else {
            SpanKind::Image
        };
        spans.push(Span::new(kind, matched.as_str()));

        last_end = matched.end();
    }

    if last_end < text.len() {
        spans.push(Span::new(SpanKind::Plain, &text[last_end..]));
    }

    spans
}

/// Join translated sections into the final document.
///
/// Each section is trimmed and the results are joined with a blank line.
/// Exact inter-section whitespace from the input is not preserved; only the
/// content and the section order are. This is accepted behavior, not a bug.
pub fn assemble_document(translated_sections: &[String]) -> String {
    translated_sections
        .iter()
        .map(|section| section.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}
