use crate::parsing::source::span::{Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Normal,
    Image,
}

/// A parsed inline node with spans into the source.
///
/// `span` always includes the node's markers. Container nodes keep their
/// children inside [`InlineNode::content_span`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Plain text that isn't part of any special construct.
    Text(Span),
    /// From the end of one line's text to the start of the next.
    SoftBreak(Span),
    HardBreak(Span),
    Emphasis {
        /// Number of marker units on each side.
        level: usize,
        span: Span,
        children: Vec<InlineNode>,
    },
    /// A code span (backtick-delimited). This is a "raw zone": its children
    /// are only text.
    CodeSpan {
        marker_level: usize,
        span: Span,
        children: Vec<InlineNode>,
    },
    /// A link or image, in any of its forms.
    Reference {
        kind: ReferenceKind,
        span: Span,
        /// Between the brackets.
        title: Span,
        /// The inline value, or the definition the key resolved to.
        value: String,
        children: Vec<InlineNode>,
    },
    /// The backslash of an escape. The escaped character stays text.
    EscapingBackslash(Position),
}

impl InlineNode {
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(span) | InlineNode::SoftBreak(span) | InlineNode::HardBreak(span) => {
                *span
            }
            InlineNode::Emphasis { span, .. }
            | InlineNode::CodeSpan { span, .. }
            | InlineNode::Reference { span, .. } => *span,
            InlineNode::EscapingBackslash(at) => Span::new(*at, at + 1),
        }
    }

    /// The range children are parsed from; `None` for leaves.
    pub fn content_span(&self) -> Option<Span> {
        match self {
            InlineNode::Emphasis { level, span, .. } => Some(span.shrink(*level)),
            InlineNode::CodeSpan {
                marker_level, span, ..
            } => Some(span.shrink(*marker_level)),
            InlineNode::Reference { title, .. } => Some(*title),
            _ => None,
        }
    }

    pub fn children(&self) -> &[InlineNode] {
        match self {
            InlineNode::Emphasis { children, .. }
            | InlineNode::CodeSpan { children, .. }
            | InlineNode::Reference { children, .. } => children,
            _ => &[],
        }
    }
}
