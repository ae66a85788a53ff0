use crate::errors::TemplateResult;
use crate::grammar::GrammarConfig;
use crate::routing::types::{NodeId, NodeKind, ParameterToken, RouteTemplate, TemplateNode};
use log::trace;

/// A piece of flat template text: literal run or bounded parameter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    Text(&'a str),
    Token { raw: &'a str, content: &'a str },
}

/// Splits `text` into literal runs and `{...}` tokens.
///
/// A token's content never holds a parameter bound; an open bound followed by
/// another open bound before any close stays literal.
pub(crate) fn split_tokens<'a>(text: &'a str, grammar: &GrammarConfig) -> Vec<Piece<'a>> {
    let (open, close) = grammar.param_bounds();
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(open) {
        let token_start = cursor + found;
        let content_start = token_start + open.len_utf8();
        let next_bound = text[content_start..]
            .char_indices()
            .find(|&(_, c)| c == open || c == close);

        match next_bound {
            Some((offset, c)) if c == close => {
                let content_end = content_start + offset;
                let token_end = content_end + close.len_utf8();
                if literal_start < token_start {
                    pieces.push(Piece::Text(&text[literal_start..token_start]));
                }
                pieces.push(Piece::Token {
                    raw: &text[token_start..token_end],
                    content: &text[content_start..content_end],
                });
                literal_start = token_end;
                cursor = token_end;
            }
            Some((offset, _)) => cursor = content_start + offset,
            None => break,
        }
    }

    if literal_start < text.len() {
        pieces.push(Piece::Text(&text[literal_start..]));
    }
    pieces
}

/// Parses `template` into a [`RouteTemplate`] tree.
///
/// Optional spans are taken leftmost first; after each span the remainder is
/// scanned again, so malformed or inverted option bounds end up as literal text.
/// Nesting is walked with an explicit work stack, so depth is bounded only by
/// the input length.
pub fn parse_route_template(template: &str, grammar: &GrammarConfig) -> TemplateResult<RouteTemplate> {
    let mut builder = TreeBuilder {
        grammar: *grammar,
        nodes: vec![TemplateNode {
            kind: NodeKind::Root,
            parent: None,
            children: Vec::new(),
        }],
    };
    builder.parse(template)?;

    Ok(RouteTemplate {
        source: template.to_string(),
        grammar: *grammar,
        nodes: builder.nodes,
    })
}

struct TreeBuilder {
    grammar: GrammarConfig,
    nodes: Vec<TemplateNode>,
}

impl TreeBuilder {
    fn push(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TemplateNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn parse(&mut self, template: &str) -> TemplateResult<()> {
        let scanner = self.grammar.option_scanner();
        // The interior of a span is finished before the text after it, which
        // keeps nodes in document order.
        let mut pending = vec![(template, NodeId(0))];
        while let Some((text, parent)) = pending.pop() {
            match scanner.split_span(text) {
                Some((before, interior, after)) => {
                    self.push_pieces(before, parent)?;
                    trace!("parsed optional segment '{}'", interior);
                    let optional = self.push(NodeKind::Optional, parent);
                    pending.push((after, parent));
                    pending.push((interior, optional));
                }
                None => self.push_pieces(text, parent)?,
            }
        }
        Ok(())
    }

    fn push_pieces(&mut self, text: &str, parent: NodeId) -> TemplateResult<()> {
        for piece in split_tokens(text, &self.grammar) {
            let kind = match piece {
                Piece::Text(literal) => NodeKind::Literal(literal.to_string()),
                Piece::Token { raw, content } => NodeKind::Parameter(ParameterToken::from_content(
                    raw,
                    content,
                    self.grammar.separator(),
                )?),
            };
            self.push(kind, parent);
        }
        Ok(())
    }
}
