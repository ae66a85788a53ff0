use crate::errors::{TemplateError, TemplateResult};
use crate::grammar::GrammarConfig;
use crate::routing::parser::{parse_route_template, split_tokens, Piece};
use crate::routing::types::{NodeId, NodeKind, ParameterToken, RouteTemplate};
use crate::values::ParamLookup;
use log::{debug, trace};

/// Text of one sequence while its optional segments are being resolved.
struct Pending {
    id: NodeId,
    next_child: usize,
    /// Kept segments spliced in after substitution.
    resolved: String,
    /// Kept segments spliced in with their tokens intact.
    tokens: String,
}

impl Pending {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            next_child: 0,
            resolved: String::new(),
            tokens: String::new(),
        }
    }

    fn push_str(&mut self, text: &str) {
        self.resolved.push_str(text);
        self.tokens.push_str(text);
    }
}

/// Builds literal paths from route templates and parameter values.
///
/// An optional segment survives only when, after its nested segments were
/// pruned and its parameters substituted, no bound character remains in it.
/// Parameter tokens are recognized only once a sequence has been pruned, so a
/// token may enclose an optional segment: `/x/{a[b]}` resolves `{ab}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateReverser {
    grammar: GrammarConfig,
}

impl TemplateReverser {
    pub fn new(grammar: GrammarConfig) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &GrammarConfig {
        &self.grammar
    }

    /// Reverses `template`, failing with `Irreversible` when a bound character
    /// survives pruning and substitution.
    pub fn reverse<V>(&self, template: &str, values: &V) -> TemplateResult<String>
    where
        V: ParamLookup + ?Sized,
    {
        let tree = parse_route_template(template, &self.grammar)?;
        self.reverse_tree(&tree, values)
    }

    pub fn reverse_tree<V>(&self, template: &RouteTemplate, values: &V) -> TemplateResult<String>
    where
        V: ParamLookup + ?Sized,
    {
        let pruned = self.resolve(template, values);
        let reversed = self.substitute(&pruned.resolved, values);

        if !self.is_reversed(&reversed) {
            debug!("route '{}' is irreversible", template.source());
            return Err(TemplateError::Irreversible {
                template: template.source().to_string(),
                unresolved: self.unresolved(&pruned.resolved, values),
            });
        }

        debug!("reversed route '{}' into '{}'", template.source(), reversed);
        Ok(reversed)
    }

    /// Removes the optional segments that cannot be resolved with `values` and
    /// unwraps the rest.
    ///
    /// Kept segments are unwrapped with their parameter tokens left in place,
    /// rather than replaced by their substituted text. The keep or drop
    /// decisions are the ones `reverse` makes, so substituting the result
    /// gives the `reverse` output whenever no token encloses a segment.
    pub fn prune<V>(&self, template: &str, values: &V) -> TemplateResult<String>
    where
        V: ParamLookup + ?Sized,
    {
        let tree = parse_route_template(template, &self.grammar)?;
        Ok(self.resolve(&tree, values).tokens)
    }

    /// Replaces every well-formed token whose name is supplied in one pass.
    ///
    /// Option bounds are ignored, tokens without a value and malformed tokens
    /// are kept verbatim, and inserted values are never scanned again.
    pub fn substitute<V>(&self, text: &str, values: &V) -> String
    where
        V: ParamLookup + ?Sized,
    {
        let mut substituted = String::with_capacity(text.len());
        for piece in split_tokens(text, &self.grammar) {
            match piece {
                Piece::Text(literal) => substituted.push_str(literal),
                Piece::Token { raw, content } => {
                    let value = self
                        .token(raw, content)
                        .and_then(|token| values.lookup(&token.name));
                    substituted.push_str(value.unwrap_or(raw));
                }
            }
        }
        substituted
    }

    /// True when no option or parameter bound character is left in `text`.
    pub fn is_reversed(&self, text: &str) -> bool {
        !self.grammar.contains_bound(text)
    }

    fn token(&self, raw: &str, content: &str) -> Option<ParameterToken> {
        ParameterToken::from_content(raw, content, self.grammar.separator()).ok()
    }

    /// Names of the tokens in `pruned` that `values` does not supply.
    fn unresolved<V>(&self, pruned: &str, values: &V) -> Vec<String>
    where
        V: ParamLookup + ?Sized,
    {
        let mut names: Vec<String> = Vec::new();
        for piece in split_tokens(pruned, &self.grammar) {
            let Piece::Token { raw, content } = piece else {
                continue;
            };
            if let Some(token) = self.token(raw, content) {
                if !values.contains(&token.name) && !names.contains(&token.name) {
                    names.push(token.name);
                }
            }
        }
        names
    }

    /// Prunes every optional segment innermost first, walking the tree with an
    /// explicit stack. Returns the root sequence.
    fn resolve<V>(&self, template: &RouteTemplate, values: &V) -> Pending
    where
        V: ParamLookup + ?Sized,
    {
        let mut stack = vec![Pending::new(template.root())];
        while let Some(mut current) = stack.pop() {
            let next = template
                .node(current.id)
                .and_then(|node| node.children.get(current.next_child))
                .copied();

            if let Some(child) = next {
                current.next_child += 1;
                match template.node(child).map(|node| &node.kind) {
                    Some(NodeKind::Literal(text)) => current.push_str(text),
                    Some(NodeKind::Parameter(token)) => current.push_str(token.raw()),
                    Some(NodeKind::Optional) => {
                        stack.push(current);
                        stack.push(Pending::new(child));
                        continue;
                    }
                    Some(NodeKind::Root) | None => {}
                }
                stack.push(current);
                continue;
            }

            let Some(parent) = stack.last_mut() else {
                return current;
            };
            let substituted = self.substitute(&current.resolved, values);
            if self.is_reversed(&substituted) {
                trace!("kept optional segment '{}'", substituted);
                parent.resolved.push_str(&substituted);
                parent.tokens.push_str(&current.tokens);
            } else {
                trace!("dropped optional segment resolving to '{}'", substituted);
            }
        }
        Pending::new(template.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn reverser() -> TemplateReverser {
        TemplateReverser::default()
    }

    // **SUBSTITUTION TESTS**
    #[test]
    fn test_substitute_all_params() {
        let values = params(&[("param1", "veni"), ("param2", "vidi"), ("param3", "vici")]);
        assert_eq!(
            reverser().substitute("/test/{param1}/{param2}/{param3}", &values),
            "/test/veni/vidi/vici"
        );
    }

    #[test]
    fn test_substitute_ignores_option_bounds() {
        let values = params(&[("param1", "tests"), ("param2", "are"), ("param3", "fun")]);
        assert_eq!(
            reverser().substitute("/test/{param1}[/{param2}[/{param3}]]", &values),
            "/test/tests[/are[/fun]]"
        );
    }

    #[test]
    fn test_substitute_typed_params() {
        let values = params(&[("param1", "complex"), ("param2", "types"), ("param3", "sub")]);
        assert_eq!(
            reverser().substitute("/test/{param1:digits}/{param2:type}/{param3:01}", &values),
            "/test/complex/types/sub"
        );
    }

    #[test]
    fn test_substitute_some_params() {
        let values = params(&[("param2", "lucky_number_2")]);
        assert_eq!(
            reverser().substitute("/test/{param1}/{param2}/{param3}", &values),
            "/test/{param1}/lucky_number_2/{param3}"
        );
    }

    #[test]
    fn test_substitute_values_are_not_rescanned() {
        let values = params(&[
            ("param1", "#$%^"),
            ("param2", "{param1[invalid!]}"),
            ("param3", "?q=;"),
        ]);
        assert_eq!(
            reverser().substitute("/test/{param1}/{param2}/{param3}", &values),
            "/test/#$%^/{param1[invalid!]}/?q=;"
        );
    }

    #[test]
    fn test_substitute_only_whole_tokens() {
        let route = "/test/{param1}/{param2}/{param3}";
        let partial = params(&[("param", "veni"), ("aram2", "vidi"), ("{param3}", "vici")]);
        assert_eq!(reverser().substitute(route, &partial), route);

        let literal_names = params(&[("test", "1"), ("this", "2"), ("case", "3")]);
        assert_eq!(reverser().substitute("/test/this/case", &literal_names), "/test/this/case");
    }

    #[test]
    fn test_substitute_non_identifier_names() {
        let values = params(&[("_p1", "these"), ("p2;", "are"), ("p^3", "invalid_but_match")]);
        assert_eq!(
            reverser().substitute("/test/{_p1}/{p2;}/{p^3}", &values),
            "/test/these/are/invalid_but_match"
        );
    }

    #[test]
    fn test_substitute_leaves_malformed_tokens() {
        let values = params(&[("a", "x")]);
        assert_eq!(reverser().substitute("/{a:b:c}/{}/{a}", &values), "/{a:b:c}/{}/x");
    }

    #[test]
    fn test_substitute_custom_bounds() {
        let grammar = GrammarConfig::new(('[', ']'), ('<', '>'), ':').unwrap();
        let values = params(&[("param", "fake_out")]);
        assert_eq!(
            TemplateReverser::new(grammar).substitute("/test/{param}/<param>", &values),
            "/test/{param}/fake_out"
        );
    }

    // **PRUNING TESTS**
    #[test]
    fn test_prune_full() {
        let values = params(&[("option1", "options"), ("option2", "are"), ("option3", "fun")]);
        assert_eq!(
            reverser().prune("/test[/{option1}][/{option2}][/{option3}]", &values).unwrap(),
            "/test/{option1}/{option2}/{option3}"
        );
    }

    #[test]
    fn test_prune_some() {
        let values = params(&[("option2", "some")]);
        assert_eq!(
            reverser().prune("/test[/{option1}][/{option2}][/{option3}]", &values).unwrap(),
            "/test/{option2}"
        );
    }

    #[test]
    fn test_prune_nested() {
        let route = "/test[/{option1}[/{option2}]][/{option3}]";
        let both = params(&[("option1", "some"), ("option2", "nest")]);
        assert_eq!(reverser().prune(route, &both).unwrap(), "/test/{option1}/{option2}");

        let no_parent = params(&[("option2", "no_parent_nest"), ("option3", "prune")]);
        assert_eq!(reverser().prune(route, &no_parent).unwrap(), "/test/{option3}");

        let incomplete = params(&[("option1", "incomplete_nest"), ("option3", "prune")]);
        assert_eq!(
            reverser().prune(route, &incomplete).unwrap(),
            "/test/{option1}/{option3}"
        );
    }

    #[test]
    fn test_prune_none_supplied() {
        let values = params(&[("param1", "nothing"), ("param2", "to"), ("param3", "see")]);
        assert_eq!(
            reverser().prune("/test[/{option1}][/{option2}][/{option3}]", &values).unwrap(),
            "/test"
        );
    }

    #[test]
    fn test_prune_keeps_parameterless_segment() {
        let values = params(&[]);
        assert_eq!(reverser().prune("/feed[.rss]", &values).unwrap(), "/feed.rss");
    }

    #[test]
    fn test_prune_drops_segment_with_stray_bound() {
        let values = params(&[]);
        assert_eq!(reverser().prune("/a[/b{c]/d", &values).unwrap(), "/a/d");
    }

    #[test]
    fn test_prune_custom_bounds() {
        let grammar = GrammarConfig::new(('<', '>'), ('=', ';'), ':').unwrap();
        let values = params(&[("option1", "custom"), ("option2", "bounds"), ("option3", "are_fun")]);
        assert_eq!(
            TemplateReverser::new(grammar)
                .prune("/test</=option1;</=option2;</=option3;>>>", &values)
                .unwrap(),
            "/test/=option1;/=option2;/=option3;"
        );
    }

    // **REVERSAL TESTS**
    #[test]
    fn test_reverse_params_and_options() {
        let values = params(&[("param1", "options"), ("param2", "and"), ("param3", "params_are_fun")]);
        assert_eq!(
            reverser().reverse("/test[/{param1}]/{param2}[/{param3}]", &values).unwrap(),
            "/test/options/and/params_are_fun"
        );
    }

    #[test]
    fn test_reverse_missing_required() {
        let values = params(&[("param1", "epic"), ("param2", "fail")]);
        match reverser().reverse("/test/{param1}/{param2}/{param3}", &values) {
            Err(TemplateError::Irreversible { template, unresolved }) => {
                assert_eq!(template, "/test/{param1}/{param2}/{param3}");
                assert_eq!(unresolved, vec!["param3".to_string()]);
            }
            other => panic!("Expected irreversible, got {:?}", other),
        }
    }

    #[test]
    fn test_reverse_value_with_bound_is_irreversible() {
        let values = params(&[("p", "{x}")]);
        assert!(matches!(
            reverser().reverse("/test/{p}", &values),
            Err(TemplateError::Irreversible { ref unresolved, .. }) if unresolved.is_empty()
        ));
        assert_eq!(reverser().reverse("/test[/{p}]", &values).unwrap(), "/test");
    }

    #[test]
    fn test_reverse_tree_reuses_parse() {
        let tree = parse_route_template("/a[/{b}]", &GrammarConfig::default()).unwrap();
        assert_eq!(reverser().reverse_tree(&tree, &params(&[])).unwrap(), "/a");
        assert_eq!(
            reverser().reverse_tree(&tree, &params(&[("b", "c")])).unwrap(),
            "/a/c"
        );
    }

    #[test]
    fn test_reverse_with_pairs() {
        let values = [("id", "7")];
        assert_eq!(reverser().reverse("/user/{id:digits}", &values).unwrap(), "/user/7");
    }

    #[test]
    fn test_is_reversed() {
        assert!(reverser().is_reversed("/test/plain"));
        assert!(!reverser().is_reversed("/test/{p}"));
        assert!(!reverser().is_reversed("/test[/x"));
        assert!(!reverser().is_reversed("/test}"));
    }

    #[test]
    fn test_reverse_token_enclosing_dropped_segment() {
        let values = params(&[("a", "A")]);
        assert_eq!(reverser().reverse("/x/{a[/{b}]}", &values).unwrap(), "/x/A");
        assert_eq!(reverser().prune("/x/{a[/{b}]}", &values).unwrap(), "/x/{a}");
    }

    #[test]
    fn test_reverse_token_enclosing_kept_segment() {
        let values = params(&[("ab", "V")]);
        assert_eq!(reverser().reverse("/x/{a[b]}", &values).unwrap(), "/x/V");

        match reverser().reverse("/x/{a[b]}", &params(&[("a", "A")])) {
            Err(TemplateError::Irreversible { unresolved, .. }) => {
                assert_eq!(unresolved, vec!["ab".to_string()]);
            }
            other => panic!("Expected irreversible, got {:?}", other),
        }
    }

    #[test]
    fn test_kept_segment_is_substituted_before_splicing() {
        let values = params(&[("q", "r"), ("pr", "Z")]);
        assert_eq!(reverser().reverse("/{p[{q}]}", &values).unwrap(), "/Z");
        assert_eq!(reverser().prune("/{p[{q}]}", &values).unwrap(), "/{p{q}}");
    }

    #[test]
    fn test_reverse_deep_nesting() {
        let depth = 10_000;
        let template = format!("/a{}{}", "[x".repeat(depth), "]".repeat(depth));
        let reversed = reverser().reverse(&template, &params(&[])).unwrap();
        assert_eq!(reversed.len(), 2 + depth);

        let unresolvable = format!("/a{}{{p}}{}", "[x".repeat(depth), "]".repeat(depth));
        assert_eq!(
            reverser().reverse(&unresolvable, &params(&[])).unwrap(),
            format!("/a{}", "x".repeat(depth - 1))
        );
    }
}
