use oxc_ast::ast::{ArrowFunctionExpression, Expression};
use oxc_ast_visit::Visit;
use oxc_span::Span;

// ═══════════════════════════════════════════════════════════════════════════════
// OCCURRENCE COLLECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Collects every identifier *reference* matching one name, in source order.
///
/// Binding positions and member-expression property names are not references
/// and are never collected.
struct OccurrenceCollector<'n> {
    name: &'n str,
    spans: Vec<Span>,
}

impl<'a> Visit<'a> for OccurrenceCollector<'_> {
    fn visit_identifier_reference(&mut self, ident: &oxc_ast::ast::IdentifierReference<'a>) {
        if ident.name == self.name {
            self.spans.push(ident.span);
        }
    }
}

/// Every occurrence of `name` inside an effect's arrow body. One span per
/// occurrence, so a name read three times yields three spans.
pub fn occurrences_in_arrow(arrow: &ArrowFunctionExpression<'_>, name: &str) -> Vec<Span> {
    let mut collector = OccurrenceCollector {
        name,
        spans: Vec::new(),
    };
    collector.visit_arrow_function_expression(arrow);
    collector.spans
}

// ═══════════════════════════════════════════════════════════════════════════════
// PREFIXED-REFERENCE COLLECTION
// ═══════════════════════════════════════════════════════════════════════════════

struct PrefixedReferenceCollector<'p> {
    prefixes: &'p [&'p str],
    names: Vec<String>,
}

impl<'a> Visit<'a> for PrefixedReferenceCollector<'_> {
    fn visit_identifier_reference(&mut self, ident: &oxc_ast::ast::IdentifierReference<'a>) {
        if self.prefixes.iter().any(|p| ident.name.starts_with(p)) {
            let name = ident.name.to_string();
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }
}

/// Distinct prefixed identifiers an expression reads, in first-occurrence
/// order. Feeds derived-value dependency lists and the inferred-role policy.
pub fn prefixed_references(expr: &Expression<'_>, prefixes: &[&str]) -> Vec<String> {
    let mut collector = PrefixedReferenceCollector {
        prefixes,
        names: Vec::new(),
    };
    collector.visit_expression(expr);
    collector.names
}
