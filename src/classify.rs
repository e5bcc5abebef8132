use oxc_ast::ast::{
    BindingPattern, ClassBody, ClassElement, Expression, PropertyKey, VariableDeclaration,
    VariableDeclarationKind,
};
use oxc_span::{GetSpan, Span};

use crate::config::ClassificationPolicy;
use crate::context::{Context, DerivedValue, ReactiveValue, DERIVED_RUNE, STATE_RUNE};
use crate::occurrences::prefixed_references;

// ═══════════════════════════════════════════════════════════════════════════════
// DECLARATION ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Classifies every declarator of a variable declaration.
///
/// `var` declarations are intentionally skipped to encourage explicit typing
/// of reactive intent. Destructuring patterns are not classification
/// candidates; only plain identifier declarators are considered.
pub fn handle_variable_declaration(decl: &VariableDeclaration<'_>, ctx: &mut Context) {
    if decl.kind == VariableDeclarationKind::Var {
        return;
    }

    for declarator in &decl.declarations {
        if let BindingPattern::BindingIdentifier(id) = &declarator.id {
            classify_declaration(id.name.as_str(), id.span, declarator.init.as_ref(), ctx);
        }
    }
}

/// Classifies class property definitions, in declaration order.
///
/// ```js
/// class Foo {
///   s$foo = "bar";
///   s$baz;
///   d$qux = `Hello, ${this.s$foo}!`;
/// }
/// ```
/// rewrites to
/// ```js
/// class Foo {
///   s$foo = $state("bar");
///   s$baz = $state();
///   d$qux = $derived(`Hello, ${this.s$foo}!`);
/// }
/// ```
pub fn handle_class_body(body: &ClassBody<'_>, ctx: &mut Context) {
    for element in &body.body {
        if let ClassElement::PropertyDefinition(property) = element {
            if let PropertyKey::StaticIdentifier(key) = &property.key {
                classify_declaration(key.name.as_str(), key.span, property.value.as_ref(), ctx);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Decides whether one identifier declaration introduces a state value, a
/// derived value, or neither, and registers it on the context.
pub fn classify_declaration(
    name: &str,
    ident_span: Span,
    initializer: Option<&Expression<'_>>,
    ctx: &mut Context,
) {
    let role = match ctx.config.policy {
        ClassificationPolicy::PrefixRole => prefix_role(name, ctx, initializer),
        ClassificationPolicy::InferredRole => inferred_role(name, ctx, initializer),
    };

    let Some(role) = role else { return };

    let init = match initializer {
        // `let s$foo;` — anchor a zero-width span at the identifier's end so
        // the editor knows to insert the `=` token too. An uninitialized
        // derived-prefixed identifier lands here as well and is registered
        // state-shaped: a derived value always requires an expression.
        None => {
            ctx.state_values.push(ReactiveValue {
                name: name.to_string(),
                span: Span::new(ident_span.end, ident_span.end),
            });
            return;
        }
        Some(init) => init,
    };

    // Already wrapped in a rune call: idempotent no-op.
    if is_rune_call(init) {
        return;
    }

    let value = ReactiveValue {
        name: name.to_string(),
        span: init.span(),
    };

    match role {
        Role::State => ctx.state_values.push(value),
        Role::Derived => {
            let prefixes = [
                ctx.config.prefixes.state.as_str(),
                ctx.config.prefixes.derived.as_str(),
            ];
            let dependencies = prefixed_references(init, &prefixes);
            ctx.derived_values.push(DerivedValue {
                value,
                dependencies,
            });
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    State,
    Derived,
}

/// Canonical policy: the prefix selects the role. The derived prefix is
/// checked first so it wins when one prefix is a prefix of the other.
fn prefix_role(name: &str, ctx: &Context, _initializer: Option<&Expression<'_>>) -> Option<Role> {
    if name.starts_with(&ctx.config.prefixes.derived) {
        Some(Role::Derived)
    } else if name.starts_with(&ctx.config.prefixes.state) {
        Some(Role::State)
    } else {
        None
    }
}

/// Alternate policy: a single prefix marks reactivity, and the declaration is
/// derived when its initializer reads another prefixed identifier.
fn inferred_role(name: &str, ctx: &Context, initializer: Option<&Expression<'_>>) -> Option<Role> {
    let prefix = ctx.config.prefixes.state.as_str();
    if !name.starts_with(prefix) {
        return None;
    }

    let depends_on_reactive = initializer
        .map(|init| {
            prefixed_references(init, &[prefix])
                .iter()
                .any(|dep| dep != name)
        })
        .unwrap_or(false);

    if depends_on_reactive {
        Some(Role::Derived)
    } else {
        Some(Role::State)
    }
}

/// `$state(...)` / `$derived(...)` initializers are left untouched so the
/// transform can be re-run over its own output.
fn is_rune_call(init: &Expression<'_>) -> bool {
    if let Expression::CallExpression(call) = init {
        if let Expression::Identifier(callee) = &call.callee {
            return callee.name == STATE_RUNE || callee.name == DERIVED_RUNE;
        }
    }
    false
}
