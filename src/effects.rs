use oxc_ast::ast::{ArrowFunctionExpression, Expression, LabeledStatement, Statement};

use crate::context::{BlockKind, Context, Effect, EffectBlock, ReactiveValue};
use crate::occurrences::occurrences_in_arrow;

/// Recognizes a labeled statement as an effect and records its shape.
///
/// Three shapes are accepted:
///
/// ```js
/// // Scope block
/// e$: {
///   console.log(s$count, d$double);
/// }
///
/// // Arrow body
/// e$: () => {
///   console.log(s$count, d$double);
/// };
///
/// // Sequence with untracked references: every element before the trailing
/// // arrow names a reactive value whose reads inside the arrow are excluded
/// // from dependency tracking.
/// e$: d$double,
///   () => {
///     console.log(s$count, d$double);
///   };
/// ```
///
/// Any other body shape is rejected silently: the statement is left
/// untouched and no diagnostic is raised.
pub fn classify_effect(stmt: &LabeledStatement<'_>, ctx: &mut Context) {
    if stmt.label.name.as_str() != ctx.config.prefixes.effect {
        return;
    }

    match &stmt.body {
        Statement::BlockStatement(block) => {
            ctx.effects.push(Effect {
                span: stmt.span,
                block: EffectBlock {
                    kind: BlockKind::Scope,
                    span: block.span,
                },
                untracked: Vec::new(),
            });
        }
        Statement::ExpressionStatement(body) => match &body.expression {
            Expression::ArrowFunctionExpression(arrow) => {
                ctx.effects.push(Effect {
                    span: stmt.span,
                    block: EffectBlock {
                        kind: BlockKind::Arrow,
                        span: arrow.span,
                    },
                    untracked: Vec::new(),
                });
            }
            Expression::SequenceExpression(sequence) => {
                let expressions = &sequence.expressions;

                // The effect body is the trailing arrow; a sequence ending in
                // anything else is not an effect.
                let Some(Expression::ArrowFunctionExpression(arrow)) = expressions.last() else {
                    return;
                };

                let untracked =
                    collect_untracked(&expressions[..expressions.len() - 1], arrow, ctx);

                ctx.effects.push(Effect {
                    span: stmt.span,
                    block: EffectBlock {
                        kind: BlockKind::Arrow,
                        span: arrow.span,
                    },
                    untracked,
                });
            }
            _ => {}
        },
        _ => {}
    }
}

/// One untracked entry per occurrence: a name referenced three times inside
/// the arrow yields three entries.
fn collect_untracked(
    markers: &[Expression<'_>],
    arrow: &ArrowFunctionExpression<'_>,
    ctx: &Context,
) -> Vec<ReactiveValue> {
    let mut untracked = Vec::new();

    for marker in markers {
        let Expression::Identifier(ident) = marker else {
            continue;
        };
        if !ctx.is_known_reactive(ident.name.as_str()) {
            continue;
        }

        for span in occurrences_in_arrow(arrow, ident.name.as_str()) {
            untracked.push(ReactiveValue {
                name: ident.name.to_string(),
                span,
            });
        }
    }

    untracked
}
