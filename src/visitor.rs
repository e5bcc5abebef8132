use oxc_ast::ast::{ClassBody, ImportDeclaration, LabeledStatement, VariableDeclaration};
use oxc_ast_visit::{walk, Visit};

use crate::classify;
use crate::context::Context;
use crate::effects;
use crate::imports;

/// The single traversal pass. Visits every node once and forwards
/// classification candidates to the classifier, the effect analyzer, and the
/// import recorder; all state accumulates on the per-file context.
pub struct ReactivityVisitor<'c> {
    pub ctx: &'c mut Context,
}

impl<'a> Visit<'a> for ReactivityVisitor<'_> {
    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        classify::handle_variable_declaration(decl, self.ctx);
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_class_body(&mut self, body: &ClassBody<'a>) {
        classify::handle_class_body(body, self.ctx);
        walk::walk_class_body(self, body);
    }

    fn visit_labeled_statement(&mut self, stmt: &LabeledStatement<'a>) {
        effects::classify_effect(stmt, self.ctx);
        walk::walk_labeled_statement(self, stmt);
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        imports::record_import(decl, self.ctx);
        walk::walk_import_declaration(self, decl);
    }
}
