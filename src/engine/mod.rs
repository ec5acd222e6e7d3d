//! Generic depth-first rule traversal.
//!
//! The walk is schema-free: children are enumerated through a tree cursor in
//! grammar order, so node kinds the rules know nothing about are still
//! descended into. Rules only get to observe kinds they match and to veto
//! descent into their own subtree.

mod rules;

use crate::allowlist::AllowList;
use crate::model::{Position, Violation};
use crate::parser::{SourceUnit, node_span};
use thiserror::Error;
use tree_sitter::Node;

/// Traversal depth cap. Machine-generated submissions can nest deeply enough
/// to exhaust the stack; past this depth the scan fails closed as invalid
/// input instead of recursing further.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

#[derive(Debug, Error)]
#[error("Maximum nesting depth exceeded at ({position})")]
pub struct DepthExceeded {
    pub position: Position,
}

/// Run every rule over the tree rooted at `root`, collecting violations in
/// pre-order traversal order. Pure per call: all state lives in the
/// accumulator threaded through the recursion.
pub fn run_rules(
    root: Node,
    source: &SourceUnit,
    allowlist: &AllowList,
) -> Result<Vec<Violation>, DepthExceeded> {
    let mut violations = Vec::new();
    visit(root, source, allowlist, 0, &mut violations)?;
    Ok(violations)
}

fn visit(
    node: Node,
    source: &SourceUnit,
    allowlist: &AllowList,
    depth: usize,
    violations: &mut Vec<Violation>,
) -> Result<(), DepthExceeded> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(DepthExceeded {
            position: node_span(&node).start,
        });
    }

    let mut descend = true;
    for outcome in rules::check_node(&node, source, allowlist) {
        if let Some(violation) = outcome.violation {
            violations.push(violation);
        }
        descend &= outcome.descend;
    }

    if !descend {
        return Ok(());
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, source, allowlist, depth + 1, violations)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleId;
    use crate::parser::{Dialect, parse};

    fn collect(source_text: &str, allowed: &[&str]) -> Vec<Violation> {
        let source = SourceUnit::new(source_text);
        let allowlist: AllowList = allowed.iter().copied().collect();
        let tree = parse(&source, Dialect::TypeScript).expect("test source must parse");
        run_rules(tree.root_node(), &source, &allowlist).expect("within depth limits")
    }

    #[test]
    fn clean_source_has_no_violations() {
        let violations = collect("const add = (a: number, b: number) => a + b;\n", &[]);
        assert!(violations.is_empty());
    }

    #[test]
    fn allowed_import_is_not_flagged() {
        let violations = collect("import fs from 'fs';\n", &["fs"]);
        assert!(violations.is_empty());
    }

    #[test]
    fn disallowed_import_is_flagged_with_its_specifier() {
        let violations = collect("import fs from 'fs';\n", &[]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleId::StaticImport);
        assert_eq!(violations[0].name, "fs");
        assert_eq!(violations[0].reason, "Disallowed import");
        assert_eq!(violations[0].span.start.line, 1);
        assert_eq!(violations[0].span.start.column, 0);
    }

    #[test]
    fn dynamic_import_is_flagged_even_when_allowed() {
        let violations = collect("import('./mod');\n", &["./mod"]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].name, "import('./mod')");
        assert_eq!(violations[0].rule, RuleId::DynamicImport);
    }

    #[test]
    fn dynamic_import_with_non_literal_target() {
        let violations = collect("const m = 'x'; import(m);\n", &[]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].name, "import([...])");
    }

    #[test]
    fn eval_vetoes_descent_into_its_arguments() {
        let violations = collect("eval(require('child_process'));\n", &[]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleId::EvalCall);
        assert_eq!(violations[0].reason, "Forbidden call to eval");
    }

    #[test]
    fn require_with_literal_checks_the_allowlist() {
        assert!(collect("require('fs');\n", &["fs"]).is_empty());

        let violations = collect("require('fs');\n", &[]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].name, "require('fs')");
        assert_eq!(violations[0].reason, "Disallowed require");
    }

    #[test]
    fn dynamic_require_shapes_are_always_flagged() {
        for source in ["require(x);\n", "require();\n", "require('a', 'b');\n"] {
            let violations = collect(source, &["a", "b", "x"]);
            assert_eq!(violations.len(), 1, "source: {source}");
            assert_eq!(violations[0].reason, "Disallowed dynamic require");
            assert_eq!(violations[0].name, "require()");
        }
    }

    #[test]
    fn member_require_forms_are_require_calls() {
        let dotted = collect("obj.require('fs');\n", &[]);
        assert_eq!(dotted.len(), 1);
        assert_eq!(dotted[0].reason, "Disallowed require");

        let bracketed = collect("obj['require']('fs');\n", &[]);
        assert_eq!(bracketed.len(), 1);
        assert_eq!(bracketed[0].reason, "Disallowed require");
    }

    #[test]
    fn global_member_access_is_flagged_in_both_forms() {
        let dotted = collect("window.alert('hi');\n", &[]);
        assert!(dotted.iter().any(|v| v.name == "window.alert"));

        let bracketed = collect("globalThis['fetch']('url');\n", &[]);
        assert!(bracketed.iter().any(|v| v.name == "globalThis.fetch"));
    }

    #[test]
    fn overlapping_rules_both_fire() {
        // A require-shaped call on a global object: the call trips the
        // require rule and its callee trips the global-access rule.
        let violations = collect("window.require('fs');\n", &[]);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.rule == RuleId::Require));
        assert!(violations.iter().any(|v| v.rule == RuleId::GlobalAccess));
    }

    #[test]
    fn plain_member_access_on_local_objects_is_fine() {
        let violations = collect("const o = { a: 1 }; console.log(o.a);\n", &[]);
        assert!(violations.is_empty());
    }

    #[test]
    fn deep_nesting_fails_closed() {
        let depth = MAX_TRAVERSAL_DEPTH + 8;
        let source = format!("const x = {}1{};\n", "(".repeat(depth), ")".repeat(depth));
        let unit = SourceUnit::new(source);
        let tree = parse(&unit, Dialect::TypeScript).expect("nested parens still parse");
        let result = run_rules(tree.root_node(), &unit, &AllowList::default());
        assert!(result.is_err());
    }
}
