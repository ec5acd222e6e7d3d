//! The five rule families applied during traversal.
//!
//! Each check matches on a node kind and yields an [`Outcome`]: an optional
//! violation plus whether the traversal may descend into the node's children.
//! Rules are independent, so one node can produce several outcomes (a
//! require-shaped call on a global object trips both the require rule and the
//! global-access rule on the callee). Nothing is deduplicated.

use crate::allowlist::AllowList;
use crate::model::Violation;
use crate::parser::{SourceUnit, node_span};
use tree_sitter::Node;

/// Bare identifiers whose member access means reaching out of the sandbox.
const GLOBAL_OBJECTS: [&str; 4] = ["window", "globalThis", "global", "self"];

pub struct Outcome {
    pub violation: Option<Violation>,
    pub descend: bool,
}

impl Outcome {
    fn clean() -> Self {
        Self {
            violation: None,
            descend: true,
        }
    }

    fn flag(violation: Violation) -> Self {
        Self {
            violation: Some(violation),
            descend: true,
        }
    }

    fn flag_and_veto(violation: Violation) -> Self {
        Self {
            violation: Some(violation),
            descend: false,
        }
    }
}

/// Evaluate every rule whose kind-predicate matches `node`.
pub fn check_node(node: &Node, source: &SourceUnit, allowlist: &AllowList) -> Vec<Outcome> {
    [
        check_static_import(node, source, allowlist),
        check_dynamic_import(node, source, allowlist),
        check_eval_call(node, source, allowlist),
        check_require(node, source, allowlist),
        check_global_access(node, source, allowlist),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// `import ... from '<specifier>'`. Flagged only when the specifier is not
/// on the allow-list.
fn check_static_import(node: &Node, source: &SourceUnit, allowlist: &AllowList) -> Option<Outcome> {
    if node.kind() != "import_statement" {
        return None;
    }
    let specifier = node
        .child_by_field_name("source")
        .and_then(|s| string_literal_value(&s, source))?;

    if allowlist.contains(&specifier) {
        Some(Outcome::clean())
    } else {
        Some(Outcome::flag(Violation::disallowed_import(
            &specifier,
            node_span(node),
        )))
    }
}

/// `import(...)` in call form. Always a violation, allow-list or not. The
/// display name carries the literal target when there is exactly one string
/// argument.
fn check_dynamic_import(
    node: &Node,
    source: &SourceUnit,
    _allowlist: &AllowList,
) -> Option<Outcome> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "import" {
        return None;
    }

    let target = sole_string_argument(node, source);
    Some(Outcome::flag(Violation::dynamic_import(
        target.as_deref(),
        node_span(node),
    )))
}

/// `eval(...)`. Always a violation, and the only rule that vetoes descent:
/// whatever is inside the eval payload is not separately reported.
fn check_eval_call(node: &Node, source: &SourceUnit, _allowlist: &AllowList) -> Option<Outcome> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    if identifier_name(&callee, source)? != "eval" {
        return None;
    }

    Some(Outcome::flag_and_veto(Violation::eval_call(node_span(node))))
}

/// `require('x')`, `obj.require('x')`, `obj['require']('x')`. A single
/// string-literal argument is checked against the allow-list; any other
/// argument shape is a dynamic require and rejected outright.
fn check_require(node: &Node, source: &SourceUnit, allowlist: &AllowList) -> Option<Outcome> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    if !is_require_callee(&callee, source) {
        return None;
    }

    match sole_string_argument(node, source) {
        Some(specifier) if allowlist.contains(&specifier) => Some(Outcome::clean()),
        Some(specifier) => Some(Outcome::flag(Violation::disallowed_require(
            &specifier,
            node_span(node),
        ))),
        None => Some(Outcome::flag(Violation::dynamic_require(node_span(node)))),
    }
}

/// Member access rooted at one of the global objects, in either dot form
/// (`window.alert`) or literal-bracket form (`window['alert']`).
fn check_global_access(node: &Node, source: &SourceUnit, _allowlist: &AllowList) -> Option<Outcome> {
    let property = match node.kind() {
        "member_expression" => {
            let property = node.child_by_field_name("property")?;
            property.utf8_text(source.as_bytes()).ok()?.to_string()
        }
        "subscript_expression" => {
            let index = node.child_by_field_name("index")?;
            string_literal_value(&index, source)?
        }
        _ => return None,
    };

    let base = node.child_by_field_name("object")?;
    let base_name = identifier_name(&base, source)?;
    if !GLOBAL_OBJECTS.contains(&base_name) {
        return None;
    }

    Some(Outcome::flag(Violation::global_access(
        base_name,
        &property,
        node_span(node),
    )))
}

// --- shared node helpers ---

fn identifier_name<'s>(node: &Node, source: &'s SourceUnit) -> Option<&'s str> {
    if node.kind() != "identifier" {
        return None;
    }
    node.utf8_text(source.as_bytes()).ok()
}

/// The literal value of a `string` node, with quotes stripped and escape
/// sequences kept verbatim.
fn string_literal_value(node: &Node, source: &SourceUnit) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let mut value = String::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        value.push_str(child.utf8_text(source.as_bytes()).ok()?);
    }
    Some(value)
}

/// The single string-literal argument of a call, if that is the exact
/// argument shape. Comments inside the argument list do not count.
fn sole_string_argument(call: &Node, source: &SourceUnit) -> Option<String> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let args: Vec<Node> = arguments
        .named_children(&mut cursor)
        .filter(|n| !n.is_extra())
        .collect();

    match args.as_slice() {
        [only] => string_literal_value(only, source),
        _ => None,
    }
}

fn is_require_callee(callee: &Node, source: &SourceUnit) -> bool {
    match callee.kind() {
        "identifier" => identifier_name(callee, source) == Some("require"),
        "member_expression" => callee
            .child_by_field_name("property")
            .and_then(|p| p.utf8_text(source.as_bytes()).ok().map(str::to_string))
            .is_some_and(|name| name == "require"),
        "subscript_expression" => callee
            .child_by_field_name("index")
            .and_then(|i| string_literal_value(&i, source))
            .is_some_and(|name| name == "require"),
        _ => false,
    }
}
