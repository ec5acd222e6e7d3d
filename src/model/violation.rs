use serde::Serialize;

/// A point in the scanned source. Lines are 1-based, columns 0-based,
/// matching what the report gutter prints.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// The source region a violation covers. End columns are exclusive.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    StaticImport,
    DynamicImport,
    GlobalAccess,
    EvalCall,
    Require,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub rule: RuleId,
    /// The offending construct as shown to the submitter, e.g. `window.alert`
    /// or `import('./mod')`.
    pub name: String,
    pub reason: String,
    pub span: Span,
}

impl Violation {
    pub fn disallowed_import(specifier: &str, span: Span) -> Self {
        Self {
            rule: RuleId::StaticImport,
            name: specifier.to_string(),
            reason: "Disallowed import".to_string(),
            span,
        }
    }

    /// `target` is the literal specifier when the import argument was a single
    /// string literal, `None` for any other argument shape.
    pub fn dynamic_import(target: Option<&str>, span: Span) -> Self {
        let name = match target {
            Some(specifier) => format!("import('{}')", specifier),
            None => "import([...])".to_string(),
        };
        Self {
            rule: RuleId::DynamicImport,
            name,
            reason: "Disallowed dynamic import".to_string(),
            span,
        }
    }

    pub fn global_access(base: &str, property: &str, span: Span) -> Self {
        Self {
            rule: RuleId::GlobalAccess,
            name: format!("{}.{}", base, property),
            reason: "Disallowed access to global scope".to_string(),
            span,
        }
    }

    pub fn eval_call(span: Span) -> Self {
        Self {
            rule: RuleId::EvalCall,
            name: "eval()".to_string(),
            reason: "Forbidden call to eval".to_string(),
            span,
        }
    }

    pub fn disallowed_require(specifier: &str, span: Span) -> Self {
        Self {
            rule: RuleId::Require,
            name: format!("require('{}')", specifier),
            reason: "Disallowed require".to_string(),
            span,
        }
    }

    /// Zero arguments, several arguments, or a non-literal argument: the
    /// target cannot be checked statically, so the call is rejected outright.
    pub fn dynamic_require(span: Span) -> Self {
        Self {
            rule: RuleId::Require,
            name: "require()".to_string(),
            reason: "Disallowed dynamic require".to_string(),
            span,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleId::StaticImport => write!(f, "static-import"),
            RuleId::DynamicImport => write!(f, "dynamic-import"),
            RuleId::GlobalAccess => write!(f, "global-access"),
            RuleId::EvalCall => write!(f, "eval-call"),
            RuleId::Require => write!(f, "require"),
        }
    }
}
