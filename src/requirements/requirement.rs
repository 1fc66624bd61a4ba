//! The parsed form of one requirements line.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ParseError;

use super::parser;

/// A version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// `==`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl Operator {
    /// Every supported operator, two-character symbols first.
    pub const ALL: [Operator; 5] = [
        Operator::Eq,
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
    ];

    /// Look up an operator by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// The operator as written in a requirements file.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    /// Whether the bound includes the version itself (`==`, `>=`, `<=`).
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Operator::Eq | Operator::Ge | Operator::Le)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `(operator, version)` constraint.
///
/// Ordered by symbol then version text, which is the order used when sorting
/// requirements that share a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spec {
    pub op: Operator,
    pub version: String,
}

impl Spec {
    pub fn new(op: Operator, version: impl Into<String>) -> Self {
        Self {
            op,
            version: version.into(),
        }
    }
}

impl PartialOrd for Spec {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Spec {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.op.symbol(), &self.version).cmp(&(other.op.symbol(), &other.version))
    }
}

impl Display for Spec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.version)
    }
}

/// Where a requirement comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequirementKind {
    /// A package resolved by name from the registry.
    Registry,
    /// An editable install of a local directory (`-e ./path`).
    LocalPath { path: String },
    /// A checkout from version control (`git+https://...@rev#egg=name`).
    VersionControl {
        uri: String,
        revision: String,
        editable: bool,
    },
}

/// One requirement entry.
///
/// Equality and hashing look only at the set of specs, not the name or kind:
/// two entries constraining the same versions are the same requirement as far
/// as add-or-replace is concerned.
#[derive(Debug, Clone)]
pub struct Requirement {
    pub(crate) name: String,
    pub(crate) extras: BTreeSet<String>,
    pub(crate) specs: Vec<Spec>,
    pub(crate) kind: RequirementKind,
}

impl Requirement {
    /// Parse a single requirements line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        parser::parse_line(line)
    }

    /// A registry requirement with no extras.
    pub fn registry(name: impl Into<String>, specs: Vec<Spec>) -> Self {
        Self {
            name: name.into(),
            extras: BTreeSet::new(),
            specs,
            kind: RequirementKind::Registry,
        }
    }

    /// Package name; empty for local path requirements.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extras(&self) -> &BTreeSet<String> {
        &self.extras
    }

    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }

    pub fn kind(&self) -> &RequirementKind {
        &self.kind
    }

    /// Case-insensitive key used to decide whether two entries name the same
    /// thing. Local paths are identified by path.
    pub fn identity(&self) -> String {
        match &self.kind {
            RequirementKind::LocalPath { path } => path.clone(),
            _ => self.name.to_lowercase(),
        }
    }

    /// Whether this requirement can be looked up by name (installed set,
    /// registry).
    pub fn has_name_identity(&self) -> bool {
        !matches!(self.kind, RequirementKind::LocalPath { .. })
    }

    /// The specs joined as written in a file: `>= 1.0,<= 2.0`.
    pub fn spec_string(&self) -> String {
        self.specs
            .iter()
            .map(Spec::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn specs_set(&self) -> BTreeSet<&Spec> {
        self.specs.iter().collect()
    }
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        self.specs_set() == other.specs_set()
    }
}

impl Eq for Requirement {}

impl Hash for Requirement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for spec in self.specs_set() {
            spec.hash(state);
        }
    }
}

/// Canonical requirements-file form, without color.
impl Display for Requirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RequirementKind::LocalPath { path } => write!(f, "-e {}", path),
            RequirementKind::VersionControl {
                uri,
                revision,
                editable,
            } => {
                if *editable {
                    f.write_str("-e ")?;
                }
                write!(f, "{}@{}#egg={}", uri, revision, self.name)
            }
            RequirementKind::Registry => {
                f.write_str(&self.name)?;
                if !self.extras.is_empty() {
                    let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
                    write!(f, "[{}]", extras.join(","))?;
                }
                if !self.specs.is_empty() {
                    write!(f, " {}", self.spec_string())?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Requirement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(line: &str) -> Requirement {
        Requirement::parse(line).unwrap()
    }

    #[test]
    fn operator_symbols_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("~="), None);
    }

    #[test]
    fn inclusive_operators() {
        assert!(Operator::Eq.is_inclusive());
        assert!(Operator::Ge.is_inclusive());
        assert!(Operator::Le.is_inclusive());
        assert!(!Operator::Gt.is_inclusive());
        assert!(!Operator::Lt.is_inclusive());
    }

    #[test]
    fn equality_ignores_name() {
        assert_eq!(req("docopt >= 1.0"), req("six >= 1.0"));
        assert_ne!(req("docopt >= 1.0"), req("docopt >= 1.1"));
    }

    #[test]
    fn equality_ignores_spec_order() {
        assert_eq!(req("a >= 1.0, <= 2.0"), req("a <= 2.0, >= 1.0"));
    }

    #[test]
    fn hash_agrees_with_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(req("a >= 1.0, <= 2.0"));
        assert!(set.contains(&req("b <= 2.0, >= 1.0")));
    }

    #[test]
    fn display_registry_forms() {
        assert_eq!(req("docopt >= 0.6.2").to_string(), "docopt >= 0.6.2");
        assert_eq!(req("docopt>=0.6.2").to_string(), "docopt >= 0.6.2");
        assert_eq!(req("a >= 1, < 2").to_string(), "a >= 1,< 2");
        assert_eq!(req("requests[socks,security]").to_string(), "requests[security,socks]");
        assert_eq!(req("bare").to_string(), "bare");
    }

    #[test]
    fn display_local_and_vcs_forms() {
        assert_eq!(req("-e ./lib/thing").to_string(), "-e ./lib/thing");
        assert_eq!(
            req("-e git+https://github.com/org/pkg.git@v1.2#egg=pkg").to_string(),
            "-e git+https://github.com/org/pkg.git@v1.2#egg=pkg"
        );
        assert_eq!(
            req("git+https://github.com/org/pkg.git@main#egg=pkg").to_string(),
            "git+https://github.com/org/pkg.git@main#egg=pkg"
        );
    }

    #[test]
    fn identity_is_case_insensitive_name_or_path() {
        assert_eq!(req("Django >= 4").identity(), "django");
        assert_eq!(req("-e ./local").identity(), "./local");
        assert!(!req("-e ./local").has_name_identity());
    }

    #[test]
    fn spec_ordering_is_symbol_then_version() {
        let lt = Spec::new(Operator::Lt, "2");
        let ge = Spec::new(Operator::Ge, "1");
        let eq = Spec::new(Operator::Eq, "3");
        let mut specs = vec![ge.clone(), lt.clone(), eq.clone()];
        specs.sort();
        assert_eq!(specs, vec![lt, eq, ge]);
    }
}
