//! Requirement line parsing.
//!
//! Three line shapes are recognized, in this order:
//!
//! 1. `-e <path>`: an editable local directory
//! 2. `[-e ]<vcs-uri>@<revision>#egg=<name>`: a version-control checkout
//! 3. `name[extra,extra] op version, op version`: a registry package
//!
//! Blank and comment lines are the caller's business; see
//! [`RequirementCollection::parse`](super::RequirementCollection::parse).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

use super::{Operator, Requirement, RequirementKind, Spec};

const NAME_PATTERN: &str = r"[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?";

/// `name`, optional `[extras]` glued to the name, then whatever follows.
static REGISTRY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<name>{NAME_PATTERN})(?:\[(?P<extras>[^\]]*)\])?(?P<rest>.*)$"
    ))
    .expect("REGISTRY_LINE must compile")
});

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{NAME_PATTERN}$")).expect("PACKAGE_NAME must compile")
});

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.*+!_-]*$").expect("VERSION must compile")
});

static EXTRA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("EXTRA must compile")
});

static EGG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("EGG_NAME must compile")
});

const VCS_SCHEMES: [&str; 4] = ["git+", "hg+", "svn+", "bzr+"];

/// Whether `name` is a well-formed package name.
pub fn is_valid_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// Parse one requirements line.
pub fn parse_line(line: &str) -> Result<Requirement, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(line, "empty line"));
    }

    let (editable, target) = match strip_editable(trimmed) {
        Some(target) => (true, target),
        None => (false, trimmed),
    };

    if looks_like_vcs(target) {
        return parse_vcs(line, target, editable);
    }
    if editable {
        return parse_local_path(line, target);
    }
    parse_registry(line, trimmed)
}

fn strip_editable(line: &str) -> Option<&str> {
    ["-e", "--editable"].iter().find_map(|flag| {
        let rest = line.strip_prefix(flag)?;
        let rest = rest.strip_prefix('=').unwrap_or(rest);
        // `-efoo` is not the flag
        if rest.starts_with(char::is_whitespace) || line.len() - rest.len() > flag.len() {
            Some(rest.trim_start())
        } else {
            None
        }
    })
}

fn looks_like_vcs(target: &str) -> bool {
    VCS_SCHEMES.iter().any(|scheme| target.starts_with(scheme)) || target.contains("://")
}

fn parse_local_path(line: &str, path: &str) -> Result<Requirement, ParseError> {
    if path.is_empty() {
        return Err(ParseError::new(line, "missing path after -e"));
    }
    if path.contains(char::is_whitespace) {
        return Err(ParseError::new(line, "unexpected text after path"));
    }
    Ok(Requirement {
        name: String::new(),
        extras: BTreeSet::new(),
        specs: Vec::new(),
        kind: RequirementKind::LocalPath {
            path: path.to_string(),
        },
    })
}

fn parse_vcs(line: &str, target: &str, editable: bool) -> Result<Requirement, ParseError> {
    let (location, fragment) = target
        .split_once('#')
        .ok_or_else(|| ParseError::new(line, "version control reference needs #egg=<name>"))?;

    let name = fragment
        .split('&')
        .find_map(|part| part.strip_prefix("egg="))
        .filter(|name| EGG_NAME.is_match(name))
        .ok_or_else(|| ParseError::new(line, "version control reference needs #egg=<name>"))?;

    // The revision follows the last '@'; an '@' inside the authority
    // (git+ssh://git@host/...) is followed by a '/' and is not a revision.
    let (uri, revision) = location
        .rsplit_once('@')
        .filter(|(uri, revision)| {
            !uri.is_empty() && !revision.is_empty() && !revision.contains('/')
        })
        .ok_or_else(|| ParseError::new(line, "version control reference needs @<revision>"))?;

    if !uri.contains("://") {
        return Err(ParseError::new(line, "version control reference needs a URI"));
    }

    Ok(Requirement {
        name: name.to_string(),
        extras: BTreeSet::new(),
        specs: Vec::new(),
        kind: RequirementKind::VersionControl {
            uri: uri.to_string(),
            revision: revision.to_string(),
            editable,
        },
    })
}

fn parse_registry(line: &str, trimmed: &str) -> Result<Requirement, ParseError> {
    let caps = REGISTRY_LINE
        .captures(trimmed)
        .ok_or_else(|| ParseError::new(line, "missing package name"))?;

    let name = &caps["name"];
    let rest = &caps["rest"];

    // Anything glued to the name that is not an operator or `[extras]`
    // means the name itself was malformed.
    if let Some(first) = rest.chars().next() {
        if !first.is_whitespace() && !"<>=!~,".contains(first) {
            return Err(ParseError::new(line, "invalid package name"));
        }
    }

    let extras = match caps.name("extras") {
        Some(extras) => parse_extras(line, extras.as_str())?,
        None => BTreeSet::new(),
    };

    let specs = parse_specs(line, rest.trim())?;

    Ok(Requirement {
        name: name.to_string(),
        extras,
        specs,
        kind: RequirementKind::Registry,
    })
}

fn parse_extras(line: &str, extras: &str) -> Result<BTreeSet<String>, ParseError> {
    extras
        .split(',')
        .map(str::trim)
        .map(|extra| {
            if EXTRA.is_match(extra) {
                Ok(extra.to_string())
            } else {
                Err(ParseError::new(line, format!("invalid extra '{}'", extra)))
            }
        })
        .collect()
}

fn parse_specs(line: &str, specs: &str) -> Result<Vec<Spec>, ParseError> {
    if specs.is_empty() {
        return Ok(Vec::new());
    }
    specs
        .split(',')
        .map(str::trim)
        .map(|spec| parse_spec(line, spec))
        .collect()
}

fn parse_spec(line: &str, spec: &str) -> Result<Spec, ParseError> {
    let op = Operator::ALL
        .into_iter()
        .find(|op| spec.starts_with(op.symbol()))
        .ok_or_else(|| {
            let symbol: String = spec
                .chars()
                .take_while(|c| !c.is_alphanumeric() && !c.is_whitespace())
                .collect();
            if symbol.is_empty() {
                ParseError::new(line, format!("expected an operator before '{}'", spec))
            } else {
                ParseError::new(line, format!("unknown operator '{}'", symbol))
            }
        })?;

    let version = spec[op.symbol().len()..].trim();
    if version.is_empty() {
        return Err(ParseError::new(
            line,
            format!("missing version after '{}'", op),
        ));
    }
    if !VERSION.is_match(version) {
        return Err(ParseError::new(line, format!("invalid version '{}'", version)));
    }
    Ok(Spec::new(op, version))
}
