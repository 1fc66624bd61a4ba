//! Shared display helpers.
//!
//! Line formats shared by `check`, `list`, `packages`, `duplicates` and
//! `info`, so they render requirements and packages consistently.

use crate::packages::InstalledPackage;
use crate::registry::PackageInfo;
use crate::requirements::{
    Duplicate, LatestStatus, MatchKind, Requirement, RequirementKind, Satisfaction, Status,
};
use crate::ui::{pluralize, ReqzTheme};

/// Width of the name column.
pub const NAME_WIDTH: usize = 30;

const INFO_WIDTH: usize = 76;
const INDENT: &str = "    ";

/// Name shown for a requirement; local paths show their path.
pub fn display_name(requirement: &Requirement) -> String {
    if requirement.has_name_identity() {
        requirement.name().to_string()
    } else {
        requirement.identity()
    }
}

/// The required-version column: `installed` when any spec pins version `0`.
pub fn required_display(requirement: &Requirement) -> String {
    if requirement.specs().iter().any(|spec| spec.version == "0") {
        "installed".to_string()
    } else {
        requirement.spec_string()
    }
}

/// A requirement line with the name padded, for lists.
pub fn aligned_requirement(requirement: &Requirement, theme: &ReqzTheme) -> String {
    if !matches!(requirement.kind(), RequirementKind::Registry) {
        return requirement.to_string();
    }
    let extras = if requirement.extras().is_empty() {
        String::new()
    } else {
        let extras: Vec<&str> = requirement.extras().iter().map(String::as_str).collect();
        format!("[{}]", extras.join(","))
    };
    let line = format!(
        "{:<width$}{} {}",
        theme.name.apply_to(requirement.name()),
        extras,
        theme.version.apply_to(requirement.spec_string()),
        width = NAME_WIDTH
    );
    line.trim_end().to_string()
}

/// The check status line for one requirement.
///
/// `Ok|Error`, name, installed version, marker, required specs.
pub fn status_line(status: &Status, theme: &ReqzTheme) -> String {
    let error = status.is_error();
    let verbose = if error {
        theme.error.apply_to("Error")
    } else {
        theme.ok.apply_to("Ok")
    };
    let installed = match (&status.installed_version, status.satisfaction) {
        (Some(version), _) => theme.version.apply_to(format!("v. {}", version)),
        (None, Satisfaction::Untracked) => theme.dim.apply_to("local".to_string()),
        (None, _) => theme.error.apply_to("not installed".to_string()),
    };
    let required_style = if error { &theme.error } else { &theme.ok };

    let line = format!(
        "{:<5} {:<name_width$} {:<13} {} {}",
        verbose,
        theme.name.apply_to(display_name(&status.requirement)),
        installed,
        marker(status.satisfaction, theme),
        required_style.apply_to(required_display(&status.requirement)),
        name_width = NAME_WIDTH
    );
    line.trim_end().to_string()
}

/// Suffix describing the registry's latest release.
pub fn latest_suffix(latest: &LatestStatus, theme: &ReqzTheme) -> String {
    let version_style = match latest.satisfaction {
        Satisfaction::Satisfied(MatchKind::Exact) => &theme.ok,
        Satisfaction::Satisfied(_) => &theme.warning,
        _ => &theme.error,
    };
    format!(
        "{} {}: {:<10}",
        marker(latest.satisfaction, theme),
        theme.registry.apply_to("latest"),
        version_style.apply_to(&latest.version)
    )
}

fn marker(satisfaction: Satisfaction, theme: &ReqzTheme) -> String {
    let symbol = satisfaction.marker();
    let style = match satisfaction {
        Satisfaction::Satisfied(MatchKind::Loose) => &theme.warning,
        Satisfaction::Unsatisfied | Satisfaction::NotInstalled => &theme.error,
        _ => return symbol.to_string(),
    };
    style.apply_to(symbol).to_string()
}

/// One installed package: name, version, location.
pub fn package_line(package: &InstalledPackage, theme: &ReqzTheme) -> String {
    let line = format!(
        "{:<name_width$} v. {:<12} {}",
        theme.name.apply_to(&package.name),
        theme.version.apply_to(package.version.as_str()),
        theme.location.apply_to(package.location().display()),
        name_width = NAME_WIDTH
    );
    line.trim_end().to_string()
}

/// `<name> has K duplicate(s)`, right-aligned.
pub fn duplicate_line(duplicate: &Duplicate, theme: &ReqzTheme) -> String {
    format!(
        "{:>name_width$} has {} {}",
        theme.name.apply_to(duplicate.requirement.name()),
        theme.count.apply_to(duplicate.count),
        pluralize(duplicate.count, "duplicate", "duplicates"),
        name_width = NAME_WIDTH
    )
}

/// Registry metadata as a block of lines.
pub fn package_info_lines(info: &PackageInfo, theme: &ReqzTheme) -> Vec<String> {
    let mut lines = Vec::new();

    let other_releases = info.release_count().saturating_sub(1);
    let release_count = if other_releases > 0 {
        format!(
            "(+{} {})",
            theme.count.apply_to(other_releases),
            pluralize(other_releases, "release", "releases")
        )
    } else {
        String::new()
    };
    let header = format!(
        "{:<name_width$} {:<10} {}",
        theme.name.apply_to(&info.name),
        theme.version.apply_to(&info.latest_version),
        release_count,
        name_width = NAME_WIDTH
    );
    lines.push(header.trim_end().to_string());

    if let Some(summary) = &info.summary {
        for line in wrap(summary, INFO_WIDTH - INDENT.len()) {
            lines.push(format!("{}{}", INDENT, theme.version.apply_to(line)));
        }
    }

    let author = info
        .author
        .as_ref()
        .map(|a| format!("{}: {}", theme.label.apply_to("Author"), theme.version.apply_to(a)));
    let email = info
        .author_email
        .as_ref()
        .map(|e| format!("<{}>", theme.version.apply_to(e)));
    match (author, email) {
        (Some(author), Some(email)) => lines.push(format!("{}{} {}", INDENT, author, email)),
        (Some(one), None) | (None, Some(one)) => lines.push(format!("{}{}", INDENT, one)),
        (None, None) => {}
    }

    if let Some(homepage) = &info.homepage {
        lines.push(format!(
            "{}{}: {}",
            INDENT,
            theme.label.apply_to("Homepage"),
            theme.version.apply_to(homepage)
        ));
    }

    if let Some((version, downloads)) = info.latest_release() {
        lines.push(format!(
            "{}{}: {} ({} dls, {} for all versions)",
            INDENT,
            theme.label.apply_to("Latest"),
            theme.version.apply_to(version),
            theme.count.apply_to(downloads),
            theme.count.apply_to(info.total_downloads())
        ));
    }

    lines
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
