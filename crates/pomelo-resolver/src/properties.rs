//! `${...}` property interpolation against a POM.
//!
//! Emulates the slice of Maven's property resolution the POM cataloger
//! needs: the `<properties>` map with recursive substitution, and
//! `project.*` structural expressions evaluated through an explicit
//! accessor table.

use std::collections::HashSet;

use pomelo_maven::pom::Pom;

/// Resolve all `${...}` references in a value against a POM.
///
/// Substitution is left-to-right and non-overlapping. A reference that
/// cannot be resolved stays in place verbatim; unresolved expressions are
/// observable results, not errors.
pub fn resolve_value(pom: &Pom, value: &str) -> String {
    if !value.contains("${") {
        return value.to_string();
    }
    let mut visited = HashSet::new();
    substitute(pom, value, &mut visited)
}

/// Whether a version string came out of resolution usable as-is.
pub fn is_resolved(value: &str) -> bool {
    !value.starts_with("${")
}

fn substitute(pom: &Pom, value: &str, visited: &mut HashSet<String>) -> String {
    let mut out = String::new();
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}').map(|i| start + i) else {
            break;
        };
        out.push_str(&rest[..start]);
        let literal = &rest[start..=end];
        let key = rest[start + 2..end].trim();
        match resolve_key(pom, key, visited) {
            Some(resolved) => out.push_str(&resolved),
            None => out.push_str(literal),
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_key(pom: &Pom, key: &str, visited: &mut HashSet<String>) -> Option<String> {
    resolve_property(pom, key, visited).or_else(|| project_expression(pom, key))
}

/// Resolve a key through the properties map, recursively substituting
/// references inside the stored value.
///
/// The visited set is the active resolution stack; re-entering a key
/// breaks the cycle. A value that resolves back to its own `${key}`
/// literal counts as unresolved.
fn resolve_property(pom: &Pom, key: &str, visited: &mut HashSet<String>) -> Option<String> {
    if !visited.insert(key.to_string()) {
        return None;
    }
    let result = pom.properties.get(key).and_then(|raw| {
        let resolved = if raw.contains("${") {
            substitute(pom, raw, visited)
        } else {
            raw.clone()
        };
        if resolved == format!("${{{key}}}") {
            None
        } else {
            Some(resolved)
        }
    });
    visited.remove(key);
    result
}

/// Evaluate a `project.*` dotted path against the POM's structural
/// fields.
///
/// The supported paths are spelled out here rather than discovered by
/// reflection, so the contract is explicit: any step through an absent
/// field yields `None` and the caller keeps the original literal.
fn project_expression(pom: &Pom, key: &str) -> Option<String> {
    let path = key.strip_prefix("project.")?;
    match path {
        "groupId" => pom.group_id.clone(),
        "artifactId" => pom.artifact_id.clone(),
        "version" => pom.version.clone(),
        "packaging" => pom.packaging.clone(),
        "name" => pom.name.clone(),
        "description" => pom.description.clone(),
        "url" => pom.url.clone(),
        "parent.groupId" => pom.parent.as_ref().map(|p| p.group_id.clone()),
        "parent.artifactId" => pom.parent.as_ref().map(|p| p.artifact_id.clone()),
        "parent.version" => pom.parent.as_ref().map(|p| p.version.clone()),
        "parent.relativePath" => pom.parent.as_ref().and_then(|p| p.relative_path.clone()),
        _ => None,
    }
}
