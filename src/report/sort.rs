// Findings table ordering.
//
// Sorting always works on a copy; the report's own violation list keeps
// the order the server sent. Ties keep their relative order in both
// directions because `sort_by` is stable and reversing `Equal` is `Equal`.

use std::cmp::Ordering;
use std::str::FromStr;

use super::models::Violation;

/// Column the findings table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Impact,
    Help,
    NodesAffected,
    Id,
    Description,
}

impl SortKey {
    /// Direction adopted when switching to this column.
    pub fn default_direction(&self) -> SortDir {
        match self {
            SortKey::NodesAffected => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Impact => "impact",
            SortKey::Help => "help",
            SortKey::NodesAffected => "nodesAffected",
            SortKey::Id => "id",
            SortKey::Description => "description",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "impact" => Ok(SortKey::Impact),
            "help" | "issue" => Ok(SortKey::Help),
            "nodesaffected" | "nodes" | "nodes-affected" => Ok(SortKey::NodesAffected),
            "id" | "rule" => Ok(SortKey::Id),
            "description" => Ok(SortKey::Description),
            other => Err(format!(
                "unknown sort key '{other}' (expected impact, help, nodes, id or description)"
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flipped(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }
}

/// Current column and direction of the findings table.
///
/// Starts at (impact, desc). Only [`SortState::toggle`] changes it, and a
/// new analysis leaves it as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Impact,
            dir: SortDir::Desc,
        }
    }
}

impl SortState {
    /// Column-header click: flip on the same key, otherwise switch to the
    /// new key in its default direction.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.dir = self.dir.flipped();
        } else {
            self.key = key;
            self.dir = key.default_direction();
        }
    }

    pub fn apply(&self, violations: &[Violation]) -> Vec<Violation> {
        sort_violations(violations, self.key, self.dir)
    }
}

/// Return a stably sorted copy of `violations`.
pub fn sort_violations(violations: &[Violation], key: SortKey, dir: SortDir) -> Vec<Violation> {
    let mut sorted = violations.to_vec();
    sorted.sort_by(|a, b| dir.apply(compare_by(a, b, key)));
    sorted
}

fn compare_by(a: &Violation, b: &Violation, key: SortKey) -> Ordering {
    match key {
        SortKey::Impact => a.impact.rank().cmp(&b.impact.rank()),
        SortKey::NodesAffected => a.nodes_affected.cmp(&b.nodes_affected),
        SortKey::Help => compare_text(a.help.as_deref(), b.help.as_deref()),
        SortKey::Id => compare_text(a.id.as_deref(), b.id.as_deref()),
        SortKey::Description => {
            compare_text(a.description.as_deref(), b.description.as_deref())
        }
    }
}

/// Case-insensitive comparison; missing values sort as the empty string.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or_default().to_lowercase();
    let b = b.unwrap_or_default().to_lowercase();
    a.cmp(&b)
}
