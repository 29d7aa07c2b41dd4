//! Grouping items by the set of levels they appear in.

use std::collections::{BTreeMap, BTreeSet};

use crate::level::ApiLevel;
use crate::resolve::{Resolution, Selection};

/// The levels an item exists in.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guard(pub BTreeSet<ApiLevel>);

impl Guard {
    pub fn contains(&self, level: &ApiLevel) -> bool {
        self.0.contains(level)
    }

    /// True if every level of `other` is also in `self`.
    pub fn covers(&self, other: &Guard) -> bool {
        other.0.is_subset(&self.0)
    }

    pub fn union(&self, other: &Guard) -> Guard {
        Guard(self.0.union(&other.0).cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = &ApiLevel> {
        self.0.iter()
    }
}

/// Which levels end up in the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Only items of this level, without any `cfg`.
    Only(ApiLevel),
    /// Items of every level, gated by Cargo features.
    All { levels: BTreeSet<ApiLevel> },
}

impl Filter {
    pub fn all(resolution: &Resolution) -> Self {
        Filter::All {
            levels: resolution.levels().cloned().collect(),
        }
    }

    pub fn admits(&self, guard: &Guard) -> bool {
        match self {
            Filter::Only(level) => guard.contains(level),
            Filter::All { .. } => !guard.is_empty(),
        }
    }

    /// The `cfg` predicate for `guard`, or `None` if the item needs no gate.
    pub fn cfg(&self, guard: &Guard) -> Option<String> {
        let Filter::All { levels } = self else {
            return None;
        };
        if guard.0 == *levels {
            return None;
        }
        let features: Vec<String> = guard
            .levels()
            .map(|level| format!("feature = \"{}\"", level.cargo_feature()))
            .collect();
        Some(match features.as_slice() {
            [single] => single.clone(),
            _ => format!("any({})", features.join(", ")),
        })
    }
}

/// For every name chosen by `pick` in some level, the levels it is in.
pub fn guards_by_item<'a>(
    resolution: &'a Resolution,
    pick: impl Fn(&'a Selection) -> &'a BTreeSet<String>,
) -> BTreeMap<&'a str, Guard> {
    let mut guards: BTreeMap<&str, Guard> = BTreeMap::new();
    for (level, selection) in &resolution.levels {
        for name in pick(selection) {
            guards
                .entry(name.as_str())
                .or_default()
                .0
                .insert(level.clone());
        }
    }
    guards
}

/// Reverse of [`guards_by_item`], so items sharing a guard can be written together.
pub fn group_by_guard<'a>(
    guards: impl IntoIterator<Item = (&'a str, Guard)>,
) -> BTreeMap<Guard, BTreeSet<&'a str>> {
    let mut grouped: BTreeMap<Guard, BTreeSet<&str>> = BTreeMap::new();
    for (name, guard) in guards {
        grouped.entry(guard).or_default().insert(name);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::mini;
    use crate::resolve::resolve;

    fn level(resolution: &Resolution, name: &str) -> ApiLevel {
        resolution
            .levels()
            .find(|level| level.name() == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn commands_by_guard() {
        let resolution = resolve(&mini(), "gl", &[]).unwrap();
        let guards = guards_by_item(&resolution, |selection| &selection.commands);
        assert_eq!(guards["glClear"].0.len(), 5);
        assert_eq!(guards["glBegin"].0.len(), 3);
        assert!(guards["glBegin"].contains(&level(&resolution, "GL_VERSION_4_5_compatibility")));
        assert_eq!(guards["glClear"], guards["glEnable"]);

        let grouped = group_by_guard(guards);
        let everywhere = grouped
            .iter()
            .find(|(guard, _)| guard.0.len() == 5)
            .map(|(_, names)| names)
            .unwrap();
        assert!(everywhere.contains("glClear"));
        assert!(everywhere.contains("glEnable"));
    }

    #[test]
    fn cfg_only_when_partial() {
        let resolution = resolve(&mini(), "gl", &[]).unwrap();
        let filter = Filter::all(&resolution);
        let guards = guards_by_item(&resolution, |selection| &selection.commands);

        assert_eq!(filter.cfg(&guards["glClear"]), None);
        assert_eq!(
            filter.cfg(&guards["glNamedBufferData"]).unwrap(),
            "any(feature = \"gl_version_4_5_compatibility\", feature = \"gl_version_4_5_core\")"
        );

        let only = Filter::Only(level(&resolution, "GL_VERSION_3_2_core"));
        assert!(only.admits(&guards["glClear"]));
        assert!(!only.admits(&guards["glBegin"]));
        assert_eq!(only.cfg(&guards["glClear"]), None);
    }

    #[test]
    fn covers_and_union() {
        let resolution = resolve(&mini(), "gl", &[]).unwrap();
        let guards = guards_by_item(&resolution, |selection| &selection.commands);
        assert!(guards["glClear"].covers(&guards["glBegin"]));
        assert!(!guards["glBegin"].covers(&guards["glClear"]));
        assert_eq!(guards["glBegin"].union(&guards["glClear"]), guards["glClear"]);
    }
}
