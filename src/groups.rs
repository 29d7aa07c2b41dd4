//! Token groups: the sets of constants that become one Rust type.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::registry::Registry;
use crate::resolve::Resolution;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenGroup {
    pub name: String,
    pub members: BTreeSet<String>,
    pub bitmask: bool,
}

/// Collect every group the registry mentions, in either encoding.
pub fn collect(registry: &Registry, resolution: &Resolution) -> BTreeMap<String, TokenGroup> {
    let api = resolution.api.as_str();
    let mut groups: BTreeMap<String, TokenGroup> = BTreeMap::new();
    // Per group: were all members declared inside `type="bitmask"` blocks?
    let mut all_in_bitmask_blocks: BTreeMap<String, bool> = BTreeMap::new();

    for name in registry.constants.keys() {
        if resolution.disabled_constants.contains(name) {
            continue;
        }
        let Some(constant) = registry.constant(name, api) else {
            continue;
        };
        for group_name in &constant.groups {
            let group = groups
                .entry(group_name.clone())
                .or_insert_with(|| TokenGroup {
                    name: group_name.clone(),
                    ..TokenGroup::default()
                });
            group.members.insert(name.clone());
            let flag = all_in_bitmask_blocks
                .entry(group_name.clone())
                .or_insert(true);
            *flag &= constant.bitmask_block;
        }
    }

    for (group_name, members) in &registry.legacy_groups {
        let group = groups
            .entry(group_name.clone())
            .or_insert_with(|| TokenGroup {
                name: group_name.clone(),
                ..TokenGroup::default()
            });
        for member in members {
            if resolution.disabled_constants.contains(member) {
                continue;
            }
            let Some(constant) = registry.constant(member, api) else {
                warn!(
                    "Constant referenced by group {} not found: {}",
                    group_name, member
                );
                continue;
            };
            group.members.insert(member.clone());
            let flag = all_in_bitmask_blocks
                .entry(group_name.clone())
                .or_insert(true);
            *flag &= constant.bitmask_block;
        }
    }

    let bitfield_params: BTreeSet<&str> = registry
        .commands
        .values()
        .flat_map(|command| &command.params)
        .filter(|param| param.ty.ptype() == Some("GLbitfield"))
        .filter_map(|param| param.group.as_deref())
        .collect();

    for group in groups.values_mut() {
        group.bitmask = registry.bitmask_groups.contains(&group.name)
            || bitfield_params.contains(group.name.as_str())
            || (!group.members.is_empty()
                && all_in_bitmask_blocks
                    .get(&group.name)
                    .copied()
                    .unwrap_or(false));
    }

    groups
}
