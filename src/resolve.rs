//! Which constants and commands exist at each API level.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::level::ApiLevel;
use crate::registry::{Interface, Registry};

/// Pseudo-api used by the registry to tag extensions that are part of a core profile.
const GLCORE: &str = "glcore";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub constants: BTreeSet<String>,
    pub commands: BTreeSet<String>,
}

impl Selection {
    fn require(&mut self, interface: &Interface) {
        self.constants.extend(interface.enums.iter().cloned());
        self.commands.extend(interface.commands.iter().cloned());
    }

    fn remove(&mut self, interface: &Interface) {
        for name in &interface.enums {
            if !self.constants.remove(name) {
                debug!("Removing constant {} that was never required", name);
            }
        }
        for name in &interface.commands {
            if !self.commands.remove(name) {
                debug!("Removing command {} that was never required", name);
            }
        }
    }
}

/// Every level of one api, with what it contains.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub api: String,
    /// Ordered by version, then profile.
    pub levels: Vec<(ApiLevel, Selection)>,
    /// Constants that only non-enabled extensions ask for. A constant any feature or enabled
    /// extension requires is never disabled.
    pub disabled_constants: BTreeSet<String>,
    /// Enabled extensions that were actually merged.
    pub extensions: Vec<String>,
}

impl Resolution {
    pub fn levels(&self) -> impl Iterator<Item = &ApiLevel> {
        self.levels.iter().map(|(level, _)| level)
    }

    pub fn selection(&self, level: &ApiLevel) -> Option<&Selection> {
        self.levels
            .iter()
            .find(|(candidate, _)| candidate == level)
            .map(|(_, selection)| selection)
    }
}

fn applies_to(interface: &Interface, api: &str) -> bool {
    interface.api.as_deref().map_or(true, |target| target == api)
}

/// Walk the features of `api` in version order and merge `extensions` into every level.
pub fn resolve(registry: &Registry, api: &str, extensions: &[String]) -> Result<Resolution> {
    let features = registry.features_of(api);
    if features.is_empty() {
        warn!(
            "Registry apis are: {}",
            registry.apis().into_iter().collect::<Vec<_>>().join(", ")
        );
        return Err(Error::UnknownApi(api.to_owned()));
    }
    info!("Loading API {}", api);

    // `None` is the profile-less selection; named profiles fork from it on first mention.
    let mut profiles: BTreeMap<Option<String>, Selection> = BTreeMap::new();
    profiles.insert(None, Selection::default());

    let mut levels: Vec<(ApiLevel, Selection)> = Vec::new();
    for feature in features {
        debug!("  Loading API version {}", feature.name);
        for profile in feature.profiles() {
            if !profiles.contains_key(&Some(profile.to_owned())) {
                let base = profiles[&None].clone();
                profiles.insert(Some(profile.to_owned()), base);
            }
        }

        for require in feature.requires.iter().filter(|i| applies_to(i, api)) {
            for (profile, selection) in profiles.iter_mut() {
                if require.profile.is_none() || require.profile == *profile {
                    selection.require(require);
                }
            }
        }
        for remove in feature.removes.iter().filter(|i| applies_to(i, api)) {
            for (profile, selection) in profiles.iter_mut() {
                if remove.profile.is_none() || remove.profile == *profile {
                    selection.remove(remove);
                }
            }
        }

        let has_profiles = profiles.len() > 1;
        for (profile, selection) in &profiles {
            if has_profiles && profile.is_none() {
                continue;
            }
            levels.push((
                ApiLevel::new(api, &feature.name, feature.number, profile.as_deref()),
                selection.clone(),
            ));
        }
    }

    let mut merged = Vec::new();
    for name in extensions {
        let Some(extension) = registry.extension(name) else {
            warn!("Enabled extension {} is not in the registry", name);
            continue;
        };
        if !extension.supports(api) {
            debug!("Extension {} does not support {}", name, api);
            continue;
        }
        for require in &extension.requires {
            let targets: Vec<&str> = match &require.api {
                Some(target) => vec![target.as_str()],
                None => extension.supported.iter().map(String::as_str).collect(),
            };
            if !targets.iter().any(|target| *target == api && *target != GLCORE) {
                continue;
            }
            for (level, selection) in levels.iter_mut() {
                let profile_matches = match (&require.profile, &level.profile) {
                    (Some(wanted), Some(actual)) => wanted == actual,
                    _ => true,
                };
                if profile_matches {
                    selection.require(require);
                }
            }
        }
        merged.push(name.clone());
    }

    let (enabled, disabled): (Vec<_>, Vec<_>) = registry
        .extensions
        .iter()
        .partition(|extension| extensions.contains(&extension.name));
    let required: BTreeSet<&str> = registry
        .features
        .iter()
        .flat_map(|feature| &feature.requires)
        .chain(enabled.iter().flat_map(|extension| &extension.requires))
        .flat_map(|require| &require.enums)
        .map(String::as_str)
        .collect();
    let disabled_constants: BTreeSet<String> = disabled
        .iter()
        .flat_map(|extension| &extension.requires)
        .flat_map(|require| &require.enums)
        .filter(|name| !required.contains(name.as_str()))
        .cloned()
        .collect();

    info!("API {} summary", api);
    for (level, selection) in &levels {
        info!(
            "  {}: {} constants, {} commands",
            level,
            selection.constants.len(),
            selection.commands.len()
        );
    }

    Ok(Resolution {
        api: api.to_owned(),
        levels,
        disabled_constants,
        extensions: merged,
    })
}
