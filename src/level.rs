//! API levels: one version of one api, optionally narrowed to a profile.

use std::fmt;

use crate::error::{Error, Result};

/// Prefix of the classic guard macros, `API_LEVEL_GL_VERSION_4_5_core`.
pub const API_LEVEL_PREFIX: &str = "API_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiLevel {
    pub api: String,
    /// Version number, used for ordering.
    pub number: (u8, u8),
    pub profile: Option<String>,
    /// Feature name, e.g. `GL_VERSION_4_5`.
    pub feature: String,
}

impl ApiLevel {
    pub fn new(api: &str, feature: &str, number: (u8, u8), profile: Option<&str>) -> Self {
        ApiLevel {
            api: api.to_owned(),
            number,
            profile: profile.map(str::to_owned),
            feature: feature.to_owned(),
        }
    }

    /// `GL_VERSION_4_5_core`, `GL_VERSION_2_1`.
    pub fn name(&self) -> String {
        match &self.profile {
            Some(profile) => format!("{}_{}", self.feature, profile),
            None => self.feature.clone(),
        }
    }

    /// The guard macro spelling, `API_LEVEL_GL_VERSION_4_5_core`.
    pub fn ident(&self) -> String {
        format!("{}_{}", API_LEVEL_PREFIX, self.name())
    }

    /// The Cargo feature gating this level in generated code, `gl_version_4_5_core`.
    pub fn cargo_feature(&self) -> String {
        self.name().to_ascii_lowercase()
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A user-supplied level selector.
///
/// Accepts `GL_VERSION_4_5_core`, `API_LEVEL_GL_VERSION_4_5_core`, the Cargo feature
/// spelling `gl_version_4_5_core`, or a bare feature name for levels without profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec(String);

impl LevelSpec {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let text = text
            .strip_prefix(API_LEVEL_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(text);
        if text.is_empty() {
            return Err(Error::UnknownLevel(text.to_owned()));
        }
        Ok(LevelSpec(text.to_ascii_lowercase()))
    }

    pub fn matches(&self, level: &ApiLevel) -> bool {
        level.cargo_feature() == self.0
    }

    /// Pick the matching level out of `levels`.
    pub fn find<'a>(&self, levels: impl IntoIterator<Item = &'a ApiLevel>) -> Result<&'a ApiLevel> {
        levels
            .into_iter()
            .find(|level| self.matches(level))
            .ok_or_else(|| Error::UnknownLevel(self.0.clone()))
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings() {
        let level = ApiLevel::new("gl", "GL_VERSION_4_5", (4, 5), Some("core"));
        assert_eq!(level.name(), "GL_VERSION_4_5_core");
        assert_eq!(level.ident(), "API_LEVEL_GL_VERSION_4_5_core");
        assert_eq!(level.cargo_feature(), "gl_version_4_5_core");

        let old = ApiLevel::new("gl", "GL_VERSION_2_1", (2, 1), None);
        assert_eq!(old.ident(), "API_LEVEL_GL_VERSION_2_1");
    }

    #[test]
    fn specs_match_any_spelling() {
        let level = ApiLevel::new("gl", "GL_VERSION_4_5", (4, 5), Some("core"));
        for spelling in [
            "GL_VERSION_4_5_core",
            "API_LEVEL_GL_VERSION_4_5_core",
            "gl_version_4_5_core",
        ] {
            assert!(LevelSpec::parse(spelling).unwrap().matches(&level), "{}", spelling);
        }
        assert!(!LevelSpec::parse("GL_VERSION_4_5_compatibility")
            .unwrap()
            .matches(&level));
    }

    #[test]
    fn ordering_follows_version() {
        let mut levels = vec![
            ApiLevel::new("gl", "GL_VERSION_4_5", (4, 5), Some("core")),
            ApiLevel::new("gl", "GL_VERSION_1_0", (1, 0), None),
            ApiLevel::new("gl", "GL_VERSION_3_2", (3, 2), Some("compatibility")),
        ];
        levels.sort();
        let names: Vec<_> = levels.iter().map(ApiLevel::name).collect();
        assert_eq!(
            names,
            ["GL_VERSION_1_0", "GL_VERSION_3_2_compatibility", "GL_VERSION_4_5_core"]
        );
    }

    #[test]
    fn unknown_level() {
        let levels = [ApiLevel::new("gl", "GL_VERSION_1_0", (1, 0), None)];
        let err = LevelSpec::parse("GL_VERSION_9_9").unwrap().find(&levels).unwrap_err();
        assert!(matches!(err, Error::UnknownLevel(_)));
    }
}
