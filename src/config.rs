//! Generator settings, read from TOML.
//!
//! Every field is optional. Missing fields fall back to [`Config::default`], which
//! generates every level of desktop `gl` with the extensions most renderers need.

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::emit::{Options, Sections};
use crate::error::{Error, Result};
use crate::level::LevelSpec;
use crate::registry::Registry;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to `gl.xml`. The bundled registry when absent.
    pub registry: Option<PathBuf>,
    pub api: String,
    /// Generate this level only. Every level, gated by Cargo features, when absent.
    pub level: Option<String>,
    pub extensions: Vec<String>,
    /// Vendor suffixes dropped from generated names.
    pub strip_suffixes: Vec<String>,
    /// Path of the raw `gl` module, as seen from the generated module.
    pub raw_module: String,
    /// Sections of the generated file. All of them when empty.
    pub sections: Vec<String>,
    /// Write raw bindings that only need `core`.
    pub core: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry: None,
            api: default_api(),
            level: None,
            extensions: default_extensions(),
            strip_suffixes: default_strip_suffixes(),
            raw_module: Options::default().raw_module,
            sections: Vec::new(),
            core: false,
        }
    }
}

fn default_api() -> String {
    String::from("gl")
}

fn default_extensions() -> Vec<String> {
    [
        "GL_ARB_bindless_texture",
        "GL_ARB_texture_filter_anisotropic",
        "GL_EXT_texture_filter_anisotropic",
        "GL_ARB_sync",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_strip_suffixes() -> Vec<String> {
    vec![String::from("ARB")]
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        info!("Loading config {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| Error::File {
            path: path.to_owned(),
            source,
        })?;
        contents.parse()
    }

    pub fn load_registry(&self) -> Result<Registry> {
        match &self.registry {
            Some(path) => Registry::from_path(path),
            None => bundled(),
        }
    }

    pub fn level_spec(&self) -> Result<Option<LevelSpec>> {
        self.level.as_deref().map(LevelSpec::parse).transpose()
    }

    pub fn options(&self) -> Result<Options> {
        let sections = if self.sections.is_empty() {
            Sections::all()
        } else {
            Sections::from_names(self.sections.as_slice())?
        };
        Ok(Options {
            raw_module: self.raw_module.clone(),
            sections,
        })
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(feature = "bundled-registry")]
fn bundled() -> Result<Registry> {
    Registry::bundled()
}

#[cfg(not(feature = "bundled-registry"))]
fn bundled() -> Result<Registry> {
    Err(Error::NoRegistry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api, "gl");
        assert_eq!(config.extensions.len(), 4);
        assert_eq!(config.strip_suffixes, ["ARB"]);
        assert_eq!(config.level_spec().unwrap(), None);
        assert_eq!(config.options().unwrap(), Options::default());
    }

    #[test]
    fn fields() {
        let config: Config = r#"
            registry = "tests/data/mini_gl.xml"
            api = "gles2"
            level = "API_LEVEL_GL_ES_VERSION_2_0"
            extensions = []
            raw_module = "crate::raw"
            sections = ["enums", "commands"]
            core = true
        "#
        .parse()
        .unwrap();
        assert_eq!(config.api, "gles2");
        assert!(config.extensions.is_empty());
        assert_eq!(config.strip_suffixes, ["ARB"]);
        assert!(config.core);
        assert_eq!(
            config.level_spec().unwrap(),
            Some(LevelSpec::parse("gl_es_version_2_0").unwrap())
        );

        let options = config.options().unwrap();
        assert_eq!(options.raw_module, "crate::raw");
        assert_eq!(options.sections, Sections::ENUMS | Sections::COMMANDS);

        let registry = config.load_registry().unwrap();
        assert!(registry.apis().contains("gles2"));
    }

    #[test]
    fn bad_config() {
        assert!(matches!("levle = 1".parse::<Config>(), Err(Error::Config(_))));
        let config: Config = "sections = [\"docs\"]".parse().unwrap();
        assert!(matches!(config.options(), Err(Error::InvalidValue { .. })));
        assert!(matches!(
            Config::from_path("does/not/exist.toml"),
            Err(Error::File { .. })
        ));
    }
}
