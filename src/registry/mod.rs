//! The parsed contents of `gl.xml`.
//!
//! This is a faithful model of the registry: no filtering by api, version or extension happens
//! here, that is the job of [`crate::resolve`].

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};

use crate::dom::{self, Element};
use crate::error::{Error, Result};

mod command;

pub use command::{BaseType, CType, Command, Param};

/// Name of the group holding `GL_TRUE`, `GL_FALSE`, `GL_TIMEOUT_IGNORED` and friends.
pub const SPECIAL_NUMBERS: &str = "SpecialNumbers";

/// A numeric token value as found in the `value` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(pub i128);

impl Value {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let magnitude = match digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
        {
            Some(hex) => i128::from_str_radix(hex, 16).ok()?,
            None => digits.parse::<i128>().ok()?,
        };
        Some(Value(if negative { -magnitude } else { magnitude }))
    }

    pub fn as_u32(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }
}

/// One `<enum>` of an `<enums>` block.
#[derive(Debug, Clone)]
pub struct Constant {
    pub name: String,
    pub value: Value,
    /// Text of the `value` attribute, kept for messages.
    pub literal: String,
    /// The C literal suffix from the `type` attribute: `u` or `ull`.
    pub suffix: Option<String>,
    pub api: Option<String>,
    /// Groups named by the constant itself and by its enclosing block.
    pub groups: Vec<String>,
    /// The enclosing `<enums>` block is `type="bitmask"`.
    pub bitmask_block: bool,
}

/// A `<require>` or `<remove>`.
#[derive(Debug, Clone, Default)]
pub struct Interface {
    pub api: Option<String>,
    pub profile: Option<String>,
    pub enums: Vec<String>,
    pub commands: Vec<String>,
}

/// A `<feature>`: one version of one api.
#[derive(Debug, Clone)]
pub struct Feature {
    pub api: String,
    pub name: String,
    pub number: (u8, u8),
    pub requires: Vec<Interface>,
    pub removes: Vec<Interface>,
}

impl Feature {
    /// Profiles mentioned by any require or remove of this feature.
    pub fn profiles(&self) -> BTreeSet<&str> {
        self.requires
            .iter()
            .chain(&self.removes)
            .filter_map(|interface| interface.profile.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Extension {
    pub name: String,
    pub supported: Vec<String>,
    pub requires: Vec<Interface>,
}

impl Extension {
    pub fn supports(&self, api: &str) -> bool {
        self.supported.iter().any(|supported| supported == api)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Keyed by name. Several entries exist when a token differs per api.
    pub constants: BTreeMap<String, Vec<Constant>>,
    /// Members of the `<groups>` section of older registries.
    pub legacy_groups: BTreeMap<String, BTreeSet<String>>,
    /// Groups named by a `type="bitmask"` block.
    pub bitmask_groups: BTreeSet<String>,
    pub commands: BTreeMap<String, Command>,
    pub features: Vec<Feature>,
    pub extensions: Vec<Extension>,
}

impl std::str::FromStr for Registry {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        Self::from_reader(source.as_bytes())
    }
}

impl Registry {
    pub fn from_reader(source: impl Read) -> Result<Self> {
        let root = dom::parse(source)?;
        Self::from_root(&root)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading registry {}", path.display());
        let file = std::fs::File::open(path).map_err(|source| Error::File {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The `gl.xml` shipped with `khronos_api`.
    #[cfg(feature = "bundled-registry")]
    pub fn bundled() -> Result<Self> {
        info!("Loading bundled registry");
        Self::from_reader(khronos_api::GL_XML)
    }

    fn from_root(root: &Element) -> Result<Self> {
        if root.name != "registry" {
            return Err(Error::NotARegistry(root.name.clone()));
        }

        let mut registry = Registry::default();
        for element in root.elements() {
            match element.name.as_str() {
                "enums" => registry.read_enums(element)?,
                "groups" => registry.read_groups(element)?,
                "commands" => {
                    for command in element.elements_named("command") {
                        let command = Command::from_element(command)?;
                        if registry.commands.contains_key(&command.name) {
                            warn!("Duplicate command {}", command.name);
                            continue;
                        }
                        registry.commands.insert(command.name.clone(), command);
                    }
                }
                "feature" => registry.features.push(read_feature(element)?),
                "extensions" => {
                    for extension in element.elements_named("extension") {
                        registry.extensions.push(read_extension(extension)?);
                    }
                }
                "types" | "comment" | "kinds" => {}
                other => debug!("Skipping <{}>", other),
            }
        }

        info!(
            "Registry: {} constants, {} commands, {} features, {} extensions",
            registry.constants.len(),
            registry.commands.len(),
            registry.features.len(),
            registry.extensions.len()
        );
        Ok(registry)
    }

    fn read_enums(&mut self, block: &Element) -> Result<()> {
        let bitmask_block = block.attr("type") == Some("bitmask");
        let block_groups = split_groups(block.attr("group"));
        if bitmask_block {
            self.bitmask_groups.extend(block_groups.iter().cloned());
        }

        for element in block.elements() {
            if element.name != "enum" {
                continue;
            }
            let name = element.required_attr("name")?.to_owned();
            let literal = element.required_attr("value")?.to_owned();
            let Some(value) = Value::parse(&literal) else {
                warn!("Skipping constant {} with unsupported value {}", name, literal);
                continue;
            };

            let mut groups = split_groups(element.attr("group"));
            for group in &block_groups {
                if !groups.contains(group) {
                    groups.push(group.clone());
                }
            }

            self.constants
                .entry(name.clone())
                .or_default()
                .push(Constant {
                    name,
                    value,
                    literal,
                    suffix: element.attr("type").map(str::to_owned),
                    api: element.attr("api").map(str::to_owned),
                    groups,
                    bitmask_block,
                });
        }
        Ok(())
    }

    fn read_groups(&mut self, section: &Element) -> Result<()> {
        for group in section.elements_named("group") {
            let name = group.required_attr("name")?;
            let members = group
                .elements_named("enum")
                .map(|member| member.required_attr("name").map(str::to_owned))
                .collect::<Result<BTreeSet<_>>>()?;
            self.legacy_groups
                .entry(name.to_owned())
                .or_default()
                .extend(members);
        }
        Ok(())
    }

    /// Look up a constant, preferring the entry meant for `api`.
    pub fn constant(&self, name: &str, api: &str) -> Option<&Constant> {
        let candidates = self.constants.get(name)?;
        candidates
            .iter()
            .find(|constant| constant.api.as_deref() == Some(api))
            .or_else(|| candidates.iter().find(|constant| constant.api.is_none()))
            .or_else(|| candidates.first())
    }

    /// Every api that has at least one feature, sorted.
    pub fn apis(&self) -> BTreeSet<&str> {
        self.features
            .iter()
            .map(|feature| feature.api.as_str())
            .collect()
    }

    /// Features of one api, oldest first.
    pub fn features_of<'a>(&'a self, api: &str) -> Vec<&'a Feature> {
        let mut features: Vec<&Feature> = self
            .features
            .iter()
            .filter(|feature| feature.api == api)
            .collect();
        features.sort_by_key(|feature| feature.number);
        features
    }

    pub fn extension(&self, name: &str) -> Option<&Extension> {
        self.extensions
            .iter()
            .find(|extension| extension.name == name)
    }
}

fn split_groups(attr: Option<&str>) -> Vec<String> {
    attr.map(|groups| {
        groups
            .split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

fn read_interface(element: &Element) -> Result<Interface> {
    let mut interface = Interface {
        api: element.attr("api").map(str::to_owned),
        profile: element.attr("profile").map(str::to_owned),
        ..Interface::default()
    };
    for item in element.elements() {
        match item.name.as_str() {
            "enum" => interface
                .enums
                .push(item.required_attr("name")?.to_owned()),
            "command" => interface
                .commands
                .push(item.required_attr("name")?.to_owned()),
            "type" => {}
            other => debug!("Skipping <{}> in <{}>", other, element.name),
        }
    }
    Ok(interface)
}

fn read_feature(element: &Element) -> Result<Feature> {
    let name = element.required_attr("name")?.to_owned();
    let number_text = element.required_attr("number")?;
    let number = number_text
        .split_once('.')
        .and_then(|(major, minor)| Some((major.parse().ok()?, minor.parse().ok()?)))
        .ok_or_else(|| Error::InvalidValue {
            what: "feature number",
            name: name.clone(),
            value: number_text.to_owned(),
        })?;

    let mut feature = Feature {
        api: element.required_attr("api")?.to_owned(),
        name,
        number,
        requires: Vec::new(),
        removes: Vec::new(),
    };
    for child in element.elements() {
        match child.name.as_str() {
            "require" => feature.requires.push(read_interface(child)?),
            "remove" => feature.removes.push(read_interface(child)?),
            other => debug!("Skipping <{}> in feature {}", other, feature.name),
        }
    }
    Ok(feature)
}

fn read_extension(element: &Element) -> Result<Extension> {
    let requires = element
        .elements_named("require")
        .map(read_interface)
        .collect::<Result<Vec<_>>>()?;
    Ok(Extension {
        name: element.required_attr("name")?.to_owned(),
        supported: element
            .attr("supported")
            .unwrap_or_default()
            .split('|')
            .filter(|api| !api.is_empty())
            .map(str::to_owned)
            .collect(),
        requires,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const MINI: &str = include_str!("../../tests/data/mini_gl.xml");

    pub(crate) fn mini() -> Registry {
        MINI.parse().unwrap()
    }

    #[test]
    fn values() {
        assert_eq!(Value::parse("0x0100"), Some(Value(0x100)));
        assert_eq!(Value::parse("-1"), Some(Value(-1)));
        assert_eq!(Value::parse("0xFFFFFFFFFFFFFFFF"), Some(Value(u64::MAX.into())));
        assert_eq!(Value::parse("0xFFFFFFFFFFFFFFFF").unwrap().as_u32(), None);
        assert_eq!(Value::parse("EGL_CAST(EGLint,-1)"), None);
    }

    #[test]
    fn reads_everything() {
        let registry = mini();
        assert_eq!(registry.apis().into_iter().collect::<Vec<_>>(), ["gl", "gles2"]);
        let gl = registry.features_of("gl");
        assert_eq!(
            gl.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            ["GL_VERSION_1_0", "GL_VERSION_3_2", "GL_VERSION_4_5"]
        );
        assert_eq!(gl[1].profiles().into_iter().collect::<Vec<_>>(), ["compatibility", "core"]);
        assert!(registry.commands.contains_key("glClear"));
        assert!(registry.extension("GL_ARB_sync").unwrap().supports("gl"));
    }

    #[test]
    fn block_group_and_bitmask() {
        let registry = mini();
        let depth = registry.constant("GL_DEPTH_BUFFER_BIT", "gl").unwrap();
        assert!(depth.bitmask_block);
        assert!(depth.groups.contains(&"ClearBufferMask".to_owned()));
        assert!(depth.groups.contains(&"AttribMask".to_owned()));
        assert!(registry.bitmask_groups.contains("AttribMask"));
    }

    #[test]
    fn per_api_constants() {
        let registry = mini();
        assert_eq!(registry.constant("GL_ACTIVE_PROGRAM", "gl").unwrap().value, Value(0x8259));
        assert_eq!(registry.constant("GL_ACTIVE_PROGRAM", "gles2").unwrap().value, Value(0x8741));
    }

    #[test]
    fn legacy_groups() {
        let registry = mini();
        let members = &registry.legacy_groups["DrawBufferMode"];
        assert!(members.contains("GL_BACK"));
    }

    #[test]
    fn rejects_other_documents() {
        let err = Registry::from_reader("<html/>".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::NotARegistry(name) if name == "html"));
    }
}
