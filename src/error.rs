//! Error type shared by every stage of the generator.

use std::path::PathBuf;

/// Everything that can go wrong between reading `gl.xml` and writing bindings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("xml error: {0}")]
    Xml(#[from] xml::reader::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("<{element}> is missing attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
    #[error("<{element}> is missing child <{child}>")]
    MissingChild {
        element: String,
        child: &'static str,
    },
    #[error("{what} `{name}` has invalid value `{value}`")]
    InvalidValue {
        what: &'static str,
        name: String,
        value: String,
    },
    #[error("document root is <{0}>, expected <registry>")]
    NotARegistry(String),
    #[error("the registry has no feature for api `{0}`")]
    UnknownApi(String),
    #[error("no api level matches `{0}`")]
    UnknownLevel(String),
    #[error("could not generate raw bindings: {0}")]
    Raw(#[source] std::io::Error),
    #[error("no registry given and the bundled registry is not compiled in")]
    NoRegistry,
}

pub type Result<T> = std::result::Result<T, Error>;
