//! The raw `gl` layer under the typed wrappers, generated by `gl_generator`.
//!
//! `gl_generator` reads its own copy of the Khronos registry, so the raw layer is produced
//! for one api, version and profile at a time. When every level is emitted, the raw layer
//! covers the largest of them.

use std::io::Write;

use gl_generator::{Api, Fallbacks, GlobalGenerator, Profile, Registry};
use log::info;

use crate::error::{Error, Result};
use crate::guard::Filter;
use crate::level::ApiLevel;

fn api(name: &str) -> Result<Api> {
    Ok(match name {
        "gl" => Api::Gl,
        "gles1" => Api::Gles1,
        "gles2" => Api::Gles2,
        "glsc2" => Api::Glsc2,
        _ => return Err(Error::UnknownApi(name.to_owned())),
    })
}

fn profile(level: &ApiLevel) -> Profile {
    match level.profile.as_deref() {
        Some("compatibility") => Profile::Compatibility,
        _ => Profile::Core,
    }
}

/// The level whose raw functions are a superset of the ones `filter` asks for.
pub fn target(filter: &Filter) -> Option<&ApiLevel> {
    match filter {
        Filter::Only(level) => Some(level),
        Filter::All { levels } => levels
            .iter()
            .max_by_key(|level| (level.number, level.profile.as_deref() == Some("compatibility"))),
    }
}

/// Write `gl_generator` global bindings for `level` plus `extensions`.
///
/// With `core_only`, the output refers to `core` instead of `std`.
pub fn write(
    level: &ApiLevel,
    extensions: &[String],
    core_only: bool,
    w: &mut impl Write,
) -> Result<()> {
    let extensions: Vec<&str> = extensions.iter().map(String::as_str).collect();
    info!(
        "Generating raw bindings for {} {}.{}",
        level.api, level.number.0, level.number.1
    );

    let mut data = Vec::new();
    Registry::new(
        api(&level.api)?,
        level.number,
        profile(level),
        Fallbacks::All,
        extensions,
    )
    .write_bindings(GlobalGenerator, &mut data)
    .map_err(Error::Raw)?;

    let data = String::from_utf8(data).map_err(|err| Error::InvalidValue {
        what: "raw bindings",
        name: level.name(),
        value: err.to_string(),
    })?;
    let data = if core_only { to_core(&data) } else { data };
    w.write_all(data.as_bytes())?;
    Ok(())
}

fn to_core(data: &str) -> String {
    // `std::os::raw` re-exports part of `core::ffi`.
    data.replace("std::mem", "core::mem")
        .replace("use std::os::raw", "use core::ffi as raw")
}
