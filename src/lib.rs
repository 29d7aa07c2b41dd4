//! # glreg
//!
//! Generates typed OpenGL bindings from the Khronos `gl.xml` registry.
//!
//! Every token group of the registry becomes a Rust type: a `#[repr(u32)]` enum, or a
//! `bitflags` type for bitmask groups. Every command becomes an `unsafe fn` taking those types,
//! forwarding to a raw `gl_generator` layer. Items are gated by the API levels that contain
//! them, so a single generated file can serve `GL_VERSION_3_2_core` and
//! `GL_VERSION_4_5_compatibility` alike, picked through Cargo features.
//!
//! ```no_run
//! # fn main() -> glreg::Result<()> {
//! let config = glreg::Config {
//!     level: Some("GL_VERSION_4_5_core".to_owned()),
//!     ..Default::default()
//! };
//! let mut out = std::fs::File::create("gl_typed.rs")?;
//! glreg::generate(&config, &mut out)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Doc Aliases
//! Generated items carry `#[doc(alias = ...)]` with their registry name, so searching the docs
//! for `glClear` or `GL_DEPTH_TEST` finds `clear` and `EnableCap::DepthTest`.
//!
//! ## Stages
//! * [`registry`] parses `gl.xml` as-is.
//! * [`resolve`] walks the features of one api and decides what each level contains.
//! * [`groups`] collects the token groups.
//! * [`plan`] names, types and guards everything.
//! * [`emit`] writes it out.

#![warn(rustdoc::all)]

use std::io::Write;

use log::info;

pub mod config;
pub mod dom;
pub mod emit;
pub mod error;
pub mod fixups;
pub mod groups;
pub mod guard;
pub mod level;
pub mod naming;
pub mod plan;
pub mod registry;
pub mod resolve;
pub mod types;

pub use config::Config;
pub use emit::{Emitter, Options, Sections};
pub use error::{Error, Result};
pub use guard::{Filter, Guard};
pub use level::{ApiLevel, LevelSpec};
pub use plan::Plan;
pub use registry::Registry;

/// Run every stage up to the [`Plan`] against an already loaded registry.
pub fn plan(registry: &Registry, config: &Config) -> Result<Plan> {
    let resolution = resolve::resolve(registry, &config.api, &config.extensions)?;
    let filter = match config.level_spec()? {
        Some(spec) => Filter::Only(spec.find(resolution.levels())?.clone()),
        None => Filter::all(&resolution),
    };
    match &filter {
        Filter::Only(level) => info!("Generating level {}", level),
        Filter::All { levels } => info!("Generating {} levels", levels.len()),
    }
    let groups = groups::collect(registry, &resolution);
    let plan = Plan::build(
        registry,
        &resolution,
        &groups,
        filter,
        &config.strip_suffixes,
    );
    plan.log_summary();
    Ok(plan)
}

/// Load the registry named by `config`, and write typed bindings to `w`.
pub fn generate(config: &Config, w: &mut impl Write) -> Result<Plan> {
    let registry = config.load_registry()?;
    let plan = plan(&registry, config)?;
    let options = config.options()?;
    Emitter::new(&plan, &options).write(w)?;
    Ok(plan)
}

/// Write the raw `gl_generator` layer the typed bindings of `plan` call into.
pub fn generate_raw(plan: &Plan, config: &Config, w: &mut impl Write) -> Result<()> {
    let level = emit::raw::target(&plan.filter).ok_or_else(|| Error::UnknownApi(plan.api.clone()))?;
    emit::raw::write(level, &plan.extensions, config.core, w)
}
