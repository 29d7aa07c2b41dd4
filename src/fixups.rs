//! Corrections for commands the registry describes badly.

use std::collections::BTreeMap;

use log::debug;

use crate::registry::{CType, Command};

enum Fixup {
    /// Declared as `GLint` but takes enum values.
    ParamIsEnum { param: &'static str },
    /// The declared group does not hold the values the command takes.
    RegroupParam {
        param: &'static str,
        from: &'static str,
        to: &'static str,
    },
    /// No wrapper is generated.
    Skip,
}

const FIXUPS: &[(&str, Fixup)] = &[
    ("glTexImage2D", Fixup::ParamIsEnum { param: "internalformat" }),
    ("glTexImage3D", Fixup::ParamIsEnum { param: "internalformat" }),
    (
        "glNamedBufferData",
        Fixup::RegroupParam {
            param: "usage",
            from: "VertexBufferObjectUsage",
            to: "BufferUsageARB",
        },
    ),
    (
        "glCopyImageSubData",
        Fixup::RegroupParam {
            param: "srcTarget",
            from: "CopyBufferSubDataTarget",
            to: "TextureTarget",
        },
    ),
    (
        "glCopyImageSubData",
        Fixup::RegroupParam {
            param: "dstTarget",
            from: "CopyBufferSubDataTarget",
            to: "TextureTarget",
        },
    ),
    // No binary formats are defined, the format group would be empty.
    ("glShaderBinary", Fixup::Skip),
];

/// Apply every fixup to `commands`, dropping the skipped ones.
pub fn apply(commands: &mut BTreeMap<String, Command>) {
    for (name, fixup) in FIXUPS {
        if let Fixup::Skip = fixup {
            if commands.remove(*name).is_some() {
                debug!("Skipping command {}", name);
            }
            continue;
        }
        let Some(command) = commands.get_mut(*name) else {
            continue;
        };
        match fixup {
            Fixup::ParamIsEnum { param } => {
                if let Some(param) = command.param_mut(param) {
                    param.ty = CType::named("GLenum");
                }
            }
            Fixup::RegroupParam { param, from, to } => {
                if let Some(param) = command.param_mut(param) {
                    if param.group.as_deref() == Some(*from) {
                        param.group = Some((*to).to_owned());
                    }
                }
            }
            Fixup::Skip => {}
        }
    }
}
