//! Mapping registry C types onto Rust types.

use crate::registry::{BaseType, CType};

/// How a group is exposed in Rust, for typing the parameters that name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Enum,
    Flags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedGroup<'a> {
    pub kind: GroupKind,
    /// Rust name of the generated type.
    pub ty: &'a str,
}

/// What happens to a value crossing between the typed wrapper and the raw function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Pass,
    EnumToRaw,
    FlagsBits,
    BoolToRaw,
    PtrCast,
    RawToBool,
    RawToEnum,
    RawToFlags,
}

impl Conversion {
    /// Wrap `expr` so it has the type the other side expects.
    pub fn apply(self, expr: &str, ty: &str) -> String {
        match self {
            Conversion::Pass => expr.to_owned(),
            Conversion::EnumToRaw => format!("{} as _", expr),
            Conversion::FlagsBits => format!("{}.bits()", expr),
            Conversion::BoolToRaw => format!("{} as u8", expr),
            Conversion::PtrCast => format!("{}.cast()", expr),
            Conversion::RawToBool => format!("{} != 0", expr),
            Conversion::RawToEnum => format!("{}::from_raw({})", enum_of(ty), expr),
            Conversion::RawToFlags => format!("{}::from_bits_retain({})", ty, expr),
        }
    }
}

fn enum_of(ty: &str) -> &str {
    ty.strip_prefix("Option<")
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(ty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapped {
    pub ty: String,
    pub conversion: Conversion,
}

/// Registry aliases that are plain Rust primitives on every platform.
pub fn primitive(ptype: &str) -> Option<&'static str> {
    Some(match ptype {
        "GLenum" | "GLbitfield" | "GLuint" => "u32",
        "GLint" | "GLsizei" | "GLfixed" | "GLclampx" => "i32",
        "GLfloat" | "GLclampf" => "f32",
        "GLdouble" | "GLclampd" => "f64",
        "GLboolean" | "GLubyte" => "u8",
        "GLbyte" => "i8",
        "GLshort" => "i16",
        "GLushort" | "GLhalf" | "GLhalfNV" | "GLhalfARB" => "u16",
        "GLint64" | "GLint64EXT" => "i64",
        "GLuint64" | "GLuint64EXT" => "u64",
        "GLintptr" | "GLsizeiptr" | "GLintptrARB" | "GLsizeiptrARB" => "isize",
        "GLchar" | "GLcharARB" => "c_char",
        "GLvoid" => "c_void",
        _ => return None,
    })
}

fn base_name(base: &BaseType) -> String {
    match base {
        BaseType::Named(name) => match primitive(name) {
            Some(primitive) => primitive.to_owned(),
            None => format!("types::{}", name),
        },
        // `void`, `struct _cl_context` and other opaque C text.
        BaseType::Raw(_) => "c_void".to_owned(),
    }
}

/// Wrap `base` in the pointers of `ty`.
///
/// A pointer is `*const` when the thing it points to is `const`: the base type for the
/// innermost pointer, the next pointer inward for the others.
pub fn render_pointers(ty: &CType, base: &str) -> String {
    let mut out = base.to_owned();
    for (i, _) in ty.pointers.iter().enumerate() {
        let pointee_const = if i == 0 { ty.is_const } else { ty.pointers[i - 1] };
        out = format!("*{} {}", if pointee_const { "const" } else { "mut" }, out);
    }
    out
}

/// The plain Rust type of `ty`, ignoring any group.
pub fn raw(ty: &CType) -> String {
    render_pointers(ty, &base_name(&ty.base))
}

/// Opaque C structs are `c_void` here but named types in the raw layer.
fn plain(ty: &CType) -> Mapped {
    let conversion = match &ty.base {
        BaseType::Raw(name) if name != "void" && ty.is_pointer() => Conversion::PtrCast,
        _ => Conversion::Pass,
    };
    Mapped {
        ty: raw(ty),
        conversion,
    }
}

/// Type of a parameter, and how to hand it to the raw function.
pub fn param(ty: &CType, group: Option<TypedGroup<'_>>) -> Mapped {
    let ptype = ty.ptype();
    match (ptype, ty.pointers.as_slice(), group) {
        (Some("GLenum"), [], Some(TypedGroup { kind: GroupKind::Enum, ty: name })) => Mapped {
            ty: name.to_owned(),
            conversion: Conversion::EnumToRaw,
        },
        (Some("GLenum"), [_], Some(TypedGroup { kind: GroupKind::Enum, ty: name }))
            if ty.is_const =>
        {
            Mapped {
                ty: render_pointers(ty, name),
                conversion: Conversion::PtrCast,
            }
        }
        (Some("GLbitfield"), [], Some(TypedGroup { kind: GroupKind::Flags, ty: name })) => {
            Mapped {
                ty: name.to_owned(),
                conversion: Conversion::FlagsBits,
            }
        }
        (Some("GLboolean"), [], _) => Mapped {
            ty: "bool".to_owned(),
            conversion: Conversion::BoolToRaw,
        },
        _ => plain(ty),
    }
}

/// Return type of a command, and how to turn the raw result into it.
///
/// `None` for `void`.
pub fn ret(ty: &CType, group: Option<TypedGroup<'_>>) -> Option<Mapped> {
    if ty.is_void() {
        return None;
    }
    let ptype = ty.ptype();
    Some(match (ptype, ty.is_pointer(), group) {
        (Some("GLenum"), false, Some(TypedGroup { kind: GroupKind::Enum, ty: name })) => Mapped {
            ty: format!("Option<{}>", name),
            conversion: Conversion::RawToEnum,
        },
        (Some("GLbitfield"), false, Some(TypedGroup { kind: GroupKind::Flags, ty: name })) => {
            Mapped {
                ty: name.to_owned(),
                conversion: Conversion::RawToFlags,
            }
        }
        (Some("GLboolean"), false, _) => Mapped {
            ty: "bool".to_owned(),
            conversion: Conversion::RawToBool,
        },
        _ => plain(ty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(before: &str, ptype: Option<&str>, after: &str) -> CType {
        CType::parse(before, ptype, after).unwrap()
    }

    const FACE: TypedGroup<'static> = TypedGroup {
        kind: GroupKind::Enum,
        ty: "TriangleFace",
    };
    const MASK: TypedGroup<'static> = TypedGroup {
        kind: GroupKind::Flags,
        ty: "ClearBufferMask",
    };

    #[test]
    fn pointers() {
        assert_eq!(raw(&ty("const", Some("GLchar"), "*const*")), "*const *const c_char");
        assert_eq!(raw(&ty("", Some("GLchar"), "**")), "*mut *mut c_char");
        assert_eq!(raw(&ty("const", Some("GLchar"), "**")), "*mut *const c_char");
        assert_eq!(raw(&ty("const void *", None, "")), "*const c_void");
        assert_eq!(raw(&ty("", Some("GLint"), "*")), "*mut i32");
        assert_eq!(raw(&ty("struct _cl_context *", None, "")), "*mut c_void");
    }

    #[test]
    fn opaque_structs_are_cast() {
        let mapped = param(&ty("struct _cl_context *", None, ""), None);
        assert_eq!(mapped.ty, "*mut c_void");
        assert_eq!(mapped.conversion, Conversion::PtrCast);
        let mapped = param(&ty("const void *", None, ""), None);
        assert_eq!(mapped.conversion, Conversion::Pass);
    }

    #[test]
    fn scalars() {
        assert_eq!(raw(&CType::named("GLsizeiptr")), "isize");
        assert_eq!(raw(&CType::named("GLsync")), "types::GLsync");
        assert_eq!(raw(&CType::named("GLDEBUGPROC")), "types::GLDEBUGPROC");
        assert_eq!(param(&CType::named("GLenum"), None).ty, "u32");
        assert_eq!(param(&CType::named("GLbitfield"), None).ty, "u32");
    }

    #[test]
    fn typed_params() {
        let mapped = param(&CType::named("GLenum"), Some(FACE));
        assert_eq!(mapped.ty, "TriangleFace");
        assert_eq!(mapped.conversion.apply("mode", &mapped.ty), "mode as _");

        let mapped = param(&ty("const", Some("GLenum"), "*"), Some(FACE));
        assert_eq!(mapped.ty, "*const TriangleFace");
        assert_eq!(mapped.conversion, Conversion::PtrCast);

        // GL writes through the pointer, so any value may come back.
        let mapped = param(&ty("", Some("GLenum"), "*"), Some(FACE));
        assert_eq!(mapped.ty, "*mut u32");

        let mapped = param(&CType::named("GLbitfield"), Some(MASK));
        assert_eq!(mapped.ty, "ClearBufferMask");
        assert_eq!(mapped.conversion.apply("mask", &mapped.ty), "mask.bits()");

        // A bitmask group on a GLenum stays raw.
        assert_eq!(param(&CType::named("GLenum"), Some(MASK)).ty, "u32");

        let mapped = param(&CType::named("GLboolean"), None);
        assert_eq!(mapped.ty, "bool");
        assert_eq!(mapped.conversion.apply("normalized", "bool"), "normalized as u8");
    }

    #[test]
    fn returns() {
        assert_eq!(ret(&ty("void", None, ""), None), None);

        let mapped = ret(&CType::named("GLenum"), Some(FACE)).unwrap();
        assert_eq!(mapped.ty, "Option<TriangleFace>");
        assert_eq!(mapped.conversion.apply("r", &mapped.ty), "TriangleFace::from_raw(r)");

        let mapped = ret(&CType::named("GLboolean"), None).unwrap();
        assert_eq!(mapped.conversion.apply("r", &mapped.ty), "r != 0");

        let mapped = ret(&CType::named("GLbitfield"), Some(MASK)).unwrap();
        assert_eq!(
            mapped.conversion.apply("r", &mapped.ty),
            "ClearBufferMask::from_bits_retain(r)"
        );

        let mapped = ret(&ty("const", Some("GLubyte"), "*"), None).unwrap();
        assert_eq!(mapped.ty, "*const u8");
    }
}
