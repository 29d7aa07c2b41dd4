//! Turning registry names into Rust names.

/// Command names ending in one of these keep their trailing type letters.
const KEEP_TYPE_SUFFIX: &[&str] = &[
    "buffers",
    "elements",
    "shaders",
    "textures",
    "status",
    "arrays",
    "attrib",
    "instanced",
    "enabled",
    "queries",
    "indexed",
    "indexedv",
    "end",
];

/// Command names ending in one of these lose their trailing `v`.
const DROP_TRAILING_V: &[&str] = &[
    "booleanv",
    "doublev",
    "floatv",
    "integerv",
    "integer64v",
    "pointerv",
    "createshaderprogramv",
    "arrayv",
    "indexedv",
];

const TYPE_CODES: &[&str] = &["b", "s", "i", "i64", "ub", "us", "ui", "ui64", "f", "d"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Identifiers that cannot be raw identifiers either.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

pub fn strip_ext_suffix<'a>(name: &'a str, suffixes: &[String]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix.as_str()))
        .unwrap_or(name)
}

fn constant_words<'a>(name: &'a str, suffixes: &[String]) -> &'a str {
    let name = name.strip_prefix("GL_").unwrap_or(name);
    strip_ext_suffix(name, suffixes).trim_end_matches('_')
}

fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// `GL_COLOR_BUFFER_BIT` → `ColorBufferBit`.
pub fn constant_variant(name: &str, suffixes: &[String]) -> String {
    let camel: String = constant_words(name, suffixes)
        .split('_')
        .flat_map(|word| {
            let mut chars = word.chars();
            let head = chars.next().map(|c| c.to_ascii_uppercase());
            head.into_iter()
                .chain(chars.map(|c| c.to_ascii_lowercase()))
        })
        .collect();
    match guard_leading_digit(camel) {
        reserved if reserved == "Self" => "Self_".to_owned(),
        name => name,
    }
}

/// `GL_COLOR_BUFFER_BIT` → `COLOR_BUFFER_BIT`.
pub fn constant_flag(name: &str, suffixes: &[String]) -> String {
    guard_leading_digit(constant_words(name, suffixes).to_ascii_uppercase())
}

/// Enum group names only lose their vendor suffix.
pub fn group_type(name: &str, suffixes: &[String]) -> String {
    strip_ext_suffix(name, suffixes).to_owned()
}

/// `glBlendFuncSeparateARB` → `blendFuncSeparate`, without any folding.
pub fn command_unfolded(name: &str, suffixes: &[String]) -> String {
    let name = name.strip_prefix("gl").unwrap_or(name);
    let mut chars = name.chars();
    let lowered: String = chars
        .next()
        .map(|c| c.to_ascii_lowercase())
        .into_iter()
        .chain(chars)
        .collect();
    strip_ext_suffix(&lowered, suffixes).to_owned()
}

/// Whether all of `tail` is a type suffix such as `1fv` or `ui64`.
///
/// On a match, returns the component count digit that stays behind, if any.
fn type_suffix_at(tail: &str) -> Option<Option<char>> {
    let mut rest = tail;
    let digit = match rest.chars().next() {
        Some(c @ '1'..='9') => {
            rest = &rest[1..];
            Some(c)
        }
        _ => None,
    };
    let rest = rest.strip_suffix('v').unwrap_or(rest);
    TYPE_CODES.contains(&rest).then_some(digit)
}

fn strip_type_suffix(name: &str) -> String {
    for (start, _) in name.char_indices() {
        if let Some(digit) = type_suffix_at(&name[start..]) {
            let mut out = name[..start].to_owned();
            out.extend(digit);
            return out;
        }
    }
    name.to_owned()
}

/// `glUniform1fv` → `uniform1`, `glGetIntegerv` → `getInteger`, `glGetIntegeri_v` → `getIntegerI`.
///
/// Folds away the parameter type letters, so several commands may end up with the same name.
pub fn command_folded(name: &str, suffixes: &[String]) -> String {
    let mut name = command_unfolded(name, suffixes);

    let lower = name.to_ascii_lowercase();
    if !KEEP_TYPE_SUFFIX.iter().any(|keep| lower.ends_with(keep))
        && !name.starts_with("getQueryBufferObject")
    {
        name = strip_type_suffix(&name);
    }

    let lower = name.to_ascii_lowercase();
    if DROP_TRAILING_V.iter().any(|drop| lower.ends_with(drop)) {
        name.pop();
    }
    let lower = name.to_ascii_lowercase();
    if lower.ends_with("i64_v") {
        name.truncate(name.len() - 5);
        name.push('I');
    } else if lower.ends_with("i_v") {
        name.truncate(name.len() - 3);
        name.push('I');
    }
    guard_leading_digit(name)
}

/// `texStorage2DMultisample` → `tex_storage2d_multisample`.
pub fn snake_case(camel: &str) -> String {
    let chars: Vec<char> = camel.chars().collect();
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Make `name` usable as a Rust identifier.
pub fn escape_ident(name: String) -> String {
    if RESERVED.contains(&name.as_str()) {
        format!("{}_", name)
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{}", name)
    } else {
        name
    }
}

/// `userParam` → `user_param`, `type` → `r#type`.
pub fn param_name(name: &str) -> String {
    escape_ident(snake_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arb() -> Vec<String> {
        vec!["ARB".to_owned()]
    }

    #[test]
    fn constants() {
        let s = arb();
        assert_eq!(constant_variant("GL_COLOR_BUFFER_BIT", &s), "ColorBufferBit");
        assert_eq!(constant_variant("GL_TEXTURE_MAX_ANISOTROPY_ARB", &s), "TextureMaxAnisotropy");
        assert_eq!(constant_variant("GL_CLIP_DISTANCE0", &s), "ClipDistance0");
        assert_eq!(constant_variant("GL_2D", &s), "_2d");
        assert_eq!(constant_flag("GL_SYNC_FLUSH_COMMANDS_BIT", &s), "SYNC_FLUSH_COMMANDS_BIT");
        assert_eq!(constant_flag("GL_2X_BIT_ATI", &s), "_2X_BIT_ATI");
        assert_eq!(group_type("BufferUsageARB", &s), "BufferUsage");
    }

    #[test]
    fn folding_matches_the_classic_names() {
        let s = arb();
        let cases = [
            ("glBlendFunc", "blendFunc"),
            ("glUniform1f", "uniform1"),
            ("glUniform4fv", "uniform4"),
            ("glUniformMatrix4fv", "uniformMatrix4"),
            ("glGetIntegerv", "getInteger"),
            ("glGetInteger64v", "getInteger64"),
            ("glGetIntegeri_v", "getIntegerI"),
            ("glGetInteger64i_v", "getInteger64I"),
            ("glGetFloatv", "getFloat"),
            ("glGetTexParameteriv", "getTexParameter"),
            ("glGetTexParameterIuiv", "getTexParameterI"),
            ("glVertexAttribI4ubv", "vertexAttribI4"),
            ("glProgramUniform1i64ARB", "programUniform1"),
            ("glDrawElements", "drawElements"),
            ("glDrawArraysInstanced", "drawArraysInstanced"),
            ("glIsEnabled", "isEnabled"),
            ("glIsEnabledi", "isEnabled"),
            ("glGetQueryBufferObjectuiv", "getQueryBufferObjectuiv"),
            ("glEnd", "end"),
            ("glTexImage2D", "texImage2D"),
            ("glCreateShaderProgramv", "createShaderProgram"),
            ("glMakeTextureHandleResidentARB", "makeTextureHandleResident"),
        ];
        for (raw, folded) in cases {
            assert_eq!(command_folded(raw, &s), folded, "{}", raw);
        }
    }

    #[test]
    fn unfolded_keeps_type_letters() {
        assert_eq!(command_unfolded("glUniform1f", &arb()), "uniform1f");
        assert_eq!(command_unfolded("glGetIntegeri_v", &arb()), "getIntegeri_v");
    }

    #[test]
    fn snake() {
        assert_eq!(snake_case("blendFuncSeparate"), "blend_func_separate");
        assert_eq!(snake_case("texImage2D"), "tex_image2d");
        assert_eq!(snake_case("texStorage2DMultisample"), "tex_storage2d_multisample");
        assert_eq!(snake_case("getIntegerI"), "get_integer_i");
        assert_eq!(snake_case("vertexAttribIPointer"), "vertex_attrib_i_pointer");
        assert_eq!(snake_case("getIntegeri_v"), "get_integeri_v");
    }

    #[test]
    fn params() {
        assert_eq!(param_name("userParam"), "user_param");
        assert_eq!(param_name("type"), "r#type");
        assert_eq!(param_name("ref"), "r#ref");
        assert_eq!(param_name("self"), "self_");
        assert_eq!(param_name("bufSize"), "buf_size");
    }
}
