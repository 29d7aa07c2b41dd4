//! Deciding what ends up in the generated file, and under which names and guards.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, error, info, warn};

use crate::fixups;
use crate::groups::TokenGroup;
use crate::guard::{group_by_guard, guards_by_item, Filter, Guard};
use crate::naming;
use crate::registry::{Command, Registry, Value, SPECIAL_NUMBERS};
use crate::resolve::Resolution;
use crate::types::{self, GroupKind, Mapped, TypedGroup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialNumber {
    pub name: String,
    pub gl_name: String,
    /// `u32`, `u64` or `i32`.
    pub ty: &'static str,
    pub literal: String,
    pub guard: Guard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub gl_name: String,
    pub value: u32,
    pub guard: Guard,
}

/// A second name for a value another variant already holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub gl_name: String,
    pub owner: String,
    pub guard: Guard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub group: String,
    pub guard: Guard,
    pub variants: Vec<Variant>,
    pub aliases: Vec<Alias>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagsType {
    pub name: String,
    pub group: String,
    pub guard: Guard,
    /// Several flags may share bits.
    pub flags: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamPlan {
    pub name: String,
    pub mapped: Mapped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFn {
    pub name: String,
    pub gl_name: String,
    /// Name of the function in the raw layer.
    pub raw_name: String,
    pub doc: Option<String>,
    pub guard: Guard,
    pub params: Vec<ParamPlan>,
    pub ret: Option<Mapped>,
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub api: String,
    pub filter: Filter,
    pub extensions: Vec<String>,
    pub special_numbers: Vec<SpecialNumber>,
    pub enums: Vec<EnumType>,
    pub flags: Vec<FlagsType>,
    pub commands: Vec<CommandFn>,
}

/// Generated type of a group, as seen from command signatures.
struct Emitted {
    kind: GroupKind,
    name: String,
    guard: Guard,
}

impl Plan {
    pub fn build(
        registry: &Registry,
        resolution: &Resolution,
        groups: &BTreeMap<String, TokenGroup>,
        filter: Filter,
        suffixes: &[String],
    ) -> Plan {
        let api = resolution.api.as_str();
        let constant_guards: BTreeMap<&str, Guard> =
            guards_by_item(resolution, |selection| &selection.constants)
                .into_iter()
                .filter(|(_, guard)| filter.admits(guard))
                .collect();

        let mut plan = Plan {
            api: api.to_owned(),
            filter,
            extensions: resolution.extensions.clone(),
            special_numbers: Vec::new(),
            enums: Vec::new(),
            flags: Vec::new(),
            commands: Vec::new(),
        };

        let mut emitted: BTreeMap<&str, Emitted> = BTreeMap::new();
        let mut type_names: BTreeSet<String> = BTreeSet::new();

        for (group_name, group) in groups {
            let members: Vec<Member> = group
                .members
                .iter()
                .filter_map(|name| {
                    let guard = constant_guards.get(name.as_str())?;
                    let constant = registry.constant(name, api)?;
                    Some(Member {
                        gl_name: name,
                        value: constant.value,
                        literal: &constant.literal,
                        suffix: constant.suffix.as_deref(),
                        guard: guard.clone(),
                    })
                })
                .collect();
            if members.is_empty() {
                debug!("Skipping {} - no members", group_name);
                continue;
            }

            if group_name == SPECIAL_NUMBERS {
                plan.special_numbers = special_numbers(members, suffixes);
                continue;
            }

            let type_name = naming::group_type(group_name, suffixes);
            if !type_names.insert(type_name.clone()) {
                warn!(
                    "Skipping {} - type {} is already generated for another group",
                    group_name, type_name
                );
                continue;
            }

            let (kind, guard) = if group.bitmask {
                let Some(flags) = flags_type(&type_name, group_name, members, suffixes) else {
                    warn!("Skipping {} - no representable members", group_name);
                    continue;
                };
                let guard = flags.guard.clone();
                plan.flags.push(flags);
                (GroupKind::Flags, guard)
            } else {
                let Some(enum_type) = enum_type(&type_name, group_name, members, suffixes) else {
                    warn!("Skipping {} - no representable members", group_name);
                    continue;
                };
                let guard = enum_type.guard.clone();
                plan.enums.push(enum_type);
                (GroupKind::Enum, guard)
            };
            emitted.insert(
                group_name,
                Emitted {
                    kind,
                    name: type_name,
                    guard,
                },
            );
        }

        let mut commands = registry.commands.clone();
        fixups::apply(&mut commands);
        plan.commands = command_fns(resolution, &plan.filter, &commands, &emitted, suffixes);
        plan
    }

    /// Rust names of every generated enum and flags type.
    pub fn groups_emitted(&self) -> impl Iterator<Item = &str> {
        self.enums
            .iter()
            .map(|e| e.name.as_str())
            .chain(self.flags.iter().map(|f| f.name.as_str()))
    }

    pub fn commands(&self) -> &[CommandFn] {
        &self.commands
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn flags_type(&self, name: &str) -> Option<&FlagsType> {
        self.flags.iter().find(|f| f.name == name)
    }

    pub fn command(&self, gl_name: &str) -> Option<&CommandFn> {
        self.commands.iter().find(|c| c.gl_name == gl_name)
    }

    pub fn log_summary(&self) {
        info!(
            "API {}: {} special numbers, {} enums, {} bitmasks, {} commands",
            self.api,
            self.special_numbers.len(),
            self.enums.len(),
            self.flags.len(),
            self.commands.len()
        );
        debug!(
            "Generated types: {}",
            self.groups_emitted().collect::<Vec<_>>().join(", ")
        );
    }
}

struct Member<'a> {
    gl_name: &'a str,
    value: Value,
    literal: &'a str,
    suffix: Option<&'a str>,
    guard: Guard,
}

/// Order in which members claim names and values: present in more levels first.
fn claim_order(members: &mut [Member<'_>]) {
    members.sort_by(|a, b| {
        (Reverse(a.guard.0.len()), &a.guard, a.gl_name)
            .cmp(&(Reverse(b.guard.0.len()), &b.guard, b.gl_name))
    });
}

fn special_numbers(mut members: Vec<Member<'_>>, suffixes: &[String]) -> Vec<SpecialNumber> {
    claim_order(&mut members);
    // name → (value, index into `out`)
    let mut written: BTreeMap<String, (Value, usize)> = BTreeMap::new();
    let mut out: Vec<SpecialNumber> = Vec::new();
    for member in members {
        let name = naming::constant_flag(member.gl_name, suffixes);
        match written.get(&name) {
            Some(&(value, index)) if value == member.value => {
                let number = &mut out[index];
                number.guard = number.guard.union(&member.guard);
                continue;
            }
            Some(_) => {
                error!("Conflicting value for constant {}", name);
                continue;
            }
            None => {}
        }
        let ty = match member.suffix {
            Some("ull") => "u64",
            Some("u") => "u32",
            _ if member.value.as_u32().is_some() => "u32",
            _ if i32::try_from(member.value.0).is_ok() => "i32",
            _ => "u64",
        };
        written.insert(name.clone(), (member.value, out.len()));
        out.push(SpecialNumber {
            name,
            gl_name: member.gl_name.to_owned(),
            ty,
            literal: member.literal.to_owned(),
            guard: member.guard,
        });
    }
    out.sort_by(|a, b| (&a.guard, &a.name).cmp(&(&b.guard, &b.name)));
    out
}

fn representable(member: &Member<'_>, group: &str) -> Option<u32> {
    let value = member.value.as_u32();
    if value.is_none() {
        warn!(
            "Dropping {} from {}: value {} does not fit u32",
            member.gl_name, group, member.literal
        );
    }
    value
}

/// Where an enumerator name went.
#[derive(Clone, Copy)]
enum Slot {
    Variant(usize),
    Alias(usize),
}

fn enum_type(
    type_name: &str,
    group: &str,
    mut members: Vec<Member<'_>>,
    suffixes: &[String],
) -> Option<EnumType> {
    claim_order(&mut members);

    let mut variants: Vec<Variant> = Vec::new();
    let mut aliases: Vec<Alias> = Vec::new();
    let mut names: BTreeMap<String, (u32, Slot)> = BTreeMap::new();
    // value → index into `variants`
    let mut owners: BTreeMap<u32, usize> = BTreeMap::new();

    for member in &members {
        let Some(value) = representable(member, group) else {
            continue;
        };
        let name = naming::constant_variant(member.gl_name, suffixes);
        match names.get(&name) {
            Some(&(existing, slot)) if existing == value => {
                let guard = match slot {
                    Slot::Variant(index) => &mut variants[index].guard,
                    Slot::Alias(index) => &mut aliases[index].guard,
                };
                *guard = guard.union(&member.guard);
                // An alias may now exist where its owner does not.
                if let Some(&owner) = owners.get(&value) {
                    let variant = &mut variants[owner];
                    variant.guard = variant.guard.union(&member.guard);
                }
                continue;
            }
            Some(_) => {
                error!("Conflicting value for enumerator {}::{}", type_name, name);
                continue;
            }
            None => {}
        }

        let slot = match owners.get(&value) {
            Some(_) => Slot::Alias(aliases.len()),
            None => Slot::Variant(variants.len()),
        };
        names.insert(name.clone(), (value, slot));

        match owners.get(&value) {
            Some(&owner) => {
                let variant = &mut variants[owner];
                if !variant.guard.covers(&member.guard) {
                    debug!(
                        "{}::{} widened to cover its alias {}",
                        type_name, variant.name, name
                    );
                    variant.guard = variant.guard.union(&member.guard);
                }
                aliases.push(Alias {
                    name,
                    gl_name: member.gl_name.to_owned(),
                    owner: variant.name.clone(),
                    guard: member.guard.clone(),
                });
            }
            None => {
                owners.insert(value, variants.len());
                variants.push(Variant {
                    name,
                    gl_name: member.gl_name.to_owned(),
                    value,
                    guard: member.guard.clone(),
                });
            }
        }
    }

    if variants.is_empty() {
        return None;
    }
    variants.sort_by(|a, b| (&a.guard, &a.name).cmp(&(&b.guard, &b.name)));
    aliases.sort_by(|a, b| (&a.guard, &a.name).cmp(&(&b.guard, &b.name)));
    let guard = variants
        .iter()
        .fold(Guard::default(), |guard, variant| guard.union(&variant.guard));
    Some(EnumType {
        name: type_name.to_owned(),
        group: group.to_owned(),
        guard,
        variants,
        aliases,
    })
}

fn flags_type(
    type_name: &str,
    group: &str,
    mut members: Vec<Member<'_>>,
    suffixes: &[String],
) -> Option<FlagsType> {
    claim_order(&mut members);

    let mut flags: Vec<Variant> = Vec::new();
    let mut names: BTreeMap<String, usize> = BTreeMap::new();
    for member in &members {
        let Some(value) = representable(member, group) else {
            continue;
        };
        let name = naming::constant_flag(member.gl_name, suffixes);
        if let Some(&index) = names.get(&name) {
            let flag = &mut flags[index];
            if flag.value == value {
                flag.guard = flag.guard.union(&member.guard);
            } else {
                error!("Conflicting value for flag {}::{}", type_name, name);
            }
            continue;
        }
        names.insert(name.clone(), flags.len());
        flags.push(Variant {
            name,
            gl_name: member.gl_name.to_owned(),
            value,
            guard: member.guard.clone(),
        });
    }

    if flags.is_empty() {
        return None;
    }
    flags.sort_by(|a, b| (&a.guard, &a.name).cmp(&(&b.guard, &b.name)));
    let guard = flags
        .iter()
        .fold(Guard::default(), |guard, flag| guard.union(&flag.guard));
    Some(FlagsType {
        name: type_name.to_owned(),
        group: group.to_owned(),
        guard,
        flags,
    })
}

fn count_names(chosen: &BTreeMap<&str, String>) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for name in chosen.values() {
        *counts.entry(name.clone()).or_default() += 1;
    }
    counts
}

/// Rust function names, falling back to less folded names where folding collides.
fn function_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
    suffixes: &[String],
) -> BTreeMap<&'a str, String> {
    let mut chosen: BTreeMap<&str, String> = names
        .into_iter()
        .map(|name| (name, naming::command_folded(name, suffixes)))
        .collect();

    let counts = count_names(&chosen);
    for (gl_name, name) in chosen.iter_mut() {
        if counts[name.as_str()] > 1 {
            *name = naming::command_unfolded(gl_name, suffixes);
        }
    }

    let counts = count_names(&chosen);
    for (gl_name, name) in chosen.iter_mut() {
        if counts[name.as_str()] > 1 {
            warn!("{} collides with another command as {}", gl_name, name);
            *name = naming::command_unfolded(gl_name, &[]);
        }
    }

    chosen
        .into_iter()
        .map(|(gl_name, name)| (gl_name, naming::escape_ident(naming::snake_case(&name))))
        .collect()
}

/// The generated type for `group`, if it exists wherever a command of `guard` does.
fn typed_group<'a>(
    emitted: &'a BTreeMap<&str, Emitted>,
    filter: &Filter,
    group: Option<&str>,
    guard: &Guard,
) -> Option<TypedGroup<'a>> {
    let group = emitted.get(group?)?;
    let usable = match filter {
        Filter::Only(_) => true,
        Filter::All { .. } => group.guard.covers(guard),
    };
    usable.then_some(TypedGroup {
        kind: group.kind,
        ty: &group.name,
    })
}

fn command_fns(
    resolution: &Resolution,
    filter: &Filter,
    commands: &BTreeMap<String, Command>,
    emitted: &BTreeMap<&str, Emitted>,
    suffixes: &[String],
) -> Vec<CommandFn> {
    let guards: BTreeMap<&str, Guard> = guards_by_item(resolution, |selection| &selection.commands)
        .into_iter()
        .filter(|(_, guard)| filter.admits(guard))
        .filter(|(name, _)| {
            let known = commands.contains_key(*name);
            if !known {
                debug!("No wrapper for {}", name);
            }
            known
        })
        .collect();

    let names = function_names(guards.keys().copied(), suffixes);

    group_by_guard(guards)
        .into_iter()
        .flat_map(|(guard, gl_names)| {
            gl_names
                .into_iter()
                .map(move |gl_name| (gl_name, guard.clone()))
        })
        .map(|(gl_name, guard)| {
            let command = &commands[gl_name];
            let params = command
                .params
                .iter()
                .map(|param| ParamPlan {
                    name: naming::param_name(&param.name),
                    mapped: types::param(
                        &param.ty,
                        typed_group(emitted, filter, param.group.as_deref(), &guard),
                    ),
                })
                .collect();
            let ret_group = typed_group(emitted, filter, command.ret_group.as_deref(), &guard);
            CommandFn {
                name: names[gl_name].clone(),
                gl_name: gl_name.to_owned(),
                raw_name: gl_name.strip_prefix("gl").unwrap_or(gl_name).to_owned(),
                doc: command.comment.clone(),
                guard,
                params,
                ret: types::ret(&command.ret, ret_group),
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::groups;
    use crate::level::ApiLevel;
    use crate::resolve::resolve;
    use crate::types::Conversion;

    fn plan_with(filter: impl Fn(&Resolution) -> Filter) -> Plan {
        let registry = crate::registry::tests::mini();
        let extensions = vec![
            "GL_ARB_sync".to_owned(),
            "GL_ARB_multitexture".to_owned(),
            "GL_ARB_texture_filter_anisotropic".to_owned(),
        ];
        let resolution = resolve(&registry, "gl", &extensions).unwrap();
        let groups = groups::collect(&registry, &resolution);
        Plan::build(
            &registry,
            &resolution,
            &groups,
            filter(&resolution),
            &["ARB".to_owned()],
        )
    }

    pub(crate) fn all() -> Plan {
        plan_with(Filter::all)
    }

    pub(crate) fn core_4_5() -> Plan {
        plan_with(|resolution| {
            let level = resolution
                .levels()
                .find(|level| level.name() == "GL_VERSION_4_5_core")
                .unwrap();
            Filter::Only(level.clone())
        })
    }

    #[test]
    fn special_numbers_keep_their_width() {
        let plan = all();
        let ignored = plan
            .special_numbers
            .iter()
            .find(|n| n.name == "TIMEOUT_IGNORED")
            .unwrap();
        assert_eq!(ignored.ty, "u64");
        assert_eq!(ignored.literal, "0xFFFFFFFFFFFFFFFF");
        let names: Vec<&str> = plan.special_numbers.iter().map(|n| n.name.as_str()).collect();
        assert!(names.contains(&"TRUE") && names.contains(&"FALSE") && names.contains(&"NONE"));
        assert!(plan.enum_type(SPECIAL_NUMBERS).is_none());
    }

    #[test]
    fn enums_and_flags() {
        let plan = all();
        let depth = plan.enum_type("DepthFunction").unwrap();
        let names: Vec<&str> = depth.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Always", "Less", "Never"]);

        let clear = plan.flags_type("ClearBufferMask").unwrap();
        assert_eq!(clear.flags.len(), 3);
        assert!(clear
            .flags
            .iter()
            .any(|f| f.name == "DEPTH_BUFFER_BIT" && f.value == 0x100));

        // One bit per profile, so the type exists in every profiled level.
        let profile = plan.flags_type("ContextProfileMask").unwrap();
        assert_eq!(profile.guard.0.len(), 4);

        assert!(plan.groups_emitted().any(|name| name == "BufferUsage"));
        assert!(plan.enum_type("SyncBehaviorFlags").is_none());
    }

    #[test]
    fn shared_values_become_aliases() {
        let plan = all();
        let enable = plan.enum_type("EnableCap").unwrap();
        let owner = enable.variants.iter().find(|v| v.value == 0x3000).unwrap();
        // Present in four levels against three.
        assert_eq!(owner.name, "ClipDistance0");
        assert_eq!(owner.guard.0.len(), 5);
        assert_eq!(enable.aliases.len(), 1);
        assert_eq!(enable.aliases[0].name, "ClipPlane0");
        assert_eq!(enable.aliases[0].owner, "ClipDistance0");
    }

    fn level_names(guard: &Guard) -> Vec<String> {
        guard.levels().map(ApiLevel::name).collect()
    }

    #[test]
    fn renamed_duplicates_keep_every_level() {
        let plan = all();
        let expected = ["GL_VERSION_1_0", "GL_VERSION_3_2_core", "GL_VERSION_4_5_core"];

        let markers: Vec<&SpecialNumber> = plan
            .special_numbers
            .iter()
            .filter(|n| n.name == "MARKER")
            .collect();
        assert_eq!(markers.len(), 1);
        assert_eq!(level_names(&markers[0].guard), expected);

        let mode = plan.enum_type("MarkerMode").unwrap();
        assert_eq!(mode.variants.len(), 1);
        assert_eq!(mode.variants[0].name, "MarkerBar");
        assert_eq!(level_names(&mode.variants[0].guard), expected);
        assert_eq!(mode.aliases.len(), 1);
        assert_eq!(mode.aliases[0].name, "MarkerFoo");
        assert_eq!(mode.aliases[0].owner, "MarkerBar");
        assert_eq!(level_names(&mode.aliases[0].guard), expected);
    }

    #[test]
    fn oversized_and_conflicting_values_are_dropped() {
        let plan = all();
        let patch = plan.enum_type("PatchParameterName").unwrap();
        let variants: Vec<(&str, u32)> = patch
            .variants
            .iter()
            .map(|v| (v.name.as_str(), v.value))
            .collect();
        // GL_PATCH_MODE_ARB would also be PatchMode, with another value.
        assert_eq!(variants, [("PatchMode", 0xA002), ("PatchVertices", 0xA001)]);
        assert!(patch.aliases.is_empty());

        let barrier = plan.flags_type("MemoryBarrierMask").unwrap();
        let flags: Vec<(&str, u32)> = barrier
            .flags
            .iter()
            .map(|f| (f.name.as_str(), f.value))
            .collect();
        assert_eq!(
            flags,
            [
                ("ELEMENT_ARRAY_BARRIER_BIT", 0x2),
                ("VERTEX_ATTRIB_ARRAY_BARRIER_BIT", 0x1)
            ]
        );
    }

    #[test]
    fn type_names_are_claimed_once() {
        let plan = all();
        let query = plan.enum_type("QueryTarget").unwrap();
        assert_eq!(query.group, "QueryTarget");
        let names: Vec<&str> = query.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["SamplesPassed"]);
        assert_eq!(
            plan.groups_emitted()
                .filter(|name| *name == "QueryTarget")
                .count(),
            1
        );
    }

    #[test]
    fn get_pname_members() {
        let plan = all();
        let pname = plan.enum_type("GetPName").unwrap();
        let names: Vec<&str> = pname.variants.iter().map(|v| v.name.as_str()).collect();
        assert!(names.contains(&"TextureMaxAnisotropy"));
        assert!(names.contains(&"CompatAnisoHint"));
        assert!(!names.contains(&"VendorThingNv"));
        // Required by nothing.
        assert!(!names.contains(&"ProgramBinaryFormats"));
    }

    #[test]
    fn commands_are_typed() {
        let plan = all();
        let clear = plan.command("glClear").unwrap();
        assert_eq!(clear.name, "clear");
        assert_eq!(clear.raw_name, "Clear");
        assert_eq!(clear.params[0].mapped.ty, "ClearBufferMask");

        let wait = plan.command("glClientWaitSync").unwrap();
        assert_eq!(wait.ret.as_ref().unwrap().ty, "Option<SyncStatus>");
        assert_eq!(wait.params[1].mapped.conversion, Conversion::FlagsBits);

        let fence = plan.command("glFenceSync").unwrap();
        assert_eq!(fence.params[1].mapped.ty, "u32");
        assert_eq!(fence.ret.as_ref().unwrap().ty, "types::GLsync");

        let enabled = plan.command("glIsEnabled").unwrap();
        assert_eq!(enabled.ret.as_ref().unwrap().ty, "bool");

        let buffers = plan.command("glDrawBuffers").unwrap();
        assert_eq!(buffers.params[1].mapped.ty, "*const DrawBufferMode");

        let data = plan.command("glNamedBufferData").unwrap();
        assert_eq!(data.params[3].mapped.ty, "BufferUsage");

        let tex = plan.command("glTexImage2D").unwrap();
        assert_eq!(tex.params[2].mapped.ty, "InternalFormat");
        assert_eq!(tex.params[7].name, "r#type");

        assert!(plan.command("glShaderBinary").is_none());
    }

    #[test]
    fn overloads_fall_back_to_unfolded_names() {
        let plan = all();
        assert_eq!(plan.command("glUniform1f").unwrap().name, "uniform1f");
        assert_eq!(plan.command("glUniform1i").unwrap().name, "uniform1i");
        assert_eq!(plan.command("glGetIntegerv").unwrap().name, "get_integer");
        assert_eq!(plan.command("glGetIntegeri_v").unwrap().name, "get_integer_i");
        assert_eq!(plan.command("glEnablei").unwrap().name, "enablei");
        // Same name even with the vendor suffix stripped, so it stays.
        assert_eq!(plan.command("glActiveTexture").unwrap().name, "active_texture");
        assert_eq!(
            plan.command("glActiveTextureARB").unwrap().name,
            "active_texture_arb"
        );
    }

    #[test]
    fn params_need_a_covering_group() {
        let plan = all();
        // glBegin is compatibility only, PrimitiveType exists everywhere.
        let begin = plan.command("glBegin").unwrap();
        assert_eq!(begin.params[0].mapped.ty, "PrimitiveType");

        // glHint exists from 1.0, its HintTarget tokens only from 3.2.
        let hint = plan.command("glHint").unwrap();
        assert_eq!(hint.params[0].mapped.ty, "u32");
        assert_eq!(hint.params[1].mapped.ty, "HintMode");
    }

    #[test]
    fn single_level() {
        let plan = core_4_5();
        assert!(plan.command("glBegin").is_none());
        assert!(plan.command("glClear").is_some());

        let enable = plan.enum_type("EnableCap").unwrap();
        assert!(enable.variants.iter().any(|v| v.name == "ClipDistance0"));
        assert!(enable.aliases.is_empty());

        let profile = plan.flags_type("ContextProfileMask").unwrap();
        assert_eq!(profile.flags.len(), 1);
        assert_eq!(profile.flags[0].name, "CONTEXT_CORE_PROFILE_BIT");

        let hint = plan.command("glHint").unwrap();
        assert_eq!(hint.params[0].mapped.ty, "HintTarget");
    }
}
