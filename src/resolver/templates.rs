//! Coordinate templates.
//!
//! Pure mapping from `(platform, implementation, versions)` to the ordered
//! list of coordinates and the bucket each belongs to. Each pair has a fixed
//! pattern; slots are substituted verbatim. An entry whose slots are absent
//! is left out, so a partially configured selection yields a partial list
//! (validation reports what is missing).
//!
//! The single cross-cutting rule: when the implementation requires a staged
//! install, the platform's shader loader goes to [`Bucket::StagedInstall`]
//! instead of [`Bucket::RuntimeOnly`].

use crate::core::{Bucket, Coordinate, Implementation, Platform, VersionSet, VersionSlot};

/// A coordinate paired with its bucket.
pub type Entry = (Coordinate, Bucket);

const COMPILE_AND_RUNTIME: &[Bucket] = &[Bucket::CompileOnly, Bucket::RuntimeOnly];
const COMPILE: &[Bucket] = &[Bucket::CompileOnly];
const STAGED: &[Bucket] = &[Bucket::StagedInstall];

/// A fixed coordinate pattern.
///
/// `{0}`, `{1}` are replaced by the values of `slots[0]`, `slots[1]`.
struct Template {
    pattern: &'static str,
    slots: &'static [VersionSlot],
    buckets: &'static [Bucket],
}

impl Template {
    /// Single pass over the pattern; substituted values are never rescanned.
    fn render(&self, versions: &VersionSet) -> Option<Coordinate> {
        let values = self
            .slots
            .iter()
            .map(|slot| versions.get(*slot))
            .collect::<Option<Vec<&str>>>()?;

        let mut out = String::with_capacity(self.pattern.len() + 16);
        let mut rest = self.pattern;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let placeholder = after
                .find('}')
                .and_then(|close| Some((after[..close].parse::<usize>().ok()?, close)));
            match placeholder {
                Some((idx, close)) if idx < values.len() => {
                    out.push_str(values[idx]);
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Some(Coordinate::new(out))
    }
}

const SODIUM_FABRIC: &[Template] = &[Template {
    pattern: "maven.modrinth:sodium:mc{0}-{1}-fabric",
    slots: &[VersionSlot::Minecraft, VersionSlot::Sodium],
    buckets: COMPILE_AND_RUNTIME,
}];

const SODIUM_NEOFORGE: &[Template] = &[
    Template {
        pattern: "maven.modrinth:sodium:mc{0}-{1}-neoforge",
        slots: &[VersionSlot::Minecraft, VersionSlot::Sodium],
        buckets: COMPILE_AND_RUNTIME,
    },
    Template {
        pattern: "org.sinytra.forgified-fabric-api:fabric-api-base:{0}",
        slots: &[VersionSlot::SodiumFabricApi],
        buckets: COMPILE,
    },
    Template {
        pattern: "org.sinytra.forgified-fabric-api:fabric-renderer-api-v1:{0}",
        slots: &[VersionSlot::SodiumFabricRenderer],
        buckets: COMPILE,
    },
];

const EMBEDDIUM_NEOFORGE: &[Template] = &[
    Template {
        pattern: "maven.modrinth:embeddium:{0}+mc{1}",
        slots: &[VersionSlot::Embeddium, VersionSlot::Minecraft],
        buckets: COMPILE_AND_RUNTIME,
    },
    // Monocle ships a transformer that only works from the mods directory.
    Template {
        pattern: "maven.modrinth:monocle-iris:{0}",
        slots: &[VersionSlot::Monocle],
        buckets: STAGED,
    },
];

const IRIS_FABRIC: &[Template] = &[
    Template {
        pattern: "maven.modrinth:iris:{0}+{1}-fabric",
        slots: &[VersionSlot::Iris, VersionSlot::Minecraft],
        buckets: COMPILE_AND_RUNTIME,
    },
    Template {
        pattern: "org.antlr:antlr4-runtime:{0}",
        slots: &[VersionSlot::IrisAntlr4Runtime],
        buckets: COMPILE_AND_RUNTIME,
    },
    Template {
        pattern: "io.github.douira:glsl-transformer:{0}",
        slots: &[VersionSlot::IrisGlslTransformer],
        buckets: COMPILE_AND_RUNTIME,
    },
    Template {
        pattern: "org.anarres:jcpp:{0}",
        slots: &[VersionSlot::IrisJcpp],
        buckets: COMPILE_AND_RUNTIME,
    },
];

const IRIS_NEOFORGE: &[Template] = &[Template {
    pattern: "maven.modrinth:iris:{0}+{1}-neoforge",
    slots: &[VersionSlot::Iris, VersionSlot::Minecraft],
    buckets: COMPILE_AND_RUNTIME,
}];

fn implementation_templates(
    platform: Platform,
    implementation: Implementation,
) -> &'static [Template] {
    match (platform, implementation) {
        (Platform::Fabric, Implementation::Sodium) => SODIUM_FABRIC,
        (Platform::NeoForge, Implementation::Sodium) => SODIUM_NEOFORGE,
        (Platform::NeoForge, Implementation::Embeddium) => EMBEDDIUM_NEOFORGE,
        (Platform::Fabric, Implementation::Embeddium) => &[],
    }
}

fn platform_templates(platform: Platform) -> &'static [Template] {
    match platform {
        Platform::Fabric => IRIS_FABRIC,
        Platform::NeoForge => IRIS_NEOFORGE,
    }
}

/// Coordinates contributed by the implementation itself.
pub fn implementation_coordinates(
    platform: Platform,
    implementation: Implementation,
    versions: &VersionSet,
) -> Vec<Entry> {
    expand(implementation_templates(platform, implementation), versions, false)
}

/// Coordinates the platform contributes to every implementation on it.
pub fn platform_coordinates(
    platform: Platform,
    implementation: Implementation,
    versions: &VersionSet,
) -> Vec<Entry> {
    expand(
        platform_templates(platform),
        versions,
        implementation.requires_staged_install(),
    )
}

/// Every coordinate for a pair: the implementation's own first, then the
/// platform-scoped ones. Unsupported pairs yield nothing.
pub fn coordinates(
    platform: Platform,
    implementation: Implementation,
    versions: &VersionSet,
) -> Vec<Entry> {
    if !implementation.supported_on(platform) {
        return Vec::new();
    }

    let mut entries = implementation_coordinates(platform, implementation, versions);
    entries.extend(platform_coordinates(platform, implementation, versions));
    entries
}

/// Coordinates of a pair that land in `bucket`.
pub fn coordinates_in(
    platform: Platform,
    implementation: Implementation,
    versions: &VersionSet,
    bucket: Bucket,
) -> Vec<Coordinate> {
    coordinates(platform, implementation, versions)
        .into_iter()
        .filter(|(_, b)| *b == bucket)
        .map(|(c, _)| c)
        .collect()
}

fn expand(templates: &[Template], versions: &VersionSet, staged: bool) -> Vec<Entry> {
    let mut entries = Vec::new();
    for template in templates {
        let Some(coordinate) = template.render(versions) else {
            continue;
        };
        for bucket in template.buckets {
            let bucket = match bucket {
                Bucket::RuntimeOnly if staged => Bucket::StagedInstall,
                other => *other,
            };
            entries.push((coordinate.clone(), bucket));
        }
    }
    entries
}
