//! Language family resolution
//!
//! A glottocode is resolved to a family through a fixed decision table. The
//! tiers are tried in [`Tier::ORDER`] and the first one that applies wins:
//!
//! | Tier | Applies when | Result |
//! |---|---|---|
//! | `Parent` | the id has a family link and the linked family has a name | family name, family id |
//! | `SelfFamily` | the id itself is a family | own name, own id |
//! | `Isolate` | the id is present but neither tier above applies | `"Isolate"`, empty id |
//! | `Unknown` | no id at all | empty name, empty id |

use rustc_hash::FxHashMap;

use crate::models::{Languoid, LanguoidLevel};

/// Family name given to languages without any family
pub const ISOLATE: &str = "Isolate";

/// Family names and family links built from the languoid table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyMap {
    /// family id → family name
    names: FxHashMap<String, String>,
    /// languoid id → family id
    parents: FxHashMap<String, String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl FamilyMap {
    /// Build the map from Glottolog languoid rows
    ///
    /// Family-level rows populate the name map, every row with a `family_id`
    /// populates the link map. Rows without an id are skipped.
    #[must_use]
    pub fn from_languoids(languoids: &[Languoid]) -> Self {
        let mut map = Self::default();

        for languoid in languoids {
            let Some(id) = non_empty(Some(&languoid.id)) else {
                continue;
            };
            if languoid.level() == LanguoidLevel::Family {
                let name = languoid.name.as_deref().map_or("", str::trim);
                map.names.insert(id.to_owned(), name.to_owned());
            }
            if let Some(family_id) = non_empty(languoid.family_id.as_deref()) {
                map.parents.insert(id.to_owned(), family_id.to_owned());
            }
        }

        log::info!(
            "Indexed {} language families, mapped {} glottocodes to families ({} broken links)",
            map.family_count(),
            map.link_count(),
            map.broken_links()
        );

        map
    }

    /// Build the map directly from its two relations
    #[must_use]
    pub fn from_pairs<N, P, S>(names: N, parents: P) -> Self
    where
        N: IntoIterator<Item = (S, S)>,
        P: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
            parents: parents
                .into_iter()
                .map(|(id, family)| (id.into(), family.into()))
                .collect(),
        }
    }

    /// Name of a family id
    #[must_use]
    pub fn family_name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Family id linked from a languoid id
    #[must_use]
    pub fn family_of(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Number of families with a name entry
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.names.len()
    }

    /// Number of languoids with a family link
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.parents.len()
    }

    /// Links pointing at a family id without a name entry
    #[must_use]
    pub fn broken_links(&self) -> usize {
        self.parents
            .values()
            .filter(|family| !self.names.contains_key(*family))
            .count()
    }
}

/// One row of the resolution decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Parent,
    SelfFamily,
    Isolate,
    Unknown,
}

impl Tier {
    /// Evaluation order of the decision table
    pub const ORDER: [Self; 4] = [Self::Parent, Self::SelfFamily, Self::Isolate, Self::Unknown];

    /// Apply this tier alone
    ///
    /// `id` is expected trimmed; `None` means the record has no identifier.
    #[must_use]
    pub fn attempt(self, map: &FamilyMap, id: Option<&str>) -> Option<FamilyResolution> {
        match self {
            Self::Parent => {
                let family_id = map.family_of(id?)?;
                let name = map.family_name(family_id)?;
                Some(FamilyResolution::new(self, name, family_id))
            }
            Self::SelfFamily => {
                let id = id?;
                let name = map.family_name(id)?;
                Some(FamilyResolution::new(self, name, id))
            }
            Self::Isolate => id.map(|_| FamilyResolution::new(self, ISOLATE, "")),
            Self::Unknown => id.is_none().then(FamilyResolution::unknown),
        }
    }
}

/// Resolved family of a languoid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyResolution {
    /// Tier that produced the result
    pub tier: Tier,
    /// Family name, `"Isolate"`, or empty when unknown
    pub name: String,
    /// Family id, empty for isolates and unknowns
    pub id: String,
}

impl FamilyResolution {
    fn new(tier: Tier, name: &str, id: &str) -> Self {
        Self {
            tier,
            name: name.to_owned(),
            id: id.to_owned(),
        }
    }

    /// Result for a missing identifier
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Tier::Unknown, "", "")
    }

    #[must_use]
    pub fn is_isolate(&self) -> bool {
        self.tier == Tier::Isolate
    }
}

/// Resolves glottocodes against a [`FamilyMap`]
#[derive(Debug, Clone, Copy)]
pub struct FamilyResolver<'m> {
    map: &'m FamilyMap,
}

impl<'m> FamilyResolver<'m> {
    #[must_use]
    pub const fn new(map: &'m FamilyMap) -> Self {
        Self { map }
    }

    /// Resolve an identifier through the decision table
    ///
    /// Blank identifiers count as missing.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> FamilyResolution {
        let id = non_empty(id);
        let resolution = Tier::ORDER
            .iter()
            .find_map(|tier| tier.attempt(self.map, id))
            .unwrap_or_else(FamilyResolution::unknown);
        log::trace!("Resolved {id:?} via {:?} to '{}'", resolution.tier, resolution.name);
        resolution
    }
}
