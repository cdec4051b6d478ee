//! Name registries for the four categorical dimensions of a burden table.
//!
//! Risks, diseases, age groups and sexes are identified by their display
//! names in input tables. Lookups go through a [`Registry`] that maps names
//! to dense typed indices, so tensors and tables can be indexed without
//! string comparisons and an unknown name is reported rather than defaulted.

use super::error::LookupError;
use std::collections::HashMap;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub usize);

        impl $name {
            /// Dense index of this entry.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Index of a dietary risk factor.
    RiskId
);
define_id!(
    /// Index of a disease (cause of burden).
    DiseaseId
);
define_id!(
    /// Index of an age group.
    AgeId
);
define_id!(
    /// Index of a sex.
    SexId
);

/// Dietary risks of the standard diet registry, in canonical order.
pub const GBD_DIET_RISKS: [&str; 15] = [
    "Diet low in calcium",
    "Diet low in fiber",
    "Diet low in seafood omega-3 fatty acids",
    "Diet low in fruits",
    "Diet low in whole grains",
    "Diet low in legumes",
    "Diet low in milk",
    "Diet low in nuts and seeds",
    "Diet high in processed meat",
    "Diet low in polyunsaturated fatty acids",
    "Diet high in red meat",
    "Diet high in sodium",
    "Diet high in sugar-sweetened beverages",
    "Diet high in trans fatty acids",
    "Diet low in vegetables",
];

/// Diseases of the standard diet registry, in canonical order.
pub const GBD_DIET_DISEASES: [&str; 13] = [
    "Colon and rectum cancer",
    "Diabetes mellitus type 2",
    "Esophageal cancer",
    "Intracerebral hemorrhage",
    "Ischemic heart disease",
    "Ischemic stroke",
    "Larynx cancer",
    "Lip and oral cavity cancer",
    "Nasopharynx cancer",
    "Other pharynx cancer",
    "Stomach cancer",
    "Subarachnoid hemorrhage",
    "Tracheal, bronchus, and lung cancer",
];

/// Five-year adult age groups of the standard diet registry.
pub const GBD_ADULT_AGES: [&str; 15] = [
    "25 to 29",
    "30 to 34",
    "35 to 39",
    "40 to 44",
    "45 to 49",
    "50 to 54",
    "55 to 59",
    "60 to 64",
    "65 to 69",
    "70 to 74",
    "75 to 79",
    "80 to 84",
    "85 to 89",
    "90 to 94",
    "95 plus",
];

/// Sexes of the standard diet registry.
pub const GBD_SEXES: [&str; 2] = ["Female", "Male"];

/// Ordered list of names with a reverse index.
#[derive(Debug, Clone, PartialEq)]
pub struct NameIndex {
    kind: &'static str,
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl NameIndex {
    /// Builds an index; later duplicates are ignored.
    pub fn new<I, S>(kind: &'static str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut lookup = HashMap::new();
        for name in names {
            let name = name.into();
            if !lookup.contains_key(&name) {
                lookup.insert(name.clone(), ordered.len());
                ordered.push(name);
            }
        }
        Self {
            kind,
            names: ordered,
            lookup,
        }
    }

    /// Position of `name`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownName` if the name is not registered.
    pub fn position(&self, name: &str) -> Result<usize, LookupError> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnknownName {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// Name at `index`. Panics when out of range.
    #[inline]
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Names in order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Sizes of the four registry dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of risks.
    pub risks: usize,
    /// Number of diseases.
    pub diseases: usize,
    /// Number of age groups.
    pub ages: usize,
    /// Number of sexes.
    pub sexes: usize,
}

/// Registry of risks, diseases, age groups and sexes.
///
/// # Example
///
/// ```
/// use burden_core::types::Registry;
///
/// let registry = Registry::gbd_diet();
/// let ihd = registry.disease("Ischemic heart disease").unwrap();
/// assert_eq!(registry.disease_name(ihd), "Ischemic heart disease");
/// assert!(registry.risk("Diet high in kale").is_err());
/// assert_eq!(registry.dimensions().risks, 15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    risks: NameIndex,
    diseases: NameIndex,
    ages: NameIndex,
    sexes: NameIndex,
}

impl Registry {
    /// Builds a registry from explicit name lists.
    pub fn new<S: Into<String>>(
        risks: impl IntoIterator<Item = S>,
        diseases: impl IntoIterator<Item = S>,
        ages: impl IntoIterator<Item = S>,
        sexes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            risks: NameIndex::new("risk", risks),
            diseases: NameIndex::new("disease", diseases),
            ages: NameIndex::new("age group", ages),
            sexes: NameIndex::new("sex", sexes),
        }
    }

    /// The standard dietary-risk registry: 15 risks, 13 diseases,
    /// 15 adult age groups and 2 sexes.
    pub fn gbd_diet() -> Self {
        Self::new(GBD_DIET_RISKS, GBD_DIET_DISEASES, GBD_ADULT_AGES, GBD_SEXES)
    }

    /// Dimension sizes.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            risks: self.risks.len(),
            diseases: self.diseases.len(),
            ages: self.ages.len(),
            sexes: self.sexes.len(),
        }
    }

    /// Looks up a risk by name.
    pub fn risk(&self, name: &str) -> Result<RiskId, LookupError> {
        self.risks.position(name).map(RiskId)
    }

    /// Looks up a disease by name.
    pub fn disease(&self, name: &str) -> Result<DiseaseId, LookupError> {
        self.diseases.position(name).map(DiseaseId)
    }

    /// Looks up an age group by name.
    pub fn age(&self, name: &str) -> Result<AgeId, LookupError> {
        self.ages.position(name).map(AgeId)
    }

    /// Looks up a sex by name.
    pub fn sex(&self, name: &str) -> Result<SexId, LookupError> {
        self.sexes.position(name).map(SexId)
    }

    /// Name of a risk.
    pub fn risk_name(&self, id: RiskId) -> &str {
        self.risks.name(id.0)
    }

    /// Name of a disease.
    pub fn disease_name(&self, id: DiseaseId) -> &str {
        self.diseases.name(id.0)
    }

    /// Name of an age group.
    pub fn age_name(&self, id: AgeId) -> &str {
        self.ages.name(id.0)
    }

    /// Name of a sex.
    pub fn sex_name(&self, id: SexId) -> &str {
        self.sexes.name(id.0)
    }

    /// All risk ids in order.
    pub fn risk_ids(&self) -> impl Iterator<Item = RiskId> + '_ {
        (0..self.risks.len()).map(RiskId)
    }

    /// All disease ids in order.
    pub fn disease_ids(&self) -> impl Iterator<Item = DiseaseId> + '_ {
        (0..self.diseases.len()).map(DiseaseId)
    }

    /// All age ids in order.
    pub fn age_ids(&self) -> impl Iterator<Item = AgeId> + '_ {
        (0..self.ages.len()).map(AgeId)
    }

    /// All sex ids in order.
    pub fn sex_ids(&self) -> impl Iterator<Item = SexId> + '_ {
        (0..self.sexes.len()).map(SexId)
    }

    /// Age ids whose label starts with an integer lower bound below `limit`.
    ///
    /// `"65 to 69"` is below 70; `"70 to 74"` and `"95 plus"` are not.
    /// Labels without a leading integer never match.
    pub fn ages_below(&self, limit: u32) -> Vec<AgeId> {
        self.ages
            .names()
            .iter()
            .enumerate()
            .filter(|(_, label)| {
                label
                    .split_whitespace()
                    .next()
                    .and_then(|lead| lead.parse::<u32>().ok())
                    .is_some_and(|lower| lower < limit)
            })
            .map(|(i, _)| AgeId(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbd_diet_dimensions() {
        let reg = Registry::gbd_diet();
        assert_eq!(
            reg.dimensions(),
            Dimensions {
                risks: 15,
                diseases: 13,
                ages: 15,
                sexes: 2
            }
        );
    }

    #[test]
    fn test_lookup_round_trip_in_order() {
        let reg = Registry::gbd_diet();
        for (i, id) in reg.risk_ids().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(reg.risk(reg.risk_name(id)).unwrap(), id);
        }
        assert_eq!(reg.sex("Male").unwrap(), SexId(1));
        assert_eq!(reg.age("95 plus").unwrap(), AgeId(14));
    }

    #[test]
    fn test_unknown_name_is_error() {
        let reg = Registry::gbd_diet();
        let err = reg.disease("Gout").unwrap_err();
        assert_eq!(
            err,
            LookupError::UnknownName {
                kind: "disease",
                name: "Gout".to_string()
            }
        );
    }

    #[test]
    fn test_ages_below_seventy() {
        let reg = Registry::gbd_diet();
        let young = reg.ages_below(70);
        assert_eq!(young.len(), 9);
        assert_eq!(reg.age_name(*young.last().unwrap()), "65 to 69");
    }

    #[test]
    fn test_duplicate_names_ignored() {
        let idx = NameIndex::new("risk", ["a", "b", "a"]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.position("b").unwrap(), 1);
        assert!(!idx.is_empty());
    }
}
