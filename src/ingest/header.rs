use crate::helpers::string::fold_case;
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

/// Errors related to header resolution and synonym configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeaderError {
    #[error("Missing required columns: {}", join_roles(.roles))]
    MissingColumns { roles: Vec<ColumnRole> },

    #[error("Synonym '{synonym}' is claimed by both '{first}' and '{second}'")]
    SynonymConflict { synonym: String, first: ColumnRole, second: ColumnRole },

    #[error("Unknown column role '{0}'")]
    UnknownRole(String),
}

fn join_roles(roles: &[ColumnRole]) -> String {
    roles.iter().map(|role| role.as_str()).collect::<Vec<_>>().join(", ")
}

/// Canonical meaning a raw header column is mapped to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Item name
    Product,
    /// Retail price
    Price,
    /// Mass or package size
    Weight,
}

impl ColumnRole {
    /// Every role a price list must provide, in reporting order.
    pub const ALL: [ColumnRole; 3] = [ColumnRole::Product, ColumnRole::Price, ColumnRole::Weight];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Product => "product",
            ColumnRole::Price => "price",
            ColumnRole::Weight => "weight",
        }
    }

    /// Parses a role from its configuration name.
    /// Supports a few aliases for each role.
    pub fn parse(name: &str) -> Result<Self, HeaderError> {
        match name.to_ascii_uppercase().as_str() {
            "PRODUCT" | "NAME" | "ITEM" => Ok(Self::Product),
            "PRICE" | "RETAIL" => Ok(Self::Price),
            "WEIGHT" | "MASS" | "PACKAGE" => Ok(Self::Weight),
            _ => Err(HeaderError::UnknownRole(name.to_string())),
        }
    }
}

impl Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in header synonyms of the supported price lists.
const DEFAULT_SYNONYMS: [(ColumnRole, &[&str]); 3] = [
    (ColumnRole::Product, &["товар", "название", "наименование", "продукт"]),
    (ColumnRole::Price, &["розница", "цена"]),
    (ColumnRole::Weight, &["вес", "масса", "фасовка"]),
];

/// Declarative mapping from header text to canonical role.
///
/// Synonyms are stored case-folded and each belongs to exactly one role.
#[derive(Clone, Debug, PartialEq)]
pub struct SynonymTable {
    entries: HashMap<String, ColumnRole>,
}

impl SynonymTable {
    /// Adds a synonym for a role.
    /// Fails if the synonym already belongs to a different role.
    pub fn insert(&mut self, role: ColumnRole, synonym: &str) -> Result<(), HeaderError> {
        let synonym = fold_case(synonym);
        match self.entries.get(&synonym) {
            Some(existing) if *existing != role => Err(HeaderError::SynonymConflict {
                synonym,
                first: *existing,
                second: role,
            }),
            _ => {
                self.entries.insert(synonym, role);
                Ok(())
            }
        }
    }

    /// Replaces the synonym sets of every listed role at once.
    ///
    /// Synonyms may move between listed roles; disjointness is checked on the
    /// finished table. On error the table is left unchanged.
    pub fn replace<S: AsRef<str>>(&mut self, overrides: &[(ColumnRole, Vec<S>)]) -> Result<(), HeaderError> {
        let mut table = self.clone();
        table.entries.retain(|_, existing| !overrides.iter().any(|(role, _)| role == existing));
        for (role, synonyms) in overrides {
            for synonym in synonyms {
                table.insert(*role, synonym.as_ref())?;
            }
        }
        *self = table;
        Ok(())
    }

    /// Returns the role a header cell stands for, if any.
    pub fn role_of(&self, header: &str) -> Option<ColumnRole> {
        self.entries.get(&fold_case(header)).copied()
    }
}

impl Default for SynonymTable {
    /// Creates the table of built-in Russian header synonyms.
    fn default() -> Self {
        let entries = DEFAULT_SYNONYMS
            .iter()
            .flat_map(|(role, synonyms)| synonyms.iter().map(move |synonym| (fold_case(synonym), *role)))
            .collect();
        Self { entries }
    }
}

/// Column positions resolved from one header row, scoped to a single file.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ColumnMapping {
    pub product: Option<usize>,
    pub price: Option<usize>,
    pub weight: Option<usize>,
}

impl ColumnMapping {
    /// Index of the column resolved for a role.
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Product => self.product,
            ColumnRole::Price => self.price,
            ColumnRole::Weight => self.weight,
        }
    }

    fn slot(&mut self, role: ColumnRole) -> &mut Option<usize> {
        match role {
            ColumnRole::Product => &mut self.product,
            ColumnRole::Price => &mut self.price,
            ColumnRole::Weight => &mut self.weight,
        }
    }

    /// Roles without a resolved column.
    pub fn missing(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL.into_iter().filter(|role| self.get(*role).is_none()).collect()
    }

    /// Converts to a complete mapping, failing if any role is unresolved.
    pub fn require(&self) -> Result<ResolvedColumns, HeaderError> {
        match (self.product, self.price, self.weight) {
            (Some(product), Some(price), Some(weight)) => Ok(ResolvedColumns { product, price, weight }),
            _ => Err(HeaderError::MissingColumns { roles: self.missing() }),
        }
    }
}

/// Column positions of a file where every role is present.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedColumns {
    pub product: usize,
    pub price: usize,
    pub weight: usize,
}

impl ResolvedColumns {
    /// Highest column index a row must reach to be usable.
    pub fn max_index(&self) -> usize {
        self.product.max(self.price).max(self.weight)
    }
}

/// Maps header rows to canonical column roles using a synonym table.
pub struct HeaderResolver<'a> {
    synonyms: &'a SynonymTable,
}

impl<'a> HeaderResolver<'a> {
    pub fn new(synonyms: &'a SynonymTable) -> Self {
        Self { synonyms }
    }

    /// Resolves a header row into a possibly partial mapping.
    /// The earliest column matching a role wins; later matches are ignored.
    pub fn resolve<I, S>(&self, headers: I) -> ColumnMapping
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mapping = ColumnMapping::default();
        for (index, header) in headers.into_iter().enumerate() {
            if let Some(role) = self.synonyms.role_of(header.as_ref()) {
                let slot = mapping.slot(role);
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }
        mapping
    }
}
