//! Directional type-effectiveness lookup.

use crate::errors::{CatalogError, CatalogResult};
use schema::ElementType;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const BUILTIN_TYPE_CHART: &str = include_str!("../data/type_chart.ron");

static BUILTIN_CHART: LazyLock<CatalogResult<TypeChart>> =
    LazyLock::new(|| TypeChart::from_ron_str(BUILTIN_TYPE_CHART));

/// Sparse attacking x defending multiplier table. Pairs without an entry are
/// neutral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeChart {
    entries: HashMap<(ElementType, ElementType), f64>,
}

impl TypeChart {
    pub fn builtin() -> CatalogResult<&'static TypeChart> {
        BUILTIN_CHART.as_ref().map_err(Clone::clone)
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = ((ElementType, ElementType), f64)>,
    ) -> CatalogResult<Self> {
        let mut chart = TypeChart::default();
        for ((attacking, defending), multiplier) in entries {
            if !multiplier.is_finite() || multiplier < 0.0 {
                return Err(CatalogError::MalformedData(format!(
                    "{} -> {} has invalid multiplier {}",
                    attacking, defending, multiplier
                )));
            }
            if chart
                .entries
                .insert((attacking, defending), multiplier)
                .is_some()
            {
                return Err(CatalogError::MalformedData(format!(
                    "duplicate type chart entry {} -> {}",
                    attacking, defending
                )));
            }
        }
        Ok(chart)
    }

    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        let nested: BTreeMap<ElementType, BTreeMap<ElementType, f64>> = ron::from_str(source)
            .map_err(|e| CatalogError::MalformedData(format!("type chart: {}", e)))?;
        Self::from_entries(nested.into_iter().flat_map(|(attacking, row)| {
            row.into_iter()
                .map(move |(defending, multiplier)| ((attacking, defending), multiplier))
        }))
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let source = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    pub fn multiplier(&self, attacking: ElementType, defending: ElementType) -> f64 {
        self.entries
            .get(&(attacking, defending))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product of the multipliers against every defending type.
    pub fn effectiveness(&self, attacking: ElementType, defending: &[ElementType]) -> f64 {
        defending
            .iter()
            .map(|&d| self.multiplier(attacking, d))
            .product()
    }
}
