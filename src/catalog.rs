//! Static reference data: species and move definitions.
//!
//! The built-in catalog is embedded from `data/*.ron` and parsed on first use.
//! Alternative catalogs can be loaded from a directory holding the same files.

use crate::errors::{CatalogError, CatalogResult};
use schema::{MoveData, SpeciesData};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const BUILTIN_SPECIES: &str = include_str!("../data/species.ron");
const BUILTIN_MOVES: &str = include_str!("../data/moves.ron");

static BUILTIN_CATALOG: LazyLock<CatalogResult<Catalog>> =
    LazyLock::new(|| Catalog::from_ron_str(BUILTIN_SPECIES, BUILTIN_MOVES));

/// Normalize a species or move key for lookup: `"Thunder-Shock"` -> `"thunder shock"`.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    species: BTreeMap<String, SpeciesData>,
    moves: BTreeMap<String, MoveData>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> CatalogResult<&'static Catalog> {
        BUILTIN_CATALOG.as_ref().map_err(Clone::clone)
    }

    /// Build a catalog from already-parsed records, normalizing keys and
    /// validating that every species only references known moves.
    pub fn new(
        species: impl IntoIterator<Item = (String, SpeciesData)>,
        moves: impl IntoIterator<Item = (String, MoveData)>,
    ) -> CatalogResult<Self> {
        let mut catalog = Catalog {
            species: BTreeMap::new(),
            moves: BTreeMap::new(),
        };

        for (key, data) in moves {
            let key = normalize_key(&key);
            if catalog.moves.insert(key.clone(), data).is_some() {
                return Err(CatalogError::MalformedData(format!(
                    "duplicate move key `{}`",
                    key
                )));
            }
        }

        for (key, mut data) in species {
            let key = normalize_key(&key);
            data.moves = data.moves.iter().map(|m| normalize_key(m)).collect();
            if catalog.species.insert(key.clone(), data).is_some() {
                return Err(CatalogError::MalformedData(format!(
                    "duplicate species key `{}`",
                    key
                )));
            }
        }

        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_ron_str(species_src: &str, moves_src: &str) -> CatalogResult<Self> {
        let species: BTreeMap<String, SpeciesData> = ron::from_str(species_src)
            .map_err(|e| CatalogError::MalformedData(format!("species: {}", e)))?;
        let moves: BTreeMap<String, MoveData> = ron::from_str(moves_src)
            .map_err(|e| CatalogError::MalformedData(format!("moves: {}", e)))?;
        Self::new(species, moves)
    }

    /// Load `species.ron` and `moves.ron` from a data directory.
    pub fn load(data_path: &Path) -> CatalogResult<Self> {
        let read = |name: &str| {
            let path = data_path.join(name);
            fs::read_to_string(&path).map_err(|e| CatalogError::Io {
                path,
                message: e.to_string(),
            })
        };
        let catalog = Self::from_ron_str(&read("species.ron")?, &read("moves.ron")?)?;
        debug!(
            species = catalog.species.len(),
            moves = catalog.moves.len(),
            path = %data_path.display(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn get_species(&self, key: &str) -> CatalogResult<&SpeciesData> {
        let key = normalize_key(key);
        self.species
            .get(&key)
            .ok_or(CatalogError::SpeciesNotFound(key))
    }

    pub fn get_move(&self, key: &str) -> CatalogResult<&MoveData> {
        let key = normalize_key(key);
        self.moves.get(&key).ok_or(CatalogError::MoveNotFound(key))
    }

    /// Species keys in sorted order.
    pub fn species_keys(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn species(&self) -> impl DoubleEndedIterator<Item = (&str, &SpeciesData)> {
        self.species.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn validate(&self) -> CatalogResult<()> {
        for (key, species) in &self.species {
            let malformed = |reason: &str| {
                Err(CatalogError::MalformedData(format!(
                    "species `{}` {}",
                    key, reason
                )))
            };
            if species.types.is_empty() || species.types.len() > 2 {
                return malformed("must have one or two types");
            }
            if species.moves.is_empty() {
                return malformed("has no moves");
            }
            if species.base_stats.max_health == 0 {
                return malformed("has zero max health");
            }
            if species.base_stats.defense == 0 {
                return malformed("has zero defense");
            }
            if let Some(missing) = species.moves.iter().find(|m| !self.moves.contains_key(*m)) {
                return malformed(&format!("references unknown move `{}`", missing));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{ElementType, SecondaryEffect};

    #[rstest]
    #[case("thunder shock", "thunder shock")]
    #[case("Thunder-Shock", "thunder shock")]
    #[case("  QUICK_ATTACK ", "quick attack")]
    #[case("ember", "ember")]
    fn test_normalize_key(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(input), expected);
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("built-in catalog should parse");
        let keys: Vec<&str> = catalog.species_keys().collect();
        assert_eq!(
            keys,
            vec!["alakazam", "blastoise", "charizard", "gengar", "pikachu", "venusaur"]
        );

        let charizard = catalog.get_species("Charizard").unwrap();
        assert_eq!(charizard.types, vec![ElementType::Fire, ElementType::Flying]);
        assert_eq!(charizard.base_stats.attack, 84);
        assert_eq!(charizard.moves.len(), 4);

        let quick_attack = catalog.get_move("quick-attack").unwrap();
        assert_eq!(quick_attack.priority, 1);
        assert_eq!(quick_attack.power, 40);

        let teleport = catalog.get_move("teleport").unwrap();
        assert_eq!(teleport.effect, Some(SecondaryEffect::Escape));
        assert!(teleport.is_status_move());
    }

    #[test]
    fn test_missing_keys_are_not_found() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.get_species("missingno"),
            Err(CatalogError::SpeciesNotFound("missingno".to_string()))
        );
        assert_eq!(
            catalog.get_move("Splash"),
            Err(CatalogError::MoveNotFound("splash".to_string()))
        );
    }

    #[test]
    fn test_unknown_move_reference_is_malformed() {
        let species = r#"{
            "eevee": (
                name: "Eevee",
                types: [normal],
                base_stats: (max_health: 55, attack: 55, defense: 50, speed: 55),
                moves: ["tackle", "swift"],
            ),
        }"#;
        let moves = r#"{ "tackle": (name: "Tackle", element: normal, power: 40) }"#;

        let result = Catalog::from_ron_str(species, moves);
        assert!(
            matches!(result, Err(CatalogError::MalformedData(ref msg)) if msg.contains("swift")),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn test_unparseable_data_is_malformed() {
        let result = Catalog::from_ron_str("{ not ron", "{}");
        assert!(matches!(result, Err(CatalogError::MalformedData(_))));
    }

    #[test]
    fn test_load_from_missing_directory_is_io_error() {
        let result = Catalog::load(Path::new("/definitely/not/a/data/dir"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
