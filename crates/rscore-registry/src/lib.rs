//! # rscore-registry: Location Registry
//!
//! In-memory table of postal code → [`LocationRecord`], loaded once at
//! startup and read-only afterwards.
//!
//! ## Source Format
//!
//! A CSV file with a header row containing at least:
//!
//! ```text
//! pincode,places,total_population,male_population,female_population,population_density,coordinates
//! ```
//!
//! Column order is free and extra columns are ignored. Integer columns accept
//! whole-valued floats (`500000.0`). The density column is free text and is
//! parsed with [`rscore_core::parse_density`], so a bad density never fails
//! the load.
//!
//! ## Duplicate Keys
//!
//! When several rows share a postal code the first row in file order wins.
//! Later rows are skipped, counted, and logged.

pub mod error;

pub use error::RegistryError;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use rscore_core::{parse_count, parse_density, LocationRecord, Pincode, ValidationError};

/// Columns the loader requires in the header row.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "pincode",
    "places",
    "total_population",
    "male_population",
    "female_population",
    "population_density",
    "coordinates",
];

/// Immutable postal-code → demographics table.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    records: HashMap<Pincode, LocationRecord>,
    duplicate_count: usize,
    source: Option<PathBuf>,
}

impl LocationRegistry {
    /// Load the table from a CSV file on disk.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| RegistryError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let mut registry = Self::from_csv_reader(reader)?;
        registry.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            records = registry.len(),
            duplicates = registry.duplicate_count,
            "location registry loaded"
        );
        Ok(registry)
    }

    /// Load the table from any CSV byte stream.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RegistryError> {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }

    /// Build a registry from already-typed records. First record wins on
    /// duplicate keys, same as the CSV loader.
    pub fn from_records(records: impl IntoIterator<Item = LocationRecord>) -> Self {
        let mut registry = Self::default();
        for record in records {
            registry.insert_first(record);
        }
        registry
    }

    fn from_csv_reader<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, RegistryError> {
        let headers = reader
            .headers()
            .map_err(|source| RegistryError::Csv { line: 1, source })?
            .clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut registry = Self::default();
        for row in reader.records() {
            let row = row.map_err(|source| RegistryError::Csv {
                line: source.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let record = columns
                .record(&row)
                .map_err(|source| RegistryError::InvalidRow { line, source })?;
            if !registry.insert_first(record) {
                tracing::warn!(line, "duplicate pincode in location table, keeping first row");
            }
        }

        if registry.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(registry)
    }

    /// Insert unless the key is already present. Returns `false` for a
    /// skipped duplicate.
    fn insert_first(&mut self, record: LocationRecord) -> bool {
        use std::collections::hash_map::Entry;
        match self.records.entry(record.pincode) {
            Entry::Occupied(_) => {
                self.duplicate_count += 1;
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    /// Exact-match lookup. A miss is a normal outcome, not a fault.
    pub fn lookup(&self, pincode: Pincode) -> Option<&LocationRecord> {
        self.records.get(&pincode)
    }

    /// Number of distinct postal codes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows skipped because their postal code had already been seen.
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }

    /// File the registry was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Positions of the required columns within one header row.
struct ColumnIndex {
    pincode: usize,
    place: usize,
    total: usize,
    male: usize,
    female: usize,
    density: usize,
    coordinates: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, RegistryError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| RegistryError::MissingColumn {
                    column,
                    available: headers.iter().map(str::to_string).collect(),
                })
        };
        Ok(Self {
            pincode: find("pincode")?,
            place: find("places")?,
            total: find("total_population")?,
            male: find("male_population")?,
            female: find("female_population")?,
            density: find("population_density")?,
            coordinates: find("coordinates")?,
        })
    }

    fn record(&self, row: &csv::StringRecord) -> Result<LocationRecord, ValidationError> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        Ok(LocationRecord {
            pincode: cell(self.pincode).parse()?,
            place_name: cell(self.place).to_string(),
            total_population: parse_count("total_population", cell(self.total))?,
            male_population: parse_count("male_population", cell(self.male))?,
            female_population: parse_count("female_population", cell(self.female))?,
            population_density: parse_density(cell(self.density)),
            coordinates: cell(self.coordinates).to_string(),
        })
    }
}
