//! Place catalogues for simulation.
//!
//! The built-in catalogue is a handful of downtown Toronto places around the
//! default home location, plus one far outside the default search region.
//! Other catalogues load from TOML:
//!
//! ```toml
//! [[place]]
//! id = 1
//! name = "Pilot Coffee Roasters"
//! subtitle = "65 Front St W"
//! coordinate = { lat = 43.6452, lon = -79.3806 }
//! imagery = true
//! ```

use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use waypoint_core::{Coordinate, Place, PlaceId};

/// Errors loading a catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// File could not be read.
    #[error("cannot read catalogue {path}: {source}")]
    Read {
        /// Requested path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Malformed TOML, unknown field or out-of-range coordinate.
    #[error("invalid catalogue: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two rows share an id.
    #[error("duplicate {0} in catalogue")]
    DuplicateId(PlaceId),
}

/// One `[[place]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaceRow {
    id: PlaceId,
    name: String,
    #[serde(default)]
    subtitle: String,
    coordinate: Coordinate,
    #[serde(default)]
    imagery: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogueFile {
    #[serde(default)]
    place: Vec<PlaceRow>,
}

/// Places the simulated search service answers from, and which of them have
/// preview imagery.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    places: Vec<Place>,
    imagery: Vec<PlaceId>,
}

impl Catalogue {
    /// The built-in Toronto catalogue.
    pub fn toronto() -> Self {
        let imagery =
            TORONTO.iter().filter(|entry| entry.imagery).map(|entry| PlaceId(entry.id)).collect();
        Self { places: catalogue(), imagery }
    }

    /// Load a catalogue from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogueError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CatalogueError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content)
    }

    /// Parse a catalogue from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile = toml::from_str(content)?;

        let mut seen = HashSet::new();
        let mut places = Vec::with_capacity(file.place.len());
        let mut imagery = Vec::new();
        for row in file.place {
            if !seen.insert(row.id) {
                return Err(CatalogueError::DuplicateId(row.id));
            }
            if row.imagery {
                imagery.push(row.id);
            }
            places.push(Place::new(row.id, row.name, row.subtitle, row.coordinate));
        }
        tracing::debug!(places = places.len(), imagery = imagery.len(), "loaded catalogue");
        Ok(Self { places, imagery })
    }

    /// Places in catalogue order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Places with preview imagery.
    pub fn imagery(&self) -> &[PlaceId] {
        &self.imagery
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::toronto()
    }
}

/// One row of the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct CatalogueEntry {
    /// Stable id.
    pub id: u64,
    /// Display name.
    pub name: &'static str,
    /// Address line.
    pub subtitle: &'static str,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Whether preview imagery exists for this place.
    pub imagery: bool,
}

/// Places used by the simulated search service.
pub const TORONTO: &[CatalogueEntry] = &[
    CatalogueEntry {
        id: 1,
        name: "Pilot Coffee Roasters",
        subtitle: "65 Front St W",
        lat: 43.6452,
        lon: -79.3806,
        imagery: true,
    },
    CatalogueEntry {
        id: 2,
        name: "Jimmy's Coffee",
        subtitle: "107 Portland St",
        lat: 43.6455,
        lon: -79.4003,
        imagery: true,
    },
    CatalogueEntry {
        id: 3,
        name: "Balzac's Coffee",
        subtitle: "1 Trinity St",
        lat: 43.6503,
        lon: -79.3596,
        imagery: false,
    },
    CatalogueEntry {
        id: 4,
        name: "St. Lawrence Market",
        subtitle: "93 Front St E",
        lat: 43.6487,
        lon: -79.3716,
        imagery: true,
    },
    CatalogueEntry {
        id: 5,
        name: "Union Station",
        subtitle: "61 Front St W",
        lat: 43.6453,
        lon: -79.3806,
        imagery: true,
    },
    CatalogueEntry {
        id: 6,
        name: "Harbourfront Centre",
        subtitle: "235 Queens Quay W",
        lat: 43.6387,
        lon: -79.3817,
        imagery: false,
    },
    CatalogueEntry {
        id: 7,
        name: "Kensington Market",
        subtitle: "Kensington Ave",
        lat: 43.6547,
        lon: -79.4005,
        imagery: true,
    },
    CatalogueEntry {
        id: 8,
        name: "Tim Hortons",
        subtitle: "King St W",
        lat: 43.6480,
        lon: -79.3870,
        imagery: false,
    },
    CatalogueEntry {
        id: 9,
        name: "Hamilton Coffee Co.",
        subtitle: "Hamilton, ON",
        lat: 43.2557,
        lon: -79.8711,
        imagery: false,
    },
];

/// Build the catalogue as places.
///
/// Rows with invalid coordinates are skipped.
pub fn catalogue() -> Vec<Place> {
    TORONTO
        .iter()
        .filter_map(|entry| {
            let coordinate = Coordinate::new(entry.lat, entry.lon).ok()?;
            Some(Place::new(PlaceId(entry.id), entry.name, entry.subtitle, coordinate))
        })
        .collect()
}
