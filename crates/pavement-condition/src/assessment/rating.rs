use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Decodes categorical survey ratings into the numeric factors the distress
/// calculator multiplies with segment geometry. Returns `None` for ratings the
/// lookup does not recognise.
pub trait RatingLookup: Send + Sync {
    /// Share of the section area, in `[0, 1]`, for a generic damage-range rating.
    fn damage_fraction(&self, rating: &str) -> Option<f64>;
    /// Share of the section area, in `[0, 1]`, for a pothole-area rating.
    fn pothole_fraction(&self, rating: &str) -> Option<f64>;
    /// Equivalent damaged area per running metre for an edge-damage rating.
    fn edge_damage_factor(&self, rating: &str) -> Option<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTableKind {
    Damage,
    Pothole,
    Edge,
}

impl RatingTableKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Pothole => "pothole",
            Self::Edge => "edge",
        }
    }

    fn is_fraction(self) -> bool {
        matches!(self, Self::Damage | Self::Pothole)
    }
}

/// Table-backed [`RatingLookup`]. Keys are matched case-insensitively with
/// whitespace removed, so `"0 - 10 %"` and `"0-10%"` resolve to the same entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTable {
    damage: BTreeMap<String, f64>,
    pothole: BTreeMap<String, f64>,
    edge: BTreeMap<String, f64>,
}

const STANDARD_DAMAGE: &[(&str, f64)] = &[
    ("none", 0.0),
    ("0%", 0.0),
    ("<10%", 0.05),
    ("0-10%", 0.05),
    ("10-30%", 0.20),
    ("30-50%", 0.40),
    (">50%", 0.75),
];

const STANDARD_POTHOLE: &[(&str, f64)] = &[
    ("none", 0.0),
    ("0%", 0.0),
    ("<1%", 0.005),
    ("1-5%", 0.03),
    ("5-10%", 0.075),
    (">10%", 0.15),
];

const STANDARD_EDGE: &[(&str, f64)] = &[
    ("none", 0.0),
    ("light", 0.25),
    ("moderate", 0.5),
    ("severe", 1.0),
];

impl RatingTable {
    /// Midpoint-convention tables used when no override file is configured.
    pub fn standard() -> Self {
        fn build(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
            entries
                .iter()
                .map(|(rating, value)| (normalize_rating(rating), *value))
                .collect()
        }

        Self {
            damage: build(STANDARD_DAMAGE),
            pothole: build(STANDARD_POTHOLE),
            edge: build(STANDARD_EDGE),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RatingTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `table,rating,value` rows on top of the standard tables; a row replaces the
    /// standard value for the same key.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RatingTableError> {
        let mut table = Self::standard();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        for record in csv_reader.deserialize::<RatingRow>() {
            let row = record?;
            table.insert(row.table, &row.rating, row.value)?;
        }

        Ok(table)
    }

    pub fn insert(
        &mut self,
        kind: RatingTableKind,
        rating: &str,
        value: f64,
    ) -> Result<(), RatingTableError> {
        let valid = value.is_finite()
            && value >= 0.0
            && (!kind.is_fraction() || value <= 1.0);
        if !valid {
            return Err(RatingTableError::OutOfRange {
                table: kind.label(),
                rating: rating.to_string(),
                value,
            });
        }

        self.table_mut(kind).insert(normalize_rating(rating), value);
        Ok(())
    }

    pub fn get(&self, kind: RatingTableKind, rating: &str) -> Option<f64> {
        self.table(kind).get(&normalize_rating(rating)).copied()
    }

    fn table(&self, kind: RatingTableKind) -> &BTreeMap<String, f64> {
        match kind {
            RatingTableKind::Damage => &self.damage,
            RatingTableKind::Pothole => &self.pothole,
            RatingTableKind::Edge => &self.edge,
        }
    }

    fn table_mut(&mut self, kind: RatingTableKind) -> &mut BTreeMap<String, f64> {
        match kind {
            RatingTableKind::Damage => &mut self.damage,
            RatingTableKind::Pothole => &mut self.pothole,
            RatingTableKind::Edge => &mut self.edge,
        }
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RatingLookup for RatingTable {
    fn damage_fraction(&self, rating: &str) -> Option<f64> {
        self.get(RatingTableKind::Damage, rating)
    }

    fn pothole_fraction(&self, rating: &str) -> Option<f64> {
        self.get(RatingTableKind::Pothole, rating)
    }

    fn edge_damage_factor(&self, rating: &str) -> Option<f64> {
        self.get(RatingTableKind::Edge, rating)
    }
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    table: RatingTableKind,
    rating: String,
    value: f64,
}

fn normalize_rating(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum RatingTableError {
    #[error("failed to read rating table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rating table CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("{table} rating '{rating}' has out-of-range value {value}")]
    OutOfRange {
        table: &'static str,
        rating: String,
        value: f64,
    },
}
