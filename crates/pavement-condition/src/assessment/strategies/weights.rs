//! Fixed per-material weight tables applied to distress areas.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsphaltWeights {
    pub bleeding: f64,
    pub disintegration: f64,
    pub other_crack: f64,
    pub reflective_crack: f64,
    pub pothole: f64,
    pub rutting: f64,
    /// Applied to both the left and right edge.
    pub edge_damage: f64,
}

pub const ASPHALT_WEIGHTS: AsphaltWeights = AsphaltWeights {
    bleeding: 0.5,
    disintegration: 4.0,
    other_crack: 2.0,
    reflective_crack: 2.0,
    pothole: 1.5,
    rutting: 1.0,
    edge_damage: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcreteWeights {
    pub cracking: f64,
    pub spalling: f64,
    pub structural_cracking: f64,
    pub faulting: f64,
    pub pumping: f64,
    pub corner_break: f64,
}

pub const CONCRETE_WEIGHTS: ConcreteWeights = ConcreteWeights {
    cracking: 0.5,
    spalling: 1.0,
    structural_cracking: 2.0,
    faulting: 1.0,
    pumping: 15.0,
    corner_break: 1.5,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockWeights {
    pub reflective_cracking: f64,
    pub disintegration: f64,
    pub pothole: f64,
    pub rutting: f64,
    pub edge_damage: f64,
}

pub const BLOCK_WEIGHTS: BlockWeights = BlockWeights {
    reflective_cracking: 1.0,
    disintegration: 1.0,
    pothole: 0.5,
    rutting: 0.5,
    edge_damage: 1.0,
};

/// Shared by unpaved and gravel segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnpavedWeights {
    pub crossfall: f64,
    pub depressions: f64,
    pub erosion: f64,
    pub potholes: f64,
    pub rutting: f64,
}

pub const UNPAVED_WEIGHTS: UnpavedWeights = UnpavedWeights {
    crossfall: 0.05,
    depressions: 0.05,
    erosion: 0.05,
    potholes: 1.5,
    rutting: 1.0,
};
