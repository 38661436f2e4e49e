use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateFormat {
    pub rows: usize,
    pub cols: usize,
}

impl PlateFormat {
    pub fn well_count(&self) -> usize {
        self.rows * self.cols
    }
}

static STANDARD_FORMATS: Map<&'static str, PlateFormat> = phf_map! {
    "6" => PlateFormat { rows: 2, cols: 3 },
    "12" => PlateFormat { rows: 3, cols: 4 },
    "24" => PlateFormat { rows: 4, cols: 6 },
    "48" => PlateFormat { rows: 6, cols: 8 },
    "96" => PlateFormat { rows: 8, cols: 12 },
    "384" => PlateFormat { rows: 16, cols: 24 },
    "1536" => PlateFormat { rows: 32, cols: 48 },
};

/// Looks up a standard plate by its well count, e.g. `"96"` or `"96-well"`.
pub fn lookup(name: &str) -> Option<PlateFormat> {
    let key = name.trim();
    let key = key
        .strip_suffix("-well")
        .or_else(|| key.strip_suffix("well"))
        .unwrap_or(key)
        .trim();
    STANDARD_FORMATS.get(key).copied()
}

/// Names of all standard formats, smallest plate first.
pub fn names() -> Vec<&'static str> {
    let mut entries: Vec<_> = STANDARD_FORMATS.entries().collect();
    entries.sort_by_key(|(_, format)| format.well_count());
    entries.into_iter().map(|(name, _)| *name).collect()
}
