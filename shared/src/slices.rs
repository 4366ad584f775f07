use std::f64::consts::TAU;

/// One wedge of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub color: String,
    pub index: usize,
}

/// Fixed, ordered list of slices. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSet {
    slices: Vec<Slice>,
}

impl SliceSet {
    /// Pairs every label with a color, cycling the palette when it is shorter
    /// than the label list.
    pub fn new<L, C>(labels: &[L], colors: &[C]) -> Self
    where
        L: AsRef<str>,
        C: AsRef<str>,
    {
        let slices = labels
            .iter()
            .enumerate()
            .map(|(index, label)| Slice {
                label: label.as_ref().to_string(),
                color: if colors.is_empty() {
                    DEFAULT_COLORS[index % DEFAULT_COLORS.len()].to_string()
                } else {
                    colors[index % colors.len()].as_ref().to_string()
                },
                index,
            })
            .collect();

        Self { slices }
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Angular width of one slice in radians.
    pub fn arc_size(&self) -> f64 {
        TAU / self.slices.len().max(1) as f64
    }

    pub fn get(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter()
    }
}

impl Default for SliceSet {
    fn default() -> Self {
        Self::new(&DEFAULT_LABELS, &DEFAULT_COLORS)
    }
}

pub const DEFAULT_LABELS: [&str; 8] = [
    "Prize 1", "Prize 2", "Prize 3", "Prize 4",
    "Prize 5", "Prize 6", "Prize 7", "Prize 8",
];

pub const DEFAULT_COLORS: [&str; 8] = [
    "#FF6384", // Pink
    "#36A2EB", // Blue
    "#FFCE56", // Yellow
    "#4BC0C0", // Teal
    "#9966FF", // Violet
    "#FF9F40", // Orange
    "#C9CBCF", // Grey
    "#FF6F61", // Coral
];
