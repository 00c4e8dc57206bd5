//! Per-row accumulation of kernel samples

use std::collections::BTreeMap;

/// One kernel's reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Signed lattice column; cell `c` spans `[c*k, (c+1)*k]` along the row
    pub column: i64,
    /// `1 - mean / 255` over the selected pixels
    pub intensity: f64,
    /// Number of pixels the kernel selected
    pub pixels: usize,
}

/// Samples of one output row, in insertion order until [`RowEntry::sorted`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowEntry {
    samples: Vec<Sample>,
}

impl RowEntry {
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples ordered by column
    pub fn sorted(&self) -> Vec<Sample> {
        let mut samples = self.samples.clone();
        samples.sort_by_key(|s| s.column);
        samples
    }
}

/// Signed lattice row → samples. Rows iterate top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasRows {
    rows: BTreeMap<i64, RowEntry>,
}

impl CanvasRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, row: i64, sample: Sample) {
        self.rows.entry(row).or_default().push(sample);
    }

    /// Fold another map into this one. Quadrants write disjoint keys, so rows are
    /// only ever extended.
    pub fn merge(mut self, other: CanvasRows) -> Self {
        for (row, entry) in other.rows {
            let target = self.rows.entry(row).or_default();
            target.samples.extend(entry.samples);
        }
        self
    }

    pub fn get(&self, row: i64) -> Option<&RowEntry> {
        self.rows.get(&row)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &RowEntry)> {
        self.rows.iter().map(|(&row, entry)| (row, entry))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of samples over all rows
    pub fn sample_count(&self) -> usize {
        self.rows.values().map(RowEntry::len).sum()
    }

    /// All samples with their row, row-major
    pub fn samples(&self) -> impl Iterator<Item = (i64, &Sample)> {
        self.rows
            .iter()
            .flat_map(|(&row, entry)| entry.samples.iter().map(move |s| (row, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(column: i64, intensity: f64) -> Sample {
        Sample {
            column,
            intensity,
            pixels: 1,
        }
    }

    #[test]
    fn test_record_and_sort() {
        let mut rows = CanvasRows::new();
        rows.record(0, sample(2, 0.1));
        rows.record(0, sample(-1, 0.2));
        rows.record(0, sample(0, 0.3));
        let entry = rows.get(0).expect("row recorded");
        let columns: Vec<i64> = entry.sorted().iter().map(|s| s.column).collect();
        assert_eq!(columns, vec![-1, 0, 2]);
        // insertion order is untouched
        assert_eq!(entry.samples()[0].column, 2);
    }

    #[test]
    fn test_rows_iterate_top_to_bottom() {
        let mut rows = CanvasRows::new();
        rows.record(3, sample(0, 0.0));
        rows.record(-2, sample(0, 0.0));
        rows.record(0, sample(0, 0.0));
        let keys: Vec<i64> = rows.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![-2, 0, 3]);
    }

    #[test]
    fn test_merge_extends_rows() {
        let mut left = CanvasRows::new();
        left.record(-1, sample(-1, 0.5));
        let mut right = CanvasRows::new();
        right.record(-1, sample(0, 0.5));
        right.record(0, sample(0, 0.5));

        let merged = left.merge(right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.sample_count(), 3);
        assert_eq!(merged.get(-1).map(RowEntry::len), Some(2));
    }
}
