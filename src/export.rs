//! Line-table export — the segment list as spreadsheet records.
//!
//! ```text
//! segments → line_table() → Vec<LineRecord> → external sheet writer
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{format_mm, Segment};

/// One row of the exported line table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// 1-based position in the drawing.
    pub item: usize,
    pub name_a: String,
    pub name_b: String,
    /// Length with two decimals; unannotated lines export as `"0.00"`.
    pub length_mm: String,
}

/// Export every segment, routable or not, in drawing order.
pub fn line_table<'a, I>(segments: I) -> Vec<LineRecord>
where
    I: IntoIterator<Item = &'a Segment>,
{
    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| LineRecord {
            item: i + 1,
            name_a: segment.name_a.clone(),
            name_b: segment.name_b.clone(),
            length_mm: format_mm(segment.length_mm.unwrap_or(0.0)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_table() {
        let unset = Segment::default().with_names("C", "");
        let records = line_table(&[Segment::named("A", "B", 12.5), unset]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].item, 1);
        assert_eq!(records[0].length_mm, "12.50");
        assert_eq!(records[1].item, 2);
        assert_eq!(records[1].name_a, "C");
        assert_eq!(records[1].length_mm, "0.00");
    }

    #[test]
    fn test_line_table_rounds_half_millimeter_hundredths_up() {
        let records = line_table(&[Segment::named("A", "B", 0.625)]);
        assert_eq!(records[0].length_mm, "0.63");
    }
}
