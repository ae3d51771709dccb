//! Column width allocation from sampled lengths

use crate::Result;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::sample::ColumnSample;
use tracing::{debug, trace};

/// Width assigned to one column
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedColumn {
    pub name: String,
    /// Share of the total columns width, 0-100
    pub percent: f32,
    /// Width in layout units
    pub width: u32,
}

/// Widths for every column, in header order, plus the resulting page width
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWidths {
    pub columns: Vec<AllocatedColumn>,
    /// `(column_width + column_padding) * column count`
    pub total_width: u32,
    pub page_width: u32,
}

impl ColumnWidths {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn width(&self, name: &str) -> Option<u32> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.width)
    }

    pub fn percent(&self, name: &str) -> Option<f32> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.percent)
    }
}

/// Distribute the columns width budget proportionally to sampled lengths
///
/// Widths are rounded half up, so a width of exactly `n.5` becomes `n + 1`.
/// The rounded widths may drift a unit or so from `total_width`; this is
/// not corrected.
pub fn allocate(sample: &ColumnSample, config: &ReportConfig) -> Result<ColumnWidths> {
    let total_len = sample.total_len();
    if sample.is_empty() || total_len == 0 {
        return Err(ReportError::DegenerateWidths);
    }

    let total_width = (config.column_width + config.column_padding) * sample.len() as u32;

    let columns: Vec<AllocatedColumn> = sample
        .columns
        .iter()
        .map(|column| {
            let percent = 100.0 * column.max_len as f32 / total_len as f32;
            let width = round_half_up(total_width as f32 * (percent / 100.0));
            AllocatedColumn {
                name: column.name.clone(),
                percent,
                width,
            }
        })
        .collect();
    trace!("Allocated column widths: {:?}", columns);

    let page_width = (total_width + config.margins.horizontal()).max(config.min_page_width);

    debug!("Columns take {} of page width {}", total_width, page_width);

    Ok(ColumnWidths {
        columns,
        total_width,
        page_width,
    })
}

/// Round to the nearest integer, ties away from zero (inputs are never negative)
fn round_half_up(value: f32) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{ColumnSample, SampledColumn};

    fn sample_of(lengths: &[(&str, usize)]) -> ColumnSample {
        ColumnSample {
            columns: lengths
                .iter()
                .map(|(name, len)| SampledColumn {
                    name: name.to_string(),
                    max_len: *len,
                })
                .collect(),
            rows_sampled: 0,
        }
    }

    #[test]
    fn test_proportional_percentages() {
        let widths = allocate(&sample_of(&[("x", 3), ("y", 2)]), &ReportConfig::default()).unwrap();

        assert!((widths.percent("x").unwrap() - 60.0).abs() < 1e-4);
        assert!((widths.percent("y").unwrap() - 40.0).abs() < 1e-4);
        assert_eq!(widths.total_width, 180);
        assert_eq!(widths.width("x"), Some(108));
        assert_eq!(widths.width("y"), Some(72));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let widths = allocate(
            &sample_of(&[("a", 7), ("b", 13), ("c", 1)]),
            &ReportConfig::default(),
        )
        .unwrap();

        let sum: f32 = widths.columns.iter().map(|c| c.percent).sum();
        assert!((sum - 100.0).abs() < 1e-3, "sum was {sum}");

        // Proportional to the sampled lengths
        let a = widths.percent("a").unwrap();
        let b = widths.percent("b").unwrap();
        assert!((a / b - 7.0 / 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_ties_round_up() {
        // 180 * 1/8 = 22.5 and 180 * 7/8 = 157.5
        let widths = allocate(&sample_of(&[("a", 1), ("b", 7)]), &ReportConfig::default()).unwrap();
        assert_eq!(widths.width("a"), Some(23));
        assert_eq!(widths.width("b"), Some(158));
        // Rounding drift is left alone
        assert_eq!(widths.columns.iter().map(|c| c.width).sum::<u32>(), 181);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(3.5), 4);
    }

    #[test]
    fn test_minimum_page_width() {
        let config = ReportConfig::default();
        let widths = allocate(&sample_of(&[("a", 1)]), &config).unwrap();
        assert_eq!(widths.total_width, 90);
        assert_eq!(widths.page_width, 555);

        for count in 1..=20 {
            let lengths: Vec<(String, usize)> =
                (0..count).map(|i| (format!("c{i}"), i + 1)).collect();
            let refs: Vec<(&str, usize)> = lengths.iter().map(|(n, l)| (n.as_str(), *l)).collect();
            let widths = allocate(&sample_of(&refs), &config).unwrap();
            assert!(widths.page_width >= 555);
            assert!(widths.page_width >= widths.total_width + 40);
        }
    }

    #[test]
    fn test_wide_report_page_width() {
        let lengths: Vec<(String, usize)> = (0..10).map(|i| (format!("c{i}"), 4)).collect();
        let refs: Vec<(&str, usize)> = lengths.iter().map(|(n, l)| (n.as_str(), *l)).collect();
        let widths = allocate(&sample_of(&refs), &ReportConfig::default()).unwrap();
        assert_eq!(widths.total_width, 900);
        assert_eq!(widths.page_width, 940);
        assert!(widths.columns.iter().all(|c| c.width == 90));
    }

    #[test]
    fn test_order_is_preserved() {
        let widths = allocate(
            &sample_of(&[("zeta", 4), ("alpha", 5), ("mid", 3)]),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(
            widths.names().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_zero_total_is_rejected() {
        let result = allocate(&sample_of(&[("", 0)]), &ReportConfig::default());
        assert!(matches!(result, Err(ReportError::DegenerateWidths)));

        let result = allocate(&sample_of(&[]), &ReportConfig::default());
        assert!(matches!(result, Err(ReportError::DegenerateWidths)));
    }
}
