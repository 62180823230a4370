//! Proportional expense breakdown.
//!
//! `build` turns category amounts into donut slices. Slices start at
//! 12 o'clock and run clockwise; geometry helpers work on the unit circle.

use crate::expenses::Category;
use crate::money::format_percent;
use serde::Serialize;
use std::f64::consts::TAU;

/// Radius of the donut hole relative to the outer radius.
pub const HOLE_RATIO: f64 = 0.4;
/// Uniform margin around the chart, in terminal cells.
pub const MARGIN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub category: Category,
    pub amount: f64,
    /// Fraction of the total, in (0, 1].
    pub share: f64,
    /// Fraction of a full turn where the slice begins.
    pub start: f64,
}

impl Slice {
    pub fn label(&self) -> String {
        format!("{} {}", self.category, format_percent(self.share))
    }

    /// Exact amount with zero decimals and no grouping, e.g. "Rent: 1500€".
    pub fn tooltip(&self, currency: &str) -> String {
        format!("{}: {:.0}{currency}", self.category, self.amount)
    }

    fn contains(&self, fraction: f64) -> bool {
        fraction >= self.start && fraction < self.start + self.share
    }

    /// Point in the middle of the ring, halfway through the slice.
    pub fn label_anchor(&self) -> (f64, f64) {
        let angle = (self.start + self.share / 2.0) * TAU;
        let radius = (1.0 + HOLE_RATIO) / 2.0;
        (radius * angle.sin(), radius * angle.cos())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartData {
    /// Nothing positive to draw; callers show a notice instead.
    NoData,
    Slices(Vec<Slice>),
}

impl ChartData {
    pub fn slices(&self) -> &[Slice] {
        match self {
            ChartData::NoData => &[],
            ChartData::Slices(slices) => slices,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartData::NoData)
    }

    /// Index of the slice covering point `(x, y)`, or `None` for points in
    /// the hole or outside the outer radius.
    pub fn slice_at(&self, x: f64, y: f64) -> Option<usize> {
        let radius = x.hypot(y);
        if !(HOLE_RATIO..=1.0).contains(&radius) {
            return None;
        }

        let mut angle = x.atan2(y);
        if angle < 0.0 {
            angle += TAU;
        }
        let fraction = angle / TAU;

        let slices = self.slices();
        slices
            .iter()
            .position(|slice| slice.contains(fraction))
            .or_else(|| slices.len().checked_sub(1))
    }
}

/// Keeps entries that are present, finite and positive, in input order.
pub fn build<I, V>(entries: I) -> ChartData
where
    I: IntoIterator<Item = (Category, V)>,
    V: Into<Option<f64>>,
{
    let kept: Vec<(Category, f64)> = entries
        .into_iter()
        .filter_map(|(category, value)| {
            value
                .into()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| (category, v))
        })
        .collect();

    if kept.is_empty() {
        return ChartData::NoData;
    }

    let total: f64 = kept.iter().map(|(_, amount)| amount).sum();
    let mut start = 0.0;
    let slices = kept
        .into_iter()
        .map(|(category, amount)| {
            let share = amount / total;
            let slice = Slice {
                category,
                amount,
                share,
                start,
            };
            start += share;
            slice
        })
        .collect();

    ChartData::Slices(slices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_non_positive_entries() {
        let chart = build([
            (Category::Rent, 0.0),
            (Category::Food, 180.0),
            (Category::Tuition, -5.0),
        ]);
        let slices = chart.slices();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].category, Category::Food);
        assert_eq!(slices[0].share, 1.0);
    }

    #[test]
    fn test_filters_missing_and_nan() {
        let chart = build([
            (Category::Rent, None),
            (Category::Food, Some(f64::NAN)),
            (Category::Leisure, Some(80.0)),
            (Category::Other, Some(f64::INFINITY)),
        ]);
        let categories: Vec<Category> = chart.slices().iter().map(|s| s.category).collect();
        assert_eq!(categories, vec![Category::Leisure]);
    }

    #[test]
    fn test_all_zero_is_no_data() {
        let chart = build(Category::ALL.iter().map(|&c| (c, 0.0)));
        assert_eq!(chart, ChartData::NoData);
        assert!(chart.is_empty());
        assert!(chart.slices().is_empty());
    }

    #[test]
    fn test_shares_and_order() {
        let chart = build([
            (Category::Food, 300.0),
            (Category::Transport, 100.0),
        ]);
        let slices = chart.slices();
        assert_eq!(slices[0].category, Category::Food);
        assert_eq!(slices[0].share, 0.75);
        assert_eq!(slices[0].start, 0.0);
        assert_eq!(slices[1].start, 0.75);
        assert_eq!(slices[0].label(), "Food 75.0%");
        assert_eq!(slices[1].tooltip("€"), "Transport: 100€");
    }

    #[test]
    fn test_tooltip_has_no_grouping() {
        let chart = build([(Category::Rent, 1500.0), (Category::Tuition, 12_000.0)]);
        let slices = chart.slices();
        assert_eq!(slices[0].tooltip("€"), "Rent: 1500€");
        assert_eq!(slices[1].tooltip("€"), "Tuition: 12000€");
    }

    #[test]
    fn test_slice_at() {
        let chart = build([
            (Category::Food, 300.0),
            (Category::Transport, 100.0),
        ]);
        assert_eq!(chart.slice_at(0.7, 0.0), Some(0));
        assert_eq!(chart.slice_at(-0.5, -0.5), Some(0));
        assert_eq!(chart.slice_at(-0.5, 0.5), Some(1));
        assert_eq!(chart.slice_at(0.0, 0.1), None);
        assert_eq!(chart.slice_at(1.0, 1.0), None);
        assert_eq!(ChartData::NoData.slice_at(0.7, 0.0), None);
    }

    #[test]
    fn test_label_anchor_is_inside_ring() {
        let chart = build([(Category::Food, 1.0), (Category::Rent, 1.0)]);
        for slice in chart.slices() {
            let (x, y) = slice.label_anchor();
            let index = chart.slice_at(x, y).unwrap();
            assert_eq!(chart.slices()[index].category, slice.category);
        }
    }
}
