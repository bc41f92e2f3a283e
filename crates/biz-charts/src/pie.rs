use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use biz_core::ChartKind;
use biz_core::entities::GroupTotal;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::ChartError;
use crate::fonts::FAMILY;

/// One wedge of the pie. Angles are in radians, counter-clockwise from the
/// positive x axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    pub label: String,
    /// Share of the total in percent.
    pub percent: f64,
    pub start: f64,
    pub sweep: f64,
}

impl Slice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Lay out wedges starting at 12 o'clock, running counter-clockwise.
///
/// Returns `None` when the totals cannot form a pie: no groups, a total that
/// is not positive and finite, or a negative group.
pub(crate) fn layout(groups: &[GroupTotal]) -> Option<Vec<Slice>> {
    if groups.is_empty() || groups.iter().any(|g| g.total < 0.0) {
        return None;
    }
    let total: f64 = groups.iter().map(|g| g.total).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut start = FRAC_PI_2;
    let slices = groups
        .iter()
        .map(|group| {
            let fraction = group.total / total;
            let slice = Slice {
                label: group.key.clone(),
                percent: fraction * 100.0,
                start,
                sweep: fraction * TAU,
            };
            start += slice.sweep;
            slice
        })
        .collect();
    Some(slices)
}

/// Draw the laid-out wedges, with month and percentage labels when a font
/// is available.
pub(crate) fn draw(
    path: &Path,
    slices: &[Slice],
    size: u32,
    with_text: bool,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let area = if with_text {
        root.titled(ChartKind::TemporalPie.title(), (FAMILY, 22))
            .map_err(ChartError::draw)?
    } else {
        root.clone()
    };

    let (width, height) = area.dim_in_pixel();
    let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let radius = f64::from(width.min(height)) * 0.35;

    for (idx, slice) in slices.iter().enumerate() {
        area.draw(&Polygon::new(
            wedge_points(center, radius, slice),
            Palette99::pick(idx).filled(),
        ))
        .map_err(ChartError::draw)?;
    }

    if with_text {
        let centered = Pos::new(HPos::Center, VPos::Center);
        let label_style = TextStyle::from((FAMILY, 15).into_font()).pos(centered);
        let percent_style = TextStyle::from((FAMILY, 13).into_font()).pos(centered);
        for slice in slices {
            let angle = slice.mid_angle();
            area.draw(&Text::new(
                slice.label.clone(),
                polar(center, radius * 1.15, angle),
                label_style.clone(),
            ))
            .map_err(ChartError::draw)?;
            area.draw(&Text::new(
                slice.percent_label(),
                polar(center, radius * 0.6, angle),
                percent_style.clone(),
            ))
            .map_err(ChartError::draw)?;
        }
    }

    root.present().map_err(ChartError::draw)?;
    Ok(())
}

/// Center plus arc points at roughly one-degree steps.
fn wedge_points(center: (f64, f64), radius: f64, slice: &Slice) -> Vec<(i32, i32)> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (slice.sweep.to_degrees().ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(to_pixel(center));
    for step in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let angle = slice.start + slice.sweep * (step as f64) / (steps as f64);
        points.push(polar(center, radius, angle));
    }
    points
}

/// Pixel y grows downwards, hence the minus on the sine term.
fn polar(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    to_pixel((
        radius.mul_add(angle.cos(), center.0),
        radius.mul_add(-angle.sin(), center.1),
    ))
}

#[allow(clippy::cast_possible_truncation)]
fn to_pixel(point: (f64, f64)) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shares_sum_to_one_hundred() {
        let slices = layout(&[
            GroupTotal::new("Jan", 15.0),
            GroupTotal::new("Feb", 20.0),
            GroupTotal::new("Mar", 5.0),
        ])
        .unwrap();
        let sum: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        let labels: Vec<String> = slices.iter().map(Slice::percent_label).collect();
        assert_eq!(labels, vec!["37.5%", "50.0%", "12.5%"]);
    }

    #[test]
    fn first_slice_starts_at_twelve_oclock_and_wedges_are_contiguous() {
        let slices = layout(&[GroupTotal::new("A", 1.0), GroupTotal::new("B", 3.0)]).unwrap();
        assert!((slices[0].start - FRAC_PI_2).abs() < 1e-12);
        assert!((slices[1].start - (slices[0].start + slices[0].sweep)).abs() < 1e-12);
        let swept: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((swept - TAU).abs() < 1e-9);
    }

    #[test]
    fn one_decimal_rounding() {
        let slices = layout(&[GroupTotal::new("A", 1.0), GroupTotal::new("B", 2.0)]).unwrap();
        assert_eq!(slices[0].percent_label(), "33.3%");
        assert_eq!(slices[1].percent_label(), "66.7%");
    }

    #[test]
    fn rejects_unrepresentable_totals() {
        assert!(layout(&[]).is_none());
        assert!(layout(&[GroupTotal::new("A", 0.0)]).is_none());
        assert!(layout(&[GroupTotal::new("A", 5.0), GroupTotal::new("B", -1.0)]).is_none());
    }

    #[test]
    fn zero_slices_are_kept() {
        let slices = layout(&[GroupTotal::new("A", 0.0), GroupTotal::new("B", 4.0)]).unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].percent_label(), "0.0%");
    }

    #[test]
    fn polar_points_up_at_ninety_degrees() {
        assert_eq!(polar((100.0, 100.0), 50.0, FRAC_PI_2), (100, 50));
    }

    #[test]
    fn wedge_starts_at_center() {
        let slices = layout(&[GroupTotal::new("A", 1.0)]).unwrap();
        let points = wedge_points((10.0, 10.0), 5.0, &slices[0]);
        assert_eq!(points[0], (10, 10));
        assert!(points.len() >= 360);
    }
}
