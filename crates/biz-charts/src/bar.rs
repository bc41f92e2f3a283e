use std::path::Path;

use biz_core::ChartKind;
use biz_core::entities::GroupTotal;
use plotters::prelude::*;

use crate::error::ChartError;
use crate::fonts::FAMILY;

const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Vertical bar per group over the y range `(y_min, y_max)`, labelled with
/// the group key.
pub(crate) fn draw(
    path: &Path,
    groups: &[GroupTotal],
    (y_min, y_max): (f64, f64),
    size: (u32, u32),
    with_text: bool,
) -> Result<(), ChartError> {
    let count = u32::try_from(groups.len())
        .map_err(|_| ChartError::Draw(format!("too many bars: {}", groups.len())))?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if with_text {
        builder
            .caption(ChartKind::CategoricalBar.title(), (FAMILY, 22))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut chart = builder
        .build_cartesian_2d((0u32..count).into_segmented(), y_min..y_max)
        .map_err(ChartError::draw)?;

    if with_text {
        let label = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => groups
                .get(*idx as usize)
                .map(|g| g.key.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(groups.len())
            .x_label_formatter(&label)
            .y_desc("Sales")
            .draw()
            .map_err(ChartError::draw)?;
    }

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(12)
                .data(
                    groups
                        .iter()
                        .zip(0u32..)
                        .map(|(group, idx)| (idx, group.total)),
                ),
        )
        .map_err(ChartError::draw)?;

    root.present().map_err(ChartError::draw)?;
    Ok(())
}

/// Y range covering zero and every total, with 10% headroom.
///
/// `None` when the range or its span is not a finite `f64`; plotters cannot
/// lay out such an axis.
pub(crate) fn value_range(groups: &[GroupTotal]) -> Option<(f64, f64)> {
    let max = groups.iter().map(|g| g.total).fold(0.0_f64, f64::max);
    let min = groups.iter().map(|g| g.total).fold(0.0_f64, f64::min);
    if max - min < f64::EPSILON {
        return Some((0.0, 1.0));
    }
    let (lo, hi) = (min * 1.1, max * 1.1);
    (lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_starts_at_zero_for_positive_totals() {
        let (lo, hi) =
            value_range(&[GroupTotal::new("A", 30.0), GroupTotal::new("B", 5.0)]).unwrap();
        assert!(lo.abs() < f64::EPSILON);
        assert!((hi - 33.0).abs() < 1e-9);
    }

    #[test]
    fn range_extends_below_zero_for_negative_totals() {
        let (lo, hi) =
            value_range(&[GroupTotal::new("A", -10.0), GroupTotal::new("B", 5.0)]).unwrap();
        assert!((lo + 11.0).abs() < 1e-9);
        assert!((hi - 5.5).abs() < 1e-9);
    }

    #[test]
    fn all_zero_gets_unit_range() {
        assert_eq!(value_range(&[GroupTotal::new("A", 0.0)]), Some((0.0, 1.0)));
    }

    #[test]
    fn headroom_past_f64_max_has_no_range() {
        assert_eq!(value_range(&[GroupTotal::new("A", 1.7e308)]), None);
        assert_eq!(
            value_range(&[GroupTotal::new("A", -1e308), GroupTotal::new("B", 1e308)]),
            None
        );
    }
}
