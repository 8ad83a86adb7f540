//! Pointer-anchored scale indicator.
//!
//! Wherever the pointer sits, the indicator shows how far a fixed time
//! interval and a fixed distance reach at the current scale: a vertical bar
//! for the interval, and the hypotenuse of the two spans for the reference
//! speed.

use chrono::TimeDelta;

use crate::geometry::ScreenPt;
use crate::scale::Bounds;
use crate::scene::{Primitive, PrimitiveKind, Rotation};

/// Fixed reference quantities the indicator visualizes.
#[derive(Debug, Clone)]
pub struct ScaleReference {
    pub time: TimeDelta,
    pub time_label: String,
    pub progress: f64,
    pub progress_label: String,
}

impl Default for ScaleReference {
    fn default() -> Self {
        Self {
            time: TimeDelta::minutes(10),
            time_label: "10 mins".to_string(),
            progress: 4.0,
            progress_label: "40 km/hr".to_string(),
        }
    }
}

/// Indicator geometry at one pointer position.
///
/// Spans are fractions of the observed data range projected onto the full
/// surface size, so the indicator reads correctly against the plot scale.
/// A degenerate axis collapses its span to zero instead of blowing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleIndicator {
    pub origin: ScreenPt,
    pub time_px: f64,
    pub progress_px: f64,
}

pub fn indicator_at(
    pointer: ScreenPt,
    bounds: &Bounds,
    width: f64,
    height: f64,
    reference: &ScaleReference,
) -> ScaleIndicator {
    let time_span = bounds.time_span_secs();
    let time_px = if time_span <= 0.0 {
        0.0
    } else {
        let reference_secs = reference.time.num_milliseconds() as f64 / 1000.0;
        reference_secs / time_span * height
    };

    let progress_span = bounds.progress_span();
    let progress_px = if progress_span <= 0.0 {
        0.0
    } else {
        reference.progress / progress_span * width
    };

    ScaleIndicator {
        origin: pointer,
        time_px,
        progress_px,
    }
}

impl ScaleIndicator {
    /// Expand into primitives: the interval bar and the speed hypotenuse,
    /// both reaching up from the pointer, plus a label alongside each.
    pub fn primitives(&self, reference: &ScaleReference) -> Vec<Primitive> {
        let ScreenPt { x, y } = self.origin;
        let top = ScreenPt::new(x, y - self.time_px);

        let speed_angle = -self.time_px.atan2(self.progress_px).to_degrees();
        let speed_anchor = ScreenPt::new(x + 5.0, y + 8.0);
        let time_anchor = ScreenPt::new(x - 10.0, y - 35.0);

        vec![
            Primitive::Polyline {
                points: vec![self.origin, top],
                kind: PrimitiveKind::ScaleIndicator,
            },
            Primitive::Polyline {
                points: vec![
                    self.origin,
                    ScreenPt::new(x + self.progress_px, y - self.time_px),
                ],
                kind: PrimitiveKind::ScaleIndicator,
            },
            Primitive::Text {
                content: reference.progress_label.clone(),
                anchor: speed_anchor,
                rotation: Some(Rotation {
                    degrees: speed_angle,
                    about: speed_anchor,
                }),
                kind: PrimitiveKind::ScaleIndicator,
            },
            Primitive::Text {
                content: reference.time_label.clone(),
                anchor: time_anchor,
                rotation: Some(Rotation {
                    degrees: 90.0,
                    about: time_anchor,
                }),
                kind: PrimitiveKind::ScaleIndicator,
            },
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn bounds(span_minutes: i64, progress_span: f64) -> Bounds {
        let start = Utc.with_ymd_and_hms(2018, 3, 20, 15, 0, 0).unwrap();
        Bounds {
            min_time: start,
            max_time: start + TimeDelta::minutes(span_minutes),
            min_progress: 0.0,
            max_progress: progress_span,
        }
    }

    #[test]
    fn test_spans_scale_with_the_data_range() {
        // 60 min range: a 10 min reference covers 1/6 of the height.
        // 12 progress units: a 4 unit reference covers 1/3 of the width.
        let indicator = indicator_at(
            ScreenPt::new(200.0, 100.0),
            &bounds(60, 12.0),
            500.0,
            400.0,
            &ScaleReference::default(),
        );

        assert_eq!(indicator.origin, ScreenPt::new(200.0, 100.0));
        assert_relative_eq!(indicator.time_px, 400.0 / 6.0);
        assert_relative_eq!(indicator.progress_px, 500.0 / 3.0);
    }

    #[test]
    fn test_tight_range_magnifies_the_indicator() {
        let wide = indicator_at(
            ScreenPt::default(),
            &bounds(120, 12.0),
            500.0,
            400.0,
            &ScaleReference::default(),
        );
        let tight = indicator_at(
            ScreenPt::default(),
            &bounds(20, 12.0),
            500.0,
            400.0,
            &ScaleReference::default(),
        );

        assert!(tight.time_px > wide.time_px);
    }

    #[test]
    fn test_degenerate_axes_collapse_to_zero() {
        let indicator = indicator_at(
            ScreenPt::new(10.0, 10.0),
            &bounds(0, 0.0),
            500.0,
            400.0,
            &ScaleReference::default(),
        );

        assert_eq!(indicator.time_px, 0.0);
        assert_eq!(indicator.progress_px, 0.0);

        // and the primitives stay finite
        for primitive in indicator.primitives(&ScaleReference::default()) {
            if let Primitive::Text {
                rotation: Some(rotation),
                ..
            } = primitive
            {
                assert!(rotation.degrees.is_finite());
            }
        }
    }

    #[test]
    fn test_speed_label_leans_along_the_hypotenuse() {
        let indicator = ScaleIndicator {
            origin: ScreenPt::new(0.0, 0.0),
            time_px: 100.0,
            progress_px: 100.0,
        };
        let primitives = indicator.primitives(&ScaleReference::default());

        let Primitive::Text {
            rotation: Some(rotation),
            ..
        } = &primitives[2]
        else {
            panic!("expected a rotated speed label");
        };
        assert_relative_eq!(rotation.degrees, -45.0);
    }

    #[test]
    fn test_indicator_emits_two_lines_and_two_labels() {
        let indicator = indicator_at(
            ScreenPt::new(150.0, 90.0),
            &bounds(60, 12.0),
            500.0,
            400.0,
            &ScaleReference::default(),
        );
        let primitives = indicator.primitives(&ScaleReference::default());

        assert_eq!(primitives.len(), 4);
        assert!(primitives
            .iter()
            .all(|p| *p.kind() == PrimitiveKind::ScaleIndicator));

        let Primitive::Polyline { points, .. } = &primitives[0] else {
            panic!("expected the interval bar first");
        };
        assert_eq!(points[0], ScreenPt::new(150.0, 90.0));
        assert_relative_eq!(points[0].y - points[1].y, indicator.time_px);
    }
}
