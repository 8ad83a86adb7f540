//! Screen-space primitives for diagram layout.

/// A point in screen pixels. The y axis grows downward, matching vector
/// surfaces like SVG and canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPt {
    pub x: f64,
    pub y: f64,
}

impl ScreenPt {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed pixel margins framing the plot area.
///
/// Left and right bound the progress axis, top and bottom the time axis.
/// The defaults leave room for hour labels on the left and rotated stop
/// labels below the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 75.0,
            top: 20.0,
            right: 100.0,
            bottom: 140.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins_frame_the_plot() {
        let margins = Margins::default();
        assert_eq!(margins.left, 75.0);
        assert_eq!(margins.top, 20.0);
        assert_eq!(margins.right, 100.0);
        assert_eq!(margins.bottom, 140.0);
    }
}
