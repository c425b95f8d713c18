//! Projects normalized bounding boxes onto a displayed image's box.
//!
//! Coordinates arrive on a 0-1000 scale in `[ymin, xmin, ymax, xmax]` order.
//! Output rectangles are percentages of the containing element, so they track
//! image resizing without recomputation as long as the container exactly
//! bounds the rendered image.

use crate::domain::model::{BoundingBox, OverlayRect};

const COORD_SCALE: i64 = 1000;

/// Project one box. Coordinates are clamped into [0, 1000] first; a box that
/// is degenerate after clamping (zero or negative extent on either axis)
/// yields `None` and should not be rendered.
pub fn project(bbox: &BoundingBox) -> Option<OverlayRect> {
    let [ymin, xmin, ymax, xmax] = bbox.box_2d;
    let ymin = ymin.clamp(0, COORD_SCALE);
    let xmin = xmin.clamp(0, COORD_SCALE);
    let ymax = ymax.clamp(0, COORD_SCALE);
    let xmax = xmax.clamp(0, COORD_SCALE);

    if ymin >= ymax || xmin >= xmax {
        return None;
    }

    Some(OverlayRect {
        top: ymin as f64 / 10.0,
        left: xmin as f64 / 10.0,
        height: (ymax - ymin) as f64 / 10.0,
        width: (xmax - xmin) as f64 / 10.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(coords: [i64; 4]) -> BoundingBox {
        BoundingBox {
            label: "item".to_string(),
            box_2d: coords,
        }
    }

    #[test]
    fn test_project_exact_percentages() {
        let rect = project(&bbox([100, 200, 300, 400])).unwrap();
        assert_eq!(rect.top, 10.0);
        assert_eq!(rect.left, 20.0);
        assert_eq!(rect.height, 20.0);
        assert_eq!(rect.width, 20.0);
    }

    #[test]
    fn test_project_full_frame() {
        let rect = project(&bbox([0, 0, 1000, 1000])).unwrap();
        assert_eq!(rect.top, 0.0);
        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.height, 100.0);
        assert_eq!(rect.width, 100.0);
    }

    #[test]
    fn test_project_clamps_out_of_range_coordinates() {
        // A misbehaving model may emit coordinates beyond the scale.
        let rect = project(&bbox([-50, 900, 1200, 1500])).unwrap();
        assert_eq!(rect.top, 0.0);
        assert_eq!(rect.left, 90.0);
        assert_eq!(rect.height, 100.0);
        assert_eq!(rect.width, 10.0);
    }

    #[test]
    fn test_project_skips_degenerate_boxes() {
        // Zero area.
        assert_eq!(project(&bbox([500, 500, 500, 700])), None);
        // Flipped on the y axis.
        assert_eq!(project(&bbox([600, 100, 400, 300])), None);
        // Entirely outside the frame collapses to a degenerate box.
        assert_eq!(project(&bbox([1100, 1100, 1300, 1300])), None);
    }

    #[test]
    fn test_overlay_rect_to_pixels() {
        let rect = project(&bbox([100, 200, 300, 400])).unwrap();
        let (x, y, w, h) = rect.to_pixels(800.0, 600.0);
        assert_eq!(x, 160.0);
        assert_eq!(y, 60.0);
        assert_eq!(w, 160.0);
        assert_eq!(h, 120.0);
    }
}
