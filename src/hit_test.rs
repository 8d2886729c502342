//! Pointer hit-testing against the box list.
//!
//! Both queries walk the list from last to first so the top-most (last drawn)
//! box wins. Which query takes precedence is decided by the caller.

use crate::model::{AnnotationBox, Corner, Point};

/// A resize handle under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    pub index: usize,
    pub corner: Corner,
}

/// Whether `point` lies in the square of half-extent `tolerance` around `corner`.
fn near(point: Point, corner: Point, tolerance: f32) -> bool {
    (point.x - corner.x).abs() <= tolerance && (point.y - corner.y).abs() <= tolerance
}

/// First corner handle within `handle_size` of `point`, top-most box first.
pub fn resize_handle_at(boxes: &[AnnotationBox], point: Point, handle_size: f32) -> Option<HandleHit> {
    boxes.iter().enumerate().rev().find_map(|(index, b)| {
        Corner::ALL
            .into_iter()
            .find(|&corner| near(point, b.rect.corner(corner), handle_size))
            .map(|corner| HandleHit { index, corner })
    })
}

/// Index of the top-most box whose rectangle contains `point`.
pub fn box_at(boxes: &[AnnotationBox], point: Point) -> Option<usize> {
    boxes.iter().rposition(|b| b.rect.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingRect;

    fn boxes() -> Vec<AnnotationBox> {
        vec![
            AnnotationBox::new("A", BoundingRect::new(0.0, 0.0, 100.0, 100.0)),
            AnnotationBox::new("B", BoundingRect::new(50.0, 50.0, 100.0, 100.0)),
        ]
    }

    #[test]
    fn test_box_at_prefers_last_drawn() {
        let boxes = boxes();
        assert_eq!(box_at(&boxes, Point::new(75.0, 75.0)), Some(1));
        assert_eq!(box_at(&boxes, Point::new(10.0, 10.0)), Some(0));
        assert_eq!(box_at(&boxes, Point::new(200.0, 200.0)), None);
    }

    #[test]
    fn test_box_at_inclusive_edges() {
        let boxes = boxes();
        assert_eq!(box_at(&boxes, Point::new(150.0, 150.0)), Some(1));
    }

    #[test]
    fn test_handle_uses_square_tolerance() {
        let boxes = boxes();
        // Diagonal offset (8, 8) is outside an 8px circle but inside the square.
        let hit = resize_handle_at(&boxes, Point::new(158.0, 158.0), 8.0);
        assert_eq!(
            hit,
            Some(HandleHit {
                index: 1,
                corner: Corner::SouthEast
            })
        );
        assert_eq!(resize_handle_at(&boxes, Point::new(158.1, 150.0), 8.0), None);
    }

    #[test]
    fn test_handle_prefers_last_drawn() {
        // Box 0's SE corner and box 1's NW corner coincide at (50, 50).
        let boxes = vec![
            AnnotationBox::new("A", BoundingRect::new(0.0, 0.0, 50.0, 50.0)),
            AnnotationBox::new("B", BoundingRect::new(50.0, 50.0, 50.0, 50.0)),
        ];
        let hit = resize_handle_at(&boxes, Point::new(50.0, 50.0), 4.0);
        assert_eq!(
            hit,
            Some(HandleHit {
                index: 1,
                corner: Corner::NorthWest
            })
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(resize_handle_at(&[], Point::new(0.0, 0.0), 8.0), None);
        assert_eq!(box_at(&[], Point::new(0.0, 0.0)), None);
    }
}
