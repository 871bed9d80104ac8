//! # Geometry Module
//!
//! Points and quadrilateral bounding boxes as produced by the OCR engine.
//!
//! The engine labels polygon corners as top-left, top-right, bottom-right and
//! bottom-left, but the polygon is not guaranteed to be an axis-aligned
//! rectangle and the labels do not always match the real geometry. Every
//! derived quantity is therefore computed from coordinate values only.

/// A point on the document canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Four-corner polygon around a detected text fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
}

impl BoundingBox {
    pub fn new(tl: Point, tr: Point, br: Point, bl: Point) -> Self {
        Self { tl, tr, br, bl }
    }

    /// Corners in the engine's labeling order
    pub fn points(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    pub fn x_min(&self) -> f64 {
        self.points().iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }

    pub fn x_max(&self) -> f64 {
        self.points()
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn y_min(&self) -> f64 {
        self.points().iter().map(|p| p.y).fold(f64::INFINITY, f64::min)
    }

    pub fn y_max(&self) -> f64 {
        self.points()
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.x_min(), self.x_max())
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.y_min(), self.y_max())
    }

    pub fn width(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    pub fn height(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    /// Mean of the four corners.
    ///
    /// This is not the center of the enclosing rectangle: for skewed polygons
    /// the two differ.
    pub fn centroid(&self) -> Point {
        let points = self.points();
        let x = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
        let y = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed_box() -> BoundingBox {
        // Corner labels deliberately disagree with the real positions
        BoundingBox::new(
            Point::new(45.0, 30.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 35.0),
            Point::new(50.0, 5.0),
        )
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_extents_ignore_corner_labels() {
        let bbox = skewed_box();
        assert_eq!(bbox.x_range(), (0.0, 50.0));
        assert_eq!(bbox.y_range(), (0.0, 35.0));
        assert_eq!(bbox.width(), 50.0);
        assert_eq!(bbox.height(), 35.0);
    }

    #[test]
    fn test_extents_are_ordered_for_any_corner_permutation() {
        let bbox = skewed_box();
        let corners = bbox.points();
        let permutations = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];

        for order in permutations {
            let permuted = BoundingBox::new(
                corners[order[0]],
                corners[order[1]],
                corners[order[2]],
                corners[order[3]],
            );
            assert!(permuted.x_min() <= permuted.x_max());
            assert!(permuted.y_min() <= permuted.y_max());
            assert!(permuted.width() >= 0.0);
            assert!(permuted.height() >= 0.0);
            assert_eq!(permuted.x_range(), bbox.x_range());
            assert_eq!(permuted.y_range(), bbox.y_range());
            assert_eq!(permuted.centroid(), bbox.centroid());
        }
    }

    #[test]
    fn test_centroid_is_corner_mean() {
        let bbox = skewed_box();
        let centroid = bbox.centroid();
        assert_eq!(centroid.x, (45.0 + 0.0 + 10.0 + 50.0) / 4.0);
        assert_eq!(centroid.y, (30.0 + 0.0 + 35.0 + 5.0) / 4.0);

        // Differs from the enclosing rectangle center
        let (x_min, x_max) = bbox.x_range();
        assert_ne!(centroid.x, (x_min + x_max) / 2.0);
    }

    #[test]
    fn test_degenerate_box() {
        let p = Point::new(7.0, 7.0);
        let bbox = BoundingBox::new(p, p, p, p);
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
        assert_eq!(bbox.centroid(), p);
    }
}
