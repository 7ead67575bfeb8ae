//! Creatability queries against a persisted dump.

use {
    crate::{
        serialization::ShapeSet,
        shape::{Shape, MASK_WEST, PART},
    },
    rustc_hash::FxHashSet,
};

/// The loaded result sets, indexed for O(1) amortized decisions.
pub struct Lookup {
    halves: FxHashSet<Shape>,
    /// Sorted ascending, straight from the dump.
    shapes: Vec<Shape>,
}

impl Lookup {
    pub fn new(set: ShapeSet) -> Self {
        Self {
            halves: set.halves.iter().copied().collect(),
            shapes: set.shapes,
        }
    }

    /// A shape is creatable when some cut plane splits it into two known
    /// halves, or when its canonical form was enumerated directly.
    pub fn creatable(&self, shape: Shape) -> bool {
        for angle in 0..PART / 2 {
            let west = (shape.rotate(angle) & MASK_WEST).canonical_half();
            let east = (shape.rotate(angle + PART / 2) & MASK_WEST).canonical_half();
            if self.halves.contains(&west) && self.halves.contains(&east) {
                return true;
            }
        }
        self.shapes.binary_search(&shape.canonical()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::shape::Cell};

    fn sample() -> Shape {
        let mut shape = Shape::EMPTY;
        shape.set(0, 0, Cell::Solid);
        shape.set(0, 2, Cell::Solid);
        shape.set(1, 0, Cell::Pin);
        shape
    }

    #[test]
    fn empty_dump_rejects() {
        let lookup = Lookup::new(ShapeSet { halves: vec![], shapes: vec![] });
        assert!(!lookup.creatable(Shape::EMPTY));
        assert!(!lookup.creatable(sample()));
    }

    #[test]
    fn creatable_through_halves() {
        let shape = sample();
        let west = (shape & MASK_WEST).canonical_half();
        let east = (shape.rotate(PART / 2) & MASK_WEST).canonical_half();
        let lookup = Lookup::new(ShapeSet {
            halves: vec![west, east],
            shapes: vec![],
        });

        for variant in shape.equivalent_shapes() {
            assert!(lookup.creatable(variant));
        }
        assert!(!lookup.creatable(Shape::EMPTY));
    }

    #[test]
    fn creatable_through_enumerated_shapes() {
        let shape = sample();
        let mut shapes = vec![shape.canonical()];
        shapes.sort_unstable();
        let lookup = Lookup::new(ShapeSet { halves: vec![], shapes });

        for variant in shape.equivalent_shapes() {
            assert!(lookup.creatable(variant));
        }
        assert!(!lookup.creatable(Shape::EMPTY));
    }
}
