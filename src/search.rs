//! Exhaustive enumeration of every creatable shape.
//!
//! Shapes fall into two groups: those with a construction whose last step
//! swaps two halves together, and everything else. For the first group only
//! the halves are recorded; a swap of any two recorded halves is creatable
//! by definition. The second group is enumerated shape by shape.

use {
    crate::{
        shape::{repeat, Cell, Shape, Word, LAYER, MASK_PART0, MASK_WEST, PART},
        Overwriter,
    },
    rustc_hash::{FxHashMap, FxHashSet},
    std::collections::{hash_map::Entry, VecDeque},
};

/// Progress is reported once per this many explored shapes, counting every
/// member of each explored equivalence class.
const LOG_EVERY: usize = 10_000_000;

/// Breadth-first search over single-quarter shapes.
///
/// Conservative: every quarter it finds occurs in some constructible shape,
/// but a few constructible quarters may be missed. The moves padded with
/// solid cells only need the first part to behave correctly.
#[derive(Default)]
pub struct QuarterSearcher {
    pub quads: FxHashSet<Shape>,
    queue: VecDeque<Shape>,
}

impl QuarterSearcher {
    pub fn run(&mut self) {
        self.enqueue(Shape::EMPTY);
        while let Some(quad) = self.queue.pop_front() {
            self.process(quad);
        }
    }

    fn enqueue(&mut self, quad: Shape) {
        if self.quads.insert(quad) {
            self.queue.push_back(quad);
        }
    }

    fn process(&mut self, quad: Shape) {
        let layers = quad.layers();
        // solid padding in the other parts, so the first part can lean on it
        let fill = Shape(!MASK_PART0 & repeat(Cell::Solid as Word, 2, PART * layers));

        // a lone solid cell can rest at any layer; a pin cannot float
        for layer in layers..LAYER {
            self.enqueue(quad | Shape((Cell::Solid as Word) << (2 * PART * layer)));
        }
        if layers < LAYER {
            self.enqueue(quad | Shape((Cell::Pin as Word) << (2 * PART * layers)));
        }

        self.enqueue((quad | fill).pin() & MASK_PART0);

        self.enqueue((quad | fill).crystallize() & MASK_PART0);

        // give every cut plane a crystal to break
        for layer in 0..layers {
            let mut padded = quad | fill;
            padded.set(layer, PART - 1, Cell::Crystal);
            self.enqueue(padded.cut() & MASK_PART0);
        }
    }
}

/// The main two-frontier search.
///
/// `halves` grows monotonically and is swept in insertion order; the queue
/// holds shapes believed to need a non-swap construction. A shape in the
/// queue can later turn out to be reachable by a swap, so queue membership
/// is tracked in a separate set that allows cancelling an entry in place.
#[derive(Default)]
pub struct Searcher {
    /// Shapes with no construction ending in a swap of two known halves.
    pub shapes: FxHashSet<Shape>,
    /// Every reachable half, in discovery order.
    pub halves: Vec<Shape>,
    halves_idx: FxHashMap<Shape, usize>,
    /// Every quarter observed in a processed shape.
    pub quarters: FxHashSet<Shape>,
    queue: VecDeque<Shape>,
    queue_set: FxHashSet<Shape>,
    next_half: usize,
    /// All connected one-layer pieces, aligned to the top layer. Stacking
    /// an arbitrary shape decomposes into stacking these bottom to top.
    pieces: Vec<Shape>,
    /// Shapes explored, counting whole equivalence classes.
    pub count: usize,
    next_log: usize,
    progress: Overwriter,
}

impl Searcher {
    pub fn new() -> Self {
        let mut searcher = Self {
            next_log: LOG_EVERY,
            ..Self::default()
        };

        for part in 0..PART {
            let mut pin = Shape::EMPTY;
            pin.set(0, part, Cell::Pin);
            searcher.pieces.push(pin);
        }
        for len in 1..PART {
            let mut arc = Shape::EMPTY;
            for part in 0..len {
                arc.set(0, part, Cell::Solid);
            }
            for part in 0..PART {
                searcher.pieces.push(arc.rotate(part));
            }
        }
        searcher.pieces.push(Shape(repeat(Cell::Solid as Word, 2, PART)));

        for piece in &mut searcher.pieces {
            piece.0 <<= 2 * PART * (LAYER - 1);
        }

        searcher
    }

    /// Whether the shape is a swap of two known halves. With `last_half`,
    /// only halves inserted strictly before that index count.
    fn combinable(&self, shape: Shape, last_half: Option<usize>) -> bool {
        for angle in 0..PART / 2 {
            let west = (shape.rotate(angle) & MASK_WEST).canonical_half();
            let east = (shape.rotate(angle + PART / 2) & MASK_WEST).canonical_half();
            let Some(&west) = self.halves_idx.get(&west) else {
                continue;
            };
            let Some(&east) = self.halves_idx.get(&east) else {
                continue;
            };
            match last_half {
                Some(limit) if west >= limit || east >= limit => continue,
                _ => return true,
            }
        }
        false
    }

    pub fn run(&mut self) {
        let mut quad_searcher = QuarterSearcher::default();
        quad_searcher.run();
        println!("found {} quarters", quad_searcher.quads.len());

        self.seed_halves(&quad_searcher.quads);
        println!("pre-seeded {} halves", self.halves.len());

        while !self.queue.is_empty() || self.next_half < self.halves.len() {
            if self.next_half < self.halves.len() {
                self.step_half();
            } else {
                let shape = self.queue.pop_front().unwrap();
                if self.queue_set.remove(&shape) {
                    self.process(shape);
                }
            }
        }

        self.progress.finish();
    }

    /// Combine quarter pairs into plausible initial halves.
    fn seed_halves(&mut self, quads: &FxHashSet<Shape>) {
        if PART == 4 {
            let quads: Vec<Shape> = quads.iter().copied().collect();
            let total = quads.len().pow((PART / 2) as u32);
            for i in 0..total {
                let mut idx = i;
                let mut half = Shape::EMPTY;
                for part in 0..PART / 2 {
                    half = half | Shape(quads[idx % quads.len()].0 << (2 * part));
                    idx /= quads.len();
                }
                self.insert_half(half.collapse().canonical_half());
            }
        } else {
            // not validated for wider layers; the empty half alone is sound,
            // every other half is then discovered through cuts
            self.insert_half(Shape::EMPTY);
        }
    }

    fn insert_half(&mut self, half: Shape) {
        if let Entry::Vacant(entry) = self.halves_idx.entry(half) {
            entry.insert(self.halves.len());
            self.halves.push(half);
        }
    }

    /// Swap the next unprocessed half against every half up to and
    /// including itself.
    fn step_half(&mut self) {
        let variants: Vec<Shape> = self.halves[self.next_half]
            .equivalent_halves()
            .into_iter()
            .map(|half| half.rotate(PART / 2)) // orient east
            .collect();

        let mut temp = FxHashSet::default();
        for i in 0..=self.next_half {
            let west = self.halves[i];
            for &east in &variants {
                let combined = east | west;
                if self.combinable(combined, Some(self.next_half)) {
                    continue; // two earlier halves already produce it
                }
                let shape = combined.canonical();
                if !temp.insert(shape) {
                    continue;
                }
                if self.queue_set.remove(&shape) {
                    // queued as a non-swap shape but not processed yet:
                    // reclassify and process right away
                    self.shapes.remove(&shape);
                    self.process(shape);
                } else if self.shapes.remove(&shape) {
                    // already processed as a non-swap shape: reclassify only
                } else {
                    self.process(shape);
                }
            }
        }
        self.next_half += 1;
    }

    fn process(&mut self, shape: Shape) {
        let variants = shape.equivalent_shapes();
        self.count += variants.len();
        if self.count >= self.next_log {
            self.next_log += LOG_EVERY;
            self.progress.print(format!(
                "explored {} shapes, {} quarters, {}/{} halves, {}/{}/{} shapes",
                self.count,
                self.quarters.len(),
                self.next_half,
                self.halves.len(),
                self.queue_set.len(),
                self.queue.len(),
                self.shapes.len(),
            ));
        }

        for angle in 0..PART {
            self.quarters.insert(shape.rotate(angle) & MASK_PART0);
        }

        for angle in 0..PART {
            let half = shape.rotate(angle).cut().canonical_half();
            self.insert_half(half);
        }

        for i in 0..self.pieces.len() {
            self.enqueue(shape.stack(self.pieces[i]));
        }

        self.enqueue(shape.pin());

        self.enqueue(shape.crystallize());
    }

    fn enqueue(&mut self, shape: Shape) {
        if self.combinable(shape, None) {
            return; // the half frontier covers it
        }

        let shape = shape.canonical();

        if self.shapes.insert(shape) {
            self.queue.push_back(shape);
            self.queue_set.insert(shape);
        }
    }

    pub fn summarize(&self) {
        println!("# shapes: {}", self.count);
        println!("# halves: {}", self.halves.len());
        println!("# swap-irreducible shapes: {}", self.shapes.len());
        println!("# quarters: {}", self.quarters.len());
    }

    /// Sorted result sets, ready to persist.
    pub fn into_results(self) -> crate::serialization::ShapeSet {
        let mut set = crate::serialization::ShapeSet {
            halves: self.halves,
            shapes: self.shapes.into_iter().collect(),
        };
        set.halves.sort_unstable();
        set.shapes.sort_unstable();
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_search_stays_in_part_zero() {
        let mut searcher = QuarterSearcher::default();
        searcher.run();
        assert!(searcher.quads.contains(&Shape::EMPTY));
        for quad in &searcher.quads {
            assert_eq!(*quad & !MASK_PART0, Shape::EMPTY);
        }
    }

    #[test]
    fn quarter_search_finds_columns_and_floaters() {
        let mut searcher = QuarterSearcher::default();
        searcher.run();

        // a solid cell can come to rest on any layer of the first part
        for layer in 0..LAYER {
            let mut floater = Shape::EMPTY;
            floater.set(layer, 0, Cell::Solid);
            assert!(searcher.quads.contains(&floater));
        }

        // a pin under a solid is one pin-push away from a ground solid
        let mut pinned = Shape::EMPTY;
        pinned.set(0, 0, Cell::Pin);
        pinned.set(1, 0, Cell::Solid);
        assert!(searcher.quads.contains(&pinned));
    }

    #[test]
    fn piece_table_covers_every_arc() {
        let searcher = Searcher::new();
        // one pin per part, every proper arc at every rotation, one ring
        assert_eq!(searcher.pieces.len(), PART + (PART - 1) * PART + 1);
        for piece in &searcher.pieces {
            assert_eq!(piece.layers(), LAYER, "pieces arrive on the top layer");
        }
    }

    #[test]
    fn swapped_halves_are_combinable() {
        let mut searcher = Searcher::new();
        let mut half = Shape::EMPTY;
        half.set(0, 0, Cell::Solid);
        half.set(0, 1, Cell::Solid);
        half.set(1, 0, Cell::Solid);
        searcher.insert_half(half.canonical_half());
        searcher.insert_half(Shape::EMPTY);

        let swapped = half | Shape::EMPTY.rotate(PART / 2);
        assert!(searcher.combinable(swapped, None));
        assert!(searcher.combinable(swapped.rotate(1), None));
        assert!(searcher.combinable(swapped.flip(), None));

        // both indices must lie strictly below the limit
        assert!(!searcher.combinable(swapped, Some(1)));
        assert!(searcher.combinable(swapped, Some(2)));

        let mut other = Shape::EMPTY;
        other.set(0, 0, Cell::Crystal);
        assert!(!searcher.combinable(other | half.rotate(PART / 2), None));
    }

    // the whole default-size enumeration; several minutes, run with
    // --release and --ignored
    #[cfg(not(any(feature = "layers_5", feature = "parts_6")))]
    #[test]
    #[ignore]
    fn full_enumeration_counts() {
        let mut searcher = Searcher::new();
        searcher.run();
        assert_eq!(searcher.count, 349_728_289);
        assert_eq!(searcher.halves.len(), 8148);
        assert_eq!(searcher.shapes.len(), 2_002_457);
        assert_eq!(searcher.quarters.len(), 152);
    }
}
