//! Pseudo-ordering of pixels by decreasing gradient magnitude.
//!
//! Instead of sorting, pixels with a defined level-line angle are dropped into
//! `B` equal-width magnitude buckets, `bucket = floor(mag * B / max_mag)`
//! clamped to `B - 1`. Each bucket is a chain of nodes in arrival order, and
//! the chains are spliced from the highest bucket down to the lowest. The
//! nodes live in one flat arena and link to each other by index, so the
//! whole structure is owned by a single detection run and dropped with it.
//!
//! Arrival order is column-major (`x` outer, `y` inner). The last row and
//! column never have a defined angle and are skipped.
//!
//! Complexity: O(W·H + B) time, one node per defined pixel.
use crate::gradient::GradientField;

/// One pixel in the traversal with a link to its successor.
#[derive(Clone, Copy, Debug)]
struct TraversalNode {
    x: usize,
    y: usize,
    next: Option<usize>,
}

/// Bucketed, descending-magnitude traversal list.
#[derive(Clone, Debug)]
pub struct PseudoOrder {
    nodes: Vec<TraversalNode>,
    head: Option<usize>,
    bucket_count: usize,
    max_magnitude: f32,
}

impl PseudoOrder {
    pub fn build(field: &GradientField, bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let max_magnitude = field.max_magnitude;
        let mut order = Self {
            nodes: Vec::new(),
            head: None,
            bucket_count,
            max_magnitude,
        };
        if !(max_magnitude > 0.0) {
            return order;
        }

        let w = field.width();
        let h = field.height();
        let mut heads: Vec<Option<usize>> = vec![None; bucket_count];
        let mut tails: Vec<Option<usize>> = vec![None; bucket_count];
        order.nodes.reserve(field.defined_count());

        for x in 0..w.saturating_sub(1) {
            for y in 0..h.saturating_sub(1) {
                if !field.is_defined_at(x, y) {
                    continue;
                }
                let bucket = order.bucket_index(field.magnitude_at(x, y));
                let id = order.nodes.len();
                order.nodes.push(TraversalNode { x, y, next: None });
                match tails[bucket] {
                    Some(tail) => order.nodes[tail].next = Some(id),
                    None => heads[bucket] = Some(id),
                }
                tails[bucket] = Some(id);
            }
        }

        // splice bucket chains, strongest first
        let mut last_tail: Option<usize> = None;
        for bucket in (0..bucket_count).rev() {
            let Some(head) = heads[bucket] else {
                continue;
            };
            match last_tail {
                Some(tail) => order.nodes[tail].next = Some(head),
                None => order.head = Some(head),
            }
            last_tail = tails[bucket];
        }

        order
    }

    /// Bucket a magnitude falls into, in `[0, bucket_count - 1]`.
    pub fn bucket_index(&self, magnitude: f32) -> usize {
        if !(self.max_magnitude > 0.0) {
            return 0;
        }
        let scaled = magnitude as f64 * self.bucket_count as f64 / self.max_magnitude as f64;
        (scaled.max(0.0).floor() as usize).min(self.bucket_count - 1)
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pixels in visitation order as `(x, y)`.
    pub fn iter(&self) -> PseudoOrderIter<'_> {
        PseudoOrderIter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

pub struct PseudoOrderIter<'a> {
    nodes: &'a [TraversalNode],
    cursor: Option<usize>,
}

impl<'a> Iterator for PseudoOrderIter<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some((node.x, node.y))
    }
}
