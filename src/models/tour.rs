//! Cyclic tour over node indices.

use crate::error::{Result, RoutingError};

/// A mutable cycle over a subset of the nodes `[0, capacity)`.
///
/// Stored as an order vector plus an inverse position index, so successor,
/// predecessor and position lookups are O(1). Every mutation keeps a single
/// cycle without duplicates.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Tour;
///
/// let mut tour = Tour::new(4, 0).unwrap();
/// tour.insert_after(0, 2).unwrap();
/// tour.insert_after(2, 1).unwrap();
/// tour.insert_after(0, 3).unwrap();
/// assert_eq!(tour.to_sequence(0).unwrap(), vec![0, 3, 2, 1]);
/// assert_eq!(tour.successor(1).unwrap(), 0);
/// assert!(tour.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    order: Vec<usize>,
    position: Vec<Option<usize>>,
}

impl Tour {
    /// Creates a tour able to hold `num_nodes` nodes, containing only `depot`.
    ///
    /// The depot alone forms a self-loop: it is its own successor.
    pub fn new(num_nodes: usize, depot: usize) -> Result<Self> {
        if depot >= num_nodes {
            return Err(RoutingError::IndexOutOfRange {
                index: depot,
                size: num_nodes,
            });
        }
        let mut order = Vec::with_capacity(num_nodes);
        order.push(depot);
        let mut position = vec![None; num_nodes];
        position[depot] = Some(0);
        Ok(Self { order, position })
    }

    /// Builds a tour visiting `sequence` in order.
    ///
    /// Fails on out-of-range or repeated nodes, or an empty sequence.
    pub fn from_sequence(num_nodes: usize, sequence: &[usize]) -> Result<Self> {
        let (&first, rest) = sequence.split_first().ok_or(RoutingError::IncompleteTour {
            visited: 0,
            expected: num_nodes,
        })?;
        let mut tour = Self::new(num_nodes, first)?;
        let mut last = first;
        for &node in rest {
            tour.insert_after(last, node)?;
            last = node;
        }
        Ok(tour)
    }

    /// Number of nodes the tour can hold.
    pub fn capacity(&self) -> usize {
        self.position.len()
    }

    /// Number of nodes currently in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: a tour holds at least its starting node.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` once every node up to capacity is in the tour.
    pub fn is_complete(&self) -> bool {
        self.order.len() == self.position.len()
    }

    /// Returns `true` if `node` is in the tour.
    pub fn contains(&self, node: usize) -> bool {
        self.position.get(node).is_some_and(|p| p.is_some())
    }

    /// Nodes in storage order. The storage rotation is arbitrary.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Iterates over nodes in storage order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// Storage index of `node`.
    pub fn position(&self, node: usize) -> Result<usize> {
        let size = self.position.len();
        match self.position.get(node) {
            None => Err(RoutingError::IndexOutOfRange { index: node, size }),
            Some(None) => Err(RoutingError::NodeNotFound(node)),
            Some(Some(p)) => Ok(*p),
        }
    }

    /// Node following `node` in the cycle.
    pub fn successor(&self, node: usize) -> Result<usize> {
        let p = self.position(node)?;
        Ok(self.order[(p + 1) % self.order.len()])
    }

    /// Node preceding `node` in the cycle.
    pub fn predecessor(&self, node: usize) -> Result<usize> {
        let p = self.position(node)?;
        let n = self.order.len();
        Ok(self.order[(p + n - 1) % n])
    }

    /// Inserts `new_node` immediately after `existing`.
    pub fn insert_after(&mut self, existing: usize, new_node: usize) -> Result<()> {
        match self.position.get(new_node) {
            None => {
                return Err(RoutingError::IndexOutOfRange {
                    index: new_node,
                    size: self.position.len(),
                })
            }
            Some(Some(_)) => return Err(RoutingError::NodeAlreadyPresent(new_node)),
            Some(None) => {}
        }
        let at = self.position(existing)? + 1;
        self.order.insert(at, new_node);
        self.reindex(at);
        Ok(())
    }

    /// 2-opt exchange: replaces edges (a→b) and (c→d) with (a→c) and (b→d)
    /// by reversing the path `b..=c`.
    ///
    /// Requires four distinct nodes in the tour with `b == successor(a)` and
    /// `d == successor(c)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::models::Tour;
    ///
    /// let mut tour = Tour::from_sequence(5, &[0, 1, 2, 3, 4]).unwrap();
    /// tour.swap_edges(0, 1, 3, 4).unwrap();
    /// assert_eq!(tour.to_sequence(0).unwrap(), vec![0, 3, 2, 1, 4]);
    /// assert!(tour.swap_edges(0, 1, 3, 4).is_err());
    /// ```
    pub fn swap_edges(&mut self, a: usize, b: usize, c: usize, d: usize) -> Result<()> {
        let invalid = RoutingError::InvalidEdgePair { a, b, c, d };
        let nodes = [a, b, c, d];
        for (i, x) in nodes.iter().enumerate() {
            if !self.contains(*x) || nodes[i + 1..].contains(x) {
                return Err(invalid);
            }
        }
        if self.successor(a)? != b || self.successor(c)? != d {
            return Err(invalid);
        }

        let n = self.order.len();
        let mut i = self.position(b)?;
        let mut j = self.position(c)?;
        let span = (j + n - i) % n + 1;
        for _ in 0..span / 2 {
            self.order.swap(i, j);
            self.position[self.order[i]] = Some(i);
            self.position[self.order[j]] = Some(j);
            i = (i + 1) % n;
            j = (j + n - 1) % n;
        }
        Ok(())
    }

    /// Or-opt move: relocates the forward path `first..=last` so it directly
    /// follows `after`, keeping its orientation.
    ///
    /// Fails with [`RoutingError::InvalidSegment`] when `after` lies inside
    /// the segment, already precedes `first`, or the segment spans the whole
    /// tour.
    pub fn move_segment(&mut self, first: usize, last: usize, after: usize) -> Result<()> {
        let invalid = RoutingError::InvalidSegment { first, last, after };
        for node in [first, last, after] {
            if !self.contains(node) {
                return Err(invalid);
            }
        }

        let n = self.order.len();
        let start = self.position(first)?;
        let span = (self.position(last)? + n - start) % n + 1;
        if span >= n {
            return Err(invalid);
        }
        let segment: Vec<usize> = (0..span).map(|k| self.order[(start + k) % n]).collect();
        if segment.contains(&after) || self.predecessor(first)? == after {
            return Err(invalid);
        }

        let mut order = Vec::with_capacity(n);
        for k in span..n {
            let node = self.order[(start + k) % n];
            order.push(node);
            if node == after {
                order.extend_from_slice(&segment);
            }
        }
        self.order = order;
        self.reindex(0);
        Ok(())
    }

    /// Nodes in cycle order starting at `depot`. Storage is left untouched.
    pub fn to_sequence(&self, depot: usize) -> Result<Vec<usize>> {
        let p = self.position(depot)?;
        let mut seq = Vec::with_capacity(self.order.len());
        seq.extend_from_slice(&self.order[p..]);
        seq.extend_from_slice(&self.order[..p]);
        Ok(seq)
    }

    fn reindex(&mut self, from: usize) {
        for (p, &node) in self.order.iter().enumerate().skip(from) {
            self.position[node] = Some(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_single_cycle(tour: &Tour) {
        let start = tour.as_slice()[0];
        let mut seen = vec![false; tour.capacity()];
        let mut node = start;
        for _ in 0..tour.len() {
            assert!(!seen[node], "node {node} visited twice");
            seen[node] = true;
            let next = tour.successor(node).unwrap();
            assert_eq!(tour.predecessor(next).unwrap(), node);
            node = next;
        }
        assert_eq!(node, start);
    }

    #[test]
    fn test_new_self_loop() {
        let tour = Tour::new(3, 1).unwrap();
        assert_eq!(tour.len(), 1);
        assert_eq!(tour.capacity(), 3);
        assert!(!tour.is_complete());
        assert_eq!(tour.successor(1).unwrap(), 1);
        assert_eq!(tour.predecessor(1).unwrap(), 1);
    }

    #[test]
    fn test_new_depot_out_of_range() {
        assert_eq!(
            Tour::new(3, 3),
            Err(RoutingError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn test_insert_after_errors() {
        let mut tour = Tour::new(4, 0).unwrap();
        tour.insert_after(0, 1).unwrap();
        assert_eq!(
            tour.insert_after(0, 1),
            Err(RoutingError::NodeAlreadyPresent(1))
        );
        assert_eq!(tour.insert_after(2, 3), Err(RoutingError::NodeNotFound(2)));
        assert_eq!(
            tour.insert_after(0, 4),
            Err(RoutingError::IndexOutOfRange { index: 4, size: 4 })
        );
        assert_eq!(tour.len(), 2);
    }

    #[test]
    fn test_lookup_absent_node() {
        let tour = Tour::new(3, 0).unwrap();
        assert_eq!(tour.successor(2), Err(RoutingError::NodeNotFound(2)));
        assert_eq!(tour.predecessor(2), Err(RoutingError::NodeNotFound(2)));
        assert!(!tour.contains(2));
        assert!(!tour.contains(7));
    }

    #[test]
    fn test_from_sequence() {
        let tour = Tour::from_sequence(4, &[2, 0, 3, 1]).unwrap();
        assert!(tour.is_complete());
        assert_eq!(tour.to_sequence(0).unwrap(), vec![0, 3, 1, 2]);
        assert_eq!(tour.position(3).unwrap(), 2);
        assert_single_cycle(&tour);
    }

    #[test]
    fn test_from_sequence_rejects_duplicates_and_empty() {
        assert_eq!(
            Tour::from_sequence(3, &[0, 1, 0]),
            Err(RoutingError::NodeAlreadyPresent(0))
        );
        assert!(matches!(
            Tour::from_sequence(3, &[]),
            Err(RoutingError::IncompleteTour { .. })
        ));
    }

    #[test]
    fn test_to_sequence_does_not_rotate_storage() {
        let tour = Tour::from_sequence(3, &[0, 1, 2]).unwrap();
        assert_eq!(tour.to_sequence(2).unwrap(), vec![2, 0, 1]);
        assert_eq!(tour.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_swap_edges_wrapping_segment() {
        // Segment 4, 5, 0, 1 wraps around the storage end.
        let mut tour = Tour::from_sequence(6, &[0, 1, 2, 3, 4, 5]).unwrap();
        tour.swap_edges(3, 4, 1, 2).unwrap();
        assert_eq!(tour.to_sequence(3).unwrap(), vec![3, 1, 0, 5, 4, 2]);
        assert_single_cycle(&tour);
    }

    #[test]
    fn test_swap_edges_even_segment() {
        let mut tour = Tour::from_sequence(6, &[0, 1, 2, 3, 4, 5]).unwrap();
        tour.swap_edges(0, 1, 4, 5).unwrap();
        assert_eq!(tour.to_sequence(0).unwrap(), vec![0, 4, 3, 2, 1, 5]);
        assert_single_cycle(&tour);
    }

    #[test]
    fn test_swap_edges_invalid() {
        let mut tour = Tour::from_sequence(5, &[0, 1, 2, 3, 4]).unwrap();
        let before = tour.clone();
        // not adjacent
        assert!(matches!(
            tour.swap_edges(0, 2, 3, 4),
            Err(RoutingError::InvalidEdgePair { .. })
        ));
        // shared endpoint
        assert!(tour.swap_edges(0, 1, 1, 2).is_err());
        // absent node
        let mut partial = Tour::from_sequence(6, &[0, 1, 2, 3, 4]).unwrap();
        assert!(partial.swap_edges(0, 1, 3, 5).is_err());
        assert_eq!(tour, before);
    }

    #[test]
    fn test_move_segment_forward() {
        let mut tour = Tour::from_sequence(6, &[0, 1, 2, 3, 4, 5]).unwrap();
        tour.move_segment(1, 2, 4).unwrap();
        assert_eq!(tour.to_sequence(0).unwrap(), vec![0, 3, 4, 1, 2, 5]);
        assert_single_cycle(&tour);
    }

    #[test]
    fn test_move_segment_wrapping() {
        let mut tour = Tour::from_sequence(5, &[0, 1, 2, 3, 4]).unwrap();
        tour.move_segment(4, 0, 2).unwrap();
        assert_eq!(tour.to_sequence(1).unwrap(), vec![1, 2, 4, 0, 3]);
        assert_single_cycle(&tour);
    }

    #[test]
    fn test_move_segment_invalid() {
        let mut tour = Tour::from_sequence(5, &[0, 1, 2, 3, 4]).unwrap();
        // after inside segment
        assert!(matches!(
            tour.move_segment(1, 3, 2),
            Err(RoutingError::InvalidSegment { .. })
        ));
        // no-op
        assert!(tour.move_segment(1, 2, 0).is_err());
        // whole tour
        assert!(tour.move_segment(0, 4, 2).is_err());
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3, 4]);
    }
}
