//! Disjoint-set forest over a fixed arena of elements
//!
//! Union by rank with path halving: amortized near-constant time per
//! operation.

#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `x`
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets containing `a` and `b`. Returns false if they were
    /// already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut sets = DisjointSet::new(4);
        assert_eq!(sets.len(), 4);
        for i in 0..4 {
            assert_eq!(sets.find(i), i);
        }
        assert!(!sets.connected(0, 3));
    }

    #[test]
    fn test_union_is_transitive() {
        let mut sets = DisjointSet::new(6);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.connected(1, 2));

        assert!(sets.union(1, 3));
        assert!(sets.connected(0, 2));
        assert!(!sets.union(0, 3));
        assert!(!sets.connected(0, 5));
    }

    #[test]
    fn test_long_chain_flattens() {
        let mut sets = DisjointSet::new(1000);
        for i in 1..1000 {
            sets.union(i - 1, i);
        }
        let root = sets.find(999);
        assert_eq!(sets.find(0), root);
        assert!(sets.rank.iter().all(|&r| r < 16));
    }
}
