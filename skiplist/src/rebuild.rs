//! Rebalancing of an `OrderedSkipList` into its perfectly balanced shape.

use std::cmp;

use crate::ordered_skiplist::OrderedSkipList;
use crate::skipnode::{HEAD, TAIL};

/// Number of levels a perfectly balanced list of `len` elements needs: `floor(log2(len)) + 1`,
/// and a single level when empty.
fn balanced_levels(len: usize) -> usize {
    let bits = (0usize.count_zeros() - len.leading_zeros()) as usize;
    cmp::max(bits, 1)
}

impl<T, G> OrderedSkipList<T, G> {
    /// Rebuilds the links of every node so that the list becomes perfectly balanced: the element
    /// at (1-based) position `p` gets a height of `1 + trailing_zeros(p)`, and every link on
    /// level `l` spans exactly `2^l` elements.  The order and content of the list are unchanged
    /// and subsequent insertions draw random heights as usual.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(1..=100);
    /// skiplist.rebuild();
    /// assert_eq!(skiplist.max_level(), 7);
    /// assert_eq!(skiplist.get(63), Ok(&64));
    /// ```
    pub fn rebuild(&mut self) {
        let len = self.len();
        let levels = cmp::min(balanced_levels(len), self.total_levels());

        let mut order = Vec::with_capacity(len);
        let mut node = self.nodes[HEAD].links[0];
        while node != TAIL {
            order.push(node);
            node = self.nodes[node].links[0];
        }

        {
            let head = &mut self.nodes[HEAD];
            for lvl in 0..head.links.len() {
                head.links[lvl] = TAIL;
                head.links_len[lvl] = len + 1;
            }
        }

        // Last node reaching each level so far, and its position.
        let mut last = vec![HEAD; levels];
        let mut last_position = vec![0; levels];
        for (index, &id) in order.iter().enumerate() {
            let position = index + 1;
            let height = cmp::min(position.trailing_zeros() as usize + 1, levels);

            let node = &mut self.nodes[id];
            node.links = vec![TAIL; height];
            node.links_len = vec![0; height];

            for lvl in 0..height {
                let pred = &mut self.nodes[last[lvl]];
                pred.links[lvl] = id;
                pred.links_len[lvl] = position - last_position[lvl];
                last[lvl] = id;
                last_position[lvl] = position;
            }
        }

        for lvl in 0..levels {
            let pred = &mut self.nodes[last[lvl]];
            pred.links[lvl] = TAIL;
            pred.links_len[lvl] = len + 1 - last_position[lvl];
        }

        self.set_levels(levels);
    }
}
