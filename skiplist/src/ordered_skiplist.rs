use std::cmp::{self, Ordering};
use std::default;
use std::fmt;
use std::iter;
use std::mem;

use crate::cursor::Cursor;
use crate::error::SkipListError;
use crate::level_generator::{GeometricalLevelGenerator, LevelGenerator};
use crate::skipnode::{NodeId, SkipNode, HEAD, TAIL};

/// Number of levels allocated for the sentinels by default.  32 levels comfortably covers
/// billions of elements with `p = 1/2`.
pub const DEFAULT_LEVELS: usize = 32;

// /////////////////////////////////////////////////////////////////////////////////////////////////
// OrderedSkipList
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// The ordered skiplist provides a way of storing elements such that they are always
/// sorted and at the same time provides efficient way to access, insert and remove nodes.
/// Every link records how many elements it skips, so elements can also be looked up by their
/// position in `O(log(n))`.
///
/// Elements are unique: inserting an element which compares equal to one already present is a
/// no-op.
///
/// By default, the OrderedSkipList uses the comparison function `a.cmp(b)`.  Any other function
/// can be given through `with_comp`, so long as it is a total order:
///
/// - Be well defined: `f(a, b)` should always return the same value
/// - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less` and `f(a, b) == Equal == f(b,
///   a)`.
/// - By transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then `f(a, c) == Greater`.
///
/// A comparison function which breaks these rules yields an unspecified (but memory safe)
/// ordering.
pub struct OrderedSkipList<T, G = GeometricalLevelGenerator> {
    // Node arena; slots 0 and 1 are the head and tail sentinels.
    pub(crate) nodes: Vec<SkipNode<T>>,
    // Slots of removed nodes, reused by later insertions.
    free: Vec<NodeId>,
    len: usize,
    // Number of levels currently in use, always at least 1.
    levels: usize,
    level_generator: G,
    compare: Box<dyn Fn(&T, &T) -> Ordering>,
}

/// Predecessors and strides recorded by `locate`.
///
/// `update[lvl]` is the last node visited on level `lvl` before the search dropped a level and
/// `stride[lvl]` the number of level 0 steps travelled on that level.  A path is only valid
/// until the list is next modified, which is why mutators consume it by value.
#[derive(Debug)]
pub(crate) struct SearchPath {
    update: Vec<NodeId>,
    stride: Vec<usize>,
}

impl SearchPath {
    /// Number of levels the search covered.
    #[inline]
    fn levels(&self) -> usize {
        self.update.len()
    }

    /// The greatest node strictly smaller than the searched value (or the head).
    #[inline]
    fn predecessor(&self) -> NodeId {
        self.update[0]
    }

    /// Position of the predecessor, the head being at position 0.
    #[inline]
    fn position(&self) -> usize {
        self.stride.iter().sum()
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> OrderedSkipList<T>
where
    T: cmp::Ord,
{
    /// Create a new skiplist with the default comparison function of `|a, b| a.cmp(b)` and the
    /// default number of 32 levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist: OrderedSkipList<i64> = OrderedSkipList::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        OrderedSkipList::with_level_generator(GeometricalLevelGenerator::new(DEFAULT_LEVELS, 0.5))
    }

    /// Create a new skiplist whose node heights are drawn from a generator seeded with `seed`,
    /// making its internal layout reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::seeded(12345);
    /// skiplist.add(1);
    /// assert_eq!(skiplist.first(), Some(&1));
    /// ```
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        OrderedSkipList::with_level_generator(GeometricalLevelGenerator::seeded(
            DEFAULT_LEVELS,
            0.5,
            seed,
        ))
    }
}

impl<T> OrderedSkipList<T> {
    /// Create a new skiplist using the provided function in order to determine the ordering of
    /// elements within the list.  It will be generated with 32 levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    /// use std::cmp::Ordering;
    ///
    /// // Store even number before odd ones and sort as usual within same parity group.
    /// let mut skiplist = OrderedSkipList::with_comp(
    ///     |a: &u64, b: &u64|
    ///     if a%2 == b%2 {
    ///         a.cmp(b)
    ///     } else if a%2 == 0 {
    ///         Ordering::Less
    ///     } else {
    ///         Ordering::Greater
    ///     });
    /// skiplist.extend(0..6);
    /// assert_eq!(skiplist.iter().cloned().collect::<Vec<_>>(), vec![0, 2, 4, 1, 3, 5]);
    /// ```
    #[inline]
    pub fn with_comp<F>(f: F) -> Self
    where
        F: 'static + Fn(&T, &T) -> Ordering,
    {
        OrderedSkipList::with_parts(f, GeometricalLevelGenerator::new(DEFAULT_LEVELS, 0.5))
    }
}

impl<T, G> OrderedSkipList<T, G>
where
    T: cmp::Ord,
    G: LevelGenerator,
{
    /// Create a new skiplist with the natural ordering of `T`, drawing node heights from
    /// `level_generator`.  The sentinels are allocated with `level_generator.total()` levels.
    #[inline]
    pub fn with_level_generator(level_generator: G) -> Self {
        OrderedSkipList::with_parts(|a: &T, b: &T| a.cmp(b), level_generator)
    }
}

impl<T, G> OrderedSkipList<T, G>
where
    G: LevelGenerator,
{
    /// Create a new skiplist from both a comparison function and a level generator.
    pub fn with_parts<F>(f: F, level_generator: G) -> Self
    where
        F: 'static + Fn(&T, &T) -> Ordering,
    {
        let total = level_generator.total();
        OrderedSkipList {
            nodes: vec![SkipNode::head(total), SkipNode::tail(total)],
            free: Vec::new(),
            len: 0,
            levels: 1,
            level_generator,
            compare: Box::new(f),
        }
    }

    /// Insert the element into the skiplist.  Returns `false`, leaving the list untouched, if an
    /// equal element is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    ///
    /// assert!(skiplist.add(0));
    /// assert!(skiplist.add(5));
    /// assert!(!skiplist.add(5));
    /// assert_eq!(skiplist.len(), 2);
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        let path = self.locate(&value);
        if self.found(&path, &value).is_some() {
            return false;
        }
        let height = self.random_height();
        self.link(path, value, height);
        true
    }

    /// Draws a height for a new node.  A node never rises more than one level above the levels
    /// already in use, and the number of levels in use grows accordingly.
    fn random_height(&mut self) -> usize {
        let cap = cmp::min(self.levels + 1, self.total_levels());
        let height = cmp::min(self.level_generator.random() + 1, cap);
        if height > self.levels {
            self.levels = height;
        }
        height
    }

    /// Splices a new node right after `path.predecessor()`.
    ///
    /// The node is only linked on the levels the path covers; a height reaching above them is
    /// clipped so that the recorded height matches the links actually made.
    fn link(&mut self, path: SearchPath, value: T, height: usize) {
        let height = cmp::min(height, path.levels());
        let id = self.alloc(SkipNode::new(value, height));

        // The predecessor on level `lvl` sits at `prev_position`; the new node takes position
        // `new_position` and the span which used to cover the gap is split in two.
        let new_position = path.position() + 1;
        let mut prev_position = path.position();
        for lvl in 0..height {
            let pred = path.update[lvl];
            let succ = self.nodes[pred].links[lvl];
            let pred_len = self.nodes[pred].links_len[lvl];

            let node = &mut self.nodes[id];
            node.links[lvl] = succ;
            node.links_len[lvl] = prev_position + pred_len + 1 - new_position;

            let pred = &mut self.nodes[pred];
            pred.links[lvl] = id;
            pred.links_len[lvl] = new_position - prev_position;

            prev_position -= path.stride[lvl];
        }
        // Links passing over the new node now skip one more element.
        for lvl in height..path.levels() {
            self.nodes[path.update[lvl]].links_len[lvl] += 1;
        }

        let succ = self.nodes[id].links[0];
        self.nodes[id].prev = Some(path.predecessor());
        self.nodes[succ].prev = Some(id);

        self.len += 1;
        self.refresh_sentinel_spans();
    }

    /// Get a cursor positioned before the first element, able to remove the elements it yields.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(1..=6);
    /// {
    ///     let mut cursor = skiplist.cursor();
    ///     while let Ok(Some(&value)) = cursor.advance() {
    ///         if value % 3 == 0 {
    ///             cursor.remove_current().unwrap();
    ///         }
    ///     }
    /// }
    /// assert_eq!(skiplist.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
    /// ```
    pub fn cursor(&mut self) -> Cursor<T, G> {
        Cursor::new(self)
    }
}

impl<T, G> OrderedSkipList<T, G> {
    /// Clears the skiplist, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(0..10);
    /// skiplist.clear();
    /// assert!(skiplist.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let total = self.total_levels();
        self.nodes = vec![SkipNode::head(total), SkipNode::tail(total)];
        self.free.clear();
        self.len = 0;
        self.levels = 1;
    }

    /// Returns the number of elements in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.len(), 10);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently in use.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.levels
    }

    /// Returns true if the value is contained in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(0..10);
    /// assert!(skiplist.contains(&4));
    /// assert!(!skiplist.contains(&15));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let path = self.locate(value);
        self.found(&path, value).is_some()
    }

    /// Removes and returns the element equal to `value`, or `None` if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.remove(&4), Some(4));
    /// assert_eq!(skiplist.remove(&4), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let path = self.locate(value);
        let id = self.found(&path, value)?;
        self.unlink(path, id)
    }

    /// Provides a reference to the smallest element, or `None` if the skiplist is empty.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.value(self.nodes[HEAD].links[0])
    }

    /// Provides a reference to the greatest element, or `None` if the skiplist is empty.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.nodes[TAIL].prev.and_then(|prev| self.value(prev))
    }

    /// The greatest element less than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(vec![10, 20, 30]);
    /// assert_eq!(skiplist.floor(&5), None);
    /// assert_eq!(skiplist.floor(&20), Some(&20));
    /// assert_eq!(skiplist.floor(&25), Some(&20));
    /// assert_eq!(skiplist.floor(&99), Some(&30));
    /// ```
    pub fn floor(&self, value: &T) -> Option<&T> {
        let last = self.last()?;
        if (self.compare)(value, last) == Ordering::Greater {
            return Some(last);
        }
        let first = self.first()?;
        if (self.compare)(value, first) == Ordering::Less {
            return None;
        }

        let path = self.locate(value);
        match self.found(&path, value) {
            Some(id) => self.value(id),
            None => self.value(path.predecessor()),
        }
    }

    /// The least element greater than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(vec![10, 20, 30]);
    /// assert_eq!(skiplist.ceiling(&5), Some(&10));
    /// assert_eq!(skiplist.ceiling(&20), Some(&20));
    /// assert_eq!(skiplist.ceiling(&25), Some(&30));
    /// assert_eq!(skiplist.ceiling(&99), None);
    /// ```
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        let last = self.last()?;
        if (self.compare)(value, last) == Ordering::Greater {
            return None;
        }
        let first = self.first()?;
        if (self.compare)(value, first) == Ordering::Less {
            return Some(first);
        }

        let path = self.locate(value);
        self.value(self.nodes[path.predecessor()].links[0])
    }

    /// Provides a reference to the element at the given index (the smallest element being at
    /// index 0).
    ///
    /// The search starts on the highest populated level and follows the link lengths, so it
    /// runs in `O(log(n))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{OrderedSkipList, SkipListError};
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// assert_eq!(skiplist.get(0), Err(SkipListError::OutOfRange { index: 0, len: 0 }));
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.get(0), Ok(&0));
    /// assert_eq!(skiplist.get(9), Ok(&9));
    /// assert!(skiplist.get(10).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, SkipListError> {
        let out_of_range = SkipListError::OutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }

        let position = index + 1;
        let mut visited = 0;
        let mut node = HEAD;
        let mut lvl = self.top_level() + 1;
        while lvl > 0 {
            lvl -= 1;
            // The link reaching the wanted position is never followed, so `node` ends up just
            // before it.
            while visited + self.nodes[node].links_len[lvl] < position {
                visited += self.nodes[node].links_len[lvl];
                node = self.nodes[node].links[lvl];
            }
        }
        self.value(self.nodes[node].links[0]).ok_or(out_of_range)
    }

    /// Same as `get`, but walks the bottom level only.  Runs in `O(n)`.
    pub fn get_linear(&self, index: usize) -> Result<&T, SkipListError> {
        if index >= self.len {
            return Err(SkipListError::OutOfRange {
                index,
                len: self.len,
            });
        }
        let mut node = self.nodes[HEAD].links[0];
        for _ in 0..index {
            node = self.nodes[node].links[0];
        }
        self.value(node).ok_or(SkipListError::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// The 1-based position that `value` occupies, or would occupy if it were inserted.  This is
    /// the inverse of `get`: for any present `x`, `get(rank(x) - 1) == x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(vec![10, 20, 30]);
    /// assert_eq!(skiplist.rank(&10), 1);
    /// assert_eq!(skiplist.rank(&25), 3);
    /// assert_eq!(skiplist.rank(&99), 4);
    /// ```
    pub fn rank(&self, value: &T) -> usize {
        self.locate(value).position() + 1
    }

    /// The index of `value`, or `None` if it is not present.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        let path = self.locate(value);
        self.found(&path, value).map(|_| path.position())
    }

    /// Creates an iterator over the entries of the skiplist, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::OrderedSkipList;
    ///
    /// let mut skiplist = OrderedSkipList::new();
    /// skiplist.extend(0..10);
    /// for i in skiplist.iter() {
    ///     println!("Value: {}", i);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<T, G> {
        Iter {
            list: self,
            front: self.nodes[HEAD].links[0],
            back: self.nodes[TAIL].prev.unwrap_or(HEAD),
            size: self.len,
        }
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T, G> OrderedSkipList<T, G> {
    /// Descends from the highest level in use to level 0, moving forward on each level while the
    /// next element is smaller than `value`.
    ///
    /// On return, `predecessor()` is the greatest node smaller than `value` (or the head) and its
    /// level 0 successor the least node greater or equal to `value` (or the tail).
    pub(crate) fn locate(&self, value: &T) -> SearchPath {
        let mut update = vec![HEAD; self.levels];
        let mut stride = vec![0; self.levels];
        let mut node = HEAD;

        let mut lvl = self.levels;
        while lvl > 0 {
            lvl -= 1;

            loop {
                let next = self.nodes[node].links[lvl];
                match self.nodes[next].value {
                    Some(ref next_value) if (self.compare)(next_value, value) == Ordering::Less => {
                        stride[lvl] += self.nodes[node].links_len[lvl];
                        node = next;
                    }
                    _ => break,
                }
            }
            update[lvl] = node;
        }

        SearchPath { update, stride }
    }

    /// The node holding `value`, if the search ended right in front of it.
    fn found(&self, path: &SearchPath, value: &T) -> Option<NodeId> {
        let candidate = self.nodes[path.predecessor()].links[0];
        match self.nodes[candidate].value {
            Some(ref v) if (self.compare)(v, value) == Ordering::Equal => Some(candidate),
            _ => None,
        }
    }

    /// Splices `id` out of every level, merging the spans on either side of it.  `path` must be
    /// the result of locating the value held by `id`.
    pub(crate) fn unlink(&mut self, path: SearchPath, id: NodeId) -> Option<T> {
        let height = self.nodes[id].height();
        for lvl in 0..height {
            let succ = self.nodes[id].links[lvl];
            let len = self.nodes[id].links_len[lvl];
            let pred = &mut self.nodes[path.update[lvl]];
            pred.links[lvl] = succ;
            pred.links_len[lvl] = pred.links_len[lvl] + len - 1;
        }
        // Links passing over the removed node skip one element less.
        for lvl in height..path.levels() {
            self.nodes[path.update[lvl]].links_len[lvl] -= 1;
        }

        let succ = self.nodes[id].links[0];
        self.nodes[succ].prev = self.nodes[id].prev;

        self.len -= 1;
        self.refresh_sentinel_spans();
        self.release(id)
    }

    /// Head links which lead straight to the tail span the whole list.
    fn refresh_sentinel_spans(&mut self) {
        let span = self.len + 1;
        let head = &mut self.nodes[HEAD];
        for lvl in 0..head.links.len() {
            if head.links[lvl] == TAIL {
                head.links_len[lvl] = span;
            }
        }
    }

    /// The highest level on which the head links to an actual element.
    fn top_level(&self) -> usize {
        let head = &self.nodes[HEAD];
        (0..self.levels)
            .rev()
            .find(|&lvl| head.links[lvl] != TAIL)
            .unwrap_or(0)
    }

    /// Number of levels allocated for the sentinels.
    #[inline]
    pub(crate) fn total_levels(&self) -> usize {
        self.nodes[HEAD].links.len()
    }

    #[inline]
    pub(crate) fn set_levels(&mut self, levels: usize) {
        self.levels = levels;
    }

    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> Option<&T> {
        self.nodes[id].value.as_ref()
    }

    fn alloc(&mut self, node: SkipNode<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<T> {
        self.free.push(id);
        mem::replace(&mut self.nodes[id], SkipNode::vacant()).into_inner()
    }

    /// Checks the integrity of the skiplist: ordering, links, link lengths and back links are
    /// all compared against a plain walk of level 0.
    #[cfg(test)]
    pub(crate) fn check(&self) {
        // Level 0 order, head and tail included.
        let mut order = vec![HEAD];
        let mut node = HEAD;
        while node != TAIL {
            let next = self.nodes[node].links[0];
            assert_eq!(self.nodes[next].prev, Some(node));
            if let (Some(a), Some(b)) = (self.value(node), self.value(next)) {
                assert_eq!((self.compare)(a, b), Ordering::Less);
            }
            order.push(next);
            node = next;
        }
        assert_eq!(order.len(), self.len + 2);
        assert!(self.levels >= 1 && self.levels <= self.total_levels());

        let height = |id: NodeId| {
            if id == TAIL {
                self.total_levels()
            } else {
                self.nodes[id].height()
            }
        };
        for (pos, &id) in order.iter().enumerate() {
            if id == TAIL {
                continue;
            }
            if id != HEAD {
                assert!(height(id) >= 1 && height(id) <= self.levels);
            }
            for lvl in 0..height(id) {
                // The nearest following node reaching this level.
                let (expected_pos, expected) = order
                    .iter()
                    .enumerate()
                    .skip(pos + 1)
                    .find(|&(_, &other)| height(other) > lvl)
                    .map(|(p, &other)| (p, other))
                    .unwrap();
                assert_eq!(self.nodes[id].links[lvl], expected);
                assert_eq!(self.nodes[id].links_len[lvl], expected_pos - pos);
            }
        }
    }
}

impl<T, G> OrderedSkipList<T, G>
where
    T: fmt::Debug,
{
    /// Renders every level of the skiplist, one line per level (for debugging purposes).
    #[cfg(test)]
    fn debug_structure(&self) -> String {
        let mut rows: Vec<String> = iter::repeat(String::new()).take(self.levels).collect();
        let mut node = HEAD;
        loop {
            let label = match self.value(node) {
                Some(v) => format!("{:?}", v),
                None if node == HEAD => "<head>".to_owned(),
                None => "<tail>".to_owned(),
            };
            for (lvl, row) in rows.iter_mut().enumerate() {
                if lvl < self.nodes[node].height() || node == TAIL {
                    let len = if node == TAIL { 0 } else { self.nodes[node].links_len[lvl] };
                    row.push_str(&format!("{}({}) ", label, len));
                } else {
                    row.push_str(&"-".repeat(label.len() + 4));
                }
            }
            if node == TAIL {
                break;
            }
            node = self.nodes[node].links[0];
        }
        rows.reverse();
        rows.join("\n")
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T: cmp::Ord> default::Default for OrderedSkipList<T> {
    fn default() -> OrderedSkipList<T> {
        OrderedSkipList::new()
    }
}

impl<T, G> Extend<T> for OrderedSkipList<T, G>
where
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: iter::IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.add(element);
        }
    }
}

impl<T> iter::FromIterator<T> for OrderedSkipList<T>
where
    T: cmp::Ord,
{
    #[inline]
    fn from_iter<I>(iter: I) -> OrderedSkipList<T>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut skiplist = OrderedSkipList::new();
        skiplist.extend(iter);
        skiplist
    }
}

impl<T, G> fmt::Debug for OrderedSkipList<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, G> iter::IntoIterator for &'a OrderedSkipList<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, G>;

    fn into_iter(self) -> Iter<'a, T, G> {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Borrowing iterator over the elements of an `OrderedSkipList`.
pub struct Iter<'a, T, G> {
    list: &'a OrderedSkipList<T, G>,
    front: NodeId,
    back: NodeId,
    size: usize,
}

impl<'a, T, G> Iterator for Iter<'a, T, G> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.size == 0 {
            return None;
        }
        let value = self.list.value(self.front);
        self.front = self.list.nodes[self.front].links[0];
        self.size -= 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<'a, T, G> DoubleEndedIterator for Iter<'a, T, G> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.size == 0 {
            return None;
        }
        let value = self.list.value(self.back);
        self.back = self.list.nodes[self.back].prev.unwrap_or(HEAD);
        self.size -= 1;
        value
    }
}

impl<'a, T, G> ExactSizeIterator for Iter<'a, T, G> {}

// ///////////////////////////////////////////////
// Tests
// ///////////////////////////////////////////////
