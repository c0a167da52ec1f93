use std::fmt;

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipNode
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Index of a node inside the skiplist's node arena.
pub type NodeId = usize;

/// The head sentinel always occupies the first slot of the arena.
pub const HEAD: NodeId = 0;
/// The tail sentinel always occupies the second slot of the arena.
pub const TAIL: NodeId = 1;

/// SkipNodes make up the OrderedSkipList.  The list owns every node in an arena and nodes refer
/// to each other by their `NodeId`, never by ownership.
///
/// The height of a node is the length of its vector of links.  There is a corresponding vector
/// of link lengths (spans): `links_len[i]` is the number of level 0 steps needed to reach
/// `links[i]`.
///
/// Lastly, each node contains the id of the immediately previous node in case one needs to parse
/// the list backwards.
///
/// In cases where the value is not applicable, `None` is used.  In particular both sentinels hold
/// no value, and the tail links to itself on every level so that no traversal ever moves past it.
#[derive(Clone, Debug)]
pub struct SkipNode<V> {
    // value should never be None, with the sole exception being the sentinels and vacant slots.
    pub value: Option<V>,
    // The immediately previous element on level 0.
    pub prev: Option<NodeId>,
    // Vector of links to the next node at the respective level.
    pub links: Vec<NodeId>,
    // The corresponding length of each link
    pub links_len: Vec<usize>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<V> SkipNode<V> {
    /// Create a new head node linking straight to the tail on every level.
    pub fn head(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            prev: None,
            links: vec![TAIL; total_levels],
            links_len: vec![1; total_levels],
        }
    }

    /// Create a new tail node.  Its only meaningful field is `prev`.
    pub fn tail(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            prev: Some(HEAD),
            links: vec![TAIL; total_levels],
            links_len: vec![0; total_levels],
        }
    }

    /// Create a new SkipNode with the given value and height.  The links all point to the tail
    /// and have to be adjusted.
    pub fn new(value: V, height: usize) -> Self {
        SkipNode {
            value: Some(value),
            prev: None,
            links: vec![TAIL; height],
            links_len: vec![0; height],
        }
    }

    /// An empty slot, left behind in the arena once a node has been removed.
    pub fn vacant() -> Self {
        SkipNode {
            value: None,
            prev: None,
            links: Vec::new(),
            links_len: Vec::new(),
        }
    }

    /// Number of levels the node participates in.
    #[inline]
    pub fn height(&self) -> usize {
        self.links.len()
    }

    /// Consumes the node returning the value it contains.
    pub fn into_inner(self) -> Option<V> {
        self.value
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<V> fmt::Display for SkipNode<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref v) = self.value {
            write!(f, "{}", v)
        } else {
            Ok(())
        }
    }
}
