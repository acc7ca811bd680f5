use log::debug;

use std::{mem, sync::Arc};

use crate::{
    matcher::Matcher,
    rel::{
        node::{self, Node, NUM_BUCKETS},
        Depth, Stats,
    },
    Adapter, Error, Result,
};

/// Index type for an immutable n-ary relation over tuples of type `T`.
///
/// A relation value is a frozen snapshot. Mutating operations like
/// [add][Relation::add] and [remove][Relation::remove] leave the
/// receiver untouched and return a new snapshot sharing structure with
/// it, so keeping many versions around is cheap. Frozen snapshots can
/// be shared across threads freely.
///
/// Partial-key retrieval is the point of the structure: tuples are
/// indexed along every dimension by a rotating-dimension hash trie,
/// and [find][Relation::find] with a fixed dimension walks one bucket
/// per level for that dimension instead of scanning the set.
pub struct Relation<T, A>
where
    A: Adapter<Tuple = T>,
{
    adapter: Arc<A>,
    rank: usize,
    root: Arc<Node<T>>,
}

impl<T, A> Clone for Relation<T, A>
where
    A: Adapter<Tuple = T>,
{
    fn clone(&self) -> Relation<T, A> {
        Relation {
            adapter: Arc::clone(&self.adapter),
            rank: self.rank,
            root: Arc::clone(&self.root),
        }
    }
}

impl<T, A> Relation<T, A>
where
    T: Clone,
    A: Adapter<Tuple = T>,
{
    /// Create an empty relation with `adapter` supplying rank,
    /// per-dimension equality and hashing.
    pub fn new(adapter: A) -> Result<Relation<T, A>> {
        let rank = adapter.to_rank();
        if rank == 0 {
            return err_at!(InvalidInput, msg: "adapter rank must be positive");
        }
        debug!(target: "prel", "new relation of rank {}", rank);

        let val = Relation {
            adapter: Arc::new(adapter),
            rank,
            root: Arc::new(Node::new(0, 0)),
        };
        Ok(val)
    }

    /// Return number of tuples in this relation.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.count
    }

    /// Return whether this relation is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the arity of tuples held by this relation.
    #[inline]
    pub fn to_rank(&self) -> usize {
        self.rank
    }

    /// Return reference to this relation's adapter.
    #[inline]
    pub fn as_adapter(&self) -> &A {
        self.adapter.as_ref()
    }

    /// Return whether `tuple` is present, a single hash-path probe.
    pub fn contains(&self, tuple: &T) -> Result<bool> {
        node::contains(&self.root, tuple, self.adapter.as_ref())
    }

    /// Add `tuple`, returning the updated snapshot. Adding a tuple
    /// already present returns a snapshot sharing the receiver's root,
    /// without allocation.
    pub fn add(&self, tuple: T) -> Result<Relation<T, A>> {
        let mut rel = self.clone();
        rel.insert(tuple)?;
        Ok(rel)
    }

    /// Remove `tuple`, returning the updated snapshot. Removing an
    /// absent tuple returns a snapshot sharing the receiver's root.
    pub fn remove(&self, tuple: &T) -> Result<Relation<T, A>> {
        let mut rel = self.clone();
        rel.delete(tuple)?;
        Ok(rel)
    }

    /// Remove every tuple matched by all `matchers`, one per
    /// dimension, returning the updated snapshot.
    pub fn remove_matching(&self, matchers: &[Matcher<T>]) -> Result<Relation<T, A>> {
        let mut rel = self.clone();
        rel.delete_matching(matchers)?;
        Ok(rel)
    }

    /// Run `callb` against a transient copy of this relation and
    /// return the frozen result. Within the callback the transient
    /// ops [insert][Relation::insert], [delete][Relation::delete] and
    /// [delete_matching][Relation::delete_matching] update
    /// batch-owned nodes in place, so bulk sequences approach
    /// in-place performance while the receiver stays untouched.
    pub fn bulk<F>(&self, callb: F) -> Result<Relation<T, A>>
    where
        F: FnOnce(&mut Relation<T, A>) -> Result<()>,
    {
        let mut rel = self.clone();
        callb(&mut rel)?;
        debug!(target: "prel", "bulk batch len {} -> {}", self.len(), rel.len());
        Ok(rel)
    }

    /// Transient flavor of [add][Relation::add]. Return whether the
    /// count grew.
    pub fn insert(&mut self, tuple: T) -> Result<bool> {
        if node::contains(&self.root, &tuple, self.adapter.as_ref())? {
            return Ok(false);
        }
        node::do_add(&mut self.root, tuple, self.adapter.as_ref(), self.rank)
    }

    /// Transient flavor of [remove][Relation::remove]. Return whether
    /// a tuple was removed.
    pub fn delete(&mut self, tuple: &T) -> Result<bool> {
        if !node::contains(&self.root, tuple, self.adapter.as_ref())? {
            return Ok(false);
        }
        node::do_remove(&mut self.root, tuple, self.adapter.as_ref())
    }

    /// Transient flavor of [remove_matching][Relation::remove_matching].
    /// Return the number of tuples removed.
    pub fn delete_matching(&mut self, matchers: &[Matcher<T>]) -> Result<usize> {
        let key_hashes = self.to_key_hashes(matchers)?;
        let (root, n) = node::do_remove_matching(
            &self.root,
            matchers,
            &key_hashes,
            self.adapter.as_ref(),
        )?;
        self.root = match root {
            Some(root) => root,
            None => Arc::new(Node::new(0, 0)),
        };
        Ok(n)
    }

    /// Lazily yield every tuple matched by all `matchers`, one per
    /// dimension. Wildcard dimensions fan out over all buckets; a
    /// fixed dimension follows a single bucket per level. The order is
    /// unspecified but deterministic for a given instance. A fully
    /// wildcard query enumerates the relation.
    pub fn find(&self, matchers: &[Matcher<T>]) -> Result<Matches<T, A>> {
        let key_hashes = self.to_key_hashes(matchers)?;
        let mut iter = Matches {
            adapter: Arc::clone(&self.adapter),
            matchers: matchers.to_vec(),
            key_hashes,
            stack: Vec::default(),
        };
        iter.push_frame(Arc::clone(&self.root));
        Ok(iter)
    }

    /// Return the tuple at position `index` in this instance's
    /// canonical order, buckets `0..8` with the inline tuple before
    /// its child subtree.
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.len() {
            return err_at!(IndexOutOfRange, msg: "index {} for len {}", index, self.len());
        }
        match node::to_entry(&self.root, index) {
            Some(item) => Ok(item),
            None => err_at!(Fatal, msg: "count drifted from tree"),
        }
    }

    /// For full table scan, in the same order as indexed access.
    pub fn iter(&self) -> Iter<T> {
        let frame = Frame {
            node: Arc::clone(&self.root),
            off: 0,
        };
        Iter { stack: vec![frame] }
    }

    /// Validate the trie with following rules:
    ///
    /// * Every node's count must equal the tuples found under it.
    /// * Inline tuples must reside in the bucket their dimension-hash
    ///   selects at the node's level.
    /// * Child coordinates must follow the dimension rotation.
    /// * A bucket holding a child must hold an inline tuple, distinct
    ///   from every tuple in the child subtree, and children are never
    ///   empty.
    ///
    /// Return [Stats] with the depth histogram filled in.
    pub fn validate(&self) -> Result<Stats> {
        let mut depths = Depth::default();
        let (n_nodes, _) = node::validate_tree(
            &self.root,
            self.adapter.as_ref(),
            self.rank,
            0,
            &mut depths,
        )?;

        let depths = match depths.to_samples() {
            0 => None,
            _ => Some(depths),
        };
        let val = Stats {
            n_count: self.len(),
            node_size: mem::size_of::<Node<T>>(),
            n_nodes: Some(n_nodes),
            depths,
        };
        Ok(val)
    }

    /// Cheap subset of [validate][Relation::validate], no tree walk.
    pub fn to_stats(&self) -> Stats {
        Stats {
            n_count: self.len(),
            node_size: mem::size_of::<Node<T>>(),
            n_nodes: None,
            depths: None,
        }
    }

    fn to_key_hashes(&self, matchers: &[Matcher<T>]) -> Result<Vec<Option<u32>>> {
        if matchers.len() != self.rank {
            return err_at!(
                InvalidInput,
                msg: "got {} matchers, rank is {}", matchers.len(), self.rank
            );
        }
        let mut key_hashes = Vec::with_capacity(self.rank);
        for (dim, matcher) in matchers.iter().enumerate() {
            let hash = match matcher.is_match_all() {
                true => None,
                false => Some(matcher.key_hash(self.adapter.as_ref(), dim)?),
            };
            key_hashes.push(hash);
        }
        Ok(key_hashes)
    }
}

impl<'a, T, A> IntoIterator for &'a Relation<T, A>
where
    T: Clone,
    A: Adapter<Tuple = T>,
{
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

struct Frame<T> {
    node: Arc<Node<T>>,
    off: usize,
}

/// Iterator type for full enumeration, returned by
/// [iter][Relation::iter].
pub struct Iter<T> {
    stack: Vec<Frame<T>>,
}

impl<T> Iterator for Iter<T>
where
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let frame = self.stack.last_mut()?;
            if frame.off >= NUM_BUCKETS {
                self.stack.pop();
                continue;
            }
            let off = frame.off;
            frame.off += 1;

            let node = Arc::clone(&frame.node);
            let bucket = &node.buckets[off];
            if let Some(child) = &bucket.child {
                let frame = Frame {
                    node: Arc::clone(child),
                    off: 0,
                };
                self.stack.push(frame);
            }
            if let Some(item) = &bucket.item {
                return Some(item.clone());
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Cursor {
    All(usize),
    One(usize),
    Done,
}

struct MatchFrame<T> {
    node: Arc<Node<T>>,
    cursor: Cursor,
}

/// Iterator type for partial-key retrieval, returned by
/// [find][Relation::find].
pub struct Matches<T, A>
where
    A: Adapter<Tuple = T>,
{
    adapter: Arc<A>,
    matchers: Vec<Matcher<T>>,
    key_hashes: Vec<Option<u32>>,
    stack: Vec<MatchFrame<T>>,
}

impl<T, A> Matches<T, A>
where
    T: Clone,
    A: Adapter<Tuple = T>,
{
    fn push_frame(&mut self, node: Arc<Node<T>>) {
        let cursor = match self.key_hashes[node.dim] {
            None => Cursor::All(0),
            Some(hash) => Cursor::One(node::to_bucket(hash, node.level)),
        };
        self.stack.push(MatchFrame { node, cursor });
    }
}

impl<T, A> Iterator for Matches<T, A>
where
    T: Clone,
    A: Adapter<Tuple = T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        loop {
            let frame = self.stack.last_mut()?;
            let off = match frame.cursor {
                Cursor::All(off) if off >= NUM_BUCKETS => {
                    self.stack.pop();
                    continue;
                }
                Cursor::All(off) => {
                    frame.cursor = Cursor::All(off + 1);
                    off
                }
                Cursor::One(off) => {
                    frame.cursor = Cursor::Done;
                    off
                }
                Cursor::Done => {
                    self.stack.pop();
                    continue;
                }
            };

            let node = Arc::clone(&frame.node);
            let bucket = &node.buckets[off];
            if let Some(child) = &bucket.child {
                self.push_frame(Arc::clone(child));
            }
            if let Some(item) = &bucket.item {
                match node::is_full_match(item, &self.matchers, self.adapter.as_ref()) {
                    Ok(true) => return Some(Ok(item.clone())),
                    Ok(false) => (),
                    Err(err) => return Some(Err(err)),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
