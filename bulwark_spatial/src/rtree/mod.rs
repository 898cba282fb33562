// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic R-tree keyed by entity id.
//!
//! Nodes live in an arena and refer to their parent by index. A sparse set
//! ("locs") maps every id to the leaf and slot holding it, so updates and
//! deletes go straight to the entry instead of searching the tree.

mod split;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use bulwark_table::{Error, Id, SparseSet};

use crate::columns::{LANES, RectColumns};
use crate::config::{BoundsPolicy, RTreeConfig};
use crate::geom::{Rect, Vec2};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// Where an id lives: its leaf and its position within that leaf.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Loc {
    leaf: NodeIdx,
    slot: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Entry<I> {
    id: I,
    rect: Rect,
}

#[derive(Clone, Debug)]
enum Kind<I> {
    Leaf(Vec<Entry<I>>),
    Middle(Vec<NodeIdx>),
}

#[derive(Clone, Debug)]
struct Node<I> {
    rect: Rect,
    parent: Option<NodeIdx>,
    kind: Kind<I>,
}

impl<I> Node<I> {
    fn empty_leaf(parent: Option<NodeIdx>) -> Self {
        Self {
            rect: Rect::ZERO,
            parent,
            kind: Kind::Leaf(Vec::new()),
        }
    }

    fn is_empty(&self) -> bool {
        match &self.kind {
            Kind::Leaf(entries) => entries.is_empty(),
            Kind::Middle(children) => children.is_empty(),
        }
    }
}

/// R-tree over axis-aligned rectangles keyed by entity id.
///
/// - `MAX_ID`: largest id the tree accepts (sizes the reverse index).
/// - `LEAF`: most entries a leaf holds between operations.
/// - `MIDDLE`: most children a middle node holds between operations.
///
/// Inserts descend by least area enlargement and split overflowing nodes with
/// Guttman's linear heuristic. Deletes and updates find their entry through the
/// reverse index in O(1). Updates that stay inside their leaf's rectangle are
/// applied in place; others are a delete followed by an insert.
///
/// Queries borrow the tree, so it cannot change while a visitor runs.
pub struct RTree<I: Id, const MAX_ID: usize, const LEAF: usize, const MIDDLE: usize> {
    config: RTreeConfig,
    nodes: Vec<Node<I>>,
    free: Vec<NodeIdx>,
    root: NodeIdx,
    height: usize,
    locs: SparseSet<I, Loc, MAX_ID>,
    scratch: RectColumns,
}

impl<I: Id, const MAX_ID: usize, const LEAF: usize, const MIDDLE: usize> Default
    for RTree<I, MAX_ID, LEAF, MIDDLE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Id, const MAX_ID: usize, const LEAF: usize, const MIDDLE: usize>
    RTree<I, MAX_ID, LEAF, MIDDLE>
{
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RTreeConfig::default())
    }

    /// Create an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if `LEAF` or `MIDDLE` is below 2.
    pub fn with_config(config: RTreeConfig) -> Self {
        assert!(LEAF >= 2, "leaves must hold at least two entries");
        assert!(MIDDLE >= 2, "middle nodes must hold at least two children");
        Self {
            config,
            nodes: vec![Node::empty_leaf(None)],
            free: Vec::new(),
            root: NodeIdx::new(0),
            height: 0,
            locs: SparseSet::new(),
            scratch: RectColumns::with_capacity(MIDDLE + 1),
        }
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &RTreeConfig {
        &self.config
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.locs.len()
    }

    /// True if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Number of middle levels above the leaves. A lone root leaf is height 0.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// The root's rectangle, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| self.nodes[self.root.get()].rect)
    }

    /// Whether `id` is in the tree.
    pub fn contains(&self, id: I) -> bool {
        self.locs.contains(id)
    }

    /// The stored rectangle for `id`.
    pub fn get(&self, id: I) -> Result<Rect, Error> {
        let loc = *self.locs.get(id)?;
        Ok(self.leaf_entries(loc.leaf)[loc.slot].rect)
    }

    /// Remove every entry, keeping the reverse index's storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::empty_leaf(None));
        self.free.clear();
        self.root = NodeIdx::new(0);
        self.height = 0;
        self.locs.clear();
    }

    /// Add `id` with rectangle `rect`.
    ///
    /// If `id` is already present it is moved, as by [`RTree::update`].
    ///
    /// # Panics
    ///
    /// Panics if `id` is above `MAX_ID`.
    pub fn insert(&mut self, id: I, rect: Rect) {
        let index = id.index();
        assert!(
            index <= MAX_ID,
            "id {index} exceeds the capacity ceiling of {MAX_ID}"
        );
        if let Some(&loc) = self.locs.find(id) {
            self.update_at(id, loc, rect);
            return;
        }
        self.insert_entry(Entry { id, rect });
    }

    /// Move `id` to `rect`.
    ///
    /// In place when `rect` fits inside the owning leaf's rectangle, otherwise
    /// a delete followed by a reinsert. Fails with [`Error::RowNotFound`] if
    /// `id` is absent.
    pub fn update(&mut self, id: I, rect: Rect) -> Result<(), Error> {
        let loc = *self.locs.get(id)?;
        self.update_at(id, loc, rect);
        Ok(())
    }

    /// Remove `id`, returning its last rectangle.
    ///
    /// Fails with [`Error::RowNotFound`] if `id` is absent.
    pub fn delete(&mut self, id: I) -> Result<Rect, Error> {
        let loc = *self.locs.get(id)?;
        let removed = self.remove_at(loc);
        self.locs.delete(id);
        Ok(removed.rect)
    }

    /// Call `visitor` for every entry whose rectangle intersects `query`.
    pub fn find_intersect(&self, query: &Rect, mut visitor: impl FnMut(I, &Rect)) {
        self.walk(|r| r.intersects(query), &mut visitor);
    }

    /// Call `visitor` for every entry whose rectangle contains `point`.
    pub fn find_point(&self, point: Vec2, mut visitor: impl FnMut(I, &Rect)) {
        self.walk(|r| r.contains_vec(point), &mut visitor);
    }

    /// Entries intersecting `query`, in traversal order.
    pub fn query_rect(&self, query: Rect) -> impl Iterator<Item = (I, Rect)> + '_ {
        let mut out = Vec::new();
        self.find_intersect(&query, |id, r| out.push((id, *r)));
        out.into_iter()
    }

    /// Entries containing `point`, in traversal order.
    pub fn query_point(&self, point: Vec2) -> impl Iterator<Item = (I, Rect)> + '_ {
        let mut out = Vec::new();
        self.find_point(point, |id, r| out.push((id, *r)));
        out.into_iter()
    }

    /// All entries, leaf by leaf.
    pub fn iter(&self) -> impl Iterator<Item = (I, Rect)> + '_ {
        // Freed arena slots are empty leaves and contribute nothing.
        self.nodes
            .iter()
            .filter_map(|n| match &n.kind {
                Kind::Leaf(entries) => Some(entries.iter().map(|e| (e.id, e.rect))),
                Kind::Middle(_) => None,
            })
            .flatten()
    }

    /// Depth-first walk with an explicit stack. Children are pushed reversed
    /// so they are visited in stored order.
    fn walk(&self, hit: impl Fn(&Rect) -> bool, visitor: &mut impl FnMut(I, &Rect)) {
        let mut stack = Vec::with_capacity(self.height * MIDDLE + 1);
        stack.push(self.root);
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx.get()];
            if !hit(&node.rect) {
                continue;
            }
            match &node.kind {
                Kind::Leaf(entries) => {
                    for e in entries {
                        if hit(&e.rect) {
                            visitor(e.id, &e.rect);
                        }
                    }
                }
                Kind::Middle(children) => stack.extend(children.iter().rev().copied()),
            }
        }
    }

    fn leaf_entries(&self, idx: NodeIdx) -> &Vec<Entry<I>> {
        match &self.nodes[idx.get()].kind {
            Kind::Leaf(entries) => entries,
            Kind::Middle(_) => unreachable!("locs only point at leaves"),
        }
    }

    fn children(&self, idx: NodeIdx) -> &Vec<NodeIdx> {
        match &self.nodes[idx.get()].kind {
            Kind::Middle(children) => children,
            Kind::Leaf(_) => unreachable!("parents are always middle nodes"),
        }
    }

    fn children_mut(&mut self, idx: NodeIdx) -> &mut Vec<NodeIdx> {
        match &mut self.nodes[idx.get()].kind {
            Kind::Middle(children) => children,
            Kind::Leaf(_) => unreachable!("parents are always middle nodes"),
        }
    }

    fn alloc(&mut self, node: Node<I>) -> NodeIdx {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx.get()] = node;
            idx
        } else {
            self.nodes.push(node);
            NodeIdx::new(self.nodes.len() - 1)
        }
    }

    fn release(&mut self, idx: NodeIdx) {
        self.nodes[idx.get()] = Node::empty_leaf(None);
        self.free.push(idx);
    }

    /// Exact union of a node's contents, or [`Rect::ZERO`] when it is empty.
    fn content_rect(&self, idx: NodeIdx) -> Rect {
        match &self.nodes[idx.get()].kind {
            Kind::Leaf(entries) => union_all(entries.iter().map(|e| e.rect)),
            Kind::Middle(children) => union_all(children.iter().map(|c| self.nodes[c.get()].rect)),
        }
    }

    fn choose_leaf(&mut self, rect: &Rect) -> NodeIdx {
        let Self {
            nodes,
            scratch,
            config,
            root,
            ..
        } = self;
        let mut idx = *root;
        loop {
            match &nodes[idx.get()].kind {
                Kind::Leaf(_) => return idx,
                Kind::Middle(children) => {
                    let pick = if config.use_columnar(children.len()) {
                        choose_columnar(nodes, children, rect, scratch)
                    } else {
                        choose_scalar(nodes, children, rect)
                    };
                    idx = children[pick];
                }
            }
        }
    }

    fn insert_entry(&mut self, entry: Entry<I>) {
        let leaf = self.choose_leaf(&entry.rect);
        let Node { rect, kind, .. } = &mut self.nodes[leaf.get()];
        let Kind::Leaf(entries) = kind else {
            unreachable!("choose_leaf returns leaves")
        };
        *rect = if entries.is_empty() {
            entry.rect
        } else {
            rect.union(&entry.rect)
        };
        let slot = entries.len();
        entries.push(entry);
        let overflow = entries.len() > LEAF;
        self.locs.set(entry.id, Loc { leaf, slot });

        let mut up = self.nodes[leaf.get()].parent;
        while let Some(p) = up {
            let node = &mut self.nodes[p.get()];
            node.rect = node.rect.union(&entry.rect);
            up = node.parent;
        }

        if overflow {
            self.split(leaf);
        }
    }

    /// Split an overflowing node in two. The first half keeps `idx` and its
    /// place in the parent; the second half is inserted right after it.
    ///
    /// Leaf halves list their seed first. Middle halves are swapped so the
    /// half seeded by the lowest high side comes first.
    fn split(&mut self, idx: NodeIdx) {
        let parent = self.nodes[idx.get()].parent;
        let kind = core::mem::replace(&mut self.nodes[idx.get()].kind, Kind::Middle(Vec::new()));
        let sibling = match kind {
            Kind::Leaf(entries) => {
                let rects: Vec<Rect> = entries.iter().map(|e| e.rect).collect();
                let s = split::linear(&rects);
                tracing::debug!(
                    node = idx.get(),
                    first = s.first.len(),
                    second = s.second.len(),
                    "split leaf"
                );
                let first: Vec<_> = s.first.iter().map(|&i| entries[i]).collect();
                let second: Vec<_> = s.second.iter().map(|&i| entries[i]).collect();
                let sibling = self.alloc(Node {
                    rect: s.second_rect,
                    parent,
                    kind: Kind::Leaf(Vec::new()),
                });
                for (slot, e) in first.iter().enumerate() {
                    self.locs.set(e.id, Loc { leaf: idx, slot });
                }
                for (slot, e) in second.iter().enumerate() {
                    self.locs.set(
                        e.id,
                        Loc {
                            leaf: sibling,
                            slot,
                        },
                    );
                }
                let node = &mut self.nodes[idx.get()];
                node.rect = s.first_rect;
                node.kind = Kind::Leaf(first);
                self.nodes[sibling.get()].kind = Kind::Leaf(second);
                sibling
            }
            Kind::Middle(children) => {
                let rects: Vec<Rect> = children
                    .iter()
                    .map(|c| self.nodes[c.get()].rect)
                    .collect();
                // The half seeded from the low end keeps the slot, and both
                // halves keep their children in stored order.
                let split::Split {
                    first: mut second_pos,
                    first_rect: second_rect,
                    second: mut first_pos,
                    second_rect: first_rect,
                } = split::linear(&rects);
                first_pos.sort_unstable();
                second_pos.sort_unstable();
                tracing::debug!(
                    node = idx.get(),
                    first = first_pos.len(),
                    second = second_pos.len(),
                    "split middle node"
                );
                let first: Vec<_> = first_pos.iter().map(|&i| children[i]).collect();
                let second: Vec<_> = second_pos.iter().map(|&i| children[i]).collect();
                let sibling = self.alloc(Node {
                    rect: second_rect,
                    parent,
                    kind: Kind::Middle(Vec::new()),
                });
                for c in &second {
                    self.nodes[c.get()].parent = Some(sibling);
                }
                let node = &mut self.nodes[idx.get()];
                node.rect = first_rect;
                node.kind = Kind::Middle(first);
                self.nodes[sibling.get()].kind = Kind::Middle(second);
                sibling
            }
        };

        match parent {
            Some(p) => {
                let children = self.children_mut(p);
                let pos = children
                    .iter()
                    .position(|&c| c == idx)
                    .expect("split node is a child of its parent");
                children.insert(pos + 1, sibling);
                if children.len() > MIDDLE {
                    self.split(p);
                }
            }
            None => {
                let rect = self.nodes[idx.get()]
                    .rect
                    .union(&self.nodes[sibling.get()].rect);
                let root = self.alloc(Node {
                    rect,
                    parent: None,
                    kind: Kind::Middle(vec![idx, sibling]),
                });
                self.nodes[idx.get()].parent = Some(root);
                self.nodes[sibling.get()].parent = Some(root);
                self.root = root;
                self.height += 1;
                tracing::debug!(height = self.height, "root split, tree grew");
            }
        }
    }

    fn update_at(&mut self, id: I, loc: Loc, rect: Rect) {
        let Node { rect: bounds, kind, .. } = &mut self.nodes[loc.leaf.get()];
        if bounds.contains_rect(&rect) {
            let Kind::Leaf(entries) = kind else {
                unreachable!("locs only point at leaves")
            };
            entries[loc.slot].rect = rect;
            if self.config.bounds == BoundsPolicy::Tight {
                self.refit_upwards(loc.leaf);
            }
            return;
        }
        tracing::trace!(id = id.index(), "entry left its leaf, reinserting");
        self.remove_at(loc);
        self.insert_entry(Entry { id, rect });
    }

    /// Swap-remove the entry at `loc` and repair the leaf and its ancestors.
    /// The removed id's own loc is left for the caller to drop or overwrite.
    fn remove_at(&mut self, loc: Loc) -> Entry<I> {
        let Kind::Leaf(entries) = &mut self.nodes[loc.leaf.get()].kind else {
            unreachable!("locs only point at leaves")
        };
        let removed = entries.swap_remove(loc.slot);
        if let Some(moved) = entries.get(loc.slot) {
            self.locs.set(moved.id, loc);
        }
        if entries.is_empty() {
            self.unlink_empty(loc.leaf);
        } else if self.config.bounds == BoundsPolicy::Tight {
            self.refit_upwards(loc.leaf);
        }
        removed
    }

    /// Detach an empty node from its parent, cascading upward through parents
    /// that become empty. An emptied root reverts to an empty leaf.
    fn unlink_empty(&mut self, mut idx: NodeIdx) {
        loop {
            let Some(parent) = self.nodes[idx.get()].parent else {
                let root = &mut self.nodes[idx.get()];
                root.rect = Rect::ZERO;
                if matches!(root.kind, Kind::Middle(_)) {
                    root.kind = Kind::Leaf(Vec::new());
                    self.height = 0;
                    tracing::debug!("tree emptied, root reset to a leaf");
                }
                return;
            };
            self.release(idx);
            let children = self.children_mut(parent);
            if let Some(pos) = children.iter().position(|&c| c == idx) {
                children.remove(pos);
            }
            tracing::debug!(node = idx.get(), parent = parent.get(), "unlinked empty node");
            if !self.nodes[parent.get()].is_empty() {
                if self.config.bounds == BoundsPolicy::Tight {
                    self.refit_upwards(parent);
                }
                return;
            }
            idx = parent;
        }
    }

    /// Recompute rectangles from `idx` toward the root, stopping at the first
    /// node whose rectangle does not change.
    fn refit_upwards(&mut self, mut idx: NodeIdx) {
        loop {
            let rect = self.content_rect(idx);
            let node = &mut self.nodes[idx.get()];
            if node.rect == rect {
                return;
            }
            node.rect = rect;
            match node.parent {
                Some(p) => idx = p,
                None => return,
            }
        }
    }

    /// Walk the whole tree and check its structural invariants.
    ///
    /// Checks parent links, fan-out limits, uniform leaf depth, that no
    /// non-root node is empty, that the reverse index agrees with every leaf
    /// slot, and that node rectangles are the exact union of their contents
    /// ([`BoundsPolicy::Tight`]) or contain it ([`BoundsPolicy::Loose`]).
    pub fn is_consistent(&self) -> bool {
        if self.nodes[self.root.get()].parent.is_some() {
            return false;
        }
        let mut seen = 0_usize;
        let mut stack = vec![(self.root, 0_usize)];
        while let Some((idx, depth)) = stack.pop() {
            let node = &self.nodes[idx.get()];
            if idx != self.root && node.is_empty() {
                return false;
            }
            if !node.is_empty() {
                let exact = self.content_rect(idx);
                let ok = match self.config.bounds {
                    BoundsPolicy::Tight => node.rect == exact,
                    BoundsPolicy::Loose => node.rect.contains_rect(&exact),
                };
                if !ok {
                    return false;
                }
            }
            match &node.kind {
                Kind::Leaf(entries) => {
                    if depth != self.height || entries.len() > LEAF {
                        return false;
                    }
                    for (slot, e) in entries.iter().enumerate() {
                        if self.locs.find(e.id) != Some(&Loc { leaf: idx, slot }) {
                            return false;
                        }
                    }
                    seen += entries.len();
                }
                Kind::Middle(children) => {
                    if children.len() > MIDDLE {
                        return false;
                    }
                    for &c in children {
                        if self.nodes[c.get()].parent != Some(idx) {
                            return false;
                        }
                        stack.push((c, depth + 1));
                    }
                }
            }
        }
        seen == self.locs.len()
    }
}

fn union_all(mut rects: impl Iterator<Item = Rect>) -> Rect {
    match rects.next() {
        Some(first) => rects.fold(first, |acc, r| acc.union(&r)),
        None => Rect::ZERO,
    }
}

fn choose_scalar<I>(nodes: &[Node<I>], children: &[NodeIdx], rect: &Rect) -> usize {
    let mut best_idx = 0_usize;
    let mut best_cost: Option<f32> = None;
    for (i, c) in children.iter().enumerate() {
        let cost = nodes[c.get()].rect.enlargement(rect);
        if best_cost.map(|bc| cost < bc).unwrap_or(true) {
            best_cost = Some(cost);
            best_idx = i;
        }
    }
    best_idx
}

fn choose_columnar<I>(
    nodes: &[Node<I>],
    children: &[NodeIdx],
    rect: &Rect,
    scratch: &mut RectColumns,
) -> usize {
    scratch.clear();
    for c in children {
        if scratch.push(nodes[c.get()].rect).is_err() {
            return choose_scalar(nodes, children, rect);
        }
    }
    scratch.choose_best::<LANES>(rect).unwrap_or(0)
}

impl<I: Id, const MAX_ID: usize, const LEAF: usize, const MIDDLE: usize> Debug
    for RTree<I, MAX_ID, LEAF, MIDDLE>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("leaf", &LEAF)
            .field("middle", &MIDDLE)
            .field("len", &self.len())
            .field("height", &self.height)
            .field("nodes", &self.node_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
