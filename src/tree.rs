//!
//! Rooted binary phylogenetic tree stored as an arena of nodes.
//!
//! Nodes are placed in a fixed array so that every node appears after
//! both of its children, and the root is the last element. A single pass
//! over the array is therefore a post-order traversal.
//!
use crate::error::{Error, Result};
use log::debug;
use std::collections::{HashMap, VecDeque};

/// Conventional name of the root node, which has no record of its own.
pub const DEFAULT_ROOT: &str = "Root";

///
/// One line of an edge list: `name` is a child of `parent` at distance `branch_length`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRecord {
    pub name: String,
    pub parent: String,
    pub branch_length: f64,
}

impl TreeRecord {
    pub fn new<S: Into<String>, T: Into<String>>(name: S, parent: T, branch_length: f64) -> Self {
        TreeRecord {
            name: name.into(),
            parent: parent.into(),
            branch_length,
        }
    }
}

///
/// Node of the tree
///
/// * `branch_length`: distance to the parent (zero for the root)
/// * `children`: positions of the (left, right) children, `None` for a leaf
/// * `position`: index of this node in the traversal order
///
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    branch_length: f64,
    children: Option<(usize, usize)>,
    position: usize,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn branch_length(&self) -> f64 {
        self.branch_length
    }
    pub fn children(&self) -> Option<(usize, usize)> {
        self.children
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

///
/// Immutable after construction.
///
#[derive(Debug, Clone)]
pub struct PhylogeneticTree {
    nodes: Vec<Node>,
}

impl PhylogeneticTree {
    ///
    /// Build a tree rooted at `"Root"` from an edge list of arbitrary order.
    ///
    pub fn from_records(records: &[TreeRecord]) -> Result<Self> {
        Self::from_records_with_root(records, DEFAULT_ROOT)
    }
    ///
    /// Build a tree rooted at the node named `root` from an edge list of arbitrary order.
    ///
    /// Children of a node are ordered by name, so the result does not depend
    /// on the order of `records`.
    ///
    pub fn from_records_with_root(records: &[TreeRecord], root: &str) -> Result<Self> {
        // (1) name -> temporary id; id 0 is the root
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut names: Vec<&str> = vec![root];
        let mut branch_lengths: Vec<f64> = vec![0.0];
        ids.insert(root, 0);
        for record in records {
            if ids.contains_key(record.name.as_str()) {
                return Err(Error::DuplicateNode {
                    name: record.name.clone(),
                });
            }
            if !(record.branch_length >= 0.0) {
                return Err(Error::NegativeParameter {
                    name: "branch length",
                    value: record.branch_length,
                });
            }
            ids.insert(&record.name, names.len());
            names.push(&record.name);
            branch_lengths.push(record.branch_length);
        }

        // (2) link children to parents
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
        for record in records {
            let parent = ids.get(record.parent.as_str()).ok_or_else(|| {
                Error::malformed(format!(
                    "parent `{}` of node `{}` is not defined",
                    record.parent, record.name
                ))
            })?;
            children[*parent].push(ids[record.name.as_str()]);
        }
        for (id, cs) in children.iter_mut().enumerate() {
            match cs.len() {
                0 | 2 => cs.sort_by_key(|&c| names[c]),
                n => {
                    return Err(Error::malformed(format!(
                        "node `{}` has {} children (expected 0 or 2)",
                        names[id], n
                    )))
                }
            }
        }

        // (3) breadth-first order from the root, assigned to descending positions
        let n = names.len();
        let mut bfs: Vec<usize> = Vec::with_capacity(n);
        let mut queue = VecDeque::new();
        queue.push_back(0);
        while let Some(id) = queue.pop_front() {
            bfs.push(id);
            queue.extend(children[id].iter().copied());
        }
        if bfs.len() != n {
            return Err(Error::malformed(format!(
                "{} of {} nodes are not reachable from root `{}`",
                n - bfs.len(),
                n,
                root
            )));
        }
        let mut position = vec![0; n];
        for (i, &id) in bfs.iter().enumerate() {
            position[id] = n - 1 - i;
        }

        // (4) arena in position order
        let nodes: Vec<Node> = bfs
            .iter()
            .rev()
            .map(|&id| Node {
                name: names[id].to_string(),
                branch_length: branch_lengths[id],
                children: match children[id].as_slice() {
                    [l, r] => Some((position[*l], position[*r])),
                    _ => None,
                },
                position: position[id],
            })
            .collect();
        debug!("tree with {} nodes rooted at `{}`", n, root);
        Ok(PhylogeneticTree { nodes })
    }
    ///
    /// Node at `position` of the traversal order
    ///
    pub fn get(&self, position: usize) -> Result<&Node> {
        self.nodes.get(position).ok_or(Error::OutOfRange {
            position,
            size: self.size(),
        })
    }
    ///
    /// Total number of nodes (not only leaves)
    ///
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
    pub fn root(&self) -> &Node {
        // the root record always exists
        &self.nodes[self.nodes.len() - 1]
    }
    ///
    /// Nodes in traversal order (children before parents)
    ///
    pub fn nodes(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_leaf())
    }
    pub fn n_leaves(&self) -> usize {
        self.leaves().count()
    }
}

impl std::fmt::Display for PhylogeneticTree {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for node in self.nodes() {
            match node.children() {
                Some((l, r)) => writeln!(
                    f,
                    "{}\t{}\t{}\t({}, {})",
                    node.position(),
                    node.name(),
                    node.branch_length(),
                    l,
                    r
                )?,
                None => writeln!(
                    f,
                    "{}\t{}\t{}\tleaf",
                    node.position(),
                    node.name(),
                    node.branch_length()
                )?,
            }
        }
        Ok(())
    }
}
