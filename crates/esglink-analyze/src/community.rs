//! Connected components and community detection.
//!
//! Both treat the graph as undirected: edge direction carries semantic
//! meaning (who reports on what) but no structural weight.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::view::GraphView;

/// Union-find with path compression and union by rank.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
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
}

/// Number of weakly connected components. Isolated nodes count as
/// components of their own.
pub fn component_count(view: &GraphView<'_>) -> usize {
    let mut uf = UnionFind::new(view.len());
    for idx in 0..view.len() {
        for arc in view.outgoing(idx) {
            uf.union(idx, arc.peer);
        }
    }
    let roots: HashSet<usize> = (0..view.len()).map(|i| uf.find(i)).collect();
    roots.len()
}

/// Greedy modularity maximization (CNM-style agglomeration).
///
/// Modularity is computed over the undirected simple projection of the
/// graph: parallel and reciprocal arcs collapse into one edge and
/// self-loops drop, so multi-relational pairs do not weigh heavier than
/// single-relation ones. Starting with every node in its own community,
/// the pair with the largest modularity gain
/// `ΔQ = l_uv/m − d_u·d_v/(2m²)` merges until no merge improves
/// modularity. Returns communities as name lists, largest first, names
/// sorted within each community. An edgeless graph has no communities.
pub fn greedy_modularity_communities(view: &GraphView<'_>) -> Vec<Vec<String>> {
    let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
    for idx in 0..view.len() {
        for arc in view.outgoing(idx) {
            if idx != arc.peer {
                pairs.insert(pair(idx, arc.peer));
            }
        }
    }
    if pairs.is_empty() {
        return Vec::new();
    }
    let m = pairs.len() as f64;

    // community id -> member node indices
    let mut members: BTreeMap<usize, Vec<usize>> = (0..view.len()).map(|i| (i, vec![i])).collect();
    // community id -> total projected degree of members
    let mut degree: BTreeMap<usize, f64> = (0..view.len()).map(|i| (i, 0.0)).collect();
    // unordered community pair -> number of projected edges between them
    let mut links: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for &(a, b) in &pairs {
        *degree.entry(a).or_default() += 1.0;
        *degree.entry(b).or_default() += 1.0;
        links.insert((a, b), 1.0);
    }

    loop {
        let mut best: Option<((usize, usize), f64)> = None;
        for (&(a, b), &l_ab) in &links {
            let (da, db) = (
                degree.get(&a).copied().unwrap_or_default(),
                degree.get(&b).copied().unwrap_or_default(),
            );
            let dq = l_ab / m - da * db / (2.0 * m * m);
            if best.map_or(true, |(_, q)| dq > q) {
                best = Some(((a, b), dq));
            }
        }
        let Some(((a, b), dq)) = best else { break };
        if dq <= 0.0 {
            break;
        }

        // Merge b into a.
        let moved = members.remove(&b).unwrap_or_default();
        members.entry(a).or_default().extend(moved);
        let db = degree.remove(&b).unwrap_or_default();
        *degree.entry(a).or_default() += db;

        // Rewire b's links to a.
        let stale: Vec<(usize, usize)> = links
            .keys()
            .filter(|&&(x, y)| x == b || y == b)
            .copied()
            .collect();
        for key in stale {
            let weight = links.remove(&key).unwrap_or_default();
            let other = if key.0 == b { key.1 } else { key.0 };
            if other == a {
                continue; // internalized
            }
            *links.entry(pair(a, other)).or_default() += weight;
        }
    }

    let mut communities: Vec<Vec<String>> = members
        .into_values()
        .map(|mut idxs| {
            idxs.sort();
            idxs.into_iter().map(|i| view.name(i).to_string()).collect()
        })
        .collect();
    for community in &mut communities {
        community.sort();
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    communities
}

fn pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
