//! Linear-fragment fingerprints.
//!
//! A structure is decomposed into simple paths ("chains") of bounded
//! length; each chain's alternating atom/bond key sequence is hashed
//! into a fixed-length bit vector for similarity search. Fragment
//! multiplicity contributes extra bits, up to `bit_pairs` per fragment,
//! so two structures sharing a fragment at different counts still
//! intersect in bit space.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{Hash, Hasher};

use petgraph::graph::{NodeIndex, UnGraph};

/// Graph view consumed by the fingerprinter.
///
/// Atoms are addressed as `0..atom_count()`. Keys must be stable,
/// content-derived invariants: equal atoms (or bonds) must produce
/// equal keys across runs.
pub trait FragmentGraph {
    fn atom_count(&self) -> usize;
    fn atom_key(&self, atom: usize) -> u64;
    fn bond_key(&self, a: usize, b: usize) -> u64;
    fn neighbors(&self, atom: usize) -> Vec<usize>;
}

impl<A: Hash, B: Hash> FragmentGraph for UnGraph<A, B> {
    fn atom_count(&self) -> usize {
        self.node_count()
    }

    fn atom_key(&self, atom: usize) -> u64 {
        stable_hash(&self[NodeIndex::new(atom)])
    }

    fn bond_key(&self, a: usize, b: usize) -> u64 {
        match self.find_edge(NodeIndex::new(a), NodeIndex::new(b)) {
            Some(edge) => stable_hash(&self[edge]),
            None => 0,
        }
    }

    fn neighbors(&self, atom: usize) -> Vec<usize> {
        self.neighbors(NodeIndex::new(atom))
            .map(|n| n.index())
            .collect()
    }
}

/// Linear fingerprint parameters.
#[derive(Debug, Clone)]
pub struct LinearFingerprint {
    min_length: usize,
    max_length: usize,
    length: usize,
    active_bits: u32,
    bit_pairs: usize,
}

impl Default for LinearFingerprint {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 4,
            length: 1024,
            active_bits: 2,
            bit_pairs: 4,
        }
    }
}

impl LinearFingerprint {
    /// # Panics
    ///
    /// `length` must be a power of two, `active_bits` at least one and
    /// `1 <= min_length <= max_length`.
    pub fn new(
        min_length: usize,
        max_length: usize,
        length: usize,
        active_bits: u32,
        bit_pairs: usize,
    ) -> Self {
        assert!(length.is_power_of_two(), "length must be a power of two");
        assert!(active_bits >= 1, "at least one active bit per fragment");
        assert!(
            (1..=max_length).contains(&min_length),
            "need 1 <= min_length <= max_length"
        );
        Self {
            min_length,
            max_length,
            length,
            active_bits,
            bit_pairs,
        }
    }

    /// Binary feature vector: `length` entries, each 0 or 1.
    pub fn fingerprint<G: FragmentGraph>(&self, graph: &G) -> Vec<u8> {
        let mut features = vec![0u8; self.length];
        for bit in self.bit_set(graph) {
            features[bit] = 1;
        }
        features
    }

    /// Indices of the active bits.
    pub fn bit_set<G: FragmentGraph>(&self, graph: &G) -> BTreeSet<usize> {
        let mask = (self.length - 1) as u64;
        let log = self.length.trailing_zeros();
        let mut bits = BTreeSet::new();
        for mut hash in self.hash_set(graph) {
            bits.insert((hash & mask) as usize);
            for _ in 1..self.active_bits {
                hash >>= log;
                bits.insert((hash & mask) as usize);
            }
        }
        bits
    }

    /// Count-sensitive fragment hashes: each fragment contributes one
    /// hash per occurrence, capped at `bit_pairs`.
    pub fn hash_set<G: FragmentGraph>(&self, graph: &G) -> HashSet<u64> {
        let mut hashes = HashSet::new();
        for (descriptor, count) in self.fragments(graph) {
            for occurrence in 0..count.min(self.bit_pairs) {
                let mut hasher = Fnv1aHasher::new();
                descriptor.hash(&mut hasher);
                (occurrence as u64).hash(&mut hasher);
                hashes.insert(hasher.finish());
            }
        }
        hashes
    }

    /// Direction-canonical fragment descriptors with their occurrence
    /// counts.
    pub fn fragments<G: FragmentGraph>(&self, graph: &G) -> HashMap<Vec<u64>, usize> {
        let mut out = HashMap::new();
        for chain in self.chains(graph) {
            *out.entry(descriptor(graph, &chain)).or_insert(0) += 1;
        }
        out
    }

    /// Simple paths of `min_length..=max_length` atoms, deduplicated by
    /// direction.
    fn chains<G: FragmentGraph>(&self, graph: &G) -> HashSet<Vec<usize>> {
        let mut found: HashSet<Vec<usize>> = HashSet::new();
        let mut queue: VecDeque<Vec<usize>> = VecDeque::new();

        if self.min_length == 1 {
            for atom in 0..graph.atom_count() {
                found.insert(vec![atom]);
            }
            if self.max_length == 1 {
                return found;
            }
            queue.extend(found.iter().cloned());
        } else {
            queue.extend((0..graph.atom_count()).map(|atom| vec![atom]));
        }

        while let Some(path) = queue.pop_front() {
            let last = *path.last().expect("queued paths are non-empty");
            let extended: Vec<Vec<usize>> = graph
                .neighbors(last)
                .into_iter()
                .filter(|next| !path.contains(next))
                .map(|next| {
                    let mut longer = path.clone();
                    longer.push(next);
                    longer
                })
                .collect();
            if extended.is_empty() {
                continue;
            }
            let atoms = extended[0].len();
            if atoms < self.max_length {
                queue.extend(extended.iter().cloned());
            }
            if atoms >= self.min_length {
                for chain in extended {
                    let mut reversed = chain.clone();
                    reversed.reverse();
                    found.insert(if chain > reversed { chain } else { reversed });
                }
            }
        }
        found
    }
}

/// Alternating atom/bond key sequence of a chain, canonicalized to the
/// greater of the two read directions.
fn descriptor<G: FragmentGraph>(graph: &G, chain: &[usize]) -> Vec<u64> {
    let mut keys = Vec::with_capacity(chain.len() * 2 - 1);
    keys.push(graph.atom_key(chain[0]));
    for pair in chain.windows(2) {
        keys.push(graph.bond_key(pair[0], pair[1]));
        keys.push(graph.atom_key(pair[1]));
    }
    let mut reversed = keys.clone();
    reversed.reverse();
    if keys <= reversed {
        reversed
    } else {
        keys
    }
}

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x100000001b3);
        }
    }
}

fn stable_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = Fnv1aHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
