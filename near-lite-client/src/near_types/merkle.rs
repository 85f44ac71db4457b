use super::hash::{combine_hash, CryptoHash};
use alloc::{vec, vec::Vec};
use borsh::{BorshDeserialize, BorshSerialize};

/// Hash used by a struct implementing the Merkle tree.
pub type MerkleHash = CryptoHash;

/// Which side of the fold the sibling hash sits on. The tag byte values
/// (0 = Left, 1 = Right) are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MerklePathItem {
    pub hash: MerkleHash,
    pub direction: Direction,
}

pub type MerklePath = Vec<MerklePathItem>;

/// Folds a merkle path over an item hash, yielding the root the path
/// commits to. An empty path returns the item hash unchanged.
pub fn compute_root_from_path(path: &MerklePath, item_hash: MerkleHash) -> MerkleHash {
    let mut res = item_hash;
    for item in path {
        match item.direction {
            Direction::Left => {
                res = combine_hash(&item.hash, &res);
            }
            Direction::Right => {
                res = combine_hash(&res, &item.hash);
            }
        }
    }
    res
}

/// Verify that the given item hash belongs to the tree with the given root.
pub fn verify_hash(root: MerkleHash, path: &MerklePath, item_hash: MerkleHash) -> bool {
    compute_root_from_path(path, item_hash) == root
}

/// Verify the merkle path for the given item against the root.
pub fn verify_path<T: BorshSerialize>(root: MerkleHash, path: &MerklePath, item: &T) -> bool {
    verify_hash(root, path, CryptoHash::hash_borsh(item))
}

/// Merklize an array of items, returning the root together with one path
/// per item. If the array is empty, returns the zero hash.
///
/// Levels are built by pairing adjacent nodes; an unpaired trailing node is
/// promoted unchanged, matching the full node's tree shape for non-power-of-
/// two sizes.
pub fn merklize<T: BorshSerialize>(arr: &[T]) -> (MerkleHash, Vec<MerklePath>) {
    if arr.is_empty() {
        return (MerkleHash::default(), vec![]);
    }
    let mut paths: Vec<MerklePath> = vec![Vec::new(); arr.len()];
    // Each node carries the indices of the leaves below it, so sibling
    // hashes can be appended to exactly those leaves' paths.
    let mut level: Vec<(MerkleHash, Vec<usize>)> = arr
        .iter()
        .enumerate()
        .map(|(index, item)| (CryptoHash::hash_borsh(item), vec![index]))
        .collect();
    while level.len() > 1 {
        let mut next_level = Vec::with_capacity((level.len() + 1) / 2);
        for pair in level.chunks(2) {
            match pair {
                [(left_hash, left_leaves), (right_hash, right_leaves)] => {
                    for index in left_leaves {
                        paths[*index].push(MerklePathItem {
                            hash: *right_hash,
                            direction: Direction::Right,
                        });
                    }
                    for index in right_leaves {
                        paths[*index].push(MerklePathItem {
                            hash: *left_hash,
                            direction: Direction::Left,
                        });
                    }
                    let mut leaves = left_leaves.clone();
                    leaves.extend_from_slice(right_leaves);
                    next_level.push((combine_hash(left_hash, right_hash), leaves));
                }
                [unpaired] => next_level.push(unpaired.clone()),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            }
        }
        level = next_level;
    }
    (level[0].0, paths)
}
