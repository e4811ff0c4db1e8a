//! Huffman coding over the 15-bit packed board symbols.
//!
//! The tree is trained on a packed buffer (see `pack`), travels on the wire
//! as a pre-order topology blob with inline leaf symbols, and decodes the
//! payload it encoded.  Nodes live in an arena and refer to each other by
//! index, so parent links cost nothing to keep; code assignment climbs the
//! parent chain while traversal uses an explicit stack.
//!
//! Topology blob, bit by bit: an internal node contributes a single `0`,
//! a leaf contributes 16 bits `(symbol << 1) | 1`.  With `L` leaves the
//! blob is `17L - 1` bits.  The payload is the concatenation of leaf codes
//! in stream order; within one symbol's slot the root edge is the first
//! bit the decoder reads, and an edge to a second child reads as `1`.
//!
//! Ties in the frequency queue resolve by insertion order, and symbol
//! iteration order is not canonical, so two encoders may legally build
//! different trees from the same input.  Only the transmitted tree matters;
//! round-trip equality is the invariant, not byte equality.

use std::cmp::{Ordering,Reverse};
use std::collections::{BinaryHeap,HashMap};
use crate::tools::bits::{BitReader,BitWriter};
use crate::Error;

/// width of one packed board symbol
const SYMBOL_BITS: usize = 15;

#[derive(Clone,Debug)]
struct Node {
    symbol: Option<u16>,
    parent: Option<usize>,
    children: [Option<usize>;2]
}

/// queue entry for the tree build; `seq` breaks frequency ties
#[derive(PartialEq,Eq)]
struct QueueEntry {
    freq: u64,
    seq: usize,
    node: usize
}

impl Ord for QueueEntry {
    fn cmp(&self,other: &Self) -> Ordering {
        self.freq.cmp(&other.freq).then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self,other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<usize>,
    /// map from symbol to its leaf's arena index
    leaves: HashMap<u16,usize>
}

impl HuffmanTree {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: HashMap::new()
        }
    }
    fn add_node(&mut self,symbol: Option<u16>) -> usize {
        self.nodes.push(Node {
            symbol,
            parent: None,
            children: [None,None]
        });
        self.nodes.len() - 1
    }
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }
    /// Train a tree on a packed buffer.  Every non-overlapping 15-bit
    /// window that fully fits contributes one count; a buffer with no
    /// complete symbol yields an empty tree.
    pub fn build(packed: &[u8]) -> Self {
        let mut freq: HashMap<u16,u64> = HashMap::new();
        let mut reader = BitReader::from_bytes(packed);
        while let Some(symbol) = reader.get_lsb(SYMBOL_BITS) {
            *freq.entry(symbol).or_insert(0) += 1;
        }
        let mut tree = Self::empty();
        let mut heap: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();
        let mut seq: usize = 0;
        for (symbol,count) in freq {
            let leaf = tree.add_node(Some(symbol));
            tree.leaves.insert(symbol,leaf);
            heap.push(Reverse(QueueEntry { freq: count, seq, node: leaf }));
            seq += 1;
        }
        while heap.len() > 1 {
            let Reverse(first) = heap.pop().unwrap();
            let Reverse(second) = heap.pop().unwrap();
            let parent = tree.add_node(None);
            tree.nodes[parent].children = [Some(first.node),Some(second.node)];
            tree.nodes[first.node].parent = Some(parent);
            tree.nodes[second.node].parent = Some(parent);
            heap.push(Reverse(QueueEntry { freq: first.freq + second.freq, seq, node: parent }));
            seq += 1;
        }
        if let Some(Reverse(top)) = heap.pop() {
            tree.root = Some(top.node);
        }
        tree
    }
    /// Serialize the topology in pre-order.
    pub fn serialize(&self) -> Vec<u8> {
        let mut writer = BitWriter::new();
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        while let Some(idx) = stack.pop() {
            if let [Some(first),Some(second)] = self.nodes[idx].children {
                writer.push(false);
                stack.push(second);
                stack.push(first);
            } else if let Some(symbol) = self.nodes[idx].symbol {
                writer.push_lsb(symbol << 1 | 1,16);
            }
        }
        writer.into_bytes()
    }
    /// Rebuild a tree from its topology blob.  The walker descends into
    /// fresh internal nodes and after each leaf climbs until it finds a
    /// node still missing its second child; when none exists the tree is
    /// complete and any trailing pad bits are ignored.
    pub fn deserialize(blob: &[u8]) -> Result<Self,Error> {
        let mut tree = Self::empty();
        let mut reader = BitReader::from_bytes(blob);
        let mut open: Option<usize> = None;
        while let Some(bit) = reader.get_bit() {
            let node = match bit {
                true => {
                    let symbol = reader.get_lsb(SYMBOL_BITS).ok_or(Error::TruncatedBuffer)?;
                    let leaf = tree.add_node(Some(symbol));
                    tree.leaves.insert(symbol,leaf);
                    leaf
                },
                false => tree.add_node(None)
            };
            match open {
                None => tree.root = Some(node),
                Some(parent) => {
                    tree.nodes[node].parent = Some(parent);
                    if tree.nodes[parent].children[0].is_none() {
                        tree.nodes[parent].children[0] = Some(node);
                    } else {
                        tree.nodes[parent].children[1] = Some(node);
                    }
                }
            }
            if !bit {
                open = Some(node);
            } else {
                let mut cursor = open;
                while let Some(idx) = cursor {
                    if tree.nodes[idx].children[1].is_none() {
                        break;
                    }
                    cursor = tree.nodes[idx].parent;
                }
                open = cursor;
                if open.is_none() {
                    break;
                }
            }
        }
        Ok(tree)
    }
    /// Entropy-code a packed buffer against this tree.  Fails with
    /// `UnknownSymbol` if the buffer contains a symbol the tree was not
    /// trained on.  A lone-leaf tree emits an empty payload.
    pub fn encode(&self,packed: &[u8]) -> Result<Vec<u8>,Error> {
        let mut writer = BitWriter::new();
        let mut reader = BitReader::from_bytes(packed);
        let mut path = Vec::new();
        while let Some(symbol) = reader.get_lsb(SYMBOL_BITS) {
            let leaf = *self.leaves.get(&symbol).ok_or(Error::UnknownSymbol)?;
            path.clear();
            let mut cursor = leaf;
            while let Some(parent) = self.nodes[cursor].parent {
                path.push(self.nodes[parent].children[1] == Some(cursor));
                cursor = parent;
            }
            // the path was collected leaf to root, the stream wants the
            // root edge first
            for bit in path.iter().rev() {
                writer.push(*bit);
            }
        }
        Ok(writer.into_bytes())
    }
    /// Decode up to `board_count` symbols back into a packed buffer.  A
    /// lone-leaf tree ignores the payload and repeats its symbol.  Stops
    /// early if the payload runs out of bits; the caller detects the
    /// shortfall when unpacking.
    pub fn decode(&self,payload: &[u8],board_count: usize) -> Vec<u8> {
        let mut writer = BitWriter::new();
        let root = match self.root {
            Some(root) => root,
            None => return Vec::new()
        };
        if let Some(symbol) = self.nodes[root].symbol {
            for _i in 0..board_count {
                writer.push_lsb(symbol,SYMBOL_BITS);
            }
            return writer.into_bytes();
        }
        let mut reader = BitReader::from_bytes(payload);
        let mut remaining = board_count;
        let mut cursor = root;
        while remaining > 0 {
            let bit = match reader.get_bit() {
                Some(bit) => bit,
                None => break
            };
            cursor = match self.nodes[cursor].children[bit as usize] {
                Some(next) => next,
                None => break
            };
            if let Some(symbol) = self.nodes[cursor].symbol {
                writer.push_lsb(symbol,SYMBOL_BITS);
                remaining -= 1;
                cursor = root;
            }
        }
        writer.into_bytes()
    }
    fn subtree_eq(&self,a: Option<usize>,other: &Self,b: Option<usize>) -> bool {
        match (a,b) {
            (None,None) => true,
            (Some(x),Some(y)) => {
                let (nx,ny) = (&self.nodes[x],&other.nodes[y]);
                nx.symbol == ny.symbol
                    && self.subtree_eq(nx.children[0],other,ny.children[0])
                    && self.subtree_eq(nx.children[1],other,ny.children[1])
            },
            _ => false
        }
    }
}

impl PartialEq for HuffmanTree {
    /// structural equality: same shape, same leaf symbols in the same places
    fn eq(&self,other: &Self) -> bool {
        self.subtree_eq(self.root,other,other.root)
    }
}

#[cfg(test)]
use crate::board::{Board,Square};
#[cfg(test)]
use crate::pack::pack;

#[cfg(test)]
fn sample_boards() -> Vec<Board> {
    let empty = Board::default();
    let full_x = Board { squares: [[Square::X;3];3] };
    let mut mixed = Board::default();
    mixed.squares[0][0] = Square::X;
    mixed.squares[1][1] = Square::O;
    // skewed frequencies so the tree has depth
    let mut boards = vec![empty;8];
    boards.extend(vec![mixed;3]);
    boards.push(full_x);
    boards
}

#[test]
fn payload_round_trip() {
    let packed = pack(&sample_boards());
    let tree = HuffmanTree::build(&packed);
    assert_eq!(tree.leaf_count(),3);
    let payload = tree.encode(&packed).expect("encoding failed");
    assert_eq!(tree.decode(&payload,12),packed);
}

#[test]
fn tree_round_trip() {
    let packed = pack(&sample_boards());
    let tree = HuffmanTree::build(&packed);
    let blob = tree.serialize();
    // 17L-1 bits rounded up
    assert_eq!(blob.len(),(17 * tree.leaf_count() - 1 + 7) / 8);
    let rebuilt = HuffmanTree::deserialize(&blob).expect("deserialization failed");
    assert_eq!(rebuilt,tree);
    // the rebuilt tree must decode what the original encoded
    let payload = tree.encode(&packed).expect("encoding failed");
    assert_eq!(rebuilt.decode(&payload,12),packed);
}

#[test]
fn single_symbol() {
    let packed = pack(&vec![Board::default();500]);
    let tree = HuffmanTree::build(&packed);
    assert_eq!(tree.leaf_count(),1);
    // lone leaf: 16-bit blob, no payload
    let blob = tree.serialize();
    assert_eq!(blob,hex::decode("638c").unwrap());
    let payload = tree.encode(&packed).expect("encoding failed");
    assert_eq!(payload.len(),0);
    let rebuilt = HuffmanTree::deserialize(&blob).expect("deserialization failed");
    assert_eq!(rebuilt.decode(&payload,500),packed);
}

#[test]
fn empty_stream() {
    let tree = HuffmanTree::build(&[]);
    assert_eq!(tree.leaf_count(),0);
    assert_eq!(tree.serialize(),Vec::<u8>::new());
    assert_eq!(tree.encode(&[]),Ok(Vec::new()));
    assert_eq!(tree.decode(&[],0),Vec::<u8>::new());
}

#[test]
fn unknown_symbol() {
    let packed = pack(&[Board::default()]);
    let tree = HuffmanTree::build(&packed);
    let foreign = pack(&[Board { squares: [[Square::X;3];3] }]);
    assert_eq!(tree.encode(&foreign),Err(Error::UnknownSymbol));
}

#[test]
fn two_symbol_codes_are_one_bit() {
    let mut boards = vec![Board::default();10];
    boards.extend(vec![Board { squares: [[Square::X;3];3] };6]);
    let packed = pack(&boards);
    let tree = HuffmanTree::build(&packed);
    assert_eq!(tree.leaf_count(),2);
    let payload = tree.encode(&packed).expect("encoding failed");
    // one bit per board
    assert_eq!(payload.len(),2);
    assert_eq!(tree.decode(&payload,16),packed);
}

#[test]
fn decode_stops_on_exhausted_payload() {
    let packed = pack(&sample_boards());
    let tree = HuffmanTree::build(&packed);
    let payload = tree.encode(&packed).expect("encoding failed");
    let short = tree.decode(&payload[..1],12);
    assert!(short.len() < packed.len());
}
