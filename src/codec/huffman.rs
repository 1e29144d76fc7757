//! Huffman prefix-code compression.
//!
//! Encoding builds a prefix-code tree from the input's symbol frequencies,
//! replaces each byte with its root-to-leaf path (`0` = left, `1` = right),
//! pads the bit stream to a byte boundary, and serializes a self-contained
//! block holding the tree shape, the padding count, and the packed payload.
//! Decoding rebuilds the tree from the block and walks it bit by bit.
//!
//! Tree construction is fully deterministic: leaves are seeded into the
//! priority queue in ascending byte order, and ties between equal
//! frequencies are broken by insertion sequence (earlier node wins). The
//! same input therefore always produces the same block.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bitvec::prelude::*;

use crate::codec::frequency::{self, FrequencyTable};
use crate::codec::ByteReader;
use crate::error::{Error, Result};

const BLOCK_VERSION: u8 = 1;

/// A sequence of code bits, most significant bit first.
pub type CodeBits = BitVec<u8, Msb0>;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf(u8),
    /// Child arena indices, left then right.
    Internal(usize, usize),
}

#[derive(Debug, Clone, Copy)]
struct Node {
    freq: u64,
    kind: NodeKind,
}

/// A Huffman tree stored as an arena of nodes addressed by index.
///
/// No node holds a reference to another; children are plain indices into
/// the arena. Every internal node has exactly two children and its
/// frequency equals the sum of its children's frequencies.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build a tree from a frequency table by repeatedly merging the two
    /// lowest-frequency nodes until one root remains.
    ///
    /// The table is guaranteed non-empty by [`frequency::analyze`].
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        let mut nodes = Vec::new();
        // The heap orders by (frequency, insertion sequence); the arena
        // index doubles as the sequence number, so ties always resolve to
        // the earlier-created node.
        let mut heap = BinaryHeap::new();
        for (symbol, count) in table.symbols() {
            nodes.push(Node {
                freq: count,
                kind: NodeKind::Leaf(symbol),
            });
            heap.push(Reverse((count, nodes.len() - 1)));
        }
        while heap.len() > 1 {
            let Reverse((left_freq, left)) = heap.pop().expect("heap has >1 node");
            let Reverse((right_freq, right)) = heap.pop().expect("heap has >1 node");
            nodes.push(Node {
                freq: left_freq + right_freq,
                kind: NodeKind::Internal(left, right),
            });
            heap.push(Reverse((left_freq + right_freq, nodes.len() - 1)));
        }
        let root = nodes.len() - 1;
        HuffmanTree { nodes, root }
    }

    /// Derive the code table: for each symbol present in the tree, the bit
    /// path from the root to its leaf.
    ///
    /// A degenerate single-leaf tree assigns the code `0` (length 1) so the
    /// encoded stream still consumes one bit per symbol and decoding
    /// terminates.
    pub fn codes(&self) -> Vec<Option<CodeBits>> {
        let mut table: Vec<Option<CodeBits>> = vec![None; 256];
        if let NodeKind::Leaf(symbol) = self.nodes[self.root].kind {
            let mut code = CodeBits::new();
            code.push(false);
            table[symbol as usize] = Some(code);
            return table;
        }
        let mut stack = vec![(self.root, CodeBits::new())];
        while let Some((idx, path)) = stack.pop() {
            match self.nodes[idx].kind {
                NodeKind::Leaf(symbol) => {
                    table[symbol as usize] = Some(path);
                }
                NodeKind::Internal(left, right) => {
                    let mut left_path = path.clone();
                    left_path.push(false);
                    stack.push((left, left_path));
                    let mut right_path = path;
                    right_path.push(true);
                    stack.push((right, right_path));
                }
            }
        }
        table
    }

    /// Serialize the tree shape pre-order: `1` + 8 symbol bits for a leaf,
    /// `0` followed by both subtrees for an internal node.
    fn write_shape(&self, idx: usize, bits: &mut CodeBits) {
        match self.nodes[idx].kind {
            NodeKind::Leaf(symbol) => {
                bits.push(true);
                bits.extend_from_bitslice(symbol.view_bits::<Msb0>());
            }
            NodeKind::Internal(left, right) => {
                bits.push(false);
                self.write_shape(left, bits);
                self.write_shape(right, bits);
            }
        }
    }

    /// Rebuild a tree from its pre-order shape stream. Frequencies are not
    /// persisted; decoding needs only the structure.
    fn read_shape(bits: &BitSlice<u8, Msb0>) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut pos = 0usize;
        let root = Self::read_node(bits, &mut pos, &mut nodes, 0)?;
        Ok(HuffmanTree { nodes, root })
    }

    fn read_node(
        bits: &BitSlice<u8, Msb0>,
        pos: &mut usize,
        nodes: &mut Vec<Node>,
        depth: usize,
    ) -> Result<usize> {
        // A tree over at most 256 leaves never exceeds depth 255 or 511
        // nodes; anything deeper is corrupt and would only recurse.
        if depth > 255 || nodes.len() >= 511 {
            return Err(Error::InvalidBlock("huffman tree too large".to_string()));
        }
        let is_leaf = *bits
            .get(*pos)
            .ok_or_else(|| Error::InvalidBlock("truncated huffman tree".to_string()))?;
        *pos += 1;
        if is_leaf {
            if *pos + 8 > bits.len() {
                return Err(Error::InvalidBlock("truncated huffman tree".to_string()));
            }
            let symbol: u8 = bits[*pos..*pos + 8].load_be();
            *pos += 8;
            nodes.push(Node {
                freq: 0,
                kind: NodeKind::Leaf(symbol),
            });
        } else {
            let left = Self::read_node(bits, pos, nodes, depth + 1)?;
            let right = Self::read_node(bits, pos, nodes, depth + 1)?;
            nodes.push(Node {
                freq: 0,
                kind: NodeKind::Internal(left, right),
            });
        }
        Ok(nodes.len() - 1)
    }
}

/// Compress `input` into a self-contained Huffman block.
///
/// Block layout (version 1, all integers little-endian):
/// version `u8`, padding bit count `u8` (0..=7), tree byte length `u16`,
/// tree shape bytes, payload byte length `u32`, packed payload bytes.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `input` is empty.
///
/// # Example
///
/// ```
/// use bale::codec::huffman;
///
/// let block = huffman::encode(b"huffman coding in rust").unwrap();
/// let decoded = huffman::decode(&block).unwrap();
/// assert_eq!(decoded, b"huffman coding in rust");
/// ```
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let table = frequency::analyze(input)?;
    let tree = HuffmanTree::from_frequencies(&table);
    let codes = tree.codes();

    let mut payload = CodeBits::new();
    for &b in input {
        let code = codes[b as usize]
            .as_ref()
            .expect("every input symbol has a code");
        payload.extend_from_bitslice(code);
    }
    let padding = (8 - payload.len() % 8) % 8;
    for _ in 0..padding {
        payload.push(false);
    }

    let mut shape = CodeBits::new();
    tree.write_shape(tree.root, &mut shape);
    while shape.len() % 8 != 0 {
        shape.push(false);
    }
    let shape_bytes = shape.into_vec();
    let payload_bytes = payload.into_vec();
    let payload_len = u32::try_from(payload_bytes.len())
        .map_err(|_| Error::InvalidBlock("payload exceeds block limit".to_string()))?;

    let mut block = Vec::with_capacity(8 + shape_bytes.len() + payload_bytes.len());
    block.push(BLOCK_VERSION);
    block.push(padding as u8);
    block.extend_from_slice(&(shape_bytes.len() as u16).to_le_bytes());
    block.extend_from_slice(&shape_bytes);
    block.extend_from_slice(&payload_len.to_le_bytes());
    block.extend_from_slice(&payload_bytes);
    Ok(block)
}

/// Decompress a block produced by [`encode`].
///
/// # Errors
///
/// Returns [`Error::InvalidBlock`] if the block is truncated, carries an
/// unknown version, or its bit stream does not end on a code boundary.
pub fn decode(block: &[u8]) -> Result<Vec<u8>> {
    let mut reader = ByteReader::new(block);
    let version = reader.u8()?;
    if version != BLOCK_VERSION {
        return Err(Error::InvalidBlock(format!(
            "unknown huffman block version {version}"
        )));
    }
    let padding = reader.u8()? as usize;
    if padding > 7 {
        return Err(Error::InvalidBlock(format!(
            "padding bit count {padding} out of range"
        )));
    }
    let shape_len = reader.u16_le()? as usize;
    let shape_bytes = reader.bytes(shape_len)?;
    let tree = HuffmanTree::read_shape(shape_bytes.view_bits::<Msb0>())?;
    let payload_len = reader.u32_le()? as usize;
    let payload = reader.bytes(payload_len)?;
    reader.finish()?;

    let bits = payload.view_bits::<Msb0>();
    if padding > bits.len() {
        return Err(Error::InvalidBlock(
            "padding exceeds payload length".to_string(),
        ));
    }
    let data_bits = &bits[..bits.len() - padding];

    // Degenerate tree: one leaf, one bit per symbol.
    if let NodeKind::Leaf(symbol) = tree.nodes[tree.root].kind {
        return Ok(vec![symbol; data_bits.len()]);
    }

    let mut output = Vec::new();
    let mut current = tree.root;
    for bit in data_bits.iter().by_vals() {
        if let NodeKind::Internal(left, right) = tree.nodes[current].kind {
            current = if bit { right } else { left };
        }
        if let NodeKind::Leaf(symbol) = tree.nodes[current].kind {
            output.push(symbol);
            current = tree.root;
        }
    }
    if current != tree.root {
        return Err(Error::InvalidBlock(
            "bit stream ends mid-code".to_string(),
        ));
    }
    Ok(output)
}
