use crate::{error::CodecError, frequency::FrequencyTable};

use super::{code_table::{Code, CodeTable}, serialization, HuffmanNode, HuffmanTree, MAX_TREE_HEIGHT};

fn tree_of(input: &[u8]) -> HuffmanTree {
    HuffmanTree::build(&FrequencyTable::count(input)).unwrap()
}

#[test]
fn test_build_empty_table() {
    assert_eq!(HuffmanTree::build(&FrequencyTable::new()), Err(CodecError::EmptyInput));
}

#[test]
fn test_build_single_symbol() {
    let tree = tree_of(b"zzzz");
    assert_eq!(tree.root(), &HuffmanNode::leaf(b'z', 4));
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.height(), 0);
}

#[test]
fn test_build_two_symbols_tie_break() {
    // Equal weights: the smaller symbol is seeded first and extracted first.
    let tree = tree_of(b"ba");
    assert_eq!(
        tree.root(),
        &HuffmanNode::merge(HuffmanNode::leaf(b'a', 1), HuffmanNode::leaf(b'b', 1))
    );
}

#[test]
fn test_build_known_shape() {
    // a:1 b:1 c:2 d:4. Leaf c was queued before the merged (a, b) node and
    // leaf d before the merged (c, ab) node, so both win their ties.
    let tree = tree_of(b"abccdddd");
    let ab = HuffmanNode::merge(HuffmanNode::leaf(b'a', 1), HuffmanNode::leaf(b'b', 1));
    let c_ab = HuffmanNode::merge(HuffmanNode::leaf(b'c', 2), ab);
    let expected = HuffmanNode::merge(HuffmanNode::leaf(b'd', 4), c_ab);

    assert_eq!(tree.root(), &expected);
    assert_eq!(tree.height(), 3);
}

#[test]
fn test_frequency_conservation() {
    let input = b"it was the best of times, it was the worst of times";
    let tree = tree_of(input);

    assert_eq!(tree.weight(), input.len() as u64);
    assert_eq!(tree.leaves().iter().map(|&(_, w)| w).sum::<u64>(), input.len() as u64);
    assert_eq!(tree.leaf_count(), FrequencyTable::count(input).len());
}

#[test]
fn test_leaves_match_frequencies() {
    let input = b"mississippi";
    let freq = FrequencyTable::count(input);
    let tree = tree_of(input);

    let mut leaves = tree.leaves();
    leaves.sort();
    assert_eq!(leaves, freq.iter().collect::<Vec<_>>());
}

#[test]
fn test_build_is_deterministic() {
    let input: Vec<u8> = (0..5000u32).map(|i| (i * i % 97) as u8).collect();
    assert_eq!(tree_of(&input), tree_of(&input));
}

#[test]
fn test_generate_requires_tree() {
    assert_eq!(CodeTable::generate(None), Err(CodecError::EmptyTree));
}

#[test]
fn test_generate_single_leaf_gets_one_bit() {
    let tree = tree_of(b"zzzz");
    let table = CodeTable::generate(Some(tree.root())).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.get(b'z'), Some(&Code::from(vec![false])));
}

#[test]
fn test_generate_paths() {
    let table = tree_of(b"abccdddd").code_table();

    assert_eq!(table.get(b'd').unwrap().to_string(), "0");
    assert_eq!(table.get(b'c').unwrap().to_string(), "10");
    assert_eq!(table.get(b'a').unwrap().to_string(), "110");
    assert_eq!(table.get(b'b').unwrap().to_string(), "111");
    assert_eq!(table.iter().map(|(s, _)| s).collect::<Vec<_>>(), b"abcd".to_vec());
}

#[test]
fn test_codes_are_prefix_free() {
    let input: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat(b).take(b as usize % 13 + 1)).collect();
    let table = tree_of(&input).code_table();

    assert_eq!(table.len(), 256);
    assert!(table.is_prefix_free());
    for (a, code_a) in table.iter() {
        for (b, code_b) in table.iter() {
            if a != b {
                assert!(!code_a.is_prefix_of(code_b));
            }
        }
    }
}

#[test]
fn test_prefix_check_detects_violation() {
    let table = tree_of(b"ab").code_table();
    assert!(table.is_prefix_free());

    let broken_a = Code::from(vec![true]);
    let broken_b = Code::from(vec![true, false]);
    assert!(broken_a.is_prefix_of(&broken_b));
}

#[test]
fn test_skewed_input_code_lengths() {
    let table = tree_of(b"aaaaaaaab").code_table();
    assert!(table.get(b'a').unwrap().len() <= table.get(b'b').unwrap().len());
}

#[test]
fn test_encoded_bits() {
    let input = b"abccdddd";
    let freq = FrequencyTable::count(input);
    let table = tree_of(input).code_table();

    // a:3 b:3 c:2*2 d:4*1
    assert_eq!(table.encoded_bits(&freq), 3 + 3 + 4 + 4);
}

#[test]
fn test_fibonacci_weights_reach_deep_codes() {
    // Fibonacci weights give a maximally unbalanced tree.
    let mut fib = vec![1u64, 1];
    while fib.len() < 40 {
        let next = fib[fib.len() - 1] + fib[fib.len() - 2];
        fib.push(next);
    }
    let freq: FrequencyTable = fib.iter().enumerate().map(|(s, &c)| (s as u8, c)).collect();
    let tree = HuffmanTree::build(&freq).unwrap();
    let table = tree.code_table();

    assert_eq!(tree.height(), 39);
    assert_eq!(table.iter().map(|(_, c)| c.len()).max(), Some(39));
    assert!(table.is_prefix_free());
}

#[test]
fn test_serialize_layout() {
    // 1, 0 'a', 0 'b' -> 1 0 01100001 0 01100010 padded
    let tree = tree_of(b"ab");
    let bytes = tree.serialize();
    assert_eq!(bytes, vec![0b1001_1000, 0b0100_1100, 0b0100_0000]);
}

#[test]
fn test_serialize_single_leaf() {
    let bytes = tree_of(b"zzzz").serialize();
    assert_eq!(bytes, vec![0b0011_1101, 0b0000_0000]);

    let (tree, consumed) = HuffmanTree::deserialize(&bytes).unwrap();
    assert_eq!(consumed, 2);
    assert!(tree.root().same_shape(&HuffmanNode::leaf(b'z', 4)));
}

#[test]
fn test_deserialize_preserves_shape() {
    let input = b"the rain in spain stays mainly in the plain";
    let tree = tree_of(input);
    let bytes = tree.serialize();

    let (decoded, consumed) = HuffmanTree::deserialize(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    assert!(decoded.root().same_shape(tree.root()));
    assert_eq!(decoded.code_table(), tree.code_table());
    assert_eq!(decoded.serialize(), bytes);
}

#[test]
fn test_deserialize_reports_consumed_prefix() {
    let tree = tree_of(b"hello world");
    let mut bytes = tree.serialize();
    let len = bytes.len();
    bytes.extend_from_slice(&[0xFF, 0xEE]);

    let (_, consumed) = HuffmanTree::deserialize(&bytes).unwrap();
    assert_eq!(consumed, len);
}

#[test]
fn test_deserialize_truncated() {
    let bytes = tree_of(b"hello world").serialize();

    for cut in 0..bytes.len() {
        assert!(
            matches!(HuffmanTree::deserialize(&bytes[..cut]), Err(CodecError::CorruptTree(_))),
            "cut at {cut} was accepted"
        );
    }
}

#[test]
fn test_deserialize_duplicate_symbol() {
    // internal, leaf 'a', leaf 'a'
    let tree = HuffmanNode::merge(HuffmanNode::leaf(b'a', 1), HuffmanNode::leaf(b'a', 1));
    let bytes = serialization::serialize(&tree);

    assert_eq!(
        serialization::deserialize(&bytes),
        Err(CodecError::CorruptTree("symbol appears in more than one leaf"))
    );
}

#[test]
fn test_deserialize_nonzero_padding() {
    let mut bytes = tree_of(b"ab").serialize();
    *bytes.last_mut().unwrap() |= 0b0000_0001;

    assert_eq!(
        HuffmanTree::deserialize(&bytes),
        Err(CodecError::CorruptTree("non-zero padding after the tree"))
    );
}

#[test]
fn test_deserialize_rejects_excessive_depth() {
    // MAX_TREE_HEIGHT + 1 internal markers in a row.
    let bytes = vec![0xFF; MAX_TREE_HEIGHT / 8 + 2];

    assert_eq!(
        serialization::deserialize(&bytes),
        Err(CodecError::CorruptTree("tree is deeper than the byte alphabet allows"))
    );
}

#[test]
fn test_same_shape_ignores_weights() {
    let a = HuffmanNode::merge(HuffmanNode::leaf(1, 10), HuffmanNode::leaf(2, 3));
    let b = HuffmanNode::merge(HuffmanNode::leaf(1, 0), HuffmanNode::leaf(2, 0));
    let c = HuffmanNode::merge(HuffmanNode::leaf(2, 0), HuffmanNode::leaf(1, 0));

    assert!(a.same_shape(&b));
    assert!(!a.same_shape(&c));
    assert!(!a.same_shape(&HuffmanNode::leaf(1, 13)));
}
