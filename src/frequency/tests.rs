use super::FrequencyTable;

#[test]
fn test_count_empty() {
    let table = FrequencyTable::count(b"");
    assert!(table.is_empty());
    assert_eq!(table.total(), 0);
}

#[test]
fn test_count_distinct_symbols() {
    let table = FrequencyTable::count(b"abracadabra");

    assert_eq!(table.len(), 5);
    assert_eq!(table.get(b'a'), Some(5));
    assert_eq!(table.get(b'b'), Some(2));
    assert_eq!(table.get(b'r'), Some(2));
    assert_eq!(table.get(b'c'), Some(1));
    assert_eq!(table.get(b'd'), Some(1));
    assert_eq!(table.get(b'z'), None);
    assert_eq!(table.total(), 11);
}

#[test]
fn test_iter_is_ascending() {
    let table = FrequencyTable::count(&[200, 3, 3, 0, 255, 200]);
    let pairs: Vec<_> = table.iter().collect();
    assert_eq!(pairs, vec![(0, 1), (3, 2), (200, 2), (255, 1)]);
}

#[test]
fn test_all_byte_values() {
    let bytes: Vec<u8> = (0..=255).collect();
    let table = FrequencyTable::count(&bytes);
    assert_eq!(table.len(), 256);
    assert!(table.iter().all(|(_, count)| count == 1));
}

#[test]
fn test_from_iter_skips_zero_counts() {
    let table: FrequencyTable = vec![(1, 0), (2, 4), (2, 1), (9, 3)].into_iter().collect();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(1), None);
    assert_eq!(table.get(2), Some(5));
}

#[test]
fn test_merge_matches_whole_count() {
    let input = b"the quick brown fox jumps over the lazy dog";
    let whole = FrequencyTable::count(input);

    let mut left = FrequencyTable::count(&input[..17]);
    let right = FrequencyTable::count(&input[17..]);
    left.merge(&right);
    assert_eq!(left, whole);

    let mut reversed = FrequencyTable::count(&input[17..]);
    reversed.merge(&FrequencyTable::count(&input[..17]));
    assert_eq!(reversed, whole);
}

#[test]
fn test_merge_is_associative() {
    let a = FrequencyTable::count(b"aab");
    let b = FrequencyTable::count(b"bcc");
    let c = FrequencyTable::count(b"cdd");

    let mut ab_c = a.clone();
    ab_c.merge(&b);
    ab_c.merge(&c);

    let mut bc = b.clone();
    bc.merge(&c);
    let mut a_bc = a.clone();
    a_bc.merge(&bc);

    assert_eq!(ab_c, a_bc);
}
