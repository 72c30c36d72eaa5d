// File: similarity.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::HashMap;

/// Similarity ratio of two byte sequences in [0, 1].
///
/// Computed as `2 * M / (len(a) + len(b))` where `M` is the total length of
/// all matching blocks found by recursively splitting around the longest
/// common block. Two empty sequences are fully similar. The ratio tolerates
/// small per-request differences (timestamps, nonces) in otherwise identical
/// bodies while staying low for genuinely different content.
pub fn sequence_ratio(a: &[u8], b: &[u8]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_total(a, b);
    (2.0 * matches as f64) / total as f64
}

fn matching_total(a: &[u8], b: &[u8]) -> usize {
    // Positions of every byte value in b, ascending.
    let mut b2j: Vec<Vec<usize>> = vec![Vec::new(); 256];
    for (j, &byte) in b.iter().enumerate() {
        b2j[byte as usize].push(j);
    }

    let mut total = 0;
    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k > 0 {
            total += k;
            queue.push((alo, i, blo, j));
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    total
}

fn longest_match(
    a: &[u8],
    b2j: &[Vec<usize>],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut besti = alo;
    let mut bestj = blo;
    let mut bestsize = 0;

    // j2len[j] = length of the longest match ending at a[..i], b[..j].
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, &byte) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut newj2len: HashMap<usize, usize> = HashMap::new();
        for &j in &b2j[byte as usize] {
            if j < blo {
                continue;
            }
            if j >= bhi {
                break;
            }
            let k = j2len.get(&j.wrapping_sub(1)).copied().unwrap_or(0) + 1;
            newj2len.insert(j, k);
            if k > bestsize {
                besti = i + 1 - k;
                bestj = j + 1 - k;
                bestsize = k;
            }
        }
        j2len = newj2len;
    }

    (besti, bestj, bestsize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences() {
        assert_eq!(sequence_ratio(b"hello world", b"hello world"), 1.0);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(sequence_ratio(b"", b""), 1.0);
    }

    #[test]
    fn test_one_empty() {
        assert_eq!(sequence_ratio(b"hello", b""), 0.0);
        assert_eq!(sequence_ratio(b"", b"hello"), 0.0);
    }

    #[test]
    fn test_disjoint_sequences() {
        assert_eq!(sequence_ratio(b"aaaa", b"bbbb"), 0.0);
    }

    #[test]
    fn test_known_ratio() {
        // Longest block "bcd" (3 of 8 total elements): 2*3/8.
        assert_eq!(sequence_ratio(b"abcd", b"bcde"), 0.75);
    }

    #[test]
    fn test_multiple_blocks() {
        // "ab" and "de" match around the differing middle byte: 2*4/10.
        assert_eq!(sequence_ratio(b"abcde", b"abfde"), 0.8);
    }

    #[test]
    fn test_near_identical_bodies_score_high() {
        let a = b"<html><body>page generated at 12:00:01</body></html>";
        let b = b"<html><body>page generated at 12:59:47</body></html>";
        assert!(sequence_ratio(a, b) > 0.9);
    }

    #[test]
    fn test_exact_threshold_boundary() {
        // 19 shared bytes of 40 total: exactly 0.95.
        let a = [b"a".repeat(19), b"x".to_vec()].concat();
        let b = [b"a".repeat(19), b"y".to_vec()].concat();
        assert_eq!(sequence_ratio(&a, &b), 0.95);
    }
}
