//! Bounded similarity score between two normalized strings
//!
//! Matching-blocks ratio: find the longest common block, recurse on the
//! text either side of it, and score `2 * M / T` where `M` is the number
//! of matched characters and `T` the combined length. The score is scaled
//! to a percentage and truncated, so 69.9 stays below a threshold of 70.
//!
//! The score is not symmetric in general. Call it as
//! `fuzzy_ratio(pattern, input)`: long inputs (200+ characters) have their
//! over-represented characters excluded from block seeding.

use std::collections::HashMap;

/// Maximum similarity score
pub const MAX_SCORE: u8 = 100;

/// Inputs at least this long get popular-character pruning
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of `pattern` and `input` in `0..=100`. Two empty strings score 100.
pub fn fuzzy_ratio(pattern: &str, input: &str) -> u8 {
    let a: Vec<char> = pattern.chars().collect();
    let b: Vec<char> = input.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return MAX_SCORE;
    }
    let matched = BlockMatcher::new(&a, &b).matched_chars();
    (2.0 * matched as f64 / total as f64 * 100.0) as u8
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending
    b_index: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b_index.entry(*c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b_index }
    }

    /// Total size of the matching blocks
    fn matched_chars(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.longest_block(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            matched += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }
        matched
    }

    /// Longest block `a[i..i+size] == b[j..j+size]` inside the given windows.
    /// Ties go to the earliest start in `a`, then in `b`.
    fn longest_block(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // run length of the block ending at b[j], for the previous row of a
        let mut run_ending: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_run: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_ending.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_ending = next_run;
        }

        // Pruned characters never seed a block but may still extend one
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}
