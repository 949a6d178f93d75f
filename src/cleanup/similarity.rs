/*!
 * Longest-matching-block similarity.
 *
 * Scores two strings by recursively finding the longest common run of
 * characters, then the longest runs to its left and right, and so on
 * (Ratcliff/Obershelp). The score is `2 * M / T` where `M` is the total length
 * of all matched blocks and `T` the combined length of both strings.
 *
 * Sequences of 200 or more characters get the "popular element" treatment:
 * characters occurring in more than 1% of the second string are not used to
 * seed matches, though matches may still extend across them.
 */

use std::collections::HashMap;

/// Second-sequence length at which popular characters stop seeding matches
const POPULAR_MIN_LEN: usize = 200;

/// A run of equal characters: `a[a_start..a_start+len] == b[b_start..b_start+len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

struct BlockMatcher {
    a: Vec<char>,
    b: Vec<char>,
    // @field: positions of each seeding character in `b`, ascending
    b_index: HashMap<char, Vec<usize>>,
}

impl BlockMatcher {
    fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b_index.entry(c).or_default().push(j);
        }

        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b_index.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b_index }
    }

    /// Longest matching block inside `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, a_lo: usize, a_hi: usize, b_lo: usize, b_hi: usize) -> MatchBlock {
        let (mut best_i, mut best_j, mut best_len) = (a_lo, b_lo, 0usize);

        // run length of the match ending at (i - 1, j), keyed by j
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for i in a_lo..a_hi {
            let mut next_runs: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_runs.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_lengths = next_runs;
        }

        // Grow across characters that were excluded from seeding
        while best_i > a_lo && best_j > b_lo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < a_hi
            && best_j + best_len < b_hi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        MatchBlock {
            a_start: best_i,
            b_start: best_j,
            len: best_len,
        }
    }

    fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut blocks = Vec::new();
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let block = self.longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.len == 0 {
                continue;
            }
            if a_lo < block.a_start && b_lo < block.b_start {
                pending.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            let (a_end, b_end) = (block.a_start + block.len, block.b_start + block.len);
            if a_end < a_hi && b_end < b_hi {
                pending.push((a_end, a_hi, b_end, b_hi));
            }
            blocks.push(block);
        }

        blocks.sort_by_key(|block| (block.a_start, block.b_start));

        // Merge blocks that touch in both sequences
        let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged
    }
}

/// Matching blocks between `a` and `b`, ordered by position, in characters
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchBlock> {
    BlockMatcher::new(a, b).matching_blocks()
}

/// Similarity ratio in `[0.0, 1.0]`; two empty strings score 1.0
pub fn ratio(a: &str, b: &str) -> f64 {
    let matcher = BlockMatcher::new(a, b);
    let total = matcher.a.len() + matcher.b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matcher.matching_blocks().iter().map(|block| block.len).sum();
    2.0 * matched as f64 / total as f64
}

/// Cheap upper bound on `ratio(a, b)` from the lengths alone
pub fn ratio_upper_bound(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la + lb == 0 {
        return 1.0;
    }
    2.0 * la.min(lb) as f64 / (la + lb) as f64
}

/// Whether `ratio(a, b)` is strictly greater than `threshold`
pub fn exceeds(a: &str, b: &str, threshold: f64) -> bool {
    if ratio_upper_bound(a, b) <= threshold {
        return false;
    }
    ratio(a, b) > threshold
}
