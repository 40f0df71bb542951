//! Seed data for the local fallback store
//!
//! When the API is unreachable and the local `problems` collection is empty,
//! this fixed sample set is written once so the platform is usable offline.

use std::collections::BTreeMap;

use crate::models::{Difficulty, Problem, ProblemExample, TestCase};

/// The fixed sample problem set seeded into an empty local store
pub fn sample_problems() -> Vec<Problem> {
    vec![
        reverse_complement(),
        gc_content(),
        point_mutations(),
        global_alignment(),
    ]
}

fn starter(python: &str, javascript: &str, rust: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("python".to_string(), python.to_string()),
        ("javascript".to_string(), javascript.to_string()),
        ("rust".to_string(), rust.to_string()),
    ])
}

fn reverse_complement() -> Problem {
    Problem {
        id: 1,
        slug: "reverse-complement".to_string(),
        title: "Reverse Complement".to_string(),
        difficulty: Difficulty::Easy,
        category: "sequence-manipulation".to_string(),
        description: "Given a DNA string, return its reverse complement: \
                      reverse the string, then replace each base with its \
                      complement (A-T, C-G). The reverse complement describes \
                      the opposite strand of the double helix read 5' to 3'."
            .to_string(),
        examples: vec![
            ProblemExample {
                input: "AAAACCCGGT".to_string(),
                output: "ACCGGGTTTT".to_string(),
                explanation: Some(
                    "Reversing gives TGGCCCAAAA; complementing each base gives ACCGGGTTTT."
                        .to_string(),
                ),
            },
            ProblemExample {
                input: "ACGT".to_string(),
                output: "ACGT".to_string(),
                explanation: Some("ACGT is its own reverse complement.".to_string()),
            },
        ],
        constraints: vec![
            "1 <= length <= 10^6".to_string(),
            "The input contains only the characters A, C, G, T".to_string(),
        ],
        starter_code: starter(
            "def reverse_complement(dna: str) -> str:\n    pass\n",
            "function reverseComplement(dna) {\n  // ...\n}\n",
            "fn reverse_complement(dna: &str) -> String {\n    todo!()\n}\n",
        ),
        hints: vec![
            "Walk the string from the end and map each base as you go.".to_string(),
        ],
        test_cases: vec![
            TestCase {
                id: 1,
                input: "AAAACCCGGT".to_string(),
                expected: "ACCGGGTTTT".to_string(),
            },
            TestCase {
                id: 2,
                input: "A".to_string(),
                expected: "T".to_string(),
            },
        ],
    }
}

fn gc_content() -> Problem {
    Problem {
        id: 2,
        slug: "gc-content".to_string(),
        title: "GC Content".to_string(),
        difficulty: Difficulty::Easy,
        category: "sequence-analysis".to_string(),
        description: "Compute the GC content of a DNA string: the percentage \
                      of bases that are either G or C, rounded to two decimal \
                      places. GC-rich regions are more thermally stable and \
                      often mark coding sequence."
            .to_string(),
        examples: vec![ProblemExample {
            input: "AGCTATAG".to_string(),
            output: "37.50".to_string(),
            explanation: Some("3 of the 8 bases are G or C.".to_string()),
        }],
        constraints: vec!["1 <= length <= 10^5".to_string()],
        starter_code: starter(
            "def gc_content(dna: str) -> float:\n    pass\n",
            "function gcContent(dna) {\n  // ...\n}\n",
            "fn gc_content(dna: &str) -> f64 {\n    todo!()\n}\n",
        ),
        hints: Vec::new(),
        test_cases: vec![TestCase {
            id: 1,
            input: "AGCTATAG".to_string(),
            expected: "37.50".to_string(),
        }],
    }
}

fn point_mutations() -> Problem {
    Problem {
        id: 3,
        slug: "point-mutations".to_string(),
        title: "Point Mutations".to_string(),
        difficulty: Difficulty::Medium,
        category: "sequence-comparison".to_string(),
        description: "Given two DNA strings of equal length, count the \
                      positions at which they differ (the Hamming distance). \
                      Each differing position corresponds to a point mutation \
                      between the two sequences."
            .to_string(),
        examples: vec![ProblemExample {
            input: "GAGCCTACTAACGGGAT\nCATCGTAATGACGGCCT".to_string(),
            output: "7".to_string(),
            explanation: None,
        }],
        constraints: vec![
            "Both strings have the same length".to_string(),
            "1 <= length <= 10^6".to_string(),
        ],
        starter_code: starter(
            "def hamming_distance(a: str, b: str) -> int:\n    pass\n",
            "function hammingDistance(a, b) {\n  // ...\n}\n",
            "fn hamming_distance(a: &str, b: &str) -> usize {\n    todo!()\n}\n",
        ),
        hints: vec!["Zip the two strings and count mismatched pairs.".to_string()],
        test_cases: vec![TestCase {
            id: 1,
            input: "GAGCCTACTAACGGGAT\nCATCGTAATGACGGCCT".to_string(),
            expected: "7".to_string(),
        }],
    }
}

fn global_alignment() -> Problem {
    Problem {
        id: 4,
        slug: "global-alignment-score".to_string(),
        title: "Global Alignment Score".to_string(),
        difficulty: Difficulty::Hard,
        category: "alignment".to_string(),
        description: "Compute the optimal global alignment score of two \
                      protein strings under a simple scoring scheme: +1 for a \
                      match, -1 for a mismatch, -2 for a gap. Use the \
                      Needleman-Wunsch dynamic programming recurrence, filling \
                      an (m+1) x (n+1) score matrix and returning the value in \
                      the bottom-right cell."
            .to_string(),
        examples: vec![ProblemExample {
            input: "MEANLY\nPENALTY".to_string(),
            output: "-2".to_string(),
            explanation: Some(
                "One optimal alignment is ME-ANLY / PENALTY with three \
                 matches, three mismatches, and one gap."
                    .to_string(),
            ),
        }],
        constraints: vec!["1 <= length of each string <= 1000".to_string()],
        starter_code: starter(
            "def alignment_score(a: str, b: str) -> int:\n    pass\n",
            "function alignmentScore(a, b) {\n  // ...\n}\n",
            "fn alignment_score(a: &str, b: &str) -> i64 {\n    todo!()\n}\n",
        ),
        hints: vec![
            "Initialize the first row and column with gap penalties.".to_string(),
            "Each cell depends only on its left, upper, and upper-left neighbors.".to_string(),
        ],
        test_cases: vec![TestCase {
            id: 1,
            input: "MEANLY\nPENALTY".to_string(),
            expected: "-2".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_is_well_formed() {
        let problems = sample_problems();
        assert!(!problems.is_empty());

        // Ids are the contiguous range 1..=n so that max+1 assignment picks
        // up cleanly after the seed
        for (index, problem) in problems.iter().enumerate() {
            assert_eq!(problem.id, index as u64 + 1);
            assert!(!problem.title.is_empty());
            assert!(!problem.slug.is_empty());
            assert!(!problem.description.is_empty());
            assert!(!problem.starter_code.is_empty());
        }
    }
}
