//! Statistical analysis of similarity-score distributions: descriptive
//! summaries, independent two-sample t-tests, and per-drawing win tallies.

pub mod stats;
pub mod wins;

pub use stats::{
    pairwise_ttests, smallest_mean_differences, summarize, ttest_ind, MeanDifference,
    PairwiseTTest, Summary, TTestResult,
};
pub use wins::{tally_wins, WinTally};
