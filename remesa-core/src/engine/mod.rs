/// Ordered predicate chain applied to successful quotes.
pub mod filter;
/// Sort strategies and the best-value score.
pub mod rank;

pub use filter::{FilterChain, FilterStage};
pub use rank::{best_value_score, rank_quotes, ranked};
