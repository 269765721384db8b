mod quotes;

pub use quotes::{by_name, provider_a_quote, provider_b_quote, provider_c_quote, usd_inr};
