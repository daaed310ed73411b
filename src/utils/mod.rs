pub mod id_generator;
pub mod random;
pub mod refill;

pub use id_generator::{generate_prize_id, generate_record_id};
pub use random::RandomSource;
pub use refill::parse_refill_amount;
