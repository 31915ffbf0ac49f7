pub mod json;

pub use json::{score_file_name, write_scores};
