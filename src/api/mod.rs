pub mod meta;
pub mod retrieve;
