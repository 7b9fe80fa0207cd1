pub mod memory;
pub mod qdrant;
