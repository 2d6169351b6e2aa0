pub mod body;
pub mod color;
pub mod spark;
