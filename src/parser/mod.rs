pub mod amount;
pub mod block;
pub mod extract;
