pub mod comparator;
pub mod state;
