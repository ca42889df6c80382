pub mod roster;
pub mod storage;
