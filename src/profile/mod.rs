pub mod account;
pub mod assembler;
pub mod badges;
pub mod capability;
pub mod credential;
pub mod disclosure;
pub mod error;
pub mod namespace;
pub mod store;

#[cfg(test)]
pub mod testing;
