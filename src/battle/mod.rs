pub mod ai;
pub mod calculators;
pub mod commands;
pub mod conditions;
pub mod engine;
pub mod move_effects;
pub mod runner;
pub mod state;

#[cfg(test)]
mod tests;
