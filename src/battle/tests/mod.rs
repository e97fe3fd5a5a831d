#[cfg(test)]
pub mod common;








#[cfg(test)]
mod test_start_battle;

#[cfg(test)]
mod test_ai;
