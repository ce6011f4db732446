pub mod errors;
pub mod db;
pub mod result;

#[cfg(test)]
mod tests;
