pub mod auth;
pub mod relay;
#[cfg(test)]
pub mod test_utils;
pub mod usecase;
