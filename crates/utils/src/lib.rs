use rand::{distributions::Alphanumeric, Rng};

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Creates a random secret prefixed with `prefix_`, e.g. `ak_Xy12...`
pub fn create_prefixed_secret(prefix: &str, secret_len: usize) -> String {
    format!("{}_{}", prefix, create_random_secret(secret_len))
}
