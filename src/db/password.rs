//! One-way password hashing. Argon2 is CPU bound, so both directions run on
//! the blocking pool.

use crate::error::HomepageError;
use tokio::task;

pub async fn hash_password(password: &str) -> Result<String, HomepageError> {
    let pwd = password.as_bytes().to_vec();
    let salt: [u8; 16] = rand::random();
    let encoded =
        task::spawn_blocking(move || argon2::hash_encoded(&pwd, &salt, &argon2::Config::default()))
            .await??;
    Ok(encoded)
}

pub async fn verify_password(encoded: &str, password: &str) -> Result<bool, HomepageError> {
    let encoded = encoded.to_string();
    let pwd = password.as_bytes().to_vec();
    Ok(task::spawn_blocking(move || argon2::verify_encoded(&encoded, &pwd)).await??)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_only_its_own_password() {
        let encoded = hash_password("kita_admin_1234").await.unwrap();
        assert!(verify_password(&encoded, "kita_admin_1234").await.unwrap());
        assert!(!verify_password(&encoded, "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(verify_password("not-a-hash", "x").await.is_err());
    }
}
