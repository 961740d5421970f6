pub mod password;

use anyhow::{Context, Result};

use crate::db::Database;
use crate::model::condominio::{Credenciais, Usuario};

/// Check an e-mail/password pair against stored credentials.
///
/// Returns the user's public profile on success and `None` when the
/// e-mail is unknown or the password does not match. The two cases are
/// indistinguishable to callers.
pub fn login(db: &Database, credenciais: &Credenciais) -> Result<Option<Usuario>> {
    let found = db
        .find_credentials(&credenciais.email)
        .context("failed to look up credentials")?;
    Ok(found.and_then(|(usuario, hash)| {
        password::verify_password(&credenciais.senha, &hash).then_some(usuario)
    }))
}
