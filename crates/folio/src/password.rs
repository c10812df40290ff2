// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio hash-password`: produce an argon2 PHC string for `admin.password_hash`.

use std::io::{BufRead, IsTerminal};

use folio_core::FolioError;
use secrecy::{ExposeSecret, SecretString};

/// Reads the password and returns its PHC hash.
///
/// On a terminal the password is prompted for twice without echo; otherwise
/// the first line of stdin is used.
pub fn run_hash_password() -> Result<String, FolioError> {
    let password = if std::io::stdin().is_terminal() {
        prompt_with_confirm()?
    } else {
        read_password_line(std::io::stdin().lock())?
    };
    folio_gateway::hash_password(password.expose_secret())
}

fn prompt_with_confirm() -> Result<SecretString, FolioError> {
    eprint!("Admin password: ");
    let first = rpassword::read_password()
        .map_err(|e| FolioError::Internal(format!("failed to read password: {e}")))?;
    eprint!("Confirm admin password: ");
    let second = rpassword::read_password()
        .map_err(|e| FolioError::Internal(format!("failed to read password: {e}")))?;

    if first != second {
        return Err(FolioError::Validation("passwords do not match".to_string()));
    }
    non_empty(first)
}

/// First line of `reader`, without its line ending.
pub fn read_password_line(mut reader: impl BufRead) -> Result<SecretString, FolioError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| FolioError::Internal(format!("failed to read password: {e}")))?;
    non_empty(line.trim_end_matches(['\r', '\n']).to_string())
}

fn non_empty(password: String) -> Result<SecretString, FolioError> {
    if password.is_empty() {
        return Err(FolioError::Validation("empty password not allowed".to_string()));
    }
    Ok(SecretString::from(password))
}
