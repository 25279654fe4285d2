use crate::auth::{self, Credentials};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SalesdeskError};
use crate::store::backend::StorageBackend;

pub fn login<B: StorageBackend>(
    backend: &B,
    credentials: &Credentials,
    username: &str,
    password: &str,
) -> Result<CmdResult> {
    if !auth::login(backend, credentials, username, password)? {
        return Err(SalesdeskError::InvalidCredentials);
    }
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Logged in as {}",
        username
    ))))
}

pub fn logout<B: StorageBackend>(backend: &B) -> Result<CmdResult> {
    let was_logged_in = auth::is_authenticated(backend)?;
    auth::logout(backend)?;
    let message = if was_logged_in {
        CmdMessage::success("Logged out")
    } else {
        CmdMessage::info("Not logged in")
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn whoami<B: StorageBackend>(backend: &B) -> Result<CmdResult> {
    let message = match auth::current_session(backend)? {
        Some(session) => CmdMessage::info(format!(
            "Logged in as {} since {}",
            session.username,
            session.started_at.format("%Y-%m-%d %H:%M")
        )),
        None => CmdMessage::info("Not logged in"),
    };
    Ok(CmdResult::default().with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn bad_login_is_an_error() {
        let backend = MemBackend::new();
        let creds = Credentials::new("admin", "admin");
        assert!(matches!(
            login(&backend, &creds, "admin", "wrong"),
            Err(SalesdeskError::InvalidCredentials)
        ));
    }

    #[test]
    fn login_whoami_logout() {
        let backend = MemBackend::new();
        let creds = Credentials::new("admin", "admin");
        login(&backend, &creds, "admin", "admin").unwrap();

        let who = whoami(&backend).unwrap();
        assert!(who.messages[0].content.starts_with("Logged in as admin"));

        let out = logout(&backend).unwrap();
        assert_eq!(out.messages[0].content, "Logged out");
        let out = logout(&backend).unwrap();
        assert_eq!(out.messages[0].content, "Not logged in");
    }
}
