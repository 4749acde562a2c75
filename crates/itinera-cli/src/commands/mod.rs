pub mod account;
pub mod chat;
pub mod trips;

use anyhow::{Result, bail};
use itinera_application::AppContext;
use itinera_core::user::User;
use rustyline::DefaultEditor;

/// Reads one line from the terminal.
pub fn prompt(label: &str) -> Result<String> {
    let mut editor = DefaultEditor::new()?;
    Ok(editor.readline(label)?)
}

/// Reads a password without echoing it.
pub fn prompt_password(label: &str) -> Result<String> {
    Ok(rpassword::prompt_password(label)?)
}

/// Uses `given` when set, otherwise asks for it without echo.
pub fn password_or_prompt(given: Option<String>, label: &str) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt_password(label),
    }
}

pub fn require_user(app: &AppContext) -> Result<User> {
    match app.accounts.current_user() {
        Some(user) => Ok(user),
        None => bail!("You are not signed in. Run `itinera login` first."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_given_password_skips_the_terminal() {
        let password = password_or_prompt(Some("secret1".to_string()), "Password: ").unwrap();
        assert_eq!(password, "secret1");
    }
}
