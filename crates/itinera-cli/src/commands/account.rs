use super::{password_or_prompt, prompt_password, require_user};
use anyhow::Result;
use colored::Colorize;
use itinera_application::AppContext;
use itinera_core::validation::{LoginForm, PasswordChangeForm, ProfileForm, RegistrationForm};

pub fn register(
    app: &AppContext,
    name: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => (
            prompt_password("Password: ")?,
            prompt_password("Confirm password: ")?,
        ),
    };

    let user = app.accounts.register(&RegistrationForm {
        name,
        email: email.clone(),
        password: password.clone(),
        confirm_password,
    })?;
    app.accounts.login(&LoginForm { email, password })?;

    println!(
        "{} {} <{}>",
        "Welcome,".green(),
        user.name.bold(),
        user.email
    );
    Ok(())
}

pub fn login(app: &AppContext, email: String, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password, "Password: ")?;
    let user = app.accounts.login(&LoginForm { email, password })?;
    println!("{} {}", "Signed in as".green(), user.name.bold());
    Ok(())
}

pub fn logout(app: &AppContext) -> Result<()> {
    app.accounts.logout()?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub fn whoami(app: &AppContext) {
    match app.accounts.current_user() {
        Some(user) => println!("{} <{}>", user.name.bold(), user.email),
        None => println!("{}", "Not signed in.".bright_black()),
    }
}

pub fn profile(app: &AppContext, name: Option<String>) -> Result<()> {
    let Some(name) = name else {
        let user = require_user(app)?;
        println!("{}  {}", "Name:".bright_black(), user.name);
        println!("{} {}", "Email:".bright_black(), user.email);
        return Ok(());
    };

    let user = app.accounts.update_profile(&ProfileForm { name })?;
    println!("{} {}", "Name updated to".green(), user.name.bold());
    Ok(())
}

pub fn change_password(app: &AppContext) -> Result<()> {
    require_user(app)?;
    let form = PasswordChangeForm {
        current_password: prompt_password("Current password: ")?,
        new_password: prompt_password("New password: ")?,
        confirm_new_password: prompt_password("Confirm new password: ")?,
    };
    app.accounts.change_password(&form)?;
    println!("{}", "Password changed.".green());
    Ok(())
}
