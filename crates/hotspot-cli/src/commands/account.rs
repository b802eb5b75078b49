//! Account commands: signup, login, logout, whoami

use super::Workspace;
use crate::cli::{LoginArgs, SignupArgs};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::UserOutput;
use crate::progress;
use anyhow::Result;
use dialoguer::Password;
use hotspot_app::session::{AuthAlert, AuthFlow, LoginForm, SignupForm};
use hotspot_core::models::User;

fn read_password(given: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

fn show_user(output: &OutputWriter, headline: &str, user: &User) -> Result<()> {
    if output.is_json() {
        output.result(UserOutput::from(user))?;
    } else {
        output.success(headline);
        output.kv("Name", user.author_name());
        output.kv("Email", &user.email);
    }
    Ok(())
}

pub async fn signup(args: SignupArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let password = read_password(args.password, true)?;
    let form = SignupForm::new(args.name, args.email, password);

    let spinner = progress::create_spinner(output, "Creating account...");
    let result = workspace.session().sign_up(&form).await;
    progress::finish(&spinner);

    let user = result.map_err(|e| errors::auth_failed(AuthAlert::from_error(AuthFlow::Signup, &e)))?;
    workspace.storage.save()?;
    show_user(output, "Account created", &user)
}

pub async fn login(args: LoginArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let password = read_password(args.password, false)?;
    let form = LoginForm::new(args.email, password);

    let spinner = progress::create_spinner(output, "Signing in...");
    let result = workspace.session().sign_in(&form).await;
    progress::finish(&spinner);

    let user = result.map_err(|e| errors::auth_failed(AuthAlert::from_error(AuthFlow::Login, &e)))?;
    workspace.storage.save()?;
    show_user(output, "Signed in", &user)
}

pub async fn logout(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let session = workspace.session();
    let was_signed_in = session.current_user().is_some();
    session.sign_out().await?;
    workspace.storage.save()?;

    if was_signed_in {
        output.success("Signed out");
    } else {
        output.info("Nobody was signed in");
    }
    Ok(())
}

pub fn whoami(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    match workspace.session().current_user() {
        Some(user) => show_user(output, "Signed in", &user),
        None => Err(errors::not_signed_in().into()),
    }
}
