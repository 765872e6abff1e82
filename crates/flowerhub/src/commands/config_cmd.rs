//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use flowerhub_api::DEFAULT_BASE_URL;
use flowerhub_config::{self as config, Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const REDACTED: &str = "********";

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::SetPassword => set_password(global),
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("Flowerhub CLI configuration");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config_or_default();

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(prompt_err)?;

    let base_url: String = Input::new()
        .with_prompt("Portal API root")
        .default(DEFAULT_BASE_URL.into())
        .interact_text()
        .map_err(prompt_err)?;

    let username: String = Input::new()
        .with_prompt("Username (email)")
        .interact_text()
        .map_err(prompt_err)?;

    let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if username.is_empty() || password.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "username and password cannot be empty".into(),
        });
    }

    let store_choices = &[
        "Store password in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let password_field = if store_selection == 0 {
        config::store_password(&profile_name, &SecretString::from(password))?;
        eprintln!("   Password stored in system keyring");
        None
    } else {
        Some(password)
    };

    let profile = Profile {
        base_url: (base_url != DEFAULT_BASE_URL).then_some(base_url),
        username: Some(username),
        password: password_field,
        ..Profile::default()
    };
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());

    let path = config::save_config(&cfg)?;

    eprintln!("\nConfiguration written to {}", path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: flowerhub readout");
    Ok(())
}

// ── Show ────────────────────────────────────────────────────────────

fn redact(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config()?;
    redact(&mut cfg);

    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => {
            toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?
        }
        ref format => output::render_single(format, &cfg, |_| String::new(), |_| String::new()),
    };
    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}

// ── Set password ────────────────────────────────────────────────────

fn set_password(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))
        .map_err(prompt_err)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    config::store_password(&profile_name, &SecretString::from(password))?;
    if !global.quiet {
        eprintln!("Password stored in system keyring for profile '{profile_name}'");
    }
    Ok(())
}
