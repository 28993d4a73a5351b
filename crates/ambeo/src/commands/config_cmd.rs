//! Config subcommand handlers.

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn format_config(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# unrenderable config: {e}"))
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn validate_host(host: &str) -> Result<String, CliError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(CliError::Validation {
            field: "host".into(),
            reason: "cannot be empty".into(),
        });
    }
    if host.contains("://") || host.contains('/') {
        return Err(CliError::Validation {
            field: "host".into(),
            reason: "expected a hostname or IP address, not a URL".into(),
        });
    }
    Ok(host.to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("AMBEO soundbar setup");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let host: String = Input::new()
                .with_prompt("Soundbar hostname or IP")
                .interact_text()
                .map_err(prompt_err)?;
            let host = validate_host(&host)?;

            let interval: u64 = Input::new()
                .with_prompt("Poll interval in seconds (0 disables polling)")
                .default(5)
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = config::load_config_or_default();
            let mut profile = Profile::new(host);
            profile.update_interval = Some(interval);
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: ambeo info");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set host ────────────────────────────────────────────────
        ConfigCommand::SetHost { host } => {
            let host = validate_host(&host)?;
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            cfg.profiles.entry(profile_name.clone()).or_default().host = host;
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            save_config(&cfg)?;
            eprintln!("✓ Set host on profile '{profile_name}'");
            Ok(())
        }

        // ── Set name ────────────────────────────────────────────────
        ConfigCommand::SetName { input, name } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let name = name.trim();
            let names = &mut cfg.profiles.entry(profile_name).or_default().custom_names;
            if name.is_empty() {
                names.remove(&input);
            } else {
                names.insert(input.clone(), name.to_owned());
            }
            save_config(&cfg)?;

            if name.is_empty() {
                eprintln!("✓ Removed custom name for '{input}'");
            } else {
                eprintln!("✓ '{input}' is now shown as '{name}'");
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}
