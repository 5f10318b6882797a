//! CLI configuration: thin wrapper around `isyctl_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--controller, --password, etc.).

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use isyctl_core::{ConnectionDescriptor, SeedRecord, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use isyctl_config::{
    Config, DeviceSeed, Profile, config_path, load_config, load_config_or_default, save_config,
};

/// Everything needed to build a `Controller` for one invocation.
#[derive(Debug)]
pub struct Session {
    pub profile_name: String,
    pub descriptor: ConnectionDescriptor,
    pub seed: Vec<SeedRecord>,
    /// Run discovery before resolving names.
    pub discover: bool,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the session from the config file, the active profile, and CLI
/// overrides. Without a profile, `--controller` and a password are
/// enough; the registry then starts empty and is filled by discovery.
pub fn resolve_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let descriptor = resolve_profile(profile, &profile_name, &cfg, global)?;
        let seed = isyctl_config::profile_seed(profile);
        let discover = global.discover || profile.discover || seed.is_empty();
        debug!(profile = %profile_name, seeded = seed.len(), discover, "profile resolved");
        return Ok(Session {
            profile_name,
            descriptor,
            seed,
            discover,
        });
    }

    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    // No profile: flags / env vars alone
    let url_str = global.controller.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = isyctl_config::parse_controller_url(url_str)?;

    let password = global
        .password
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;

    let username = global.username.clone().unwrap_or_else(|| "admin".into());
    let mut descriptor = ConnectionDescriptor::new(url, username, password);
    descriptor.tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    descriptor.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));

    Ok(Session {
        profile_name,
        descriptor,
        seed: Vec::new(),
        discover: true,
    })
}

/// Translate a `Profile` + global flags into a `ConnectionDescriptor`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ConnectionDescriptor, CliError> {
    // 1. Controller URL (flag > env > profile)
    let url_str = global.controller.as_deref().unwrap_or(&profile.controller);
    let url = isyctl_config::parse_controller_url(url_str)?;

    // 2. Username and password (flag > credential chain)
    let username = global
        .username
        .clone()
        .unwrap_or_else(|| profile.username.clone());
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => isyctl_config::resolve_password(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = if global.insecure || (profile.insecure.is_none() && cfg.defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        isyctl_config::profile_tls(profile)
    };

    // 4. Timeout (flag > profile > defaults)
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );

    let mut descriptor = ConnectionDescriptor::new(url, username, password);
    descriptor.tls = tls;
    descriptor.timeout = timeout;
    Ok(descriptor)
}

/// Persist newly discovered devices to the named profile.
pub fn append_devices(profile_name: &str, seeds: &[SeedRecord]) -> Result<usize, CliError> {
    let mut cfg = load_config()?;
    let available = available_profiles(&cfg);
    let profile = cfg
        .profiles
        .get_mut(profile_name)
        .ok_or_else(|| CliError::ProfileNotFound {
            name: profile_name.into(),
            available,
        })?;

    profile.devices.extend(seeds.iter().map(DeviceSeed::from));
    save_config(&cfg)?;
    Ok(seeds.len())
}
