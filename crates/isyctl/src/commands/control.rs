//! On/off, level, and status handlers.
//!
//! Every handler resolves the name first. Reports carry facts (what was
//! sent, what the controller reported) for the renderer; nothing here
//! retries or caches.

use serde::Serialize;

use isyctl_core::{Controller, Entity, EntityKind, Level, PowerState};

use crate::cli::{GlobalOpts, LevelArgs, OffArgs, OnArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Reports ─────────────────────────────────────────────────────────

/// Outcome of a command.
#[derive(Debug, Serialize)]
pub struct ActionReport {
    pub name: String,
    pub address: String,
    pub kind: EntityKind,
    pub action: &'static str,
    /// `false` when the device was already in the requested state.
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub message: String,
}

impl ActionReport {
    fn new(entity: &Entity, action: &'static str, message: String) -> Self {
        Self {
            name: entity.name().to_owned(),
            address: entity.address().to_string(),
            kind: entity.kind(),
            action,
            changed: true,
            level: None,
            message,
        }
    }

    fn unchanged(mut self) -> Self {
        self.changed = false;
        self
    }

    fn with_level(mut self, level: Option<Level>) -> Self {
        self.level = level.map(Level::percent);
        self
    }
}

/// Live status facts for one entity.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub name: String,
    pub address: String,
    pub kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

fn print_action(report: &ActionReport, global: &GlobalOpts) {
    let out = output::render_single(
        &global.output,
        report,
        |r| r.message.clone(),
        |r| r.message.clone(),
    );
    output::print_output(&out, global.quiet);
}

/// A reading counts as off when it says "Off" or parses to level 0.
fn reads_off(raw: &str) -> bool {
    PowerState::from_status(raw).is_off()
        || Level::parse_status(raw).is_ok_and(|l| l == Level::OFF)
}

/// Current on/off state of a device, or an error carrying the reading
/// when it is neither. Nothing is commanded on an unrecognized state.
fn read_is_on(entity: &Entity, raw: &str) -> Result<bool, CliError> {
    if PowerState::from_status(raw).is_on() {
        Ok(true)
    } else if reads_off(raw) {
        Ok(false)
    } else {
        Err(CliError::UnrecognizedState {
            name: entity.name().to_owned(),
            raw: raw.to_owned(),
        })
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn on(controller: &Controller, args: OnArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let entity = util::resolve(controller, &args.name)?;

    // Explicit level: always commanded.
    if let Some(percent) = args.level {
        let level = Level::new(percent)?;
        entity.set_on_level(percent).await?;
        let report = ActionReport::new(
            &entity,
            "level",
            format!("Set {} to {level}", entity.name()),
        )
        .with_level(Some(level));
        print_action(&report, global);
        return Ok(());
    }

    // Scenes have no readable state: always commanded.
    if !entity.is_scene() {
        let raw = entity.raw_status().await?;
        if read_is_on(&entity, &raw)? {
            let level = entity
                .is_dimmable()
                .then(|| Level::parse_status(&raw).ok())
                .flatten();
            let message = match level {
                Some(level) => format!("{} is already on at {level}", entity.name()),
                None => format!("{} is already on", entity.name()),
            };
            let report = ActionReport::new(&entity, "on", message)
                .unchanged()
                .with_level(level);
            print_action(&report, global);
            return Ok(());
        }
    }

    if args.fast {
        entity.turn_fast_on().await?;
    } else {
        entity.turn_on().await?;
    }
    let report = ActionReport::new(&entity, "on", format!("Turned on {}", entity.name()));
    print_action(&report, global);
    Ok(())
}

pub async fn off(
    controller: &Controller,
    args: OffArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entity = util::resolve(controller, &args.name)?;

    if !entity.is_scene() {
        let raw = entity.raw_status().await?;
        if !read_is_on(&entity, &raw)? {
            let report = ActionReport::new(
                &entity,
                "off",
                format!("{} is already off", entity.name()),
            )
            .unchanged();
            print_action(&report, global);
            return Ok(());
        }
    }

    if args.fast {
        entity.turn_fast_off().await?;
    } else {
        entity.turn_off().await?;
    }
    let report = ActionReport::new(&entity, "off", format!("Turned off {}", entity.name()));
    print_action(&report, global);
    Ok(())
}

pub async fn status(
    controller: &Controller,
    name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entity = util::resolve(controller, name)?;

    let mut report = StatusReport {
        name: entity.name().to_owned(),
        address: entity.address().to_string(),
        kind: entity.kind(),
        power: None,
        level: None,
        raw: None,
    };

    if !entity.is_scene() {
        let raw = entity.raw_status().await?;
        report.power = Some(PowerState::from_status(&raw).to_string());
        if entity.is_dimmable() {
            report.level = Level::parse_status(&raw).ok().map(Level::percent);
        }
        report.raw = Some(raw);
    }

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| status_detail(r, color),
        |r| match (r.level, r.power.as_deref()) {
            (Some(level), _) => level.to_string(),
            (None, Some(power)) => power.to_owned(),
            (None, None) => String::new(),
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn status_detail(r: &StatusReport, color: bool) -> String {
    let state = match (&r.power, r.level) {
        (None, _) => "no status available (scene)".to_owned(),
        (Some(power), Some(level)) if power == "On" => {
            format!("{} at {level}%", output::paint_power(power, color))
        }
        (Some(power), _) => output::paint_power(power, color),
    };
    [
        format!("Name:    {}", r.name),
        format!("Address: {}", r.address),
        format!("Kind:    {}", r.kind),
        format!("State:   {state}"),
    ]
    .join("\n")
}

pub async fn level(
    controller: &Controller,
    args: LevelArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entity = util::resolve(controller, &args.name)?;
    let level = Level::new(args.percent)?;
    entity.set_on_level(args.percent).await?;

    let report = ActionReport::new(
        &entity,
        "level",
        format!("Set {} to {level}", entity.name()),
    )
    .with_level(Some(level));
    print_action(&report, global);
    Ok(())
}

pub async fn brighten(
    controller: &Controller,
    name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entity = util::resolve(controller, name)?;
    entity.brighten().await?;
    let report = ActionReport::new(&entity, "brighten", format!("Brightened {}", entity.name()));
    print_action(&report, global);
    Ok(())
}

pub async fn dim(controller: &Controller, name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let entity = util::resolve(controller, name)?;
    entity.dim().await?;
    let report = ActionReport::new(&entity, "dim", format!("Dimmed {}", entity.name()));
    print_action(&report, global);
    Ok(())
}
