//! Device registry handlers.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use isyctl_core::{Controller, EntityKind, EntityRecord, SeedRecord};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config::{self, Session};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Kind")]
    kind: EntityKind,
}

impl From<&EntityRecord> for DeviceRow {
    fn from(r: &EntityRecord) -> Self {
        Self {
            name: r.pattern.to_string(),
            address: r.address.to_string(),
            kind: r.kind(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    name: String,
    address: String,
    registered_dimmable: bool,
    reports_dimmable: bool,
}

fn probe_detail(p: &ProbeReport) -> String {
    let verdict = match (p.registered_dimmable, p.reports_dimmable) {
        (true, true) | (false, false) => "matches registration",
        (false, true) => "accepts levels but is registered as on/off",
        (true, false) => "registered as dimmable but reports no levels",
    };
    [
        format!("Name:       {}", p.name),
        format!("Address:    {}", p.address),
        format!("Dimmable:   {}", if p.reports_dimmable { "yes" } else { "no" }),
        format!("Registered: {verdict}"),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: DevicesArgs,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let records = controller.registry().records();
            let out = output::render_list(
                &global.output,
                records.as_slice(),
                |r: &Arc<EntityRecord>| DeviceRow::from(r.as_ref()),
                |r| r.pattern.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Discover { save } => {
            let report = controller.discover().await?;
            let out = output::render_list(
                &global.output,
                &report.added,
                |r| DeviceRow::from(r),
                |r| r.pattern.to_string(),
            );
            output::print_output(&out, global.quiet);

            if !global.quiet {
                eprintln!(
                    "✓ Discovered {} new device(s), {} skipped",
                    report.added.len(),
                    report.skipped
                );
            }

            if save && !report.added.is_empty() {
                let prompt = format!(
                    "Save {} device(s) to profile '{}'?",
                    report.added.len(),
                    session.profile_name
                );
                if util::confirm(&prompt, global.yes)? {
                    let seeds: Vec<SeedRecord> = report
                        .added
                        .iter()
                        .map(|r| SeedRecord::new(r.pattern.as_str(), r.address.as_str(), r.dimmable))
                        .collect();
                    let saved = config::append_devices(&session.profile_name, &seeds)?;
                    if !global.quiet {
                        eprintln!("✓ Saved {saved} device(s) to '{}'", session.profile_name);
                    }
                }
            }
            Ok(())
        }

        DevicesCommand::Probe(args) => {
            let entity = util::resolve(controller, &args.name)?;
            let reports_dimmable = entity.probe_dimmable().await?;
            let probe = ProbeReport {
                name: entity.name().to_owned(),
                address: entity.address().to_string(),
                registered_dimmable: entity.is_dimmable(),
                reports_dimmable,
            };
            let out = output::render_single(&global.output, &probe, probe_detail, |p| {
                p.reports_dimmable.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
