// ── Resolved entity handle ──
//
// An `Entity` is built fresh from a registry record on every lookup and
// dropped when the request is done. Nothing is cached: every read is a
// live status query and every command goes straight to the controller.

use std::sync::Arc;

use tracing::{debug, info};

use isyctl_api::RestClient;

use crate::command::Command;
use crate::error::CoreError;
use crate::model::{Address, EntityKind, EntityRecord, Level, PowerState};

/// A controllable device or scene, bound to the controller client.
#[derive(Debug, Clone)]
pub struct Entity {
    record: Arc<EntityRecord>,
    client: RestClient,
}

impl Entity {
    pub(crate) fn new(record: Arc<EntityRecord>, client: RestClient) -> Self {
        Self { record, client }
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        self.record.pattern.as_str()
    }

    pub fn address(&self) -> &Address {
        &self.record.address
    }

    pub fn kind(&self) -> EntityKind {
        self.record.kind()
    }

    pub fn is_scene(&self) -> bool {
        self.kind() == EntityKind::Scene
    }

    /// Registered dimmability; always `false` for scenes.
    pub fn is_dimmable(&self) -> bool {
        self.kind() == EntityKind::DimmableDevice
    }

    pub fn record(&self) -> &EntityRecord {
        &self.record
    }

    // ── Status reads ─────────────────────────────────────────────────

    /// The formatted status value, e.g. `"On"`, `"Off"`, `"37%"`.
    pub async fn raw_status(&self) -> Result<String, CoreError> {
        self.ensure_not_scene("status")?;

        let status = self.client.node_status(self.address().as_str()).await?;
        let raw = status
            .primary()
            .and_then(|p| p.formatted.clone().or_else(|| p.value.clone()))
            .ok_or_else(|| CoreError::Api {
                message: format!("controller reported no status for {}", self.address()),
                status: None,
            })?;

        debug!(name = self.name(), raw = %raw, "status read");
        Ok(raw)
    }

    pub async fn power_state(&self) -> Result<PowerState, CoreError> {
        let raw = self.raw_status().await?;
        Ok(PowerState::from_status(&raw))
    }

    pub async fn on_level(&self) -> Result<Level, CoreError> {
        let raw = self.raw_status().await?;
        Level::parse_status(&raw)
    }

    /// Live capability probe: a `%`-prefixed unit of measure means the
    /// channel accepts levels. Independent of the registered flag.
    pub async fn probe_dimmable(&self) -> Result<bool, CoreError> {
        self.ensure_not_scene("probe dimmable")?;

        let status = self.client.node_status(self.address().as_str()).await?;
        let dimmable = status
            .primary()
            .and_then(|p| p.uom.as_deref())
            .is_some_and(|uom| uom.trim_start().starts_with('%'));

        debug!(name = self.name(), dimmable, "probed dimming capability");
        Ok(dimmable)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Validate `percent` and set the on-level. Nothing is sent when the
    /// value is out of range or the entity cannot dim.
    pub async fn set_on_level(&self, percent: i64) -> Result<(), CoreError> {
        self.ensure_dimmable("set level")?;
        let level = Level::new(percent)?;
        self.send(Command::OnLevel(level)).await
    }

    pub async fn turn_on(&self) -> Result<(), CoreError> {
        self.send(Command::On).await
    }

    pub async fn turn_off(&self) -> Result<(), CoreError> {
        self.send(Command::Off).await
    }

    pub async fn turn_fast_on(&self) -> Result<(), CoreError> {
        self.send(Command::FastOn).await
    }

    pub async fn turn_fast_off(&self) -> Result<(), CoreError> {
        self.send(Command::FastOff).await
    }

    pub async fn brighten(&self) -> Result<(), CoreError> {
        self.send(Command::Brighten).await
    }

    pub async fn dim(&self) -> Result<(), CoreError> {
        self.send(Command::Dim).await
    }

    /// Issue a command. A non-error HTTP response counts as success.
    pub async fn send(&self, command: Command) -> Result<(), CoreError> {
        if command.requires_dimmable() {
            self.ensure_dimmable(command.code())?;
        }

        self.client
            .node_command(self.address().as_str(), command.code(), command.argument())
            .await?;

        info!(name = self.name(), address = %self.address(), %command, "command sent");
        Ok(())
    }

    // ── Guards ───────────────────────────────────────────────────────

    fn describe(&self) -> String {
        format!("{} '{}'", self.kind(), self.name())
    }

    fn ensure_not_scene(&self, operation: &str) -> Result<(), CoreError> {
        if self.is_scene() {
            return Err(CoreError::not_applicable(operation, self.describe()));
        }
        Ok(())
    }

    fn ensure_dimmable(&self, operation: &str) -> Result<(), CoreError> {
        if !self.is_dimmable() {
            return Err(CoreError::not_applicable(operation, self.describe()));
        }
        Ok(())
    }
}
