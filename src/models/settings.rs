//! User settings model
//!
//! The answers from the welcome wizard plus the app toggles, kept in a
//! single-row table.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::hydration::{drink_amount, session, GenderType, HydrationPlan, MeasureSystem, SipSize};

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub gender: GenderType,
    pub weight_kg: f64,
    pub measure_system: MeasureSystem,
    pub sip_size: SipSize,
    pub drink_amount_ml: u32,
    pub next_break_duration_minutes: u32,
    pub active: bool,
    pub enable_on_startup: bool,
    pub allow_tracking: bool,
    /// Set by the database; None until first saved
    pub updated_at: Option<String>,
}

/// Defaults are what the calculator gives for the default profile
impl Default for UserSettings {
    fn default() -> Self {
        let gender = GenderType::default();
        let weight_kg = gender.default_weight_kg();
        let sip_size = SipSize::default();
        let drink_amount_ml = drink_amount::calc(gender, weight_kg).round() as u32;

        Self {
            gender,
            weight_kg,
            measure_system: MeasureSystem::Metric,
            sip_size,
            drink_amount_ml,
            next_break_duration_minutes: session::calc(drink_amount_ml as f64, sip_size.identifier()),
            active: true,
            enable_on_startup: true,
            allow_tracking: true,
            updated_at: None,
        }
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSettingsUpdate {
    pub gender: Option<GenderType>,
    pub weight_kg: Option<f64>,
    pub measure_system: Option<MeasureSystem>,
    pub sip_size: Option<SipSize>,
    pub drink_amount_ml: Option<u32>,
    pub next_break_duration_minutes: Option<u32>,
    pub active: Option<bool>,
    pub enable_on_startup: Option<bool>,
    pub allow_tracking: Option<bool>,
}

impl UserSettings {
    /// Create from a database row; unknown enum text falls back to the default variant
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let gender: String = row.get("gender")?;
        let measure_system: String = row.get("measure_system")?;
        let sip_size: String = row.get("sip_size")?;

        Ok(Self {
            gender: GenderType::from_str(&gender).unwrap_or_default(),
            weight_kg: row.get("weight_kg")?,
            measure_system: MeasureSystem::from_str(&measure_system).unwrap_or_default(),
            sip_size: SipSize::from_str(&sip_size).unwrap_or_default(),
            drink_amount_ml: row.get("drink_amount_ml")?,
            next_break_duration_minutes: row.get("next_break_duration_minutes")?,
            active: row.get("active")?,
            enable_on_startup: row.get("enable_on_startup")?,
            allow_tracking: row.get("allow_tracking")?,
            updated_at: Some(row.get("updated_at")?),
        })
    }

    /// Get the stored settings, if any were ever saved
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_settings WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(settings) => Ok(Some(settings)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stored settings, or the defaults when nothing is stored yet
    pub fn get_or_default(conn: &Connection) -> DbResult<Self> {
        Ok(Self::get(conn)?.unwrap_or_default())
    }

    /// Write these settings (upsert) and return the stored row
    pub fn save(&self, conn: &Connection) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO user_settings (
                id, gender, weight_kg, measure_system, sip_size, drink_amount_ml,
                next_break_duration_minutes, active, enable_on_startup, allow_tracking
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                gender = excluded.gender,
                weight_kg = excluded.weight_kg,
                measure_system = excluded.measure_system,
                sip_size = excluded.sip_size,
                drink_amount_ml = excluded.drink_amount_ml,
                next_break_duration_minutes = excluded.next_break_duration_minutes,
                active = excluded.active,
                enable_on_startup = excluded.enable_on_startup,
                allow_tracking = excluded.allow_tracking,
                updated_at = datetime('now')
            "#,
            params![
                self.gender.to_db_str(),
                self.weight_kg,
                self.measure_system.to_db_str(),
                self.sip_size.identifier(),
                self.drink_amount_ml,
                self.next_break_duration_minutes,
                self.active,
                self.enable_on_startup,
                self.allow_tracking,
            ],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Merge a partial update onto the stored (or default) settings and save
    pub fn update(conn: &Connection, data: &UserSettingsUpdate) -> DbResult<Self> {
        let mut settings = Self::get_or_default(conn)?;

        if let Some(gender) = data.gender {
            settings.gender = gender;
        }
        if let Some(weight_kg) = data.weight_kg {
            settings.weight_kg = weight_kg;
        }
        if let Some(system) = data.measure_system {
            settings.measure_system = system;
        }
        if let Some(sip_size) = data.sip_size {
            settings.sip_size = sip_size;
        }
        if let Some(ml) = data.drink_amount_ml {
            settings.drink_amount_ml = ml;
        }
        if let Some(minutes) = data.next_break_duration_minutes {
            settings.next_break_duration_minutes = minutes;
        }
        if let Some(active) = data.active {
            settings.active = active;
        }
        if let Some(enable) = data.enable_on_startup {
            settings.enable_on_startup = enable;
        }
        if let Some(allow) = data.allow_tracking {
            settings.allow_tracking = allow;
        }

        settings.save(conn)
    }

    /// Copy the wizard's results into these settings
    pub fn apply_plan(self, plan: &HydrationPlan) -> Self {
        Self {
            gender: plan.gender,
            weight_kg: plan.weight_kg,
            measure_system: plan.measure_system,
            sip_size: plan.sip_size,
            drink_amount_ml: plan.drink_amount.selected,
            next_break_duration_minutes: plan.session_minutes,
            ..self
        }
    }
}
