//! Settings MCP Tools
//!
//! Read and write the persisted user settings.

use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::hydration::{self, HydrationPlan};
use crate::models::{UserSettings, UserSettingsUpdate};

/// Response for get_settings
#[derive(Debug, Serialize)]
pub struct GetSettingsResponse {
    /// false when nothing is stored yet and defaults are returned
    pub stored: bool,
    pub settings: UserSettings,
}

/// Response for apply_plan
#[derive(Debug, Serialize)]
pub struct ApplyPlanResponse {
    pub plan: HydrationPlan,
    pub settings: UserSettings,
}

pub fn get_settings(db: &Database) -> Result<GetSettingsResponse, String> {
    db.with_conn(|conn| {
        let stored = UserSettings::get(conn)?;
        Ok(GetSettingsResponse {
            stored: stored.is_some(),
            settings: stored.unwrap_or_default(),
        })
    })
    .map_err(|e| e.to_string())
}

pub fn save_settings(db: &Database, data: UserSettingsUpdate) -> Result<UserSettings, String> {
    let settings = db
        .with_conn(|conn| UserSettings::update(conn, &data))
        .map_err(|e| e.to_string())?;
    info!(
        drink_amount_ml = settings.drink_amount_ml,
        break_minutes = settings.next_break_duration_minutes,
        "settings saved"
    );
    Ok(settings)
}

/// Store the results of a wizard run, keeping the app toggles as they are
pub fn apply_plan(db: &Database, plan: HydrationPlan) -> Result<ApplyPlanResponse, String> {
    let settings = db
        .with_conn(|conn| UserSettings::get_or_default(conn)?.apply_plan(&plan).save(conn))
        .map_err(|e| e.to_string())?;
    info!(
        gender = ?plan.gender,
        sip_size = plan.sip_size.identifier(),
        session_minutes = plan.session_minutes,
        "welcome plan applied"
    );
    Ok(ApplyPlanResponse { plan, settings })
}

/// The plan the stored settings describe
///
/// The stored amount and interval win over the calculator: a user who picked
/// a value outside the recommended range keeps it, and the range grows to
/// include it.
pub fn current_plan(db: &Database) -> Result<HydrationPlan, String> {
    let settings = db
        .with_conn(UserSettings::get_or_default)
        .map_err(|e| e.to_string())?;
    let amount = hydration::DrinkAmount::from_estimate(hydration::drink_amount::calc(
        settings.gender,
        settings.weight_kg,
    ))
    .with_selected(settings.drink_amount_ml);

    let minutes = settings.next_break_duration_minutes;
    Ok(HydrationPlan {
        session_minutes: minutes,
        session_label: hydration::format_duration(minutes),
        ..hydration::plan_with_amount(
            settings.gender,
            settings.weight_kg,
            settings.measure_system,
            amount,
            settings.sip_size,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::hydration::{GenderType, HydrationRequest, SipSize};

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_get_settings_before_save() {
        let db = setup();
        let response = get_settings(&db).unwrap();
        assert!(!response.stored);
        assert_eq!(response.settings, UserSettings::default());
    }

    #[test]
    fn test_save_then_get() {
        let db = setup();
        let update = UserSettingsUpdate {
            sip_size: Some(SipSize::HalfCup),
            ..Default::default()
        };
        save_settings(&db, update).unwrap();
        let response = get_settings(&db).unwrap();
        assert!(response.stored);
        assert_eq!(response.settings.sip_size, SipSize::HalfCup);
    }

    #[test]
    fn test_apply_plan_and_recompute() {
        let db = setup();
        let plan = hydration::plan(&HydrationRequest {
            gender: GenderType::Male,
            weight: Some(80.0),
            sip_size: SipSize::FullCup,
            ..Default::default()
        });
        let response = apply_plan(&db, plan.clone()).unwrap();
        assert_eq!(response.settings.drink_amount_ml, 2800);

        let recomputed = current_plan(&db).unwrap();
        assert_eq!(recomputed, plan);
    }

    #[test]
    fn test_defaults_agree_with_current_plan() {
        let db = setup();
        let settings = get_settings(&db).unwrap().settings;
        let plan = current_plan(&db).unwrap();
        assert_eq!(plan.drink_amount.selected, settings.drink_amount_ml);
        assert_eq!(plan.session_minutes, settings.next_break_duration_minutes);
        assert_eq!(plan.drink_amount.min, 2016);
        assert_eq!(plan.drink_amount.max, 2464);
    }

    #[test]
    fn test_current_plan_keeps_saved_amount_and_break() {
        let db = setup();
        save_settings(
            &db,
            UserSettingsUpdate {
                drink_amount_ml: Some(5000),
                next_break_duration_minutes: Some(30),
                ..Default::default()
            },
        )
        .unwrap();

        let plan = current_plan(&db).unwrap();
        assert_eq!(plan.drink_amount.selected, 5000);
        assert_eq!(plan.drink_amount.max, 5000);
        assert_eq!(plan.drink_amount.min, 2016);
        assert_eq!(plan.drink_amount_display, 5000.0);
        assert_eq!(plan.session_minutes, 30);
        assert_eq!(plan.session_label, "30 min");
    }
}
