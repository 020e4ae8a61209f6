//! Compute a hydration plan from the command line
//! Usage: cargo run --bin plan_hydration -- <gender> [weight] [--sip FullCup] [--system imperial] [--locale en-US] [--save]

use clap::Parser;
use drinknow::config::Config;
use drinknow::db::{migrations, Database};
use drinknow::tools::{hydration, settings};

#[derive(Parser, Debug)]
#[command(name = "plan_hydration")]
#[command(about = "DrinkNow - daily drink amount and reminder interval for a body profile")]
pub struct Args {
    /// Male, Female or Other
    gender: String,

    /// Body weight in the chosen system; the gender's default weight when omitted
    weight: Option<String>,

    /// Sip size: FullCup, HalfCup or BigSip
    #[arg(long)]
    sip: Option<String>,

    /// Measure system of the weight: metric or imperial (detected from the locale when omitted)
    #[arg(long)]
    system: Option<String>,

    /// Locale such as en-US (defaults to the environment's locale)
    #[arg(long)]
    locale: Option<String>,

    /// Store the plan in the settings database
    #[arg(long)]
    save: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::load();
    let locale = args.locale.or(config.locale.clone());

    let plan = hydration::plan_hydration(
        locale.as_deref(),
        &args.gender,
        args.weight.as_deref(),
        args.system.as_deref(),
        args.sip.as_deref(),
    )?;

    println!("Measure system: {:?}", plan.measure_system);
    println!(
        "Weight:         {} {} ({} kg)",
        plan.weight_display,
        plan.weight_unit.as_str(),
        plan.weight_kg
    );
    println!(
        "Daily amount:   {} {} (range {}-{} ml)",
        plan.drink_amount_display,
        plan.liquid_unit.as_str(),
        plan.drink_amount.min,
        plan.drink_amount.max
    );
    println!("Sip size:       {} ({} ml)", plan.sip_description, plan.sip_ml);
    println!("Reminder every: {}", plan.session_label);

    if args.save {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let database = Database::new(&config.database_path)?;
        database.with_conn(|conn| migrations::run_migrations(conn))?;

        let response = settings::apply_plan(&database, plan)?;
        println!(
            "Saved to {} (updated {})",
            config.database_path.display(),
            response.settings.updated_at.as_deref().unwrap_or("now")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_positional_and_flags() {
        let args = Args::try_parse_from([
            "plan_hydration", "Male", "80", "--sip", "HalfCup", "--system", "imperial", "--save",
        ])
        .unwrap();
        assert_eq!(args.gender, "Male");
        assert_eq!(args.weight.as_deref(), Some("80"));
        assert_eq!(args.sip.as_deref(), Some("HalfCup"));
        assert_eq!(args.system.as_deref(), Some("imperial"));
        assert_eq!(args.locale, None);
        assert!(args.save);
    }

    #[test]
    fn test_weight_is_optional() {
        let args = Args::try_parse_from(["plan_hydration", "Female"]).unwrap();
        assert_eq!(args.weight, None);
        assert!(!args.save);
    }

    #[test]
    fn test_trailing_flag_without_value_is_rejected() {
        let err = Args::try_parse_from(["plan_hydration", "Male", "80", "--sip"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Args::try_parse_from(["plan_hydration", "--verbose", "Male"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_gender_is_required() {
        let err = Args::try_parse_from(["plan_hydration"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
