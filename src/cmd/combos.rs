use crate::reports;
use clap::Args;
use festplan::catalog::Catalog;
use festplan::combos::ComboRules;
use festplan::error::PlanResult;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ComboArgs {
    /// Only this date.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Max pairs shown per date.
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ComboArgs, catalog_path: &str) -> PlanResult<()> {
    let catalog = Catalog::open(catalog_path)?;
    let rules = ComboRules::default();

    let mut days = rules.find(&catalog.instances);
    if let Some(date) = &args.date {
        days.retain(|d| d.date == date.as_str());
    }
    info!("🔗 {} dates with combo pairs", days.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        reports::print_combos(&days, args.limit);
    }
    Ok(())
}
