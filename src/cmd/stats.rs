use crate::reports;
use clap::Args;
use festplan::catalog::Catalog;
use festplan::error::PlanResult;
use festplan::stats::catalog_stats;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &StatsArgs, catalog_path: &str) -> PlanResult<()> {
    let catalog = Catalog::open(catalog_path)?;
    let stats = catalog_stats(&catalog.instances);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        reports::print_stats(&stats);
    }
    Ok(())
}
