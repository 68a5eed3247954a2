use navdata_json::datasets::{SIDS, STARS};
use navdata_json::{logging::init_logging, run_enabled};
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    for summary in run_enabled(&[SIDS, STARS], Path::new("")).await? {
        println!("{summary}");
    }
    Ok(())
}
