use navdata_json::datasets::FIXES;
use navdata_json::{convert_dataset, logging::init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let summary = convert_dataset(&FIXES).await?;
    println!("{summary}");
    Ok(())
}
