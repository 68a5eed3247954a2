use navdata_json::datasets::AIRWAYS;
use navdata_json::{convert_dataset, logging::init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let summary = convert_dataset(&AIRWAYS).await?;
    println!("{summary}");
    Ok(())
}
