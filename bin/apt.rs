use navdata_json::datasets::AIRPORTS;
use navdata_json::{convert_dataset, logging::init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let summary = convert_dataset(&AIRPORTS).await?;
    println!("{summary}");
    Ok(())
}
