use clap::{Arg, ArgAction, Command};
use navdata_json::Dataset;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("gen")
        .about("Write a synthetic CSV for a navdata dataset to stdout")
        .arg(Arg::new("dataset").long("dataset").required(true))
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_parser(clap::value_parser!(u64))
                .default_value("100"),
        )
        .arg(
            Arg::new("no_extra")
                .long("no-extra")
                .help("Omit the NOTES column that the conversion drops")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let name = matches
        .get_one::<String>("dataset")
        .map(String::as_str)
        .unwrap_or_default();
    let dataset =
        Dataset::by_name(name).ok_or_else(|| anyhow::anyhow!("unknown dataset '{name}'"))?;
    let rows = matches.get_one::<u64>("rows").copied().unwrap_or(100);
    let with_extra = !matches.get_flag("no_extra");

    let mut out = io::BufWriter::new(io::stdout().lock());

    write!(&mut out, "{}", dataset.fields.join(","))?;
    if with_extra {
        write!(&mut out, ",NOTES")?;
    }
    writeln!(&mut out)?;

    // Deterministic rows so generated fixtures convert to stable output.
    for i in 0..rows {
        let cells: Vec<String> = dataset.fields.iter().map(|f| cell(f, i)).collect();
        write!(&mut out, "{}", cells.join(","))?;
        if with_extra {
            write!(&mut out, ",\"row {i}, synthetic\"")?;
        }
        writeln!(&mut out)?;
        if i % 10_000 == 0 {
            out.flush()?;
        }
    }

    out.flush()?;
    Ok(())
}

fn cell(field: &str, i: u64) -> String {
    let lat = 25.0 + (i % 2_400) as f64 / 100.0;
    let lon = -125.0 + (i % 5_800) as f64 / 100.0;
    match field {
        "LAT_DECIMAL" => format!("{lat:.6}"),
        "LONG_DECIMAL" => format!("{lon:.6}"),
        "ARPT_ID" => format!("K{:03}", i % 1_000),
        "FIX_ID" => format!("FX{:03}", i % 1_000),
        "AWY_ID" => format!("J{}", i + 1),
        "AIRWAY_STRING" => format!("FX{:03} FX{:03}", i % 1_000, (i + 1) % 1_000),
        "sid_name" | "star_name" => format!("PROC{}.{}", i % 100, i % 10),
        "served_arpt" => format!("K{:03}", i % 1_000),
        "fixes" => format!(
            "FX{:03} FX{:03} FX{:03}",
            i % 1_000,
            (i + 7) % 1_000,
            (i + 13) % 1_000
        ),
        _ => format!("v{i}"),
    }
}
