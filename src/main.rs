use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use registry_pipeline::{
    prepare_csv, run_file, ClassificationTable, PipelineOptions,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("prepare") => run_prepare(&args[2..]),
        Some("process") => run_process(&args[2..]),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Registry Pipeline v{}", registry_pipeline::VERSION);
    println!();
    println!("Usage:");
    println!("  registry-pipeline prepare <input.csv> <output.csv>");
    println!("      Append a simplified_category slug column to a registry export");
    println!();
    println!("  registry-pipeline process <input.csv> <output-dir> [options]");
    println!("      Run the full cleanup pipeline");
    println!();
    println!("Options:");
    println!("  --no-region          Skip the Amaravati Capital Region geography gate");
    println!("  --status <literal>   Business status literal (default: approved)");
    println!("  --table <file.json>  External slug → label classification table");
}

fn run_prepare(args: &[String]) -> Result<()> {
    let [input, output] = args else {
        bail!("Usage: registry-pipeline prepare <input.csv> <output.csv>");
    };

    println!("🏷️  Slug pre-pass: {} → {}", input, output);

    let count = prepare_csv(Path::new(input), Path::new(output))?;
    println!("✓ Wrote {} rows with simplified_category column", count);

    Ok(())
}

fn run_process(args: &[String]) -> Result<()> {
    let mut positional = Vec::new();
    let mut options = PipelineOptions::default();
    let mut table_path: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--no-region" => options.region = None,
            "--status" => match iter.next() {
                Some(literal) => options.business_status = literal.clone(),
                None => bail!("--status requires a value"),
            },
            "--table" => match iter.next() {
                Some(path) => table_path = Some(path.clone()),
                None => bail!("--table requires a file path"),
            },
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            other => positional.push(other.to_string()),
        }
    }

    let [input, out_dir] = positional.as_slice() else {
        bail!("Usage: registry-pipeline process <input.csv> <output-dir> [options]");
    };

    let table = match &table_path {
        Some(path) => ClassificationTable::from_file(path)?,
        None => ClassificationTable::with_defaults(),
    };

    println!("🗄️  Registry Cleanup Pipeline");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n📂 Processing {}...", input);
    println!("✓ Classification table: {} slugs", table.len());

    let (report, diagnostics) = run_file(
        Path::new(input),
        Path::new(out_dir),
        table,
        options,
    )?;

    for line in &diagnostics {
        eprintln!("⚠️  {}", line);
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Businesses accepted:  {}", report.accepted);
    println!("✓ Categories created:   {}", report.categories);
    println!("✓ Records rejected:     {}", report.rejected);
    if report.invalid_dates > 0 {
        println!("⚠️  Invalid dates:       {}", report.invalid_dates);
    }
    if let Some(log) = &report.error_log {
        println!("\nRejections were logged to {}", log.display());
    }
    println!("\n🎉 CSV files generated successfully.");

    Ok(())
}
