//! Streaming Example
//!
//! Decodes a data file lazily with `read_readings` and feeds the readings
//! straight into `detect_blackouts`, without collecting them into a log.
//! Energy and sample counts are accumulated on the way through.
//!
//! Pass `--limit N` to stop after the first N readings; the decoder does no
//! work past the point where iteration stops.

use voltcraft_parser::{
    detect_blackouts, format_duration, format_report_timestamp, read_readings, ParseOptions,
};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(input_file) = args.get(1) else {
        println!("Usage: stream_readings <data file> [--limit N]");
        println!("Example: stream_readings A0810702 --limit 1440");
        std::process::exit(1);
    };

    let limit = match args.iter().position(|a| a == "--limit") {
        Some(i) => args
            .get(i + 1)
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| anyhow::anyhow!("--limit needs a number"))?,
        None => usize::MAX,
    };

    let data = std::fs::read(input_file)?;
    println!("Streaming: {} ({} bytes)", input_file, data.len());

    let mut samples = 0usize;
    let mut consuming = 0usize;
    let mut energy_kwh = 0.0;

    let readings = read_readings(&data, ParseOptions::default())
        .take(limit)
        .inspect(|reading| {
            if let Ok(reading) = reading {
                samples += 1;
                energy_kwh += reading.energy_kwh();
                if reading.is_consuming() {
                    consuming += 1;
                }
            }
        });

    println!("\nBlackouts:");
    let mut blackouts = 0usize;
    for blackout in detect_blackouts(readings) {
        let blackout = blackout?;
        blackouts += 1;
        println!(
            "  [{}] no samples for {}",
            format_report_timestamp(&blackout.start),
            format_duration(blackout.duration)
        );
    }
    if blackouts == 0 {
        println!("  none");
    }

    println!("\nSummary:");
    println!("  Readings: {}", samples);
    println!("  Minutes with load: {}", consuming);
    println!("  Energy: {:.3} kWh", energy_kwh);

    Ok(())
}
