use anyhow::Context;
use clap::Parser;
use kst3320_rs::{
    decode_uplink, init_logger, log_info, FillGeometry, Kst3320Decoder, ReadingValue,
    UplinkMessage,
};

#[derive(Parser)]
#[command(name = "kst3320-cli")]
#[command(about = "Decode KST3320 LoRaWAN sensor payloads")]
struct Cli {
    /// Hex-encoded uplink payload
    payload: String,

    /// Series identifier attached to every output record
    #[arg(long)]
    serie: Option<String>,

    /// Reception timestamp attached to every output record
    #[arg(long)]
    time: Option<String>,

    /// Total height of the monitored bin in millimeters
    #[arg(long, default_value_t = 4000.0)]
    bin_height: f64,

    /// Distance from the sensor face to the fill line in millimeters
    #[arg(long, default_value_t = 0.0)]
    fill_line_offset: f64,

    /// Print records as a JSON array instead of logging one line per
    /// reading
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    let decoder = Kst3320Decoder::with_geometry(FillGeometry {
        height_above_fill_line: cli.fill_line_offset,
        distance_to_bottom: cli.bin_height,
    });
    let uplink = UplinkMessage {
        value: cli.payload,
        serie: cli.serie,
        time: cli.time,
    };

    let records = decode_uplink(&decoder, &uplink);

    if cli.json {
        let out =
            serde_json::to_string_pretty(&records).context("serializing decoded records")?;
        println!("{out}");
    } else {
        for record in &records {
            let name = &record.reading.name;
            let line = match (&record.reading.value, &record.reading.unit) {
                (ReadingValue::Numeric(value), Some(unit)) => format!("{name} = {value} {unit}"),
                (ReadingValue::Numeric(value), None) => format!("{name} = {value}"),
                (ReadingValue::Text(value), _) => format!("{name} = {value}"),
                (ReadingValue::Location(point), _) => {
                    format!("{name} = {}, {}", point.lat, point.lng)
                }
            };
            log_info(&line);
        }
    }

    Ok(())
}
