//! Convert a coordinate between geographic, UTM and MGRS notation.
//!
//! The input format is detected: UTM first (`"31 N 448251 5411932"`), then
//! MGRS (`"31U DQ 48251 11932"` or compact), then geographic
//! (`"48.8582 N, 2.2945 E"` or full DMS). All three renditions of the
//! coordinate are printed.
use std::io::{self, BufRead};

use anyhow::Result;
use clap::Parser;
use log::debug;

use gridref::{DmsFormat, LatLon, Mgrs, Utm};

/// MG: geographic/UTM/MGRS coordinate conversion
#[derive(Parser, Debug)]
#[command(name = "mg", version, about)]
struct Cli {
    /// Coordinate to convert. When empty, coordinates are read from stdin,
    /// one per line.
    args: Vec<String>,
}

fn main() -> Result<()> {
    // Filter by setting RUST_LOG to one of {error, warn, info, debug, trace}
    env_logger::init();

    let cli = Cli::parse();
    if cli.args.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            convert(&line);
        }
        return Ok(());
    }

    convert(&cli.args.join(" "));
    Ok(())
}

fn convert(text: &str) {
    let geo = match recognize(text) {
        Ok(geo) => geo,
        Err(e) => {
            eprintln!("cannot make sense of '{text}': {e}");
            return;
        }
    };

    println!("geo:  {}", geo.formatted(DmsFormat::DegreesMinutesSeconds, 2));
    match geo.to_utm() {
        Ok(utm) => {
            println!("utm:  {utm}");
            match utm.to_mgrs() {
                Ok(mgrs) => println!("mgrs: {mgrs}"),
                Err(e) => eprintln!("no MGRS reference: {e}"),
            }
        }
        Err(e) => eprintln!("no UTM projection: {e}"),
    }
}

// The three grammars, most specific first
fn recognize(text: &str) -> Result<LatLon> {
    if let Ok(utm) = Utm::parse(text) {
        debug!("'{text}' parsed as UTM");
        return Ok(utm.to_latlon());
    }
    if let Ok(mgrs) = Mgrs::parse(text) {
        debug!("'{text}' parsed as MGRS");
        return Ok(mgrs.to_utm()?.to_latlon());
    }
    let geo = LatLon::parse(text)?;
    debug!("'{text}' parsed as geographic");
    Ok(geo)
}
