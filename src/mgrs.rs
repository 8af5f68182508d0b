use std::fmt;

use crate::angular::truncate_digits;
use crate::utm::Hemisphere;
use crate::{Datum, Error, LatLon, Utm};

/// Latitude band letters for the 8° bands from 80°S; `X` is repeated to
/// cover the stretched 72°N–84°N band. `A`, `B`, `I`, `O`, `Y` and `Z`
/// never appear.
pub(crate) const LAT_BANDS: &str = "CDEFGHJKLMNPQRSTUVWXX";

/// 100 km column letters; the alphabet cycles with a period of three zones
pub(crate) const E100K_LETTERS: [&str; 3] = ["ABCDEFGH", "JKLMNPQR", "STUVWXYZ"];

/// 100 km row letters; even-numbered zones are offset by five letters
pub(crate) const N100K_LETTERS: [&str; 2] = ["ABCDEFGHJKLMNPQRSTUV", "FGHJKLMNPQRSTUVABCDE"];

/// The band letter for a latitude within the UTM domain
pub(crate) fn band_letter(lat: f64) -> char {
    LAT_BANDS.as_bytes()[(lat / 8.0 + 10.0).floor() as usize] as char
}

/// An MGRS grid reference: zone, band letter, the two 100 km square
/// letters, and the easting/northing within the square. Construction
/// validates zone and band; instances are immutable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mgrs {
    zone: i32,
    band: char,
    e100k: char,
    n100k: char,
    easting: f64,
    northing: f64,
    datum: Datum,
}

impl Mgrs {
    /// A validated grid reference. Letters are folded to upper case; the
    /// datum is snapped through the catalog (unknown datums become WGS84).
    pub fn new(
        zone: i32,
        band: char,
        e100k: char,
        n100k: char,
        easting: f64,
        northing: f64,
        datum: Datum,
    ) -> Result<Mgrs, Error> {
        let band = band.to_ascii_uppercase();
        if !LAT_BANDS.contains(band) {
            return Err(Error::InvalidBand(band));
        }
        if !(1..=60).contains(&zone) {
            return Err(Error::InvalidZone(format!(
                "{zone} is not between 1 and 60"
            )));
        }

        Ok(Mgrs {
            zone,
            band,
            e100k: e100k.to_ascii_uppercase(),
            n100k: n100k.to_ascii_uppercase(),
            easting,
            northing,
            datum: Datum::lookup(datum),
        })
    }

    #[must_use]
    pub fn zone(&self) -> i32 {
        self.zone
    }

    #[must_use]
    pub fn band(&self) -> char {
        self.band
    }

    #[must_use]
    pub fn e100k(&self) -> char {
        self.e100k
    }

    #[must_use]
    pub fn n100k(&self) -> char {
        self.n100k
    }

    #[must_use]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    #[must_use]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    #[must_use]
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// The UTM coordinate of this grid reference
    pub fn to_utm(&self) -> Result<Utm, Error> {
        let hemisphere = if self.band >= 'N' {
            Hemisphere::N
        } else {
            Hemisphere::S
        };

        // Easting of the 100 km column within the zone
        let letters = E100K_LETTERS[(self.zone as usize - 1) % 3];
        let col = letters
            .find(self.e100k)
            .ok_or_else(|| {
                Error::InvalidEasting(format!(
                    "no column letter '{}' in zone {}",
                    self.e100k, self.zone
                ))
            })?
            + 1;
        let e100k_num = col as f64 * 100e3;

        // Northing of the 100 km row, modulo the 2000 km cycle
        let letters = N100K_LETTERS[(self.zone as usize - 1) % 2];
        let row = letters.find(self.n100k).ok_or_else(|| {
            Error::InvalidNorthing(format!(
                "no row letter '{}' in zone {}",
                self.n100k, self.zone
            ))
        })?;
        let n100k_num = row as f64 * 100e3;

        // Northing of the bottom of the band, extended down to the start
        // of the 100 km square straddling it
        let band_index = LAT_BANDS.find(self.band).unwrap_or(0) as i32;
        let band_lat = ((band_index - 10) * 8) as f64;
        let n_band = (LatLon::new(band_lat, 0.0, self.datum).to_utm()?.northing() / 100e3).floor()
            * 100e3;

        // Row letters repeat every 2000 km; climb north until the row
        // falls inside the band
        let mut n2m = 0.0;
        while n2m + n100k_num + self.northing < n_band {
            n2m += 2000e3;
        }

        Utm::new(
            self.zone,
            hemisphere,
            e100k_num + self.easting,
            n2m + n100k_num + self.northing,
            self.datum,
        )
    }

    /// Parse a grid reference, either as four whitespace-separated fields
    /// (`"31U DQ 48251 11932"`) or as one compact token (`"31UDQ4825111932"`).
    /// The length of the digit groups encodes the precision: 5 digits are
    /// meters, 1 digit is 10 km.
    pub fn parse(text: &str) -> Result<Mgrs, Error> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let (zone_band, en100k, east_grid, north_grid) = match tokens[..] {
            [zb, en, e, n] => (
                String::from(zb),
                String::from(en),
                String::from(e),
                String::from(n),
            ),
            _ => {
                // Compact form: squeeze out the whitespace and slice
                let compact: String = tokens.concat();
                if !compact.is_ascii() || compact.len() < 5 {
                    return Err(Error::InvalidFormat("incomplete MGRS reference"));
                }
                let grid = &compact[5..];
                if grid.len() % 2 != 0 {
                    return Err(Error::InvalidGrid("odd number of grid digits"));
                }
                let half = 5 + grid.len() / 2;
                (
                    String::from(&compact[..3]),
                    String::from(&compact[3..5]),
                    String::from(&compact[5..half]),
                    String::from(&compact[half..]),
                )
            }
        };

        if !zone_band.is_ascii() || zone_band.len() < 3 || !en100k.is_ascii() || en100k.len() != 2 {
            return Err(Error::InvalidFormat("malformed zone or square letters"));
        }

        let zone: i32 = zone_band[..2]
            .parse()
            .map_err(|_| Error::InvalidZone(format!("'{}' is not a number", &zone_band[..2])))?;
        let band = zone_band.as_bytes()[2] as char;
        let e100k = en100k.as_bytes()[0] as char;
        let n100k = en100k.as_bytes()[1] as char;

        let east_grid: f64 = east_grid
            .parse()
            .map_err(|_| Error::InvalidGrid("easting digits are not a number"))?;
        let north_grid: f64 = north_grid
            .parse()
            .map_err(|_| Error::InvalidGrid("northing digits are not a number"))?;

        Mgrs::new(
            zone,
            band,
            e100k,
            n100k,
            Mgrs::fix_grid(east_grid)?,
            Mgrs::fix_grid(north_grid)?,
            Datum::wgs84(),
        )
    }

    /// Normalize a digit group to meters: shift the decimal magnitude up
    /// until the value reaches the 100 km square, then back off one step.
    /// `5` → `50000`, `12345` → `12345`, `500000` → `50000`. Negative and
    /// non-finite values would never leave the widening loop and are
    /// rejected up front.
    pub fn fix_grid(grid: f64) -> Result<f64, Error> {
        if !grid.is_finite() || grid < 0.0 {
            return Err(Error::InvalidGrid("digit group is not a non-negative number"));
        }
        if grid == 0.0 {
            return Ok(0.0);
        }
        let mut grid = grid;
        while grid < 100_000.0 {
            grid *= 10.0;
        }
        if grid >= 100_000.0 {
            grid /= 10.0;
        }
        Ok(grid)
    }

    /// Render with `precision` digits per group (1-5, for 10 km down to
    /// meter precision), e.g. `"31U DQ 48251 11932"`
    #[must_use]
    pub fn formatted(&self, precision: u32) -> String {
        let width = precision as usize;
        let easting = truncate_digits(self.easting, precision);
        let northing = truncate_digits(self.northing, precision);
        format!(
            "{:02}{} {}{} {:0width$.0} {:0width$.0}",
            self.zone, self.band, self.e100k, self.n100k, easting, northing
        )
    }
}

impl fmt::Display for Mgrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted(5))
    }
}

// ----- T E S T S ---------------------------------------------------------------------
