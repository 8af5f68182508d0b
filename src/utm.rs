use std::fmt;

use crate::angular::to_fixed;
use crate::mgrs::{band_letter, E100K_LETTERS, N100K_LETTERS};
use crate::{tmerc, Datum, Error, LatLon, Mgrs};

/// Northern or southern hemisphere
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hemisphere {
    N,
    S,
}

impl Hemisphere {
    /// From a single-letter token, case insensitive
    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Hemisphere> {
        match letter {
            "N" | "n" => Some(Hemisphere::N),
            "S" | "s" => Some(Hemisphere::S),
            _ => None,
        }
    }

    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::N => 'N',
            Hemisphere::S => 'S',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A UTM coordinate: zone, hemisphere and metric easting/northing on a
/// datum. Construction validates the ranges; instances are immutable.
///
/// Grid convergence and point scale are carried only when the value was
/// produced by the forward projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Utm {
    zone: i32,
    hemisphere: Hemisphere,
    easting: f64,
    northing: f64,
    datum: Datum,
    convergence: Option<f64>,
    scale: Option<f64>,
}

impl Utm {
    /// A validated UTM coordinate: zone in 0..=60, easting within the
    /// 120 km..880 km zone width, northing within 0..10 000 km. The datum
    /// is snapped through the catalog (unknown datums become WGS84).
    pub fn new(
        zone: i32,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
        datum: Datum,
    ) -> Result<Utm, Error> {
        Utm::with_convergence(zone, hemisphere, easting, northing, datum, None, None)
    }

    /// As [`Utm::new`], with grid convergence (degrees) and point scale
    /// attached; used by the forward projection.
    pub fn with_convergence(
        zone: i32,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
        datum: Datum,
        convergence: Option<f64>,
        scale: Option<f64>,
    ) -> Result<Utm, Error> {
        if !(120e3..=880e3).contains(&easting) {
            return Err(Error::InvalidEasting(format!(
                "{easting} is not between 120000 and 880000"
            )));
        }
        if !(0.0..=10_000e3).contains(&northing) {
            return Err(Error::InvalidNorthing(format!(
                "{northing} is not between 0 and 10000000"
            )));
        }
        if !(0..=60).contains(&zone) {
            return Err(Error::InvalidZone(format!(
                "{zone} is not between 0 and 60"
            )));
        }

        Ok(Utm {
            zone,
            hemisphere,
            easting,
            northing,
            datum: Datum::lookup(datum),
            convergence,
            scale,
        })
    }

    #[must_use]
    pub fn zone(&self) -> i32 {
        self.zone
    }

    #[must_use]
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
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

    /// Grid convergence in degrees; populated by the forward projection only
    #[must_use]
    pub fn convergence(&self) -> Option<f64> {
        self.convergence
    }

    /// Point scale factor; populated by the forward projection only
    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Inverse projection to geographic coordinates on the same datum
    #[must_use]
    pub fn to_latlon(&self) -> LatLon {
        tmerc::inv(self)
    }

    /// The MGRS grid reference of this coordinate
    pub fn to_mgrs(&self) -> Result<Mgrs, Error> {
        // UTM tolerates zone 0, the MGRS lettering scheme does not
        if self.zone == 0 {
            return Err(Error::InvalidZone(String::from(
                "0 cannot carry an MGRS reference",
            )));
        }

        // The band letter comes from the geographic latitude, which must
        // fall within the lettered bands: northings that are valid UTM can
        // still reach past 84°N or 80°S
        let lat = self.to_latlon().lat();
        if !(-80.0..=84.0).contains(&lat) {
            return Err(Error::InvalidNorthing(format!(
                "{} reaches latitude {lat}°, outside the MGRS bands [-80°, 84°]",
                self.northing
            )));
        }
        let band = band_letter(lat);

        // 100 km square letters: the column alphabet cycles with a period
        // of three zones, the row alphabet with a period of two
        let col = (self.easting / 100e3) as usize % 20;
        let letters = E100K_LETTERS[(self.zone as usize - 1) % 3];
        let e100k = letters.as_bytes()[col - 1] as char;

        let row = (self.northing / 100e3) as usize % 20;
        let letters = N100K_LETTERS[(self.zone as usize - 1) % 2];
        let n100k = letters.as_bytes()[row] as char;

        let easting = to_fixed(self.easting % 100e3, 6);
        let northing = to_fixed(self.northing % 100e3, 6);

        Mgrs::new(self.zone, band, e100k, n100k, easting, northing, self.datum)
    }

    /// Parse `"ZZ H EEEEEE NNNNNNN"`, e.g. `"31 N 448251 5411932"`, on WGS84
    pub fn parse(text: &str) -> Result<Utm, Error> {
        Utm::parse_with_datum(text, Datum::wgs84())
    }

    /// As [`Utm::parse`], interpreting the coordinate on the given datum
    pub fn parse_with_datum(text: &str, datum: Datum) -> Result<Utm, Error> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(Error::InvalidFormat(
                "expected 'zone hemisphere easting northing'",
            ));
        }

        let zone: i32 = tokens[0]
            .parse()
            .map_err(|_| Error::InvalidFormat("zone is not an integer"))?;
        let hemisphere = Hemisphere::from_letter(tokens[1])
            .ok_or(Error::InvalidFormat("hemisphere must be N or S"))?;
        let easting: f64 = tokens[2]
            .parse()
            .map_err(|_| Error::InvalidFormat("easting is not a number"))?;
        let northing: f64 = tokens[3]
            .parse()
            .map_err(|_| Error::InvalidFormat("northing is not a number"))?;

        Utm::new(zone, hemisphere, easting, northing, datum)
    }

    /// Render as `"ZZ H EEEEEE NNNNNNN"` with easting/northing rounded to
    /// `precision` decimals before being printed as whole meters
    #[must_use]
    pub fn formatted(&self, precision: u32) -> String {
        format!(
            "{:02} {} {:.0} {:.0}",
            self.zone,
            self.hemisphere,
            to_fixed(self.easting, precision),
            to_fixed(self.northing, precision)
        )
    }
}

impl fmt::Display for Utm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted(0))
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() -> Result<(), Error> {
        let utm = Utm::new(31, Hemisphere::N, 448_251.0, 5_411_932.0, Datum::wgs84())?;
        assert_eq!(utm.zone(), 31);
        assert_eq!(utm.datum(), Datum::wgs84());

        assert!(matches!(
            Utm::new(31, Hemisphere::N, 1000.0, 5_411_932.0, Datum::wgs84()),
            Err(Error::InvalidEasting(_))
        ));
        assert!(matches!(
            Utm::new(31, Hemisphere::N, 448_251.0, 10_000_001.0, Datum::wgs84()),
            Err(Error::InvalidNorthing(_))
        ));
        assert!(matches!(
            Utm::new(61, Hemisphere::N, 448_251.0, 5_411_932.0, Datum::wgs84()),
            Err(Error::InvalidZone(_))
        ));
        Ok(())
    }

    #[test]
    fn parsing() -> Result<(), Error> {
        let utm = Utm::parse("31 N 448251 5411932")?;
        assert_eq!(utm.zone(), 31);
        assert_eq!(utm.hemisphere(), Hemisphere::N);
        assert_eq!(utm.easting(), 448_251.0);
        assert_eq!(utm.northing(), 5_411_932.0);

        // Lower-case hemisphere letters are accepted
        assert_eq!(Utm::parse("02 s 448251 5411932")?.hemisphere(), Hemisphere::S);

        assert!(matches!(
            Utm::parse("31 N 448251"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            Utm::parse("31 N 448251 5411932 extra"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            Utm::parse("31 Q 448251 5411932"),
            Err(Error::InvalidFormat(_))
        ));
        Ok(())
    }

    #[test]
    fn mgrs_needs_a_band() -> Result<(), Error> {
        // Northings within the UTM bounds can invert to latitudes the MGRS
        // lettering scheme does not cover
        let polar = Utm::new(31, Hemisphere::N, 500e3, 9_999_999.0, Datum::wgs84())?;
        assert!(matches!(polar.to_mgrs(), Err(Error::InvalidNorthing(_))));

        let antarctic = Utm::new(31, Hemisphere::S, 500e3, 100.0, Datum::wgs84())?;
        assert!(matches!(antarctic.to_mgrs(), Err(Error::InvalidNorthing(_))));
        Ok(())
    }

    #[test]
    fn display() -> Result<(), Error> {
        let utm = Utm::new(2, Hemisphere::S, 448_251.4, 5_411_932.6, Datum::wgs84())?;
        assert_eq!(utm.to_string(), "02 S 448251 5411933");
        assert_eq!(utm.formatted(1), "02 S 448251 5411933");
        Ok(())
    }
}
