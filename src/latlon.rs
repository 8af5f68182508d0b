use std::fmt;

use crate::dms::{parse_dms, to_lat, to_lon, DmsFormat};
use crate::{tmerc, Datum, Error, Transform, Utm, Vector};

/// A geographic coordinate: latitude and longitude in degrees on a
/// reference datum. Instances are immutable; conversions return new values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    lat: f64,
    lon: f64,
    datum: Datum,
}

impl LatLon {
    /// A coordinate on the given datum. The datum is snapped through the
    /// catalog; anything unknown becomes WGS84.
    #[must_use]
    pub fn new(lat: f64, lon: f64, datum: Datum) -> LatLon {
        LatLon {
            lat,
            lon,
            datum: Datum::lookup(datum),
        }
    }

    /// A coordinate on WGS84
    #[must_use]
    pub fn wgs84(lat: f64, lon: f64) -> LatLon {
        LatLon::new(lat, lon, Datum::wgs84())
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    #[must_use]
    pub fn datum(&self) -> Datum {
        self.datum
    }

    // ----- P R O J E C T I O N ---------------------------------------------------

    /// The UTM projection of this coordinate, on the same datum
    pub fn to_utm(&self) -> Result<Utm, Error> {
        tmerc::fwd(self)
    }

    // ----- C A R T E S I A N -----------------------------------------------------

    /// The geocentric (ECEF) position of this coordinate on the surface of
    /// its datum's ellipsoid
    #[must_use]
    pub fn to_cartesian(&self) -> Vector {
        let phi = self.lat.to_radians();
        let lambda = self.lon.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let a = self.datum.ellipsoid.semimajor_axis();
        let es = self.datum.ellipsoid.eccentricity_squared();

        // Prime vertical radius of curvature
        let nu = a / (1.0 - es * sin_phi * sin_phi).sqrt();

        Vector::new(
            nu * cos_phi * cos_lambda,
            nu * cos_phi * sin_lambda,
            nu * (1.0 - es) * sin_phi,
        )
    }

    /// The coordinate on `datum` whose surface point has the given
    /// geocentric position, by Bowring's closed form.
    #[must_use]
    pub fn from_cartesian(position: Vector, datum: Datum) -> LatLon {
        let datum = Datum::lookup(datum);
        let a = datum.ellipsoid.semimajor_axis();
        let b = datum.ellipsoid.semiminor_axis();
        let es = datum.ellipsoid.eccentricity_squared();
        let eps = datum.ellipsoid.second_eccentricity_squared();

        // Distances from the polar axis and from the geocenter
        let p = position.x.hypot(position.y);
        let r = p.hypot(position.z);

        // Parametric latitude, with Bowring's correction term
        let tan_beta = (b * position.z) / (a * p) * (1.0 + eps * b / r);
        let beta = tan_beta.atan();
        let (sin_beta, cos_beta) = beta.sin_cos();

        // tan β is 0/0 at the geocenter; the equator is the conventional answer
        let lat = if cos_beta.is_nan() {
            0.0
        } else {
            (position.z + eps * b * sin_beta.powi(3))
                .atan2(p - es * a * cos_beta.powi(3))
                .to_degrees()
        };
        let lon = position.y.atan2(position.x).to_degrees();

        LatLon::new(lat, lon, datum)
    }

    // ----- D A T U M   S H I F T S -----------------------------------------------

    /// The same point expressed on another datum. Conversions between two
    /// non-WGS84 datums go through WGS84, so the Helmert parameters of both
    /// datums come into play.
    #[must_use]
    pub fn convert_datum(&self, target: Datum) -> LatLon {
        let target = Datum::lookup(target);
        if self.datum == target {
            return *self;
        }

        // Hub-and-spoke: hop to WGS84 first unless one side already is
        let source = if self.datum == Datum::wgs84() || target == Datum::wgs84() {
            *self
        } else {
            self.convert_datum(Datum::wgs84())
        };

        // Catalog parameters take WGS84 into the datum; the reverse hop
        // negates them
        let transform = if target == Datum::wgs84() {
            source.datum.transform.negated()
        } else {
            target.transform
        };

        source.shifted(&transform, target)
    }

    // The 7-parameter Helmert shift in the small-angle approximation,
    // landing on `target`
    fn shifted(&self, t: &Transform, target: Datum) -> LatLon {
        let v = self.to_cartesian();

        let s1 = 1.0 + t.s / 1e6;
        let rx = (t.rx / 3600.0).to_radians();
        let ry = (t.ry / 3600.0).to_radians();
        let rz = (t.rz / 3600.0).to_radians();

        let shifted = Vector::new(
            t.tx + v.x * s1 - v.y * rz + v.z * ry,
            t.ty + v.x * rz + v.y * s1 - v.z * rx,
            t.tz - v.x * ry + v.y * rx + v.z * s1,
        );

        LatLon::from_cartesian(shifted, target)
    }

    // ----- T E X T ---------------------------------------------------------------

    /// Parse `"latitude, longitude"` on WGS84. Each side is signed decimal
    /// degrees or full degrees-minutes-seconds punctuation, and must carry
    /// a sign: either a leading minus or a hemisphere letter at either end.
    /// `S` and `W` negate.
    pub fn parse(text: &str) -> Result<LatLon, Error> {
        LatLon::parse_with_datum(text, Datum::wgs84())
    }

    /// [`LatLon::parse`] onto an explicit datum
    pub fn parse_with_datum(text: &str, datum: Datum) -> Result<LatLon, Error> {
        let (lat, lon) = text
            .split_once(',')
            .ok_or(Error::ParseError("expected 'latitude, longitude'"))?;
        Ok(LatLon::new(
            parse_component(lat, 'N', 'S')?,
            parse_component(lon, 'E', 'W')?,
            datum,
        ))
    }

    /// Render as `"lat, lon"` with hemisphere letters in the given DMS
    /// format, e.g. `"48° 51' 29.52\" N, 002° 17' 40.20\" E"`
    #[must_use]
    pub fn formatted(&self, format: DmsFormat, decimal_places: u32) -> String {
        format!(
            "{}, {}",
            to_lat(self.lat, format, decimal_places),
            to_lon(self.lon, format, decimal_places)
        )
    }
}

// One side of a "lat, lon" pair. The sign must be explicit: a leading
// minus, or the hemisphere letter at either end. Any other alphabetic
// character is decoration and is stripped before the DMS parse.
fn parse_component(text: &str, positive: char, negative: char) -> Result<f64, Error> {
    let trimmed = text.trim();
    let first = trimmed
        .chars()
        .next()
        .ok_or(Error::ParseError("empty coordinate component"))?;
    let last = trimmed.chars().next_back().unwrap_or(first);

    let negated = first == '-'
        || first.eq_ignore_ascii_case(&negative)
        || last.eq_ignore_ascii_case(&negative);
    let affirmative =
        first.eq_ignore_ascii_case(&positive) || last.eq_ignore_ascii_case(&positive);
    if !negated && !affirmative {
        return Err(Error::ParseError("no sign or hemisphere letter found"));
    }

    let body: String = trimmed.chars().filter(|c| !c.is_ascii_alphabetic()).collect();
    let degrees = parse_dms(body.trim().trim_start_matches('-'))?;

    if negated {
        return Ok(-degrees);
    }
    Ok(degrees)
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted(DmsFormat::DegreesMinutesSeconds, 2))
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn cartesian() {
        // The WGS84 equator at the prime meridian sits one semimajor axis
        // out along x
        let origin = LatLon::wgs84(0.0, 0.0).to_cartesian();
        assert_float_eq!(origin.x, 6_378_137.0, abs <= 1e-9);
        assert_float_eq!(origin.y, 0.0, abs <= 1e-9);
        assert_float_eq!(origin.z, 0.0, abs <= 1e-9);

        // The north pole sits one semiminor axis up along z
        let pole = LatLon::wgs84(90.0, 0.0).to_cartesian();
        assert_float_eq!(pole.x, 0.0, abs <= 1e-6);
        assert_float_eq!(pole.z, 6_356_752.314_245, abs <= 1e-6);

        // And back again
        let geo = LatLon::from_cartesian(LatLon::wgs84(55.0, 12.0).to_cartesian(), Datum::wgs84());
        assert_float_eq!(geo.lat(), 55.0, abs <= 1e-9);
        assert_float_eq!(geo.lon(), 12.0, abs <= 1e-9);

        // The geocenter has no latitude; the equator is the answer by convention
        let center = LatLon::from_cartesian(Vector::new(0.0, 0.0, 0.0), Datum::wgs84());
        assert_eq!(center.lat(), 0.0);
        assert_eq!(center.lon(), 0.0);
    }

    #[test]
    fn datum_shift() -> Result<(), Error> {
        // Greenwich Observatory: OSGB36 differs from WGS84 by roughly 100 m
        let wgs = LatLon::wgs84(51.477_811, -0.001_475);
        let osgb = wgs.convert_datum(Datum::named("OSGB36")?);
        assert_float_eq!(osgb.lat(), 51.477_4, abs <= 1e-3);
        assert_float_eq!(osgb.lon(), 0.000_0, abs <= 1e-3);

        // The round trip restores the input to well under a millimeter
        let back = osgb.convert_datum(Datum::wgs84());
        assert_float_eq!(back.lat(), wgs.lat(), abs <= 1e-8);
        assert_float_eq!(back.lon(), wgs.lon(), abs <= 1e-8);

        // Non-WGS84 to non-WGS84 goes through the hub
        let nad = osgb.convert_datum(Datum::named("NAD83")?);
        let there_and_back = nad.convert_datum(Datum::named("OSGB36")?);
        assert_float_eq!(there_and_back.lat(), osgb.lat(), abs <= 1e-8);
        assert_float_eq!(there_and_back.lon(), osgb.lon(), abs <= 1e-8);

        // Same datum in and out is the identity
        assert_eq!(wgs.convert_datum(Datum::wgs84()), wgs);
        Ok(())
    }

    #[test]
    fn parsing() -> Result<(), Error> {
        let geo = LatLon::parse("48.8582 N, 2.2945 E")?;
        assert_float_eq!(geo.lat(), 48.8582, abs <= 1e-12);
        assert_float_eq!(geo.lon(), 2.2945, abs <= 1e-12);

        let geo = LatLon::parse("-33.9249, -18.4241")?;
        assert_float_eq!(geo.lat(), -33.9249, abs <= 1e-12);
        assert_float_eq!(geo.lon(), -18.4241, abs <= 1e-12);

        let geo = LatLon::parse("40°26'46\"N, 79°58'56\"W")?;
        assert_float_eq!(geo.lat(), 40.446_111, abs <= 1e-6);
        assert_float_eq!(geo.lon(), -79.982_222, abs <= 1e-6);

        // No comma
        assert!(matches!(
            LatLon::parse("48.8582 N 2.2945 E"),
            Err(Error::ParseError(_))
        ));
        // An unsigned component with no hemisphere letter is ambiguous
        assert!(matches!(
            LatLon::parse("48.8582, 2.2945"),
            Err(Error::ParseError(_))
        ));
        Ok(())
    }

    #[test]
    fn display() {
        let geo = LatLon::wgs84(48.8582, 2.2945);
        assert_eq!(
            geo.to_string(),
            "48° 51' 29.52\" N, 002° 17' 40.20\" E"
        );
        assert_eq!(
            geo.formatted(DmsFormat::Degrees, 4),
            "48.8582° N, 002.2945° E"
        );
    }
}
