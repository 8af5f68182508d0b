use log::warn;
use once_cell::sync::Lazy;

use crate::{Ellipsoid, Error};

/// A 7-parameter Helmert (Bursa-Wolf) transformation relative to WGS84:
/// translations in meters, scale in parts-per-million, rotations in arc
/// seconds, applied in the small-angle approximation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub s: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Transform {
    #[must_use]
    pub const fn new(tx: f64, ty: f64, tz: f64, s: f64, rx: f64, ry: f64, rz: f64) -> Transform {
        Transform {
            tx,
            ty,
            tz,
            s,
            rx,
            ry,
            rz,
        }
    }

    /// The reverse transformation. In the small-angle regime negating all
    /// seven parameters inverts the shift.
    #[must_use]
    pub fn negated(&self) -> Transform {
        Transform::new(
            -self.tx, -self.ty, -self.tz, -self.s, -self.rx, -self.ry, -self.rz,
        )
    }
}

/// A datum binds a reference ellipsoid to the Helmert transformation taking
/// WGS84 coordinates into the datum. Equality is structural.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum {
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    pub transform: Transform,
}

const WGS84: Datum = Datum {
    name: "WGS84",
    ellipsoid: Ellipsoid::WGS84,
    transform: Transform::new(0., 0., 0., 0., 0., 0., 0.),
};

// The fixed catalog, built once and only ever read. Parameters are the
// classical Ordnance-Survey/NGA published sets.
#[rustfmt::skip]
static DATUMS: Lazy<[Datum; 10]> = Lazy::new(|| {
    [
        Datum { name: "ED50",       ellipsoid: Ellipsoid::INTL_1924,       transform: Transform::new(   89.5,     93.8,    123.1,  -1.2,     0.0,      0.0,      0.156) },
        Datum { name: "Irl1975",    ellipsoid: Ellipsoid::AIRY_MODIFIED,   transform: Transform::new( -482.530,  130.596, -564.557, -8.150,  -1.042,   -0.214,   -0.631) },
        Datum { name: "NAD27",      ellipsoid: Ellipsoid::CLARKE_1866,     transform: Transform::new(    8.0,   -160.0,   -176.0,    0.0,     0.0,      0.0,      0.0  ) },
        Datum { name: "NAD83",      ellipsoid: Ellipsoid::GRS80,           transform: Transform::new(    1.004,   -1.910,   -0.515, -0.0015,  0.0267,   0.00034,  0.011) },
        Datum { name: "NTF",        ellipsoid: Ellipsoid::CLARKE_1880_IGN, transform: Transform::new(  168.0,     60.0,   -320.0,    0.0,     0.0,      0.0,      0.0  ) },
        Datum { name: "OSGB36",     ellipsoid: Ellipsoid::AIRY_1830,       transform: Transform::new( -446.448,  125.157, -542.060, 20.4894, -0.1502,  -0.2470,  -0.8421) },
        Datum { name: "Potsdam",    ellipsoid: Ellipsoid::BESSEL_1841,     transform: Transform::new( -582.0,   -105.0,   -414.0,   -8.3,     1.04,     0.35,    -3.08 ) },
        Datum { name: "TokyoJapan", ellipsoid: Ellipsoid::BESSEL_1841,     transform: Transform::new(  148.0,   -507.0,   -685.0,    0.0,     0.0,      0.0,      0.0  ) },
        Datum { name: "WGS72",      ellipsoid: Ellipsoid::WGS72,           transform: Transform::new(    0.0,      0.0,     -4.5,   -0.22,    0.0,      0.0,      0.0  ) },
        WGS84,
    ]
});

impl Datum {
    /// The canonical hub datum: every datum-to-datum conversion passes
    /// through WGS84.
    #[must_use]
    pub fn wgs84() -> Datum {
        WGS84
    }

    /// The process-wide immutable datum catalog
    #[must_use]
    pub fn catalog() -> &'static [Datum] {
        &DATUMS[..]
    }

    /// A catalog datum, by name
    pub fn named(name: &str) -> Result<Datum, Error> {
        DATUMS
            .iter()
            .find(|d| d.name == name)
            .copied()
            .ok_or_else(|| Error::NotFound(String::from(name)))
    }

    /// Snap a datum to catalog membership: a structural member of the
    /// catalog is returned unchanged, anything else falls back to WGS84.
    /// Coordinate constructors route their datum argument through here, so
    /// a hand-rolled datum is silently replaced; use [`Datum::named`] when
    /// found-vs-defaulted matters.
    #[must_use]
    pub fn lookup(candidate: Datum) -> Datum {
        if DATUMS.contains(&candidate) {
            return candidate;
        }
        warn!("datum '{}' is not in the catalog, substituting WGS84", candidate.name);
        WGS84
    }
}

// ----- T E S T S ---------------------------------------------------------------------
