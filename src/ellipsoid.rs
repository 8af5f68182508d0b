use crate::Error;

/// A reference ellipsoid, given by its semimajor axis `a` (in meters) and
/// flattening `f`; the semiminor axis `b = a(1 - f)` is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// WGS84 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::WGS84
    }
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563);
    pub const AIRY_1830: Ellipsoid = Ellipsoid::new(6_377_563.396, 1. / 299.324_964_6);
    pub const AIRY_MODIFIED: Ellipsoid = Ellipsoid::new(6_377_340.189, 1. / 299.324_964_6);
    pub const BESSEL_1841: Ellipsoid = Ellipsoid::new(6_377_397.155, 1. / 299.152_812_8);
    pub const CLARKE_1866: Ellipsoid = Ellipsoid::new(6_378_206.4, 1. / 294.978_698_214);
    pub const CLARKE_1880_IGN: Ellipsoid = Ellipsoid::new(6_378_249.2, 1. / 293.466_021_294);
    pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1. / 298.257_222_101);
    pub const INTL_1924: Ellipsoid = Ellipsoid::new(6_378_388.0, 1. / 297.0);
    pub const WGS72: Ellipsoid = Ellipsoid::new(6_378_135.0, 1. / 298.26);

    /// User defined ellipsoid
    #[must_use]
    pub const fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// One of the built-in ellipsoids, by conventional name
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        match name {
            "WGS84" => Ok(Ellipsoid::WGS84),
            "Airy1830" => Ok(Ellipsoid::AIRY_1830),
            "AiryModified" => Ok(Ellipsoid::AIRY_MODIFIED),
            "Bessel1841" => Ok(Ellipsoid::BESSEL_1841),
            "Clarke1866" => Ok(Ellipsoid::CLARKE_1866),
            "Clarke1880IGN" => Ok(Ellipsoid::CLARKE_1880_IGN),
            "GRS80" => Ok(Ellipsoid::GRS80),
            "Intl1924" => Ok(Ellipsoid::INTL_1924),
            "WGS72" => Ok(Ellipsoid::WGS72),
            _ => Err(Error::NotFound(String::from(name))),
        }
    }

    // ----- Axes and flattenings --------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b = a(1 - f)*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b)/(a + b) = f/(2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²)/a² = f(2 - f)*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²)/b² = e²/(1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
