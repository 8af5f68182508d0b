//! *Conversions between the coordinate representations used in mapping and
//! navigation*: geographic latitude/longitude on a reference datum, UTM
//! projected coordinates, and MGRS grid references — along with
//! datum-to-datum Helmert shifts and lenient parsing/formatting of
//! DMS, UTM and MGRS text.
//!
//! The transverse mercator projection follows the Krüger series in the
//! rendition of [Karney, 2011](https://doi.org/10.1007/s00190-011-0445-3),
//! truncated at order 6 in the third flattening, which is good for
//! nanometer-level accuracy anywhere within the UTM domain.
//!
//! ```
//! use gridref::LatLon;
//!
//! # fn main() -> anyhow::Result<()> {
//! let geo = LatLon::parse("48.8582 N, 2.2945 E")?;
//! let utm = geo.to_utm()?;
//! assert_eq!(utm.to_string(), "31 N 448252 5411933");
//! assert_eq!(utm.to_mgrs()?.to_string(), "31U DQ 48252 11933");
//! # Ok(())
//! # }
//! ```
//!
//! All values are immutable: constructors validate, conversions produce new
//! instances, and every entry point is safe to call from multiple threads
//! without synchronization.

use thiserror::Error;

mod angular;
mod datum;
mod dms;
mod ellipsoid;
mod latlon;
mod mgrs;
mod tmerc;
mod utm;
mod vector;

pub use datum::Datum;
pub use datum::Transform;
pub use dms::compass_point;
pub use dms::parse_dms;
pub use dms::to_brng;
pub use dms::to_dms;
pub use dms::to_lat;
pub use dms::to_lon;
pub use dms::DmsFormat;
pub use ellipsoid::Ellipsoid;
pub use latlon::LatLon;
pub use mgrs::Mgrs;
pub use utm::Hemisphere;
pub use utm::Utm;
pub use vector::Vector;

#[derive(Error, Debug)]
pub enum Error {
    #[error("latitude {0}° is outside the UTM domain [-80°, 84°]")]
    InvalidLatitude(f64),

    #[error("invalid zone: {0}")]
    InvalidZone(String),

    #[error("invalid latitude band '{0}'")]
    InvalidBand(char),

    #[error("invalid easting: {0}")]
    InvalidEasting(String),

    #[error("invalid northing: {0}")]
    InvalidNorthing(String),

    #[error("invalid grid: {0}")]
    InvalidGrid(&'static str),

    #[error("invalid format: {0}")]
    InvalidFormat(&'static str),

    #[error("parse error: {0}")]
    ParseError(&'static str),

    #[error("{0} not found")]
    NotFound(String),
}
