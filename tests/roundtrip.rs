//! Cross-representation conversions, exercised end to end: geographic
//! text in, UTM and MGRS out, and back again.

use float_eq::assert_float_eq;
use gridref::{compass_point, parse_dms, Datum, DmsFormat, Error, Hemisphere, LatLon, Mgrs, Utm};

// The Eiffel Tower, the reference point used throughout. Projected values
// validated against PROJ: echo 2.2945 48.8582 | cct +proj=utm +zone=31
const EIFFEL_LAT: f64 = 48.8582;
const EIFFEL_LON: f64 = 2.2945;

#[test]
fn geographic_to_utm_to_mgrs() -> Result<(), Error> {
    let geo = LatLon::parse("48.8582 N, 2.2945 E")?;
    let utm = geo.to_utm()?;

    assert_eq!(utm.zone(), 31);
    assert_eq!(utm.hemisphere(), Hemisphere::N);
    assert_float_eq!(utm.easting(), 448_251.795, abs <= 0.01);
    assert_float_eq!(utm.northing(), 5_411_932.678, abs <= 0.01);
    assert_eq!(utm.to_string(), "31 N 448252 5411933");

    let mgrs = utm.to_mgrs()?;
    assert_eq!(mgrs.to_string(), "31U DQ 48252 11933");

    // The printed reference identifies the same square meter
    let back = Mgrs::parse("31U DQ 48252 11933")?.to_utm()?;
    assert_float_eq!(back.easting(), utm.easting(), abs <= 1.0);
    assert_float_eq!(back.northing(), utm.northing(), abs <= 1.0);
    Ok(())
}

#[test]
fn utm_to_geographic() -> Result<(), Error> {
    let utm = Utm::parse("31 N 448251.795 5411932.678")?;
    let geo = utm.to_latlon();
    assert_float_eq!(geo.lat(), EIFFEL_LAT, abs <= 1e-6);
    assert_float_eq!(geo.lon(), EIFFEL_LON, abs <= 1e-6);

    // The inverse projection does not fill in convergence and scale
    assert_eq!(utm.convergence(), None);
    assert_eq!(utm.scale(), None);
    Ok(())
}

#[test]
fn zone_exceptions_survive_the_roundtrip() -> Result<(), Error> {
    // Bergen: southwest Norway is widened into zone 32
    let bergen = LatLon::wgs84(60.39, 5.32);
    let utm = bergen.to_utm()?;
    assert_eq!(utm.zone(), 32);
    let back = utm.to_latlon();
    assert_float_eq!(back.lat(), bergen.lat(), abs <= 1e-9);
    assert_float_eq!(back.lon(), bergen.lon(), abs <= 1e-9);

    // Svalbard runs on the odd zones 31/33/35/37 only
    let svalbard = LatLon::wgs84(78.0, 20.0);
    let utm = svalbard.to_utm()?;
    assert_eq!(utm.zone(), 33);
    let mgrs = utm.to_mgrs()?;
    assert_eq!(mgrs.band(), 'X');
    let back = mgrs.to_utm()?.to_latlon();
    assert_float_eq!(back.lat(), svalbard.lat(), abs <= 1e-4);
    assert_float_eq!(back.lon(), svalbard.lon(), abs <= 1e-4);
    Ok(())
}

#[test]
fn southern_hemisphere() -> Result<(), Error> {
    // Cape Town
    let geo = LatLon::parse("33.9249 S, 18.4241 E")?;
    let utm = geo.to_utm()?;
    assert_eq!(utm.zone(), 34);
    assert_eq!(utm.hemisphere(), Hemisphere::S);
    assert!(utm.northing() > 6e6);

    let mgrs = utm.to_mgrs()?;
    assert_eq!(mgrs.band(), 'H');
    let back = mgrs.to_utm()?.to_latlon();
    assert_float_eq!(back.lat(), geo.lat(), abs <= 1e-4);
    assert_float_eq!(back.lon(), geo.lon(), abs <= 1e-4);
    Ok(())
}

#[test]
fn datum_shift_through_the_pipeline() -> Result<(), Error> {
    // A point entered on OSGB36 projects on OSGB36, and lands roughly
    // 100 m away from its WGS84 rendition
    let osgb = LatLon::parse_with_datum("51.4778 N, 0.0014 W", Datum::named("OSGB36")?)?;
    assert_eq!(osgb.datum(), Datum::named("OSGB36")?);

    let wgs = osgb.convert_datum(Datum::wgs84());
    let offset_deg = ((wgs.lat() - osgb.lat()).powi(2) + (wgs.lon() - osgb.lon()).powi(2)).sqrt();
    assert!(offset_deg > 5e-4 && offset_deg < 5e-3);

    // And comes back to where it started
    let back = wgs.convert_datum(Datum::named("OSGB36")?);
    assert_float_eq!(back.lat(), osgb.lat(), abs <= 1e-8);
    assert_float_eq!(back.lon(), osgb.lon(), abs <= 1e-8);
    Ok(())
}

#[test]
fn lenient_text_formats() -> Result<(), Error> {
    // The same point in three spellings
    let suffixed = LatLon::parse("48.8582 N, 2.2945 E")?;
    let dms = LatLon::parse("48°51'29.52\"N, 2°17'40.20\"E")?;
    assert_eq!(suffixed, LatLon::wgs84(48.8582, 2.2945));
    assert_float_eq!(dms.lat(), suffixed.lat(), abs <= 1e-6);
    assert_float_eq!(dms.lon(), suffixed.lon(), abs <= 1e-6);

    // A component without a minus sign or hemisphere letter is rejected
    assert!(matches!(
        LatLon::parse("48.8582, 2.2945"),
        Err(Error::ParseError(_))
    ));

    // Compact and spaced MGRS agree
    assert_eq!(
        Mgrs::parse("31UDQ4825211933")?,
        Mgrs::parse("31U DQ 48252 11933")?
    );

    // Sub-kilometer references widen to their square
    let coarse = Mgrs::parse("31U DQ 48 11")?;
    assert_eq!(coarse.easting(), 48_000.0);
    assert_eq!(coarse.northing(), 11_000.0);

    // Bearing helpers
    assert_float_eq!(parse_dms("40° 26.767' W")?, -40.446_117, abs <= 1e-6);
    assert_eq!(compass_point(24.0, 1), "N");
    assert_eq!(compass_point(24.0, 2), "NE");
    assert_eq!(compass_point(24.0, 3), "NNE");
    Ok(())
}

#[test]
fn invalid_input_is_rejected() {
    // Out of the UTM latitude domain
    assert!(matches!(
        LatLon::wgs84(85.0, 10.0).to_utm(),
        Err(Error::InvalidLatitude(_))
    ));
    assert!(matches!(
        LatLon::wgs84(-80.5, 10.0).to_utm(),
        Err(Error::InvalidLatitude(_))
    ));

    // Out of the projected ranges
    assert!(matches!(
        Utm::new(31, Hemisphere::N, 1_000.0, 5e6, Datum::wgs84()),
        Err(Error::InvalidEasting(_))
    ));
    assert!(matches!(
        Utm::new(31, Hemisphere::N, 4e5, 11e6, Datum::wgs84()),
        Err(Error::InvalidNorthing(_))
    ));

    // Malformed text
    assert!(matches!(
        Utm::parse("31 N 448251"),
        Err(Error::InvalidFormat(_))
    ));
    assert!(matches!(
        Mgrs::parse("31I DQ 48252 11933"),
        Err(Error::InvalidBand('I'))
    ));
    assert!(matches!(
        LatLon::parse("not a coordinate"),
        Err(Error::ParseError(_))
    ));
}

#[test]
fn formatted_precision() -> Result<(), Error> {
    let geo = LatLon::wgs84(EIFFEL_LAT, EIFFEL_LON);
    assert_eq!(
        geo.formatted(DmsFormat::DegreesMinutes, 2),
        "48° 51.49' N, 002° 17.67' E"
    );

    let mgrs = geo.to_utm()?.to_mgrs()?;
    assert_eq!(mgrs.formatted(5), "31U DQ 48252 11933");
    // 48252 narrows digit by digit: 4825, 482, 48, then 4.8 rounds to 5
    assert_eq!(mgrs.formatted(1), "31U DQ 5 1");
    Ok(())
}
