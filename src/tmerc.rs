//! Transverse Mercator projection for the UTM grid, following the Krüger
//! series as extended to 6th order in the third flattening by
//! [Karney, 2011](https://doi.org/10.1007/s00190-011-0445-3).

use crate::angular::to_fixed;
use crate::mgrs::band_letter;
use crate::utm::Hemisphere;
use crate::{Error, LatLon, Utm};

/// UTM scale on the central meridian
const K0: f64 = 0.9996;

const FALSE_EASTING: f64 = 500e3;
const FALSE_NORTHING: f64 = 10_000e3;

/// Longitude of the central meridian of `zone`, in radians
fn central_meridian(zone: i32) -> f64 {
    (((zone - 1) * 6 - 180 + 3) as f64).to_radians()
}

// ----- F O R W A R D -----------------------------------------------------------------

/// Forward projection: geographic to UTM. Fails for latitudes outside the
/// UTM domain [-80°, 84°], and populates grid convergence and point scale
/// on the result.
pub(crate) fn fwd(geo: &LatLon) -> Result<Utm, Error> {
    let lat = geo.lat();
    let lon = geo.lon();
    if !(-80.0..=84.0).contains(&lat) {
        return Err(Error::InvalidLatitude(lat));
    }

    // Longitudinal zone, and the latitude band governing the exceptions
    let mut zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    let mut lambda0 = central_meridian(zone);
    let band = band_letter(lat);

    let six_degrees = 6_f64.to_radians();

    // Norway: the west coast of band V is served by zone 32
    if zone == 31 && band == 'V' && lon >= 3.0 {
        zone += 1;
        lambda0 += six_degrees;
    }
    // Svalbard: zones 32, 34 and 36 are not used in band X
    if zone == 32 && band == 'X' && lon < 9.0 {
        zone -= 1;
        lambda0 -= six_degrees;
    }
    if zone == 32 && band == 'X' && lon >= 9.0 {
        zone += 1;
        lambda0 += six_degrees;
    }
    if zone == 34 && band == 'X' && lon < 21.0 {
        zone -= 1;
        lambda0 -= six_degrees;
    }
    if zone == 34 && band == 'X' && lon >= 21.0 {
        zone += 1;
        lambda0 += six_degrees;
    }
    if zone == 36 && band == 'X' && lon < 33.0 {
        zone -= 1;
        lambda0 -= six_degrees;
    }
    if zone == 36 && band == 'X' && lon >= 33.0 {
        zone += 1;
        lambda0 += six_degrees;
    }

    let phi = lat.to_radians();
    let lambda = lon.to_radians() - lambda0;

    let ellps = geo.datum().ellipsoid;
    let a = ellps.semimajor_axis();
    let e = ellps.eccentricity();
    let n = ellps.third_flattening();

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let tan_lambda = lambda.tan();

    // Conformal latitude, in the tangent half-plane: tau' = tan(chi)
    let tau = phi.tan();
    let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
    let tau_prime = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();

    let xi_prime = tau_prime.atan2(cos_lambda);
    let eta_prime = (sin_lambda / (tau_prime * tau_prime + cos_lambda * cos_lambda).sqrt()).asinh();

    let big_a = rectifying_radius(a, n);
    let alpha = alpha_coefficients(n);

    // The series, and its partial derivatives for convergence and scale
    let mut xi = xi_prime;
    let mut eta = eta_prime;
    let mut p_prime = 1.0;
    let mut q_prime = 0.0;
    for (j, alpha_j) in alpha.iter().enumerate() {
        let j2 = 2.0 * (j + 1) as f64;
        xi += alpha_j * (j2 * xi_prime).sin() * (j2 * eta_prime).cosh();
        eta += alpha_j * (j2 * xi_prime).cos() * (j2 * eta_prime).sinh();
        p_prime += j2 * alpha_j * (j2 * xi_prime).cos() * (j2 * eta_prime).cosh();
        q_prime += j2 * alpha_j * (j2 * xi_prime).sin() * (j2 * eta_prime).sinh();
    }

    let mut x = K0 * big_a * eta;
    let mut y = K0 * big_a * xi;

    // Grid convergence
    let gamma_prime = (tau_prime / (1.0 + tau_prime * tau_prime).sqrt() * tan_lambda).atan();
    let gamma_double_prime = q_prime.atan2(p_prime);
    let gamma = gamma_prime + gamma_double_prime;

    // Point scale
    let sin_phi = phi.sin();
    let k_prime = (1.0 - e * e * sin_phi * sin_phi).sqrt() * (1.0 + tau * tau).sqrt()
        / (tau_prime * tau_prime + cos_lambda * cos_lambda).sqrt();
    let k_double_prime = big_a / a * p_prime.hypot(q_prime);
    let k = K0 + k_prime + k_double_prime;

    // Shift to the false origins
    x += FALSE_EASTING;
    if y < 0.0 {
        y += FALSE_NORTHING;
    }

    // Nanometer-order rounding keeps repeated formatting idempotent
    let easting = to_fixed(x, 6);
    let northing = to_fixed(y, 6);
    let convergence = to_fixed(gamma.to_degrees(), 9);
    let scale = to_fixed(k, 12);

    let hemisphere = if lat >= 0.0 {
        Hemisphere::N
    } else {
        Hemisphere::S
    };

    Utm::with_convergence(
        zone,
        hemisphere,
        easting,
        northing,
        geo.datum(),
        Some(convergence),
        Some(scale),
    )
}

// ----- I N V E R S E -----------------------------------------------------------------

/// Inverse projection: UTM to geographic. Unlike the forward direction,
/// convergence and point scale are not carried onto the result.
pub(crate) fn inv(utm: &Utm) -> LatLon {
    let x = utm.easting() - FALSE_EASTING;
    let y = match utm.hemisphere() {
        Hemisphere::S => utm.northing() - FALSE_NORTHING,
        Hemisphere::N => utm.northing(),
    };

    let ellps = utm.datum().ellipsoid;
    let a = ellps.semimajor_axis();
    let e = ellps.eccentricity();
    let n = ellps.third_flattening();

    let big_a = rectifying_radius(a, n);

    let eta = x / (K0 * big_a);
    let xi = y / (K0 * big_a);

    let beta = beta_coefficients(n);

    let mut xi_prime = xi;
    let mut eta_prime = eta;
    for (j, beta_j) in beta.iter().enumerate() {
        let j2 = 2.0 * (j + 1) as f64;
        xi_prime -= beta_j * (j2 * xi).sin() * (j2 * eta).cosh();
        eta_prime -= beta_j * (j2 * xi).cos() * (j2 * eta).sinh();
    }

    let sinh_eta_prime = eta_prime.sinh();
    let (sin_xi_prime, cos_xi_prime) = xi_prime.sin_cos();
    let tau_prime =
        sin_xi_prime / (sinh_eta_prime * sinh_eta_prime + cos_xi_prime * cos_xi_prime).sqrt();

    // Newton iteration on the eccentricity relation. Unconditionally
    // convergent for valid UTM input, bounded all the same.
    let mut tau = tau_prime;
    for _ in 0..24 {
        let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        let tau_i_prime = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();
        let delta = (tau_prime - tau_i_prime) / (1.0 + tau_i_prime * tau_i_prime).sqrt()
            * (1.0 + (1.0 - e * e) * tau * tau)
            / ((1.0 - e * e) * (1.0 + tau * tau).sqrt());
        tau += delta;
        if delta.abs() <= 1e-12 {
            break;
        }
    }

    let phi = tau.atan();
    let lambda = sinh_eta_prime.atan2(cos_xi_prime) + central_meridian(utm.zone());

    // 1e-11 degrees is nanometer order on the ground
    let lat = to_fixed(phi.to_degrees(), 11);
    let lon = to_fixed(lambda.to_degrees(), 11);

    LatLon::new(lat, lon, utm.datum())
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

// The rectifying radius A; 2πA is the circumference of a meridian
fn rectifying_radius(a: f64, n: f64) -> f64 {
    let n2 = n * n;
    a / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0 + n2 * n2 * n2 / 256.0)
}

// Forward series coefficients alpha_1..alpha_6, [Karney, 2011] eq. 35
#[rustfmt::skip]
fn alpha_coefficients(n: f64) -> [f64; 6] {
    let n2 = n * n;
    let n3 = n * n2;
    let n4 = n * n3;
    let n5 = n * n4;
    let n6 = n * n5;
    [
        1./2.*n - 2./3.*n2 + 5./16.*n3 + 41./180.*n4 - 127./288.*n5 + 7891./37800.*n6,
        13./48.*n2 - 3./5.*n3 + 557./1440.*n4 + 281./630.*n5 - 1983433./1935360.*n6,
        61./240.*n3 - 103./140.*n4 + 15061./26880.*n5 + 167603./181440.*n6,
        49561./161280.*n4 - 179./168.*n5 + 6601661./7257600.*n6,
        34729./80640.*n5 - 3418889./1995840.*n6,
        212378941./319334400.*n6,
    ]
}

// Inverse series coefficients beta_1..beta_6, [Karney, 2011] eq. 36
#[rustfmt::skip]
fn beta_coefficients(n: f64) -> [f64; 6] {
    let n2 = n * n;
    let n3 = n * n2;
    let n4 = n * n3;
    let n5 = n * n4;
    let n6 = n * n5;
    [
        1./2.*n - 2./3.*n2 + 37./96.*n3 - 1./360.*n4 - 81./512.*n5 + 96199./604800.*n6,
        1./48.*n2 + 1./15.*n3 - 437./1440.*n4 + 46./105.*n5 - 1118711./3870720.*n6,
        17./480.*n3 - 37./840.*n4 - 209./4480.*n5 + 5569./90720.*n6,
        4397./161280.*n4 - 11./504.*n5 - 830251./7257600.*n6,
        4583./161280.*n5 - 108847./3991680.*n6,
        20648693./638668800.*n6,
    ]
}

// ----- T E S T S ---------------------------------------------------------------------
