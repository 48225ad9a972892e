//! Conversions between the DIS world frame and geodetic coordinates.
//!
//! Entity locations travel as earth-centred, earth-fixed (ECEF) coordinates
//! in metres, and orientations as Euler angles `(psi, theta, phi)` relative
//! to that frame. These helpers convert to and from latitude, longitude and
//! altitude on the WGS84 ellipsoid, and from local heading, pitch and roll
//! to DIS Euler angles.

/// WGS84 semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 semi-minor axis in metres.
pub const WGS84_B: f64 = 6_356_752.3142;

/// A three-component vector in the world frame.
pub type Vec3 = [f64; 3];

/// A point on or above the WGS84 ellipsoid.
///
/// Angles are in radians unless a method says otherwise. Altitude is in
/// metres above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geodetic {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Geodetic {
    #[must_use]
    pub const fn from_radians(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self::from_radians(latitude.to_radians(), longitude.to_radians(), altitude)
    }

    /// Latitude and longitude in degrees, with the altitude unchanged.
    #[must_use]
    pub fn to_degrees(self) -> Self {
        Self {
            latitude: self.latitude.to_degrees(),
            longitude: self.longitude.to_degrees(),
            altitude: self.altitude,
        }
    }

    /// World coordinates of this point.
    #[must_use]
    pub fn to_xyz(self) -> Vec3 {
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        let n = prime_vertical_radius(sin_lat, cos_lat);
        let h = self.altitude;
        [
            (n + h) * cos_lat * cos_lon,
            (n + h) * cos_lat * sin_lon,
            (WGS84_B * WGS84_B / (WGS84_A * WGS84_A) * n + h) * sin_lat,
        ]
    }

    /// Geodetic position of world coordinates, in radians.
    ///
    /// Uses Bowring's closed form, which is accurate to well under a
    /// millimetre for points near the surface.
    #[must_use]
    pub fn from_xyz(xyz: Vec3) -> Self {
        let [x, y, z] = xyz;
        let a2 = WGS84_A * WGS84_A;
        let b2 = WGS84_B * WGS84_B;
        let e2 = (a2 - b2) / a2;
        let ep2 = (a2 - b2) / b2;

        let w = x.hypot(y);
        let beta = (WGS84_A * z).atan2(WGS84_B * w);
        let (sin_beta, cos_beta) = beta.sin_cos();
        let latitude = (z + ep2 * WGS84_B * sin_beta.powi(3))
            .atan2(w - WGS84_A * e2 * cos_beta.powi(3));
        let (sin_lat, cos_lat) = latitude.sin_cos();
        let n = prime_vertical_radius(sin_lat, cos_lat);
        // Dividing by the larger of the two keeps the poles well defined.
        let altitude = if cos_lat.abs() >= sin_lat.abs() {
            w / cos_lat - n
        } else {
            z / sin_lat - n * (1.0 - e2)
        };
        Self {
            latitude,
            longitude: y.atan2(x),
            altitude,
        }
    }
}

/// Latitude, longitude (radians) and altitude of world coordinates.
#[must_use]
pub fn xyz_to_lat_lon_radians(xyz: Vec3) -> Geodetic {
    Geodetic::from_xyz(xyz)
}

/// Latitude, longitude (degrees) and altitude of world coordinates.
#[must_use]
pub fn xyz_to_lat_lon_degrees(xyz: Vec3) -> Geodetic {
    Geodetic::from_xyz(xyz).to_degrees()
}

#[must_use]
pub fn lat_lon_radians_to_xyz(latitude: f64, longitude: f64, altitude: f64) -> Vec3 {
    Geodetic::from_radians(latitude, longitude, altitude).to_xyz()
}

#[must_use]
pub fn lat_lon_degrees_to_xyz(latitude: f64, longitude: f64, altitude: f64) -> Vec3 {
    Geodetic::from_degrees(latitude, longitude, altitude).to_xyz()
}

/// Rotates `v` by `angle` radians about the unit vector `axis`, right handed.
#[must_use]
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let (st, ct) = angle.sin_cos();
    let along = dot(axis, v) * (1.0 - ct);
    let across = cross(axis, v);
    [
        along * axis[0] + ct * v[0] + st * across[0],
        along * axis[1] + ct * v[1] + st * across[1],
        along * axis[2] + ct * v[2] + st * across[2],
    ]
}

/// DIS Euler angles `[psi, theta, phi]` in radians for an orientation
/// given locally at a point.
///
/// Heading is clockwise from true north, pitch is up from the local
/// horizontal and roll is right wing down. All inputs are in degrees.
#[must_use]
pub fn heading_pitch_roll_to_euler(
    heading: f64,
    pitch: f64,
    roll: f64,
    latitude: f64,
    longitude: f64,
) -> Vec3 {
    let x0 = [1.0, 0.0, 0.0];
    let y0 = [0.0, 1.0, 0.0];
    let z0 = [0.0, 0.0, 1.0];

    // North, east and down at the point.
    let east = rotate_about_axis(y0, z0, longitude.to_radians());
    let north = rotate_about_axis(z0, neg(east), latitude.to_radians());
    let down = cross(north, east);

    let heading = heading.to_radians();
    let n1 = rotate_about_axis(north, down, heading);
    let e1 = rotate_about_axis(east, down, heading);

    let pitch = pitch.to_radians();
    let n2 = rotate_about_axis(n1, e1, pitch);
    let e3 = rotate_about_axis(e1, n2, roll.to_radians());

    let psi = dot(n2, y0).atan2(dot(n2, x0));
    let theta = (-dot(n2, z0)).atan2(dot(n2, x0).hypot(dot(n2, y0)));
    let y2 = rotate_about_axis(y0, z0, psi);
    let z2 = rotate_about_axis(z0, y2, theta);
    let phi = dot(e3, z2).atan2(dot(e3, y2));
    [psi, theta, phi]
}

fn prime_vertical_radius(sin_lat: f64, cos_lat: f64) -> f64 {
    let a2 = WGS84_A * WGS84_A;
    let b2 = WGS84_B * WGS84_B;
    a2 / (a2 * cos_lat * cos_lat + b2 * sin_lat * sin_lat).sqrt()
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn neg(v: Vec3) -> Vec3 {
    [-v[0], -v[1], -v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const ANGLE_TOLERANCE: f64 = 1e-8;
    const METRE_TOLERANCE: f64 = 1e-2;

    fn assert_vec_close(actual: Vec3, expected: Vec3, tolerance: f64) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= tolerance, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn equator_prime_meridian_is_on_x_axis() {
        let origin = lat_lon_degrees_to_xyz(0.0, 0.0, 0.0);
        assert_vec_close(origin, [WGS84_A, 0.0, 0.0], 1e-6);
        assert_vec_close(
            lat_lon_degrees_to_xyz(0.0, 90.0, 100.0),
            [0.0, WGS84_A + 100.0, 0.0],
            1e-6,
        );
    }

    #[test]
    fn poles_are_on_z_axis() {
        let north = lat_lon_degrees_to_xyz(90.0, 0.0, 0.0);
        assert_vec_close(north, [0.0, 0.0, WGS84_B], 1e-6);
        let south = xyz_to_lat_lon_degrees([0.0, 0.0, -WGS84_B - 50.0]);
        assert!((south.latitude + 90.0).abs() < 1e-9);
        assert!((south.altitude - 50.0).abs() < METRE_TOLERANCE);
    }

    #[test]
    fn known_point_converts_back() {
        // Monterey, California.
        let xyz = lat_lon_degrees_to_xyz(36.6, -121.9, 10.0);
        let geo = xyz_to_lat_lon_degrees(xyz);
        assert!((geo.latitude - 36.6).abs() < 1e-7);
        assert!((geo.longitude + 121.9).abs() < 1e-7);
        assert!((geo.altitude - 10.0).abs() < METRE_TOLERANCE);
    }

    #[test]
    fn longitude_covers_every_quadrant() {
        for lon in [-179.0, -135.0, -45.0, 0.0, 45.0, 135.0, 179.0] {
            let geo = xyz_to_lat_lon_degrees(lat_lon_degrees_to_xyz(10.0, lon, 0.0));
            assert!((geo.longitude - lon).abs() < 1e-7, "{lon}: {geo:?}");
        }
    }

    #[test]
    fn rotation_follows_right_hand_rule() {
        let rotated = rotate_about_axis([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], FRAC_PI_2);
        assert_vec_close(rotated, [0.0, 1.0, 0.0], 1e-12);
        let unchanged = rotate_about_axis([0.0, 0.0, 2.0], [0.0, 0.0, 1.0], 1.0);
        assert_vec_close(unchanged, [0.0, 0.0, 2.0], 1e-12);
        let half_turn = rotate_about_axis([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], PI);
        assert_vec_close(half_turn, [-1.0, 2.0, -3.0], 1e-12);
    }

    #[test]
    fn level_north_at_origin_points_up_the_z_axis() {
        let euler = heading_pitch_roll_to_euler(0.0, 0.0, 0.0, 0.0, 0.0);
        assert_vec_close(euler, [0.0, -FRAC_PI_2, 0.0], 1e-9);
    }

    #[test]
    fn level_east_at_origin_points_along_y_axis() {
        // Heading east on the equator, the right wing points south.
        let euler = heading_pitch_roll_to_euler(90.0, 0.0, 0.0, 0.0, 0.0);
        assert_vec_close(euler, [FRAC_PI_2, 0.0, -FRAC_PI_2], 1e-9);
    }

    #[test]
    fn pitch_at_north_pole_tilts_theta() {
        // At the pole north is -x for longitude 0, and down is -z.
        let euler = heading_pitch_roll_to_euler(0.0, 30.0, 0.0, 90.0, 0.0);
        assert!((euler[1] + 30f64.to_radians()).abs() < 1e-9, "{euler:?}");
    }

    proptest! {
        #[test]
        fn lat_lon_alt_roundtrips_through_xyz(
            lat in -89.9f64..89.9,
            lon in -179.9f64..179.9,
            alt in -1_000.0f64..20_000.0,
        ) {
            let xyz = lat_lon_radians_to_xyz(lat.to_radians(), lon.to_radians(), alt);
            let geo = xyz_to_lat_lon_radians(xyz);
            prop_assert!((geo.latitude - lat.to_radians()).abs() < ANGLE_TOLERANCE);
            prop_assert!((geo.longitude - lon.to_radians()).abs() < ANGLE_TOLERANCE);
            prop_assert!((geo.altitude - alt).abs() < METRE_TOLERANCE);
        }
    }
}
