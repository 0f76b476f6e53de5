//! Built-in catalog of Vietnamese province capitals.
//!
//! Coordinates are projected onto a padded plane with a simple equirectangular
//! mapping, which is all the solvers need: they only ever see `x` and `y`.

use crate::points::{Point, PADDING};

const LAT_MIN: f64 = 8.0;
const LAT_MAX: f64 = 24.0;
const LNG_MIN: f64 = 102.0;
const LNG_MAX: f64 = 110.0;

/// A named location in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    /// Project onto a `width` x `height` plane (y grows southwards), keeping
    /// the name and the source coordinates as metadata
    pub fn project(&self, width: f64, height: f64) -> Point {
        let x = (self.lng - LNG_MIN) / (LNG_MAX - LNG_MIN) * (width - 2.0 * PADDING) + PADDING;
        let y = (LAT_MAX - self.lat) / (LAT_MAX - LAT_MIN) * (height - 2.0 * PADDING) + PADDING;
        Point {
            lat: Some(self.lat),
            lng: Some(self.lng),
            ..Point::named(x, y, self.name)
        }
    }
}

/// Project the first `count` catalog entries (all of them when `count` is `None`)
pub fn city_points(count: Option<usize>, width: f64, height: f64) -> Vec<Point> {
    VIETNAM_CITIES
        .iter()
        .take(count.unwrap_or(VIETNAM_CITIES.len()))
        .map(|c| c.project(width, height))
        .collect()
}

pub const VIETNAM_CITIES: &[City] = &[
    City { name: "Hà Nội", lat: 21.0285, lng: 105.8542 },
    City { name: "Hồ Chí Minh", lat: 10.7769, lng: 106.7009 },
    City { name: "Hải Phòng", lat: 20.8449, lng: 106.6881 },
    City { name: "Đà Nẵng", lat: 16.0544, lng: 108.2022 },
    City { name: "Cần Thơ", lat: 10.0452, lng: 105.7469 },
    City { name: "An Giang", lat: 10.3759, lng: 105.4352 },
    City { name: "Bà Rịa - Vũng Tàu", lat: 10.5417, lng: 107.2429 },
    City { name: "Bắc Giang", lat: 21.2731, lng: 106.1946 },
    City { name: "Bắc Kạn", lat: 22.1472, lng: 105.8348 },
    City { name: "Bạc Liêu", lat: 9.294, lng: 105.721 },
    City { name: "Bắc Ninh", lat: 21.1847, lng: 106.0745 },
    City { name: "Bến Tre", lat: 10.2351, lng: 106.3759 },
    City { name: "Bình Định", lat: 13.782, lng: 109.219 },
    City { name: "Bình Dương", lat: 11.325, lng: 106.477 },
    City { name: "Bình Phước", lat: 11.7512, lng: 106.9113 },
    City { name: "Bình Thuận", lat: 11.0904, lng: 108.0721 },
    City { name: "Cà Mau", lat: 9.1766, lng: 105.1524 },
    City { name: "Cao Bằng", lat: 22.666, lng: 106.266 },
    City { name: "Đắk Lắk", lat: 12.6675, lng: 108.0378 },
    City { name: "Đắk Nông", lat: 12.1386, lng: 107.6913 },
    City { name: "Điện Biên", lat: 21.3948, lng: 103.0161 },
    City { name: "Đồng Nai", lat: 10.943, lng: 107.135 },
    City { name: "Đồng Tháp", lat: 10.4712, lng: 105.6329 },
    City { name: "Gia Lai", lat: 13.9894, lng: 108.0024 },
    City { name: "Hà Giang", lat: 22.833, lng: 104.983 },
    City { name: "Hà Nam", lat: 20.5343, lng: 105.9067 },
    City { name: "Hà Tĩnh", lat: 18.343, lng: 105.905 },
    City { name: "Hải Dương", lat: 20.938, lng: 106.315 },
    City { name: "Hậu Giang", lat: 9.784, lng: 105.466 },
    City { name: "Hòa Bình", lat: 20.817, lng: 105.337 },
    City { name: "Hưng Yên", lat: 20.646, lng: 106.051 },
    City { name: "Khánh Hòa", lat: 12.2388, lng: 109.1967 },
    City { name: "Kiên Giang", lat: 10.016, lng: 105.085 },
    City { name: "Kon Tum", lat: 14.35, lng: 108.007 },
    City { name: "Lai Châu", lat: 22.386, lng: 103.458 },
    City { name: "Lâm Đồng", lat: 11.9404, lng: 108.4583 },
    City { name: "Lạng Sơn", lat: 21.852, lng: 106.761 },
    City { name: "Lào Cai", lat: 22.487, lng: 103.975 },
    City { name: "Long An", lat: 10.542, lng: 106.405 },
    City { name: "Nam Định", lat: 20.438, lng: 106.162 },
    City { name: "Nghệ An", lat: 18.666, lng: 105.666 },
    City { name: "Ninh Bình", lat: 20.253, lng: 105.974 },
    City { name: "Ninh Thuận", lat: 11.565, lng: 108.983 },
    City { name: "Phú Thọ", lat: 21.398, lng: 105.224 },
    City { name: "Phú Yên", lat: 13.116, lng: 109.3 },
    City { name: "Quảng Bình", lat: 17.469, lng: 106.622 },
    City { name: "Quảng Nam", lat: 15.573, lng: 108.474 },
    City { name: "Quảng Ngãi", lat: 15.121, lng: 108.804 },
    City { name: "Quảng Ninh", lat: 20.966, lng: 107.055 },
    City { name: "Quảng Trị", lat: 16.746, lng: 107.185 },
    City { name: "Sóc Trăng", lat: 9.6, lng: 105.971 },
    City { name: "Sơn La", lat: 21.128, lng: 103.914 },
    City { name: "Tây Ninh", lat: 11.31, lng: 106.098 },
    City { name: "Thái Bình", lat: 20.447, lng: 106.342 },
    City { name: "Thái Nguyên", lat: 21.594, lng: 105.848 },
    City { name: "Thanh Hóa", lat: 19.806, lng: 105.785 },
    City { name: "Thừa Thiên Huế", lat: 16.4637, lng: 107.5909 },
    City { name: "Tiền Giang", lat: 10.383, lng: 106.352 },
    City { name: "Trà Vinh", lat: 9.934, lng: 106.345 },
    City { name: "Tuyên Quang", lat: 21.805, lng: 105.224 },
    City { name: "Vĩnh Long", lat: 10.253, lng: 105.971 },
    City { name: "Vĩnh Phúc", lat: 21.294, lng: 105.614 },
    City { name: "Yên Bái", lat: 21.722, lng: 104.895 },
];
