//! Start and end coordinates for a directions request.

use geo::Coord;

use super::error::RouteError;

/// Validated start and end of a walking route.
///
/// Coordinates use `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEndpoints {
    /// Where the route begins.
    pub start: Coord<f64>,
    /// Where the route ends.
    pub end: Coord<f64>,
}

impl RouteEndpoints {
    /// Build endpoints from coordinates that are already validated.
    #[must_use]
    pub const fn new(start: Coord<f64>, end: Coord<f64>) -> Self {
        Self { start, end }
    }

    /// Parse `"lon,lat"` text for both endpoints.
    ///
    /// Whitespace around either number is ignored. Values must be finite,
    /// with longitude in `[-180, 180]` and latitude in `[-90, 90]`.
    ///
    /// # Examples
    /// ```
    /// use quadrant_core::{RouteEndpoints, RouteError};
    ///
    /// let endpoints = RouteEndpoints::parse("-76.71,39.25", "-76.70, 39.26")?;
    /// assert_eq!(endpoints.start.x, -76.71);
    /// assert_eq!(endpoints.end.y, 39.26);
    ///
    /// let err = RouteEndpoints::parse("39.25", "-76.70,39.26").unwrap_err();
    /// assert!(matches!(err, RouteError::InvalidCoordinate { endpoint: "start", .. }));
    /// # Ok::<(), RouteError>(())
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, RouteError> {
        Ok(Self {
            start: parse_coordinate("start", start)?,
            end: parse_coordinate("end", end)?,
        })
    }

    /// The start formatted as `"lon,lat"`.
    #[must_use]
    pub fn start_param(&self) -> String {
        format_coordinate(self.start)
    }

    /// The end formatted as `"lon,lat"`.
    #[must_use]
    pub fn end_param(&self) -> String {
        format_coordinate(self.end)
    }
}

fn format_coordinate(coord: Coord<f64>) -> String {
    format!("{},{}", coord.x, coord.y)
}

fn parse_coordinate(endpoint: &'static str, text: &str) -> Result<Coord<f64>, RouteError> {
    let invalid = |reason| RouteError::InvalidCoordinate {
        endpoint,
        value: text.to_owned(),
        reason,
    };
    let (lon, lat) = text
        .split_once(',')
        .ok_or_else(|| invalid("expected \"lon,lat\""))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| invalid("longitude is not a number"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid("latitude is not a number"))?;
    if !lon.is_finite() || !lat.is_finite() {
        return Err(invalid("coordinates must be finite"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(invalid("longitude must be within [-180, 180]"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid("latitude must be within [-90, 90]"));
    }
    Ok(Coord { x: lon, y: lat })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_both_endpoints() {
        let endpoints = RouteEndpoints::parse("-76.71,39.25", " -76.70 , 39.26 ").expect("valid");
        assert_eq!(endpoints.start, Coord { x: -76.71, y: 39.25 });
        assert_eq!(endpoints.end, Coord { x: -76.70, y: 39.26 });
    }

    #[rstest]
    #[case("180,90")]
    #[case("-180,-90")]
    #[case("0,0")]
    fn accepts_boundaries(#[case] text: &str) {
        assert!(RouteEndpoints::parse(text, text).is_ok());
    }

    #[rstest]
    #[case("", "expected \"lon,lat\"")]
    #[case("-76.71", "expected \"lon,lat\"")]
    #[case("west,39.25", "longitude is not a number")]
    #[case("-76.71,", "latitude is not a number")]
    #[case("-76.71,39.25,10", "latitude is not a number")]
    #[case("NaN,39.25", "coordinates must be finite")]
    #[case("-76.71,inf", "coordinates must be finite")]
    #[case("180.5,0", "longitude must be within [-180, 180]")]
    #[case("0,-90.1", "latitude must be within [-90, 90]")]
    fn rejects_malformed_start(#[case] text: &str, #[case] expected: &'static str) {
        let err = RouteEndpoints::parse(text, "0,0").expect_err("start is invalid");
        assert_eq!(
            err,
            RouteError::InvalidCoordinate {
                endpoint: "start",
                value: text.to_owned(),
                reason: expected,
            }
        );
    }

    #[rstest]
    fn names_the_rejected_endpoint() {
        let err = RouteEndpoints::parse("0,0", "0;0").expect_err("end is invalid");
        assert!(matches!(
            err,
            RouteError::InvalidCoordinate { endpoint: "end", .. }
        ));
    }

    #[rstest]
    fn params_format_lon_then_lat() {
        let endpoints = RouteEndpoints::new(Coord { x: -76.71, y: 39.25 }, Coord { x: 1.5, y: -2.0 });
        assert_eq!(endpoints.start_param(), "-76.71,39.25");
        assert_eq!(endpoints.end_param(), "1.5,-2");
    }
}
