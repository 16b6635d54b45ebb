//! Human-readable rendering of a forecast.
//!
//! Every function returns styled [`Line`]s; nothing here writes to a
//! terminal.

use crate::{
    bearing,
    icons::select_icon,
    model::{Alert, Forecast, Geocode, TimeSeries, WeatherSnapshot},
    style::{Color, Line},
    timefmt::TimeFormatter,
    units::{UnitProfile, UnitSystem, round},
};

/// Humidity above this fraction gets the "Ick!" treatment.
pub const HUMID_THRESHOLD: f64 = 0.20;

/// Visibility at or above this many length units is not worth mentioning.
pub const CLEAR_VISIBILITY: f64 = 10.0;

/// Hours covered by the rain chance chart.
pub const RAIN_CHART_HOURS: usize = 16;

const TICKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub hide_icon: bool,
    pub ignore_alerts: bool,
    /// System the user asked for; see [`UnitSystem::display_profile`].
    pub units: UnitSystem,
}

fn with_unit(value: f64, unit: &str) -> String {
    format!("{value}{unit}")
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn labelled(label: &str, value: String) -> Line {
    Line::new().push(format!("  {label}")).push_colored(value, Color::White)
}

/// The block shared by current and daily output. A line is only emitted when
/// its reading is present (non-zero).
pub fn render_snapshot(snapshot: &WeatherSnapshot, units: &UnitProfile) -> Vec<Line> {
    let mut lines = Vec::new();

    if snapshot.humidity > 0.0 {
        let label = if snapshot.humidity > HUMID_THRESHOLD {
            "Ick! The humidity is "
        } else {
            "The humidity is "
        };
        lines.push(labelled(label, percent(snapshot.humidity)));
    }

    if snapshot.precip_intensity > 0.0 {
        lines.push(
            Line::new()
                .push("  The precipitation intensity of ")
                .push_colored(snapshot.precip_type.clone(), Color::White)
                .push(" is ")
                .push_colored(
                    format!("{} {}", snapshot.precip_intensity, units.precipitation),
                    Color::White,
                ),
        );
    }

    if snapshot.precip_probability > 0.0 {
        lines.push(labelled(
            "The precipitation probability is ",
            format!("{}%", round(snapshot.precip_probability * 100.0, 2)),
        ));
    }

    if snapshot.nearest_storm_distance > 0.0 {
        lines.push(
            Line::new()
                .push("  The nearest storm is ")
                .push_colored(
                    format!(
                        "{} {} {}",
                        snapshot.nearest_storm_distance,
                        units.length,
                        bearing::label_for(snapshot.nearest_storm_bearing)
                    ),
                    Color::White,
                )
                .push(" away"),
        );
    }

    if snapshot.wind_speed > 0.0 {
        lines.push(labelled(
            "The wind speed is ",
            format!(
                "{} {} {}",
                snapshot.wind_speed,
                units.speed,
                bearing::label_for(snapshot.wind_bearing)
            ),
        ));
    }

    if snapshot.cloud_cover > 0.0 {
        lines.push(labelled("The cloud coverage is ", percent(snapshot.cloud_cover)));
    }

    if snapshot.visibility > 0.0 && snapshot.visibility < CLEAR_VISIBILITY {
        lines.push(labelled(
            "The visibility is ",
            format!("{} {}", snapshot.visibility, units.length),
        ));
    }

    if snapshot.pressure > 0.0 {
        lines.push(labelled(
            "The pressure is ",
            format!(
                "{} {}",
                round(snapshot.pressure * units.pressure_multiple, 2),
                units.pressure
            ),
        ));
    }

    if !lines.is_empty() {
        lines.push(Line::blank());
    }

    lines
}

/// Current conditions: icon, greeting, temperature, alerts, the common
/// block and the hourly rain chart.
pub fn render_current(forecast: &Forecast, place: &Geocode, options: RenderOptions) -> Vec<Line> {
    let units = options.units.display_profile(forecast.units());
    let times = TimeFormatter::for_timezone(&forecast.timezone);
    let now = &forecast.currently;
    let mut lines = Vec::new();

    if !options.hide_icon {
        let (icon, color) = select_icon(&now.icon, is_night(forecast));
        lines.extend(icon.lines().map(|row| Line::new().push_colored(row, color)));
    }

    lines.push(Line::blank());
    lines.push(greeting(now, place, &times));
    lines.push(temperature(now, &units));
    lines.push(Line::blank());

    if !options.ignore_alerts {
        for alert in &forecast.alerts {
            lines.extend(render_alert(alert, &times));
        }
    }

    lines.extend(render_snapshot(now, &units));
    lines.extend(render_hourly(&forecast.hourly, &times));

    lines
}

fn greeting(now: &WeatherSnapshot, place: &Geocode, times: &TimeFormatter) -> Line {
    let location = [place.city.as_str(), place.region.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" in ");

    let mut line = Line::new()
        .push("Current weather is ")
        .push_colored(now.summary.clone(), Color::Cyan);
    if !location.is_empty() {
        line = line.push(" in ").push_colored(location, Color::Green);
    }
    line.push(" for ").push_colored(times.full(now.time), Color::Cyan)
}

fn temperature(now: &WeatherSnapshot, units: &UnitProfile) -> Line {
    let temp = with_unit(now.temperature, units.degrees);
    let feels_like = with_unit(now.apparent_temperature, units.degrees);

    let line = Line::new().push("The temperature is ");
    if temp == feels_like {
        line.push_colored(temp, Color::Magenta)
    } else {
        line.push_colored(temp, Color::Magenta)
            .push(", but it feels like ")
            .push_colored(feels_like, Color::Magenta)
    }
}

fn render_alert(alert: &Alert, times: &TimeFormatter) -> Vec<Line> {
    let mut lines = Vec::new();
    if !alert.title.is_empty() {
        lines.push(Line::new().push_colored(alert.title.clone(), Color::Red));
    }
    if !alert.description.is_empty() {
        lines.push(Line::new().push_colored(alert.description.trim_end().to_string(), Color::Red));
    }
    lines.push(
        Line::new()
            .push("\t\t\t")
            .push_colored(format!("Created: {}", times.full(alert.time)), Color::Red),
    );
    lines.push(
        Line::new()
            .push("\t\t\t")
            .push_colored(format!("Expires: {}", times.full(alert.expires)), Color::Red),
    );
    lines.push(Line::blank());
    lines
}

/// Hourly summary plus a sparkline of rain chances for the next hours.
/// The chart is left out when no hour has any chance of rain.
pub fn render_hourly(hourly: &TimeSeries, times: &TimeFormatter) -> Vec<Line> {
    let mut lines = Vec::new();
    if hourly.summary.is_empty() {
        return lines;
    }
    lines.push(Line::new().push(hourly.summary.clone()));
    lines.push(Line::blank());

    let hours = &hourly.data[..hourly.data.len().min(RAIN_CHART_HOURS)];
    if hours.iter().all(|h| h.precip_probability <= 0.0) {
        return lines;
    }

    let mut chart = String::new();
    for hour in hours {
        let tick = rain_tick(hour.precip_probability);
        chart.push(tick);
        chart.push(tick);
        chart.push(' ');
    }
    lines.push(Line::new().push("Rain chance: ").push_colored(chart, Color::Blue));

    let mut axis = " ".repeat("Rain chance: ".len());
    for hour in hours.iter().step_by(4) {
        axis.push_str(&format!("{:<12}", times.hour(hour.time)));
    }
    lines.push(Line::new().push(axis.trim_end().to_string()));
    lines.push(Line::blank());

    lines
}

fn rain_tick(probability: f64) -> char {
    if probability <= 0.0 {
        return TICKS[0];
    }
    let index = (probability * (TICKS.len() - 2) as f64) as usize + 1;
    TICKS[index.min(TICKS.len() - 1)]
}

/// Daily outlook for up to `days` days, starting tomorrow (today is
/// covered by [`render_current`]).
pub fn render_daily(forecast: &Forecast, days: usize, requested: UnitSystem) -> Vec<Line> {
    let units = requested.display_profile(forecast.units());
    let times = TimeFormatter::for_timezone(&forecast.timezone);
    let mut lines = Vec::new();

    for day in forecast.daily.data.iter().skip(1).take(days) {
        lines.push(Line::new().push_colored(times.date(day.time), Color::Magenta));
        lines.push(
            Line::new()
                .push("The temperature high is ")
                .push_colored(with_unit(day.temperature_max, units.degrees), Color::Blue)
                .push(", feels like ")
                .push_colored(with_unit(day.apparent_temperature_max, units.degrees), Color::Cyan)
                .push(format!(" around {},", times.time(day.temperature_max_time))),
        );
        lines.push(
            Line::new()
                .push("and low is ")
                .push_colored(with_unit(day.temperature_min, units.degrees), Color::Blue)
                .push(", feels like ")
                .push_colored(with_unit(day.apparent_temperature_min, units.degrees), Color::Cyan)
                .push(format!(" around {}", times.time(day.temperature_min_time))),
        );
        lines.push(Line::blank());
        lines.extend(render_snapshot(day, &units));
    }

    lines
}

/// Current readings rarely carry sun times, so today's daily entry fills in.
fn is_night(forecast: &Forecast) -> bool {
    let now = &forecast.currently;
    if now.sunrise_time != 0 && now.sunset_time != 0 {
        return now.is_night();
    }
    match forecast.daily.data.first() {
        Some(today) => WeatherSnapshot {
            time: now.time,
            sunrise_time: today.sunrise_time,
            sunset_time: today.sunset_time,
            ..Default::default()
        }
        .is_night(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::to_plain_text;
    use crate::units::profile_for;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain).collect()
    }

    fn phoenix_forecast() -> Forecast {
        serde_json::from_value(serde_json::json!({
            "alerts": [{
                "title": "Blowing Dust Advisory for Maricopa, AZ",
                "description": "A BLOWING DUST ADVISORY REMAINS IN EFFECT UNTIL 11 PM MST.\n",
                "time": 1405313940,
                "expires": 1405317600,
                "uri": "http://alerts.weather.gov/cap/wwacapget.php?x=AZ1251601B31CC"
            }],
            "currently": {
                "apparentTemperature": 91.72,
                "cloudCover": 0.92,
                "humidity": 0.44,
                "icon": "partly-cloudy-night",
                "pressure": 1010.85,
                "summary": "Mostly Cloudy",
                "temperature": 89.72,
                "time": 1405315610,
                "visibility": 9.99,
                "windBearing": 208,
                "windSpeed": 6.48
            },
            "daily": {
                "data": [
                    {"time": 1405234800, "temperatureMax": 105.3},
                    {
                        "time": 1405321200,
                        "temperatureMax": 106.1,
                        "temperatureMaxTime": 1405375200,
                        "temperatureMin": 85.5,
                        "temperatureMinTime": 1405339200,
                        "apparentTemperatureMax": 108.0,
                        "apparentTemperatureMin": 86.0,
                        "humidity": 0.15,
                        "precipIntensity": 0.0047,
                        "precipProbability": 0.95,
                        "precipType": "rain",
                        "visibility": 10
                    },
                    {"time": 1405407600, "temperatureMax": 109.0}
                ]
            },
            "flags": {"units": "us"},
            "latitude": 33.4962205,
            "longitude": -111.9641728,
            "timezone": "America/Phoenix"
        }))
        .unwrap()
    }

    fn phoenix() -> Geocode {
        Geocode {
            city: "Scottsdale".into(),
            region: "Arizona".into(),
            latitude: 33.4962205,
            longitude: -111.9641728,
            ..Default::default()
        }
    }

    #[test]
    fn humidity_line_omitted_when_absent() {
        let lines = render_snapshot(&WeatherSnapshot::default(), &profile_for("us"));
        assert!(lines.is_empty());
    }

    #[test]
    fn humidity_wording_switches_above_threshold() {
        let us = profile_for("us");

        let at = WeatherSnapshot { humidity: 0.20, ..Default::default() };
        assert_eq!(render_snapshot(&at, &us)[0].plain(), "  The humidity is 20.00%");

        let above = WeatherSnapshot { humidity: 0.21, ..Default::default() };
        assert_eq!(render_snapshot(&above, &us)[0].plain(), "  Ick! The humidity is 21.00%");
    }

    #[test]
    fn common_block_order_and_units() {
        let snap = WeatherSnapshot {
            humidity: 0.44,
            precip_intensity: 0.0178,
            precip_type: "rain".into(),
            precip_probability: 0.52,
            nearest_storm_distance: 12.0,
            nearest_storm_bearing: 45.0,
            wind_speed: 6.48,
            wind_bearing: 208.0,
            cloud_cover: 0.92,
            visibility: 9.99,
            pressure: 1010.85,
            ..Default::default()
        };

        assert_eq!(
            plain(&render_snapshot(&snap, &profile_for("us"))),
            vec![
                "  Ick! The humidity is 44.00%",
                "  The precipitation intensity of rain is 0.0178 in/hr",
                "  The precipitation probability is 52%",
                "  The nearest storm is 12 miles NE away",
                "  The wind speed is 6.48 mph SSW",
                "  The cloud coverage is 92.00%",
                "  The visibility is 9.99 miles",
                "  The pressure is 1010.85 mbar",
                "",
            ]
        );
    }

    #[test]
    fn clear_visibility_is_not_reported() {
        let snap = WeatherSnapshot { visibility: 10.0, ..Default::default() };
        assert!(render_snapshot(&snap, &profile_for("si")).is_empty());
    }

    #[test]
    fn pressure_is_scaled_and_rounded() {
        let snap = WeatherSnapshot { pressure: 1010.85, ..Default::default() };
        let lines = render_snapshot(&snap, &profile_for("imperial"));
        assert_eq!(lines[0].plain(), "  The pressure is 29.82 inHg");
    }

    #[test]
    fn unknown_units_render_blank_labels() {
        let snap = WeatherSnapshot { wind_speed: 3.0, wind_bearing: 0.0, ..Default::default() };
        let lines = render_snapshot(&snap, &profile_for("xx"));
        assert_eq!(lines[0].plain(), "  The wind speed is 3  N");
    }

    #[test]
    fn current_shows_both_temperatures() {
        let text = to_plain_text(&render_current(
            &phoenix_forecast(),
            &phoenix(),
            RenderOptions::default(),
        ));

        assert!(text.contains("The temperature is 89.72°F, but it feels like 91.72°F"));
        assert!(text.contains(
            "Current weather is Mostly Cloudy in Scottsdale in Arizona for July 13 at 10:26pm MST"
        ));
    }

    #[test]
    fn current_collapses_identical_temperatures() {
        let mut fc = phoenix_forecast();
        fc.currently.apparent_temperature = fc.currently.temperature;

        let lines = plain(&render_current(&fc, &phoenix(), RenderOptions::default()));
        assert!(lines.contains(&"The temperature is 89.72°F".to_string()));
        assert!(!lines.iter().any(|l| l.contains("feels like")));
    }

    #[test]
    fn current_alerts_respect_ignore_flag() {
        let fc = phoenix_forecast();

        let shown = to_plain_text(&render_current(&fc, &phoenix(), RenderOptions::default()));
        assert!(shown.contains("Blowing Dust Advisory for Maricopa, AZ"));
        assert!(shown.contains("\t\t\tCreated: July 13 at 9:59pm MST"));
        assert!(shown.contains("\t\t\tExpires: July 13 at 11:00pm MST"));

        let hidden = to_plain_text(&render_current(
            &fc,
            &phoenix(),
            RenderOptions { ignore_alerts: true, ..Default::default() },
        ));
        assert!(!hidden.contains("Blowing Dust"));
    }

    #[test]
    fn current_icon_can_be_hidden() {
        let fc = phoenix_forecast();
        let with_icon = render_current(&fc, &phoenix(), RenderOptions::default());
        let without = render_current(
            &fc,
            &phoenix(),
            RenderOptions { hide_icon: true, ..Default::default() },
        );

        assert_eq!(with_icon.len(), without.len() + 5);
        assert_eq!(with_icon[0].spans[0].color, Some(Color::LightYellow));
    }

    #[test]
    fn hourly_chart_only_when_rain_expected() {
        let times = TimeFormatter::for_timezone("America/Phoenix");
        let dry = TimeSeries {
            summary: "Clear throughout the day.".into(),
            data: vec![WeatherSnapshot::default(); 20],
            ..Default::default()
        };
        assert_eq!(plain(&render_hourly(&dry, &times)), vec!["Clear throughout the day.", ""]);

        let mut wet = dry.clone();
        wet.summary = "Drizzle starting tomorrow afternoon.".into();
        for (i, hour) in wet.data.iter_mut().enumerate() {
            hour.time = 1405314000 + i as i64 * 3600;
        }
        wet.data[0].precip_probability = 0.52;
        wet.data[1].precip_probability = 1.0;

        let lines = plain(&render_hourly(&wet, &times));
        assert!(lines[2].starts_with("Rain chance: ▄▄ ██    "));
        assert_eq!(lines[2].chars().filter(|c| *c == ' ').count(), 2 + 2 + 14 * 3);
        assert!(lines[3].starts_with("             10pm        2am"));
    }

    #[test]
    fn daily_skips_today_and_stops_after_days() {
        let fc = phoenix_forecast();

        let lines = plain(&render_daily(&fc, 1, UnitSystem::Auto));
        assert_eq!(lines[0], "July 14 (Monday)");
        assert_eq!(
            lines[1],
            "The temperature high is 106.1°F, feels like 108°F around 3:00pm MST,"
        );
        assert_eq!(lines[2], "and low is 85.5°F, feels like 86°F around 5:00am MST");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "  The humidity is 15.00%");
        assert_eq!(lines[5], "  The precipitation intensity of rain is 0.0047 in/hr");
        assert_eq!(lines[6], "  The precipitation probability is 95%");
        assert!(!lines.iter().any(|l| l.contains("July 15")));

        let all = plain(&render_daily(&fc, 10, UnitSystem::Us));
        assert!(all.iter().any(|l| l == "July 15 (Tuesday)"));
        assert!(!all.iter().any(|l| l.contains("July 13")));
    }

    #[test]
    fn requested_imperial_scales_pressure_of_us_forecast() {
        let mut fc = phoenix_forecast();
        fc.currently.pressure = 1010.85;
        fc.daily.data[1].pressure = 1010.85;

        let reported = plain(&render_current(&fc, &phoenix(), RenderOptions::default()));
        assert!(reported.contains(&"  The pressure is 1010.85 mbar".to_string()));

        let options = RenderOptions { units: UnitSystem::Imperial, ..Default::default() };
        let current = plain(&render_current(&fc, &phoenix(), options));
        assert!(current.contains(&"  The pressure is 29.82 inHg".to_string()));

        let daily = plain(&render_daily(&fc, 1, UnitSystem::Imperial));
        assert!(daily.contains(&"  The pressure is 29.82 inHg".to_string()));
    }

    #[test]
    fn night_detection_borrows_daily_sun_times() {
        let mut fc = phoenix_forecast();
        fc.daily.data[0].sunrise_time = 1405254533;
        fc.daily.data[0].sunset_time = 1405305631;
        assert!(is_night(&fc));

        fc.currently.time = 1405280000;
        assert!(!is_night(&fc));
    }
}
