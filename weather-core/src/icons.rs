//! Condition keyword → ASCII icon + color.

use crate::style::Color;

/// Weather condition as named by the forecast API's `icon` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    ClearDay,
    ClearNight,
    Clouds,
    Cloudy,
    CloudsNight,
    Fog,
    Haze,
    HazeNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Rain,
    Sleet,
    Snow,
    Thunderstorm,
    Tornado,
    Wind,
    Unknown,
}

/// Lowercase and drop `-`, `_` and whitespace: `"partly-cloudy-night"` and
/// `"Partly_Cloudy Night"` both become `"partlycloudynight"`.
pub fn normalize(keyword: &str) -> String {
    keyword
        .chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Condition {
    pub fn parse(keyword: &str) -> Self {
        match normalize(keyword).as_str() {
            "clear" => Condition::Clear,
            "clearday" => Condition::ClearDay,
            "clearnight" => Condition::ClearNight,
            "clouds" => Condition::Clouds,
            "cloudy" => Condition::Cloudy,
            "cloudsnight" | "cloudynight" => Condition::CloudsNight,
            "fog" | "mist" => Condition::Fog,
            "haze" => Condition::Haze,
            "hazenight" => Condition::HazeNight,
            "partlycloudy" | "partlycloudyday" => Condition::PartlyCloudyDay,
            "partlycloudynight" => Condition::PartlyCloudyNight,
            "rain" | "drizzle" => Condition::Rain,
            "sleet" => Condition::Sleet,
            "snow" => Condition::Snow,
            "thunderstorm" => Condition::Thunderstorm,
            "tornado" => Condition::Tornado,
            "wind" => Condition::Wind,
            _ => Condition::Unknown,
        }
    }

    /// Night variant for conditions that have one; everything else is
    /// drawn the same by day and by night.
    pub fn at_night(self) -> Self {
        match self {
            Condition::Clear | Condition::ClearDay => Condition::ClearNight,
            Condition::Clouds | Condition::Cloudy => Condition::CloudsNight,
            Condition::Haze => Condition::HazeNight,
            Condition::PartlyCloudyDay => Condition::PartlyCloudyNight,
            other => other,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Condition::ClearDay | Condition::PartlyCloudyDay => Color::Yellow,
            Condition::ClearNight
            | Condition::CloudsNight
            | Condition::HazeNight
            | Condition::PartlyCloudyNight => Color::LightYellow,
            Condition::Snow => Color::White,
            Condition::Thunderstorm | Condition::Tornado | Condition::Wind => Color::Black,
            _ => Color::Blue,
        }
    }

    pub fn icon(self) -> Icon {
        let art = match self {
            Condition::Clear | Condition::ClearDay => SUN,
            Condition::ClearNight => MOON,
            Condition::Clouds | Condition::Cloudy => CLOUDS,
            Condition::CloudsNight => CLOUDS_NIGHT,
            Condition::Fog => FOG,
            Condition::Haze => HAZE,
            Condition::HazeNight => HAZE_NIGHT,
            Condition::PartlyCloudyDay => PARTLY_CLOUDY,
            Condition::PartlyCloudyNight => PARTLY_CLOUDY_NIGHT,
            Condition::Rain => RAIN,
            Condition::Sleet => SLEET,
            Condition::Snow => SNOW,
            Condition::Thunderstorm => THUNDERSTORM,
            Condition::Tornado => TORNADO,
            Condition::Wind => WIND,
            Condition::Unknown => UNKNOWN,
        };
        Icon { condition: self, art }
    }
}

/// Multi-line ASCII art for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub condition: Condition,
    pub art: &'static [&'static str],
}

impl Icon {
    pub fn lines(&self) -> impl Iterator<Item = &'static str> {
        self.art.iter().copied()
    }

    pub fn text(&self) -> String {
        self.art.join("\n")
    }
}

/// Icon and display color for a condition keyword.
///
/// Unrecognized keywords get the generic icon in blue.
pub fn select_icon(keyword: &str, is_night: bool) -> (Icon, Color) {
    let mut condition = Condition::parse(keyword);
    if is_night {
        condition = condition.at_night();
    }
    (condition.icon(), condition.color())
}

const UNKNOWN: &[&str] = &[
    "    .-.      ",
    "     __)     ",
    "    (        ",
    "     `-'     ",
    "      *      ",
];

const SUN: &[&str] = &[
    "    \\   /    ",
    "     .-.     ",
    "  - (   ) -  ",
    "     `-'     ",
    "    /   \\    ",
];

const MOON: &[&str] = &[
    "   *   _     ",
    "      ( `.   ",
    "  *    )  )  ",
    "      (_.'   ",
    "   *      *  ",
];

const CLOUDS: &[&str] = &[
    "             ",
    "     .--.    ",
    "  .-(    ).  ",
    " (___.__)__) ",
    "             ",
];

const CLOUDS_NIGHT: &[&str] = &[
    "  *  _       ",
    "    ( `.--.  ",
    "  .-(    ).  ",
    " (___.__)__) ",
    "       *     ",
];

const PARTLY_CLOUDY: &[&str] = &[
    "   \\  /      ",
    " _ /\"\".-.    ",
    "   \\_(   ).  ",
    "   /(___(__) ",
    "             ",
];

const PARTLY_CLOUDY_NIGHT: &[&str] = &[
    "  *   _      ",
    "     ( .-.   ",
    "  *  (   ).  ",
    "    (___(__) ",
    "       *     ",
];

const FOG: &[&str] = &[
    "             ",
    " _ - _ - _ - ",
    "  _ - _ - _  ",
    " _ - _ - _ - ",
    "             ",
];

const HAZE: &[&str] = &[
    "    \\   /    ",
    " _ - .-. - _ ",
    "  - (   ) -  ",
    " _ - `-' - _ ",
    "    /   \\    ",
];

const HAZE_NIGHT: &[&str] = &[
    "   *   _     ",
    " _ - ( `.- _ ",
    "  - _ )  ) - ",
    " _ - (_.'- _ ",
    "   *      *  ",
];

const RAIN: &[&str] = &[
    "     .-.     ",
    "    (   ).   ",
    "   (___(__)  ",
    "    ' ' ' '  ",
    "   ' ' ' '   ",
];

const SLEET: &[&str] = &[
    "     .-.     ",
    "    (   ).   ",
    "   (___(__)  ",
    "    ' * ' *  ",
    "   * ' * '   ",
];

const SNOW: &[&str] = &[
    "     .-.     ",
    "    (   ).   ",
    "   (___(__)  ",
    "    *  *  *  ",
    "   *  *  *   ",
];

const THUNDERSTORM: &[&str] = &[
    "     .-.     ",
    "    (   ).   ",
    "   (___(__)  ",
    "  ,'/,'/,'   ",
    "  ' / ' /    ",
];

const TORNADO: &[&str] = &[
    " (~~~~~~~~~) ",
    "  (~~~~~~~)  ",
    "    (~~~~)   ",
    "     (~~)    ",
    "      ()     ",
];

const WIND: &[&str] = &[
    "             ",
    "  ~~~~ ~~~   ",
    " ~~~ ~~~~~~  ",
    "   ~~~~~ ~~~ ",
    "             ",
];
