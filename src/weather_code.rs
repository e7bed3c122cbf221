/// Weather condition derived from WMO weather codes as reported by Open-Meteo
///
/// See https://open-meteo.com/en/docs for the code table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    RimeFog,
    Drizzle,
    Rain,
    HeavyRain,
    FreezingRain,
    LightSnow,
    Snow,
    HeavySnow,
    SnowGrains,
    RainShowers,
    ViolentRainShowers,
    SnowShowers,
    HeavySnowShowers,
    Thunderstorm,
    ThunderstormWithHail,
    HeavyThunderstormWithHail,
    Unknown,
}

impl WeatherCondition {
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 => Self::Fog,
            48 => Self::RimeFog,
            51 | 53 | 55 | 61 => Self::Drizzle,
            63 => Self::Rain,
            65 => Self::HeavyRain,
            66 | 67 => Self::FreezingRain,
            71 => Self::LightSnow,
            73 => Self::Snow,
            75 => Self::HeavySnow,
            77 => Self::SnowGrains,
            80 | 81 => Self::RainShowers,
            82 => Self::ViolentRainShowers,
            85 => Self::SnowShowers,
            86 => Self::HeavySnowShowers,
            95 => Self::Thunderstorm,
            96 => Self::ThunderstormWithHail,
            99 => Self::HeavyThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    /// Japanese description as shown in notifications
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "快晴",
            Self::MainlyClear => "晴れ",
            Self::PartlyCloudy => "一部曇り",
            Self::Overcast => "曇り",
            Self::Fog => "霧",
            Self::RimeFog => "霧氷",
            Self::Drizzle => "小雨",
            Self::Rain => "雨",
            Self::HeavyRain => "大雨",
            Self::FreezingRain => "雨氷",
            Self::LightSnow => "小雪",
            Self::Snow => "雪",
            Self::HeavySnow => "大雪",
            Self::SnowGrains => "霧雪",
            Self::RainShowers => "にわか雨",
            Self::ViolentRainShowers => "激しいにわか雨",
            Self::SnowShowers => "にわか雪",
            Self::HeavySnowShowers => "激しいにわか雪",
            Self::Thunderstorm => "雷雨",
            Self::ThunderstormWithHail => "雷雨と雹",
            Self::HeavyThunderstormWithHail => "激しい雷雨と雹",
            Self::Unknown => "不明",
        }
    }
}
