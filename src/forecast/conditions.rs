/// Sky-condition label for an Open-Meteo WMO weather code.
#[must_use]
pub fn describe(code: u16) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 | 53 | 55 => "Drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        71 | 73 | 75 => "Snow",
        80..=82 => "Rain showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::describe;

    #[test]
    fn base_codes_keep_their_labels() {
        assert_eq!(describe(0), "Clear");
        assert_eq!(describe(48), "Rime fog");
        assert_eq!(describe(61), "Light rain");
        assert_eq!(describe(95), "Thunderstorm");
    }

    #[test]
    fn extended_and_unknown_codes() {
        assert_eq!(describe(55), "Drizzle");
        assert_eq!(describe(81), "Rain showers");
        assert_eq!(describe(99), "Thunderstorm with hail");
        assert_eq!(describe(42), "Unknown");
        assert_eq!(describe(77), "Unknown");
    }
}
