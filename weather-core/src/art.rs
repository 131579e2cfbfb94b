//! ASCII art for common weather conditions.

const SUN: &str = "   \\   /   \n    .-.    \n ― (   ) ― \n    `-’    \n   /   \\   ";
const CLOUD: &str = "     .--.   \n  .-(    ).\n (___.__)__)";
const RAIN: &str = "     .--.   \n  .-(    ).\n (___.__)__) \n  ʻ ʻ ʻ ʻ ";
const STORM: &str = "     .--.   \n  .-(    ).\n (___.__)__) \n  ⚡⚡⚡⚡";
const SNOW: &str = "     .--.   \n  .-(    ).\n (___.__)__) \n   * * * *";
const FOG: &str = " _ - _ - _ - ";
const SMOKE: &str = "     (    )\n    (____)";

/// Keyword → art, checked in order. The first keyword contained in the
/// condition wins.
pub const ASCII_ART: &[(&str, &str)] = &[
    ("clear", SUN),
    ("clouds", CLOUD),
    ("rain", RAIN),
    ("drizzle", RAIN),
    ("thunderstorm", STORM),
    ("snow", SNOW),
    ("mist", FOG),
    ("fog", FOG),
    ("haze", FOG),
    ("smoke", SMOKE),
];

/// Art for a condition keyword such as `"Rain"` or `"light rain"`.
pub fn art_for(condition: &str) -> Option<&'static str> {
    let condition = condition.to_lowercase();
    ASCII_ART
        .iter()
        .find(|(keyword, _)| condition.contains(keyword))
        .map(|(_, art)| *art)
}
