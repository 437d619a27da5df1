//! Fake weather lookup — every city is sunny.

use crate::types::{ResultKind, TaggedResult};

pub fn get_weather(city: &str) -> TaggedResult {
    let city = city.trim();
    if city.is_empty() {
        return TaggedResult::error("Missing city");
    }
    TaggedResult::new(ResultKind::Weather, format!("{} - Sunny, 22°C", city))
}
