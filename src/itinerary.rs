//! Itinerary reply formatting
//!
//! Some replies carry a trip plan as a JSON array of day objects. These are
//! deserialized into typed [`ItineraryDay`]s and rendered as markdown (chat)
//! or HTML. Text that does not parse is passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One day of a trip plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryDay {
    /// Usually an integer, occasionally a label such as "1-2"
    pub day_number: Option<Value>,
    pub location: Option<String>,
    pub activities: Vec<String>,
    pub transport: Option<String>,
    pub meal_recommendations: Vec<String>,
    pub notes: Option<String>,
}

impl ItineraryDay {
    fn day_label(&self) -> String {
        match &self.day_number {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn location_label(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}

/// Parse `text` as an itinerary. Only JSON arrays of day objects qualify.
pub fn parse_itinerary(text: &str) -> Option<Vec<ItineraryDay>> {
    let trimmed = text.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    match serde_json::from_str::<Vec<ItineraryDay>>(trimmed) {
        Ok(days) if !days.is_empty() => Some(days),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Reply looks like a list but is not an itinerary");
            None
        }
    }
}

/// Render an itinerary reply as markdown; other text is returned unchanged
pub fn format_trip_response(text: &str) -> String {
    match parse_itinerary(text) {
        Some(days) => itinerary_markdown(&days),
        None => text.to_string(),
    }
}

pub fn itinerary_markdown(days: &[ItineraryDay]) -> String {
    let mut out = format!("**{}-Day Trip Itinerary**\n\n", days.len());
    for day in days {
        out.push_str(&format!(
            "**Day {} - {}**\n",
            day.day_label(),
            day.location_label()
        ));
        for activity in &day.activities {
            out.push_str(&format!("- {}\n", activity));
        }
        if let Some(transport) = &day.transport {
            out.push_str(&format!("*Transport:* {}\n", transport));
        }
        if !day.meal_recommendations.is_empty() {
            out.push_str(&format!("*Meals:* {}\n", day.meal_recommendations.join(", ")));
        }
        if let Some(notes) = &day.notes {
            out.push_str(&format!("*Notes:* {}\n", notes));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// HTML fragment for web clients. All values are escaped.
pub fn format_itinerary_html(days: &[ItineraryDay]) -> String {
    let mut html = String::from("<div class=\"itinerary\">\n");
    html.push_str(&format!(
        "  <h5>{}-Day Adventure Plan</h5>\n",
        days.len()
    ));

    for day in days {
        html.push_str("  <div class=\"itinerary-day\">\n");
        html.push_str(&format!(
            "    <h6>Day {}: {}</h6>\n",
            escape_html(&day.day_label()),
            escape_html(day.location_label())
        ));
        html.push_str("    <ul>\n");
        for activity in &day.activities {
            html.push_str(&format!("      <li>{}</li>\n", escape_html(activity)));
        }
        html.push_str("    </ul>\n");
        if let Some(transport) = &day.transport {
            html.push_str(&format!(
                "    <p><strong>Transport:</strong> {}</p>\n",
                escape_html(transport)
            ));
        }
        if !day.meal_recommendations.is_empty() {
            html.push_str(&format!(
                "    <p><strong>Meals:</strong> {}</p>\n",
                escape_html(&day.meal_recommendations.join(", "))
            ));
        }
        if let Some(notes) = &day.notes {
            html.push_str(&format!("    <p><em>{}</em></p>\n", escape_html(notes)));
        }
        html.push_str("  </div>\n");
    }

    html.push_str("</div>");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"[
        {"day_number": 1, "location": "Maseru", "activities": ["Arrive", "Thaba Bosiu"],
         "transport": "Car hire", "meal_recommendations": ["Papa", "Moroho"], "notes": "Carry cash"},
        {"day_number": 2, "location": "Semonkong", "activities": ["Maletsunyane Falls"]}
    ]"#;

    #[test]
    fn test_format_plan_markdown() {
        let md = format_trip_response(PLAN);
        assert!(md.starts_with("**2-Day Trip Itinerary**"));
        assert!(md.contains("**Day 1 - Maseru**\n- Arrive\n- Thaba Bosiu\n"));
        assert!(md.contains("*Transport:* Car hire"));
        assert!(md.contains("*Meals:* Papa, Moroho"));
        assert!(md.contains("*Notes:* Carry cash"));
        assert!(md.ends_with("- Maletsunyane Falls"));
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(format_trip_response("Lumela"), "Lumela");
    }

    #[test]
    fn test_python_literal_is_not_evaluated() {
        let text = "[{'day_number': 1, 'location': 'Maseru'}]";
        assert_eq!(format_trip_response(text), text);
        assert!(parse_itinerary("[__import__('os')]").is_none());
    }

    #[test]
    fn test_empty_list_untouched() {
        assert_eq!(format_trip_response("[]"), "[]");
    }

    #[test]
    fn test_string_day_number() {
        let days = parse_itinerary(r#"[{"day_number": "1-2", "location": "Katse"}]"#).unwrap();
        assert!(itinerary_markdown(&days).contains("**Day 1-2 - Katse**"));
    }

    #[test]
    fn test_html_escapes_values() {
        let days = vec![ItineraryDay {
            day_number: Some(Value::from(1)),
            location: Some("<script>".to_string()),
            activities: vec!["Rock & roll".to_string()],
            ..Default::default()
        }];
        let html = format_itinerary_html(&days);
        assert!(html.contains("Day 1: &lt;script&gt;"));
        assert!(html.contains("<li>Rock &amp; roll</li>"));
        assert!(!html.contains("<script>"));
    }
}
