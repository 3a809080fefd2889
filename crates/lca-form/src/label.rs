//! Human-readable labels for camelCase field identifiers.

/// Insert a space before every uppercase letter that is not the first character.
///
/// `fuelOilConsumption` becomes `fuel Oil Consumption`.
pub fn split_on_case_boundary(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    for (i, ch) in id.chars().enumerate() {
        if i > 0 && ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label shown next to a field, e.g. `mineDepth` -> `Mine Depth`.
pub fn humanize_field_id(id: &str) -> String {
    capitalize_first(&split_on_case_boundary(id))
}

/// Message recorded for a required field left blank.
pub fn required_message(id: &str) -> String {
    format!("{} is required", humanize_field_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_camel_case() {
        assert_eq!(humanize_field_id("fuelOilConsumption"), "Fuel Oil Consumption");
        assert_eq!(humanize_field_id("mineDepth"), "Mine Depth");
        assert_eq!(humanize_field_id("productionVolume"), "Production Volume");
    }

    #[test]
    fn single_word_is_capitalized() {
        assert_eq!(humanize_field_id("state"), "State");
    }

    #[test]
    fn leading_capital_gets_no_space() {
        assert_eq!(split_on_case_boundary("MineName"), "Mine Name");
        assert_eq!(humanize_field_id("MineName"), "Mine Name");
    }

    #[test]
    fn digits_do_not_split() {
        assert_eq!(humanize_field_id("co2Emissions"), "Co2 Emissions");
    }

    #[test]
    fn consecutive_capitals_each_split() {
        assert_eq!(humanize_field_id("totalGHG"), "Total G H G");
    }

    #[test]
    fn empty_input() {
        assert_eq!(humanize_field_id(""), "");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn message_format() {
        assert_eq!(
            required_message("fuelOilConsumption"),
            "Fuel Oil Consumption is required"
        );
    }
}
