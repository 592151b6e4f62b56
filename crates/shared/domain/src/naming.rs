//! Conversions between display names, type names and registry identifiers.
//!
//! Identifiers are lowercase `snake_case` tokens, optionally namespaced as
//! `project:item`.

/// Separator between the project and item halves of a registry id.
pub const NAMESPACE_SEPARATOR: char = ':';

/// `"White Noise"` → `"white_noise"`.
#[must_use]
pub fn name_to_id(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// `"WhiteNoise"` → `"white_noise"`.
///
/// Every uppercase letter after the first character starts a new word.
#[must_use]
pub fn code_name_to_id(type_name: &str) -> String {
    let mut id = String::with_capacity(type_name.len() + 4);
    for (i, c) in type_name.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            id.push('_');
        }
        id.push(c.to_ascii_lowercase());
    }
    id
}

/// `"gap:white_noise"` → `"White Noise"`.
///
/// The namespace prefix, when present, is dropped.
#[must_use]
pub fn id_to_name(id: &str) -> String {
    let item = id.rsplit_once(NAMESPACE_SEPARATOR).map_or(id, |(_, item)| item);
    title_case(item.split('_'))
}

/// `"RANDOM_HUE"` → `"Random Hue"`.
#[must_use]
pub fn enum_value_to_name(value: &str) -> String {
    title_case(value.split('_'))
}

/// Joins `project` and `item` into a namespaced id.
#[must_use]
pub fn qualified_id(project: &str, item: &str) -> String {
    format!("{project}{NAMESPACE_SEPARATOR}{item}")
}

fn title_case<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_become_ids() {
        assert_eq!(name_to_id("White Noise"), "white_noise");
        assert_eq!(name_to_id("  Color  Reduce "), "color__reduce");
    }

    #[test]
    fn type_names_split_on_capitals() {
        assert_eq!(code_name_to_id("WhiteNoise"), "white_noise");
        assert_eq!(code_name_to_id("Pixelize"), "pixelize");
        assert_eq!(code_name_to_id("ColorReduce"), "color_reduce");
    }

    #[test]
    fn ids_become_display_names() {
        assert_eq!(id_to_name("gap:white_noise"), "White Noise");
        assert_eq!(id_to_name("stripes"), "Stripes");
    }

    #[test]
    fn enum_values_become_display_names() {
        assert_eq!(enum_value_to_name("RANDOM_HUE_AND_DARKNESS"), "Random Hue And Darkness");
        assert_eq!(enum_value_to_name("GRAYSCALE"), "Grayscale");
    }

    #[test]
    fn qualified_ids_use_the_separator() {
        assert_eq!(qualified_id("demo", "white_noise"), "demo:white_noise");
    }
}
