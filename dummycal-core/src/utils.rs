pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Pick up kids"), "pick-up-kids");
        assert_eq!(slugify("  Call X!! "), "call-x");
        assert_eq!(slugify("BBQ"), "bbq");
    }

    #[test]
    fn slugify_truncates_long_names() {
        let long = "a".repeat(80);
        assert_eq!(slugify(&long).len(), 50);
    }
}
