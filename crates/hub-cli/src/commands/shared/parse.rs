use hub_core::Category;

/// Parse a user-typed category name (case-insensitive).
pub fn parse_category(raw: &str) -> anyhow::Result<Category> {
    raw.parse::<Category>()
        .map_err(|error| anyhow::anyhow!("invalid category '{raw}': {error}"))
}

/// Parse an optional category for a form field, where `All` is not a choice.
pub fn parse_assignable(raw: Option<&str>) -> anyhow::Result<Option<Category>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let category = parse_category(raw)?;
    if category.is_all() {
        anyhow::bail!(
            "invalid category '{raw}': pick one of {}",
            Category::assignable()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(Some(category))
}

#[cfg(test)]
mod tests {
    use hub_core::Category;
    use pretty_assertions::assert_eq;

    use super::{parse_assignable, parse_category};

    #[test]
    fn parses_any_case() {
        assert_eq!(parse_category("photography").unwrap(), Category::Photography);
        assert_eq!(parse_category(" DESIGN ").unwrap(), Category::Design);
        assert_eq!(parse_category("all").unwrap(), Category::All);
    }

    #[test]
    fn errors_on_unknown_category() {
        let err = parse_category("Cooking").expect_err("should fail");
        assert!(err.to_string().contains("invalid category 'Cooking'"));
    }

    #[test]
    fn forms_reject_the_all_sentinel() {
        assert_eq!(parse_assignable(None).unwrap(), None);
        assert_eq!(parse_assignable(Some("design")).unwrap(), Some(Category::Design));
        let err = parse_assignable(Some("All")).expect_err("should fail");
        assert!(err.to_string().contains("Programming, Design, Photography"));
    }
}
