//! Embedded license texts

macro_rules! licenses {
    ($($id:literal),* $(,)?) => {
        &[$(($id, include_str!(concat!("../../licenses/", $id, ".txt")))),*]
    };
}

/// Supported SPDX identifiers and their templates
///
/// Templates may carry `[year]` and `[fullname]` placeholders; texts that name
/// their own copyright holder are written verbatim.
const LICENSES: &[(&str, &str)] = licenses![
    "Apache-2.0",
    "Artistic-1.0",
    "Artistic-2.0",
    "GPL-2.0-or-later",
    "GPL-3.0-or-later",
    "GPL-3.0-WITH-GCC-exception-3.1",
    "LGPL-2.1-or-later",
    "LGPL-3.0-or-later",
    "MIT",
    "MIT-0",
    "MPL-2.0",
    "OFL-1.1",
    "PHP-3.01",
    "Ruby",
    "Unlicense",
    "WTFPL",
    "ZPL-2.1",
];

/// SPDX identifiers gojen can write
pub fn supported() -> impl Iterator<Item = &'static str> {
    LICENSES.iter().map(|(id, _)| *id)
}

/// Render the license text for `id`, filling in year and copyright holder
///
/// Returns `None` for identifiers without an embedded text.
pub fn render(id: &str, year: i32, holder: &str) -> Option<String> {
    LICENSES
        .iter()
        .find(|(known, _)| *known == id.trim())
        .map(|(_, template)| {
            template
                .replace("[year]", &year.to_string())
                .replace("[fullname]", holder)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mit() {
        let text = render("MIT", 2021, "Jane Doe").unwrap();
        assert!(text.starts_with("MIT License"));
        assert!(text.contains("Copyright (c) 2021 Jane Doe"));
        assert!(!text.contains("[year]"));
    }

    #[test]
    fn test_render_without_placeholders() {
        let text = render("Unlicense", 2021, "ignored").unwrap();
        assert!(text.contains("public domain"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn test_render_apache() {
        let text = render("Apache-2.0", 2021, "Jane Doe").unwrap();
        assert!(text.starts_with("Apache License\nVersion 2.0, January 2004"));
        assert!(text.contains("END OF TERMS AND CONDITIONS"));
        // The appendix placeholders are instructions, not template fields
        assert!(text.contains("Copyright [yyyy] [name of copyright owner]"));
    }

    #[test]
    fn test_render_gcc_exception_appends_to_gpl() {
        let text = render("GPL-3.0-WITH-GCC-exception-3.1", 2021, "x").unwrap();
        let gpl = text.find("GNU GENERAL PUBLIC LICENSE").unwrap();
        let exception = text.find("GCC RUNTIME LIBRARY EXCEPTION").unwrap();
        assert!(gpl < exception);
    }

    #[test]
    fn test_id_is_trimmed() {
        assert!(render("LGPL-2.1-or-later  ", 2021, "x").is_some());
    }

    #[test]
    fn test_unknown_license() {
        assert!(render("Proprietary", 2021, "x").is_none());
        assert!(render("GPL-4.0-or-later", 2021, "x").is_none());
        assert!(render("mit", 2021, "x").is_none());
        assert!(render("", 2021, "x").is_none());
    }

    #[test]
    fn test_every_supported_license_renders() {
        let ids: Vec<_> = supported().collect();
        assert_eq!(ids.len(), 17);
        assert!(ids.contains(&"Apache-2.0"));
        assert!(ids.contains(&"ZPL-2.1"));

        for id in ids {
            let text = render(id, 2021, "Jane Doe").unwrap();
            assert!(text.len() > 300, "{}", id);
            assert!(!text.contains("[year]"), "{}", id);
            assert!(!text.contains("[fullname]"), "{}", id);
        }
    }
}
