//! Print the resolved configuration

use anyhow::Result;

use crate::Site;

/// Render the recognized configuration as TOML
pub fn render(site: &Site) -> Result<String> {
    Ok(site.config.to_toml_string()?)
}

/// Print the recognized configuration
pub fn run(site: &Site) -> Result<()> {
    print!("{}", render(site)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_render_drops_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hugo.toml"),
            "baseURL = \"https://example.org/\"\ntitle = \"Blog\"\ntheme = \"legacy\"\n\n[params]\nmainSections = [\"posts\"]\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let rendered = render(&site).unwrap();
        assert!(rendered.contains("baseURL = \"https://example.org/\""));
        assert!(rendered.contains("[params]"));
        assert!(rendered.contains("\"posts\""));
        assert!(!rendered.contains("legacy"));
    }
}
