use std::fmt;

use serde::Serialize;

/// Language label for a file extension.
///
/// Only the extensions in the fixed table map to a language; everything
/// else is still counted as a file type by the analyzers.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::language::Language;
///
/// assert_eq!(Language::from_extension(".tsx"), Some(Language::TypeScript));
/// assert_eq!(Language::from_extension(".yml"), Some(Language::Yaml));
/// assert_eq!(Language::from_extension(".rs"), None);
/// assert_eq!(Language::Scss.to_string(), "SCSS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Json,
    Css,
    Scss,
    Html,
    Markdown,
    Yaml,
    Sql,
    Shell,
}

impl Language {
    /// Look up an extension as returned by [`extension_of`], leading dot included.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".ts" | ".tsx" => Some(Language::TypeScript),
            ".js" | ".jsx" => Some(Language::JavaScript),
            ".py" => Some(Language::Python),
            ".json" => Some(Language::Json),
            ".css" => Some(Language::Css),
            ".scss" => Some(Language::Scss),
            ".html" => Some(Language::Html),
            ".md" => Some(Language::Markdown),
            ".yml" | ".yaml" => Some(Language::Yaml),
            ".sql" => Some(Language::Sql),
            ".sh" => Some(Language::Shell),
            _ => None,
        }
    }

    /// Display label used in reports and tallies.
    pub fn label(self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Json => "JSON",
            Language::Css => "CSS",
            Language::Scss => "SCSS",
            Language::Html => "HTML",
            Language::Markdown => "Markdown",
            Language::Yaml => "YAML",
            Language::Sql => "SQL",
            Language::Shell => "Shell",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercased extension of a file name, leading dot included.
///
/// Leading dots belong to the stem, so dotfiles such as `.gitignore` have
/// no extension. Returns an empty string when there is none.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::language::extension_of;
///
/// assert_eq!(extension_of("Page.TSX"), ".tsx");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of(".gitignore"), "");
/// assert_eq!(extension_of("Makefile"), "");
/// ```
pub fn extension_of(name: &str) -> String {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(dot) => name[stem_start + dot..].to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_maps() {
        let table = [
            (".ts", "TypeScript"),
            (".tsx", "TypeScript"),
            (".js", "JavaScript"),
            (".jsx", "JavaScript"),
            (".py", "Python"),
            (".json", "JSON"),
            (".css", "CSS"),
            (".scss", "SCSS"),
            (".html", "HTML"),
            (".md", "Markdown"),
            (".yml", "YAML"),
            (".yaml", "YAML"),
            (".sql", "SQL"),
            (".sh", "Shell"),
        ];
        for (ext, label) in table {
            assert_eq!(
                Language::from_extension(ext).map(Language::label),
                Some(label),
                "{ext}"
            );
        }
    }

    #[test]
    fn lookup_expects_leading_dot() {
        assert_eq!(Language::from_extension("ts"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn extension_edge_cases() {
        assert_eq!(extension_of(""), "");
        assert_eq!(extension_of("..hidden.Yml"), ".yml");
        assert_eq!(extension_of("trailing."), ".");
        assert_eq!(extension_of("..."), "");
    }
}
