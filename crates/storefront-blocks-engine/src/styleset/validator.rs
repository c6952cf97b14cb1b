use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::variables::StylesetVariables;
use crate::error::VariableError;

/// Outcome of a CSS check. Warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }
}

/// Patterns that can execute script or pull in foreign content.
const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)expression\s*\(", "expression()"),
    (r"(?i)javascript\s*:", "javascript: URL"),
    (r"(?i)(?:^|[^\w-])behavior\s*:", "behavior directive"),
    (r"(?i)-moz-binding", "-moz-binding directive"),
    (r#"(?i)url\s*\(\s*['"]?\s*data:"#, "data: URL"),
];

fn dangerous_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        DANGEROUS_PATTERNS
            .iter()
            .map(|(pattern, label)| {
                (Regex::new(pattern).expect("Invalid dangerous pattern regex"), *label)
            })
            .collect()
    })
}

macro_rules! static_regex {
    ($name:ident, $pattern:literal) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect(concat!("Invalid regex: ", $pattern)))
        }
    };
}

static_regex!(missing_semicolon_re, r"(?m)[a-zA-Z-]+\s*:\s*[^;{}\n]+\n\s*[a-zA-Z-]+\s*:");
static_regex!(empty_value_re, r"[a-zA-Z-]+\s*:\s*;");
static_regex!(double_colon_re, r"::\s|:\s+:");
static_regex!(empty_rule_re, r"([^{}]+?)\{\s*\}");
static_regex!(hex_color_re, r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$");
static_regex!(rgb_re, r"^(?i)rgba?\(\s*[\d.\s,%/]+\)$");
static_regex!(hsl_re, r"^(?i)hsla?\(\s*-?[\d.]+(?:deg|grad|rad|turn)?[\s,/%\d.]*\)$");
static_regex!(var_ref_re, r"^var\(\s*--[a-zA-Z0-9_-]+\s*\)$");
static_regex!(font_family_re, r#"^[\p{L}\s"',-]+$"#);
static_regex!(size_re, r"^-?(?:\d+|\d*\.\d+)(?:px|rem|em|%|vh|vw|vmin|vmax|ch|ex|pt)$");
static_regex!(calc_re, r"^calc\(.+\)$");
static_regex!(selector_re, r"[.#](-?[_a-zA-Z][_a-zA-Z0-9-]*)");

const NAMED_COLORS: &[&str] = &[
    "transparent",
    "currentcolor",
    "inherit",
    "black",
    "white",
    "red",
    "green",
    "blue",
    "gray",
    "grey",
    "orange",
    "yellow",
    "purple",
    "pink",
    "navy",
];

const SIZE_KEYWORDS: &[&str] = &["auto", "inherit", "initial", "unset", "0"];

const SIZE_NAME_HINTS: &[&str] = &["spacing", "size", "radius", "width", "gap", "padding", "margin"];

/// Selectors that may appear without the namespace prefix.
const NAMESPACE_EXEMPT: &[&str] = &[":root", "*", "html", "body"];

#[derive(Debug, Default, Clone, Copy)]
pub struct StylesetValidator;

impl StylesetValidator {
    /// Runs the safety, balance, syntax and empty-rule checks.
    pub fn validate(&self, css: &str) -> ValidationReport {
        let mut report = ValidationReport::from_parts(Vec::new(), Vec::new());
        report.merge(Self::check_dangerous(css));
        report.merge(Self::check_balance(css));
        report.merge(Self::check_syntax(css));
        report.merge(Self::check_empty_rules(css));
        report
    }

    fn check_dangerous(css: &str) -> ValidationReport {
        let errors = dangerous_patterns()
            .iter()
            .filter(|(re, _)| re.is_match(css))
            .map(|(_, label)| format!("Dangerous pattern detected: {label}"))
            .collect();
        ValidationReport::from_parts(errors, Vec::new())
    }

    fn check_balance(css: &str) -> ValidationReport {
        let mut errors = Vec::new();
        for (open, close, label) in [('{', '}', "braces"), ('(', ')', "parentheses")] {
            let opened = css.matches(open).count();
            let closed = css.matches(close).count();
            if opened != closed {
                errors.push(format!(
                    "Mismatched {label}: {opened} opening '{open}' vs {closed} closing '{close}'"
                ));
            }
        }
        ValidationReport::from_parts(errors, Vec::new())
    }

    /// Heuristic; a missing semicolon is only ever a warning.
    fn check_syntax(css: &str) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if missing_semicolon_re().is_match(css) {
            warnings.push("Possible missing semicolon between declarations".to_string());
        }
        for m in empty_value_re().find_iter(css) {
            errors.push(format!("Empty property value: `{}`", m.as_str().trim()));
        }
        if double_colon_re().is_match(css) {
            warnings.push("Unexpected double colon".to_string());
        }

        ValidationReport::from_parts(errors, warnings)
    }

    fn check_empty_rules(css: &str) -> ValidationReport {
        let warnings = empty_rule_re()
            .captures_iter(css)
            .map(|caps| format!("Empty rule block: `{}`", caps[1].trim()))
            .collect();
        ValidationReport::from_parts(Vec::new(), warnings)
    }

    /// Checks one variable value against what its name implies.
    pub fn validate_variable(&self, name: &str, value: &str) -> Result<(), VariableError> {
        let name = StylesetVariables::normalize_name(name).to_lowercase();
        let value = value.trim();

        if dangerous_patterns().iter().any(|(re, _)| re.is_match(value)) {
            return Err(VariableError::Dangerous { name });
        }

        if name.contains("color") {
            if !is_color(value) {
                return Err(VariableError::InvalidColor {
                    name,
                    value: value.to_string(),
                });
            }
        } else if name.contains("font-family") || name.ends_with("-font") {
            if !is_font_family(value) {
                return Err(VariableError::InvalidFontFamily {
                    name,
                    value: value.to_string(),
                });
            }
        } else if SIZE_NAME_HINTS.iter().any(|hint| name.contains(hint)) && !is_size(value) {
            return Err(VariableError::InvalidSize {
                name,
                value: value.to_string(),
            });
        }

        Ok(())
    }

    /// Validates every variable of a map, one error per rejected value.
    pub fn validate_variables(&self, variables: &StylesetVariables) -> ValidationReport {
        let errors = variables
            .iter()
            .filter_map(|(name, value)| self.validate_variable(name, value).err())
            .map(|err| err.to_string())
            .collect();
        ValidationReport::from_parts(errors, Vec::new())
    }

    /// Flags class and id selectors lacking the namespace prefix. Advisory
    /// only: the report carries warnings and is always valid.
    pub fn check_namespace_compliance(&self, css: &str, namespace: &str) -> ValidationReport {
        let prefix = format!("{namespace}-");
        let mut warnings = Vec::new();

        for prelude in selector_preludes(css) {
            if NAMESPACE_EXEMPT.contains(&prelude.trim()) {
                continue;
            }
            for caps in selector_re().captures_iter(prelude) {
                let ident = &caps[1];
                if ident != namespace && !ident.starts_with(&prefix) {
                    warnings.push(format!(
                        "Selector `{}` is not namespaced with `{prefix}`",
                        &caps[0]
                    ));
                }
            }
        }

        ValidationReport::from_parts(Vec::new(), warnings)
    }
}

/// Text before each `{`, back to the previous brace or `;`.
fn selector_preludes(css: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;
    css.char_indices().filter_map(move |(i, c)| match c {
        '{' => {
            let prelude = &css[start..i];
            start = i + 1;
            Some(prelude)
        }
        '}' | ';' => {
            start = i + 1;
            None
        }
        _ => None,
    })
}

fn is_color(value: &str) -> bool {
    hex_color_re().is_match(value)
        || rgb_re().is_match(value)
        || hsl_re().is_match(value)
        || var_ref_re().is_match(value)
        || NAMED_COLORS.contains(&value.to_lowercase().as_str())
}

fn is_font_family(value: &str) -> bool {
    !value.is_empty() && (font_family_re().is_match(value) || var_ref_re().is_match(value))
}

fn is_size(value: &str) -> bool {
    size_re().is_match(value)
        || calc_re().is_match(value)
        || var_ref_re().is_match(value)
        || SIZE_KEYWORDS.contains(&value.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn clean_css_is_valid() {
        let report = StylesetValidator.validate(".pd-block { color: red; margin: 0 auto; }");

        assert_eq!(report, ValidationReport::from_parts(vec![], vec![]));
        assert!(report.valid);
    }

    #[test]
    fn unbalanced_braces_are_an_error() {
        let report = StylesetValidator.validate("body { color: red");

        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec!["Mismatched braces: 1 opening '{' vs 0 closing '}'"]
        );
    }

    #[test]
    fn unbalanced_parentheses_are_an_error() {
        let report = StylesetValidator.validate("a { width: calc(100% - 2px; }");

        assert!(!report.valid);
        assert!(report.errors[0].starts_with("Mismatched parentheses"));
    }

    #[rstest]
    #[case("div { width: expression(alert(1)); }", "expression()")]
    #[case("a { background: url(javascript:alert(1)); }", "javascript: URL")]
    #[case("a { behavior: url(x.htc); }", "behavior directive")]
    #[case("a { -moz-binding: url(x.xml); }", "-moz-binding directive")]
    #[case("a { background: url( 'data:image/png;base64,AAA' ); }", "data: URL")]
    fn dangerous_patterns_are_errors(#[case] css: &str, #[case] label: &str) {
        let report = StylesetValidator.validate(css);

        assert!(!report.valid);
        assert!(
            report
                .errors
                .contains(&format!("Dangerous pattern detected: {label}")),
            "{:?}",
            report.errors
        );
    }

    #[test]
    fn scroll_behavior_is_not_a_behavior_directive() {
        assert!(StylesetValidator.validate("html { scroll-behavior: smooth; }").valid);
    }

    #[test]
    fn missing_semicolon_only_warns() {
        let report = StylesetValidator.validate("a {\n  color: red\n  margin: 0;\n}");

        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec!["Possible missing semicolon between declarations"]
        );
    }

    #[test]
    fn empty_value_is_an_error() {
        let report = StylesetValidator.validate("a { color: ; }");

        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Empty property value: `color: ;`"]);
    }

    #[test]
    fn double_colon_warns_but_pseudo_elements_do_not() {
        assert!(StylesetValidator.validate("a::before { content: ''; }").warnings.is_empty());

        let report = StylesetValidator.validate("a { color:: red; }");
        assert!(report.valid);
        assert_eq!(report.warnings, vec!["Unexpected double colon"]);
    }

    #[test]
    fn each_empty_rule_warns() {
        let report = StylesetValidator.validate(".a {}\n.b { }\n.c { color: red; }");

        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec!["Empty rule block: `.a`", "Empty rule block: `.b`"]
        );
    }

    #[rstest]
    #[case("primary-color", "#fff", true)]
    #[case("--primary-color", "#2563EB", true)]
    #[case("primary-color", "#12345678", true)]
    #[case("primary-color", "#12345", false)]
    #[case("primary-color", "notacolor", false)]
    #[case("accent-color", "rgba(0, 0, 0, 0.5)", true)]
    #[case("accent-color", "hsl(210deg 40% 50%)", true)]
    #[case("accent-color", "hsla(210, 40%, 50%, 0.8)", true)]
    #[case("accent-color", "hsl(egg)", false)]
    #[case("accent-color", "hsla(ddd)", false)]
    #[case("accent-color", "var(--pd-primary-color)", true)]
    #[case("accent-color", "Transparent", true)]
    #[case("background-color", "url(javascript:alert(1))", false)]
    #[case("heading-font-family", "\"Noto Sans JP\", sans-serif", true)]
    #[case("heading-font-family", "", false)]
    #[case("heading-font-family", "Arial; } body { x", false)]
    #[case("body-font", "var(--pd-heading-font-family)", true)]
    #[case("border-radius", "8px", true)]
    #[case("spacing-unit", ".5rem", true)]
    #[case("container-width", "calc(100% - 2rem)", true)]
    #[case("section-spacing", "auto", true)]
    #[case("section-spacing", "0", true)]
    #[case("section-spacing", "12", false)]
    #[case("section-spacing", "big", false)]
    #[case("line-height", "1.7", true)]
    fn variable_values(#[case] name: &str, #[case] value: &str, #[case] ok: bool) {
        let result = StylesetValidator.validate_variable(name, value);
        assert_eq!(result.is_ok(), ok, "{name}: {value} -> {result:?}");
    }

    #[test]
    fn dangerous_variable_is_reported_as_such() {
        let err = StylesetValidator
            .validate_variable("primary-color", "expression(alert(1))")
            .unwrap_err();
        assert_eq!(
            err,
            VariableError::Dangerous {
                name: "primary-color".to_string()
            }
        );
    }

    #[test]
    fn default_variables_validate() {
        let report = StylesetValidator.validate_variables(&StylesetVariables::defaults());
        assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn namespace_compliance_flags_foreign_selectors() {
        let css = ":root { --pd-x: 1px; }\nbody { margin: 0; }\n.pd-block .title, #hero { color: #fff; }\n.pd { padding: .5rem; }";

        let report = StylesetValidator.check_namespace_compliance(css, "pd");

        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec![
                "Selector `.title` is not namespaced with `pd-`",
                "Selector `#hero` is not namespaced with `pd-`",
            ]
        );
    }
}
