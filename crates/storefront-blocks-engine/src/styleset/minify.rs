//! CSS minification for served stylesets.
//!
//! Passes, in order:
//!
//! 1. strip `/* ... */` comments (repeated until none are left, so removing one
//!    comment cannot expose another)
//! 2. collapse whitespace runs to one space
//! 3. drop whitespace around `{ } : ; , > + ~`
//! 4. drop semicolons directly before `}`
//! 5. strip remaining newlines and trim
//!
//! No tokenizer is involved: string contents are not protected, which is
//! acceptable for generated variable blocks and theme CSS. The output is a
//! fixpoint: `minify(minify(css)) == minify(css)`.

use std::sync::OnceLock;

use regex::Regex;

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid comment regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*([{}:;,>+~])\s*").expect("Invalid punctuation regex"))
}

fn trailing_semicolon_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r";+\}").expect("Invalid semicolon regex"))
}

pub fn minify(css: &str) -> String {
    let mut out = css.to_string();
    while comment_re().is_match(&out) {
        out = comment_re().replace_all(&out, "").into_owned();
    }

    let out = whitespace_re().replace_all(&out, " ");
    let out = punctuation_re().replace_all(&out, "$1");
    let out = trailing_semicolon_re().replace_all(&out, "}");
    out.replace(['\n', '\r'], "").trim().to_string()
}
