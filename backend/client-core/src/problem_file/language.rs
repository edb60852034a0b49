//! Language names, file extensions and block-comment styles.

pub const DEFAULT_LANGUAGE: &str = "javascript";
pub const FALLBACK_EXTENSION: &str = ".txt";

/// Block comment delimiters for the problem header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub start: &'static str,
    pub end: &'static str,
}

const C_STYLE: CommentStyle = CommentStyle {
    start: "/*",
    end: "*/",
};
const PYTHON_STYLE: CommentStyle = CommentStyle {
    start: "\"\"\"",
    end: "\"\"\"",
};
const RUBY_STYLE: CommentStyle = CommentStyle {
    start: "=begin",
    end: "=end",
};
const RACKET_STYLE: CommentStyle = CommentStyle {
    start: "#|",
    end: "|#",
};
const ERLANG_STYLE: CommentStyle = CommentStyle {
    start: "%%",
    end: "%%",
};
const ELIXIR_STYLE: CommentStyle = CommentStyle {
    start: "@moduledoc \"\"\"",
    end: "\"\"\"",
};

/// (language, extension, comment style)
const LANGUAGES: &[(&str, &str, CommentStyle)] = &[
    ("javascript", ".js", C_STYLE),
    ("typescript", ".ts", C_STYLE),
    ("python", ".py", PYTHON_STYLE),
    ("python3", ".py", PYTHON_STYLE),
    ("java", ".java", C_STYLE),
    ("c", ".c", C_STYLE),
    ("cpp", ".cpp", C_STYLE),
    ("c++", ".cpp", C_STYLE),
    ("go", ".go", C_STYLE),
    ("golang", ".go", C_STYLE),
    ("rust", ".rs", C_STYLE),
    ("ruby", ".rb", RUBY_STYLE),
    ("swift", ".swift", C_STYLE),
    ("kotlin", ".kt", C_STYLE),
    ("scala", ".scala", C_STYLE),
    ("php", ".php", C_STYLE),
    ("csharp", ".cs", C_STYLE),
    ("c#", ".cs", C_STYLE),
    ("dart", ".dart", C_STYLE),
    ("racket", ".rkt", RACKET_STYLE),
    ("erlang", ".erl", ERLANG_STYLE),
    ("elixir", ".ex", ELIXIR_STYLE),
];

/// Judge language slug per file extension, used when reading a solution back.
const JUDGE_LANGUAGES: &[(&str, &str)] = &[
    (".js", "javascript"),
    (".ts", "typescript"),
    (".py", "python3"),
    (".java", "java"),
    (".cpp", "cpp"),
    (".c", "c"),
    (".go", "golang"),
    (".rs", "rust"),
    (".rb", "ruby"),
    (".swift", "swift"),
    (".kt", "kotlin"),
    (".scala", "scala"),
    (".php", "php"),
    (".cs", "csharp"),
    (".dart", "dart"),
    (".rkt", "racket"),
    (".erl", "erlang"),
    (".ex", "elixir"),
];

fn lookup(language: &str) -> Option<&'static (&'static str, &'static str, CommentStyle)> {
    let language = language.trim().to_lowercase();
    LANGUAGES.iter().find(|(name, _, _)| *name == language)
}

/// `.py` for `python3`, `.txt` for anything unknown.
pub fn extension_for(language: &str) -> &'static str {
    lookup(language).map_or(FALLBACK_EXTENSION, |(_, ext, _)| ext)
}

/// `/* */` for anything unknown.
pub fn comment_style_for(language: &str) -> CommentStyle {
    lookup(language).map_or(C_STYLE, |(_, _, style)| *style)
}

/// Judge language for a file extension (with or without the dot).
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.trim().to_lowercase();
    let extension = extension.strip_prefix('.').unwrap_or(&extension);
    JUDGE_LANGUAGES
        .iter()
        .find(|(ext, _)| ext.trim_start_matches('.') == extension)
        .map(|(_, language)| *language)
}
