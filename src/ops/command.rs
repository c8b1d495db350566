use std::path::Path;

/// A parsed colon command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:q` — quit, gated on unsaved changes
    Quit,
    /// `:q!` — quit unconditionally, discarding pending edits
    ForceQuit,
    /// `:w` — save without quitting
    Write,
    /// `:wq` — save, then quit regardless of the save outcome
    WriteQuit,
    /// `:tfn` — stage Title derived from each file's name
    TitleFromFilename,
    /// `:num` — stage sequential track numbers across the marked files
    NumberTracks,
    Unknown(String),
}

/// Parse one command line (without the leading `:`).
pub fn parse(input: &str) -> Command {
    match input.trim() {
        "q" => Command::Quit,
        "q!" => Command::ForceQuit,
        "w" => Command::Write,
        "wq" => Command::WriteQuit,
        "tfn" => Command::TitleFromFilename,
        "num" => Command::NumberTracks,
        other => Command::Unknown(other.to_string()),
    }
}

/// Derive a display title from a file name: the stem with `_` and `.`
/// turned into spaces and runs of whitespace collapsed.
pub fn title_from_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    stem.replace(['_', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(parse("q"), Command::Quit);
        assert_eq!(parse("q!"), Command::ForceQuit);
        assert_eq!(parse("w"), Command::Write);
        assert_eq!(parse("wq"), Command::WriteQuit);
        assert_eq!(parse("tfn"), Command::TitleFromFilename);
        assert_eq!(parse("num"), Command::NumberTracks);
        assert_eq!(parse(" wq "), Command::WriteQuit);
    }

    #[test]
    fn test_parse_unknown_echoes_input() {
        assert_eq!(parse("wqa"), Command::Unknown("wqa".to_string()));
        assert_eq!(parse(""), Command::Unknown(String::new()));
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(
            title_from_filename(&PathBuf::from("01_My_Song.m4a")),
            "01 My Song"
        );
        assert_eq!(
            title_from_filename(&PathBuf::from("dir/Already Spaced.m4a")),
            "Already Spaced"
        );
        assert_eq!(
            title_from_filename(&PathBuf::from("a.b.c.m4a")),
            "a b c"
        );
        assert_eq!(
            title_from_filename(&PathBuf::from("__gaps___in__name.mp3")),
            "gaps in name"
        );
    }
}
