//! Option lines and generic sections of an input file
//!
//! Sections other than the mesh sections (solver settings, problem type,
//! output options, ...) are kept as [`InputSection`]s: an ordered list of
//! [`InputLine`]s keyed by option name.

use std::fmt;

use crate::errors::{MeshError, MeshResult};

/// Column width of option names
const OPTION_NAME_WIDTH: usize = 35;

/// Header line of a section: the name right-aligned with dashes
///
/// ```
/// use mesh_core::input_file::section_header;
///
/// assert_eq!(section_header("END", 10), "-------END");
/// ```
pub fn section_header(name: &str, width: usize) -> String {
    format!("{}{}", "-".repeat(width.saturating_sub(name.len())), name)
}

/// How an option name and its value are separated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Space,
    Equals,
}

/// A single line of a generic section.
///
/// A line is an option (`NAME value` or `NAME = value`) with an optional
/// trailing `//` comment, or a line kept as-is when it is neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    name: String,
    value: String,
    comment: String,
    separator: Separator,
}

impl InputLine {
    /// An option line from a name and a value
    pub fn option(name: impl Into<String>, value: impl fmt::Display) -> Self {
        InputLine {
            name: name.into().trim().to_string(),
            value: value.to_string().trim().to_string(),
            comment: String::new(),
            separator: Separator::Space,
        }
    }

    /// Read one line of a section.
    ///
    /// A line with more than one `=` cannot be split into name and value and
    /// is a `Parse` error.
    pub fn parse(line: &str) -> MeshResult<Self> {
        let (body, comment) = match line.find("//") {
            Some(position) => (&line[..position], line[position..].to_string()),
            None => (line, String::new()),
        };

        if body.contains('=') {
            let parts: Vec<&str> = body.split('=').map(str::trim).collect();
            if parts.len() != 2 {
                return Err(MeshError::parse(line, "Expected a single '=' in an option line"));
            }
            return Ok(InputLine {
                name: parts[0].to_string(),
                value: parts[1].to_string(),
                comment,
                separator: Separator::Equals,
            });
        }

        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() == 2 {
            Ok(InputLine {
                name: tokens[0].to_string(),
                value: tokens[1].to_string(),
                comment,
                separator: Separator::Space,
            })
        } else {
            Ok(InputLine {
                name: String::new(),
                value: String::new(),
                comment: line.trim().to_string(),
                separator: Separator::Space,
            })
        }
    }

    /// Append a `// comment` to this line
    pub fn with_comment(mut self, comment: &str) -> Self {
        if self.comment.is_empty() {
            self.comment = format!("// {}", comment);
        } else {
            self.comment = format!("{} // {}", self.comment, comment);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Key under which a section stores this line.
    ///
    /// The option name, or for verbatim lines the line itself. Blank lines
    /// have no key and never collide.
    pub fn key(&self) -> Option<&str> {
        if !self.name.is_empty() {
            Some(&self.name)
        } else if !self.comment.is_empty() {
            Some(&self.comment)
        } else {
            None
        }
    }
}

impl fmt::Display for InputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            let separator = match self.separator {
                Separator::Space => "  ",
                Separator::Equals => "= ",
            };
            write!(f, "{:<width$} {}{}", self.name, separator, self.value, width = OPTION_NAME_WIDTH)?;
            if !self.comment.is_empty() {
                write!(f, " ")?;
            }
        }
        write!(f, "{}", self.comment)
    }
}

/// A named section of option lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSection {
    name: String,
    lines: Vec<InputLine>,
}

impl InputSection {
    pub fn new(name: impl Into<String>) -> Self {
        InputSection {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// A section filled from text lines.
    ///
    /// ```
    /// use mesh_core::input_file::InputSection;
    ///
    /// let section = InputSection::from_lines("PROBLEM SIZE", &["DIM 3"])?;
    /// assert_eq!(section.get("DIM").map(|line| line.value()), Some("3"));
    /// # Ok::<(), mesh_core::errors::MeshError>(())
    /// ```
    pub fn from_lines<S: AsRef<str>>(name: impl Into<String>, lines: &[S]) -> MeshResult<Self> {
        let mut section = Self::new(name);
        section.add_lines(lines, false)?;
        Ok(section)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[InputLine] {
        &self.lines
    }

    pub fn get(&self, key: &str) -> Option<&InputLine> {
        self.lines.iter().find(|line| line.key() == Some(key))
    }

    /// Add text lines; a leading and a trailing blank line are dropped.
    pub fn add_lines<S: AsRef<str>>(&mut self, lines: &[S], overwrite: bool) -> MeshResult<()> {
        let mut lines: Vec<&str> = lines.iter().map(|line| line.as_ref().trim()).collect();
        if lines.first().is_some_and(|line| line.is_empty()) {
            lines.remove(0);
        }
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        for line in lines {
            self.add_line(InputLine::parse(line)?, overwrite)?;
        }
        Ok(())
    }

    /// Add a line. An existing key is replaced in place if `overwrite` is
    /// set and is a `DuplicateEntry` error otherwise.
    pub fn add_line(&mut self, line: InputLine, overwrite: bool) -> MeshResult<()> {
        let existing = line
            .key()
            .and_then(|key| self.lines.iter().position(|other| other.key() == Some(key)));
        match existing {
            Some(_) if !overwrite => Err(MeshError::duplicate_entry(
                format!("option '{}'", line.key().unwrap_or_default()),
                format!("section {}", self.name),
            )),
            Some(position) => {
                self.lines[position] = line;
                Ok(())
            }
            None => {
                self.lines.push(line);
                Ok(())
            }
        }
    }

    /// Add every line of `other` to this section
    pub fn merge(&mut self, other: &InputSection, overwrite: bool) -> MeshResult<()> {
        for line in &other.lines {
            self.add_line(line.clone(), overwrite)?;
        }
        Ok(())
    }

    /// Header followed by the option lines
    pub fn render(&self, width: usize) -> Vec<String> {
        let mut lines = vec![section_header(&self.name, width)];
        lines.extend(self.lines.iter().map(InputLine::to_string));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_header_width() {
        let header = section_header("STRUCTURE ELEMENTS", 80);
        assert_eq!(header.len(), 80);
        assert!(header.ends_with("-STRUCTURE ELEMENTS"));
        assert_eq!(section_header("A VERY LONG NAME", 4), "A VERY LONG NAME");
    }

    #[test]
    fn test_parse_forms() {
        let spaced = InputLine::parse("NUMSTEP 10").unwrap();
        assert_eq!((spaced.name(), spaced.value()), ("NUMSTEP", "10"));

        let equals = InputLine::parse("MAXTIME = 1.5 // end").unwrap();
        assert_eq!((equals.name(), equals.value()), ("MAXTIME", "1.5"));
        assert_eq!(equals.to_string(), format!("{:<35} = 1.5 // end", "MAXTIME"));

        let verbatim = InputLine::parse("BOUNDINGBOX -1 -1 -1 1 1 1").unwrap();
        assert_eq!(verbatim.key(), Some("BOUNDINGBOX -1 -1 -1 1 1 1"));
        assert_eq!(verbatim.to_string(), "BOUNDINGBOX -1 -1 -1 1 1 1");

        assert!(InputLine::parse("A = B = C").is_err());
        assert_eq!(InputLine::parse("").unwrap().key(), None);
    }

    #[test]
    fn test_option_with_comment() {
        let line = InputLine::option("DIM", 3).with_comment("space dimension");
        assert_eq!(line.to_string(), format!("{:<35}   3 // space dimension", "DIM"));
    }

    #[test]
    fn test_duplicate_option() {
        let mut section = InputSection::from_lines("IO", &["", "OUTPUT_BIN No", ""]).unwrap();
        assert_eq!(section.lines().len(), 1);

        let err = section.add_line(InputLine::option("OUTPUT_BIN", "Yes"), false).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_ENTRY");

        section.add_line(InputLine::option("OUTPUT_BIN", "Yes"), true).unwrap();
        assert_eq!(section.get("OUTPUT_BIN").map(|l| l.value()), Some("Yes"));
        assert_eq!(section.lines().len(), 1);
    }

    #[test]
    fn test_blank_lines_never_collide() {
        let section = InputSection::from_lines("IO", &["A 1", "", "", "B 2"]).unwrap();
        assert_eq!(section.lines().len(), 4);
    }

    #[test]
    fn test_merge_and_render() {
        let mut base = InputSection::from_lines("SOLVER 1", &["SOLVER Superlu"]).unwrap();
        let extra = InputSection::from_lines("SOLVER 1", &["NAME Structure_Solver"]).unwrap();
        base.merge(&extra, false).unwrap();
        assert!(base.merge(&extra, false).is_err());

        let lines = base.render(20);
        assert_eq!(lines[0], "------------SOLVER 1");
        assert_eq!(lines.len(), 3);
    }
}
