//! Line-oriented level parser
//!
//! The parser makes one pass over the text. It tracks the current [`Section`]
//! and the placement that `pos`/`rot`/`scl` lines currently modify. Each line
//! is offered to [`RULES`] in order and the first rule whose keyword appears
//! and whose scope allows the current section handles it.
//!
//! ```text
//! arena
//! model helix
//! pos 1 2 3
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use glam::Vec3;

use super::error::LevelError;
use super::options::LevelOptions;
use super::placement::{Level, Placement};
use super::token::{self, Keyword, Line};

// ============================================================================
// Sections and dispatch table
// ============================================================================

/// Parser interpretation mode, set by section markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Header area before any marker
    #[default]
    Metadata,
    Turrets,
    Light,
    Background,
    /// Model placements
    Arena,
}

/// Where a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Any section
    Stateless,
    /// Only inside the given section
    In(Section),
}

impl Scope {
    fn allows(self, section: Section) -> bool {
        match self {
            Self::Stateless => true,
            Self::In(required) => required == section,
        }
    }
}

type Handler = fn(&mut LevelParser, Line<'_>, &str) -> Result<(), LevelError>;

/// One dispatch entry
pub struct Rule {
    pub keyword: Keyword,
    pub scope: Scope,
    handler: Handler,
}

/// Dispatch order. Stateless rules come first so that section-scoped
/// directives never shadow them; within a line the first match wins.
pub const RULES: &[Rule] = &[
    Rule {
        keyword: Keyword::Arena,
        scope: Scope::Stateless,
        handler: LevelParser::enter_arena,
    },
    Rule {
        keyword: Keyword::Pos,
        scope: Scope::Stateless,
        handler: LevelParser::apply_position,
    },
    Rule {
        keyword: Keyword::Rot,
        scope: Scope::Stateless,
        handler: LevelParser::apply_rotation,
    },
    Rule {
        keyword: Keyword::Scl,
        scope: Scope::Stateless,
        handler: LevelParser::apply_scale,
    },
    Rule {
        keyword: Keyword::Model,
        scope: Scope::In(Section::Arena),
        handler: LevelParser::declare_model,
    },
];

// ============================================================================
// Parser
// ============================================================================

/// Single-pass level reader
pub struct LevelParser {
    options: LevelOptions,
    section: Section,
    /// Index of the placement attribute lines apply to
    current: Option<usize>,
    level: Level,
}

impl LevelParser {
    pub fn new(name: impl Into<String>, options: LevelOptions) -> Self {
        Self {
            options,
            section: Section::default(),
            current: None,
            level: Level::new(name),
        }
    }

    /// Current section
    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Feed one raw line (1-based `number`).
    pub fn feed(&mut self, number: usize, raw: &str) -> Result<(), LevelError> {
        let max = self.options.max_line_len;
        let text = token::truncate(raw, max);
        if text.len() < raw.len() {
            if self.options.strict {
                return Err(LevelError::LineTooLong {
                    line: number,
                    len: raw.len(),
                    max,
                });
            }
            log::warn!("Line {number}: truncated {} bytes to {max}", raw.len());
        }

        let line = Line::new(number, text);
        for rule in RULES {
            let Some(rest) = line.after(rule.keyword) else {
                continue;
            };
            if rule.scope.allows(self.section) {
                return (rule.handler)(self, line, rest);
            }
        }

        if !text.trim().is_empty() {
            log::debug!("Line {number}: ignored in {:?} section", self.section);
        }
        Ok(())
    }

    /// Finish and hand back the parsed level
    #[must_use]
    pub fn finish(self) -> Level {
        self.level
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    fn enter_arena(&mut self, _line: Line<'_>, _rest: &str) -> Result<(), LevelError> {
        self.section = Section::Arena;
        Ok(())
    }

    fn apply_position(&mut self, line: Line<'_>, rest: &str) -> Result<(), LevelError> {
        let value = self.read_vec3(line, Keyword::Pos, rest)?;
        if let Some(placement) = self.current_mut() {
            placement.position = value;
        }
        Ok(())
    }

    fn apply_rotation(&mut self, line: Line<'_>, rest: &str) -> Result<(), LevelError> {
        let value = self.read_vec3(line, Keyword::Rot, rest)?;
        if let Some(placement) = self.current_mut() {
            placement.rotation = value;
        }
        Ok(())
    }

    fn apply_scale(&mut self, line: Line<'_>, rest: &str) -> Result<(), LevelError> {
        let value = self.read_vec3(line, Keyword::Scl, rest)?;
        if let Some(placement) = self.current_mut() {
            placement.scale = value;
        }
        Ok(())
    }

    fn declare_model(&mut self, line: Line<'_>, rest: &str) -> Result<(), LevelError> {
        let name = rest.trim();
        if name.is_empty() {
            if self.options.strict {
                return Err(LevelError::EmptyModelName { line: line.number });
            }
            log::warn!("Line {}: `model` without a name, skipped", line.number);
            // Attribute lines until the next model belong to nothing
            self.current = None;
            return Ok(());
        }

        let placement = Placement::new(name);
        log::debug!("Line {}: model {}", line.number, placement.asset_path.display());
        self.current = Some(self.level.placements.len());
        self.level.placements.push(placement);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn current_mut(&mut self) -> Option<&mut Placement> {
        self.current
            .and_then(|index| self.level.placements.get_mut(index))
    }

    fn read_vec3(
        &self,
        line: Line<'_>,
        keyword: Keyword,
        rest: &str,
    ) -> Result<Vec3, LevelError> {
        let (value, parsed) = token::parse_vec3(rest);
        if parsed < 3 {
            if self.options.strict {
                return Err(LevelError::MalformedNumber {
                    line: line.number,
                    keyword: keyword.as_str(),
                    text: rest.trim().to_string(),
                });
            }
            log::warn!(
                "Line {}: `{keyword}` read {parsed} of 3 numbers from {:?}",
                line.number,
                rest.trim()
            );
        }
        Ok(value)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Parse level text.
///
/// # Errors
///
/// Only in strict mode; otherwise anomalies are logged and skipped.
pub fn parse_str(
    name: impl Into<String>,
    text: &str,
    options: &LevelOptions,
) -> Result<Level, LevelError> {
    let mut parser = LevelParser::new(name, options.clone());
    for (index, line) in text.lines().enumerate() {
        parser.feed(index + 1, line)?;
    }
    Ok(parser.finish())
}

/// Read and parse a level file. The level is named after the file stem.
///
/// Bytes that are not UTF-8 are replaced with U+FFFD and a warning is logged.
///
/// # Errors
///
/// Returns [`LevelError::Io`] if the file cannot be read, plus the strict-mode
/// errors of [`parse_str`].
pub fn parse_file(path: impl AsRef<Path>, options: &LevelOptions) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        log::warn!("{}: invalid UTF-8 replaced", path.display());
    }
    let name = path
        .file_stem()
        .map_or_else(|| String::from("Untitled"), |stem| stem.to_string_lossy().into_owned());

    let level = parse_str(name, &text, options)?;
    log::info!(
        "Parsed level {} ({} placements)",
        path.display(),
        level.len()
    );
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Level {
        parse_str("test", text, &LevelOptions::default()).unwrap()
    }

    fn strict() -> LevelOptions {
        LevelOptions::default().with_strict(true)
    }

    #[test]
    fn test_two_models_in_order() {
        let level = parse(
            "arena\nmodel helix\npos 1 2 3\nrot 0 0 0\nscl 1 1 1\nmodel sphere\npos -1 0 0\n",
        );

        assert_eq!(level.len(), 2);
        let (helix, sphere) = (&level.placements[0], &level.placements[1]);
        assert_eq!(helix.model, "helix");
        assert_eq!(helix.asset_path, Path::new("Assets/Models/helix.obj"));
        assert_eq!(helix.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(helix.rotation, Vec3::ZERO);
        assert_eq!(helix.scale, Vec3::ONE);

        assert_eq!(sphere.model, "sphere");
        assert_eq!(sphere.position, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(sphere.rotation, Vec3::ZERO);
        assert_eq!(sphere.scale, Vec3::ONE);
    }

    #[test]
    fn test_pos_before_model_is_ignored() {
        let level = parse("arena\npos 5 5 5\n");
        assert!(level.is_empty());

        let level = parse("arena\npos 5 5 5\nmodel cube\n");
        assert_eq!(level.placements[0].position, Vec3::ZERO);
    }

    #[test]
    fn test_arena_wins_over_other_keywords() {
        // Would be a pos directive without the arena priority
        let level = parse("model early\narena pos 9 9 9 model\nmodel late\n");
        assert_eq!(level.len(), 1);
        assert_eq!(level.placements[0].model, "late");
        assert_eq!(level.placements[0].position, Vec3::ZERO);
    }

    #[test]
    fn test_first_attribute_keyword_wins() {
        let level = parse("arena\nmodel a\nrot 1 2 3 pos\nscl 2 2 2 rot\n");
        let a = &level.placements[0];
        // `pos` precedes `rot` in the table, so line 3 is a pos line
        assert_eq!(a.position, Vec3::ZERO);
        assert_eq!(a.rotation, Vec3::ZERO);
        // line 4: `rot` outranks `scl`
        assert_eq!(a.scale, Vec3::ONE);
    }

    #[test]
    fn test_attribute_beats_model_on_same_line() {
        let level = parse("arena\nmodel a\nmodel pos 3 3 3\n");
        assert_eq!(level.len(), 1);
        assert_eq!(level.placements[0].position, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_model_outside_arena_is_inert() {
        let level = parse("model helix\npos 1 1 1\n");
        assert!(level.is_empty());
    }

    #[test]
    fn test_attributes_apply_outside_arena() {
        // Attribute lines are stateless; only `model` needs the arena section
        let mut parser = LevelParser::new("test", LevelOptions::default());
        parser.feed(1, "arena").unwrap();
        parser.feed(2, "model a").unwrap();
        parser.section = Section::Light;
        parser.feed(3, "pos 4 5 6").unwrap();
        parser.feed(4, "model b").unwrap();

        let level = parser.finish();
        assert_eq!(level.len(), 1);
        assert_eq!(level.placements[0].position, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_model_name_keeps_inner_spaces() {
        let level = parse("arena\nmodel  big rock \n");
        assert_eq!(level.placements[0].model, "big rock");
        assert_eq!(
            level.placements[0].asset_path,
            Path::new("Assets/Models/big rock.obj")
        );
    }

    #[test]
    fn test_decorated_arena_marker() {
        for marker in ["arena:", "[arena]", "#arena", "-- arena --"] {
            let level = parse(&format!("{marker}\nmodel helix\npos 1 2 3\n"));
            assert_eq!(level.len(), 1, "{marker}");
            assert_eq!(level.placements[0].position, Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_substring_is_not_a_keyword() {
        let level = parse("arena\nmodel composite\nmodel rotor\n");
        assert_eq!(level.len(), 2);
        assert_eq!(level.placements[0].position, Vec3::ZERO);
        assert_eq!(level.placements[1].model, "rotor");
    }

    #[test]
    fn test_malformed_numbers_best_effort() {
        let level = parse("arena\nmodel a\npos 1 oops 3\nscl 2\n");
        let a = &level.placements[0];
        assert_eq!(a.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(a.scale, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_malformed_numbers_strict() {
        let err = parse_str("test", "arena\nmodel a\npos 1 oops 3\n", &strict()).unwrap_err();
        match err {
            LevelError::MalformedNumber {
                line,
                keyword,
                text,
            } => {
                assert_eq!(line, 3);
                assert_eq!(keyword, "pos");
                assert_eq!(text, "1 oops 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_model_name() {
        let level = parse("arena\nmodel a\nmodel\npos 7 7 7\n");
        assert_eq!(level.len(), 1);
        // pos after the nameless model has no target
        assert_eq!(level.placements[0].position, Vec3::ZERO);

        let err = parse_str("test", "arena\nmodel   \n", &strict()).unwrap_err();
        assert!(matches!(err, LevelError::EmptyModelName { line: 2 }));
    }

    #[test]
    fn test_long_line_truncated() {
        let options = LevelOptions::default().with_max_line_len(12);
        let level = parse_str("test", "arena\nmodel a\npos 1 2 3456789\n", &options).unwrap();
        // "pos 1 2 3456" survives the cut
        assert_eq!(level.placements[0].position, Vec3::new(1.0, 2.0, 3456.0));

        let strict = options.with_strict(true);
        let err = parse_str("test", "arena\nmodel a\npos 1 2 3456789\n", &strict).unwrap_err();
        assert!(matches!(
            err,
            LevelError::LineTooLong {
                line: 3,
                len: 15,
                max: 12
            }
        ));
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let level = parse("arena\r\n\r\nmodel helix\r\npos 1 2 3\r\n");
        assert_eq!(level.placements[0].model, "helix");
        assert_eq!(level.placements[0].position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_display_round_trip() {
        let level = parse(
            "[arena]\nmodel helix\npos 1 2 3\nrot 0.5 0 -1\nscl 2 2 2\nmodel  big rock \nmodel a model\n",
        );
        assert_eq!(level.len(), 3);
        assert_eq!(level.placements[2].model, "a model");
        assert!(level.placements.iter().all(Placement::has_writable_name));

        let reparsed = parse(&level.to_string());
        assert_eq!(reparsed.placements, level.placements);
    }

    #[test]
    fn test_stateless_rules_precede_scoped_rules() {
        let first_scoped = RULES
            .iter()
            .position(|rule| rule.scope != Scope::Stateless)
            .unwrap_or(RULES.len());
        assert!(RULES[first_scoped..]
            .iter()
            .all(|rule| rule.scope != Scope::Stateless));
    }

    #[test]
    fn test_parse_file_names_level_after_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Untitled.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "arena\nmodel helix\npos 1 2 3").unwrap();

        let level = parse_file(&path, &LevelOptions::default()).unwrap();
        assert_eq!(level.name, "Untitled");
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn test_parse_file_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cafe.txt");
        fs::write(&path, b"name Caf\xe9\narena\nmodel helix\npos 1 2 3\n").unwrap();

        let level = parse_file(&path, &LevelOptions::default()).unwrap();
        assert_eq!(level.len(), 1);
        assert_eq!(level.placements[0].position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_file("no/such/level.txt", &LevelOptions::default()).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}
