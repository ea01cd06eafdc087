// src/parser/robot.rs
//! Minimal reader for plain-text Robot Framework suites.
//!
//! Test-case (and task) sections are read; each keyword call becomes a
//! [`StepRecord`]. From the settings section only the suite template is
//! used. Variables and user keyword sections are skipped.
//! Both the space-separated and the pipe-separated formats are understood.

use crate::error::{MetricsError, Result};
use crate::model::{StepRecord, SuiteRecord, TestRecord};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static SPACE_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\t\s*| {2,}").unwrap_or_else(|_| panic!("Invalid Regex")));
static PIPE_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\|(?:\s+|$)").unwrap_or_else(|_| panic!("Invalid Regex")));
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[$@&]\{.+\}\s*=?$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Control-structure markers. Lines opening with one of these are not calls.
const CONTROL_MARKERS: &[&str] = &[
    "FOR", ":FOR", "END", "IF", "ELSE IF", "ELSE", "WHILE", "TRY", "EXCEPT", "FINALLY", "BREAK",
    "CONTINUE", "RETURN", "VAR", "GROUP",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Settings,
    Tests,
    Other,
}

struct Line {
    indented: bool,
    cells: Vec<String>,
}

/// A body line of a test, resolved into steps once the template is known.
enum Item {
    /// A call, or a data row when the test is templated.
    Row(Vec<String>),
    /// `[Setup]` / `[Teardown]`, always a keyword call.
    Fixture(StepRecord),
}

impl Item {
    fn extend(&mut self, cells: impl IntoIterator<Item = String>) {
        match self {
            Self::Row(row) => row.extend(cells),
            Self::Fixture(step) => step.args.extend(cells),
        }
    }
}

struct PendingTest {
    name: String,
    items: Vec<Item>,
    /// `None` inherits the suite template; `Some(None)` is `[Template] NONE`.
    template: Option<Option<String>>,
}

impl PendingTest {
    fn resolve(self, suite_template: Option<&str>) -> TestRecord {
        let template = match self.template {
            Some(own) => own,
            None => suite_template.map(str::to_string),
        };

        let steps = self
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Fixture(step) => Some(step),
                // Templated rows are arguments to the template keyword.
                Item::Row(cells) => match &template {
                    Some(keyword) => Some(StepRecord {
                        keyword: keyword.clone(),
                        args: cells,
                    }),
                    None => call(cells),
                },
            })
            .collect();

        TestRecord {
            name: self.name,
            steps,
        }
    }
}

#[derive(Default)]
struct State {
    tests: Vec<PendingTest>,
    current: Option<PendingTest>,
    /// Whether a `...` line continues the last item.
    open_step: bool,
    saw_tests_section: bool,
    suite_template: Option<String>,
}

impl State {
    fn flush(&mut self) {
        if let Some(test) = self.current.take() {
            self.tests.push(test);
        }
        self.open_step = false;
    }

    fn start_test(&mut self, name: String) {
        self.flush();
        self.current = Some(PendingTest {
            name,
            items: Vec::new(),
            template: None,
        });
    }

    fn setting(&mut self, cells: &[String]) {
        let Some(name) = cells.first() else {
            return;
        };
        let name: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if matches!(name.as_str(), "testtemplate" | "tasktemplate") {
            self.suite_template = template_keyword(cells.get(1));
        }
    }

    fn body(&mut self, mut cells: Vec<String>) {
        let Some(test) = self.current.as_mut() else {
            return;
        };

        // Old-style loop bodies prefix calls with an escaped empty cell.
        let skip = cells.iter().take_while(|c| c.as_str() == "\\").count();
        cells.drain(..skip);
        let Some(first) = cells.first() else {
            return;
        };

        if first == "..." {
            if self.open_step {
                if let Some(item) = test.items.last_mut() {
                    item.extend(cells.into_iter().skip(1));
                }
            }
            return;
        }

        self.open_step = false;

        if first.starts_with('[') && first.ends_with(']') {
            let setting = first[1..first.len() - 1].trim().to_ascii_lowercase();
            match setting.as_str() {
                "setup" | "teardown" => {
                    if let Some(keyword) = template_keyword(cells.get(1)) {
                        test.items.push(Item::Fixture(StepRecord {
                            keyword,
                            args: cells[2..].to_vec(),
                        }));
                        self.open_step = true;
                    }
                }
                "template" => test.template = Some(template_keyword(cells.get(1))),
                _ => {}
            }
            return;
        }

        if CONTROL_MARKERS.contains(&first.as_str()) {
            return;
        }

        test.items.push(Item::Row(cells));
        self.open_step = true;
    }
}

/// A keyword named in a setting, `None` when absent or `NONE`.
fn template_keyword(cell: Option<&String>) -> Option<String> {
    cell.filter(|k| !k.eq_ignore_ascii_case("NONE")).cloned()
}

/// Splits a plain call line into keyword and arguments, dropping leading
/// variable assignments.
fn call(cells: Vec<String>) -> Option<StepRecord> {
    let assigned = cells.iter().take_while(|c| ASSIGNMENT.is_match(c)).count();
    let mut rest = cells.into_iter().skip(assigned);
    rest.next().map(|keyword| StepRecord {
        keyword,
        args: rest.collect(),
    })
}

/// Parses one `.robot` file into a suite record.
///
/// Returns `Ok(None)` for files without a test-case section (resource files).
/// Templated tests (`[Template]`, or `Test Template` / `Task Template` in the
/// settings) record one call of the template keyword per data row.
///
/// # Errors
/// Returns [`MetricsError::Parse`] if a keyword call appears in a test-case
/// section before any test name.
pub fn parse(content: &str, suite: &str, path: &Path) -> Result<Option<SuiteRecord>> {
    let mut state = State::default();
    let mut section = Section::Other;

    for (idx, raw) in content.lines().enumerate() {
        let raw = raw.trim_end_matches('\r');

        let header = if raw.starts_with('|') {
            raw.trim_start_matches('|').trim_start()
        } else {
            raw
        };
        if header.starts_with('*') {
            state.flush();
            section = classify_header(header);
            state.saw_tests_section |= section == Section::Tests;
            continue;
        }

        let Some(line) = split_line(raw) else {
            continue;
        };

        match section {
            Section::Settings if !line.indented => state.setting(&line.cells),
            Section::Tests => {
                if !line.indented {
                    let mut cells = line.cells.into_iter();
                    if let Some(name) = cells.next() {
                        state.start_test(name);
                        let rest: Vec<String> = cells.collect();
                        if !rest.is_empty() {
                            state.body(rest);
                        }
                    }
                    continue;
                }

                if state.current.is_none() {
                    return Err(MetricsError::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: "keyword call before any test name".to_string(),
                    });
                }
                state.body(line.cells);
            }
            _ => {}
        }
    }

    state.flush();
    if !state.saw_tests_section {
        return Ok(None);
    }
    let suite_template = state.suite_template.as_deref();
    Ok(Some(SuiteRecord {
        name: suite.to_string(),
        tests: state
            .tests
            .into_iter()
            .map(|test| test.resolve(suite_template))
            .collect(),
    }))
}

fn classify_header(line: &str) -> Section {
    let name: String = line
        .trim_matches(|c: char| c == '*' || c == '|' || c.is_whitespace())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    match name.as_str() {
        "testcases" | "testcase" | "tasks" | "task" => Section::Tests,
        "settings" | "setting" => Section::Settings,
        _ => Section::Other,
    }
}

/// Splits a line into cells, dropping comments. `None` for blank lines.
fn split_line(raw: &str) -> Option<Line> {
    let (indented, cells): (bool, Vec<&str>) = if raw.starts_with("| ") || raw == "|" {
        let body = raw[1..].trim_end().trim_end_matches('|');
        let cells: Vec<&str> = PIPE_SEP.split(body).map(str::trim).collect();
        (cells.first().is_some_and(|c| c.is_empty()), cells)
    } else {
        let indented = raw.starts_with(' ') || raw.starts_with('\t');
        (indented, SPACE_SEP.split(raw.trim()).map(str::trim).collect())
    };

    let cells: Vec<String> = cells
        .into_iter()
        .filter(|c| !c.is_empty())
        .take_while(|c| !c.starts_with('#'))
        .map(str::to_string)
        .collect();

    if cells.is_empty() {
        None
    } else {
        Some(Line { indented, cells })
    }
}
