//! Task text parsing.
//!
//! Input is one task per line, `<title>:<size>`. Both the colon and the
//! size are optional; a size that is missing, blank, non-numeric, or not
//! positive falls back to 1. Parsing never fails and there is no reject
//! path for malformed lines.

use crate::task::Task;

/// Convert raw multi-line task text into an ordered task sequence.
///
/// Output order matches input line order; no lines are merged, reordered,
/// or deduplicated. Whitespace in titles is preserved.
pub fn parse_tasks(text: &str) -> Vec<Task> {
    text.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> Task {
    match line.split_once(':') {
        Some((title, size_text)) => Task::new(title, parse_size(size_text)),
        None => Task::new(line, 1),
    }
}

fn parse_size(size_text: &str) -> u32 {
    match size_text.trim().parse::<i64>() {
        Ok(size) if size >= 1 => u32::try_from(size).unwrap_or(u32::MAX),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_and_size() {
        let tasks = parse_tasks("Start something:2");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Start something");
        assert_eq!(tasks[0].size, 2);
    }

    #[test]
    fn line_without_colon_defaults_to_size_one() {
        let tasks = parse_tasks("title");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "title");
        assert_eq!(tasks[0].size, 1);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let tasks = parse_tasks("deploy: staging:3");
        assert_eq!(tasks[0].title, "deploy");
        // " staging:3" is not a number, so the size falls back.
        assert_eq!(tasks[0].size, 1);
    }

    #[test]
    fn output_order_matches_input_order() {
        let tasks = parse_tasks("first:1\nsecond:2\nthird:3");
        let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn preserves_whitespace_in_titles() {
        let tasks = parse_tasks("  padded title :4");
        assert_eq!(tasks[0].title, "  padded title ");
        assert_eq!(tasks[0].size, 4);
    }

    #[test]
    fn every_parsed_size_is_at_least_one() {
        let inputs = [
            "plain",
            "zero:0",
            "negative:-3",
            "blank:",
            "blank colon: ",
            "word size:big",
            "",
            "a:1\n\nb:0\nc:-9\nd:junk",
            ":::",
            "float:2.5",
        ];
        for input in inputs {
            for task in parse_tasks(input) {
                assert!(task.size >= 1, "size < 1 for input {input:?}");
            }
        }
    }

    #[test]
    fn empty_text_yields_no_tasks() {
        assert!(parse_tasks("").is_empty());
    }

    #[test]
    fn blank_interior_lines_become_empty_titled_tasks() {
        let tasks = parse_tasks("a:2\n\nb:3");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].title, "");
        assert_eq!(tasks[1].size, 1);
    }
}
